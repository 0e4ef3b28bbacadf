use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jalsah::config::Config;
use jalsah::export::write_sessions_csv;
use jalsah::report::{self, DashboardFilter};
use jalsah::report::query::SessionQuery;
use jalsah::schedule::{
    self, FixedToday, HijriDate, SystemToday, TodayProvider, retain_upcoming,
};
use jalsah::session::Session;
use jalsah::sheet::{SheetApi, SheetClient, sessions_from_rows};
use jalsah::state::Registry;

#[derive(Parser)]
#[command(
    name = "jalsah",
    version,
    about = "Court-session schedule tracker: Hijri calendar, double-booking detection, and assignment reports over the office sheet."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Day-by-day session counts with conflict and staffing badges.
    Calendar {
        /// Include past days instead of upcoming days only.
        #[arg(long)]
        all: bool,
    },
    /// Sessions on one date (dd-mm-yyyy), with the per-circuit breakdown.
    Day {
        date: String,
        #[arg(long)]
        conflicts_only: bool,
    },
    /// Every detected double-booking, ordered by date and time.
    Conflicts,
    /// Headline stats plus month, court, and circuit distributions.
    Dashboard {
        /// Subset to describe: all, conflicts, assigned, or unassigned.
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// The assignments table, with optional filters.
    Sessions {
        #[arg(long)]
        circuit: Option<String>,
        #[arg(long)]
        lawyer: Option<String>,
        #[arg(long)]
        plaintiff: Option<String>,
        /// Canonical date, dd-mm-yyyy.
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        conflicts_only: bool,
    },
    /// Per-representative audit report.
    Lawyers,
    /// Per-plaintiff audit report.
    Plaintiffs,
    /// Assign a representative to a session.
    Assign { id: i64, representative: String },
    /// Export the session table as CSV.
    Export {
        path: PathBuf,
        #[arg(long)]
        conflicts_only: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let client = SheetClient::new(config.api_url.clone());

    let rows = client
        .fetch_rows()
        .await
        .context("could not load the session sheet; check the connection and retry")?;
    let mut registry = Registry::from_sessions(sessions_from_rows(
        rows,
        &config.approved_plaintiffs,
    ));

    match cli.command {
        Command::Calendar { all } => {
            let mut days = report::calendar_days(registry.sessions());
            if !all {
                days = retain_upcoming(days, resolve_today(&config), |day| day.date.as_str());
            }
            if days.is_empty() {
                println!("no session days to show");
                return Ok(());
            }
            println!("{:<12} {:>8} {:>10} {:>8}", "date", "total", "conflicts", "reps");
            for day in days {
                println!(
                    "{:<12} {:>8} {:>10} {:>8}",
                    day.date, day.total, day.conflicts, day.representatives
                );
            }
        }
        Command::Day {
            date,
            conflicts_only,
        } => {
            let on_date: Vec<&Session> = registry
                .sessions()
                .iter()
                .filter(|s| s.date.trim() == date.trim())
                .collect();
            if on_date.is_empty() {
                bail!("no sessions on {date}");
            }
            let conflicts = schedule::conflict_ids(on_date.iter().copied());
            let mut rows: Vec<&Session> = if conflicts_only {
                on_date
                    .iter()
                    .copied()
                    .filter(|s| conflicts.contains(&s.id))
                    .collect()
            } else {
                on_date.clone()
            };
            schedule::sort_sessions_by_time(&mut rows);

            println!("{date}: {} of {} sessions", rows.len(), on_date.len());
            for (circuit, count) in report::circuit_breakdown(rows.iter().copied()) {
                println!("  {circuit}: {count}");
            }
            println!();
            print_sessions(&rows, false, &conflicts);
        }
        Command::Conflicts => {
            let rows = schedule::conflict_sessions(registry.sessions());
            if rows.is_empty() {
                println!("no double-booked slots detected");
                return Ok(());
            }
            let ids: HashSet<i64> = rows.iter().map(|s| s.id).collect();
            println!("{} sessions in double-booked slots", rows.len());
            print_sessions(&rows, true, &ids);
        }
        Command::Dashboard { filter } => {
            let Some(filter) = DashboardFilter::parse(&filter) else {
                bail!("unknown dashboard filter '{filter}' (use all, conflicts, assigned, or unassigned)");
            };
            let stats = report::dashboard_stats(registry.sessions());
            println!("total {}, assigned {}, unassigned {}, in conflict {}", stats.total, stats.assigned, stats.unassigned, stats.conflicts);

            let subset = filter.apply(registry.sessions());
            println!("\nby month ({}):", filter.as_str());
            for (_, name, count) in report::by_month(subset.iter().copied()) {
                if count > 0 {
                    println!("  {name}: {count}");
                }
            }
            println!("\nby court:");
            for (court, count) in report::by_court(subset.iter().copied()) {
                println!("  {court}: {count}");
            }
            println!("\nby circuit:");
            for (circuit, count) in report::by_circuit(subset.iter().copied()) {
                println!("  {circuit}: {count}");
            }
        }
        Command::Sessions {
            circuit,
            lawyer,
            plaintiff,
            date,
            conflicts_only,
        } => {
            let query = SessionQuery {
                circuit,
                representative: lawyer,
                plaintiff,
                date,
                conflicts_only,
            };
            let mut rows = query.apply(registry.sessions());
            schedule::sort_sessions(&mut rows);
            let conflicts = schedule::conflict_ids(registry.sessions());
            print_sessions(&rows, true, &conflicts);
        }
        Command::Lawyers => print_entity_report(&report::lawyer_report(registry.sessions())),
        Command::Plaintiffs => print_entity_report(&report::plaintiff_report(registry.sessions())),
        Command::Assign { id, representative } => {
            if registry.get(id).is_none() {
                bail!("no session with id {id}");
            }
            client.submit_assignment(id, &representative).await;
            registry.assign(id, &representative);
            println!(
                "session {id} assigned to {representative} locally; the sheet API does not \
                 acknowledge updates, so remote delivery is unconfirmed"
            );
        }
        Command::Export {
            path,
            conflicts_only,
        } => {
            let mut rows: Vec<&Session> = if conflicts_only {
                schedule::conflict_sessions(registry.sessions())
            } else {
                registry.sessions().iter().collect()
            };
            schedule::sort_sessions(&mut rows);
            let file = std::fs::File::create(&path)
                .with_context(|| format!("could not create {}", path.display()))?;
            write_sessions_csv(file, &rows)
                .with_context(|| format!("could not write {}", path.display()))?;
            println!("wrote {} sessions to {}", rows.len(), path.display());
        }
    }

    Ok(())
}

fn resolve_today(config: &Config) -> Option<HijriDate> {
    match config.today_override {
        Some(pin) => FixedToday(pin).today(),
        None => SystemToday.today(),
    }
}

fn print_sessions(rows: &[&Session], show_date: bool, conflicts: &HashSet<i64>) {
    if rows.is_empty() {
        println!("no sessions to show");
        return;
    }
    for session in rows {
        let marker = if conflicts.contains(&session.id) { "!" } else { " " };
        let when = if show_date {
            format!("{} {} {}", session.date, session.time, session.period)
        } else {
            format!("{} {}", session.time, session.period)
        };
        println!(
            "{marker} #{:<6} {when:<24} {:<12} {} | {} | {} | {}",
            session.id,
            session.case_number,
            session.plaintiff,
            session.court,
            session.circuit,
            if session.is_assigned() {
                session.representative()
            } else {
                "(unassigned)"
            }
        );
    }
}

fn print_entity_report(entries: &[report::EntityStats<'_>]) {
    if entries.is_empty() {
        println!("no entries to report");
        return;
    }
    for entry in entries {
        println!("{}: {} sessions, {} in conflict", entry.name, entry.total, entry.conflict_count);
        for group in &entry.conflicts {
            let ids: Vec<String> = group.sessions.iter().map(|s| format!("#{}", s.id)).collect();
            println!("  {} {} {}: {}", group.date, group.time, group.period, ids.join(", "));
        }
    }
}
