//! Runtime configuration: the API endpoint, the plaintiff allow-list, and
//! the optional Hijri "today" pin.

mod helpers;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::ConfigError;
use crate::schedule::HijriDate;

pub use helpers::{optional_env, require_env};

const API_URL_KEY: &str = "SHEET_API_URL";
const PLAINTIFFS_FILE_KEY: &str = "APPROVED_PLAINTIFFS_FILE";
const TODAY_KEY: &str = "HIJRI_TODAY";

#[derive(Debug, Deserialize)]
struct PlaintiffList {
    plaintiffs: Vec<String>,
}

static BUNDLED_PLAINTIFFS: LazyLock<Result<Vec<String>, String>> =
    LazyLock::new(|| parse_plaintiffs(include_str!("approved_plaintiffs.toml")));

fn parse_plaintiffs(raw: &str) -> Result<Vec<String>, String> {
    let parsed: PlaintiffList =
        toml::from_str(raw).map_err(|e| format!("invalid plaintiffs TOML: {e}"))?;
    let plaintiffs: Vec<String> = parsed
        .plaintiffs
        .into_iter()
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect();
    if plaintiffs.is_empty() {
        return Err("plaintiffs list must not be empty".to_owned());
    }
    Ok(plaintiffs)
}

/// Everything the binary needs to run, assembled once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// The Apps Script endpoint in front of the sheet.
    pub api_url: Url,
    /// Allow-list applied at ingestion. Maintained outside the engine.
    pub approved_plaintiffs: Vec<String>,
    /// Pins the upcoming-filter's "today" instead of converting the system
    /// clock. Mostly for audits of past schedules and for tests.
    pub today_override: Option<HijriDate>,
}

impl Config {
    /// Read configuration from the environment (after `dotenvy` has had its
    /// chance to populate it).
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = require_env(API_URL_KEY)?;
        let api_url = Url::parse(&raw_url).map_err(|e| ConfigError::InvalidValue {
            key: API_URL_KEY.to_owned(),
            message: e.to_string(),
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: API_URL_KEY.to_owned(),
                message: format!("unsupported scheme '{}'", api_url.scheme()),
            });
        }

        let today_override = match optional_env(TODAY_KEY) {
            Some(raw) => Some(raw.parse::<HijriDate>().map_err(|()| {
                ConfigError::InvalidValue {
                    key: TODAY_KEY.to_owned(),
                    message: format!("expected dd-mm-yyyy, got '{raw}'"),
                }
            })?),
            None => None,
        };

        Ok(Self {
            api_url,
            approved_plaintiffs: load_approved_plaintiffs()?,
            today_override,
        })
    }
}

/// Resolve the allow-list: an explicit override file wins, then a
/// `plaintiffs.toml` under the user config directory, then the bundled
/// default.
fn load_approved_plaintiffs() -> Result<Vec<String>, ConfigError> {
    if let Some(path) = optional_env(PLAINTIFFS_FILE_KEY) {
        return read_plaintiffs_file(Path::new(&path));
    }
    if let Some(path) = user_plaintiffs_path() {
        if path.is_file() {
            return read_plaintiffs_file(&path);
        }
    }
    match &*BUNDLED_PLAINTIFFS {
        Ok(plaintiffs) => Ok(plaintiffs.clone()),
        Err(err) => Err(ConfigError::PlaintiffList(err.clone())),
    }
}

fn user_plaintiffs_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("jalsah").join("plaintiffs.toml"))
}

fn read_plaintiffs_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    debug!(path = %path.display(), "loading approved plaintiffs");
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::PlaintiffFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_plaintiffs(&raw).map_err(ConfigError::PlaintiffList)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::{BUNDLED_PLAINTIFFS, parse_plaintiffs, read_plaintiffs_file};

    #[test]
    fn bundled_list_parses_and_is_non_empty() {
        let plaintiffs = BUNDLED_PLAINTIFFS
            .as_ref()
            .expect("bundled list should parse");
        assert_eq!(plaintiffs.len(), 2);
    }

    #[test]
    fn names_are_trimmed_and_blank_entries_dropped() {
        let plaintiffs =
            parse_plaintiffs("plaintiffs = [\" شركة أ \", \"\", \"شركة ب\"]").expect("valid list");
        assert_eq!(plaintiffs, vec!["شركة أ".to_owned(), "شركة ب".to_owned()]);
    }

    #[test]
    fn an_empty_list_is_rejected() {
        assert!(parse_plaintiffs("plaintiffs = []").is_err());
        assert!(parse_plaintiffs("not toml at all [").is_err());
    }

    #[test]
    fn override_file_is_read_and_parsed() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "plaintiffs = [\"شركة الاختبار\"]").expect("write");
        let plaintiffs = read_plaintiffs_file(file.path()).expect("file should parse");
        assert_eq!(plaintiffs, vec!["شركة الاختبار".to_owned()]);
    }

    #[test]
    fn missing_override_file_is_a_config_error() {
        assert!(read_plaintiffs_file(std::path::Path::new("/definitely/not/here.toml")).is_err());
    }
}
