//! The session record as the upstream spreadsheet publishes it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Period tag for the morning half of the 12-hour clock (Arabic "ص").
pub const MORNING_TAG: &str = "ص";
/// Period tag for the evening half of the 12-hour clock (Arabic "م").
pub const EVENING_TAG: &str = "م";

/// One court session, keyed by the id the upstream sheet assigned.
///
/// Field names map the sheet's Arabic column headers. The three canonical
/// fields (`date`, `time`, `period`) arrive as raw spreadsheet stamps and are
/// rewritten in place by `schedule::normalize` during ingestion: `date`
/// becomes a zero-padded Hijri `dd-mm-yyyy`, `time` a zero-padded 12-hour
/// `HH:MM`, and `period` one of the two tags above.
///
/// Only `representative` ever mutates after ingestion; ids are never
/// generated locally and records are never deleted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    #[serde(rename = "رقم الدعوى", default, deserialize_with = "string_or_number")]
    pub case_number: String,
    #[serde(rename = "المحكمة", default)]
    pub court: String,
    #[serde(rename = "الدائرة", default)]
    pub circuit: String,
    #[serde(rename = "نوع الموعد", default)]
    pub appointment_type: String,
    #[serde(rename = "المدعي", default)]
    pub plaintiff: String,
    #[serde(rename = "المدعي عليه", default)]
    pub defendant: String,
    /// Assigned representative; empty or whitespace-only means unassigned.
    #[serde(rename = "التكليف", default)]
    pub representative: String,
    #[serde(rename = "اليوم", default)]
    pub weekday: String,
    /// Hijri month number, 1-12. Zero when the sheet cell was unusable.
    #[serde(rename = "الشهر", default, deserialize_with = "lenient_month")]
    pub month: u8,
    #[serde(rename = "التاريخ", default)]
    pub date: String,
    #[serde(rename = "وقت الموعد", default)]
    pub time: String,
    #[serde(rename = "ص- م", default)]
    pub period: String,
}

impl Session {
    pub fn representative(&self) -> &str {
        self.representative.trim()
    }

    pub fn plaintiff(&self) -> &str {
        self.plaintiff.trim()
    }

    pub fn is_assigned(&self) -> bool {
        !self.representative.trim().is_empty()
    }
}

/// The sheet serializes some numeric columns as numbers and others as text,
/// depending on how the cell was typed. Accept either.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_month<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let month = match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    };
    if (1..=12).contains(&month) {
        Ok(month as u8)
    } else {
        Ok(0)
    }
}
