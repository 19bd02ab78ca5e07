//! # models::change
//!
//! [`ChangeRecord`]: one audit-log entry, written on every margin edit or
//! restore and never modified afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::MarginSide;

/// Note attached to every restore entry.
pub const RESTORE_NOTE: &str = "Restored to default values";

// ─── ChangeType ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Buy,
    Sell,
    Restore,
}

impl From<MarginSide> for ChangeType {
    fn from(side: MarginSide) -> Self {
        match side {
            MarginSide::Buy  => ChangeType::Buy,
            MarginSide::Sell => ChangeType::Sell,
        }
    }
}

// ─── ChangeValue ──────────────────────────────────────────────────────────────

/// A margin for buy/sell entries, a `"buy:X% sell:Y%"` summary for restores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChangeValue {
    Margin(f64),
    Summary(String),
}

/// Both margins of a service in one string, e.g. `buy:5% sell:3%`.
pub fn margin_summary(buy_margin: f64, sell_margin: f64) -> String {
    format!("buy:{buy_margin}% sell:{sell_margin}%")
}

// ─── ChangeRecord ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub id:             Uuid,
    pub user:           String,
    pub service_name:   String,
    pub timestamp:      DateTime<Utc>,
    pub change_type:    ChangeType,
    pub previous_value: ChangeValue,
    pub new_value:      ChangeValue,
    #[serde(default)]
    pub notes:          Option<String>,
}

impl ChangeRecord {
    /// Entry for a single-side margin edit.
    pub fn margin_change(
        user:         &str,
        service_name: &str,
        side:         MarginSide,
        previous:     f64,
        new:          f64,
        notes:        Option<String>,
    ) -> Self {
        Self {
            id:             Uuid::new_v4(),
            user:           user.to_string(),
            service_name:   service_name.to_string(),
            timestamp:      Utc::now(),
            change_type:    side.into(),
            previous_value: ChangeValue::Margin(previous),
            new_value:      ChangeValue::Margin(new),
            notes:          notes.filter(|n| !n.trim().is_empty()),
        }
    }

    /// Entry for a restore to defaults; values are [`margin_summary`] strings.
    pub fn restore(user: &str, service_name: &str, previous: String, restored: String) -> Self {
        Self {
            id:             Uuid::new_v4(),
            user:           user.to_string(),
            service_name:   service_name.to_string(),
            timestamp:      Utc::now(),
            change_type:    ChangeType::Restore,
            previous_value: ChangeValue::Summary(previous),
            new_value:      ChangeValue::Summary(restored),
            notes:          Some(RESTORE_NOTE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_formats_whole_and_half_margins() {
        assert_eq!(margin_summary(7.0, 5.0), "buy:7% sell:5%");
        assert_eq!(margin_summary(7.5, -2.0), "buy:7.5% sell:-2%");
    }

    #[test]
    fn test_blank_notes_are_dropped() {
        let r = ChangeRecord::margin_change("op", "BTC", MarginSide::Buy, 1.0, 2.0, Some("  ".into()));
        assert_eq!(r.notes, None);
        assert_eq!(r.change_type, ChangeType::Buy);
    }

    #[test]
    fn test_values_serialize_untagged() {
        let r = ChangeRecord::restore("op", "BTC", "buy:7% sell:5%".into(), "buy:5% sell:3%".into());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["change_type"], "restore");
        assert_eq!(json["previous_value"], "buy:7% sell:5%");

        let r = ChangeRecord::margin_change("op", "BTC", MarginSide::Sell, 4.0, 6.5, None);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["new_value"], 6.5);
    }
}
