//! # models::notification
//!
//! Human-readable toast emitted after every successful store mutation.

use serde::{Deserialize, Serialize};

use crate::models::MarginSide;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title:       String,
    pub description: String,
}

impl Notification {
    pub fn margin_updated(service_name: &str, side: MarginSide, value: f64) -> Self {
        Self {
            title:       "Margin updated".to_string(),
            description: format!("{service_name}: {side} margin updated to {value}%"),
        }
    }

    pub fn defaults_restored(service_name: &str) -> Self {
        Self {
            title:       "Defaults restored".to_string(),
            description: format!("{service_name}: values restored to default configuration"),
        }
    }
}
