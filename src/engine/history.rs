//! # engine::history
//!
//! Audit-log queries across every service: newest entries first, optionally
//! narrowed to one service and/or a user-name fragment.

use serde::Deserialize;

use crate::models::{ChangeRecord, Service};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryFilter {
    /// Exact service name. `None` means all services.
    #[serde(default)]
    pub service: Option<String>,
    /// Case-insensitive substring of the user name.
    #[serde(default)]
    pub user:    Option<String>,
}

impl HistoryFilter {
    fn matches(&self, record: &ChangeRecord) -> bool {
        let service_ok = match self.service.as_deref() {
            None | Some("") => true,
            Some(name)      => record.service_name == name,
        };
        let user_ok = match self.user.as_deref() {
            None | Some("") => true,
            Some(fragment)  => record.user.to_lowercase().contains(&fragment.to_lowercase()),
        };
        service_ok && user_ok
    }
}

/// Every matching record, most recent first. Records with equal timestamps
/// keep the order they were appended in (reversed).
pub fn collect<'a>(services: &'a [Service], filter: &HistoryFilter) -> Vec<&'a ChangeRecord> {
    let mut records: Vec<&ChangeRecord> = services
        .iter()
        .flat_map(|s| s.history().iter())
        .filter(|r| filter.matches(r))
        .collect();

    records.reverse();
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    records
}

/// Distinct users that appear in any history, in first-seen order.
pub fn users(services: &[Service]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in services.iter().flat_map(|s| s.history().iter()) {
        if !seen.iter().any(|u| u == &record.user) {
            seen.push(record.user.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use crate::models::{MarginSide, ServiceSeed, VolumeProfile};

    fn service(id: &str, name: &str) -> Service {
        Service::from_seed(&ServiceSeed {
            id:            id.into(),
            name:          name.into(),
            icon:          None,
            color:         None,
            base_price:    10.0,
            average_price: 10.0,
            buy_margin:    1.0,
            sell_margin:   1.0,
            volumes:       VolumeProfile::default(),
        })
        .unwrap()
    }

    fn record(user: &str, svc: &str, minutes_ago: i64) -> ChangeRecord {
        let mut r = ChangeRecord::margin_change(user, svc, MarginSide::Buy, 1.0, 2.0, None);
        r.timestamp = Utc::now() - Duration::minutes(minutes_ago);
        r
    }

    fn fixture() -> Vec<Service> {
        let mut btc = service("btc", "Bitcoin");
        btc.push_record(record("alice", "Bitcoin", 30));
        btc.push_record(record("bob", "Bitcoin", 10));

        let mut eth = service("eth", "Ethereum");
        eth.push_record(record("Alice.Ops", "Ethereum", 20));

        vec![btc, eth]
    }

    #[test]
    fn test_newest_first_across_services() {
        let services = fixture();
        let all = collect(&services, &HistoryFilter::default());
        let users: Vec<&str> = all.iter().map(|r| r.user.as_str()).collect();
        assert_eq!(users, vec!["bob", "Alice.Ops", "alice"]);
    }

    #[test]
    fn test_filter_by_service_and_user() {
        let services = fixture();

        let btc = collect(&services, &HistoryFilter { service: Some("Bitcoin".into()), user: None });
        assert_eq!(btc.len(), 2);

        let alice = collect(&services, &HistoryFilter { service: None, user: Some("ALICE".into()) });
        assert_eq!(alice.len(), 2);

        let both = collect(&services, &HistoryFilter {
            service: Some("Ethereum".into()),
            user:    Some("alice".into()),
        });
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].service_name, "Ethereum");
    }

    #[test]
    fn test_unique_users_first_seen() {
        assert_eq!(users(&fixture()), vec!["alice", "bob", "Alice.Ops"]);
    }
}
