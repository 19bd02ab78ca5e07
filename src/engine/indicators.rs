//! # engine::indicators
//!
//! Volume and revenue indicators for the performance view.
//!
//! The estimated revenue of a service is its 24h volume multiplied by the
//! buy/sell spread expressed as a fraction of the base price:
//!
//! ```text
//! spread_pct = (sell_price - buy_price) / base_price * 100
//! revenue    = volume_24h * spread_pct / 100
//! ```

use serde::{Deserialize, Serialize};

use crate::models::Service;

// ─── VolumePeriod ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumePeriod {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "8h")]
    EightHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[default]
    #[serde(rename = "24h")]
    Day,
}

impl VolumePeriod {
    pub const ALL: [VolumePeriod; 5] = [
        VolumePeriod::OneHour,
        VolumePeriod::SixHours,
        VolumePeriod::EightHours,
        VolumePeriod::TwelveHours,
        VolumePeriod::Day,
    ];
}

// ─── FinancialStatus ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialStatus {
    /// Sell above buy: the spread earns money.
    Generating,
    /// Zero or inverted spread.
    PotentialLoss,
}

// ─── Calculations ─────────────────────────────────────────────────────────────

/// Spread as a percentage of the base price.
#[inline]
pub fn spread_percent(service: &Service) -> f64 {
    service.spread() / service.base_price() * 100.0
}

pub fn estimated_revenue(service: &Service) -> f64 {
    service.volumes().volume_24h * spread_percent(service) / 100.0
}

pub fn financial_status(service: &Service) -> FinancialStatus {
    if estimated_revenue(service) > 0.0 {
        FinancialStatus::Generating
    } else {
        FinancialStatus::PotentialLoss
    }
}

/// Mean of the buy and sell margins.
#[inline]
pub fn average_margin(service: &Service) -> f64 {
    (service.buy_margin() + service.sell_margin()) / 2.0
}

/// Volume seeded for `period`, if the dataset carries that window.
pub fn volume_for(service: &Service, period: VolumePeriod) -> Option<f64> {
    let v = service.volumes();
    match period {
        VolumePeriod::OneHour     => v.volume_1h,
        VolumePeriod::SixHours    => v.volume_6h,
        VolumePeriod::EightHours  => v.volume_8h,
        VolumePeriod::TwelveHours => v.volume_12h,
        VolumePeriod::Day         => Some(v.volume_24h),
    }
}

// ─── Rows ─────────────────────────────────────────────────────────────────────

/// One line of the indicators table / chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub id:                String,
    pub name:              String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color:             Option<String>,
    pub period:            VolumePeriod,
    pub volume:            Option<f64>,
    pub average_margin:    f64,
    pub spread_percent:    f64,
    pub estimated_revenue: f64,
    pub financial_status:  FinancialStatus,
}

pub fn indicator_rows(services: &[Service], period: VolumePeriod) -> Vec<IndicatorRow> {
    services
        .iter()
        .map(|s| IndicatorRow {
            id:                s.id().to_string(),
            name:              s.name().to_string(),
            color:             s.color().map(str::to_string),
            period,
            volume:            volume_for(s, period),
            average_margin:    average_margin(s),
            spread_percent:    spread_percent(s),
            estimated_revenue: estimated_revenue(s),
            financial_status:  financial_status(s),
        })
        .collect()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MarginSide, ServiceSeed, VolumeProfile};

    fn service(buy: f64, sell: f64) -> Service {
        Service::from_seed(&ServiceSeed {
            id:            "eth".into(),
            name:          "Ethereum".into(),
            icon:          None,
            color:         Some("#627EEA".into()),
            base_price:    200.0,
            average_price: 210.0,
            buy_margin:    buy,
            sell_margin:   sell,
            volumes:       VolumeProfile {
                volume_24h: 50_000.0,
                volume_6h:  Some(12_000.0),
                ..Default::default()
            },
        })
        .unwrap()
    }

    #[test]
    fn test_revenue_from_spread() {
        // buy 2% → 204, sell 6% → 212, spread 8 = 4% of base → 2000 on 50k
        let s = service(2.0, 6.0);
        assert!((spread_percent(&s) - 4.0).abs() < 1e-9);
        assert!((estimated_revenue(&s) - 2_000.0).abs() < 1e-6);
        assert_eq!(financial_status(&s), FinancialStatus::Generating);
    }

    #[test]
    fn test_inverted_spread_is_potential_loss() {
        let s = service(6.0, 2.0);
        assert!(estimated_revenue(&s) < 0.0);
        assert_eq!(financial_status(&s), FinancialStatus::PotentialLoss);

        let flat = service(3.0, 3.0);
        assert_eq!(financial_status(&flat), FinancialStatus::PotentialLoss);
    }

    #[test]
    fn test_revenue_follows_margin_edit() {
        let s = service(3.0, 3.0).with_margin(MarginSide::Sell, 5.0).unwrap();
        assert_eq!(financial_status(&s), FinancialStatus::Generating);
        assert_eq!(average_margin(&s), 4.0);
    }

    #[test]
    fn test_volume_windows() {
        let s = service(1.0, 2.0);
        assert_eq!(volume_for(&s, VolumePeriod::Day), Some(50_000.0));
        assert_eq!(volume_for(&s, VolumePeriod::SixHours), Some(12_000.0));
        assert_eq!(volume_for(&s, VolumePeriod::OneHour), None);
    }

    #[test]
    fn test_period_wire_names() {
        let p: VolumePeriod = serde_json::from_str("\"12h\"").unwrap();
        assert_eq!(p, VolumePeriod::TwelveHours);
        assert_eq!(serde_json::to_string(&VolumePeriod::default()).unwrap(), "\"24h\"");
    }

    #[test]
    fn test_rows_keep_input_order() {
        let rows = indicator_rows(&[service(1.0, 2.0), service(2.0, 1.0)], VolumePeriod::Day);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].financial_status, FinancialStatus::Generating);
        assert_eq!(rows[1].financial_status, FinancialStatus::PotentialLoss);
        assert_eq!(rows[0].average_margin, 1.5);
    }
}
