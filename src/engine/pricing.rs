//! # engine::pricing
//!
//! **Pricing Engine**: the three pure functions every view and the store
//! commit path share.
//!
//! ```text
//! margin ──▶ price_from_margin(base, margin) ──▶ price
//!                                                  │
//!            percent_deviation(price, average) ◀───┘
//!                         │
//!                         ▼
//!            classify_deviation(percent) ──▶ Optimal | Attention | Alert
//! ```
//!
//! Nothing here holds state, so it is safe to call from any handler or thread.
//! [`quote`] bundles the chain; the configurator preview and the store commit
//! both go through it, which keeps previewed and committed values identical.

use serde::Serialize;
use thiserror::Error;

use crate::models::MarginStatus;

// ─── Thresholds ───────────────────────────────────────────────────────────────

/// Largest absolute deviation (in %) still classified as [`MarginStatus::Optimal`].
pub const OPTIMAL_MAX_DEVIATION: f64 = 10.0;

/// Largest absolute deviation (in %) still classified as [`MarginStatus::Attention`].
pub const ATTENTION_MAX_DEVIATION: f64 = 18.0;

// ─── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// The market-average reference price must be strictly positive.
    #[error("average price must be strictly positive, got {0}")]
    NonPositiveAverage(f64),
}

// ─── Core Functions ───────────────────────────────────────────────────────────

/// `base_price * (1 + margin / 100)`. No range checks: margin bounds are the
/// caller's concern (see [`MarginBounds`]).
///
/// Plain `f64` arithmetic, no rounding. A 10% margin over a base equal to the
/// average lands a hair above 10% deviation (`100 * 1.1 = 110.00000000000001`)
/// and therefore classifies as `Attention`; only an exact 10.0 is `Optimal`.
#[inline]
pub fn price_from_margin(base_price: f64, margin_percent: f64) -> f64 {
    base_price * (1.0 + margin_percent / 100.0)
}

/// Percentage distance of `price` from `average_price`.
///
/// Fails instead of returning `NaN`/`inf` when the average is zero, negative
/// or not finite.
#[inline]
pub fn percent_deviation(price: f64, average_price: f64) -> Result<f64, PricingError> {
    if !average_price.is_finite() || average_price <= 0.0 {
        return Err(PricingError::NonPositiveAverage(average_price));
    }
    Ok((price - average_price) / average_price * 100.0)
}

/// Three-tier badge for a deviation. Bounds are inclusive: exactly 10.0 is
/// `Optimal`, exactly 18.0 is `Attention`.
#[inline]
pub fn classify_deviation(percent: f64) -> MarginStatus {
    let abs = percent.abs();
    if abs <= OPTIMAL_MAX_DEVIATION {
        MarginStatus::Optimal
    } else if abs <= ATTENTION_MAX_DEVIATION {
        MarginStatus::Attention
    } else {
        MarginStatus::Alert
    }
}

// ─── Quote ────────────────────────────────────────────────────────────────────

/// Everything a view needs to render one side (buy or sell) of a service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SideQuote {
    pub margin:    f64,
    pub price:     f64,
    /// Deviation from the market average, in percent.
    pub deviation: f64,
    pub status:    MarginStatus,
}

/// Run the full price → deviation → status chain for one margin.
pub fn quote(base_price: f64, average_price: f64, margin: f64) -> Result<SideQuote, PricingError> {
    let price     = price_from_margin(base_price, margin);
    let deviation = percent_deviation(price, average_price)?;

    Ok(SideQuote {
        margin,
        price,
        deviation,
        status: classify_deviation(deviation),
    })
}

// ─── Margin Bounds ────────────────────────────────────────────────────────────

/// Allowed range and granularity for buy/sell margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginBounds {
    pub min:  f64,
    pub max:  f64,
    pub step: f64,
}

impl MarginBounds {
    pub const DEFAULT: MarginBounds = MarginBounds { min: -10.0, max: 30.0, step: 0.5 };

    /// Clamp into `[min, max]` and snap to the nearest `step`.
    ///
    /// Returns `None` for `NaN`/`inf`, which cannot be meaningfully clamped.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let snapped = (value / self.step).round() * self.step;
        Some(snapped.clamp(self.min, self.max))
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for MarginBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_price_from_zero_margin_is_base() {
        assert_eq!(price_from_margin(250.0, 0.0), 250.0);
    }

    #[test]
    fn test_price_across_margin_range() {
        let base = 80.0;
        let mut margin = -10.0;
        while margin <= 30.0 {
            let expected = base * (1.0 + margin / 100.0);
            assert!(approx(price_from_margin(base, margin), expected), "margin {margin}");
            margin += 0.5;
        }
    }

    #[test]
    fn test_scenario_a_optimal() {
        let q = quote(100.0, 100.0, 5.0).unwrap();
        assert!(approx(q.price, 105.0));
        assert!(approx(q.deviation, 5.0));
        assert_eq!(q.status, MarginStatus::Optimal);
    }

    #[test]
    fn test_scenario_b_attention() {
        let q = quote(100.0, 100.0, 15.0).unwrap();
        assert!(approx(q.price, 115.0));
        assert!(approx(q.deviation, 15.0));
        assert_eq!(q.status, MarginStatus::Attention);
    }

    #[test]
    fn test_scenario_c_alert() {
        let q = quote(100.0, 100.0, 25.0).unwrap();
        assert!(approx(q.price, 125.0));
        assert!(approx(q.deviation, 25.0));
        assert_eq!(q.status, MarginStatus::Alert);
    }

    #[test]
    fn test_classification_boundaries_are_inclusive() {
        assert_eq!(classify_deviation(10.0), MarginStatus::Optimal);
        assert_eq!(classify_deviation(-10.0), MarginStatus::Optimal);
        assert_eq!(classify_deviation(10.0001), MarginStatus::Attention);
        assert_eq!(classify_deviation(18.0), MarginStatus::Attention);
        assert_eq!(classify_deviation(-18.0), MarginStatus::Attention);
        assert_eq!(classify_deviation(18.0001), MarginStatus::Alert);
        assert_eq!(classify_deviation(0.0), MarginStatus::Optimal);
    }

    #[test]
    fn test_ten_percent_margin_crosses_optimal_by_float_error() {
        let q = quote(100.0, 100.0, 10.0).unwrap();
        assert!(q.price > 110.0);
        assert!(q.deviation > OPTIMAL_MAX_DEVIATION);
        assert_eq!(q.status, MarginStatus::Attention);

        // 18% has no representation error, so it stays on the inclusive bound.
        assert_eq!(quote(100.0, 100.0, 18.0).unwrap().status, MarginStatus::Attention);
    }

    #[test]
    fn test_negative_deviation_uses_magnitude() {
        // 100 * 0.9 = 90 vs average 110 → about -18.18%
        let q = quote(100.0, 110.0, -10.0).unwrap();
        assert!(q.deviation < -18.0);
        assert_eq!(q.status, MarginStatus::Alert);
    }

    #[test]
    fn test_zero_average_is_rejected() {
        assert_eq!(
            percent_deviation(100.0, 0.0),
            Err(PricingError::NonPositiveAverage(0.0))
        );
        assert!(percent_deviation(100.0, -5.0).is_err());
        assert!(percent_deviation(100.0, f64::NAN).is_err());
        assert!(quote(100.0, 0.0, 5.0).is_err());
    }

    #[test]
    fn test_bounds_clamp_and_snap() {
        let b = MarginBounds::DEFAULT;
        assert_eq!(b.normalize(45.0), Some(30.0));
        assert_eq!(b.normalize(-12.0), Some(-10.0));
        assert_eq!(b.normalize(7.3), Some(7.5));
        assert_eq!(b.normalize(7.2), Some(7.0));
        assert_eq!(b.normalize(12.0), Some(12.0));
        assert_eq!(b.normalize(f64::NAN), None);
        assert_eq!(b.normalize(f64::INFINITY), None);
    }

    #[test]
    fn test_bounds_contains() {
        let b = MarginBounds::default();
        assert!(b.contains(-10.0));
        assert!(b.contains(30.0));
        assert!(!b.contains(30.5));
    }
}
