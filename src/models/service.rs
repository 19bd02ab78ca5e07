//! # models::service
//!
//! Defines [`Service`], one tradable service with its buy/sell margin
//! configuration, and [`ServiceSeed`], the immutable default record it is
//! built from.
//!
//! Derived fields (prices, deviations, statuses) are private and only ever
//! written from a [`SideQuote`] produced by the pricing engine, so a
//! `Service` cannot hold a price that disagrees with its margin.

use serde::{Deserialize, Serialize};

use crate::engine::pricing::{quote, PricingError, SideQuote};
use crate::models::change::ChangeRecord;

// ─── MarginSide ───────────────────────────────────────────────────────────────

/// Which side of the book a margin applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginSide {
    Buy,
    Sell,
}

impl MarginSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarginSide::Buy  => "buy",
            MarginSide::Sell => "sell",
        }
    }
}

impl std::fmt::Display for MarginSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── MarginStatus ─────────────────────────────────────────────────────────────

/// Badge shown next to a price, from its deviation against the market average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginStatus {
    Optimal,
    Attention,
    Alert,
}

// ─── VolumeProfile ────────────────────────────────────────────────────────────

/// Traded volume per window. Informational only; never changed by margin edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfile {
    pub volume_24h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_1h:  Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_6h:  Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_8h:  Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_12h: Option<f64>,
}

// ─── ServiceSeed ──────────────────────────────────────────────────────────────

/// Default configuration of a service as shipped in the seed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSeed {
    pub id:            String,
    pub name:          String,
    #[serde(default)]
    pub icon:          Option<String>,
    #[serde(default)]
    pub color:         Option<String>,
    pub base_price:    f64,
    pub average_price: f64,
    pub buy_margin:    f64,
    pub sell_margin:   f64,
    #[serde(flatten)]
    pub volumes:       VolumeProfile,
}

// ─── Service ──────────────────────────────────────────────────────────────────

/// Live state of one service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    id:             String,
    name:           String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon:           Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color:          Option<String>,
    base_price:     f64,
    average_price:  f64,

    buy_margin:     f64,
    buy_price:      f64,
    buy_deviation:  f64,
    buy_status:     MarginStatus,

    sell_margin:    f64,
    sell_price:     f64,
    sell_deviation: f64,
    sell_status:    MarginStatus,

    #[serde(flatten)]
    volumes:        VolumeProfile,

    history:        Vec<ChangeRecord>,
}

impl Service {
    /// Build the default state of a service from its seed, with an empty history.
    pub fn from_seed(seed: &ServiceSeed) -> Result<Self, PricingError> {
        Self::restored_from(seed, Vec::new())
    }

    /// Build the default state from `seed`, carrying over an existing history.
    pub fn restored_from(seed: &ServiceSeed, history: Vec<ChangeRecord>) -> Result<Self, PricingError> {
        let buy  = quote(seed.base_price, seed.average_price, seed.buy_margin)?;
        let sell = quote(seed.base_price, seed.average_price, seed.sell_margin)?;

        Ok(Self {
            id:             seed.id.clone(),
            name:           seed.name.clone(),
            icon:           seed.icon.clone(),
            color:          seed.color.clone(),
            base_price:     seed.base_price,
            average_price:  seed.average_price,
            buy_margin:     buy.margin,
            buy_price:      buy.price,
            buy_deviation:  buy.deviation,
            buy_status:     buy.status,
            sell_margin:    sell.margin,
            sell_price:     sell.price,
            sell_deviation: sell.deviation,
            sell_status:    sell.status,
            volumes:        seed.volumes,
            history,
        })
    }

    /// Copy of this service with `side` re-priced at `margin`. The other side
    /// and the history are left as they are.
    pub fn with_margin(&self, side: MarginSide, margin: f64) -> Result<Self, PricingError> {
        let q = self.quote_margin(margin)?;
        let mut next = self.clone();
        next.apply_quote(side, q);
        Ok(next)
    }

    /// Quote `margin` against this service's prices without changing anything.
    /// Buy and sell share the same formula, so the side is not needed.
    pub fn quote_margin(&self, margin: f64) -> Result<SideQuote, PricingError> {
        quote(self.base_price, self.average_price, margin)
    }

    /// Append an audit entry. History is never rewritten.
    pub(crate) fn push_record(&mut self, record: ChangeRecord) {
        self.history.push(record);
    }

    pub(crate) fn into_history(self) -> Vec<ChangeRecord> {
        self.history
    }

    fn apply_quote(&mut self, side: MarginSide, q: SideQuote) {
        match side {
            MarginSide::Buy => {
                self.buy_margin    = q.margin;
                self.buy_price     = q.price;
                self.buy_deviation = q.deviation;
                self.buy_status    = q.status;
            }
            MarginSide::Sell => {
                self.sell_margin    = q.margin;
                self.sell_price     = q.price;
                self.sell_deviation = q.deviation;
                self.sell_status    = q.status;
            }
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn color(&self) -> Option<&str> { self.color.as_deref() }
    pub fn base_price(&self) -> f64 { self.base_price }
    pub fn average_price(&self) -> f64 { self.average_price }
    pub fn volumes(&self) -> &VolumeProfile { &self.volumes }
    pub fn history(&self) -> &[ChangeRecord] { &self.history }

    pub fn buy_margin(&self) -> f64 { self.buy_margin }
    pub fn buy_price(&self) -> f64 { self.buy_price }
    pub fn buy_status(&self) -> MarginStatus { self.buy_status }
    pub fn sell_margin(&self) -> f64 { self.sell_margin }
    pub fn sell_price(&self) -> f64 { self.sell_price }
    pub fn sell_status(&self) -> MarginStatus { self.sell_status }

    /// Current quote for one side.
    pub fn side(&self, side: MarginSide) -> SideQuote {
        match side {
            MarginSide::Buy => SideQuote {
                margin:    self.buy_margin,
                price:     self.buy_price,
                deviation: self.buy_deviation,
                status:    self.buy_status,
            },
            MarginSide::Sell => SideQuote {
                margin:    self.sell_margin,
                price:     self.sell_price,
                deviation: self.sell_deviation,
                status:    self.sell_status,
            },
        }
    }

    pub fn margin(&self, side: MarginSide) -> f64 {
        self.side(side).margin
    }

    /// `sell_price - buy_price`.
    pub fn spread(&self) -> f64 {
        self.sell_price - self.buy_price
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> ServiceSeed {
        ServiceSeed {
            id:            "svc".into(),
            name:          "Test Service".into(),
            icon:          None,
            color:         None,
            base_price:    100.0,
            average_price: 100.0,
            buy_margin:    8.0,
            sell_margin:   4.0,
            volumes:       VolumeProfile { volume_24h: 1_000.0, ..Default::default() },
        }
    }

    #[test]
    fn test_from_seed_derives_prices_and_statuses() {
        let svc = Service::from_seed(&seed()).unwrap();
        assert!((svc.buy_price() - 108.0).abs() < 1e-9);
        assert!((svc.sell_price() - 104.0).abs() < 1e-9);
        assert_eq!(svc.buy_status(), MarginStatus::Optimal);
        assert_eq!(svc.sell_status(), MarginStatus::Optimal);
        assert!(svc.history().is_empty());
    }

    #[test]
    fn test_with_margin_only_touches_one_side() {
        let svc  = Service::from_seed(&seed()).unwrap();
        let next = svc.with_margin(MarginSide::Buy, 20.0).unwrap();

        assert_eq!(next.buy_margin(), 20.0);
        assert!((next.buy_price() - 120.0).abs() < 1e-9);
        assert_eq!(next.buy_status(), MarginStatus::Alert);

        assert_eq!(next.side(MarginSide::Sell), svc.side(MarginSide::Sell));
        assert_eq!(next.volumes(), svc.volumes());
    }

    #[test]
    fn test_invalid_average_rejected_at_construction() {
        let mut bad = seed();
        bad.average_price = 0.0;
        assert!(Service::from_seed(&bad).is_err());
    }

    #[test]
    fn test_serializes_flat_snake_case() {
        let svc  = Service::from_seed(&seed()).unwrap();
        let json = serde_json::to_value(&svc).unwrap();
        assert_eq!(json["buy_status"], "optimal");
        assert_eq!(json["volume_24h"], 1_000.0);
        assert!(json.get("volume_1h").is_none());
        assert!(json["history"].as_array().unwrap().is_empty());
    }
}
