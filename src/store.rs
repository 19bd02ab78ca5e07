//! # store
//!
//! The **Service Store**: the authoritative, in-memory collection of
//! [`Service`] records for the running process.
//!
//! ## Write protocol
//!
//! ```text
//! set_margin(id, side, value)           restore_defaults(id)
//!   │                                     │
//!   ├─ look up live service (NotFound)    ├─ look up live service (NotFound)
//!   ├─ clamp + snap margin                ├─ look up seed (InvariantViolation)
//!   ├─ re-quote that side                 ├─ rebuild from seed, keep history
//!   ├─ append ChangeRecord                ├─ append restore ChangeRecord
//!   ├─ replace service                    ├─ replace service
//!   └─ notify (fire-and-forget)           └─ notify (fire-and-forget)
//! ```
//!
//! Every step runs synchronously under `&mut self`, so no reader ever sees a
//! half-applied edit. The seed records are held in a separate map keyed by
//! id and are never aliased with the live collection.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::engine::pricing::{MarginBounds, PricingError, SideQuote};
use crate::models::{
    margin_summary, ChangeRecord, MarginSide, Notification, Service, ServiceSeed,
};

// ─── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    /// No live service has this id.
    #[error("service '{0}' not found")]
    NotFound(String),

    /// The margin is `NaN` or infinite and cannot be clamped.
    #[error("margin must be a finite number, got {0}")]
    InvalidMargin(f64),

    /// The seed dataset is unusable (duplicate id, bad prices, margin out of range).
    #[error("invalid seed data: {0}")]
    InvalidSeed(String),

    /// A live service has no seed record. Seed and live data are out of sync.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

// ─── Collaborators ────────────────────────────────────────────────────────────

/// Supplies the name written into every [`ChangeRecord`].
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> String;
}

/// Placeholder identity: the same operator name for every change.
#[derive(Debug, Clone)]
pub struct FixedIdentity(pub String);

impl IdentityProvider for FixedIdentity {
    fn current_user(&self) -> String {
        self.0.clone()
    }
}

/// Receives one [`Notification`] per successful mutation. Delivery is
/// best-effort: implementations must not fail the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: &Notification) {}
}

// ─── Preview ──────────────────────────────────────────────────────────────────

/// What a service would look like with the given margins, without committing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginPreview {
    pub service_id:       String,
    pub buy:              SideQuote,
    pub sell:             SideQuote,
    pub current_spread:   f64,
    pub simulated_spread: f64,
}

// ─── ServiceStore ─────────────────────────────────────────────────────────────

pub struct ServiceStore {
    /// Immutable default records, keyed by id.
    defaults: HashMap<String, ServiceSeed>,
    /// Live records, in seed order.
    services: Vec<Service>,
    bounds:   MarginBounds,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
}

impl ServiceStore {
    /// Validate `seeds` and build the live collection from them.
    pub fn new(
        seeds:    Vec<ServiceSeed>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StoreError> {
        let bounds = MarginBounds::DEFAULT;
        let mut defaults = HashMap::with_capacity(seeds.len());
        let mut services = Vec::with_capacity(seeds.len());

        for seed in seeds {
            if !(seed.base_price.is_finite() && seed.base_price > 0.0) {
                return Err(StoreError::InvalidSeed(format!(
                    "'{}' has non-positive base price {}", seed.id, seed.base_price
                )));
            }
            if !bounds.contains(seed.buy_margin) || !bounds.contains(seed.sell_margin) {
                return Err(StoreError::InvalidSeed(format!(
                    "'{}' has margins outside [{}, {}]", seed.id, bounds.min, bounds.max
                )));
            }
            let service = Service::from_seed(&seed)
                .map_err(|e| StoreError::InvalidSeed(format!("'{}': {e}", seed.id)))?;

            if defaults.insert(seed.id.clone(), seed).is_some() {
                return Err(StoreError::InvalidSeed(format!(
                    "duplicate service id '{}'", service.id()
                )));
            }
            services.push(service);
        }

        info!(services = services.len(), "📦 Service store loaded from seed");

        Ok(Self { defaults, services, bounds, identity, notifier })
    }

    // ── Read surface ──────────────────────────────────────────────────────────

    /// All live services in seed order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn get(&self, id: &str) -> Result<&Service, StoreError> {
        self.services
            .iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// The seed record a service restores to.
    pub fn default_for(&self, id: &str) -> Option<&ServiceSeed> {
        self.defaults.get(id)
    }

    pub fn bounds(&self) -> MarginBounds {
        self.bounds
    }

    // ── Write surface ─────────────────────────────────────────────────────────

    /// Set one side's margin, re-price that side and append one audit entry.
    pub fn set_margin(
        &mut self,
        id:    &str,
        side:  MarginSide,
        value: f64,
        notes: Option<String>,
    ) -> Result<Service, StoreError> {
        let idx    = self.position(id)?;
        let margin = self.normalize(value)?;

        let current  = &self.services[idx];
        let previous = current.margin(side);
        let mut next = current.with_margin(side, margin)?;

        next.push_record(ChangeRecord::margin_change(
            &self.identity.current_user(),
            next.name(),
            side,
            previous,
            margin,
            notes,
        ));
        self.services[idx] = next.clone();

        info!(
            service  = %id,
            side     = %side,
            previous,
            margin,
            status   = ?next.side(side).status,
            "💹 Margin updated"
        );

        self.notifier.notify(&Notification::margin_updated(next.name(), side, margin));
        Ok(next)
    }

    /// Save both margins at once. Both values are validated before anything
    /// changes; the result is two audit entries (buy, then sell).
    pub fn apply_margins(
        &mut self,
        id:    &str,
        buy:   f64,
        sell:  f64,
        notes: Option<String>,
    ) -> Result<Service, StoreError> {
        self.position(id)?;
        self.normalize(buy)?;
        self.normalize(sell)?;

        self.set_margin(id, MarginSide::Buy, buy, notes.clone())?;
        self.set_margin(id, MarginSide::Sell, sell, notes)
    }

    /// Reset margins and every derived field to the seed values, keeping the
    /// history and appending one restore entry.
    pub fn restore_defaults(&mut self, id: &str) -> Result<Service, StoreError> {
        let idx  = self.position(id)?;
        let seed = self.defaults.get(id).ok_or_else(|| {
            error!(service = %id, "⛔ Live service has no seed record");
            StoreError::InvariantViolation(format!("no seed record for live service '{id}'"))
        })?;

        let current  = &self.services[idx];
        let previous = margin_summary(current.buy_margin(), current.sell_margin());
        let restored = margin_summary(seed.buy_margin, seed.sell_margin);
        let name     = current.name().to_string();

        let mut next = Service::restored_from(seed, current.clone().into_history())?;
        next.push_record(ChangeRecord::restore(
            &self.identity.current_user(),
            &name,
            previous.clone(),
            restored.clone(),
        ));
        self.services[idx] = next.clone();

        info!(service = %id, from = %previous, to = %restored, "↩️ Defaults restored");

        self.notifier.notify(&Notification::defaults_restored(&name));
        Ok(next)
    }

    /// Quote both sides at the given margins without committing. Margins go
    /// through the same clamping as [`set_margin`](Self::set_margin), so the
    /// preview matches what a save would produce.
    pub fn preview(&self, id: &str, buy: f64, sell: f64) -> Result<MarginPreview, StoreError> {
        let service = self.get(id)?;
        let buy     = service.quote_margin(self.normalize(buy)?)?;
        let sell    = service.quote_margin(self.normalize(sell)?)?;

        Ok(MarginPreview {
            service_id:       service.id().to_string(),
            buy,
            sell,
            current_spread:   service.spread(),
            simulated_spread: sell.price - buy.price,
        })
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.services
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| {
                debug!(service = %id, "Unknown service id");
                StoreError::NotFound(id.to_string())
            })
    }

    fn normalize(&self, value: f64) -> Result<f64, StoreError> {
        let margin = self.bounds.normalize(value).ok_or(StoreError::InvalidMargin(value))?;
        if margin != value {
            debug!(requested = value, applied = margin, "Margin clamped to bounds");
        }
        Ok(margin)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
