//! Pure calculations: pricing, indicators and audit-log queries.

pub mod history;
pub mod indicators;
pub mod pricing;
