//! Domain models shared by the pricing engine, the store and the HTTP layer.

pub mod change;
pub mod notification;
pub mod service;

pub use change::{margin_summary, ChangeRecord, ChangeType, ChangeValue};
pub use notification::Notification;
pub use service::{MarginSide, MarginStatus, Service, ServiceSeed, VolumeProfile};
