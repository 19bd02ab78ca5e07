pub mod history;
pub mod indicators;
pub mod monitor;
pub mod services;
