//! # config — read runtime settings from environment variables
//!
//! | Variable          | Default            | Description                         |
//! |-------------------|--------------------|-------------------------------------|
//! | `BIND_ADDR`       | `0.0.0.0:3000`     | Address Axum listens on             |
//! | `OPERATOR_NAME`   | `current_operator` | User written into every audit entry |
//! | `NOTIFY_CAPACITY` | `256`              | Broadcast buffer for notifications  |
//! | `RUST_LOG`        | `margin_desk=debug`| Tracing filter                      |

use std::net::SocketAddr;

use anyhow::{bail, Context};

pub const DEFAULT_OPERATOR: &str = "current_operator";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr:       SocketAddr,
    /// Placeholder identity until a real session exists.
    pub operator:        String,
    pub notify_capacity: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr: SocketAddr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR must be a socket address, e.g. 0.0.0.0:3000")?;

        let operator = std::env::var("OPERATOR_NAME")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_OPERATOR.to_string());

        let notify_capacity: usize = std::env::var("NOTIFY_CAPACITY")
            .unwrap_or_else(|_| "256".to_string())
            .parse()
            .context("NOTIFY_CAPACITY must be a number")?;

        if notify_capacity == 0 {
            bail!("NOTIFY_CAPACITY must be greater than zero");
        }

        Ok(Self { bind_addr, operator, notify_capacity })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr:       SocketAddr::from(([0, 0, 0, 0], 3000)),
            operator:        DEFAULT_OPERATOR.to_string(),
            notify_capacity: 256,
        }
    }
}
