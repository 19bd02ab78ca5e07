//! # margin-desk server
//!
//! Loads `.env`, sets up tracing, seeds the service store and serves the
//! dashboard API. See [`margin_desk::config`] for the environment variables.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use margin_desk::{config::Config, router, seed::default_services, state::build_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env (optional, real env vars win) ───────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("margin_desk=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════╗
  ║        MARGIN DESK — Price Control Panel      ║
  ║    Margins · Deviation · Indicators · Audit   ║
  ╚═══════════════════════════════════════════════╝"#);

    // ── 3. Config ─────────────────────────────────────────────────────────────
    let config = Config::from_env()?;
    info!(operator = %config.operator, "Operator identity");

    // ── 4. Shared state (seeded store) ────────────────────────────────────────
    let state = build_state(&config, default_services())
        .context("seed dataset rejected by the service store")?;

    // ── 5. Router ─────────────────────────────────────────────────────────────
    let app = router(state);

    // ── 6. Bind & Serve ───────────────────────────────────────────────────────
    info!(addr = ?config.bind_addr, "🚀 Margin Desk server starting");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
