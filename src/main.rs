//! Benefit Ledger - HTTP service entry point
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌─────────────────────┐    ┌──────────┐
//! │  Config  │───▶│  Store   │───▶│ BenefitService      │───▶│ Gateway  │
//! │  (YAML)  │    │(mem / pg)│    │ TransferCoordinator │    │  (axum)  │
//! └──────────┘    └──────────┘    └─────────────────────┘    └──────────┘
//! ```
//!
//! Usage: `benefit_ledger [--env dev] [--port 8080]`

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use benefit_ledger::config::{AppConfig, StoreBackend};
use benefit_ledger::gateway::{self, AppState};
use benefit_ledger::logging::init_logging;
use benefit_ledger::store::open_store;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> anyhow::Result<Option<u16>> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            let port = args[i + 1]
                .parse()
                .with_context(|| format!("Invalid --port value: {}", args[i + 1]))?;
            return Ok(Some(port));
        }
    }
    Ok(None)
}

fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = init_logging(&app_config)?;

    info!(
        env = %env,
        version = env!("CARGO_PKG_VERSION"),
        build = env!("BUILD_GIT_HASH"),
        "Starting Benefit Ledger"
    );

    // Gateway config from YAML, allow --port override
    let port = get_port_override()?.unwrap_or(app_config.gateway.port);
    let host = app_config.gateway.host.clone();

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(async move {
        let store = open_store(&app_config.store).await?;
        let state = AppState::from_store(store, app_config.transfer);

        if app_config.store.backend == StoreBackend::Memory {
            state
                .benefits
                .seed(&app_config.seed)
                .await
                .context("Failed to create seed benefits")?;
        }

        info!(
            max_attempts = app_config.transfer.max_attempts,
            compensation_attempts = app_config.transfer.compensation_attempts,
            "Transfer coordinator ready"
        );

        gateway::run_server(&host, port, Arc::new(state)).await
    })
}
