//! netl3vpnd - L3VPN provisioning daemon
//!
//! Provisions multi-site Layer-3 VPN instances across managed devices.

use netl3vpnd::standalone_manager;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    info!("--- Starting netl3vpnd ---");

    let manager = standalone_manager();
    manager.start().await;

    // TODO: replace the standalone backends with cluster services and
    // serve create requests over an ingestion transport
    info!("netl3vpnd initialization complete (standalone backends)");

    ExitCode::SUCCESS
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();
}
