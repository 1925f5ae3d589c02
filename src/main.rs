#![forbid(unsafe_code)]

use std::time::Duration;

use anyhow::Result;
use log::{error, info};
use poem::listener::TcpListener;

// Hello Utilities
use crate::api::make_routes;
use crate::utils::config::{init_log, init_runtime_context, RuntimeCtx};
use crate::utils::errors::Errors;

// Modules
mod api;
mod services;
mod utils;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "HelloServer"; // for poem logging

// In-flight requests get this long to finish after a shutdown signal.
const SHUTDOWN_TIMEOUT : Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<()> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting hello_server!");

    // Initialize the server.
    let runtime_ctx = hello_init()?;

    // --------------- Main Loop Set Up ---------------
    // The route table is built once and shared by all connections.
    let app = make_routes(&runtime_ctx.parms.config.title, &runtime_ctx.server_url());
    let addr = runtime_ctx.bind_addr();
    info!("Listening on {}", addr);

    // ------------------ Main Loop -------------------
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run_with_graceful_shutdown(app, shutdown_signal(), Some(SHUTDOWN_TIMEOUT))
        .await?;

    info!("{} stopped.", SERVER_NAME);
    Ok(())
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// hello_init:
// ---------------------------------------------------------------------------
/** Initialize logging and read the runtime configuration. */
fn hello_init() -> Result<RuntimeCtx> {
    // Configure our log.
    init_log()?;

    // Read input parameters and initialize the runtime context.
    let runtime_ctx = init_runtime_context()?;
    info!("{}", Errors::InputParms(format!("{:#?}", runtime_ctx)));
    info!("Configuration source: {}", runtime_ctx.config_source());

    // Log build info.
    print_version_info();

    Ok(runtime_ctx)
}

// ---------------------------------------------------------------------------
// shutdown_signal:
// ---------------------------------------------------------------------------
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received."),
        Err(e) => {
            // Without a signal handler the server runs until killed.
            error!("Unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        },
    }
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    // Log build info.
    info!("{}.", format!("\n*** Running HELLO={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}",
                        env!("CARGO_PKG_VERSION"),
                        env!("GIT_BRANCH"),
                        env!("GIT_COMMIT_SHORT"),
                        env!("GIT_DIRTY"),
                        env!("SOURCE_TIMESTAMP"),
                        env!("RUSTC_VERSION")),
    );
}
