use crate::config::Config;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::state::AppState;
use astra::Server;
use std::process::exit;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod errors;
mod relay;
mod responses;
mod router;
mod state;
mod store;

#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Logging, `info` unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 2️⃣ Configuration from the environment (and .env)
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            exit(1);
        }
    };

    // 3️⃣ Shared state: listing store + forwarding workers
    let state = match AppState::from_config(&config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!(error = %e, "Failed to set up forwarding");
            exit(1);
        }
    };

    // 4️⃣ Start the server
    let addr = config.bind_addr();
    tracing::info!(
        %addr,
        downstream = %config.downstream_url,
        store_listings = config.store_listings,
        "Starting server"
    );

    let server = Server::bind(&addr).max_workers(config.http_workers);

    let shared = state.clone();
    let result = server.serve(move |req, _info| match handle(req, &shared) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "Server ended with error");
    }

    // 5️⃣ Let queued forwards finish before exiting
    state.dispatcher.shutdown();
    tracing::info!("Server shut down cleanly.");
}
