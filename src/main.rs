mod agent;
mod config;
mod error;
mod web;

use std::io::ErrorKind;
use std::sync::Arc;

use actix_web::{App, HttpServer, web::Data};
use dotenv::dotenv;
use log::{info, error};

use agent::process::ProcessAgent;
use agent::Executor;
use config::Config;
use web::routes;

// App state structure
pub struct AppState {
    pub token: Option<String>,
    pub executor: Executor,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Agent: {} (effort: {}, default model: {}, timeout: {}s)",
        config.agent.binary,
        config.agent.reasoning_effort,
        config.agent.default_model.as_deref().unwrap_or("<none>"),
        config.agent.timeout.as_secs_f64()
    );
    if config.token.is_none() {
        info!("MINI_ROUTER_TOKEN is not set, accepting unauthenticated requests");
    }

    // Create app state
    let app_state = Data::new(AppState {
        token: config.token.clone(),
        executor: Executor::new(config.agent.clone(), Arc::new(ProcessAgent)),
    });

    // Start web server
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
    });

    let server = match server.bind((config.host.as_str(), config.port)) {
        Ok(server) => server,
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            error!(
                "Port {} on {} is already in use. Stop the existing process or set MINI_ROUTER_PORT to a free port.",
                config.port, config.host
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!("Failed to bind {}:{}: {}", config.host, config.port, e);
            std::process::exit(1);
        }
    };

    info!("Local AI Router listening on http://{}:{}", config.host, config.port);
    server.run().await
}
