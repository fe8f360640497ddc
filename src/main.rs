mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use crate::config::Config;
use crate::middleware::{create_cors, RequestLogging};
use crate::routes::{api_routes, public_routes};
use crate::state::AppState;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use chrono::Local;
use log::info;
use std::io;
use std::io::Write;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    let mut log_builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    log_builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S %:z"),
                record.level(),
                record.args()
            )
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e)) // 转换为 io::Result
        })
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    info!(
        "Starting NEXFIT checkout service v{} ({:?}, ECPay {})",
        env!("CARGO_PKG_VERSION"),
        config.environment,
        if config.is_stage() { "stage" } else { "production" }
    );

    let bind_address = config.bind_address();
    let workers = config.server.workers;
    let app_state = web::Data::new(AppState::from_config(config)?);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(create_cors(&app_state.config))
            .wrap(RequestLogging)
            .service(api_routes())
            .service(public_routes())
    });

    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    info!("Listening on {}", bind_address);
    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}
