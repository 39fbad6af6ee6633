use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use parking_control::config::{Config, DatabaseConfig};
use parking_control::middleware::{ErrorHandler, RequestId};
use parking_control::modules::{self, health};
use parking_control::parking_spots::{MySqlParkingSpotRepository, ParkingSpotService};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    // Initialize tracing; production logs are JSON lines
    let json_logs = config.app.is_production();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.app.default_log_filter().into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting Parking Control API");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    if config.database.run_migrations {
        DatabaseConfig::migrate(&db_pool)
            .await
            .context("Failed to apply database migrations")?;
        tracing::info!("Database migrations applied");
    }

    let repository = Arc::new(MySqlParkingSpotRepository::new(db_pool.clone()));
    let service = Arc::new(ParkingSpotService::new(repository));

    let base_path = config.app.base_path.clone();
    let cors_max_age = config.app.cors_max_age_secs;
    let bind_address = config.server.bind_address();

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(cors_max_age);

        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(web::Data::new(service.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .configure(health::configure)
            .service(modules::api_scope(&base_path))
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}{}", bind_address, config.app.base_path);

    server.await.context("Server terminated with an error")
}
