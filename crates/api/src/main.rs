use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use domain::services::notification::{MockNotificationSender, NotificationSender};

mod app;
mod config;
mod error;
mod extractors;
mod jobs;
mod middleware;
mod routes;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::metrics::init_metrics()?;

    info!("Starting Bookline API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&config.database).await?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    // WhatsApp sender falls back to the logging mock when disabled
    let notifier: Arc<dyn NotificationSender> = if config.whatsapp.enabled {
        Arc::new(services::WhatsAppSender::new(config.whatsapp.clone())?)
    } else {
        Arc::new(MockNotificationSender::new())
    };

    let mut scheduler = jobs::JobScheduler::new();
    scheduler.register(jobs::MembershipSweepJob::new(
        pool.clone(),
        config.jobs.membership_sweep_minutes,
        config.jobs.membership_grace_hours,
    ));
    scheduler.start();

    let addr = config.socket_addr()?;
    let app = app::create_app(config, pool, notifier);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, shutting down background jobs");
    scheduler.shutdown();
    scheduler
        .wait_for_shutdown(std::time::Duration::from_secs(10))
        .await;

    Ok(())
}

/// Resolves when the process receives SIGTERM or SIGINT.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        if let (Ok(mut sigterm), Ok(mut sigint)) =
            (signal(SignalKind::terminate()), signal(SignalKind::interrupt()))
        {
            tokio::select! {
                _ = sigterm.recv() => {}
                _ = sigint.recv() => {}
            }
            return;
        }
    }
    let _ = tokio::signal::ctrl_c().await;
}
