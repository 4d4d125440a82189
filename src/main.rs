use hotel_desk::config::Config;
use hotel_desk::service::{LogMailer, Mailer, SmtpMailer, bootstrap, spawn_pruner};
use mimalloc::MiMalloc;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        frontend_origins = %cfg.frontend_origins,
    );

    let pool = hotel_desk::db::connect(&cfg.database_url).await?;

    let mailer: Arc<dyn Mailer> = match SmtpMailer::new(&cfg.smtp) {
        Ok(smtp) => {
            info!(host = %cfg.smtp.host, port = cfg.smtp.port, "SMTP mailer configured");
            Arc::new(smtp)
        }
        Err(e) => {
            warn!(error = %e, "SMTP unavailable; OTP codes will only be logged");
            Arc::new(LogMailer)
        }
    };

    let state = hotel_desk::HotelState::new(pool, cfg.clone(), mailer);
    if let Err(e) = bootstrap::ensure_superadmin(&state.users, &cfg).await {
        warn!(error = %e, "superadmin bootstrap failed");
    }

    spawn_pruner(state.otp_limiter.clone(), Duration::from_secs(60));

    let app = hotel_desk::hotel_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}
