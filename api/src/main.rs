use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use log::{info, warn};

use mfa_api::app::{create_app, AppState};
use mfa_api::config::Config;
use mfa_api::middleware::auth::JwtVerifier;
use mfa_core::services::mfa::MfaService;
use mfa_core::services::otp::{OtpManager, OtpSweeper, OtpSweeperConfig};
use mfa_infra::sms::{create_sms_service, SmsDeliveryAdapter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = Config::from_env();

    // Initialize logger; RUST_LOG overrides the configured level
    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.app.logging.level.as_str()),
    );
    if !config.app.logging.timestamp {
        logger.format_timestamp(None);
    }
    logger.init();

    info!(
        "Starting {} v{} ({} environment)",
        config.app.app_name,
        env!("CARGO_PKG_VERSION"),
        config.environment()
    );

    config.validate().context("invalid configuration")?;
    if config.app.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the development secret");
    }

    // Challenge store and its expiry sweeper
    let manager = Arc::new(OtpManager::new(&config.app.otp));
    let sweeper = Arc::new(OtpSweeper::new(
        Arc::clone(&manager),
        OtpSweeperConfig::from(&config.app.otp),
    ));
    let sweeper_handle = sweeper.start_background_task();

    // Delivery channel
    let sms_service = create_sms_service(&config.sms);
    info!("SMS provider: {}", sms_service.provider_name());
    let delivery = Arc::new(SmsDeliveryAdapter::new(
        sms_service,
        config.sms.message_template.clone(),
    ));

    let mfa_service = Arc::new(MfaService::new(manager, delivery));
    let jwt_verifier = Arc::new(
        JwtVerifier::new(&config.app.auth.jwt)
            .map_err(anyhow::Error::msg)
            .context("failed to build the token verifier")?,
    );

    let app_state = web::Data::new(AppState {
        mfa_service,
        jwt_verifier,
        app_name: config.app.app_name.clone(),
    });

    let bind_address = config.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors_config = config.app.cors.clone();
    let max_payload_size = config.app.server.max_payload_size;

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &cors_config, max_payload_size)
    })
    .keep_alive(Duration::from_secs(config.app.server.keep_alive));

    if config.app.server.workers > 0 {
        server = server.workers(config.app.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server error")?;

    if let Some(handle) = sweeper_handle {
        handle.abort();
    }
    info!("Server stopped");

    Ok(())
}
