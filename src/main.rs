mod model;
mod server;

use axum::http::{header, HeaderValue, Method};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, scheduler::subscription_renewals,
    service::admin::code::AdminCodeService, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,kibbledrop=debug")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let tradesafe = startup::setup_tradesafe_client(&config, http_client, oauth_client);

    let admin_code_service = AdminCodeService::new();

    tracing::info!("Starting server");

    // Check for admin users and log a one-time admin code if none exist
    startup::check_for_admin(&db, &admin_code_service).await?;

    let scheduler_db = db.clone();
    let scheduler_tradesafe = tradesafe.clone();
    let renewal_schedule = config.renewal_schedule.clone();
    tokio::spawn(async move {
        if let Err(e) = subscription_renewals::start_scheduler(
            scheduler_db,
            scheduler_tradesafe,
            &renewal_schedule,
        )
        .await
        {
            tracing::error!("Subscription renewal scheduler error: {}", e);
        }
    });

    let origin = HeaderValue::from_str(&config.app_url).map_err(|_| {
        server::error::config::ConfigError::InvalidEnvVar {
            name: "APP_URL".to_string(),
            value: config.app_url.clone(),
        }
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = server::router::router()
        .with_state(AppState::new(
            db,
            tradesafe,
            config.tradesafe.webhook_secret.clone(),
            admin_code_service,
            config.shipping,
            config.low_stock_threshold,
        ))
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
