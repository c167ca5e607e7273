use std::time::Duration;

use oauth2::{basic::BasicClient, AuthType, ClientId, ClientSecret, TokenUrl};
use sea_orm::DatabaseConnection;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{config::ConfigError, AppError},
    service::{
        admin::code::AdminCodeService,
        tradesafe::client::{TradeSafeClient, TradeSafeOAuthClient},
    },
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the session layer backed by the application database.
///
/// Sessions expire after 7 days of inactivity. The cookie is `SameSite=Lax` and only
/// marked `Secure` when `COOKIE_SECURE` is set, so local HTTP development still works.
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

    Ok(SessionManagerLayer::new(session_store)
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7))))
}

/// HTTP client for outbound API calls.
///
/// Redirects are disabled so a compromised upstream cannot bounce requests elsewhere.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))
}

/// OAuth2 client-credentials client for TradeSafe.
///
/// Credentials are sent in the request body as TradeSafe expects.
pub fn setup_oauth_client(config: &Config) -> Result<TradeSafeOAuthClient, AppError> {
    let token_url = TokenUrl::new(config.tradesafe.token_url.clone()).map_err(|_| {
        ConfigError::InvalidEnvVar {
            name: "TRADESAFE_TOKEN_URL".to_string(),
            value: config.tradesafe.token_url.clone(),
        }
    })?;

    Ok(
        BasicClient::new(ClientId::new(config.tradesafe.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.tradesafe.client_secret.clone()))
            .set_token_uri(token_url)
            .set_auth_type(AuthType::RequestBody),
    )
}

pub fn setup_tradesafe_client(
    config: &Config,
    http_client: reqwest::Client,
    oauth_client: TradeSafeOAuthClient,
) -> TradeSafeClient {
    TradeSafeClient::new(
        http_client,
        oauth_client,
        config.tradesafe.api_url.clone(),
        config.tradesafe.seller_token.clone(),
    )
}

/// Issues a one-time admin code when no admin account exists yet.
///
/// The code is only written to the log; whoever registers or logs in with it within
/// its lifetime becomes the first admin.
pub async fn check_for_admin(
    db: &DatabaseConnection,
    admin_code_service: &AdminCodeService,
) -> Result<(), AppError> {
    if UserRepository::new(db).admin_exists().await? {
        return Ok(());
    }

    let code = admin_code_service.issue().await;

    tracing::info!(
        "No admin account exists. Register or log in with admin code {} within 60 seconds to become admin",
        code
    );

    Ok(())
}
