//! Account registration and password login.
//!
//! Passwords are stored as Argon2id PHC strings. A valid admin bootstrap code supplied
//! on registration or login grants the admin role and consumes the code.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use entity::sea_orm_active_enums::UserRole;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{normalize_email, CreateUserParam, LoginParam, RegisterParam, User},
    service::admin::code::AdminCodeService,
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    admin_codes: &'a AdminCodeService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, admin_codes: &'a AdminCodeService) -> Self {
        Self { db, admin_codes }
    }

    /// Creates a customer account, or an admin account when a valid bootstrap code is given.
    ///
    /// # Returns
    /// - `Ok(User)` - The new account
    /// - `Err(AppError::Conflict)` - Email already registered
    /// - `Err(AppError::InternalError)` - Password hashing failed
    pub async fn register(&self, param: RegisterParam) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.email_exists(&param.email).await? {
            return Err(email_taken());
        }

        let role = if self.redeem_admin_code(param.admin_code.as_deref()).await {
            UserRole::Admin
        } else {
            UserRole::Customer
        };

        let password_hash = hash_password(&param.password).await?;

        let user = user_repo
            .create(CreateUserParam {
                email: param.email,
                name: param.name,
                password_hash,
                role,
            })
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => email_taken(),
                _ => AppError::DbErr(err),
            })?;

        tracing::info!("Registered user {} ({:?})", user.id, user.role);

        Ok(user)
    }

    /// Checks an email and password pair.
    ///
    /// Unknown emails and wrong passwords fail identically.
    ///
    /// # Returns
    /// - `Ok(User)` - Credentials valid; role reflects any redeemed admin code
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    pub async fn login(&self, param: LoginParam) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Ok(email) = normalize_email(&param.email) else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let credentials = user_repo.find_credentials_by_email(&email).await?;
        let stored_hash = credentials.as_ref().map(|c| c.password_hash.as_str());

        // Unknown emails still pay for a hash check
        let verified = verify_password(&param.password, stored_hash).await?;
        let Some(credentials) = credentials.filter(|_| verified) else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let user = credentials.user;
        if user.is_admin() || !self.redeem_admin_code(param.admin_code.as_deref()).await {
            return Ok(user);
        }

        tracing::info!("Promoting user {} to admin with bootstrap code", user.id);

        user_repo
            .set_role(user.id, UserRole::Admin)
            .await?
            .ok_or_else(|| AppError::from(DbErr::RecordNotFound(format!("user {}", user.id))))
    }

    async fn redeem_admin_code(&self, code: Option<&str>) -> bool {
        let Some(code) = code.map(str::trim).filter(|code| !code.is_empty()) else {
            return false;
        };

        let redeemed = self.admin_codes.redeem(code).await;
        if !redeemed {
            tracing::warn!("Rejected invalid or expired admin code");
        }
        redeemed
    }
}

fn email_taken() -> AppError {
    AppError::Conflict("An account with that email already exists".to_string())
}

/// Argon2id hash of a random value with default parameters.
///
/// Logins for unknown emails verify against it so they cost the same as a wrong
/// password.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$a2liYmxlZHJvcC1kdW1teQ$BwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyAhIiMkJSY";

/// Hashes a password into an Argon2id PHC string with a random salt.
///
/// Runs on the blocking thread pool.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {}", e)))?
}

/// Checks a password against a stored PHC string on the blocking thread pool.
///
/// `None` or a malformed hash is checked against a dummy hash and never verifies.
pub async fn verify_password(
    password: &str,
    password_hash: Option<&str>,
) -> Result<bool, AppError> {
    let password = password.to_owned();
    let password_hash = password_hash.map(str::to_owned);

    tokio::task::spawn_blocking(move || -> Result<bool, AppError> {
        let stored = password_hash
            .as_deref()
            .and_then(|hash| PasswordHash::new(hash).ok());
        let matches_stored = stored.is_some();
        let parsed = match stored {
            Some(parsed) => parsed,
            None => PasswordHash::new(DUMMY_PASSWORD_HASH).map_err(|e| {
                AppError::InternalError(format!("Invalid dummy password hash: {}", e))
            })?,
        };

        let verified = Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();

        Ok(verified && matches_stored)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Password check task failed: {}", e)))?
}
