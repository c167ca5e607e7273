//! User domain models and parameters.
//!
//! Customers and admins share one table; the role decides what the session may access.
//! The password hash never leaves the data layer except through `UserCredentials`, which
//! is only used by the login flow.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::UserRole;

use crate::{
    model::user::{PaginatedUsersDto, RoleDto, UserDto},
    server::error::AppError,
};

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Store account with contact details and role.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Lowercased login email.
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            name: self.name,
            role: self.role.into(),
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            role: entity.role,
            created_at: entity.created_at,
        }
    }
}

impl From<UserRole> for RoleDto {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Customer => RoleDto::Customer,
            UserRole::Admin => RoleDto::Admin,
        }
    }
}

impl From<RoleDto> for UserRole {
    fn from(role: RoleDto) -> Self {
        match role {
            RoleDto::Customer => UserRole::Customer,
            RoleDto::Admin => UserRole::Admin,
        }
    }
}

/// A user together with their stored password hash.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Parameters for inserting a new user.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct RegisterParam {
    pub email: String,
    pub name: String,
    pub password: String,
    pub admin_code: Option<String>,
}

impl RegisterParam {
    /// Normalizes and validates the registration fields.
    ///
    /// Email is trimmed and lowercased and must contain `@`; the name is trimmed and must
    /// be non-empty; the password must be at least `MIN_PASSWORD_LENGTH` characters.
    ///
    /// # Returns
    /// - `Ok(RegisterParam)` - Normalized input
    /// - `Err(AppError::BadRequest)` - A field failed validation
    pub fn new(
        email: &str,
        name: &str,
        password: String,
        admin_code: Option<String>,
    ) -> Result<Self, AppError> {
        let email = normalize_email(email)?;

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Name is required".to_string()));
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        Ok(Self {
            email,
            name,
            password,
            admin_code,
        })
    }
}

/// Login input; the email is normalized the same way as on registration.
#[derive(Debug, Clone)]
pub struct LoginParam {
    pub email: String,
    pub password: String,
    pub admin_code: Option<String>,
}

/// Trims and lowercases an email, rejecting values without `@`.
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    Ok(email)
}

/// Paginated collection of users with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests email normalization during registration.
    ///
    /// Expected: Ok with trimmed, lowercased email and trimmed name
    #[test]
    fn normalizes_registration_fields() {
        let param = RegisterParam::new(
            "  Owner@Example.COM ",
            " Sam ",
            "correct horse".to_string(),
            None,
        )
        .unwrap();

        assert_eq!(param.email, "owner@example.com");
        assert_eq!(param.name, "Sam");
    }

    /// Tests rejecting registration input that fails validation.
    ///
    /// Expected: Err(BadRequest) for missing `@`, blank name and short password
    #[test]
    fn rejects_invalid_registration() {
        assert!(matches!(
            RegisterParam::new("owner.example.com", "Sam", "longenough".into(), None),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            RegisterParam::new("owner@example.com", "   ", "longenough".into(), None),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            RegisterParam::new("owner@example.com", "Sam", "short".into(), None),
            Err(AppError::BadRequest(_))
        ));
    }
}
