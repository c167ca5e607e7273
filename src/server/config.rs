use std::str::FromStr;

use crate::server::{error::config::ConfigError, model::cart::ShippingPolicy};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_TRADESAFE_API_URL: &str = "https://api-developer.tradesafe.dev/graphql";
const DEFAULT_TRADESAFE_TOKEN_URL: &str = "https://auth.tradesafe.co.za/oauth/token";
const DEFAULT_SHIPPING_FEE_CENTS: i64 = 8_500;
const DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS: i64 = 50_000;
const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;
const DEFAULT_RENEWAL_SCHEDULE: &str = "0 0 6 * * *";

/// Credentials and endpoints for the TradeSafe escrow API.
#[derive(Clone, Debug)]
pub struct TradeSafeConfig {
    pub client_id: String,
    pub client_secret: String,
    pub webhook_secret: String,
    /// TradeSafe token identifying the store as the seller party.
    pub seller_token: String,
    pub api_url: String,
    pub token_url: String,
}

pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub bind_address: String,
    pub cookie_secure: bool,

    pub tradesafe: TradeSafeConfig,

    pub shipping: ShippingPolicy,
    pub low_stock_threshold: i32,
    /// Six-field cron expression (with seconds) for subscription renewals.
    pub renewal_schedule: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };
        let optional = |name: &str, default: &str| lookup(name).unwrap_or(default.to_string());

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            app_url: required("APP_URL")?,
            bind_address: optional("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            cookie_secure: parse_or(&lookup, "COOKIE_SECURE", false)?,
            tradesafe: TradeSafeConfig {
                client_id: required("TRADESAFE_CLIENT_ID")?,
                client_secret: required("TRADESAFE_CLIENT_SECRET")?,
                webhook_secret: required("TRADESAFE_WEBHOOK_SECRET")?,
                seller_token: required("TRADESAFE_SELLER_TOKEN")?,
                api_url: optional("TRADESAFE_API_URL", DEFAULT_TRADESAFE_API_URL),
                token_url: optional("TRADESAFE_TOKEN_URL", DEFAULT_TRADESAFE_TOKEN_URL),
            },
            shipping: ShippingPolicy {
                fee_cents: parse_or(&lookup, "SHIPPING_FEE_CENTS", DEFAULT_SHIPPING_FEE_CENTS)?,
                free_threshold_cents: parse_or(
                    &lookup,
                    "FREE_SHIPPING_THRESHOLD_CENTS",
                    DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS,
                )?,
            },
            low_stock_threshold: parse_or(
                &lookup,
                "LOW_STOCK_THRESHOLD",
                DEFAULT_LOW_STOCK_THRESHOLD,
            )?,
            renewal_schedule: optional("RENEWAL_SCHEDULE", DEFAULT_RENEWAL_SCHEDULE),
        })
    }
}

/// Parses an optional variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
            }),
    }
}
