use anyhow::{bail, Context};
use serde::Deserialize;
use std::str::FromStr;

/// Upper bound for either token lifetime: ten years.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365 * 10;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Unset optional variables take their default; set but malformed ones are errors.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: var("JWT_ISSUER").unwrap_or_else(|| "contacts-api".into()),
            audience: var("JWT_AUDIENCE").unwrap_or_else(|| "contacts-users".into()),
            ttl_minutes: ttl_var(&var, "JWT_TTL_MINUTES", 15)?,
            refresh_ttl_minutes: ttl_var(&var, "JWT_REFRESH_TTL_MINUTES", 60 * 24 * 30)?,
        };
        Ok(Self {
            database_url,
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parsed_var(&var, "APP_PORT", 8080)?,
            jwt,
        })
    }
}

fn parsed_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} is not valid: {raw:?}")),
    }
}

fn ttl_var(var: &impl Fn(&str) -> Option<String>, key: &str, default: i64) -> anyhow::Result<i64> {
    let minutes = parsed_var(var, key, default)?;
    if !(1..=MAX_TTL_MINUTES).contains(&minutes) {
        bail!("{key} must be between 1 and {MAX_TTL_MINUTES} minutes, got {minutes}");
    }
    Ok(minutes)
}
