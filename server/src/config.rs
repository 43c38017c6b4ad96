use anyhow::{Context, Result, anyhow};
use platform_authn::AuthConfig;
use platform_db::DatabaseSettings;

pub const DEFAULT_CURRENCY: &str = "TRY";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub auth: AuthConfig,
    pub cors_allowed_origins: Vec<String>,
    /// ISO 4217 code attached to every payroll payload.
    pub payroll_currency: String,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a local `.env`.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL missing")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET missing")?;
        let mut auth = AuthConfig::new(jwt_secret.trim()).context("invalid JWT_SECRET")?;
        if let Some(raw) = lookup("TOKEN_TTL_MINUTES") {
            let minutes = raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .with_context(|| format!("TOKEN_TTL_MINUTES must be a positive integer, got {raw:?}"))?;
            auth = auth.with_ttl_minutes(minutes);
        }

        let mut database = DatabaseSettings::new(database_url);
        if let Some(raw) = lookup("DATABASE_MAX_CONNECTIONS") {
            let max = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|max| *max > 0)
                .with_context(|| {
                    format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got {raw:?}")
                })?;
            database = database.with_max_connections(max);
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into())
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        let payroll_currency = lookup("PAYROLL_CURRENCY")
            .map(|value| value.trim().to_ascii_uppercase())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.into());
        if payroll_currency.len() != 3 || !payroll_currency.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(anyhow!(
                "PAYROLL_CURRENCY must be a three-letter ISO code, got {payroll_currency:?}"
            ));
        }

        Ok(Self {
            database,
            auth,
            cors_allowed_origins,
            payroll_currency,
        })
    }
}
