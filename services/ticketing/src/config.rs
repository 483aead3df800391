use chrono::NaiveTime;

use crate::domain::types::CodeStrategy;

/// Ticketing service configuration loaded from environment variables.
#[derive(Debug)]
pub struct TicketingConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing identity tokens.
    pub jwt_secret: String,
    /// Salt prepended to raw identities before hashing. Env var: `IDENTITY_SALT`.
    pub identity_salt: String,
    /// TCP port for the HTTP server (default 3000). Env var: `TICKETING_PORT`.
    pub ticketing_port: u16,
    /// Identity token lifetime in seconds (default 3600). Env var: `IDENTITY_TOKEN_TTL_SECS`.
    pub identity_token_ttl_secs: u64,
    /// `sequential` (default) or `random`. Env var: `VERIFICATION_CODE_STRATEGY`.
    pub verification_code_strategy: CodeStrategy,
    /// UTC wall-clock time of the daily expiry sweep, `HH:MM` (default 00:00).
    /// Env var: `EXPIRY_SWEEP_AT`.
    pub expiry_sweep_at: NaiveTime,
    /// Env var: `EXPIRY_SWEEP_ENABLED` (default true; `0|false|off|no` disables).
    pub expiry_sweep_enabled: bool,
}

impl TicketingConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            identity_salt: std::env::var("IDENTITY_SALT").expect("IDENTITY_SALT"),
            ticketing_port: std::env::var("TICKETING_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            identity_token_ttl_secs: std::env::var("IDENTITY_TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            verification_code_strategy: std::env::var("VERIFICATION_CODE_STRATEGY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            expiry_sweep_at: std::env::var("EXPIRY_SWEEP_AT")
                .ok()
                .and_then(|v| NaiveTime::parse_from_str(v.trim(), "%H:%M").ok())
                .unwrap_or(NaiveTime::MIN),
            expiry_sweep_enabled: std::env::var("EXPIRY_SWEEP_ENABLED")
                .map(|v| parse_enabled(&v))
                .unwrap_or(true),
        }
    }
}

fn parse_enabled(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}
