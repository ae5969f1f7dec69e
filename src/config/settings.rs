//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_DATABASE_URL, DEFAULT_HOURLY_RATE,
    DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Parking fee per started hour
    pub hourly_rate: i64,
    admin_password: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("hourly_rate", &self.hourly_rate)
            .field("admin_password", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        let mut config = Self::with_secret(jwt_secret);

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Ok(url) = env::var("REDIS_URL") {
            config.redis_url = url;
        }
        if let Some(hours) = parse_env("JWT_EXPIRATION_HOURS") {
            config.jwt_expiration_hours = hours;
        }
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = parse_env("SERVER_PORT") {
            config.server_port = port;
        }
        match parse_env::<i64>("HOURLY_RATE") {
            Some(rate) if rate >= 0 => config.hourly_rate = rate,
            Some(rate) => tracing::warn!(rate, "Ignoring negative HOURLY_RATE"),
            None => {}
        }
        if let Ok(password) = env::var("ADMIN_PASSWORD") {
            config.admin_password = password;
        }

        config
    }

    /// Build a configuration with defaults for everything but the signing secret.
    ///
    /// # Panics
    /// Panics if the secret is shorter than the required minimum.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            hourly_rate: DEFAULT_HOURLY_RATE,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Password the administrator account is reset to at startup.
    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    #[test]
    fn test_with_secret_uses_defaults() {
        let config = Config::with_secret(SECRET);
        assert_eq!(config.hourly_rate, DEFAULT_HOURLY_RATE);
        assert_eq!(config.admin_password(), DEFAULT_ADMIN_PASSWORD);
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }

    #[test]
    #[should_panic(expected = "at least")]
    fn test_short_secret_rejected() {
        Config::with_secret("too-short");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", Config::with_secret(SECRET));
        assert!(!rendered.contains(SECRET));
        assert!(!rendered.contains(DEFAULT_ADMIN_PASSWORD));
    }
}
