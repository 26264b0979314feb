//! Environment-driven configuration, resolved once at process start.

use crate::error::ApiError;
use std::net::SocketAddr;

/// Database name used when `APP_ENV` is anything other than `test`.
const DEFAULT_DATABASE: &str = "biztrack";
/// Database name used when `APP_ENV=test`.
const TEST_DATABASE: &str = "biztrack_test";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Reads `DATABASE_URL`, `APP_ENV`, and `LISTEN_ADDR`.
    ///
    /// `DATABASE_URL` overrides the computed URL entirely; otherwise the
    /// database name is selected by `APP_ENV` (`test` picks the test
    /// database) on a local server.
    pub fn from_env() -> Result<Config, ApiError> {
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let name = if std::env::var("APP_ENV").as_deref() == Ok("test") {
                    TEST_DATABASE
                } else {
                    DEFAULT_DATABASE
                };
                format!("postgres://localhost/{}", name)
            }
        };
        let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
        let listen_addr = listen_addr
            .parse()
            .map_err(|e| ApiError::BadRequest(format!("invalid LISTEN_ADDR: {}", e)))?;
        Ok(Config { database_url, listen_addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_database() {
        temp_env::with_vars(
            [("DATABASE_URL", None::<&str>), ("APP_ENV", None), ("LISTEN_ADDR", None)],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.database_url, "postgres://localhost/biztrack");
                assert_eq!(config.listen_addr.port(), 3000);
            },
        );
    }

    #[test]
    fn test_env_selects_test_database() {
        temp_env::with_vars(
            [("DATABASE_URL", None), ("APP_ENV", Some("test"))],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.database_url, "postgres://localhost/biztrack_test");
            },
        );
    }

    #[test]
    fn database_url_overrides_app_env() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://db.internal/billing")),
                ("APP_ENV", Some("test")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.database_url, "postgres://db.internal/billing");
            },
        );
    }

    #[test]
    fn invalid_listen_addr_is_rejected() {
        temp_env::with_vars([("LISTEN_ADDR", Some("not-an-addr"))], || {
            assert!(Config::from_env().is_err());
        });
    }
}
