//! Server settings loaded via OrthoConfig, and the resolved server config.

use std::ffi::OsString;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use contacts_api::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Failures while turning raw settings into a runnable configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Defaults, files, environment and CLI could not be merged.
    #[error("failed to load server settings: {0}")]
    Load(String),
    /// `host` is not an IP address.
    #[error("invalid bind host {host:?}")]
    InvalidHost {
        /// Offending value.
        host: String,
    },
}

/// Layered server settings (defaults, file, `CONTACTS_*` env, CLI).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACTS")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL; contacts are kept in memory when absent.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Pool checkout timeout in seconds.
    pub pool_connection_timeout_secs: Option<u64>,
    /// Apply embedded migrations at startup.
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    /// Load settings from `args` plus the environment and config files.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|err| SettingsError::Load(err.to_string()))
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
                .with_connection_timeout(Duration::from_secs(
                    self.pool_connection_timeout_secs
                        .unwrap_or(DEFAULT_POOL_CONNECTION_TIMEOUT_SECS),
                )),
        )
    }

    /// Whether startup should apply pending migrations.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}

/// Resolved configuration handed to [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Listen on `bind_addr` with the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Store contacts in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    //! Settings parsing against a locked environment.

    use super::*;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 6] = [
        "CONTACTS_HOST",
        "CONTACTS_PORT",
        "CONTACTS_DATABASE_URL",
        "CONTACTS_POOL_MAX_SIZE",
        "CONTACTS_POOL_CONNECTION_TIMEOUT_SECS",
        "CONTACTS_RUN_MIGRATIONS",
    ];

    fn load(overrides: &[(&str, &str)]) -> ServerSettings {
        let _guard = lock_env(KEYS.map(|key| {
            let value = overrides
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_owned());
            (key, value)
        }));
        ServerSettings::load_from_args([OsString::from("contacts-api")])
            .expect("settings should load")
    }

    #[rstest]
    fn defaults_use_memory_store_on_port_8080() {
        let settings = load(&[]);

        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert!(settings.pool_config().is_none());
        assert!(settings.run_migrations());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load(&[
            ("CONTACTS_HOST", "127.0.0.1"),
            ("CONTACTS_PORT", "9000"),
            ("CONTACTS_DATABASE_URL", "postgres://localhost/contacts"),
            ("CONTACTS_POOL_MAX_SIZE", "3"),
            ("CONTACTS_RUN_MIGRATIONS", "false"),
        ]);

        assert_eq!(
            settings.bind_addr().expect("bind address"),
            SocketAddr::from(([127, 0, 0, 1], 9000))
        );
        let pool = settings.pool_config().expect("pool configured");
        assert_eq!(pool.database_url(), "postgres://localhost/contacts");
        assert_eq!(pool.max_size(), 3);
        assert!(!settings.run_migrations());
    }

    #[rstest]
    fn blank_database_url_means_memory_store() {
        let settings = load(&[("CONTACTS_DATABASE_URL", "  ")]);

        assert!(settings.pool_config().is_none());
    }

    #[rstest]
    fn hostnames_are_rejected() {
        let settings = load(&[("CONTACTS_HOST", "localhost")]);

        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost { .. })
        ));
    }
}
