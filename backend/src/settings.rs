//! Gateway settings loaded via OrthoConfig.
//!
//! Values come from `GATEWAY_*` environment variables, configuration files,
//! or command-line flags. The backend base URL is resolved separately, see
//! [`crate::outbound::backend::backend_base_url_from_env`].

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Listen address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Runtime settings for the gateway process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GATEWAY")]
pub struct GatewaySettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Timeout for backend calls in seconds. Unset or zero disables it.
    pub backend_timeout_secs: Option<u64>,
}

impl GatewaySettings {
    /// Parsed listen address, falling back to [`DEFAULT_BIND_ADDR`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] for malformed values.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self
            .bind_addr
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Outbound timeout, if one is configured.
    pub fn backend_timeout(&self) -> Option<Duration> {
        self.backend_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for gateway settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> GatewaySettings {
        GatewaySettings::load_from_iter([OsString::from("oncare-gateway")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("GATEWAY_BIND_ADDR", None::<String>),
            ("GATEWAY_BACKEND_TIMEOUT_SECS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal address")
        );
        assert!(settings.backend_timeout().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("GATEWAY_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("GATEWAY_BACKEND_TIMEOUT_SECS", Some("15".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(settings.backend_timeout(), Some(Duration::from_secs(15)));
    }

    #[rstest]
    fn zero_timeout_means_none() {
        let settings = GatewaySettings {
            bind_addr: None,
            backend_timeout_secs: Some(0),
        };
        assert!(settings.backend_timeout().is_none());
    }

    #[rstest]
    fn malformed_bind_addr_is_rejected() {
        let settings = GatewaySettings {
            bind_addr: Some("localhost".to_owned()),
            backend_timeout_secs: None,
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }
}
