use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_ENVIRONMENT: &str = "Development";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Deployment name. `Development` turns on the OpenAPI document.
    pub environment: String,
}

impl AppConfig {
    /// Reads `HOST`, `PORT` and `APP_ENV`, falling back to defaults for unset
    /// variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = value("HOST", DEFAULT_HOST)
            .parse::<IpAddr>()
            .context("HOST must be an IP address")?;
        let port = value("PORT", DEFAULT_PORT)
            .parse::<u16>()
            .context("PORT must be a number between 0 and 65535")?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            environment: value("APP_ENV", DEFAULT_ENVIRONMENT),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case(DEFAULT_ENVIRONMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.environment, "Development");
        assert!(config.is_development());
    }

    #[test]
    fn reads_overrides() {
        let config =
            config_from(&[("HOST", "0.0.0.0"), ("PORT", "8080"), ("APP_ENV", "Production")])
                .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.environment, "Production");
        assert!(!config.is_development());
    }

    #[test]
    fn rejects_bad_port() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn rejects_bad_host() {
        assert!(config_from(&[("HOST", "local host")]).is_err());
    }
}
