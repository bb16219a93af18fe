use crate::error::{Error, Result};
use faststr::FastStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8181";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url:        Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Pre-issued token; when absent it is fetched from the backend on first use.
    pub csrf_token:      Option<FastStr>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url:        Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            csrf_token:      None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("BACKEND_BASE_URL") {
            config.base_url = Url::parse(base_url.trim())?;
        }
        if let Some(secs) = lookup("BACKEND_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout = parse_secs("BACKEND_CONNECT_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = lookup("BACKEND_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = parse_secs("BACKEND_REQUEST_TIMEOUT_SECS", &secs)?;
        }
        config.csrf_token = lookup("BACKEND_CSRF_TOKEN")
            .map(|token| token.trim().to_owned())
            .filter(|token| !token.is_empty())
            .map(Into::into);

        Ok(config)
    }
}

fn parse_secs(name: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| Error::Config(format!("{name} must be a whole number of seconds").into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8181/");
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.csrf_token.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("BACKEND_BASE_URL", "https://example.org/app/"),
            ("BACKEND_CONNECT_TIMEOUT_SECS", "3"),
            ("BACKEND_CSRF_TOKEN", " abc "),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://example.org/app/");
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.csrf_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_invalid_values() {
        let err = ClientConfig::from_lookup(lookup_from(&[("BACKEND_BASE_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = ClientConfig::from_lookup(lookup_from(&[("BACKEND_REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid config: BACKEND_REQUEST_TIMEOUT_SECS must be a whole number of seconds"
        );
    }
}
