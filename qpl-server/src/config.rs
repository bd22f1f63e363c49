use anyhow::{Context, Result};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3080;
pub const DEFAULT_DATA_FILE: &str = "data/qpl-data.json";

/// Runtime settings for the QPL server, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub data_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl ServerConfig {
    /// Build the config from `QPL_BIND_ADDR`, `QPL_PORT` and `QPL_DATA_FILE`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("QPL_BIND_ADDR") {
            config.bind_addr = addr
                .trim()
                .parse()
                .with_context(|| format!("QPL_BIND_ADDR is not an IP address: '{addr}'"))?;
        }

        if let Some(port) = lookup("QPL_PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("QPL_PORT is not a valid port: '{port}'"))?;
        }

        if let Some(path) = lookup("QPL_DATA_FILE") {
            if !path.trim().is_empty() {
                config.data_file = PathBuf::from(path.trim());
            }
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().port(), 3080);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("QPL_BIND_ADDR", "127.0.0.1"),
            ("QPL_PORT", "8080"),
            ("QPL_DATA_FILE", "/tmp/qpl.json"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.data_file, PathBuf::from("/tmp/qpl.json"));
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[("QPL_PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("QPL_PORT"));
    }
}
