use std::env;
use std::net::{AddrParseError, SocketAddr};

/// HTTP listener and CORS settings, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public host name, used for the same-origin CORS default
    pub domain: String,
    pub scheme: String,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            domain: "localhost:8080".to_string(),
            scheme: "http".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("STAGEBOOK_HOST").unwrap_or(defaults.host),
            port: env::var("STAGEBOOK_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            domain: env::var("STAGEBOOK_DOMAIN").unwrap_or(defaults.domain),
            scheme: env::var("STAGEBOOK_SCHEME").unwrap_or(defaults.scheme),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn own_origin(&self) -> String {
        format!("{}://{}", self.scheme, self.domain)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
