use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Settings for the HTTP server, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS; the report front end in development by default.
    pub cors_origins: Vec<String>,
    /// Upper bound on a single request, report aggregation included.
    pub request_timeout_secs: u64,
    pub database_max_connections: u32,
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `CORS_ORIGINS` (comma-separated),
    /// `REQUEST_TIMEOUT_SECS` and `DATABASE_MAX_CONNECTIONS`.
    ///
    /// Unset variables fall back to local-development defaults. A set but
    /// unparsable value panics.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins: parse_origins(&env_or(
                "CORS_ORIGINS",
                "http://localhost:5173".to_string(),
            )),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            database_max_connections: env_or(
                "DATABASE_MAX_CONNECTIONS",
                placement_db::DEFAULT_MAX_CONNECTIONS,
            ),
        }
    }

    /// Socket address to listen on. Panics if `host` is not an IP address.
    pub fn bind_addr(&self) -> SocketAddr {
        let ip: IpAddr = self
            .host
            .parse()
            .unwrap_or_else(|e| panic!("HOST {:?} is not an IP address: {e}", self.host));
        SocketAddr::new(ip, self.port)
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key}={raw:?} is invalid: {e}")),
        Err(_) => default,
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
