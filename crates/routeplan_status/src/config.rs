//! Configuration for the status responder.

use routeplan_error::{ConfigError, RouteplanResult};
use std::net::SocketAddr;

/// Environment variable overriding the bind address.
pub const ADDR_ENV_VAR: &str = "ROUTEPLAN_STATUS_ADDR";

/// Environment variable overriding the reported service name.
pub const SERVICE_ENV_VAR: &str = "ROUTEPLAN_STATUS_SERVICE";

/// Default bind address.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Default reported service name.
pub const DEFAULT_SERVICE: &str = "Claw-Worker-01";

/// Where to listen and what to call ourselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct StatusServerConfig {
    /// Socket address to bind
    addr: SocketAddr,
    /// Service name reported by the status route
    service: String,
}

impl StatusServerConfig {
    /// Create a configuration from explicit values.
    pub fn new(addr: SocketAddr, service: impl Into<String>) -> Self {
        Self {
            addr,
            service: service.into(),
        }
    }

    /// Create config from environment variables.
    ///
    /// Reads:
    /// - `ROUTEPLAN_STATUS_ADDR` (default: "0.0.0.0:8080")
    /// - `ROUTEPLAN_STATUS_SERVICE` (default: "Claw-Worker-01")
    pub fn from_env() -> RouteplanResult<Self> {
        Self::from_values(
            std::env::var(ADDR_ENV_VAR).ok().as_deref(),
            std::env::var(SERVICE_ENV_VAR).ok().as_deref(),
        )
    }

    /// Create config from optional raw values, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not a valid socket address.
    pub fn from_values(addr: Option<&str>, service: Option<&str>) -> RouteplanResult<Self> {
        let raw = addr.unwrap_or(DEFAULT_ADDR);
        let addr = raw.trim().parse::<SocketAddr>().map_err(|e| {
            ConfigError::new(format!("{} is not a socket address ('{}'): {}", ADDR_ENV_VAR, raw, e))
        })?;
        let service = service
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_SERVICE);
        Ok(Self::new(addr, service))
    }
}
