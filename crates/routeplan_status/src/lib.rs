//! Stateless HTTP status responder.
//!
//! Workers that host routeplan expose `GET /api/v1/status` so that
//! orchestration can tell they are alive. The route carries no routing
//! state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;

pub use api::{StatusState, create_router, serve};
pub use config::{ADDR_ENV_VAR, DEFAULT_ADDR, DEFAULT_SERVICE, SERVICE_ENV_VAR, StatusServerConfig};
