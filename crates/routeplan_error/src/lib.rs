//! Error types for routeplan.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Only structural failures are represented here. Gaps in an otherwise
//! well-formed usage snapshot are absorbed by the decision core and never
//! surface as errors.
//!
//! # Examples
//!
//! ```
//! use routeplan_error::{JsonError, JsonErrorKind, RouteplanResult};
//!
//! fn parse_snapshot() -> RouteplanResult<()> {
//!     Err(JsonError::new(JsonErrorKind::Syntax {
//!         line: 1,
//!         column: 1,
//!         reason: "syntax error".to_string(),
//!     }))?
//! }
//!
//! assert!(parse_snapshot().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod storage;
mod upstream;

pub use config::ConfigError;
pub use error::{RouteplanError, RouteplanErrorKind, RouteplanResult};
pub use json::{JsonError, JsonErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use upstream::{UpstreamError, UpstreamErrorKind};
