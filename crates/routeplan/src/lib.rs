//! Routeplan: pick a model provider per task category.
//!
//! One run fetches a usage snapshot from an external command, computes
//! near-capacity flags and preferences with [`routeplan_core`], and replaces
//! the routing artifact on disk. Any failure before the write leaves the
//! previous artifact untouched.
//!
//! ```no_run
//! use routeplan::{CommandStatusSource, run_once};
//! use routeplan_limits::RouteplanConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RouteplanConfig::load()?;
//! let source = CommandStatusSource::from_config(&config.status_command);
//! let outcome = run_once(&config, &source, chrono::Utc::now().timestamp())?;
//! println!("{}", outcome.path.display());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod run;
mod source;
mod writer;

pub use run::{RunOutcome, run_once};
pub use source::{CommandStatusSource, StatusSource};
pub use writer::{write_artifact, write_atomic};

pub use routeplan_core::{NearCapFlags, PreferenceMap, RoutingArtifact, Selection, TaskCategory};
pub use routeplan_error::{RouteplanError, RouteplanErrorKind, RouteplanResult};
pub use routeplan_limits::RouteplanConfig;
