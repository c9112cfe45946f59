//! Rate limit tables and run configuration.
//!
//! This crate holds everything routeplan knows before it looks at usage:
//! the per-model Gemini ceilings, the tiered OpenAI shared bucket, and the
//! layered configuration that picks the tier, the usage command and the
//! artifact location.
//!
//! ## Limit Tables
//!
//! [`limits_for`] builds an immutable [`LimitTable`] from the static
//! ceilings plus one tier selector:
//!
//! ```
//! use routeplan_limits::{limits_for, GeminiModel, SHARED_OPENAI_BUCKET};
//!
//! let table = limits_for(2);
//! assert_eq!(*table.get(SHARED_OPENAI_BUCKET).unwrap().rpm(), 5_000);
//! assert_eq!(*table.get(GeminiModel::Pro25.id()).unwrap().rpd(), 1_000);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;
mod limit;
mod metric;
pub mod tiers;

pub use settings::{RouteplanConfig, StatusCommandConfig, TIER_ENV_VAR};
pub use limit::{LimitTable, ProviderLimit, SHARED_OPENAI_BUCKET, limits_for};
pub use metric::Metric;
pub use tiers::{GeminiModel, OpenAiTier, RateCeiling};
