//! Provider routing decisions for routeplan.
//!
//! The decision is a pure function of a usage snapshot and the OpenAI tier:
//!
//! 1. [`UsageSnapshot`] locates the usage root and [`VendorUsage`] splits it
//!    into per-vendor [`UsageMap`]s.
//! 2. [`NearCapFlags::evaluate`] compares the four tracked Gemini models
//!    against their ceilings with [`is_near_capacity`].
//! 3. [`select`] maps the flags onto a [`PreferenceMap`].
//! 4. [`RoutingArtifact`] bundles everything for serialization.
//!
//! [`plan`] runs all four steps.
//!
//! ```
//! use routeplan_core::{plan, Selection, UsageSnapshot};
//!
//! let snapshot = UsageSnapshot::parse(r#"{"usage": {"providers": []}}"#).unwrap();
//! let artifact = plan(&snapshot, 1, 1_700_000_000);
//! assert_eq!(*artifact.task_preferred().coding_normal(), Selection::GeminiPro25);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod capacity;
mod plan;
mod preference;
mod usage;
mod value;

pub use artifact::{AvailableModels, RoutingArtifact};
pub use capacity::{FieldPath, NEAR_CAP_THRESHOLD, NearCapFlags, aliases, is_near_capacity};
pub use plan::plan;
pub use preference::{PreferenceMap, Selection, TaskCategory, select};
pub use usage::{
    GOOGLE_VENDOR, OPENAI_VENDOR, UsageMap, UsageSnapshot, UsageWindow, VendorUsage, extract,
};
