//! The three metrics every ceiling and usage window is measured in.

use serde::Serialize;

/// A rate/quota metric.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    /// Requests per minute
    Rpm,
    /// Tokens per minute
    Tpm,
    /// Requests per day
    Rpd,
}
