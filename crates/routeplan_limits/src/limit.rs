//! Immutable limit table keyed by vendor-qualified model identifier.

use crate::{GeminiModel, Metric, OpenAiTier, RateCeiling};
use serde::Serialize;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::{debug, instrument, warn};

/// Identifier of the bucket that aggregates usage across all OpenAI models.
pub const SHARED_OPENAI_BUCKET: &str = "openai/shared";

/// Ceilings for one model or shared bucket.
///
/// Serializes as `{"rpm": .., "tpm": .., "rpd": ..}`; the identifier is the
/// key of the surrounding [`LimitTable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_getters::Getters)]
pub struct ProviderLimit {
    /// Vendor-qualified identifier (e.g. "google/gemini-2.5-pro")
    #[serde(skip)]
    id: String,
    /// Requests per minute
    rpm: u64,
    /// Tokens per minute
    tpm: u64,
    /// Requests per day
    rpd: u64,
}

impl ProviderLimit {
    /// Capture the ceilings of a model or tier under the given identifier.
    pub fn from_ceiling(id: impl Into<String>, ceiling: &impl RateCeiling) -> Self {
        Self {
            id: id.into(),
            rpm: ceiling.rpm(),
            tpm: ceiling.tpm(),
            rpd: ceiling.rpd(),
        }
    }

    /// Ceiling for a single metric.
    pub fn ceiling(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Rpm => self.rpm,
            Metric::Tpm => self.tpm,
            Metric::Rpd => self.rpd,
        }
    }
}

/// Every known ceiling, keyed and ordered by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct LimitTable(BTreeMap<String, ProviderLimit>);

impl LimitTable {
    /// Ceilings for `model_id`, or `None` when the model is unconstrained.
    pub fn get(&self, model_id: &str) -> Option<&ProviderLimit> {
        self.0.get(model_id)
    }

    /// Iterate over all entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProviderLimit)> {
        self.0.iter().map(|(id, limit)| (id.as_str(), limit))
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ProviderLimit> for LimitTable {
    fn from_iter<I: IntoIterator<Item = ProviderLimit>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|limit| (limit.id.clone(), limit))
                .collect(),
        )
    }
}

/// Build the limit table for an OpenAI usage tier.
///
/// Combines the four Gemini model ceilings with the shared OpenAI bucket.
/// Tiers outside 1..=5 use Tier 1 ceilings.
///
/// # Example
///
/// ```
/// use routeplan_limits::{limits_for, SHARED_OPENAI_BUCKET};
///
/// let unknown = limits_for(9);
/// let tier1 = limits_for(1);
/// assert_eq!(unknown, tier1);
/// assert_eq!(*unknown.get(SHARED_OPENAI_BUCKET).unwrap().tpm(), 500_000);
/// ```
#[instrument]
pub fn limits_for(tier: i64) -> LimitTable {
    let openai = match OpenAiTier::from_level(tier) {
        Some(resolved) => resolved,
        None => {
            warn!(tier, "Unknown OpenAI tier, using Tier 1 limits");
            OpenAiTier::default()
        }
    };
    debug!(tier = openai.name(), "Building limit table");

    GeminiModel::iter()
        .map(|model| ProviderLimit::from_ceiling(model.id(), &model))
        .chain(std::iter::once(ProviderLimit::from_ceiling(
            SHARED_OPENAI_BUCKET,
            &openai,
        )))
        .collect()
}
