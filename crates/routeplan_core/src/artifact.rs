//! The routing artifact handed to the request router.

use crate::{NearCapFlags, PreferenceMap, UsageMap, VendorUsage};
use routeplan_limits::LimitTable;
use serde::Serialize;
use serde_json::{Map, Value};

/// Models observed in the usage snapshot, per vendor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, derive_getters::Getters)]
pub struct AvailableModels {
    /// Google model identifiers, sorted and unique
    google: Vec<String>,
    /// OpenAI model identifiers, sorted and unique
    openai: Vec<String>,
}

impl AvailableModels {
    /// Collect the observed model identifiers of each vendor.
    pub fn from_usage(usage: &VendorUsage) -> Self {
        Self {
            google: observed_ids(usage.google()),
            openai: observed_ids(usage.openai()),
        }
    }
}

fn observed_ids(usage: &UsageMap) -> Vec<String> {
    // UsageMap keys are already ordered and unique.
    usage.model_ids().map(str::to_string).collect()
}

/// A complete routing decision, rebuilt from scratch on every run.
#[derive(Debug, Clone, PartialEq, Serialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct RoutingArtifact {
    /// Unix seconds at which the decision was made
    updated_at: i64,
    /// Every ceiling used for the decision
    limits: LimitTable,
    /// OpenAI tier as requested, before fallback
    openai_tier: i64,
    /// Saturation of the tracked Gemini models
    near_cap: NearCapFlags,
    /// Provider per task category
    task_preferred: PreferenceMap,
    /// Models seen in the snapshot
    available_models: AvailableModels,
}

impl RoutingArtifact {
    /// Assemble an artifact from the pieces of a decision.
    pub fn build(
        limits: LimitTable,
        openai_tier: i64,
        near_cap: NearCapFlags,
        task_preferred: PreferenceMap,
        usage: &VendorUsage,
        updated_at: i64,
    ) -> Self {
        Self {
            updated_at,
            limits,
            openai_tier,
            near_cap,
            task_preferred,
            available_models: AvailableModels::from_usage(usage),
        }
    }

    /// The artifact as a JSON value with object keys sorted at every level.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self).map(sort_keys)
    }

    /// The artifact as sorted, 2-space indented JSON text.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_value()?)
    }
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(fields) => {
            let mut entries: Vec<(String, Value)> = fields.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
