//! Near-capacity evaluation.

use crate::value::{as_number, is_set};
use crate::{UsageMap, UsageWindow};
use routeplan_limits::{GeminiModel, LimitTable, Metric};
use serde::Serialize;
use serde_json::Value;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Usage/limit ratio at or above which a metric counts as saturated.
pub const NEAR_CAP_THRESHOLD: f64 = 0.90;

/// Where a metric may live inside a usage window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// A top-level field
    Direct(&'static str),
    /// A field of a nested object
    Nested(&'static str, &'static str),
}

impl FieldPath {
    /// Resolve the path against a window. Non-object intermediates resolve
    /// to `None`.
    pub fn lookup<'a>(&self, window: &'a UsageWindow) -> Option<&'a Value> {
        match self {
            FieldPath::Direct(field) => window.field(field),
            FieldPath::Nested(parent, field) => window
                .field(parent)
                .and_then(Value::as_object)
                .and_then(|nested| nested.get(*field)),
        }
    }
}

const RPM_ALIASES: &[FieldPath] = &[
    FieldPath::Direct("rpm"),
    FieldPath::Direct("requestsPerMinute"),
    FieldPath::Nested("requestRate", "rpm"),
];

const TPM_ALIASES: &[FieldPath] = &[
    FieldPath::Direct("tpm"),
    FieldPath::Direct("tokensPerMinute"),
    FieldPath::Nested("tokenRate", "tpm"),
];

const RPD_ALIASES: &[FieldPath] = &[
    FieldPath::Direct("rpd"),
    FieldPath::Direct("requestsPerDay"),
    FieldPath::Nested("requestRate", "rpd"),
];

/// Field paths consulted for a metric, highest priority first.
pub fn aliases(metric: Metric) -> &'static [FieldPath] {
    match metric {
        Metric::Rpm => RPM_ALIASES,
        Metric::Tpm => TPM_ALIASES,
        Metric::Rpd => RPD_ALIASES,
    }
}

/// First set value among a metric's aliases.
fn observed<'a>(window: &'a UsageWindow, metric: Metric) -> Option<&'a Value> {
    aliases(metric)
        .iter()
        .filter_map(|path| path.lookup(window))
        .find(|value| is_set(value))
}

fn saturated(observed: Option<&Value>, ceiling: u64) -> bool {
    if ceiling == 0 {
        return false;
    }
    observed
        .and_then(as_number)
        .is_some_and(|used| used / ceiling as f64 >= NEAR_CAP_THRESHOLD)
}

/// Whether `model_id` has used at least 90% of any of its ceilings.
///
/// Models without ceilings in `limits` are never near capacity. A model
/// with no observed window, or metrics that are missing or non-numeric,
/// contributes nothing toward saturation.
///
/// # Example
///
/// ```
/// use routeplan_core::{is_near_capacity, UsageMap, UsageWindow};
/// use routeplan_limits::limits_for;
/// use serde_json::json;
///
/// let limits = limits_for(1);
/// let mut usage = UsageMap::new();
/// let window = json!({"requestRate": {"rpd": 225}});
/// usage.insert("google/gemini-3-pro", UsageWindow::new(window.as_object().unwrap().clone()));
///
/// assert!(is_near_capacity("google/gemini-3-pro", &usage, &limits));
/// assert!(!is_near_capacity("google/gemini-2.5-pro", &usage, &limits));
/// ```
#[instrument(skip(usage, limits))]
pub fn is_near_capacity(model_id: &str, usage: &UsageMap, limits: &LimitTable) -> bool {
    let Some(limit) = limits.get(model_id) else {
        debug!("No limits registered, treating as unconstrained");
        return false;
    };

    let empty = UsageWindow::default();
    let window = usage.get(model_id).unwrap_or(&empty);

    Metric::iter().any(|metric| {
        let hit = saturated(observed(window, metric), limit.ceiling(metric));
        if hit {
            debug!(%metric, ceiling = limit.ceiling(metric), "Metric near capacity");
        }
        hit
    })
}

/// Saturation of the four tracked Gemini models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct NearCapFlags {
    /// google/gemini-2.5-pro
    pub gemini_pro: bool,
    /// google/gemini-2.5-flash
    pub gemini_flash: bool,
    /// google/gemini-3-pro
    pub gemini3_pro: bool,
    /// google/gemini-3-flash
    pub gemini3_flash: bool,
}

impl NearCapFlags {
    /// Flags from explicit values, in (2.5 Pro, 2.5 Flash, 3 Pro, 3 Flash) order.
    pub fn new(gemini_pro: bool, gemini_flash: bool, gemini3_pro: bool, gemini3_flash: bool) -> Self {
        Self {
            gemini_pro,
            gemini_flash,
            gemini3_pro,
            gemini3_flash,
        }
    }

    /// Evaluate every tracked model against Google usage.
    #[instrument(skip_all)]
    pub fn evaluate(google: &UsageMap, limits: &LimitTable) -> Self {
        let near = |model: GeminiModel| is_near_capacity(model.id(), google, limits);
        Self {
            gemini_pro: near(GeminiModel::Pro25),
            gemini_flash: near(GeminiModel::Flash25),
            gemini3_pro: near(GeminiModel::Pro3),
            gemini3_flash: near(GeminiModel::Flash3),
        }
    }

    /// Flag for a single tracked model.
    pub fn get(&self, model: GeminiModel) -> bool {
        match model {
            GeminiModel::Pro25 => self.gemini_pro,
            GeminiModel::Flash25 => self.gemini_flash,
            GeminiModel::Pro3 => self.gemini3_pro,
            GeminiModel::Flash3 => self.gemini3_flash,
        }
    }
}
