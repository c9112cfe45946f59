//! Usage snapshot normalization.
//!
//! The usage command's output schema drifts between releases, so extraction
//! is deliberately forgiving: anything that is not where or what it should
//! be is skipped rather than reported.

use crate::value::is_set;
use routeplan_error::{JsonError, JsonErrorKind, RouteplanResult};
use serde::Serialize;
use serde_json::{Map, Value, error::Category};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Vendor substring that selects Google providers.
pub const GOOGLE_VENDOR: &str = "google";

/// Vendor substring that selects OpenAI providers.
pub const OPENAI_VENDOR: &str = "openai";

/// Root keys that may hold the usage object, in priority order.
const USAGE_ROOT_KEYS: [&str; 2] = ["usage", "providerUsage"];

/// Window keys that may hold the model identifier, in priority order.
const MODEL_ID_KEYS: [&str; 2] = ["model", "modelId"];

/// Observed counters for one model, kept as the raw window object.
///
/// Metric fields are resolved lazily by the capacity evaluator, which knows
/// the alias table.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct UsageWindow(Map<String, Value>);

impl UsageWindow {
    /// Wrap a raw window object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// A top-level field of the window.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

/// Usage windows for one vendor, keyed and ordered by model identifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsageMap(BTreeMap<String, UsageWindow>);

impl UsageMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a window, replacing any earlier window for the same model.
    pub fn insert(&mut self, model_id: impl Into<String>, window: UsageWindow) {
        self.0.insert(model_id.into(), window);
    }

    /// Window for `model_id`, if one was observed.
    pub fn get(&self, model_id: &str) -> Option<&UsageWindow> {
        self.0.get(model_id)
    }

    /// Observed model identifiers, sorted and unique.
    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of observed models.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no models were observed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The usage object of a status report.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsageSnapshot {
    root: Map<String, Value>,
}

impl UsageSnapshot {
    /// Parse the usage command's stdout.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] if the text is not JSON or the document root
    /// is not an object. Everything below the root is tolerated.
    #[instrument(skip(text), fields(bytes = text.len()))]
    pub fn parse(text: &str) -> RouteplanResult<Self> {
        let document: Value = serde_json::from_str(text).map_err(|e| {
            JsonError::new(JsonErrorKind::Syntax {
                line: e.line(),
                column: e.column(),
                reason: syntax_reason(&e).to_string(),
            })
        })?;
        Self::from_document(document)
    }

    /// Locate the usage root inside an already parsed status document.
    ///
    /// The root is the first set value among `usage` and `providerUsage`.
    /// A root that is not an object is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] if the document itself is not an object.
    pub fn from_document(document: Value) -> RouteplanResult<Self> {
        let mut document = match document {
            Value::Object(document) => document,
            other => {
                return Err(JsonError::new(JsonErrorKind::RootNotObject {
                    found: value_kind(&other).to_string(),
                })
                .into());
            }
        };

        let chosen = USAGE_ROOT_KEYS
            .iter()
            .find(|key| document.get(**key).is_some_and(is_set))
            .and_then(|key| document.remove(*key));

        let root = match chosen {
            Some(Value::Object(root)) => root,
            Some(other) => {
                debug!(kind = value_kind(&other), "Usage root is not an object, treating as empty");
                Map::new()
            }
            None => {
                debug!("No usage root in snapshot");
                Map::new()
            }
        };

        Ok(Self { root })
    }

    /// The usage root object.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Extract usage windows for providers whose name contains `vendor_hint`.
    pub fn extract(&self, vendor_hint: Option<&str>) -> UsageMap {
        extract(&self.root, vendor_hint)
    }
}

/// Usage maps for the two vendors routeplan reasons about.
#[derive(Debug, Clone, PartialEq, Default, derive_getters::Getters)]
pub struct VendorUsage {
    /// Windows from providers whose name contains "google"
    google: UsageMap,
    /// Windows from providers whose name contains "openai"
    openai: UsageMap,
}

impl VendorUsage {
    /// Assemble from already extracted maps.
    pub fn new(google: UsageMap, openai: UsageMap) -> Self {
        Self { google, openai }
    }

    /// Extract both vendors from a snapshot.
    #[instrument(skip(snapshot))]
    pub fn from_snapshot(snapshot: &UsageSnapshot) -> Self {
        let usage = Self {
            google: snapshot.extract(Some(GOOGLE_VENDOR)),
            openai: snapshot.extract(Some(OPENAI_VENDOR)),
        };
        debug!(
            google_models = usage.google.len(),
            openai_models = usage.openai.len(),
            "Extracted vendor usage"
        );
        usage
    }
}

/// Collect usage windows from a usage root.
///
/// Reads `providers`, skipping entries whose `provider` name does not
/// contain `vendor_hint` (when given). Every window object with a model
/// identifier (`model`, else `modelId`) is recorded; later windows for the
/// same model replace earlier ones.
///
/// # Example
///
/// ```
/// use routeplan_core::extract;
/// use serde_json::json;
///
/// let root = json!({"providers": [
///     {"provider": "google-ai-studio", "windows": [{"model": "google/gemini-3-pro", "rpm": 3}]},
///     {"provider": "openai", "windows": [{"modelId": "openai/gpt-5.2"}]},
/// ]});
/// let google = extract(root.as_object().unwrap(), Some("google"));
/// assert_eq!(google.model_ids().collect::<Vec<_>>(), vec!["google/gemini-3-pro"]);
/// ```
pub fn extract(root: &Map<String, Value>, vendor_hint: Option<&str>) -> UsageMap {
    let mut usage = UsageMap::new();

    let Some(providers) = root.get("providers").and_then(Value::as_array) else {
        return usage;
    };

    for provider in providers {
        let Some(provider) = provider.as_object() else {
            debug!(kind = value_kind(provider), "Skipping provider entry that is not an object");
            continue;
        };

        let name = provider_name(provider);
        if let Some(hint) = vendor_hint {
            if !name.contains(hint) {
                continue;
            }
        }

        let Some(windows) = provider.get("windows").and_then(Value::as_array) else {
            continue;
        };

        for window in windows {
            let Some(fields) = window.as_object() else {
                debug!(provider = %name, "Skipping window that is not an object");
                continue;
            };
            match model_id(fields) {
                Some(model) => usage.insert(model, UsageWindow::new(fields.clone())),
                None => debug!(provider = %name, "Skipping window without model identifier"),
            }
        }
    }

    usage
}

fn provider_name(provider: &Map<String, Value>) -> String {
    match provider.get("provider") {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn model_id(window: &Map<String, Value>) -> Option<&str> {
    MODEL_ID_KEYS.iter().find_map(|key| {
        window
            .get(*key)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    })
}

fn syntax_reason(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        Category::Eof => "unexpected end of input",
        Category::Syntax => "syntax error",
        Category::Data => "invalid data",
        Category::Io => "read failure",
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
