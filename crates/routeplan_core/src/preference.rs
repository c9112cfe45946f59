//! Task-category provider preferences.

use crate::NearCapFlags;
use routeplan_limits::GeminiModel;
use serde::{Serialize, Serializer};
use tracing::instrument;

/// Classes of request intent that are routed independently.
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
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskCategory {
    /// Open-ended assistance
    GeneralAssistant,
    /// Short answers and device control
    QuickQaOrControl,
    /// Everyday coding
    CodingNormal,
    /// Long-form reasoning, planning and debugging
    DeepReasoningPlanningDebug,
}

/// A provider a task category can be routed to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum Selection {
    /// Local general-purpose handler
    #[strum(serialize = "local.general")]
    LocalGeneral,
    /// Local low-latency handler
    #[strum(serialize = "local.quick")]
    LocalQuick,
    /// Local coding handler
    #[strum(serialize = "local.coding")]
    LocalCoding,
    /// Local deep-reasoning handler
    #[strum(serialize = "local.deep_reasoning")]
    LocalDeepReasoning,
    /// Gemini 2.5 Pro
    #[strum(serialize = "google/gemini-2.5-pro")]
    GeminiPro25,
    /// Gemini 2.5 Flash
    #[strum(serialize = "google/gemini-2.5-flash")]
    GeminiFlash25,
    /// Gemini 3 Pro
    #[strum(serialize = "google/gemini-3-pro")]
    GeminiPro3,
    /// Gemini 3 Flash
    #[strum(serialize = "google/gemini-3-flash")]
    GeminiFlash3,
    /// Last resort for general assistance only
    #[strum(serialize = "openai/gpt-5.2")]
    OpenAiGpt52,
}

impl Selection {
    /// Identifier written to the routing artifact.
    pub fn id(&self) -> &'static str {
        (*self).into()
    }
}

impl From<GeminiModel> for Selection {
    fn from(model: GeminiModel) -> Self {
        match model {
            GeminiModel::Pro25 => Selection::GeminiPro25,
            GeminiModel::Flash25 => Selection::GeminiFlash25,
            GeminiModel::Pro3 => Selection::GeminiPro3,
            GeminiModel::Flash3 => Selection::GeminiFlash3,
        }
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Provider per task category. Always holds exactly the four categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_getters::Getters)]
pub struct PreferenceMap {
    /// Provider for [`TaskCategory::GeneralAssistant`]
    general_assistant: Selection,
    /// Provider for [`TaskCategory::QuickQaOrControl`]
    quick_qa_or_control: Selection,
    /// Provider for [`TaskCategory::CodingNormal`]
    coding_normal: Selection,
    /// Provider for [`TaskCategory::DeepReasoningPlanningDebug`]
    deep_reasoning_planning_debug: Selection,
}

impl PreferenceMap {
    /// Preferences when nothing is near capacity.
    pub fn baseline() -> Self {
        select(&NearCapFlags::default())
    }

    /// Provider for a category.
    pub fn get(&self, category: TaskCategory) -> Selection {
        match category {
            TaskCategory::GeneralAssistant => self.general_assistant,
            TaskCategory::QuickQaOrControl => self.quick_qa_or_control,
            TaskCategory::CodingNormal => self.coding_normal,
            TaskCategory::DeepReasoningPlanningDebug => self.deep_reasoning_planning_debug,
        }
    }
}

/// Choose a provider for every task category.
///
/// The two Gemini 2.5 flags pick the row; when both are saturated, general
/// assistance escalates through Gemini 3 Pro, Gemini 3 Flash and finally
/// OpenAI. Coding and reasoning never leave Gemini 2.5 or the local
/// handlers, and quick Q&A is always local.
///
/// | 2.5 Pro | 2.5 Flash | general | coding / reasoning |
/// |---|---|---|---|
/// | ok | ok | local | 2.5 Pro |
/// | near | ok | local | 2.5 Flash |
/// | ok | near | local | local |
/// | near | near | escalation | local |
///
/// # Example
///
/// ```
/// use routeplan_core::{select, NearCapFlags, Selection};
///
/// let prefs = select(&NearCapFlags::new(true, true, true, false));
/// assert_eq!(*prefs.general_assistant(), Selection::GeminiFlash3);
/// assert_eq!(*prefs.coding_normal(), Selection::LocalCoding);
/// ```
#[instrument(level = "debug", ret)]
pub fn select(flags: &NearCapFlags) -> PreferenceMap {
    let (general_assistant, coding_normal, deep_reasoning_planning_debug) =
        match (flags.gemini_pro, flags.gemini_flash) {
            (false, false) => (
                Selection::LocalGeneral,
                Selection::GeminiPro25,
                Selection::GeminiPro25,
            ),
            (true, false) => (
                Selection::LocalGeneral,
                Selection::GeminiFlash25,
                Selection::GeminiFlash25,
            ),
            (false, true) => (
                Selection::LocalGeneral,
                Selection::LocalCoding,
                Selection::LocalDeepReasoning,
            ),
            (true, true) => (
                escalate_general(flags),
                Selection::LocalCoding,
                Selection::LocalDeepReasoning,
            ),
        };

    PreferenceMap {
        general_assistant,
        quick_qa_or_control: Selection::LocalQuick,
        coding_normal,
        deep_reasoning_planning_debug,
    }
}

fn escalate_general(flags: &NearCapFlags) -> Selection {
    if !flags.gemini3_pro {
        Selection::GeminiPro3
    } else if !flags.gemini3_flash {
        Selection::GeminiFlash3
    } else {
        Selection::OpenAiGpt52
    }
}
