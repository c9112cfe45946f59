//! Provider-specific ceiling tables.
//!
//! Gemini limits are tracked per model. OpenAI limits are tracked as a
//! single shared bucket whose per-minute ceilings depend on the account's
//! usage tier.

/// Rate ceilings for one model or bucket.
///
/// Unlike per-request limiters, routeplan only compares observed usage
/// against these values, so every ceiling is required and non-zero.
pub trait RateCeiling {
    /// Requests per minute ceiling.
    fn rpm(&self) -> u64;

    /// Tokens per minute ceiling.
    fn tpm(&self) -> u64;

    /// Requests per day ceiling.
    fn rpd(&self) -> u64;

    /// Human-readable name (e.g. "Tier 1", "Gemini 2.5 Pro").
    fn name(&self) -> &str;
}

/// Gemini models whose capacity drives the routing decision.
///
/// Limits come from the account's AI Studio quota page.
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
pub enum GeminiModel {
    /// Primary model for coding and deep reasoning
    #[strum(serialize = "google/gemini-2.5-pro")]
    Pro25,
    /// Same-generation fallback when 2.5 Pro is saturated
    #[strum(serialize = "google/gemini-2.5-flash")]
    Flash25,
    /// First escalation for general assistance
    #[strum(serialize = "google/gemini-3-pro")]
    Pro3,
    /// Second escalation for general assistance
    #[strum(serialize = "google/gemini-3-flash")]
    Flash3,
}

impl GeminiModel {
    /// Vendor-qualified model identifier.
    pub fn id(&self) -> &'static str {
        (*self).into()
    }
}

impl RateCeiling for GeminiModel {
    fn rpm(&self) -> u64 {
        match self {
            GeminiModel::Pro25 => 150,
            GeminiModel::Flash25 => 1_000,
            GeminiModel::Pro3 => 25,
            GeminiModel::Flash3 => 1_000,
        }
    }

    fn tpm(&self) -> u64 {
        match self {
            GeminiModel::Pro25 => 2_000_000,
            GeminiModel::Flash25 | GeminiModel::Pro3 | GeminiModel::Flash3 => 1_000_000,
        }
    }

    fn rpd(&self) -> u64 {
        match self {
            GeminiModel::Pro25 => 1_000,
            GeminiModel::Flash25 => 10_000,
            GeminiModel::Pro3 => 250,
            GeminiModel::Flash3 => 10_000,
        }
    }

    fn name(&self) -> &str {
        match self {
            GeminiModel::Pro25 => "Gemini 2.5 Pro",
            GeminiModel::Flash25 => "Gemini 2.5 Flash",
            GeminiModel::Pro3 => "Gemini 3 Pro",
            GeminiModel::Flash3 => "Gemini 3 Flash",
        }
    }
}

/// OpenAI API usage tiers.
///
/// Based on [OpenAI usage tiers](https://platform.openai.com/docs/guides/rate-limits).
/// Only the per-minute ceilings vary; the daily request ceiling of the
/// shared bucket is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::EnumIter)]
pub enum OpenAiTier {
    /// Tier 1: 500 RPM, 500K TPM
    #[default]
    Tier1,
    /// Tier 2: 5000 RPM, 1M TPM
    Tier2,
    /// Tier 3: 5000 RPM, 2M TPM
    Tier3,
    /// Tier 4: 10000 RPM, 4M TPM
    Tier4,
    /// Tier 5: 15000 RPM, 40M TPM
    Tier5,
}

impl OpenAiTier {
    /// Daily request ceiling of the shared bucket, independent of tier.
    pub const SHARED_RPD: u64 = 1_000;

    /// Look up a tier by its number. Returns `None` outside 1..=5.
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(OpenAiTier::Tier1),
            2 => Some(OpenAiTier::Tier2),
            3 => Some(OpenAiTier::Tier3),
            4 => Some(OpenAiTier::Tier4),
            5 => Some(OpenAiTier::Tier5),
            _ => None,
        }
    }

    /// Look up a tier, treating unknown numbers as Tier 1.
    pub fn resolve(level: i64) -> Self {
        Self::from_level(level).unwrap_or_default()
    }

    /// The tier's number.
    pub fn level(&self) -> i64 {
        match self {
            OpenAiTier::Tier1 => 1,
            OpenAiTier::Tier2 => 2,
            OpenAiTier::Tier3 => 3,
            OpenAiTier::Tier4 => 4,
            OpenAiTier::Tier5 => 5,
        }
    }
}

impl RateCeiling for OpenAiTier {
    fn rpm(&self) -> u64 {
        match self {
            OpenAiTier::Tier1 => 500,
            OpenAiTier::Tier2 | OpenAiTier::Tier3 => 5_000,
            OpenAiTier::Tier4 => 10_000,
            OpenAiTier::Tier5 => 15_000,
        }
    }

    fn tpm(&self) -> u64 {
        match self {
            OpenAiTier::Tier1 => 500_000,
            OpenAiTier::Tier2 => 1_000_000,
            OpenAiTier::Tier3 => 2_000_000,
            OpenAiTier::Tier4 => 4_000_000,
            OpenAiTier::Tier5 => 40_000_000,
        }
    }

    fn rpd(&self) -> u64 {
        Self::SHARED_RPD
    }

    fn name(&self) -> &str {
        match self {
            OpenAiTier::Tier1 => "Tier 1",
            OpenAiTier::Tier2 => "Tier 2",
            OpenAiTier::Tier3 => "Tier 3",
            OpenAiTier::Tier4 => "Tier 4",
            OpenAiTier::Tier5 => "Tier 5",
        }
    }
}
