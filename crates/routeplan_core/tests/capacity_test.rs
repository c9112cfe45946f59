//! Tests for near-capacity evaluation.

use proptest::prelude::*;
use routeplan_core::{NearCapFlags, UsageMap, UsageWindow, is_near_capacity};
use routeplan_limits::{GeminiModel, LimitTable, ProviderLimit, RateCeiling, limits_for};
use serde_json::{Value, json};
use strum::IntoEnumIterator;

fn usage_with(model: &str, window: Value) -> UsageMap {
    let mut usage = UsageMap::new();
    match window {
        Value::Object(fields) => usage.insert(model, UsageWindow::new(fields)),
        other => panic!("window must be an object, got {other}"),
    }
    usage
}

struct Fixed {
    rpm: u64,
    tpm: u64,
    rpd: u64,
}

impl RateCeiling for Fixed {
    fn rpm(&self) -> u64 {
        self.rpm
    }
    fn tpm(&self) -> u64 {
        self.tpm
    }
    fn rpd(&self) -> u64 {
        self.rpd
    }
    fn name(&self) -> &str {
        "Fixed"
    }
}

fn table_with(model: &str, rpm: u64, tpm: u64, rpd: u64) -> LimitTable {
    std::iter::once(ProviderLimit::from_ceiling(model, &Fixed { rpm, tpm, rpd })).collect()
}

#[test]
fn test_exact_threshold_is_near_capacity() {
    let limits = limits_for(1);
    // 2.5 Pro: rpm 150, tpm 2M, rpd 1000
    let usage = usage_with("google/gemini-2.5-pro", json!({"rpm": 135}));
    assert!(is_near_capacity("google/gemini-2.5-pro", &usage, &limits));

    let usage = usage_with("google/gemini-2.5-pro", json!({"rpd": 900}));
    assert!(is_near_capacity("google/gemini-2.5-pro", &usage, &limits));
}

#[test]
fn test_just_below_threshold_is_not_near_capacity() {
    let limits = limits_for(1);
    let usage = usage_with("google/gemini-2.5-pro", json!({"rpd": 899.999}));
    assert!(!is_near_capacity("google/gemini-2.5-pro", &usage, &limits));

    let usage = usage_with("google/gemini-2.5-pro", json!({"tpm": 1_799_999}));
    assert!(!is_near_capacity("google/gemini-2.5-pro", &usage, &limits));
}

#[test]
fn test_any_single_metric_is_enough() {
    let limits = limits_for(1);
    let usage = usage_with(
        "google/gemini-3-pro",
        json!({"rpm": 1, "tpm": 10, "rpd": 240}),
    );
    assert!(is_near_capacity("google/gemini-3-pro", &usage, &limits));
}

#[test]
fn test_alias_fields_are_consulted() {
    let limits = limits_for(1);
    let cases = [
        json!({"requestsPerMinute": 1_000}),
        json!({"requestRate": {"rpm": 950}}),
        json!({"tokensPerMinute": 900_000}),
        json!({"tokenRate": {"tpm": "950000"}}),
        json!({"requestsPerDay": 9_000}),
        json!({"requestRate": {"rpd": 9_500}}),
    ];
    for window in cases {
        let usage = usage_with("google/gemini-2.5-flash", window.clone());
        assert!(
            is_near_capacity("google/gemini-2.5-flash", &usage, &limits),
            "{window} should be near capacity"
        );
    }
}

#[test]
fn test_direct_field_wins_over_alias() {
    let limits = limits_for(1);
    let usage = usage_with(
        "google/gemini-2.5-pro",
        json!({"rpm": 10, "requestsPerMinute": 150, "requestRate": {"rpm": 150}}),
    );
    assert!(!is_near_capacity("google/gemini-2.5-pro", &usage, &limits));
}

#[test]
fn test_non_numeric_usage_is_not_saturating() {
    let limits = limits_for(1);
    for value in [json!("busy"), json!([150]), json!({"n": 150}), json!(null)] {
        let usage = usage_with("google/gemini-2.5-pro", json!({ "rpm": value }));
        assert!(!is_near_capacity("google/gemini-2.5-pro", &usage, &limits));
    }
}

#[test]
fn test_numeric_strings_are_coerced() {
    let limits = limits_for(1);
    let usage = usage_with("google/gemini-2.5-pro", json!({"rpm": " 149 "}));
    assert!(is_near_capacity("google/gemini-2.5-pro", &usage, &limits));
}

#[test]
fn test_missing_window_is_not_near_capacity() {
    let limits = limits_for(1);
    let usage = UsageMap::new();
    for model in GeminiModel::iter() {
        assert!(!is_near_capacity(model.id(), &usage, &limits));
    }
}

#[test]
fn test_flags_follow_each_model() {
    let limits = limits_for(1);
    let mut usage = usage_with("google/gemini-2.5-flash", json!({"rpd": 10_000}));
    usage.insert(
        "google/gemini-3-flash",
        UsageWindow::new(json!({"tpm": 999_999}).as_object().unwrap().clone()),
    );

    let flags = NearCapFlags::evaluate(&usage, &limits);
    assert_eq!(flags, NearCapFlags::new(false, true, false, true));
    assert!(flags.get(GeminiModel::Flash25));
    assert!(!flags.get(GeminiModel::Pro3));
}

proptest! {
    #[test]
    fn prop_unregistered_models_are_never_near_capacity(
        suffix in "[a-z0-9-]{1,16}",
        value in prop_oneof![
            any::<f64>().prop_map(|v| json!(v)),
            any::<i64>().prop_map(|v| json!(v)),
            ".*".prop_map(|v| json!(v)),
        ],
    ) {
        let model = format!("unregistered/{suffix}");
        let usage = usage_with(&model, json!({"rpm": value.clone(), "tpm": value.clone(), "rpd": value}));
        prop_assert!(!is_near_capacity(&model, &usage, &limits_for(1)));
    }

    #[test]
    fn prop_tracked_models_without_usage_are_never_near_capacity(
        rpm in 1u64..u64::MAX,
        tpm in 1u64..u64::MAX,
        rpd in 1u64..u64::MAX,
    ) {
        let usage = UsageMap::new();
        for model in GeminiModel::iter() {
            let limits = table_with(model.id(), rpm, tpm, rpd);
            prop_assert!(!is_near_capacity(model.id(), &usage, &limits));
        }
    }

    #[test]
    fn prop_threshold_is_inclusive(limit in 1u64..1_000_000_000) {
        let limits = table_with("google/gemini-2.5-pro", limit, limit, limit);
        let at = limit as f64 * 0.9;
        let usage = usage_with("google/gemini-2.5-pro", json!({"rpm": at}));
        let expected = at / limit as f64 >= 0.90;
        prop_assert_eq!(is_near_capacity("google/gemini-2.5-pro", &usage, &limits), expected);

        let below = usage_with("google/gemini-2.5-pro", json!({"rpm": limit as f64 * 0.89}));
        prop_assert!(!is_near_capacity("google/gemini-2.5-pro", &below, &limits));
    }
}
