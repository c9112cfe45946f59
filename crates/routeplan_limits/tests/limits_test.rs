//! Tests for the limit registry and tier tables.

use routeplan_limits::{
    GeminiModel, Metric, OpenAiTier, RateCeiling, SHARED_OPENAI_BUCKET, limits_for,
};
use strum::IntoEnumIterator;

#[test]
fn test_table_contains_four_gemini_models_and_shared_bucket() {
    let table = limits_for(1);
    assert_eq!(table.len(), 5);
    for model in GeminiModel::iter() {
        assert!(table.get(model.id()).is_some(), "missing {}", model);
    }
    assert!(table.get(SHARED_OPENAI_BUCKET).is_some());
}

#[test]
fn test_gemini_ceilings() {
    let table = limits_for(1);

    let pro = table.get("google/gemini-2.5-pro").unwrap();
    assert_eq!((*pro.rpm(), *pro.tpm(), *pro.rpd()), (150, 2_000_000, 1_000));

    let flash = table.get("google/gemini-2.5-flash").unwrap();
    assert_eq!((*flash.rpm(), *flash.tpm(), *flash.rpd()), (1_000, 1_000_000, 10_000));

    let pro3 = table.get("google/gemini-3-pro").unwrap();
    assert_eq!((*pro3.rpm(), *pro3.tpm(), *pro3.rpd()), (25, 1_000_000, 250));

    let flash3 = table.get("google/gemini-3-flash").unwrap();
    assert_eq!((*flash3.rpm(), *flash3.tpm(), *flash3.rpd()), (1_000, 1_000_000, 10_000));
}

#[test]
fn test_shared_bucket_scales_with_tier() {
    let expected = [
        (1, 500, 500_000),
        (2, 5_000, 1_000_000),
        (3, 5_000, 2_000_000),
        (4, 10_000, 4_000_000),
        (5, 15_000, 40_000_000),
    ];
    for (tier, rpm, tpm) in expected {
        let table = limits_for(tier);
        let shared = table.get(SHARED_OPENAI_BUCKET).unwrap();
        assert_eq!(*shared.rpm(), rpm, "tier {tier}");
        assert_eq!(*shared.tpm(), tpm, "tier {tier}");
        assert_eq!(*shared.rpd(), 1_000, "tier {tier}");
    }
}

#[test]
fn test_unknown_tiers_fall_back_to_tier_one() {
    let tier1 = limits_for(1);
    for tier in [0, -1, 6, 42, i64::MIN, i64::MAX] {
        assert_eq!(limits_for(tier), tier1, "tier {tier}");
    }
}

#[test]
fn test_tier_does_not_touch_gemini_limits() {
    let tier1 = limits_for(1);
    let tier5 = limits_for(5);
    for model in GeminiModel::iter() {
        assert_eq!(tier1.get(model.id()), tier5.get(model.id()));
    }
}

#[test]
fn test_all_ceilings_strictly_positive() {
    for tier in 1..=5 {
        for (id, limit) in limits_for(tier).iter() {
            for metric in Metric::iter() {
                assert!(limit.ceiling(metric) > 0, "{id} {metric} is zero");
            }
        }
    }
}

#[test]
fn test_openai_tier_lookup() {
    assert_eq!(OpenAiTier::from_level(3), Some(OpenAiTier::Tier3));
    assert_eq!(OpenAiTier::from_level(0), None);
    assert_eq!(OpenAiTier::resolve(77), OpenAiTier::Tier1);
    assert_eq!(OpenAiTier::Tier4.level(), 4);
    assert_eq!(OpenAiTier::Tier5.name(), "Tier 5");
}

#[test]
fn test_limit_serializes_without_identifier() {
    let table = limits_for(1);
    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(
        json["google/gemini-3-pro"],
        serde_json::json!({"rpm": 25, "tpm": 1_000_000, "rpd": 250})
    );
    assert_eq!(
        json[SHARED_OPENAI_BUCKET],
        serde_json::json!({"rpm": 500, "tpm": 500_000, "rpd": 1_000})
    );
}
