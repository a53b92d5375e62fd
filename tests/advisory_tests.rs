/// Threshold tests for the advisory rules.
///
/// Run with: cargo test --test advisory_tests -- --nocapture
mod common;

use common::optimal_record;
use crop_yield::advisory::{self, FALLBACK_RECOMMENDATION};
use crop_yield::InputRecord;

fn stressed_low() -> InputRecord {
    InputRecord {
        soil_ph: 5.0,
        nitrogen: 30.0,
        phosphorus: 10.0,
        potassium: 20.0,
        rainfall: 300.0,
        temperature: 40.0,
        soil_moisture: 20.0,
        ..optimal_record()
    }
}

#[test]
fn test_optimal_record_is_clean() {
    println!("\n=== Test: Optimal Record ===");
    let r = optimal_record();

    assert_eq!(advisory::confidence(&r), 95);
    assert_eq!(advisory::recommendations(&r), vec![FALLBACK_RECOMMENDATION.to_string()]);
    assert!(advisory::risk_factors(&r).is_empty());

    let a = advisory::advise(&r, 4.2);
    assert_eq!(a.confidence, 95);
    assert_eq!(a.recommendations.len(), 1);
    println!("✓ confidence=95, fallback recommendation, no risks");
}

#[test]
fn test_confidence_ph_bounds_inclusive() {
    let base = optimal_record();
    for ph in [6.5, 7.0] {
        let r = InputRecord { soil_ph: ph, ..base };
        assert_eq!(advisory::confidence(&r), 95, "pH {ph} should count as optimal");
    }
    let r = InputRecord { soil_ph: 6.49, ..base };
    assert_eq!(advisory::confidence(&r), 90);
    let r = InputRecord { soil_ph: 7.01, ..base };
    assert_eq!(advisory::confidence(&r), 90);
}

#[test]
fn test_confidence_other_band_edges() {
    let base = optimal_record();
    let edges = [
        InputRecord { soil_moisture: 45.0, ..base },
        InputRecord { soil_moisture: 55.0, ..base },
        InputRecord { temperature: 20.0, ..base },
        InputRecord { temperature: 30.0, ..base },
        InputRecord { rainfall: 600.0, ..base },
        InputRecord { rainfall: 1200.0, ..base },
        InputRecord { nitrogen: 80.0, ..base },
        InputRecord { nitrogen: 120.0, ..base },
    ];
    for r in &edges {
        assert_eq!(advisory::confidence(r), 95, "{r:?}");
    }
    let outside = [
        InputRecord { soil_moisture: 44.9, ..base },
        InputRecord { temperature: 30.1, ..base },
        InputRecord { rainfall: 599.0, ..base },
        InputRecord { nitrogen: 121.0, ..base },
    ];
    for r in &outside {
        assert_eq!(advisory::confidence(r), 90, "{r:?}");
    }
}

#[test]
fn test_confidence_takes_only_five_point_steps() {
    println!("\n=== Test: Confidence Range ===");
    let good = optimal_record();
    let bad = stressed_low();
    for mask in 0u8..32 {
        let pick = |bit: u8| mask & (1 << bit) != 0;
        let r = InputRecord {
            soil_ph: if pick(0) { good.soil_ph } else { bad.soil_ph },
            soil_moisture: if pick(1) { good.soil_moisture } else { bad.soil_moisture },
            temperature: if pick(2) { good.temperature } else { bad.temperature },
            rainfall: if pick(3) { good.rainfall } else { bad.rainfall },
            nitrogen: if pick(4) { good.nitrogen } else { bad.nitrogen },
            ..good
        };
        let c = advisory::confidence(&r);
        assert_eq!(c, 75 + 5 * mask.count_ones() as u8);
        assert!([75, 80, 85, 90, 95].contains(&c));
    }
    println!("✓ all 32 band combinations land in {{75, 80, 85, 90, 95}}");
}

#[test]
fn test_recommendations_low_side_in_fixed_order() {
    let recs = advisory::recommendations(&stressed_low());
    assert_eq!(
        recs,
        vec![
            "Add lime to increase soil pH to optimal range (6.5-7.0)",
            "Increase nitrogen application to 80-120 kg/ha for better growth",
            "Apply phosphorus fertilizer (40-60 kg/ha recommended)",
            "Add potassium fertilizer (50-80 kg/ha recommended)",
            "Ensure adequate irrigation during dry periods (target: 600-1200mm)",
            "Monitor for heat stress; consider shade or cooling measures",
            "Irrigate immediately to maintain optimal soil moisture (45-55%)",
        ]
    );
    // identical input, identical sequence
    assert_eq!(recs, advisory::recommendations(&stressed_low()));
}

#[test]
fn test_recommendations_high_side() {
    let r = InputRecord {
        soil_ph: 8.5,
        nitrogen: 200.0,
        rainfall: 1600.0,
        temperature: 10.0,
        soil_moisture: 70.0,
        ..optimal_record()
    };
    assert_eq!(
        advisory::recommendations(&r),
        vec![
            "Add sulfur or organic matter to lower soil pH",
            "Reduce nitrogen to avoid over-fertilization",
            "Implement proper drainage to prevent waterlogging",
            "Protect crops from cold stress with appropriate coverings",
            "Improve drainage to prevent waterlogging",
        ]
    );
}

#[test]
fn test_recommendation_thresholds_are_strict() {
    let base = optimal_record();
    let on_the_line = [
        InputRecord { soil_ph: 6.0, ..base },
        InputRecord { soil_ph: 8.0, ..base },
        InputRecord { nitrogen: 80.0, ..base },
        InputRecord { nitrogen: 150.0, ..base },
        InputRecord { phosphorus: 40.0, ..base },
        InputRecord { potassium: 50.0, ..base },
        InputRecord { rainfall: 600.0, ..base },
        InputRecord { rainfall: 1500.0, ..base },
        InputRecord { temperature: 18.0, ..base },
        InputRecord { temperature: 32.0, ..base },
        InputRecord { soil_moisture: 40.0, ..base },
        InputRecord { soil_moisture: 65.0, ..base },
    ];
    for r in &on_the_line {
        assert_eq!(
            advisory::recommendations(r),
            vec![FALLBACK_RECOMMENDATION.to_string()],
            "{r:?}"
        );
    }

    let r = InputRecord { soil_ph: 5.99, ..base };
    assert_eq!(advisory::recommendations(&r).len(), 1);
    assert!(advisory::recommendations(&r)[0].starts_with("Add lime"));
    let r = InputRecord { phosphorus: 39.9, ..base };
    assert!(advisory::recommendations(&r)[0].starts_with("Apply phosphorus"));
}

#[test]
fn test_risk_factors_extreme_record() {
    println!("\n=== Test: Risk Factors ===");
    let r = InputRecord {
        soil_ph: 4.0,
        rainfall: 2000.0,
        temperature: 40.0,
        soil_moisture: 75.0,
        nitrogen: 40.0,
        ..optimal_record()
    };
    let risks = advisory::risk_factors(&r);
    assert_eq!(
        risks,
        vec![
            "Suboptimal soil pH may significantly affect nutrient availability and crop health",
            "Excessive rainfall may cause waterlogging and root diseases",
            "Extreme temperatures may cause significant crop stress",
            "High soil moisture may lead to root rot and reduced oxygen availability",
            "Insufficient nitrogen may severely limit crop growth and yield",
        ]
    );
    println!("✓ {} risks in fixed order", risks.len());

    let dry = InputRecord {
        rainfall: 399.0,
        soil_moisture: 29.0,
        ..optimal_record()
    };
    assert_eq!(
        advisory::risk_factors(&dry),
        vec![
            "Severe drought conditions may require intensive irrigation",
            "Critical soil moisture level - immediate irrigation required",
        ]
    );
}

#[test]
fn test_risk_thresholds_are_more_extreme_than_recommendations() {
    let base = optimal_record();
    // each of these triggers a recommendation but no risk
    let tiered = [
        InputRecord { soil_ph: 5.5, ..base },
        InputRecord { rainfall: 1800.0, ..base },
        InputRecord { rainfall: 400.0, ..base },
        InputRecord { temperature: 15.0, ..base },
        InputRecord { temperature: 35.0, ..base },
        InputRecord { soil_moisture: 30.0, ..base },
        InputRecord { soil_moisture: 70.0, ..base },
        InputRecord { nitrogen: 50.0, ..base },
    ];
    for r in &tiered {
        assert!(advisory::risk_factors(r).is_empty(), "{r:?}");
        assert_ne!(
            advisory::recommendations(r),
            vec![FALLBACK_RECOMMENDATION.to_string()],
            "{r:?}"
        );
    }

    // pH 8.0 is the one shared edge: neither fires; just above, both do
    let r = InputRecord { soil_ph: 8.0, ..base };
    assert!(advisory::risk_factors(&r).is_empty());
    let r = InputRecord { soil_ph: 8.01, ..base };
    assert_eq!(advisory::risk_factors(&r).len(), 1);
    assert!(advisory::recommendations(&r)[0].starts_with("Add sulfur"));
}
