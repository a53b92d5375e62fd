//! Rule engine turning a parsed record into confidence, recommendations and
//! risk warnings.
//!
//! Every rule reads the raw agronomic values, never the encoded feature
//! vector. Thresholds are literal and deliberately tiered: a risk fires on a
//! more extreme value than the matching recommendation.

use crate::types::InputRecord;

pub const BASE_CONFIDENCE: u8 = 75;
pub const MAX_CONFIDENCE: u8 = 95;
const CONFIDENCE_STEP: u8 = 5;

pub const FALLBACK_RECOMMENDATION: &str = "Maintain current practices for optimal yield";

/// Output of the three rule sets for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub confidence: u8,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
}

/// Run all rule sets. The yield estimate is accepted for callers that want a
/// single entry point; none of the current rules depend on it.
pub fn advise(record: &InputRecord, _predicted_yield: f64) -> Advisory {
    Advisory {
        confidence: confidence(record),
        recommendations: recommendations(record),
        risk_factors: risk_factors(record),
    }
}

fn within(x: f64, lo: f64, hi: f64) -> bool {
    lo <= x && x <= hi
}

/// 75 plus 5 for every variable inside its optimal band, capped at 95.
pub fn confidence(r: &InputRecord) -> u8 {
    let bands = [
        within(r.soil_ph, 6.5, 7.0),
        within(r.soil_moisture, 45.0, 55.0),
        within(r.temperature, 20.0, 30.0),
        within(r.rainfall, 600.0, 1200.0),
        within(r.nitrogen, 80.0, 120.0),
    ];
    let hits = bands.iter().filter(|b| **b).count() as u8;
    (BASE_CONFIDENCE + hits * CONFIDENCE_STEP).min(MAX_CONFIDENCE)
}

/// Checked in order pH, nitrogen, phosphorus, potassium, rainfall,
/// temperature, moisture; each contributes at most one message.
pub fn recommendations(r: &InputRecord) -> Vec<String> {
    let mut out: Vec<&str> = Vec::new();

    if r.soil_ph < 6.0 {
        out.push("Add lime to increase soil pH to optimal range (6.5-7.0)");
    } else if r.soil_ph > 8.0 {
        out.push("Add sulfur or organic matter to lower soil pH");
    }

    if r.nitrogen < 80.0 {
        out.push("Increase nitrogen application to 80-120 kg/ha for better growth");
    } else if r.nitrogen > 150.0 {
        out.push("Reduce nitrogen to avoid over-fertilization");
    }

    if r.phosphorus < 40.0 {
        out.push("Apply phosphorus fertilizer (40-60 kg/ha recommended)");
    }

    if r.potassium < 50.0 {
        out.push("Add potassium fertilizer (50-80 kg/ha recommended)");
    }

    if r.rainfall < 600.0 {
        out.push("Ensure adequate irrigation during dry periods (target: 600-1200mm)");
    } else if r.rainfall > 1500.0 {
        out.push("Implement proper drainage to prevent waterlogging");
    }

    // high is checked before low
    if r.temperature > 32.0 {
        out.push("Monitor for heat stress; consider shade or cooling measures");
    } else if r.temperature < 18.0 {
        out.push("Protect crops from cold stress with appropriate coverings");
    }

    if r.soil_moisture < 40.0 {
        out.push("Irrigate immediately to maintain optimal soil moisture (45-55%)");
    } else if r.soil_moisture > 65.0 {
        out.push("Improve drainage to prevent waterlogging");
    }

    if out.is_empty() {
        out.push(FALLBACK_RECOMMENDATION);
    }
    out.into_iter().map(String::from).collect()
}

/// Empty when nothing is at risk; there is no fallback message.
pub fn risk_factors(r: &InputRecord) -> Vec<String> {
    let mut out: Vec<&str> = Vec::new();

    if r.soil_ph < 5.5 || r.soil_ph > 8.0 {
        out.push("Suboptimal soil pH may significantly affect nutrient availability and crop health");
    }

    if r.rainfall > 1800.0 {
        out.push("Excessive rainfall may cause waterlogging and root diseases");
    } else if r.rainfall < 400.0 {
        out.push("Severe drought conditions may require intensive irrigation");
    }

    if r.temperature < 15.0 || r.temperature > 35.0 {
        out.push("Extreme temperatures may cause significant crop stress");
    }

    if r.soil_moisture < 30.0 {
        out.push("Critical soil moisture level - immediate irrigation required");
    } else if r.soil_moisture > 70.0 {
        out.push("High soil moisture may lead to root rot and reduced oxygen availability");
    }

    if r.nitrogen < 50.0 {
        out.push("Insufficient nitrogen may severely limit crop growth and yield");
    }

    out.into_iter().map(String::from).collect()
}
