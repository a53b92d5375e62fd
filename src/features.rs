use std::collections::HashSet;

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::types::InputRecord;

/// Training column names, in the order the training job writes them.
pub const FEATURE_SCHEMA: [&str; 11] = [
    "crop_type_encoded",
    "area",
    "soil_ph",
    "soil_moisture",
    "nitrogen",
    "phosphorus",
    "potassium",
    "temperature",
    "rainfall",
    "humidity",
    "season_encoded",
];

pub const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn from_values(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One-line description used by the `LOG_PRED` request log.
    pub fn summary(&self, names: &[String]) -> String {
        let v = &self.0;
        let nz = v.iter().filter(|x| **x != 0.0).count();
        let mean = if v.is_empty() { 0.0 } else { v.iter().sum::<f64>() / v.len() as f64 };
        let std = if v.len() < 2 {
            0.0
        } else {
            (v.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / v.len() as f64).sqrt()
        };
        let sample: Vec<String> = names
            .iter()
            .zip(v)
            .take(6)
            .map(|(name, x)| format!("{}={:.3}", name, x))
            .collect();
        format!(
            "in_dim={} nonzero={} mean={:.3} std={:.3} sample=[{}]",
            v.len(),
            nz,
            mean,
            std,
            sample.join(", ")
        )
    }
}

/// Ordered feature names persisted by the training job.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureManifest {
    version: u32,
    names: Vec<String>,
}

// Older artifacts carry a bare list; newer ones are versioned.
#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestJson {
    Versioned { version: u32, features: Vec<String> },
    Bare(Vec<String>),
}

impl FeatureManifest {
    /// Validates that `names` is exactly the known schema, in any order.
    pub fn new(version: u32, names: Vec<String>) -> Result<Self> {
        if version != MANIFEST_VERSION {
            bail!("unsupported feature manifest version {version} (expected {MANIFEST_VERSION})");
        }
        if names.len() != FEATURE_SCHEMA.len() {
            bail!(
                "feature manifest lists {} features, expected {}: {:?}",
                names.len(),
                FEATURE_SCHEMA.len(),
                names
            );
        }
        let mut seen = HashSet::new();
        for name in &names {
            if !FEATURE_SCHEMA.contains(&name.as_str()) {
                bail!("feature manifest names unknown feature {name:?}");
            }
            if !seen.insert(name.as_str()) {
                bail!("feature manifest lists {name:?} twice");
            }
        }
        Ok(Self { version, names })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        match serde_json::from_str::<ManifestJson>(text)? {
            ManifestJson::Versioned { version, features } => Self::new(version, features),
            ManifestJson::Bare(features) => Self::new(MANIFEST_VERSION, features),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "version": self.version, "features": self.names })
    }

    /// The manifest the training job writes today.
    pub fn standard() -> Self {
        Self {
            version: MANIFEST_VERSION,
            names: FEATURE_SCHEMA.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

/// Lay out `record` in `feature_order`, substituting the categorical codes.
pub fn build(
    record: &InputRecord,
    crop_code: u32,
    season_code: u32,
    feature_order: &[String],
) -> EngineResult<FeatureVector> {
    let mut v = Vec::with_capacity(feature_order.len());
    for name in feature_order {
        let x = match name.as_str() {
            "crop_type_encoded" => f64::from(crop_code),
            "area" => record.area,
            "soil_ph" => record.soil_ph,
            "soil_moisture" => record.soil_moisture,
            "nitrogen" => record.nitrogen,
            "phosphorus" => record.phosphorus,
            "potassium" => record.potassium,
            "temperature" => record.temperature,
            "rainfall" => record.rainfall,
            "humidity" => record.humidity,
            "season_encoded" => f64::from(season_code),
            other => {
                return Err(EngineError::MissingFeature {
                    name: other.to_string(),
                })
            }
        };
        v.push(x);
    }
    Ok(FeatureVector(v))
}
