#![allow(dead_code)]

use crop_yield::{
    encoder::CategoricalEncoder,
    error::EngineResult,
    features::{FeatureManifest, FeatureVector},
    model::{ModelArtifact, YieldModel},
    types::{CropType, InputRecord, RawInput, Season},
    PredictionService,
};

/// Regressor returning a fixed value regardless of input.
pub struct ConstModel(pub f64);

impl YieldModel for ConstModel {
    fn predict(&self, _features: &FeatureVector) -> EngineResult<f64> {
        Ok(self.0)
    }

    fn n_features(&self) -> usize {
        11
    }

    fn kind(&self) -> &'static str {
        "const"
    }
}

pub fn artifact(model: Box<dyn YieldModel>) -> ModelArtifact {
    ModelArtifact::new(
        model,
        CategoricalEncoder::fit("cropType", CropType::labels()),
        CategoricalEncoder::fit("season", Season::labels()),
        FeatureManifest::standard(),
    )
    .unwrap()
}

pub fn service_returning(y: f64) -> PredictionService {
    PredictionService::new(artifact(Box::new(ConstModel(y))))
}

/// The reference wheat request: every confidence band hit, nothing to fix.
pub fn wheat_input() -> RawInput {
    RawInput {
        crop_type: "wheat".into(),
        area: "10".into(),
        soil_ph: "6.8".into(),
        soil_moisture: "50".into(),
        nitrogen: "100".into(),
        phosphorus: "45".into(),
        potassium: "60".into(),
        temperature: "25".into(),
        rainfall: "900".into(),
        humidity: "65".into(),
        season: "kharif".into(),
    }
}

pub fn optimal_record() -> InputRecord {
    wheat_input().parse().unwrap()
}
