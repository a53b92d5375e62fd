use std::{path::Path, sync::Arc};

use crate::advisory;
use crate::error::{EngineError, EngineResult};
use crate::model::{clamp_yield, ModelArtifact};
use crate::types::{PredictionResult, RawInput};

/// Request → response transaction over a shared, read-only artifact.
///
/// Without an artifact the service still runs and answers every
/// prediction with [`EngineError::ModelUnavailable`].
#[derive(Clone, Debug)]
pub struct PredictionService {
    artifact: Option<Arc<ModelArtifact>>,
    log_features: bool,
}

impl PredictionService {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self {
            artifact: Some(Arc::new(artifact)),
            log_features: false,
        }
    }

    pub fn unloaded() -> Self {
        Self {
            artifact: None,
            log_features: false,
        }
    }

    /// Load the artifact from `dir`; any failure leaves the service degraded.
    pub fn load(dir: &Path) -> Self {
        if !dir.exists() {
            tracing::warn!(
                "model directory {} not found; run the training job first. Serving in degraded mode",
                dir.display()
            );
            return Self::unloaded();
        }
        match ModelArtifact::load(dir) {
            Ok(artifact) => {
                tracing::info!(
                    model = artifact.model().kind(),
                    "loaded model; feat_list[{}]: {:?}",
                    artifact.manifest().names().len(),
                    artifact.manifest().names()
                );
                Self::new(artifact)
            }
            Err(e) => {
                tracing::warn!("failed to load model from {}: {:#}; serving in degraded mode", dir.display(), e);
                Self::unloaded()
            }
        }
    }

    /// Log a feature-vector summary for every request.
    pub fn with_feature_logging(mut self, enabled: bool) -> Self {
        self.log_features = enabled;
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.artifact.is_some()
    }

    pub fn artifact(&self) -> Option<&ModelArtifact> {
        self.artifact.as_deref()
    }

    pub fn predict(&self, raw: &RawInput) -> EngineResult<PredictionResult> {
        let artifact = self.artifact.as_deref().ok_or(EngineError::ModelUnavailable)?;

        let record = raw.parse()?;
        let features = artifact.build_features(&record)?;

        if self.log_features {
            tracing::info!(
                crop = record.crop.as_str(),
                season = record.season.as_str(),
                "recv {}",
                features.summary(artifact.manifest().names())
            );
        }

        let estimate = clamp_yield(artifact.model().predict(&features)?);
        let advice = advisory::advise(&record, estimate);

        Ok(PredictionResult {
            predicted_yield: round2(estimate),
            confidence: advice.confidence,
            recommendations: advice.recommendations,
            risk_factors: advice.risk_factors,
        })
    }
}

/// Two-decimal rounding on the exact binary value, ties to even.
fn round2(x: f64) -> f64 {
    format!("{x:.2}").parse().unwrap_or(x)
}
