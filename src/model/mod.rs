//! Regression models and the artifact bundle that carries them.
//!
//! The engine only relies on [`YieldModel::predict`]; which regressor sits
//! behind it is decided by the files found in the artifact directory.

pub mod artifact;
pub mod forest;
#[cfg(feature = "torch")]
pub mod torch;

use crate::error::EngineResult;
use crate::features::FeatureVector;

pub use artifact::{ArtifactPaths, ModelArtifact};
pub use forest::RandomForest;

/// Lowest yield (t/ha) ever reported to a caller.
pub const MIN_YIELD: f64 = 0.1;

/// A trained regressor mapping a feature vector to a raw yield estimate.
pub trait YieldModel: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> EngineResult<f64>;

    /// Number of inputs the model was trained on.
    fn n_features(&self) -> usize;

    fn kind(&self) -> &'static str;
}

/// Floor a raw estimate at [`MIN_YIELD`]. NaN also maps to the floor.
pub fn clamp_yield(raw: f64) -> f64 {
    raw.max(MIN_YIELD)
}
