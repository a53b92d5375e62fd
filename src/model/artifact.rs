use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};

use super::{RandomForest, YieldModel};
use crate::encoder::{CategoricalEncoder, EncoderJson};
use crate::error::EngineResult;
use crate::features::{self, FeatureManifest, FeatureVector};
use crate::types::{CropType, InputRecord, Season};

/// File locations inside an artifact directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub forest: PathBuf,
    pub torchscript: PathBuf,
    pub crop_encoder: PathBuf,
    pub season_encoder: PathBuf,
    pub manifest: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            forest: dir.join("yield_model.json"),
            torchscript: dir.join("yield_model.pt"),
            crop_encoder: dir.join("crop_encoder.json"),
            season_encoder: dir.join("season_encoder.json"),
            manifest: dir.join("feature_columns.json"),
        }
    }
}

/// Everything the training job hands over: regressor, both encoders and the
/// feature order. Immutable once built.
pub struct ModelArtifact {
    model: Box<dyn YieldModel>,
    crop_encoder: CategoricalEncoder,
    season_encoder: CategoricalEncoder,
    manifest: FeatureManifest,
}

impl std::fmt::Debug for ModelArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifact")
            .field("model", &self.model.kind())
            .field("crop_encoder", &self.crop_encoder.classes())
            .field("season_encoder", &self.season_encoder.classes())
            .field("manifest", &self.manifest.names())
            .finish()
    }
}

impl ModelArtifact {
    /// Assemble an artifact, rejecting parts that disagree with each other
    /// or with the closed vocabularies.
    pub fn new(
        model: Box<dyn YieldModel>,
        crop_encoder: CategoricalEncoder,
        season_encoder: CategoricalEncoder,
        manifest: FeatureManifest,
    ) -> Result<Self> {
        crop_encoder.ensure_vocabulary(&CropType::labels())?;
        season_encoder.ensure_vocabulary(&Season::labels())?;
        if model.n_features() != manifest.names().len() {
            bail!(
                "model expects {} features but manifest lists {}",
                model.n_features(),
                manifest.names().len()
            );
        }
        Ok(Self {
            model,
            crop_encoder,
            season_encoder,
            manifest,
        })
    }

    pub fn load(dir: &Path) -> Result<Self> {
        let paths = ArtifactPaths::in_dir(dir);

        let manifest_txt = fs::read_to_string(&paths.manifest)
            .with_context(|| format!("failed to read manifest at {}", paths.manifest.display()))?;
        let manifest = FeatureManifest::from_json(&manifest_txt)
            .with_context(|| format!("invalid feature manifest {}", paths.manifest.display()))?;

        let crop_encoder = load_encoder("cropType", &paths.crop_encoder)?;
        let season_encoder = load_encoder("season", &paths.season_encoder)?;
        let model = load_model(&paths, manifest.names().len())?;

        let artifact = Self::new(model, crop_encoder, season_encoder, manifest)?;
        artifact.warmup()?;
        Ok(artifact)
    }

    /// Run one forward pass on a zero vector so a broken model fails at
    /// startup rather than on the first request.
    pub fn warmup(&self) -> Result<()> {
        let zeros = FeatureVector::from_values(vec![0.0; self.manifest.names().len()]);
        let y = self.model.predict(&zeros).context("warmup forward failed")?;
        if !y.is_finite() {
            bail!("warmup forward produced non-finite output {y}");
        }
        tracing::info!("warmup forward ok");
        Ok(())
    }

    /// Encode the categories and lay the record out in manifest order.
    pub fn build_features(&self, record: &InputRecord) -> EngineResult<FeatureVector> {
        let crop_code = self.crop_encoder.encode(record.crop.as_str())?;
        let season_code = self.season_encoder.encode(record.season.as_str())?;
        features::build(record, crop_code, season_code, self.manifest.names())
    }

    pub fn model(&self) -> &dyn YieldModel {
        self.model.as_ref()
    }

    pub fn crop_encoder(&self) -> &CategoricalEncoder {
        &self.crop_encoder
    }

    pub fn season_encoder(&self) -> &CategoricalEncoder {
        &self.season_encoder
    }

    pub fn manifest(&self) -> &FeatureManifest {
        &self.manifest
    }

    /// Write encoders and manifest next to a forest, in the layout `load` reads.
    pub fn write_forest_artifact(
        dir: &Path,
        forest: &RandomForest,
        manifest: &FeatureManifest,
    ) -> Result<()> {
        let paths = ArtifactPaths::in_dir(dir);
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
        let crop = CategoricalEncoder::fit("cropType", CropType::labels());
        let season = CategoricalEncoder::fit("season", Season::labels());
        write_json(&paths.forest, forest)?;
        write_json(&paths.crop_encoder, &crop.to_json())?;
        write_json(&paths.season_encoder, &season.to_json())?;
        write_json(&paths.manifest, &manifest.to_json())?;
        Ok(())
    }
}

fn load_encoder(field: &str, path: &Path) -> Result<CategoricalEncoder> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("failed to read encoder at {}", path.display()))?;
    let raw: EncoderJson = serde_json::from_str(&txt)
        .with_context(|| format!("failed to parse encoder {}", path.display()))?;
    CategoricalEncoder::from_classes(field, raw.classes)
}

#[cfg(feature = "torch")]
fn load_model(paths: &ArtifactPaths, in_dim: usize) -> Result<Box<dyn YieldModel>> {
    if paths.torchscript.exists() {
        let m = super::torch::TorchRegressor::load(&paths.torchscript, in_dim)?;
        return Ok(Box::new(m));
    }
    load_forest(paths)
}

#[cfg(not(feature = "torch"))]
fn load_model(paths: &ArtifactPaths, _in_dim: usize) -> Result<Box<dyn YieldModel>> {
    if paths.torchscript.exists() && !paths.forest.exists() {
        bail!(
            "{} is a TorchScript model; rebuild with the `torch` feature",
            paths.torchscript.display()
        );
    }
    load_forest(paths)
}

fn load_forest(paths: &ArtifactPaths) -> Result<Box<dyn YieldModel>> {
    Ok(Box::new(RandomForest::load(&paths.forest)?))
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let txt = serde_json::to_string_pretty(value)?;
    fs::write(path, txt).with_context(|| format!("failed to write {}", path.display()))
}
