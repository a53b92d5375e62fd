use anyhow::{bail, Context, Result};
use std::path::Path;
use tch::{kind::Kind, CModule, Device, Tensor};

use super::YieldModel;
use crate::error::{EngineError, EngineResult};
use crate::features::FeatureVector;

/// TorchScript regressor exported by the training job as `yield_model.pt`.
pub struct TorchRegressor {
    model: CModule,
    device: Device,
    in_dim: usize,
}

impl TorchRegressor {
    pub fn load(model_path: &Path, in_dim: usize) -> Result<Self> {
        let device = Device::Cpu;

        let model = CModule::load_on_device(model_path, device)
            .with_context(|| format!("failed to load TorchScript {}", model_path.display()))?;

        // Probe output shape with a dummy forward — expect [B=1] or [B=1, 1]
        let dummy = Tensor::zeros([1, in_dim as i64], (Kind::Float, device));
        let t = model.forward_ts(&[dummy])?;
        let sz = t.size();
        if sz.is_empty() || sz[0] != 1 || sz.iter().skip(1).any(|d| *d != 1) {
            bail!("unexpected model output size: {:?}", sz);
        }

        Ok(Self {
            model,
            device,
            in_dim,
        })
    }
}

impl YieldModel for TorchRegressor {
    fn predict(&self, features: &FeatureVector) -> EngineResult<f64> {
        let x = features.as_slice();
        if x.len() != self.in_dim {
            return Err(EngineError::Inference(format!(
                "feature length mismatch: got {}, expected {}",
                x.len(),
                self.in_dim
            )));
        }
        let xs: Vec<f32> = x.iter().map(|v| *v as f32).collect();
        let input = Tensor::from_slice(&xs)
            .reshape([1, self.in_dim as i64])
            .to_device(self.device);

        let out = self
            .model
            .forward_ts(&[input])
            .map_err(|e| EngineError::Inference(e.to_string()))?;
        Ok(out.reshape([-1]).double_value(&[0]))
    }

    fn n_features(&self) -> usize {
        self.in_dim
    }

    fn kind(&self) -> &'static str {
        "torchscript"
    }
}
