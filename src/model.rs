//! Model loading and inference.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tch::{kind::Kind, CModule, Device, Tensor};

use crate::features::{FeatureVector, FEATURE_DIM};

/// A single-output regressor over one feature row.
///
/// Trait seam so tests can substitute recording stubs for the TorchScript
/// artifacts; implementations must be safe for concurrent read-only calls.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64>;
}

/// TorchScript-backed regressor, loaded once and held for the process
/// lifetime.
pub struct TorchRegressor {
    module: CModule,
    device: Device,
}

impl TorchRegressor {
    /// Load an artifact and probe it with a zeroed forward pass so a
    /// missing or corrupt file fails startup instead of the first request.
    pub fn load(path: &Path) -> Result<Self> {
        let device = Device::Cpu;
        let module = CModule::load_on_device(path, device)
            .with_context(|| format!("failed to load TorchScript model {}", path.display()))?;

        let model = Self { module, device };
        model
            .forward(&[0.0; FEATURE_DIM])
            .with_context(|| format!("warmup forward failed for {}", path.display()))?;
        Ok(model)
    }

    fn forward(&self, features: &FeatureVector) -> Result<f64> {
        let input: Vec<f32> = features.iter().map(|&x| x as f32).collect();
        let input = Tensor::from_slice(&input)
            .reshape([1, FEATURE_DIM as i64])
            .to_device(self.device);

        let out = self.module.forward_ts(&[input])?;
        // Expect one scalar per row however the artifact shapes it
        if out.numel() != 1 {
            bail!("unexpected model output size: {:?}", out.size());
        }
        Ok(out.reshape([-1]).to_kind(Kind::Double).double_value(&[0]))
    }
}

impl Regressor for TorchRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        self.forward(features)
    }
}

/// The three regressors, one per corrected target.
pub struct ModelSet {
    pub co: Box<dyn Regressor>,
    pub pm25: Box<dyn Regressor>,
    pub pm10: Box<dyn Regressor>,
}

pub const CO_MODEL_FILE: &str = "rf_co.pt";
pub const PM25_MODEL_FILE: &str = "rf_pm25.pt";
pub const PM10_MODEL_FILE: &str = "rf_pm10.pt";

impl ModelSet {
    /// Load all three artifacts from `dir`, failing fast on the first
    /// problem.
    pub fn load(dir: &Path) -> Result<Self> {
        let load = |file: &str| -> Result<Box<dyn Regressor>> {
            let path = dir.join(file);
            tracing::info!("loading model {}", path.display());
            Ok(Box::new(TorchRegressor::load(&path)?))
        };
        Ok(Self {
            co: load(CO_MODEL_FILE)?,
            pm25: load(PM25_MODEL_FILE)?,
            pm10: load(PM10_MODEL_FILE)?,
        })
    }
}
