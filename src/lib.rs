//! Crop yield prediction with fertilization, irrigation and risk advisories.
//!
//! The engine loads a trained regressor, two categorical encoders and the
//! feature-order manifest once at startup, then answers each request by
//! parsing the text record, building the feature vector, running inference
//! and evaluating the advisory rules.

pub mod advisory;
pub mod config;
pub mod encoder;
pub mod error;
pub mod features;
pub mod http;
pub mod model;
pub mod service;
pub mod types;
pub mod weather;

pub use error::{EngineError, EngineResult};
pub use service::PredictionService;
pub use types::{CropType, InputRecord, PredictionResult, RawInput, Season};
