use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Label → integer code mapping with the same assignment used at training
/// time: distinct labels in lexicographic order, code = position.
#[derive(Debug, Clone)]
pub struct CategoricalEncoder {
    field: String,
    classes: Vec<String>,
    codes: HashMap<String, u32>,
}

/// On-disk form of an encoder (`crop_encoder.json`, `season_encoder.json`).
#[derive(Debug, Serialize, Deserialize)]
pub struct EncoderJson {
    pub classes: Vec<String>,
}

impl CategoricalEncoder {
    /// Build from raw training labels (duplicates allowed, any order).
    pub fn fit<I, S>(field: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self::with_sorted(field, classes)
    }

    /// Build from a persisted class list. The list must already be the
    /// sorted, duplicate-free vocabulary or codes would not match training.
    pub fn from_classes(field: &str, classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            bail!("{field} encoder has no classes");
        }
        if classes.windows(2).any(|w| w[0] >= w[1]) {
            bail!("{field} encoder classes must be sorted and unique: {classes:?}");
        }
        Ok(Self::with_sorted(field, classes))
    }

    fn with_sorted(field: &str, classes: Vec<String>) -> Self {
        let codes = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i as u32))
            .collect();
        Self {
            field: field.to_string(),
            classes,
            codes,
        }
    }

    pub fn encode(&self, label: &str) -> EngineResult<u32> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| EngineError::UnknownCategory {
                field: self.field.clone(),
                label: label.to_string(),
            })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Fails unless the encoder covers exactly `vocabulary` (order ignored).
    pub fn ensure_vocabulary(&self, vocabulary: &[&str]) -> Result<()> {
        let mut expected: Vec<&str> = vocabulary.to_vec();
        expected.sort_unstable();
        let found: Vec<&str> = self.classes.iter().map(String::as_str).collect();
        if found != expected {
            bail!(
                "{} encoder vocabulary {:?} does not match expected {:?}",
                self.field,
                found,
                expected
            );
        }
        Ok(())
    }

    pub fn to_json(&self) -> EncoderJson {
        EncoderJson {
            classes: self.classes.clone(),
        }
    }
}
