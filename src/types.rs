use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};

// ---------- Closed vocabularies ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Wheat,
    Rice,
    Corn,
    Sugarcane,
    Cotton,
    Soybean,
}

impl CropType {
    pub const ALL: [CropType; 6] = [
        CropType::Wheat,
        CropType::Rice,
        CropType::Corn,
        CropType::Sugarcane,
        CropType::Cotton,
        CropType::Soybean,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CropType::Wheat => "wheat",
            CropType::Rice => "rice",
            CropType::Corn => "corn",
            CropType::Sugarcane => "sugarcane",
            CropType::Cotton => "cotton",
            CropType::Soybean => "soybean",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Zaid];

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Kharif => "kharif",
            Season::Rabi => "rabi",
            Season::Zaid => "zaid",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

// ---------- Wire record ----------

/// Request record as it arrives from the front end: every field is text.
/// JSON numbers are accepted and kept in their textual form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    #[serde(deserialize_with = "de_text")]
    pub crop_type: String,
    #[serde(deserialize_with = "de_text")]
    pub area: String,
    #[serde(deserialize_with = "de_text")]
    pub soil_ph: String,
    #[serde(deserialize_with = "de_text")]
    pub soil_moisture: String,
    #[serde(deserialize_with = "de_text")]
    pub nitrogen: String,
    #[serde(deserialize_with = "de_text")]
    pub phosphorus: String,
    #[serde(deserialize_with = "de_text")]
    pub potassium: String,
    #[serde(deserialize_with = "de_text")]
    pub temperature: String,
    #[serde(deserialize_with = "de_text")]
    pub rainfall: String,
    #[serde(deserialize_with = "de_text")]
    pub humidity: String,
    #[serde(deserialize_with = "de_text")]
    pub season: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => n.to_string(),
    })
}

impl RawInput {
    /// Validate the categorical fields, then parse every numeric field.
    /// Categories are checked first so a bad label never reaches numeric work.
    pub fn parse(&self) -> EngineResult<InputRecord> {
        let crop = CropType::from_label(&self.crop_type).ok_or_else(|| {
            EngineError::InvalidCategory {
                field: "cropType",
                allowed: CropType::labels(),
            }
        })?;
        let season = Season::from_label(&self.season).ok_or_else(|| {
            EngineError::InvalidCategory {
                field: "season",
                allowed: Season::labels(),
            }
        })?;

        Ok(InputRecord {
            crop,
            area: parse_number("area", &self.area)?,
            soil_ph: parse_number("soilPh", &self.soil_ph)?,
            soil_moisture: parse_number("soilMoisture", &self.soil_moisture)?,
            nitrogen: parse_number("nitrogen", &self.nitrogen)?,
            phosphorus: parse_number("phosphorus", &self.phosphorus)?,
            potassium: parse_number("potassium", &self.potassium)?,
            temperature: parse_number("temperature", &self.temperature)?,
            rainfall: parse_number("rainfall", &self.rainfall)?,
            humidity: parse_number("humidity", &self.humidity)?,
            season,
        })
    }
}

fn parse_number(field: &'static str, text: &str) -> EngineResult<f64> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(EngineError::InvalidNumber { field }),
    }
}

// ---------- Parsed record ----------

/// Validated input in agronomic units. Ranges are not enforced here;
/// out-of-range values only show up as advisories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRecord {
    pub crop: CropType,
    /// hectares
    pub area: f64,
    pub soil_ph: f64,
    /// percent
    pub soil_moisture: f64,
    /// kg/ha
    pub nitrogen: f64,
    /// kg/ha
    pub phosphorus: f64,
    /// kg/ha
    pub potassium: f64,
    /// °C
    pub temperature: f64,
    /// mm
    pub rainfall: f64,
    /// percent
    pub humidity: f64,
    pub season: Season,
}

// ---------- Response ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// tons/hectare, never below 0.1
    pub predicted_yield: f64,
    pub confidence: u8,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
}
