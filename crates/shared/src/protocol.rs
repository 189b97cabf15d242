use serde::{Deserialize, Serialize};

use crate::domain::PredictionKind;

/// JSON body accepted by every numeric prediction endpoint.
///
/// Non-finite entries serialize as `null`, which is what the service receives
/// for a field that could not be converted to a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericPredictRequest {
    pub input_data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreastCancerResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<i64>,
    pub message: String,
    pub probability_malignant: f64,
    pub probability_benign: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartDiseaseResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<i64>,
    pub message: String,
    pub probability_heart_disease: f64,
    pub probability_healthy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabetesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<i64>,
    pub message: String,
    pub probability_diabetic: f64,
    pub probability_non_diabetic: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PneumoniaResponse {
    pub prediction: String,
    pub confidence: f64,
}

/// A decoded success body, tagged by the endpoint that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResponse {
    BreastCancer(BreastCancerResponse),
    HeartDisease(HeartDiseaseResponse),
    Diabetes(DiabetesResponse),
    Pneumonia(PneumoniaResponse),
}

impl PredictionResponse {
    pub fn kind(&self) -> PredictionKind {
        match self {
            PredictionResponse::BreastCancer(_) => PredictionKind::BreastCancer,
            PredictionResponse::HeartDisease(_) => PredictionKind::HeartDisease,
            PredictionResponse::Diabetes(_) => PredictionKind::Diabetes,
            PredictionResponse::Pneumonia(_) => PredictionKind::Pneumonia,
        }
    }

    /// Decodes `body` with the response shape expected from `kind`'s endpoint.
    pub fn decode(kind: PredictionKind, body: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            PredictionKind::BreastCancer => {
                PredictionResponse::BreastCancer(serde_json::from_slice(body)?)
            }
            PredictionKind::HeartDisease => {
                PredictionResponse::HeartDisease(serde_json::from_slice(body)?)
            }
            PredictionKind::Diabetes => PredictionResponse::Diabetes(serde_json::from_slice(body)?),
            PredictionKind::Pneumonia => {
                PredictionResponse::Pneumonia(serde_json::from_slice(body)?)
            }
        })
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
