use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(ScreenInstanceId);

/// The prediction domains served by the remote model service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionKind {
    BreastCancer,
    HeartDisease,
    Diabetes,
    Pneumonia,
}

impl PredictionKind {
    pub const ALL: [PredictionKind; 4] = [
        PredictionKind::BreastCancer,
        PredictionKind::HeartDisease,
        PredictionKind::Diabetes,
        PredictionKind::Pneumonia,
    ];

    /// Route of the prediction endpoint, relative to the service base URL.
    pub fn path(self) -> &'static str {
        match self {
            PredictionKind::BreastCancer => "/breast_cancer_predict",
            PredictionKind::HeartDisease => "/heart_disease_predict",
            PredictionKind::Diabetes => "/diabetes_predict",
            PredictionKind::Pneumonia => "/pneumonia_predict",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PredictionKind::BreastCancer => "breast_cancer",
            PredictionKind::HeartDisease => "heart_disease",
            PredictionKind::Diabetes => "diabetes",
            PredictionKind::Pneumonia => "pneumonia",
        }
    }

    pub fn takes_image(self) -> bool {
        matches!(self, PredictionKind::Pneumonia)
    }
}

impl fmt::Display for PredictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Error,
    Success,
}
