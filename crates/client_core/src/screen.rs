//! Static description of every prediction screen.
//!
//! A screen supplies only its inputs, endpoint kind and copy; validation,
//! submission and result mapping are shared by [`crate::FormController`].

use shared::{
    domain::PredictionKind,
    theme::{Rgb, THEME},
};

pub const INCOMPLETE_FORM_TITLE: &str = "Incomplete Form";
pub const DISCLAIMER: &str =
    "This is an AI-generated analysis and not a medical diagnosis. Always consult a healthcare professional.";

const NUMERIC_FAILURE_TITLE: &str = "Prediction Failed";
const NUMERIC_FALLBACK_MESSAGE: &str = "An unexpected error occurred. Please try again.";
const DEFAULT_PLACEHOLDER: &str = "Enter value...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenInputKind {
    Numeric {
        labels: &'static [&'static str],
        /// Sample value per field, shown as "e.g., ..." in empty inputs.
        examples: Option<&'static [&'static str]>,
    },
    Image,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ScreenSpec {
    pub kind: PredictionKind,
    /// Home card title and description.
    pub title: &'static str,
    pub description: &'static str,
    pub header_title: &'static str,
    pub subtitle: &'static str,
    pub submit_label: &'static str,
    pub result_title: &'static str,
    pub input: ScreenInputKind,
    pub incomplete_message: &'static str,
    pub failure_title: &'static str,
    pub fallback_message: &'static str,
    pub accent: Rgb,
}

impl ScreenSpec {
    pub fn labels(&self) -> &'static [&'static str] {
        match self.input {
            ScreenInputKind::Numeric { labels, .. } => labels,
            ScreenInputKind::Image => &[],
        }
    }

    /// Hint text for the empty numeric field at `index`.
    pub fn placeholder(&self, index: usize) -> String {
        let example = match self.input {
            ScreenInputKind::Numeric { examples, .. } => {
                examples.and_then(|examples| examples.get(index).copied())
            }
            ScreenInputKind::Image => None,
        };
        match example {
            Some(example) => format!("e.g., {example}"),
            None => DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

pub static BREAST_CANCER: ScreenSpec = ScreenSpec {
    kind: PredictionKind::BreastCancer,
    title: "Breast Cancer",
    description: "Analyze data for breast cancer.",
    header_title: "Breast Cancer Prediction",
    subtitle: "Enter the tumor characteristics below.",
    submit_label: "Analyze Tumor",
    result_title: "Analysis Result",
    input: ScreenInputKind::Numeric {
        labels: &[
            "Mean Radius",
            "Mean Perimeter",
            "Mean Area",
            "Mean Concavity",
            "Concave Points Mean",
            "Mean Compactness",
            "Mean Texture",
            "Mean Smoothness",
            "Mean Symmetry",
            "Mean Fractal Dimension",
        ],
        examples: None,
    },
    incomplete_message: "Please fill out all 10 fields.",
    failure_title: NUMERIC_FAILURE_TITLE,
    fallback_message: NUMERIC_FALLBACK_MESSAGE,
    accent: THEME.warning,
};

pub static HEART_DISEASE: ScreenSpec = ScreenSpec {
    kind: PredictionKind::HeartDisease,
    title: "Heart Disease",
    description: "Predict the risk of heart disease.",
    header_title: "Heart Disease Prediction",
    subtitle: "Enter the patient's cardiac measurements below.",
    submit_label: "Predict Now",
    result_title: "Prediction Result",
    input: ScreenInputKind::Numeric {
        labels: &[
            "Age",
            "Chest Pain Type",
            "Resting Blood Pressure",
            "Serum Cholesterol",
            "Max Heart Rate",
            "Exercise Induced Angina",
            "ST Depression",
            "ST Slope",
            "Major Vessels",
            "Thalassemia",
        ],
        examples: None,
    },
    incomplete_message: "Please fill out all fields before predicting.",
    failure_title: NUMERIC_FAILURE_TITLE,
    fallback_message: NUMERIC_FALLBACK_MESSAGE,
    accent: THEME.danger,
};

pub static DIABETES: ScreenSpec = ScreenSpec {
    kind: PredictionKind::Diabetes,
    title: "Diabetes",
    description: "Estimate the probability of diabetes.",
    header_title: "Diabetes Prediction",
    subtitle: "Enter the patient's health metrics below.",
    submit_label: "Predict Now",
    result_title: "Prediction Result",
    input: ScreenInputKind::Numeric {
        labels: &[
            "Glucose Level",
            "Blood Pressure",
            "Skin Thickness",
            "Insulin Level",
            "BMI",
            "Diabetes Pedigree Function",
            "Age",
        ],
        examples: Some(&["140", "72", "35", "0", "33.6", "0.627", "50"]),
    },
    incomplete_message: "Please fill out all fields before predicting.",
    failure_title: NUMERIC_FAILURE_TITLE,
    fallback_message: NUMERIC_FALLBACK_MESSAGE,
    accent: THEME.primary,
};

pub static PNEUMONIA: ScreenSpec = ScreenSpec {
    kind: PredictionKind::Pneumonia,
    title: "Pneumonia",
    description: "Analyze a chest X-ray for pneumonia.",
    header_title: "Pneumonia Prediction",
    subtitle: "Upload a chest X-ray image to get an AI-powered analysis.",
    submit_label: "Analyze X-Ray",
    result_title: "Analysis Complete",
    input: ScreenInputKind::Image,
    incomplete_message: "Please select an X-ray image first.",
    failure_title: "Analysis Failed",
    fallback_message:
        "Failed to get prediction from server. Please check your network and try again.",
    accent: THEME.secondary,
};

/// Screens in home-screen order.
pub static SCREENS: [&ScreenSpec; 4] = [&BREAST_CANCER, &HEART_DISEASE, &DIABETES, &PNEUMONIA];

pub fn screen(kind: PredictionKind) -> &'static ScreenSpec {
    match kind {
        PredictionKind::BreastCancer => &BREAST_CANCER,
        PredictionKind::HeartDisease => &HEART_DISEASE,
        PredictionKind::Diabetes => &DIABETES,
        PredictionKind::Pneumonia => &PNEUMONIA,
    }
}

#[cfg(test)]
#[path = "tests/screen_tests.rs"]
mod tests;
