use shared::{
    domain::PredictionKind,
    protocol::{
        BreastCancerResponse, DiabetesResponse, HeartDiseaseResponse, PneumoniaResponse,
        PredictionResponse,
    },
    theme::Tone,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceScore {
    pub label: &'static str,
    /// Probability in `[0, 1]` as returned by the service.
    pub probability: f64,
    pub tone: Tone,
}

impl ConfidenceScore {
    pub fn percent_text(&self) -> String {
        format!("{}%", one_decimal(self.probability * 100.0))
    }

    /// Progress-bar fill, clamped to `[0, 1]`; NaN renders as empty.
    pub fn fill_fraction(&self) -> f32 {
        if self.probability.is_nan() {
            0.0
        } else {
            self.probability.clamp(0.0, 1.0) as f32
        }
    }
}

/// Display state of a completed prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub kind: PredictionKind,
    pub message: String,
    pub tone: Tone,
    pub scores: Vec<ConfidenceScore>,
}

impl PredictionResult {
    pub fn from_response(response: PredictionResponse) -> Self {
        match response {
            PredictionResponse::BreastCancer(body) => breast_cancer(body),
            PredictionResponse::HeartDisease(body) => heart_disease(body),
            PredictionResponse::Diabetes(body) => diabetes(body),
            PredictionResponse::Pneumonia(body) => pneumonia(body),
        }
    }

    pub fn is_positive(&self) -> bool {
        self.tone == Tone::Danger
    }
}

/// One-decimal text where exact ties round away from zero.
///
/// A binary float sits exactly halfway between two tenths only when four times
/// it is an odd integer; `{:.1}` would send those to the even digit.
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{value:.1}")
    }
}

fn finding_tone(positive: bool) -> Tone {
    if positive {
        Tone::Danger
    } else {
        Tone::Success
    }
}

fn breast_cancer(body: BreastCancerResponse) -> PredictionResult {
    PredictionResult {
        kind: PredictionKind::BreastCancer,
        tone: finding_tone(body.message.contains("Malignant")),
        message: body.message,
        scores: vec![
            ConfidenceScore {
                label: "Confidence (Malignant)",
                probability: body.probability_malignant,
                tone: Tone::Danger,
            },
            ConfidenceScore {
                label: "Confidence (Benign)",
                probability: body.probability_benign,
                tone: Tone::Success,
            },
        ],
    }
}

fn heart_disease(body: HeartDiseaseResponse) -> PredictionResult {
    PredictionResult {
        kind: PredictionKind::HeartDisease,
        tone: finding_tone(body.message.contains("has Heart Disease")),
        message: body.message,
        scores: vec![
            ConfidenceScore {
                label: "Confidence (Heart Disease)",
                probability: body.probability_heart_disease,
                tone: Tone::Danger,
            },
            ConfidenceScore {
                label: "Confidence (Healthy)",
                probability: body.probability_healthy,
                tone: Tone::Success,
            },
        ],
    }
}

fn diabetes(body: DiabetesResponse) -> PredictionResult {
    let positive = body.message.contains("Diabetic") && !body.message.contains("Non-Diabetic");
    PredictionResult {
        kind: PredictionKind::Diabetes,
        tone: finding_tone(positive),
        message: body.message,
        scores: vec![
            ConfidenceScore {
                label: "Confidence (Diabetic)",
                probability: body.probability_diabetic,
                tone: Tone::Danger,
            },
            ConfidenceScore {
                label: "Confidence (Healthy)",
                probability: body.probability_non_diabetic,
                tone: Tone::Success,
            },
        ],
    }
}

fn pneumonia(body: PneumoniaResponse) -> PredictionResult {
    let tone = finding_tone(body.prediction.trim().eq_ignore_ascii_case("pneumonia"));
    PredictionResult {
        kind: PredictionKind::Pneumonia,
        tone,
        message: body.prediction,
        scores: vec![ConfidenceScore {
            label: "Confidence",
            probability: body.confidence,
            tone,
        }],
    }
}

#[cfg(test)]
#[path = "tests/result_tests.rs"]
mod tests;
