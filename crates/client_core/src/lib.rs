use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use shared::{
    domain::PredictionKind,
    error::ApiError,
    protocol::{NumericPredictRequest, PredictionResponse},
};
use thiserror::Error;
use tracing::{info, warn};

pub mod config;
pub mod controller;
pub mod form;
pub mod lifecycle;
pub mod result;
pub mod screen;

pub use controller::{AlertState, FormController, ImageSelection, Phase, SubmitOutcome, SubmitStart};
pub use lifecycle::{CancellationToken, ScreenLifecycle};
pub use result::{ConfidenceScore, PredictionResult};
pub use screen::ScreenSpec;

/// Multipart field the pneumonia endpoint reads the upload from.
const IMAGE_FIELD_NAME: &str = "file";
const FALLBACK_IMAGE_NAME: &str = "xray.jpg";
const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("prediction service returned status {status}")]
    Status { status: u16 },
    #[error("failed to reach prediction service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed {kind} prediction response: {source}")]
    MalformedResponse {
        kind: PredictionKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("unexpected {actual} response for a {expected} request")]
    KindMismatch {
        expected: PredictionKind,
        actual: PredictionKind,
    },
    #[error("failed to read image '{}': {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("prediction backend unavailable: {0}")]
    Unavailable(String),
    #[error("prediction request cancelled")]
    Cancelled,
}

impl PredictionError {
    /// Message supplied by the prediction service in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            PredictionError::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Text to show the user: the service's own message, a local file problem,
    /// or `fallback` for everything else.
    pub fn alert_message(&self, fallback: &str) -> String {
        match self {
            PredictionError::Rejected { message, .. } => message.clone(),
            PredictionError::ImageRead { .. } => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// A fully built submission, ready to be posted.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionRequest {
    Numeric {
        kind: PredictionKind,
        input_data: Vec<f64>,
    },
    Image {
        kind: PredictionKind,
        path: PathBuf,
    },
}

impl PredictionRequest {
    pub fn kind(&self) -> PredictionKind {
        match self {
            PredictionRequest::Numeric { kind, .. } | PredictionRequest::Image { kind, .. } => *kind,
        }
    }
}

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(
        &self,
        request: PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError>;
}

/// HTTP client for the remote prediction service.
///
/// Issues exactly one POST per call; no retries and no client-side timeout.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    server_url: String,
}

impl PredictionClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into(),
        }
    }

    pub fn endpoint(&self, kind: PredictionKind) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), kind.path())
    }

    async fn post_numeric(
        &self,
        kind: PredictionKind,
        input_data: Vec<f64>,
    ) -> Result<Response, PredictionError> {
        let url = self.endpoint(kind);
        info!(
            kind = %kind,
            endpoint = %url,
            fields = input_data.len(),
            "prediction: posting numeric input"
        );
        let response = self
            .http
            .post(url)
            .json(&NumericPredictRequest { input_data })
            .send()
            .await?;
        Ok(response)
    }

    async fn post_image(
        &self,
        kind: PredictionKind,
        path: &Path,
    ) -> Result<Response, PredictionError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| PredictionError::ImageRead {
                path: path.to_path_buf(),
                source,
            })?;
        let url = self.endpoint(kind);
        info!(
            kind = %kind,
            endpoint = %url,
            size_bytes = bytes.len(),
            "prediction: uploading image"
        );
        let part = Part::bytes(bytes)
            .file_name(upload_file_name(path))
            .mime_str(&upload_mime_type(path))?;
        let response = self
            .http
            .post(url)
            .multipart(Form::new().part(IMAGE_FIELD_NAME, part))
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    async fn predict(
        &self,
        request: PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        let kind = request.kind();
        let response = match request {
            PredictionRequest::Numeric { kind, input_data } => {
                self.post_numeric(kind, input_data).await?
            }
            PredictionRequest::Image { kind, path } => self.post_image(kind, &path).await?,
        };
        decode_response(kind, response).await
    }
}

async fn decode_response(
    kind: PredictionKind,
    response: Response,
) -> Result<PredictionResponse, PredictionError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let status = status.as_u16();
        return Err(match ApiError::from_body(&body) {
            Some(api_error) => {
                warn!(kind = %kind, status, error = %api_error.error, "prediction: rejected by service");
                PredictionError::Rejected {
                    status,
                    message: api_error.error,
                }
            }
            None => {
                warn!(kind = %kind, status, "prediction: failed without error body");
                PredictionError::Status { status }
            }
        });
    }

    let decoded = PredictionResponse::decode(kind, &body)
        .map_err(|source| PredictionError::MalformedResponse { kind, source })?;
    info!(kind = %kind, "prediction: response decoded");
    Ok(decoded)
}

fn upload_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_IMAGE_NAME.to_string())
}

fn upload_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_IMAGE_MIME.to_string())
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
