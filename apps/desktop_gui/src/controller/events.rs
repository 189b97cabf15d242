//! Events delivered from the backend worker to the UI thread.

use client_core::PredictionError;
use shared::{domain::ScreenInstanceId, protocol::PredictionResponse};

pub enum UiEvent {
    /// Outcome of a prediction dispatched by the screen instance `screen_id`.
    PredictionFinished {
        screen_id: ScreenInstanceId,
        response: Result<PredictionResponse, PredictionError>,
    },
    BackendUnavailable(String),
}
