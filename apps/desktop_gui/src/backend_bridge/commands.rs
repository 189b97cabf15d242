//! Backend commands queued from UI to backend worker.

use client_core::{CancellationToken, PredictionRequest};
use shared::domain::ScreenInstanceId;

pub enum BackendCommand {
    Predict {
        screen_id: ScreenInstanceId,
        request: PredictionRequest,
        cancel: CancellationToken,
    },
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Predict { .. } => "predict",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
