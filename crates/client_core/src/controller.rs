//! Prediction form controller shared by every screen.
//!
//! Lifecycle of one submission:
//! `Idle -> Validating -> Invalid (alert) -> Idle`, or
//! `Idle -> Validating -> Submitting -> Succeeded | Failed (alert) | Cancelled -> Idle`.
//! Event-driven front-ends call [`FormController::begin_submit`] and
//! [`FormController::finish_submit`] around their own dispatch; everything else
//! can await [`FormController::submit`].

use std::path::{Path, PathBuf};

use shared::{
    domain::{AlertKind, PredictionKind},
    protocol::PredictionResponse,
};
use tracing::{debug, info, warn};

use crate::{
    form::FormState,
    lifecycle::CancellationToken,
    result::PredictionResult,
    screen::{self, ScreenInputKind, ScreenSpec, INCOMPLETE_FORM_TITLE},
    PredictionError, PredictionRequest, PredictionService,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    pub visible: bool,
    pub title: String,
    pub message: String,
    pub kind: AlertKind,
}

impl Default for AlertState {
    fn default() -> Self {
        Self {
            visible: false,
            title: String::new(),
            message: String::new(),
            kind: AlertKind::Error,
        }
    }
}

impl AlertState {
    fn show(&mut self, title: &str, message: impl Into<String>, kind: AlertKind) {
        self.visible = true;
        self.title = title.to_string();
        self.message = message.into();
        self.kind = kind;
    }

    /// Hides the alert; title and message stay for a closing animation.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }
}

/// A locally selected image awaiting upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSelection {
    path: PathBuf,
}

impl ImageSelection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScreenInput {
    Numeric(FormState),
    Image(Option<ImageSelection>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// Validation passed; the request must be dispatched and its outcome fed
    /// back through [`FormController::finish_submit`].
    Ready(PredictionRequest),
    Invalid,
    /// A request is already in flight.
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid,
    Busy,
    Succeeded,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct FormController {
    screen: &'static ScreenSpec,
    input: ScreenInput,
    result: Option<PredictionResult>,
    alert: AlertState,
    phase: Phase,
}

impl FormController {
    pub fn new(screen: &'static ScreenSpec) -> Self {
        let input = match screen.input {
            ScreenInputKind::Numeric { labels, .. } => ScreenInput::Numeric(FormState::new(labels)),
            ScreenInputKind::Image => ScreenInput::Image(None),
        };
        Self {
            screen,
            input,
            result: None,
            alert: AlertState::default(),
            phase: Phase::Idle,
        }
    }

    pub fn for_kind(kind: PredictionKind) -> Self {
        Self::new(screen::screen(kind))
    }

    pub fn screen(&self) -> &'static ScreenSpec {
        self.screen
    }

    pub fn form(&self) -> Option<&FormState> {
        match &self.input {
            ScreenInput::Numeric(form) => Some(form),
            ScreenInput::Image(_) => None,
        }
    }

    pub fn image(&self) -> Option<&ImageSelection> {
        match &self.input {
            ScreenInput::Image(selection) => selection.as_ref(),
            ScreenInput::Numeric(_) => None,
        }
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn alert(&self) -> &AlertState {
        &self.alert
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    /// Applies a keystroke to a numeric field. Returns `false` for image
    /// screens and out-of-range indices.
    pub fn set_field(&mut self, index: usize, raw: &str) -> bool {
        match &mut self.input {
            ScreenInput::Numeric(form) => form.set(index, raw),
            ScreenInput::Image(_) => false,
        }
    }

    /// Selects the image to upload, discarding any previous result.
    pub fn select_image(&mut self, path: impl Into<PathBuf>) -> bool {
        match &mut self.input {
            ScreenInput::Image(selection) => {
                *selection = Some(ImageSelection::new(path));
                self.result = None;
                true
            }
            ScreenInput::Numeric(_) => false,
        }
    }

    pub fn clear_image(&mut self) {
        if let ScreenInput::Image(selection) = &mut self.input {
            *selection = None;
            self.result = None;
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert.dismiss();
    }

    /// Validates the input and, when complete, enters `Submitting` and returns
    /// the request to dispatch.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.is_loading() {
            debug!(kind = %self.screen.kind, "submit ignored while a request is in flight");
            return SubmitStart::Busy;
        }

        self.alert.dismiss();
        let kind = self.screen.kind;
        let request = match &self.input {
            ScreenInput::Numeric(form) if form.is_complete() => Some(PredictionRequest::Numeric {
                kind,
                input_data: form.input_vector(),
            }),
            ScreenInput::Image(Some(selection)) => Some(PredictionRequest::Image {
                kind,
                path: selection.path().to_path_buf(),
            }),
            ScreenInput::Numeric(form) => {
                info!(kind = %kind, missing = ?form.missing_labels(), "submit rejected: incomplete form");
                None
            }
            ScreenInput::Image(None) => {
                info!(kind = %kind, "submit rejected: no image selected");
                None
            }
        };
        let Some(request) = request else {
            self.show_incomplete();
            return SubmitStart::Invalid;
        };

        self.result = None;
        self.phase = Phase::Submitting;
        SubmitStart::Ready(request)
    }

    /// Maps the outcome of a dispatched request into display state. Loading is
    /// cleared whatever the outcome.
    pub fn finish_submit(
        &mut self,
        response: Result<PredictionResponse, PredictionError>,
    ) -> SubmitOutcome {
        self.phase = Phase::Idle;
        let kind = self.screen.kind;

        let response = response.and_then(|response| {
            if response.kind() == kind {
                Ok(response)
            } else {
                Err(PredictionError::KindMismatch {
                    expected: kind,
                    actual: response.kind(),
                })
            }
        });

        match response {
            Ok(response) => {
                let result = PredictionResult::from_response(response);
                info!(kind = %kind, message = %result.message, "prediction succeeded");
                self.result = Some(result);
                SubmitOutcome::Succeeded
            }
            Err(PredictionError::Cancelled) => {
                info!(kind = %kind, "prediction cancelled");
                SubmitOutcome::Cancelled
            }
            Err(err) => {
                warn!(kind = %kind, error = %err, "prediction failed");
                let message = err.alert_message(self.screen.fallback_message);
                self.alert
                    .show(self.screen.failure_title, message, AlertKind::Error);
                SubmitOutcome::Failed
            }
        }
    }

    /// Runs one full submission against `service`, abandoning the call when
    /// `cancel` fires.
    pub async fn submit(
        &mut self,
        service: &dyn PredictionService,
        cancel: &CancellationToken,
    ) -> SubmitOutcome {
        let request = match self.begin_submit() {
            SubmitStart::Ready(request) => request,
            SubmitStart::Invalid => return SubmitOutcome::Invalid,
            SubmitStart::Busy => return SubmitOutcome::Busy,
        };

        let mut cancel = cancel.clone();
        let response = if cancel.is_cancelled() {
            Err(PredictionError::Cancelled)
        } else {
            tokio::select! {
                response = service.predict(request) => response,
                _ = cancel.cancelled() => Err(PredictionError::Cancelled),
            }
        };
        self.finish_submit(response)
    }

    fn show_incomplete(&mut self) {
        self.alert.show(
            INCOMPLETE_FORM_TITLE,
            self.screen.incomplete_message,
            AlertKind::Error,
        );
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
