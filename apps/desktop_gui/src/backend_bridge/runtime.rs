//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{PredictionClient, PredictionError, PredictionService};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::{debug, error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, server_url: String) {
    let service: Arc<dyn PredictionService> = Arc::new(PredictionClient::new(server_url));
    launch_with_service(cmd_rx, ui_tx, service);
}

/// Spawns the backend worker thread. Each prediction runs as its own task so a
/// slow service never blocks commands for other screens.
pub fn launch_with_service(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    service: Arc<dyn PredictionService>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "failed to build backend runtime: {err}"
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            info!("backend worker started");
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Predict {
                        screen_id,
                        request,
                        mut cancel,
                    } => {
                        let service = Arc::clone(&service);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let kind = request.kind();
                            let response = tokio::select! {
                                response = service.predict(request) => response,
                                _ = cancel.cancelled() => Err(PredictionError::Cancelled),
                            };
                            if cancel.is_cancelled() {
                                debug!(screen = screen_id.0, kind = %kind, "dropping prediction for closed screen");
                                return;
                            }
                            match ui_tx.try_send(UiEvent::PredictionFinished {
                                screen_id,
                                response,
                            }) {
                                Ok(()) => {}
                                Err(TrySendError::Full(_)) => {
                                    warn!(screen = screen_id.0, "ui event queue full; prediction discarded");
                                }
                                Err(TrySendError::Disconnected(_)) => {
                                    warn!(screen = screen_id.0, "ui event queue closed; prediction discarded");
                                }
                            }
                        });
                    }
                    BackendCommand::Shutdown => break,
                }
            }
            info!("backend worker stopped");
        });
    })
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
