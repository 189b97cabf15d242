use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use client_core::{PredictionError, PredictionRequest, PredictionService, ScreenLifecycle};
use crossbeam_channel::bounded;
use shared::{
    domain::{PredictionKind, ScreenInstanceId},
    protocol::{PneumoniaResponse, PredictionResponse},
};

use super::launch_with_service;
use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

struct CannedService {
    delay: Duration,
}

#[async_trait]
impl PredictionService for CannedService {
    async fn predict(
        &self,
        _request: PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        tokio::time::sleep(self.delay).await;
        Ok(PredictionResponse::Pneumonia(PneumoniaResponse {
            prediction: "Normal".into(),
            confidence: 0.9,
        }))
    }
}

fn image_request() -> PredictionRequest {
    PredictionRequest::Image {
        kind: PredictionKind::Pneumonia,
        path: "chest.png".into(),
    }
}

#[test]
fn prediction_result_is_delivered_to_the_dispatching_screen() {
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(8);
    let worker = launch_with_service(
        cmd_rx,
        ui_tx,
        Arc::new(CannedService {
            delay: Duration::ZERO,
        }),
    );
    let lifecycle = ScreenLifecycle::new();

    cmd_tx
        .send(BackendCommand::Predict {
            screen_id: ScreenInstanceId(7),
            request: image_request(),
            cancel: lifecycle.token(),
        })
        .expect("queue predict");

    match ui_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("prediction event")
    {
        UiEvent::PredictionFinished {
            screen_id,
            response,
        } => {
            assert_eq!(screen_id, ScreenInstanceId(7));
            assert_eq!(
                response.expect("prediction succeeded").kind(),
                PredictionKind::Pneumonia
            );
        }
        UiEvent::BackendUnavailable(message) => panic!("backend unavailable: {message}"),
    }

    cmd_tx.send(BackendCommand::Shutdown).expect("queue shutdown");
    worker.join().expect("worker exits");
}

#[test]
fn closed_screen_receives_no_event() {
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(8);
    let worker = launch_with_service(
        cmd_rx,
        ui_tx,
        Arc::new(CannedService {
            delay: Duration::from_millis(300),
        }),
    );
    let lifecycle = ScreenLifecycle::new();

    cmd_tx
        .send(BackendCommand::Predict {
            screen_id: ScreenInstanceId(1),
            request: image_request(),
            cancel: lifecycle.token(),
        })
        .expect("queue predict");
    drop(lifecycle);

    assert!(ui_rx.recv_timeout(Duration::from_millis(800)).is_err());

    cmd_tx.send(BackendCommand::Shutdown).expect("queue shutdown");
    worker.join().expect("worker exits");
}

#[test]
fn full_ui_queue_drops_the_result_without_stalling_the_worker() {
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(1);
    ui_tx
        .send(UiEvent::BackendUnavailable("queued earlier".into()))
        .expect("fill ui queue");
    let worker = launch_with_service(
        cmd_rx,
        ui_tx,
        Arc::new(CannedService {
            delay: Duration::ZERO,
        }),
    );
    let lifecycle = ScreenLifecycle::new();

    cmd_tx
        .send(BackendCommand::Predict {
            screen_id: ScreenInstanceId(3),
            request: image_request(),
            cancel: lifecycle.token(),
        })
        .expect("queue predict");
    std::thread::sleep(Duration::from_millis(200));
    cmd_tx.send(BackendCommand::Shutdown).expect("queue shutdown");
    worker.join().expect("worker exits");

    assert!(matches!(
        ui_rx.try_recv(),
        Ok(UiEvent::BackendUnavailable(_))
    ));
    assert!(ui_rx.try_recv().is_err());
}
