mod backend_bridge;
mod controller;
mod ui;

use client_core::config::{load_settings, Settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::VitalisApp;

fn main() -> eframe::Result<()> {
    let loaded = load_settings(None);
    let settings = loaded.as_ref().cloned().unwrap_or_default();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = &loaded {
        tracing::warn!("using default settings: {err}");
    }
    run(settings)
}

fn run(settings: Settings) -> eframe::Result<()> {
    tracing::info!(server_url = %settings.server_url, "starting desktop gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.server_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Vitalis AI")
            .with_inner_size([480.0, 820.0])
            .with_min_inner_size([360.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Vitalis AI",
        options,
        Box::new(|cc| {
            ui::theme::apply(&cc.egui_ctx);
            Ok(Box::new(VitalisApp::new(cmd_tx, ui_rx)))
        }),
    )
}
