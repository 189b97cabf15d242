use std::time::Duration;

use client_core::{
    screen::{ScreenInputKind, SCREENS},
    FormController, PredictionError, ScreenLifecycle, ScreenSpec, SubmitStart,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui::{self, RichText};
use shared::{domain::ScreenInstanceId, theme::THEME};
use tracing::{debug, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};
use crate::ui::{
    theme::color,
    widgets::{self, ImagePreview, PickerAction},
};

const APP_TITLE: &str = "Vitalis AI";
const APP_TAGLINE: &str = "Intelligent insights for a healthier tomorrow";
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp"];

/// A mounted prediction screen. Dropping it cancels its in-flight request.
struct ScreenView {
    id: ScreenInstanceId,
    controller: FormController,
    lifecycle: ScreenLifecycle,
    preview: Option<ImagePreview>,
}

enum Route {
    Home,
    Screen(Box<ScreenView>),
}

enum ScreenAction {
    Back,
    Submit,
    Picker(PickerAction),
    DismissAlert,
}

pub struct VitalisApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    route: Route,
    next_screen_id: u64,
    status: Option<String>,
}

impl VitalisApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            route: Route::Home,
            next_screen_id: 0,
            status: None,
        }
    }

    fn open_screen(&mut self, spec: &'static ScreenSpec) {
        self.next_screen_id += 1;
        let id = ScreenInstanceId(self.next_screen_id);
        info!(screen = id.0, kind = %spec.kind, "opening prediction screen");
        self.route = Route::Screen(Box::new(ScreenView {
            id,
            controller: FormController::new(spec),
            lifecycle: ScreenLifecycle::new(),
            preview: None,
        }));
    }

    fn close_screen(&mut self) {
        if let Route::Screen(view) = std::mem::replace(&mut self.route, Route::Home) {
            debug!(
                screen = view.id.0,
                loading = view.controller.is_loading(),
                "closing prediction screen"
            );
        }
    }

    fn active_screen_mut(&mut self) -> Option<&mut ScreenView> {
        match &mut self.route {
            Route::Screen(view) => Some(view),
            Route::Home => None,
        }
    }

    fn submit_current(&mut self) {
        let Route::Screen(view) = &mut self.route else {
            return;
        };
        let request = match view.controller.begin_submit() {
            SubmitStart::Ready(request) => request,
            SubmitStart::Invalid | SubmitStart::Busy => return,
        };

        let cmd = BackendCommand::Predict {
            screen_id: view.id,
            request,
            cancel: view.lifecycle.token(),
        };
        if let Err(message) = dispatch_backend_command(&self.cmd_tx, cmd) {
            view.controller
                .finish_submit(Err(PredictionError::Unavailable(message.clone())));
            self.status = Some(message);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::PredictionFinished {
                    screen_id,
                    response,
                } => match &mut self.route {
                    Route::Screen(view) if view.id == screen_id => {
                        view.controller.finish_submit(response);
                    }
                    _ => debug!(
                        screen = screen_id.0,
                        "ignoring prediction for a screen that is no longer shown"
                    ),
                },
                UiEvent::BackendUnavailable(message) => {
                    warn!("backend unavailable: {message}");
                    if let Some(view) = self.active_screen_mut() {
                        if view.controller.is_loading() {
                            view.controller
                                .finish_submit(Err(PredictionError::Unavailable(message.clone())));
                        }
                    }
                    self.status = Some(message);
                }
            }
        }
    }

    fn pick_image(&mut self, ctx: &egui::Context) {
        let Some(view) = self.active_screen_mut() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_title("Select chest X-ray")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        view.preview = match ImagePreview::load(ctx, &path) {
            Ok(preview) => Some(preview),
            Err(err) => {
                warn!(path = %path.display(), "failed to decode image preview: {err}");
                None
            }
        };
        view.controller.select_image(path);
    }

    fn handle_screen_action(&mut self, ctx: &egui::Context, action: ScreenAction) {
        match action {
            ScreenAction::Back => self.close_screen(),
            ScreenAction::Submit => self.submit_current(),
            ScreenAction::Picker(PickerAction::Pick) => self.pick_image(ctx),
            ScreenAction::Picker(PickerAction::Clear) => {
                if let Some(view) = self.active_screen_mut() {
                    view.controller.clear_image();
                    view.preview = None;
                }
            }
            ScreenAction::DismissAlert => {
                if let Some(view) = self.active_screen_mut() {
                    view.controller.dismiss_alert();
                }
            }
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        let Some(status) = self.status.clone() else {
            return;
        };
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(status).color(color(THEME.danger)));
                if ui.small_button("x").clicked() {
                    self.status = None;
                }
            });
        });
    }
}

fn show_home(ctx: &egui::Context) -> Option<&'static ScreenSpec> {
    let mut opened = None;
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(16.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(APP_TITLE)
                            .size(28.0)
                            .strong()
                            .color(color(THEME.primary)),
                    );
                    ui.label(RichText::new(APP_TAGLINE).color(color(THEME.text_secondary)));
                });
                ui.add_space(20.0);
                for spec in SCREENS {
                    if widgets::home_card(ui, spec).clicked() {
                        opened = Some(spec);
                    }
                    ui.add_space(10.0);
                }
            });
    });
    opened
}

fn show_screen(ctx: &egui::Context, view: &mut ScreenView) -> Option<ScreenAction> {
    let spec = view.controller.screen();
    let mut action = None;

    egui::TopBottomPanel::top("screen_header").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("< Back").clicked() {
                action = Some(ScreenAction::Back);
            }
            ui.label(
                RichText::new(spec.header_title)
                    .size(20.0)
                    .strong()
                    .color(color(THEME.primary)),
            );
        });
        ui.add_space(6.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(spec.subtitle).color(color(THEME.text_secondary)));
                ui.add_space(12.0);

                match spec.input {
                    ScreenInputKind::Numeric { labels, .. } => {
                        for (index, label) in labels.iter().enumerate() {
                            let value = view
                                .controller
                                .form()
                                .and_then(|form| form.value(index))
                                .unwrap_or_default();
                            let placeholder = spec.placeholder(index);
                            if let Some(text) =
                                widgets::numeric_field(ui, label, value, &placeholder)
                            {
                                view.controller.set_field(index, &text);
                            }
                        }
                    }
                    ScreenInputKind::Image => {
                        if let Some(picked) = widgets::image_picker(
                            ui,
                            view.controller.image(),
                            view.preview.as_ref(),
                        ) {
                            action = Some(ScreenAction::Picker(picked));
                        }
                    }
                }

                ui.add_space(12.0);
                if widgets::submit_button(ui, spec.submit_label, view.controller.is_loading()) {
                    action = Some(ScreenAction::Submit);
                }

                if let Some(result) = view.controller.result() {
                    ui.add_space(16.0);
                    widgets::result_card(ui, spec, result);
                }
            });
    });

    if widgets::alert_modal(ctx, view.controller.alert()) {
        action = Some(ScreenAction::DismissAlert);
    }
    action
}

impl eframe::App for VitalisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_status_bar(ctx);

        let mut opened = None;
        let mut action = None;
        match &mut self.route {
            Route::Home => opened = show_home(ctx),
            Route::Screen(view) => action = show_screen(ctx, view),
        }
        if let Some(spec) = opened {
            self.open_screen(spec);
        }
        if let Some(action) = action {
            self.handle_screen_action(ctx, action);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

impl Drop for VitalisApp {
    fn drop(&mut self) {
        let _ = self.cmd_tx.try_send(BackendCommand::Shutdown);
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
