//! Reusable pieces of the prediction screens.

use std::path::Path;

use client_core::{screen::DISCLAIMER, AlertState, ImageSelection, PredictionResult, ScreenSpec};
use eframe::egui::{self, Color32, RichText};
use shared::{domain::AlertKind, theme::THEME};

use crate::ui::theme::{color, tone_color, tone_surface};

const CARD_RADIUS: u8 = 12;
const PREVIEW_MAX_DIMENSION: f32 = 280.0;

fn card_frame(fill: Color32, stroke: Color32) -> egui::Frame {
    egui::Frame::new()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .corner_radius(egui::CornerRadius::same(CARD_RADIUS))
        .inner_margin(egui::Margin::same(16))
}

fn secondary_text(text: impl Into<String>) -> RichText {
    RichText::new(text).color(color(THEME.text_secondary))
}

/// Home screen entry for one prediction screen.
pub fn home_card(ui: &mut egui::Ui, spec: &ScreenSpec) -> egui::Response {
    let inner = card_frame(color(THEME.surface), color(THEME.track)).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(
            RichText::new(spec.title)
                .size(18.0)
                .strong()
                .color(color(spec.accent)),
        );
        ui.label(secondary_text(spec.description));
    });
    inner
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Labeled decimal input. Returns the edited text when it changed this frame.
pub fn numeric_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &str,
    placeholder: &str,
) -> Option<String> {
    ui.label(RichText::new(label).color(color(THEME.text)));
    let mut text = value.to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut text)
            .hint_text(placeholder)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);
    response.changed().then_some(text)
}

/// Full-width primary button; disabled with a spinner while `loading`.
pub fn submit_button(ui: &mut egui::Ui, label: &str, loading: bool) -> bool {
    let text = if loading { "Analyzing..." } else { label };
    let button = egui::Button::new(RichText::new(text).color(Color32::WHITE).strong())
        .fill(color(THEME.primary))
        .corner_radius(egui::CornerRadius::same(CARD_RADIUS))
        .min_size(egui::vec2(ui.available_width(), 44.0));
    let clicked = ui.add_enabled(!loading, button).clicked();
    if loading {
        ui.vertical_centered(|ui| ui.spinner());
    }
    clicked
}

pub fn result_card(ui: &mut egui::Ui, spec: &ScreenSpec, result: &PredictionResult) {
    card_frame(tone_surface(result.tone), tone_color(result.tone)).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(secondary_text(spec.result_title).size(15.0));
        ui.label(
            RichText::new(&result.message)
                .size(22.0)
                .strong()
                .color(tone_color(result.tone)),
        );
        ui.add_space(8.0);

        for score in &result.scores {
            ui.horizontal(|ui| {
                ui.label(RichText::new(score.label).color(color(THEME.text)));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(score.percent_text()).strong());
                });
            });
            ui.add(
                egui::ProgressBar::new(score.fill_fraction())
                    .fill(tone_color(score.tone))
                    .desired_height(8.0),
            );
            ui.add_space(6.0);
        }

        ui.separator();
        ui.label(secondary_text(DISCLAIMER).small().italics());
    });
}

/// Modal alert with a single OK button. Returns `true` when dismissed.
pub fn alert_modal(ctx: &egui::Context, alert: &AlertState) -> bool {
    if !alert.visible {
        return false;
    }

    let accent = match alert.kind {
        AlertKind::Error => THEME.danger,
        AlertKind::Success => THEME.success,
    };
    let mut dismissed = false;
    egui::Window::new(RichText::new(&alert.title).strong().color(color(accent)))
        .id(egui::Id::new("prediction_alert"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(RichText::new(&alert.message).color(color(THEME.text)));
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                let ok = egui::Button::new(RichText::new("OK").color(Color32::WHITE))
                    .fill(color(accent))
                    .min_size(egui::vec2(96.0, 32.0));
                if ui.add(ok).clicked() {
                    dismissed = true;
                }
            });
        });
    dismissed
}

/// Downscaled texture of the selected X-ray.
pub struct ImagePreview {
    texture: egui::TextureHandle,
    size: egui::Vec2,
}

impl ImagePreview {
    pub fn load(ctx: &egui::Context, path: &Path) -> Result<Self, image::ImageError> {
        let decoded = image::open(path)?;
        let (orig_w, orig_h) = (decoded.width(), decoded.height());
        let scale = (PREVIEW_MAX_DIMENSION / (orig_w.max(orig_h).max(1) as f32)).min(1.0);
        let resized = if scale < 1.0 {
            decoded.resize(
                (orig_w as f32 * scale).max(1.0) as u32,
                (orig_h as f32 * scale).max(1.0) as u32,
                image::imageops::FilterType::Triangle,
            )
        } else {
            decoded
        };
        let rgba = resized.to_rgba8();
        let [w, h] = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied([w, h], rgba.as_raw());
        let texture = ctx.load_texture(
            format!("xray-preview:{}", path.display()),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        Ok(Self {
            texture,
            size: egui::vec2(w as f32, h as f32),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    Pick,
    Clear,
}

pub fn image_picker(
    ui: &mut egui::Ui,
    selection: Option<&ImageSelection>,
    preview: Option<&ImagePreview>,
) -> Option<PickerAction> {
    let mut action = None;
    card_frame(color(THEME.surface), color(THEME.track)).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            match (selection, preview) {
                (Some(_), Some(preview)) => {
                    ui.add(egui::Image::from_texture(egui::load::SizedTexture::new(
                        preview.texture.id(),
                        preview.size,
                    )));
                }
                (Some(_), None) => {
                    ui.label(secondary_text("Preview unavailable"));
                }
                (None, _) => {
                    ui.label(secondary_text("No X-ray selected").size(16.0));
                }
            }
            if let Some(selection) = selection {
                ui.label(secondary_text(selection.path().display().to_string()).small());
            }
            ui.add_space(8.0);

            let pick_label = if selection.is_some() {
                "Change Image"
            } else {
                "Select X-ray Image"
            };
            if ui.button(pick_label).clicked() {
                action = Some(PickerAction::Pick);
            }
            if selection.is_some() && ui.button("Remove Image").clicked() {
                action = Some(PickerAction::Clear);
            }
        });
    });
    action
}
