use eframe::egui::{self, Color32};
use shared::theme::{Rgb, Tone, THEME};

pub fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

pub fn tone_color(tone: Tone) -> Color32 {
    color(THEME.tone(tone))
}

pub fn tone_surface(tone: Tone) -> Color32 {
    color(THEME.tone_surface(tone))
}

/// Light visuals recoloured with the app palette.
pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = color(THEME.background);
    visuals.window_fill = color(THEME.surface);
    visuals.extreme_bg_color = color(THEME.surface);
    visuals.override_text_color = Some(color(THEME.text));
    visuals.selection.bg_fill = color(THEME.primary);
    visuals.hyperlink_color = color(THEME.primary);
    ctx.set_visuals(visuals);
}
