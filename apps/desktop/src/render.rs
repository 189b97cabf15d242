//! Terminal rendering of screens, result cards and alerts.

use client_core::{
    screen::{ScreenInputKind, ScreenSpec, DISCLAIMER, SCREENS},
    AlertState, ConfidenceScore, PredictionResult,
};
use shared::{
    domain::AlertKind,
    theme::{Rgb, Tone, THEME},
};

const BAR_WIDTH: usize = 24;

fn paint(text: &str, color: Rgb, enabled: bool) -> String {
    if enabled {
        format!("\x1b[38;2;{};{};{}m{text}\x1b[0m", color.r, color.g, color.b)
    } else {
        text.to_string()
    }
}

fn bold(text: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[1m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

pub fn render_screens(color: bool) -> String {
    let mut out = String::new();
    for spec in SCREENS {
        out.push_str(&format!(
            "{} ({})\n  {}\n",
            paint(&bold(spec.title, color), spec.accent, color),
            spec.kind.as_str().replace('_', "-"),
            spec.description
        ));
        match spec.input {
            ScreenInputKind::Numeric { labels, .. } => {
                for (index, label) in labels.iter().enumerate() {
                    out.push_str(&format!("  {:>2}. {label}\n", index + 1));
                }
            }
            ScreenInputKind::Image => out.push_str("  --image <PATH>  chest X-ray image\n"),
        }
    }
    out
}

pub fn render_header(spec: &ScreenSpec, color: bool) -> String {
    format!(
        "{}\n{}",
        paint(&bold(spec.header_title, color), THEME.primary, color),
        paint(spec.subtitle, THEME.text_secondary, color)
    )
}

fn render_bar(score: &ConfidenceScore) -> String {
    let filled = (score.fill_fraction() * BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn render_result(spec: &ScreenSpec, result: &PredictionResult, color: bool) -> String {
    let tone = THEME.tone(result.tone);
    let mut out = format!(
        "\n{}\n{}\n\n",
        bold(spec.result_title, color),
        paint(&bold(&result.message, color), tone, color)
    );
    for score in &result.scores {
        let score_color = THEME.tone(score.tone);
        out.push_str(&format!(
            "{:<28}{:>7}\n{}\n",
            score.label,
            paint(&score.percent_text(), score_color, color),
            paint(&render_bar(score), score_color, color)
        ));
    }
    out.push_str(&format!("\n{}\n", paint(DISCLAIMER, THEME.primary, color)));
    out
}

pub fn render_alert(alert: &AlertState, color: bool) -> String {
    let tone = match alert.kind {
        AlertKind::Error => Tone::Danger,
        AlertKind::Success => Tone::Success,
    };
    format!(
        "{}: {}\n",
        paint(&bold(&alert.title, color), THEME.tone(tone), color),
        alert.message
    )
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
