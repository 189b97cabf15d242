use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::load_settings,
    screen, FormController, PredictionClient, ScreenLifecycle, SubmitOutcome,
};
use shared::domain::PredictionKind;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "vitalis", about = "Health prediction forms backed by a remote model service")]
struct Cli {
    /// Base URL of the prediction service; overrides vitalis.toml and the environment.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the prediction screens and their fields.
    Screens,
    /// Breast cancer prediction from ten tumor measurements.
    BreastCancer {
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Heart disease prediction from ten cardiac measurements.
    HeartDisease {
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Diabetes prediction from seven health metrics.
    Diabetes {
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Pneumonia analysis of a chest X-ray image.
    Pneumonia {
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

enum ScreenInput {
    Values(Vec<String>),
    Image(Option<PathBuf>),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings =
        load_settings(cli.server_url.as_deref()).context("failed to load settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let color = !cli.no_color && io::stdout().is_terminal();
    let (kind, input) = match cli.command {
        Command::Screens => {
            print!("{}", render::render_screens(color));
            return Ok(ExitCode::SUCCESS);
        }
        Command::BreastCancer { values } => (PredictionKind::BreastCancer, ScreenInput::Values(values)),
        Command::HeartDisease { values } => (PredictionKind::HeartDisease, ScreenInput::Values(values)),
        Command::Diabetes { values } => (PredictionKind::Diabetes, ScreenInput::Values(values)),
        Command::Pneumonia { image } => (PredictionKind::Pneumonia, ScreenInput::Image(image)),
    };

    let spec = screen::screen(kind);
    let mut controller = FormController::new(spec);
    match input {
        ScreenInput::Values(values) => {
            let expected = spec.labels().len();
            if values.len() > expected {
                warn!(kind = %kind, expected, given = values.len(), "ignoring extra values");
            }
            for (index, value) in values.iter().take(expected).enumerate() {
                controller.set_field(index, value);
            }
        }
        ScreenInput::Image(Some(path)) => {
            controller.select_image(path);
        }
        ScreenInput::Image(None) => {}
    }

    let client = PredictionClient::new(settings.server_url.clone());
    let lifecycle = ScreenLifecycle::new();
    let cancel = lifecycle.token();
    let interrupt = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received; cancelling prediction");
                lifecycle.cancel();
            }
            Err(err) => {
                warn!("failed to listen for interrupt: {err}");
                std::future::pending::<()>().await;
            }
        }
    });

    eprintln!("{}", render::render_header(spec, color));
    let outcome = controller.submit(&client, &cancel).await;
    interrupt.abort();

    if let Some(result) = controller.result() {
        print!("{}", render::render_result(spec, result, color));
    }
    if controller.alert().visible {
        eprint!("{}", render::render_alert(controller.alert(), color));
    }

    Ok(ExitCode::from(exit_status(outcome)))
}

/// 0 on success, 1 when the service failed, 2 for an incomplete form and 130
/// when interrupted.
fn exit_status(outcome: SubmitOutcome) -> u8 {
    match outcome {
        SubmitOutcome::Succeeded => 0,
        SubmitOutcome::Failed | SubmitOutcome::Busy => 1,
        SubmitOutcome::Invalid => 2,
        SubmitOutcome::Cancelled => 130,
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
