use clap::Parser;
use client_core::SubmitOutcome;

use super::{exit_status, Cli, Command};

#[test]
fn exit_status_distinguishes_outcomes() {
    assert_eq!(exit_status(SubmitOutcome::Succeeded), 0);
    assert_eq!(exit_status(SubmitOutcome::Failed), 1);
    assert_eq!(exit_status(SubmitOutcome::Busy), 1);
    assert_eq!(exit_status(SubmitOutcome::Invalid), 2);
    assert_eq!(exit_status(SubmitOutcome::Cancelled), 130);
}

#[test]
fn server_url_flag_is_parsed_ahead_of_screen_values() {
    let cli = Cli::try_parse_from([
        "vitalis",
        "--server-url",
        "http://10.0.0.5:8080",
        "diabetes",
        "140",
        "72",
    ])
    .expect("parse");

    assert_eq!(cli.server_url.as_deref(), Some("http://10.0.0.5:8080"));
    match cli.command {
        Command::Diabetes { values } => assert_eq!(values, ["140", "72"]),
        other => panic!("unexpected command {other:?}"),
    }
}
