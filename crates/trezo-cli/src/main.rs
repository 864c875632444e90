mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use stdout_io::write_stdout_text;
use trezo_client::ClientError;

const ROOT_HELP: &str = "Trezo - bank statement dashboard client

Usage:
  trezo <command>

Start here:
  trezo login <username>
  trezo upload <statement.pdf>
  trezo summary
";

const TOP_LEVEL_HELP: &str = "Trezo — bank statement dashboard client

USAGE: trezo <command>

Sign in first:
  trezo login <username>                 Store a session for the statement service
  trezo whoami                           Show the stored session
  trezo logout                           Sign out and remove the stored session

Work with your statements:
  trezo upload <statement.pdf>...        Upload statement PDFs, processed in order
  trezo summary [--window 7d]            Balance, totals, and daily income series
  trezo delete <filename>                Remove everything imported from one statement

Account:
  trezo change-password                  Change the password of the signed-in account

The service address comes from TREZO_API_URL (default http://127.0.0.1:5001);
the session file lives under TREZO_HOME (default ~/.trezo).
Run `trezo <command> --help` for command usage.
";

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let body = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&body).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }

            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error = match command_hint_from_args(&raw_args) {
                Some(command) => ClientError::invalid_argument_for_command(&clean_message, command),
                None => ClientError::invalid_argument(&clean_message),
            };
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            let internal = ClientError::new(
                "internal_runtime_error",
                &format!("Could not start the async runtime: {error}"),
                Vec::new(),
            );
            let _ = output::print_failure(&internal, mode);
            return Err(ExitCode::from(2));
        }
    };

    let dispatched = runtime.block_on(dispatch::dispatch(&cli));
    match dispatched {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information"
/// hint) so the error contract's recovery steps are the single source of
/// guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_hint_from_args(raw_args: &[String]) -> Option<&'static str> {
    let first_word = raw_args
        .iter()
        .skip(1)
        .find(|value| !value.starts_with('-'))?;

    match first_word.as_str() {
        "login" => Some("login"),
        "logout" => Some("logout"),
        "whoami" => Some("whoami"),
        "summary" => Some("summary"),
        "upload" => Some("upload"),
        "delete" => Some("delete"),
        "change-password" => Some("change-password"),
        _ => None,
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_") || error.code == "session_store_failed"
}
