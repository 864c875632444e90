mod action_text;
mod error_text;
mod format;
mod json;
mod mode;
mod summary_text;
mod upload_text;

use std::io;

use trezo_client::{ClientError, SuccessEnvelope};

pub use mode::{OutputMode, mode_for_command};

use crate::stdout_io::write_stdout_line;

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "login" | "logout" | "whoami" => {
            action_text::render_session(&success.command, &success.data)
        }
        "change-password" => action_text::render_password_change(&success.data),
        "delete" => action_text::render_delete(&success.data),
        "summary" => summary_text::render_summary(&success.data),
        "upload" => upload_text::render_upload_run(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
