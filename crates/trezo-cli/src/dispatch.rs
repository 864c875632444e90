use std::io::{BufRead, Write};

use trezo_client::commands;
use trezo_client::{ClientError, ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub async fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Login {
            username, password, ..
        } => {
            let password = match password {
                Some(value) => value.clone(),
                None => prompt_password("Password: ")?,
            };
            commands::session::login(username, &password).await
        }
        Commands::Logout { .. } => commands::session::logout().await,
        Commands::Whoami { .. } => commands::session::whoami(),
        Commands::Summary { window, .. } => commands::overview::run(*window).await,
        Commands::Upload { paths, .. } => commands::upload::run(paths).await,
        Commands::Delete { filename, yes, .. } => {
            if !yes && !confirm_delete(filename)? {
                return Err(delete_cancelled(filename));
            }
            commands::delete::run(filename).await
        }
        Commands::ChangePassword { password, .. } => {
            let password = match password {
                Some(value) => value.clone(),
                None => prompt_new_password()?,
            };
            commands::session::change_password(&password).await
        }
    }
}

fn prompt_password(label: &str) -> ClientResult<String> {
    rpassword::prompt_password(label)
        .map_err(|error| ClientError::invalid_argument(&format!("Could not read input: {error}")))
}

fn prompt_new_password() -> ClientResult<String> {
    let first = prompt_password("New password: ")?;
    let second = prompt_password("Repeat new password: ")?;
    if first != second {
        return Err(ClientError::invalid_argument_for_command(
            "The two password entries did not match.",
            "change-password",
        ));
    }
    Ok(first)
}

/// Deletion is destructive on the server side, so it asks before any
/// network call unless `--yes` was given.
fn confirm_delete(filename: &str) -> ClientResult<bool> {
    let mut stdout = std::io::stdout();
    write!(
        stdout,
        "Remove every transaction imported from `{filename}`? [y/N] "
    )
    .and_then(|()| stdout.flush())
    .map_err(|error| ClientError::invalid_argument(&format!("Could not prompt: {error}")))?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|error| ClientError::invalid_argument(&format!("Could not read input: {error}")))?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn delete_cancelled(filename: &str) -> ClientError {
    ClientError::new(
        "delete_cancelled",
        &format!("Deletion of `{filename}` was cancelled; nothing was removed."),
        vec![format!(
            "Rerun `trezo delete {filename} --yes` to skip the prompt."
        )],
    )
}
