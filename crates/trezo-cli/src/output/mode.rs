use crate::cli::Commands;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Login { json, .. }
        | Commands::Logout { json, .. }
        | Commands::Whoami { json, .. }
        | Commands::Summary { json, .. }
        | Commands::Upload { json, .. }
        | Commands::Delete { json, .. }
        | Commands::ChangePassword { json, .. } => *json,
    };

    if json { OutputMode::Json } else { OutputMode::Text }
}
