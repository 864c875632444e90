use clap::{Parser, Subcommand};
use trezo_client::dashboard::DateWindow;

pub fn parse_window(value: &str) -> Result<DateWindow, String> {
    DateWindow::from_selector(value)
        .ok_or_else(|| "window must be one of: all, 7d, 1m, 3m, 6m, 1y".to_string())
}

/// Extended help shown after `trezo upload --help`.
pub const UPLOAD_AFTER_HELP: &str = "\
How upload works:
  Statements are sent to the service exactly as selected; all PDF parsing
  happens server-side. Files in one invocation form a batch: every file is
  queued immediately, then processed one at a time in the order given.

  Each file settles independently. A rejected or unreadable statement does
  not stop the rest of the batch, and every accepted file refreshes your
  transaction data right away, so `trezo summary` reflects partial progress.

What to do next:
  1. Run `trezo summary` to see the refreshed totals and income series.
  2. Rerun `trezo upload <path>` for any statement that settled with an
     error once the file is fixed.
";

#[derive(Debug, Parser)]
#[command(
    name = "trezo",
    version,
    about = "bank statement dashboard client",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in to the statement service and store the session locally
    Login {
        /// Account username
        username: String,
        /// Password (prompted interactively when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Sign out and remove the stored session
    Logout {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show the currently stored session
    Whoami {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Fetch transactions and show balance, totals, and the income series
    Summary {
        /// Date window: all, 7d, 1m, 3m, 6m, or 1y
        #[arg(long, value_parser = parse_window, default_value = "all")]
        window: DateWindow,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Upload statement PDFs for server-side processing
    #[command(after_long_help = UPLOAD_AFTER_HELP)]
    Upload {
        /// Statement files to upload, processed in the order given
        #[arg(required = true)]
        paths: Vec<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Remove every transaction imported from one statement file
    Delete {
        /// The statement filename shown in the transaction list
        filename: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Change the password of the signed-in account
    ChangePassword {
        /// New password (prompted interactively when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

pub fn parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
