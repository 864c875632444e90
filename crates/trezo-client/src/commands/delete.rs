use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::DeleteData;
use crate::error::{ClientError, ClientResult};

use super::build_controller;

pub async fn run(filename: &str) -> ClientResult<SuccessEnvelope> {
    if filename.trim().is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "A statement filename is required.",
            "delete",
        ));
    }

    let mut dashboard = build_controller()?;
    dashboard.delete_statement(filename).await?;

    success(
        "delete",
        DeleteData {
            filename: filename.to_string(),
            message: "Statement removed; transaction data was refreshed.".to_string(),
        },
    )
}
