use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
        }
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::new(
            "invalid_argument",
            message,
            vec!["Run `trezo --help` for usage.".to_string()],
        )
    }

    pub fn invalid_argument_for_command(message: &str, command: &str) -> Self {
        Self::new(
            "invalid_argument",
            message,
            vec![format!("Run `trezo {command} --help` for usage.")],
        )
    }

    pub fn transport_failed(endpoint: &str, detail: &str) -> Self {
        Self::new(
            "transport_failed",
            &format!("Request to `{endpoint}` failed: {detail}"),
            vec![
                "Check that the statement service is reachable.".to_string(),
                "Verify `TREZO_API_URL` points at the right host.".to_string(),
            ],
        )
    }

    pub fn invalid_response(endpoint: &str, detail: &str) -> Self {
        Self::new(
            "invalid_response",
            &format!("Response from `{endpoint}` could not be read: {detail}"),
            vec!["Retry the command; if this persists the service is misbehaving.".to_string()],
        )
    }

    pub fn auth_required() -> Self {
        Self::new(
            "auth_required",
            "Your session is no longer valid. Stored credentials were discarded.",
            vec!["Run `trezo login <username>` to sign in again.".to_string()],
        )
    }

    pub fn invalid_credentials(detail: &str) -> Self {
        Self::new(
            "invalid_credentials",
            detail,
            vec!["Check the username and password, then retry `trezo login`.".to_string()],
        )
    }

    pub fn upload_rejected(file_name: &str) -> Self {
        Self::new(
            "upload_rejected",
            &format!("The service did not accept `{file_name}`."),
            vec![
                "Confirm the file is a bank statement PDF.".to_string(),
                "Resubmit with `trezo upload <path>` once fixed.".to_string(),
            ],
        )
    }

    pub fn password_change_rejected() -> Self {
        Self::new(
            "password_change_rejected",
            "The service did not accept the new password.",
            vec!["Retry `trezo change-password` with a different value.".to_string()],
        )
    }

    pub fn session_missing() -> Self {
        Self::new(
            "session_missing",
            "No stored session was found.",
            vec!["Run `trezo login <username>` first.".to_string()],
        )
    }

    pub fn session_store_failed(detail: &str) -> Self {
        Self::new(
            "session_store_failed",
            &format!("Could not read or write the session file: {detail}"),
            vec![
                "Check permissions on the session home directory.".to_string(),
                "Set `TREZO_HOME` to a writable directory if needed.".to_string(),
            ],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
