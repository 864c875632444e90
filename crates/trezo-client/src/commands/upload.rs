use std::path::Path;

use crate::api::StatementFile;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::UploadRunData;
use crate::error::{ClientError, ClientResult};

use super::build_controller;

pub async fn run(paths: &[String]) -> ClientResult<SuccessEnvelope> {
    if paths.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "At least one statement file is required.",
            "upload",
        ));
    }

    let files = read_statement_files(paths)?;
    let mut dashboard = build_controller()?;
    let outcome = dashboard.upload_statements(files).await?;
    let tasks = dashboard.upload_rows_for(&outcome.task_ids);

    let message = if outcome.failed == 0 {
        "All statements were processed.".to_string()
    } else {
        format!(
            "{} of {} statements failed; fix and resubmit them.",
            outcome.failed,
            tasks.len()
        )
    };

    success(
        "upload",
        UploadRunData {
            message,
            submitted: tasks.len(),
            succeeded: outcome.succeeded,
            failed: outcome.failed,
            tasks,
        },
    )
}

/// Unreadable paths fail the whole command before anything is enqueued, so
/// a batch never starts with files that cannot be sent.
fn read_statement_files(paths: &[String]) -> ClientResult<Vec<StatementFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = std::fs::read(path).map_err(|error| {
            ClientError::invalid_argument_for_command(
                &format!("Could not read `{path}`: {error}"),
                "upload",
            )
        })?;
        let name = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        files.push(StatementFile { name, bytes });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::read_statement_files;

    #[test]
    fn file_names_are_stripped_to_their_basename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extras_martie.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let files = read_statement_files(&[path.display().to_string()]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "extras_martie.pdf");
        assert_eq!(files[0].bytes, b"%PDF");
    }

    #[test]
    fn missing_path_is_rejected_with_command_guidance() {
        let error = read_statement_files(&["does-not-exist.pdf".to_string()]).unwrap_err();
        assert_eq!(error.code, "invalid_argument");
        assert!(error.message.contains("does-not-exist.pdf"));
    }
}
