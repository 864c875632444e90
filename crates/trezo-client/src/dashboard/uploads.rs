use ulid::Ulid;

use crate::api::StatementFile;
use crate::contracts::types::UploadTaskRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Pending,
    Processing,
    Success,
    Error,
}

impl UploadStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

#[derive(Debug, Clone)]
pub struct UploadTask {
    pub id: String,
    pub file: StatementFile,
    pub status: UploadStatus,
    pub added_count: i64,
}

/// Ordered task history, newest batch first. Tasks are never removed; a
/// settled task stays visible for the life of the queue.
#[derive(Debug, Default)]
pub struct UploadQueue {
    tasks: Vec<UploadTask>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The whole batch becomes visible as `pending` at once, prepended to
    /// the existing history with its submission order intact. Returns the
    /// new task ids in submission order.
    pub fn enqueue(&mut self, files: Vec<StatementFile>) -> Vec<String> {
        let mut batch: Vec<UploadTask> = files
            .into_iter()
            .map(|file| UploadTask {
                id: format!("task_{}", Ulid::new()),
                file,
                status: UploadStatus::Pending,
                added_count: 0,
            })
            .collect();
        let ids: Vec<String> = batch.iter().map(|task| task.id.clone()).collect();

        batch.append(&mut self.tasks);
        self.tasks = batch;
        ids
    }

    pub fn tasks(&self) -> &[UploadTask] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&UploadTask> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn mark_processing(&mut self, id: &str) -> bool {
        self.transition(id, UploadStatus::Pending, UploadStatus::Processing, 0)
    }

    pub fn settle_success(&mut self, id: &str, added_count: i64) -> bool {
        self.transition(
            id,
            UploadStatus::Processing,
            UploadStatus::Success,
            added_count,
        )
    }

    pub fn settle_error(&mut self, id: &str) -> bool {
        self.transition(id, UploadStatus::Processing, UploadStatus::Error, 0)
    }

    /// Terminal states are frozen: a transition whose precondition does not
    /// hold is refused rather than applied.
    fn transition(
        &mut self,
        id: &str,
        expected: UploadStatus,
        next: UploadStatus,
        added_count: i64,
    ) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            log::warn!("upload task {id} is not in the queue");
            return false;
        };
        if task.status != expected {
            log::warn!(
                "refusing {} -> {} for task {id} (currently {})",
                expected.as_str(),
                next.as_str(),
                task.status.as_str()
            );
            return false;
        }

        task.status = next;
        if next == UploadStatus::Success {
            task.added_count = added_count;
        }
        true
    }

    pub fn rows(&self) -> Vec<UploadTaskRow> {
        self.tasks.iter().map(task_row).collect()
    }

    /// Rows for one batch, in the order the ids were handed out.
    pub fn rows_for(&self, ids: &[String]) -> Vec<UploadTaskRow> {
        ids.iter()
            .filter_map(|id| self.task(id))
            .map(task_row)
            .collect()
    }
}

fn task_row(task: &UploadTask) -> UploadTaskRow {
    UploadTaskRow {
        id: task.id.clone(),
        file_name: task.file.name.clone(),
        status: task.status.as_str().to_string(),
        added: task.added_count,
    }
}
