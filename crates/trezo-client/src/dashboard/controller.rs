use chrono::NaiveDate;

use crate::api::{ApiClient, StatementFile};
use crate::contracts::types::{OverviewData, Transaction, UploadTaskRow};
use crate::session::{SessionState, SessionStore};
use crate::{ClientError, ClientResult};

use super::aggregate::{chart_series, totals};
use super::uploads::UploadQueue;
use super::window::{DateWindow, filter_by_window};

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub task_ids: Vec<String>,
    pub succeeded: usize,
    pub failed: usize,
}

/// Composition root of the pipeline. Owns the raw transaction collection,
/// the balance, the selected window, the upload queue, and the session;
/// everything else only reads derived snapshots.
pub struct DashboardController {
    api: Box<dyn ApiClient>,
    sessions: SessionStore,
    session: Option<SessionState>,
    transactions: Vec<Transaction>,
    balance: f64,
    window: DateWindow,
    uploads: UploadQueue,
    today: fn() -> NaiveDate,
}

impl DashboardController {
    /// Loads any persisted session at startup.
    pub fn new(api: Box<dyn ApiClient>, sessions: SessionStore) -> ClientResult<Self> {
        let session = sessions.load()?;
        Ok(Self {
            api,
            sessions,
            session,
            transactions: Vec::new(),
            balance: 0.0,
            window: DateWindow::All,
            uploads: UploadQueue::new(),
            today: today_local,
        })
    }

    /// Replaces the wall-clock date source, for deterministic window tests.
    pub fn with_today_source(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn set_window(&mut self, window: DateWindow) {
        self.window = window;
    }

    fn token(&self) -> ClientResult<String> {
        self.session
            .as_ref()
            .map(|state| state.token.clone())
            .ok_or_else(ClientError::session_missing)
    }

    /// The single place a 401 is absorbed: cached credentials are discarded
    /// before the error continues to the caller.
    fn absorb_auth_failure(&mut self, error: ClientError) -> ClientError {
        if error.code == "auth_required" {
            self.session = None;
            if let Err(store_error) = self.sessions.clear() {
                log::warn!("could not clear session after 401: {store_error}");
            }
        }
        error
    }

    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<SessionState> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::invalid_argument_for_command(
                "Username and password are both required.",
                "login",
            ));
        }

        let response = self.api.login(username, password).await?;
        let state = SessionState {
            token: response.token,
            username: response.username,
            role: response.role,
        };
        self.sessions.save(&state)?;
        self.session = Some(state.clone());
        Ok(state)
    }

    /// The remote call is best-effort; local credentials are removed either
    /// way so a dead service cannot keep a session alive.
    pub async fn logout(&mut self) -> ClientResult<()> {
        if let Some(state) = self.session.take() {
            if let Err(error) = self.api.logout(&state.token).await {
                log::debug!("logout call failed, clearing local session anyway: {error}");
            }
        }
        self.sessions.clear()
    }

    pub async fn change_password(&mut self, new_password: &str) -> ClientResult<()> {
        if new_password.trim().is_empty() {
            return Err(ClientError::invalid_argument_for_command(
                "The new password must not be empty.",
                "change-password",
            ));
        }

        let token = self.token()?;
        let result = self.api.change_password(&token, new_password).await;
        result.map_err(|error| self.absorb_auth_failure(error))
    }

    /// Re-fetches the authoritative collection. A response without the
    /// `transactions` field is "no update": prior state stays visible.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let token = self.token()?;
        let fetched = self.api.fetch_transactions(&token).await;
        let page = match fetched {
            Ok(page) => page,
            Err(error) => return Err(self.absorb_auth_failure(error)),
        };

        if let Some(transactions) = page.transactions {
            self.transactions = transactions;
            self.balance = page.balance;
        }
        Ok(())
    }

    /// Pure derivation from the owned collection and the selected window.
    pub fn overview(&self) -> OverviewData {
        let filtered = filter_by_window(&self.transactions, self.window, (self.today)());
        OverviewData {
            balance: self.balance,
            window: self.window.as_str().to_string(),
            transaction_count: self.transactions.len(),
            filtered_count: filtered.len(),
            totals: totals(&filtered),
            series: chart_series(&filtered),
            transactions: filtered,
        }
    }

    pub fn upload_tasks(&self) -> Vec<UploadTaskRow> {
        self.uploads.rows()
    }

    pub fn upload_rows_for(&self, ids: &[String]) -> Vec<UploadTaskRow> {
        self.uploads.rows_for(ids)
    }

    /// Enqueues the batch, then runs it one task at a time in submission
    /// order. Each success triggers an immediate refresh so partial
    /// completion is visible right away. A failed task settles to `error`
    /// and its siblings keep going; a 401 aborts the whole batch through
    /// the global auth path instead of falsifying task states.
    pub async fn upload_statements(
        &mut self,
        files: Vec<StatementFile>,
    ) -> ClientResult<BatchOutcome> {
        let token = self.token()?;
        let task_ids = self.uploads.enqueue(files);
        let mut succeeded = 0usize;
        let mut failed = 0usize;

        for id in &task_ids {
            self.uploads.mark_processing(id);
            let Some(file) = self.uploads.task(id).map(|task| task.file.clone()) else {
                continue;
            };

            let uploaded = self.api.upload_statement(&token, &file).await;
            match uploaded {
                Ok(receipt) => {
                    self.uploads.settle_success(id, receipt.added);
                    succeeded += 1;
                    if let Err(error) = self.refresh().await {
                        if error.code == "auth_required" {
                            return Err(error);
                        }
                        log::warn!("refresh after uploading {} failed: {error}", file.name);
                    }
                }
                Err(error) if error.code == "auth_required" => {
                    return Err(self.absorb_auth_failure(error));
                }
                Err(error) => {
                    log::warn!("upload of {} failed: {error}", file.name);
                    self.uploads.settle_error(id);
                    failed += 1;
                }
            }
        }

        Ok(BatchOutcome {
            task_ids,
            succeeded,
            failed,
        })
    }

    /// Deleting a previously imported file is not part of the upload state
    /// machine; it refreshes unconditionally afterwards.
    pub async fn delete_statement(&mut self, filename: &str) -> ClientResult<()> {
        let token = self.token()?;
        let deleted = self.api.delete_statement(&token, filename).await;
        if let Err(error) = deleted {
            return Err(self.absorb_auth_failure(error));
        }
        self.refresh().await
    }
}

fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}
