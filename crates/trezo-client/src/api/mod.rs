pub mod http;

use async_trait::async_trait;

use crate::ClientResult;
use crate::contracts::types::{LoginResponse, TransactionsPage, UploadReceipt};

pub use http::HttpApi;

/// One selected statement file: display name plus the opaque payload the
/// server parses. The client never inspects the bytes.
#[derive(Debug, Clone)]
pub struct StatementFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Remote statement-service endpoints. Every authenticated call maps an
/// HTTP 401 to `auth_required` so the caller can invalidate the session in
/// one place.
#[async_trait]
pub trait ApiClient {
    async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse>;

    async fn logout(&self, token: &str) -> ClientResult<()>;

    async fn fetch_transactions(&self, token: &str) -> ClientResult<TransactionsPage>;

    async fn upload_statement(
        &self,
        token: &str,
        file: &StatementFile,
    ) -> ClientResult<UploadReceipt>;

    async fn delete_statement(&self, token: &str, filename: &str) -> ClientResult<()>;

    async fn change_password(&self, token: &str, new_password: &str) -> ClientResult<()>;
}
