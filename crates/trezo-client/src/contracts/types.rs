use serde::{Deserialize, Serialize};

/// Wire name is `type`; values other than credit/debit are carried as
/// `Unknown` so a server-side addition never breaks deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Credit,
    Debit,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub date_iso: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub partner: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub ref_number: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// `GET /transactions` body. A missing `transactions` field means
/// "no update", so it stays an `Option` instead of defaulting to empty.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsPage {
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    pub balance: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub added: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub day: String,
    pub income: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewData {
    pub balance: f64,
    pub window: String,
    pub transaction_count: usize,
    pub filtered_count: usize,
    pub totals: Totals,
    pub series: Vec<ChartPoint>,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadTaskRow {
    pub id: String,
    pub file_name: String,
    pub status: String,
    pub added: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadRunData {
    pub message: String,
    pub submitted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub tasks: Vec<UploadTaskRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionData {
    pub username: String,
    pub role: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteData {
    pub filename: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChangeData {
    pub message: String,
}
