use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::contracts::types::{LoginResponse, TransactionsPage, UploadReceipt};
use crate::{ClientError, ClientResult};

use super::{ApiClient, StatementFile};

#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> ClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|error| ClientError::transport_failed(endpoint, &error.to_string()))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            log::warn!("received 401 from {endpoint}");
            return Err(ClientError::auth_required());
        }
        Ok(response)
    }
}

#[async_trait]
impl ApiClient for HttpApi {
    async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let endpoint = self.endpoint("/login");
        let response = self
            .http
            .post(&endpoint)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|error| ClientError::transport_failed(&endpoint, &error.to_string()))?;

        // A 401 here means the credentials were wrong, not that a session
        // expired, so it is not routed through the global auth path.
        if !response.status().is_success() {
            let detail = match response.json::<StatusBody>().await {
                Ok(body) if !body.message.is_empty() => body.message,
                _ => "Login was rejected.".to_string(),
            };
            return Err(ClientError::invalid_credentials(&detail));
        }

        response
            .json::<LoginResponse>()
            .await
            .map_err(|error| ClientError::invalid_response(&endpoint, &error.to_string()))
    }

    async fn logout(&self, token: &str) -> ClientResult<()> {
        let endpoint = self.endpoint("/logout");
        let request = self.http.post(&endpoint).bearer_auth(token);
        self.send(request, &endpoint).await?;
        Ok(())
    }

    async fn fetch_transactions(&self, token: &str) -> ClientResult<TransactionsPage> {
        let endpoint = self.endpoint("/transactions");
        let request = self.http.get(&endpoint).bearer_auth(token);
        let response = self.send(request, &endpoint).await?;

        response
            .json::<TransactionsPage>()
            .await
            .map_err(|error| ClientError::invalid_response(&endpoint, &error.to_string()))
    }

    async fn upload_statement(
        &self,
        token: &str,
        file: &StatementFile,
    ) -> ClientResult<UploadReceipt> {
        let endpoint = self.endpoint("/upload");
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part("file", part);
        let request = self.http.post(&endpoint).bearer_auth(token).multipart(form);
        let response = self.send(request, &endpoint).await?;

        let receipt = response
            .json::<UploadReceipt>()
            .await
            .map_err(|error| ClientError::invalid_response(&endpoint, &error.to_string()))?;

        if receipt.status != "success" {
            return Err(ClientError::upload_rejected(&file.name));
        }
        Ok(receipt)
    }

    async fn delete_statement(&self, token: &str, filename: &str) -> ClientResult<()> {
        let endpoint = self.endpoint("/delete-file");
        let request = self
            .http
            .post(&endpoint)
            .bearer_auth(token)
            .json(&json!({ "filename": filename }));

        // The refresh that follows is the source of truth; the body of the
        // acknowledgement is not inspected.
        self.send(request, &endpoint).await?;
        Ok(())
    }

    async fn change_password(&self, token: &str, new_password: &str) -> ClientResult<()> {
        let endpoint = self.endpoint("/change-password");
        let request = self
            .http
            .post(&endpoint)
            .bearer_auth(token)
            .json(&json!({ "new_password": new_password }));
        let response = self.send(request, &endpoint).await?;

        let body = response
            .json::<StatusBody>()
            .await
            .map_err(|error| ClientError::invalid_response(&endpoint, &error.to_string()))?;
        if body.status != "success" {
            return Err(ClientError::password_change_rejected());
        }
        Ok(())
    }
}
