use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{PasswordChangeData, SessionData};
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

use super::build_controller;

pub async fn login(username: &str, password: &str) -> ClientResult<SuccessEnvelope> {
    let mut dashboard = build_controller()?;
    let state = dashboard.login(username, password).await?;

    success(
        "login",
        SessionData {
            username: state.username,
            role: state.role,
            message: "Signed in.".to_string(),
        },
    )
}

pub async fn logout() -> ClientResult<SuccessEnvelope> {
    let mut dashboard = build_controller()?;
    let username = dashboard
        .session()
        .map(|state| state.username.clone())
        .unwrap_or_default();
    dashboard.logout().await?;

    success(
        "logout",
        SessionData {
            username,
            role: String::new(),
            message: "Signed out; stored credentials were removed.".to_string(),
        },
    )
}

pub fn whoami() -> ClientResult<SuccessEnvelope> {
    let sessions = SessionStore::open_default()?;
    let state = sessions.load()?.ok_or_else(ClientError::session_missing)?;

    success(
        "whoami",
        SessionData {
            username: state.username,
            role: state.role,
            message: "A stored session is active.".to_string(),
        },
    )
}

pub async fn change_password(new_password: &str) -> ClientResult<SuccessEnvelope> {
    let mut dashboard = build_controller()?;
    dashboard.change_password(new_password).await?;

    success(
        "change-password",
        PasswordChangeData {
            message: "Password changed.".to_string(),
        },
    )
}
