use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::dashboard::DateWindow;
use crate::error::ClientResult;

use super::build_controller;

pub async fn run(window: DateWindow) -> ClientResult<SuccessEnvelope> {
    let mut dashboard = build_controller()?;
    dashboard.set_window(window);
    dashboard.refresh().await?;

    success("summary", dashboard.overview())
}
