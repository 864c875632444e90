pub mod delete;
pub mod overview;
pub mod session;
pub mod upload;

use crate::api::HttpApi;
use crate::config::resolve_api_url;
use crate::dashboard::DashboardController;
use crate::error::ClientResult;
use crate::session::SessionStore;

pub(crate) fn build_controller() -> ClientResult<DashboardController> {
    let sessions = SessionStore::open_default()?;
    let api = HttpApi::new(&resolve_api_url(None));
    DashboardController::new(Box::new(api), sessions)
}
