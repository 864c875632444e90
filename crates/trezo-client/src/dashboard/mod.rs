pub mod aggregate;
pub mod controller;
pub mod uploads;
pub mod window;

pub use controller::DashboardController;
pub use uploads::{UploadQueue, UploadStatus, UploadTask};
pub use window::DateWindow;
