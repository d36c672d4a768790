pub mod adapters;
pub mod commands;
pub mod models;
pub mod services;
pub mod utils;

pub use adapters::{HttpBackend, ResearchBackend};
pub use models::AppSettings;
pub use services::{QueryHandle, QueryOrchestrator, QuerySnapshot};
pub use utils::http::FetchError;
