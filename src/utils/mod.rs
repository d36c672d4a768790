pub mod authors;
pub mod http;
pub mod logging;
pub mod markdown;
pub mod typography;
