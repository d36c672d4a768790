//! Entry points used by front-ends
//!
//! - results: display-ready views of the current query snapshot
//! - settings: persisted application settings

pub mod results;
pub mod settings;
