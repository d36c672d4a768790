//! Services module for business logic
//!
//! This module contains the citation and statistics pipeline and the
//! orchestrator that coordinates the adapters for each query.

pub mod citation_mapper;
pub mod publication_aggregator;
pub mod query_orchestrator;

pub use citation_mapper::CitationList;
pub use publication_aggregator::analyze;
pub use query_orchestrator::{QueryErrors, QueryHandle, QueryKey, QueryOrchestrator, QuerySnapshot};
