//! crates/content_studio_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete text generation backend.

use async_trait::async_trait;

use crate::domain::{Platform, Tone};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, quota).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait ContentGenerationService: Send + Sync {
    /// Generates a post for `platform` in `tone` that contains `core_message` verbatim.
    async fn generate_content(
        &self,
        core_message: &str,
        platform: Platform,
        tone: Tone,
    ) -> PortResult<String>;
}
