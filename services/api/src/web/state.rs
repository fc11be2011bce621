//! services/api/src/web/state.rs
//!
//! Defines the application's shared state, including the single wizard session.

use crate::config::Config;
use content_studio_core::{ContentGenerator, Workflow};
use std::sync::Arc;
use tokio::sync::Mutex;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: ContentGenerator,
    /// The one wizard session this service drives. Only handlers and the
    /// generation task mutate it, always under this lock.
    pub workflow: Mutex<Workflow>,
}

impl AppState {
    pub fn new(config: Arc<Config>, generator: ContentGenerator) -> Self {
        Self {
            config,
            generator,
            workflow: Mutex::new(Workflow::new()),
        }
    }
}
