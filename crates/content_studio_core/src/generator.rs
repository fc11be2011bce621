//! crates/content_studio_core/src/generator.rs
//!
//! The boundary between the workflow and the generation backend. Backend
//! failures never cross it: they are logged and turned into a fixed apology
//! draft that the user can retry like any other draft.

use std::sync::Arc;
use tracing::{error, warn};

use crate::domain::{Platform, Tone};
use crate::ports::ContentGenerationService;

/// Draft text produced whenever the backend fails.
pub const FALLBACK_DRAFT: &str =
    "Sorry, I encountered an error while generating the content. Please try again.";

#[derive(Clone)]
pub struct ContentGenerator {
    service: Arc<dyn ContentGenerationService>,
}

impl ContentGenerator {
    pub fn new(service: Arc<dyn ContentGenerationService>) -> Self {
        Self { service }
    }

    /// Generates a draft. Always returns text, falling back to [`FALLBACK_DRAFT`].
    pub async fn generate(&self, core_message: &str, platform: Platform, tone: Tone) -> String {
        match self
            .service
            .generate_content(core_message, platform, tone)
            .await
        {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!(%platform, %tone, "Generation backend returned an empty draft.");
                FALLBACK_DRAFT.to_string()
            }
            Err(e) => {
                error!(%platform, %tone, "Error generating content: {:?}", e);
                FALLBACK_DRAFT.to_string()
            }
        }
    }
}
