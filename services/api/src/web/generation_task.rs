//! services/api/src/web/generation_task.rs
//!
//! This module contains the asynchronous "worker" function that produces one
//! draft for the wizard session.

use crate::web::state::AppState;
use content_studio_core::GenerationRequest;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Runs a generation request in the background.
pub fn spawn_generation(app_state: Arc<AppState>, request: GenerationRequest) -> JoinHandle<bool> {
    tokio::spawn(generation_process(app_state, request))
}

/// Generates the draft for `request` and stores it in the session.
///
/// The session lock is not held while the backend works, so the client can
/// keep polling. Returns whether the draft was stored; a request superseded
/// by a restart is dropped.
pub async fn generation_process(app_state: Arc<AppState>, request: GenerationRequest) -> bool {
    let start_time = Instant::now();
    info!(
        ticket = request.ticket,
        step = request.step,
        platform = %request.platform,
        tone = %request.tone,
        "Generation process started."
    );

    let draft = app_state
        .generator
        .generate(&request.core_message, request.platform, request.tone)
        .await;
    info!("⏱️ Generation took: {:?}", start_time.elapsed());

    let stored = app_state
        .workflow
        .lock()
        .await
        .complete_generation(request.ticket, draft);
    if !stored {
        warn!(ticket = request.ticket, "Draft arrived after the session moved on.");
    }
    stored
}
