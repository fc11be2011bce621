//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{
    generation_task::spawn_generation,
    protocol::{
        AcceptRequest, JobView, OptionsResponse, ResultView, SessionResponse,
        StartGenerationRequest, UpdateJobRequest,
    },
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, patch, post},
    Router,
};
use chrono::Utc;
use content_studio_core::{
    report::render_report, JobUpdate, Platform, Stage, Tone, WorkflowError,
};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        get_options_handler,
        get_session_handler,
        reset_session_handler,
        add_job_handler,
        update_job_handler,
        remove_job_handler,
        start_generation_handler,
        retry_handler,
        accept_handler,
        export_results_handler,
    ),
    components(
        schemas(
            OptionsResponse,
            SessionResponse,
            JobView,
            ResultView,
            StartGenerationRequest,
            UpdateJobRequest,
            AcceptRequest
        )
    ),
    tags(
        (name = "Content Studio API", description = "Wizard endpoints for turning one core message into platform-specific posts.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router
//=========================================================================================

/// Builds the API router. CORS and documentation routes are layered on by the binary.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/options", get(get_options_handler))
        .route("/session", get(get_session_handler))
        .route("/session/reset", post(reset_session_handler))
        .route("/jobs", post(add_job_handler))
        .route(
            "/jobs/{id}",
            patch(update_job_handler).delete(remove_job_handler),
        )
        .route("/generation", post(start_generation_handler))
        .route("/generation/retry", post(retry_handler))
        .route("/generation/accept", post(accept_handler))
        .route("/results/export", get(export_results_handler))
        .with_state(app_state)
}

type HandlerResult<T> = Result<T, (StatusCode, String)>;

/// Maps a rejected wizard operation onto an HTTP status.
fn rejection(err: WorkflowError) -> (StatusCode, String) {
    let status = match err {
        WorkflowError::UnknownJob(_) => StatusCode::NOT_FOUND,
        WorkflowError::EmptyCoreMessage | WorkflowError::CoreMessageMissing => {
            StatusCode::BAD_REQUEST
        }
        WorkflowError::WrongStage { .. }
        | WorkflowError::LastJob
        | WorkflowError::GenerationInProgress
        | WorkflowError::EmptyDraft => StatusCode::CONFLICT,
    };
    (status, err.to_string())
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List the supported platform and tone labels.
#[utoipa::path(
    get,
    path = "/options",
    responses((status = 200, description = "Supported labels", body = OptionsResponse))
)]
pub async fn get_options_handler() -> Json<OptionsResponse> {
    Json(OptionsResponse::all())
}

/// Read the current wizard session.
#[utoipa::path(
    get,
    path = "/session",
    responses((status = 200, description = "Current session", body = SessionResponse))
)]
pub async fn get_session_handler(State(app_state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let snapshot = app_state.workflow.lock().await.snapshot();
    Json(SessionResponse::from(&snapshot))
}

/// Start over: the initial job only, no core message, no results.
#[utoipa::path(
    post,
    path = "/session/reset",
    responses((status = 200, description = "Session reset", body = SessionResponse))
)]
pub async fn reset_session_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<SessionResponse> {
    let mut workflow = app_state.workflow.lock().await;
    workflow.start_over();
    Json(SessionResponse::from(&workflow.snapshot()))
}

/// Add a LinkedIn Post / Professional job.
#[utoipa::path(
    post,
    path = "/jobs",
    responses(
        (status = 201, description = "Job added", body = SessionResponse),
        (status = 409, description = "Generation has already started")
    )
)]
pub async fn add_job_handler(
    State(app_state): State<Arc<AppState>>,
) -> HandlerResult<impl IntoResponse> {
    let mut workflow = app_state.workflow.lock().await;
    let id = workflow.add_job().map_err(rejection)?;
    info!("Added platform job {}", id);
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::from(&workflow.snapshot())),
    ))
}

/// Change the platform and/or tone of a job.
#[utoipa::path(
    patch,
    path = "/jobs/{id}",
    request_body = UpdateJobRequest,
    params(("id" = Uuid, Path, description = "The job to update.")),
    responses(
        (status = 200, description = "Job updated", body = SessionResponse),
        (status = 400, description = "Unknown label or empty update"),
        (status = 404, description = "No such job"),
        (status = 409, description = "Generation has already started")
    )
)]
pub async fn update_job_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateJobRequest>,
) -> HandlerResult<Json<SessionResponse>> {
    let mut updates = Vec::with_capacity(2);
    if let Some(label) = &body.platform {
        let platform = label
            .parse::<Platform>()
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        updates.push(JobUpdate::Platform(platform));
    }
    if let Some(label) = &body.tone {
        let tone = label
            .parse::<Tone>()
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        updates.push(JobUpdate::Tone(tone));
    }
    if updates.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Provide a platform or a tone to update".to_string(),
        ));
    }

    let mut workflow = app_state.workflow.lock().await;
    for update in updates {
        workflow.update_job(id, update).map_err(rejection)?;
    }
    Ok(Json(SessionResponse::from(&workflow.snapshot())))
}

/// Remove a job. The last remaining job cannot be removed.
#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    params(("id" = Uuid, Path, description = "The job to remove.")),
    responses(
        (status = 200, description = "Job removed", body = SessionResponse),
        (status = 404, description = "No such job"),
        (status = 409, description = "Last job, or generation has already started")
    )
)]
pub async fn remove_job_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<SessionResponse>> {
    let mut workflow = app_state.workflow.lock().await;
    workflow.remove_job(id).map_err(rejection)?;
    Ok(Json(SessionResponse::from(&workflow.snapshot())))
}

/// Lock in the core message and begin generating the first draft.
#[utoipa::path(
    post,
    path = "/generation",
    request_body = StartGenerationRequest,
    responses(
        (status = 202, description = "First draft is being generated", body = SessionResponse),
        (status = 400, description = "Empty core message"),
        (status = 409, description = "Generation has already started")
    )
)]
pub async fn start_generation_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<StartGenerationRequest>,
) -> HandlerResult<impl IntoResponse> {
    let (request, snapshot) = {
        let mut workflow = app_state.workflow.lock().await;
        let request = workflow
            .start_generation(&body.core_message)
            .map_err(rejection)?;
        (request, workflow.snapshot())
    };
    spawn_generation(app_state.clone(), request);
    Ok((StatusCode::ACCEPTED, Json(SessionResponse::from(&snapshot))))
}

/// Discard the current draft and generate a new one for the same job.
#[utoipa::path(
    post,
    path = "/generation/retry",
    responses(
        (status = 202, description = "New draft is being generated", body = SessionResponse),
        (status = 409, description = "Not generating, or a draft is still in flight")
    )
)]
pub async fn retry_handler(
    State(app_state): State<Arc<AppState>>,
) -> HandlerResult<impl IntoResponse> {
    let (request, snapshot) = {
        let mut workflow = app_state.workflow.lock().await;
        let request = workflow.retry().map_err(rejection)?;
        (request, workflow.snapshot())
    };
    spawn_generation(app_state.clone(), request);
    Ok((StatusCode::ACCEPTED, Json(SessionResponse::from(&snapshot))))
}

/// Accept the current draft, or edited `content` that still contains the core message.
///
/// The body is optional; without one the current draft is accepted as-is.
///
/// Responds 202 while the next draft is generated, and 200 once every job is accepted.
#[utoipa::path(
    post,
    path = "/generation/accept",
    request_body(content = AcceptRequest, description = "Optional; omit to accept the current draft."),
    responses(
        (status = 200, description = "Last draft accepted, results are ready", body = SessionResponse),
        (status = 202, description = "Draft accepted, next draft is being generated", body = SessionResponse),
        (status = 400, description = "Edited content lacks the core message"),
        (status = 409, description = "Not generating, no draft yet, or a draft is still in flight")
    )
)]
pub async fn accept_handler(
    State(app_state): State<Arc<AppState>>,
    body: Option<Json<AcceptRequest>>,
) -> HandlerResult<impl IntoResponse> {
    let edited = body.and_then(|Json(body)| body.content);
    let (next, snapshot) = {
        let mut workflow = app_state.workflow.lock().await;
        let next = match &edited {
            Some(content) => workflow.accept_edited(content),
            None => workflow.accept_current(),
        }
        .map_err(rejection)?;
        (next, workflow.snapshot())
    };

    let status = match next {
        Some(request) => {
            spawn_generation(app_state.clone(), request);
            StatusCode::ACCEPTED
        }
        None => StatusCode::OK,
    };
    Ok((status, Json(SessionResponse::from(&snapshot))))
}

/// Download the accepted posts as a plain-text report.
#[utoipa::path(
    get,
    path = "/results/export",
    responses(
        (status = 200, description = "Plain-text report", body = String, content_type = "text/plain"),
        (status = 409, description = "Results are not ready yet")
    )
)]
pub async fn export_results_handler(
    State(app_state): State<Arc<AppState>>,
) -> HandlerResult<impl IntoResponse> {
    let workflow = app_state.workflow.lock().await;
    if workflow.stage() != Stage::Results {
        return Err(rejection(WorkflowError::WrongStage {
            expected: Stage::Results,
            actual: workflow.stage(),
        }));
    }
    let report = render_report(workflow.core_message(), workflow.results(), Utc::now());
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report,
    ))
}
