//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the API server.
//! Platforms and tones travel as their exact display labels.

use content_studio_core::{GeneratedResult, Platform, PlatformJob, SessionSnapshot, Tone};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Payloads Sent FROM the Client TO the Server
//=========================================================================================

/// Starts generation with the message every post must contain verbatim.
#[derive(Deserialize, Debug, ToSchema)]
pub struct StartGenerationRequest {
    pub core_message: String,
}

/// Changes the platform and/or tone of a configured job.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct UpdateJobRequest {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
}

/// Accepts the current draft, or the supplied edited `content` instead.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct AcceptRequest {
    #[serde(default)]
    pub content: Option<String>,
}

//=========================================================================================
// Payloads Sent FROM the Server TO the Client
//=========================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct OptionsResponse {
    pub platforms: Vec<String>,
    pub tones: Vec<String>,
}

impl OptionsResponse {
    pub fn all() -> Self {
        Self {
            platforms: Platform::ALL.iter().map(|p| p.label().to_string()).collect(),
            tones: Tone::ALL.iter().map(|t| t.label().to_string()).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct JobView {
    pub id: Uuid,
    pub platform: String,
    pub tone: String,
}

impl From<&PlatformJob> for JobView {
    fn from(job: &PlatformJob) -> Self {
        Self {
            id: job.id,
            platform: job.platform.label().to_string(),
            tone: job.tone.label().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ResultView {
    pub id: Uuid,
    pub platform: String,
    pub tone: String,
    pub content: String,
}

impl From<&GeneratedResult> for ResultView {
    fn from(result: &GeneratedResult) -> Self {
        let job = JobView::from(&result.job);
        Self {
            id: job.id,
            platform: job.platform,
            tone: job.tone,
            content: result.content.clone(),
        }
    }
}

/// Everything the client needs to render the current wizard screen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct SessionResponse {
    /// One of `config`, `generating`, `results`.
    pub stage: String,
    pub core_message: String,
    pub jobs: Vec<JobView>,
    pub step: usize,
    pub job_count: usize,
    pub current_job: Option<JobView>,
    pub loading: bool,
    pub draft: String,
    pub draft_has_core_message: bool,
    pub results: Vec<ResultView>,
}

impl From<&SessionSnapshot> for SessionResponse {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            stage: snapshot.stage.as_str().to_string(),
            core_message: snapshot.core_message.clone(),
            jobs: snapshot.jobs.iter().map(JobView::from).collect(),
            step: snapshot.step,
            job_count: snapshot.jobs.len(),
            current_job: snapshot.current_job.as_ref().map(JobView::from),
            loading: snapshot.loading,
            draft: snapshot.draft.clone(),
            draft_has_core_message: snapshot.draft_has_core_message,
            results: snapshot.results.iter().map(ResultView::from).collect(),
        }
    }
}
