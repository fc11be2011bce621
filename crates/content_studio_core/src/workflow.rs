//! crates/content_studio_core/src/workflow.rs
//!
//! The wizard state machine: configure jobs, generate and review one draft per
//! job, then show the accepted results.
//!
//! The workflow never talks to the generation backend itself. Operations that
//! need a draft return a [`GenerationRequest`]; the caller runs it and hands the
//! text back through [`Workflow::complete_generation`]. Rejected operations
//! return a [`WorkflowError`] and leave the state untouched.

use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{GeneratedResult, JobUpdate, Platform, PlatformJob, Tone};
use crate::prompt::contains_core_message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Config,
    Generating,
    Results,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Config => "config",
            Stage::Generating => "generating",
            Stage::Results => "results",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("Operation requires the {expected} stage, but the session is in the {actual} stage")]
    WrongStage { expected: Stage, actual: Stage },
    #[error("The core message must not be empty")]
    EmptyCoreMessage,
    #[error("At least one platform must remain")]
    LastJob,
    #[error("No platform job with id {0}")]
    UnknownJob(Uuid),
    #[error("A draft is still being generated")]
    GenerationInProgress,
    #[error("There is no draft to accept")]
    EmptyDraft,
    #[error("The content must contain the core message word-for-word")]
    CoreMessageMissing,
}

/// A draft the caller must generate for the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Attempt number; only the latest ticket is accepted back.
    pub ticket: u64,
    pub step: usize,
    pub core_message: String,
    pub platform: Platform,
    pub tone: Tone,
}

/// Read-only view of the session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub stage: Stage,
    pub core_message: String,
    pub jobs: Vec<PlatformJob>,
    pub step: usize,
    pub current_job: Option<PlatformJob>,
    pub loading: bool,
    pub draft: String,
    pub draft_has_core_message: bool,
    pub results: Vec<GeneratedResult>,
}

#[derive(Debug, Clone)]
pub struct Workflow {
    stage: Stage,
    core_message: String,
    jobs: Vec<PlatformJob>,
    step: usize,
    loading: bool,
    draft: String,
    results: Vec<GeneratedResult>,
    // Never reset, so completions from before a restart stay stale.
    ticket: u64,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

impl Workflow {
    /// A fresh session in the `Config` stage with the single initial job.
    pub fn new() -> Self {
        Self {
            stage: Stage::Config,
            core_message: String::new(),
            jobs: vec![PlatformJob::initial()],
            step: 0,
            loading: false,
            draft: String::new(),
            results: Vec::new(),
            ticket: 0,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn core_message(&self) -> &str {
        &self.core_message
    }

    pub fn jobs(&self) -> &[PlatformJob] {
        &self.jobs
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn results(&self) -> &[GeneratedResult] {
        &self.results
    }

    pub fn current_job(&self) -> Option<&PlatformJob> {
        match self.stage {
            Stage::Generating => self.jobs.get(self.step),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            stage: self.stage,
            core_message: self.core_message.clone(),
            jobs: self.jobs.clone(),
            step: self.step,
            current_job: self.current_job().copied(),
            loading: self.loading,
            draft: self.draft.clone(),
            draft_has_core_message: contains_core_message(&self.draft, &self.core_message),
            results: self.results.clone(),
        }
    }

    // --- Configuration ---

    /// Appends a LinkedIn Post / Professional job, returning its id.
    pub fn add_job(&mut self) -> Result<Uuid, WorkflowError> {
        self.expect_stage(Stage::Config)?;
        let job = PlatformJob::added();
        self.jobs.push(job);
        Ok(job.id)
    }

    pub fn remove_job(&mut self, id: Uuid) -> Result<(), WorkflowError> {
        self.expect_stage(Stage::Config)?;
        let index = self.job_index(id)?;
        if self.jobs.len() == 1 {
            return Err(self.reject(WorkflowError::LastJob));
        }
        self.jobs.remove(index);
        Ok(())
    }

    pub fn update_job(&mut self, id: Uuid, update: JobUpdate) -> Result<(), WorkflowError> {
        self.expect_stage(Stage::Config)?;
        let index = self.job_index(id)?;
        let job = &mut self.jobs[index];
        match update {
            JobUpdate::Platform(platform) => job.platform = platform,
            JobUpdate::Tone(tone) => job.tone = tone,
        }
        Ok(())
    }

    // --- Generation ---

    /// Locks in the core message and requests the draft for the first job.
    pub fn start_generation(
        &mut self,
        core_message: &str,
    ) -> Result<GenerationRequest, WorkflowError> {
        self.expect_stage(Stage::Config)?;
        if core_message.trim().is_empty() {
            return Err(self.reject(WorkflowError::EmptyCoreMessage));
        }
        if self.jobs.is_empty() {
            return Err(self.reject(WorkflowError::LastJob));
        }

        self.core_message = core_message.to_string();
        self.step = 0;
        self.results.clear();
        self.stage = Stage::Generating;
        info!(jobs = self.jobs.len(), "Generation started.");
        Ok(self.generate_for_current_step())
    }

    /// Discards the current draft and requests a new one for the same job.
    pub fn retry(&mut self) -> Result<GenerationRequest, WorkflowError> {
        self.expect_stage(Stage::Generating)?;
        if self.loading {
            return Err(self.reject(WorkflowError::GenerationInProgress));
        }
        info!(step = self.step, "Retrying draft.");
        Ok(self.generate_for_current_step())
    }

    /// Stores a finished draft. Returns `false` if `ticket` is no longer the
    /// request the session is waiting for.
    pub fn complete_generation(&mut self, ticket: u64, text: String) -> bool {
        if self.stage != Stage::Generating || !self.loading || ticket != self.ticket {
            warn!(ticket, current = self.ticket, "Discarding stale draft.");
            return false;
        }
        self.draft = text;
        self.loading = false;
        true
    }

    /// Accepts the current draft. Returns the request for the next job, or
    /// `None` once the last job is accepted and the session shows its results.
    pub fn accept_current(&mut self) -> Result<Option<GenerationRequest>, WorkflowError> {
        self.check_acceptable()?;
        let content = self.draft.clone();
        Ok(self.accept_content(content))
    }

    /// Accepts user-edited content in place of the current draft.
    pub fn accept_edited(
        &mut self,
        content: &str,
    ) -> Result<Option<GenerationRequest>, WorkflowError> {
        self.check_acceptable()?;
        if content.trim().is_empty() {
            return Err(self.reject(WorkflowError::EmptyDraft));
        }
        if !contains_core_message(content, &self.core_message) {
            return Err(self.reject(WorkflowError::CoreMessageMissing));
        }
        Ok(self.accept_content(content.to_string()))
    }

    /// Returns to the initial configuration, dropping everything generated so far.
    pub fn start_over(&mut self) {
        info!(from = %self.stage, "Starting over.");
        self.stage = Stage::Config;
        self.core_message.clear();
        self.jobs = vec![PlatformJob::initial()];
        self.step = 0;
        self.loading = false;
        self.draft.clear();
        self.results.clear();
    }

    // --- Internals ---

    fn generate_for_current_step(&mut self) -> GenerationRequest {
        let job = self.jobs[self.step];
        self.ticket += 1;
        self.loading = true;
        self.draft.clear();
        info!(
            step = self.step,
            ticket = self.ticket,
            platform = %job.platform,
            tone = %job.tone,
            "Requesting draft."
        );
        GenerationRequest {
            ticket: self.ticket,
            step: self.step,
            core_message: self.core_message.clone(),
            platform: job.platform,
            tone: job.tone,
        }
    }

    fn check_acceptable(&self) -> Result<(), WorkflowError> {
        self.expect_stage(Stage::Generating)?;
        if self.loading {
            return Err(self.reject(WorkflowError::GenerationInProgress));
        }
        if self.draft.trim().is_empty() {
            return Err(self.reject(WorkflowError::EmptyDraft));
        }
        Ok(())
    }

    fn accept_content(&mut self, content: String) -> Option<GenerationRequest> {
        let job = self.jobs[self.step];
        self.results.push(GeneratedResult { job, content });
        self.draft.clear();

        if self.step + 1 == self.jobs.len() {
            self.step = self.jobs.len();
            self.stage = Stage::Results;
            info!(results = self.results.len(), "All drafts accepted.");
            None
        } else {
            self.step += 1;
            Some(self.generate_for_current_step())
        }
    }

    fn job_index(&self, id: Uuid) -> Result<usize, WorkflowError> {
        self.jobs
            .iter()
            .position(|job| job.id == id)
            .ok_or_else(|| self.reject(WorkflowError::UnknownJob(id)))
    }

    fn expect_stage(&self, expected: Stage) -> Result<(), WorkflowError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(self.reject(WorkflowError::WrongStage {
                expected,
                actual: self.stage,
            }))
        }
    }

    fn reject(&self, err: WorkflowError) -> WorkflowError {
        warn!(stage = %self.stage, "Rejected: {}", err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &str = "We hit 10,000 sign-ups this week.";

    fn generating(jobs: usize) -> (Workflow, GenerationRequest) {
        let mut workflow = Workflow::new();
        for _ in 1..jobs {
            workflow.add_job().unwrap();
        }
        let request = workflow.start_generation(MESSAGE).unwrap();
        (workflow, request)
    }

    #[test]
    fn starts_in_config_with_one_initial_job() {
        let workflow = Workflow::new();
        assert_eq!(workflow.stage(), Stage::Config);
        assert_eq!(workflow.jobs().len(), 1);
        assert_eq!(workflow.jobs()[0].platform, Platform::Tweet);
        assert_eq!(workflow.jobs()[0].tone, Tone::Enthusiastic);
        assert!(workflow.core_message().is_empty());
        assert!(workflow.results().is_empty());
    }

    #[test]
    fn added_jobs_are_linkedin_professional() {
        let mut workflow = Workflow::new();
        workflow.add_job().unwrap();
        let pairs: Vec<_> = workflow
            .jobs()
            .iter()
            .map(|job| (job.platform, job.tone))
            .collect();
        assert_eq!(
            pairs,
            [
                (Platform::Tweet, Tone::Enthusiastic),
                (Platform::LinkedInPost, Tone::Professional)
            ]
        );
    }

    #[test]
    fn job_list_never_becomes_empty() {
        let mut workflow = Workflow::new();
        let first = workflow.jobs()[0].id;
        let second = workflow.add_job().unwrap();
        let third = workflow.add_job().unwrap();

        workflow.remove_job(second).unwrap();
        workflow.remove_job(first).unwrap();
        assert_eq!(workflow.remove_job(third), Err(WorkflowError::LastJob));
        assert_eq!(workflow.jobs().len(), 1);
        assert_eq!(workflow.jobs()[0].id, third);
    }

    #[test]
    fn update_replaces_only_the_named_field() {
        let mut workflow = Workflow::new();
        let id = workflow.jobs()[0].id;
        workflow
            .update_job(id, JobUpdate::Platform(Platform::Tweet))
            .unwrap();
        workflow.update_job(id, JobUpdate::Tone(Tone::Humorous)).unwrap();

        let job = workflow.jobs()[0];
        assert_eq!(job.id, id);
        assert_eq!(job.platform, Platform::Tweet);
        assert_eq!(job.tone, Tone::Humorous);
    }

    #[test]
    fn unknown_job_ids_change_nothing() {
        let mut workflow = Workflow::new();
        let before = workflow.snapshot();
        let stranger = Uuid::new_v4();
        assert_eq!(
            workflow.update_job(stranger, JobUpdate::Tone(Tone::Formal)),
            Err(WorkflowError::UnknownJob(stranger))
        );
        assert_eq!(
            workflow.remove_job(stranger),
            Err(WorkflowError::UnknownJob(stranger))
        );
        assert_eq!(workflow.snapshot(), before);
    }

    #[test]
    fn blank_core_message_keeps_config() {
        let mut workflow = Workflow::new();
        for message in ["", "   ", "\n\t"] {
            assert_eq!(
                workflow.start_generation(message),
                Err(WorkflowError::EmptyCoreMessage)
            );
            assert_eq!(workflow.stage(), Stage::Config);
            assert!(!workflow.is_loading());
        }
    }

    #[test]
    fn start_requests_the_first_job_once() {
        let mut workflow = Workflow::new();
        let second = workflow.add_job().unwrap();
        workflow
            .update_job(second, JobUpdate::Platform(Platform::EmailNewsletter))
            .unwrap();

        let request = workflow.start_generation(MESSAGE).unwrap();
        assert_eq!(workflow.stage(), Stage::Generating);
        assert_eq!(workflow.step(), 0);
        assert!(workflow.results().is_empty());
        assert!(workflow.is_loading());
        assert_eq!(request.step, 0);
        assert_eq!(request.core_message, MESSAGE);
        assert_eq!(request.platform, workflow.jobs()[0].platform);

        assert!(matches!(
            workflow.start_generation(MESSAGE),
            Err(WorkflowError::WrongStage { .. })
        ));
    }

    #[test]
    fn configuration_is_frozen_while_generating() {
        let (mut workflow, _) = generating(2);
        let id = workflow.jobs()[0].id;
        let jobs = workflow.jobs().to_vec();

        assert!(workflow.add_job().is_err());
        assert!(workflow.remove_job(id).is_err());
        assert!(workflow.update_job(id, JobUpdate::Tone(Tone::Casual)).is_err());
        assert_eq!(workflow.jobs(), jobs.as_slice());
    }

    #[test]
    fn accept_is_rejected_while_loading_or_without_a_draft() {
        let (mut workflow, request) = generating(1);
        assert_eq!(
            workflow.accept_current(),
            Err(WorkflowError::GenerationInProgress)
        );

        assert!(workflow.complete_generation(request.ticket, String::new()));
        assert_eq!(workflow.accept_current(), Err(WorkflowError::EmptyDraft));
        assert!(workflow.results().is_empty());
        assert_eq!(workflow.stage(), Stage::Generating);
    }

    #[test]
    fn retry_only_replaces_the_draft() {
        let (mut workflow, first) = generating(2);
        assert_eq!(workflow.retry(), Err(WorkflowError::GenerationInProgress));

        workflow.complete_generation(first.ticket, "draft one".to_string());
        let second = workflow.retry().unwrap();
        assert!(workflow.is_loading());
        assert!(workflow.draft().is_empty());
        assert_eq!(second.step, first.step);
        assert_eq!(second.platform, first.platform);
        assert!(second.ticket > first.ticket);
        assert_eq!(workflow.step(), 0);
        assert!(workflow.results().is_empty());

        workflow.complete_generation(second.ticket, "draft two".to_string());
        assert_eq!(workflow.draft(), "draft two");
    }

    #[test]
    fn stale_completions_are_discarded() {
        let (mut workflow, first) = generating(1);
        assert!(!workflow.complete_generation(first.ticket + 1, "nope".to_string()));
        assert!(workflow.is_loading());

        workflow.start_over();
        assert!(!workflow.complete_generation(first.ticket, "late".to_string()));
        assert!(workflow.draft().is_empty());
    }

    #[test]
    fn completion_from_before_a_restart_is_discarded_while_generating_again() {
        let (mut workflow, old) = generating(1);
        workflow.start_over();
        let fresh = workflow.start_generation("A different message.").unwrap();
        assert_eq!(fresh.step, old.step);
        assert_ne!(fresh.ticket, old.ticket);

        assert!(!workflow.complete_generation(old.ticket, "late".to_string()));
        assert!(workflow.is_loading());
        assert!(workflow.draft().is_empty());

        assert!(workflow.complete_generation(fresh.ticket, "fresh".to_string()));
        assert_eq!(workflow.draft(), "fresh");
    }

    #[test]
    fn accepting_every_job_reaches_results_in_order() {
        let (mut workflow, mut request) = generating(3);
        let jobs = workflow.jobs().to_vec();

        for (i, job) in jobs.iter().enumerate() {
            assert_eq!(workflow.results().len(), workflow.step());
            assert_eq!(request.platform, job.platform);
            workflow.complete_generation(request.ticket, format!("post {i}"));
            match workflow.accept_current().unwrap() {
                Some(next) => request = next,
                None => assert_eq!(i, jobs.len() - 1),
            }
        }

        assert_eq!(workflow.stage(), Stage::Results);
        assert_eq!(workflow.step(), jobs.len());
        let accepted: Vec<_> = workflow.results().iter().map(|r| r.job).collect();
        assert_eq!(accepted, jobs);
        assert_eq!(workflow.results()[2].content, "post 2");
    }

    #[test]
    fn edited_content_must_keep_the_core_message() {
        let (mut workflow, request) = generating(1);
        workflow.complete_generation(request.ticket, "generated".to_string());

        assert_eq!(
            workflow.accept_edited("my own words"),
            Err(WorkflowError::CoreMessageMissing)
        );
        assert_eq!(workflow.accept_edited("  "), Err(WorkflowError::EmptyDraft));
        assert_eq!(workflow.stage(), Stage::Generating);

        let edited = format!("Edited: {MESSAGE}");
        assert_eq!(workflow.accept_edited(&edited), Ok(None));
        assert_eq!(workflow.results()[0].content, edited);
    }

    #[test]
    fn start_over_restores_the_initial_state() {
        let (mut workflow, request) = generating(2);
        workflow.complete_generation(request.ticket, "one".to_string());
        let next = workflow.accept_current().unwrap().unwrap();
        workflow.complete_generation(next.ticket, "two".to_string());
        workflow.accept_current().unwrap();
        assert_eq!(workflow.stage(), Stage::Results);

        workflow.start_over();
        let snapshot = workflow.snapshot();
        assert_eq!(snapshot.stage, Stage::Config);
        assert_eq!(snapshot.jobs.len(), 1);
        assert_eq!(snapshot.jobs[0].platform, Platform::Tweet);
        assert_eq!(snapshot.jobs[0].tone, Tone::Enthusiastic);
        assert!(snapshot.core_message.is_empty());
        assert!(snapshot.results.is_empty());
        assert_eq!(snapshot.step, 0);
        assert!(!snapshot.loading);
    }

    #[test]
    fn snapshot_reports_core_message_presence() {
        let (mut workflow, request) = generating(1);
        workflow.complete_generation(request.ticket, format!("Wow! {MESSAGE}"));
        let snapshot = workflow.snapshot();
        assert!(snapshot.draft_has_core_message);
        assert_eq!(snapshot.current_job, Some(workflow.jobs()[0]));
    }
}
