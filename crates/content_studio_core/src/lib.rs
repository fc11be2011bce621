pub mod domain;
pub mod generator;
pub mod ports;
pub mod prompt;
pub mod report;
pub mod workflow;

pub use domain::{GeneratedResult, JobUpdate, Platform, PlatformJob, Tone, UnknownLabel};
pub use generator::{ContentGenerator, FALLBACK_DRAFT};
pub use ports::{ContentGenerationService, PortError, PortResult};
pub use workflow::{GenerationRequest, SessionSnapshot, Stage, Workflow, WorkflowError};
