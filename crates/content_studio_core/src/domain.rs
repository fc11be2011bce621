//! crates/content_studio_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Returned when a label does not name one of the closed platform/tone sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} label: '{label}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub label: String,
}

/// The publishing target a post is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    BlogPost,
    Tweet,
    LinkedInPost,
    EmailNewsletter,
    InstagramCaption,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::BlogPost,
        Platform::Tweet,
        Platform::LinkedInPost,
        Platform::EmailNewsletter,
        Platform::InstagramCaption,
    ];

    /// The exact label exchanged with clients and used in prompts.
    pub fn label(self) -> &'static str {
        match self {
            Platform::BlogPost => "Blog Post",
            Platform::Tweet => "Tweet (X)",
            Platform::LinkedInPost => "LinkedIn Post",
            Platform::EmailNewsletter => "Email Newsletter",
            Platform::InstagramCaption => "Instagram Caption",
        }
    }

    /// Format conventions handed to the model alongside the platform label.
    pub fn guidelines(self) -> &'static str {
        match self {
            Platform::BlogPost => {
                "Long-form article (300-500 words), structured with intro, body and conclusion, informative"
            }
            Platform::Tweet => "280 character limit, engaging, use hashtags sparingly",
            Platform::LinkedInPost => {
                "1-3 paragraphs, focus on business value and insights"
            }
            Platform::EmailNewsletter => {
                "Subject line followed by the body, clear call-to-action"
            }
            Platform::InstagramCaption => {
                "Visual-focused caption, 2-3 short paragraphs with emojis, include relevant hashtags"
            }
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "platform",
                label: s.to_string(),
            })
    }
}

/// The voice a post is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Professional,
    Casual,
    Enthusiastic,
    Humorous,
    Formal,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Enthusiastic,
        Tone::Humorous,
        Tone::Formal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Enthusiastic => "Enthusiastic",
            Tone::Humorous => "Humorous",
            Tone::Formal => "Formal",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "tone",
                label: s.to_string(),
            })
    }
}

/// One (platform, tone) pair to be turned into one generated post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformJob {
    pub id: Uuid,
    pub platform: Platform,
    pub tone: Tone,
}

impl PlatformJob {
    /// The job a fresh session starts with.
    pub fn initial() -> Self {
        Self::with(Platform::Tweet, Tone::Enthusiastic)
    }

    /// The job appended by each "add platform" action.
    pub fn added() -> Self {
        Self::with(Platform::LinkedInPost, Tone::Professional)
    }

    pub fn with(platform: Platform, tone: Tone) -> Self {
        Self {
            id: Uuid::new_v4(),
            platform,
            tone,
        }
    }
}

/// A single field edit applied to a job while configuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobUpdate {
    Platform(Platform),
    Tone(Tone),
}

/// An accepted post: the job it was generated for and its final content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedResult {
    pub job: PlatformJob,
    pub content: String,
}
