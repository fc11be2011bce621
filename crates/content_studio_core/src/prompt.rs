//! Prompt construction for the content generation backend.

use crate::domain::{Platform, Tone};

pub const SYSTEM_INSTRUCTIONS: &str = "You are an expert content creator and social media manager. \
You write complete, ready-to-publish posts that follow the conventions of the requested platform.";

const PROMPT_TEMPLATE: &str = r#"Your task is to generate a "{platform}" post with a "{tone}" tone.

Platform guidelines: {guidelines}

A critical and mandatory rule is that you MUST include the following "Core Message" verbatim (exactly as written, word-for-word) somewhere in your response:
"{core_message}"

Adapt the surrounding content to the {tone} tone and make the core message prominent.

Now, please generate the complete and ready-to-publish content for the {platform}. Respond with the content only."#;

/// Builds the user prompt for one job.
pub fn build_prompt(core_message: &str, platform: Platform, tone: Tone) -> String {
    PROMPT_TEMPLATE
        .replace("{platform}", platform.label())
        .replace("{tone}", tone.label())
        .replace("{guidelines}", platform.guidelines())
        .replace("{core_message}", core_message)
}

/// True when `content` carries the core message word-for-word.
pub fn contains_core_message(content: &str, core_message: &str) -> bool {
    !core_message.is_empty() && content.contains(core_message)
}
