//! Plain-text rendering of an accepted set of posts.

use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::domain::GeneratedResult;

const RULE_WIDTH: usize = 70;

pub fn render_report(
    core_message: &str,
    results: &[GeneratedResult],
    generated_at: DateTime<Utc>,
) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "CONTENT GENERATION OUTPUT");
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Core Message: \"{core_message}\"");
    let _ = writeln!(out, "Generated: {} posts", results.len());
    let _ = writeln!(out, "Date: {}", generated_at.format("%Y-%m-%d %H:%M UTC"));

    for result in results {
        let _ = writeln!(out);
        let _ = writeln!(out, "{light}");
        let _ = writeln!(
            out,
            "PLATFORM: {} ({})",
            result.job.platform.label().to_uppercase(),
            result.job.tone
        );
        let _ = writeln!(out, "{light}");
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", result.content.trim_end());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Platform, PlatformJob, Tone};
    use chrono::TimeZone;

    #[test]
    fn renders_one_section_per_result_in_order() {
        let results = vec![
            GeneratedResult {
                job: PlatformJob::with(Platform::Tweet, Tone::Enthusiastic),
                content: "We did it!\n".to_string(),
            },
            GeneratedResult {
                job: PlatformJob::with(Platform::LinkedInPost, Tone::Professional),
                content: "A milestone.".to_string(),
            },
        ];
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let report = render_report("Core.", &results, at);

        assert!(report.contains("Core Message: \"Core.\""));
        assert!(report.contains("Generated: 2 posts"));
        assert!(report.contains("Date: 2024-05-01 09:30 UTC"));
        let tweet = report.find("PLATFORM: TWEET (X) (Enthusiastic)").unwrap();
        let linkedin = report
            .find("PLATFORM: LINKEDIN POST (Professional)")
            .unwrap();
        assert!(tweet < linkedin);
        assert!(report.contains("We did it!\n"));
    }
}
