//! Prompt construction.

use crate::jobs::Job;

/// Style and character description shared by every clue, so independent
/// generation calls produce visually consistent images.
pub const STYLE_PREFIX: &str = "Minimalist cute flat illustration, soft pastel palette, \
clean rounded shapes, warm cozy living room atmosphere, simple composition, no text, \
no logos, no watermark. Keep the same visual style and same two character designs \
across all images: Chris is a sweet young man with short brown hair and green sweater, \
Kimberly is a sweet young woman with medium dark hair and yellow cardigan.";

/// Builds the full prompt for a job.
pub fn build_prompt(job: &Job) -> String {
    format!("{STYLE_PREFIX}\nScene: {}", job.scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_layout() {
        let job = Job {
            id: "99",
            filename: "x.png",
            scene: "A cat on a rug.",
        };
        let prompt = build_prompt(&job);

        assert!(prompt.starts_with("Minimalist cute flat illustration, soft pastel palette,"));
        assert!(prompt.ends_with("\nScene: A cat on a rug."));
        assert_eq!(prompt.lines().count(), 2);
    }

    #[test]
    fn test_style_prefix_is_single_line() {
        assert!(!STYLE_PREFIX.contains('\n'));
        assert!(STYLE_PREFIX.contains("no watermark. Keep the same visual style"));
    }
}
