//! Prompt template for instruction-tuned summarization models

use crate::types::LengthBounds;

/// Prompt builder for summaries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the summarization prompt.
    ///
    /// Bounds are model tokens; they are passed to the model as an
    /// approximate word range, the hard cap is enforced through `num_predict`.
    pub fn build_summary_prompt(text: &str, bounds: LengthBounds) -> String {
        format!(
            r#"You are a note summarizer. Write an abstractive summary of the TEXT below.

RULES:
1. Use only information stated in the TEXT
2. Write plain prose paragraphs, no headings, no bullet lists, no preamble
3. Aim for roughly {min} to {max} words
4. Output only the summary

TEXT:
{text}

SUMMARY:"#,
            min = bounds.min_length * 3 / 4,
            max = bounds.max_length * 3 / 4,
            text = text,
        )
    }
}
