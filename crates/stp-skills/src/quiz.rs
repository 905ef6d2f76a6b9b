//! Quiz generation agent

use std::sync::Arc;

use stp_core::{CompletionConfig, CompletionProvider, Error, Result};

const QUIZ_SYSTEM_PROMPT: &str =
    "You are an expert educator creating quiz questions for a robotics textbook.";

const QUIZ_INSTRUCTIONS: &str = r###"Generate exactly 5 multiple-choice questions that test understanding of key concepts.

Format each question as:
:::note Question N
What is [question text]?
A) [option]
B) [option]
C) [option]
D) [option]
**Answer**: [correct letter]
:::

Return ONLY the quiz section with heading "## Check Your Understanding" followed by the 5 questions."###;

/// Appends a generated five-question quiz to chapter content.
pub struct QuizAgent {
    llm: Arc<dyn CompletionProvider>,
}

impl QuizAgent {
    pub fn new(llm: Arc<dyn CompletionProvider>) -> Self {
        Self { llm }
    }

    /// Generate a quiz for `content` and append it.
    ///
    /// The question count is enforced by prompt only; the generated text is
    /// trusted as-is.
    pub async fn generate(&self, content: &str) -> Result<String> {
        if content.trim().is_empty() {
            return Err(Error::InvalidInput(
                "no chapter content provided for quiz generation".to_string(),
            ));
        }

        let user = format!(
            "Given the following educational content:\n\n{}\n\n{}",
            content, QUIZ_INSTRUCTIONS
        );

        let config = CompletionConfig {
            temperature: 0.7,
            max_tokens: 2000,
            ..Default::default()
        };

        let quiz = self.llm.complete(QUIZ_SYSTEM_PROMPT, &user, &config).await?;

        Ok(format!("{}\n\n{}", content, quiz))
    }
}
