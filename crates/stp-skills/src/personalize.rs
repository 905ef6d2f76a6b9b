//! Content personalization agent

use std::sync::Arc;

use stp_core::{CompletionConfig, CompletionProvider, Error, Result, UserProfile};

const PERSONALIZE_SYSTEM_PROMPT: &str =
    "You are rewriting educational robotics content to match a specific student's background.";

/// Rewrites chapter content for a reader's profile.
pub struct PersonalizeAgent {
    llm: Arc<dyn CompletionProvider>,
}

impl PersonalizeAgent {
    pub fn new(llm: Arc<dyn CompletionProvider>) -> Self {
        Self { llm }
    }

    fn profile_summary(profile: &UserProfile) -> String {
        let mut background = Vec::new();
        if profile.python_knowledge {
            background.push("proficient in Python");
        }
        if profile.has_nvidia_gpu {
            background.push("has access to NVIDIA GPU hardware");
        }

        if background.is_empty() {
            "no specific programming background".to_string()
        } else {
            background.join(", ")
        }
    }

    /// Rewrite `content` tailored to `profile`.
    pub async fn personalize(&self, content: &str, profile: &UserProfile) -> Result<String> {
        if content.trim().is_empty() {
            return Err(Error::InvalidInput(
                "no chapter content provided for personalization".to_string(),
            ));
        }

        let user = format!(
            "The student is {background} with {experience} experience level.\n\
             \n\
             INSTRUCTIONS:\n\
             1. Adapt explanations and analogies to match the student's background\n\
             2. If the student knows Python: use Python-specific analogies (e.g. \"like a \
             generator\", \"similar to asyncio\")\n\
             3. If the student has a GPU: mention GPU-accelerated computing opportunities where \
             relevant\n\
             4. If beginner: add more foundational context; if advanced: assume prerequisite \
             knowledge\n\
             5. Preserve ALL markdown formatting (headings, code blocks, LaTeX equations, lists)\n\
             6. Keep the same structure and length (don't add new major sections)\n\
             7. Use at least 3 personalized analogies or references based on their profile\n\
             \n\
             Original content:\n\
             {content}\n\
             \n\
             Rewrite this content tailored to the student's profile.",
            background = Self::profile_summary(profile),
            experience = profile.experience_level.as_str(),
            content = content,
        );

        let config = CompletionConfig {
            temperature: 0.7,
            max_tokens: 3000,
            ..Default::default()
        };

        self.llm
            .complete(PERSONALIZE_SYSTEM_PROMPT, &user, &config)
            .await
    }
}
