//! Shared data types for the textbook platform

use serde::{Deserialize, Serialize};

/// One ingested unit of textbook content.
///
/// Documents are immutable once stored: re-ingesting a chapter supersedes the
/// old points with freshly generated ids rather than updating them in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub chapter_slug: String,
    pub section_title: String,
}

/// One chat request, ephemeral per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatQuery {
    pub query: String,
    /// Excerpt the user highlighted in the book, if any.
    pub selected_context: String,
}

/// Citation pointing back into the textbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub chapter: String,
    pub section: String,
    pub url: String,
}

/// Final answer plus the sources used to build its context, in rank order.
///
/// `sources` is empty whenever the context was empty (degraded retrieval or
/// an over-budget first block) since no retrieved text backed the answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

/// Self-reported experience level from the user's profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Reader profile used by the personalization skill.
///
/// Owned by the auth subsystem; the core treats it as an immutable input
/// per request. The default is the guest profile served to unauthenticated
/// callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub python_knowledge: bool,
    pub has_nvidia_gpu: bool,
    pub experience_level: ExperienceLevel,
}

impl UserProfile {
    pub fn guest() -> Self {
        Self::default()
    }
}
