//! Fixed prompts for the RAG chat flow

/// Tutor persona used when textbook context is available.
pub const TUTOR_SYSTEM_PROMPT: &str = "You are a robotics tutor for the Physical AI & Humanoid \
    Robotics textbook. Answer questions based on the provided textbook context. Cite sections \
    using the format 'See Chapter X.Y: Title'.";

/// Persona used when retrieval failed and no textbook context exists.
pub const DEGRADED_SYSTEM_PROMPT: &str = "You are a robotics tutor for the Physical AI & \
    Humanoid Robotics textbook. The textbook index is currently unavailable, so no textbook \
    context is provided. Answer from your general knowledge, and make clear that the answer is \
    general background rather than sourced from the textbook.";

/// User message combining context, question and any highlighted excerpt.
pub fn user_content(context: &str, query: &str, selected_context: &str) -> String {
    format!(
        "Context:\n{}\n\nQuestion: {}\n\nSelected text: {}",
        context, query, selected_context
    )
}
