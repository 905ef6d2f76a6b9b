//! Agent tests against a scripted completion provider

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use stp_core::{CompletionConfig, CompletionProvider, Error, Result, UserProfile};
use stp_core::types::ExperienceLevel;

use crate::{PersonalizeAgent, QuizAgent, TranslateAgent};

type Transform = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Applies a transform to the user content and records every call.
struct MockLlm {
    transform: Transform,
    calls: AtomicUsize,
    last_user_content: Mutex<Option<String>>,
}

impl MockLlm {
    fn new(transform: Transform) -> Arc<Self> {
        Arc::new(Self {
            transform,
            calls: AtomicUsize::new(0),
            last_user_content: Mutex::new(None),
        })
    }

    fn replying(reply: &'static str) -> Arc<Self> {
        Self::new(Box::new(move |_| reply.to_string()))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_user_content(&self) -> String {
        self.last_user_content
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for MockLlm {
    async fn complete(
        &self,
        _system_prompt: &str,
        user_content: &str,
        _config: &CompletionConfig,
    ) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user_content.lock().unwrap() = Some(user_content.to_string());
        Ok((self.transform)(user_content))
    }

    fn name(&self) -> &str {
        "Mock"
    }
}

/// Pretend-translate: uppercase every letter of the payload after the prompt
/// scaffolding. Placeholder tokens are already uppercase, so they survive.
fn pretend_translate(user_content: &str) -> String {
    let payload = user_content
        .split_once("Content to translate:\n")
        .map(|(_, tail)| tail)
        .unwrap_or(user_content);
    payload.to_uppercase()
}

#[tokio::test]
async fn translate_round_trip_preserves_code_and_latex_spans() {
    let llm = MockLlm::new(Box::new(pretend_translate));
    let agent = TranslateAgent::new(llm.clone());

    let markdown = "A node runs code:\n\n```python\nprint(\"hi\")\n```\n\nwhere $f(x) = x^2$ \
                    and\n\n$$\\sum_i w_i$$\n\nclose the loop.";
    let translated = agent.translate(markdown).await.unwrap();

    // Natural language changed...
    assert!(translated.contains("A NODE RUNS CODE"));
    // ...while every protected span survived byte-for-byte, in order.
    let code = translated.find("```python\nprint(\"hi\")\n```").unwrap();
    let inline = translated.find("$f(x) = x^2$").unwrap();
    let block = translated.find("$$\\sum_i w_i$$").unwrap();
    assert!(code < inline && inline < block);
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn translate_dropped_placeholder_is_best_effort() {
    let llm = MockLlm::new(Box::new(|user_content: &str| {
        let translated = pretend_translate(user_content);
        translated.replacen("___LATEX_0___", "", 1)
    }));
    let agent = TranslateAgent::new(llm);

    let translated = agent.translate("one $a$ two $b$ three").await.unwrap();

    assert!(!translated.contains("$a$"));
    assert!(translated.contains("$b$"));
}

#[tokio::test]
async fn translate_empty_content_is_invalid_input() {
    let llm = MockLlm::replying("anything");
    let agent = TranslateAgent::new(llm.clone());

    let err = agent.translate("   ").await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn quiz_appends_the_generated_section() {
    let llm = MockLlm::replying("## Check Your Understanding\n\n:::note Question 1\n...\n:::");
    let agent = QuizAgent::new(llm.clone());

    let content = "# Sensors\n\nSensors measure the world.";
    let output = agent.generate(content).await.unwrap();

    assert!(output.starts_with(content));
    assert!(output.contains("## Check Your Understanding"));
    assert!(llm.last_user_content().contains("exactly 5 multiple-choice questions"));
}

#[tokio::test]
async fn quiz_rejects_empty_content_before_any_call() {
    let llm = MockLlm::replying("quiz");
    let agent = QuizAgent::new(llm.clone());

    let err = agent.generate("").await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn personalize_describes_a_full_profile() {
    let llm = MockLlm::replying("rewritten");
    let agent = PersonalizeAgent::new(llm.clone());

    let profile = UserProfile {
        python_knowledge: true,
        has_nvidia_gpu: true,
        experience_level: ExperienceLevel::Advanced,
    };
    agent.personalize("# Chapter", &profile).await.unwrap();

    let prompt = llm.last_user_content();
    assert!(prompt.contains("proficient in Python"));
    assert!(prompt.contains("has access to NVIDIA GPU hardware"));
    assert!(prompt.contains("advanced experience level"));
}

#[tokio::test]
async fn personalize_defaults_to_the_guest_description() {
    let llm = MockLlm::replying("rewritten");
    let agent = PersonalizeAgent::new(llm.clone());

    agent
        .personalize("# Chapter", &UserProfile::guest())
        .await
        .unwrap();

    let prompt = llm.last_user_content();
    assert!(prompt.contains("no specific programming background"));
    assert!(prompt.contains("beginner experience level"));
}
