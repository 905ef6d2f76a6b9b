//! Urdu translation agent with protected code and LaTeX spans

use regex::{Captures, Regex};
use std::sync::{Arc, LazyLock};
use tracing::warn;

use stp_core::{CompletionConfig, CompletionProvider, Error, Result};

/// Fixed response for an empty translation request.
pub const EMPTY_CONTENT_URDU: &str = "کوئی مواد ترجمہ کے لیے دستیاب نہیں ہے";

/// Fixed response when the model returns a blank translation.
pub const BLANK_TRANSLATION_URDU: &str = "ترجمہ مکمل نہیں کیا جا سکا";

const TRANSLATE_SYSTEM_PROMPT: &str = "You are a professional translator specializing in \
    technical educational content. You translate English to Urdu while preserving markdown \
    structure exactly.";

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static LATEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\$.*?\$\$|\$.*?\$").unwrap());

/// Translates chapter markdown to Urdu.
///
/// Fenced code blocks and LaTeX spans are swapped for placeholder tokens
/// before the model sees the text and restored afterwards, so they survive
/// translation byte-for-byte.
pub struct TranslateAgent {
    llm: Arc<dyn CompletionProvider>,
}

/// Replace protected spans with placeholders, returning the rewritten text
/// and the `(placeholder, original)` pairs in extraction order.
fn extract_protected_spans(markdown: &str) -> (String, Vec<(String, String)>) {
    let mut spans: Vec<(String, String)> = Vec::new();
    let mut counter = 0usize;

    let text = CODE_BLOCK_RE.replace_all(markdown, |caps: &Captures<'_>| {
        let placeholder = format!("___CODE_BLOCK_{}___", counter);
        counter += 1;
        spans.push((placeholder.clone(), caps[0].to_string()));
        placeholder
    });

    let text = LATEX_RE
        .replace_all(&text, |caps: &Captures<'_>| {
            let placeholder = format!("___LATEX_{}___", counter);
            counter += 1;
            spans.push((placeholder.clone(), caps[0].to_string()));
            placeholder
        })
        .into_owned();

    (text, spans)
}

/// Substitute the original spans back, best-effort.
///
/// A placeholder the model dropped or duplicated is a data-integrity warning,
/// not an error: the mismatch is logged and the remaining spans are restored.
fn restore_protected_spans(text: &str, spans: &[(String, String)]) -> String {
    let mut restored = text.to_string();

    for (placeholder, original) in spans {
        match restored.matches(placeholder.as_str()).count() {
            1 => restored = restored.replace(placeholder.as_str(), original),
            0 => warn!(
                "translation output dropped placeholder {}; its span cannot be restored",
                placeholder
            ),
            n => {
                warn!(
                    "translation output repeated placeholder {} {} times",
                    placeholder, n
                );
                restored = restored.replace(placeholder.as_str(), original);
            }
        }
    }

    restored
}

impl TranslateAgent {
    pub fn new(llm: Arc<dyn CompletionProvider>) -> Self {
        Self { llm }
    }

    /// Translate `markdown` to Urdu, preserving code and LaTeX spans.
    pub async fn translate(&self, markdown: &str) -> Result<String> {
        if markdown.trim().is_empty() {
            return Err(Error::InvalidInput(
                "no content provided for translation".to_string(),
            ));
        }

        let (text, spans) = extract_protected_spans(markdown);

        let user = format!(
            "Translate the following educational content to Urdu.\n\
             \n\
             RULES:\n\
             1. Translate only natural language text (headings, paragraphs, list items)\n\
             2. Keep ALL placeholders (___CODE_BLOCK_N___, ___LATEX_N___) EXACTLY as they are\n\
             3. Preserve Docusaurus admonition syntax (:::note, :::warning, etc.) but translate \
             inner text\n\
             4. Keep technical terms in English where no direct Urdu equivalent exists\n\
             5. Maintain markdown formatting (headings #, lists -, etc.)\n\
             \n\
             Content to translate:\n\
             {}",
            text
        );

        let config = CompletionConfig {
            temperature: 0.3,
            max_tokens: 3000,
            ..Default::default()
        };

        let translated = self
            .llm
            .complete(TRANSLATE_SYSTEM_PROMPT, &user, &config)
            .await?;

        if translated.trim().is_empty() {
            return Ok(BLANK_TRANSLATION_URDU.to_string());
        }

        Ok(restore_protected_spans(&translated, &spans))
    }
}

#[cfg(test)]
mod span_tests {
    use super::*;

    #[test]
    fn extracts_code_blocks_then_latex_with_one_counter() {
        let markdown = "intro $a+b$ middle\n```python\nprint(1)\n```\ntail $$x^2$$";
        let (text, spans) = extract_protected_spans(markdown);

        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].0, "___CODE_BLOCK_0___");
        assert_eq!(spans[0].1, "```python\nprint(1)\n```");
        assert_eq!(spans[1].0, "___LATEX_1___");
        assert_eq!(spans[1].1, "$a+b$");
        assert_eq!(spans[2].0, "___LATEX_2___");
        assert_eq!(spans[2].1, "$$x^2$$");
        assert!(!text.contains("print(1)"));
        assert!(!text.contains("$a+b$"));
    }

    #[test]
    fn restore_is_exact_for_intact_placeholders() {
        let markdown = "before\n```rust\nlet x = 1;\n```\nafter $e=mc^2$";
        let (text, spans) = extract_protected_spans(markdown);
        let restored = restore_protected_spans(&text, &spans);

        assert_eq!(restored, markdown);
    }

    #[test]
    fn restore_keeps_remaining_spans_when_one_is_dropped() {
        let markdown = "a $x$ b $y$ c";
        let (text, spans) = extract_protected_spans(markdown);
        let mutilated = text.replace(&spans[0].0, "");
        let restored = restore_protected_spans(&mutilated, &spans);

        assert!(!restored.contains("$x$"));
        assert!(restored.contains("$y$"));
    }

    #[test]
    fn restore_expands_duplicated_placeholders() {
        let markdown = "only $z$ here";
        let (text, spans) = extract_protected_spans(markdown);
        let duplicated = format!("{} {}", text, spans[0].0);
        let restored = restore_protected_spans(&duplicated, &spans);

        assert_eq!(restored.matches("$z$").count(), 2);
    }
}
