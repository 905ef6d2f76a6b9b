//! Markdown textbook ingestion

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use stp_core::{Document, EmbeddingProvider, Result, VectorStore};

/// Outcome of one ingestion batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    /// Markdown files found, whether or not they loaded.
    pub files_processed: usize,
    pub files_loaded: usize,
    pub errors: Vec<String>,
}

impl IngestReport {
    /// Loaded files as a percentage of files found.
    pub fn success_rate(&self) -> f64 {
        if self.files_processed == 0 {
            return 0.0;
        }
        self.files_loaded as f64 / self.files_processed as f64 * 100.0
    }
}

/// Walks a docs directory and upserts each markdown file as one document.
pub struct TextbookLoader {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl TextbookLoader {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Ingest every `*.md` file under `dir`.
    ///
    /// Per-file failures (unreadable file, embedding or upsert error) are
    /// recorded in the report and never abort the rest of the batch.
    pub async fn load_dir(&self, dir: &Path) -> Result<IngestReport> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
            })
            .collect();
        files.sort();

        let mut report = IngestReport {
            files_processed: files.len(),
            files_loaded: 0,
            errors: Vec::new(),
        };

        for path in &files {
            match self.load_file(path).await {
                Ok(()) => report.files_loaded += 1,
                Err(e) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    warn!("failed to load {}: {}", name, e);
                    report.errors.push(format!("{}: {}", name, e));
                }
            }
        }

        info!(
            "ingested {}/{} textbook files",
            report.files_loaded, report.files_processed
        );

        Ok(report)
    }

    async fn load_file(&self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)?;

        let chapter_slug = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let section_title = first_heading(&text).unwrap_or_else(|| "Untitled".to_string());

        let document = Document {
            id: Uuid::new_v4().to_string(),
            text: text.clone(),
            chapter_slug,
            section_title,
        };

        let vector = self.embedder.embed(&text).await?;
        self.store.upsert(&document, vector).await
    }
}

/// Title text of the first H1 or H2 heading, if any.
fn first_heading(markdown: &str) -> Option<String> {
    let mut in_heading = false;
    let mut title = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1 | HeadingLevel::H2,
                ..
            }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) if in_heading => {
                let trimmed = title.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
                in_heading = false;
                title.clear();
            }
            Event::Text(text) if in_heading => title.push_str(&text),
            Event::Code(code) if in_heading => title.push_str(&code),
            _ => {}
        }
    }

    None
}
