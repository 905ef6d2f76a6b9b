//! Bounded context assembly from ranked search hits

use stp_core::SearchHit;

/// Default character budget for assembled context.
pub const MAX_CONTEXT_CHARS: usize = 2000;

fn format_block(hit: &SearchHit) -> String {
    format!(
        "Title: {}\nContent: {}\nSource: {}\n\n",
        hit.section_title, hit.text, hit.chapter_slug
    )
}

/// Concatenate ranked hits into a bounded context string.
///
/// Blocks are appended whole, in rank order; the first block that would push
/// the running total past `max_chars` is dropped along with everything after
/// it. A first block that alone exceeds the budget therefore yields an empty
/// context. Returns the context and the number of leading hits included,
/// which the engine uses to cite exactly the hits that back the answer.
pub fn assemble_context(hits: &[SearchHit], max_chars: usize) -> (String, usize) {
    let mut context = String::new();
    let mut included = 0;

    for hit in hits {
        let block = format_block(hit);
        if context.len() + block.len() > max_chars {
            break;
        }
        context.push_str(&block);
        included += 1;
    }

    (context, included)
}

/// Bounded context without the inclusion count.
pub fn build_context(hits: &[SearchHit], max_chars: usize) -> String {
    assemble_context(hits, max_chars).0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(section_title: &str, text: &str) -> SearchHit {
        SearchHit {
            text: text.to_string(),
            chapter_slug: "chapter-1".to_string(),
            section_title: section_title.to_string(),
            score: 0.9,
        }
    }

    #[test]
    fn includes_blocks_in_rank_order() {
        let hits = vec![hit("Nodes", "first"), hit("Topics", "second")];
        let (context, included) = assemble_context(&hits, 1000);

        assert_eq!(included, 2);
        let first = context.find("first").unwrap();
        let second = context.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn stops_before_the_block_that_would_exceed_the_budget() {
        let hits = vec![hit("A", "short"), hit("B", &"x".repeat(500))];
        let first_block_len = format_block(&hits[0]).len();
        let (context, included) = assemble_context(&hits, first_block_len + 10);

        assert_eq!(included, 1);
        assert!(context.contains("short"));
        assert!(!context.contains("xxx"));
        assert!(context.len() <= first_block_len + 10);
    }

    #[test]
    fn oversized_first_block_yields_empty_context() {
        let hits = vec![hit("Huge", &"x".repeat(5000))];
        let (context, included) = assemble_context(&hits, 100);

        assert!(context.is_empty());
        assert_eq!(included, 0);
    }

    #[test]
    fn never_exceeds_the_budget() {
        let hits: Vec<SearchHit> = (0..20)
            .map(|i| hit(&format!("Section {}", i), &"word ".repeat(30)))
            .collect();
        let (context, _) = assemble_context(&hits, MAX_CONTEXT_CHARS);

        assert!(context.len() <= MAX_CONTEXT_CHARS);
    }

    #[test]
    fn is_deterministic() {
        let hits = vec![hit("Nodes", "alpha"), hit("Topics", "beta")];
        assert_eq!(
            build_context(&hits, 1000),
            build_context(&hits, 1000)
        );
    }

    #[test]
    fn empty_hits_yield_empty_context() {
        let (context, included) = assemble_context(&[], MAX_CONTEXT_CHARS);
        assert!(context.is_empty());
        assert_eq!(included, 0);
    }
}
