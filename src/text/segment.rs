//! Block segmentation
//!
//! Splits a flat text snapshot into blocks: runs ending in sentence
//! punctuation, and parenthetical asides. Boundaries are derived purely from
//! content, so re-running on the joined output reproduces the same blocks.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::ops::Range;

/// Terminal punctuation, ASCII and fullwidth CJK forms
const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?', '…', '。', '？', '！'];

/// Closing quotes allowed directly after terminal punctuation (straight and curly)
const CLOSING_QUOTES: &[char] = &['"', '\'', '”', '’'];

/// Punctuation run, optional closing quote, trailing whitespace.
/// The boundary goes after the whole match.
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| {
    let punctuation: String = TERMINAL_PUNCTUATION.iter().collect();
    let quotes: String = CLOSING_QUOTES.iter().collect();
    let pattern = format!(
        r"[{}]+[{}]?\s*",
        regex::escape(&punctuation),
        regex::escape(&quotes)
    );
    Regex::new(&pattern).expect("valid sentence-end pattern")
});

/// First-close-wins parenthetical: `(` up to the first `)`, at least one char inside.
/// Nested parentheses close early on purpose.
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]+\)").expect("valid parenthetical pattern"));

/// Split `text` into blocks.
///
/// Whitespace-only pieces between boundaries are dropped; every other piece
/// is returned verbatim, in order.
pub fn segment(text: &str) -> Vec<String> {
    segment_spans(text)
        .into_iter()
        .map(|span| text[span].to_string())
        .collect()
}

/// Byte ranges of the blocks `segment` would return.
pub fn segment_spans(text: &str) -> Vec<Range<usize>> {
    let boundaries = boundaries(text);

    let mut spans = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0;
    for end in boundaries.into_iter().chain(std::iter::once(text.len())) {
        if end <= start {
            continue;
        }
        if !text[start..end].trim().is_empty() {
            spans.push(start..end);
        }
        start = end;
    }

    log::trace!("segmented {} bytes into {} blocks", text.len(), spans.len());
    spans
}

/// Boundary byte offsets, sentence-end pass first, then parenthetical pass.
fn boundaries(text: &str) -> BTreeSet<usize> {
    let mut marks = BTreeSet::new();

    for m in SENTENCE_END.find_iter(text) {
        marks.insert(m.end());
    }

    for m in PARENTHETICAL.find_iter(text) {
        marks.insert(m.start());
        marks.insert(m.end());
    }

    marks.remove(&0);
    marks.remove(&text.len());
    marks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sentences() {
        assert_eq!(
            segment("Hello world. How are you?"),
            vec!["Hello world. ", "How are you?"]
        );
    }

    #[test]
    fn test_parenthetical_is_its_own_block() {
        assert_eq!(
            segment("He said (quietly) hello."),
            vec!["He said ", "(quietly)", " hello."]
        );
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\t").is_empty());
    }

    #[test]
    fn test_no_trigger_is_one_block() {
        assert_eq!(segment("just some words"), vec!["just some words"]);
    }

    #[test]
    fn test_punctuation_run_and_closing_quote() {
        assert_eq!(
            segment("Really?!\" she asked. Yes…"),
            vec!["Really?!\" ", "she asked. ", "Yes…"]
        );
        assert_eq!(
            segment("“Stop.” Then go."),
            vec!["“Stop.” ", "Then go."]
        );
    }

    #[test]
    fn test_fullwidth_punctuation() {
        assert_eq!(segment("你好。再见！"), vec!["你好。", "再见！"]);
    }

    #[test]
    fn test_sentence_end_followed_by_parenthesis() {
        assert_eq!(
            segment("Done. (aside) Next."),
            vec!["Done. ", "(aside)", " Next."]
        );
    }

    #[test]
    fn test_whitespace_only_gap_dropped() {
        assert_eq!(segment("(a) (b)"), vec!["(a)", "(b)"]);
    }

    #[test]
    fn test_nested_parentheses_close_at_first_paren() {
        assert_eq!(
            segment("x (a (b) c) y"),
            vec!["x ", "(a (b)", " c) y"]
        );
    }

    #[test]
    fn test_empty_parentheses_do_not_split() {
        assert_eq!(segment("call f() now"), vec!["call f() now"]);
    }

    #[test]
    fn test_sentence_inside_parenthetical_still_splits() {
        assert_eq!(segment("(Hi. there)"), vec!["(Hi. ", "there)"]);
    }

    #[test]
    fn test_internal_whitespace_preserved() {
        assert_eq!(
            segment("  Leading  spaces.\n\nNext   line."),
            vec!["  Leading  spaces.\n\n", "Next   line."]
        );
    }

    #[test]
    fn test_idempotent_on_joined_blocks() {
        let text = "One. Two? (three) four! Five";
        let first = segment(text);
        assert_eq!(segment(&first.concat()), first);
    }

    #[test]
    fn test_every_terminal_mark_ends_a_block() {
        for mark in TERMINAL_PUNCTUATION {
            let text = format!("a{} b", mark);
            assert_eq!(segment(&text), vec![format!("a{} ", mark), "b".to_string()]);
        }
    }

    #[test]
    fn test_every_closing_quote_stays_with_its_sentence() {
        for quote in CLOSING_QUOTES {
            let text = format!("Hi.{} Bye.", quote);
            assert_eq!(segment(&text), vec![format!("Hi.{} ", quote), "Bye.".to_string()]);
        }
    }
}
