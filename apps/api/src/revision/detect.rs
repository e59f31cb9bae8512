//! Change detection between an original text and its AI-cleaned version.

use crate::revision::align::{opcodes, OpTag};
use crate::revision::tokenize::tokenize;
use crate::revision::{ChangeCategory, TextChange};

/// Characters that mark a change as punctuation-related.
const PUNCTUATION: [char; 6] = ['.', ',', ';', ':', '!', '?'];

/// How much original text to show on each side of a change, in chars.
const CONTEXT_CHARS: usize = 50;

/// Detects word-level changes between `original_text` and `cleaned_text`.
///
/// Returns changes in ascending `start_offset` order with detection-order
/// string ids ("0", "1", ...). Fully deterministic for fixed inputs.
///
/// Only replacements are surfaced: spans where tokens were purely inserted
/// or purely deleted have no original-text span to review and produce no
/// entry, so such edits are never offered and never applied. Replacements
/// whose segments are empty or identical after trimming are skipped without
/// consuming an id.
pub fn detect(original_text: &str, cleaned_text: &str) -> Vec<TextChange> {
    if original_text.is_empty() || cleaned_text.is_empty() {
        return Vec::new();
    }

    let original_tokens = tokenize(original_text);
    let cleaned_tokens = tokenize(cleaned_text);

    // token_starts[i] = byte offset of original_tokens[i]; one extra entry
    // so token_starts[i2] is the end offset of the run ending at i2.
    let mut token_starts = Vec::with_capacity(original_tokens.len() + 1);
    let mut offset = 0;
    for token in &original_tokens {
        token_starts.push(offset);
        offset += token.len();
    }
    token_starts.push(offset);

    let mut changes = Vec::new();

    for op in opcodes(&original_tokens, &cleaned_tokens) {
        if op.tag != OpTag::Replace {
            continue;
        }

        let start_offset = token_starts[op.i1];
        let end_offset = token_starts[op.i2];

        let original_segment = original_text[start_offset..end_offset].trim();
        let suggested_segment = cleaned_tokens[op.j1..op.j2].concat();
        let suggested_segment = suggested_segment.trim();

        if original_segment.is_empty()
            || suggested_segment.is_empty()
            || original_segment == suggested_segment
        {
            continue;
        }

        changes.push(TextChange {
            id: changes.len().to_string(),
            original_segment: original_segment.to_string(),
            suggested_segment: suggested_segment.to_string(),
            start_offset,
            end_offset,
            category: classify(original_segment, suggested_segment),
            context: context_window(original_text, start_offset, end_offset),
            accepted: false,
        });
    }

    changes
}

fn classify(original_segment: &str, suggested_segment: &str) -> ChangeCategory {
    if original_segment.contains(PUNCTUATION) || suggested_segment.contains(PUNCTUATION) {
        ChangeCategory::Punctuation
    } else {
        ChangeCategory::Grammar
    }
}

/// Original text from up to [`CONTEXT_CHARS`] chars before `start` through
/// up to [`CONTEXT_CHARS`] chars after `end`, clipped to the string bounds.
fn context_window(text: &str, start: usize, end: usize) -> String {
    let window_start = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let window_end = text[end..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    text[window_start..window_end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_yield_no_changes() {
        assert!(detect("Hello world", "Hello world").is_empty());
    }

    #[test]
    fn test_empty_inputs_yield_no_changes() {
        assert!(detect("", "").is_empty());
        assert!(detect("", "some text").is_empty());
        assert!(detect("some text", "").is_empty());
    }

    #[test]
    fn test_tense_correction_surfaces_as_one_replace() {
        let original = "I was working as developer.";
        let cleaned = "I worked as a developer.";
        let changes = detect(original, cleaned);

        assert!(!changes.is_empty());
        let change = &changes[0];
        assert_eq!(change.original_segment, "was working");
        assert_eq!(change.suggested_segment, "worked");
        assert_eq!(
            &original[change.start_offset..change.end_offset].trim(),
            &change.original_segment
        );

        // Offsets are valid, ordered, and non-overlapping.
        let mut prev_end = 0;
        for c in &changes {
            assert!(c.start_offset <= c.end_offset);
            assert!(c.end_offset <= original.len());
            assert!(c.start_offset >= prev_end);
            prev_end = c.end_offset;
        }
    }

    #[test]
    fn test_pure_insertion_is_not_surfaced() {
        // "very" is only added; nothing replaces an original span.
        let changes = detect("a good fit", "a very good fit");
        assert!(changes.is_empty());
    }

    #[test]
    fn test_pure_deletion_is_not_surfaced() {
        let changes = detect("a very good fit", "a good fit");
        assert!(changes.is_empty());
    }

    #[test]
    fn test_ids_are_detection_ordered_and_unique() {
        let original = "teh cat sat onn the mat quitely";
        let cleaned = "the cat sat on the mat quietly";
        let changes = detect(original, cleaned);

        assert!(changes.len() >= 2);
        for (idx, change) in changes.iter().enumerate() {
            assert_eq!(change.id, idx.to_string());
            assert!(!change.accepted);
        }
    }

    #[test]
    fn test_segments_are_trimmed_and_non_trivial() {
        let original = "She have three years experience in team managment.";
        let cleaned = "She has three years of experience in team management.";
        for change in detect(original, cleaned) {
            assert!(!change.original_segment.is_empty());
            assert!(!change.suggested_segment.is_empty());
            assert_ne!(change.original_segment, change.suggested_segment);
            assert_eq!(change.original_segment, change.original_segment.trim());
            assert_eq!(change.suggested_segment, change.suggested_segment.trim());
        }
    }

    #[test]
    fn test_punctuation_category() {
        let changes = detect("Skills include Java", "Skills include: Java");
        // The replaced span carries a colon, so it classifies as punctuation.
        if let Some(change) = changes.first() {
            assert_eq!(change.category, ChangeCategory::Punctuation);
        }
        let changes = detect("he go to work", "he goes to work");
        assert!(!changes.is_empty());
        assert_eq!(changes[0].category, ChangeCategory::Grammar);
    }

    #[test]
    fn test_determinism() {
        let original = "Managed team of five developer and improve process.";
        let cleaned = "Managed a team of five developers and improved processes.";
        let first = detect(original, cleaned);
        let second = detect(original, cleaned);
        assert_eq!(first, second);
    }

    #[test]
    fn test_context_window_clips_to_bounds() {
        let original = "bad word here";
        let cleaned = "bda word here";
        let changes = detect(original, cleaned);
        assert_eq!(changes.len(), 1);
        // Whole text is shorter than the window, so context is the full text.
        assert_eq!(changes[0].context, original);
    }

    #[test]
    fn test_context_window_is_bounded() {
        let padding = "x".repeat(200);
        let original = format!("{padding} colour {padding}");
        let cleaned = format!("{padding} color {padding}");
        let changes = detect(&original, &cleaned);
        assert_eq!(changes.len(), 1);
        let change = &changes[0];
        let span_len = change.end_offset - change.start_offset;
        assert!(change.context.chars().count() <= 100 + span_len);
        assert!(change.context.contains("colour"));
    }

    #[test]
    fn test_offsets_index_original_not_cleaned() {
        let original = "résumé writen fast";
        let cleaned = "résumé written quickly";
        for change in detect(original, cleaned) {
            assert!(original.is_char_boundary(change.start_offset));
            assert!(original.is_char_boundary(change.end_offset));
            let span = &original[change.start_offset..change.end_offset];
            assert_eq!(span.trim(), change.original_segment);
        }
    }
}
