//! Replays accepted changes against the original text.

use crate::revision::{RevisionError, TextChange};

/// Applies every accepted change to `original_text`, returning the final
/// text and the number of changes applied.
///
/// Changes are applied in descending `start_offset` order. Offsets were
/// computed against the unmodified original, so editing right-to-left keeps
/// every not-yet-applied range pointing at untouched coordinates; editing
/// left-to-right would shift all later offsets.
///
/// Offsets that fall outside the text (or off a `char` boundary) and
/// overlapping accepted ranges are invariant violations: both are fatal to
/// the call rather than silently reordered or clipped. Pure function;
/// identical inputs always produce identical output.
pub fn reconstruct(
    original_text: &str,
    changes: &[TextChange],
) -> Result<(String, usize), RevisionError> {
    let mut accepted: Vec<&TextChange> = changes.iter().filter(|c| c.accepted).collect();
    accepted.sort_by(|a, b| b.start_offset.cmp(&a.start_offset));

    for change in &accepted {
        let valid = change.start_offset <= change.end_offset
            && change.end_offset <= original_text.len()
            && original_text.is_char_boundary(change.start_offset)
            && original_text.is_char_boundary(change.end_offset);
        if !valid {
            return Err(RevisionError::OffsetOutOfBounds {
                id: change.id.clone(),
                start: change.start_offset,
                end: change.end_offset,
                len: original_text.len(),
            });
        }
    }

    // Descending order: each change must start at or past the end of the
    // next (earlier-positioned) one.
    for pair in accepted.windows(2) {
        let (later, earlier) = (pair[0], pair[1]);
        if earlier.end_offset > later.start_offset {
            return Err(RevisionError::OverlappingChanges {
                first: earlier.id.clone(),
                second: later.id.clone(),
            });
        }
    }

    let mut final_text = original_text.to_string();
    for change in &accepted {
        final_text.replace_range(
            change.start_offset..change.end_offset,
            &change.suggested_segment,
        );
    }

    Ok((final_text, accepted.len()))
}
