// Reviewable-edit engine: tokenize -> align -> detect -> ledger -> reconstruct.
// Pure, synchronous, no I/O. The serving layer owns persistence and
// per-document serialization of toggles.

pub mod align;
pub mod detect;
pub mod ledger;
pub mod reconstruct;
pub mod tokenize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of a detected edit.
///
/// `Style` is never produced by detection; it is accepted on input so
/// externally-tagged changes round-trip through the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCategory {
    Grammar,
    Punctuation,
    Style,
}

/// One detected edit: a span of the original text and its suggested
/// replacement.
///
/// `start_offset`/`end_offset` are byte offsets into the original text,
/// half-open, computed from untrimmed token boundaries; they always fall on
/// `char` boundaries and are the authoritative coordinates for
/// reconstruction. Identity fields (`id`, segments, offsets) are fixed at
/// detection time; only `accepted` changes afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChange {
    /// Detection-order index, rendered as a string. Stable for the lifetime
    /// of one detection run.
    pub id: String,
    /// Trimmed substring of the original text being replaced.
    pub original_segment: String,
    /// Trimmed substring of the cleaned text replacing it.
    pub suggested_segment: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub category: ChangeCategory,
    /// Up to 50 characters of original text on each side of the span.
    /// Review aid only; never consulted during reconstruction.
    pub context: String,
    #[serde(default)]
    pub accepted: bool,
}

/// Errors surfaced by the ledger and the reconstructor.
///
/// Detection itself cannot fail on string input: empty or degenerate inputs
/// produce an empty change list.
#[derive(Debug, Error)]
pub enum RevisionError {
    #[error("no change with id '{0}'")]
    UnknownChangeId(String),

    #[error("changes '{first}' and '{second}' have overlapping ranges")]
    OverlappingChanges { first: String, second: String },

    #[error("change '{id}' range [{start}, {end}) is not a valid span of a {len}-byte text")]
    OffsetOutOfBounds {
        id: String,
        start: usize,
        end: usize,
        len: usize,
    },
}

pub use detect::detect;
pub use ledger::ChangeLedger;
pub use reconstruct::reconstruct;
