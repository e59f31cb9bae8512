//! Run tokenizer for the change detection pipeline.
//!
//! Splits text into maximal runs that are either all-whitespace or
//! all-non-whitespace. Whitespace runs are kept as first-class tokens, so
//! concatenating the output reproduces the input byte-for-byte. That
//! round-trip identity is what makes token-boundary offsets valid
//! coordinates into the original string.

/// Splits `text` into maximal whitespace / non-whitespace runs.
///
/// Pure and deterministic. Concatenating the returned slices in order
/// yields exactly `text`. Every slice boundary is a `char` boundary.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut run_start = 0;
    let mut run_is_ws: Option<bool> = None;

    for (pos, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        match run_is_ws {
            None => run_is_ws = Some(is_ws),
            Some(prev) if prev == is_ws => {}
            Some(_) => {
                tokens.push(&text[run_start..pos]);
                run_start = pos;
                run_is_ws = Some(is_ws);
            }
        }
    }

    if run_is_ws.is_some() {
        tokens.push(&text[run_start..]);
    }

    tokens
}
