//! Token-sequence alignment.
//!
//! Produces grouped edit opcodes over two token sequences by recursively
//! finding the longest common block and diffing the regions on either side.
//! The recursive form matters: a flat LCS backtrack latches onto whitespace
//! tokens (they all compare equal) and shreds one logical replacement into
//! several unrelated ones.
//!
//! Worst-case cost is the product of the two token counts. Fine for
//! resume-length documents, not meant for large or streaming inputs.

use std::collections::HashMap;

/// One alignment operation over token index ranges `[i1, i2)` in the
/// original sequence and `[j1, j2)` in the cleaned sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: OpTag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    Equal,
    Insert,
    Delete,
    Replace,
}

/// Computes grouped opcodes covering both sequences end to end.
///
/// Opcodes partition `[0, a.len())` and `[0, b.len())` without gaps or
/// overlap, in ascending order. Adjacent opcodes never share a tag.
pub fn opcodes(a: &[&str], b: &[&str]) -> Vec<Opcode> {
    let mut ops = Vec::new();
    let (mut i, mut j) = (0, 0);

    for (block_i, block_j, size) in matching_blocks(a, b) {
        let tag = match (i < block_i, j < block_j) {
            (true, true) => Some(OpTag::Replace),
            (true, false) => Some(OpTag::Delete),
            (false, true) => Some(OpTag::Insert),
            (false, false) => None,
        };
        if let Some(tag) = tag {
            ops.push(Opcode {
                tag,
                i1: i,
                i2: block_i,
                j1: j,
                j2: block_j,
            });
        }
        if size > 0 {
            ops.push(Opcode {
                tag: OpTag::Equal,
                i1: block_i,
                i2: block_i + size,
                j1: block_j,
                j2: block_j + size,
            });
        }
        i = block_i + size;
        j = block_j + size;
    }

    ops
}

/// Maximal common blocks `(i, j, size)` in ascending order, adjacent blocks
/// merged, terminated by the zero-length sentinel `(a.len(), b.len(), 0)`.
fn matching_blocks(a: &[&str], b: &[&str]) -> Vec<(usize, usize, usize)> {
    let mut blocks = Vec::new();
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size > 0 {
            blocks.push((i, j, size));
            pending.push((alo, i, blo, j));
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    blocks.sort_unstable();

    let mut merged: Vec<(usize, usize, usize)> = Vec::new();
    for (i, j, size) in blocks {
        match merged.last_mut() {
            Some(last) if last.0 + last.2 == i && last.1 + last.2 == j => last.2 += size,
            _ => merged.push((i, j, size)),
        }
    }
    merged.push((a.len(), b.len(), 0));
    merged
}

/// Longest block of identical tokens within `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties break toward the earliest start in `a`, then in `b`, which keeps the
/// whole alignment deterministic. `run_len[j]` holds the length of the
/// common run ending at `(i, j)`; rebuilding it per row keeps memory at one
/// map instead of a full table.
fn longest_match(
    a: &[&str],
    b: &[&str],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    let mut run_len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut next_run_len = HashMap::new();
        for j in blo..bhi {
            if a[i] == b[j] {
                let len = if j > blo {
                    run_len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                next_run_len.insert(j, len);
                if len > best_size {
                    best_i = i + 1 - len;
                    best_j = j + 1 - len;
                    best_size = len;
                }
            }
        }
        run_len = next_run_len;
    }

    (best_i, best_j, best_size)
}
