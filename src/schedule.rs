//! Deterministic schedule of tournament triples.
//!
//! One match is played for every size-3 multiset of catalog indices: each
//! `(i, j, k)` with `i ≤ j ≤ k`, self-play included. The count is the
//! tetrahedral number `n(n+1)(n+2)/6`. A match index can also be unranked
//! straight to its triple, so any single match is replayable in isolation.

/// Total number of matches for `n` catalog entries.
pub fn triple_count(n: usize) -> u32 {
    let n = n as u64;
    ((n * (n + 1) * (n + 2)) / 6) as u32
}

/// All triples in enumeration order: `i` outermost, `k` innermost.
pub fn enumerate_triples(n: usize) -> Vec<(usize, usize, usize)> {
    let mut triples = Vec::with_capacity(triple_count(n) as usize);
    for i in 0..n {
        for j in i..n {
            for k in j..n {
                triples.push((i, j, k));
            }
        }
    }
    triples
}

/// Triple for a specific match index — O(1) memory, no enumeration.
///
/// Inverts the order of [`enumerate_triples`]: the block of triples starting
/// with `i` has one pair `(j, k)` per size-2 multiset of the remaining
/// `n - i` indices. Returns `None` when `match_index` is out of schedule.
pub fn triple_for_match(n: usize, match_index: u32) -> Option<(usize, usize, usize)> {
    if match_index >= triple_count(n) {
        return None;
    }
    let mut rank = u64::from(match_index);

    let mut i = 0usize;
    loop {
        let remaining = (n - i) as u64;
        let block = remaining * (remaining + 1) / 2;
        if rank < block {
            break;
        }
        rank -= block;
        i += 1;
    }

    let mut j = i;
    loop {
        let span = (n - j) as u64;
        if rank < span {
            break;
        }
        rank -= span;
        j += 1;
    }

    Some((i, j, j + rank as usize))
}
