//! Match execution engine

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::errors::EngineError;
use crate::payoff;
use crate::random::SeededRng;
use crate::strategy::{Move, StrategyKind};

/// Result of a single round, seat-indexed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub moves: [Move; 3],
    pub scores: [u8; 3],
    pub cumulative: [u32; 3],
}

/// Result of a complete match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub rounds: Vec<RoundResult>,
    pub totals: [u32; 3],
    /// Average payoff per seat: accumulated total over the round count.
    pub averages: [f64; 3],
    pub round_count: u32,
}

/// Run one match between three strategy kinds.
///
/// Each seat gets a fresh state built from `rng`, so repeated identities
/// within a triple still play independent copies. Every round the seats are
/// queried in fixed order against the histories of all prior rounds (the
/// current round excluded), scored through the cyclic payoff relabeling, and
/// only then are the round's moves appended. Histories grow monotonically
/// and are never rewritten.
pub fn run_match(
    kinds: [StrategyKind; 3],
    round_count: u32,
    rng: &mut SeededRng,
) -> Result<MatchResult, EngineError> {
    let mut seat_a = kinds[0].fresh_state(rng);
    let mut seat_b = kinds[1].fresh_state(rng);
    let mut seat_c = kinds[2].fresh_state(rng);

    let n = round_count as usize;
    let mut history_a: Vec<Move> = Vec::with_capacity(n);
    let mut history_b: Vec<Move> = Vec::with_capacity(n);
    let mut history_c: Vec<Move> = Vec::with_capacity(n);
    let mut rounds: Vec<RoundResult> = Vec::with_capacity(n);
    let mut totals = [0u32; 3];

    for round in 0..n {
        let a = seat_a.decide(round, &history_a, &history_b, &history_c, rng)?;
        let b = seat_b.decide(round, &history_b, &history_c, &history_a, rng)?;
        let c = seat_c.decide(round, &history_c, &history_a, &history_b, rng)?;

        // Each seat scores as "self" against the next and previous seats of
        // the A → B → C → A cycle.
        let scores = [payoff(a, b, c), payoff(b, c, a), payoff(c, a, b)];
        for (total, score) in totals.iter_mut().zip(scores) {
            *total += u32::from(score);
        }
        trace!(round, ?a, ?b, ?c, "round resolved");

        rounds.push(RoundResult {
            round: round as u32,
            moves: [a, b, c],
            scores,
            cumulative: totals,
        });

        history_a.push(a);
        history_b.push(b);
        history_c.push(c);
    }

    let averages = totals.map(|t| f64::from(t) / f64::from(round_count));
    Ok(MatchResult {
        rounds,
        totals,
        averages,
        round_count,
    })
}
