//! Strategy catalog, per-match state, and decision rules.
//!
//! A strategy decides each round from the public history plus its own private
//! per-match memory. [`StrategyKind`] is the stateless catalog entry;
//! [`StrategyKind::fresh_state`] builds the [`StrategyState`] a seat uses for
//! exactly one match. Histories passed to a decision call contain exactly
//! `round` entries — the outcomes of all prior rounds, never the current one.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::random::SeededRng;

/// A move in one round of the dilemma.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    /// Action bit used for payoff indexing: cooperate = 0, defect = 1.
    pub fn bit(self) -> usize {
        match self {
            Move::Cooperate => 0,
            Move::Defect => 1,
        }
    }

    /// Decode a raw action bit. Anything outside {0, 1} is invalid.
    pub fn from_bit(bit: i64) -> Option<Self> {
        match bit {
            0 => Some(Move::Cooperate),
            1 => Some(Move::Defect),
            _ => None,
        }
    }
}

/// Rounds a defection is forgiven for before `ForgivingTitForTat` retaliates.
const DEFAULT_FORGIVENESS: u32 = 2;

/// Defecting rounds before `RelentingGrim` re-opens its latch.
const RELENT_AFTER: u32 = 3;

/// Defection rounds `ForgivingGrim` tolerates before latching for good.
const FORGIVENESS_BUDGET: u32 = 2;

/// Sub-strategy weights for `WeightedConsensus`: mirror, tolerant, gradual.
/// Ad hoc by design; kept as a documented variant.
const CONSENSUS_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];

/// Catalog entry: the kind of strategy a seat plays.
///
/// Kinds are stateless and cheap to copy; all per-match memory lives in the
/// [`StrategyState`] built by [`StrategyKind::fresh_state`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Always cooperates.
    AlwaysCooperate,
    /// Always defects.
    AlwaysDefect,
    /// Defects once opponents' observed defections outnumber cooperations.
    Tolerant,
    /// Mirrors the last move of a randomly chosen opponent.
    TitForTat,
    /// Mirrors the more cooperative opponent. Opens with defection.
    SuspiciousTitForTat,
    /// Defects after two consecutive defections from the first opponent.
    TitForTwoTats,
    /// Tit-for-tat that forgives defection during the first `threshold` rounds.
    ForgivingTitForTat { threshold: u32 },
    /// Cooperates until the first opponent defects once, then defects forever.
    GrimTrigger,
    /// Cooperates while joint cooperation keeps up with half the rounds seen.
    Spiteful,
    /// Cooperates after a successful round, defects otherwise.
    Pavlov,
    /// Defects when the first opponent defected more than once in the last
    /// four rounds.
    Gradual,
    /// Defects on even rounds, cooperates on odd ones.
    Alternator,
    /// Grim latch that releases after a few rounds of retaliation.
    RelentingGrim,
    /// Grim trigger with a small forgiveness budget before latching.
    ForgivingGrim,
    /// Weighted blend of mirror, tolerant, and gradual recommendations.
    WeightedConsensus,
    /// Deactivating chain: grim, then forgiving, then gradual.
    PriorityChain,
    /// Cooperates with probability 1/2 each round.
    Random,
    /// Commits to one randomly drawn action for the whole match.
    Frozen,
}

/// The stock catalog, in tie-break order. Randomized kinds are excluded so
/// every entry has a deterministic cooperative opening (except the one
/// deliberate suspicious opener).
const DEFAULT_CATALOG: [StrategyKind; 16] = [
    StrategyKind::AlwaysCooperate,
    StrategyKind::AlwaysDefect,
    StrategyKind::Tolerant,
    StrategyKind::TitForTat,
    StrategyKind::SuspiciousTitForTat,
    StrategyKind::TitForTwoTats,
    StrategyKind::ForgivingTitForTat {
        threshold: DEFAULT_FORGIVENESS,
    },
    StrategyKind::GrimTrigger,
    StrategyKind::Spiteful,
    StrategyKind::Pavlov,
    StrategyKind::Gradual,
    StrategyKind::Alternator,
    StrategyKind::RelentingGrim,
    StrategyKind::ForgivingGrim,
    StrategyKind::WeightedConsensus,
    StrategyKind::PriorityChain,
];

/// The 16-entry catalog used by the stock tournament.
pub fn default_catalog() -> Vec<StrategyKind> {
    DEFAULT_CATALOG.to_vec()
}

impl StrategyKind {
    /// Catalog name, also used in error reports.
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::AlwaysCooperate => "AlwaysCooperate",
            StrategyKind::AlwaysDefect => "AlwaysDefect",
            StrategyKind::Tolerant => "Tolerant",
            StrategyKind::TitForTat => "TitForTat",
            StrategyKind::SuspiciousTitForTat => "SuspiciousTitForTat",
            StrategyKind::TitForTwoTats => "TitForTwoTats",
            StrategyKind::ForgivingTitForTat { .. } => "ForgivingTitForTat",
            StrategyKind::GrimTrigger => "GrimTrigger",
            StrategyKind::Spiteful => "Spiteful",
            StrategyKind::Pavlov => "Pavlov",
            StrategyKind::Gradual => "Gradual",
            StrategyKind::Alternator => "Alternator",
            StrategyKind::RelentingGrim => "RelentingGrim",
            StrategyKind::ForgivingGrim => "ForgivingGrim",
            StrategyKind::WeightedConsensus => "WeightedConsensus",
            StrategyKind::PriorityChain => "PriorityChain",
            StrategyKind::Random => "Random",
            StrategyKind::Frozen => "Frozen",
        }
    }

    /// Human-readable description for reporting layers.
    pub fn describe(self) -> String {
        let base = match self {
            StrategyKind::AlwaysCooperate => "Never defects. Always cooperates.",
            StrategyKind::AlwaysDefect => "Never cooperates. Always defects.",
            StrategyKind::Tolerant => {
                "Defects once opponents' defections outnumber their cooperations."
            }
            StrategyKind::TitForTat => {
                "Copies the last move of a randomly chosen opponent. Starts by cooperating."
            }
            StrategyKind::SuspiciousTitForTat => {
                "Copies the more cooperative opponent, but starts with defect."
            }
            StrategyKind::TitForTwoTats => {
                "Retaliates hard after two consecutive defections, else mirrors."
            }
            StrategyKind::ForgivingTitForTat { .. } => {
                "Tit-for-tat that forgives early defections."
            }
            StrategyKind::GrimTrigger => "Cooperates until betrayed, then always defects.",
            StrategyKind::Spiteful => {
                "Cooperates while both opponents keep cooperating at least half the time."
            }
            StrategyKind::Pavlov => "Repeats success, switches after failure.",
            StrategyKind::Gradual => {
                "Defects when recent history shows more than one defection."
            }
            StrategyKind::Alternator => "Alternates between cooperation and defection.",
            StrategyKind::RelentingGrim => {
                "Retaliates like grim trigger, then relents after a few rounds."
            }
            StrategyKind::ForgivingGrim => {
                "Forgives a couple of defections, then latches into permanent defection."
            }
            StrategyKind::WeightedConsensus => {
                "Blends mirror, tolerant, and gradual advice into one move."
            }
            StrategyKind::PriorityChain => {
                "Runs grim, forgiving, and gradual in turn, dropping each once it fires."
            }
            StrategyKind::Random => "Randomly cooperates or defects each round.",
            StrategyKind::Frozen => "Commits to one random action for the whole match.",
        };

        match self {
            StrategyKind::ForgivingTitForTat { threshold } => {
                format!("{base} Forgives for the first {threshold} rounds.")
            }
            _ => base.to_string(),
        }
    }

    /// Build the catalog entry at `index`, in stock catalog order.
    pub fn from_index(index: usize) -> Result<Self, EngineError> {
        DEFAULT_CATALOG
            .get(index)
            .copied()
            .ok_or(EngineError::UnknownStrategy { index })
    }

    /// Fresh per-match decision state for one seat.
    ///
    /// Never reuse a state across matches: several kinds carry latches and
    /// counters that must start from the opening round.
    pub fn fresh_state(self, rng: &mut SeededRng) -> StrategyState {
        let mut mem = Memory::default();
        if self == StrategyKind::Frozen {
            mem.committed = Some(if rng.next_percent() < 50 {
                Move::Cooperate
            } else {
                Move::Defect
            });
        }
        StrategyState { kind: self, mem }
    }
}

/// Private per-match memory. One flat record covers every kind; each decision
/// rule touches only its own fields.
#[derive(Clone, Debug, Default)]
struct Memory {
    /// Action committed at match start (Frozen).
    committed: Option<Move>,
    /// Grim-family latch.
    triggered: bool,
    /// Forgiveness spent before the latch closes (ForgivingGrim).
    forgiven: u32,
    /// Currently retaliating (RelentingGrim).
    defecting: bool,
    /// Rounds spent in the current retaliation (RelentingGrim).
    rounds_in_mode: u32,
    /// Rounds observed so far (Spiteful).
    rounds_seen: u32,
    /// Rounds in which both opponents cooperated (Spiteful).
    joint_coop: u32,
    /// Sub-strategy activation flags (PriorityChain).
    chain: ChainFlags,
}

/// PriorityChain bookkeeping: which sub-strategies are still active, plus the
/// per-opponent move tracking its trigger detection runs on.
#[derive(Clone, Debug, Default)]
struct ChainFlags {
    grim: bool,
    forgiving: bool,
    gradual: bool,
    opp1_defected: bool,
    opp2_defected: bool,
    opp1_last: Option<Move>,
    opp2_last: Option<Move>,
}

/// Per-seat, per-match decision state.
#[derive(Clone, Debug)]
pub struct StrategyState {
    kind: StrategyKind,
    mem: Memory,
}

impl StrategyState {
    /// The catalog entry this state was built from.
    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Decide the move for `round`.
    ///
    /// `own`, `opp1`, and `opp2` hold the prior rounds in seat-cyclic order
    /// (own seat, next seat, previous seat) and each has exactly `round`
    /// entries. The histories are read-only; only this state's private
    /// memory may change.
    pub fn decide(
        &mut self,
        round: usize,
        own: &[Move],
        opp1: &[Move],
        opp2: &[Move],
        rng: &mut SeededRng,
    ) -> Result<Move, EngineError> {
        match self.kind {
            StrategyKind::AlwaysCooperate => Ok(Move::Cooperate),
            StrategyKind::AlwaysDefect => Ok(Move::Defect),
            StrategyKind::Tolerant => Ok(decide_tolerant(opp1, opp2)),
            StrategyKind::TitForTat => Ok(decide_tit_for_tat(round, opp1, opp2, rng)),
            StrategyKind::SuspiciousTitForTat => Ok(decide_suspicious(opp1, opp2)),
            StrategyKind::TitForTwoTats => Ok(decide_tit_for_two_tats(opp1)),
            StrategyKind::ForgivingTitForTat { threshold } => {
                Ok(decide_forgiving_tft(round, opp1, threshold))
            }
            StrategyKind::GrimTrigger => Ok(decide_grim(&mut self.mem, opp1)),
            StrategyKind::Spiteful => Ok(decide_spiteful(&mut self.mem, opp1, opp2)),
            StrategyKind::Pavlov => Ok(decide_pavlov(own, opp1)),
            StrategyKind::Gradual => Ok(decide_gradual(opp1)),
            StrategyKind::Alternator => Ok(decide_alternator(round)),
            StrategyKind::RelentingGrim => Ok(decide_relenting_grim(&mut self.mem, opp1)),
            StrategyKind::ForgivingGrim => Ok(decide_forgiving_grim(&mut self.mem, opp1, opp2)),
            StrategyKind::WeightedConsensus => {
                decide_weighted_consensus(self.kind.name(), round, opp1, opp2)
            }
            StrategyKind::PriorityChain => {
                Ok(decide_priority_chain(&mut self.mem.chain, round, opp1, opp2))
            }
            StrategyKind::Random => Ok(if rng.next_percent() < 50 {
                Move::Cooperate
            } else {
                Move::Defect
            }),
            StrategyKind::Frozen => Ok(self.mem.committed.unwrap_or(Move::Cooperate)),
        }
    }
}

/// Tolerant: tally every past opponent action; defect once defections win.
fn decide_tolerant(opp1: &[Move], opp2: &[Move]) -> Move {
    let mut coop = 0usize;
    let mut defect = 0usize;
    for m in opp1.iter().chain(opp2) {
        match m {
            Move::Cooperate => coop += 1,
            Move::Defect => defect += 1,
        }
    }
    if defect > coop {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Tit-for-tat: mirror the last move of a uniformly chosen opponent.
fn decide_tit_for_tat(round: usize, opp1: &[Move], opp2: &[Move], rng: &mut SeededRng) -> Move {
    if round == 0 {
        return Move::Cooperate;
    }
    let chosen = if rng.next_percent() < 50 { opp1 } else { opp2 };
    chosen.last().copied().unwrap_or(Move::Cooperate)
}

/// Suspicious tit-for-tat: defect first, then take the more cooperative of
/// the two opponents' last actions.
fn decide_suspicious(opp1: &[Move], opp2: &[Move]) -> Move {
    match (opp1.last(), opp2.last()) {
        (Some(&a), Some(&b)) => {
            if a == Move::Cooperate || b == Move::Cooperate {
                Move::Cooperate
            } else {
                Move::Defect
            }
        }
        _ => Move::Defect,
    }
}

/// Retaliate after two consecutive defections from the first opponent,
/// otherwise mirror its last action.
fn decide_tit_for_two_tats(opp1: &[Move]) -> Move {
    if opp1.len() < 2 {
        return Move::Cooperate;
    }
    let last = opp1[opp1.len() - 1];
    if last == Move::Defect && opp1[opp1.len() - 2] == Move::Defect {
        Move::Defect
    } else {
        last
    }
}

/// Mirror the first opponent, but forgive a defection while the match is
/// still within the forgiveness window.
fn decide_forgiving_tft(round: usize, opp1: &[Move], threshold: u32) -> Move {
    match opp1.last() {
        None => Move::Cooperate,
        Some(&Move::Defect) if round <= threshold as usize => Move::Cooperate,
        Some(&m) => m,
    }
}

/// Grim trigger: latch into permanent defection once opp1 defects.
fn decide_grim(mem: &mut Memory, opp1: &[Move]) -> Move {
    if mem.triggered {
        return Move::Defect;
    }
    if opp1.last() == Some(&Move::Defect) {
        mem.triggered = true;
        return Move::Defect;
    }
    Move::Cooperate
}

/// Spiteful: cooperate while rounds of joint cooperation keep up with half
/// the rounds observed so far.
fn decide_spiteful(mem: &mut Memory, opp1: &[Move], opp2: &[Move]) -> Move {
    let (last1, last2) = match (opp1.last(), opp2.last()) {
        (Some(&a), Some(&b)) => (a, b),
        _ => return Move::Cooperate,
    };
    if last1 == Move::Cooperate && last2 == Move::Cooperate {
        mem.joint_coop += 1;
    }
    mem.rounds_seen += 1;
    if mem.joint_coop >= mem.rounds_seen / 2 {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// Pavlov: cooperate after a successful round (mutual cooperation, or own
/// defection meeting the first opponent's defection pays off the switch),
/// defect otherwise.
fn decide_pavlov(own: &[Move], opp1: &[Move]) -> Move {
    let (mine, theirs) = match (own.last(), opp1.last()) {
        (Some(&m), Some(&t)) => (m, t),
        _ => return Move::Cooperate,
    };
    let successful =
        (mine == theirs && mine == Move::Cooperate) || (mine != theirs && mine == Move::Defect);
    if successful {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// Gradual: defect when the first opponent defected more than once within
/// the last four rounds.
fn decide_gradual(opp1: &[Move]) -> Move {
    if opp1.is_empty() {
        return Move::Cooperate;
    }
    let window = &opp1[opp1.len().saturating_sub(4)..];
    let defects = window.iter().filter(|m| **m == Move::Defect).count();
    if defects > 1 {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Alternator: cooperate on round 0 and odd rounds, defect on even rounds.
fn decide_alternator(round: usize) -> Move {
    if round == 0 {
        return Move::Cooperate;
    }
    if round % 2 == 0 {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Grim latch that re-opens: any opp1 defection restarts the retaliation
/// counter; the mode ends after `RELENT_AFTER` counted rounds, with one
/// final defection on the round the counter expires.
fn decide_relenting_grim(mem: &mut Memory, opp1: &[Move]) -> Move {
    if opp1.is_empty() {
        return Move::Cooperate;
    }
    if opp1.last() == Some(&Move::Defect) {
        mem.defecting = true;
        mem.rounds_in_mode = 0;
    }
    if mem.defecting {
        if mem.rounds_in_mode >= RELENT_AFTER {
            mem.defecting = false;
        } else {
            mem.rounds_in_mode += 1;
        }
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Grim trigger with a forgiveness budget: mirror the more cooperative
/// opponent through the first `FORGIVENESS_BUDGET` defection rounds, then
/// latch permanently. The budget never replenishes.
fn decide_forgiving_grim(mem: &mut Memory, opp1: &[Move], opp2: &[Move]) -> Move {
    let (last1, last2) = match (opp1.last(), opp2.last()) {
        (Some(&a), Some(&b)) => (a, b),
        _ => return Move::Cooperate,
    };
    if mem.triggered {
        return Move::Defect;
    }
    if last1 == Move::Cooperate && last2 == Move::Cooperate {
        return Move::Cooperate;
    }
    if mem.forgiven >= FORGIVENESS_BUDGET {
        mem.triggered = true;
        return Move::Defect;
    }
    mem.forgiven += 1;
    if last1 == Move::Cooperate || last2 == Move::Cooperate {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// Weighted composite: blend the recommendations of a plain mirror of opp1,
/// the tolerant rule, and the gradual rule, then round the weighted average
/// to the nearest action bit.
fn decide_weighted_consensus(
    name: &'static str,
    round: usize,
    opp1: &[Move],
    opp2: &[Move],
) -> Result<Move, EngineError> {
    let mirror = opp1.last().copied().unwrap_or(Move::Cooperate);
    let votes = [mirror, decide_tolerant(opp1, opp2), decide_gradual(opp1)];
    let blended: f64 = votes
        .iter()
        .zip(CONSENSUS_WEIGHTS)
        .map(|(vote, weight)| vote.bit() as f64 * weight)
        .sum();
    let bit = blended.round() as i64;
    Move::from_bit(bit).ok_or(EngineError::InvalidAction {
        strategy: name,
        round,
        value: bit,
    })
}

/// Deactivating composite: grim, then forgiving, then gradual. Each
/// sub-strategy returns one final defection as it deactivates, and control
/// falls through to the next on later rounds. Trigger detection watches for
/// a defect-to-cooperate transition per opponent.
fn decide_priority_chain(
    chain: &mut ChainFlags,
    round: usize,
    opp1: &[Move],
    opp2: &[Move],
) -> Move {
    if round == 0 {
        chain.grim = true;
        chain.forgiving = true;
        chain.gradual = true;
        return Move::Cooperate;
    }

    let last1 = opp1.last().copied().unwrap_or(Move::Cooperate);
    let last2 = opp2.last().copied().unwrap_or(Move::Cooperate);
    if chain.opp1_last == Some(Move::Defect) && last1 == Move::Cooperate {
        chain.opp1_defected = true;
    }
    chain.opp1_last = Some(last1);
    if chain.opp2_last == Some(Move::Defect) && last2 == Move::Cooperate {
        chain.opp2_defected = true;
    }
    chain.opp2_last = Some(last2);

    if chain.grim {
        return if chain.opp1_defected || chain.opp2_defected {
            chain.grim = false;
            Move::Defect
        } else {
            Move::Cooperate
        };
    }
    if chain.forgiving {
        return if chain.opp1_defected || chain.opp2_defected {
            chain.forgiving = false;
            Move::Defect
        } else if last1 == Move::Cooperate && last2 == Move::Cooperate {
            Move::Cooperate
        } else {
            Move::Defect
        };
    }
    if chain.gradual {
        return if last1 == Move::Defect || last2 == Move::Defect {
            chain.gradual = false;
            Move::Defect
        } else {
            Move::Cooperate
        };
    }
    Move::Cooperate
}

#[cfg(test)]
mod tests {
    use super::*;

    use Move::{Cooperate as C, Defect as D};

    fn make_rng() -> SeededRng {
        SeededRng::new(42, 0)
    }

    fn decide(
        state: &mut StrategyState,
        round: usize,
        own: &[Move],
        opp1: &[Move],
        opp2: &[Move],
    ) -> Move {
        let mut rng = make_rng();
        state.decide(round, own, opp1, opp2, &mut rng).unwrap()
    }

    #[test]
    fn test_default_catalog_round_zero_moves() {
        // Every stock entry cooperates on the opening round; the suspicious
        // mirror is the one deliberate exception.
        let mut rng = make_rng();
        for kind in default_catalog() {
            let mut state = kind.fresh_state(&mut rng);
            let opening = state.decide(0, &[], &[], &[], &mut rng).unwrap();
            if kind == StrategyKind::SuspiciousTitForTat {
                assert_eq!(opening, D, "{} should open with defect", kind.name());
            } else {
                assert_eq!(opening, C, "{} should open with cooperate", kind.name());
            }
        }
    }

    #[test]
    fn test_from_index_matches_catalog_order() {
        let catalog = default_catalog();
        for (i, &kind) in catalog.iter().enumerate() {
            assert_eq!(StrategyKind::from_index(i).unwrap(), kind);
        }
        assert_eq!(
            StrategyKind::from_index(catalog.len()),
            Err(EngineError::UnknownStrategy {
                index: catalog.len()
            })
        );
    }

    #[test]
    fn test_from_bit_rejects_out_of_domain_values() {
        assert_eq!(Move::from_bit(0), Some(C));
        assert_eq!(Move::from_bit(1), Some(D));
        assert_eq!(Move::from_bit(2), None);
        assert_eq!(Move::from_bit(-1), None);
    }

    #[test]
    fn test_always_cooperate_and_always_defect() {
        let mut rng = make_rng();
        let mut nice = StrategyKind::AlwaysCooperate.fresh_state(&mut rng);
        let mut nasty = StrategyKind::AlwaysDefect.fresh_state(&mut rng);
        for round in 0..10 {
            assert_eq!(decide(&mut nice, round, &[], &[D; 5], &[D; 5]), C);
            assert_eq!(decide(&mut nasty, round, &[], &[C; 5], &[C; 5]), D);
        }
    }

    #[test]
    fn test_tolerant_counts_both_opponents() {
        let mut rng = make_rng();
        let mut state = StrategyKind::Tolerant.fresh_state(&mut rng);

        // 2 cooperations vs 2 defections: not a majority of defections.
        assert_eq!(decide(&mut state, 2, &[], &[C, D], &[C, D]), C);
        // 1 cooperation vs 3 defections.
        assert_eq!(decide(&mut state, 2, &[], &[D, D], &[C, D]), D);
    }

    #[test]
    fn test_tit_for_tat_mirrors_a_chosen_opponent() {
        let mut rng = make_rng();
        let mut state = StrategyKind::TitForTat.fresh_state(&mut rng);

        assert_eq!(decide(&mut state, 0, &[], &[], &[]), C);
        // Both opponents agree, so the random pick cannot matter.
        assert_eq!(decide(&mut state, 1, &[C], &[D], &[D]), D);
        assert_eq!(decide(&mut state, 1, &[C], &[C], &[C]), C);
    }

    #[test]
    fn test_suspicious_tit_for_tat() {
        let mut rng = make_rng();
        let mut state = StrategyKind::SuspiciousTitForTat.fresh_state(&mut rng);

        assert_eq!(decide(&mut state, 0, &[], &[], &[]), D);
        // One cooperative opponent is enough to cooperate.
        assert_eq!(decide(&mut state, 1, &[D], &[C], &[D]), C);
        assert_eq!(decide(&mut state, 1, &[D], &[D], &[D]), D);
    }

    #[test]
    fn test_tit_for_two_tats() {
        let mut rng = make_rng();
        let mut state = StrategyKind::TitForTwoTats.fresh_state(&mut rng);

        assert_eq!(decide(&mut state, 0, &[], &[], &[]), C);
        assert_eq!(decide(&mut state, 1, &[C], &[D], &[C]), C);
        // Two consecutive defections.
        assert_eq!(decide(&mut state, 2, &[C, C], &[D, D], &[C, C]), D);
        // A lone defection after cooperation is still mirrored.
        assert_eq!(decide(&mut state, 2, &[C, C], &[C, D], &[C, C]), D);
        assert_eq!(decide(&mut state, 2, &[C, C], &[D, C], &[C, C]), C);
    }

    #[test]
    fn test_forgiving_tit_for_tat_window() {
        let mut rng = make_rng();
        let mut state = StrategyKind::ForgivingTitForTat { threshold: 2 }.fresh_state(&mut rng);

        // Defections inside the window are forgiven.
        assert_eq!(decide(&mut state, 1, &[C], &[D], &[C]), C);
        assert_eq!(decide(&mut state, 2, &[C, C], &[C, D], &[C, C]), C);
        // Past the window the mirror takes over.
        assert_eq!(decide(&mut state, 3, &[C; 3], &[C, C, D], &[C; 3]), D);
        assert_eq!(decide(&mut state, 3, &[C; 3], &[D, D, C], &[C; 3]), C);
    }

    #[test]
    fn test_grim_trigger_latches_forever() {
        let mut rng = make_rng();
        let mut state = StrategyKind::GrimTrigger.fresh_state(&mut rng);

        assert_eq!(decide(&mut state, 1, &[C], &[C], &[C]), C);
        assert_eq!(decide(&mut state, 2, &[C, C], &[C, D], &[C, C]), D);
        // Opponent returns to cooperation; the latch holds.
        assert_eq!(decide(&mut state, 3, &[C, C, D], &[C, D, C], &[C; 3]), D);
        assert_eq!(decide(&mut state, 4, &[C, C, D, D], &[C, D, C, C], &[C; 4]), D);
    }

    #[test]
    fn test_grim_trigger_watches_first_opponent_only() {
        let mut rng = make_rng();
        let mut state = StrategyKind::GrimTrigger.fresh_state(&mut rng);

        assert_eq!(decide(&mut state, 1, &[C], &[C], &[D]), C);
    }

    #[test]
    fn test_spiteful_tracks_joint_cooperation() {
        let mut rng = make_rng();
        let mut state = StrategyKind::Spiteful.fresh_state(&mut rng);

        assert_eq!(decide(&mut state, 0, &[], &[], &[]), C);
        // Round 1: joint cooperation observed, 1 >= 1/2.
        assert_eq!(decide(&mut state, 1, &[C], &[C], &[C]), C);
        // Rounds of defection erode the ratio; the halved divisor truncates.
        assert_eq!(decide(&mut state, 2, &[C, C], &[D, D], &[D, D]), C); // 1 >= 2/2
        assert_eq!(decide(&mut state, 3, &[C; 3], &[D; 3], &[D; 3]), C); // 1 >= 3/2
        assert_eq!(decide(&mut state, 4, &[C; 4], &[D; 4], &[D; 4]), D); // 1 < 4/2
    }

    #[test]
    fn test_pavlov_outcome_table() {
        let mut rng = make_rng();
        let mut state = StrategyKind::Pavlov.fresh_state(&mut rng);

        assert_eq!(decide(&mut state, 0, &[], &[], &[]), C);
        // Mutual cooperation: stay with cooperation.
        assert_eq!(decide(&mut state, 1, &[C], &[C], &[C]), C);
        // Betrayed while cooperating: switch to defection.
        assert_eq!(decide(&mut state, 1, &[C], &[D], &[C]), D);
        // Successful defection against a cooperator: switch back.
        assert_eq!(decide(&mut state, 1, &[D], &[C], &[C]), C);
        // Mutual defection: keep defecting.
        assert_eq!(decide(&mut state, 1, &[D], &[D], &[D]), D);
    }

    #[test]
    fn test_gradual_window() {
        let mut rng = make_rng();
        let mut state = StrategyKind::Gradual.fresh_state(&mut rng);

        assert_eq!(decide(&mut state, 0, &[], &[], &[]), C);
        // One defection in the window is tolerated.
        assert_eq!(decide(&mut state, 3, &[C; 3], &[C, D, C], &[C; 3]), C);
        // Two defections in the last four rounds are not.
        assert_eq!(decide(&mut state, 4, &[C; 4], &[C, D, D, C], &[C; 4]), D);
        // Old defections age out of the window.
        assert_eq!(
            decide(&mut state, 6, &[C; 6], &[D, D, C, C, C, C], &[C; 6]),
            C
        );
    }

    #[test]
    fn test_alternator_schedule() {
        let mut rng = make_rng();
        let mut state = StrategyKind::Alternator.fresh_state(&mut rng);

        let expected = [C, C, D, C, D, C, D];
        for (round, want) in expected.into_iter().enumerate() {
            assert_eq!(
                decide(&mut state, round, &[], &[], &[]),
                want,
                "round {round}"
            );
        }
    }

    #[test]
    fn test_relenting_grim_cools_off() {
        let mut rng = make_rng();
        let mut state = StrategyKind::RelentingGrim.fresh_state(&mut rng);

        // One defection, then sustained cooperation from the opponent.
        assert_eq!(decide(&mut state, 1, &[C], &[D], &[C]), D);
        assert_eq!(decide(&mut state, 2, &[C, D], &[D, C], &[C, C]), D);
        assert_eq!(decide(&mut state, 3, &[C, D, D], &[D, C, C], &[C; 3]), D);
        assert_eq!(decide(&mut state, 4, &[C, D, D, D], &[D, C, C, C], &[C; 4]), D);
        // Counter expired: back to cooperation.
        assert_eq!(
            decide(&mut state, 5, &[C, D, D, D, D], &[D, C, C, C, C], &[C; 5]),
            C
        );
    }

    #[test]
    fn test_forgiving_grim_budget_then_latch() {
        let mut rng = make_rng();
        let mut state = StrategyKind::ForgivingGrim.fresh_state(&mut rng);

        assert_eq!(decide(&mut state, 1, &[C], &[C], &[C]), C);
        // First two defection rounds: forgiven, mirroring the kinder opponent.
        assert_eq!(decide(&mut state, 2, &[C, C], &[D, D], &[C, C]), C);
        assert_eq!(decide(&mut state, 3, &[C; 3], &[C, D, D], &[C, C, D]), D);
        // Budget exhausted: latch.
        assert_eq!(decide(&mut state, 4, &[C; 4], &[C, D, D, D], &[C; 4]), D);
        // Latched even though both opponents cooperate again.
        assert_eq!(decide(&mut state, 5, &[C; 5], &[C; 5], &[C; 5]), D);
    }

    #[test]
    fn test_weighted_consensus_blend() {
        let mut rng = make_rng();
        let mut state = StrategyKind::WeightedConsensus.fresh_state(&mut rng);

        assert_eq!(decide(&mut state, 0, &[], &[], &[]), C);
        // Mirror says defect (0.5), tolerant and gradual still cooperate:
        // 0.5 rounds up to a defection.
        assert_eq!(decide(&mut state, 1, &[C], &[D], &[C]), D);
        // Mirror cooperates after a lone old defection; 0.0 stays cooperative.
        assert_eq!(decide(&mut state, 2, &[C, C], &[D, C], &[C, C]), C);
        // All three sub-strategies defect.
        assert_eq!(decide(&mut state, 3, &[C; 3], &[D, D, D], &[D, D, D]), D);
    }

    #[test]
    fn test_priority_chain_deactivates_in_order() {
        let mut rng = make_rng();
        let mut state = StrategyKind::PriorityChain.fresh_state(&mut rng);

        assert_eq!(decide(&mut state, 0, &[], &[], &[]), C);
        // Sustained cooperation keeps the grim stage active and cooperative.
        assert_eq!(decide(&mut state, 1, &[C], &[C], &[C]), C);
        // A defect-to-cooperate transition from opp1 fires the grim stage.
        assert_eq!(decide(&mut state, 2, &[C, C], &[C, D], &[C, C]), C);
        assert_eq!(decide(&mut state, 3, &[C; 3], &[C, D, C], &[C; 3]), D);
        // Next round the forgiving stage fires on the same sticky flag.
        assert_eq!(decide(&mut state, 4, &[C, C, C, D], &[C, D, C, C], &[C; 4]), D);
        // Then the gradual stage cooperates while last moves are cooperative.
        assert_eq!(
            decide(&mut state, 5, &[C, C, C, D, D], &[C, D, C, C, C], &[C; 5]),
            C
        );
    }

    #[test]
    fn test_random_is_seed_deterministic() {
        let mut rng_a = SeededRng::new(9, 4);
        let mut rng_b = SeededRng::new(9, 4);
        let mut state_a = StrategyKind::Random.fresh_state(&mut rng_a);
        let mut state_b = StrategyKind::Random.fresh_state(&mut rng_b);

        for round in 0..50 {
            let a = state_a.decide(round, &[], &[], &[], &mut rng_a).unwrap();
            let b = state_b.decide(round, &[], &[], &[], &mut rng_b).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_frozen_commits_once_per_match() {
        let mut rng = make_rng();
        for _ in 0..20 {
            let mut state = StrategyKind::Frozen.fresh_state(&mut rng);
            let first = decide(&mut state, 0, &[], &[], &[]);
            for round in 1..10 {
                assert_eq!(decide(&mut state, round, &[], &[D; 3], &[C; 3]), first);
            }
        }
    }

    #[test]
    fn test_describe_mentions_forgiveness_threshold() {
        let text = StrategyKind::ForgivingTitForTat { threshold: 2 }.describe();
        assert!(text.contains("first 2 rounds"), "got: {text}");
    }
}
