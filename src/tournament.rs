//! Tournament scheduling, aggregation, and ranking.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::EngineError;
use crate::game::{run_match, MatchResult};
use crate::random::SeededRng;
use crate::schedule::enumerate_triples;
use crate::strategy::StrategyKind;

/// Inclusive bounds every sampled round count must satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundBounds {
    pub min: u32,
    pub max: u32,
}

impl RoundBounds {
    /// The stock match length: a round count of about one hundred.
    pub const STANDARD: RoundBounds = RoundBounds { min: 90, max: 110 };

    fn contains(self, rounds: u32) -> bool {
        rounds >= self.min && rounds <= self.max
    }
}

/// Produces the number of rounds for one match.
///
/// Injectable so tests can pin the length. Every output is checked against
/// the configured [`RoundBounds`]; a violation fails the whole run.
pub trait RoundSampler: Sync {
    fn sample(&self, rng: &mut SeededRng) -> u32;
}

/// Uniform draw over the configured bounds, inclusive.
pub struct UniformRounds(pub RoundBounds);

impl RoundSampler for UniformRounds {
    fn sample(&self, rng: &mut SeededRng) -> u32 {
        let RoundBounds { min, max } = self.0;
        min + rng.next_range(max - min + 1)
    }
}

/// Fixed round count for deterministic tests.
pub struct FixedRounds(pub u32);

impl RoundSampler for FixedRounds {
    fn sample(&self, _rng: &mut SeededRng) -> u32 {
        self.0
    }
}

/// Tournament configuration.
#[derive(Clone, Debug)]
pub struct TournamentConfig {
    /// Seed every per-match RNG stream derives from.
    pub seed: u64,
    /// Legal range for sampled round counts.
    pub bounds: RoundBounds,
    /// Fan matches out across threads. Per-match RNG streams are keyed by
    /// match index, so results are identical in both modes.
    pub parallel: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            bounds: RoundBounds::STANDARD,
            parallel: false,
        }
    }
}

/// One finished match, as delivered to observers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_index: u32,
    /// Catalog indices of the three seats, `i ≤ j ≤ k`.
    pub triple: [usize; 3],
    pub result: MatchResult,
}

/// Final standing of one catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// Position in the input catalog; the tie-break key.
    pub index: usize,
    pub name: String,
    /// Sum of per-match average payoffs across every seat this entry played.
    pub total: f64,
}

/// Tournament outcome: standings descending by total.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentResult {
    pub standings: Vec<Standing>,
    pub matches_played: u32,
}

/// Run the full round-robin over `catalog` and rank the entries.
pub fn run_tournament(
    catalog: &[StrategyKind],
    sampler: &dyn RoundSampler,
    config: &TournamentConfig,
) -> Result<TournamentResult, EngineError> {
    run_tournament_with_observer(catalog, sampler, config, &mut |_| {})
}

/// Run the full round-robin and stream every match to `observer`.
///
/// Every size-3 multiset of catalog indices plays exactly once, self-play
/// included; each seat gets a freshly instantiated state per match. Records
/// reach the observer in match-index order in both execution modes, and
/// totals are accumulated in one sequential pass.
pub fn run_tournament_with_observer(
    catalog: &[StrategyKind],
    sampler: &dyn RoundSampler,
    config: &TournamentConfig,
    observer: &mut dyn FnMut(&MatchRecord),
) -> Result<TournamentResult, EngineError> {
    let triples = enumerate_triples(catalog.len());
    info!(
        entries = catalog.len(),
        matches = triples.len(),
        parallel = config.parallel,
        "tournament start"
    );

    let mut totals = vec![0.0f64; catalog.len()];

    if config.parallel {
        let records: Vec<Result<MatchRecord, EngineError>> = triples
            .par_iter()
            .enumerate()
            .map(|(idx, &triple)| play_scheduled_match(catalog, sampler, config, idx as u32, triple))
            .collect();
        for record in records {
            let record = record?;
            accumulate(&mut totals, &record);
            observer(&record);
        }
    } else {
        for (idx, &triple) in triples.iter().enumerate() {
            let record = play_scheduled_match(catalog, sampler, config, idx as u32, triple)?;
            accumulate(&mut totals, &record);
            observer(&record);
        }
    }

    let standings = rank(catalog, &totals);
    info!(matches = triples.len(), "tournament complete");
    Ok(TournamentResult {
        standings,
        matches_played: triples.len() as u32,
    })
}

fn play_scheduled_match(
    catalog: &[StrategyKind],
    sampler: &dyn RoundSampler,
    config: &TournamentConfig,
    match_index: u32,
    (i, j, k): (usize, usize, usize),
) -> Result<MatchRecord, EngineError> {
    let mut rng = SeededRng::new(config.seed, u64::from(match_index));

    let rounds = sampler.sample(&mut rng);
    if !config.bounds.contains(rounds) {
        return Err(EngineError::SamplerRange {
            got: rounds,
            min: config.bounds.min,
            max: config.bounds.max,
        });
    }

    let result = run_match([catalog[i], catalog[j], catalog[k]], rounds, &mut rng)?;
    debug!(match_index, i, j, k, rounds, "match complete");
    Ok(MatchRecord {
        match_index,
        triple: [i, j, k],
        result,
    })
}

/// Add the three seat averages to the identities that held the seats.
fn accumulate(totals: &mut [f64], record: &MatchRecord) {
    for (seat, &identity) in record.triple.iter().enumerate() {
        totals[identity] += record.result.averages[seat];
    }
}

/// Rank accumulated totals: descending, stable, ties keep catalog order.
pub fn rank(catalog: &[StrategyKind], totals: &[f64]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = catalog
        .iter()
        .zip(totals)
        .enumerate()
        .map(|(index, (kind, &total))| Standing {
            index,
            name: kind.name().to_string(),
            total,
        })
        .collect();
    standings.sort_by(|a, b| b.total.total_cmp(&a.total));
    standings
}
