//! Engine error taxonomy.

use thiserror::Error;

/// Errors surfaced by the evaluation engine.
///
/// Every variant is unrecoverable where it is detected: the enclosing match
/// or tournament run fails instead of being scored around. There are no
/// partial-failure semantics within a match.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A decision produced an action bit outside the two-valued domain.
    #[error("strategy {strategy} produced invalid action {value} in round {round}")]
    InvalidAction {
        strategy: &'static str,
        round: usize,
        value: i64,
    },

    /// A catalog factory was asked for an index it does not know.
    #[error("unknown strategy index {index}")]
    UnknownStrategy { index: usize },

    /// The injected round-count sampler broke its contract.
    #[error("round-count sampler produced {got}, outside [{min}, {max}]")]
    SamplerRange { got: u32, min: u32, max: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = EngineError::InvalidAction {
            strategy: "WeightedConsensus",
            round: 17,
            value: 2,
        };
        assert_eq!(
            err.to_string(),
            "strategy WeightedConsensus produced invalid action 2 in round 17"
        );

        let err = EngineError::UnknownStrategy { index: 99 };
        assert_eq!(err.to_string(), "unknown strategy index 99");

        let err = EngineError::SamplerRange {
            got: 120,
            min: 90,
            max: 110,
        };
        assert_eq!(
            err.to_string(),
            "round-count sampler produced 120, outside [90, 110]"
        );
    }
}
