use crate::errors::{BattleResult, BattleStateError, SelectionError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The one source of randomness a battle draws from: enemy move choice and
/// enemy single-target picks.
///
/// Tests script the outcomes so a battle can be replayed exactly.
#[derive(Debug, Clone)]
pub struct BattleRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<usize>, index: usize },
}

impl BattleRng {
    pub fn new_random() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    /// Each draw takes the next outcome modulo the number of choices.
    pub fn new_for_test(outcomes: Vec<usize>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    /// Uniformly pick an index in `0..len`.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> BattleResult<usize> {
        if len == 0 {
            return Err(SelectionError::InvalidIndex { index: 0, len }.into());
        }
        let picked = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(0..len),
            RngSource::Scripted { outcomes, index } => {
                let outcome = outcomes
                    .get(*index)
                    .copied()
                    .ok_or_else(|| BattleStateError::RngExhausted(reason.to_string()))?;
                *index += 1;
                outcome % len
            }
        };
        tracing::trace!(picked, len, reason, "rng draw");
        Ok(picked)
    }
}
