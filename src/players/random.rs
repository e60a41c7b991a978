use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::players::DecisionProvider;
use crate::types::PlayerId;

/// Picks uniformly at random, seeded from the question itself so the same
/// question always gets the same answer.
#[derive(Debug, Clone, Copy)]
pub struct RandomDecisions {
    pub seed: u64,
}

impl RandomDecisions {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, context: &str, candidates: &impl Hash) -> StdRng {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        candidates.hash(&mut hasher);
        StdRng::seed_from_u64(hasher.finish())
    }
}

impl DecisionProvider for RandomDecisions {
    fn choose_player(&self, context: &str, candidates: &[PlayerId]) -> PlayerId {
        let mut rng = self.rng_for(context, &candidates);
        candidates.choose(&mut rng).copied().unwrap_or_default()
    }

    fn choose_card(&self, context: &str, candidates: &[String]) -> String {
        let mut rng = self.rng_for(context, &candidates);
        candidates.choose(&mut rng).cloned().unwrap_or_default()
    }

    fn confirm(&self, context: &str) -> bool {
        self.rng_for(context, &()).gen_bool(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_question_same_answer() {
        let decisions = RandomDecisions::new(9);
        let cards = vec!["Ranch".to_string(), "Forest".to_string(), "Mine".to_string()];

        let first = decisions.choose_card("buy", &cards);
        let second = decisions.choose_card("buy", &cards);

        assert_eq!(first, second);
        assert!(cards.contains(&first));
    }
}
