use crate::players::DecisionProvider;
use crate::types::PlayerId;

/// Always takes the first candidate and accepts every offer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl DecisionProvider for FirstCandidate {
    fn choose_player(&self, _context: &str, candidates: &[PlayerId]) -> PlayerId {
        candidates.first().copied().unwrap_or_default()
    }

    fn choose_card(&self, _context: &str, candidates: &[String]) -> String {
        candidates.first().cloned().unwrap_or_default()
    }

    fn confirm(&self, _context: &str) -> bool {
        true
    }
}
