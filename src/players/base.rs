use crate::types::PlayerId;

/// Supplies every choice the engine cannot make on its own.
///
/// Implementations must answer purely from `(context, candidates)`; the
/// engine validates answers, so returning something outside `candidates`
/// produces an `InvalidSelection` error rather than a panic.
pub trait DecisionProvider {
    fn choose_player(&self, context: &str, candidates: &[PlayerId]) -> PlayerId;

    fn choose_card(&self, context: &str, candidates: &[String]) -> String;

    fn confirm(&self, context: &str) -> bool;
}
