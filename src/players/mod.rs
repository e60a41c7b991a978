pub mod base;
pub mod first;
pub mod random;

pub use base::DecisionProvider;
pub use first::FirstCandidate;
pub use random::RandomDecisions;
