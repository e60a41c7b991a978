use crate::players::{DecisionProvider, FirstCandidate, RandomDecisions};
use crate::types::PlayerId;

pub struct CliPlayer {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CLI_PLAYERS: &[CliPlayer] = &[
    CliPlayer {
        code: "R",
        name: "RandomDecisions",
        description: "Answers every question at random. Optional param is the SEED.",
    },
    CliPlayer {
        code: "F",
        name: "FirstCandidate",
        description: "Accepts every offer and always picks the first candidate.",
    },
];

#[derive(Debug, Clone)]
pub enum PlayerInstance {
    Random(RandomDecisions),
    First(FirstCandidate),
}

impl PlayerInstance {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerInstance::Random(_) => "Random",
            PlayerInstance::First(_) => "First",
        }
    }
}

impl DecisionProvider for PlayerInstance {
    fn choose_player(&self, context: &str, candidates: &[PlayerId]) -> PlayerId {
        match self {
            PlayerInstance::Random(p) => p.choose_player(context, candidates),
            PlayerInstance::First(p) => p.choose_player(context, candidates),
        }
    }

    fn choose_card(&self, context: &str, candidates: &[String]) -> String {
        match self {
            PlayerInstance::Random(p) => p.choose_card(context, candidates),
            PlayerInstance::First(p) => p.choose_card(context, candidates),
        }
    }

    fn confirm(&self, context: &str) -> bool {
        match self {
            PlayerInstance::Random(p) => p.confirm(context),
            PlayerInstance::First(p) => p.confirm(context),
        }
    }
}

/// Builds a seat from a code such as `R` or `R:7`. Random seats default to their seat index as seed.
pub fn create_player(code: &str, seat: PlayerId, params: Vec<&str>) -> Option<PlayerInstance> {
    match code {
        "R" => {
            let seed = params
                .first()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(seat as u64);
            Some(PlayerInstance::Random(RandomDecisions::new(seed)))
        }
        "F" => Some(PlayerInstance::First(FirstCandidate)),
        _ => None,
    }
}

pub fn print_player_help() {
    println!("Player Legend:");
    println!("{:<5} {:<25} {}", "CODE", "PLAYER", "DESCRIPTION");
    println!("{}", "-".repeat(80));
    for player in CLI_PLAYERS {
        println!("{:<5} {:<25} {}", player.code, player.name, player.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_seeds() {
        assert!(matches!(create_player("F", 0, vec![]), Some(PlayerInstance::First(_))));
        match create_player("R", 2, vec!["11"]) {
            Some(PlayerInstance::Random(random)) => assert_eq!(random.seed, 11),
            other => panic!("unexpected {other:?}"),
        }
        assert!(create_player("M", 0, vec![]).is_none());
    }
}
