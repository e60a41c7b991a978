use tracing::{debug, info};
use uuid::Uuid;

use crate::game::resolver::RollReport;
use crate::game::state::{DiceRoll, GameConfig, GameError, GameState, TECH_STARTUP};
use crate::narrator::Narrator;
use crate::players::DecisionProvider;
use crate::types::{Landmark, PlayerId};

/// What happened during one call to [`Game::play_turn`].
#[derive(Debug)]
pub struct TurnSummary {
    pub player: PlayerId,
    pub dice: DiceRoll,
    pub roll: u8,
    pub report: RollReport,
    pub built: Option<String>,
    pub extra_turn: bool,
}

pub struct Game {
    pub id: Uuid,
    pub state: GameState,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Ok(Self {
            id: Uuid::new_v4(),
            state: GameState::new(config)?,
        })
    }

    /// Plays until someone wins or the turn limit is reached. Seat `i` decides for player `i`.
    pub fn play<D: DecisionProvider>(
        &mut self,
        seats: &[D],
        narrator: &mut dyn Narrator,
    ) -> Option<PlayerId> {
        if seats.is_empty() {
            return None;
        }
        while self.state.winner.is_none() && self.state.turn < self.state.config.turn_limit {
            let seat = &seats[self.state.current_player % seats.len()];
            if let Err(error) = self.play_turn(seat, narrator) {
                debug!(%error, "turn aborted");
                break;
            }
        }
        self.winner()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    pub fn play_turn(
        &mut self,
        decisions: &dyn DecisionProvider,
        narrator: &mut dyn Narrator,
    ) -> Result<TurnSummary, GameError> {
        if self.state.winner.is_some() {
            return Err(GameError::GameFinished);
        }
        let player = self.state.current_player;
        narrator.narrate(&format!("Player {player}'s turn"));

        let dice = self.roll_phase(player, decisions, narrator)?;
        let mut roll = dice.total();
        if roll >= 10
            && self.owns(player, Landmark::Harbor)
            && decisions.confirm(&self.prompt(
                player,
                &format!("You rolled {roll}. Add 2 with your Harbor?"),
            ))
        {
            roll += 2;
            narrator.narrate(&format!("Harbor raises the roll to {roll}"));
        }

        let special_roll = self.state.special_roll();
        let report = self
            .state
            .resolve_roll(player, roll, special_roll, decisions, narrator)?;

        if self.owns(player, Landmark::CityHall) && self.state.players[player].coins.is_empty() {
            self.state.bank_pays(player, 1, narrator);
        }

        let built = self.build_phase(player, decisions, narrator);
        if built.is_none()
            && self.owns(player, Landmark::Airport)
            && decisions.confirm(&self.prompt(
                player,
                "You did not build. Take 10 coins with your Airport?",
            ))
        {
            self.state.bank_pays(player, 10, narrator);
        }

        self.invest_phase(player, decisions, narrator);

        let mut extra_turn = false;
        if self.state.has_won(player) {
            info!(player, turn = self.state.turn, "player won");
            narrator.narrate(&format!("Player {player} has won the game!"));
            self.state.winner = Some(player);
        } else {
            extra_turn = dice.doubles
                && self.owns(player, Landmark::AmusementPark)
                && decisions
                    .confirm(&self.prompt(player, "You rolled doubles. Take another turn?"));
            if !extra_turn {
                self.state.current_player = (player + 1) % self.state.players.len();
            }
        }
        self.state.turn += 1;

        Ok(TurnSummary {
            player,
            dice,
            roll,
            report,
            built,
            extra_turn,
        })
    }

    /// Stamps a yes/no question with the turn and the player's purse, so
    /// providers see a fresh context every turn.
    fn prompt(&self, player: PlayerId, question: &str) -> String {
        format!(
            "Turn {}, player {player} with {} coins: {question}",
            self.state.turn,
            self.state.players[player].coins.total()
        )
    }

    fn owns(&self, player: PlayerId, landmark: Landmark) -> bool {
        self.state
            .players
            .get(player)
            .is_some_and(|p| p.has_landmark(landmark))
    }

    fn roll_phase(
        &mut self,
        player: PlayerId,
        decisions: &dyn DecisionProvider,
        narrator: &mut dyn Narrator,
    ) -> Result<DiceRoll, GameError> {
        let count = if self.owns(player, Landmark::TrainStation)
            && decisions.confirm(&self.prompt(player, "Roll 2 dice?"))
        {
            2
        } else {
            1
        };
        let mut dice = self.state.roll_dice(player, count)?;
        narrator.narrate(&format!("Player {player} rolls {}", dice.total()));

        if self.owns(player, Landmark::RadioTower)
            && decisions.confirm(&self.prompt(
                player,
                &format!("You rolled {}. Re-roll?", dice.total()),
            ))
        {
            dice = self.state.roll_dice(player, count)?;
            narrator.narrate(&format!("Player {player} re-rolls {}", dice.total()));
        }
        Ok(dice)
    }

    /// Offers a landmark and then an establishment; at most one is bought.
    /// Landmarks go first so a provider that accepts every offer can still win.
    fn build_phase(
        &mut self,
        player: PlayerId,
        decisions: &dyn DecisionProvider,
        narrator: &mut dyn Narrator,
    ) -> Option<String> {
        let landmarks = self.state.affordable_landmarks(player);
        let names: Vec<String> = landmarks.iter().map(ToString::to_string).collect();
        if !landmarks.is_empty()
            && decisions.confirm(&self.prompt(
                player,
                &format!("Build a landmark? ({})", names.join(", ")),
            ))
        {
            let choice = decisions.choose_card("Choose a landmark to build", &names);
            let built = landmarks
                .iter()
                .find(|landmark| landmark.to_string() == choice)
                .copied()
                .ok_or_else(|| GameError::InvalidSelection(choice.clone()))
                .and_then(|landmark| self.state.buy_landmark(player, landmark, narrator));
            match built {
                Ok(()) => return Some(choice),
                Err(error) => narrator.narrate(&format!("Could not build {choice}: {error}")),
            }
        }

        let establishments = self.state.affordable_establishments(player);
        if !establishments.is_empty()
            && decisions.confirm(&self.prompt(
                player,
                &format!("Buy an establishment? ({})", establishments.join(", ")),
            ))
        {
            let choice = decisions.choose_card("Choose an establishment to buy", &establishments);
            match self.state.buy_establishment(player, &choice, narrator) {
                Ok(()) => return Some(choice),
                Err(error) => narrator.narrate(&format!("Could not buy {choice}: {error}")),
            }
        }
        None
    }

    fn invest_phase(
        &mut self,
        player: PlayerId,
        decisions: &dyn DecisionProvider,
        narrator: &mut dyn Narrator,
    ) {
        let startups = self.state.players[player].owned(TECH_STARTUP);
        if startups == 0 {
            return;
        }
        let options: Vec<String> = (0..=startups).map(|amount| amount.to_string()).collect();
        let choice =
            decisions.choose_card("How many coins to invest in your Tech Startups?", &options);
        let Ok(amount) = choice.parse::<u32>() else {
            narrator.narrate(&format!("Ignoring investment of {choice}"));
            return;
        };
        if amount == 0 {
            return;
        }
        match self.state.invest(player, amount) {
            Ok(()) => narrator.narrate(&format!("Player {player} invests {amount}")),
            Err(error) => narrator.narrate(&format!("Could not invest: {error}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrator::Silent;
    use crate::players::{FirstCandidate, RandomDecisions};
    use crate::types::GameVersion;

    #[test]
    fn turn_passes_to_next_player() {
        let mut game = Game::new(GameConfig::default()).expect("valid config");
        let summary = game
            .play_turn(&FirstCandidate, &mut Silent)
            .expect("turn");

        assert_eq!(summary.player, 0);
        assert_eq!(game.state.current_player, 1);
        assert_eq!(game.state.turn, 1);
        assert_eq!(game.state.coins_in_play(), 282);
    }

    #[test]
    fn random_bots_finish_with_conserved_coins() {
        for version in [GameVersion::Basic, GameVersion::Harbor, GameVersion::Millionaire] {
            let config = GameConfig {
                version,
                seed: 7,
                ..GameConfig::default()
            };
            let mut game = Game::new(config).expect("valid config");
            let seats: Vec<_> = (0..4).map(|seat| RandomDecisions::new(seat as u64)).collect();
            game.play(&seats, &mut Silent);

            assert_eq!(game.state.coins_in_play(), 282, "{version}");
            if let Some(winner) = game.winner() {
                assert!(game.state.has_won(winner));
            }
        }
    }

    #[test]
    fn every_random_seat_builds_landmarks() {
        let seats: Vec<_> = (0..4).map(RandomDecisions::new).collect();
        let mut built = [0usize; 4];
        for seed in 0..10 {
            let mut game = Game::new(GameConfig {
                seed,
                ..GameConfig::default()
            })
            .expect("valid config");
            game.play(&seats, &mut Silent);
            for (seat, player) in game.state.players.iter().enumerate() {
                built[seat] += player.built_landmarks(None);
            }
        }

        assert!(built.iter().all(|&count| count > 0), "{built:?}");
    }

    #[test]
    fn prompts_change_from_turn_to_turn() {
        let mut game = Game::new(GameConfig::default()).expect("valid config");
        let first = game.prompt(0, "Roll 2 dice?");
        game.state.turn += 4;

        assert_ne!(first, game.prompt(0, "Roll 2 dice?"));
        assert!(first.ends_with("Roll 2 dice?"));
    }

    #[test]
    fn finished_game_rejects_turns() {
        let mut game = Game::new(GameConfig::default()).expect("valid config");
        game.state.winner = Some(2);
        assert!(matches!(
            game.play_turn(&FirstCandidate, &mut Silent),
            Err(GameError::GameFinished)
        ));
    }
}
