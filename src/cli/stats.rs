use std::collections::HashMap;
use std::time::Duration;

use crate::game::game::Game;
use crate::types::PlayerId;

#[derive(Debug, Default, Clone)]
pub struct GameStats {
    pub wins: HashMap<PlayerId, u32>,
    pub landmarks_by_player: HashMap<PlayerId, Vec<usize>>,
    pub games: u32,
    pub unfinished: u32,
    pub total_turns: u64,
    pub total_duration: Duration,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game(&mut self, game: &Game, duration: Duration) {
        self.games += 1;
        self.total_duration += duration;
        self.total_turns += u64::from(game.state.turn);

        match game.winner() {
            Some(winner) => *self.wins.entry(winner).or_insert(0) += 1,
            None => self.unfinished += 1,
        }

        for player in &game.state.players {
            self.landmarks_by_player
                .entry(player.id)
                .or_default()
                .push(player.built_landmarks(None));
        }
    }

    pub fn merge(&mut self, other: GameStats) {
        for (player, wins) in other.wins {
            *self.wins.entry(player).or_insert(0) += wins;
        }
        for (player, landmarks) in other.landmarks_by_player {
            self.landmarks_by_player
                .entry(player)
                .or_default()
                .extend(landmarks);
        }
        self.games += other.games;
        self.unfinished += other.unfinished;
        self.total_turns += other.total_turns;
        self.total_duration += other.total_duration;
    }

    pub fn get_avg_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games as f64
    }

    pub fn get_avg_landmarks(&self, player: PlayerId) -> f64 {
        self.landmarks_by_player
            .get(&player)
            .filter(|counts| !counts.is_empty())
            .map(|counts| counts.iter().sum::<usize>() as f64 / counts.len() as f64)
            .unwrap_or(0.0)
    }

    pub fn get_avg_duration(&self) -> Duration {
        if self.games == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.games
    }
}

#[derive(Debug, Default)]
pub struct StatisticsAccumulator {
    pub stats: GameStats,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(&mut self, game: &Game, duration: Duration) {
        self.stats.record_game(game, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    #[test]
    fn merge_adds_counts() {
        let game = Game::new(GameConfig::default()).expect("valid config");
        let mut left = GameStats::new();
        left.record_game(&game, Duration::from_millis(4));
        let mut right = GameStats::new();
        right.record_game(&game, Duration::from_millis(2));

        left.merge(right);

        assert_eq!(left.games, 2);
        assert_eq!(left.unfinished, 2);
        assert_eq!(left.get_avg_duration(), Duration::from_millis(3));
        assert_eq!(left.landmarks_by_player[&0], vec![0, 0]);
    }
}
