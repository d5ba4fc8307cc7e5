//! Headless games of a scripted player against the opponent model.

use std::fmt;

use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::config::GameConfig;
use crate::moves::{Move, ALL_MOVES};
use crate::random::{seeded, RandomSource};
use crate::session::{RoundRecord, Scoreboard, Session};

/// Round count used when the config sets no round limit.
pub const DEFAULT_SIM_ROUNDS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPattern {
    /// Rock, Paper, Scissors, Rock, ...
    Cycle,
    /// Always Rock.
    Repeat,
    /// Copies the AI's previous move.
    Mirror,
    Random,
    /// Rock 60% of the time, the rest split evenly.
    Biased,
}

impl PlayerPattern {
    pub fn all() -> [PlayerPattern; 5] {
        [
            PlayerPattern::Cycle,
            PlayerPattern::Repeat,
            PlayerPattern::Mirror,
            PlayerPattern::Random,
            PlayerPattern::Biased,
        ]
    }

    pub fn next_move<R: RandomSource + ?Sized>(
        &self,
        round: u32,
        last: Option<&RoundRecord>,
        rng: &mut R,
    ) -> Move {
        match self {
            PlayerPattern::Cycle => Move::from_index(round.saturating_sub(1) as usize),
            PlayerPattern::Repeat => Move::Rock,
            PlayerPattern::Mirror => last.map(|r| r.opponent_move).unwrap_or(Move::Rock),
            PlayerPattern::Random => Move::from_index(rng.next_index(ALL_MOVES.len())),
            PlayerPattern::Biased => {
                let u = rng.next_unit();
                if u < 0.6 {
                    Move::Rock
                } else if u < 0.8 {
                    Move::Paper
                } else {
                    Move::Scissors
                }
            }
        }
    }
}

impl fmt::Display for PlayerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerPattern::Cycle => write!(f, "cycle"),
            PlayerPattern::Repeat => write!(f, "repeat"),
            PlayerPattern::Mirror => write!(f, "mirror"),
            PlayerPattern::Random => write!(f, "random"),
            PlayerPattern::Biased => write!(f, "biased"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationSummary {
    pub games: usize,
    pub rounds: u64,
    pub player_wins: u64,
    pub opponent_wins: u64,
    pub draws: u64,
    /// Games in which the AI took more rounds than the player.
    pub opponent_game_wins: usize,
}

impl SimulationSummary {
    fn absorb(mut self, board: &Scoreboard) -> Self {
        self.games += 1;
        self.rounds += board.rounds() as u64;
        self.player_wins += board.player_wins as u64;
        self.opponent_wins += board.opponent_wins as u64;
        self.draws += board.draws as u64;
        if board.opponent_wins > board.player_wins {
            self.opponent_game_wins += 1;
        }
        self
    }

    fn merge(mut self, other: SimulationSummary) -> Self {
        self.games += other.games;
        self.rounds += other.rounds;
        self.player_wins += other.player_wins;
        self.opponent_wins += other.opponent_wins;
        self.draws += other.draws;
        self.opponent_game_wins += other.opponent_game_wins;
        self
    }

    pub fn opponent_win_rate(&self) -> f64 {
        share(self.opponent_wins, self.rounds)
    }

    pub fn player_win_rate(&self) -> f64 {
        share(self.player_wins, self.rounds)
    }

    pub fn draw_rate(&self) -> f64 {
        share(self.draws, self.rounds)
    }
}

fn share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Plays one full game. The wall-clock limit is ignored; only the round limit applies.
pub fn simulate_game(config: &GameConfig, pattern: PlayerPattern, seed: u64) -> Scoreboard {
    let mut config = config.clone();
    config.time_limit_secs = None;
    if config.round_limit.is_none() {
        config.round_limit = Some(DEFAULT_SIM_ROUNDS);
    }

    let mut session: Session<StdRng> = Session::new(config, seeded(seed));
    let mut player_rng = seeded(seed.wrapping_add(0x9e37_79b9));
    while !session.is_terminated() {
        let round = session.round();
        let player_move = pattern.next_move(round, session.history().last(), &mut player_rng);
        if session.play_round(player_move).is_none() {
            break;
        }
    }
    *session.scoreboard()
}

/// Plays `games` independent games in parallel and sums the results.
pub fn simulate(config: &GameConfig, pattern: PlayerPattern, games: usize, seed: u64) -> SimulationSummary {
    (0..games)
        .into_par_iter()
        .map(|i| simulate_game(config, pattern, seed.wrapping_add(i as u64 * 2)))
        .fold(SimulationSummary::default, |acc, board| acc.absorb(&board))
        .reduce(SimulationSummary::default, SimulationSummary::merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedDraws;

    #[test]
    fn cycle_pattern_rotates() {
        let mut rng = ScriptedDraws::constant(0.0);
        let moves: Vec<Move> = (1..=4)
            .map(|r| PlayerPattern::Cycle.next_move(r, None, &mut rng))
            .collect();
        assert_eq!(moves, vec![Move::Rock, Move::Paper, Move::Scissors, Move::Rock]);
    }

    #[test]
    fn summary_counts_every_round() {
        let config = GameConfig::classic();
        let summary = simulate(&config, PlayerPattern::Random, 8, 42);
        assert_eq!(summary.games, 8);
        assert_eq!(summary.rounds, 8 * 30);
        assert_eq!(
            summary.player_wins + summary.opponent_wins + summary.draws,
            summary.rounds
        );
    }
}
