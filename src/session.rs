use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::moves::{Move, Outcome};
use crate::predictor::{OpponentModel, PredictionRule};
use crate::random::RandomSource;
use crate::resolver::resolve;
use crate::results::GameResult;

// ---------------------------------------------------------------------------
// Round log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRecord {
    pub round: u32,
    pub player_move: Move,
    pub opponent_move: Move,
    pub outcome: Outcome,
    /// Not part of the outcome; kept for the post-game breakdown.
    pub predicted: Move,
    pub rule: PredictionRule,
    pub exploration_rate: f64,
}

// ---------------------------------------------------------------------------
// Scoreboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub player_wins: u32,
    pub opponent_wins: u32,
    pub draws: u32,
    pub player_streak: u32,
    pub opponent_streak: u32,
    pub max_player_streak: u32,
    pub max_opponent_streak: u32,
}

impl Scoreboard {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWin => {
                self.player_wins += 1;
                self.player_streak += 1;
                self.opponent_streak = 0;
            }
            Outcome::OpponentWin => {
                self.opponent_wins += 1;
                self.opponent_streak += 1;
                self.player_streak = 0;
            }
            Outcome::Draw => {
                self.draws += 1;
                self.player_streak = 0;
                self.opponent_streak = 0;
            }
        }
        self.max_player_streak = self.max_player_streak.max(self.player_streak);
        self.max_opponent_streak = self.max_opponent_streak.max(self.opponent_streak);
    }

    pub fn rounds(&self) -> u32 {
        self.player_wins + self.opponent_wins + self.draws
    }

    pub fn opponent_win_rate(&self) -> f64 {
        rate(self.opponent_wins, self.rounds())
    }

    pub fn player_won(&self) -> bool {
        self.player_wins > self.opponent_wins
    }
}

fn rate(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One game against the model: predictor state, random source, score and round log.
pub struct Session<R: RandomSource = StdRng> {
    config: GameConfig,
    model: OpponentModel,
    rng: R,
    scoreboard: Scoreboard,
    history: Vec<RoundRecord>,
    round: u32,
    started_at: Instant,
    terminated: bool,
}

impl<R: RandomSource> Session<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        Session::with_start(config, rng, Instant::now())
    }

    pub fn with_start(config: GameConfig, rng: R, started_at: Instant) -> Self {
        let model = OpponentModel::new(&config);
        Session {
            config,
            model,
            rng,
            scoreboard: Scoreboard::default(),
            history: Vec::new(),
            round: 1,
            started_at,
            terminated: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn model(&self) -> &OpponentModel {
        &self.model
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Number of the next round to be played, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn exploration_rate(&self) -> f64 {
        self.config
            .exploration
            .rate(self.round, self.model.confidence(), &self.config)
    }

    pub fn rounds_remaining(&self) -> Option<u32> {
        self.config
            .round_limit
            .map(|limit| limit.saturating_add(1).saturating_sub(self.round))
    }

    pub fn remaining_time_at(&self, now: Instant) -> Option<Duration> {
        self.config
            .time_limit()
            .map(|limit| limit.saturating_sub(now.saturating_duration_since(self.started_at)))
    }

    pub fn is_over(&self) -> bool {
        self.is_over_at(Instant::now())
    }

    /// Over once terminated, once the round counter passes the round limit, or
    /// once the time budget is spent, whichever comes first.
    pub fn is_over_at(&self, now: Instant) -> bool {
        if self.terminated {
            return true;
        }
        if let Some(limit) = self.config.round_limit {
            if self.round > limit {
                return true;
            }
        }
        match self.config.time_limit() {
            Some(limit) => now.saturating_duration_since(self.started_at) >= limit,
            None => false,
        }
    }

    pub fn play_round(&mut self, player_move: Move) -> Option<RoundRecord> {
        self.play_round_at(player_move, Instant::now())
    }

    /// One predict -> counter -> resolve -> update cycle. Returns `None` and
    /// leaves all state untouched once the session is over.
    pub fn play_round_at(&mut self, player_move: Move, now: Instant) -> Option<RoundRecord> {
        if self.is_over_at(now) {
            if !self.terminated {
                log::info!("session over after {} rounds", self.scoreboard.rounds());
            }
            self.terminated = true;
            return None;
        }

        let exploration_rate = self.exploration_rate();
        let prediction = self.model.predict_explained(&mut self.rng);
        let opponent_move = self
            .model
            .choose_counter_move(prediction.guess, exploration_rate, &mut self.rng);
        let outcome = resolve(opponent_move, player_move);

        let record = RoundRecord {
            round: self.round,
            player_move,
            opponent_move,
            outcome,
            predicted: prediction.guess,
            rule: prediction.rule,
            exploration_rate,
        };
        self.scoreboard.record(outcome);
        self.history.push(record);
        self.model.update(player_move, outcome);
        self.round += 1;

        log::debug!(
            "round {}: player {} vs ai {} -> {} (confidence {:.2})",
            record.round,
            player_move,
            opponent_move,
            outcome.label(),
            self.model.confidence()
        );

        if let Some(limit) = self.config.round_limit {
            if self.round > limit {
                self.terminated = true;
                log::info!("round limit {} reached", limit);
            }
        }
        Some(record)
    }

    /// Discards all learned state and starts a fresh game with the same config.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub fn reset_at(&mut self, now: Instant) {
        self.model = OpponentModel::new(&self.config);
        self.scoreboard = Scoreboard::default();
        self.history.clear();
        self.round = 1;
        self.started_at = now;
        self.terminated = false;
    }

    pub fn result(&self, team_code: &str, timestamp: DateTime<Utc>) -> GameResult {
        GameResult::from_scoreboard(team_code, &self.scoreboard, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedDraws;

    #[test]
    fn draw_resets_both_streaks() {
        let mut board = Scoreboard::default();
        board.record(Outcome::PlayerWin);
        board.record(Outcome::PlayerWin);
        board.record(Outcome::Draw);
        assert_eq!(board.player_streak, 0);
        assert_eq!(board.max_player_streak, 2);
        board.record(Outcome::OpponentWin);
        assert_eq!(board.opponent_streak, 1);
        assert_eq!(board.rounds(), 4);
    }

    #[test]
    fn rounds_remaining_counts_down() {
        let config = GameConfig {
            round_limit: Some(2),
            time_limit_secs: None,
            ..GameConfig::classic()
        };
        let mut session = Session::new(config, ScriptedDraws::constant(0.5));
        assert_eq!(session.rounds_remaining(), Some(2));
        session.play_round(Move::Rock).unwrap();
        assert_eq!(session.rounds_remaining(), Some(1));
        session.play_round(Move::Rock).unwrap();
        assert_eq!(session.rounds_remaining(), Some(0));
        assert!(session.is_terminated());
    }
}
