//! Adaptive opponent model: an online predictor over the player's move history.
//!
//! Prediction walks a fixed chain of rules, from the most specific signal to the
//! least: exact sequence match, repeat streak, first-order Markov sampling, and
//! finally the smoothed global move distribution. The predicted move is then
//! countered, with some probability of a random move instead.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use itertools::Itertools;

use crate::config::{GameConfig, SequenceLookup};
use crate::moves::{Move, Outcome, ALL_MOVES};
use crate::random::RandomSource;

/// Bounds closer than this snap onto the bound when clamping confidence.
const CLAMP_EPSILON: f64 = 1e-9;

/// Consecutive identical moves needed for the streak rule.
const STREAK_LEN: usize = 3;

// ---------------------------------------------------------------------------
// Count tables
// ---------------------------------------------------------------------------

/// Laplace-smoothed counts over the three moves. Every entry is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCounts([u64; 3]);

impl MoveCounts {
    pub fn uniform() -> Self {
        MoveCounts([1; 3])
    }

    pub fn get(&self, m: Move) -> u64 {
        self.0[m.index()]
    }

    pub fn increment(&mut self, m: Move) {
        self.0[m.index()] += 1;
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn min(&self) -> u64 {
        self.0.iter().copied().min().unwrap_or(0)
    }

    /// Categorical draw: a uniform value in `[0, total)` walks the cumulative weights.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Move {
        let total = self.total();
        if total == 0 {
            return Move::from_index(rng.next_index(ALL_MOVES.len()));
        }
        let target = rng.next_unit() * total as f64;
        let mut cumulative = 0.0;
        for m in ALL_MOVES {
            cumulative += self.get(m) as f64;
            if target < cumulative {
                return m;
            }
        }
        Move::Scissors
    }
}

impl Default for MoveCounts {
    fn default() -> Self {
        MoveCounts::uniform()
    }
}

/// First-order transition counts: previous move -> counts of the move that followed.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    rows: HashMap<Move, MoveCounts>,
}

impl TransitionTable {
    pub fn new() -> Self {
        TransitionTable::default()
    }

    /// Returns the row for `prev`, inserting a uniform prior row if it was never seen.
    pub fn row_or_insert(&mut self, prev: Move) -> &mut MoveCounts {
        self.rows.entry(prev).or_insert_with(MoveCounts::uniform)
    }

    pub fn row(&self, prev: Move) -> Option<&MoveCounts> {
        self.rows.get(&prev)
    }

    pub fn record(&mut self, prev: Move, next: Move) {
        self.row_or_insert(prev).increment(next);
    }

    /// Count for `prev -> next`; unseen rows read as the uniform prior.
    pub fn count(&self, prev: Move, next: Move) -> u64 {
        self.rows.get(&prev).map(|r| r.get(next)).unwrap_or(1)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&Move, &MoveCounts)> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionRule {
    SequenceMatch,
    RepeatStreak,
    Markov,
    Prior,
}

impl fmt::Display for PredictionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionRule::SequenceMatch => write!(f, "sequence match"),
            PredictionRule::RepeatStreak => write!(f, "repeat streak"),
            PredictionRule::Markov => write!(f, "markov"),
            PredictionRule::Prior => write!(f, "prior"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub guess: Move,
    pub rule: PredictionRule,
}

// ---------------------------------------------------------------------------
// Opponent model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct OpponentModel {
    move_counts: MoveCounts,
    recent_moves: VecDeque<Move>,
    transitions: TransitionTable,
    sequence_memory: HashMap<Vec<Move>, Move>,
    confidence: f64,
    window: usize,
    sequence_length: usize,
    confidence_min: f64,
    confidence_max: f64,
    confidence_step: f64,
    sequence_lookup: SequenceLookup,
}

impl OpponentModel {
    pub fn new(config: &GameConfig) -> Self {
        let window = config.window.max(1);
        OpponentModel {
            move_counts: MoveCounts::uniform(),
            recent_moves: VecDeque::with_capacity(window + 1),
            transitions: TransitionTable::new(),
            sequence_memory: HashMap::new(),
            confidence: config.confidence_start,
            window,
            sequence_length: config.sequence_length.max(1),
            confidence_min: config.confidence_min,
            confidence_max: config.confidence_max,
            confidence_step: config.confidence_step,
            sequence_lookup: config.sequence_lookup,
        }
    }

    pub fn move_counts(&self) -> &MoveCounts {
        &self.move_counts
    }

    pub fn recent_moves(&self) -> &VecDeque<Move> {
        &self.recent_moves
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn sequence_memory(&self) -> &HashMap<Vec<Move>, Move> {
        &self.sequence_memory
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn last_move(&self) -> Option<Move> {
        self.recent_moves.back().copied()
    }

    /// Predicts the player's next move.
    pub fn predict<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Move {
        self.predict_explained(rng).guess
    }

    /// Like [`predict`](Self::predict), also reporting which rule produced the guess.
    pub fn predict_explained<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Prediction {
        let prediction = self.run_rules(rng);
        log::debug!(
            "predicted {} via {} (history {})",
            prediction.guess,
            prediction.rule,
            self.recent_moves.iter().map(|m| m.to_char()).collect::<String>()
        );
        prediction
    }

    fn run_rules<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Prediction {
        if let Some(&guess) = self.sequence_key().and_then(|key| self.sequence_memory.get(&key)) {
            return Prediction {
                guess,
                rule: PredictionRule::SequenceMatch,
            };
        }

        if self.recent_moves.len() >= STREAK_LEN
            && self.recent_moves.iter().rev().take(STREAK_LEN).all_equal()
        {
            if let Some(guess) = self.last_move() {
                return Prediction {
                    guess,
                    rule: PredictionRule::RepeatStreak,
                };
            }
        }

        if let Some(last) = self.last_move() {
            let guess = self.transitions.row_or_insert(last).sample(rng);
            return Prediction {
                guess,
                rule: PredictionRule::Markov,
            };
        }

        Prediction {
            guess: self.move_counts.sample(rng),
            rule: PredictionRule::Prior,
        }
    }

    /// Lookup key for the sequence rule. `Preceding` skips the most recent move,
    /// mirroring the slice `update` writes; `Latest` ends on it.
    fn sequence_key(&self) -> Option<Vec<Move>> {
        let len = self.recent_moves.len();
        let end = match self.sequence_lookup {
            SequenceLookup::Preceding => len.checked_sub(1)?,
            SequenceLookup::Latest => len,
        };
        let start = end.checked_sub(self.sequence_length)?;
        Some(self.recent_moves.range(start..end).copied().collect())
    }

    /// Hard counter to `predicted` with probability `1 - exploration_rate`,
    /// otherwise a uniformly random move.
    pub fn choose_counter_move<R: RandomSource + ?Sized>(
        &self,
        predicted: Move,
        exploration_rate: f64,
        rng: &mut R,
    ) -> Move {
        if rng.next_unit() < exploration_rate {
            Move::from_index(rng.next_index(ALL_MOVES.len()))
        } else {
            predicted.counter()
        }
    }

    /// Absorbs one completed round.
    pub fn update(&mut self, player_move: Move, outcome: Outcome) {
        self.move_counts.increment(player_move);

        self.recent_moves.push_back(player_move);
        while self.recent_moves.len() > self.window {
            self.recent_moves.pop_front();
        }

        let len = self.recent_moves.len();
        if len >= 2 {
            let prev = self.recent_moves[len - 2];
            self.transitions.record(prev, player_move);
        }

        if len > self.sequence_length {
            let key: Vec<Move> = self
                .recent_moves
                .range(len - 1 - self.sequence_length..len - 1)
                .copied()
                .collect();
            self.sequence_memory.insert(key, player_move);
        }

        let delta = if outcome == Outcome::OpponentWin {
            self.confidence_step
        } else {
            -self.confidence_step
        };
        self.confidence = clamp_snapped(
            self.confidence + delta,
            self.confidence_min,
            self.confidence_max,
        );
    }
}

fn clamp_snapped(value: f64, min: f64, max: f64) -> f64 {
    if value >= max - CLAMP_EPSILON {
        max
    } else if value <= min + CLAMP_EPSILON {
        min
    } else {
        value
    }
}
