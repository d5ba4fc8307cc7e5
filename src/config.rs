use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RpsError, RpsResult};

pub const PRESETS: &[&str] = &["classic", "marathon"];

// ---------------------------------------------------------------------------
// Exploration schedule
// ---------------------------------------------------------------------------

/// How much randomness is mixed into the counter-move for a given round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExplorationSchedule {
    /// `max(floor, start - decay * (round - 1))`
    Decaying { start: f64, floor: f64, decay: f64 },
    /// Mirror of the model's confidence inside its clamp range.
    Confidence,
    Fixed { rate: f64 },
}

impl ExplorationSchedule {
    pub fn rate(&self, round: u32, confidence: f64, config: &GameConfig) -> f64 {
        match *self {
            ExplorationSchedule::Decaying { start, floor, decay } => {
                let elapsed = round.saturating_sub(1) as f64;
                (start - decay * elapsed).max(floor)
            }
            ExplorationSchedule::Confidence => {
                (config.confidence_min + config.confidence_max - confidence).clamp(0.0, 1.0)
            }
            ExplorationSchedule::Fixed { rate } => rate,
        }
    }
}

impl Default for ExplorationSchedule {
    fn default() -> Self {
        ExplorationSchedule::Decaying {
            start: 0.2,
            floor: 0.05,
            decay: 0.005,
        }
    }
}

// ---------------------------------------------------------------------------
// Sequence lookup
// ---------------------------------------------------------------------------

/// Which slice of the history keys the sequence-memory lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceLookup {
    /// The `sequence_length` moves before the most recent one.
    #[default]
    Preceding,
    /// The most recent `sequence_length` moves.
    Latest,
}

// ---------------------------------------------------------------------------
// Game configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of recent player moves the model keeps.
    pub window: usize,
    /// Length of the move tuples used as sequence-memory keys.
    pub sequence_length: usize,
    pub confidence_start: f64,
    pub confidence_min: f64,
    pub confidence_max: f64,
    pub confidence_step: f64,
    pub exploration: ExplorationSchedule,
    pub sequence_lookup: SequenceLookup,
    pub round_limit: Option<u32>,
    pub time_limit_secs: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::classic()
    }
}

impl GameConfig {
    /// 30 rounds or 60 seconds, five-move window.
    pub fn classic() -> Self {
        GameConfig {
            window: 5,
            sequence_length: 3,
            confidence_start: 0.2,
            confidence_min: 0.1,
            confidence_max: 0.3,
            confidence_step: 0.02,
            exploration: ExplorationSchedule::default(),
            sequence_lookup: SequenceLookup::Preceding,
            round_limit: Some(30),
            time_limit_secs: Some(60),
        }
    }

    /// 60 rounds or 60 seconds, ten-move window, confidence-driven exploration.
    pub fn marathon() -> Self {
        GameConfig {
            window: 10,
            round_limit: Some(60),
            exploration: ExplorationSchedule::Confidence,
            ..GameConfig::classic()
        }
    }

    pub fn preset(name: &str) -> RpsResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "classic" => Ok(GameConfig::classic()),
            "marathon" => Ok(GameConfig::marathon()),
            other => Err(RpsError::UnknownPreset(other.to_string())),
        }
    }

    pub fn load(path: &Path) -> RpsResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> RpsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> RpsResult<()> {
        let invalid = |msg: String| Err(RpsError::InvalidConfig(msg));

        if !(1..=8).contains(&self.sequence_length) {
            return invalid(format!(
                "sequence_length must be between 1 and 8, got {}",
                self.sequence_length
            ));
        }
        if self.window < self.sequence_length + 1 {
            return invalid(format!(
                "window ({}) must hold at least sequence_length + 1 ({}) moves",
                self.window,
                self.sequence_length + 1
            ));
        }
        let bounds = [
            self.confidence_start,
            self.confidence_min,
            self.confidence_max,
            self.confidence_step,
        ];
        if bounds.iter().any(|v| !v.is_finite()) {
            return invalid("confidence values must be finite".to_string());
        }
        if self.confidence_min >= self.confidence_max {
            return invalid(format!(
                "confidence range [{}, {}] is empty",
                self.confidence_min, self.confidence_max
            ));
        }
        if self.confidence_start < self.confidence_min || self.confidence_start > self.confidence_max {
            return invalid(format!(
                "confidence_start {} lies outside [{}, {}]",
                self.confidence_start, self.confidence_min, self.confidence_max
            ));
        }
        if self.confidence_step < 0.0 {
            return invalid("confidence_step must not be negative".to_string());
        }
        match self.exploration {
            ExplorationSchedule::Decaying { start, floor, decay } => {
                if !unit(start) || !unit(floor) || floor > start {
                    return invalid(format!(
                        "decaying exploration needs 0 <= floor <= start <= 1, got floor {} start {}",
                        floor, start
                    ));
                }
                if !decay.is_finite() || decay < 0.0 {
                    return invalid("exploration decay must not be negative".to_string());
                }
            }
            ExplorationSchedule::Fixed { rate } => {
                if !unit(rate) {
                    return invalid(format!("exploration rate {} lies outside [0, 1]", rate));
                }
            }
            ExplorationSchedule::Confidence => {
                if self.confidence_min < 0.0 || self.confidence_max > 1.0 {
                    return invalid(
                        "confidence exploration needs a confidence range inside [0, 1]".to_string(),
                    );
                }
            }
        }
        if self.round_limit == Some(0) {
            return invalid("round_limit must be at least 1".to_string());
        }
        if self.time_limit_secs == Some(0) {
            return invalid("time_limit_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

fn unit(v: f64) -> bool {
    v.is_finite() && (0.0..=1.0).contains(&v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        for name in PRESETS {
            GameConfig::preset(name).unwrap().validate().unwrap();
        }
    }

    #[test]
    fn decaying_rate_reaches_floor() {
        let config = GameConfig::classic();
        let schedule = config.exploration;
        assert!((schedule.rate(1, 0.2, &config) - 0.2).abs() < 1e-12);
        assert!((schedule.rate(11, 0.2, &config) - 0.15).abs() < 1e-12);
        assert!((schedule.rate(500, 0.2, &config) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn sequence_lookup_defaults_to_preceding() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.sequence_lookup, SequenceLookup::Preceding);
        let config: GameConfig = serde_json::from_str(r#"{"sequence_lookup": "latest"}"#).unwrap();
        assert_eq!(config.sequence_lookup, SequenceLookup::Latest);
    }

    #[test]
    fn confidence_rate_mirrors_range() {
        let config = GameConfig::marathon();
        let schedule = config.exploration;
        assert!((schedule.rate(1, 0.3, &config) - 0.1).abs() < 1e-12);
        assert!((schedule.rate(1, 0.1, &config) - 0.3).abs() < 1e-12);
    }
}
