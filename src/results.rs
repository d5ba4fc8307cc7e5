//! End-of-game result records and a local JSON sink for them.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RpsError, RpsResult};
use crate::session::Scoreboard;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub team_code: String,
    /// Player took more rounds than the AI.
    pub win: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub player_wins: u32,
    #[serde(default)]
    pub opponent_wins: u32,
    #[serde(default)]
    pub draws: u32,
}

impl GameResult {
    pub fn from_scoreboard(team_code: &str, board: &Scoreboard, timestamp: DateTime<Utc>) -> Self {
        GameResult {
            team_code: normalize_team_code(team_code),
            win: board.player_won(),
            timestamp,
            player_wins: board.player_wins,
            opponent_wins: board.opponent_wins,
            draws: board.draws,
        }
    }

    /// `<TEAM>_<timestamp>.json`, microsecond precision, team reduced to `[A-Z0-9_-]`.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.file_stem())
    }

    fn file_stem(&self) -> String {
        let team: String = self
            .team_code
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("{}_{}", team, self.timestamp.format("%Y%m%dT%H%M%S%.6f"))
    }
}

pub fn normalize_team_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Normalizes `code`; only an empty code is rejected.
pub fn validate_team_code(code: &str) -> RpsResult<String> {
    let normalized = normalize_team_code(code);
    if normalized.is_empty() {
        Err(RpsError::InvalidTeamCode(code.to_string()))
    } else {
        Ok(normalized)
    }
}

/// Where finished games go. The game itself never depends on the backend.
pub trait ResultStore {
    fn save(&self, result: &GameResult) -> RpsResult<PathBuf>;
    fn load_all(&self) -> RpsResult<Vec<GameResult>>;
}

/// One pretty-printed JSON file per game inside a directory.
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonDirStore { dir: dir.into() }
    }

    pub fn default_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".rps-arena").join("results")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ResultStore for JsonDirStore {
    fn save(&self, result: &GameResult) -> RpsResult<PathBuf> {
        validate_team_code(&result.team_code)?;
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(result)?;
        let stem = result.file_stem();
        let mut attempt = 0u32;
        loop {
            let path = if attempt == 0 {
                self.dir.join(format!("{}.json", stem))
            } else {
                self.dir.join(format!("{}-{}.json", stem, attempt))
            };
            // create_new: never clobber an earlier result with the same name
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(json.as_bytes())?;
                    log::info!("saved result for {} to {}", result.team_code, path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn load_all(&self) -> RpsResult<Vec<GameResult>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut results = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let json = match std::fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) => {
                    log::warn!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            match serde_json::from_str::<GameResult>(&json) {
                Ok(result) => results.push(result),
                Err(e) => log::warn!("skipping {}: {}", path.display(), e),
            }
        }
        results.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(results)
    }
}
