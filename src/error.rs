use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpsError {
    #[error("Invalid move: {0} (expected rock, paper or scissors)")]
    InvalidMove(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid team code: {0:?}")]
    InvalidTeamCode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RpsResult<T> = Result<T, RpsError>;
