use std::fmt;
use std::str::FromStr;

use crate::error::{RpsError, RpsResult};

pub const MOVES_STR: &str = "RPS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub fn from_char(c: char) -> RpsResult<Move> {
        match c.to_ascii_uppercase() {
            'R' => Ok(Move::Rock),
            'P' => Ok(Move::Paper),
            'S' => Ok(Move::Scissors),
            _ => Err(RpsError::InvalidMove(c.to_string())),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Move::Rock => 'R',
            Move::Paper => 'P',
            Move::Scissors => 'S',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Move::Rock => "\u{270a}",
            Move::Paper => "\u{270b}",
            Move::Scissors => "\u{270c}\u{fe0f}",
        }
    }

    /// The move that beats this one.
    pub fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    pub fn beats(self, other: Move) -> bool {
        other.counter() == self
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Move {
        ALL_MOVES[i % ALL_MOVES.len()]
    }
}

pub const ALL_MOVES: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Move {
    type Err = RpsError;

    fn from_str(s: &str) -> RpsResult<Move> {
        parse_move(s)
    }
}

/// Accepts `r`/`p`/`s` or the full move name, case-insensitive.
pub fn parse_move(input: &str) -> RpsResult<Move> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();
    match lower.as_str() {
        "rock" => return Ok(Move::Rock),
        "paper" => return Ok(Move::Paper),
        "scissors" | "scissor" => return Ok(Move::Scissors),
        _ => {}
    }
    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() != 1 {
        return Err(RpsError::InvalidMove(trimmed.to_string()));
    }
    Move::from_char(chars[0])
}

/// Parses a compact move string such as `"RRPS"` or `"r p s"`.
pub fn parse_moves(notation: &str) -> RpsResult<Vec<Move>> {
    notation
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(Move::from_char)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    PlayerWin,
    OpponentWin,
    Draw,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::PlayerWin => "Player",
            Outcome::OpponentWin => "AI",
            Outcome::Draw => "Draw",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PlayerWin => write!(f, "You win"),
            Outcome::OpponentWin => write!(f, "AI wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_roundtrip() {
        for m in ALL_MOVES {
            assert_eq!(Move::from_char(m.to_char()).unwrap(), m);
            assert!(MOVES_STR.contains(m.to_char()));
        }
    }

    #[test]
    fn index_roundtrip() {
        for m in ALL_MOVES {
            assert_eq!(Move::from_index(m.index()), m);
        }
    }

    #[test]
    fn parse_full_names() {
        assert_eq!(parse_move(" Rock ").unwrap(), Move::Rock);
        assert_eq!(parse_move("PAPER").unwrap(), Move::Paper);
        assert_eq!(parse_move("scissors").unwrap(), Move::Scissors);
        assert!(parse_move("lizard").is_err());
        assert!(parse_move("").is_err());
    }
}
