use crate::moves::{Move, Outcome};

/// Decides a round from the player's point of view. Pure.
pub fn resolve(opponent_move: Move, player_move: Move) -> Outcome {
    if opponent_move == player_move {
        Outcome::Draw
    } else if player_move.beats(opponent_move) {
        Outcome::PlayerWin
    } else {
        Outcome::OpponentWin
    }
}
