use serde::{Deserialize, Serialize};

use crate::game::board::Board;
use crate::game::player::{Player, WINNING_POINTS};

/// Immutable-by-convention snapshot of the whole game.
///
/// Every transition produces a fresh `GameState` instead of mutating the
/// caller's copy, which is what makes search rollouts safe to discard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub players: Vec<Player>,
}

impl GameState {
    pub fn new(board: Board, players: Vec<Player>) -> Self {
        GameState { board, players }
    }

    /// A fresh standard board with `count` players.
    pub fn standard(count: usize) -> Self {
        GameState {
            board: Board::standard(),
            players: vec![Player::new(); count],
        }
    }

    /// Index of the winning player, if any score (including hidden Point
    /// cards and standing bonuses) has reached the victory threshold.
    pub fn winner(&self) -> Option<usize> {
        self.players
            .iter()
            .position(|player| player.score() >= WINNING_POINTS)
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }
}
