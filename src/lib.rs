//! # Settlers Agent
//!
//! Decision-making engine for an autonomous player in a multiplayer
//! resource-trading settlement game: legal-action enumeration, a pure
//! state-transition engine with a stochastic opponent black box, and a
//! Monte Carlo Tree Search loop that turns a game state into a chosen
//! action.
//!
//! The caller owns the authoritative game state and the game loop; this
//! crate only answers "what should this player do next" via
//! [`policy::decide`] and commits the answer via [`game::apply`].
//! Rendering, human input and board randomization live outside.

/// Game state model, action enumeration and state transitions.
pub mod game;

/// Monte Carlo Tree Search engine.
pub mod mcts;

/// Decision policies and the agent entry point.
pub mod policy;

/// Logging setup helper for embedding binaries.
pub mod logging;

pub use game::{apply, legal_actions, Action, GameState};
pub use mcts::SearchConfig;
pub use policy::{decide, Policy};

/// Errors surfaced by the agent core.
///
/// A `Precondition` failure means an action was applied to a state where
/// its legality no longer holds: a generator/transition mismatch, never
/// a runtime condition to recover from.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("action space was empty")]
    EmptyActionSpace,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, AgentError>;
