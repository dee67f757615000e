pub mod action;
pub mod action_space;
pub mod board;
pub mod dev_card;
pub mod dice;
pub mod game_state;
pub mod geometry;
pub mod opponent;
pub mod player;
pub mod resource;
pub mod transition;

pub use action::Action;
pub use action_space::legal_actions;
pub use board::{Board, Road, Settlement, Tile};
pub use dev_card::{DevCard, DevDeck};
pub use game_state::GameState;
pub use geometry::{geometry, EdgeId, VertexId};
pub use player::Player;
pub use resource::{Purchase, Resource, ResourceHand};
pub use transition::apply;
