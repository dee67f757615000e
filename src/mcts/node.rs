//! Arena-allocated search-tree node.
//!
//! Nodes live in the tree's arena and refer to each other by index, so a
//! child can hold a non-owning back-reference to its parent without any
//! shared mutable state. Each node owns its exclusive state snapshot;
//! rollouts clone from it and never touch a sibling's copy.

use crate::game::action::Action;
use crate::game::action_space::legal_actions;
use crate::game::game_state::GameState;

/// Index of a node inside the tree arena.
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    /// Exclusive snapshot of the game at this node.
    pub state: GameState,
    /// Arena index of the parent; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Action that produced this node from its parent.
    pub action: Option<Action>,
    pub children: Vec<NodeId>,
    pub visits: u32,
    /// Cumulative reward backpropagated through this node.
    pub value: f64,
    /// Legal actions not yet expanded into children.
    pub untried_actions: Vec<Action>,
}

impl Node {
    pub fn new(
        state: GameState,
        actor: usize,
        parent: Option<NodeId>,
        action: Option<Action>,
    ) -> Self {
        let untried_actions = legal_actions(&state, actor);
        Node {
            state,
            parent,
            action,
            children: Vec::new(),
            visits: 0,
            value: 0.0,
            untried_actions,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }

    pub fn average_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value / self.visits as f64
        }
    }
}
