//! Monte Carlo Tree Search over exclusive state snapshots.
//!
//! Each iteration restarts from the root: descend by UCB1 until hitting a
//! node with untried actions (expand one, chosen uniformly at random) or
//! a terminal node, run a bounded-depth random rollout from there, and
//! backpropagate the rollout score to the root. The final decision is the
//! root child with the highest average value, i.e. UCB with the
//! exploration constant at zero.

use log::debug;
use rand::{Rng, RngExt};

use crate::game::action::Action;
use crate::game::action_space::legal_actions;
use crate::game::game_state::GameState;
use crate::game::transition;
use crate::mcts::config::SearchConfig;
use crate::mcts::node::{Node, NodeId};
use crate::{AgentError, Result};

pub struct SearchTree {
    nodes: Vec<Node>,
    actor: usize,
    config: SearchConfig,
}

const ROOT: NodeId = 0;

impl SearchTree {
    /// Builds a fresh tree rooted at `state` for the acting player.
    /// Trees are built per decision and discarded afterwards.
    pub fn new(state: GameState, actor: usize, config: SearchConfig) -> Self {
        let root = Node::new(state, actor, None, None);
        SearchTree {
            nodes: vec![root],
            actor,
            config,
        }
    }

    /// Runs the configured iteration budget and returns the chosen action.
    pub fn run(&mut self, rng: &mut impl Rng) -> Result<Action> {
        for _ in 0..self.config.iterations {
            let leaf = self.select(rng)?;
            let reward = self.rollout(leaf, rng)?;
            self.backpropagate(leaf, reward);
        }

        let best = self
            .best_child(ROOT, 0.0)
            .ok_or(AgentError::EmptyActionSpace)?;
        debug!(
            "search done: {} nodes, best child visits={} avg={:.3}",
            self.nodes.len(),
            self.nodes[best].visits,
            self.nodes[best].average_value(),
        );
        self.nodes[best]
            .action
            .clone()
            .ok_or(AgentError::EmptyActionSpace)
    }

    /// Walks from the root to the node this iteration will simulate from:
    /// the first node with untried actions is expanded by one random
    /// child; terminal nodes are returned as-is.
    fn select(&mut self, rng: &mut impl Rng) -> Result<NodeId> {
        let mut current = ROOT;
        loop {
            if self.nodes[current].is_terminal() {
                return Ok(current);
            }
            if !self.nodes[current].is_fully_expanded() {
                return self.expand(current, rng);
            }
            match self.best_child(current, self.config.exploration_constant) {
                Some(child) => current = child,
                // Fully expanded yet childless only happens on a terminal
                // node, which is handled above.
                None => return Ok(current),
            }
        }
    }

    /// Pops one untried action uniformly at random, applies it and
    /// attaches the successor as a new child node.
    fn expand(&mut self, parent: NodeId, rng: &mut impl Rng) -> Result<NodeId> {
        let pick = rng.random_range(0..self.nodes[parent].untried_actions.len());
        let action = self.nodes[parent].untried_actions.swap_remove(pick);
        let next_state = transition::apply(
            &self.nodes[parent].state,
            self.actor,
            &action,
            self.config.opponent_samples,
            rng,
        )?;
        let child = Node::new(next_state, self.actor, Some(parent), Some(action));
        let id = self.nodes.len();
        self.nodes.push(child);
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    /// Bounded-depth random playout from the node's state.
    fn rollout(&self, node: NodeId, rng: &mut impl Rng) -> Result<f64> {
        let mut state = self.nodes[node].state.clone();
        let mut depth = self.config.rollout_depth;
        while state.winner().is_none() && depth > 0 {
            let mut actions = legal_actions(&state, self.actor);
            let pick = rng.random_range(0..actions.len());
            let action = actions.swap_remove(pick);
            state = transition::apply(
                &state,
                self.actor,
                &action,
                self.config.opponent_samples,
                rng,
            )?;
            depth -= 1;
        }
        Ok(rollout_score(&state, self.actor))
    }

    /// Adds the reward to every node on the path back to the root,
    /// visiting each ancestor exactly once.
    fn backpropagate(&mut self, node: NodeId, reward: f64) {
        let mut current = Some(node);
        while let Some(id) = current {
            self.nodes[id].visits += 1;
            self.nodes[id].value += reward;
            current = self.nodes[id].parent;
        }
    }

    /// UCB1 score of a child; unvisited children score positive infinity
    /// so they are always tried before any visited sibling.
    fn ucb(&self, child: NodeId, exploration: f64) -> f64 {
        let node = &self.nodes[child];
        if node.visits == 0 {
            return f64::INFINITY;
        }
        let parent_visits = node
            .parent
            .map(|p| self.nodes[p].visits)
            .unwrap_or(node.visits) as f64;
        node.average_value()
            + exploration * (parent_visits.ln() / node.visits as f64).sqrt()
    }

    /// Child with the maximum UCB score; the first maximum wins ties.
    fn best_child(&self, parent: NodeId, exploration: f64) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &self.nodes[parent].children {
            let score = self.ucb(child, exploration);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((child, score));
            }
        }
        best.map(|(id, _)| id)
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Rollout reward: the acting player's score minus the best score among
/// the other players. Positive means the actor is ahead.
fn rollout_score(state: &GameState, actor: usize) -> f64 {
    let own = state.players[actor].score() as f64;
    let best_other = state
        .players
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != actor)
        .map(|(_, p)| p.score())
        .max()
        .unwrap_or(0) as f64;
    own - best_other
}
