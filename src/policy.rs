//! Decision policies for automated players.
//!
//! A closed set of tagged variants instead of an open inheritance
//! hierarchy: the opponent simulator plays `Random`, benchmarks use
//! `Greedy`, and the autonomous agent itself is `SearchDriven`.

use log::debug;
use rand::{Rng, RngExt};

use crate::game::action::Action;
use crate::game::action_space::legal_actions;
use crate::game::game_state::GameState;
use crate::game::transition;
use crate::mcts::config::SearchConfig;
use crate::mcts::tree::SearchTree;
use crate::{AgentError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Policy {
    /// Uniformly random choice among the legal actions.
    Random,
    /// One-step lookahead: the action whose successor maximizes the
    /// player's own score, first maximum winning ties.
    Greedy,
    /// Full Monte Carlo Tree Search with the given configuration.
    SearchDriven(SearchConfig),
}

impl Policy {
    pub fn choose_action(
        &self,
        state: &GameState,
        actor: usize,
        rng: &mut impl Rng,
    ) -> Result<Action> {
        match self {
            Policy::Random => {
                let mut actions = legal_actions(state, actor);
                if actions.is_empty() {
                    return Err(AgentError::EmptyActionSpace);
                }
                let pick = rng.random_range(0..actions.len());
                Ok(actions.swap_remove(pick))
            }
            Policy::Greedy => greedy_action(state, actor, rng),
            Policy::SearchDriven(config) => decide(state, actor, config, rng),
        }
    }
}

/// Chooses the acting player's next action.
///
/// A single legal action is returned directly; a forced end-turn needs
/// no search. Otherwise a fresh tree is built, run for its iteration
/// budget and discarded; trees are never reused across decisions.
pub fn decide(
    state: &GameState,
    actor: usize,
    config: &SearchConfig,
    rng: &mut impl Rng,
) -> Result<Action> {
    config.validate()?;
    let mut actions = legal_actions(state, actor);
    if actions.is_empty() {
        return Err(AgentError::EmptyActionSpace);
    }
    if actions.len() == 1 {
        return Ok(actions.swap_remove(0));
    }
    debug!(
        "searching over {} legal actions ({} iterations)",
        actions.len(),
        config.iterations
    );
    let mut tree = SearchTree::new(state.clone(), actor, config.clone());
    let action = tree.run(rng)?;
    debug!("chose {action:?}");
    Ok(action)
}

fn greedy_action(state: &GameState, actor: usize, rng: &mut impl Rng) -> Result<Action> {
    let actions = legal_actions(state, actor);
    if actions.is_empty() {
        return Err(AgentError::EmptyActionSpace);
    }
    let mut best: Option<(Action, u32)> = None;
    for action in actions {
        let successor = transition::apply(state, actor, &action, 1, rng)?;
        let score = successor.players[actor].score();
        if best.as_ref().map_or(true, |&(_, s)| score > s) {
            best = Some((action, score));
        }
    }
    best.map(|(action, _)| action)
        .ok_or(AgentError::EmptyActionSpace)
}
