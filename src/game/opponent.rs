//! Black-box environment step: advances the world through every other
//! player's turn and stops at the acting player's next decision point.
//!
//! Opponents draw uniformly random legal actions, so two runs from the
//! same input usually diverge; the search treats one sampled outcome as
//! *the* successor of an end-turn action.

use log::trace;
use rand::{Rng, RngExt};

use crate::game::action::Action;
use crate::game::action_space::legal_actions;
use crate::game::dice;
use crate::game::game_state::GameState;
use crate::game::transition;
use crate::Result;

/// Draws `samples` independent world advances and returns one of them,
/// picked uniformly, as a Monte-Carlo stand-in for the true stochastic
/// end-turn transition.
pub fn sample_successor(
    state: &GameState,
    actor: usize,
    samples: usize,
    rng: &mut impl Rng,
) -> Result<GameState> {
    let samples = samples.max(1);
    let mut outcomes = Vec::with_capacity(samples);
    for _ in 0..samples {
        outcomes.push(advance_past_opponents(state, actor, rng)?);
    }
    let pick = rng.random_range(0..outcomes.len());
    trace!("sampled successor {pick} of {} end-turn outcomes", outcomes.len());
    Ok(outcomes.swap_remove(pick))
}

/// Runs every other player's turn in order, then rolls the acting
/// player's dice and distributes resources, so the returned state sits
/// exactly at their next decision point. If anyone reaches the victory
/// threshold mid-simulation the terminal state is returned immediately.
pub fn advance_past_opponents(
    state: &GameState,
    actor: usize,
    rng: &mut impl Rng,
) -> Result<GameState> {
    let count = state.players.len();
    let mut next = state.clone();
    let mut turn = (actor + 1) % count;
    while turn != actor {
        if next.is_terminal() {
            return Ok(next);
        }
        next = play_random_turn(next, turn, rng)?;
        turn = (turn + 1) % count;
    }
    if next.is_terminal() {
        return Ok(next);
    }
    next.players[actor].start_turn();
    let total = dice::roll(rng);
    next.board.distribute_resources(&mut next.players, total);
    Ok(next)
}

/// One full turn of a random-policy player: roll, distribute, then take
/// uniformly random legal actions until EndTurn comes up.
fn play_random_turn(
    mut state: GameState,
    player: usize,
    rng: &mut impl Rng,
) -> Result<GameState> {
    state.players[player].start_turn();
    let total = dice::roll(rng);
    state.board.distribute_resources(&mut state.players, total);
    loop {
        if state.is_terminal() {
            return Ok(state);
        }
        let mut actions = legal_actions(&state, player);
        let pick = rng.random_range(0..actions.len());
        let action = actions.swap_remove(pick);
        let turn_over = action == Action::EndTurn;
        state = transition::apply_in_turn(&state, player, &action, rng)?;
        if turn_over {
            return Ok(state);
        }
    }
}
