//! State-transition engine: interprets one [`Action`] against a snapshot
//! and returns the successor state.
//!
//! Every apply works on a fresh copy; the caller's state is never touched.
//! Callers must only apply actions produced by
//! [`crate::game::action_space::legal_actions`]; a failed precondition
//! here means the generator and the engine disagree, which is a defect,
//! not a recoverable condition.

use rand::{Rng, RngExt};

use crate::game::action::Action;
use crate::game::dev_card::{DevCard, DEV_CARDS};
use crate::game::game_state::GameState;
use crate::game::geometry::EdgeId;
use crate::game::opponent;
use crate::game::player::STARTING_ROADS;
use crate::game::resource::Purchase;
use crate::{AgentError, Result};

/// Applies `action` for the acting player, producing the successor state.
///
/// Deterministic actions map one state to one state. `BuyDevCard` samples
/// the drawn card kind, and `EndTurn` delegates to the opponent simulator,
/// so repeated calls with the same input may return different successors.
/// `opponent_samples` bounds how many black-box runs the end-turn sample
/// is drawn from.
pub fn apply(
    state: &GameState,
    actor: usize,
    action: &Action,
    opponent_samples: usize,
    rng: &mut impl Rng,
) -> Result<GameState> {
    match action {
        Action::EndTurn => {
            let mut next = state.clone();
            next.players[actor].flush_pending_cards();
            opponent::sample_successor(&next, actor, opponent_samples, rng)
        }
        _ => apply_in_turn(state, actor, action, rng),
    }
}

/// Applies an action without leaving the acting player's turn: `EndTurn`
/// only flushes the pending card queue. The opponent simulator drives
/// other players' turns with this entry point.
pub(crate) fn apply_in_turn(
    state: &GameState,
    actor: usize,
    action: &Action,
    rng: &mut impl Rng,
) -> Result<GameState> {
    let mut next = state.clone();
    match *action {
        Action::BuildRoad { edge } => {
            next.players[actor].pay_for(Purchase::Road)?;
            place_road(&mut next, actor, edge)?;
            maybe_award_longest_road(&mut next, actor);
        }
        Action::BuildSettlement { vertex } => {
            if !next.board.can_place_settlement(actor, vertex, false) {
                return Err(AgentError::Precondition(format!(
                    "settlement at vertex {vertex} is not placeable"
                )));
            }
            next.players[actor].pay_for(Purchase::Settlement)?;
            next.board.place_settlement(actor, vertex)?;
            next.players[actor].settlements_left -= 1;
            next.players[actor].points += 1;
        }
        Action::BuildCity { vertex } => {
            if next.players[actor].cities_left == 0 {
                return Err(AgentError::Precondition("no city pieces left".into()));
            }
            next.players[actor].pay_for(Purchase::City)?;
            next.board.upgrade_to_city(actor, vertex)?;
            next.players[actor].cities_left -= 1;
            next.players[actor].points += 1;
        }
        Action::BuyDevCard => {
            next.players[actor].pay_for(Purchase::DevCard)?;
            let kind = sample_dev_card(&next, rng)?;
            next.board.dev_deck.draw(kind);
            next.players[actor].pending_cards.push(kind);
        }
        Action::PlayMonopoly { resource } => {
            next.players[actor].play_dev_card(DevCard::Monopoly)?;
            let mut taken = 0;
            for (index, player) in next.players.iter_mut().enumerate() {
                if index != actor {
                    taken += player.hand.drain(resource);
                }
            }
            next.players[actor].hand.add(resource, taken);
        }
        Action::PlayYearOfPlenty { first, second } => {
            next.players[actor].play_dev_card(DevCard::YearOfPlenty)?;
            next.players[actor].hand.add(first, 1);
            next.players[actor].hand.add(second, 1);
        }
        Action::PlayRoadBuilder { first, second } => {
            next.players[actor].play_dev_card(DevCard::RoadBuilder)?;
            place_road(&mut next, actor, first)?;
            place_road(&mut next, actor, second)?;
            maybe_award_longest_road(&mut next, actor);
        }
        Action::BankExchange { give, amount, get } => {
            next.players[actor].hand.remove(give, amount)?;
            next.players[actor].hand.add(get, 1);
        }
        Action::EndTurn => {
            next.players[actor].flush_pending_cards();
        }
    }
    Ok(next)
}

fn place_road(state: &mut GameState, actor: usize, edge: EdgeId) -> Result<()> {
    if state.players[actor].roads_left == 0 {
        return Err(AgentError::Precondition("no road pieces left".into()));
    }
    if !state.board.can_place_road(actor, edge) {
        return Err(AgentError::Precondition(format!(
            "road at edge {edge} is not placeable"
        )));
    }
    state.board.place_road(actor, edge)?;
    state.players[actor].roads_left -= 1;
    Ok(())
}

/// Longest-road recomputation kicks in once the builder owns at least 5
/// segments.
fn maybe_award_longest_road(state: &mut GameState, actor: usize) {
    if state.players[actor].roads_left <= STARTING_ROADS - 5 {
        state.board.award_longest_road(&mut state.players);
    }
}

/// Samples a card kind with probability proportional to its remaining
/// multiplicity in the deck.
fn sample_dev_card(state: &GameState, rng: &mut impl Rng) -> Result<DevCard> {
    let deck = &state.board.dev_deck;
    let remaining = deck.remaining();
    if remaining == 0 {
        return Err(AgentError::Precondition(
            "cannot draw from an empty development deck".into(),
        ));
    }
    let mut pick = rng.random_range(0..remaining);
    for kind in DEV_CARDS {
        let count = deck.count(kind) as u32;
        if pick < count {
            return Ok(kind);
        }
        pick -= count;
    }
    Err(AgentError::Precondition(
        "development deck counts are inconsistent".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action_space::legal_actions;
    use crate::game::board::Board;
    use crate::game::geometry::geometry;
    use crate::game::player::Player;
    use crate::game::resource::Resource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn state_with(count: usize) -> GameState {
        GameState::new(Board::standard(), vec![Player::new(); count])
    }

    #[test]
    fn test_deterministic_apply_leaves_input_untouched() {
        let mut state = state_with(3);
        state.players[0].hand.add(Resource::Brick, 4);
        state.players[1].hand.add(Resource::Brick, 2);
        let saved = state.clone();

        let action = Action::BankExchange {
            give: Resource::Brick,
            amount: 4,
            get: Resource::Ore,
        };
        let next = apply(&state, 0, &action, 1, &mut rng()).unwrap();
        assert_eq!(state, saved);
        assert_ne!(next, state);
    }

    #[test]
    fn test_bank_exchange_moves_exact_amounts() {
        let mut state = state_with(2);
        state.players[0].hand.add(Resource::Grain, 5);
        let action = Action::BankExchange {
            give: Resource::Grain,
            amount: 4,
            get: Resource::Brick,
        };
        let next = apply(&state, 0, &action, 1, &mut rng()).unwrap();
        assert_eq!(next.players[0].hand.count(Resource::Grain), 1);
        assert_eq!(next.players[0].hand.count(Resource::Brick), 1);
    }

    #[test]
    fn test_bank_exchange_fails_without_enough_to_give() {
        let mut state = state_with(2);
        state.players[0].hand.add(Resource::Grain, 3);
        let action = Action::BankExchange {
            give: Resource::Grain,
            amount: 4,
            get: Resource::Brick,
        };
        let err = apply(&state, 0, &action, 1, &mut rng()).unwrap_err();
        assert!(matches!(err, AgentError::Precondition(_)));
    }

    #[test]
    fn test_monopoly_collects_every_copy() {
        let mut state = state_with(4);
        state.players[0].dev_cards = vec![DevCard::Monopoly];
        state.players[0].hand.add(Resource::Wool, 1);
        state.players[1].hand.add(Resource::Wool, 3);
        state.players[2].hand.add(Resource::Wool, 2);
        let before: u8 = state
            .players
            .iter()
            .map(|p| p.hand.count(Resource::Wool))
            .sum();

        let action = Action::PlayMonopoly { resource: Resource::Wool };
        let next = apply(&state, 0, &action, 1, &mut rng()).unwrap();
        assert_eq!(next.players[0].hand.count(Resource::Wool), before);
        for other in &next.players[1..] {
            assert_eq!(other.hand.count(Resource::Wool), 0);
        }
        assert!(next.players[0].played_dev_card);
    }

    #[test]
    fn test_year_of_plenty_repeated_resource() {
        let mut state = state_with(2);
        state.players[0].dev_cards = vec![DevCard::YearOfPlenty];
        let action = Action::PlayYearOfPlenty {
            first: Resource::Ore,
            second: Resource::Ore,
        };
        let next = apply(&state, 0, &action, 1, &mut rng()).unwrap();
        assert_eq!(next.players[0].hand.count(Resource::Ore), 2);
    }

    #[test]
    fn test_build_settlement_pays_and_scores() {
        let mut state = state_with(2);
        let geo = geometry();
        let edge = geo.edges_at(20)[0];
        let (vertex, _) = geo.edge_endpoints(edge);
        state.board.place_road(0, edge).unwrap();
        for resource in [Resource::Brick, Resource::Lumber, Resource::Wool, Resource::Grain] {
            state.players[0].hand.add(resource, 1);
        }

        let action = Action::BuildSettlement { vertex };
        let next = apply(&state, 0, &action, 1, &mut rng()).unwrap();
        assert_eq!(next.players[0].points, 1);
        assert_eq!(next.players[0].settlements_left, 4);
        assert_eq!(next.players[0].hand.total(), 0);
        assert!(next.board.settlement_at(vertex).is_some());
    }

    #[test]
    fn test_build_city_upgrades_own_settlement() {
        let mut state = state_with(2);
        state.board.place_settlement(0, 12).unwrap();
        state.players[0].points = 1;
        state.players[0].hand.add(Resource::Ore, 3);
        state.players[0].hand.add(Resource::Grain, 2);

        let action = Action::BuildCity { vertex: 12 };
        let next = apply(&state, 0, &action, 1, &mut rng()).unwrap();
        assert!(next.board.settlement_at(12).unwrap().city);
        assert_eq!(next.players[0].points, 2);
        assert_eq!(next.players[0].cities_left, 3);

        // Upgrading the same settlement twice is a precondition violation.
        let err = apply(&next, 0, &action, 1, &mut rng());
        assert!(err.is_err());
    }

    #[test]
    fn test_buy_dev_card_queues_a_sampled_kind() {
        let mut state = state_with(2);
        for resource in [Resource::Wool, Resource::Grain, Resource::Ore] {
            state.players[0].hand.add(resource, 1);
        }
        let before = state.board.dev_deck.remaining();
        let next = apply(&state, 0, &Action::BuyDevCard, 1, &mut rng()).unwrap();
        assert_eq!(next.board.dev_deck.remaining(), before - 1);
        assert_eq!(next.players[0].pending_cards.len(), 1);
        assert!(next.players[0].dev_cards.is_empty());
    }

    #[test]
    fn test_dev_card_sampling_respects_multiplicity() {
        let mut state = state_with(2);
        // Leave a single kind in the deck.
        while state.board.dev_deck.count(DevCard::Point) > 0 {
            state.board.dev_deck.draw(DevCard::Point);
        }
        for kind in [DevCard::Monopoly, DevCard::RoadBuilder] {
            while state.board.dev_deck.count(kind) > 0 {
                state.board.dev_deck.draw(kind);
            }
        }
        let mut r = rng();
        for _ in 0..10 {
            assert_eq!(sample_dev_card(&state, &mut r).unwrap(), DevCard::YearOfPlenty);
        }
    }

    #[test]
    fn test_road_builder_places_two_free_roads() {
        let mut state = state_with(2);
        state.board.place_settlement(0, 30).unwrap();
        state.players[0].dev_cards = vec![DevCard::RoadBuilder];

        let pairs: Vec<_> = legal_actions(&state, 0)
            .into_iter()
            .filter(|a| matches!(a, Action::PlayRoadBuilder { .. }))
            .collect();
        assert!(!pairs.is_empty());
        let next = apply(&state, 0, &pairs[0], 1, &mut rng()).unwrap();
        assert_eq!(next.board.roads.len(), 2);
        assert_eq!(next.players[0].roads_left, STARTING_ROADS - 2);
        // Roads were free.
        assert_eq!(next.players[0].hand.total(), 0);
    }

    #[test]
    fn test_every_enumerated_action_applies_cleanly() {
        let mut state = state_with(3);
        let geo = geometry();
        state.board.place_settlement(0, 18).unwrap();
        state.players[0].points = 1;
        let anchor = geo.edges_at(18)[0];
        state.board.place_road(0, anchor).unwrap();
        state.players[0].roads_left -= 1;
        for resource in crate::game::resource::RESOURCES {
            state.players[0].hand.add(resource, 4);
        }
        state.players[0].dev_cards =
            vec![DevCard::Monopoly, DevCard::YearOfPlenty, DevCard::RoadBuilder];

        let mut r = rng();
        for action in legal_actions(&state, 0) {
            let applied = apply(&state, 0, &action, 1, &mut r);
            assert!(applied.is_ok(), "action {action:?} failed: {applied:?}");
        }
    }
}
