//! Legal-action enumeration for the acting player.
//!
//! The returned list is never empty: `EndTurn` is always appended last,
//! which is what guarantees that every search rollout can terminate.

use std::collections::BTreeMap;

use crate::game::action::Action;
use crate::game::board::Board;
use crate::game::dev_card::{DevCard, DEV_CARDS};
use crate::game::game_state::GameState;
use crate::game::geometry::{geometry, EdgeId};
use crate::game::resource::{Purchase, Resource, PURCHASES, RESOURCES};

/// Ratio at which the bank accepts `resource` from this player.
///
/// Ports would improve this to 3:1 or 2:1, but port ownership is not
/// tracked on the board, so every exchange runs at the base rate.
fn exchange_rate(_board: &Board, _actor: usize, _resource: Resource) -> u8 {
    4
}

/// Enumerates every action the acting player may take in this state.
pub fn legal_actions(state: &GameState, actor: usize) -> Vec<Action> {
    let geo = geometry();
    let board = &state.board;
    let player = &state.players[actor];
    let mut actions = Vec::new();

    // Affordable purchases, expanded into one action per legal target.
    for purchase in PURCHASES {
        if !player.can_afford(purchase) {
            continue;
        }
        match purchase {
            Purchase::Road => {
                if player.roads_left == 0 {
                    continue;
                }
                for edge in 0..geo.edge_count() {
                    if board.can_place_road(actor, edge) {
                        actions.push(Action::BuildRoad { edge });
                    }
                }
            }
            Purchase::Settlement => {
                if player.settlements_left == 0 {
                    continue;
                }
                for vertex in 0..geo.vertex_count() {
                    if board.can_place_settlement(actor, vertex, false) {
                        actions.push(Action::BuildSettlement { vertex });
                    }
                }
            }
            Purchase::City => {
                if player.cities_left == 0 {
                    continue;
                }
                for settlement in &board.settlements {
                    if settlement.owner == actor && !settlement.city {
                        actions.push(Action::BuildCity {
                            vertex: settlement.vertex,
                        });
                    }
                }
            }
            Purchase::DevCard => {
                if !board.dev_deck.is_empty() {
                    actions.push(Action::BuyDevCard);
                }
            }
        }
    }

    // Bank exchanges at the player's rate for each resource they can give.
    for give in RESOURCES {
        let rate = exchange_rate(board, actor, give);
        if player.hand.count(give) < rate {
            continue;
        }
        for get in RESOURCES {
            if get != give {
                actions.push(Action::BankExchange {
                    give,
                    amount: rate,
                    get,
                });
            }
        }
    }

    // Development-card plays, at most one card per turn.
    if !player.played_dev_card {
        for kind in DEV_CARDS {
            if !kind.playable() || !player.dev_cards.contains(&kind) {
                continue;
            }
            match kind {
                DevCard::Monopoly => {
                    for resource in RESOURCES {
                        actions.push(Action::PlayMonopoly { resource });
                    }
                }
                DevCard::YearOfPlenty => {
                    for (i, &first) in RESOURCES.iter().enumerate() {
                        for &second in &RESOURCES[i..] {
                            actions.push(Action::PlayYearOfPlenty { first, second });
                        }
                    }
                }
                DevCard::RoadBuilder => {
                    if player.roads_left >= 2 {
                        for (first, second) in road_builder_pairs(board, actor) {
                            actions.push(Action::PlayRoadBuilder { first, second });
                        }
                    }
                }
                // Filtered out by the playable() check above.
                DevCard::Point => {}
            }
        }
    }

    actions.push(Action::EndTurn);
    actions
}

/// Legal pairs of free road placements, the second evaluated against a
/// scratch board on which the first already stands. Pairs are deduplicated
/// as unordered, keeping an ordering that is actually placeable.
fn road_builder_pairs(board: &Board, actor: usize) -> Vec<(EdgeId, EdgeId)> {
    let geo = geometry();
    let mut pairs: BTreeMap<(EdgeId, EdgeId), (EdgeId, EdgeId)> = BTreeMap::new();
    for first in 0..geo.edge_count() {
        if !board.can_place_road(actor, first) {
            continue;
        }
        let mut scratch = board.clone();
        scratch.roads.push(crate::game::board::Road { owner: actor, edge: first });
        for second in 0..geo.edge_count() {
            if second != first && scratch.can_place_road(actor, second) {
                let key = (first.min(second), first.max(second));
                pairs.entry(key).or_insert((first, second));
            }
        }
    }
    pairs.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Board;
    use crate::game::player::Player;

    fn bare_state(count: usize) -> GameState {
        GameState::new(Board::standard(), vec![Player::new(); count])
    }

    #[test]
    fn test_end_turn_is_always_last() {
        let state = bare_state(4);
        for actor in 0..4 {
            let actions = legal_actions(&state, actor);
            assert!(!actions.is_empty());
            assert_eq!(actions.last(), Some(&Action::EndTurn));
        }
    }

    #[test]
    fn test_penniless_player_can_only_end_turn() {
        let state = bare_state(2);
        assert_eq!(legal_actions(&state, 0), vec![Action::EndTurn]);
    }

    #[test]
    fn test_exchange_enumeration_at_base_rate() {
        let mut state = bare_state(2);
        state.players[0].hand.add(Resource::Wool, 4);
        let actions = legal_actions(&state, 0);
        let exchanges: Vec<_> = actions
            .iter()
            .filter(|a| matches!(a, Action::BankExchange { .. }))
            .collect();
        // One target per other resource kind.
        assert_eq!(exchanges.len(), 4);
        assert!(exchanges.iter().all(|a| matches!(
            a,
            Action::BankExchange { give: Resource::Wool, amount: 4, .. }
        )));
    }

    #[test]
    fn test_three_of_a_kind_trades_nothing_without_a_port() {
        let mut state = bare_state(2);
        state.players[0].hand.add(Resource::Brick, 3);
        let actions = legal_actions(&state, 0);
        // Road/settlement cost checks also fail with brick alone.
        assert!(actions
            .iter()
            .all(|a| !matches!(a, Action::BankExchange { .. })));
    }

    #[test]
    fn test_buy_dev_card_requires_stock() {
        let mut state = bare_state(2);
        for resource in [Resource::Wool, Resource::Grain, Resource::Ore] {
            state.players[0].hand.add(resource, 1);
        }
        let actions = legal_actions(&state, 0);
        assert!(actions.contains(&Action::BuyDevCard));

        state.board.dev_deck = crate::game::dev_card::DevDeck::empty();
        let actions = legal_actions(&state, 0);
        assert!(!actions.contains(&Action::BuyDevCard));
    }

    #[test]
    fn test_monopoly_and_year_of_plenty_expansion() {
        let mut state = bare_state(2);
        state.players[0].dev_cards = vec![DevCard::Monopoly, DevCard::YearOfPlenty];
        let actions = legal_actions(&state, 0);
        let monopolies = actions
            .iter()
            .filter(|a| matches!(a, Action::PlayMonopoly { .. }))
            .count();
        let plenties = actions
            .iter()
            .filter(|a| matches!(a, Action::PlayYearOfPlenty { .. }))
            .count();
        assert_eq!(monopolies, 5);
        // Unordered pairs with repetition over 5 kinds.
        assert_eq!(plenties, 15);
    }

    #[test]
    fn test_cards_bought_this_turn_are_not_playable() {
        let mut state = bare_state(2);
        state.players[0].pending_cards = vec![DevCard::Monopoly];
        let actions = legal_actions(&state, 0);
        assert!(!actions.iter().any(|a| matches!(a, Action::PlayMonopoly { .. })));
    }

    #[test]
    fn test_no_card_actions_after_playing_one() {
        let mut state = bare_state(2);
        state.players[0].dev_cards = vec![DevCard::Monopoly];
        state.players[0].played_dev_card = true;
        let actions = legal_actions(&state, 0);
        assert!(!actions.iter().any(|a| matches!(a, Action::PlayMonopoly { .. })));
    }

    #[test]
    fn test_road_builder_pairs_extend_the_network() {
        let mut state = bare_state(2);
        let geo = geometry();
        state.board.place_settlement(0, 10).unwrap();
        let anchor = geo.edges_at(10)[0];
        state.board.place_road(0, anchor).unwrap();
        state.players[0].dev_cards = vec![DevCard::RoadBuilder];

        let actions = legal_actions(&state, 0);
        let pairs: Vec<_> = actions
            .iter()
            .filter_map(|a| match a {
                Action::PlayRoadBuilder { first, second } => Some((*first, *second)),
                _ => None,
            })
            .collect();
        assert!(!pairs.is_empty());
        // No unordered duplicates.
        let mut keys: Vec<_> = pairs
            .iter()
            .map(|&(a, b)| (a.min(b), a.max(b)))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), pairs.len());
        // Every pair starts from a placement legal on the real board.
        for (first, _) in pairs {
            assert!(state.board.can_place_road(0, first));
        }
    }

    #[test]
    fn test_point_card_alone_yields_no_card_actions() {
        let mut state = bare_state(2);
        state.players[0].dev_cards = vec![DevCard::Point];
        let actions = legal_actions(&state, 0);
        assert_eq!(actions, vec![Action::EndTurn]);
    }
}
