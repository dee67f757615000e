use serde::{Deserialize, Serialize};

use crate::game::dev_card::DevCard;
use crate::game::resource::{Purchase, Resource, ResourceHand};
use crate::{AgentError, Result};

/// Victory-point total a player must reach to win.
pub const WINNING_POINTS: u32 = 10;

pub const STARTING_SETTLEMENTS: u8 = 5;
pub const STARTING_ROADS: u8 = 15;
pub const STARTING_CITIES: u8 = 4;

/// One player's private state: resources, development cards, score and
/// remaining build stock.
///
/// `points` holds base victory points only (1 per settlement, 2 per city);
/// the longest-road and largest-army bonuses live in their flags and are
/// added by [`Player::score`]. Keeping the bonuses out of `points` means a
/// bonus transfer is a flag flip, never an arithmetic fixup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub hand: ResourceHand,
    /// Playable development cards (may hold duplicates of a kind).
    pub dev_cards: Vec<DevCard>,
    /// Cards bought this turn; unusable until the turn ends.
    pub pending_cards: Vec<DevCard>,
    pub points: u32,
    pub settlements_left: u8,
    pub roads_left: u8,
    pub cities_left: u8,
    pub longest_road: bool,
    pub largest_army: bool,
    pub played_dev_card: bool,
}

impl Player {
    pub fn new() -> Self {
        Player {
            hand: ResourceHand::empty(),
            dev_cards: Vec::new(),
            pending_cards: Vec::new(),
            points: 0,
            settlements_left: STARTING_SETTLEMENTS,
            roads_left: STARTING_ROADS,
            cities_left: STARTING_CITIES,
            longest_road: false,
            largest_army: false,
            played_dev_card: false,
        }
    }

    /// Full score: base points, standing bonuses and hidden Point cards.
    pub fn score(&self) -> u32 {
        let mut score = self.points;
        if self.longest_road {
            score += 2;
        }
        if self.largest_army {
            score += 2;
        }
        score += self
            .dev_cards
            .iter()
            .filter(|&&card| card == DevCard::Point)
            .count() as u32;
        score
    }

    pub fn can_afford(&self, item: Purchase) -> bool {
        item.cost()
            .iter()
            .all(|&(resource, amount)| self.hand.count(resource) >= amount)
    }

    /// Deducts the cost of `item` from the hand.
    pub fn pay_for(&mut self, item: Purchase) -> Result<()> {
        if !self.can_afford(item) {
            return Err(AgentError::Precondition(format!(
                "cannot afford {item:?}"
            )));
        }
        for &(resource, amount) in item.cost() {
            self.hand.remove(resource, amount)?;
        }
        Ok(())
    }

    pub fn take_resource(&mut self, resource: Resource) {
        self.hand.add(resource, 1);
    }

    /// Removes one playable card of the given kind from the hand and sets
    /// the once-per-turn flag.
    pub fn play_dev_card(&mut self, kind: DevCard) -> Result<()> {
        if self.played_dev_card {
            return Err(AgentError::Precondition(
                "already played a development card this turn".into(),
            ));
        }
        let position = self
            .dev_cards
            .iter()
            .position(|&card| card == kind)
            .ok_or_else(|| {
                AgentError::Precondition(format!("no {kind:?} card in hand"))
            })?;
        self.dev_cards.remove(position);
        self.played_dev_card = true;
        Ok(())
    }

    /// Resets the once-per-turn card flag at the start of a turn.
    pub fn start_turn(&mut self) {
        self.played_dev_card = false;
    }

    /// Moves cards bought this turn into the playable hand.
    pub fn flush_pending_cards(&mut self) {
        self.dev_cards.append(&mut self.pending_cards);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
