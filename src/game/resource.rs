use serde::{Deserialize, Serialize};

use crate::{AgentError, Result};

/// The five tradeable resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Brick,
    Lumber,
    Wool,
    Grain,
    Ore,
}

pub const RESOURCES: [Resource; 5] = [
    Resource::Brick,
    Resource::Lumber,
    Resource::Wool,
    Resource::Grain,
    Resource::Ore,
];

impl Resource {
    fn index(self) -> usize {
        match self {
            Resource::Brick => 0,
            Resource::Lumber => 1,
            Resource::Wool => 2,
            Resource::Grain => 3,
            Resource::Ore => 4,
        }
    }
}

/// A per-kind count of resources held by a player.
///
/// Counts never go negative: removals below zero surface as a
/// precondition error at the transition boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHand {
    counts: [u8; 5],
}

impl ResourceHand {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn count(&self, resource: Resource) -> u8 {
        self.counts[resource.index()]
    }

    pub fn add(&mut self, resource: Resource, amount: u8) {
        self.counts[resource.index()] += amount;
    }

    pub fn remove(&mut self, resource: Resource, amount: u8) -> Result<()> {
        let slot = &mut self.counts[resource.index()];
        if *slot < amount {
            return Err(AgentError::Precondition(format!(
                "cannot remove {amount} {resource:?}, only {} in hand",
                slot
            )));
        }
        *slot -= amount;
        Ok(())
    }

    /// Removes every unit of one resource, returning how many were taken.
    pub fn drain(&mut self, resource: Resource) -> u8 {
        std::mem::take(&mut self.counts[resource.index()])
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }
}

/// Items a player can purchase during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    Road,
    Settlement,
    City,
    DevCard,
}

pub const PURCHASES: [Purchase; 4] = [
    Purchase::Road,
    Purchase::Settlement,
    Purchase::City,
    Purchase::DevCard,
];

impl Purchase {
    /// Fixed resource cost of this item.
    pub fn cost(self) -> &'static [(Resource, u8)] {
        match self {
            Purchase::Road => &[(Resource::Brick, 1), (Resource::Lumber, 1)],
            Purchase::Settlement => &[
                (Resource::Brick, 1),
                (Resource::Lumber, 1),
                (Resource::Wool, 1),
                (Resource::Grain, 1),
            ],
            Purchase::City => &[(Resource::Ore, 3), (Resource::Grain, 2)],
            Purchase::DevCard => &[
                (Resource::Wool, 1),
                (Resource::Grain, 1),
                (Resource::Ore, 1),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_add_and_remove() {
        let mut hand = ResourceHand::empty();
        hand.add(Resource::Brick, 3);
        assert_eq!(hand.count(Resource::Brick), 3);
        hand.remove(Resource::Brick, 2).unwrap();
        assert_eq!(hand.count(Resource::Brick), 1);
        assert_eq!(hand.total(), 1);
    }

    #[test]
    fn test_remove_below_zero_is_precondition_error() {
        let mut hand = ResourceHand::empty();
        hand.add(Resource::Ore, 1);
        assert!(hand.remove(Resource::Ore, 2).is_err());
        // Hand untouched on failure
        assert_eq!(hand.count(Resource::Ore), 1);
    }

    #[test]
    fn test_drain_takes_everything() {
        let mut hand = ResourceHand::empty();
        hand.add(Resource::Wool, 4);
        assert_eq!(hand.drain(Resource::Wool), 4);
        assert_eq!(hand.count(Resource::Wool), 0);
    }

    #[test]
    fn test_settlement_cost_table() {
        let cost = Purchase::Settlement.cost();
        assert_eq!(cost.len(), 4);
        assert!(cost.contains(&(Resource::Grain, 1)));
    }
}
