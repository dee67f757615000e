use serde::{Deserialize, Serialize};

/// Development-card kinds.
///
/// `Point` cards are never played; they count toward the owner's score
/// while hidden in hand. This rule set has no Knight cards, so the
/// largest-army bonus flag on [`crate::game::Player`] stays inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DevCard {
    Point,
    Monopoly,
    RoadBuilder,
    YearOfPlenty,
}

pub const DEV_CARDS: [DevCard; 4] = [
    DevCard::Point,
    DevCard::Monopoly,
    DevCard::RoadBuilder,
    DevCard::YearOfPlenty,
];

impl DevCard {
    fn index(self) -> usize {
        match self {
            DevCard::Point => 0,
            DevCard::Monopoly => 1,
            DevCard::RoadBuilder => 2,
            DevCard::YearOfPlenty => 3,
        }
    }

    /// True for kinds that can be played as a turn action.
    pub fn playable(self) -> bool {
        self != DevCard::Point
    }
}

/// The remaining development-card deck, tracked as counts per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevDeck {
    counts: [u8; 4],
}

impl DevDeck {
    /// Full deck: 5 Point, 2 Monopoly, 2 RoadBuilder, 2 YearOfPlenty.
    pub fn full() -> Self {
        Self {
            counts: [5, 2, 2, 2],
        }
    }

    pub fn empty() -> Self {
        Self { counts: [0; 4] }
    }

    pub fn count(&self, kind: DevCard) -> u8 {
        self.counts[kind.index()]
    }

    pub fn remaining(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Removes one physical card of the given kind.
    ///
    /// Returns `false` if no card of that kind remains; the deck never
    /// goes negative.
    pub fn draw(&mut self, kind: DevCard) -> bool {
        let slot = &mut self.counts[kind.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}
