use serde::{Deserialize, Serialize};

use crate::game::geometry::{EdgeId, VertexId};
use crate::game::resource::Resource;

/// One legal move available to the acting player.
///
/// Actions are plain tagged values carrying only their parameters; the
/// transition engine interprets them. Keeping them free of behavior makes
/// them comparable, serializable and safe to copy between snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    BuildRoad {
        edge: EdgeId,
    },
    BuildSettlement {
        vertex: VertexId,
    },
    BuildCity {
        vertex: VertexId,
    },
    BuyDevCard,
    PlayMonopoly {
        resource: Resource,
    },
    PlayYearOfPlenty {
        first: Resource,
        second: Resource,
    },
    PlayRoadBuilder {
        first: EdgeId,
        second: EdgeId,
    },
    BankExchange {
        give: Resource,
        amount: u8,
        get: Resource,
    },
    EndTurn,
}
