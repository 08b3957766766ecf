use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

/// A bid from an agent on an open task. Proposals travel over the broker
/// until the task issuer approves one, at which point it is written to the
/// task registry. Field names are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: U256,
    pub task_id: U256,
    pub agent: Address,
    pub price: U256,
}

impl From<(U256, U256, Address, U256)> for Proposal {
    fn from(t: (U256, U256, Address, U256)) -> Self {
        let (id, task_id, agent, price) = t;
        Proposal {
            id,
            task_id,
            agent,
            price,
        }
    }
}
