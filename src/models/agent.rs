use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub address: Address,
    pub name: String,
    pub uri: String,
    pub owner: Address,
    pub reputation: U256,
}

impl Agent {
    /// Builds an agent record from the `getAgentData` tuple.
    pub fn from_parts(address: Address, parts: (String, String, Address, U256)) -> Self {
        let (name, uri, owner, reputation) = parts;
        Agent {
            address,
            name,
            uri,
            owner,
            reputation,
        }
    }
}
