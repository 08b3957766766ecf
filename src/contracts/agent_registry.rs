use ethers::prelude::*;

// Agent registry ABI. Registration requires an existing service entry in the
// service registry; the contract reverts otherwise.
abigen!(
    AgentsRegistry,
    r#"[
        event AgentRegistered(address indexed agent, address indexed owner, string name, string uri)
        function registerAgent(address agent, string name, string uri, string serviceName, uint256 servicePrice) returns (bool)
        function getAgentData(address agent) view returns (string, string, address, uint256)
        function getReputation(address agent) view returns (uint256)
        function isRegistered(address agent) view returns (bool)
        function getAgentsByService(string serviceName) view returns (address[])
    ]"#
);
