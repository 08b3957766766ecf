use crate::contracts::{AgentsRegistry, SignerClient};
use crate::error::SdkError;
use crate::models::Agent;
use crate::services::confirm;
use ethers::types::{Address, U256};

pub struct AgentService {
    registry: AgentsRegistry<SignerClient>,
    signer_address: Address,
}

impl AgentService {
    pub fn new(registry: AgentsRegistry<SignerClient>, signer_address: Address) -> Self {
        Self {
            registry,
            signer_address,
        }
    }

    /// The wallet address this SDK instance signs with.
    pub fn address(&self) -> Address {
        self.signer_address
    }

    /// Registers an agent under an existing service. The service must be
    /// registered first; the registry reverts otherwise.
    pub async fn register_agent(
        &self,
        address: Address,
        name: &str,
        uri: &str,
        service_name: &str,
        service_price: U256,
    ) -> Result<bool, SdkError> {
        if name.trim().is_empty() {
            return Err(SdkError::MissingArgument("name"));
        }
        if uri.trim().is_empty() {
            return Err(SdkError::MissingArgument("uri"));
        }
        if service_name.trim().is_empty() {
            return Err(SdkError::MissingArgument("service_name"));
        }
        if service_price.is_zero() {
            return Err(SdkError::MissingArgument("service_price"));
        }

        if self.is_agent_registered(address).await? {
            return Err(SdkError::AgentAlreadyRegistered(address));
        }

        tracing::info!(agent = ?address, name, service = service_name, "Registering agent");

        let call = self.registry.register_agent(
            address,
            name.to_string(),
            uri.to_string(),
            service_name.to_string(),
            service_price,
        );
        let pending = call
            .send()
            .await
            .map_err(|e| SdkError::contract(e).for_agent(address))?;
        let receipt = confirm(pending).await?;

        tracing::info!(tx = ?receipt.transaction_hash, "Agent registered");
        Ok(true)
    }

    pub async fn get_agent(&self, address: Address) -> Result<Agent, SdkError> {
        let parts = self
            .registry
            .get_agent_data(address)
            .call()
            .await
            .map_err(|e| SdkError::contract(e).for_agent(address))?;
        if parts.0.is_empty() {
            return Err(SdkError::AgentNotRegistered(address));
        }
        Ok(Agent::from_parts(address, parts))
    }

    pub async fn get_reputation(&self, address: Address) -> Result<U256, SdkError> {
        self.registry
            .get_reputation(address)
            .call()
            .await
            .map_err(|e| SdkError::contract(e).for_agent(address))
    }

    pub async fn is_agent_registered(&self, address: Address) -> Result<bool, SdkError> {
        self.registry
            .is_registered(address)
            .call()
            .await
            .map_err(SdkError::contract)
    }

    pub async fn get_agents_by_service(&self, service_name: &str) -> Result<Vec<Agent>, SdkError> {
        let addresses = self
            .registry
            .get_agents_by_service(service_name.to_string())
            .call()
            .await
            .map_err(SdkError::contract)?;

        let mut agents = Vec::with_capacity(addresses.len());
        for address in addresses {
            agents.push(self.get_agent(address).await?);
        }
        Ok(agents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::middleware::SignerMiddleware;
    use ethers::providers::{Http, Provider};
    use ethers::signers::LocalWallet;
    use std::sync::Arc;

    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn service() -> AgentService {
        let provider = Provider::<Http>::try_from("http://localhost:8545").unwrap();
        let wallet: LocalWallet = DEV_KEY.parse().unwrap();
        let client = Arc::new(SignerMiddleware::new(provider, wallet));
        AgentService::new(
            AgentsRegistry::new(Address::zero(), client),
            Address::repeat_byte(0x11),
        )
    }

    // All four argument checks fire before the registry is contacted.
    #[tokio::test]
    async fn register_agent_validates_arguments() {
        let service = service();
        let agent = Address::repeat_byte(0x22);

        let result = service
            .register_agent(agent, "", "https://example.com", "Bull-Post", U256::from(100))
            .await;
        assert!(matches!(result, Err(SdkError::MissingArgument("name"))));

        let result = service
            .register_agent(agent, "Agent1", "  ", "Bull-Post", U256::from(100))
            .await;
        assert!(matches!(result, Err(SdkError::MissingArgument("uri"))));

        let result = service
            .register_agent(agent, "Agent1", "https://example.com", "", U256::from(100))
            .await;
        assert!(matches!(
            result,
            Err(SdkError::MissingArgument("service_name"))
        ));

        let result = service
            .register_agent(
                agent,
                "Agent1",
                "https://example.com",
                "Bull-Post",
                U256::zero(),
            )
            .await;
        assert!(matches!(
            result,
            Err(SdkError::MissingArgument("service_price"))
        ));
    }
}
