use anyhow::{bail, Context, Result};
use ethers::types::Address;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub name: String,
    pub rpc_url: String,
    pub chain_id: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub network: NetworkConfig,

    // Registry contracts
    pub task_registry_address: Address,
    pub agent_registry_address: Address,
    pub service_registry_address: Address,

    // Proposal broker
    pub broker_url: String,
    pub proposal_topic: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            network: NetworkConfig {
                name: std::env::var("NETWORK_NAME").unwrap_or_else(|_| "localhost".to_string()),
                rpc_url: std::env::var("RPC_URL").context("RPC_URL required")?,
                chain_id: std::env::var("CHAIN_ID")
                    .context("CHAIN_ID required")?
                    .parse()
                    .context("Invalid CHAIN_ID")?,
            },

            task_registry_address: Self::parse_address("TASK_REGISTRY_ADDRESS")?,
            agent_registry_address: Self::parse_address("AGENT_REGISTRY_ADDRESS")?,
            service_registry_address: Self::parse_address("SERVICE_REGISTRY_ADDRESS")?,

            broker_url: std::env::var("BROKER_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            proposal_topic: std::env::var("PROPOSAL_TOPIC")
                .unwrap_or_else(|_| "proposals".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_address(var: &str) -> Result<Address> {
        let addr_str = std::env::var(var).with_context(|| format!("{} required", var))?;
        Address::from_str(&addr_str).with_context(|| format!("Invalid address for {}", var))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.network.rpc_url.starts_with("http") {
            bail!("RPC_URL must be HTTP(S) URL");
        }
        if self.network.chain_id == 0 {
            bail!("CHAIN_ID must be non-zero");
        }
        if self.proposal_topic.is_empty() {
            bail!("PROPOSAL_TOPIC must not be empty");
        }

        tracing::info!(
            network = %self.network.name,
            chain_id = self.network.chain_id,
            "Configuration validated"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            network: NetworkConfig {
                name: "localhost".to_string(),
                rpc_url: "http://localhost:8545".to_string(),
                chain_id: 31337,
            },
            task_registry_address: Address::zero(),
            agent_registry_address: Address::zero(),
            service_registry_address: Address::zero(),
            broker_url: "redis://localhost:6379".to_string(),
            proposal_topic: "proposals".to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_config() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn rejects_non_http_rpc_url() {
        let mut config = sample();
        config.network.rpc_url = "ws://localhost:8545".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_chain_id() {
        let mut config = sample();
        config.network.chain_id = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_topic() {
        let mut config = sample();
        config.proposal_topic.clear();
        assert!(config.validate().is_err());
    }
}
