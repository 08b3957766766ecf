use crate::contracts::SignerClient;
use ethers::contract::ContractError;
use ethers::providers::ProviderError;
use ethers::signers::WalletError;
use ethers::types::{Address, H256, U256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("agent already registered: {0:#x}")]
    AgentAlreadyRegistered(Address),

    #[error("agent not registered: {0:#x}")]
    AgentNotRegistered(Address),

    #[error("service not registered: {0}")]
    ServiceNotRegistered(String),

    #[error("service already registered: {0}")]
    ServiceAlreadyRegistered(String),

    #[error("task not found: {0}")]
    TaskNotFound(U256),

    #[error("invalid proposal: {0}")]
    InvalidProposal(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("unknown task status: {0}")]
    UnknownTaskStatus(u8),

    #[error("RPC error: {0}")]
    Rpc(#[from] ProviderError),

    #[error("contract error: {0}")]
    Contract(ContractError<SignerClient>),

    #[error("contract reverted: {0}")]
    Revert(String),

    #[error("transaction dropped from the mempool")]
    TransactionDropped,

    #[error("transaction reverted: {0:#x}")]
    TransactionFailed(H256),

    #[error("expected event not emitted: {0}")]
    EventNotFound(&'static str),

    #[error("broker error: {0}")]
    Broker(#[from] redis::RedisError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SdkError {
    /// Translates a contract failure into a domain error. Revert reasons
    /// emitted by the registries are matched by substring; anything else is
    /// surfaced as a raw contract error.
    pub fn contract(err: ContractError<SignerClient>) -> Self {
        if let Some(reason) = err.decode_revert::<String>() {
            tracing::error!(reason = %reason, "Contract call reverted");
            return Self::from_revert_reason(&reason);
        }
        tracing::error!(error = %err, "Contract call failed");
        SdkError::Contract(err)
    }

    pub fn from_revert_reason(reason: &str) -> Self {
        let lower = reason.to_ascii_lowercase();
        if lower.contains("agent already registered") {
            SdkError::AgentAlreadyRegistered(Address::zero())
        } else if lower.contains("agent not registered") {
            SdkError::AgentNotRegistered(Address::zero())
        } else if lower.contains("service already registered") {
            SdkError::ServiceAlreadyRegistered(revert_detail(reason))
        } else if lower.contains("service not registered") {
            SdkError::ServiceNotRegistered(revert_detail(reason))
        } else if lower.contains("invalid proposal") || lower.contains("proposal not found") {
            SdkError::InvalidProposal(revert_detail(reason))
        } else if lower.contains("task does not exist") || lower.contains("task not found") {
            SdkError::TaskNotFound(U256::zero())
        } else {
            SdkError::Revert(reason.to_string())
        }
    }

    /// Fills in the agent address on revert-derived errors, which only carry
    /// a zero sentinel.
    pub fn for_agent(self, address: Address) -> Self {
        match self {
            SdkError::AgentAlreadyRegistered(_) => SdkError::AgentAlreadyRegistered(address),
            SdkError::AgentNotRegistered(_) => SdkError::AgentNotRegistered(address),
            other => other,
        }
    }

    /// Fills in the task id on revert-derived errors, which only carry a
    /// zero sentinel.
    pub fn for_task(self, task_id: U256) -> Self {
        match self {
            SdkError::TaskNotFound(_) => SdkError::TaskNotFound(task_id),
            other => other,
        }
    }
}

/// Registry reverts follow a "Reason: subject" shape; keep only the subject
/// so the variant prefix is not repeated in the display.
fn revert_detail(reason: &str) -> String {
    match reason.split_once(':') {
        Some((_, detail)) if !detail.trim().is_empty() => detail.trim().to_string(),
        _ => reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_registry_revert_reasons() {
        assert!(matches!(
            SdkError::from_revert_reason("Agent already registered"),
            SdkError::AgentAlreadyRegistered(_)
        ));
        assert!(matches!(
            SdkError::from_revert_reason("Service not registered: Bull-Post"),
            SdkError::ServiceNotRegistered(_)
        ));
        assert!(matches!(
            SdkError::from_revert_reason("Invalid proposal id"),
            SdkError::InvalidProposal(_)
        ));
        assert!(matches!(
            SdkError::from_revert_reason("Task does not exist"),
            SdkError::TaskNotFound(_)
        ));
    }

    #[test]
    fn service_revert_keeps_only_the_service_name() {
        let err = SdkError::from_revert_reason("Service not registered: Bull-Post");
        match &err {
            SdkError::ServiceNotRegistered(name) => assert_eq!(name, "Bull-Post"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.to_string(), "service not registered: Bull-Post");
    }

    #[test]
    fn revert_context_helpers_fill_in_sentinels() {
        let addr: Address = "0x1111111111111111111111111111111111111111"
            .parse()
            .unwrap();

        match SdkError::from_revert_reason("Agent already registered").for_agent(addr) {
            SdkError::AgentAlreadyRegistered(got) => assert_eq!(got, addr),
            other => panic!("unexpected error: {other}"),
        }

        match SdkError::from_revert_reason("Task does not exist").for_task(U256::from(42)) {
            SdkError::TaskNotFound(id) => assert_eq!(id, U256::from(42)),
            other => panic!("unexpected error: {other}"),
        }

        // Unrelated errors pass through untouched
        assert!(matches!(
            SdkError::MissingArgument("prompt").for_task(U256::one()),
            SdkError::MissingArgument("prompt")
        ));
    }

    #[test]
    fn unmapped_reason_is_preserved() {
        let err = SdkError::from_revert_reason("ERC20: insufficient allowance");
        assert!(err.to_string().contains("insufficient allowance"));
    }
}
