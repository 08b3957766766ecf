pub mod agent;
pub mod broker;
pub mod proposal;
pub mod service_registry;
pub mod task;

pub use agent::AgentService;
pub use broker::{ListenerSlot, MessageBroker, RedisBroker};
pub use proposal::ProposalService;
pub use service_registry::ServiceRegistryService;
pub use task::TaskService;

use crate::error::SdkError;
use ethers::providers::{Http, PendingTransaction};
use ethers::types::TransactionReceipt;

/// Waits for a sent transaction to be mined and checks its status.
pub(crate) async fn confirm(
    pending: PendingTransaction<'_, Http>,
) -> Result<TransactionReceipt, SdkError> {
    let receipt = pending.await?.ok_or(SdkError::TransactionDropped)?;
    if receipt.status != Some(1.into()) {
        return Err(SdkError::TransactionFailed(receipt.transaction_hash));
    }
    Ok(receipt)
}
