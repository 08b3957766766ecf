use crate::contracts::{SignerClient, TaskRegistry};
use crate::error::SdkError;
use crate::models::Proposal;
use crate::services::broker::{ListenerSlot, MessageBroker};
use crate::services::confirm;
use ethers::types::{Address, U256};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Bridges the off-chain proposal topic and the task registry. Outgoing
/// proposals are published to the task issuer's channel; incoming proposals
/// arrive on this wallet's own channel and are handed to the listener.
pub struct ProposalService {
    registry: TaskRegistry<SignerClient>,
    broker: Arc<dyn MessageBroker>,
    topic: String,
    on_new_proposal: Arc<ListenerSlot<Proposal>>,
}

impl ProposalService {
    pub fn new(
        registry: TaskRegistry<SignerClient>,
        broker: Arc<dyn MessageBroker>,
        topic: String,
    ) -> Self {
        Self {
            registry,
            broker,
            topic,
            on_new_proposal: Arc::new(ListenerSlot::new()),
        }
    }

    fn channel_for(&self, address: Address) -> String {
        format!("{}:{:#x}", self.topic, address)
    }

    /// Publishes a bid for a task to its issuer. The proposal id is assigned
    /// client-side; it only reaches the chain if the issuer approves.
    pub async fn send_proposal(
        &self,
        task_id: U256,
        agent: Address,
        price: U256,
    ) -> Result<Proposal, SdkError> {
        if price.is_zero() {
            return Err(SdkError::MissingArgument("price"));
        }

        let raw = self
            .registry
            .get_task(task_id)
            .call()
            .await
            .map_err(|e| SdkError::contract(e).for_task(task_id))?;
        let issuer = raw.2;
        if issuer.is_zero() {
            return Err(SdkError::TaskNotFound(task_id));
        }

        let proposal = Proposal {
            id: U256::from(uuid::Uuid::new_v4().as_u128()),
            task_id,
            agent,
            price,
        };
        let payload = serde_json::to_string(&proposal)?;
        self.broker
            .publish(&self.channel_for(issuer), &payload)
            .await?;

        tracing::info!(task_id = %task_id, price = %price, "Proposal sent");
        Ok(proposal)
    }

    /// Subscribes this wallet's channel and forwards typed proposals to the
    /// registered listener. Malformed payloads are logged and skipped.
    pub async fn setup_subscription(&self, address: Address) -> Result<JoinHandle<()>, SdkError> {
        let stream = self.broker.subscribe(&self.channel_for(address)).await?;
        let slot = self.on_new_proposal.clone();

        tracing::info!(agent = ?address, topic = %self.topic, "Subscribed for proposals");
        Ok(tokio::spawn(forward(stream, slot)))
    }

    pub async fn get_proposals(&self, task_id: U256) -> Result<Vec<Proposal>, SdkError> {
        let raw = self
            .registry
            .get_proposals(task_id)
            .call()
            .await
            .map_err(|e| SdkError::contract(e).for_task(task_id))?;
        Ok(raw.into_iter().map(Proposal::from).collect())
    }

    /// Writes an approved proposal to the task registry.
    pub async fn approve_proposal(
        &self,
        task_id: U256,
        proposal: &Proposal,
    ) -> Result<(), SdkError> {
        if proposal.task_id != task_id {
            return Err(SdkError::InvalidProposal(format!(
                "proposal {} targets task {}, not {}",
                proposal.id, proposal.task_id, task_id
            )));
        }

        let call =
            self.registry
                .approve_proposal(task_id, proposal.id, proposal.agent, proposal.price);
        let pending = call
            .send()
            .await
            .map_err(|e| SdkError::contract(e).for_task(task_id))?;
        let receipt = confirm(pending).await?;

        tracing::info!(
            task_id = %task_id,
            proposal_id = %proposal.id,
            tx = ?receipt.transaction_hash,
            "Proposal approved"
        );
        Ok(())
    }

    pub async fn set_on_new_proposal_listener(
        &self,
        listener: impl Fn(Proposal) + Send + Sync + 'static,
    ) {
        self.on_new_proposal.set(listener).await;
    }
}

async fn forward(mut stream: BoxStream<'static, String>, slot: Arc<ListenerSlot<Proposal>>) {
    while let Some(payload) = stream.next().await {
        match serde_json::from_str::<Proposal>(&payload) {
            Ok(proposal) => slot.notify(proposal).await,
            Err(e) => tracing::warn!("Dropping malformed proposal payload: {}", e),
        }
    }
}
