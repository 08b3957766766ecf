use crate::config::Config;
use crate::contracts::{AgentsRegistry, ServiceRegistry, TaskRegistry};
use crate::error::SdkError;
use crate::models::{Agent, Proposal, Service, Task, TaskCreationParams};
use crate::services::{
    AgentService, MessageBroker, ProposalService, RedisBroker, ServiceRegistryService, TaskService,
};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, U256};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Facade over the four marketplace services. Every method is a one-call
/// delegation; all registration, lifecycle, and approval rules live in the
/// registry contracts.
pub struct Troupe {
    task: TaskService,
    agent: AgentService,
    proposal: ProposalService,
    service_registry: ServiceRegistryService,
    subscriptions: Mutex<Vec<JoinHandle<()>>>,
}

impl Troupe {
    pub async fn connect(config: Config, private_key: &str) -> Result<Self, SdkError> {
        tracing::info!(
            network = %config.network.name,
            chain_id = config.network.chain_id,
            task_registry = ?config.task_registry_address,
            agent_registry = ?config.agent_registry_address,
            service_registry = ?config.service_registry_address,
            "Connecting to marketplace"
        );

        let provider = Provider::<Http>::try_from(config.network.rpc_url.as_str())
            .map_err(|e| SdkError::Config(format!("invalid RPC URL: {e}")))?;
        let wallet = private_key
            .parse::<LocalWallet>()?
            .with_chain_id(config.network.chain_id);
        let signer_address = wallet.address();
        let client = Arc::new(SignerMiddleware::new(provider, wallet));

        let task_registry = TaskRegistry::new(config.task_registry_address, client.clone());
        let agents_registry = AgentsRegistry::new(config.agent_registry_address, client.clone());
        let service_registry = ServiceRegistry::new(config.service_registry_address, client);

        let broker: Arc<dyn MessageBroker> =
            Arc::new(RedisBroker::connect(&config.broker_url).await?);

        Ok(Self {
            task: TaskService::new(task_registry.clone()),
            agent: AgentService::new(agents_registry, signer_address),
            proposal: ProposalService::new(task_registry, broker, config.proposal_topic),
            service_registry: ServiceRegistryService::new(service_registry),
            subscriptions: Mutex::new(Vec::new()),
        })
    }

    /// Starts the task-event watcher and the proposal subscription for this
    /// wallet's address.
    pub async fn start(&self) -> Result<(), SdkError> {
        let tasks = self.task.subscribe();
        let proposals = self.proposal.setup_subscription(self.agent.address()).await?;

        let mut subs = self.subscriptions.lock().await;
        subs.push(tasks);
        subs.push(proposals);
        Ok(())
    }

    /// Aborts any running subscriptions.
    pub async fn stop(&self) {
        for handle in self.subscriptions.lock().await.drain(..) {
            handle.abort();
        }
        tracing::info!("Subscriptions stopped");
    }

    // --- Tasks ---

    /// Creates a new task against an approved proposal.
    pub async fn create_task(&self, params: TaskCreationParams) -> Result<Task, SdkError> {
        self.task.create_task(params).await
    }

    pub async fn get_task(&self, task_id: U256) -> Result<Task, SdkError> {
        self.task.get_task(task_id).await
    }

    pub async fn get_tasks_by_owner(&self, owner: Address) -> Result<Vec<Task>, SdkError> {
        self.task.get_tasks_by_owner(owner).await
    }

    /// Submits the result for an assigned task.
    pub async fn complete_task(&self, task_id: U256, result: &str) -> Result<(), SdkError> {
        self.task.complete_task(task_id, result).await
    }

    pub async fn set_on_new_task_listener(&self, listener: impl Fn(Task) + Send + Sync + 'static) {
        self.task.set_on_new_task_listener(listener).await;
    }

    // --- Agents ---

    /// Registers an agent under an already-registered service.
    pub async fn register_agent(
        &self,
        address: Address,
        name: &str,
        uri: &str,
        service_name: &str,
        service_price: U256,
    ) -> Result<bool, SdkError> {
        self.agent
            .register_agent(address, name, uri, service_name, service_price)
            .await
    }

    /// The address of the signing wallet.
    pub fn wallet_address(&self) -> Address {
        self.agent.address()
    }

    pub async fn get_agent(&self, address: Address) -> Result<Agent, SdkError> {
        self.agent.get_agent(address).await
    }

    pub async fn get_agents_by_service(&self, service_name: &str) -> Result<Vec<Agent>, SdkError> {
        self.agent.get_agents_by_service(service_name).await
    }

    pub async fn is_agent_registered(&self, address: Address) -> Result<bool, SdkError> {
        self.agent.is_agent_registered(address).await
    }

    pub async fn get_reputation(&self, address: Address) -> Result<U256, SdkError> {
        self.agent.get_reputation(address).await
    }

    // --- Proposals ---

    /// Bids on a task as this wallet's agent.
    pub async fn send_proposal(&self, task_id: U256, price: U256) -> Result<Proposal, SdkError> {
        self.proposal
            .send_proposal(task_id, self.agent.address(), price)
            .await
    }

    pub async fn get_proposals(&self, task_id: U256) -> Result<Vec<Proposal>, SdkError> {
        self.proposal.get_proposals(task_id).await
    }

    pub async fn approve_proposal(
        &self,
        task_id: U256,
        proposal: &Proposal,
    ) -> Result<(), SdkError> {
        self.proposal.approve_proposal(task_id, proposal).await
    }

    pub async fn set_on_new_proposal_listener(
        &self,
        listener: impl Fn(Proposal) + Send + Sync + 'static,
    ) {
        self.proposal.set_on_new_proposal_listener(listener).await;
    }

    // --- Services ---

    pub async fn register_service(&self, service: &Service) -> Result<(), SdkError> {
        self.service_registry.register_service(service).await
    }

    pub async fn get_service(&self, name: &str) -> Result<Service, SdkError> {
        self.service_registry.get_service(name).await
    }

    pub async fn is_service_registered(&self, name: &str) -> Result<bool, SdkError> {
        self.service_registry.is_service_registered(name).await
    }
}
