use crate::contracts::{SignerClient, TaskCreatedFilter, TaskRegistry};
use crate::error::SdkError;
use crate::models::{Task, TaskCreationParams};
use crate::services::broker::ListenerSlot;
use crate::services::confirm;
use ethers::abi::RawLog;
use ethers::contract::EthLogDecode;
use ethers::types::{Address, U256};
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct TaskService {
    registry: TaskRegistry<SignerClient>,
    on_new_task: Arc<ListenerSlot<Task>>,
}

impl TaskService {
    pub fn new(registry: TaskRegistry<SignerClient>) -> Self {
        Self {
            registry,
            on_new_task: Arc::new(ListenerSlot::new()),
        }
    }

    /// Creates a task referencing an approved proposal and returns the
    /// on-chain record once the transaction is mined.
    pub async fn create_task(&self, params: TaskCreationParams) -> Result<Task, SdkError> {
        if params.prompt.trim().is_empty() {
            return Err(SdkError::MissingArgument("prompt"));
        }

        tracing::info!(proposal_id = %params.proposal_id, "Creating task");

        let call = self
            .registry
            .create_task(params.prompt.clone(), params.proposal_id);
        let pending = call.send().await.map_err(SdkError::contract)?;
        let receipt = confirm(pending).await?;

        let created = receipt
            .logs
            .iter()
            .find_map(|log| {
                TaskCreatedFilter::decode_log(&RawLog {
                    topics: log.topics.clone(),
                    data: log.data.to_vec(),
                })
                .ok()
            })
            .ok_or(SdkError::EventNotFound("TaskCreated"))?;

        tracing::info!(
            task_id = %created.task_id,
            tx = ?receipt.transaction_hash,
            "Task created"
        );

        self.get_task(created.task_id).await
    }

    pub async fn get_task(&self, task_id: U256) -> Result<Task, SdkError> {
        let raw = self
            .registry
            .get_task(task_id)
            .call()
            .await
            .map_err(|e| SdkError::contract(e).for_task(task_id))?;
        if raw.2.is_zero() {
            return Err(SdkError::TaskNotFound(task_id));
        }
        Task::try_from(raw)
    }

    pub async fn get_tasks_by_owner(&self, owner: Address) -> Result<Vec<Task>, SdkError> {
        let ids = self
            .registry
            .get_tasks_by_owner(owner)
            .call()
            .await
            .map_err(SdkError::contract)?;

        let mut tasks = Vec::with_capacity(ids.len());
        for id in ids {
            tasks.push(self.get_task(id).await?);
        }
        Ok(tasks)
    }

    pub async fn complete_task(&self, task_id: U256, result: &str) -> Result<(), SdkError> {
        if result.trim().is_empty() {
            return Err(SdkError::MissingArgument("result"));
        }

        let call = self.registry.complete_task(task_id, result.to_string());
        let pending = call
            .send()
            .await
            .map_err(|e| SdkError::contract(e).for_task(task_id))?;
        let receipt = confirm(pending).await?;

        tracing::info!(
            task_id = %task_id,
            tx = ?receipt.transaction_hash,
            "Task completed"
        );
        Ok(())
    }

    /// Watches `TaskCreated` events and forwards each new task to the
    /// registered listener. Stream errors are logged and skipped.
    pub fn subscribe(&self) -> JoinHandle<()> {
        let registry = self.registry.clone();
        let slot = self.on_new_task.clone();

        tokio::spawn(async move {
            let event = registry.task_created_filter();
            let mut stream = match event.stream().await {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!("Failed to watch TaskCreated events: {}", e);
                    return;
                }
            };

            tracing::info!("Watching for new tasks");

            while let Some(item) = stream.next().await {
                let created = match item {
                    Ok(ev) => ev,
                    Err(e) => {
                        tracing::warn!("Event decode error: {}", e);
                        continue;
                    }
                };

                match registry.get_task(created.task_id).call().await {
                    Ok(raw) => match Task::try_from(raw) {
                        Ok(task) => slot.notify(task).await,
                        Err(e) => {
                            tracing::warn!(task_id = %created.task_id, "Malformed task record: {}", e)
                        }
                    },
                    Err(e) => {
                        tracing::warn!(task_id = %created.task_id, "Failed to fetch task: {}", e)
                    }
                }
            }
        })
    }

    pub async fn set_on_new_task_listener(&self, listener: impl Fn(Task) + Send + Sync + 'static) {
        self.on_new_task.set(listener).await;
    }
}
