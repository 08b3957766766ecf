use crate::error::SdkError;
use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Created,
    Assigned,
    Completed,
    Failed,
}

impl TryFrom<u8> for TaskStatus {
    type Error = SdkError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskStatus::Created),
            1 => Ok(TaskStatus::Assigned),
            2 => Ok(TaskStatus::Completed),
            3 => Ok(TaskStatus::Failed),
            other => Err(SdkError::UnknownTaskStatus(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: U256,
    pub prompt: String,
    pub issuer: Address,
    pub assignee: Option<Address>,
    pub proposal_id: U256,
    pub status: TaskStatus,
    pub result: Option<String>,
}

/// Raw `getTask` return tuple.
pub type TaskTuple = (U256, String, Address, Address, U256, u8, String);

impl TryFrom<TaskTuple> for Task {
    type Error = SdkError;

    fn try_from(t: TaskTuple) -> Result<Self, Self::Error> {
        let (id, prompt, issuer, assignee, proposal_id, status, result) = t;
        Ok(Task {
            id,
            prompt,
            issuer,
            // Solidity default values stand in for "unset"
            assignee: (!assignee.is_zero()).then_some(assignee),
            proposal_id,
            status: TaskStatus::try_from(status)?,
            result: (!result.is_empty()).then_some(result),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreationParams {
    pub prompt: String,
    pub proposal_id: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_contract_value() {
        assert_eq!(TaskStatus::try_from(0).unwrap(), TaskStatus::Created);
        assert_eq!(TaskStatus::try_from(3).unwrap(), TaskStatus::Failed);
        assert!(matches!(
            TaskStatus::try_from(9),
            Err(SdkError::UnknownTaskStatus(9))
        ));
    }

    #[test]
    fn tuple_normalizes_sentinel_fields() {
        let issuer: Address = "0x1111111111111111111111111111111111111111"
            .parse()
            .unwrap();
        let task = Task::try_from((
            U256::from(7),
            "write a thread".to_string(),
            issuer,
            Address::zero(),
            U256::from(3),
            0u8,
            String::new(),
        ))
        .unwrap();

        assert_eq!(task.id, U256::from(7));
        assert_eq!(task.issuer, issuer);
        assert_eq!(task.assignee, None);
        assert_eq!(task.status, TaskStatus::Created);
        assert_eq!(task.result, None);
    }

    #[test]
    fn tuple_keeps_populated_fields() {
        let addr: Address = "0x2222222222222222222222222222222222222222"
            .parse()
            .unwrap();
        let task = Task::try_from((
            U256::one(),
            "prompt".to_string(),
            addr,
            addr,
            U256::zero(),
            2u8,
            "done".to_string(),
        ))
        .unwrap();

        assert_eq!(task.assignee, Some(addr));
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.result.as_deref(), Some("done"));
    }
}
