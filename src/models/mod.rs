pub mod agent;
pub mod proposal;
pub mod service;
pub mod task;

pub use agent::*;
pub use proposal::*;
pub use service::*;
pub use task::*;
