pub mod agent_registry;
pub mod service_registry;
pub mod task_registry;

pub use agent_registry::AgentsRegistry;
pub use service_registry::ServiceRegistry;
pub use task_registry::{TaskCreatedFilter, TaskRegistry};

use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::signers::LocalWallet;

/// Provider + wallet stack shared by every registry binding.
pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;
