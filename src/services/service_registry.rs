use crate::contracts::{ServiceRegistry, SignerClient};
use crate::error::SdkError;
use crate::models::Service;
use crate::services::confirm;

pub struct ServiceRegistryService {
    registry: ServiceRegistry<SignerClient>,
}

impl ServiceRegistryService {
    pub fn new(registry: ServiceRegistry<SignerClient>) -> Self {
        Self { registry }
    }

    pub async fn register_service(&self, service: &Service) -> Result<(), SdkError> {
        if service.name.trim().is_empty() {
            return Err(SdkError::MissingArgument("name"));
        }

        tracing::info!(service = %service.name, "Registering service");

        let call = self.registry.register_service(
            service.name.clone(),
            service.category.clone(),
            service.description.clone(),
        );
        let pending = call.send().await.map_err(SdkError::contract)?;
        tracing::debug!(service = %service.name, tx = ?*pending, "Transaction sent");

        let receipt = confirm(pending).await?;
        tracing::info!(
            service = %service.name,
            tx = ?receipt.transaction_hash,
            "Service registered"
        );
        Ok(())
    }

    pub async fn get_service(&self, name: &str) -> Result<Service, SdkError> {
        let (found_name, category, description) = self
            .registry
            .get_service(name.to_string())
            .call()
            .await
            .map_err(SdkError::contract)?;
        if found_name.is_empty() {
            return Err(SdkError::ServiceNotRegistered(name.to_string()));
        }
        Ok(Service {
            name: found_name,
            category,
            description,
        })
    }

    pub async fn is_service_registered(&self, name: &str) -> Result<bool, SdkError> {
        self.registry
            .is_service_registered(name.to_string())
            .call()
            .await
            .map_err(SdkError::contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::middleware::SignerMiddleware;
    use ethers::providers::{Http, Provider};
    use ethers::signers::LocalWallet;
    use ethers::types::Address;
    use std::sync::Arc;

    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn service() -> ServiceRegistryService {
        let provider = Provider::<Http>::try_from("http://localhost:8545").unwrap();
        let wallet: LocalWallet = DEV_KEY.parse().unwrap();
        let client = Arc::new(SignerMiddleware::new(provider, wallet));
        ServiceRegistryService::new(ServiceRegistry::new(Address::zero(), client))
    }

    #[tokio::test]
    async fn register_service_rejects_blank_name() {
        let result = service()
            .register_service(&Service {
                name: " ".to_string(),
                category: "Social Service".to_string(),
                description: "This is a KOL service.".to_string(),
            })
            .await;
        assert!(matches!(result, Err(SdkError::MissingArgument("name"))));
    }
}
