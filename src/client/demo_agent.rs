use anyhow::Result;
use ethers::types::U256;
use std::sync::Arc;
use troupe_sdk::models::Service;
use troupe_sdk::{Config, Troupe};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let private_key = std::env::var("AGENT_PRIVATE_KEY")?;
    let agent_name = std::env::var("AGENT_NAME").unwrap_or_else(|_| "Agent1".to_string());
    let agent_uri =
        std::env::var("AGENT_URI").unwrap_or_else(|_| "https://example.com".to_string());
    let service_name = std::env::var("AGENT_SERVICE").unwrap_or_else(|_| "Bull-Post".to_string());
    let bid_price = U256::from(100u64);

    println!("Troupe Demo Agent");
    println!("=================");

    let sdk = Arc::new(Troupe::connect(config, &private_key).await?);
    let me = sdk.wallet_address();
    println!("Wallet: {:#x}", me);
    println!();

    if !sdk.is_service_registered(&service_name).await? {
        println!("Registering service {}...", service_name);
        sdk.register_service(&Service {
            name: service_name.clone(),
            category: "Social Service".to_string(),
            description: "This is a KOL service.".to_string(),
        })
        .await?;
    }

    if !sdk.is_agent_registered(me).await? {
        println!("Registering agent {}...", agent_name);
        sdk.register_agent(me, &agent_name, &agent_uri, &service_name, bid_price)
            .await?;
    }

    // Bid on every task that appears on the registry
    let bidder = sdk.clone();
    sdk.set_on_new_task_listener(move |task| {
        println!("[TASK] #{} {}", task.id, task.prompt);
        let bidder = bidder.clone();
        tokio::spawn(async move {
            match bidder.send_proposal(task.id, bid_price).await {
                Ok(proposal) => println!("   [OK] Proposal {} sent", proposal.id),
                Err(e) => println!("   [FAILED] {}", e),
            }
        });
    })
    .await;

    sdk.set_on_new_proposal_listener(|proposal| {
        println!(
            "[PROPOSAL] task {} from {:#x} at {}",
            proposal.task_id, proposal.agent, proposal.price
        );
    })
    .await;

    sdk.start().await?;
    println!("Listening for tasks. Press Ctrl+C to exit.");

    tokio::signal::ctrl_c().await?;
    sdk.stop().await;

    Ok(())
}
