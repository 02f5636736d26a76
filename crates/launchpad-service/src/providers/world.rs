//! World and contract deployment.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use launchpad_core::{DeployedContracts, GameHandle, Result, TemplateType};

/// Creates game worlds and deploys their contracts.
#[async_trait]
pub trait WorldProvider: Send + Sync {
    /// Create a world for a new game and return its address.
    async fn create_world(&self, title: &str, template: TemplateType) -> Result<String>;

    /// Deploy a game's contracts into its world.
    async fn deploy_contracts(
        &self,
        game: &GameHandle,
        world_address: &str,
    ) -> Result<DeployedContracts>;
}

/// Deterministic in-process world provider.
///
/// World addresses are derived from the title and template, so creating the
/// same game twice yields the same world. Contract addresses are random.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubWorldProvider;

#[async_trait]
impl WorldProvider for StubWorldProvider {
    async fn create_world(&self, title: &str, template: TemplateType) -> Result<String> {
        let digest = Sha256::new()
            .chain_update(title.as_bytes())
            .chain_update(template.as_str().as_bytes())
            .finalize();
        let address = format!("0x{}", &hex::encode(digest)[..40]);

        tracing::info!(title = %title, template = %template, world_address = %address, "World created");
        Ok(address)
    }

    async fn deploy_contracts(
        &self,
        game: &GameHandle,
        world_address: &str,
    ) -> Result<DeployedContracts> {
        let contracts = DeployedContracts {
            world: world_address.to_string(),
            game_logic: random_address(),
            player_registry: random_address(),
            payment_handler: random_address(),
        };

        tracing::info!(game_id = %game, world_address = %world_address, "Contracts deployed");
        Ok(contracts)
    }
}

/// `0x` followed by 40 hex characters taken from two fresh UUIDs.
fn random_address() -> String {
    let hex = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    format!("0x{}", &hex[..40])
}
