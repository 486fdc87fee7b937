//! Controller for the tenant's Alertmanager configuration

use async_trait::async_trait;

use cortex_client::AlertmanagerApi;
use cortex_rules::AlertmanagerSpec;
use cortex_rules::native::AlertmanagerConfig;

use crate::compare;
use crate::controller::{Controller, Observation};
use crate::error::Result;

/// Reconciles the tenant's single Alertmanager configuration
pub struct AlertmanagerController<C> {
    /// Client used to reach the engine
    client: C,
}

impl<C> AlertmanagerController<C> {
    /// Create a controller over the given client
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: AlertmanagerApi> AlertmanagerController<C> {
    /// Upsert the configuration; shared by Create and Update since the
    /// engine's set operation is an idempotent upsert
    async fn apply(&self, desired: &AlertmanagerSpec) -> Result<()> {
        let payload = AlertmanagerConfig::from(desired);
        self.client.set_alertmanager_config(&payload).await?;
        Ok(())
    }
}

#[async_trait]
impl<C: AlertmanagerApi> Controller for AlertmanagerController<C> {
    type Desired = AlertmanagerSpec;

    async fn observe(&self, desired: &AlertmanagerSpec) -> Result<Observation> {
        let observed = self.client.get_alertmanager_config().await?;

        Ok(match observed {
            None => Observation::absent(),
            Some(config) => {
                Observation::present(compare::alertmanager_up_to_date(desired, &config))
            }
        })
    }

    async fn create(&self, desired: &AlertmanagerSpec) -> Result<()> {
        tracing::debug!("Creating Alertmanager config");
        self.apply(desired).await
    }

    async fn update(&self, desired: &AlertmanagerSpec) -> Result<()> {
        tracing::debug!("Updating Alertmanager config");
        self.apply(desired).await
    }

    async fn delete(&self, _desired: &AlertmanagerSpec) -> Result<()> {
        tracing::debug!("Deleting Alertmanager config");
        self.client.delete_alertmanager_config().await?;
        Ok(())
    }
}
