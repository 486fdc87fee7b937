//! Controller for rule groups

use async_trait::async_trait;

use cortex_client::RuleGroupApi;
use cortex_rules::RuleGroupResource;

use crate::compare;
use crate::controller::{Controller, Observation};
use crate::error::Result;

/// Reconciles one declared rule group against the engine's ruler API
pub struct RuleGroupController<C> {
    /// Client used to reach the engine
    client: C,
}

impl<C> RuleGroupController<C> {
    /// Create a controller over the given client
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: RuleGroupApi> RuleGroupController<C> {
    /// Translate the desired group and upsert it.
    ///
    /// Create and Update share this path: the engine's set operation is an
    /// idempotent upsert, so there is nothing create-specific to do.
    /// Translation failures abort before any remote call.
    async fn apply(&self, desired: &RuleGroupResource) -> Result<()> {
        let translated = desired.translate()?;
        self.client
            .set_rule_group(&desired.spec.namespace, &translated)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<C: RuleGroupApi> Controller for RuleGroupController<C> {
    type Desired = RuleGroupResource;

    async fn observe(&self, desired: &RuleGroupResource) -> Result<Observation> {
        let observed = self
            .client
            .get_rule_group(&desired.spec.namespace, &desired.name)
            .await?;

        Ok(match observed {
            None => Observation::absent(),
            Some(group) => {
                Observation::present(compare::rule_group_up_to_date(&desired.spec, &group))
            }
        })
    }

    async fn create(&self, desired: &RuleGroupResource) -> Result<()> {
        tracing::debug!(
            namespace = %desired.spec.namespace,
            group = %desired.name,
            "Creating rule group"
        );
        self.apply(desired).await
    }

    async fn update(&self, desired: &RuleGroupResource) -> Result<()> {
        tracing::debug!(
            namespace = %desired.spec.namespace,
            group = %desired.name,
            "Updating rule group"
        );
        self.apply(desired).await
    }

    async fn delete(&self, desired: &RuleGroupResource) -> Result<()> {
        tracing::debug!(
            namespace = %desired.spec.namespace,
            group = %desired.name,
            "Deleting rule group"
        );
        self.client
            .delete_rule_group(&desired.spec.namespace, &desired.name)
            .await?;
        Ok(())
    }
}
