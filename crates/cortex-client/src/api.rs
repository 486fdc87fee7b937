//! Client traits consumed by the convergence engine
//!
//! "Absent" is a typed outcome at this boundary: fetches return `Ok(None)`
//! for a resource the engine does not hold, and deleting an absent
//! resource reports success. Callers never classify error text.

use async_trait::async_trait;

use cortex_rules::native::{AlertmanagerConfig, RuleGroup};

use crate::error::Result;

/// Operations on ruler namespaces and their rule groups
#[async_trait]
pub trait RuleGroupApi: Send + Sync {
    /// Fetch one rule group; `None` when the engine does not hold it
    async fn get_rule_group(&self, namespace: &str, group: &str) -> Result<Option<RuleGroup>>;

    /// Create or replace a rule group (idempotent upsert)
    async fn set_rule_group(&self, namespace: &str, group: &RuleGroup) -> Result<()>;

    /// Delete a rule group; deleting an absent group succeeds
    async fn delete_rule_group(&self, namespace: &str, group: &str) -> Result<()>;
}

/// Operations on the tenant's Alertmanager configuration
#[async_trait]
pub trait AlertmanagerApi: Send + Sync {
    /// Fetch the tenant configuration; `None` when none is stored
    async fn get_alertmanager_config(&self) -> Result<Option<AlertmanagerConfig>>;

    /// Create or replace the tenant configuration (idempotent upsert)
    async fn set_alertmanager_config(&self, config: &AlertmanagerConfig) -> Result<()>;

    /// Delete the tenant configuration; deleting when absent succeeds
    async fn delete_alertmanager_config(&self) -> Result<()>;
}
