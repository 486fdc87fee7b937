//! Explicit controller registry
//!
//! The registry is built once at startup and handed to whatever drives the
//! reconciliation cycles. Controllers are selected per resource kind at
//! construction time; there is no ambient global registration and no
//! per-call kind dispatch.

use cortex_client::{AlertmanagerApi, Config, CortexClient, RuleGroupApi};

use crate::alertmanager::AlertmanagerController;
use crate::rulegroup::RuleGroupController;

/// The set of controllers managing one engine tenant
pub struct Registry<R, A> {
    /// Controller for rule groups
    rule_groups: RuleGroupController<R>,
    /// Controller for the Alertmanager configuration
    alertmanager: AlertmanagerController<A>,
}

impl<R: RuleGroupApi, A: AlertmanagerApi> Registry<R, A> {
    /// Build a registry from per-kind clients
    pub fn new(rule_group_client: R, alertmanager_client: A) -> Self {
        Self {
            rule_groups: RuleGroupController::new(rule_group_client),
            alertmanager: AlertmanagerController::new(alertmanager_client),
        }
    }

    /// The rule-group controller
    pub fn rule_groups(&self) -> &RuleGroupController<R> {
        &self.rule_groups
    }

    /// The Alertmanager controller
    pub fn alertmanager(&self) -> &AlertmanagerController<A> {
        &self.alertmanager
    }
}

impl Registry<CortexClient, CortexClient> {
    /// Wire both controllers to one engine, from connection parameters
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be constructed from the
    /// given configuration.
    pub fn connect(config: &Config) -> cortex_client::Result<Self> {
        let client = CortexClient::new(config)?;
        Ok(Self::new(client.clone(), client))
    }
}
