//! In-memory fake of the rules engine
//!
//! [`FakeCortex`] implements both client traits over plain maps, honoring
//! the same contract as the real engine: fetches of absent resources
//! return `None`, sets are upserts, deletes of absent resources succeed.
//! Every call is counted so tests can assert exactly how many remote
//! mutations a cycle performed, and fault injection lets tests simulate an
//! unavailable engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use cortex_client::{AlertmanagerApi, Error, Result, RuleGroupApi};
use cortex_rules::native::{AlertmanagerConfig, RuleGroup};

/// How many calls of each kind the fake engine has served
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallLog {
    /// Fetches (rule group or Alertmanager)
    pub fetches: usize,
    /// Upserts (rule group or Alertmanager)
    pub upserts: usize,
    /// Deletes (rule group or Alertmanager)
    pub deletes: usize,
}

#[derive(Default)]
struct FakeState {
    rule_groups: HashMap<(String, String), RuleGroup>,
    alertmanager: Option<AlertmanagerConfig>,
    calls: CallLog,
    failure: Option<(u16, String)>,
}

/// An in-memory rules engine for tests.
///
/// Clones share state, mirroring the real client: hand one clone to a
/// controller and keep another to inspect what the engine holds.
#[derive(Default, Clone)]
pub struct FakeCortex {
    state: Arc<Mutex<FakeState>>,
}

impl FakeCortex {
    /// An empty engine holding nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a rule group directly, bypassing the API surface
    pub fn seed_rule_group(&self, namespace: &str, group: RuleGroup) {
        let mut state = self.state.lock().unwrap();
        state
            .rule_groups
            .insert((namespace.to_string(), group.name.clone()), group);
    }

    /// Store an Alertmanager config directly, bypassing the API surface
    pub fn seed_alertmanager(&self, config: AlertmanagerConfig) {
        self.state.lock().unwrap().alertmanager = Some(config);
    }

    /// Make every subsequent call fail with the given status and message
    pub fn fail_remote_calls(&self, status: u16, message: &str) {
        self.state.lock().unwrap().failure = Some((status, message.to_string()));
    }

    /// Stop injecting failures
    pub fn clear_failure(&self) {
        self.state.lock().unwrap().failure = None;
    }

    /// What the engine currently holds for one group, if anything
    pub fn rule_group(&self, namespace: &str, name: &str) -> Option<RuleGroup> {
        let state = self.state.lock().unwrap();
        state
            .rule_groups
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// The currently stored Alertmanager config, if any
    pub fn alertmanager(&self) -> Option<AlertmanagerConfig> {
        self.state.lock().unwrap().alertmanager.clone()
    }

    /// Counters for every call served so far
    pub fn calls(&self) -> CallLog {
        self.state.lock().unwrap().calls
    }
}

impl FakeState {
    fn check_failure(&self) -> Result<()> {
        match &self.failure {
            Some((status, message)) => Err(Error::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RuleGroupApi for FakeCortex {
    async fn get_rule_group(&self, namespace: &str, group: &str) -> Result<Option<RuleGroup>> {
        let mut state = self.state.lock().unwrap();
        state.calls.fetches += 1;
        state.check_failure()?;
        Ok(state
            .rule_groups
            .get(&(namespace.to_string(), group.to_string()))
            .cloned())
    }

    async fn set_rule_group(&self, namespace: &str, group: &RuleGroup) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.upserts += 1;
        state.check_failure()?;
        state
            .rule_groups
            .insert((namespace.to_string(), group.name.clone()), group.clone());
        Ok(())
    }

    async fn delete_rule_group(&self, namespace: &str, group: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.deletes += 1;
        state.check_failure()?;
        // Removing an absent group is success, like the engine's 404 mapping.
        state
            .rule_groups
            .remove(&(namespace.to_string(), group.to_string()));
        Ok(())
    }
}

#[async_trait]
impl AlertmanagerApi for FakeCortex {
    async fn get_alertmanager_config(&self) -> Result<Option<AlertmanagerConfig>> {
        let mut state = self.state.lock().unwrap();
        state.calls.fetches += 1;
        state.check_failure()?;
        Ok(state.alertmanager.clone())
    }

    async fn set_alertmanager_config(&self, config: &AlertmanagerConfig) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.upserts += 1;
        state.check_failure()?;
        state.alertmanager = Some(config.clone());
        Ok(())
    }

    async fn delete_alertmanager_config(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.deletes += 1;
        state.check_failure()?;
        state.alertmanager = None;
        Ok(())
    }
}
