//! Desired-state manifest loading
//!
//! The manifest is the CLI's state store: one YAML file declaring the rule
//! groups and, optionally, the Alertmanager configuration the tenant
//! should hold. It is read fresh for every invocation and never written.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use cortex_rules::{AlertmanagerSpec, RuleGroupResource};

use crate::error::{CliError, Result};

/// Everything one manifest declares for the tenant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Rule groups to reconcile
    #[serde(default)]
    pub rule_groups: Vec<RuleGroupResource>,

    /// Alertmanager configuration to reconcile, when declared
    #[serde(default)]
    pub alertmanager: Option<AlertmanagerSpec>,
}

impl Manifest {
    /// Load and validate a manifest file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, is not valid YAML, or
    /// declares the same group identity twice.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::user(format!(
                "Manifest not found at {}",
                path.display()
            )));
        }
        tracing::debug!(?path, "Loading desired-state manifest");
        let content = std::fs::read_to_string(path)?;
        let manifest: Self = serde_yaml::from_str(&content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reject duplicate group identities early; the engine would silently
    /// let the later declaration win
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for group in &self.rule_groups {
            if !seen.insert((group.spec.namespace.as_str(), group.name.as_str())) {
                return Err(CliError::user(format!(
                    "Duplicate rule group {}/{} in manifest",
                    group.spec.namespace, group.name
                )));
            }
        }
        Ok(())
    }

    /// Number of declared objects, counting the Alertmanager block as one
    pub fn object_count(&self) -> usize {
        self.rule_groups.len() + usize::from(self.alertmanager.is_some())
    }
}
