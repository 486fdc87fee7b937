//! Translation from the desired-state model into native rule shapes
//!
//! Translation is where the model's invariants are enforced: record/alert
//! mutual exclusivity, duration grammar, and scalar normalization. A
//! malformed field fails the whole translation; nothing is defaulted.

use crate::error::{Error, Result};
use crate::native::{AlertmanagerConfig, Rule, RuleGroup};
use crate::scalar;
use crate::spec::{AlertmanagerSpec, RuleGroupResource, RuleGroupSpec, RuleSpec};

impl RuleSpec {
    /// Translate this rule into the engine's native form.
    ///
    /// # Errors
    ///
    /// Returns an error when both or neither of `record`/`alert` are set,
    /// when a name or expression fragment is not a single YAML scalar, or
    /// when the `for` clause is not a valid duration.
    pub fn translate(&self) -> Result<Rule> {
        let record = self.record.as_deref().map(scalar::parse).transpose()?;
        let alert = self.alert.as_deref().map(scalar::parse).transpose()?;
        match (&record, &alert) {
            (Some(_), Some(_)) => return Err(Error::RuleNameConflict),
            (None, None) => return Err(Error::MissingRuleName),
            _ => {}
        }

        let expr = scalar::parse(&self.expr)?;
        let for_ = self.for_.as_deref().map(str::parse).transpose()?;

        Ok(Rule {
            record,
            alert,
            expr,
            for_,
            labels: self.labels.clone(),
            annotations: self.annotations.clone(),
        })
    }
}

impl RuleGroupSpec {
    /// Translate this group into the engine's native form under `name`.
    ///
    /// Rules keep their declared order. The first malformed rule or
    /// interval aborts the translation.
    pub fn translate(&self, name: &str) -> Result<RuleGroup> {
        let interval = self.interval.as_deref().map(str::parse).transpose()?;
        let rules = self
            .rules
            .iter()
            .map(RuleSpec::translate)
            .collect::<Result<Vec<_>>>()?;

        Ok(RuleGroup {
            name: name.to_string(),
            interval,
            rules,
        })
    }
}

impl RuleGroupResource {
    /// Translate the resource's spec under its declared name
    pub fn translate(&self) -> Result<RuleGroup> {
        self.spec.translate(&self.name)
    }
}

impl From<&AlertmanagerSpec> for AlertmanagerConfig {
    /// Alertmanager translation is the identity: the document and template
    /// files are opaque text to the reconciler and pass through verbatim.
    fn from(spec: &AlertmanagerSpec) -> Self {
        Self {
            template_files: spec.template_files.clone(),
            alertmanager_config: spec.alertmanager_config.clone(),
        }
    }
}
