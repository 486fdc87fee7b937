//! Desired-state model for managed tenant configuration
//!
//! These types carry what the operator has declared, before translation
//! into the engine's native shapes. They are immutable inputs to a
//! reconciliation cycle and are never mutated by the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single recording or alerting rule as declared by the operator.
///
/// Exactly one of `record` and `alert` must be set. The invariant is
/// enforced at translation time and violations are reported as errors,
/// never defaulted away.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Name of the time series a recording rule outputs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,

    /// Name of the alert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,

    /// The PromQL expression evaluated each evaluation cycle
    pub expr: String,

    /// How long the condition must hold before the alert fires
    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_: Option<String>,

    /// Labels added or overwritten on the produced series or alerts
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    /// Annotations attached to each alert
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Desired state of one rule group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroupSpec {
    /// Ruler namespace the group lives in. Group names are unique within a
    /// namespace. Write-once: moving a group between namespaces requires
    /// delete and recreate, never an in-place update.
    pub namespace: String,

    /// How often rules in the group are evaluated (duration string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,

    /// Rules evaluated sequentially at the shared interval, in order
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

/// A rule group together with its identity, as declared in a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroupResource {
    /// Group name, unique within the namespace
    pub name: String,

    /// The desired group contents
    #[serde(flatten)]
    pub spec: RuleGroupSpec,
}

/// Desired state of the tenant's Alertmanager configuration.
///
/// Both fields are opaque to the reconciler; the engine treats the document
/// and every template file as plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertmanagerSpec {
    /// The Alertmanager configuration document, passed through verbatim
    pub alertmanager_config: String,

    /// Notification template files by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub template_files: BTreeMap<String, String>,
}
