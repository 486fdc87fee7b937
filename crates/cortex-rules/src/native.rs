//! Native wire shapes of the rules engine
//!
//! These types mirror the YAML documents the ruler and Alertmanager APIs
//! accept and return. They are the targets of translation; desired-state
//! types never cross the wire untranslated. Unknown fields returned by the
//! engine (e.g. remote-write metadata) are ignored on deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::duration::PromDuration;

/// A rule group in the engine's own rule-file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroup {
    /// Group name, unique within its ruler namespace
    pub name: String,

    /// Evaluation interval; omitted when the engine default applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<PromDuration>,

    /// Rules in evaluation order
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// One rule inside a native rule group.
///
/// Empty label and annotation maps are omitted from the serialized form;
/// the engine omits them in its responses too, and sending empty objects
/// would show up as spurious diffs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Output series name for a recording rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,

    /// Alert name for an alerting rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,

    /// The PromQL expression, as a normalized scalar
    pub expr: String,

    /// Firing delay for alerting rules
    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_: Option<PromDuration>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// The tenant's Alertmanager payload: configuration document plus
/// notification template files, exactly as the engine stores them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertmanagerConfig {
    /// Template files by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub template_files: BTreeMap<String, String>,

    /// The routing/receiver document
    pub alertmanager_config: String,
}
