//! State comparators
//!
//! A comparator answers one question per resource kind: does the observed
//! remote state already satisfy the desired spec? The verdict drives the
//! cycle's decision between no-op and update, so it must not depend on
//! map iteration order and must never report a false "stale" that would
//! cause an update storm.

use cortex_rules::native::{AlertmanagerConfig, Rule, RuleGroup};
use cortex_rules::{AlertmanagerSpec, PromDuration, RuleGroupSpec};

/// Whether the observed Alertmanager state already satisfies the spec.
///
/// The configuration document must match byte for byte, and the template
/// mapping must hold exactly the same keys and values. A size check
/// rejects most mismatches before the per-key comparison.
pub fn alertmanager_up_to_date(
    desired: &AlertmanagerSpec,
    observed: &AlertmanagerConfig,
) -> bool {
    if observed.alertmanager_config.is_empty() {
        return false;
    }
    if desired.alertmanager_config != observed.alertmanager_config {
        return false;
    }
    if desired.template_files.len() != observed.template_files.len() {
        return false;
    }
    observed
        .template_files
        .iter()
        .all(|(name, body)| desired.template_files.get(name) == Some(body))
}

/// Whether the observed rule group already satisfies the spec.
///
/// Deliberately narrow: only the evaluation interval and the translated
/// `record`/`alert` name values participate in the verdict. Expression,
/// labels, annotations, and `for` differences do NOT mark a group stale —
/// a change confined to those fields is reported as up to date and
/// triggers no update. Widening the comparison would change reconciliation
/// cadence observably, so the gap is kept and covered by tests.
///
/// Desired rules are matched against the observed group by rule kind, not
/// by name: the last record rule and last alert rule observed act as the
/// representatives of their kind. With several observed rules of one kind
/// the verdict is therefore last-one-wins; that limitation is inherited
/// and documented rather than generalized.
pub fn rule_group_up_to_date(desired: &RuleGroupSpec, observed: &RuleGroup) -> bool {
    let desired_interval = match desired.interval.as_deref() {
        // A malformed interval reads as stale; translation surfaces the
        // actual error on the update path.
        Some(text) => match text.parse::<PromDuration>() {
            Ok(interval) => interval,
            Err(_) => return false,
        },
        None => PromDuration::ZERO,
    };
    if desired_interval != observed.interval.unwrap_or(PromDuration::ZERO) {
        return false;
    }

    let mut record_rule: Option<&Rule> = None;
    let mut alert_rule: Option<&Rule> = None;
    for rule in &observed.rules {
        if rule.record.is_some() {
            record_rule = Some(rule);
        }
        if rule.alert.is_some() {
            alert_rule = Some(rule);
        }
    }

    for rule in &desired.rules {
        let translated = match rule.translate() {
            Ok(translated) => translated,
            Err(_) => return false,
        };
        if let Some(alert) = translated.alert.as_deref()
            && alert_rule.and_then(|r| r.alert.as_deref()) != Some(alert)
        {
            return false;
        }
        if let Some(record) = translated.record.as_deref()
            && record_rule.and_then(|r| r.record.as_deref()) != Some(record)
        {
            return false;
        }
    }

    true
}
