//! End-to-end reconciliation tests
//!
//! These tests drive the full registry — both controllers over one fake
//! engine — through multi-object, multi-cycle scenarios: initial
//! convergence, steady state, drift repair, failure isolation, and
//! teardown. Desired state is declared as YAML the way an operator would
//! write it.

use pretty_assertions::assert_eq;

use cortex_core::{Controller, CycleOutcome, DesiredPresence, Registry, run_cycle};
use cortex_rules::native::AlertmanagerConfig;
use cortex_rules::{AlertmanagerSpec, RuleGroupResource};
use cortex_test_utils::FakeCortex;

fn declared_groups() -> Vec<RuleGroupResource> {
    serde_yaml::from_str(
        r#"
- name: node-alerts
  namespace: ops
  interval: 5m
  rules:
    - alert: HighCPU
      expr: cpu_usage > 0.8
      for: 10m
      labels:
        severity: critical
- name: request-rates
  namespace: ops
  interval: 1m
  rules:
    - record: job:requests:rate5m
      expr: sum(rate(requests_total[5m]))
- name: capacity
  namespace: dev
  rules:
    - alert: DiskFull
      expr: disk_used_ratio > 0.95
"#,
    )
    .unwrap()
}

fn declared_alertmanager() -> AlertmanagerSpec {
    serde_yaml::from_str(
        r#"
alertmanager_config: |
  route:
    receiver: on-call
  receivers:
    - name: on-call
template_files:
  page.tmpl: '{{ define "page" }}cpu{{ end }}'
"#,
    )
    .unwrap()
}

fn registry(engine: &FakeCortex) -> Registry<FakeCortex, FakeCortex> {
    Registry::new(engine.clone(), engine.clone())
}

/// One sync pass over everything the manifest declares
async fn sync_all(
    registry: &Registry<FakeCortex, FakeCortex>,
    groups: &[RuleGroupResource],
    alertmanager: &AlertmanagerSpec,
) -> Vec<CycleOutcome> {
    let mut outcomes = Vec::new();
    for group in groups {
        outcomes.push(
            run_cycle(registry.rule_groups(), group, DesiredPresence::Present)
                .await
                .unwrap(),
        );
    }
    outcomes.push(
        run_cycle(registry.alertmanager(), alertmanager, DesiredPresence::Present)
            .await
            .unwrap(),
    );
    outcomes
}

#[tokio::test]
async fn initial_convergence_creates_everything_once() {
    let engine = FakeCortex::new();
    let registry = registry(&engine);
    let groups = declared_groups();
    let alertmanager = declared_alertmanager();

    let outcomes = sync_all(&registry, &groups, &alertmanager).await;
    assert_eq!(outcomes, vec![CycleOutcome::Created; 4]);

    // The engine now holds exactly what was declared, translated.
    for group in &groups {
        let stored = engine.rule_group(&group.spec.namespace, &group.name).unwrap();
        assert_eq!(stored, group.translate().unwrap());
    }
    let stored = engine.alertmanager().unwrap();
    assert_eq!(stored, AlertmanagerConfig::from(&alertmanager));

    // One upsert per object, nothing else.
    assert_eq!(engine.calls().upserts, 4);
    assert_eq!(engine.calls().deletes, 0);
}

#[tokio::test]
async fn steady_state_cycles_mutate_nothing() {
    let engine = FakeCortex::new();
    let registry = registry(&engine);
    let groups = declared_groups();
    let alertmanager = declared_alertmanager();

    sync_all(&registry, &groups, &alertmanager).await;
    let upserts_after_convergence = engine.calls().upserts;

    for _ in 0..3 {
        let outcomes = sync_all(&registry, &groups, &alertmanager).await;
        assert_eq!(outcomes, vec![CycleOutcome::Unchanged; 4]);
    }
    assert_eq!(engine.calls().upserts, upserts_after_convergence);
}

#[tokio::test]
async fn interval_drift_is_repaired_without_touching_other_objects() {
    let engine = FakeCortex::new();
    let registry = registry(&engine);
    let groups = declared_groups();
    let alertmanager = declared_alertmanager();
    sync_all(&registry, &groups, &alertmanager).await;

    // Another actor rewrites one group's interval behind our back.
    let mut tampered = engine.rule_group("ops", "node-alerts").unwrap();
    tampered.interval = Some("30m".parse().unwrap());
    engine.seed_rule_group("ops", tampered);

    let outcomes = sync_all(&registry, &groups, &alertmanager).await;
    assert_eq!(
        outcomes,
        vec![
            CycleOutcome::Updated,
            CycleOutcome::Unchanged,
            CycleOutcome::Unchanged,
            CycleOutcome::Unchanged,
        ]
    );

    let repaired = engine.rule_group("ops", "node-alerts").unwrap();
    assert_eq!(repaired.interval, Some("5m".parse().unwrap()));
}

#[tokio::test]
async fn expression_drift_alone_is_not_repaired() {
    // The comparator only weighs the interval and record/alert names, so a
    // rule body rewritten behind our back stays rewritten. Documented
    // behavior of the narrow comparison, not an accident.
    let engine = FakeCortex::new();
    let registry = registry(&engine);
    let groups = declared_groups();
    let alertmanager = declared_alertmanager();
    sync_all(&registry, &groups, &alertmanager).await;

    let mut tampered = engine.rule_group("ops", "node-alerts").unwrap();
    tampered.rules[0].expr = "cpu_usage > 0.99".to_string();
    engine.seed_rule_group("ops", tampered);

    let outcomes = sync_all(&registry, &groups, &alertmanager).await;
    assert_eq!(outcomes, vec![CycleOutcome::Unchanged; 4]);

    let untouched = engine.rule_group("ops", "node-alerts").unwrap();
    assert_eq!(untouched.rules[0].expr, "cpu_usage > 0.99");
}

#[tokio::test]
async fn one_malformed_object_does_not_block_the_others() {
    let engine = FakeCortex::new();
    let registry = registry(&engine);
    let mut groups = declared_groups();
    groups[1].spec.interval = Some("1 minute".to_string());

    let mut failures = 0;
    for group in &groups {
        if run_cycle(registry.rule_groups(), group, DesiredPresence::Present)
            .await
            .is_err()
        {
            failures += 1;
        }
    }

    assert_eq!(failures, 1);
    assert!(engine.rule_group("ops", "node-alerts").is_some());
    assert!(engine.rule_group("ops", "request-rates").is_none());
    assert!(engine.rule_group("dev", "capacity").is_some());
}

#[tokio::test]
async fn teardown_deletes_everything_then_stays_quiet() {
    let engine = FakeCortex::new();
    let registry = registry(&engine);
    let groups = declared_groups();
    let alertmanager = declared_alertmanager();
    sync_all(&registry, &groups, &alertmanager).await;

    for group in &groups {
        let outcome = run_cycle(registry.rule_groups(), group, DesiredPresence::Absent)
            .await
            .unwrap();
        assert_eq!(outcome, CycleOutcome::Deleted);
        assert!(engine.rule_group(&group.spec.namespace, &group.name).is_none());
    }
    let outcome = run_cycle(registry.alertmanager(), &alertmanager, DesiredPresence::Absent)
        .await
        .unwrap();
    assert_eq!(outcome, CycleOutcome::Deleted);
    assert_eq!(engine.alertmanager(), None);

    // A second teardown pass finds nothing and issues no deletes.
    let deletes_after_teardown = engine.calls().deletes;
    for group in &groups {
        let outcome = run_cycle(registry.rule_groups(), group, DesiredPresence::Absent)
            .await
            .unwrap();
        assert_eq!(outcome, CycleOutcome::Unchanged);
    }
    assert_eq!(engine.calls().deletes, deletes_after_teardown);
}

#[tokio::test]
async fn unavailable_engine_fails_cycles_without_partial_state() {
    let engine = FakeCortex::new();
    let registry = registry(&engine);
    let groups = declared_groups();

    engine.fail_remote_calls(503, "ingester ring unhealthy");
    for group in &groups {
        let result = run_cycle(registry.rule_groups(), group, DesiredPresence::Present).await;
        assert!(result.is_err());
    }
    assert_eq!(engine.calls().upserts, 0);

    // Once the engine recovers, the next cycles converge normally.
    engine.clear_failure();
    for group in &groups {
        let outcome = run_cycle(registry.rule_groups(), group, DesiredPresence::Present)
            .await
            .unwrap();
        assert_eq!(outcome, CycleOutcome::Created);
    }
}

#[tokio::test]
async fn observe_reports_exists_and_up_to_date_separately() {
    let engine = FakeCortex::new();
    let registry = registry(&engine);
    let groups = declared_groups();

    // Nothing exists yet.
    let observation = registry.rule_groups().observe(&groups[0]).await.unwrap();
    assert!(!observation.resource_exists);
    assert!(!observation.resource_up_to_date);

    // Converged: exists and current.
    run_cycle(registry.rule_groups(), &groups[0], DesiredPresence::Present)
        .await
        .unwrap();
    let observation = registry.rule_groups().observe(&groups[0]).await.unwrap();
    assert!(observation.resource_exists);
    assert!(observation.resource_up_to_date);

    // Stale: exists but behind the declared interval.
    let mut changed = groups[0].clone();
    changed.spec.interval = Some("15m".to_string());
    let observation = registry.rule_groups().observe(&changed).await.unwrap();
    assert!(observation.resource_exists);
    assert!(!observation.resource_up_to_date);
}
