//! Command implementations
//!
//! Every command loads the manifest fresh, wires a registry from the
//! connection config, and walks the declared objects one cycle each. A
//! failing object does not stop the walk; failures are collected and
//! reported together.

use std::path::{Path, PathBuf};

use colored::Colorize;

use cortex_client::{Config, CortexClient};
use cortex_core::{
    Action, Controller, CycleOutcome, DesiredPresence, Observation, Registry, plan, run_cycle,
};

use crate::error::{CliError, Result};
use crate::manifest::Manifest;

/// Where the connection config lives when `--config` is not given
fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("cortex-manager").join("config.toml"))
        .ok_or_else(|| {
            CliError::user("Cannot determine the platform config directory; pass --config")
        })
}

/// Load connection parameters and wire the controller registry
fn connect(config_path: Option<&Path>) -> Result<Registry<CortexClient, CortexClient>> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    let config = Config::load(&path)?;
    Ok(Registry::connect(&config)?)
}

/// Observe every declared object and report drift.
///
/// Exits non-zero when any object is missing or stale, so the command can
/// gate CI pipelines.
pub async fn run_check(manifest_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    let registry = connect(config_path)?;

    let mut out_of_sync = 0;
    for group in &manifest.rule_groups {
        let observation = registry.rule_groups().observe(group).await?;
        if !observation.resource_up_to_date {
            out_of_sync += 1;
        }
        println!(
            "rule group {}/{}: {}",
            group.spec.namespace,
            group.name,
            describe_observation(observation)
        );
    }
    if let Some(alertmanager) = &manifest.alertmanager {
        let observation = registry.alertmanager().observe(alertmanager).await?;
        if !observation.resource_up_to_date {
            out_of_sync += 1;
        }
        println!("alertmanager: {}", describe_observation(observation));
    }

    if out_of_sync == 0 {
        println!(
            "{} all {} objects in sync",
            "ok".green().bold(),
            manifest.object_count()
        );
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} of {} objects out of sync",
            out_of_sync,
            manifest.object_count()
        )))
    }
}

/// Reconcile every declared object toward the manifest
pub async fn run_sync(
    manifest_path: &Path,
    config_path: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    reconcile_all(manifest_path, config_path, DesiredPresence::Present, dry_run).await
}

/// Drive every declared object to absence
pub async fn run_delete(manifest_path: &Path, config_path: Option<&Path>) -> Result<()> {
    reconcile_all(manifest_path, config_path, DesiredPresence::Absent, false).await
}

/// What one object's reconciliation produced
enum SyncAction {
    /// Dry-run: the action that would have been taken
    Planned(Action),
    /// A completed cycle
    Done(CycleOutcome),
}

async fn reconcile_all(
    manifest_path: &Path,
    config_path: Option<&Path>,
    presence: DesiredPresence,
    dry_run: bool,
) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    let registry = connect(config_path)?;
    let mut errors = Vec::new();

    for group in &manifest.rule_groups {
        let label = format!("rule group {}/{}", group.spec.namespace, group.name);
        let result = reconcile(registry.rule_groups(), group, presence, dry_run).await;
        report(&label, result, &mut errors);
    }
    if let Some(alertmanager) = &manifest.alertmanager {
        let result = reconcile(registry.alertmanager(), alertmanager, presence, dry_run).await;
        report("alertmanager", result, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        for error in &errors {
            eprintln!("{}: {}", "error".red().bold(), error);
        }
        Err(CliError::user(format!(
            "{} object(s) failed to reconcile",
            errors.len()
        )))
    }
}

/// One cycle for one object; in dry-run mode only the plan is computed and
/// no mutating endpoint is called
async fn reconcile<C: Controller>(
    controller: &C,
    desired: &C::Desired,
    presence: DesiredPresence,
    dry_run: bool,
) -> cortex_core::Result<SyncAction> {
    if dry_run {
        let observation = controller.observe(desired).await?;
        Ok(SyncAction::Planned(plan(observation, presence)))
    } else {
        let outcome = run_cycle(controller, desired, presence).await?;
        Ok(SyncAction::Done(outcome))
    }
}

fn report(label: &str, result: cortex_core::Result<SyncAction>, errors: &mut Vec<String>) {
    match result {
        Ok(SyncAction::Done(outcome)) => {
            println!("{}: {}", label, describe_outcome(outcome));
        }
        Ok(SyncAction::Planned(action)) => {
            println!("{}: {}", label, describe_plan(action));
        }
        Err(e) => {
            println!("{}: {}", label, "failed".red().bold());
            errors.push(format!("{}: {}", label, e));
        }
    }
}

fn describe_observation(observation: Observation) -> colored::ColoredString {
    if !observation.resource_exists {
        "missing".red()
    } else if !observation.resource_up_to_date {
        "drifted".yellow()
    } else {
        "in sync".green()
    }
}

fn describe_outcome(outcome: CycleOutcome) -> colored::ColoredString {
    match outcome {
        CycleOutcome::Unchanged => "unchanged".green(),
        CycleOutcome::Created => "created".green().bold(),
        CycleOutcome::Updated => "updated".yellow().bold(),
        CycleOutcome::Deleted => "deleted".red().bold(),
    }
}

fn describe_plan(action: Action) -> &'static str {
    match action {
        Action::None => "[dry-run] nothing to do",
        Action::Create => "[dry-run] would create",
        Action::Update => "[dry-run] would update",
        Action::Delete => "[dry-run] would delete",
    }
}
