//! The per-kind controller contract and the single-cycle driver
//!
//! A cycle is one Observe followed by at most one mutating action for one
//! managed object. The external scheduler guarantees cycles for the same
//! object never overlap; the driver here guarantees ordering (Observe
//! first, nothing after an Observe error) and the one-mutation bound.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// What one observation of the remote system reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// The remote system holds the resource
    pub resource_exists: bool,

    /// The held resource already satisfies the desired spec
    pub resource_up_to_date: bool,
}

impl Observation {
    /// Observation of a resource the remote system does not hold
    pub fn absent() -> Self {
        Self {
            resource_exists: false,
            resource_up_to_date: false,
        }
    }

    /// Observation of a held resource, current or stale
    pub fn present(up_to_date: bool) -> Self {
        Self {
            resource_exists: true,
            resource_up_to_date: up_to_date,
        }
    }
}

/// Whether the managed object is meant to exist at all this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredPresence {
    /// The object is declared and should exist remotely
    Present,
    /// The object is being removed and should not exist remotely
    Absent,
}

/// The single mutating action a cycle may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Nothing to do
    None,
    /// The resource is absent and wanted
    Create,
    /// The resource exists but is stale
    Update,
    /// The resource exists and is unwanted
    Delete,
}

/// What a completed cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleOutcome {
    /// No mutation was needed
    Unchanged,
    /// The resource was created
    Created,
    /// The resource was replaced with the desired state
    Updated,
    /// The resource was removed
    Deleted,
}

/// The contract every resource-kind controller implements.
///
/// One controller instance exists per resource kind, selected when the
/// [`Registry`](crate::Registry) is built. The desired-state type is fixed
/// by the implementation, so handing a controller an object of the wrong
/// kind cannot compile — there is no per-call kind check.
#[async_trait]
pub trait Controller: Send + Sync {
    /// The desired-state type this controller reconciles
    type Desired: Send + Sync;

    /// Fetch the remote state and classify it against the desired spec
    async fn observe(&self, desired: &Self::Desired) -> Result<Observation>;

    /// Bring an absent resource into existence
    async fn create(&self, desired: &Self::Desired) -> Result<()>;

    /// Replace a stale resource with the desired state
    async fn update(&self, desired: &Self::Desired) -> Result<()>;

    /// Remove the resource
    async fn delete(&self, desired: &Self::Desired) -> Result<()>;
}

/// Decide the one action a cycle may take from what was observed
pub fn plan(observation: Observation, presence: DesiredPresence) -> Action {
    match presence {
        DesiredPresence::Absent => {
            if observation.resource_exists {
                Action::Delete
            } else {
                Action::None
            }
        }
        DesiredPresence::Present => {
            if !observation.resource_exists {
                Action::Create
            } else if !observation.resource_up_to_date {
                Action::Update
            } else {
                Action::None
            }
        }
    }
}

/// Run one reconciliation cycle: Observe, then at most one mutation.
///
/// An observation error fails the cycle before any mutation is attempted;
/// the external scheduler retries on its next tick. Because every mutation
/// is an idempotent upsert or delete, a cycle cancelled mid-call is safe
/// to rerun.
pub async fn run_cycle<C: Controller>(
    controller: &C,
    desired: &C::Desired,
    presence: DesiredPresence,
) -> Result<CycleOutcome> {
    let observation = controller.observe(desired).await?;
    match plan(observation, presence) {
        Action::None => Ok(CycleOutcome::Unchanged),
        Action::Create => {
            controller.create(desired).await?;
            Ok(CycleOutcome::Created)
        }
        Action::Update => {
            controller.update(desired).await?;
            Ok(CycleOutcome::Updated)
        }
        Action::Delete => {
            controller.delete(desired).await?;
            Ok(CycleOutcome::Deleted)
        }
    }
}
