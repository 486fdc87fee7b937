//! Convergence engine for Cortex Manager
//!
//! This crate drives declared tenant configuration toward the state a
//! remote rules engine actually holds. Each reconciliation cycle:
//!
//! 1. **Observe** — fetch the remote state; absence is a normal, typed
//!    outcome, not an error
//! 2. **Compare** — decide whether the held state already satisfies the
//!    desired spec ([`compare`])
//! 3. **Act** — at most one idempotent mutation: create, update, or delete
//!
//! # Architecture
//!
//! ```text
//!            scheduler (external)
//!                   |
//!              run_cycle
//!                   |
//!     +-------------+--------------+
//!     |                            |
//! RuleGroupController   AlertmanagerController
//!     |                            |
//!     +---------- Registry --------+
//!                   |
//!            cortex-client (HTTP)
//! ```
//!
//! The engine holds no state across cycles and no shared mutable state
//! across objects; idempotent upserts make a cancelled or repeated cycle
//! safe.

pub mod alertmanager;
pub mod compare;
pub mod controller;
pub mod error;
pub mod registry;
pub mod rulegroup;

pub use alertmanager::AlertmanagerController;
pub use controller::{
    Action, Controller, CycleOutcome, DesiredPresence, Observation, plan, run_cycle,
};
pub use error::{Error, Result};
pub use registry::Registry;
pub use rulegroup::RuleGroupController;
