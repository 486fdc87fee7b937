//! Rule and Alertmanager configuration model for Cortex Manager
//!
//! This crate owns the shapes on both sides of the reconciler's translation
//! boundary:
//!
//! - **Desired state**: what the operator declared ([`RuleGroupSpec`],
//!   [`RuleSpec`], [`AlertmanagerSpec`])
//! - **Native state**: the engine's own wire format ([`native::RuleGroup`],
//!   [`native::Rule`], [`native::AlertmanagerConfig`])
//! - **Translation** between the two, including the text-fragment parsing
//!   rules: YAML scalar normalization ([`scalar`]) and the engine's
//!   duration grammar ([`PromDuration`])
//!
//! Translation enforces the model invariants — record/alert mutual
//! exclusivity, duration syntax, scalar-only name and expression fields —
//! and reports violations as [`Error`]s rather than defaulting them away.

pub mod duration;
pub mod error;
pub mod native;
pub mod scalar;
pub mod spec;
pub mod translate;

pub use duration::PromDuration;
pub use error::{Error, Result};
pub use spec::{AlertmanagerSpec, RuleGroupResource, RuleGroupSpec, RuleSpec};
