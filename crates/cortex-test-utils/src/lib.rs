//! Shared test utilities for the cortex-manager workspace.
//!
//! This crate provides [`FakeCortex`], an in-memory stand-in for the rules
//! engine used by the core crate's controller tests and the workspace
//! integration suite. It is a dev-dependency only — never published.

pub mod fake;

pub use fake::{CallLog, FakeCortex};
