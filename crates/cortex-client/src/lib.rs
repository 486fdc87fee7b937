//! Client layer for the rules engine's configuration APIs
//!
//! This crate owns everything about *talking to* the engine:
//!
//! - [`Config`] — connection parameters (TOML file + environment overrides)
//! - [`CortexClient`] — the HTTP implementation over the ruler and
//!   Alertmanager endpoints
//! - [`RuleGroupApi`] / [`AlertmanagerApi`] — the async traits the
//!   convergence engine consumes, so it can be driven against fakes
//!
//! The contract the traits guarantee: a fetch of an absent resource is
//! `Ok(None)`, an upsert is idempotent, and a delete of an absent resource
//! succeeds. Anything else the engine reports is an opaque [`Error`].

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{AlertmanagerApi, RuleGroupApi};
pub use config::Config;
pub use error::{Error, Result};
pub use http::CortexClient;
