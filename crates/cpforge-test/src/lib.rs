//! Shared test fixtures for CpForge crates.
//!
//! This crate provides an in-memory [`VariableNetwork`] and ready-made
//! variable setups. It depends only on `cpforge-core` so that the solver
//! crate can use it from its own unit tests.
//!
//! - [`network`] - Recording network with failure injection
//! - [`fixtures`] - Common variable setups
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! cpforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use cpforge_test::fixtures::two_int_vars;
//! use cpforge_test::network::{NetworkCall, TestNetwork};
//! ```
//!
//! [`VariableNetwork`]: cpforge_core::VariableNetwork

pub mod fixtures;
pub mod network;

pub use fixtures::{optional_interval, task_interval, two_int_vars};
pub use network::{NetworkCall, TestIntVar, TestIntervalVar, TestNetwork};
