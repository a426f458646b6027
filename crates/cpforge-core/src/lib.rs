//! CpForge Core - Core types and traits for constraint solving
//!
//! This crate provides the fundamental abstractions shared by the CpForge crates:
//! - Opaque variable handles into the engine-owned variable arenas
//! - The [`VariableNetwork`] trait through which live variable state is read and written
//! - The error type used across the workspace

pub mod error;
pub mod network;
pub mod var;

pub use error::{CpForgeError, Result};
pub use network::VariableNetwork;
pub use var::{IntVarId, IntervalVarId, VariableKind};
