//! CpForge Solver
//!
//! This crate provides the assignment subsystem and the engine shell it runs in:
//! - Variable elements, element containers and assignments
//! - Batched restore under a frozen propagation queue
//! - Name-keyed assignment records (YAML and TOML)
//! - Solver with object registry and decision protocol
//! - Store/restore decision-builder adapters

pub mod assignment;
pub mod decision;
pub mod engine;
pub mod solver;

pub use assignment::{
    Assignment, AssignmentContainer, AssignmentRecord, IntVarElement, IntVarRecord,
    IntervalVarElement, IntervalVarRecord, QueueFreeze, RestoreAssignment, StoreAssignment,
    VarElement,
};
pub use decision::{AssignValue, AssignValues, Compose, Decision, DecisionBuilder};
pub use engine::{
    Bounds, IntVar, IntervalVar, ObjectRegistry, PropagationQueue, QueueListener, RegistryId,
    VarEvent, VarNetwork,
};
pub use solver::{AssignmentId, BuilderId, Solver};
