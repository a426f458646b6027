//! Assignments: snapshots of variable state that can be stored from and
//! restored to a [`VariableNetwork`](cpforge_core::VariableNetwork).
//!
//! - [`VarElement`] - Captured state of one variable
//! - [`AssignmentContainer`] - Ordered, indexed collection of elements
//! - [`Assignment`] - Integer and interval containers plus an objective
//! - [`AssignmentRecord`] - Name-keyed serialized form
//! - [`StoreAssignment`] / [`RestoreAssignment`] - Decision-builder adapters

mod builders;
mod container;
mod element;
mod guard;
mod record;
mod snapshot;

pub use builders::{RestoreAssignment, StoreAssignment};
pub use container::AssignmentContainer;
pub use element::{IntVarElement, IntervalVarElement, VarElement};
pub use guard::QueueFreeze;
pub use record::{AssignmentRecord, IntVarRecord, IntervalVarRecord};
pub use snapshot::Assignment;

#[cfg(test)]
mod tests;
