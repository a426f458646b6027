//! Decision builders that store or restore a solver-owned assignment.
//!
//! Both builders perform their action when asked for a decision and then
//! report done, so they can be composed into any search as a side step.

use cpforge_core::Result;
use tracing::trace;

use crate::decision::{Decision, DecisionBuilder};
use crate::solver::{AssignmentId, Solver};

/// Captures live state into an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreAssignment {
    assignment: AssignmentId,
}

impl StoreAssignment {
    pub fn new(assignment: AssignmentId) -> Self {
        Self { assignment }
    }
}

impl DecisionBuilder for StoreAssignment {
    fn next(&mut self, solver: &mut Solver) -> Result<Option<Box<dyn Decision>>> {
        trace!(assignment = ?self.assignment, "Storing assignment");
        solver.store_assignment(self.assignment)?;
        Ok(None)
    }
}

/// Reinstates an assignment into live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreAssignment {
    assignment: AssignmentId,
}

impl RestoreAssignment {
    pub fn new(assignment: AssignmentId) -> Self {
        Self { assignment }
    }
}

impl DecisionBuilder for RestoreAssignment {
    fn next(&mut self, solver: &mut Solver) -> Result<Option<Box<dyn Decision>>> {
        trace!(assignment = ?self.assignment, "Restoring assignment");
        solver.restore_assignment(self.assignment)?;
        Ok(None)
    }
}
