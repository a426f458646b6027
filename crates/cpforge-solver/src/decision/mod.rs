//! Decision protocol.
//!
//! At every search node the solver asks a [`DecisionBuilder`] for the next
//! [`Decision`]. The builder either returns one, which the solver applies, or
//! returns `None` to signal that it has nothing more to decide.

use std::fmt::Debug;

use cpforge_core::{IntVarId, Result, VariableNetwork};

use crate::solver::Solver;

/// A single branching step.
pub trait Decision: Debug {
    /// Applies the decision to the solver's live state.
    fn apply(&self, solver: &mut Solver) -> Result<()>;
}

/// Produces decisions one search node at a time.
pub trait DecisionBuilder: Debug {
    /// Returns the next decision, or `None` when this builder is done.
    fn next(&mut self, solver: &mut Solver) -> Result<Option<Box<dyn Decision>>>;
}

/// Fixes an integer variable to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignValue {
    var: IntVarId,
    value: i64,
}

impl AssignValue {
    pub fn new(var: IntVarId, value: i64) -> Self {
        Self { var, value }
    }
}

impl Decision for AssignValue {
    fn apply(&self, solver: &mut Solver) -> Result<()> {
        solver
            .network_mut()
            .set_int_range(self.var, self.value, self.value)
    }
}

/// Emits one [`AssignValue`] per entry, in order.
#[derive(Debug, Clone, Default)]
pub struct AssignValues {
    assignments: Vec<(IntVarId, i64)>,
    position: usize,
}

impl AssignValues {
    pub fn new(assignments: Vec<(IntVarId, i64)>) -> Self {
        Self {
            assignments,
            position: 0,
        }
    }
}

impl DecisionBuilder for AssignValues {
    fn next(&mut self, _solver: &mut Solver) -> Result<Option<Box<dyn Decision>>> {
        let Some(&(var, value)) = self.assignments.get(self.position) else {
            return Ok(None);
        };
        self.position += 1;
        Ok(Some(Box::new(AssignValue::new(var, value))))
    }
}

/// Runs builders one after another; done when the last one is done.
#[derive(Debug, Default)]
pub struct Compose {
    builders: Vec<Box<dyn DecisionBuilder>>,
    current: usize,
}

impl Compose {
    pub fn new(builders: Vec<Box<dyn DecisionBuilder>>) -> Self {
        Self {
            builders,
            current: 0,
        }
    }
}

impl DecisionBuilder for Compose {
    fn next(&mut self, solver: &mut Solver) -> Result<Option<Box<dyn Decision>>> {
        while let Some(builder) = self.builders.get_mut(self.current) {
            if let Some(decision) = builder.next(solver)? {
                return Ok(Some(decision));
            }
            self.current += 1;
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests;
