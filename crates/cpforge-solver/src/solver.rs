//! The solver: owner of the live variables and of engine-managed objects.

use std::path::Path;

use cpforge_config::SolverConfig;
use cpforge_core::{CpForgeError, IntVarId, IntervalVarId, Result};
use tracing::{debug, info, trace};

use crate::assignment::{Assignment, RestoreAssignment, StoreAssignment, VarElement};
use crate::decision::DecisionBuilder;
use crate::engine::{IntVar, IntervalVar, ObjectRegistry, QueueListener, RegistryId, VarNetwork};

/// Handle to an assignment owned by a [`Solver`].
pub type AssignmentId = RegistryId<Assignment>;

/// Handle to a decision builder owned by a [`Solver`].
pub type BuilderId = RegistryId<Box<dyn DecisionBuilder>>;

/// Owns the variable network, the assignments and the decision builders
/// created through it.
///
/// # Example
///
/// ```
/// use cpforge_solver::{AssignValues, Compose, Solver, StoreAssignment};
///
/// let mut solver = Solver::new("example");
/// let x = solver.make_int_var(0, 10, "x");
/// let snapshot = solver.make_assignment();
/// solver.assignment_mut(snapshot).unwrap().add_int_var(x);
///
/// let mut builder = Compose::new(vec![
///     Box::new(AssignValues::new(vec![(x, 4)])),
///     Box::new(StoreAssignment::new(snapshot)),
/// ]);
/// solver.run(&mut builder).unwrap();
///
/// assert_eq!(solver.assignment(snapshot).unwrap().value(x).unwrap(), 4);
/// ```
#[derive(Debug)]
pub struct Solver {
    name: String,
    config: SolverConfig,
    network: VarNetwork,
    assignments: ObjectRegistry<Assignment>,
    builders: ObjectRegistry<Box<dyn DecisionBuilder>>,
    decisions_applied: u64,
}

impl Solver {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, SolverConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: SolverConfig) -> Self {
        Self {
            name: name.into(),
            config,
            network: VarNetwork::new(),
            assignments: ObjectRegistry::new(),
            builders: ObjectRegistry::new(),
            decisions_applied: 0,
        }
    }

    /// Creates a solver configured from a TOML or YAML file.
    ///
    /// Files ending in `.yaml` or `.yml` are read as YAML, anything else as
    /// TOML.
    pub fn from_config_file(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => SolverConfig::from_yaml_file(path),
            _ => SolverConfig::from_toml_file(path),
        }
        .map_err(|e| CpForgeError::Config(format!("{}: {e}", path.display())))?;
        Ok(Self::with_config(name, config))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn network(&self) -> &VarNetwork {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut VarNetwork {
        &mut self.network
    }

    /// Total number of decisions applied by [`run`](Self::run).
    pub fn decisions_applied(&self) -> u64 {
        self.decisions_applied
    }

    // ----- Variables -----

    pub fn make_int_var(&mut self, min: i64, max: i64, name: impl Into<String>) -> IntVarId {
        self.network.add_int_var(IntVar::new(name, min, max))
    }

    /// Creates an interval variable from explicit start, duration and end ranges.
    pub fn make_interval_var(
        &mut self,
        start: (i64, i64),
        duration: (i64, i64),
        end: (i64, i64),
        optional: bool,
        name: impl Into<String>,
    ) -> IntervalVarId {
        self.network
            .add_interval_var(IntervalVar::new(name, start, duration, end, optional))
    }

    /// Creates an interval variable of fixed duration.
    pub fn make_fixed_duration_interval_var(
        &mut self,
        start_min: i64,
        start_max: i64,
        duration: i64,
        optional: bool,
        name: impl Into<String>,
    ) -> IntervalVarId {
        self.make_interval_var(
            (start_min, start_max),
            (duration, duration),
            (start_min.saturating_add(duration), start_max.saturating_add(duration)),
            optional,
            name,
        )
    }

    pub fn add_queue_listener(&mut self, listener: Box<dyn QueueListener>) {
        self.network.add_queue_listener(listener);
    }

    // ----- Assignments -----

    /// Creates an empty assignment owned by this solver.
    pub fn make_assignment(&mut self) -> AssignmentId {
        self.assignments
            .register(Assignment::from_config(&self.config))
    }

    /// Creates an independent copy of an existing assignment.
    pub fn make_assignment_copy(&mut self, source: AssignmentId) -> Result<AssignmentId> {
        let copy = self.assignment(source)?.clone();
        Ok(self.assignments.register(copy))
    }

    pub fn assignment(&self, id: AssignmentId) -> Result<&Assignment> {
        self.assignments.get(id).ok_or_else(|| unknown_object("assignment", id.index()))
    }

    pub fn assignment_mut(&mut self, id: AssignmentId) -> Result<&mut Assignment> {
        self.assignments
            .get_mut(id)
            .ok_or_else(|| unknown_object("assignment", id.index()))
    }

    /// Captures live state into an owned assignment.
    ///
    /// Every handle is checked against the network before anything is read,
    /// so a handle from another solver fails with
    /// [`CpForgeError::UnknownVariable`] and leaves the assignment unchanged.
    pub fn store_assignment(&mut self, id: AssignmentId) -> Result<()> {
        let assignment = self
            .assignments
            .get_mut(id)
            .ok_or_else(|| unknown_object("assignment", id.index()))?;
        check_handles(&self.network, assignment)?;
        assignment.store(&self.network);
        Ok(())
    }

    /// Reinstates an owned assignment into live state.
    pub fn restore_assignment(&mut self, id: AssignmentId) -> Result<()> {
        let assignment = self
            .assignments
            .get(id)
            .ok_or_else(|| unknown_object("assignment", id.index()))?;
        assignment.restore(&mut self.network)
    }

    // ----- Decision builders -----

    pub fn register_builder(&mut self, builder: Box<dyn DecisionBuilder>) -> BuilderId {
        self.builders.register(builder)
    }

    /// Returns a builder that stores `assignment` and then reports done.
    pub fn make_store_assignment(&mut self, assignment: AssignmentId) -> BuilderId {
        self.register_builder(Box::new(StoreAssignment::new(assignment)))
    }

    /// Returns a builder that restores `assignment` and then reports done.
    pub fn make_restore_assignment(&mut self, assignment: AssignmentId) -> BuilderId {
        self.register_builder(Box::new(RestoreAssignment::new(assignment)))
    }

    /// Runs a registered builder until it reports done.
    pub fn solve(&mut self, id: BuilderId) -> Result<u64> {
        let mut builder = self
            .builders
            .take(id)
            .ok_or_else(|| unknown_object("decision builder", id.index()))?;
        info!(event = "solve_start", solver = %self.name, builder = ?builder);
        let result = self.run(builder.as_mut());
        self.builders.put_back(id, builder);
        result
    }

    /// Asks `builder` for decisions and applies them until it reports done.
    ///
    /// Returns the number of decisions applied. There is no refutation: a
    /// failing decision ends the run with its error.
    pub fn run(&mut self, builder: &mut dyn DecisionBuilder) -> Result<u64> {
        let mut applied = 0;
        while let Some(decision) = builder.next(self)? {
            trace!(?decision, "Applying decision");
            decision.apply(self)?;
            applied += 1;
            self.decisions_applied += 1;
        }
        debug!(event = "run_end", solver = %self.name, decisions = applied);
        Ok(applied)
    }
}

fn check_handles(network: &VarNetwork, assignment: &Assignment) -> Result<()> {
    for element in assignment.int_var_container() {
        network.check_int_var(element.var())?;
    }
    for element in assignment.interval_var_container() {
        network.check_interval_var(element.var())?;
    }
    if let Some(objective) = assignment.objective() {
        network.check_int_var(objective)?;
    }
    Ok(())
}

fn unknown_object(what: &str, index: usize) -> CpForgeError {
    CpForgeError::InvalidState(format!("no {what} #{index} registered with this solver"))
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
