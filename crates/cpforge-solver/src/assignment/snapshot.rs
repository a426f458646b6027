//! The assignment: a snapshot of a subset of the variables of a network.

use std::fmt::Write as _;

use cpforge_config::{EnvironmentMode, MissingElementPolicy, SolverConfig};
use cpforge_core::{CpForgeError, IntVarId, IntervalVarId, Result, VariableNetwork};
use tracing::debug;

use super::container::AssignmentContainer;
use super::element::{IntVarElement, IntervalVarElement, VarElement};
use super::guard::QueueFreeze;

/// Point-in-time state of a set of integer and interval variables, with an
/// optional objective.
///
/// An assignment only holds handles; the variables belong to the network it
/// is stored from and restored to.
///
/// # Example
///
/// ```
/// use cpforge_core::VariableNetwork;
/// use cpforge_solver::Assignment;
/// use cpforge_test::fixtures::two_int_vars;
///
/// let (mut network, x, y) = two_int_vars();
/// network.assign(x, 3);
/// network.assign(y, 7);
///
/// let mut snapshot = Assignment::new();
/// snapshot.add_int_vars([x, y]);
/// snapshot.store(&network);
/// assert_eq!(snapshot.value(x).unwrap(), 3);
///
/// network.assign(x, 0);
/// network.assign(y, 0);
/// snapshot.restore(&mut network).unwrap();
/// assert_eq!(network.int_min(x), 3);
/// assert_eq!(network.int_min(y), 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    int_var_container: AssignmentContainer<IntVarElement>,
    interval_var_container: AssignmentContainer<IntervalVarElement>,
    objective_element: Option<IntVarElement>,
    missing_element: MissingElementPolicy,
    environment_mode: EnvironmentMode,
}

impl Assignment {
    /// Creates an empty assignment with the default (strict) lookup policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty assignment configured by `config`.
    pub fn from_config(config: &SolverConfig) -> Self {
        let capacity = config.assignment.initial_capacity.unwrap_or(0);
        Self {
            int_var_container: AssignmentContainer::with_capacity(capacity),
            interval_var_container: AssignmentContainer::with_capacity(capacity),
            objective_element: None,
            missing_element: config.assignment.missing_element,
            environment_mode: config.environment_mode,
        }
    }

    pub fn missing_element_policy(&self) -> MissingElementPolicy {
        self.missing_element
    }

    // ----- Integer variables -----

    /// Tracks `var`, returning its (possibly pre-existing) element.
    pub fn add_int_var(&mut self, var: IntVarId) -> &mut IntVarElement {
        self.int_var_container.add(var)
    }

    /// Tracks every variable of `vars`; duplicates collapse.
    pub fn add_int_vars(&mut self, vars: impl IntoIterator<Item = IntVarId>) {
        self.int_var_container.add_all(vars);
    }

    /// Tracks `var` without checking whether it is already tracked.
    pub fn fast_add_int_var(&mut self, var: IntVarId) -> &mut IntVarElement {
        self.int_var_container.fast_add(var)
    }

    pub fn contains_int_var(&self, var: IntVarId) -> bool {
        self.int_var_container.contains(var)
    }

    pub fn int_var_container(&self) -> &AssignmentContainer<IntVarElement> {
        &self.int_var_container
    }

    pub fn int_element(&self, var: IntVarId) -> Result<&IntVarElement> {
        self.int_var_container.element(var)
    }

    /// Returns the element of `var` for mutation, honoring the missing-element policy.
    pub fn int_element_mut(&mut self, var: IntVarId) -> Result<&mut IntVarElement> {
        match self.missing_element {
            MissingElementPolicy::Fail => self.int_var_container.mutable_element(var),
            MissingElementPolicy::Insert => Ok(self.int_var_container.add(var)),
        }
    }

    pub fn min(&self, var: IntVarId) -> Result<i64> {
        Ok(self.int_element(var)?.min())
    }

    pub fn max(&self, var: IntVarId) -> Result<i64> {
        Ok(self.int_element(var)?.max())
    }

    pub fn value(&self, var: IntVarId) -> Result<i64> {
        self.int_element(var)?.value()
    }

    pub fn bound(&self, var: IntVarId) -> Result<bool> {
        Ok(self.int_element(var)?.bound())
    }

    pub fn set_min(&mut self, var: IntVarId, m: i64) -> Result<()> {
        self.int_element_mut(var)?.set_min(m);
        Ok(())
    }

    pub fn set_max(&mut self, var: IntVarId, m: i64) -> Result<()> {
        self.int_element_mut(var)?.set_max(m);
        Ok(())
    }

    pub fn set_range(&mut self, var: IntVarId, min: i64, max: i64) -> Result<()> {
        self.int_element_mut(var)?.set_range(min, max);
        Ok(())
    }

    pub fn set_value(&mut self, var: IntVarId, value: i64) -> Result<()> {
        self.int_element_mut(var)?.set_value(value);
        Ok(())
    }

    pub fn activate(&mut self, var: IntVarId) -> Result<()> {
        self.int_element_mut(var)?.activate();
        Ok(())
    }

    pub fn deactivate(&mut self, var: IntVarId) -> Result<()> {
        self.int_element_mut(var)?.deactivate();
        Ok(())
    }

    pub fn activated(&self, var: IntVarId) -> Result<bool> {
        Ok(self.int_element(var)?.activated())
    }

    // ----- Interval variables -----

    /// Tracks `var`, returning its (possibly pre-existing) element.
    pub fn add_interval_var(&mut self, var: IntervalVarId) -> &mut IntervalVarElement {
        self.interval_var_container.add(var)
    }

    /// Tracks every variable of `vars`; duplicates collapse.
    pub fn add_interval_vars(&mut self, vars: impl IntoIterator<Item = IntervalVarId>) {
        self.interval_var_container.add_all(vars);
    }

    /// Tracks `var` without checking whether it is already tracked.
    pub fn fast_add_interval_var(&mut self, var: IntervalVarId) -> &mut IntervalVarElement {
        self.interval_var_container.fast_add(var)
    }

    pub fn contains_interval_var(&self, var: IntervalVarId) -> bool {
        self.interval_var_container.contains(var)
    }

    pub fn interval_var_container(&self) -> &AssignmentContainer<IntervalVarElement> {
        &self.interval_var_container
    }

    pub fn interval_element(&self, var: IntervalVarId) -> Result<&IntervalVarElement> {
        self.interval_var_container.element(var)
    }

    /// Returns the element of `var` for mutation, honoring the missing-element policy.
    pub fn interval_element_mut(&mut self, var: IntervalVarId) -> Result<&mut IntervalVarElement> {
        match self.missing_element {
            MissingElementPolicy::Fail => self.interval_var_container.mutable_element(var),
            MissingElementPolicy::Insert => Ok(self.interval_var_container.add(var)),
        }
    }

    pub fn start_min(&self, var: IntervalVarId) -> Result<i64> {
        Ok(self.interval_element(var)?.start_min())
    }

    pub fn start_max(&self, var: IntervalVarId) -> Result<i64> {
        Ok(self.interval_element(var)?.start_max())
    }

    pub fn start_value(&self, var: IntervalVarId) -> Result<i64> {
        self.interval_element(var)?.start_value()
    }

    pub fn duration_min(&self, var: IntervalVarId) -> Result<i64> {
        Ok(self.interval_element(var)?.duration_min())
    }

    pub fn duration_max(&self, var: IntervalVarId) -> Result<i64> {
        Ok(self.interval_element(var)?.duration_max())
    }

    pub fn duration_value(&self, var: IntervalVarId) -> Result<i64> {
        self.interval_element(var)?.duration_value()
    }

    pub fn end_min(&self, var: IntervalVarId) -> Result<i64> {
        Ok(self.interval_element(var)?.end_min())
    }

    pub fn end_max(&self, var: IntervalVarId) -> Result<i64> {
        Ok(self.interval_element(var)?.end_max())
    }

    pub fn end_value(&self, var: IntervalVarId) -> Result<i64> {
        self.interval_element(var)?.end_value()
    }

    pub fn performed_min(&self, var: IntervalVarId) -> Result<i64> {
        Ok(self.interval_element(var)?.performed_min())
    }

    pub fn performed_max(&self, var: IntervalVarId) -> Result<i64> {
        Ok(self.interval_element(var)?.performed_max())
    }

    pub fn performed_value(&self, var: IntervalVarId) -> Result<i64> {
        self.interval_element(var)?.performed_value()
    }

    pub fn set_start_min(&mut self, var: IntervalVarId, m: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_start_min(m);
        Ok(())
    }

    pub fn set_start_max(&mut self, var: IntervalVarId, m: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_start_max(m);
        Ok(())
    }

    pub fn set_start_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_start_range(min, max);
        Ok(())
    }

    pub fn set_start_value(&mut self, var: IntervalVarId, value: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_start_value(value);
        Ok(())
    }

    pub fn set_duration_min(&mut self, var: IntervalVarId, m: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_duration_min(m);
        Ok(())
    }

    pub fn set_duration_max(&mut self, var: IntervalVarId, m: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_duration_max(m);
        Ok(())
    }

    pub fn set_duration_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_duration_range(min, max);
        Ok(())
    }

    pub fn set_duration_value(&mut self, var: IntervalVarId, value: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_duration_value(value);
        Ok(())
    }

    pub fn set_end_min(&mut self, var: IntervalVarId, m: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_end_min(m);
        Ok(())
    }

    pub fn set_end_max(&mut self, var: IntervalVarId, m: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_end_max(m);
        Ok(())
    }

    pub fn set_end_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_end_range(min, max);
        Ok(())
    }

    pub fn set_end_value(&mut self, var: IntervalVarId, value: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_end_value(value);
        Ok(())
    }

    pub fn set_performed_min(&mut self, var: IntervalVarId, m: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_performed_min(m);
        Ok(())
    }

    pub fn set_performed_max(&mut self, var: IntervalVarId, m: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_performed_max(m);
        Ok(())
    }

    pub fn set_performed_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_performed_range(min, max);
        Ok(())
    }

    pub fn set_performed_value(&mut self, var: IntervalVarId, value: i64) -> Result<()> {
        self.interval_element_mut(var)?.set_performed_value(value);
        Ok(())
    }

    pub fn activate_interval(&mut self, var: IntervalVarId) -> Result<()> {
        self.interval_element_mut(var)?.activate();
        Ok(())
    }

    pub fn deactivate_interval(&mut self, var: IntervalVarId) -> Result<()> {
        self.interval_element_mut(var)?.deactivate();
        Ok(())
    }

    pub fn activated_interval(&self, var: IntervalVarId) -> Result<bool> {
        Ok(self.interval_element(var)?.activated())
    }

    // ----- Objective -----

    /// Registers `var` as the objective of this assignment.
    ///
    /// # Errors
    ///
    /// Returns [`CpForgeError::ObjectiveAlreadySet`] if an objective is
    /// already registered; the existing objective is left untouched.
    pub fn add_objective(&mut self, var: IntVarId) -> Result<()> {
        if let Some(existing) = &self.objective_element {
            return Err(CpForgeError::ObjectiveAlreadySet {
                existing: existing.var(),
            });
        }
        self.objective_element = Some(IntVarElement::new(var));
        Ok(())
    }

    pub fn has_objective(&self) -> bool {
        self.objective_element.is_some()
    }

    /// Returns the objective variable, if any.
    pub fn objective(&self) -> Option<IntVarId> {
        self.objective_element.as_ref().map(|e| e.var())
    }

    pub fn objective_element(&self) -> Option<&IntVarElement> {
        self.objective_element.as_ref()
    }

    /// Returns the captured objective lower bound, or 0 without objective.
    pub fn objective_min(&self) -> i64 {
        self.objective_element.as_ref().map_or(0, |e| e.min())
    }

    /// Returns the captured objective upper bound, or 0 without objective.
    pub fn objective_max(&self) -> i64 {
        self.objective_element.as_ref().map_or(0, |e| e.max())
    }

    /// Returns the captured objective value, or 0 without objective.
    ///
    /// # Errors
    ///
    /// Returns [`CpForgeError::NotBound`] if an objective is registered but
    /// its captured range holds more than one value; use
    /// [`objective_min`](Self::objective_min) and
    /// [`objective_max`](Self::objective_max) to read such a range.
    pub fn objective_value(&self) -> Result<i64> {
        self.objective_element.as_ref().map_or(Ok(0), |e| e.value())
    }

    /// Returns whether the objective is bound; true without objective.
    pub fn objective_bound(&self) -> bool {
        self.objective_element.as_ref().map_or(true, |e| e.bound())
    }

    pub fn set_objective_min(&mut self, m: i64) {
        if let Some(e) = &mut self.objective_element {
            e.set_min(m);
        }
    }

    pub fn set_objective_max(&mut self, m: i64) {
        if let Some(e) = &mut self.objective_element {
            e.set_max(m);
        }
    }

    pub fn set_objective_range(&mut self, min: i64, max: i64) {
        if let Some(e) = &mut self.objective_element {
            e.set_range(min, max);
        }
    }

    pub fn set_objective_value(&mut self, value: i64) {
        if let Some(e) = &mut self.objective_element {
            e.set_value(value);
        }
    }

    pub fn activate_objective(&mut self) {
        if let Some(e) = &mut self.objective_element {
            e.activate();
        }
    }

    pub fn deactivate_objective(&mut self) {
        if let Some(e) = &mut self.objective_element {
            e.deactivate();
        }
    }

    /// Returns whether the objective is active; true without objective.
    pub fn activated_objective(&self) -> bool {
        self.objective_element.as_ref().map_or(true, |e| e.activated())
    }

    // ----- Whole-assignment operations -----

    /// Returns the number of tracked elements, objective excluded.
    pub fn size(&self) -> usize {
        self.int_var_container.len() + self.interval_var_container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0 && self.objective_element.is_none()
    }

    /// Captures the live state of every tracked variable and the objective.
    pub fn store<N: VariableNetwork + ?Sized>(&mut self, network: &N) {
        self.int_var_container.store(network);
        self.interval_var_container.store(network);
        if let Some(objective) = &mut self.objective_element {
            objective.store(network);
        }
        debug!(
            event = "assignment_store",
            int_vars = self.int_var_container.len(),
            interval_vars = self.interval_var_container.len(),
            has_objective = self.objective_element.is_some(),
        );
    }

    /// Reinstates every active element onto the network as one batch.
    ///
    /// The propagation queue stays frozen while the elements are written and
    /// is unfrozen on every exit path, so propagation runs once over the
    /// complete state. The objective is not restored.
    ///
    /// Nothing is written if validation fails. `FastAssert` validates the
    /// active elements first; `FullAssert` validates every element and the
    /// objective.
    pub fn restore<N: VariableNetwork + ?Sized>(&self, network: &mut N) -> Result<()> {
        if self.environment_mode.is_fully_asserted() {
            self.validate_all()?;
        } else if self.environment_mode.is_asserted() {
            self.validate()?;
        }
        let mut frozen = QueueFreeze::acquire(network);
        let int_vars = self.int_var_container.restore(&mut *frozen)?;
        let interval_vars = self.interval_var_container.restore(&mut *frozen)?;
        frozen.release()?;
        debug!(event = "assignment_restore", int_vars, interval_vars);
        Ok(())
    }

    /// Checks the invariants of every active element.
    pub fn validate(&self) -> Result<()> {
        self.int_var_container.validate()?;
        self.interval_var_container.validate()
    }

    /// Checks the invariants of every element and of the objective,
    /// regardless of activation.
    pub fn validate_all(&self) -> Result<()> {
        self.int_var_container.validate_all()?;
        self.interval_var_container.validate_all()?;
        match &self.objective_element {
            Some(objective) => objective.validate(),
            None => Ok(()),
        }
    }

    /// Merges `other` into this assignment.
    ///
    /// Elements are copied for variables tracked by both assignments. The
    /// objective range and activation are copied only if both assignments
    /// have an objective; no objective is created or removed.
    pub fn copy_from(&mut self, other: &Assignment) {
        self.int_var_container.copy_from(&other.int_var_container);
        self.interval_var_container
            .copy_from(&other.interval_var_container);
        if let (Some(mine), Some(theirs)) = (&mut self.objective_element, &other.objective_element) {
            mine.set_range(theirs.min(), theirs.max());
            if theirs.activated() {
                mine.activate();
            } else {
                mine.deactivate();
            }
        }
    }

    /// Removes every element and the objective.
    pub fn clear(&mut self) {
        self.int_var_container.clear();
        self.interval_var_container.clear();
        self.objective_element = None;
    }

    /// Renders the assignment with variable names from `network`.
    ///
    /// Format: `Assignment(<name> <element> | ...<objective>)`, integer
    /// variables first, then interval variables, then the objective if it is
    /// active.
    pub fn debug_string<N: VariableNetwork + ?Sized>(&self, network: &N) -> String {
        let mut out = String::from("Assignment(");
        for element in &self.int_var_container {
            let _ = write!(out, "{} {} | ", element.var_name(network), element);
        }
        for element in &self.interval_var_container {
            let _ = write!(out, "{} {} | ", element.var_name(network), element);
        }
        if let Some(objective) = self.objective_element.as_ref().filter(|e| e.activated()) {
            let _ = write!(out, "{objective}");
        }
        out.push(')');
        out
    }

    pub(crate) fn int_var_container_mut(&mut self) -> &mut AssignmentContainer<IntVarElement> {
        &mut self.int_var_container
    }

    pub(crate) fn interval_var_container_mut(
        &mut self,
    ) -> &mut AssignmentContainer<IntervalVarElement> {
        &mut self.interval_var_container
    }

    pub(crate) fn objective_element_mut(&mut self) -> Option<&mut IntVarElement> {
        self.objective_element.as_mut()
    }
}
