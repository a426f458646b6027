//! The solver's live variable network.

use cpforge_core::{
    CpForgeError, IntVarId, IntervalVarId, Result, VariableKind, VariableNetwork,
};

use super::queue::{PropagationQueue, QueueListener, VarEvent};
use super::variable::{Bounds, IntVar, IntervalVar};

/// Variable arenas plus the propagation queue.
///
/// # Panics
///
/// The read methods of [`VariableNetwork`] index the arenas directly and
/// panic on a handle that was not issued by this network. Callers holding
/// foreign handles check them first with [`check_int_var`] and
/// [`check_interval_var`], as [`Solver::store_assignment`] does.
///
/// [`check_int_var`]: Self::check_int_var
/// [`check_interval_var`]: Self::check_interval_var
/// [`Solver::store_assignment`]: crate::Solver::store_assignment
#[derive(Debug, Default)]
pub struct VarNetwork {
    int_vars: Vec<IntVar>,
    interval_vars: Vec<IntervalVar>,
    queue: PropagationQueue,
}

impl VarNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_int_var(&mut self, var: IntVar) -> IntVarId {
        self.int_vars.push(var);
        IntVarId::new(self.int_vars.len() - 1)
    }

    pub fn add_interval_var(&mut self, var: IntervalVar) -> IntervalVarId {
        self.interval_vars.push(var);
        IntervalVarId::new(self.interval_vars.len() - 1)
    }

    pub fn int_var(&self, var: IntVarId) -> Option<&IntVar> {
        self.int_vars.get(var.index())
    }

    pub fn interval_var(&self, var: IntervalVarId) -> Option<&IntervalVar> {
        self.interval_vars.get(var.index())
    }

    /// Fails with [`CpForgeError::UnknownVariable`] unless `var` was issued
    /// by this network.
    pub fn check_int_var(&self, var: IntVarId) -> Result<()> {
        match self.int_vars.get(var.index()) {
            Some(_) => Ok(()),
            None => Err(CpForgeError::UnknownVariable {
                kind: VariableKind::Int,
                index: var.index(),
            }),
        }
    }

    /// Interval counterpart of [`check_int_var`](Self::check_int_var).
    pub fn check_interval_var(&self, var: IntervalVarId) -> Result<()> {
        match self.interval_vars.get(var.index()) {
            Some(_) => Ok(()),
            None => Err(CpForgeError::UnknownVariable {
                kind: VariableKind::Interval,
                index: var.index(),
            }),
        }
    }

    pub fn int_var_count(&self) -> usize {
        self.int_vars.len()
    }

    pub fn interval_var_count(&self) -> usize {
        self.interval_vars.len()
    }

    pub fn queue(&self) -> &PropagationQueue {
        &self.queue
    }

    pub fn add_queue_listener(&mut self, listener: Box<dyn QueueListener>) {
        self.queue.add_listener(listener);
    }

    fn interval_bounds(
        &mut self,
        var: IntervalVarId,
        select: fn(&mut IntervalVar) -> &mut Bounds,
        field: &str,
        min: i64,
        max: i64,
        event: VarEvent,
    ) -> Result<()> {
        let interval = self
            .interval_vars
            .get_mut(var.index())
            .ok_or(CpForgeError::UnknownVariable {
                kind: VariableKind::Interval,
                index: var.index(),
            })?;
        let outcome = select(interval).set_range(min, max);
        match outcome {
            None => Err(CpForgeError::Infeasible(format!(
                "{field} of interval '{}' cannot be restricted to {min}..{max}",
                interval.name
            ))),
            Some(false) => Ok(()),
            Some(true) => self.queue.enqueue(event),
        }
    }
}

impl VariableNetwork for VarNetwork {
    fn int_var_name(&self, var: IntVarId) -> &str {
        &self.int_vars[var.index()].name
    }

    fn int_min(&self, var: IntVarId) -> i64 {
        self.int_vars[var.index()].min()
    }

    fn int_max(&self, var: IntVarId) -> i64 {
        self.int_vars[var.index()].max()
    }

    fn set_int_range(&mut self, var: IntVarId, min: i64, max: i64) -> Result<()> {
        let int_var = self
            .int_vars
            .get_mut(var.index())
            .ok_or(CpForgeError::UnknownVariable {
                kind: VariableKind::Int,
                index: var.index(),
            })?;
        match int_var.bounds.set_range(min, max) {
            None => Err(CpForgeError::Infeasible(format!(
                "int variable '{}' cannot be restricted to {min}..{max}",
                int_var.name
            ))),
            Some(false) => Ok(()),
            Some(true) => self.queue.enqueue(VarEvent::IntRange(var)),
        }
    }

    fn interval_var_name(&self, var: IntervalVarId) -> &str {
        &self.interval_vars[var.index()].name
    }

    fn start_min(&self, var: IntervalVarId) -> i64 {
        self.interval_vars[var.index()].start.min()
    }

    fn start_max(&self, var: IntervalVarId) -> i64 {
        self.interval_vars[var.index()].start.max()
    }

    fn duration_min(&self, var: IntervalVarId) -> i64 {
        self.interval_vars[var.index()].duration.min()
    }

    fn duration_max(&self, var: IntervalVarId) -> i64 {
        self.interval_vars[var.index()].duration.max()
    }

    fn end_min(&self, var: IntervalVarId) -> i64 {
        self.interval_vars[var.index()].end.min()
    }

    fn end_max(&self, var: IntervalVarId) -> i64 {
        self.interval_vars[var.index()].end.max()
    }

    fn performed_min(&self, var: IntervalVarId) -> i64 {
        self.interval_vars[var.index()].performed.min()
    }

    fn performed_max(&self, var: IntervalVarId) -> i64 {
        self.interval_vars[var.index()].performed.max()
    }

    fn set_start_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()> {
        self.interval_bounds(var, |i| &mut i.start, "start", min, max, VarEvent::Start(var))
    }

    fn set_duration_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()> {
        self.interval_bounds(
            var,
            |i| &mut i.duration,
            "duration",
            min,
            max,
            VarEvent::Duration(var),
        )
    }

    fn set_end_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()> {
        self.interval_bounds(var, |i| &mut i.end, "end", min, max, VarEvent::End(var))
    }

    fn set_performed(&mut self, var: IntervalVarId, performed: bool) -> Result<()> {
        let p = i64::from(performed);
        self.interval_bounds(
            var,
            |i| &mut i.performed,
            "performed status",
            p,
            p,
            VarEvent::Performed(var),
        )
    }

    fn freeze_queue(&mut self) {
        self.queue.freeze();
    }

    fn unfreeze_queue(&mut self) -> Result<()> {
        self.queue.unfreeze()
    }
}
