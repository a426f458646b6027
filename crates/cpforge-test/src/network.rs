//! In-memory variable network for tests.
//!
//! Writes replace the current bounds verbatim. Every write and every
//! freeze/unfreeze is appended to a call log so tests can check ordering.
//!
//! # Example
//!
//! ```
//! use cpforge_core::VariableNetwork;
//! use cpforge_test::network::{NetworkCall, TestNetwork};
//!
//! let mut network = TestNetwork::new();
//! let x = network.add_int_var("x", 0, 10);
//!
//! network.freeze_queue();
//! network.set_int_range(x, 3, 3).unwrap();
//! network.unfreeze_queue().unwrap();
//!
//! assert_eq!(network.int_min(x), 3);
//! assert_eq!(
//!     network.calls(),
//!     &[NetworkCall::Freeze, NetworkCall::SetIntRange(x, 3, 3), NetworkCall::Unfreeze]
//! );
//! ```

use std::collections::HashSet;

use cpforge_core::{CpForgeError, IntVarId, IntervalVarId, Result, VariableNetwork};

/// An integer variable of the test network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestIntVar {
    pub name: String,
    pub min: i64,
    pub max: i64,
}

/// An interval variable of the test network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestIntervalVar {
    pub name: String,
    pub start: (i64, i64),
    pub duration: (i64, i64),
    pub end: (i64, i64),
    pub performed: (i64, i64),
}

impl TestIntervalVar {
    /// Creates an undecided interval with the given ranges.
    pub fn new(
        name: impl Into<String>,
        start: (i64, i64),
        duration: (i64, i64),
        end: (i64, i64),
    ) -> Self {
        Self {
            name: name.into(),
            start,
            duration,
            end,
            performed: (0, 1),
        }
    }
}

/// One recorded interaction with the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkCall {
    Freeze,
    Unfreeze,
    SetIntRange(IntVarId, i64, i64),
    SetPerformed(IntervalVarId, bool),
    SetStartRange(IntervalVarId, i64, i64),
    SetDurationRange(IntervalVarId, i64, i64),
    SetEndRange(IntervalVarId, i64, i64),
}

impl NetworkCall {
    /// Returns true for calls that mutate a variable.
    pub fn is_write(&self) -> bool {
        !matches!(self, NetworkCall::Freeze | NetworkCall::Unfreeze)
    }
}

/// Recording [`VariableNetwork`] with failure injection.
#[derive(Clone, Debug, Default)]
pub struct TestNetwork {
    int_vars: Vec<TestIntVar>,
    interval_vars: Vec<TestIntervalVar>,
    calls: Vec<NetworkCall>,
    freeze_depth: usize,
    unfrozen_writes: usize,
    failing_int_vars: HashSet<IntVarId>,
    failing_interval_vars: HashSet<IntervalVarId>,
}

impl TestNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_int_var(&mut self, name: impl Into<String>, min: i64, max: i64) -> IntVarId {
        self.int_vars.push(TestIntVar {
            name: name.into(),
            min,
            max,
        });
        IntVarId::new(self.int_vars.len() - 1)
    }

    pub fn add_interval_var(&mut self, var: TestIntervalVar) -> IntervalVarId {
        self.interval_vars.push(var);
        IntervalVarId::new(self.interval_vars.len() - 1)
    }

    pub fn int_var(&self, var: IntVarId) -> &TestIntVar {
        &self.int_vars[var.index()]
    }

    pub fn int_var_mut(&mut self, var: IntVarId) -> &mut TestIntVar {
        &mut self.int_vars[var.index()]
    }

    pub fn interval_var(&self, var: IntervalVarId) -> &TestIntervalVar {
        &self.interval_vars[var.index()]
    }

    pub fn interval_var_mut(&mut self, var: IntervalVarId) -> &mut TestIntervalVar {
        &mut self.interval_vars[var.index()]
    }

    /// Sets the live value of an integer variable without recording a call.
    pub fn assign(&mut self, var: IntVarId, value: i64) {
        let v = self.int_var_mut(var);
        v.min = value;
        v.max = value;
    }

    /// Makes every later write to `var` fail.
    pub fn fail_writes_to_int(&mut self, var: IntVarId) {
        self.failing_int_vars.insert(var);
    }

    /// Makes every later write to `var` fail.
    pub fn fail_writes_to_interval(&mut self, var: IntervalVarId) {
        self.failing_interval_vars.insert(var);
    }

    pub fn calls(&self) -> &[NetworkCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
        self.unfrozen_writes = 0;
    }

    /// Returns the number of recorded writes.
    pub fn write_count(&self) -> usize {
        self.calls.iter().filter(|c| c.is_write()).count()
    }

    /// Returns the number of writes made while the queue was not frozen.
    pub fn unfrozen_writes(&self) -> usize {
        self.unfrozen_writes
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze_depth > 0
    }

    fn record(&mut self, call: NetworkCall) {
        if call.is_write() && self.freeze_depth == 0 {
            self.unfrozen_writes += 1;
        }
        self.calls.push(call);
    }

    fn check_interval(&self, var: IntervalVarId) -> Result<()> {
        if self.failing_interval_vars.contains(&var) {
            return Err(CpForgeError::Infeasible(format!(
                "write to interval '{}' rejected",
                self.interval_var(var).name
            )));
        }
        Ok(())
    }
}

impl VariableNetwork for TestNetwork {
    fn int_var_name(&self, var: IntVarId) -> &str {
        &self.int_var(var).name
    }

    fn int_min(&self, var: IntVarId) -> i64 {
        self.int_var(var).min
    }

    fn int_max(&self, var: IntVarId) -> i64 {
        self.int_var(var).max
    }

    fn set_int_range(&mut self, var: IntVarId, min: i64, max: i64) -> Result<()> {
        self.record(NetworkCall::SetIntRange(var, min, max));
        if self.failing_int_vars.contains(&var) {
            return Err(CpForgeError::Infeasible(format!(
                "write to '{}' rejected",
                self.int_var(var).name
            )));
        }
        let v = self.int_var_mut(var);
        v.min = min;
        v.max = max;
        Ok(())
    }

    fn interval_var_name(&self, var: IntervalVarId) -> &str {
        &self.interval_var(var).name
    }

    fn start_min(&self, var: IntervalVarId) -> i64 {
        self.interval_var(var).start.0
    }

    fn start_max(&self, var: IntervalVarId) -> i64 {
        self.interval_var(var).start.1
    }

    fn duration_min(&self, var: IntervalVarId) -> i64 {
        self.interval_var(var).duration.0
    }

    fn duration_max(&self, var: IntervalVarId) -> i64 {
        self.interval_var(var).duration.1
    }

    fn end_min(&self, var: IntervalVarId) -> i64 {
        self.interval_var(var).end.0
    }

    fn end_max(&self, var: IntervalVarId) -> i64 {
        self.interval_var(var).end.1
    }

    fn performed_min(&self, var: IntervalVarId) -> i64 {
        self.interval_var(var).performed.0
    }

    fn performed_max(&self, var: IntervalVarId) -> i64 {
        self.interval_var(var).performed.1
    }

    fn set_start_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()> {
        self.record(NetworkCall::SetStartRange(var, min, max));
        self.check_interval(var)?;
        self.interval_var_mut(var).start = (min, max);
        Ok(())
    }

    fn set_duration_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()> {
        self.record(NetworkCall::SetDurationRange(var, min, max));
        self.check_interval(var)?;
        self.interval_var_mut(var).duration = (min, max);
        Ok(())
    }

    fn set_end_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()> {
        self.record(NetworkCall::SetEndRange(var, min, max));
        self.check_interval(var)?;
        self.interval_var_mut(var).end = (min, max);
        Ok(())
    }

    fn set_performed(&mut self, var: IntervalVarId, performed: bool) -> Result<()> {
        self.record(NetworkCall::SetPerformed(var, performed));
        self.check_interval(var)?;
        let p = i64::from(performed);
        self.interval_var_mut(var).performed = (p, p);
        Ok(())
    }

    fn freeze_queue(&mut self) {
        self.freeze_depth += 1;
        self.record(NetworkCall::Freeze);
    }

    fn unfreeze_queue(&mut self) -> Result<()> {
        if self.freeze_depth == 0 {
            return Err(CpForgeError::InvalidState(
                "unfreeze without matching freeze".to_string(),
            ));
        }
        self.freeze_depth -= 1;
        self.record(NetworkCall::Unfreeze);
        Ok(())
    }
}
