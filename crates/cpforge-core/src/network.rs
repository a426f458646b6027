//! The live variable network as seen by snapshot code.
//!
//! The propagation engine owns the variables and their domains. Code that
//! captures or reinstates variable state only needs this narrow view: read the
//! current bounds, write new bounds, and batch the resulting propagation.

use crate::error::Result;
use crate::var::{IntVarId, IntervalVarId};

/// Read/write access to live variable state plus the propagation-queue
/// batching primitive.
///
/// Reads take `&self` and never fail: a handle issued by the network is valid
/// for the network's whole lifetime. Writes may fail when they leave a
/// variable without any value.
///
/// # Queue freezing
///
/// While the queue is frozen, writes are recorded but not propagated.
/// [`unfreeze_queue`](Self::unfreeze_queue) releases one level of freezing;
/// when the last level is released all recorded events are propagated as a
/// single batch, and a failure of that batch is returned.
pub trait VariableNetwork {
    /// Returns the name of an integer variable (possibly empty).
    fn int_var_name(&self, var: IntVarId) -> &str;

    /// Returns the current lower bound of an integer variable.
    fn int_min(&self, var: IntVarId) -> i64;

    /// Returns the current upper bound of an integer variable.
    fn int_max(&self, var: IntVarId) -> i64;

    /// Restricts an integer variable to `[min, max]`.
    fn set_int_range(&mut self, var: IntVarId, min: i64, max: i64) -> Result<()>;

    /// Returns the name of an interval variable (possibly empty).
    fn interval_var_name(&self, var: IntervalVarId) -> &str;

    fn start_min(&self, var: IntervalVarId) -> i64;
    fn start_max(&self, var: IntervalVarId) -> i64;
    fn duration_min(&self, var: IntervalVarId) -> i64;
    fn duration_max(&self, var: IntervalVarId) -> i64;
    fn end_min(&self, var: IntervalVarId) -> i64;
    fn end_max(&self, var: IntervalVarId) -> i64;

    /// Returns 1 if the interval must be performed, 0 otherwise.
    fn performed_min(&self, var: IntervalVarId) -> i64;

    /// Returns 0 if the interval cannot be performed, 1 otherwise.
    fn performed_max(&self, var: IntervalVarId) -> i64;

    fn set_start_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()>;
    fn set_duration_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()>;
    fn set_end_range(&mut self, var: IntervalVarId, min: i64, max: i64) -> Result<()>;

    /// Forces the interval to be performed (`true`) or absent (`false`).
    fn set_performed(&mut self, var: IntervalVarId, performed: bool) -> Result<()>;

    /// Suspends processing of the propagation queue.
    fn freeze_queue(&mut self);

    /// Resumes processing of the propagation queue.
    fn unfreeze_queue(&mut self) -> Result<()>;
}
