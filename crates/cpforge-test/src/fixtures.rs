//! Common variable setups.
//!
//! # Example
//!
//! ```
//! use cpforge_core::VariableNetwork;
//! use cpforge_test::fixtures::{task_interval, two_int_vars};
//!
//! let (mut network, x, y) = two_int_vars();
//! assert_eq!(network.int_var_name(x), "x");
//! assert_eq!(network.int_max(y), 10);
//!
//! let task = task_interval(&mut network);
//! assert_eq!(network.performed_min(task), 1);
//! ```

use cpforge_core::{IntVarId, IntervalVarId};

use crate::network::{TestIntervalVar, TestNetwork};

/// Returns a network with `x ∈ [0, 10]` and `y ∈ [0, 10]`.
pub fn two_int_vars() -> (TestNetwork, IntVarId, IntVarId) {
    let mut network = TestNetwork::new();
    let x = network.add_int_var("x", 0, 10);
    let y = network.add_int_var("y", 0, 10);
    (network, x, y)
}

/// Adds a performed interval `task` with start in `[0, 100]` and duration 5.
pub fn task_interval(network: &mut TestNetwork) -> IntervalVarId {
    let mut task = TestIntervalVar::new("task", (0, 100), (5, 5), (5, 105));
    task.performed = (1, 1);
    network.add_interval_var(task)
}

/// Adds an undecided interval named `name` with start in `[0, 50]` and
/// duration in `[1, 10]`.
pub fn optional_interval(network: &mut TestNetwork, name: &str) -> IntervalVarId {
    network.add_interval_var(TestIntervalVar::new(name, (0, 50), (1, 10), (1, 60)))
}
