//! CpForge - Assignment snapshots for a constraint-programming solver
//!
//! Capture the state of a set of variables, reinstate it later as one
//! propagation batch, and persist it by variable name.
//!
//! # Example
//!
//! ```rust
//! use cpforge::prelude::*;
//!
//! let mut solver = Solver::new("quickstart");
//! let x = solver.make_int_var(0, 10, "x");
//! let y = solver.make_int_var(0, 10, "y");
//!
//! let best = solver.make_assignment();
//! solver.assignment_mut(best).unwrap().add_int_vars([x, y]);
//!
//! let mut search = Compose::new(vec![
//!     Box::new(AssignValues::new(vec![(x, 3), (y, 7)])),
//!     Box::new(StoreAssignment::new(best)),
//! ]);
//! solver.run(&mut search).unwrap();
//!
//! let snapshot = solver.assignment(best).unwrap();
//! assert_eq!(snapshot.value(x).unwrap(), 3);
//! assert_eq!(snapshot.value(y).unwrap(), 7);
//! ```

pub use cpforge_config::{
    AssignmentConfig, ConfigError, EnvironmentMode, MissingElementPolicy, SolverConfig,
};
pub use cpforge_core::{CpForgeError, IntVarId, IntervalVarId, Result, VariableKind, VariableNetwork};
pub use cpforge_solver::{
    AssignValue, AssignValues, Assignment, AssignmentContainer, AssignmentId, AssignmentRecord,
    BuilderId, Compose, Decision, DecisionBuilder, IntVarElement, IntVarRecord,
    IntervalVarElement, IntervalVarRecord, QueueListener, RestoreAssignment, Solver,
    StoreAssignment, VarElement, VarEvent, VarNetwork,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        AssignValues, Assignment, AssignmentRecord, Compose, CpForgeError, DecisionBuilder,
        IntVarId, IntervalVarId, RestoreAssignment, Solver, SolverConfig, StoreAssignment,
        VariableNetwork,
    };
}
