//! Minimal engine shell: live variables, the propagation queue and the
//! registry that owns long-lived objects.

mod network;
mod queue;
mod registry;
mod variable;

pub use network::VarNetwork;
pub use queue::{PropagationQueue, QueueListener, VarEvent};
pub use registry::{ObjectRegistry, RegistryId};
pub use variable::{Bounds, IntVar, IntervalVar};
