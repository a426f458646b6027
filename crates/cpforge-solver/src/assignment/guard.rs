//! Scoped propagation-queue freeze.

use std::ops::{Deref, DerefMut};

use cpforge_core::{Result, VariableNetwork};
use tracing::warn;

/// Holds the propagation queue of a network frozen.
///
/// The queue is frozen when the guard is acquired and unfrozen exactly once:
/// either by [`release`](Self::release), which reports the outcome of the
/// deferred propagation, or on drop if the guard goes out of scope early.
pub struct QueueFreeze<'a, N: VariableNetwork + ?Sized> {
    network: &'a mut N,
    released: bool,
}

impl<'a, N: VariableNetwork + ?Sized> QueueFreeze<'a, N> {
    pub fn acquire(network: &'a mut N) -> Self {
        network.freeze_queue();
        Self {
            network,
            released: false,
        }
    }

    /// Unfreezes the queue and returns the result of the deferred batch.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.network.unfreeze_queue()
    }
}

impl<N: VariableNetwork + ?Sized> Deref for QueueFreeze<'_, N> {
    type Target = N;

    fn deref(&self) -> &N {
        self.network
    }
}

impl<N: VariableNetwork + ?Sized> DerefMut for QueueFreeze<'_, N> {
    fn deref_mut(&mut self) -> &mut N {
        self.network
    }
}

impl<N: VariableNetwork + ?Sized> Drop for QueueFreeze<'_, N> {
    fn drop(&mut self) {
        if !self.released {
            if let Err(err) = self.network.unfreeze_queue() {
                warn!(error = %err, "Propagation failed while unfreezing after an aborted restore");
            }
        }
    }
}
