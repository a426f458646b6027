//! Propagation queue with freeze/unfreeze batching.

use std::fmt::Debug;

use cpforge_core::{CpForgeError, IntVarId, IntervalVarId, Result};
use tracing::{debug, trace};

/// A change to a live variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarEvent {
    IntRange(IntVarId),
    Start(IntervalVarId),
    Duration(IntervalVarId),
    End(IntervalVarId),
    Performed(IntervalVarId),
}

/// Observer of flushed event batches.
///
/// Listeners stand in for the constraint reactions of the propagation
/// engine. A listener may reject a batch, which fails the write (or the
/// unfreeze) that triggered the flush.
pub trait QueueListener: Debug {
    fn on_batch(&mut self, batch: &[VarEvent]) -> Result<()>;
}

/// Pending variable events and the listeners they are delivered to.
///
/// Unfrozen, every event is flushed as soon as it is enqueued. Frozen,
/// events accumulate until the outermost freeze is released and are then
/// flushed as one batch.
#[derive(Debug, Default)]
pub struct PropagationQueue {
    freeze_level: u32,
    pending: Vec<VarEvent>,
    listeners: Vec<Box<dyn QueueListener>>,
    batches_flushed: u64,
}

impl PropagationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Box<dyn QueueListener>) {
        self.listeners.push(listener);
    }

    pub fn enqueue(&mut self, event: VarEvent) -> Result<()> {
        trace!(?event, frozen = self.is_frozen(), "Variable event");
        self.pending.push(event);
        if self.is_frozen() {
            Ok(())
        } else {
            self.flush()
        }
    }

    pub fn freeze(&mut self) {
        self.freeze_level += 1;
    }

    /// Releases one freeze level, flushing pending events at level zero.
    pub fn unfreeze(&mut self) -> Result<()> {
        if self.freeze_level == 0 {
            return Err(CpForgeError::InvalidState(
                "propagation queue unfrozen more often than frozen".to_string(),
            ));
        }
        self.freeze_level -= 1;
        if self.is_frozen() {
            Ok(())
        } else {
            self.flush()
        }
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.freeze_level > 0
    }

    pub fn pending(&self) -> &[VarEvent] {
        &self.pending
    }

    pub fn batches_flushed(&self) -> u64 {
        self.batches_flushed
    }

    fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let batch = std::mem::take(&mut self.pending);
        self.batches_flushed += 1;
        debug!(
            event = "queue_flush",
            batch = self.batches_flushed,
            events = batch.len()
        );
        for listener in &mut self.listeners {
            listener.on_batch(&batch)?;
        }
        Ok(())
    }
}
