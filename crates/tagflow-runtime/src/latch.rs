// crates/tagflow-runtime/src/latch.rs
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchState {
    Idle,
    RemovalAnimating,
}

/// Blocks layout passes while removal fade-outs are in flight.
///
/// Overlapping removals are counted; the latch opens again only when the last
/// of them has finished.
#[derive(Debug, Default)]
pub struct RemovalLatch {
    pending: usize,
}

impl RemovalLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engage(&mut self) {
        self.pending += 1;
        debug!("removal latch engaged ({} pending)", self.pending);
    }

    /// Returns true when this release brought the latch back to idle.
    pub fn release(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        debug!("removal latch released ({} pending)", self.pending);
        self.pending == 0
    }

    pub fn state(&self) -> LatchState {
        if self.pending == 0 {
            LatchState::Idle
        } else {
            LatchState::RemovalAnimating
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.pending > 0
    }

    pub fn pending(&self) -> usize {
        self.pending
    }
}
