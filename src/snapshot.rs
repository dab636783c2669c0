//! Latest-value publication of the controller state for other tasks.
//!
//! The poll loop is the only writer. Readers (a status logger, a display task)
//! get a copy of the most recent [`Snapshot`] and never touch the controller.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::controller::ButtonState;
use crate::tick::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub state: ButtonState,
    pub output: bool,
    pub tick: Tick,
}

/// Overwriting single-slot mailbox; a newer snapshot replaces an unread one.
pub struct SnapshotSignal {
    inner: Signal<CriticalSectionRawMutex, Snapshot>,
}

impl SnapshotSignal {
    pub const fn new() -> Self {
        Self {
            inner: Signal::new(),
        }
    }

    pub fn publish(&self, snapshot: Snapshot) {
        self.inner.signal(snapshot);
    }

    /// Waits for the next published snapshot and consumes it.
    pub async fn wait(&self) -> Snapshot {
        self.inner.wait().await
    }

    pub fn try_take(&self) -> Option<Snapshot> {
        self.inner.try_take()
    }

    /// `true` if a snapshot is waiting to be read.
    pub fn pending(&self) -> bool {
        self.inner.signaled()
    }
}

impl Default for SnapshotSignal {
    fn default() -> Self {
        Self::new()
    }
}
