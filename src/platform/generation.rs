//! Mount generations
//!
//! `mount` awaits GPU setup before it installs anything. Every `unmount`
//! starts a new generation, so a mount that was waiting across one can tell
//! it has been cancelled and back out.

use std::cell::Cell;

/// Generation observed when a mount started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountTicket(u64);

/// Counter bumped by every teardown
#[derive(Debug, Default)]
pub struct MountGeneration {
    current: Cell<u64>,
}

impl MountGeneration {
    pub const fn new() -> Self {
        Self {
            current: Cell::new(0),
        }
    }

    /// Record the generation a mount is starting in
    pub fn ticket(&self) -> MountTicket {
        MountTicket(self.current.get())
    }

    /// Cancel every mount holding an older ticket
    pub fn invalidate(&self) {
        self.current.set(self.current.get().wrapping_add(1));
    }

    /// Whether no teardown happened since `ticket` was taken
    pub fn is_current(&self, ticket: MountTicket) -> bool {
        self.current.get() == ticket.0
    }
}
