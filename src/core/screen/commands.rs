//=========================================================================
// Screen Commands
//=========================================================================
//
// Queue of stack changes requested by screens during a tick.
//
// Screens queue commands through `Frame` while the stack is being walked.
// The stack applies them in FIFO order once the walk is over.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Screen, ScreenId};
use crate::core::object::ObjectKind;

//=== ScreenCommand =======================================================

/// A deferred stack operation.
pub enum ScreenCommand<K: ObjectKind> {
    /// Adds a screen on top of the stack.
    Push(Box<dyn Screen<K>>),

    /// Exits a screen, running its off-transition first if it has one.
    Exit(ScreenId),

    /// Exits every screen above the given one.
    ExitUntil(ScreenId),
}

//=== ScreenCommands ======================================================

pub struct ScreenCommands<K: ObjectKind> {
    queue: Vec<ScreenCommand<K>>,
}

impl<K: ObjectKind> ScreenCommands<K> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a command for the next tick boundary.
    pub fn push(&mut self, command: ScreenCommand<K>) {
        self.queue.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all queued commands, leaving the queue empty.
    pub fn take(&mut self) -> Vec<ScreenCommand<K>> {
        std::mem::take(&mut self.queue)
    }
}

impl<K: ObjectKind> Default for ScreenCommands<K> {
    fn default() -> Self {
        Self::new()
    }
}
