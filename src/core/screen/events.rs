//=========================================================================
// Screen Events
//=========================================================================
//
// Notifications the stack publishes about screen lifecycle changes.
//
// Owners subscribe once via `ScreenStack::subscribe()` and drain their
// receiver each frame. Events are sent after the change has happened.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::ScreenId;

//=== ScreenEvent =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenEvent {
    /// The screen was added on top of the stack.
    Pushed(ScreenId),

    /// The screen is topmost again after the one above it left.
    Surfaced(ScreenId),

    /// The screen finished exiting (off-transition done or instant exit).
    Exited(ScreenId),

    /// The screen left the stack for any reason.
    Removed(ScreenId),
}
