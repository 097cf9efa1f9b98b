//=========================================================================
// Input
//
// Portable input events and the per-frame snapshot screens query.
//
// Responsibilities:
// - Define host-independent key, button and touch events
// - Fold each frame's events into an `InputState`
//
// Notes:
// The screen stack owns the single `InputState` and advances it once per
// tick before any screen runs, so focus dispatch and screen logic all
// read the same snapshot.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod event;
mod input_state;

//=== Public Exports ======================================================
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton, TouchPhase};
pub use input_state::{InputState, TouchPoint};
