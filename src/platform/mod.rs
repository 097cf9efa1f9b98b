//=========================================================================
// Platform Subsystem
//
// Bridges winit window events to the engine's per-frame input.
//
// Architecture:
// ```text
//  Host event loop (winit)
//   ↓
//  WindowEventMapper
//   ├─ Converts winit keys, buttons, cursor and touch
//   └─ Tracks modifiers (sticky)
//   ↓
//  Vec<InputEvent> collected until the host's frame boundary
//   ↓
//  Engine::tick(elapsed, &events)
// ```
//
// The crate creates no window and runs no event loop. The host owns both
// and forwards each `WindowEvent` to the mapper; `focus_change` reports
// window focus so the host can call `Engine::set_host_active`.
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;

//=== Public API ==========================================================

pub use event_mapper::{focus_change, WindowEventMapper};
