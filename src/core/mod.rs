//=========================================================================
// Core Systems
//
// Everything the framework does between two host frames.
//
// Architecture:
// ```text
//   ScreenStack ──► Screen ──► ScreenCore (transition FSM)
//                                 └─► ObjectManager ──► GameObject / Object2D
//                                        ├─ ObjectPool (kind-keyed reuse)
//                                        └─ BoundingBox (broad + SAT)
// ```
//
// Notes:
// All systems are single-threaded and stepped explicitly once per frame.
// Host collaborators (assets, drawing) are reached through the traits in
// `host`.
//
//=========================================================================

pub mod collision;
pub mod host;
pub mod input;
pub mod math;
pub mod object;
pub mod screen;
pub mod time;
