//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use stratum_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::config::EngineConfig;
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::error::{EngineError, EngineResult};

// Host interfaces and math
pub use crate::core::host::{Color, ContentLoader, RenderSink, Sprite, Texture};
pub use crate::core::math::{vec2, Rect, Vec2};
pub use crate::core::time::FrameTime;

// Input
pub use crate::core::input::{InputEvent, InputState, KeyCode, Modifiers, MouseButton, TouchPhase};

// Objects and collision
pub use crate::core::collision::{CollisionCategory, CollisionMode};
pub use crate::core::object::{
    load_base, GameObject, Object2D, ObjectId, ObjectKind, ObjectManager, Path, State, StateFlow, StateId,
    StateMachine,
};

// Screens
pub use crate::core::screen::{Frame, Screen, ScreenCore, ScreenEvent, ScreenId, ScreenStack, ScreenState};
