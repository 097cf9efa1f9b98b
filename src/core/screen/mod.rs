//=========================================================================
// Screen System
//=========================================================================
//
// Stacked screens with fade transitions and input focus.
//
// Architecture:
//   ScreenStack
//     ├─ screens: Vec<Box<dyn Screen>>   (bottom → top)
//     ├─ input: InputState               (one snapshot per tick)
//     └─ commands: ScreenCommands        (applied at the tick boundary)
//
// Flow:
//   update() → top-down walk → Screen::update() → ScreenCore FSM
//            → first active screen gets handle_input()
//            → non-popup active screen covers everything below it
//   draw()   → bottom-up walk, hidden screens skipped, footer on top
//
//=========================================================================

//=== Module Declarations =================================================

mod commands;
mod events;
mod screen_core;
mod stack;

//=== Public API ==========================================================

pub use commands::{ScreenCommand, ScreenCommands};
pub use events::ScreenEvent;
pub use screen_core::ScreenCore;
pub use stack::ScreenStack;

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use crate::config::EngineConfig;
use crate::core::host::{ContentLoader, RenderSink};
use crate::core::input::InputState;
use crate::core::object::ObjectKind;
use crate::core::time::FrameTime;
use crate::error::EngineResult;

//=== ScreenState =========================================================

/// Transition state of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenState {
    TransitionOn,
    Active,
    TransitionOff,
    Hidden,
}

//=== ScreenId ============================================================

static NEXT_SCREEN_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one screen instance, stable across re-pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub u64);

impl ScreenId {
    pub fn next() -> Self {
        Self(NEXT_SCREEN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

//=== Frame ===============================================================

/// Per-tick context handed to screens during update.
///
/// Screens never hold a reference to the stack. Stack changes they want
/// (push, exit) are queued here and applied once the walk is over.
pub struct Frame<'a, K: ObjectKind> {
    pub time: FrameTime,
    pub input: &'a InputState,
    pub config: &'a EngineConfig,
    pub content: &'a mut dyn ContentLoader,
    commands: &'a mut ScreenCommands<K>,
}

impl<'a, K: ObjectKind> Frame<'a, K> {
    pub fn new(
        time: FrameTime,
        input: &'a InputState,
        config: &'a EngineConfig,
        content: &'a mut dyn ContentLoader,
        commands: &'a mut ScreenCommands<K>,
    ) -> Self {
        Self {
            time,
            input,
            config,
            content,
            commands,
        }
    }

    /// Pushes `screen` on top of the stack after this tick.
    pub fn push_screen(&mut self, screen: impl Screen<K> + 'static) {
        self.commands.push(ScreenCommand::Push(Box::new(screen)));
    }

    /// Exits `id` after this tick, honouring its off-transition.
    pub fn exit_screen(&mut self, id: ScreenId) {
        self.commands.push(ScreenCommand::Exit(id));
    }

    /// Exits every screen above `id` after this tick.
    pub fn exit_until(&mut self, id: ScreenId) {
        self.commands.push(ScreenCommand::ExitUntil(id));
    }
}

//=== Screen Trait ========================================================

/// One layer of the screen stack.
///
/// Implementors embed a [`ScreenCore`] and expose it through
/// [`core`](Self::core) / [`core_mut`](Self::core_mut). Hooks default to
/// the base behaviour; overrides of `initialize`, `load_content`, `update`
/// and `draw` should call into the core the same way the defaults do.
///
/// # Minimal Implementation
///
/// ```rust
/// # use stratum_engine::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Kind { Ship }
/// # impl ObjectKind for Kind {}
/// struct TitleScreen {
///     core: ScreenCore<Kind>,
/// }
///
/// impl Screen<Kind> for TitleScreen {
///     fn core(&self) -> &ScreenCore<Kind> { &self.core }
///     fn core_mut(&mut self) -> &mut ScreenCore<Kind> { &mut self.core }
///
///     fn handle_input(&mut self, frame: &mut Frame<'_, Kind>) {
///         if frame.input.is_key_pressed(KeyCode::Escape) {
///             frame.exit_screen(self.core.id());
///         }
///     }
/// }
/// ```
pub trait Screen<K: ObjectKind> {
    fn core(&self) -> &ScreenCore<K>;

    fn core_mut(&mut self) -> &mut ScreenCore<K>;

    /// One-time setup when first pushed. Screens that skip the base call
    /// are never updated or drawn.
    fn initialize(&mut self) {
        self.core_mut().initialize();
    }

    /// Loads assets. Called on push once the stack has started.
    fn load_content(&mut self, content: &mut dyn ContentLoader) -> EngineResult<()> {
        let _ = content;
        self.core_mut().mark_content_loaded();
        Ok(())
    }

    /// Called when the screen leaves the stack.
    fn unload_content(&mut self) {}

    /// Called on push and whenever the screen becomes topmost again.
    fn surfaced(&mut self) {}

    /// Called for the first active screen of each tick only.
    fn handle_input(&mut self, frame: &mut Frame<'_, K>) {
        let _ = frame;
    }

    fn update(&mut self, frame: &mut Frame<'_, K>, other_has_focus: bool, covered: bool) -> EngineResult<()> {
        self.core_mut().update(frame, other_has_focus, covered)
    }

    fn draw(&mut self, time: &FrameTime, sink: &mut dyn RenderSink) {
        self.core_mut().draw(time, sink);
    }
}
