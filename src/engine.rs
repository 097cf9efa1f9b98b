//=========================================================================
// Stratum Engine
//
// Main entry point and coordinator for the framework.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──tick()/draw()──>  [Host loop]
//         │                          │
//         ├─ with_background_color() ├─ ScreenStack (screens, input, config)
//         ├─ with_footer_text()      └─ ContentLoader (host assets)
//         └─ with_object_capacity()
// ```
//
// The engine never owns a window or a loop. The host calls `tick` with the
// elapsed time and the input events of the frame, then `draw` with its
// render sink.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;
use std::time::Duration;

use crossbeam_channel::Receiver;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::config::EngineConfig;
use crate::core::host::{Color, ContentLoader, RenderSink};
use crate::core::input::InputEvent;
use crate::core::object::ObjectKind;
use crate::core::screen::{Screen, ScreenEvent, ScreenId, ScreenStack};
use crate::error::EngineResult;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// See [`EngineConfig`].
///
/// # Examples
///
/// ```no_run
/// # use stratum_engine::prelude::*;
/// # use std::time::Duration;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Kind { Ship }
/// # impl ObjectKind for Kind {}
/// # struct Assets;
/// # impl ContentLoader for Assets {
/// #     fn load_texture(&mut self, name: &str) -> EngineResult<Texture> {
/// #         Err(EngineError::AssetNotFound { name: name.to_string() })
/// #     }
/// # }
/// let engine = EngineBuilder::<Kind>::new()
///     .with_footer_text("Trial version")
///     .with_transitions(Duration::from_millis(250), Duration::from_millis(250))
///     .build(Assets)
///     .unwrap();
/// ```
pub struct EngineBuilder<K: ObjectKind> {
    config: EngineConfig,
    _phantom: PhantomData<K>,
}

impl<K: ObjectKind> EngineBuilder<K> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            _phantom: PhantomData,
        }
    }

    /// Color the frame is cleared to before screens draw.
    ///
    /// Default: black
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self
    }

    /// Text drawn at the bottom-left of every frame.
    ///
    /// Default: empty (nothing drawn)
    pub fn with_footer_text(mut self, text: impl Into<String>) -> Self {
        self.config.footer_text = text.into();
        self
    }

    /// Outlines every collision box.
    ///
    /// Default: false
    pub fn with_bounding_boxes(mut self, enabled: bool) -> Self {
        self.config.draw_bounding_boxes = enabled;
        self
    }

    /// Transition durations for screens built with `ScreenCore::from_config`.
    ///
    /// Default: zero (instant)
    pub fn with_transitions(mut self, on: Duration, off: Duration) -> Self {
        self.config.default_transition_on = on;
        self.config.default_transition_off = off;
        self
    }

    /// Initial capacity of each screen's live object list.
    ///
    /// Default: 500
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_object_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Object capacity must be positive");
        self.config.object_capacity = capacity;
        self
    }

    /// Builds the engine around the host's content loader.
    pub fn build(self, content: impl ContentLoader + 'static) -> EngineResult<Engine<K>> {
        Engine::new(self.config, Box::new(content))
    }
}

impl<K: ObjectKind> Default for EngineBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Stratum Engine runtime.
///
/// Owns the screen stack and the host content loader. Create via
/// [`EngineBuilder`] or [`Engine::new`].
///
/// # Frame Loop
///
/// ```text
/// host ──tick(elapsed, events)──> ScreenStack::update
///      ──draw(sink)─────────────> ScreenStack::draw
/// ```
pub struct Engine<K: ObjectKind> {
    stack: ScreenStack<K>,
    content: Box<dyn ContentLoader>,
}

impl<K: ObjectKind> Engine<K> {
    //--- Construction -----------------------------------------------------

    pub fn new(config: EngineConfig, content: Box<dyn ContentLoader>) -> EngineResult<Self> {
        if let Err(e) = config.validate() {
            error!("Invalid engine configuration: {}", e);
            return Err(e);
        }

        info!("Building engine (object capacity: {})", config.object_capacity);
        Ok(Self {
            stack: ScreenStack::new(config),
            content,
        })
    }

    //--- Screens ----------------------------------------------------------

    /// Pushes a screen. Its content is loaded now if the engine has started.
    pub fn push_screen(&mut self, screen: impl Screen<K> + 'static) -> EngineResult<ScreenId> {
        self.stack.push(screen, self.content.as_mut())
    }

    /// Loads content of every screen pushed so far.
    pub fn start(&mut self) -> EngineResult<()> {
        info!("Starting engine with {} screen(s)", self.stack.len());
        self.stack.start(self.content.as_mut()).inspect_err(|e| {
            error!("Engine start failed: {}", e);
        })
    }

    //--- Frame Loop -------------------------------------------------------

    /// Runs one update with the time elapsed since the previous tick.
    pub fn tick(&mut self, elapsed: Duration, events: &[InputEvent]) -> EngineResult<()> {
        self.stack
            .update(elapsed, events, self.content.as_mut())
            .inspect_err(|e| {
                error!("Frame {} failed: {}", self.stack.frame_number(), e);
            })
    }

    pub fn draw(&mut self, sink: &mut dyn RenderSink) {
        self.stack.draw(sink);
    }

    //--- Accessors --------------------------------------------------------

    pub fn screens(&self) -> &ScreenStack<K> {
        &self.stack
    }

    pub fn screens_mut(&mut self) -> &mut ScreenStack<K> {
        &mut self.stack
    }

    pub fn config(&self) -> &EngineConfig {
        self.stack.config()
    }

    pub fn content_mut(&mut self) -> &mut dyn ContentLoader {
        self.content.as_mut()
    }

    /// Tells the engine whether the host window has focus.
    pub fn set_host_active(&mut self, active: bool) {
        self.stack.set_host_active(active);
    }

    /// Receives screen lifecycle events.
    pub fn subscribe(&mut self) -> Receiver<ScreenEvent> {
        self.stack.subscribe()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
