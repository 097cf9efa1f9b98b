//=========================================================================
// Screen Stack
//=========================================================================
//
// Owns the screens, drives their transitions and routes input focus.
//
// Update walk (top → bottom, over a snapshot of ids):
//   1. uninitialized screens are skipped
//   2. Screen::update(other_has_focus, covered)
//   3. first TransitionOn/Active screen gets handle_input() and focus
//   4. a non-popup TransitionOn/Active screen covers everything below
//
// After the walk, screens that finished exiting are removed and queued
// commands are applied in FIFO order. The stack never changes while the
// walk is running.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{Frame, Screen, ScreenCommand, ScreenCommands, ScreenEvent, ScreenId, ScreenState};
use crate::config::EngineConfig;
use crate::core::host::{Color, ContentLoader, RenderSink};
use crate::core::input::{InputEvent, InputState};
use crate::core::math::vec2;
use crate::core::object::ObjectKind;
use crate::core::time::FrameTime;
use crate::error::EngineResult;

//=== Constants ===========================================================

const FOOTER_MARGIN: f32 = 20.0;

//=== ScreenStack =========================================================

/// Z-ordered screens, bottom first.
pub struct ScreenStack<K: ObjectKind> {
    screens: Vec<Box<dyn Screen<K>>>,
    input: InputState,
    config: EngineConfig,
    commands: ScreenCommands<K>,
    subscribers: Vec<Sender<ScreenEvent>>,

    frame: u64,
    total: Duration,
    started: bool,
    host_active: bool,
}

impl<K: ObjectKind> ScreenStack<K> {
    //--- Construction -----------------------------------------------------

    pub fn new(config: EngineConfig) -> Self {
        Self {
            screens: Vec::new(),
            input: InputState::new(),
            config,
            commands: ScreenCommands::new(),
            subscribers: Vec::new(),
            frame: 0,
            total: Duration::ZERO,
            started: false,
            host_active: true,
        }
    }

    /// Loads content of every screen pushed so far.
    ///
    /// Screens pushed afterwards load their content as they are pushed.
    pub fn start(&mut self, content: &mut dyn ContentLoader) -> EngineResult<()> {
        if self.started {
            warn!(target: "screen", "Screen stack already started");
            return Ok(());
        }

        debug!(target: "screen", "Starting screen stack with {} screen(s)", self.screens.len());
        for screen in &mut self.screens {
            if !screen.core().is_content_loaded() {
                screen.load_content(content)?;
            }
        }
        self.started = true;
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    //--- Stack Operations -------------------------------------------------

    /// Pushes `screen` on top of the stack.
    pub fn push(&mut self, screen: impl Screen<K> + 'static, content: &mut dyn ContentLoader) -> EngineResult<ScreenId> {
        self.push_boxed(Box::new(screen), content)
    }

    /// Pushes an already boxed screen, e.g. one returned by [`remove`](Self::remove).
    pub fn push_boxed(&mut self, mut screen: Box<dyn Screen<K>>, content: &mut dyn ContentLoader) -> EngineResult<ScreenId> {
        let id = screen.core().id();
        if self.contains(id) {
            warn!(target: "screen", "{} is already on the stack", id);
            return Ok(id);
        }

        screen.initialize();
        if self.started {
            screen.load_content(content)?;
        }
        screen.surfaced();
        self.screens.push(screen);

        debug!(target: "screen", "Pushed {} (depth {})", id, self.screens.len());
        self.publish(ScreenEvent::Pushed(id));
        Ok(id)
    }

    /// Takes `id` off the stack immediately, without an off-transition.
    ///
    /// The screen's content is unloaded and its transition state reset, so
    /// the returned box can be pushed again later. If a different screen is
    /// now topmost, it is told it surfaced.
    pub fn remove(&mut self, id: ScreenId) -> Option<Box<dyn Screen<K>>> {
        let Some(index) = self.index_of(id) else {
            warn!(target: "screen", "Cannot remove {}: not on the stack", id);
            return None;
        };

        let old_top = self.top().map(|s| s.core().id());
        let mut screen = self.screens.remove(index);

        if self.started {
            screen.unload_content();
        }
        screen.core_mut().reset_state();
        debug!(target: "screen", "Removed {} (depth {})", id, self.screens.len());

        let new_top = self.top().map(|s| s.core().id());
        if new_top != old_top {
            if let Some(top) = self.screens.last_mut() {
                let top_id = top.core().id();
                top.surfaced();
                debug!(target: "screen", "{} surfaced", top_id);
                self.publish(ScreenEvent::Surfaced(top_id));
            }
        }

        self.publish(ScreenEvent::Removed(id));
        Some(screen)
    }

    /// Exits `id`, running its off-transition if it has one.
    ///
    /// Returns `false` if the screen is not on the stack.
    pub fn exit_screen(&mut self, id: ScreenId) -> bool {
        let Some(index) = self.index_of(id) else {
            warn!(target: "screen", "Cannot exit {}: not on the stack", id);
            return false;
        };

        let core = self.screens[index].core_mut();
        core.exit_screen();
        if core.is_removal_requested() {
            self.finish_exit(id);
        }
        true
    }

    /// Exits every screen above `target`, topmost first.
    ///
    /// Returns `false` (and exits nothing) if `target` is not on the stack.
    pub fn exit_until(&mut self, target: ScreenId) -> bool {
        let Some(index) = self.index_of(target) else {
            warn!(target: "screen", "Cannot exit until {}: not on the stack", target);
            return false;
        };

        let above: Vec<ScreenId> = self.screens[index + 1..].iter().rev().map(|s| s.core().id()).collect();
        for id in above {
            self.exit_screen(id);
        }
        true
    }

    fn finish_exit(&mut self, id: ScreenId) {
        debug!(target: "screen", "{} exited", id);
        self.publish(ScreenEvent::Exited(id));
        self.remove(id);
    }

    //--- Update -----------------------------------------------------------

    /// Runs one tick: input snapshot, screen walk, exits, queued commands.
    pub fn update(&mut self, elapsed: Duration, events: &[InputEvent], content: &mut dyn ContentLoader) -> EngineResult<()> {
        self.frame += 1;
        self.total += elapsed;
        self.input.advance(events);

        let time = FrameTime::new(self.frame, elapsed, self.total);
        trace!(target: "screen", "Frame {} ({} screens)", self.frame, self.screens.len());

        let snapshot: Vec<ScreenId> = self.screens.iter().map(|s| s.core().id()).collect();
        let mut other_has_focus = !self.host_active;
        let mut covered = false;

        for &id in snapshot.iter().rev() {
            let Some(index) = self.index_of(id) else {
                continue;
            };
            let screen = &mut self.screens[index];
            if !screen.core().is_initialized() {
                continue;
            }

            let mut frame = Frame::new(time, &self.input, &self.config, content, &mut self.commands);
            screen.update(&mut frame, other_has_focus, covered)?;

            if matches!(screen.core().state(), ScreenState::TransitionOn | ScreenState::Active) {
                if !other_has_focus {
                    screen.handle_input(&mut frame);
                    other_has_focus = true;
                }
                if !screen.core().is_popup() {
                    covered = true;
                }
            }
        }

        let finished: Vec<ScreenId> = self
            .screens
            .iter()
            .filter(|s| s.core().is_removal_requested())
            .map(|s| s.core().id())
            .collect();
        for id in finished {
            self.finish_exit(id);
        }

        self.apply_commands(content)
    }

    fn apply_commands(&mut self, content: &mut dyn ContentLoader) -> EngineResult<()> {
        for command in self.commands.take() {
            match command {
                ScreenCommand::Push(screen) => {
                    self.push_boxed(screen, content)?;
                }
                ScreenCommand::Exit(id) => {
                    self.exit_screen(id);
                }
                ScreenCommand::ExitUntil(id) => {
                    self.exit_until(id);
                }
            }
        }
        Ok(())
    }

    //--- Draw -------------------------------------------------------------

    /// Clears the frame and draws visible screens bottom-up, then the footer.
    pub fn draw(&mut self, sink: &mut dyn RenderSink) {
        sink.clear(self.config.background_color);

        let time = FrameTime::new(self.frame, Duration::ZERO, self.total);
        for screen in &mut self.screens {
            let core = screen.core();
            if !core.is_initialized() || core.state() == ScreenState::Hidden {
                continue;
            }
            screen.draw(&time, sink);
        }

        if let Some(footer) = self.config.footer() {
            let (_, height) = sink.viewport();
            let position = vec2(FOOTER_MARGIN, height as f32 - FOOTER_MARGIN);
            sink.draw_text(footer, position, Color::WHITE);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Topmost screen.
    pub fn top(&self) -> Option<&dyn Screen<K>> {
        self.screens.last().map(|s| s.as_ref())
    }

    pub fn index_of(&self, id: ScreenId) -> Option<usize> {
        self.screens.iter().position(|s| s.core().id() == id)
    }

    pub fn contains(&self, id: ScreenId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: ScreenId) -> Option<&dyn Screen<K>> {
        self.index_of(id).map(|i| self.screens[i].as_ref())
    }

    pub fn get_mut(&mut self, id: ScreenId) -> Option<&mut (dyn Screen<K> + 'static)> {
        let index = self.index_of(id)?;
        Some(self.screens[index].as_mut())
    }

    /// First screen, bottom up, that satisfies `predicate`.
    pub fn find<P>(&self, predicate: P) -> Option<&dyn Screen<K>>
    where
        P: Fn(&dyn Screen<K>) -> bool,
    {
        self.screens.iter().map(|s| s.as_ref()).find(|s| predicate(*s))
    }

    /// The screen directly under `id`, if any.
    pub fn screen_below(&self, id: ScreenId) -> Option<&dyn Screen<K>> {
        match self.index_of(id)? {
            0 => None,
            index => Some(self.screens[index - 1].as_ref()),
        }
    }

    /// True if `id` is the topmost screen.
    pub fn is_in_focus(&self, id: ScreenId) -> bool {
        self.top().is_some_and(|s| s.core().id() == id)
    }

    /// Number of ticks run so far.
    pub fn frame_number(&self) -> u64 {
        self.frame
    }

    /// Input snapshot of the last tick.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    //--- Host Focus -------------------------------------------------------

    /// While the host window is inactive no screen receives input.
    pub fn set_host_active(&mut self, active: bool) {
        if self.host_active != active {
            debug!(target: "screen", "Host {}", if active { "activated" } else { "deactivated" });
        }
        self.host_active = active;
    }

    pub fn is_host_active(&self) -> bool {
        self.host_active
    }

    //--- Events -----------------------------------------------------------

    /// Receives every [`ScreenEvent`] published from now on.
    pub fn subscribe(&mut self) -> Receiver<ScreenEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, event: ScreenEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}

//=========================================================================
// Tests
//=========================================================================
