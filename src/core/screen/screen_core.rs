//=========================================================================
// Screen Core
//=========================================================================
//
// Transition state machine and object manager shared by every screen.
//
// Transition position runs from 1 (fully off) to 0 (fully on):
//
//   exiting  → TransitionOff, position → 1, then removal is requested
//   covered  → TransitionOff while position < 1, then Hidden
//   otherwise→ TransitionOn  while position > 0, then Active
//
// Each tick moves the position by elapsed / duration (all the way if the
// duration is zero) and clamps it to [0, 1].
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::trace;

//=== Internal Dependencies ===============================================

use super::{Frame, ScreenId, ScreenState};
use crate::config::EngineConfig;
use crate::core::host::{Color, RenderSink};
use crate::core::math::Vec2;
use crate::core::object::{ObjectKind, ObjectManager};
use crate::core::time::FrameTime;
use crate::error::EngineResult;

//=== ScreenCore ==========================================================

pub struct ScreenCore<K: ObjectKind> {
    id: ScreenId,
    state: ScreenState,
    position: f32,
    pub transition_on: Duration,
    pub transition_off: Duration,

    exiting: bool,
    popup: bool,
    initialized: bool,
    content_loaded: bool,
    other_has_focus: bool,
    removal_requested: bool,

    objects: Option<ObjectManager<K>>,
    object_capacity: usize,
    draw_bounding_boxes: bool,

    /// Update the object manager from `update`.
    pub update_objects: bool,
    /// Draw the object manager from `draw`.
    pub draw_objects: bool,
}

impl<K: ObjectKind> ScreenCore<K> {
    //--- Construction -----------------------------------------------------

    /// A regular screen with instant transitions.
    pub fn new() -> Self {
        Self {
            id: ScreenId::next(),
            state: ScreenState::TransitionOn,
            position: 1.0,
            transition_on: Duration::ZERO,
            transition_off: Duration::ZERO,
            exiting: false,
            popup: false,
            initialized: false,
            content_loaded: false,
            other_has_focus: false,
            removal_requested: false,
            objects: None,
            object_capacity: 500,
            draw_bounding_boxes: false,
            update_objects: true,
            draw_objects: true,
        }
    }

    /// A popup: takes focus but does not cover the screens below.
    pub fn popup() -> Self {
        Self {
            popup: true,
            ..Self::new()
        }
    }

    /// A regular screen using the configured defaults.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            transition_on: config.default_transition_on,
            transition_off: config.default_transition_off,
            object_capacity: config.object_capacity,
            draw_bounding_boxes: config.draw_bounding_boxes,
            ..Self::new()
        }
    }

    /// Sets both transition durations.
    pub fn with_transitions(mut self, on: Duration, off: Duration) -> Self {
        self.transition_on = on;
        self.transition_off = off;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// 0 when fully on, 1 when fully off.
    pub fn transition_position(&self) -> f32 {
        self.position
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    pub fn is_popup(&self) -> bool {
        self.popup
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_content_loaded(&self) -> bool {
        self.content_loaded
    }

    /// True while transitioning on or active, and no other screen has focus.
    pub fn is_active(&self) -> bool {
        !self.other_has_focus && matches!(self.state, ScreenState::TransitionOn | ScreenState::Active)
    }

    /// The stack should drop this screen at the end of the tick.
    pub fn is_removal_requested(&self) -> bool {
        self.removal_requested
    }

    /// Opacity for fading: 255 when fully on, 0 when fully off.
    pub fn transition_alpha(&self) -> u8 {
        (255.0 - self.position * 255.0) as u8
    }

    /// `color` with its alpha replaced by [`transition_alpha`](Self::transition_alpha).
    pub fn transition_color(&self, color: Color) -> Color {
        color.with_alpha(self.transition_alpha())
    }

    //--- Objects ----------------------------------------------------------

    /// The screen's object manager, if one has been created.
    pub fn objects(&self) -> Option<&ObjectManager<K>> {
        self.objects.as_ref()
    }

    /// The screen's object manager, created on first use.
    pub fn objects_mut(&mut self) -> &mut ObjectManager<K> {
        let capacity = self.object_capacity;
        let draw_boxes = self.draw_bounding_boxes;
        self.objects.get_or_insert_with(|| {
            let mut manager = ObjectManager::with_capacity(capacity);
            manager.draw_bounding_boxes = draw_boxes;
            manager
        })
    }

    //--- Lifecycle --------------------------------------------------------

    pub fn initialize(&mut self) {
        self.initialized = true;
    }

    pub fn mark_content_loaded(&mut self) {
        self.content_loaded = true;
    }

    /// Starts leaving the stack.
    ///
    /// With no off-transition the screen is removed at the end of the tick;
    /// otherwise it fades out first.
    pub fn exit_screen(&mut self) {
        if self.transition_off.is_zero() {
            self.removal_requested = true;
        } else {
            self.exiting = true;
        }
    }

    /// Restores the initial transition state so the screen can be pushed again.
    pub fn reset_state(&mut self) {
        self.exiting = false;
        self.removal_requested = false;
        self.state = ScreenState::TransitionOn;
        self.position = 1.0;
    }

    //--- Update & Draw ----------------------------------------------------

    /// Updates objects, then advances the transition state machine.
    pub fn update(&mut self, frame: &mut Frame<'_, K>, other_has_focus: bool, covered: bool) -> EngineResult<()> {
        if self.update_objects {
            if let Some(objects) = self.objects.as_mut() {
                objects.update(frame.time.frame, &frame.time, frame.content)?;
            }
        }

        self.other_has_focus = other_has_focus;
        self.advance(frame.time.elapsed, covered);
        Ok(())
    }

    /// Transition state machine step.
    pub fn advance(&mut self, elapsed: Duration, covered: bool) {
        let before = self.state;

        if self.exiting {
            self.state = ScreenState::TransitionOff;
            if !self.step_transition(elapsed, self.transition_off, 1.0) {
                self.removal_requested = true;
            }
        } else if covered {
            self.state = if self.step_transition(elapsed, self.transition_off, 1.0) {
                ScreenState::TransitionOff
            } else {
                ScreenState::Hidden
            };
        } else {
            self.state = if self.step_transition(elapsed, self.transition_on, -1.0) {
                ScreenState::TransitionOn
            } else {
                ScreenState::Active
            };
        }

        if self.state != before {
            trace!(target: "screen", "{} {:?} -> {:?}", self.id, before, self.state);
        }
    }

    /// Moves the position; returns `false` once the end has been reached.
    fn step_transition(&mut self, elapsed: Duration, duration: Duration, direction: f32) -> bool {
        let delta = if duration.is_zero() {
            1.0
        } else {
            (elapsed.as_nanos() as f64 / duration.as_nanos() as f64) as f32
        };

        self.position += delta * direction;

        if (direction < 0.0 && self.position <= 0.0) || (direction > 0.0 && self.position >= 1.0) {
            self.position = self.position.clamp(0.0, 1.0);
            return false;
        }
        true
    }

    /// Draws the object manager, if any.
    pub fn draw(&mut self, time: &FrameTime, sink: &mut dyn RenderSink) {
        if !self.draw_objects {
            return;
        }
        if let Some(objects) = self.objects.as_mut() {
            objects.draw(time.frame, sink, Vec2::zeros(), 1.0);
        }
    }
}

impl<K: ObjectKind> Default for ScreenCore<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Dot,
    }

    impl ObjectKind for Kind {}

    const TICK: Duration = Duration::from_millis(25);

    fn fading() -> ScreenCore<Kind> {
        ScreenCore::new().with_transitions(Duration::from_millis(100), Duration::from_millis(200))
    }

    //--- Initial State ----------------------------------------------------

    #[test]
    fn starts_transitioning_on_from_fully_off() {
        let core: ScreenCore<Kind> = ScreenCore::new();
        assert_eq!(core.state(), ScreenState::TransitionOn);
        assert_eq!(core.transition_position(), 1.0);
        assert_eq!(core.transition_alpha(), 0);
        assert!(core.is_active());
    }

    //--- Transitions ------------------------------------------------------

    #[test]
    fn becomes_active_after_on_time() {
        let mut core = fading();
        for _ in 0..3 {
            core.advance(TICK, false);
            assert_eq!(core.state(), ScreenState::TransitionOn);
        }
        core.advance(TICK, false);

        assert_eq!(core.state(), ScreenState::Active);
        assert_eq!(core.transition_position(), 0.0);
        assert_eq!(core.transition_alpha(), 255);
    }

    #[test]
    fn zero_duration_is_instant() {
        let mut core: ScreenCore<Kind> = ScreenCore::new();
        core.advance(Duration::ZERO, false);
        assert_eq!(core.state(), ScreenState::Active);

        core.advance(Duration::ZERO, true);
        assert_eq!(core.state(), ScreenState::Hidden);
    }

    #[test]
    fn covered_screen_hides_after_off_time() {
        let mut core = fading();
        core.advance(Duration::from_millis(100), false);
        assert_eq!(core.state(), ScreenState::Active);

        for _ in 0..7 {
            core.advance(TICK, true);
            assert_eq!(core.state(), ScreenState::TransitionOff);
        }
        core.advance(TICK, true);
        assert_eq!(core.state(), ScreenState::Hidden);
        assert_eq!(core.transition_position(), 1.0);
    }

    #[test]
    fn overshoot_is_clamped() {
        let mut core = fading();
        core.advance(Duration::from_secs(5), false);
        assert_eq!(core.transition_position(), 0.0);
    }

    //--- Exit -------------------------------------------------------------

    #[test]
    fn exit_without_off_time_requests_removal_immediately() {
        let mut core: ScreenCore<Kind> = ScreenCore::new();
        core.exit_screen();
        assert!(core.is_removal_requested());
        assert!(!core.is_exiting());
    }

    #[test]
    fn exit_with_off_time_fades_then_requests_removal() {
        let mut core = fading();
        core.advance(Duration::from_millis(100), false);
        core.exit_screen();
        assert!(core.is_exiting());

        core.advance(Duration::from_millis(100), false);
        assert_eq!(core.state(), ScreenState::TransitionOff);
        assert!(!core.is_removal_requested());

        core.advance(Duration::from_millis(100), false);
        assert!(core.is_removal_requested());
    }

    #[test]
    fn reset_state_restores_initial_values() {
        let mut core = fading();
        core.advance(Duration::from_millis(100), false);
        core.exit_screen();
        core.advance(Duration::from_millis(300), false);

        core.reset_state();
        assert_eq!(core.state(), ScreenState::TransitionOn);
        assert_eq!(core.transition_position(), 1.0);
        assert!(!core.is_exiting());
        assert!(!core.is_removal_requested());
    }

    //--- Focus & Alpha ----------------------------------------------------

    #[test]
    fn popups_and_focus() {
        let popup: ScreenCore<Kind> = ScreenCore::popup();
        assert!(popup.is_popup());

        let mut core: ScreenCore<Kind> = ScreenCore::new();
        core.other_has_focus = true;
        assert!(!core.is_active());
    }

    #[test]
    fn transition_color_uses_alpha() {
        let mut core = fading();
        core.advance(Duration::from_millis(50), false);
        let color = core.transition_color(Color::WHITE);
        assert_eq!(color.a, 127);
        assert_eq!((color.r, color.g, color.b), (255, 255, 255));
    }

    #[test]
    fn object_manager_is_created_lazily() {
        let mut core: ScreenCore<Kind> = ScreenCore::new();
        assert!(core.objects().is_none());
        core.objects_mut();
        assert!(core.objects().is_some());
    }
}
