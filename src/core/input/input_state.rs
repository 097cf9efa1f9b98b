//=========================================================================
// Input State
//=========================================================================
//
// Per-frame input snapshot with persistent state and frame deltas.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//
// Frame lifecycle: begin_frame() → process_events() → finalize_frame() → query
//
// The screen stack drives the lifecycle once per tick, so every screen
// sees the same snapshot for the whole frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton, TouchPhase};
use crate::core::math::{vec2, Rect, Vec2};

//=== TouchPoint ==========================================================

/// A touch contact as seen during the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub phase: TouchPhase,
    pub position: Vec2,
}

//=== InputState ==========================================================

/// Tracks persistent state (keys held) and per-frame deltas (keys pressed/released).
pub struct InputState {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_position: Vec2,
    modifiers: Modifiers,
    touches: Vec<TouchPoint>,

    //--- Frame Deltas (reset each frame via begin_frame()) ---------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
    mouse_buttons_pressed_this_frame: HashSet<MouseButton>,
    mouse_buttons_released_this_frame: HashSet<MouseButton>,

    //--- Continuous Input ------------------------------------------------
    mouse_delta: Vec2,
    last_mouse_position: Vec2,
}

impl InputState {
    /// Creates a new input state with nothing held.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_position: Vec2::zeros(),
            modifiers: Modifiers::NONE,
            touches: Vec::new(),
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
            mouse_buttons_pressed_this_frame: HashSet::new(),
            mouse_buttons_released_this_frame: HashSet::new(),
            mouse_delta: Vec2::zeros(),
            last_mouse_position: Vec2::zeros(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame deltas and drops touches that ended last frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
        self.mouse_buttons_pressed_this_frame.clear();
        self.mouse_buttons_released_this_frame.clear();
        self.last_mouse_position = self.mouse_position;
        self.touches
            .retain(|t| !matches!(t.phase, TouchPhase::Ended | TouchPhase::Cancelled));
    }

    /// Applies a batch of events to the snapshot.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Computes derived values (mouse delta) once all events are in.
    pub fn finalize_frame(&mut self) {
        self.mouse_delta = self.mouse_position - self.last_mouse_position;
    }

    /// Runs the whole frame lifecycle for one batch of events.
    pub fn advance(&mut self, events: &[InputEvent]) {
        self.begin_frame();
        self.process_events(events);
        self.finalize_frame();
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.insert(key) {
                    self.keys_pressed_this_frame.insert(key);
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.remove(&key) {
                    self.keys_released_this_frame.insert(key);
                }
            }

            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = modifiers;
                if self.mouse_buttons_down.insert(button) {
                    self.mouse_buttons_pressed_this_frame.insert(button);
                }
            }

            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = modifiers;
                if self.mouse_buttons_down.remove(&button) {
                    self.mouse_buttons_released_this_frame.insert(button);
                }
            }

            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = vec2(x, y);
            }

            InputEvent::Touch { id, phase, x, y } => {
                let position = vec2(x, y);
                match self.touches.iter_mut().find(|t| t.id == id) {
                    Some(touch) => {
                        touch.phase = phase;
                        touch.position = position;
                    }
                    None => self.touches.push(TouchPoint { id, phase, position }),
                }
            }

            InputEvent::Unidentified => {
                trace!(target: "input", "Ignoring unidentified input event");
            }
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    /// Returns an iterator over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    /// Like [`is_key_pressed`](Self::is_key_pressed) but for mouse buttons.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons_pressed_this_frame.contains(&button)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Like [`is_key_released`](Self::is_key_released) but for mouse buttons.
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons_released_this_frame.contains(&button)
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Pointer movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //=====================================================================
    // Query API - Touch
    //=====================================================================

    /// Touch contacts seen this frame, including ones that just ended.
    pub fn touches(&self) -> &[TouchPoint] {
        &self.touches
    }

    /// Returns `true` if any live touch lies inside `area`.
    pub fn touch_within(&self, area: Rect) -> bool {
        self.touches.iter().any(|t| {
            !matches!(t.phase, TouchPhase::Ended | TouchPhase::Cancelled)
                && area.contains(t.position)
        })
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    fn touch(id: u64, phase: TouchPhase, x: f32, y: f32) -> InputEvent {
        InputEvent::Touch { id, phase, x, y }
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut input = InputState::new();

        input.advance(&[key_down(KeyCode::KeyQ)]);
        assert!(input.is_key_pressed(KeyCode::KeyQ));
        assert!(input.is_key_down(KeyCode::KeyQ));

        input.advance(&[]);
        assert!(!input.is_key_pressed(KeyCode::KeyQ));
        assert!(input.is_key_down(KeyCode::KeyQ));

        input.advance(&[key_up(KeyCode::KeyQ)]);
        assert!(!input.is_key_down(KeyCode::KeyQ));
        assert!(input.is_key_released(KeyCode::KeyQ));
    }

    #[test]
    fn fast_tap_captures_both_transitions() {
        let mut input = InputState::new();
        input.advance(&[key_down(KeyCode::Space), key_up(KeyCode::Space)]);

        assert!(input.is_key_pressed(KeyCode::Space));
        assert!(input.is_key_released(KeyCode::Space));
        assert!(!input.is_key_down(KeyCode::Space));
    }

    #[test]
    fn spurious_key_up_is_ignored() {
        let mut input = InputState::new();
        input.advance(&[key_up(KeyCode::KeyA)]);
        assert!(!input.is_key_released(KeyCode::KeyA));
    }

    //=====================================================================
    // Mouse Tests
    //=====================================================================

    #[test]
    fn mouse_delta_is_per_frame() {
        let mut input = InputState::new();
        input.advance(&[InputEvent::MouseMoved { x: 10.0, y: 20.0 }]);
        assert_eq!(input.mouse_delta(), vec2(10.0, 20.0));

        input.advance(&[]);
        assert_eq!(input.mouse_delta(), Vec2::zeros());
        assert_eq!(input.mouse_position(), vec2(10.0, 20.0));
    }

    #[test]
    fn button_press_records_modifiers() {
        let mut input = InputState::new();
        input.advance(&[InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            modifiers: Modifiers::SHIFT,
        }]);

        assert!(input.is_button_pressed(MouseButton::Left));
        assert!(input.modifiers().shift);
    }

    //=====================================================================
    // Touch Tests
    //=====================================================================

    #[test]
    fn touch_contact_is_tracked_until_the_frame_after_it_ends() {
        let mut input = InputState::new();
        input.advance(&[touch(1, TouchPhase::Started, 5.0, 5.0)]);
        assert_eq!(input.touches().len(), 1);
        assert!(input.touch_within(Rect::new(0, 0, 10, 10)));

        input.advance(&[touch(1, TouchPhase::Moved, 50.0, 50.0)]);
        assert_eq!(input.touches().len(), 1);
        assert!(!input.touch_within(Rect::new(0, 0, 10, 10)));

        input.advance(&[touch(1, TouchPhase::Ended, 50.0, 50.0)]);
        assert_eq!(input.touches()[0].phase, TouchPhase::Ended);
        assert!(!input.touch_within(Rect::new(0, 0, 100, 100)));

        input.advance(&[]);
        assert!(input.touches().is_empty());
    }
}
