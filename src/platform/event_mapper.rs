//=========================================================================
// Window Event Mapper
//=========================================================================
//
// Converts winit window events into engine `InputEvent`s.
//
// Architecture:
//   winit WindowEvent → WindowEventMapper → InputEvent → Engine::tick()
//
// Stateful modifier tracking: the mapper caches the state carried by
// `ModifiersChanged` and stamps it on every later key and mouse button
// event. Unmapped keys and events with no engine counterpart map to
// `None`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::{
    event::{ElementState, MouseButton as WinitMouseButton, Touch, TouchPhase as WinitTouchPhase, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton, TouchPhase};

//=== WindowEventMapper ===================================================

/// Converts winit window events with sticky modifier tracking.
///
/// # Example
///
/// ```no_run
/// # use stratum_engine::platform::WindowEventMapper;
/// # fn on_event(event: winit::event::WindowEvent) {
/// let mut mapper = WindowEventMapper::new();
/// let mut frame_events = Vec::new();
/// if let Some(input) = mapper.map(&event) {
///     frame_events.push(input);
/// }
/// # }
/// ```
#[derive(Debug, Default)]
pub struct WindowEventMapper {
    modifiers: Modifiers,
}

impl WindowEventMapper {
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::NONE,
        }
    }

    /// Modifier state applied to the next key or button event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Translates one window event.
    ///
    /// Modifier changes update the cached state and produce no event.
    pub fn map(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "input", "Modifiers changed: {:?}", state);
                self.update_modifiers(state.state());
                None
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = match event.physical_key {
                    PhysicalKey::Code(code) => KeyCode::from(code),
                    _ => return None,
                };
                if key == KeyCode::Unidentified {
                    trace!(target: "input", "Unmapped key ignored");
                    return None;
                }
                Some(self.key_event(key, event.state))
            }

            WindowEvent::MouseInput { state, button, .. } => Some(self.button_event(MouseButton::from(*button), *state)),

            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),

            WindowEvent::Touch(touch) => Some(touch_event(touch)),

            _ => None,
        }
    }

    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers::from(state);
    }

    //--- Internal Helpers -------------------------------------------------

    fn key_event(&self, key: KeyCode, state: ElementState) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::KeyDown {
                key,
                modifiers: self.modifiers,
            },
            ElementState::Released => InputEvent::KeyUp {
                key,
                modifiers: self.modifiers,
            },
        }
    }

    fn button_event(&self, button: MouseButton, state: ElementState) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown {
                button,
                modifiers: self.modifiers,
            },
            ElementState::Released => InputEvent::MouseButtonUp {
                button,
                modifiers: self.modifiers,
            },
        }
    }
}

/// `Some(focused)` for window focus changes, to feed `Engine::set_host_active`.
pub fn focus_change(event: &WindowEvent) -> Option<bool> {
    match event {
        WindowEvent::Focused(focused) => Some(*focused),
        _ => None,
    }
}

fn touch_event(touch: &Touch) -> InputEvent {
    InputEvent::Touch {
        id: touch.id,
        phase: TouchPhase::from(touch.phase),
        x: touch.location.x as f32,
        y: touch.location.y as f32,
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

impl From<WinitTouchPhase> for TouchPhase {
    fn from(phase: WinitTouchPhase) -> Self {
        match phase {
            WinitTouchPhase::Started => TouchPhase::Started,
            WinitTouchPhase::Moved => TouchPhase::Moved,
            WinitTouchPhase::Ended => TouchPhase::Ended,
            WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
        }
    }
}

/// Maps A-Z, 0-9, arrows and common special keys. Everything else
/// (function keys, numpad, media keys) is `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------
            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------
            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------
            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------
            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Back/Forward/Other all map to `MouseButton::Other`.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
