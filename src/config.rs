//=========================================================================
// Engine Configuration
//=========================================================================
//
// Values shared by the screen stack and every screen it hosts.
//
// Built through `EngineBuilder` or constructed directly; the stack owns
// one copy and lends it to screens through `Frame::config`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::host::Color;
use crate::error::{EngineError, EngineResult};

//=== EngineConfig ========================================================

/// Engine-wide settings.
///
/// # Default Values
///
/// - **Background**: black
/// - **Footer**: empty (not drawn)
/// - **Bounding box outlines**: off
/// - **Transitions**: zero (instant)
/// - **Object capacity**: 500
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Color the frame is cleared to before screens draw.
    pub background_color: Color,

    /// Text drawn bottom-left over every screen. Blank means none.
    pub footer_text: String,

    /// Outline every collision box after the objects are drawn.
    pub draw_bounding_boxes: bool,

    /// On-transition of screens built with `ScreenCore::from_config`.
    pub default_transition_on: Duration,

    /// Off-transition of screens built with `ScreenCore::from_config`.
    pub default_transition_off: Duration,

    /// Initial capacity of each object manager's live list.
    pub object_capacity: usize,
}

impl EngineConfig {
    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.object_capacity == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "object capacity must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Footer text, if it has anything besides whitespace.
    pub fn footer(&self) -> Option<&str> {
        let trimmed = self.footer_text.trim();
        (!trimmed.is_empty()).then_some(self.footer_text.as_str())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            background_color: Color::BLACK,
            footer_text: String::new(),
            draw_bounding_boxes: false,
            default_transition_on: Duration::ZERO,
            default_transition_off: Duration::ZERO,
            object_capacity: 500,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.background_color, Color::BLACK);
        assert!(config.footer_text.is_empty());
        assert!(!config.draw_bounding_boxes);
        assert_eq!(config.default_transition_on, Duration::ZERO);
        assert_eq!(config.default_transition_off, Duration::ZERO);
        assert_eq!(config.object_capacity, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_invalid() {
        let config = EngineConfig {
            object_capacity: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn blank_footer_is_none() {
        let mut config = EngineConfig::default();
        assert_eq!(config.footer(), None);

        config.footer_text = "   ".to_string();
        assert_eq!(config.footer(), None);

        config.footer_text = "Trial".to_string();
        assert_eq!(config.footer(), Some("Trial"));
    }
}
