//=========================================================================
// Host Interfaces
//=========================================================================
//
// Narrow contracts for the collaborators the framework does not own:
// asset loading and the draw-call sink of the host renderer.
//
// Architecture:
//   ObjectManager / Screen ──load_texture()──> ContentLoader (host)
//   ObjectManager / Screen ──draw_*()────────> RenderSink    (host)
//
// The framework never decodes assets or issues GPU work itself. Both traits
// are object safe and passed as `&mut dyn` so games can plug in any backend.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::Vec2;
use crate::error::EngineResult;

//=== Color ===============================================================

/// Non-premultiplied RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with its alpha channel replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

//=== Texture =============================================================

/// Handle to a texture owned by the host.
///
/// Only the dimensions are known to the framework; `id` is opaque and is
/// handed back to the [`RenderSink`] when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Texture {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

//=== Sprite ==============================================================

/// A single textured quad draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: Texture,
    pub position: Vec2,
    pub tint: Color,
    pub rotation: f32,
    pub origin: Vec2,
    pub scale: f32,
}

//=== ContentLoader =======================================================

/// Resolves named assets to host resources.
///
/// Implementations return [`crate::EngineError::AssetNotFound`] for names
/// they cannot resolve.
pub trait ContentLoader {
    fn load_texture(&mut self, name: &str) -> EngineResult<Texture>;
}

//=== RenderSink ==========================================================

/// Alpha-blended draw-call sink provided by the host renderer.
pub trait RenderSink {
    /// Clears the back buffer.
    fn clear(&mut self, color: Color);

    fn draw_sprite(&mut self, sprite: &Sprite);

    /// Draws a closed quad outline. Used for bounding box debugging.
    fn draw_outline(&mut self, vertices: &[Vec2; 4], color: Color);

    fn draw_text(&mut self, text: &str, position: Vec2, color: Color);

    /// Back buffer size in pixels.
    fn viewport(&self) -> (u32, u32);
}

//=========================================================================
// Test Doubles
//=========================================================================
