//=========================================================================
// Object2D
//=========================================================================
//
// Shared state of every scene object: transform, motion, visuals,
// collision configuration and the behavioural state machine.
//
// Lifecycle:
//   new() → load_base() (size, initialize, default box) → live in manager
//         → marked for deletion → cleanup() → pool → initialize() → ...
//
// `new()` runs once per physical instance. `initialize()` runs on every
// reuse and must reset whatever gameplay code changes during a life.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::mem;

//=== Internal Dependencies ===============================================

use super::{ObjectId, ObjectKind, Path, StateId, StateMachine};
use crate::core::collision::{BoundingBox, CollisionCategory, CollisionMode};
use crate::core::host::{Color, RenderSink, Sprite, Texture};
use crate::core::math::{vec2, Rect, Vec2};
use crate::core::time::FrameTime;
use crate::error::{EngineError, EngineResult};

/// Callback fired after an object has drawn itself.
pub type DrawListener<K> = Box<dyn FnMut(&Object2D<K>)>;

//=== Object2D ============================================================

pub struct Object2D<K: ObjectKind> {
    //--- Identity ---------------------------------------------------------
    pub id: ObjectId,
    pub kind: K,

    //--- Transform & Motion -----------------------------------------------
    pub position: Vec2,
    /// Added to `position` every update.
    pub momentum: Vec2,
    pub speed: f32,
    pub origin: Vec2,
    /// Radians.
    pub angle: f32,
    pub scale: f32,
    /// Overrides `position` while running.
    pub path: Option<Path>,

    //--- Visuals ----------------------------------------------------------
    pub texture: Option<Texture>,
    pub width: u32,
    pub height: u32,
    pub draw_color: Color,
    pub ignore_offset: bool,
    pub ignore_scale: bool,

    //--- Collision --------------------------------------------------------
    pub collision_category: CollisionCategory,
    pub collision_mode: CollisionMode,
    pub bounding_boxes: Vec<BoundingBox>,
    colliding: Vec<ObjectId>,

    //--- Lifecycle Flags --------------------------------------------------
    pub enabled: bool,
    pub visible: bool,
    pub mark_for_deletion: bool,
    pub(crate) initialized: bool,
    pub(crate) content_loaded: bool,

    //--- Behaviour --------------------------------------------------------
    states: StateMachine<K>,
    draw_listeners: Vec<DrawListener<K>>,
}

impl<K: ObjectKind> Object2D<K> {
    /// Creates an object with a fresh id and no collision.
    pub fn new(kind: K) -> Self {
        Self {
            id: ObjectId::next(),
            kind,
            position: Vec2::zeros(),
            momentum: Vec2::zeros(),
            speed: 0.2,
            origin: Vec2::zeros(),
            angle: 0.0,
            scale: 1.0,
            path: None,
            texture: None,
            width: 0,
            height: 0,
            draw_color: Color::WHITE,
            ignore_offset: false,
            ignore_scale: false,
            collision_category: CollisionCategory::NONE,
            collision_mode: CollisionMode::NoCollision,
            bounding_boxes: Vec::new(),
            colliding: Vec::with_capacity(30),
            enabled: true,
            visible: true,
            mark_for_deletion: false,
            initialized: false,
            content_loaded: false,
            states: StateMachine::new(),
            draw_listeners: Vec::new(),
        }
    }

    //--- Flags ------------------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_content_loaded(&self) -> bool {
        self.content_loaded
    }

    /// Objects hit during the last collision pass.
    ///
    /// Cleared at the end of the object's next update, so read it before
    /// the manager updates again.
    pub fn colliding_objects(&self) -> &[ObjectId] {
        &self.colliding
    }

    pub fn is_colliding_with(&self, other: ObjectId) -> bool {
        self.colliding.contains(&other)
    }

    pub(crate) fn record_collision(&mut self, other: ObjectId) {
        self.colliding.push(other);
    }

    //--- Lifecycle --------------------------------------------------------

    /// Resets per-life flags. Overrides must call this.
    pub fn initialize(&mut self) {
        self.mark_for_deletion = false;
        self.enabled = true;
        self.visible = true;
        self.initialized = true;
    }

    /// Base content step: texture size and default bounding box.
    pub(crate) fn prepare_content(&mut self) -> EngineResult<()> {
        if let Some(texture) = self.texture {
            if self.width == 0 {
                self.width = texture.width;
            }
            if self.height == 0 {
                self.height = texture.height;
            }
        }

        self.ensure_bounding_box()
    }

    /// Adds the default box if the object collides but owns none.
    ///
    /// Runs again after every `initialize`, since games may pick the
    /// collision mode there.
    pub(crate) fn ensure_bounding_box(&mut self) -> EngineResult<()> {
        if self.collision_mode.collides() && self.bounding_boxes.is_empty() {
            self.setup_default_bounding_box()?;
        }
        Ok(())
    }

    /// Replaces all boxes with one covering the whole texture.
    pub fn setup_default_bounding_box(&mut self) -> EngineResult<()> {
        if self.texture.is_none() {
            return Err(EngineError::MissingTexture { object: self.id });
        }

        let rect = Rect::new(0, 0, self.width as i32, self.height as i32);
        self.bounding_boxes.clear();
        self.bounding_boxes.push(BoundingBox::new(rect, self.origin, 0));
        Ok(())
    }

    /// Releases per-life state before the object goes back to the pool.
    pub fn cleanup(&mut self) {
        self.colliding.clear();
        self.states.reset();
    }

    //--- Update & Draw ----------------------------------------------------

    /// Moves by momentum, follows the path, runs the active state, then
    /// clears the colliding list.
    pub fn update(&mut self, time: &FrameTime) -> EngineResult<()> {
        self.position += self.momentum;

        if let Some(path) = self.path.as_mut().filter(|p| p.is_running()) {
            path.update(time.elapsed_ms());
            self.position = path.position();
        }

        let mut states = mem::take(&mut self.states);
        let result = states.update(self, time);
        self.states = states;

        self.colliding.clear();
        result
    }

    /// Emits one sprite when initialized, visible and textured.
    pub fn draw(&mut self, sink: &mut dyn RenderSink, offset: Vec2, world_scale: f32) {
        if !self.initialized || !self.visible {
            return;
        }
        let Some(texture) = self.texture else {
            return;
        };

        sink.draw_sprite(&Sprite {
            texture,
            position: self.translate_position(offset, world_scale),
            tint: self.draw_color,
            rotation: self.angle,
            origin: self.origin,
            scale: self.translate_size(world_scale),
        });

        let mut listeners = mem::take(&mut self.draw_listeners);
        for listener in &mut listeners {
            listener(self);
        }
        self.draw_listeners = listeners;
    }

    /// Registers a callback fired after every successful draw.
    pub fn add_draw_listener(&mut self, listener: impl FnMut(&Object2D<K>) + 'static) {
        self.draw_listeners.push(Box::new(listener));
    }

    //--- State Machine ----------------------------------------------------

    pub fn states(&self) -> &StateMachine<K> {
        &self.states
    }

    pub fn states_mut(&mut self) -> &mut StateMachine<K> {
        &mut self.states
    }

    /// Switches the active behavioural state.
    pub fn change_state(&mut self, id: StateId) -> EngineResult<()> {
        let mut states = mem::take(&mut self.states);
        let result = states.change(self, id);
        self.states = states;
        result
    }

    //--- Placement Helpers ------------------------------------------------

    /// Screen position for a camera `offset` and `world_scale`.
    pub fn translate_position(&self, offset: Vec2, world_scale: f32) -> Vec2 {
        let placement = self.position * world_scale;
        if self.ignore_offset {
            placement
        } else {
            placement + offset
        }
    }

    /// Draw scale for `world_scale`.
    pub fn translate_size(&self, world_scale: f32) -> f32 {
        if self.ignore_scale {
            self.scale
        } else {
            self.scale * world_scale
        }
    }

    /// Screen rectangle covered by the sprite.
    pub fn covering_rectangle(&self, offset: Vec2) -> Rect {
        let placement = if self.ignore_offset {
            self.position
        } else {
            self.position + offset
        };
        let scale = if self.ignore_scale { 1.0 } else { self.scale };

        Rect::new(
            placement.x as i32,
            placement.y as i32,
            (self.width as f32 * scale) as i32,
            (self.height as f32 * scale) as i32,
        )
    }

    /// Puts the rotation origin at the texture centre.
    pub fn center_origin_to_texture(&mut self) -> EngineResult<()> {
        let texture = self
            .texture
            .ok_or(EngineError::MissingTexture { object: self.id })?;
        self.origin = vec2(texture.width as f32 / 2.0, texture.height as f32 / 2.0);
        Ok(())
    }
}

//=========================================================================
// Tests
//=========================================================================
