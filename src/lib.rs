//=========================================================================
// Stratum Engine Library Root
//
// This crate defines the public API surface of the Stratum Engine, a 2D
// game framework core: a stack of transitioning screens, pooled scene
// objects and two-phase collision detection.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the screen, object and collision systems for game code
// - Keep host concerns (window, renderer, asset decoding) behind traits
//
// Typical usage:
// ```no_run
// use stratum_engine::prelude::*;
//
// let mut engine = EngineBuilder::<MyKind>::new().build(my_assets)?;
// engine.push_screen(TitleScreen::new())?;
// engine.start()?;
// loop {
//     engine.tick(elapsed, &events)?;
//     engine.draw(&mut renderer);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the engine systems (screens, objects, collision, input).
// Game code mostly uses them through the prelude.
//
pub mod config;
pub mod core;
pub mod error;
pub mod prelude;

// `platform` translates winit window events into engine input.
pub mod platform;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the main entry point and its builder.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder};
pub use error::{EngineError, EngineResult};
