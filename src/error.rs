//=========================================================================
// Engine Errors
//=========================================================================
//
// Error taxonomy for the framework.
//
// Every variant is a contract violation by the game code or its assets,
// never a transient condition. Nothing in the engine retries; errors are
// propagated up to `Engine::tick` and reported there.
//
// Soft conditions (removing a screen that is not on the stack, re-adding
// an object that is already live) are NOT errors. They are logged and
// ignored at the call site.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::object::ObjectId;

//=== EngineError =========================================================

/// Configuration and lookup failures raised by the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A default bounding box was requested for an object with no texture.
    #[error("object {object} has no texture, a default bounding box needs one")]
    MissingTexture { object: ObjectId },

    /// An object left `initialize` without being marked initialized.
    ///
    /// Usually an override of `GameObject::initialize` that forgot to call
    /// `Object2D::initialize`.
    #[error(
        "object of kind {kind} is not initialized, overrides of `initialize` \
         must call `Object2D::initialize`"
    )]
    NotInitialized { kind: String },

    /// A behavioural state was requested that was never registered.
    #[error("state '{state}' is not registered on this object")]
    UnknownState { state: &'static str },

    /// The content loader could not resolve an asset name.
    #[error("asset '{name}' not found")]
    AssetNotFound { name: String },

    /// An engine configuration value is out of range.
    #[error("invalid engine configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

//=========================================================================
// Tests
//=========================================================================
