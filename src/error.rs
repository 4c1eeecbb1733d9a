use std::path::PathBuf;
use thiserror::Error;

use crate::layer::LayerId;

/// Errors raised by the editing core.
///
/// Every variant is recoverable where it originates: the editor logs it,
/// keeps its previous state and hands it back so the front end can show a
/// notification.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Capture was attempted before the surface had a drawable area.
    /// Retry after the next layout pass.
    #[error("drawing surface is not available yet ({width}x{height})")]
    SurfaceUnavailable { width: u32, height: u32 },

    /// A tool setting was rejected; the previous value is kept.
    #[error("invalid {setting}: {value} (must be at least 1)")]
    InvalidToolInput { setting: &'static str, value: i64 },

    /// The only remaining layer can be cleared but not removed.
    #[error("the last remaining layer cannot be deleted")]
    LastLayerProtected,

    #[error("failed to open {path}: {source}")]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save {path}: {source}")]
    EncodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The text tool got no text to place.
    #[error("nothing to place: text input was empty or cancelled")]
    EmptyGesture,

    #[error("no layer with id {0}")]
    UnknownLayer(LayerId),
}

pub type EditorResult<T> = Result<T, EditorError>;
