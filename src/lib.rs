#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod dialogs;
pub mod drawable;
pub mod editor;
pub mod error;
pub mod file_io;
pub mod geometry;
pub mod history;
pub mod input;
pub mod layer;
pub mod layer_stack;
pub mod panels;
pub mod prompt;
pub mod renderer;
pub mod style;
pub mod surface;
pub mod tools;

pub use app::PaintApp;
pub use config::{ConfigError, EditorConfig};
pub use drawable::{Drawable, DrawableId, Primitive, QueryMode};
pub use editor::{Editor, LayerDeletion};
pub use error::{EditorError, EditorResult};
pub use history::{CanvasSnapshot, History};
pub use input::{InputEvent, InputLocation};
pub use layer::{Layer, LayerId};
pub use layer_stack::LayerStack;
pub use prompt::{PendingPrompt, Prompt, PromptAnswer, Prompter, ScriptedPrompter};
pub use style::{BrushSettings, Style, StyleUpdate};
pub use tools::{Tool, ToolSession, ToolState};
