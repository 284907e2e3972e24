//! # Editing
//!
//! The document buffer and everything that changes it.
//!
//! - **`document`**: `Document` over an xi-rope buffer, `Transaction`s and
//!   their `Effect`s
//! - **`commands`**: `Cmd` and its compilation to a rope delta
//! - **`mutations`**: highlight create / comment / remove edits
//! - **`selection`**: word-boundary selection expansion
//! - **`color_tag`**: trailing ` @color` tokens on comments
//! - **`editor`**: `Editor`, tying document, regions and popover together

pub mod color_tag;
pub mod commands;
pub mod document;
pub mod editor;
pub mod error;
pub mod mutations;
pub mod patch;
pub mod selection;

pub use color_tag::ColorTag;
pub use commands::Cmd;
pub use document::{Document, Effect, Transaction};
pub use editor::{Editor, EditorSettings, EditorState, Notifier};
pub use error::{AnnotationError, SelectionProblem};
pub use mutations::{Edit, HighlightEdit, HighlightTarget};
pub use patch::Patch;
