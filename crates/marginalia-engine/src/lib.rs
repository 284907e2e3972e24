pub mod editing;
pub mod parsing;
pub mod popover;
pub mod preview;
pub mod render;

// Re-export key types for easier usage
pub use editing::{AnnotationError, Cmd, Document, Editor, EditorSettings, Notifier, Transaction};
pub use parsing::{HighlightMatch, Span, parse_highlights};
pub use popover::{PopoverCoordinator, PopoverEvent, SaveAction, Surface};
pub use preview::{MarginNote, MarginNoteLayout, Side, render_margin_note, render_preview};
pub use render::{Region, RegionKind, RegionSet};
