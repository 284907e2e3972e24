//! # Rendering
//!
//! Turns parsed matches into clickable regions and keeps them current as the
//! document changes.
//!
//! - **`decorations`**: `Region` (tagged value record) and `RegionSet`
//! - **`html`**: element markup for a region
//! - **`field`**: `HighlightField`, the revalidation state machine and its
//!   deferred-work queue

pub mod decorations;
pub mod field;
pub mod html;

pub use decorations::{Region, RegionKind, RegionSet, project};
pub use field::{Deferred, FieldState, HighlightField};
