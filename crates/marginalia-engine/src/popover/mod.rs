//! The single comment-editing popover.
//!
//! A [`PopoverCoordinator`] owns at most one live popover and mounts it on a
//! host-provided [`Surface`]. Opening a new popover steals the slot from the
//! old one.

mod coordinator;
mod session;

pub use coordinator::{PopoverCoordinator, PopoverResponse};
pub use session::{
    AnchorPosition, CloseCallback, PopoverEvent, PopoverRequest, PopoverView, SaveAction,
    SaveCallback, Surface,
};
