/// Screen position a popover is anchored to: horizontal centre and top edge
/// of the highlight it edits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorPosition {
    pub x: f32,
    pub y: f32,
}

/// Input routed to the open popover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopoverEvent {
    /// A character typed into the comment field.
    Input(char),
    Backspace,
    /// Enter submits; Shift+Enter inserts a newline.
    Enter {
        shift: bool,
    },
    Escape,
    /// Pointer down anywhere outside the popover.
    OutsideClick,
    CloseClicked,
    RemoveClicked,
    SaveClicked,
}

/// What the user asked for when leaving the popover through a save path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveAction {
    Comment(String),
    Remove,
}

/// Everything a host needs to draw the popover.
#[derive(Debug, Clone, PartialEq)]
pub struct PopoverView {
    pub comment: String,
    pub anchor: AnchorPosition,
}

impl PopoverView {
    pub const PLACEHOLDER: &'static str = "Add your annotation...";
}

/// The host's rendering layer for the popover.
///
/// The coordinator owns the surface and guarantees `unmount` is called for
/// every handle `mount` returned.
pub trait Surface {
    type Handle;

    fn mount(&mut self, view: &PopoverView) -> Self::Handle;

    /// Called after every edit to the draft comment.
    fn update(&mut self, handle: &Self::Handle, view: &PopoverView) {
        let _ = (handle, view);
    }

    fn unmount(&mut self, handle: Self::Handle);

    /// On-screen anchor for the rendered region covering `from..to`, or
    /// `None` if that region has no element yet.
    fn locate(&self, from: usize, to: usize) -> Option<AnchorPosition>;
}

pub type SaveCallback<C> = Box<dyn FnOnce(&mut C, SaveAction)>;
pub type CloseCallback<C> = Box<dyn FnOnce(&mut C)>;

/// Arguments for [`PopoverCoordinator::open`](super::PopoverCoordinator::open).
pub struct PopoverRequest<C> {
    pub initial_comment: String,
    pub anchor: AnchorPosition,
    pub on_save: SaveCallback<C>,
    pub on_close: CloseCallback<C>,
}

impl<C> PopoverRequest<C> {
    pub fn new(
        initial_comment: impl Into<String>,
        anchor: AnchorPosition,
        on_save: impl FnOnce(&mut C, SaveAction) + 'static,
        on_close: impl FnOnce(&mut C) + 'static,
    ) -> Self {
        Self {
            initial_comment: initial_comment.into(),
            anchor,
            on_save: Box::new(on_save),
            on_close: Box::new(on_close),
        }
    }
}

/// The one live popover.
pub(crate) struct Session<H, C> {
    pub(crate) handle: H,
    pub(crate) view: PopoverView,
    pub(crate) on_save: SaveCallback<C>,
    pub(crate) on_close: CloseCallback<C>,
}
