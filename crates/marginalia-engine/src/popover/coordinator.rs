use crate::editing::AnnotationError;
use crate::parsing::Annotation;

use super::session::{PopoverEvent, PopoverRequest, PopoverView, SaveAction, Session, Surface};

/// Outcome of routing one event to the popover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopoverResponse {
    /// No popover is open.
    Ignored,
    /// The draft changed (or was left alone); the popover stays open.
    Editing,
    /// Submission refused; the popover stays open.
    Rejected(AnnotationError),
    /// `on_save` ran and the popover is gone.
    Saved,
    /// `on_close` ran and the popover is gone.
    Closed,
}

/// Owns the single comment popover.
///
/// Opening while another popover is live tears the old one down first, so a
/// surface never holds two mounted popovers. `C` is the context handed to the
/// save and close callbacks.
pub struct PopoverCoordinator<S: Surface, C> {
    surface: S,
    session: Option<Session<S::Handle, C>>,
}

impl<S: Surface, C> PopoverCoordinator<S, C> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            session: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The open popover's view, including the draft comment.
    pub fn view(&self) -> Option<&PopoverView> {
        self.session.as_ref().map(|s| &s.view)
    }

    /// Opens a popover, replacing any that is already open.
    ///
    /// The replaced popover's callbacks are dropped without being called.
    pub fn open(&mut self, request: PopoverRequest<C>) {
        if self.teardown() {
            log::debug!("replaced open popover");
        }

        let view = PopoverView {
            comment: request.initial_comment,
            anchor: request.anchor,
        };
        let handle = self.surface.mount(&view);
        self.session = Some(Session {
            handle,
            view,
            on_save: request.on_save,
            on_close: request.on_close,
        });
    }

    /// Routes one event to the open popover.
    pub fn handle(&mut self, ctx: &mut C, event: PopoverEvent) -> PopoverResponse {
        let Some(session) = self.session.as_mut() else {
            return PopoverResponse::Ignored;
        };

        match event {
            PopoverEvent::Input(c) => {
                session.view.comment.push(c);
                self.surface.update(&session.handle, &session.view);
                PopoverResponse::Editing
            }
            PopoverEvent::Backspace => {
                if session.view.comment.pop().is_some() {
                    self.surface.update(&session.handle, &session.view);
                }
                PopoverResponse::Editing
            }
            PopoverEvent::Enter { shift: true } => {
                session.view.comment.push('\n');
                self.surface.update(&session.handle, &session.view);
                PopoverResponse::Editing
            }
            PopoverEvent::Enter { shift: false } | PopoverEvent::SaveClicked => {
                if !Annotation::is_valid_comment(&session.view.comment) {
                    return PopoverResponse::Rejected(AnnotationError::InvalidComment);
                }
                let comment = session.view.comment.clone();
                self.finish_with_save(ctx, SaveAction::Comment(comment));
                PopoverResponse::Saved
            }
            PopoverEvent::RemoveClicked => {
                self.finish_with_save(ctx, SaveAction::Remove);
                PopoverResponse::Saved
            }
            PopoverEvent::Escape | PopoverEvent::OutsideClick | PopoverEvent::CloseClicked => {
                if let Some(session) = self.session.take() {
                    (session.on_close)(ctx);
                    self.surface.unmount(session.handle);
                }
                PopoverResponse::Closed
            }
        }
    }

    /// Closes any open popover without calling its callbacks. Safe to call
    /// repeatedly; returns whether anything was open.
    pub fn teardown(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                self.surface.unmount(session.handle);
                true
            }
            None => false,
        }
    }

    fn finish_with_save(&mut self, ctx: &mut C, action: SaveAction) {
        if let Some(session) = self.session.take() {
            (session.on_save)(ctx, action);
            self.surface.unmount(session.handle);
        }
    }
}

impl<S: Surface, C> Drop for PopoverCoordinator<S, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
