//! Wires the document, the highlight field and the popover together.
//!
//! Hosts drive an [`Editor`] with selections, clicks and popover events, and
//! call [`Editor::run_deferred`] after each render pass.

use crate::editing::color_tag::ColorTag;
use crate::editing::mutations;
use crate::editing::{AnnotationError, Document, Effect, Patch, Transaction};
use crate::popover::{
    PopoverCoordinator, PopoverEvent, PopoverRequest, PopoverResponse, SaveAction, Surface,
};
use crate::render::{Deferred, HighlightField, Region, RegionSet};

/// Receives the transient notice for each rejected operation.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

impl<F: FnMut(&str)> Notifier for F {
    fn notify(&mut self, message: &str) {
        self(message)
    }
}

/// Editor behaviour the host's settings control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    /// Grow selections to whole words before highlighting.
    pub expand_selection: bool,
    /// Color names a comment may be tagged with.
    pub colors: Vec<String>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            expand_selection: true,
            colors: Vec::new(),
        }
    }
}

/// Everything popover callbacks may touch.
pub struct EditorState {
    document: Document,
    field: HighlightField,
    notifier: Box<dyn Notifier>,
}

impl EditorState {
    fn new(document: Document, notifier: Box<dyn Notifier>) -> Self {
        let field = HighlightField::new(document.rope());
        Self {
            document,
            field,
            notifier,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn regions(&self) -> &RegionSet {
        self.field.regions()
    }

    /// Applies a transaction and brings the regions up to date.
    pub fn dispatch(&mut self, tx: Transaction) -> Patch {
        let patch = self.document.dispatch(tx);
        self.field.update(&patch, self.document.rope());
        patch
    }

    /// Sets the comment on `target`. The comment is validated first, then
    /// `target` must still match a current region.
    pub fn update_comment(&mut self, target: &Region, comment: &str) -> Result<(), AnnotationError> {
        let edit = mutations::update_comment(target, comment)
            .and_then(|edit| self.ensure_current(target).map(|()| edit))
            .map_err(|err| self.reject(err))?;
        log::info!("set comment on highlight at {}..{}", target.from, target.to);
        self.dispatch(Transaction::edit(edit.into()));
        Ok(())
    }

    pub fn remove_highlight(&mut self, target: &Region) -> Result<(), AnnotationError> {
        self.ensure_current(target).map_err(|err| self.reject(err))?;
        let edit = mutations::remove_highlight(target);
        log::info!("removed highlight at {}..{}", target.from, target.to);
        self.dispatch(Transaction::edit(edit.into()));
        Ok(())
    }

    /// Regions captured before the text changed may no longer describe it.
    fn ensure_current(&self, target: &Region) -> Result<(), AnnotationError> {
        if self.regions().iter().any(|r| r == target) {
            Ok(())
        } else {
            log::warn!(
                "highlight at {}..{} no longer matches the document",
                target.from,
                target.to
            );
            Err(AnnotationError::StaleHighlight)
        }
    }

    fn reject(&mut self, err: AnnotationError) -> AnnotationError {
        log::warn!("rejected: {err}");
        self.notifier.notify(&err.to_string());
        err
    }
}

/// A document with live highlight regions and a single comment popover.
pub struct Editor<S: Surface> {
    state: EditorState,
    popover: PopoverCoordinator<S, EditorState>,
    settings: EditorSettings,
}

impl<S: Surface> Editor<S> {
    pub fn new(document: Document, surface: S, notifier: impl Notifier + 'static) -> Self {
        Self {
            state: EditorState::new(document, Box::new(notifier)),
            popover: PopoverCoordinator::new(surface),
            settings: EditorSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: EditorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn document(&self) -> &Document {
        self.state.document()
    }

    pub fn text(&self) -> String {
        self.state.document.text()
    }

    pub fn regions(&self) -> &RegionSet {
        self.state.regions()
    }

    pub fn popover(&self) -> &PopoverCoordinator<S, EditorState> {
        &self.popover
    }

    pub fn set_selection(&mut self, range: std::ops::Range<usize>) -> Patch {
        self.state.dispatch(Transaction::select(range))
    }

    pub fn dispatch(&mut self, tx: Transaction) -> Patch {
        self.state.dispatch(tx)
    }

    /// Wraps the current selection in highlight markup and queues a popover
    /// for the new highlight.
    pub fn create_highlight(&mut self) -> Result<(), AnnotationError> {
        let selection = self.state.document.selection();
        let created = mutations::create_highlight(
            &self.state.document,
            selection,
            self.settings.expand_selection,
        );
        match created {
            Ok(created) => {
                log::info!(
                    "highlighted {}..{}",
                    created.edit.range.start,
                    created.edit.range.end
                );
                let tx = Transaction::edit(created.edit.into()).with_effect(Effect::ShowPopover {
                    from: created.popover.start,
                    to: created.popover.end,
                });
                self.state.dispatch(tx);
                Ok(())
            }
            Err(err) => Err(self.state.reject(err)),
        }
    }

    pub fn update_comment(&mut self, target: &Region, comment: &str) -> Result<(), AnnotationError> {
        self.state.update_comment(target, comment)
    }

    pub fn remove_highlight(&mut self, target: &Region) -> Result<(), AnnotationError> {
        self.state.remove_highlight(target)
    }

    /// The color tag on a region's comment, if it names a configured color.
    pub fn color_of<'a>(&self, region: &'a Region) -> Option<&'a str> {
        let comment = region.comment.as_deref()?;
        ColorTag::split(comment, &self.settings.colors).1
    }

    /// Click dispatch: opens the popover on the region under `offset`.
    pub fn click(&mut self, offset: usize) -> bool {
        match self.regions().at(offset).cloned() {
            Some(region) => self.open_popover(region),
            None => false,
        }
    }

    pub fn popover_event(&mut self, event: PopoverEvent) -> PopoverResponse {
        let response = self.popover.handle(&mut self.state, event);
        if let PopoverResponse::Rejected(err) = &response {
            self.state.reject(err.clone());
        }
        response
    }

    /// Runs work queued by earlier transactions. Call after the host has
    /// rendered the current regions. Returns how many popovers were opened.
    pub fn run_deferred(&mut self) -> usize {
        let mut opened = 0;
        for task in self.state.field.take_deferred() {
            match task {
                Deferred::ShowPopover { from, to } => {
                    let region = self.regions().between(from, to).next().cloned();
                    match region {
                        Some(region) => {
                            if self.open_popover(region) {
                                opened += 1;
                            }
                        }
                        None => log::debug!("no highlight at {from}..{to}, popover skipped"),
                    }
                }
            }
        }
        opened
    }

    /// Closes any open popover. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.popover.teardown();
    }

    fn open_popover(&mut self, region: Region) -> bool {
        let Some(anchor) = self.popover.surface().locate(region.from, region.to) else {
            log::debug!("highlight at {}..{} is not rendered", region.from, region.to);
            return false;
        };
        let initial = region.comment.clone().unwrap_or_default();
        self.popover.open(PopoverRequest::new(
            initial,
            anchor,
            move |state: &mut EditorState, action| {
                // Failures have already gone through the notifier.
                let _ = match action {
                    SaveAction::Comment(comment) => state.update_comment(&region, &comment),
                    SaveAction::Remove => state.remove_highlight(&region),
                };
            },
            |_: &mut EditorState| {},
        ));
        true
    }
}
