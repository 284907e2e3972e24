use std::collections::VecDeque;

use xi_rope::Rope;

use crate::editing::{Effect, Patch};
use crate::parsing::parse_rope;
use crate::render::decorations::{RegionSet, project};

/// Whether the regions currently reflect the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Stable,
    Recomputing,
}

/// Work to run after the host has rendered the current regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Open the popover on whichever region overlaps `from..to` at run time.
    ShowPopover { from: usize, to: usize },
}

/// Keeps the region set in step with the document.
///
/// A text change rebuilds every region from a fresh parse. Anything else
/// (selection moves, effect-only transactions) just remaps the existing
/// regions through the transaction's delta.
pub struct HighlightField {
    regions: RegionSet,
    state: FieldState,
    deferred: VecDeque<Deferred>,
}

impl HighlightField {
    pub fn new(rope: &Rope) -> Self {
        Self {
            regions: project(&parse_rope(rope)),
            state: FieldState::Stable,
            deferred: VecDeque::new(),
        }
    }

    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    /// The field's state between calls, which is always `Stable`.
    ///
    /// `update` runs synchronously, so `Recomputing` only exists while it
    /// rebuilds the regions. It is bookkeeping only.
    pub fn state(&self) -> FieldState {
        self.state
    }

    /// Brings the regions up to date with `rope`, the document after `patch`
    /// was applied, and queues any effects the patch carried.
    pub fn update(&mut self, patch: &Patch, rope: &Rope) {
        if patch.doc_changed() {
            self.state = FieldState::Recomputing;
            let fresh = project(&parse_rope(rope));
            log::debug!(
                "recomputed {} highlight regions ({} unchanged) at version {}",
                fresh.len(),
                fresh.reused_from(&self.regions),
                patch.version
            );
            self.regions = fresh;
            self.state = FieldState::Stable;
        } else {
            self.regions.map(&patch.delta);
        }

        for effect in &patch.effects {
            match effect {
                Effect::ShowPopover { from, to } => {
                    self.deferred.push_back(Deferred::ShowPopover {
                        from: *from,
                        to: *to,
                    });
                }
            }
        }
    }

    /// Hands over queued work. Call once the current render pass is done.
    pub fn take_deferred(&mut self) -> Vec<Deferred> {
        self.deferred.drain(..).collect()
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Cmd, Document, Transaction};

    #[test]
    fn starts_stable_with_parsed_regions() {
        let doc = Document::from_text("==a== ==b==<!--c-->");
        let field = HighlightField::new(doc.rope());
        assert_eq!(field.state(), FieldState::Stable);
        assert_eq!(field.regions().len(), 2);
    }

    #[test]
    fn text_change_recomputes() {
        let mut doc = Document::from_text("plain words");
        let mut field = HighlightField::new(doc.rope());
        assert!(field.regions().is_empty());

        let patch = doc.apply(Cmd::ReplaceRange {
            range: 6..11,
            text: "==words==".to_string(),
        });
        field.update(&patch, doc.rope());

        assert_eq!(field.state(), FieldState::Stable);
        let r = field.regions().iter().next().unwrap();
        assert_eq!((r.from, r.to, r.text.as_str()), (6, 15, "words"));
    }

    #[test]
    fn edit_that_breaks_markup_drops_region() {
        let mut doc = Document::from_text("==a==");
        let mut field = HighlightField::new(doc.rope());
        let patch = doc.apply(Cmd::DeleteRange { range: 4..5 });
        field.update(&patch, doc.rope());
        assert!(field.regions().is_empty());
    }

    #[test]
    fn selection_change_keeps_regions() {
        let mut doc = Document::from_text("x ==a==");
        let mut field = HighlightField::new(doc.rope());
        let before = field.regions().clone();

        let patch = doc.dispatch(Transaction::select(0..1));
        field.update(&patch, doc.rope());

        assert_eq!(field.regions(), &before);
    }

    #[test]
    fn selection_change_on_empty_document_stays_stable() {
        let mut doc = Document::from_text("");
        let mut field = HighlightField::new(doc.rope());

        let patch = doc.dispatch(Transaction::select(0..0));
        assert!(!patch.doc_changed());
        field.update(&patch, doc.rope());

        assert_eq!(field.state(), FieldState::Stable);
        assert!(field.regions().is_empty());
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn show_popover_effect_is_deferred() {
        let mut doc = Document::from_text("Hello world");
        let mut field = HighlightField::new(doc.rope());
        let tx = Transaction::edit(Cmd::ReplaceRange {
            range: 6..11,
            text: "==world==".to_string(),
        })
        .with_effect(Effect::ShowPopover { from: 6, to: 15 });

        let patch = doc.dispatch(tx);
        field.update(&patch, doc.rope());

        assert!(field.has_deferred());
        assert_eq!(
            field.take_deferred(),
            vec![Deferred::ShowPopover { from: 6, to: 15 }]
        );
        assert!(!field.has_deferred());
    }
}
