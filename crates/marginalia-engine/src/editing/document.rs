use xi_rope::Rope;
use xi_rope::delta::Builder;

use crate::editing::patch::alters_text;
use crate::editing::{Cmd, Patch};

/// Side-channel requests that ride along with a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open the comment popover for the region overlapping `from..to` once
    /// regions have been recomputed and rendered.
    ShowPopover { from: usize, to: usize },
}

/// One atomic update: an optional text change, an optional explicit
/// selection, and any effects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    pub changes: Option<Cmd>,
    pub selection: Option<std::ops::Range<usize>>,
    pub effects: Vec<Effect>,
}

impl Transaction {
    pub fn edit(cmd: Cmd) -> Self {
        Self {
            changes: Some(cmd),
            ..Self::default()
        }
    }

    pub fn select(range: std::ops::Range<usize>) -> Self {
        Self {
            selection: Some(range),
            ..Self::default()
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// The document being annotated.
///
/// The xi-rope buffer is the single source of truth: highlight markup lives
/// in the text itself, and everything the engine shows is derived from it.
///
/// ```rust
/// # use marginalia_engine::editing::{Document, Cmd};
/// let mut doc = Document::from_bytes(b"Hello world").unwrap();
/// doc.apply(Cmd::ReplaceRange { range: 6..11, text: "==world==".to_string() });
/// assert_eq!(doc.text(), "Hello ==world==");
/// ```
#[derive(Clone)]
pub struct Document {
    /// xi-rope buffer containing the entire document as UTF-8
    pub(crate) buffer: Rope,
    /// Current selection as byte offsets in buffer
    pub(crate) selection: std::ops::Range<usize>,
    /// Version counter incremented on each text change
    pub(crate) version: u64,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        let buffer = Rope::from(text);
        let len = buffer.len();
        Self {
            buffer,
            selection: len..len, // Start with cursor at end
            version: 0,
        }
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    /// Apply a text command with no effects.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        self.dispatch(Transaction::edit(cmd))
    }

    /// Apply a transaction.
    ///
    /// The returned `Patch` carries the delta that was applied (identity for
    /// selection-only transactions) so derived views can either rebuild or
    /// remap themselves.
    pub fn dispatch(&mut self, tx: Transaction) -> Patch {
        let delta = match &tx.changes {
            Some(cmd) => crate::editing::commands::compile_command(self, cmd),
            None => Builder::new(self.len()).build(),
        };
        let text_changed = tx.changes.is_some() && alters_text(&delta);

        self.buffer = delta.apply(&self.buffer);

        let mapped = match &tx.changes {
            Some(cmd) => {
                crate::editing::commands::transform_selection_for_command(&self.selection, cmd)
            }
            None => self.selection.clone(),
        };
        let new_selection = self.clamp(tx.selection.unwrap_or(mapped));
        self.selection = new_selection.clone();

        if text_changed {
            self.version += 1;
        }

        Patch {
            text_changed,
            new_selection,
            version: self.version,
            delta,
            effects: tx.effects,
        }
    }

    /// Get the current selection range
    pub fn selection(&self) -> std::ops::Range<usize> {
        self.selection.clone()
    }

    /// Set the selection range
    pub fn set_selection(&mut self, selection: std::ops::Range<usize>) {
        self.selection = self.clamp(selection);
    }

    /// Get the current version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get the current text content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.buffer
    }

    /// Get the buffer length
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Slice the buffer to a cow string
    pub fn slice_to_cow(&self, range: std::ops::Range<usize>) -> std::borrow::Cow<'_, str> {
        self.buffer.slice_to_cow(self.clamp(range))
    }

    /// Byte range of the line containing `offset`, without its newline.
    pub fn line_range(&self, offset: usize) -> std::ops::Range<usize> {
        let offset = offset.min(self.len());
        let before = self.slice_to_cow(0..offset);
        let start = before.rfind('\n').map_or(0, |pos| pos + 1);
        let after = self.slice_to_cow(offset..self.len());
        let end = after.find('\n').map_or(self.len(), |pos| offset + pos);
        start..end
    }

    /// Whether `offset` lies between two characters. Offsets at or past the
    /// end count, since ranges are clamped to the document first.
    pub fn is_char_boundary(&self, offset: usize) -> bool {
        offset >= self.len() || self.text().is_char_boundary(offset)
    }

    pub(crate) fn clamp(&self, range: std::ops::Range<usize>) -> std::ops::Range<usize> {
        let doc_len = self.buffer.len();
        let start = range.start.min(doc_len);
        let end = range.end.min(doc_len).max(start);
        start..end
    }
}
