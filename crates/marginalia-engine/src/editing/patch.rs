use xi_rope::delta::DeltaElement;
use xi_rope::{Delta, RopeInfo};

use crate::editing::Effect;

/// Result of dispatching a transaction
pub struct Patch {
    /// Whether the text differs from before the transaction.
    pub text_changed: bool,
    pub new_selection: std::ops::Range<usize>,
    pub version: u64,
    /// The applied change mapping. Leaves every offset in place when only the
    /// selection moved.
    pub delta: Delta<RopeInfo>,
    pub effects: Vec<Effect>,
}

impl Patch {
    /// True if the transaction changed the document text.
    pub fn doc_changed(&self) -> bool {
        self.text_changed
    }
}

/// Whether applying `delta` inserts or deletes anything.
///
/// `Delta::is_identity` is not enough here: a delta built over an empty
/// base has no elements and still reports itself as a change.
pub(crate) fn alters_text(delta: &Delta<RopeInfo>) -> bool {
    let mut copied = 0;
    for el in &delta.els {
        match el {
            DeltaElement::Copy(from, to) => copied += to - from,
            DeltaElement::Insert(inserted) => {
                if inserted.len() > 0 {
                    return true;
                }
            }
        }
    }
    copied != delta.base_len
}
