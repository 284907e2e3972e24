use serde::Serialize;
use xi_rope::delta::Transformer;
use xi_rope::{Delta, RopeInfo};

use crate::editing::mutations::HighlightTarget;
use crate::parsing::{HighlightMatch, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegionKind {
    Highlight,
    Annotated,
}

/// A clickable replacement for one highlight's raw markup.
///
/// Plain data only. Click handling is dispatched by offset through
/// [`RegionSet::at`], so a region never holds behaviour of its own. Equality
/// is structural, which lets a renderer keep elements whose region did not
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub kind: RegionKind,
    pub from: usize,
    pub to: usize,
    /// Clean text shown in place of the markup.
    pub text: String,
    pub comment: Option<String>,
}

impl Region {
    pub fn from_match(m: &HighlightMatch) -> Self {
        Self {
            kind: if m.has_annotation() {
                RegionKind::Annotated
            } else {
                RegionKind::Highlight
            },
            from: m.from,
            to: m.to,
            text: m.highlight_text.clone(),
            comment: m.comment.clone(),
        }
    }

    pub fn has_annotation(&self) -> bool {
        self.kind == RegionKind::Annotated
    }

    /// CSS classes for the rendered element.
    pub fn class_name(&self) -> &'static str {
        match self.kind {
            RegionKind::Highlight => "marginalia-highlight",
            RegionKind::Annotated => "marginalia-highlight annotated",
        }
    }

    /// Hover text: the comment, if any.
    pub fn tooltip(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }
}

impl HighlightTarget for Region {
    fn span(&self) -> Span {
        Span::new(self.from, self.to)
    }

    fn highlight_text(&self) -> &str {
        &self.text
    }
}

/// All regions for one document, sorted by position and non-overlapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSet {
    regions: Vec<Region>,
}

/// Projects parsed matches into regions.
pub fn project(matches: &[HighlightMatch]) -> RegionSet {
    let mut regions: Vec<Region> = matches.iter().map(Region::from_match).collect();
    regions.sort_by_key(|r| (r.from, r.to));
    RegionSet { regions }
}

impl RegionSet {
    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The region under `offset`, for click dispatch.
    pub fn at(&self, offset: usize) -> Option<&Region> {
        self.regions
            .iter()
            .find(|r| Span::new(r.from, r.to).contains(offset))
    }

    /// Regions overlapping `from..to`, in order.
    pub fn between(&self, from: usize, to: usize) -> impl Iterator<Item = &Region> {
        let query = Span::new(from, to);
        self.regions
            .iter()
            .filter(move |r| Span::new(r.from, r.to).overlaps(query))
    }

    /// Remaps every region through an edit's change mapping.
    ///
    /// Starts stick after insertions at the boundary and ends stick before,
    /// so text typed at either edge stays outside the region. Regions that
    /// collapse are dropped.
    pub fn map(&mut self, delta: &Delta<RopeInfo>) {
        if delta.is_identity() {
            return;
        }
        let mut transformer = Transformer::new(delta);
        for region in &mut self.regions {
            region.from = transformer.transform(region.from, true);
            region.to = transformer.transform(region.to, false);
        }
        self.regions.retain(|r| r.from < r.to);
    }

    /// Number of regions in `self` that also appear, unchanged, in `previous`.
    pub fn reused_from(&self, previous: &RegionSet) -> usize {
        self.regions
            .iter()
            .filter(|r| previous.regions.contains(r))
            .count()
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
