use alloc::string::String;
use alloc::vec::Vec;

/// One rendered item, to be placed absolutely at `offset` inside the scroll region.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Positioned<N> {
    pub key: String,
    pub index: usize,
    pub offset: f64,
    pub height: f64,
    pub node: N,
}

impl<N> Positioned<N> {
    pub fn end(&self) -> f64 {
        self.offset + self.height
    }
}

/// The scrollable region of a frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region<N> {
    /// Size of the viewport along the scroll axis.
    pub container_extent: f64,
    /// Size of the invisible spacer, as if every item were rendered.
    pub total_extent: f64,
    pub scroll_offset: f64,
    /// Items in the materialized range, in index order.
    pub items: Vec<Positioned<N>>,
    /// Loading content, placed after the items. Not part of `total_extent`.
    pub loading: Option<N>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Body<N> {
    /// The list is empty and not loading; the caller's empty-state content replaces the region.
    Empty(N),
    Region(Region<N>),
}

/// Everything a host needs to draw the list for the current state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame<N> {
    /// Rendered before the scroll region; never virtualized.
    pub header: Option<N>,
    pub body: Body<N>,
    /// Rendered after the scroll region; never virtualized.
    pub footer: Option<N>,
}

impl<N> Frame<N> {
    pub fn region(&self) -> Option<&Region<N>> {
        match &self.body {
            Body::Region(region) => Some(region),
            Body::Empty(_) => None,
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self.body, Body::Empty(_))
    }

    /// The positioned items, or an empty slice for the empty state.
    pub fn items(&self) -> &[Positioned<N>] {
        match self.region() {
            Some(region) => &region.items,
            None => &[],
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items().iter().map(|p| p.key.as_str())
    }
}
