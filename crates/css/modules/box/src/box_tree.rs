//! Arena-backed layout tree.
//!
//! Nodes live in an `indextree` arena and are addressed by [`BoxId`]. Layout
//! algorithms borrow the tree mutably for the whole pass and write geometry
//! back into [`LayoutBox`] fields.

use anyhow::{Result, anyhow};
use css_orchestrator::style_model::{ComputedStyle, Edges, Float};
use indextree::{Arena, Node, NodeId};
use smallvec::SmallVec;

use crate::LayoutUnit;

/// Handle of a node in a [`BoxTree`].
pub type BoxId = NodeId;

/// Child list as returned by [`BoxTree::children`].
pub type ChildList = SmallVec<BoxId, 8>;

/// Formatting algorithm that lays out a box's contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxKind {
    #[default]
    Block,
    Table,
    Flex,
    Grid,
}

/// A margin after resolution; `auto` survives until a layout algorithm consumes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarginEdge {
    Auto,
    Fixed(LayoutUnit),
}

impl Default for MarginEdge {
    #[inline]
    fn default() -> Self {
        Self::Fixed(LayoutUnit::ZERO)
    }
}

impl MarginEdge {
    #[inline]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The margin length, treating `auto` as zero.
    #[inline]
    pub const fn non_auto(self) -> LayoutUnit {
        match self {
            Self::Auto => LayoutUnit::ZERO,
            Self::Fixed(length) => length,
        }
    }
}

/// One node of the layout tree.
///
/// `x`/`y` locate the padding edge relative to the parent's padding edge.
/// `width`/`height` are content-box sizes; `None` means auto or not yet known.
/// `min_content_width`/`max_content_width` are margin-box intrinsic widths
/// produced by the intrinsic sizing pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutBox {
    pub kind: BoxKind,
    pub style: Option<ComputedStyle>,
    pub x: LayoutUnit,
    pub y: LayoutUnit,
    pub width: Option<LayoutUnit>,
    pub height: Option<LayoutUnit>,
    pub margin: Edges<MarginEdge>,
    pub padding: Edges<LayoutUnit>,
    pub border: Edges<LayoutUnit>,
    pub min_content_width: LayoutUnit,
    pub max_content_width: LayoutUnit,
}

impl LayoutBox {
    #[inline]
    pub fn new(kind: BoxKind, style: ComputedStyle) -> Self {
        Self {
            kind,
            style: Some(style),
            ..Self::default()
        }
    }

    /// Set both intrinsic widths.
    #[inline]
    #[must_use]
    pub const fn with_intrinsic_widths(mut self, min: LayoutUnit, max: LayoutUnit) -> Self {
        self.min_content_width = min;
        self.max_content_width = max;
        self
    }

    /// Padding, border and non-auto margins on the left and right.
    #[inline]
    pub fn delta_outer_width(&self) -> LayoutUnit {
        self.padding.left
            + self.padding.right
            + self.border.left
            + self.border.right
            + self.margin.left.non_auto()
            + self.margin.right.non_auto()
    }

    /// Padding, border and non-auto margins on the top and bottom.
    #[inline]
    pub fn delta_outer_height(&self) -> LayoutUnit {
        self.padding.top
            + self.padding.bottom
            + self.border.top
            + self.border.bottom
            + self.margin.top.non_auto()
            + self.margin.bottom.non_auto()
    }

    #[inline]
    pub fn is_out_of_flow(&self) -> bool {
        self.style
            .is_some_and(|style| style.position.is_out_of_flow())
    }

    #[inline]
    pub fn is_floated(&self) -> bool {
        self.style.is_some_and(|style| style.float != Float::None)
    }
}

/// Owning arena of [`LayoutBox`] nodes.
#[derive(Debug, Default)]
pub struct BoxTree {
    arena: Arena<LayoutBox>,
}

impl BoxTree {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached node, typically the root.
    #[inline]
    pub fn create(&mut self, layout_box: LayoutBox) -> BoxId {
        self.arena.new_node(layout_box)
    }

    /// Add `layout_box` as the last child of `parent`.
    ///
    /// # Errors
    /// Returns an error if `parent` was removed from the arena.
    pub fn append(&mut self, parent: BoxId, layout_box: LayoutBox) -> Result<BoxId> {
        let child = self.arena.new_node(layout_box);
        parent.checked_append(child, &mut self.arena)?;
        Ok(child)
    }

    /// # Errors
    /// Returns an error if `id` is not a live node of this tree.
    #[inline]
    pub fn get(&self, id: BoxId) -> Result<&LayoutBox> {
        self.arena
            .get(id)
            .filter(|node| !node.is_removed())
            .map(Node::get)
            .ok_or_else(|| anyhow!("layout box {id:?} is not in the tree"))
    }

    /// # Errors
    /// Returns an error if `id` is not a live node of this tree.
    #[inline]
    pub fn get_mut(&mut self, id: BoxId) -> Result<&mut LayoutBox> {
        self.arena
            .get_mut(id)
            .filter(|node| !node.is_removed())
            .map(Node::get_mut)
            .ok_or_else(|| anyhow!("layout box {id:?} is not in the tree"))
    }

    /// Children of `id` in document order.
    #[inline]
    pub fn children(&self, id: BoxId) -> ChildList {
        id.children(&self.arena).collect()
    }
}
