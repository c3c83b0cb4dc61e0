//! Flex Containers: per-container layout state.
//! CSS Flexbox §3: <https://www.w3.org/TR/css-flexbox-1/#flex-containers>

use css_box::{BoxId, LayoutUnit, resolve_length};
use css_orchestrator::style_model::{
    AlignContent, AlignItems, ComputedStyle, FlexWrap, JustifyContent,
};

use crate::chapter4::FlexItem;
use crate::chapter5::Axes;
use crate::chapter6::FlexLine;

/// State of one flex container layout.
///
/// Created for a single [`crate::layout_flex`] call and dropped when it
/// returns. `items` is sorted by `order` before any line is built, so every
/// line is a contiguous slice of it.
#[derive(Clone, Debug)]
pub struct FlexContext {
    pub container: BoxId,
    pub axes: Axes,
    pub wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
    /// Gap between items on a line.
    pub main_gap: LayoutUnit,
    /// Gap between lines.
    pub cross_gap: LayoutUnit,
    /// `None` while the axis is indefinite.
    pub available_main: Option<LayoutUnit>,
    pub available_cross: Option<LayoutUnit>,
    /// Longest line, gaps included.
    pub main_size: LayoutUnit,
    /// All lines plus the gaps between them.
    pub cross_size: LayoutUnit,
    pub items: Vec<FlexItem>,
    pub lines: Vec<FlexLine>,
    /// An item's percentage `flex-basis` met an indefinite column height.
    pub needs_two_pass: bool,
}

impl FlexContext {
    pub fn new(container: BoxId, style: &ComputedStyle) -> Self {
        Self {
            container,
            axes: Axes::from_direction(style.flex_direction),
            wrap: style.flex_wrap,
            justify_content: style.justify_content,
            align_items: style.align_items,
            align_content: style.align_content,
            main_gap: LayoutUnit::ZERO,
            cross_gap: LayoutUnit::ZERO,
            available_main: None,
            available_cross: None,
            main_size: LayoutUnit::ZERO,
            cross_size: LayoutUnit::ZERO,
            items: Vec::new(),
            lines: Vec::new(),
            needs_two_pass: false,
        }
    }

    /// Resolve `column-gap` against the content width and `row-gap` against
    /// the content height, then map them onto the flex axes.
    ///
    /// CSS Box Alignment §8: <https://www.w3.org/TR/css-align-3/#gaps>
    pub fn resolve_gaps(&mut self, style: &ComputedStyle, width: LayoutUnit, height: Option<LayoutUnit>) {
        let column_gap = style
            .column_gap
            .and_then(|gap| resolve_length(gap, Some(width)))
            .unwrap_or(LayoutUnit::ZERO)
            .non_negative();
        let row_gap = style
            .row_gap
            .and_then(|gap| resolve_length(gap, height))
            .unwrap_or(LayoutUnit::ZERO)
            .non_negative();
        (self.main_gap, self.cross_gap) = if self.axes.horizontal {
            (column_gap, row_gap)
        } else {
            (row_gap, column_gap)
        };
    }

    /// Container content height when it is definite.
    #[inline]
    pub const fn definite_height(&self) -> Option<LayoutUnit> {
        if self.axes.horizontal {
            self.available_cross
        } else {
            self.available_main
        }
    }
}
