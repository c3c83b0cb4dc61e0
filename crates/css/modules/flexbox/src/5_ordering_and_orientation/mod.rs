//! Ordering and Orientation: axes from `flex-direction`, `order` sorting.
//! CSS Flexbox §5: <https://www.w3.org/TR/css-flexbox-1/#flow-order>

use css_box::{LayoutBox, LayoutUnit};
use css_orchestrator::style_model::{FlexDirection, Side};

use crate::chapter4::FlexItem;

/// Main/cross axis orientation of a flex container.
///
/// Only horizontal writing modes are supported, so a row container has a
/// horizontal main axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Axes {
    /// Main axis is horizontal (`row`, `row-reverse`).
    pub horizontal: bool,
    /// Items are placed from the main-end edge (`*-reverse`).
    pub main_reversed: bool,
}

impl Axes {
    #[inline]
    pub const fn from_direction(direction: FlexDirection) -> Self {
        match direction {
            FlexDirection::Row => Self {
                horizontal: true,
                main_reversed: false,
            },
            FlexDirection::RowReverse => Self {
                horizontal: true,
                main_reversed: true,
            },
            FlexDirection::Column => Self {
                horizontal: false,
                main_reversed: false,
            },
            FlexDirection::ColumnReverse => Self {
                horizontal: false,
                main_reversed: true,
            },
        }
    }

    /// Physical side at the start of the main axis, ignoring reversal.
    #[inline]
    pub const fn main_start(self) -> Side {
        if self.horizontal { Side::Left } else { Side::Top }
    }

    #[inline]
    pub const fn main_end(self) -> Side {
        self.main_start().opposite()
    }

    #[inline]
    pub const fn cross_start(self) -> Side {
        if self.horizontal { Side::Top } else { Side::Left }
    }

    #[inline]
    pub const fn cross_end(self) -> Side {
        self.cross_start().opposite()
    }

    #[inline]
    pub const fn main_size(self, node: &LayoutBox) -> Option<LayoutUnit> {
        if self.horizontal { node.width } else { node.height }
    }

    #[inline]
    pub const fn cross_size(self, node: &LayoutBox) -> Option<LayoutUnit> {
        if self.horizontal { node.height } else { node.width }
    }

    #[inline]
    pub const fn set_cross_size(self, node: &mut LayoutBox, size: LayoutUnit) {
        if self.horizontal {
            node.height = Some(size);
        } else {
            node.width = Some(size);
        }
    }

    #[inline]
    pub const fn set_main_position(self, node: &mut LayoutBox, position: LayoutUnit) {
        if self.horizontal {
            node.x = position;
        } else {
            node.y = position;
        }
    }

    #[inline]
    pub const fn set_cross_position(self, node: &mut LayoutBox, position: LayoutUnit) {
        if self.horizontal {
            node.y = position;
        } else {
            node.x = position;
        }
    }

    /// Padding, border and non-auto margins along the main axis.
    #[inline]
    pub fn delta_outer_main(self, node: &LayoutBox) -> LayoutUnit {
        if self.horizontal {
            node.delta_outer_width()
        } else {
            node.delta_outer_height()
        }
    }

    #[inline]
    pub fn delta_outer_cross(self, node: &LayoutBox) -> LayoutUnit {
        if self.horizontal {
            node.delta_outer_height()
        } else {
            node.delta_outer_width()
        }
    }
}

/// Stable sort by `order`, ties broken by document position.
/// CSS Flexbox §5.4: <https://www.w3.org/TR/css-flexbox-1/#order-property>
#[inline]
pub fn sort_items_by_order(items: &mut [FlexItem]) {
    items.sort_by_key(|item| (item.order, item.original_index));
}
