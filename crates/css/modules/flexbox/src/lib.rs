//! CSS Flexible Box Layout Module Level 1: flex layout.
//! <https://www.w3.org/TR/css-flexbox-1/>
//!
//! [`layout_flex`] lays out the children of one flex container and writes the
//! resulting geometry into the [`css_box::BoxTree`]. Non-flex children are
//! laid out through the [`FlexLayoutHost`] supplied by the caller.

// Chapter modules mapped to the Flexbox Level 1 structure.
// §3 Flex Containers
#[path = "3_flex_containers/mod.rs"]
mod chapter3;
// §4 Flex Items
#[path = "4_flex_items/mod.rs"]
mod chapter4;
// §5 Ordering and Orientation
#[path = "5_ordering_and_orientation/mod.rs"]
mod chapter5;
// §6 Flex Lines
#[path = "6_flex_lines/mod.rs"]
mod chapter6;
// §8 Alignment
#[path = "8_alignment/mod.rs"]
mod chapter8;
// §9 Flex Layout Algorithm
#[path = "9_flex_layout_algorithm/mod.rs"]
mod chapter9;
mod host;

pub use chapter3::FlexContext;
pub use chapter4::{FlexBasisKind, FlexItem};
pub use chapter5::{Axes, sort_items_by_order};
pub use chapter6::{FlexLine, build_line};
pub use chapter8::{CrossAlign, LinePacking, MainSpacing, cross_alignment};
pub use chapter9::{layout_flex, redistribute_column_auto_margins, resolve_line};
pub use host::{FlexConfig, FlexLayoutHost};
