//! CSS Box Model Module Level 3: box dimensions, margins, borders, padding.
//! <https://www.w3.org/TR/css-box-3/>
//!
//! Also hosts the layout tree and the fixed-point scalars shared by the
//! layout algorithms.

pub mod box_tree;
pub mod dimensions;
pub mod fixed;
pub mod layout_unit;

pub use box_tree::{BoxId, BoxKind, BoxTree, ChildList, LayoutBox, MarginEdge};
pub use dimensions::{BoxDimensions, MinSize, find_dimensions, resolve_length};
pub use fixed::{Distributor, EvenSplit, Fixed};
pub use layout_unit::LayoutUnit;
