//! Alignment: free-space splitting for `justify-content`, `align-content`
//! and item placement within a line.
//! CSS Flexbox §8: <https://www.w3.org/TR/css-flexbox-1/#alignment>

use css_box::{EvenSplit, LayoutUnit};
use css_orchestrator::style_model::{AlignContent, AlignItems, JustifyContent};

/// Shared shape of the distribution keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Distribution {
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Offset before the first entry plus the spacing between entries.
fn distribute(mode: Distribution, free: LayoutUnit, count: usize) -> (LayoutUnit, EvenSplit) {
    let none = EvenSplit::new(LayoutUnit::ZERO, 0);
    let Ok(slots) = i32::try_from(count) else {
        return (LayoutUnit::ZERO, none);
    };
    match mode {
        Distribution::Start => (LayoutUnit::ZERO, none),
        Distribution::End => (free, none),
        // Truncation leaves the odd unit after the entries.
        Distribution::Center => (free / 2, none),
        Distribution::SpaceBetween if count > 1 => (LayoutUnit::ZERO, EvenSplit::new(free, count - 1)),
        Distribution::SpaceAround if count > 0 => {
            let leading = free / slots / 2;
            (leading, EvenSplit::new(free - leading * 2, count.saturating_sub(1)))
        }
        Distribution::SpaceEvenly if count > 0 => {
            let leading = free / (slots + 1);
            (leading, EvenSplit::new(free - leading * 2, count.saturating_sub(1)))
        }
        Distribution::SpaceBetween | Distribution::SpaceAround | Distribution::SpaceEvenly => {
            (LayoutUnit::ZERO, none)
        }
    }
}

/// `justify-content` spacing for one line.
/// CSS Flexbox §8.2: <https://www.w3.org/TR/css-flexbox-1/#justify-content-property>
#[derive(Clone, Copy, Debug)]
pub struct MainSpacing {
    /// Offset of the first item from the main-start content edge.
    pub leading: LayoutUnit,
    /// Extra space after each in-flow item but the last.
    pub between: EvenSplit,
}

impl MainSpacing {
    /// No justification (free space taken by auto margins).
    #[inline]
    pub fn none() -> Self {
        Self {
            leading: LayoutUnit::ZERO,
            between: EvenSplit::new(LayoutUnit::ZERO, 0),
        }
    }

    pub fn new(justify: JustifyContent, free: LayoutUnit, in_flow: usize) -> Self {
        let mode = match justify {
            JustifyContent::FlexStart => Distribution::Start,
            JustifyContent::FlexEnd => Distribution::End,
            JustifyContent::Center => Distribution::Center,
            JustifyContent::SpaceBetween => Distribution::SpaceBetween,
            JustifyContent::SpaceAround => Distribution::SpaceAround,
            JustifyContent::SpaceEvenly => Distribution::SpaceEvenly,
        };
        let (leading, between) = distribute(mode, free, in_flow);
        Self { leading, between }
    }
}

/// `align-content` packing of the lines.
/// CSS Flexbox §8.4: <https://www.w3.org/TR/css-flexbox-1/#align-content-property>
#[derive(Clone, Copy, Debug)]
pub struct LinePacking {
    pub leading: LayoutUnit,
    /// Spacing after each line but the last.
    pub between: EvenSplit,
    /// Cross size added to each line (`stretch`).
    pub stretch: EvenSplit,
}

impl LinePacking {
    pub fn new(align: AlignContent, free: LayoutUnit, lines: usize) -> Self {
        let mode = match align {
            AlignContent::Stretch => {
                return Self {
                    leading: LayoutUnit::ZERO,
                    between: EvenSplit::new(LayoutUnit::ZERO, 0),
                    stretch: EvenSplit::new(free, lines),
                };
            }
            AlignContent::FlexStart => Distribution::Start,
            AlignContent::FlexEnd => Distribution::End,
            AlignContent::Center => Distribution::Center,
            AlignContent::SpaceBetween => Distribution::SpaceBetween,
            AlignContent::SpaceAround => Distribution::SpaceAround,
            AlignContent::SpaceEvenly => Distribution::SpaceEvenly,
        };
        let (leading, between) = distribute(mode, free, lines);
        Self {
            leading,
            between,
            stretch: EvenSplit::new(LayoutUnit::ZERO, 0),
        }
    }
}

/// Placement of one item within its line on the cross axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrossAlign {
    /// Grow an auto cross size to fill the line.
    Stretch,
    /// Fixed offset from the line's cross-start edge.
    Offset(LayoutUnit),
}

/// Cross-axis placement of an item with `free` space left in its line.
///
/// Auto cross margins take the free space first. `baseline` is placed like
/// `center`. Under `wrap-reverse` the start and end of a line swap.
/// CSS Flexbox §8.3: <https://www.w3.org/TR/css-flexbox-1/#align-items-property>
pub fn cross_alignment(
    align: AlignItems,
    free: LayoutUnit,
    auto_margins: (bool, bool),
    wrap_reversed: bool,
) -> CrossAlign {
    let room = free.non_negative();
    match auto_margins {
        (true, true) => return CrossAlign::Offset(room / 2),
        (true, false) => return CrossAlign::Offset(room),
        (false, true) => return CrossAlign::Offset(LayoutUnit::ZERO),
        (false, false) => {}
    }
    let align = match (align, wrap_reversed) {
        (AlignItems::FlexStart, true) => AlignItems::FlexEnd,
        (AlignItems::FlexEnd, true) => AlignItems::FlexStart,
        (other, _) => other,
    };
    match align {
        AlignItems::Stretch => CrossAlign::Stretch,
        AlignItems::FlexStart => CrossAlign::Offset(LayoutUnit::ZERO),
        AlignItems::FlexEnd => CrossAlign::Offset(free),
        AlignItems::Center | AlignItems::Baseline => CrossAlign::Offset(free / 2),
    }
}
