//! Flex Lines: greedy partitioning of the ordered items.
//! CSS Flexbox §9.3: <https://www.w3.org/TR/css-flexbox-1/#algo-line-break>

use core::ops::Range;

use anyhow::{Context as _, Result, bail};
use css_box::LayoutUnit;
use css_orchestrator::style_model::FlexWrap;
use log::debug;

use crate::chapter3::FlexContext;

/// One line of items: the slice `first..first + count` of the context's items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlexLine {
    pub first: usize,
    pub count: usize,
    /// Items that take part in flow; out-of-flow items only ride along.
    pub in_flow: usize,
    /// Outer hypothetical main sizes plus the gaps between in-flow items.
    pub main_size: LayoutUnit,
    pub cross_size: LayoutUnit,
    /// Sum of frozen in-flow target sizes.
    pub used_main_size: LayoutUnit,
    pub main_auto_margin_count: usize,
    /// Cross-axis offset from the container's content edge.
    pub pos: LayoutUnit,
    pub frozen: usize,
}

impl FlexLine {
    #[inline]
    pub const fn range(&self) -> Range<usize> {
        self.first..self.first + self.count
    }

    /// Total of the gaps between in-flow items.
    #[inline]
    pub fn gap_total(&self, gap: LayoutUnit) -> LayoutUnit {
        let gaps = i32::try_from(self.in_flow.saturating_sub(1)).unwrap_or(i32::MAX);
        gap * gaps
    }
}

/// Append the next line starting at item `first` and return its index.
///
/// An item joins the line while it fits in the available main space. A
/// `nowrap` container, an indefinite main size, an empty line, a zero-sized
/// item or an out-of-flow item always joins.
///
/// # Errors
/// Returns an error when the line array cannot grow or no item joined.
pub fn build_line(ctx: &mut FlexContext, first: usize) -> Result<usize> {
    ctx.lines
        .try_reserve(1)
        .context("layout failed: cannot grow the flex line array")?;
    let index = ctx.lines.len();
    let mut line = FlexLine {
        first,
        ..FlexLine::default()
    };
    let mut used = LayoutUnit::ZERO;
    for item in ctx.items.iter_mut().skip(first) {
        let gap = if line.in_flow > 0 {
            ctx.main_gap
        } else {
            LayoutUnit::ZERO
        };
        let fits = ctx
            .available_main
            .is_none_or(|available| used + gap + item.main_size <= available);
        let joins = fits
            || ctx.wrap == FlexWrap::NoWrap
            || line.count == 0
            || item.out_of_flow
            || item.main_size.is_zero();
        if !joins {
            break;
        }
        if !item.out_of_flow {
            line.main_size += item.main_size;
            used += item.main_size + gap;
            line.main_auto_margin_count += item.main_auto_margins();
            line.in_flow += 1;
        }
        item.line = index;
        line.count += 1;
    }
    if line.count == 0 {
        bail!("flex line {index} starting at item {first} received no items");
    }
    line.main_size += line.gap_total(ctx.main_gap);
    debug!(
        target: "css::flexbox::lines",
        "[FLEX-LINES] line={index} items={}..{} main={} auto_margins={}",
        line.first,
        line.first + line.count,
        line.main_size,
        line.main_auto_margin_count
    );
    ctx.lines.push(line);
    Ok(index)
}
