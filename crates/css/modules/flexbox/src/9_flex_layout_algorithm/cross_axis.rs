//! Cross-axis alignment: line packing, `align-self` and stretching.
//! CSS Flexbox §9.4 and §9.6: <https://www.w3.org/TR/css-flexbox-1/#cross-sizing>

use anyhow::{Context as _, Result};
use css_box::{BoxId, BoxKind, BoxTree, LayoutUnit, MinSize};
use css_orchestrator::style_model::{AlignContent, FlexWrap};
use log::{debug, trace};

use super::redistribute_column_auto_margins;
use crate::chapter3::FlexContext;
use crate::chapter8::{CrossAlign, LinePacking, cross_alignment};
use crate::host::{FlexLayoutHost, layout_item};

/// Position every line on the cross axis, then align the items within it.
///
/// `ctx.cross_size` must hold the summed line cross sizes and gaps, and
/// `ctx.available_cross` the container's definite cross size if it has one.
pub(crate) fn place_lines<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    ctx: &mut FlexContext,
) -> Result<()> {
    let free = ctx
        .available_cross
        .map_or(LayoutUnit::ZERO, |available| (available - ctx.cross_size).non_negative());
    let align_content = if ctx.wrap == FlexWrap::NoWrap {
        AlignContent::Stretch
    } else {
        ctx.align_content
    };
    let mut packing = LinePacking::new(align_content, free, ctx.lines.len());
    let reversed = ctx.wrap == FlexWrap::WrapReverse;
    let extent = ctx.cross_size + free;
    debug!(
        target: "css::flexbox::cross_axis",
        "[FLEX-CROSS] container={:?} lines={} free={free} align_content={align_content:?} reversed={reversed}",
        ctx.container,
        ctx.lines.len()
    );

    let mut logical = packing.leading;
    let last = ctx.lines.len().saturating_sub(1);
    for line_index in 0..ctx.lines.len() {
        let line = ctx
            .lines
            .get_mut(line_index)
            .with_context(|| format!("flex line {line_index} does not exist"))?;
        line.cross_size += packing.stretch.next_slot();
        line.pos = if reversed {
            extent - logical - line.cross_size
        } else {
            logical
        };
        logical += line.cross_size;
        if line_index < last {
            logical += ctx.cross_gap + packing.between.next_slot();
        }
        trace!(
            target: "css::flexbox::cross_axis",
            "[FLEX-CROSS] line={line_index} pos={} cross={}",
            line.pos,
            line.cross_size
        );
        align_line_items(tree, host, ctx, line_index)?;
    }
    Ok(())
}

fn align_line_items<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    ctx: &FlexContext,
    line_index: usize,
) -> Result<()> {
    let line = *ctx
        .lines
        .get(line_index)
        .with_context(|| format!("flex line {line_index} does not exist"))?;
    let axes = ctx.axes;
    let wrap_reversed = ctx.wrap == FlexWrap::WrapReverse;
    let padding_start = tree.get(ctx.container)?.padding[axes.cross_start()];

    let items = ctx
        .items
        .get(line.range())
        .with_context(|| format!("flex line {line_index} exceeds the item array"))?;
    for item in items {
        let id = item.id;
        let node = tree.get(id)?;
        let style = node.style.unwrap_or_default();
        let size = axes.cross_size(node).unwrap_or(LayoutUnit::ZERO);
        let free = line.cross_size - size - axes.delta_outer_cross(node);
        let auto_margins = (
            node.margin[axes.cross_start()].is_auto(),
            node.margin[axes.cross_end()].is_auto(),
        );
        let align = if item.out_of_flow {
            CrossAlign::Offset(LayoutUnit::ZERO)
        } else {
            cross_alignment(style.align_self.resolve(ctx.align_items), free, auto_margins, wrap_reversed)
        };

        let offset = match align {
            CrossAlign::Offset(offset) => offset,
            CrossAlign::Stretch => {
                let specified = if axes.horizontal { style.height } else { style.width };
                if specified.is_auto() {
                    let stretched = clamp_cross(size + free, item.min_cross, item.max_cross);
                    stretch_item(tree, host, ctx, id, stretched)?;
                }
                LayoutUnit::ZERO
            }
        };

        let placed = tree.get_mut(id)?;
        let position = padding_start
            + line.pos
            + offset
            + placed.margin[axes.cross_start()].non_auto()
            + placed.border[axes.cross_start()];
        axes.set_cross_position(placed, position);
        trace!(
            target: "css::flexbox::cross_axis",
            "[FLEX-CROSS] item={id:?} align={align:?} pos={position}"
        );
    }
    Ok(())
}

/// Max first, then min, never negative.
fn clamp_cross(size: LayoutUnit, min: MinSize, max: Option<LayoutUnit>) -> LayoutUnit {
    let capped = max.map_or(size, |limit| size.min(limit));
    capped.max(min.or_zero()).non_negative()
}

/// Give an item its stretched cross size and lay it out again.
fn stretch_item<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    ctx: &FlexContext,
    id: BoxId,
    size: LayoutUnit,
) -> Result<()> {
    let node = tree.get_mut(id)?;
    if ctx.axes.cross_size(node) == Some(size) {
        return Ok(());
    }
    ctx.axes.set_cross_size(node, size);
    let width = node.width.unwrap_or(LayoutUnit::ZERO);
    let nested_column = node.kind == BoxKind::Flex && node.style.is_some_and(|style| style.is_column());
    layout_item(tree, host, id, width)?;
    if ctx.axes.horizontal && nested_column {
        redistribute_column_auto_margins(tree, host, id)?;
    }
    Ok(())
}
