//! Main-axis alignment.
//! CSS Flexbox §9.5: <https://www.w3.org/TR/css-flexbox-1/#algo-main-align>

use anyhow::{Context as _, Result};
use css_box::{BoxId, BoxTree, EvenSplit, LayoutUnit};
use log::{debug, trace};

use crate::chapter3::FlexContext;
use crate::chapter5::Axes;
use crate::chapter8::MainSpacing;
use crate::host::{FlexLayoutHost, ensure_height, layout_item};

/// Write the resolved main sizes of one line back to the tree, lay the items
/// out at those sizes and position them along the main axis.
///
/// Leftover space goes to `auto` margins when the line has any, otherwise to
/// `justify-content`. Also records the line's cross size.
pub(crate) fn place_line_main<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    ctx: &mut FlexContext,
    line_index: usize,
) -> Result<()> {
    let mut line = *ctx
        .lines
        .get(line_index)
        .with_context(|| format!("flex line {line_index} does not exist"))?;
    let axes = ctx.axes;
    let gaps = line.gap_total(ctx.main_gap);
    let free = ctx
        .available_main
        .map_or(LayoutUnit::ZERO, |available| (available - line.used_main_size - gaps).non_negative());

    let mut margin_split = EvenSplit::new(free, line.main_auto_margin_count);
    let mut spacing = if line.main_auto_margin_count > 0 {
        MainSpacing::none()
    } else {
        MainSpacing::new(ctx.justify_content, free, line.in_flow)
    };

    let padding_start = tree.get(ctx.container)?.padding[axes.main_start()];
    let mut cursor = if axes.main_reversed {
        padding_start + ctx.available_main.unwrap_or(line.main_size) - spacing.leading
    } else {
        padding_start + spacing.leading
    };
    debug!(
        target: "css::flexbox::main_axis",
        "[FLEX-MAIN] line={line_index} free={free} auto_margins={} leading={} reversed={}",
        line.main_auto_margin_count,
        spacing.leading,
        axes.main_reversed
    );

    let mut placed = 0;
    line.cross_size = LayoutUnit::ZERO;
    for index in line.range() {
        let item = ctx
            .items
            .get(index)
            .with_context(|| format!("flex item {index} of line {line_index} does not exist"))?;
        let (id, target, delta, out_of_flow) =
            (item.id, item.target_main_size, item.delta_outer_main, item.out_of_flow);
        let (start_auto, end_auto) = (item.main_start_auto, item.main_end_auto);

        let size = (target - delta).non_negative();
        apply_main_size(tree, host, axes, id, size, out_of_flow)?;

        let outer = size + delta;
        let mut auto_slot = |is_auto: bool| {
            if is_auto && !out_of_flow {
                margin_split.next_slot()
            } else {
                LayoutUnit::ZERO
            }
        };
        let extra_before = auto_slot(start_auto);
        let extra_after = auto_slot(end_auto);
        let extras = extra_before + extra_after;
        let block_start = if axes.main_reversed {
            cursor - extras - outer
        } else {
            cursor
        };

        let node = tree.get_mut(id)?;
        let position = block_start
            + extra_before
            + node.margin[axes.main_start()].non_auto()
            + node.border[axes.main_start()];
        axes.set_main_position(node, position);
        trace!(
            target: "css::flexbox::main_axis",
            "[FLEX-MAIN] item={id:?} size={size} pos={position} out_of_flow={out_of_flow}"
        );
        if out_of_flow {
            continue;
        }

        line.cross_size = line
            .cross_size
            .max(axes.cross_size(node).unwrap_or(LayoutUnit::ZERO) + axes.delta_outer_cross(node));
        placed += 1;
        let mut advance = extras + outer;
        if placed < line.in_flow {
            advance += spacing.between.next_slot() + ctx.main_gap;
        }
        if axes.main_reversed {
            cursor -= advance;
        } else {
            cursor += advance;
        }
    }

    let slot = ctx
        .lines
        .get_mut(line_index)
        .with_context(|| format!("flex line {line_index} does not exist"))?;
    *slot = line;
    Ok(())
}

/// Write a resolved content-box main size to the tree and lay the item out.
///
/// Row items are always laid out at their new width. Column items are laid
/// out again only when their height changed.
fn apply_main_size<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    axes: Axes,
    id: BoxId,
    size: LayoutUnit,
    out_of_flow: bool,
) -> Result<()> {
    if axes.horizontal {
        tree.get_mut(id)?.width = Some(size);
        layout_item(tree, host, id, size)?;
        ensure_height(tree, id)?;
        return Ok(());
    }
    let node = tree.get_mut(id)?;
    if out_of_flow || node.height == Some(size) {
        return Ok(());
    }
    node.height = Some(size);
    let width = node.width.unwrap_or(LayoutUnit::ZERO);
    layout_item(tree, host, id, width)
}
