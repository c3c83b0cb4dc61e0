//! Second pass for percentage `flex-basis` in columns of indefinite height.
//!
//! The first pass sizes such items from content. Once the container height
//! is final, the percentages resolve against it; the content height becomes
//! the item's floor and the line is flexed again.

use anyhow::{Context as _, Result};
use css_box::{BoxTree, LayoutUnit, resolve_length};
use css_orchestrator::style_model::BoxSizing;
use log::{debug, trace};

use super::flexible_lengths::resolve_line;
use super::line_gaps;
use super::main_axis::place_line_main;
use crate::chapter3::FlexContext;
use crate::chapter4::FlexBasisKind;
use crate::host::FlexLayoutHost;

pub(crate) fn resolve_percentage_bases<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    ctx: &mut FlexContext,
    container_height: LayoutUnit,
) -> Result<()> {
    if ctx.axes.horizontal || !ctx.needs_two_pass || ctx.available_main.is_some() {
        return Ok(());
    }
    ctx.available_main = Some(container_height);
    debug!(
        target: "css::flexbox::two_pass",
        "[FLEX-TWO-PASS] container={:?} height={container_height}",
        ctx.container
    );

    for item in ctx.items.iter_mut().filter(|item| item.has_pct_basis && !item.out_of_flow) {
        let FlexBasisKind::Set(value) = item.basis else {
            continue;
        };
        let Some(length) = resolve_length(value, Some(container_height)) else {
            continue;
        };
        let node = tree.get(item.id)?;
        let length = match node.style.map(|style| style.box_sizing) {
            Some(BoxSizing::BorderBox) => {
                (length - node.padding.top - node.padding.bottom - node.border.top - node.border.bottom)
                    .non_negative()
            }
            Some(BoxSizing::ContentBox) | None => length,
        };
        item.content_min_main = item.main_size;
        item.base_size = length + item.delta_outer_main;
        item.main_size = item.clamp_main(item.base_size);
        item.target_main_size = item.main_size;
        trace!(
            target: "css::flexbox::two_pass",
            "[FLEX-TWO-PASS] item={:?} floor={} base={} main={}",
            item.id,
            item.content_min_main,
            item.base_size,
            item.main_size
        );
    }

    ctx.main_size = LayoutUnit::ZERO;
    ctx.cross_size = LayoutUnit::ZERO;
    for line_index in 0..ctx.lines.len() {
        let line = ctx
            .lines
            .get_mut(line_index)
            .with_context(|| format!("flex line {line_index} does not exist"))?;
        let items = ctx
            .items
            .get_mut(line.range())
            .with_context(|| format!("flex line {line_index} exceeds the item array"))?;
        line.main_size = items
            .iter()
            .filter(|item| !item.out_of_flow)
            .map(|item| item.main_size)
            .sum::<LayoutUnit>()
            + line.gap_total(ctx.main_gap);
        resolve_line(items, line, ctx.available_main, ctx.main_gap);
        place_line_main(tree, host, ctx, line_index)?;

        let placed = ctx
            .lines
            .get(line_index)
            .with_context(|| format!("flex line {line_index} does not exist"))?;
        ctx.main_size = ctx.main_size.max(placed.used_main_size + placed.gap_total(ctx.main_gap));
        ctx.cross_size += placed.cross_size;
    }
    ctx.cross_size += ctx.cross_gap * line_gaps(ctx.lines.len());
    Ok(())
}
