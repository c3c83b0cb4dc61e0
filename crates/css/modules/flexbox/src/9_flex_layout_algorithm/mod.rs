//! Flex Layout Algorithm.
//! CSS Flexbox §9: <https://www.w3.org/TR/css-flexbox-1/#layout-algorithm>

mod column_auto_margins;
mod cross_axis;
mod flexible_lengths;
mod main_axis;
mod percentage_basis;

use anyhow::{Context as _, Result};
use css_box::{BoxId, BoxTree, LayoutUnit, MinSize};
use css_orchestrator::style_model::ComputedStyle;
use log::{debug, warn};

pub use column_auto_margins::redistribute_column_auto_margins;
pub use flexible_lengths::resolve_line;

use crate::chapter3::FlexContext;
use crate::chapter4::collect_flex_items;
use crate::chapter6::build_line;
use crate::host::FlexLayoutHost;
use cross_axis::place_lines;
use flexible_lengths::resolve_flexible_lengths;
use main_axis::place_line_main;
use percentage_basis::resolve_percentage_bases;

/// Lay out the flex container `container` and all of its items.
///
/// A width or height already set on the container is kept; otherwise they
/// are resolved from its style, an auto width filling `available_width` and
/// an auto height growing to fit the lines. All item geometry is written to
/// the tree.
///
/// # Errors
/// Returns an error when an item fails to lay out, a box is missing from the
/// tree, or the item or line arrays cannot grow. Geometry written before the
/// failure is left in place.
pub fn layout_flex<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    container: BoxId,
    available_width: LayoutUnit,
) -> Result<()> {
    let config = host.flex_config();
    let entry = tree.get(container)?;
    let style = entry.style.unwrap_or_else(|| {
        warn!(
            target: "css::flexbox::layout",
            "[FLEX-LAYOUT] container {container:?} has no computed style, using initial values"
        );
        ComputedStyle::default()
    });
    let (preset_width, preset_height) = (entry.width, entry.height);
    let dims = host.find_dimensions(Some(available_width), None, &style);

    let node = tree.get_mut(container)?;
    dims.apply_edges(node);
    let width = preset_width.unwrap_or_else(|| {
        let fill = (available_width - node.delta_outer_width()).non_negative();
        let filled = dims.clamp_width(dims.width.unwrap_or(fill));
        node.width = Some(filled);
        filled
    });
    let height = preset_height.or_else(|| dims.height.map(|height| dims.clamp_height(height)));
    node.height = height;
    let resolved_height = height.or(match dims.min_height {
        MinSize::Definite(min) if min > LayoutUnit::ZERO => Some(min),
        MinSize::Definite(_) | MinSize::Auto => None,
    });

    let mut ctx = FlexContext::new(container, &style);
    if ctx.axes.horizontal {
        ctx.available_main = Some(width);
        ctx.available_cross = resolved_height;
    } else {
        ctx.available_main = resolved_height;
        ctx.available_cross = Some(width);
    }
    ctx.resolve_gaps(&style, width, resolved_height);

    collect_flex_items(tree, host, &mut ctx, width)?;
    if !ctx.items.is_empty() {
        collect_items_into_lines(tree, host, &mut ctx)?;
    }

    let content_height = match height {
        Some(height) => height,
        None => {
            let natural = if ctx.axes.horizontal {
                ctx.cross_size
            } else {
                ctx.main_size
            };
            let finalized = dims.clamp_height(natural).non_negative();
            tree.get_mut(container)?.height = Some(finalized);
            finalized
        }
    };

    if config.percentage_basis_second_pass {
        resolve_percentage_bases(tree, host, &mut ctx, content_height)?;
    }
    if ctx.axes.horizontal && ctx.available_cross.is_none() {
        ctx.available_cross = Some(content_height);
    }
    if !ctx.lines.is_empty() {
        place_lines(tree, host, &mut ctx)?;
    }
    if !ctx.axes.horizontal {
        redistribute_column_auto_margins(tree, host, container)?;
    }

    debug!(
        target: "css::flexbox::layout",
        "[FLEX-LAYOUT] container={container:?} size={width}x{content_height} items={} lines={}",
        ctx.items.len(),
        ctx.lines.len()
    );
    Ok(())
}

/// Break the items into lines, resolving and placing each line on the main
/// axis as soon as it is built.
fn collect_items_into_lines<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    ctx: &mut FlexContext,
) -> Result<()> {
    let mut first = 0;
    while first < ctx.items.len() {
        let line_index = build_line(ctx, first)?;
        resolve_flexible_lengths(ctx, line_index)?;
        place_line_main(tree, host, ctx, line_index)?;
        let line = ctx
            .lines
            .get(line_index)
            .with_context(|| format!("flex line {line_index} does not exist"))?;
        ctx.main_size = ctx.main_size.max(line.used_main_size + line.gap_total(ctx.main_gap));
        ctx.cross_size += line.cross_size;
        first = line.range().end;
    }
    ctx.cross_size += ctx.cross_gap * line_gaps(ctx.lines.len());
    Ok(())
}

/// Number of gaps between `lines` lines.
fn line_gaps(lines: usize) -> i32 {
    i32::try_from(lines.saturating_sub(1)).unwrap_or(i32::MAX)
}
