//! Late redistribution of free height in column containers.

use anyhow::{Context as _, Result};
use css_box::{BoxId, BoxKind, BoxTree, Distributor, EvenSplit, Fixed, LayoutUnit, resolve_length};
use css_orchestrator::style_model::{ComputedStyle, FlexDirection, FlexWrap};
use log::{debug, trace};

use crate::chapter8::MainSpacing;
use crate::host::{FlexLayoutHost, layout_item};

/// In-flow child of a column container, in `order`.
#[derive(Clone, Copy, Debug)]
struct ColumnChild {
    id: BoxId,
    order: i32,
    index: usize,
    grow: Fixed,
    top_auto: bool,
    bottom_auto: bool,
}

/// Hand the free height of a single-line column flex container to its
/// growable children and then to their `auto` top/bottom margins, and stack
/// the children again. Without auto margins, height the children could not
/// take is spread by `justify-content`; when nothing changes the children
/// keep their positions.
///
/// Does nothing unless `container` is a column flex box with a definite
/// height. Nested column flex children are always visited.
///
/// # Errors
/// Returns an error when a box is missing from the tree or a grown child
/// fails to lay out.
pub fn redistribute_column_auto_margins<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    container: BoxId,
) -> Result<()> {
    let container_box = tree.get(container)?;
    let Some(style) = container_box.style else {
        return Ok(());
    };
    if container_box.kind != BoxKind::Flex || !style.is_column() || container_box.height.is_none() {
        return Ok(());
    }

    let mut children = Vec::new();
    let all_children = tree.children(container);
    children
        .try_reserve_exact(all_children.len())
        .context("layout failed: cannot grow the column child array")?;
    for (index, id) in all_children.iter().copied().enumerate() {
        let child = tree.get(id)?;
        let Some(child_style) = child.style else {
            continue;
        };
        if child.is_out_of_flow() {
            continue;
        }
        children.push(ColumnChild {
            id,
            order: child_style.order,
            index,
            grow: Fixed::from_f32(child_style.flex_grow),
            top_auto: child.margin.top.is_auto(),
            bottom_auto: child.margin.bottom.is_auto(),
        });
    }
    children.sort_by_key(|child| (child.order, child.index));

    if style.flex_wrap == FlexWrap::NoWrap && !children.is_empty() {
        redistribute_line(tree, host, container, &style, &children)?;
    }

    for child in &children {
        redistribute_column_auto_margins(tree, host, child.id)?;
    }
    Ok(())
}

/// Grow the children of a single-line column into its free height, then
/// restack them if any height changed or an auto margin takes space.
fn redistribute_line<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    container: BoxId,
    style: &ComputedStyle,
    children: &[ColumnChild],
) -> Result<()> {
    let container_box = tree.get(container)?;
    let height = container_box.height.unwrap_or(LayoutUnit::ZERO);
    let width = container_box.width.unwrap_or(LayoutUnit::ZERO);
    let padding_top = container_box.padding.top;
    let gap = style
        .row_gap
        .and_then(|gap| resolve_length(gap, Some(height)))
        .unwrap_or(LayoutUnit::ZERO)
        .non_negative();
    let gaps = gap * i32::try_from(children.len().saturating_sub(1)).unwrap_or(i32::MAX);
    let mut content = LayoutUnit::ZERO;
    let mut slots = 0;
    let mut grow_sum = 0_i64;
    for child in children {
        let node = tree.get(child.id)?;
        content += node.height.unwrap_or(LayoutUnit::ZERO) + node.delta_outer_height();
        slots += usize::from(child.top_auto) + usize::from(child.bottom_auto);
        grow_sum += i64::from(child.grow.raw());
    }
    let extra = height - content - gaps;
    debug!(
        target: "css::flexbox::column_margins",
        "[FLEX-COLUMN] container={container:?} height={height} content={content} gaps={gaps} extra={extra} slots={slots}"
    );
    if extra <= LayoutUnit::ZERO || (grow_sum == 0 && slots == 0) {
        return Ok(());
    }

    let remaining = grow_children(tree, host, children, extra, grow_sum, width, height)?;
    // Positions from the main-axis pass stay valid while no height changed
    // and no auto margin takes space.
    if slots == 0 && remaining == extra {
        return Ok(());
    }
    let spacing = if slots > 0 {
        MainSpacing::none()
    } else {
        MainSpacing::new(style.justify_content, remaining, children.len())
    };
    let reversed = style.flex_direction == FlexDirection::ColumnReverse;
    let start = if reversed {
        padding_top + height - spacing.leading
    } else {
        padding_top + spacing.leading
    };
    let margins = EvenSplit::new(remaining, slots);
    restack(tree, children, margins, spacing.between, start, gap, reversed)
}

/// Grow children in proportion to `flex-grow`, capped by their max-height.
/// Returns the part of `extra` nobody took.
fn grow_children<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    children: &[ColumnChild],
    extra: LayoutUnit,
    grow_sum: i64,
    width: LayoutUnit,
    height: LayoutUnit,
) -> Result<LayoutUnit> {
    if grow_sum == 0 {
        return Ok(extra);
    }
    let mut remaining = extra;
    let mut distributor = Distributor::new(extra, grow_sum);
    for child in children {
        let share = distributor.share(i64::from(child.grow.raw()));
        if share.is_zero() {
            continue;
        }
        let node = tree.get(child.id)?;
        let current = node.height.unwrap_or(LayoutUnit::ZERO);
        let child_width = node.width.unwrap_or(width);
        let max_height = node
            .style
            .and_then(|style| host.find_dimensions(Some(width), Some(height), &style).max_height);
        let grown = max_height.map_or(current + share, |max| (current + share).min(max.max(current)));
        remaining -= grown - current;
        tree.get_mut(child.id)?.height = Some(grown);
        layout_item(tree, host, child.id, child_width)?;
    }
    Ok(remaining)
}

/// Stack the children from `start`, handing `margins` to their auto margins
/// and `between` plus `gap` to the space between neighbours. `reversed`
/// stacks upwards, matching the main-axis pass.
fn restack(
    tree: &mut BoxTree,
    children: &[ColumnChild],
    mut margins: EvenSplit,
    mut between: EvenSplit,
    start: LayoutUnit,
    gap: LayoutUnit,
    reversed: bool,
) -> Result<()> {
    let mut cursor = start;
    let last = children.len().saturating_sub(1);
    for (index, child) in children.iter().enumerate() {
        let top_extra = if child.top_auto { margins.next_slot() } else { LayoutUnit::ZERO };
        let bottom_extra = if child.bottom_auto { margins.next_slot() } else { LayoutUnit::ZERO };
        let node = tree.get_mut(child.id)?;
        let outer = node.height.unwrap_or(LayoutUnit::ZERO)
            + node.delta_outer_height()
            + top_extra
            + bottom_extra;
        if reversed {
            cursor -= outer;
        }
        node.y = cursor + top_extra + node.margin.top.non_auto() + node.border.top;
        trace!(
            target: "css::flexbox::column_margins",
            "[FLEX-COLUMN] child={:?} y={} top_extra={top_extra} bottom_extra={bottom_extra}",
            child.id,
            node.y
        );
        let spacing = if index < last {
            gap + between.next_slot()
        } else {
            LayoutUnit::ZERO
        };
        if reversed {
            cursor -= spacing;
        } else {
            cursor += outer + spacing;
        }
    }
    Ok(())
}
