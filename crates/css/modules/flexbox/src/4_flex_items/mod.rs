//! Flex Items: item records, flex base size and hypothetical main size.
//! CSS Flexbox §4: <https://www.w3.org/TR/css-flexbox-1/#flex-items>

use anyhow::{Context as _, Result};
use css_box::{BoxId, BoxTree, Fixed, LayoutUnit, MinSize, resolve_length};
use css_orchestrator::style_model::{
    BoxSizing, ComputedStyle, FlexBasis, LengthPercentage, Overflow, Size,
};
use log::{debug, trace, warn};

use crate::chapter3::FlexContext;
use crate::chapter5::sort_items_by_order;
use crate::host::{FlexLayoutHost, ensure_height, layout_item};

/// How `flex-basis` was specified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlexBasisKind {
    /// Use the item's main size property.
    Auto,
    /// Size from content.
    Content,
    Set(LengthPercentage),
}

impl From<FlexBasis> for FlexBasisKind {
    #[inline]
    fn from(basis: FlexBasis) -> Self {
        match basis {
            FlexBasis::Auto => Self::Auto,
            FlexBasis::Content => Self::Content,
            FlexBasis::Length(value) => Self::Set(value),
        }
    }
}

/// One child of a flex container during resolution.
///
/// `base_size`, `target_main_size` and `main_size` are outer sizes: they
/// include padding, borders and non-auto margins along the main axis.
/// `min_main`/`max_main` are content-box limits as resolved from style.
#[derive(Clone, Debug, PartialEq)]
pub struct FlexItem {
    pub id: BoxId,
    pub basis: FlexBasisKind,
    pub grow: Fixed,
    pub shrink: Fixed,
    pub min_main: MinSize,
    pub min_cross: MinSize,
    pub max_main: Option<LayoutUnit>,
    pub max_cross: Option<LayoutUnit>,
    /// Content-based minimum (outer); zero for column items.
    pub content_min_main: LayoutUnit,
    pub delta_outer_main: LayoutUnit,
    pub base_size: LayoutUnit,
    pub target_main_size: LayoutUnit,
    pub main_size: LayoutUnit,
    pub order: i32,
    pub original_index: usize,
    pub frozen: bool,
    pub min_violation: bool,
    pub max_violation: bool,
    pub has_pct_basis: bool,
    pub out_of_flow: bool,
    /// `auto` margin on the physical main-start side (left or top).
    pub main_start_auto: bool,
    pub main_end_auto: bool,
    /// Index of the line holding the item.
    pub line: usize,
}

impl FlexItem {
    pub fn new(id: BoxId, original_index: usize) -> Self {
        Self {
            id,
            basis: FlexBasisKind::Auto,
            grow: Fixed::ZERO,
            shrink: Fixed::ONE,
            min_main: MinSize::Auto,
            min_cross: MinSize::Auto,
            max_main: None,
            max_cross: None,
            content_min_main: LayoutUnit::ZERO,
            delta_outer_main: LayoutUnit::ZERO,
            base_size: LayoutUnit::ZERO,
            target_main_size: LayoutUnit::ZERO,
            main_size: LayoutUnit::ZERO,
            order: 0,
            original_index,
            frozen: false,
            min_violation: false,
            max_violation: false,
            has_pct_basis: false,
            out_of_flow: false,
            main_start_auto: false,
            main_end_auto: false,
            line: 0,
        }
    }

    /// Smallest outer main size the item may take.
    #[inline]
    pub fn min_main_outer(&self) -> LayoutUnit {
        let specified = match self.min_main {
            MinSize::Auto => LayoutUnit::ZERO,
            MinSize::Definite(length) => length + self.delta_outer_main,
        };
        specified.max(self.content_min_main)
    }

    #[inline]
    pub fn max_main_outer(&self) -> Option<LayoutUnit> {
        self.max_main.map(|length| length + self.delta_outer_main)
    }

    /// Clamp an outer main size into the item's limits. The maximum is
    /// applied first so a conflicting minimum wins.
    #[inline]
    pub fn clamp_main(&self, size: LayoutUnit) -> LayoutUnit {
        let capped = self.max_main_outer().map_or(size, |max| size.min(max));
        capped.max(self.min_main_outer())
    }

    /// Number of `auto` margins on the main axis.
    #[inline]
    pub fn main_auto_margins(&self) -> usize {
        usize::from(self.main_start_auto) + usize::from(self.main_end_auto)
    }
}

/// Build the item records of `ctx.container`, sorted by `order`.
///
/// Children without a computed style are skipped. Every item's own box model
/// is resolved against `available_width` here, and column items are laid out
/// because their base size comes from the resulting height.
pub(crate) fn collect_flex_items<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    ctx: &mut FlexContext,
    available_width: LayoutUnit,
) -> Result<()> {
    let children = tree.children(ctx.container);
    ctx.items
        .try_reserve_exact(children.len())
        .context("layout failed: cannot grow the flex item array")?;
    for (original_index, child) in children.into_iter().enumerate() {
        let Some(style) = tree.get(child)?.style else {
            warn!(
                target: "css::flexbox::items",
                "[FLEX-ITEMS] skipping child {child:?} of {:?}: no computed style",
                ctx.container
            );
            continue;
        };
        let item = extract_item(tree, host, ctx, child, original_index, &style, available_width)?;
        ctx.needs_two_pass |= item.has_pct_basis;
        ctx.items.push(item);
    }
    sort_items_by_order(&mut ctx.items);
    debug!(
        target: "css::flexbox::items",
        "[FLEX-ITEMS] container={:?} items={} horizontal={} two_pass={}",
        ctx.container,
        ctx.items.len(),
        ctx.axes.horizontal,
        ctx.needs_two_pass
    );
    Ok(())
}

fn extract_item<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    ctx: &FlexContext,
    child: BoxId,
    original_index: usize,
    style: &ComputedStyle,
    available_width: LayoutUnit,
) -> Result<FlexItem> {
    let axes = ctx.axes;
    let dims = host.find_dimensions(Some(available_width), ctx.definite_height(), style);
    let node = tree.get_mut(child)?;
    dims.apply_edges(node);
    node.width = dims.width;
    node.height = dims.height;
    if let Some(width) = keyword_width(style.width, node.min_content_width, node.max_content_width, available_width) {
        node.width = Some((width - node.delta_outer_width()).non_negative());
    }

    let mut item = FlexItem::new(child, original_index);
    item.basis = FlexBasisKind::from(style.flex_basis);
    item.grow = Fixed::from_f32(style.flex_grow);
    item.shrink = Fixed::from_f32(style.flex_shrink);
    item.order = style.order;
    item.out_of_flow = style.position.is_out_of_flow();
    item.delta_outer_main = axes.delta_outer_main(node);
    item.main_start_auto = node.margin[axes.main_start()].is_auto();
    item.main_end_auto = node.margin[axes.main_end()].is_auto();
    if axes.horizontal {
        item.min_main = min_width_or_auto(dims.min_width);
        item.max_main = dims.max_width;
        item.min_cross = dims.min_height;
        item.max_cross = dims.max_height;
    } else {
        item.min_main = dims.min_height;
        item.max_main = dims.max_height;
        item.min_cross = dims.min_width;
        item.max_cross = dims.max_width;
    }

    base_and_main_sizes(tree, host, ctx, &mut item, style, available_width)?;
    trace!(
        target: "css::flexbox::items",
        "[FLEX-ITEMS] item={child:?} order={} base={} main={} min={} max={:?}",
        item.order,
        item.base_size,
        item.main_size,
        item.min_main_outer(),
        item.max_main_outer()
    );
    Ok(item)
}

/// A zero min-width is indistinguishable from the initial value and is kept
/// as `auto`. Both resolve to a zero specified minimum; the content minimum
/// applies to row items either way.
fn min_width_or_auto(min_width: MinSize) -> MinSize {
    match min_width {
        MinSize::Definite(length) if length.is_zero() => MinSize::Auto,
        other => other,
    }
}

/// Margin-box width requested by an intrinsic sizing keyword.
fn keyword_width(
    width: Size,
    content_min: LayoutUnit,
    content_max: LayoutUnit,
    available_width: LayoutUnit,
) -> Option<LayoutUnit> {
    match width {
        Size::MinContent => Some(content_min),
        Size::MaxContent => Some(content_max),
        Size::FitContent => Some(content_max.min(content_min.max(available_width))),
        Size::Auto | Size::Length(_) => None,
    }
}

/// Flex base size and hypothetical main size.
/// CSS Flexbox §9.2: <https://www.w3.org/TR/css-flexbox-1/#algo-main-item>
fn base_and_main_sizes<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    ctx: &FlexContext,
    item: &mut FlexItem,
    style: &ComputedStyle,
    available_width: LayoutUnit,
) -> Result<()> {
    let axes = ctx.axes;
    let node = tree.get(item.id)?;
    let mut content_min = node.min_content_width;
    let content_max = node.max_content_width;
    let delta_width = node.delta_outer_width();
    let specified_width = node.width;
    let main_chrome = if axes.horizontal {
        node.padding.left + node.padding.right + node.border.left + node.border.right
    } else {
        node.padding.top + node.padding.bottom + node.border.top + node.border.bottom
    };
    if axes.horizontal && style.overflow_x != Overflow::Visible {
        content_min = LayoutUnit::ZERO;
    }

    let mut base = match item.basis {
        FlexBasisKind::Set(value) => {
            let reference = if axes.horizontal {
                Some(available_width)
            } else {
                ctx.available_main
            };
            match resolve_length(value, reference) {
                // Column items with a zero basis still size from content.
                Some(length) if !axes.horizontal && length.is_zero() => None,
                Some(length) => Some(match style.box_sizing {
                    BoxSizing::ContentBox => length,
                    BoxSizing::BorderBox => (length - main_chrome).non_negative(),
                }),
                None => {
                    item.has_pct_basis = !axes.horizontal;
                    None
                }
            }
        }
        FlexBasisKind::Auto => axes.main_size(node),
        FlexBasisKind::Content => None,
    };

    if !axes.horizontal {
        let width = match specified_width {
            Some(width) => width,
            None => {
                let width = (content_max.min(content_min.max(available_width)) - delta_width).non_negative();
                tree.get_mut(item.id)?.width = Some(width);
                width
            }
        };
        layout_item(tree, host, item.id, width)?;
        let height = ensure_height(tree, item.id)?;
        base = base.or(Some(height));
    }

    let base = base.unwrap_or_else(|| (content_max - delta_width).non_negative());
    let mut base_outer = base + item.delta_outer_main;
    if axes.horizontal {
        if let Some(width) = specified_width {
            content_min = content_min.min(width + delta_width);
        }
        item.content_min_main = content_min;
        base_outer = base_outer.min(available_width).max(content_min);
    }
    item.base_size = base_outer;
    item.main_size = item.clamp_main(base_outer);
    item.target_main_size = item.main_size;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_box::{BoxTree, LayoutBox};

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_px_i32(value)
    }

    fn item() -> FlexItem {
        let mut tree = BoxTree::new();
        FlexItem::new(tree.create(LayoutBox::default()), 0)
    }

    #[test]
    /// # Panics
    /// Panics if a conflicting minimum does not win over the maximum.
    fn min_wins_over_max() {
        let mut flex_item = item();
        flex_item.min_main = MinSize::Definite(px(80));
        flex_item.max_main = Some(px(50));
        assert_eq!(flex_item.clamp_main(px(100)), px(80));
        assert_eq!(flex_item.clamp_main(px(10)), px(80));
    }

    #[test]
    /// # Panics
    /// Panics if outer limits ignore the main-axis chrome or content minimum.
    fn outer_limits_include_chrome() {
        let mut flex_item = item();
        flex_item.delta_outer_main = px(10);
        flex_item.min_main = MinSize::Definite(px(20));
        flex_item.max_main = Some(px(40));
        assert_eq!(flex_item.min_main_outer(), px(30));
        assert_eq!(flex_item.max_main_outer(), Some(px(50)));
        flex_item.content_min_main = px(45);
        assert_eq!(flex_item.min_main_outer(), px(45));
        flex_item.main_start_auto = true;
        assert_eq!(flex_item.main_auto_margins(), 1);
    }

    #[test]
    /// # Panics
    /// Panics if a zero min-width does not map to `auto`, or if either form
    /// drops the content minimum.
    fn zero_min_width_keeps_content_minimum() {
        assert_eq!(min_width_or_auto(MinSize::Definite(LayoutUnit::ZERO)), MinSize::Auto);
        assert_eq!(min_width_or_auto(MinSize::Definite(px(5))), MinSize::Definite(px(5)));
        assert_eq!(min_width_or_auto(MinSize::Auto), MinSize::Auto);

        let mut flex_item = item();
        flex_item.content_min_main = px(30);
        flex_item.min_main = min_width_or_auto(MinSize::Definite(LayoutUnit::ZERO));
        assert_eq!(flex_item.min_main_outer(), px(30));
        assert_eq!(flex_item.clamp_main(px(10)), px(30));
    }

    #[test]
    /// # Panics
    /// Panics if intrinsic keywords do not resolve against the content widths.
    fn keyword_widths() {
        assert_eq!(keyword_width(Size::MinContent, px(10), px(90), px(50)), Some(px(10)));
        assert_eq!(keyword_width(Size::MaxContent, px(10), px(90), px(50)), Some(px(90)));
        assert_eq!(keyword_width(Size::FitContent, px(10), px(90), px(50)), Some(px(50)));
        assert_eq!(keyword_width(Size::FitContent, px(60), px(90), px(50)), Some(px(60)));
        assert_eq!(keyword_width(Size::Auto, px(10), px(90), px(50)), None);
    }
}
