//! Seam between flex layout and the other layout algorithms.

use anyhow::{Context as _, Result};
use css_box::{BoxDimensions, BoxId, BoxKind, BoxTree, LayoutUnit, find_dimensions};
use css_orchestrator::style_model::ComputedStyle;
use log::error;

use crate::layout_flex;

/// Tunables for flex layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlexConfig {
    /// Re-resolve percentage `flex-basis` values of column items once the
    /// container height is known from content.
    pub percentage_basis_second_pass: bool,
}

impl Default for FlexConfig {
    #[inline]
    fn default() -> Self {
        Self {
            percentage_basis_second_pass: true,
        }
    }
}

/// Layout services flex layout needs from the surrounding engine.
///
/// Each `layout_*` call lays out the subtree of `id` at `available_width`.
/// A `width` or `height` already set on `id` is kept; an unset height may be
/// resolved from content or left `None` for flex layout to derive. An error
/// aborts the enclosing flex layout.
pub trait FlexLayoutHost {
    /// # Errors
    /// Returns an error when the block subtree cannot be laid out.
    fn layout_block(&mut self, tree: &mut BoxTree, id: BoxId, available_width: LayoutUnit) -> Result<()>;

    /// # Errors
    /// Returns an error when the table cannot be laid out.
    fn layout_table(&mut self, tree: &mut BoxTree, id: BoxId, available_width: LayoutUnit) -> Result<()>;

    /// # Errors
    /// Returns an error when the grid cannot be laid out.
    fn layout_grid(&mut self, tree: &mut BoxTree, id: BoxId, available_width: LayoutUnit) -> Result<()>;

    /// Nested flex containers recurse into this crate by default.
    ///
    /// # Errors
    /// Returns an error when any item of the nested container fails.
    fn layout_flex(&mut self, tree: &mut BoxTree, id: BoxId, available_width: LayoutUnit) -> Result<()> {
        layout_flex(tree, self, id, available_width)
    }

    fn find_dimensions(
        &self,
        available_width: Option<LayoutUnit>,
        available_height: Option<LayoutUnit>,
        style: &ComputedStyle,
    ) -> BoxDimensions {
        find_dimensions(available_width, available_height, style)
    }

    fn flex_config(&self) -> FlexConfig {
        FlexConfig::default()
    }
}

/// Dispatch the layout of one flex item by its box kind.
pub(crate) fn layout_item<H: FlexLayoutHost + ?Sized>(
    tree: &mut BoxTree,
    host: &mut H,
    id: BoxId,
    available_width: LayoutUnit,
) -> Result<()> {
    let kind = tree.get(id)?.kind;
    let outcome = match kind {
        BoxKind::Block => host.layout_block(tree, id, available_width),
        BoxKind::Table => host.layout_table(tree, id, available_width),
        BoxKind::Flex => host.layout_flex(tree, id, available_width),
        BoxKind::Grid => host.layout_grid(tree, id, available_width),
    };
    outcome
        .inspect_err(|err| {
            error!(
                target: "css::flexbox::layout",
                "[FLEX-LAYOUT] {kind:?} item {id:?} failed at width {available_width}: {err:#}"
            );
        })
        .with_context(|| format!("layout failed for flex item {id:?}"))
}

/// Height of the in-flow content of `id`: the lowest bottom margin edge of a
/// non-floated child, measured from the top padding edge. Zero when empty.
pub(crate) fn content_height(tree: &BoxTree, id: BoxId) -> Result<LayoutUnit> {
    let padding_top = tree.get(id)?.padding.top;
    let mut bottom = padding_top;
    for child in tree.children(id) {
        let node = tree.get(child)?;
        if node.is_floated() || node.is_out_of_flow() {
            continue;
        }
        let edge = node.y
            + node.padding.top
            + node.height.unwrap_or(LayoutUnit::ZERO)
            + node.padding.bottom
            + node.border.bottom
            + node.margin.bottom.non_auto();
        bottom = bottom.max(edge);
    }
    Ok((bottom - padding_top).non_negative())
}

/// Height of `id`, deriving and storing it from content when layout left it unset.
pub(crate) fn ensure_height(tree: &mut BoxTree, id: BoxId) -> Result<LayoutUnit> {
    if let Some(height) = tree.get(id)?.height {
        return Ok(height);
    }
    let height = content_height(tree, id)?;
    tree.get_mut(id)?.height = Some(height);
    Ok(height)
}
