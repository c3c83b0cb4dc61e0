#![allow(dead_code, reason = "each integration test binary uses a subset")]
//! Shared fixtures for flex layout integration tests.

use anyhow::{Result, bail};
use css_box::{BoxId, BoxKind, BoxTree, LayoutBox, LayoutUnit};
use css_flexbox::{FlexConfig, FlexLayoutHost};
use css_orchestrator::style_model::{
    ComputedStyle, FlexBasis, FlexDirection, LengthPercentage, LengthPercentageAuto, Size,
};

/// Minimal block layout: children are stacked top to bottom at the parent's
/// content width, nested flex containers recurse into flex layout.
#[derive(Debug, Default)]
pub struct StackingHost {
    /// Leave auto heights unset so flex layout derives them from content.
    pub leave_auto_heights: bool,
    /// Refuse to lay out this box.
    pub fail_on: Option<BoxId>,
    pub config: FlexConfig,
}

impl StackingHost {
    fn stack(&mut self, tree: &mut BoxTree, id: BoxId, available_width: LayoutUnit) -> Result<()> {
        if self.fail_on == Some(id) {
            bail!("host refused to lay out {id:?}");
        }
        let node = tree.get_mut(id)?;
        let fill = (available_width - node.delta_outer_width()).non_negative();
        let width = *node.width.get_or_insert(fill);
        let definite_height = node.height;
        let (padding_left, padding_top) = (node.padding.left, node.padding.top);

        let mut cursor = padding_top;
        for child in tree.children(id) {
            let Some(style) = tree.get(child)?.style else {
                continue;
            };
            let dims = self.find_dimensions(Some(width), definite_height, &style);
            let child_box = tree.get_mut(child)?;
            dims.apply_edges(child_box);
            child_box.width = Some(
                dims.width
                    .unwrap_or_else(|| (width - child_box.delta_outer_width()).non_negative()),
            );
            child_box.height = dims.height;
            match child_box.kind {
                BoxKind::Flex => self.layout_flex(tree, child, width)?,
                BoxKind::Block | BoxKind::Table | BoxKind::Grid => self.stack(tree, child, width)?,
            }
            let placed = tree.get_mut(child)?;
            placed.x = padding_left + placed.margin.left.non_auto() + placed.border.left;
            placed.y = cursor + placed.margin.top.non_auto() + placed.border.top;
            cursor += placed.height.unwrap_or(LayoutUnit::ZERO) + placed.delta_outer_height();
        }

        let parent = tree.get_mut(id)?;
        if parent.height.is_none() && !self.leave_auto_heights {
            parent.height = Some(cursor - padding_top);
        }
        Ok(())
    }
}

impl FlexLayoutHost for StackingHost {
    fn layout_block(&mut self, tree: &mut BoxTree, id: BoxId, available_width: LayoutUnit) -> Result<()> {
        self.stack(tree, id, available_width)
    }

    fn layout_table(&mut self, tree: &mut BoxTree, id: BoxId, available_width: LayoutUnit) -> Result<()> {
        self.stack(tree, id, available_width)
    }

    fn layout_grid(&mut self, tree: &mut BoxTree, id: BoxId, available_width: LayoutUnit) -> Result<()> {
        self.stack(tree, id, available_width)
    }

    fn flex_config(&self) -> FlexConfig {
        self.config
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub const fn px(value: i32) -> LayoutUnit {
    LayoutUnit::from_px_i32(value)
}

pub const fn length(value: f32) -> Size {
    Size::Length(LengthPercentage::Px(value))
}

pub const fn margin(value: f32) -> LengthPercentageAuto {
    LengthPercentageAuto::Length(LengthPercentage::Px(value))
}

/// Compare a layout length against a pixel value, allowing one layout unit
/// of rounding.
///
/// # Panics
/// Panics if the values differ by more than 1/64px.
#[track_caller]
pub fn assert_px(actual: LayoutUnit, expected: f32) {
    let delta = (actual.to_px() - expected).abs();
    assert!(delta <= 1.0 / 64.0 + f32::EPSILON, "expected {expected}px, got {actual:?}");
}

pub fn row() -> ComputedStyle {
    ComputedStyle::default()
}

pub fn column() -> ComputedStyle {
    ComputedStyle {
        flex_direction: FlexDirection::Column,
        ..ComputedStyle::default()
    }
}

/// Inflexible item with a fixed width and an auto height.
pub fn fixed_width(width: f32) -> ComputedStyle {
    ComputedStyle {
        width: length(width),
        ..ComputedStyle::default()
    }
    .with_flex(0.0, 1.0, FlexBasis::Auto)
}

/// Tree holding a single flex container.
pub fn container(style: ComputedStyle) -> (BoxTree, BoxId) {
    let mut tree = BoxTree::new();
    let id = tree.create(LayoutBox::new(BoxKind::Flex, style));
    (tree, id)
}

/// Append block items with the given styles.
///
/// # Errors
/// Returns an error if the parent is not in the tree.
pub fn add_items(tree: &mut BoxTree, parent: BoxId, styles: &[ComputedStyle]) -> Result<Vec<BoxId>> {
    styles
        .iter()
        .map(|style| tree.append(parent, LayoutBox::new(BoxKind::Block, *style)))
        .collect()
}

/// Append a block with a fixed height, used as item content.
///
/// # Errors
/// Returns an error if the parent is not in the tree.
pub fn add_content(tree: &mut BoxTree, parent: BoxId, height: f32) -> Result<BoxId> {
    let style = ComputedStyle {
        height: length(height),
        ..ComputedStyle::default()
    };
    tree.append(parent, LayoutBox::new(BoxKind::Block, style))
}

/// x, y, width and height of a box.
///
/// # Errors
/// Returns an error if the box is not in the tree.
pub fn geometry(tree: &BoxTree, id: BoxId) -> Result<(LayoutUnit, LayoutUnit, LayoutUnit, LayoutUnit)> {
    let node = tree.get(id)?;
    Ok((
        node.x,
        node.y,
        node.width.unwrap_or(LayoutUnit::ZERO),
        node.height.unwrap_or(LayoutUnit::ZERO),
    ))
}
