//! Box-model resolution against available space.
//! CSS Box Sizing 3: <https://www.w3.org/TR/css-sizing-3/>

use css_orchestrator::style_model::{
    BoxSizing, ComputedStyle, Edges, LengthPercentage, LengthPercentageAuto, Size,
};

use crate::LayoutUnit;
use crate::box_tree::{LayoutBox, MarginEdge};

/// `min-width` / `min-height` after resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MinSize {
    #[default]
    Auto,
    Definite(LayoutUnit),
}

impl MinSize {
    /// The definite value, or zero for `auto`.
    #[inline]
    pub const fn or_zero(self) -> LayoutUnit {
        match self {
            Self::Auto => LayoutUnit::ZERO,
            Self::Definite(length) => length,
        }
    }
}

/// Used box-model values of one box.
///
/// Sizes are content-box sizes; `None` for `width`/`height` means auto or a
/// percentage against an indefinite reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoxDimensions {
    pub width: Option<LayoutUnit>,
    pub height: Option<LayoutUnit>,
    pub min_width: MinSize,
    pub min_height: MinSize,
    pub max_width: Option<LayoutUnit>,
    pub max_height: Option<LayoutUnit>,
    pub margin: Edges<MarginEdge>,
    pub padding: Edges<LayoutUnit>,
    pub border: Edges<LayoutUnit>,
}

impl BoxDimensions {
    /// Copy margins, padding and borders onto `layout_box`.
    #[inline]
    pub const fn apply_edges(&self, layout_box: &mut LayoutBox) {
        layout_box.margin = self.margin;
        layout_box.padding = self.padding;
        layout_box.border = self.border;
    }

    /// Clamp a content width into `[min_width, max_width]`; the minimum wins.
    #[inline]
    pub fn clamp_width(&self, width: LayoutUnit) -> LayoutUnit {
        clamp_size(width, self.min_width, self.max_width)
    }

    /// Clamp a content height into `[min_height, max_height]`; the minimum wins.
    #[inline]
    pub fn clamp_height(&self, height: LayoutUnit) -> LayoutUnit {
        clamp_size(height, self.min_height, self.max_height)
    }

    #[inline]
    fn horizontal_chrome(&self) -> LayoutUnit {
        self.padding.left + self.padding.right + self.border.left + self.border.right
    }

    #[inline]
    fn vertical_chrome(&self) -> LayoutUnit {
        self.padding.top + self.padding.bottom + self.border.top + self.border.bottom
    }
}

#[inline]
fn clamp_size(size: LayoutUnit, min: MinSize, max: Option<LayoutUnit>) -> LayoutUnit {
    let capped = max.map_or(size, |limit| size.min(limit));
    capped.max(min.or_zero())
}

/// Resolve a `<length-percentage>`; percentages need a definite reference.
#[inline]
pub fn resolve_length(value: LengthPercentage, reference: Option<LayoutUnit>) -> Option<LayoutUnit> {
    match value {
        LengthPercentage::Px(pixels) => Some(LayoutUnit::from_px(pixels)),
        LengthPercentage::Percent(fraction) => reference.map(|base| base.scale(fraction)),
    }
}

#[inline]
fn resolve_size(size: Size, reference: Option<LayoutUnit>) -> Option<LayoutUnit> {
    match size {
        Size::Length(value) => resolve_length(value, reference),
        Size::Auto | Size::MinContent | Size::MaxContent | Size::FitContent => None,
    }
}

#[inline]
fn resolve_margin(margin: LengthPercentageAuto, available_width: Option<LayoutUnit>) -> MarginEdge {
    match margin {
        LengthPercentageAuto::Auto => MarginEdge::Auto,
        LengthPercentageAuto::Length(value) => MarginEdge::Fixed(
            resolve_length(value, available_width).unwrap_or(LayoutUnit::ZERO),
        ),
    }
}

/// Resolve `style` against the available space of its containing block.
///
/// Margin and padding percentages refer to the available width on every side.
/// `box-sizing: border-box` sizes are converted to content-box sizes.
pub fn find_dimensions(
    available_width: Option<LayoutUnit>,
    available_height: Option<LayoutUnit>,
    style: &ComputedStyle,
) -> BoxDimensions {
    let margin = style
        .margin
        .map(|value| resolve_margin(value, available_width));
    let padding = style.padding.map(|value| {
        resolve_length(value, available_width)
            .unwrap_or(LayoutUnit::ZERO)
            .non_negative()
    });
    let border = style
        .border_width
        .map(|pixels| LayoutUnit::from_px(pixels).non_negative());

    let mut dims = BoxDimensions {
        margin,
        padding,
        border,
        ..BoxDimensions::default()
    };
    let (width_chrome, height_chrome) = match style.box_sizing {
        BoxSizing::ContentBox => (LayoutUnit::ZERO, LayoutUnit::ZERO),
        BoxSizing::BorderBox => (dims.horizontal_chrome(), dims.vertical_chrome()),
    };
    let to_content = |length: LayoutUnit, chrome: LayoutUnit| (length - chrome).non_negative();

    dims.width = resolve_size(style.width, available_width)
        .map(|length| to_content(length, width_chrome));
    dims.height = resolve_size(style.height, available_height)
        .map(|length| to_content(length, height_chrome));
    dims.min_width = style
        .min_width
        .and_then(|value| resolve_length(value, available_width))
        .map_or(MinSize::Auto, |length| {
            MinSize::Definite(to_content(length, width_chrome))
        });
    dims.min_height = style
        .min_height
        .and_then(|value| resolve_length(value, available_height))
        .map_or(MinSize::Auto, |length| {
            MinSize::Definite(to_content(length, height_chrome))
        });
    dims.max_width = style
        .max_width
        .and_then(|value| resolve_length(value, available_width))
        .map(|length| to_content(length, width_chrome));
    dims.max_height = style
        .max_height
        .and_then(|value| resolve_length(value, available_height))
        .map(|length| to_content(length, height_chrome));
    dims
}
