//! Computed values consumed by layout.
//!
//! Only the properties that box-model resolution and flex layout read are
//! modelled here. Lengths are CSS pixels as `f32`; percentages are stored as
//! fractions (`0.5` for `50%`).

use core::ops::{Index, IndexMut};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
}

impl Position {
    /// Absolutely positioned boxes do not take part in flow layout.
    #[inline]
    pub const fn is_out_of_flow(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Float {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignItems {
    #[default]
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
}

/// `align-self`; `Auto` takes the container's `align-items`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignSelf {
    #[default]
    Auto,
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
}

impl AlignSelf {
    /// Resolve against the container's `align-items`.
    #[inline]
    pub const fn resolve(self, container: AlignItems) -> AlignItems {
        match self {
            Self::Auto => container,
            Self::Stretch => AlignItems::Stretch,
            Self::FlexStart => AlignItems::FlexStart,
            Self::FlexEnd => AlignItems::FlexEnd,
            Self::Center => AlignItems::Center,
            Self::Baseline => AlignItems::Baseline,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignContent {
    #[default]
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// A `<length-percentage>` value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LengthPercentage {
    Px(f32),
    /// Fraction of the reference size.
    Percent(f32),
}

impl Default for LengthPercentage {
    #[inline]
    fn default() -> Self {
        Self::Px(0.0)
    }
}

/// Margins accept `auto` in addition to lengths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LengthPercentageAuto {
    Auto,
    Length(LengthPercentage),
}

impl Default for LengthPercentageAuto {
    #[inline]
    fn default() -> Self {
        Self::Length(LengthPercentage::default())
    }
}

/// Preferred size (`width` / `height`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Size {
    #[default]
    Auto,
    Length(LengthPercentage),
    MinContent,
    MaxContent,
    FitContent,
}

impl Size {
    #[inline]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum FlexBasis {
    #[default]
    Auto,
    Content,
    Length(LengthPercentage),
}

/// Physical box side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }
}

/// Four physical sides of a box-model property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> Edges<T> {
    #[inline]
    pub const fn uniform(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Apply `map` to every side.
    #[inline]
    pub fn map<U>(self, mut map: impl FnMut(T) -> U) -> Edges<U> {
        Edges {
            top: map(self.top),
            right: map(self.right),
            bottom: map(self.bottom),
            left: map(self.left),
        }
    }
}

impl<T> Index<Side> for Edges<T> {
    type Output = T;

    #[inline]
    fn index(&self, side: Side) -> &T {
        match side {
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
        }
    }
}

impl<T> IndexMut<Side> for Edges<T> {
    #[inline]
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
        }
    }
}

/// Computed style of one box.
///
/// `min_*` of `None` is `auto`; `max_*` of `None` is `none`; a gap of `None`
/// is `normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComputedStyle {
    pub position: Position,
    pub float: Float,
    pub overflow_x: Overflow,
    pub box_sizing: BoxSizing,

    pub width: Size,
    pub height: Size,
    pub min_width: Option<LengthPercentage>,
    pub min_height: Option<LengthPercentage>,
    pub max_width: Option<LengthPercentage>,
    pub max_height: Option<LengthPercentage>,

    pub margin: Edges<LengthPercentageAuto>,
    pub padding: Edges<LengthPercentage>,
    pub border_width: Edges<f32>,

    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: FlexBasis,
    pub order: i32,

    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_self: AlignSelf,
    pub align_content: AlignContent,
    pub row_gap: Option<LengthPercentage>,
    pub column_gap: Option<LengthPercentage>,
}

impl Default for ComputedStyle {
    #[inline]
    fn default() -> Self {
        Self {
            position: Position::default(),
            float: Float::default(),
            overflow_x: Overflow::default(),
            box_sizing: BoxSizing::default(),
            width: Size::Auto,
            height: Size::Auto,
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
            margin: Edges::default(),
            padding: Edges::default(),
            border_width: Edges::default(),
            flex_direction: FlexDirection::default(),
            flex_wrap: FlexWrap::default(),
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: FlexBasis::Auto,
            order: 0,
            justify_content: JustifyContent::default(),
            align_items: AlignItems::default(),
            align_self: AlignSelf::default(),
            align_content: AlignContent::default(),
            row_gap: None,
            column_gap: None,
        }
    }
}

impl ComputedStyle {
    /// `flex: <grow> <shrink> <basis>` shorthand.
    #[inline]
    #[must_use]
    pub const fn with_flex(mut self, grow: f32, shrink: f32, basis: FlexBasis) -> Self {
        self.flex_grow = grow;
        self.flex_shrink = shrink;
        self.flex_basis = basis;
        self
    }

    #[inline]
    pub const fn is_column(&self) -> bool {
        matches!(
            self.flex_direction,
            FlexDirection::Column | FlexDirection::ColumnReverse
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if the initial values differ from CSS initial values used by flex layout.
    fn initial_values_match_css() {
        let style = ComputedStyle::default();
        assert!((style.flex_shrink - 1.0).abs() < f32::EPSILON);
        assert!(style.flex_grow.abs() < f32::EPSILON);
        assert_eq!(style.flex_basis, FlexBasis::Auto);
        assert_eq!(style.align_content, AlignContent::Stretch);
        assert_eq!(style.align_self, AlignSelf::Auto);
        assert!(style.width.is_auto());
        assert!(!style.is_column());
    }

    #[test]
    /// # Panics
    /// Panics if `align-self: auto` does not defer to the container's `align-items`.
    fn align_self_auto_defers_to_container() {
        assert_eq!(AlignSelf::Auto.resolve(AlignItems::Center), AlignItems::Center);
        assert_eq!(AlignSelf::FlexEnd.resolve(AlignItems::Center), AlignItems::FlexEnd);
    }

    #[test]
    /// # Panics
    /// Panics if side indexing does not address the matching field.
    fn edges_index_by_side() {
        let mut edges = Edges::uniform(1_i32);
        edges[Side::Left] = 7;
        assert_eq!(edges.left, 7);
        assert_eq!(edges[Side::Right], 1);
        assert_eq!(Side::Left.opposite(), Side::Right);
        let doubled = edges.map(|value| value * 2);
        assert_eq!(doubled[Side::Left], 14);
    }
}
