//! Sub-pixel layout lengths using fixed-point arithmetic.
//!
//! Every length the layout engines compute is a whole number of 1/64px units
//! stored as `i32`. Integer arithmetic keeps results identical on every
//! platform, which free-space distribution relies on.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Rem, Sub, SubAssign};

use crate::fixed::Fixed;

/// Fixed-point length in 1/64px units.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct LayoutUnit(i32);

impl LayoutUnit {
    /// Number of fractional bits (1/64px precision).
    pub const FRACTIONAL_BITS: u32 = 6;

    /// Raw units per pixel.
    pub const SCALE: i32 = 1 << Self::FRACTIONAL_BITS;

    pub const ZERO: Self = Self(0);

    /// Create from raw 1/64px units.
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Create from CSS pixels, rounding to the nearest unit.
    #[inline]
    pub fn from_px(pixels: f32) -> Self {
        Self((pixels * Self::SCALE as f32).round() as i32)
    }

    /// Create from whole CSS pixels.
    #[inline]
    pub const fn from_px_i32(pixels: i32) -> Self {
        Self(pixels * Self::SCALE)
    }

    #[inline]
    pub const fn to_px(self) -> f32 {
        self.0 as f32 / Self::SCALE as f32
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Scale by a fraction (`0.25` for `25%`).
    ///
    /// The product is formed in `f64` and rounded once, so the result only
    /// depends on the two inputs.
    #[inline]
    #[must_use]
    pub fn scale(self, fraction: f32) -> Self {
        Self((f64::from(self.0) * f64::from(fraction)).round() as i32)
    }

    /// Multiply by a flex factor, truncating toward zero.
    #[inline]
    #[must_use]
    pub const fn mul_fixed(self, factor: Fixed) -> Self {
        let product = self.0 as i64 * factor.raw() as i64;
        Self((product / Fixed::SCALE as i64) as i32)
    }

    /// Clamp negative lengths to zero.
    #[inline]
    #[must_use]
    pub fn non_negative(self) -> Self {
        self.max(Self::ZERO)
    }
}

impl fmt::Debug for LayoutUnit {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.3}px", self.to_px())
    }
}

impl fmt::Display for LayoutUnit {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.3}", self.to_px())
    }
}

impl Add for LayoutUnit {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for LayoutUnit {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for LayoutUnit {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for LayoutUnit {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for LayoutUnit {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<i32> for LayoutUnit {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self(self.0 * rhs)
    }
}

/// Integer division in raw units; truncates toward zero.
impl Div<i32> for LayoutUnit {
    type Output = Self;

    #[inline]
    fn div(self, rhs: i32) -> Self {
        Self(self.0 / rhs)
    }
}

/// Remainder of [`Div<i32>`], in raw units.
impl Rem<i32> for LayoutUnit {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: i32) -> Self {
        Self(self.0 % rhs)
    }
}

impl Sum for LayoutUnit {
    #[inline]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if pixel conversions do not round to the nearest 1/64px.
    #[test]
    fn pixel_conversions() {
        assert_eq!(LayoutUnit::from_px(8.328_125).raw(), 533);
        assert_eq!(LayoutUnit::from_px_i32(5).raw(), 320);
        assert!((LayoutUnit::from_px(10.0).to_px() - 10.0).abs() < 0.001);
    }

    /// # Panics
    /// Panics if division and remainder do not partition the raw value.
    #[test]
    fn division_and_remainder_partition() {
        let total = LayoutUnit::from_raw(1000);
        let share = total / 3;
        let rest = total % 3;
        assert_eq!(share.raw(), 333);
        assert_eq!(rest.raw(), 1);
        assert_eq!((share * 3 + rest).raw(), 1000);
    }

    /// # Panics
    /// Panics if percentage scaling or factor multiplication is off.
    #[test]
    fn scale_and_factor() {
        let width = LayoutUnit::from_px_i32(300);
        assert_eq!(width.scale(0.5), LayoutUnit::from_px_i32(150));
        assert_eq!(width.mul_fixed(Fixed::ONE), width);
        assert_eq!(width.mul_fixed(Fixed::from_f32(0.5)), LayoutUnit::from_px_i32(150));
        let lengths = [LayoutUnit::from_px_i32(1), LayoutUnit::from_px_i32(2)];
        assert_eq!(lengths.into_iter().sum::<LayoutUnit>(), LayoutUnit::from_px_i32(3));
        assert_eq!(LayoutUnit::from_px_i32(-4).non_negative(), LayoutUnit::ZERO);
    }
}
