//! Fixed-point scalars for flex factors and exact proportional splitting.

use core::ops::Add;

use crate::layout_unit::LayoutUnit;

/// Non-negative scalar with 10 fractional bits (`flex-grow`, `flex-shrink`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Fixed(i32);

impl Fixed {
    pub const FRACTIONAL_BITS: u32 = 10;
    pub const SCALE: i32 = 1 << Self::FRACTIONAL_BITS;
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(Self::SCALE);

    /// Convert a computed factor; negative and NaN inputs become zero.
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        if value.is_nan() || value <= 0.0 {
            return Self::ZERO;
        }
        Self((value * Self::SCALE as f32).round() as i32)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Fixed {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

/// Splits a length across weighted recipients without losing units.
///
/// Each call to [`Distributor::share`] returns the difference between the
/// exact cumulative share after this recipient and everything handed out so
/// far. Once the weights passed in add up to `weight_sum`, the shares add up
/// to `total` exactly.
#[derive(Clone, Copy, Debug)]
pub struct Distributor {
    total: i128,
    weight_sum: i128,
    weight_seen: i128,
    handed_out: i128,
}

impl Distributor {
    #[inline]
    pub fn new(total: LayoutUnit, weight_sum: i64) -> Self {
        Self {
            total: i128::from(total.raw()),
            weight_sum: i128::from(weight_sum),
            weight_seen: 0,
            handed_out: 0,
        }
    }

    /// Share for the next recipient.
    #[inline]
    pub fn share(&mut self, weight: i64) -> LayoutUnit {
        if self.weight_sum == 0 {
            return LayoutUnit::ZERO;
        }
        self.weight_seen += i128::from(weight);
        let cumulative = self.total * self.weight_seen / self.weight_sum;
        let share = cumulative - self.handed_out;
        self.handed_out = cumulative;
        LayoutUnit::from_raw(share as i32)
    }
}

/// Even split of `total` across `slots`, with the leftover handed out one raw
/// unit at a time to the first slots.
#[derive(Clone, Copy, Debug)]
pub struct EvenSplit {
    each: LayoutUnit,
    leftover: i32,
}

impl EvenSplit {
    #[inline]
    pub fn new(total: LayoutUnit, slots: usize) -> Self {
        let Ok(count) = i32::try_from(slots) else {
            return Self {
                each: LayoutUnit::ZERO,
                leftover: 0,
            };
        };
        if count == 0 {
            return Self {
                each: LayoutUnit::ZERO,
                leftover: 0,
            };
        }
        Self {
            each: total / count,
            leftover: (total % count).raw(),
        }
    }

    /// Size of the next slot.
    #[inline]
    pub fn next_slot(&mut self) -> LayoutUnit {
        match self.leftover.signum() {
            1 => {
                self.leftover -= 1;
                self.each + LayoutUnit::from_raw(1)
            }
            -1 => {
                self.leftover += 1;
                self.each - LayoutUnit::from_raw(1)
            }
            _ => self.each,
        }
    }

    /// Size every slot gets before leftover units.
    #[inline]
    pub const fn base(&self) -> LayoutUnit {
        self.each
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if negative or NaN flex factors are not clamped to zero.
    #[test]
    fn factors_are_non_negative() {
        assert_eq!(Fixed::from_f32(-2.0), Fixed::ZERO);
        assert_eq!(Fixed::from_f32(f32::NAN), Fixed::ZERO);
        assert_eq!(Fixed::from_f32(1.0), Fixed::ONE);
        assert_eq!(Fixed::from_f32(2.5).raw(), 2560);
    }

    /// # Panics
    /// Panics if distributed shares do not add up to the total.
    #[test]
    fn distributor_conserves_total() {
        let total = LayoutUnit::from_raw(1001);
        let weights = [1_i64, 1, 1];
        let mut distributor = Distributor::new(total, weights.iter().sum());
        let shares: Vec<LayoutUnit> = weights.iter().map(|weight| distributor.share(*weight)).collect();
        assert_eq!(shares.iter().copied().sum::<LayoutUnit>(), total);
        assert!(shares.iter().all(|share| (share.raw() - 333).abs() <= 1));
    }

    /// # Panics
    /// Panics if negative totals are not split exactly.
    #[test]
    fn distributor_handles_negative_total() {
        let total = LayoutUnit::from_raw(-100);
        let mut distributor = Distributor::new(total, 3);
        let first = distributor.share(1);
        let second = distributor.share(2);
        assert_eq!(first.raw(), -33);
        assert_eq!((first + second).raw(), -100);
    }

    /// # Panics
    /// Panics if even split leftovers are not given to the first slots.
    #[test]
    fn even_split_leftover_goes_first() {
        let mut split = EvenSplit::new(LayoutUnit::from_raw(10), 3);
        assert_eq!(split.base().raw(), 3);
        let slots = [split.next_slot(), split.next_slot(), split.next_slot()];
        assert_eq!(slots.map(LayoutUnit::raw), [4, 3, 3]);
        let mut empty = EvenSplit::new(LayoutUnit::from_raw(10), 0);
        assert_eq!(empty.next_slot(), LayoutUnit::ZERO);
    }
}
