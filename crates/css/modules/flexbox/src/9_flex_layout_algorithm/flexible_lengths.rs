//! Resolving flexible lengths.
//! CSS Flexbox §9.7: <https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths>

use anyhow::{Context as _, Result};
use css_box::{Distributor, Fixed, LayoutUnit};
use log::{debug, trace};

use crate::chapter3::FlexContext;
use crate::chapter4::FlexItem;
use crate::chapter6::FlexLine;

/// Resolve the line at `line_index` of `ctx` in place.
pub(crate) fn resolve_flexible_lengths(ctx: &mut FlexContext, line_index: usize) -> Result<()> {
    let line = ctx
        .lines
        .get_mut(line_index)
        .with_context(|| format!("flex line {line_index} does not exist"))?;
    let items = ctx
        .items
        .get_mut(line.range())
        .with_context(|| format!("flex line {line_index} exceeds the item array"))?;
    resolve_line(items, line, ctx.available_main, ctx.main_gap);
    Ok(())
}

/// Run the freeze loop over the items of one line.
///
/// `available_main` of `None` resolves against the line's own hypothetical
/// size. On return every in-flow item has its final `target_main_size`, and
/// `main_size` is updated to match.
pub fn resolve_line(
    items: &mut [FlexItem],
    line: &mut FlexLine,
    available_main: Option<LayoutUnit>,
    main_gap: LayoutUnit,
) {
    let gaps = line.gap_total(main_gap);
    let hypothetical = line.main_size - gaps;
    let available = available_main.map_or(hypothetical, |available| available - gaps);
    let grow = hypothetical < available;

    line.frozen = 0;
    line.used_main_size = LayoutUnit::ZERO;
    for item in items.iter_mut() {
        item.frozen = false;
        item.min_violation = false;
        item.max_violation = false;
        item.target_main_size = item.main_size;
    }

    freeze_inflexible(items, line, grow);

    let (initial_free, _) = remaining_free_space(items, available, grow);
    debug!(
        target: "css::flexbox::resolve",
        "[FLEX-RESOLVE] items={} available={} hypothetical={} grow={} initial_free={}",
        line.count,
        available,
        hypothetical,
        grow,
        initial_free
    );

    // Every round freezes at least one item.
    for round in 0..=items.len() {
        if line.frozen >= line.count {
            break;
        }
        let (mut remaining, factor_sum) = remaining_free_space(items, available, grow);
        if factor_sum < Fixed::ONE {
            let damped = initial_free.mul_fixed(factor_sum);
            if damped.abs() < remaining.abs() {
                remaining = damped;
            }
        }
        if !remaining.is_zero() {
            if grow {
                distribute_grow(items, remaining, factor_sum);
            } else {
                distribute_shrink(items, line, remaining);
            }
        }
        let total_violation = fix_violations(items);
        freeze_violators(items, line, total_violation);
        trace!(
            target: "css::flexbox::resolve",
            "[FLEX-RESOLVE] round={round} remaining={remaining} violation={total_violation} frozen={}/{}",
            line.frozen,
            line.count
        );
    }

    for item in items.iter_mut().filter(|item| !item.out_of_flow) {
        item.main_size = item.target_main_size;
    }
}

fn freeze(item: &mut FlexItem, line: &mut FlexLine) {
    item.frozen = true;
    line.frozen += 1;
    if !item.out_of_flow {
        line.used_main_size += item.target_main_size;
    }
}

/// Inflexible items keep their hypothetical size.
fn freeze_inflexible(items: &mut [FlexItem], line: &mut FlexLine, grow: bool) {
    for item in items.iter_mut() {
        let factor = if grow { item.grow } else { item.shrink };
        if item.out_of_flow
            || factor.is_zero()
            || (grow && item.base_size > item.main_size)
            || (!grow && item.base_size < item.main_size)
        {
            item.target_main_size = item.main_size;
            freeze(item, line);
        }
    }
}

/// A zero total freezes everything; otherwise only the items clamped in the
/// direction of the total.
fn freeze_violators(items: &mut [FlexItem], line: &mut FlexLine, total_violation: LayoutUnit) {
    for item in items.iter_mut().filter(|item| !item.frozen) {
        if total_violation.is_zero()
            || (total_violation > LayoutUnit::ZERO && item.min_violation)
            || (total_violation < LayoutUnit::ZERO && item.max_violation)
        {
            freeze(item, line);
        }
    }
}

/// Free space left by frozen targets and unfrozen base sizes, and the sum of
/// the unfrozen items' flex factors.
fn remaining_free_space(items: &[FlexItem], available: LayoutUnit, grow: bool) -> (LayoutUnit, Fixed) {
    let mut free = available;
    let mut factor_sum = Fixed::ZERO;
    for item in items.iter().filter(|item| !item.out_of_flow) {
        if item.frozen {
            free -= item.target_main_size;
        } else {
            free -= item.base_size;
            factor_sum = factor_sum + if grow { item.grow } else { item.shrink };
        }
    }
    (free, factor_sum)
}

fn distribute_grow(items: &mut [FlexItem], remaining: LayoutUnit, factor_sum: Fixed) {
    let mut distributor = Distributor::new(remaining, i64::from(factor_sum.raw()));
    for item in items.iter_mut().filter(|item| !item.frozen) {
        item.target_main_size = item.base_size + distributor.share(i64::from(item.grow.raw()));
    }
}

/// Scaled flex shrink factor: `flex-shrink * base size`.
fn scaled_shrink(item: &FlexItem) -> i64 {
    i64::from(item.shrink.raw()) * i64::from(item.base_size.non_negative().raw())
}

fn distribute_shrink(items: &mut [FlexItem], line: &mut FlexLine, remaining: LayoutUnit) {
    let scaled_sum: i64 = items.iter().filter(|item| !item.frozen).map(scaled_shrink).sum();
    if scaled_sum == 0 {
        for item in items.iter_mut().filter(|item| !item.frozen) {
            item.target_main_size = item.main_size;
            freeze(item, line);
        }
        return;
    }
    let mut distributor = Distributor::new(remaining.abs(), scaled_sum);
    for item in items.iter_mut().filter(|item| !item.frozen) {
        let weight = scaled_shrink(item);
        item.target_main_size = item.base_size - distributor.share(weight);
    }
}

/// Clamp unfrozen targets into their limits and return the summed adjustment.
fn fix_violations(items: &mut [FlexItem]) -> LayoutUnit {
    let mut total = LayoutUnit::ZERO;
    for item in items.iter_mut().filter(|item| !item.frozen) {
        let target = item.target_main_size;
        let mut clamped = target;
        item.min_violation = false;
        item.max_violation = false;
        if let Some(max) = item.max_main_outer()
            && clamped > max
        {
            clamped = max;
            item.max_violation = true;
        }
        let min = item.min_main_outer().non_negative();
        if clamped < min {
            clamped = min;
            item.min_violation = true;
            item.max_violation = false;
        }
        total += clamped - target;
        item.target_main_size = clamped;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_box::{BoxTree, LayoutBox, MinSize};

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_px_i32(value)
    }

    /// Items with `(grow, shrink, base)` on one line, hypothetical == base.
    fn line_of(specs: &[(f32, f32, i32)]) -> (Vec<FlexItem>, FlexLine) {
        let mut tree = BoxTree::new();
        let items: Vec<FlexItem> = specs
            .iter()
            .enumerate()
            .map(|(index, &(grow, shrink, base))| {
                let mut item = FlexItem::new(tree.create(LayoutBox::default()), index);
                item.grow = Fixed::from_f32(grow);
                item.shrink = Fixed::from_f32(shrink);
                item.base_size = px(base);
                item.main_size = px(base);
                item
            })
            .collect();
        let line = FlexLine {
            count: items.len(),
            in_flow: items.len(),
            main_size: items.iter().map(|item| item.main_size).sum(),
            ..FlexLine::default()
        };
        (items, line)
    }

    fn sizes(items: &[FlexItem]) -> Vec<LayoutUnit> {
        items.iter().map(|item| item.main_size).collect()
    }

    #[test]
    /// # Panics
    /// Panics if grow factors 1:1:2 do not split 400px as 100/100/200.
    fn grow_distribution_is_proportional() {
        let (mut items, mut line) = line_of(&[(1.0, 1.0, 0), (1.0, 1.0, 0), (2.0, 1.0, 0)]);
        resolve_line(&mut items, &mut line, Some(px(400)), LayoutUnit::ZERO);
        assert_eq!(sizes(&items), vec![px(100), px(100), px(200)]);
        assert_eq!(line.used_main_size, px(400));
        assert_eq!(line.frozen, 3);
    }

    #[test]
    /// # Panics
    /// Panics if inflexible items that exactly fill the line are changed.
    fn inflexible_exact_fit_is_a_no_op() {
        let (mut items, mut line) = line_of(&[(0.0, 0.0, 100), (0.0, 0.0, 150), (0.0, 0.0, 50)]);
        resolve_line(&mut items, &mut line, Some(px(300)), LayoutUnit::ZERO);
        assert!(items.iter().all(|item| item.target_main_size == item.base_size));
    }

    #[test]
    /// # Panics
    /// Panics if shrinking goes below a definite minimum or misses the violation flag.
    fn shrink_stops_at_minimum() {
        let (mut items, mut line) = line_of(&[(0.0, 1.0, 100), (0.0, 1.0, 100)]);
        if let Some(first) = items.first_mut() {
            first.min_main = MinSize::Definite(px(50));
        }
        resolve_line(&mut items, &mut line, Some(px(80)), LayoutUnit::ZERO);
        let first = items.first().map(|item| (item.main_size, item.min_violation));
        assert_eq!(first, Some((px(50), true)));
        assert_eq!(items.get(1).map(|item| item.main_size), Some(px(30)));
    }

    #[test]
    /// # Panics
    /// Panics if heavy overflow drives any size below zero.
    fn overflow_never_goes_negative() {
        let (mut items, mut line) = line_of(&[(0.0, 1.0, 10), (0.0, 3.0, 200), (0.0, 1.0, 0)]);
        resolve_line(&mut items, &mut line, Some(px(-500)), LayoutUnit::ZERO);
        assert!(items.iter().all(|item| item.main_size >= LayoutUnit::ZERO));
    }

    #[test]
    /// # Panics
    /// Panics if a growing item ignores its maximum or the rest is not re-distributed.
    fn max_violation_redistributes() {
        let (mut items, mut line) = line_of(&[(1.0, 1.0, 0), (1.0, 1.0, 0)]);
        if let Some(first) = items.first_mut() {
            first.max_main = Some(px(40));
        }
        resolve_line(&mut items, &mut line, Some(px(200)), LayoutUnit::ZERO);
        assert_eq!(sizes(&items), vec![px(40), px(160)]);
        assert!(items.first().is_some_and(|item| item.max_violation));
    }

    #[test]
    /// # Panics
    /// Panics if factor sums below one take more than their share of free space.
    fn small_factor_sums_are_damped() {
        let (mut items, mut line) = line_of(&[(0.25, 1.0, 0), (0.25, 1.0, 0)]);
        resolve_line(&mut items, &mut line, Some(px(200)), LayoutUnit::ZERO);
        assert_eq!(sizes(&items), vec![px(50), px(50)]);
    }

    #[test]
    /// # Panics
    /// Panics if gaps are not removed from the space handed to items.
    fn gaps_are_not_distributed() {
        let (mut items, mut line) = line_of(&[(1.0, 1.0, 0), (1.0, 1.0, 0)]);
        line.main_size += px(20);
        resolve_line(&mut items, &mut line, Some(px(220)), px(20));
        assert_eq!(sizes(&items), vec![px(100), px(100)]);
    }

    #[test]
    /// # Panics
    /// Panics if uneven splits lose or invent layout units.
    fn uneven_split_conserves_units() {
        let (mut items, mut line) = line_of(&[(1.0, 1.0, 0), (1.0, 1.0, 0), (1.0, 1.0, 0)]);
        resolve_line(&mut items, &mut line, Some(LayoutUnit::from_raw(1000)), LayoutUnit::ZERO);
        let total: LayoutUnit = items.iter().map(|item| item.main_size).sum();
        assert_eq!(total, LayoutUnit::from_raw(1000));
    }
}
