// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side-by-side placement for revealing several containers at once.

use kurbo::Point;

/// Centers of `count` fixed-width slots laid out in a row, centered on `anchor`.
///
/// Slots are `slot_width` wide and separated by `spacing`. The row is horizontal;
/// every slot shares the anchor's `y`.
///
/// ```
/// use dropshelf_coordinator::layout::side_by_side;
/// use kurbo::Point;
///
/// let slots = side_by_side(Point::new(500.0, 400.0), 2, 200.0, 20.0);
/// assert_eq!(slots, vec![Point::new(390.0, 400.0), Point::new(610.0, 400.0)]);
/// ```
pub fn side_by_side(anchor: Point, count: usize, slot_width: f64, spacing: f64) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    #[allow(
        clippy::cast_precision_loss,
        reason = "slot counts are tiny; no precision is lost."
    )]
    let n = count as f64;
    let total = n * slot_width + (n - 1.0) * spacing;
    let first = anchor.x - total / 2.0 + slot_width / 2.0;
    (0..count)
        .map(|i| {
            #[allow(
                clippy::cast_precision_loss,
                reason = "slot counts are tiny; no precision is lost."
            )]
            let x = first + i as f64 * (slot_width + spacing);
            Point::new(x, anchor.y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_slot_sits_on_anchor() {
        let anchor = Point::new(120.0, 80.0);
        assert_eq!(side_by_side(anchor, 1, 280.0, 16.0), vec![anchor]);
    }

    #[test]
    fn row_is_symmetric_around_anchor() {
        let anchor = Point::new(0.0, 0.0);
        let slots = side_by_side(anchor, 3, 100.0, 10.0);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[1], anchor);
        assert_eq!(slots[0].x, -slots[2].x);
        assert_eq!(slots[2].x - slots[1].x, 110.0);
    }

    #[test]
    fn no_slots_for_zero_count() {
        assert!(side_by_side(Point::ORIGIN, 0, 100.0, 10.0).is_empty());
    }
}
