// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-instance arbitration for hide decisions.
//!
//! A container must not hide while the pointer rests on it, and it must not fight
//! a sibling either: when the pointer sits over another visible container, or a
//! modal chooser is on screen, every container keeps its place. The check is
//! evaluated against *all* visible frames, not only the container's own.

use dropshelf_surface::ContainerId;
use kurbo::{Point, Rect};

/// Why a hide decision was suppressed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Suppression {
    /// The pointer is inside the container itself.
    PointerInside,
    /// The pointer is inside a sibling container.
    PointerOverSibling(ContainerId),
    /// The modal chooser is on screen.
    ChooserVisible,
}

/// Decide whether `target` may proceed towards hiding.
///
/// `visible` lists the frames of every visible container (the target included).
/// When frames overlap, the target's own frame is checked first and then siblings
/// in the given order.
pub fn arbitrate(
    target: ContainerId,
    pointer: Point,
    visible: &[(ContainerId, Rect)],
    chooser_visible: bool,
) -> Option<Suppression> {
    if visible
        .iter()
        .any(|(id, frame)| *id == target && frame.contains(pointer))
    {
        return Some(Suppression::PointerInside);
    }
    if let Some((sibling, _)) = visible
        .iter()
        .find(|(id, frame)| *id != target && frame.contains(pointer))
    {
        return Some(Suppression::PointerOverSibling(*sibling));
    }
    chooser_visible.then_some(Suppression::ChooserVisible)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ContainerId = ContainerId::new(0);
    const B: ContainerId = ContainerId::new(1);

    fn frames() -> Vec<(ContainerId, Rect)> {
        vec![
            (A, Rect::new(0.0, 0.0, 100.0, 100.0)),
            (B, Rect::new(200.0, 0.0, 300.0, 100.0)),
        ]
    }

    #[test]
    fn own_bounds_win() {
        assert_eq!(
            arbitrate(A, Point::new(50.0, 50.0), &frames(), true),
            Some(Suppression::PointerInside)
        );
    }

    #[test]
    fn sibling_bounds_suppress() {
        assert_eq!(
            arbitrate(A, Point::new(250.0, 50.0), &frames(), false),
            Some(Suppression::PointerOverSibling(B))
        );
    }

    #[test]
    fn chooser_suppresses_everyone() {
        assert_eq!(
            arbitrate(A, Point::new(150.0, 500.0), &frames(), true),
            Some(Suppression::ChooserVisible)
        );
    }

    #[test]
    fn open_space_allows_hiding() {
        assert_eq!(arbitrate(A, Point::new(150.0, 500.0), &frames(), false), None);
    }

    #[test]
    fn hidden_siblings_are_not_consulted() {
        // Only visible frames are passed in; B is off screen.
        let only_a = &frames()[..1];
        assert_eq!(arbitrate(A, Point::new(250.0, 50.0), only_a, false), None);
    }
}
