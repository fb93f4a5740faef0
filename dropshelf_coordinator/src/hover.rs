// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking: turn pointer motion into enter/leave hints for containers.
//!
//! ## Usage
//!
//! 1) Hit-test the pointer against visible containers with [`topmost_at`].
//! 2) Feed the result to [`HoverState::update`] to get `Enter(..)` / `Leave(..)` events.
//! 3) Treat `Leave` as a request to arm the hide deadline and `Enter` as a request
//!    to cancel it. These are hints only; the scheduler alone commits transitions.
//!
//! ## Minimal example
//!
//! ```
//! use dropshelf_coordinator::hover::{HoverEvent, HoverState};
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(h.update(Some(1)), vec![HoverEvent::Enter(1)]);
//! assert_eq!(h.update(Some(2)), vec![HoverEvent::Leave(1), HoverEvent::Enter(2)]);
//! assert_eq!(h.update(None), vec![HoverEvent::Leave(2)]);
//! ```

use dropshelf_surface::{Container, ContainerId, Stacking};
use kurbo::Point;

/// A hover state machine over a single hovered target.
///
/// Containers are flat (no nesting), so the hovered "path" is at most one element.
/// When updated, the state emits the leave for the old target before the enter for
/// the new one, matching common UI expectations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    current: Option<K>,
}

/// A hover transition event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// Pointer entered the given target.
    Enter(K),
    /// Pointer left the given target.
    Leave(K),
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// The currently hovered target.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Forget the hovered target, returning the corresponding leave event.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        self.current.take().map(HoverEvent::Leave).into_iter().collect()
    }

    /// Forget `target` without emitting events (for example when it was destroyed).
    pub fn forget(&mut self, target: K) {
        if self.current == Some(target) {
            self.current = None;
        }
    }

    /// Update the hovered target and return the transitions required to get there.
    pub fn update(&mut self, next: Option<K>) -> Vec<HoverEvent<K>> {
        if self.current == next {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(2);
        if let Some(old) = self.current {
            out.push(HoverEvent::Leave(old));
        }
        if let Some(new) = next {
            out.push(HoverEvent::Enter(new));
        }
        self.current = next;
        out
    }
}

/// Find the topmost visible container under `pt`.
///
/// Candidates are ranked by the z-order reported in `stacking` (unknown z ranks
/// below any known z). Equal ranks are stable and the last candidate wins, so
/// later-spawned containers sit above earlier ones.
pub fn topmost_at<'a, I, S>(containers: I, pt: Point, stacking: S) -> Option<ContainerId>
where
    I: IntoIterator<Item = &'a Container>,
    S: Fn(ContainerId) -> Stacking,
{
    let mut best: Option<(Option<i32>, ContainerId)> = None;
    for c in containers {
        if !c.is_visible() || !c.contains(pt) {
            continue;
        }
        let z = stacking(c.id()).z;
        match best {
            // Strictly nearer candidates replace; ties keep the later one.
            Some((best_z, _)) if best_z > z => {}
            _ => best = Some((z, c.id())),
        }
    }
    best.map(|(_, id)| id)
}
