// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The auto-hide scheduler: a fixed-interval, level-triggered evaluator.
//!
//! Hover notifications from a UI toolkit get lost (fast pointer motion, overlapping
//! surfaces), so the scheduler does not trust them. On every tick it re-derives,
//! for each container, whether a hide deadline should exist and whether it has
//! expired. Reactive hints may arm or clear a deadline early; only the scheduler
//! commits the transition to [`Visibility::AutoHidden`](dropshelf_surface::Visibility::AutoHidden).
//!
//! Per container, in order:
//!
//! 1. not visible, auto-hide disabled, or empty: clear the deadline;
//! 2. pointer inside the container: clear the deadline;
//! 3. pointer over a sibling, or the chooser is shown: clear the deadline;
//! 4. no deadline yet: arm one at `now + delay`;
//! 5. deadline expired and no guard active: auto-hide.

use std::time::{Duration, Instant};

use dropshelf_surface::{ContainerId, HidePolicy, Presenter};
use kurbo::{Point, Rect};

use crate::arbitration::{Suppression, arbitrate};
use crate::registry::Registry;

/// Inputs sampled once per tick.
#[derive(Copy, Clone, Debug)]
pub struct TickContext<'a> {
    /// Tick timestamp.
    pub now: Instant,
    /// Pointer location in global coordinates, if known.
    pub pointer: Option<Point>,
    /// Whether the modal chooser is on screen.
    pub chooser_visible: bool,
    /// Auto-hide policy read from config for this tick.
    pub policy: HidePolicy,
    /// Containers with an active file operation or share.
    pub busy: &'a [ContainerId],
}

/// What a tick did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Containers whose deadline was armed on this tick.
    pub armed: Vec<ContainerId>,
    /// Containers whose pending deadline was cleared on this tick.
    pub cleared: Vec<ContainerId>,
    /// Containers kept on screen by the pointer or the chooser.
    pub suppressed: Vec<(ContainerId, Suppression)>,
    /// Containers moved to auto-hidden.
    pub hidden: Vec<ContainerId>,
    /// Containers past their deadline but held back by a guard.
    pub deferred: Vec<ContainerId>,
}

impl TickReport {
    /// True if nothing changed.
    pub fn is_quiet(&self) -> bool {
        self.armed.is_empty() && self.cleared.is_empty() && self.hidden.is_empty()
    }
}

/// Fixed-interval evaluator.
#[derive(Clone, Debug)]
pub struct AutoHideScheduler {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl Default for AutoHideScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

impl AutoHideScheduler {
    /// Create a scheduler ticking every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Tick interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the tick interval. The next tick is due relative to the last one.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Timestamp of the last evaluation.
    pub fn last_tick(&self) -> Option<Instant> {
        self.last_tick
    }

    /// Whether a tick is due at `now`. Always true before the first tick.
    pub fn is_due(&self, now: Instant) -> bool {
        self.last_tick
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }

    /// Evaluate every container once.
    pub fn tick(
        &mut self,
        registry: &mut Registry,
        cx: TickContext<'_>,
        presenter: &mut dyn Presenter,
    ) -> TickReport {
        let _span = tracing::debug_span!("auto_hide_tick").entered();
        self.last_tick = Some(cx.now);

        let visible: Vec<(ContainerId, Rect)> = registry
            .iter()
            .filter(|c| c.is_visible())
            .map(|c| (c.id(), c.frame()))
            .collect();
        let mut report = TickReport::default();

        for c in registry.iter_mut() {
            let id = c.id();
            if !c.is_visible() || !cx.policy.enabled || c.is_empty() {
                if c.cancel_hide_timer() {
                    report.cleared.push(id);
                }
                continue;
            }

            let suppression = match cx.pointer {
                Some(pointer) => arbitrate(id, pointer, &visible, cx.chooser_visible),
                None => cx.chooser_visible.then_some(Suppression::ChooserVisible),
            };
            if let Some(reason) = suppression {
                if c.cancel_hide_timer() {
                    report.cleared.push(id);
                }
                report.suppressed.push((id, reason));
                continue;
            }

            let deadline = match c.hide_deadline() {
                Some(deadline) => deadline,
                None => {
                    report.armed.push(id);
                    c.arm_hide_deadline(cx.now, cx.policy.delay)
                }
            };
            if cx.now < deadline {
                continue;
            }

            if c.is_guarded(cx.busy.contains(&id)) {
                report.deferred.push(id);
                continue;
            }
            match c.auto_hide(presenter) {
                Ok(_) => report.hidden.push(id),
                Err(rejected) => {
                    tracing::debug!(container = %id, %rejected, "auto-hide dropped");
                    report.deferred.push(id);
                }
            }
        }

        if !report.is_quiet() {
            tracing::debug!(
                armed = report.armed.len(),
                cleared = report.cleared.len(),
                hidden = report.hidden.len(),
                deferred = report.deferred.len(),
                "tick committed"
            );
        }
        report
    }
}
