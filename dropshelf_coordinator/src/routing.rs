// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure routing: decide which container acts on a trigger.
//!
//! [`route`] looks only at a [`Snapshot`] of the registry and the pointer position
//! and returns a [`Decision`]. It never touches a live container, so every rule can
//! be tested without surfaces; the [`Coordinator`](crate::Coordinator) executes the
//! decision.
//!
//! ## Ingest
//!
//! Items arriving from a non-drag source (paste, deep link, watched folder) go to,
//! in priority order:
//!
//! 1. the frontmost visible container (highest z, else the key container, else the
//!    first visible one);
//! 2. in multi mode, the first spawned container that is off screen but holds items;
//! 3. in multi mode, the primary container if it holds items;
//! 4. the primary container.
//!
//! ## Jiggle
//!
//! A jiggle during an active drag reveals stored containers side by side (or the
//! primary at the pointer when nothing is stored), spawns a second container when
//! exactly one is visible in multi mode, and opens the chooser when two or more are
//! visible. In single mode nothing happens once a container is on screen.

use dropshelf_surface::{Container, ContainerId, Stacking, Visibility};
use kurbo::Point;

use crate::layout::side_by_side;
use crate::registry::{Mode, Registry};

/// What the router knows about one container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Container id.
    pub id: ContainerId,
    /// Visibility at snapshot time.
    pub visibility: Visibility,
    /// Number of items held.
    pub item_count: usize,
    /// Stacking reported by the presenter.
    pub stacking: Stacking,
}

impl Candidate {
    /// Capture a container.
    pub fn of(container: &Container, stacking: Stacking) -> Self {
        Self {
            id: container.id(),
            visibility: container.visibility(),
            item_count: container.collection().len(),
            stacking,
        }
    }

    fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }
}

/// Read-only view of the registry for routing.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Mode the registry is in.
    pub mode: Mode,
    /// Mode the config store asks for.
    pub configured: Mode,
    /// Every container, primary first.
    pub candidates: Vec<Candidate>,
    /// A drag is in progress.
    pub drag_active: bool,
    /// The modal chooser is on screen.
    pub chooser_visible: bool,
    /// Width of a reveal slot.
    pub slot_width: f64,
    /// Gap between reveal slots.
    pub slot_spacing: f64,
}

impl Snapshot {
    /// Capture `registry`, asking `stacking` for each container's z-order.
    pub fn capture(
        registry: &Registry,
        configured: Mode,
        stacking: impl Fn(ContainerId) -> Stacking,
    ) -> Self {
        let template = registry.template();
        Self {
            mode: registry.mode(),
            configured,
            candidates: registry
                .iter()
                .map(|c| Candidate::of(c, stacking(c.id())))
                .collect(),
            drag_active: false,
            chooser_visible: false,
            slot_width: template.size.width,
            slot_spacing: 16.0,
        }
    }

    /// Builder: set drag state.
    #[must_use]
    pub fn with_drag(mut self, active: bool) -> Self {
        self.drag_active = active;
        self
    }

    /// Builder: set chooser state.
    #[must_use]
    pub fn with_chooser(mut self, visible: bool) -> Self {
        self.chooser_visible = visible;
        self
    }

    /// Builder: set reveal slot spacing.
    #[must_use]
    pub fn with_slot_spacing(mut self, spacing: f64) -> Self {
        self.slot_spacing = spacing;
        self
    }

    fn visible(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.candidates.iter().filter(|c| c.is_visible())
    }
}

/// What triggered routing.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Trigger {
    /// Items arrived from a non-drag source.
    Ingest,
    /// The drag-gesture heuristic fired.
    Jiggle,
}

/// Why a trigger was ignored.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IgnoreReason {
    /// A jiggle arrived with no drag in progress.
    NoDrag,
    /// Single mode and a container is already visible.
    SingleModeVisible,
    /// The chooser is already open.
    ChooserOpen,
}

/// Outcome of [`route`].
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    /// Add the items to `target` and reveal it.
    Deliver {
        /// Receiving container.
        target: ContainerId,
        /// Merge every spawned container into the primary first.
        merge_first: bool,
    },
    /// Reveal the primary container centered on `at`.
    RevealPrimary {
        /// Center point.
        at: Point,
    },
    /// Reveal every listed container, each centered on its slot.
    RevealStored(Vec<(ContainerId, Point)>),
    /// Spawn a new container centered on `at`.
    Spawn {
        /// Center point.
        at: Point,
    },
    /// Present the chooser over the listed containers.
    Choose(Vec<ContainerId>),
    /// Do nothing.
    Ignore(IgnoreReason),
}

/// Decide what `trigger` should do.
///
/// ```
/// use dropshelf_coordinator::registry::Mode;
/// use dropshelf_coordinator::routing::{Decision, Snapshot, Trigger, route};
/// use dropshelf_surface::{ContainerId, Stacking, Visibility};
/// use dropshelf_coordinator::routing::Candidate;
/// use kurbo::Point;
///
/// let primary = Candidate {
///     id: ContainerId::PRIMARY,
///     visibility: Visibility::Hidden,
///     item_count: 0,
///     stacking: Stacking::default(),
/// };
/// let snapshot = Snapshot {
///     mode: Mode::Multi,
///     configured: Mode::Multi,
///     candidates: vec![primary],
///     drag_active: true,
///     chooser_visible: false,
///     slot_width: 280.0,
///     slot_spacing: 16.0,
/// };
/// let at = Point::new(500.0, 500.0);
/// assert_eq!(route(Trigger::Jiggle, &snapshot, at), Decision::RevealPrimary { at });
/// ```
pub fn route(trigger: Trigger, snapshot: &Snapshot, pointer: Point) -> Decision {
    match trigger {
        Trigger::Ingest => route_ingest(snapshot),
        Trigger::Jiggle => route_jiggle(snapshot, pointer),
    }
}

fn route_ingest(snapshot: &Snapshot) -> Decision {
    let merge_first = snapshot.mode == Mode::Multi && snapshot.configured == Mode::Single;
    if merge_first {
        // After the merge only the primary is left.
        return Decision::Deliver {
            target: ContainerId::PRIMARY,
            merge_first,
        };
    }
    let stored_spawned = || {
        if snapshot.mode != Mode::Multi {
            return None;
        }
        snapshot
            .candidates
            .iter()
            .find(|c| !c.id.is_primary() && !c.is_visible() && c.item_count > 0)
            .map(|c| c.id)
    };
    let target = frontmost(snapshot)
        .or_else(stored_spawned)
        .unwrap_or(ContainerId::PRIMARY);
    Decision::Deliver {
        target,
        merge_first,
    }
}

/// Frontmost visible candidate: highest known z (later wins ties), else the key
/// container, else the first visible one.
fn frontmost(snapshot: &Snapshot) -> Option<ContainerId> {
    let by_z = snapshot
        .visible()
        .filter_map(|c| c.stacking.z.map(|z| (z, c.id)))
        .fold(None::<(i32, ContainerId)>, |best, (z, id)| match best {
            Some((best_z, _)) if best_z > z => best,
            _ => Some((z, id)),
        });
    if let Some((_, id)) = by_z {
        return Some(id);
    }
    snapshot
        .visible()
        .find(|c| c.stacking.key)
        .or_else(|| snapshot.visible().next())
        .map(|c| c.id)
}

fn route_jiggle(snapshot: &Snapshot, pointer: Point) -> Decision {
    if !snapshot.drag_active {
        return Decision::Ignore(IgnoreReason::NoDrag);
    }
    if snapshot.chooser_visible {
        return Decision::Ignore(IgnoreReason::ChooserOpen);
    }
    let visible: Vec<ContainerId> = snapshot.visible().map(|c| c.id).collect();
    if visible.is_empty() {
        let stored: Vec<ContainerId> = snapshot
            .candidates
            .iter()
            .filter(|c| c.item_count > 0)
            .map(|c| c.id)
            .collect();
        if stored.is_empty() {
            return Decision::RevealPrimary { at: pointer };
        }
        let slots = side_by_side(
            pointer,
            stored.len(),
            snapshot.slot_width,
            snapshot.slot_spacing,
        );
        return Decision::RevealStored(stored.into_iter().zip(slots).collect());
    }
    if snapshot.configured == Mode::Single {
        return Decision::Ignore(IgnoreReason::SingleModeVisible);
    }
    if visible.len() == 1 {
        Decision::Spawn { at: pointer }
    } else {
        Decision::Choose(visible)
    }
}
