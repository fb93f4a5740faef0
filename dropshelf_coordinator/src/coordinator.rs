// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinator facade: triggers in, container transitions out.

use core::fmt;
use std::time::Instant;

use dropshelf_items::{Item, Locator};
use dropshelf_surface::{
    BusyGuards, Container, ContainerId, DisplayTopology, Presenter, Shortcut, ShowRequest, Shown,
    TransitionToken,
};
use kurbo::Point;

use crate::config::ConfigStore;
use crate::hover::{HoverEvent, HoverState, topmost_at};
use crate::registry::{MergeSummary, Mode, Registry, Template};
use crate::routing::{Decision, Snapshot, Trigger, route};
use crate::scheduler::{AutoHideScheduler, TickContext, TickReport};

/// The modal surface listing visible containers for the user to pick from.
pub trait Chooser {
    /// Show the chooser over `containers`.
    fn present_chooser(&mut self, containers: &[ContainerId]);

    /// Hide the chooser.
    fn dismiss_chooser(&mut self);
}

/// Everything the coordinator needs from its environment.
///
/// Implemented automatically for any type providing all the collaborator traits.
pub trait Host: ConfigStore + Presenter + Chooser + BusyGuards + DisplayTopology {}

impl<T> Host for T where
    T: ConfigStore + Presenter + Chooser + BusyGuards + DisplayTopology + ?Sized
{
}

type PickCallback = Box<dyn FnMut(ContainerId)>;

/// Owns the registry and the scheduler and turns external triggers into
/// container transitions.
///
/// All methods run on the single control thread. Guard rejections are logged and
/// swallowed; no trigger entry point fails.
///
/// ```
/// use dropshelf_coordinator::Coordinator;
/// use dropshelf_coordinator::config::Settings;
/// use dropshelf_coordinator::routing::Decision;
/// use dropshelf_coordinator::testing::RecordingHost;
/// use kurbo::Point;
///
/// let host = RecordingHost::new(Settings { multi_container_mode: true, ..Settings::default() });
/// let mut shelf = Coordinator::new(host);
/// let at = Point::new(500.0, 500.0);
///
/// assert_eq!(shelf.on_jiggle_detected(at), Decision::RevealPrimary { at });
/// assert_eq!(shelf.on_jiggle_detected(at), Decision::Spawn { at });
/// assert!(matches!(shelf.on_jiggle_detected(at), Decision::Choose(ids) if ids.len() == 2));
/// assert_eq!(shelf.registry().spawned().len(), 1);
/// ```
pub struct Coordinator<H> {
    host: H,
    registry: Registry,
    scheduler: AutoHideScheduler,
    hover: HoverState<ContainerId>,
    chooser: Option<Vec<ContainerId>>,
    drag_active: bool,
    gesture_revealed: Vec<ContainerId>,
    on_pick: Option<PickCallback>,
}

impl<H: fmt::Debug> fmt::Debug for Coordinator<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("host", &self.host)
            .field("registry", &self.registry)
            .field("scheduler", &self.scheduler)
            .field("hover", &self.hover)
            .field("chooser", &self.chooser)
            .field("drag_active", &self.drag_active)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Coordinator<H> {
    /// Create a coordinator with a hidden, empty primary container.
    ///
    /// Mode, container shape and tick interval are read from `host`.
    pub fn new(host: H) -> Self {
        let layout = host.layout();
        let mode = Mode::from_multi_enabled(host.multi_container_mode_enabled());
        Self {
            registry: Registry::new(mode, template_of(&host)),
            scheduler: AutoHideScheduler::new(layout.tick_interval),
            hover: HoverState::new(),
            chooser: None,
            drag_active: false,
            gesture_revealed: Vec::new(),
            on_pick: None,
            host,
        }
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &AutoHideScheduler {
        &self.scheduler
    }

    /// Current registry mode.
    pub fn mode(&self) -> Mode {
        self.registry.mode()
    }

    /// Containers listed by the open chooser.
    pub fn chooser(&self) -> Option<&[ContainerId]> {
        self.chooser.as_deref()
    }

    /// Whether a drag is in progress.
    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// Look up a container.
    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.registry.get(id)
    }

    /// Look up a container, mutably (item mutation, selection drag, rename).
    pub fn container_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        self.registry.get_mut(id)
    }

    /// Register the callback invoked when the user picks a container in the chooser.
    pub fn on_pick(&mut self, callback: impl FnMut(ContainerId) + 'static) {
        self.on_pick = Some(Box::new(callback));
    }

    /// Bring the registry in line with the config store.
    ///
    /// Config is the single source of truth: when it no longer allows multiple
    /// containers, every spawned container is merged into the primary.
    pub fn sync_mode(&mut self) -> Option<MergeSummary> {
        self.registry.set_template(template_of(&self.host));
        self.scheduler.set_interval(self.host.layout().tick_interval);
        let configured = Mode::from_multi_enabled(self.host.multi_container_mode_enabled());
        match (self.registry.mode(), configured) {
            (Mode::Multi, Mode::Single) => Some(self.enforce_single_mode()),
            (Mode::Single, Mode::Multi) => {
                self.registry.enter_multi_mode();
                tracing::debug!("entered multi mode");
                None
            }
            _ => None,
        }
    }

    /// Merge every spawned container into the primary and switch to single mode.
    pub fn enforce_single_mode(&mut self) -> MergeSummary {
        let displays = self.host.displays();
        let summary = self
            .registry
            .enforce_single_mode(&displays, &mut self.host);
        for id in &summary.merged {
            self.forget(*id);
        }
        summary
    }

    /// Spawn a container centered on `at`. Returns the primary id in single mode.
    pub fn spawn(&mut self, at: Point) -> ContainerId {
        let displays = self.host.displays();
        self.registry.spawn(at, &displays, &mut self.host)
    }

    /// Show a container. Returns false if it was rejected or does not exist.
    pub fn show(&mut self, id: ContainerId, request: ShowRequest) -> bool {
        self.show_inner(id, request).is_some()
    }

    /// Hide a container. Without `force`, busy guards and in-flight transitions
    /// reject the request. Returns false if rejected or unknown.
    pub fn hide(&mut self, id: ContainerId, force: bool) -> bool {
        let busy = self.host.is_busy(id);
        let Some(container) = self.registry.get_mut(id) else {
            return false;
        };
        match container.hide(force, busy, &mut self.host) {
            Ok(_) => true,
            Err(rejected) => {
                tracing::debug!(%rejected, "hide dropped");
                false
            }
        }
    }

    /// Deliver an animation completion. Stale tokens are ignored.
    pub fn finish_transition(&mut self, id: ContainerId, token: TransitionToken) -> bool {
        let done = self
            .registry
            .get_mut(id)
            .is_some_and(|c| c.finish_transition(token));
        if !done {
            tracing::trace!(container = %id, token = token.0, "stale transition completion");
        }
        done
    }

    /// The drag-gesture heuristic fired. Only meaningful while a drag is in progress,
    /// so this also marks the drag as active.
    pub fn on_jiggle_detected(&mut self, pointer: Point) -> Decision {
        self.drag_active = true;
        self.sync_mode();
        let snapshot = self.snapshot().with_drag(true);
        let decision = route(Trigger::Jiggle, &snapshot, pointer);
        tracing::debug!(?decision, "jiggle");

        match &decision {
            Decision::RevealPrimary { at } => {
                if let Some(Shown::Revealed(_)) =
                    self.show_inner(ContainerId::PRIMARY, ShowRequest::at(*at))
                {
                    self.gesture_revealed.push(ContainerId::PRIMARY);
                }
            }
            Decision::RevealStored(slots) => {
                for (id, at) in slots {
                    let request = ShowRequest::at(*at).with_pointer(pointer);
                    if let Some(Shown::Revealed(_)) = self.show_inner(*id, request) {
                        self.gesture_revealed.push(*id);
                    }
                }
            }
            Decision::Spawn { at } => {
                let id = self.spawn(*at);
                self.gesture_revealed.push(id);
            }
            Decision::Choose(ids) => {
                self.host.present_chooser(ids);
                self.chooser = Some(ids.clone());
            }
            Decision::Deliver { .. } | Decision::Ignore(_) => {}
        }
        decision
    }

    /// The drag ended. Dismisses the chooser and drops containers the gesture
    /// revealed that are still empty: spawned ones are closed, the primary is
    /// hidden even if its reveal is still in flight.
    pub fn on_drag_ended(&mut self) {
        self.drag_active = false;
        self.dismiss_chooser();
        for id in core::mem::take(&mut self.gesture_revealed) {
            let still_empty = self
                .registry
                .get(id)
                .is_some_and(|c| c.is_visible() && c.is_empty());
            if !still_empty {
                continue;
            }
            if id.is_primary() {
                // Empty, so no guard can hold it; the hide supersedes the reveal.
                self.hide(id, true);
            } else {
                self.close(id);
            }
        }
    }

    /// Add items from a non-drag source (paste, deep link, watched folder) and
    /// reveal the receiving container.
    ///
    /// With `reveal_at_last_position` (or no `pointer`), the container reappears at
    /// its remembered frame; otherwise it is centered on `pointer`.
    pub fn add_items_from_external_source<I>(
        &mut self,
        locators: I,
        reveal_at_last_position: bool,
        pointer: Option<Point>,
    ) -> ContainerId
    where
        I: IntoIterator<Item = Locator>,
    {
        let configured = Mode::from_multi_enabled(self.host.multi_container_mode_enabled());
        if configured == Mode::Multi {
            self.registry.enter_multi_mode();
        }
        let snapshot = Snapshot {
            configured,
            ..self.snapshot()
        };
        let Decision::Deliver {
            target,
            merge_first,
        } = route(Trigger::Ingest, &snapshot, pointer.unwrap_or(Point::ORIGIN))
        else {
            return ContainerId::PRIMARY;
        };
        if merge_first {
            self.enforce_single_mode();
        }

        let Some(container) = self.registry.get_mut(target) else {
            return ContainerId::PRIMARY;
        };
        let added = container.add_items(locators.into_iter().map(Item::new));
        let request = match pointer {
            Some(at) if !reveal_at_last_position => ShowRequest::at(at),
            Some(at) => ShowRequest::last_position().with_pointer(at),
            None => ShowRequest::last_position(),
        };
        tracing::debug!(container = %target, added, merge_first, "ingest");
        self.show_inner(target, request);
        target
    }

    /// Pointer moved: convert enter/leave into hide-deadline hints.
    ///
    /// Leaving a container arms its deadline, entering clears it. Nothing here
    /// commits a transition; the scheduler does.
    pub fn pointer_moved(&mut self, pointer: Point, now: Instant) -> Vec<HoverEvent<ContainerId>> {
        let host = &self.host;
        let hit = topmost_at(self.registry.iter(), pointer, |id| host.stacking(id));
        let events = self.hover.update(hit);
        let policy = self.host.hide_policy();
        for event in &events {
            match *event {
                HoverEvent::Enter(id) => {
                    if let Some(c) = self.registry.get_mut(id) {
                        c.cancel_hide_timer();
                    }
                }
                HoverEvent::Leave(id) => {
                    if let Some(c) = self.registry.get_mut(id) {
                        c.request_hide_timer(now, policy);
                    }
                }
            }
        }
        events
    }

    /// Run one scheduler pass now.
    pub fn tick(&mut self, now: Instant, pointer: Option<Point>) -> TickReport {
        self.sync_mode();
        let busy: Vec<ContainerId> = self
            .registry
            .ids()
            .into_iter()
            .filter(|id| self.host.is_busy(*id))
            .collect();
        let cx = TickContext {
            now,
            pointer,
            chooser_visible: self.chooser.is_some(),
            policy: self.host.hide_policy(),
            busy: &busy,
        };
        self.scheduler.tick(&mut self.registry, cx, &mut self.host)
    }

    /// Run a scheduler pass if one is due.
    pub fn poll(&mut self, now: Instant, pointer: Option<Point>) -> Option<TickReport> {
        self.scheduler
            .is_due(now)
            .then(|| self.tick(now, pointer))
    }

    /// Force-hide every container and the chooser. Collections are kept.
    pub fn close_all(&mut self) -> usize {
        self.dismiss_chooser();
        let _ = self.hover.clear();
        self.gesture_revealed.clear();
        self.registry.close_all(&mut self.host)
    }

    /// Close one container: destroy a spawned one, or hide and empty the primary.
    pub fn close(&mut self, id: ContainerId) -> bool {
        let closed = self.registry.close(id, &mut self.host);
        if closed {
            self.forget(id);
        }
        closed
    }

    /// The user picked `id` in the chooser: dismiss it, reveal the pick and
    /// notify the pick callback. Returns false if `id` was not offered.
    pub fn pick(&mut self, id: ContainerId) -> bool {
        let offered = self
            .chooser
            .as_ref()
            .is_some_and(|ids| ids.contains(&id));
        if !offered {
            return false;
        }
        self.dismiss_chooser();
        if let Some(c) = self.registry.get_mut(id) {
            c.cancel_hide_timer();
        }
        self.show_inner(id, ShowRequest::last_position());
        if let Some(callback) = self.on_pick.as_mut() {
            callback(id);
        }
        true
    }

    /// Hide the chooser if it is shown.
    pub fn dismiss_chooser(&mut self) {
        if self.chooser.take().is_some() {
            self.host.dismiss_chooser();
        }
    }

    /// Forward an in-surface shortcut.
    pub fn handle_shortcut(&mut self, id: ContainerId, shortcut: Shortcut) -> bool {
        match self.registry.get_mut(id) {
            Some(c) => c.handle_shortcut(shortcut, &mut self.host),
            None => false,
        }
    }

    /// The display topology changed: re-resolve every container's display.
    pub fn displays_changed(&mut self, pointer: Option<Point>) {
        let displays = self.host.displays();
        for c in self.registry.iter_mut() {
            c.rebind_display(&displays, pointer);
        }
    }

    fn show_inner(&mut self, id: ContainerId, request: ShowRequest) -> Option<Shown> {
        let displays = self.host.displays();
        let container = self.registry.get_mut(id)?;
        match container.show(request, &displays, &mut self.host) {
            Ok(shown) => Some(shown),
            Err(rejected) => {
                tracing::debug!(%rejected, "show dropped");
                None
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        let host = &self.host;
        Snapshot::capture(&self.registry, self.registry.mode(), |id| host.stacking(id))
            .with_chooser(self.chooser.is_some())
            .with_drag(self.drag_active)
            .with_slot_spacing(host.layout().slot_spacing)
    }

    fn forget(&mut self, id: ContainerId) {
        self.hover.forget(id);
        self.gesture_revealed.retain(|g| *g != id);
        if self.chooser.as_ref().is_some_and(|ids| ids.contains(&id)) {
            self.dismiss_chooser();
        }
    }
}

fn template_of(config: &(impl ConfigStore + ?Sized)) -> Template {
    let layout = config.layout();
    Template {
        size: layout.container_size,
        motion: layout.motion,
        palette_size: layout.palette_size,
    }
}
