// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container implementation: visibility transitions, hide deadlines, guards.

use std::time::{Duration, Instant};

use dropshelf_items::{Item, ItemCollection, ItemId, MergeReport};
use kurbo::{Point, Rect, Size};

use crate::display::{
    DisplayDescriptor, DisplayId, Resolution, clamp_into, display_frame, resolve_display,
};
use crate::error::Rejected;
use crate::present::{Presenter, SurfaceRequest};
use crate::types::{
    Accent, Animation, ContainerFlags, ContainerId, Motion, Shortcut, Transition, TransitionKind,
    TransitionToken, Visibility,
};

/// Where and how to show a container.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ShowRequest {
    /// Point to center the container on.
    pub at: Option<Point>,
    /// Prefer the last remembered frame over `at`.
    pub reuse_last_position: bool,
    /// Current pointer location, used to pick a display when the frame is off-screen.
    pub pointer: Option<Point>,
}

impl ShowRequest {
    /// Show centered on `at`.
    pub fn at(at: Point) -> Self {
        Self {
            at: Some(at),
            reuse_last_position: false,
            pointer: Some(at),
        }
    }

    /// Show at the last remembered frame.
    pub fn last_position() -> Self {
        Self {
            at: None,
            reuse_last_position: true,
            pointer: None,
        }
    }

    /// Builder: set the pointer location.
    #[must_use]
    pub fn with_pointer(mut self, pointer: Point) -> Self {
        self.pointer = Some(pointer);
        self
    }
}

/// Successful result of [`Container::show`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Shown {
    /// The container was off screen and is animating in.
    Revealed(TransitionToken),
    /// The container was already visible; it was moved and its monitors rebound.
    Repositioned,
}

/// Successful result of [`Container::hide`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Hidden {
    /// The container was on screen and is animating out.
    Concealed(TransitionToken),
    /// The container was already off screen.
    AlreadyHidden,
}

/// Auto-hide settings relevant to a single container.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HidePolicy {
    /// Whether auto-hide is enabled at all.
    pub enabled: bool,
    /// Delay between losing the pointer and hiding.
    pub delay: Duration,
}

/// One floating drop container.
///
/// A container owns an [`ItemCollection`], a [`Visibility`], a frame, an optional
/// display affinity and an optional hide deadline. All visual work goes through a
/// [`Presenter`]; the container only tracks state.
///
/// ## Transitions
///
/// At most one show or hide transition is in flight at a time. While one is, every
/// further [`show`](Self::show), [`hide`](Self::hide) and [`auto_hide`](Self::auto_hide)
/// is rejected with [`Rejected::InTransition`] (a forced hide is the one exception).
/// Requests are dropped, never queued. The transition ends when
/// [`finish_transition`](Self::finish_transition) receives its token.
#[derive(Clone, Debug)]
pub struct Container {
    id: ContainerId,
    accent: Accent,
    collection: ItemCollection,
    visibility: Visibility,
    display: Option<DisplayId>,
    frame: Rect,
    restore_frame: Option<Rect>,
    hide_deadline: Option<Instant>,
    flags: ContainerFlags,
    pending: Option<Transition>,
    last_token: u64,
    motion: Motion,
}

impl Container {
    /// Create a hidden, empty container of the given size.
    pub fn new(id: ContainerId, accent: Accent, size: Size, motion: Motion) -> Self {
        Self {
            id,
            accent,
            collection: ItemCollection::new(),
            visibility: Visibility::Hidden,
            display: None,
            frame: Rect::from_origin_size(Point::ORIGIN, size),
            restore_frame: None,
            hide_deadline: None,
            flags: ContainerFlags::empty(),
            pending: None,
            last_token: 0,
            motion,
        }
    }

    /// Container id.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Accent color index.
    pub fn accent(&self) -> Accent {
        self.accent
    }

    /// Items held by the container.
    pub fn collection(&self) -> &ItemCollection {
        &self.collection
    }

    /// Current visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// True when [`Visibility::Visible`].
    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// True when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Current frame.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Full-size frame remembered for restoration after a hide or auto-hide.
    pub fn restore_frame(&self) -> Option<Rect> {
        self.restore_frame
    }

    /// Display the container was last resolved to.
    pub fn display(&self) -> Option<DisplayId> {
        self.display
    }

    /// Pending hide deadline.
    pub fn hide_deadline(&self) -> Option<Instant> {
        self.hide_deadline
    }

    /// Transient flags.
    pub fn flags(&self) -> ContainerFlags {
        self.flags
    }

    /// The in-flight transition, if any.
    pub fn pending_transition(&self) -> Option<Transition> {
        self.pending
    }

    /// True while a show or hide animation is in flight.
    pub fn is_in_transition(&self) -> bool {
        self.pending.is_some()
    }

    /// True while a selection drag out of the container is active.
    pub fn is_selection_drag_active(&self) -> bool {
        self.flags.contains(ContainerFlags::SELECTION_DRAG)
    }

    /// True while an item is being renamed.
    pub fn is_renaming(&self) -> bool {
        self.flags.contains(ContainerFlags::RENAMING)
    }

    /// True while in-surface shortcut monitors are installed.
    pub fn is_observing(&self) -> bool {
        self.flags.contains(ContainerFlags::OBSERVING)
    }

    /// Whether `pt` lies inside the current frame.
    pub fn contains(&self, pt: Point) -> bool {
        self.frame.contains(pt)
    }

    /// Whether a hide must wait: a selection drag, an external busy guard, or any
    /// in-flight transition (a reveal animation included).
    pub fn is_guarded(&self, busy: bool) -> bool {
        self.is_selection_drag_active() || busy || self.is_in_transition()
    }

    /// Show the container.
    ///
    /// - Already visible: move it to `request.at` (unless reusing the last position),
    ///   rebind its monitors and cancel any hide deadline.
    /// - Hidden or auto-hidden: place it at the remembered frame or centered on
    ///   `request.at`, materialize the surface if needed, animate it in, mark it
    ///   visible and start observing input.
    pub fn show(
        &mut self,
        request: ShowRequest,
        displays: &[DisplayDescriptor],
        presenter: &mut dyn Presenter,
    ) -> Result<Shown, Rejected> {
        if self.is_in_transition() {
            return Err(Rejected::InTransition(self.id));
        }
        self.hide_deadline = None;

        if self.is_visible() {
            if let Some(at) = request.at
                && !request.reuse_last_position
            {
                self.frame = Rect::from_center_size(at, self.frame.size());
                presenter.set_frame(self.id, self.frame);
            }
            self.rebind_display(displays, request.pointer);
            self.set_observing(true, presenter);
            tracing::trace!(container = %self.id, "repositioned");
            return Ok(Shown::Repositioned);
        }

        self.frame = self.target_frame(&request, displays);
        self.rebind_display(displays, request.pointer);
        if !self.flags.contains(ContainerFlags::MATERIALIZED) {
            presenter.materialize(SurfaceRequest {
                id: self.id,
                accent: self.accent,
                frame: self.frame,
                collection: &self.collection,
            });
            self.flags.insert(ContainerFlags::MATERIALIZED);
        }
        presenter.set_frame(self.id, self.frame);
        let token = self.begin(TransitionKind::Reveal);
        presenter.animate(
            self.id,
            Animation {
                kind: TransitionKind::Reveal,
                target_scale: 1.0,
                duration: self.motion.reveal,
                token,
            },
        );
        self.visibility = Visibility::Visible;
        self.restore_frame = Some(self.frame);
        self.set_observing(true, presenter);
        tracing::trace!(container = %self.id, frame = ?self.frame, "revealing");
        Ok(Shown::Revealed(token))
    }

    /// Hide the container.
    ///
    /// Without `force`, the request is rejected while a transition is in flight, or
    /// while `busy` holds and the collection is non-empty. A forced hide supersedes
    /// any in-flight transition.
    pub fn hide(
        &mut self,
        force: bool,
        busy: bool,
        presenter: &mut dyn Presenter,
    ) -> Result<Hidden, Rejected> {
        if !force {
            if self.is_in_transition() {
                return Err(Rejected::InTransition(self.id));
            }
            if busy && !self.collection.is_empty() {
                return Err(Rejected::Busy(self.id));
            }
        }
        self.hide_deadline = None;
        self.flags
            .remove(ContainerFlags::SELECTION_DRAG | ContainerFlags::RENAMING);
        self.set_observing(false, presenter);

        let on_screen = self.is_visible()
            || self
                .pending
                .is_some_and(|t| t.kind == TransitionKind::Reveal);
        if !on_screen {
            self.visibility = Visibility::Hidden;
            self.pending = None;
            return Ok(Hidden::AlreadyHidden);
        }

        self.restore_frame = Some(self.frame);
        let token = self.conceal(presenter);
        self.visibility = Visibility::Hidden;
        tracing::trace!(container = %self.id, force, "concealing");
        Ok(Hidden::Concealed(token))
    }

    /// Commit the auto-hide transition: remember the full-size frame, animate out,
    /// stop monitors, and move to [`Visibility::AutoHidden`].
    pub fn auto_hide(&mut self, presenter: &mut dyn Presenter) -> Result<TransitionToken, Rejected> {
        if self.is_in_transition() {
            return Err(Rejected::InTransition(self.id));
        }
        if !self.is_visible() {
            return Err(Rejected::NotVisible(self.id));
        }
        self.hide_deadline = None;
        self.restore_frame = Some(self.frame);
        self.set_observing(false, presenter);
        let token = self.conceal(presenter);
        self.visibility = Visibility::AutoHidden;
        tracing::trace!(container = %self.id, "auto-hiding");
        Ok(token)
    }

    /// Acknowledge completion of the transition identified by `token`.
    ///
    /// Returns false (and changes nothing) for a stale or unknown token.
    pub fn finish_transition(&mut self, token: TransitionToken) -> bool {
        match self.pending {
            Some(t) if t.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Tear the container down: drop any transition, deadline and flags, remove
    /// monitors and release the surface. Collections are left untouched.
    pub fn dismantle(&mut self, presenter: &mut dyn Presenter) {
        self.set_observing(false, presenter);
        if self.flags.contains(ContainerFlags::MATERIALIZED) {
            presenter.release(self.id);
        }
        self.flags = ContainerFlags::empty();
        self.pending = None;
        self.hide_deadline = None;
        self.visibility = Visibility::Hidden;
    }

    /// The pointer left the container: arm the hide deadline.
    ///
    /// Ignored when auto-hide is disabled, the container is not visible, the
    /// collection is empty, or a selection drag is active.
    pub fn request_hide_timer(&mut self, now: Instant, policy: HidePolicy) -> Option<Instant> {
        if !policy.enabled
            || !self.is_visible()
            || self.collection.is_empty()
            || self.is_selection_drag_active()
        {
            return None;
        }
        let deadline = now + policy.delay;
        self.hide_deadline = Some(deadline);
        Some(deadline)
    }

    /// Arm the hide deadline only if none is pending. Returns the deadline in effect.
    pub fn arm_hide_deadline(&mut self, now: Instant, delay: Duration) -> Instant {
        *self.hide_deadline.get_or_insert(now + delay)
    }

    /// Clear the hide deadline. Idempotent; returns whether one was pending.
    pub fn cancel_hide_timer(&mut self) -> bool {
        self.hide_deadline.take().is_some()
    }

    /// Add items, skipping locators already present. Never changes visibility.
    pub fn add_items<I: IntoIterator<Item = Item>>(&mut self, items: I) -> usize {
        self.collection.extend(items)
    }

    /// Remove one item. An emptied container becomes eligible for the scheduler's
    /// empty-collection rule on its next tick.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        self.collection.remove(id)
    }

    /// Flip the pin flag of one item.
    pub fn toggle_pin(&mut self, id: ItemId) -> Option<bool> {
        self.collection.toggle_pin(id)
    }

    /// Remove every item.
    pub fn clear_items(&mut self) {
        self.collection.clear();
    }

    /// Move the collection out, leaving the container empty.
    pub fn take_collection(&mut self) -> ItemCollection {
        core::mem::take(&mut self.collection)
    }

    /// Merge another collection into this one.
    pub fn absorb(&mut self, other: ItemCollection) -> MergeReport {
        self.collection.absorb(other)
    }

    /// Select an item.
    pub fn select(&mut self, id: ItemId) -> bool {
        self.collection.select(id)
    }

    /// A selection drag out of the container started. Cancels the hide deadline.
    pub fn begin_selection_drag(&mut self) {
        self.flags.insert(ContainerFlags::SELECTION_DRAG);
        self.hide_deadline = None;
    }

    /// The selection drag ended.
    pub fn end_selection_drag(&mut self) {
        self.flags.remove(ContainerFlags::SELECTION_DRAG);
    }

    /// In-place rename started.
    pub fn begin_rename(&mut self) {
        self.flags.insert(ContainerFlags::RENAMING);
    }

    /// In-place rename ended.
    pub fn end_rename(&mut self) {
        self.flags.remove(ContainerFlags::RENAMING);
    }

    /// React to an in-surface shortcut. Only honored while observing input.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut, presenter: &mut dyn Presenter) -> bool {
        if !self.is_observing() {
            return false;
        }
        match shortcut {
            Shortcut::SelectAll => {
                self.collection.select_all();
                true
            }
            Shortcut::Preview => {
                let mut ids = self.collection.selected();
                if ids.is_empty() {
                    ids = self.collection.iter().map(Item::id).collect();
                }
                if ids.is_empty() {
                    return false;
                }
                presenter.preview(self.id, &ids);
                true
            }
        }
    }

    /// Record a frame change made by the host (for example the user dragged the surface).
    pub fn sync_frame(&mut self, frame: Rect) {
        self.frame = frame;
        if self.is_visible() {
            self.restore_frame = Some(frame);
        }
    }

    /// Re-resolve the display affinity from the current frame.
    pub fn rebind_display(
        &mut self,
        displays: &[DisplayDescriptor],
        pointer: Option<Point>,
    ) -> Option<Resolution> {
        let (id, how) = resolve_display(self.frame, self.display, pointer, displays)?;
        self.display = Some(id);
        Some(how)
    }

    fn target_frame(&self, request: &ShowRequest, displays: &[DisplayDescriptor]) -> Rect {
        let size = self.frame.size();
        let frame = match (request.reuse_last_position, self.restore_frame, request.at) {
            (true, Some(last), _) | (false, Some(last), None) => last,
            (_, _, Some(at)) => Rect::from_center_size(at, size),
            (_, None, None) => {
                // Never shown and no anchor: center on the best display we can find.
                match resolve_display(self.frame, self.display, request.pointer, displays)
                    .and_then(|(id, _)| display_frame(id, displays))
                {
                    Some(bounds) => Rect::from_center_size(bounds.center(), size),
                    None => self.frame,
                }
            }
        };
        // A remembered frame can point at a display that is gone; pull it back on screen.
        match resolve_display(frame, self.display, request.pointer, displays) {
            Some((id, how)) if how != Resolution::Overlap => display_frame(id, displays)
                .map(|bounds| clamp_into(frame, bounds))
                .unwrap_or(frame),
            _ => frame,
        }
    }

    fn begin(&mut self, kind: TransitionKind) -> TransitionToken {
        self.last_token += 1;
        let token = TransitionToken(self.last_token);
        self.pending = Some(Transition { kind, token });
        token
    }

    fn conceal(&mut self, presenter: &mut dyn Presenter) -> TransitionToken {
        let token = self.begin(TransitionKind::Conceal);
        presenter.animate(
            self.id,
            Animation {
                kind: TransitionKind::Conceal,
                target_scale: self.motion.conceal_scale,
                duration: self.motion.conceal,
                token,
            },
        );
        token
    }

    fn set_observing(&mut self, observe: bool, presenter: &mut dyn Presenter) {
        if observe {
            // Rebinding is idempotent on the host side; always reinstall.
            presenter.observe_input(self.id, true);
            self.flags.insert(ContainerFlags::OBSERVING);
        } else if self.flags.contains(ContainerFlags::OBSERVING) {
            presenter.observe_input(self.id, false);
            self.flags.remove(ContainerFlags::OBSERVING);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stacking;
    use dropshelf_items::Locator;

    #[derive(Default)]
    struct Log {
        calls: Vec<String>,
    }

    impl Presenter for Log {
        fn materialize(&mut self, request: SurfaceRequest<'_>) {
            self.calls.push(format!("materialize {}", request.id));
        }
        fn set_frame(&mut self, id: ContainerId, _frame: Rect) {
            self.calls.push(format!("frame {id}"));
        }
        fn animate(&mut self, id: ContainerId, animation: Animation) {
            self.calls
                .push(format!("animate {id} {:?} {}", animation.kind, animation.token.0));
        }
        fn observe_input(&mut self, id: ContainerId, observe: bool) {
            self.calls.push(format!("observe {id} {observe}"));
        }
        fn release(&mut self, id: ContainerId) {
            self.calls.push(format!("release {id}"));
        }
        fn preview(&mut self, id: ContainerId, items: &[ItemId]) {
            self.calls.push(format!("preview {id} {}", items.len()));
        }
        fn stacking(&self, _id: ContainerId) -> Stacking {
            Stacking::default()
        }
    }

    fn container() -> Container {
        Container::new(
            ContainerId::PRIMARY,
            Accent(0),
            Size::new(200.0, 100.0),
            Motion::default(),
        )
    }

    fn item(path: &str) -> Item {
        Item::new(Locator::new(path))
    }

    const POLICY: HidePolicy = HidePolicy {
        enabled: true,
        delay: Duration::from_secs(1),
    };

    #[test]
    fn show_centers_on_point_and_materializes_once() {
        let mut c = container();
        let mut p = Log::default();
        let shown = c.show(ShowRequest::at(Point::new(500.0, 500.0)), &[], &mut p);
        assert_eq!(shown, Ok(Shown::Revealed(TransitionToken(1))));
        assert_eq!(c.frame().center(), Point::new(500.0, 500.0));
        assert!(c.is_visible());
        assert!(c.is_observing());

        assert!(c.finish_transition(TransitionToken(1)));
        let _ = c.hide(false, false, &mut p);
        assert!(c.finish_transition(TransitionToken(2)));
        let _ = c.show(ShowRequest::last_position(), &[], &mut p);
        let materialized = p.calls.iter().filter(|c| c.starts_with("materialize")).count();
        assert_eq!(materialized, 1, "surface is created only once");
    }

    #[test]
    fn second_show_during_transition_is_dropped() {
        let mut c = container();
        let mut p = Log::default();
        assert!(c.show(ShowRequest::at(Point::new(10.0, 10.0)), &[], &mut p).is_ok());
        assert_eq!(
            c.show(ShowRequest::at(Point::new(90.0, 90.0)), &[], &mut p),
            Err(Rejected::InTransition(ContainerId::PRIMARY))
        );
        let animations = p.calls.iter().filter(|c| c.starts_with("animate")).count();
        assert_eq!(animations, 1, "only one transition may be in flight");
        assert_eq!(c.frame().center(), Point::new(10.0, 10.0));
    }

    #[test]
    fn visible_show_repositions_without_animation() {
        let mut c = container();
        let mut p = Log::default();
        let Ok(Shown::Revealed(token)) = c.show(ShowRequest::at(Point::new(10.0, 10.0)), &[], &mut p)
        else {
            panic!("first show reveals");
        };
        c.finish_transition(token);
        assert_eq!(
            c.show(ShowRequest::at(Point::new(300.0, 300.0)), &[], &mut p),
            Ok(Shown::Repositioned)
        );
        assert_eq!(c.frame().center(), Point::new(300.0, 300.0));
    }

    #[test]
    fn busy_hide_is_rejected_only_when_non_empty() {
        let mut c = container();
        let mut p = Log::default();
        let _ = c.show(ShowRequest::at(Point::new(10.0, 10.0)), &[], &mut p);
        c.finish_transition(TransitionToken(1));

        c.add_items([item("/a")]);
        assert_eq!(c.hide(false, true, &mut p), Err(Rejected::Busy(ContainerId::PRIMARY)));
        assert!(c.is_visible());

        c.clear_items();
        assert!(matches!(c.hide(false, true, &mut p), Ok(Hidden::Concealed(_))));
        assert_eq!(c.visibility(), Visibility::Hidden);
    }

    #[test]
    fn forced_hide_supersedes_reveal_and_ignores_stale_completion() {
        let mut c = container();
        let mut p = Log::default();
        c.add_items([item("/a")]);
        let _ = c.show(ShowRequest::at(Point::new(10.0, 10.0)), &[], &mut p);
        c.begin_rename();
        let hidden = c.hide(true, true, &mut p);
        assert_eq!(hidden, Ok(Hidden::Concealed(TransitionToken(2))));
        assert!(!c.is_renaming());
        assert!(!c.finish_transition(TransitionToken(1)), "stale reveal token");
        assert!(c.is_in_transition());
        assert!(c.finish_transition(TransitionToken(2)));
        assert!(!c.is_in_transition());
    }

    #[test]
    fn hide_timer_respects_policy_and_guards() {
        let mut c = container();
        let mut p = Log::default();
        let now = Instant::now();
        let _ = c.show(ShowRequest::at(Point::new(10.0, 10.0)), &[], &mut p);

        assert_eq!(c.request_hide_timer(now, POLICY), None, "empty container");
        c.add_items([item("/a")]);
        let disabled = HidePolicy { enabled: false, ..POLICY };
        assert_eq!(c.request_hide_timer(now, disabled), None);

        c.begin_selection_drag();
        assert_eq!(c.request_hide_timer(now, POLICY), None);
        c.end_selection_drag();

        assert_eq!(c.request_hide_timer(now, POLICY), Some(now + POLICY.delay));
        assert!(c.cancel_hide_timer());
        assert!(!c.cancel_hide_timer(), "cancellation is idempotent");
    }

    #[test]
    fn auto_hide_remembers_frame_and_stops_monitors() {
        let mut c = container();
        let mut p = Log::default();
        c.add_items([item("/a")]);
        let _ = c.show(ShowRequest::at(Point::new(400.0, 300.0)), &[], &mut p);
        assert_eq!(c.auto_hide(&mut p), Err(Rejected::InTransition(ContainerId::PRIMARY)));
        c.finish_transition(TransitionToken(1));

        let token = c.auto_hide(&mut p);
        assert_eq!(token, Ok(TransitionToken(2)));
        assert_eq!(c.visibility(), Visibility::AutoHidden);
        assert!(!c.is_observing());
        assert_eq!(c.restore_frame().map(|r| r.center()), Some(Point::new(400.0, 300.0)));

        c.finish_transition(TransitionToken(2));
        assert_eq!(c.auto_hide(&mut p), Err(Rejected::NotVisible(ContainerId::PRIMARY)));
    }

    #[test]
    fn shortcuts_need_observation() {
        let mut c = container();
        let mut p = Log::default();
        c.add_items([item("/a"), item("/b")]);
        assert!(!c.handle_shortcut(Shortcut::SelectAll, &mut p));

        let _ = c.show(ShowRequest::at(Point::new(10.0, 10.0)), &[], &mut p);
        assert!(c.handle_shortcut(Shortcut::SelectAll, &mut p));
        assert_eq!(c.collection().selected().len(), 2);
        assert!(c.handle_shortcut(Shortcut::Preview, &mut p));
        assert_eq!(p.calls.last().map(String::as_str), Some("preview #0 2"));
    }

    #[test]
    fn stale_display_frame_is_clamped_back_on_screen() {
        let displays = [DisplayDescriptor {
            id: DisplayId(1),
            frame: Rect::new(0.0, 0.0, 1000.0, 800.0),
        }];
        let mut c = container();
        let mut p = Log::default();
        let _ = c.show(ShowRequest::at(Point::new(1500.0, 400.0)), &displays, &mut p);
        c.finish_transition(TransitionToken(1));
        let _ = c.hide(false, false, &mut p);
        c.finish_transition(TransitionToken(2));

        let _ = c.show(ShowRequest::last_position(), &displays, &mut p);
        assert!(displays[0].frame.contains(c.frame().center()));
        assert_eq!(c.display(), Some(DisplayId(1)));
    }

    #[test]
    fn dismantle_releases_surface() {
        let mut c = container();
        let mut p = Log::default();
        let _ = c.show(ShowRequest::at(Point::new(10.0, 10.0)), &[], &mut p);
        c.dismantle(&mut p);
        assert_eq!(c.visibility(), Visibility::Hidden);
        assert!(!c.is_in_transition());
        assert!(p.calls.contains(&"release #0".to_string()));
    }
}
