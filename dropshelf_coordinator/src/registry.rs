// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of live containers and the merge engine.
//!
//! The registry owns the primary container (which always exists) and the
//! containers spawned in multi mode. Switching to single mode drains every
//! spawned container into the primary with [`Registry::enforce_single_mode`];
//! afterwards the spawned list is empty and the primary holds the de-duplicated
//! union of all collections, pin flags OR'd together.

use dropshelf_items::MergeReport;
use dropshelf_surface::{
    Accent, Container, ContainerId, DisplayDescriptor, Motion, Presenter, ShowRequest,
};
use kurbo::{Point, Size};

/// Whether several containers may coexist.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Only the primary container exists.
    #[default]
    Single,
    /// Containers may be spawned on demand.
    Multi,
}

impl Mode {
    /// Mode implied by a config flag.
    pub fn from_multi_enabled(enabled: bool) -> Self {
        if enabled { Self::Multi } else { Self::Single }
    }
}

/// Shape of newly created containers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Template {
    /// Container size.
    pub size: Size,
    /// Animation timing.
    pub motion: Motion,
    /// Number of accent colors to cycle through.
    pub palette_size: u8,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            size: Size::new(280.0, 320.0),
            motion: Motion::default(),
            palette_size: 8,
        }
    }
}

/// Outcome of [`Registry::enforce_single_mode`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Spawned containers that were merged and destroyed, in registry order.
    pub merged: Vec<ContainerId>,
    /// Item-level merge counts, summed over all merged containers.
    pub items: MergeReport,
    /// Whether the primary was revealed because a merged container had been visible.
    pub revealed_primary: bool,
}

/// Process-wide set of containers.
#[derive(Debug)]
pub struct Registry {
    primary: Container,
    spawned: Vec<Container>,
    mode: Mode,
    next_id: u32,
    template: Template,
}

impl Registry {
    /// Create a registry holding only a hidden, empty primary container.
    pub fn new(mode: Mode, template: Template) -> Self {
        Self {
            primary: Container::new(
                ContainerId::PRIMARY,
                Accent(0),
                template.size,
                template.motion,
            ),
            spawned: Vec::new(),
            mode,
            next_id: ContainerId::PRIMARY.get() + 1,
            template,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Allow spawning. Returns false if already in multi mode.
    ///
    /// Leaving multi mode goes through [`Registry::enforce_single_mode`].
    pub fn enter_multi_mode(&mut self) -> bool {
        let changed = self.mode == Mode::Single;
        self.mode = Mode::Multi;
        changed
    }

    /// Template used for containers created from now on.
    pub fn template(&self) -> Template {
        self.template
    }

    /// Replace the template. Existing containers keep their shape.
    pub fn set_template(&mut self, template: Template) {
        self.template = template;
    }

    /// The primary container.
    pub fn primary(&self) -> &Container {
        &self.primary
    }

    /// The primary container, mutably.
    pub fn primary_mut(&mut self) -> &mut Container {
        &mut self.primary
    }

    /// Spawned containers in creation order.
    pub fn spawned(&self) -> &[Container] {
        &self.spawned
    }

    /// Look up a container.
    pub fn get(&self, id: ContainerId) -> Option<&Container> {
        if id == ContainerId::PRIMARY {
            return Some(&self.primary);
        }
        self.spawned.iter().find(|c| c.id() == id)
    }

    /// Look up a container, mutably.
    pub fn get_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        if id == ContainerId::PRIMARY {
            return Some(&mut self.primary);
        }
        self.spawned.iter_mut().find(|c| c.id() == id)
    }

    /// Whether `id` names a live container.
    pub fn contains(&self, id: ContainerId) -> bool {
        self.get(id).is_some()
    }

    /// All containers, primary first.
    pub fn iter(&self) -> impl Iterator<Item = &Container> + '_ {
        core::iter::once(&self.primary).chain(self.spawned.iter())
    }

    /// All containers, primary first, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Container> + '_ {
        core::iter::once(&mut self.primary).chain(self.spawned.iter_mut())
    }

    /// Ids of all containers, primary first.
    pub fn ids(&self) -> Vec<ContainerId> {
        self.iter().map(Container::id).collect()
    }

    /// Number of containers, primary included.
    pub fn len(&self) -> usize {
        1 + self.spawned.len()
    }

    /// Always false: the primary container is never destroyed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Ids of visible containers, primary first.
    pub fn visible_ids(&self) -> Vec<ContainerId> {
        self.iter()
            .filter(|c| c.is_visible())
            .map(Container::id)
            .collect()
    }

    /// Clear every container's hide deadline.
    pub fn cancel_all_deadlines(&mut self) {
        for c in self.iter_mut() {
            c.cancel_hide_timer();
        }
    }

    /// Accent for the next spawned container.
    ///
    /// Starts at `count of existing containers % palette size` and walks forward
    /// to the first accent no live container uses. When every accent is taken,
    /// the starting accent is reused.
    pub fn next_accent(&self) -> Accent {
        let palette = usize::from(self.template.palette_size.max(1));
        let start = self.len() % palette;
        let accent = |i: usize| Accent(u8::try_from(i).unwrap_or_default());
        (0..palette)
            .map(|k| accent((start + k) % palette))
            .find(|candidate| self.iter().all(|c| c.accent() != *candidate))
            .unwrap_or(accent(start))
    }

    /// Spawn a container and reveal it centered on `at`.
    ///
    /// In multi mode this first cancels every pending hide deadline, so an existing
    /// container cannot auto-hide while the new one materializes. In single mode
    /// nothing is created and the primary id is returned.
    pub fn spawn(
        &mut self,
        at: Point,
        displays: &[DisplayDescriptor],
        presenter: &mut dyn Presenter,
    ) -> ContainerId {
        if self.mode == Mode::Single {
            tracing::debug!("spawn suppressed in single mode");
            return ContainerId::PRIMARY;
        }
        self.cancel_all_deadlines();
        let accent = self.next_accent();
        let id = ContainerId::new(self.next_id);
        self.next_id += 1;

        let mut container = Container::new(id, accent, self.template.size, self.template.motion);
        if let Err(rejected) = container.show(ShowRequest::at(at), displays, presenter) {
            // A fresh container has no transition in flight; keep it registered regardless.
            tracing::warn!(container = %id, %rejected, "freshly spawned container refused to show");
        }
        self.spawned.push(container);
        tracing::debug!(container = %id, accent = accent.0, "spawned");
        id
    }

    /// Switch to single mode, merging every spawned container into the primary.
    ///
    /// Each spawned container's collection is absorbed into the primary (see
    /// [`ItemCollection::absorb`](dropshelf_items::ItemCollection::absorb)), then the
    /// container is dismantled regardless of busy guards and removed. If any of them
    /// had been visible and the primary now holds items, the primary is revealed at
    /// its last-known frame.
    pub fn enforce_single_mode(
        &mut self,
        displays: &[DisplayDescriptor],
        presenter: &mut dyn Presenter,
    ) -> MergeSummary {
        let mut summary = MergeSummary::default();
        let mut any_visible = false;
        for mut spawned in self.spawned.drain(..) {
            any_visible |= spawned.is_visible();
            let report = self.primary.absorb(spawned.take_collection());
            summary.items.accumulate(report);
            spawned.dismantle(presenter);
            summary.merged.push(spawned.id());
        }
        self.mode = Mode::Single;

        if any_visible && !self.primary.is_empty() {
            match self
                .primary
                .show(ShowRequest::last_position(), displays, presenter)
            {
                Ok(_) => summary.revealed_primary = true,
                Err(rejected) => tracing::debug!(%rejected, "primary reveal after merge dropped"),
            }
        }
        if !summary.merged.is_empty() {
            tracing::info!(
                merged = summary.merged.len(),
                appended = summary.items.appended,
                promoted = summary.items.promoted,
                "merged spawned containers into primary"
            );
        }
        summary
    }

    /// Force-hide every container. Collections are kept. Returns how many
    /// containers were on screen.
    pub fn close_all(&mut self, presenter: &mut dyn Presenter) -> usize {
        let mut concealed = 0;
        for c in self.iter_mut() {
            if let Ok(dropshelf_surface::Hidden::Concealed(_)) = c.hide(true, false, presenter) {
                concealed += 1;
            }
        }
        concealed
    }

    /// Close one container: a spawned container is destroyed, the primary is
    /// force-hidden and emptied. Returns false for an unknown id.
    pub fn close(&mut self, id: ContainerId, presenter: &mut dyn Presenter) -> bool {
        if id == ContainerId::PRIMARY {
            let _ = self.primary.hide(true, false, presenter);
            self.primary.clear_items();
            return true;
        }
        let Some(pos) = self.spawned.iter().position(|c| c.id() == id) else {
            return false;
        };
        let mut container = self.spawned.remove(pos);
        container.dismantle(presenter);
        tracing::debug!(container = %id, "closed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropshelf_items::{Item, Locator};
    use dropshelf_surface::{Animation, SurfaceRequest, Visibility};
    use kurbo::Rect;

    #[derive(Default)]
    struct Released(Vec<ContainerId>);
    impl Presenter for Released {
        fn materialize(&mut self, _: SurfaceRequest<'_>) {}
        fn set_frame(&mut self, _: ContainerId, _: Rect) {}
        fn animate(&mut self, _: ContainerId, _: Animation) {}
        fn observe_input(&mut self, _: ContainerId, _: bool) {}
        fn release(&mut self, id: ContainerId) {
            self.0.push(id);
        }
    }

    fn item(path: &str) -> Item {
        Item::new(Locator::new(path))
    }

    fn locators(c: &Container) -> Vec<String> {
        c.collection()
            .iter()
            .map(|i| i.locator().as_str().to_owned())
            .collect()
    }

    fn multi() -> Registry {
        Registry::new(Mode::Multi, Template::default())
    }

    #[test]
    fn single_mode_never_spawns() {
        let mut r = Registry::new(Mode::Single, Template::default());
        let mut p = Released::default();
        for _ in 0..3 {
            assert_eq!(r.spawn(Point::new(1.0, 1.0), &[], &mut p), ContainerId::PRIMARY);
        }
        assert!(r.spawned().is_empty());
    }

    #[test]
    fn spawn_assigns_next_palette_index_and_cancels_deadlines() {
        let mut r = multi();
        let mut p = Released::default();
        let now = std::time::Instant::now();
        r.primary_mut().add_items([item("/a")]);
        let _ = r
            .primary_mut()
            .show(ShowRequest::at(Point::new(10.0, 10.0)), &[], &mut p);
        r.primary_mut().arm_hide_deadline(now, std::time::Duration::from_secs(1));

        let id = r.spawn(Point::new(500.0, 500.0), &[], &mut p);
        assert_ne!(id, ContainerId::PRIMARY);
        assert_eq!(r.get(id).map(Container::accent), Some(Accent(1)));
        assert_eq!(r.get(id).map(Container::visibility), Some(Visibility::Visible));
        assert_eq!(r.primary().hide_deadline(), None);
    }

    #[test]
    fn accents_skip_colors_in_use_and_wrap() {
        let template = Template {
            palette_size: 3,
            ..Template::default()
        };
        let mut r = Registry::new(Mode::Multi, template);
        let mut p = Released::default();
        let a = r.spawn(Point::ORIGIN, &[], &mut p);
        let b = r.spawn(Point::ORIGIN, &[], &mut p);
        assert_eq!(r.get(a).map(Container::accent), Some(Accent(1)));
        assert_eq!(r.get(b).map(Container::accent), Some(Accent(2)));
        r.close(a, &mut p);
        // Two containers live (0 and 2): start at 2 % 3 = 2, taken, walk to 0, taken, then 1.
        let c = r.spawn(Point::ORIGIN, &[], &mut p);
        assert_eq!(r.get(c).map(Container::accent), Some(Accent(1)));
        // Palette exhausted: three live containers, so reuse accent 3 % 3 = 0.
        let d = r.spawn(Point::ORIGIN, &[], &mut p);
        assert_eq!(r.get(d).map(Container::accent), Some(Accent(0)));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut r = multi();
        let mut p = Released::default();
        let a = r.spawn(Point::ORIGIN, &[], &mut p);
        r.close(a, &mut p);
        let b = r.spawn(Point::ORIGIN, &[], &mut p);
        assert_ne!(a, b);
        assert!(!r.contains(a));
    }

    #[test]
    fn merge_dedups_and_empties_spawned() {
        let mut r = multi();
        let mut p = Released::default();
        r.primary_mut().add_items([item("/A"), item("/B")]);
        let s = r.spawn(Point::ORIGIN, &[], &mut p);
        if let Some(c) = r.get_mut(s) {
            c.add_items([item("/B"), item("/C")]);
        }

        let summary = r.enforce_single_mode(&[], &mut p);
        assert_eq!(r.mode(), Mode::Single);
        assert!(r.spawned().is_empty());
        assert_eq!(summary.merged, vec![s]);
        assert_eq!(locators(r.primary()), vec!["/A", "/B", "/C"]);
        assert_eq!(p.0, vec![s], "merged surfaces are released");
    }

    #[test]
    fn merge_promotes_pins_from_any_source() {
        let mut r = multi();
        let mut p = Released::default();
        r.primary_mut().add_items([item("/B")]);
        let s1 = r.spawn(Point::ORIGIN, &[], &mut p);
        let s2 = r.spawn(Point::ORIGIN, &[], &mut p);
        if let Some(c) = r.get_mut(s1) {
            c.add_items([item("/B")]);
        }
        if let Some(c) = r.get_mut(s2) {
            c.add_items([item("/B").pinned(true)]);
        }

        let summary = r.enforce_single_mode(&[], &mut p);
        assert_eq!(summary.items.promoted, 1);
        assert!(r.primary().collection().items()[0].is_pinned());
    }

    #[test]
    fn merge_reveals_primary_when_a_visible_container_contributed() {
        let mut r = multi();
        let mut p = Released::default();
        let s = r.spawn(Point::new(300.0, 300.0), &[], &mut p);
        if let Some(c) = r.get_mut(s) {
            c.add_items([item("/x")]);
        }
        assert!(r.get(s).is_some_and(Container::is_visible));

        let summary = r.enforce_single_mode(&[], &mut p);
        assert!(summary.revealed_primary);
        assert!(r.primary().is_visible());
    }

    #[test]
    fn merge_of_hidden_containers_keeps_primary_hidden() {
        let mut r = multi();
        let mut p = Released::default();
        let s = r.spawn(Point::ORIGIN, &[], &mut p);
        let c = r.get_mut(s).expect("spawned");
        c.add_items([item("/x")]);
        let _ = c.hide(true, false, &mut p);

        let summary = r.enforce_single_mode(&[], &mut p);
        assert!(!summary.revealed_primary);
        assert!(!r.primary().is_visible());
        assert_eq!(r.primary().collection().len(), 1);
    }

    #[test]
    fn close_all_hides_without_clearing() {
        let mut r = multi();
        let mut p = Released::default();
        r.primary_mut().add_items([item("/a")]);
        let _ = r
            .primary_mut()
            .show(ShowRequest::at(Point::ORIGIN), &[], &mut p);
        let s = r.spawn(Point::ORIGIN, &[], &mut p);

        assert_eq!(r.close_all(&mut p), 2);
        assert!(r.visible_ids().is_empty());
        assert_eq!(r.primary().collection().len(), 1);
        assert!(r.contains(s));
    }

    #[test]
    fn close_primary_empties_it() {
        let mut r = multi();
        let mut p = Released::default();
        r.primary_mut().add_items([item("/a")]);
        assert!(r.close(ContainerId::PRIMARY, &mut p));
        assert!(r.primary().is_empty());
        assert!(!r.close(ContainerId::new(99), &mut p));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn collections() -> impl Strategy<Value = Vec<Vec<(u8, bool)>>> {
            prop::collection::vec(prop::collection::vec((0_u8..12, any::<bool>()), 0..8), 1..5)
        }

        proptest! {
            #[test]
            fn merge_is_deduplicated_union_with_pins_ored(sources in collections()) {
                let mut r = multi();
                let mut p = Released::default();
                for (n, source) in sources.iter().enumerate() {
                    let target = if n == 0 {
                        ContainerId::PRIMARY
                    } else {
                        r.spawn(Point::ORIGIN, &[], &mut p)
                    };
                    let c = r.get_mut(target).expect("live");
                    for (key, pinned) in source {
                        c.add_items([item(&format!("/{key}")).pinned(*pinned)]);
                    }
                }

                r.enforce_single_mode(&[], &mut p);
                prop_assert!(r.spawned().is_empty());

                let merged = locators(r.primary());
                let mut unique = merged.clone();
                unique.sort();
                unique.dedup();
                prop_assert_eq!(unique.len(), merged.len());

                for (key, _) in sources.iter().flatten() {
                    let path = format!("/{key}");
                    prop_assert!(merged.contains(&path));
                    // Pinned in a collection that kept it (the first copy per source wins).
                    let pinned_somewhere = sources.iter().any(|s| {
                        s.iter().find(|(k, _)| k == key).is_some_and(|(_, pin)| *pin)
                    });
                    let pinned_after = r
                        .primary()
                        .collection()
                        .iter()
                        .any(|i| i.locator().as_str() == path && i.is_pinned());
                    prop_assert_eq!(pinned_after, pinned_somewhere);
                }
            }
        }
    }
}
