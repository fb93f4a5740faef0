// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic in-memory host for tests, demos and benchmarks.
//!
//! Available with the `test-helpers` feature.

use std::collections::{BTreeMap, BTreeSet};

use dropshelf_items::ItemId;
use dropshelf_surface::{
    Accent, Animation, BusyGuards, ContainerId, DisplayDescriptor, DisplayId, DisplayTopology,
    Presenter, Stacking, SurfaceRequest,
};
use kurbo::Rect;

use crate::config::{ConfigStore, Layout, Settings};
use crate::coordinator::{Chooser, Coordinator, Host};

/// A call the coordinator made into the host.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// A surface was created.
    Materialize {
        /// Container.
        id: ContainerId,
        /// Accent color.
        accent: Accent,
        /// Initial frame.
        frame: Rect,
        /// Items at creation time.
        items: usize,
    },
    /// A surface was moved.
    SetFrame(ContainerId, Rect),
    /// An animation started.
    Animate(ContainerId, Animation),
    /// Input monitors were installed or removed.
    Observe(ContainerId, bool),
    /// A surface was destroyed.
    Release(ContainerId),
    /// A preview was requested.
    Preview(ContainerId, Vec<ItemId>),
    /// The chooser was shown.
    PresentChooser(Vec<ContainerId>),
    /// The chooser was hidden.
    DismissChooser,
}

/// A host that records every call and lets tests flip its inputs.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    /// Config served to the coordinator.
    pub settings: Settings,
    /// Display topology, primary display first.
    pub displays: Vec<DisplayDescriptor>,
    /// Containers with an active file operation or share.
    pub busy: BTreeSet<ContainerId>,
    /// Stacking reported per container.
    pub stacking: BTreeMap<ContainerId, Stacking>,
    /// Calls received, in order.
    pub events: Vec<HostEvent>,
    /// Containers listed by the chooser, while it is shown.
    pub chooser: Option<Vec<ContainerId>>,
}

impl RecordingHost {
    /// A host with one 1920×1080 display at the origin.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            displays: vec![DisplayDescriptor {
                id: DisplayId(1),
                frame: Rect::new(0.0, 0.0, 1920.0, 1080.0),
            }],
            ..Self::default()
        }
    }

    /// How many times a surface was created for `id`.
    pub fn materialized(&self, id: ContainerId) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HostEvent::Materialize { id: m, .. } if *m == id))
            .count()
    }

    /// How many animations were started for `id`.
    pub fn animations(&self, id: ContainerId) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HostEvent::Animate(a, _) if *a == id))
            .count()
    }

    /// Forget recorded events.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl ConfigStore for RecordingHost {
    fn multi_container_mode_enabled(&self) -> bool {
        self.settings.multi_container_mode_enabled()
    }

    fn auto_hide_enabled(&self) -> bool {
        self.settings.auto_hide_enabled()
    }

    fn auto_hide_delay_seconds(&self) -> f64 {
        self.settings.auto_hide_delay_seconds()
    }

    fn layout(&self) -> Layout {
        self.settings.layout()
    }
}

impl Presenter for RecordingHost {
    fn materialize(&mut self, request: SurfaceRequest<'_>) {
        self.events.push(HostEvent::Materialize {
            id: request.id,
            accent: request.accent,
            frame: request.frame,
            items: request.collection.len(),
        });
    }

    fn set_frame(&mut self, id: ContainerId, frame: Rect) {
        self.events.push(HostEvent::SetFrame(id, frame));
    }

    fn animate(&mut self, id: ContainerId, animation: Animation) {
        self.events.push(HostEvent::Animate(id, animation));
    }

    fn observe_input(&mut self, id: ContainerId, observe: bool) {
        self.events.push(HostEvent::Observe(id, observe));
    }

    fn release(&mut self, id: ContainerId) {
        self.events.push(HostEvent::Release(id));
    }

    fn preview(&mut self, id: ContainerId, items: &[ItemId]) {
        self.events.push(HostEvent::Preview(id, items.to_vec()));
    }

    fn stacking(&self, id: ContainerId) -> Stacking {
        self.stacking.get(&id).copied().unwrap_or_default()
    }
}

impl Chooser for RecordingHost {
    fn present_chooser(&mut self, containers: &[ContainerId]) {
        self.chooser = Some(containers.to_vec());
        self.events
            .push(HostEvent::PresentChooser(containers.to_vec()));
    }

    fn dismiss_chooser(&mut self) {
        self.chooser = None;
        self.events.push(HostEvent::DismissChooser);
    }
}

impl BusyGuards for RecordingHost {
    fn file_operation_active(&self, id: ContainerId) -> bool {
        self.busy.contains(&id)
    }

    fn share_active(&self, _id: ContainerId) -> bool {
        false
    }
}

impl DisplayTopology for RecordingHost {
    fn displays(&self) -> Vec<DisplayDescriptor> {
        self.displays.clone()
    }
}

/// Complete every in-flight animation, as a host would once they finish.
/// Returns how many completions were delivered.
pub fn settle<H: Host>(coordinator: &mut Coordinator<H>) -> usize {
    let pending: Vec<_> = coordinator
        .registry()
        .iter()
        .filter_map(|c| c.pending_transition().map(|t| (c.id(), t.token)))
        .collect();
    pending
        .into_iter()
        .filter(|(id, token)| coordinator.finish_transition(*id, *token))
        .count()
}
