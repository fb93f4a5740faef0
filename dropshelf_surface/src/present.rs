// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams to the presentation layer and to external busy guards.
//!
//! A container never draws anything itself. It asks a [`Presenter`] to create a
//! surface, move it, animate it, and install or remove input monitors. Animation
//! completion is asynchronous: the host reports it back through the owner of the
//! container together with the [`TransitionToken`](crate::TransitionToken) it was given.

use dropshelf_items::{ItemCollection, ItemId};
use kurbo::Rect;

use crate::types::{Accent, Animation, ContainerId, Stacking};

/// What the presenter needs to build a surface for a container.
#[derive(Copy, Clone, Debug)]
pub struct SurfaceRequest<'a> {
    /// Container the surface belongs to.
    pub id: ContainerId,
    /// Accent color index.
    pub accent: Accent,
    /// Initial frame.
    pub frame: Rect,
    /// Collection to render.
    pub collection: &'a ItemCollection,
}

/// Presentation layer driven by containers and their coordinator.
pub trait Presenter {
    /// Create a renderable surface for a container. Called once per container,
    /// the first time it is shown.
    fn materialize(&mut self, request: SurfaceRequest<'_>);

    /// Move or resize a surface.
    fn set_frame(&mut self, id: ContainerId, frame: Rect);

    /// Start an animation. The host must report completion exactly once with
    /// the animation's token.
    fn animate(&mut self, id: ContainerId, animation: Animation);

    /// Install (`true`) or remove (`false`) the keyboard and pointer monitors
    /// used for in-surface shortcuts.
    fn observe_input(&mut self, id: ContainerId, observe: bool);

    /// Destroy a surface for good.
    fn release(&mut self, id: ContainerId);

    /// Open a preview of the given items.
    fn preview(&mut self, id: ContainerId, items: &[ItemId]) {
        let _ = (id, items);
    }

    /// Current stacking of a surface. Defaults to "unknown".
    fn stacking(&self, id: ContainerId) -> Stacking {
        let _ = id;
        Stacking::default()
    }
}

/// External operations that block hiding a non-empty container.
pub trait BusyGuards {
    /// A file transfer (copy, move, compress) involving the container is running.
    fn file_operation_active(&self, id: ContainerId) -> bool;

    /// A share sheet or similar is open for the container.
    fn share_active(&self, id: ContainerId) -> bool;

    /// Either guard holds.
    fn is_busy(&self, id: ContainerId) -> bool {
        self.file_operation_active(id) || self.share_active(id)
    }
}

/// Guards that never block.
#[derive(Copy, Clone, Debug, Default)]
pub struct NeverBusy;

impl BusyGuards for NeverBusy {
    #[inline]
    fn file_operation_active(&self, _id: ContainerId) -> bool {
        false
    }

    #[inline]
    fn share_active(&self, _id: ContainerId) -> bool {
        false
    }
}
