// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for containers: identifiers, accents, visibility, flags, and motion.

use core::fmt;
use core::time::Duration;

/// Identifier for a container.
///
/// Ids are handed out by the owner of the containers (normally a registry) from a
/// monotonically increasing counter. A destroyed container's id is never reused,
/// so a stale id can never alias a live container.
///
/// The primary container conventionally uses [`ContainerId::PRIMARY`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ContainerId(u32);

impl ContainerId {
    /// Id of the always-present primary container.
    pub const PRIMARY: Self = Self(0);

    /// Build an id from its raw value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// True for [`ContainerId::PRIMARY`].
    pub const fn is_primary(self) -> bool {
        self.0 == Self::PRIMARY.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Accent color of a container, as an index into the host's palette.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Accent(pub u8);

/// Visibility of a container.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Visibility {
    /// Not on screen.
    #[default]
    Hidden,
    /// On screen.
    Visible,
    /// Hidden by the auto-hide scheduler; frame and collection are kept for
    /// instant restoration ("peek").
    AutoHidden,
}

impl Visibility {
    /// True for [`Visibility::Visible`].
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

bitflags::bitflags! {
    /// Transient per-container state that guards hide decisions.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ContainerFlags: u8 {
        /// The user is dragging a selection out of the container.
        const SELECTION_DRAG = 0b0000_0001;
        /// An item is being renamed in place.
        const RENAMING       = 0b0000_0010;
        /// Keyboard and pointer monitors for in-surface shortcuts are installed.
        const OBSERVING      = 0b0000_0100;
        /// The presenter has created a surface for this container.
        const MATERIALIZED   = 0b0000_1000;
    }
}

/// Handle identifying one show or hide animation.
///
/// The presenter receives it with every [`Animation`] and the host hands it back
/// when the animation completes. Tokens increase per container, so a completion
/// for a superseded animation can be recognized and ignored.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TransitionToken(pub u64);

/// Direction of an in-flight transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TransitionKind {
    /// Animating in (reveal).
    Reveal,
    /// Animating out (hide or auto-hide).
    Conceal,
}

/// An in-flight transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Transition {
    /// Direction.
    pub kind: TransitionKind,
    /// Token the completion must carry.
    pub token: TransitionToken,
}

/// Animation request handed to the presenter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Animation {
    /// Direction.
    pub kind: TransitionKind,
    /// Scale the surface should reach.
    pub target_scale: f64,
    /// Duration of the animation.
    pub duration: Duration,
    /// Token to hand back on completion.
    pub token: TransitionToken,
}

/// Timing and scale used when animating a container in and out.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Motion {
    /// Reveal duration.
    pub reveal: Duration,
    /// Conceal duration.
    pub conceal: Duration,
    /// Scale the surface shrinks to while concealing.
    pub conceal_scale: f64,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            reveal: Duration::from_millis(250),
            conceal: Duration::from_millis(200),
            conceal_scale: 0.85,
        }
    }
}

/// Stacking information the presenter reports for a surface.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Stacking {
    /// On-screen z-order if known; higher is nearer to the user.
    pub z: Option<i32>,
    /// Whether the surface currently holds key (keyboard) focus.
    pub key: bool,
}

/// In-surface keyboard shortcuts a container reacts to while observing input.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Shortcut {
    /// Select every item.
    SelectAll,
    /// Preview the selection (or everything when nothing is selected).
    Preview,
}
