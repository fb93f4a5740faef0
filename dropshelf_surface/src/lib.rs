// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=dropshelf_surface --heading-base-level=0

//! Dropshelf Surface: one floating drop container and its state machine.
//!
//! A [`Container`] is an independently addressable floating surface holding one
//! [`ItemCollection`](dropshelf_items::ItemCollection). This crate tracks its state;
//! drawing, animation and input monitoring are delegated to a [`Presenter`].
//!
//! - Visibility moves between [`Visibility::Hidden`], [`Visibility::Visible`] and
//!   [`Visibility::AutoHidden`].
//! - At most one transition is in flight per container. Requests that arrive meanwhile
//!   are dropped with [`Rejected::InTransition`], never queued.
//! - A hide deadline is armed when the pointer leaves and cleared when it returns.
//!   Committing the auto-hide is left to a scheduler one layer up.
//! - [`BusyGuards`] report external file and share operations that block hiding
//!   a non-empty container.
//! - [`resolve_display`] keeps a container on a live display when its remembered
//!   display disappears.
//!
//! ## Not a window system
//!
//! Frames are plain [`kurbo::Rect`]s in global coordinates. The host owns real windows
//! and reports animation completion back with the [`TransitionToken`] it was handed.
//!
//! ## API overview
//!
//! - [`Container::show`] / [`Container::hide`] / [`Container::auto_hide`]
//! - [`Container::finish_transition`]
//! - [`Container::request_hide_timer`] / [`Container::cancel_hide_timer`]
//! - [`Container::add_items`] / [`Container::remove_item`] / [`Container::toggle_pin`]
//! - [`Container::handle_shortcut`] for in-surface select-all and preview
//!
//! # Example
//!
//! ```rust
//! use dropshelf_items::{Item, Locator};
//! use dropshelf_surface::{
//!     Accent, Animation, Container, ContainerId, Motion, Presenter, ShowRequest, Shown,
//!     SurfaceRequest, Visibility,
//! };
//! use kurbo::{Point, Rect, Size};
//!
//! struct Headless;
//! impl Presenter for Headless {
//!     fn materialize(&mut self, _: SurfaceRequest<'_>) {}
//!     fn set_frame(&mut self, _: ContainerId, _: Rect) {}
//!     fn animate(&mut self, _: ContainerId, _: Animation) {}
//!     fn observe_input(&mut self, _: ContainerId, _: bool) {}
//!     fn release(&mut self, _: ContainerId) {}
//! }
//!
//! let mut shelf = Container::new(ContainerId::PRIMARY, Accent(0), Size::new(280.0, 320.0), Motion::default());
//! shelf.add_items([Item::new(Locator::new("/tmp/photo.jpg"))]);
//!
//! let Ok(Shown::Revealed(token)) = shelf.show(ShowRequest::at(Point::new(500.0, 500.0)), &[], &mut Headless) else {
//!     unreachable!()
//! };
//! assert_eq!(shelf.visibility(), Visibility::Visible);
//!
//! // A second show while the first animation runs is dropped.
//! assert!(shelf.show(ShowRequest::at(Point::new(10.0, 10.0)), &[], &mut Headless).is_err());
//! assert!(shelf.finish_transition(token));
//! ```

mod container;
mod display;
mod error;
mod present;
mod types;

pub use container::{Container, HidePolicy, Hidden, ShowRequest, Shown};
pub use display::{
    DisplayDescriptor, DisplayId, DisplayTopology, Resolution, clamp_into, display_frame,
    resolve_display,
};
pub use error::Rejected;
pub use present::{BusyGuards, NeverBusy, Presenter, SurfaceRequest};
pub use types::{
    Accent, Animation, ContainerFlags, ContainerId, Motion, Shortcut, Stacking, Transition,
    TransitionKind, TransitionToken, Visibility,
};
