// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=dropshelf_coordinator --heading-base-level=0

//! Dropshelf Coordinator: lifecycle of many floating drop containers.
//!
//! This crate decides which container acts on a trigger, when an idle container
//! hides itself, and how many containers collapse into one when configuration
//! changes. Containers themselves live in `dropshelf_surface`.
//!
//! - [`registry`]: the primary container plus spawned ones, [`Registry::spawn`]
//!   and the de-duplicating merge [`Registry::enforce_single_mode`].
//! - [`scheduler`]: a fixed-interval, level-triggered auto-hide evaluator. It is
//!   the only writer of auto-hide transitions and self-heals from missed hover events.
//! - [`arbitration`]: a container never hides while the pointer is over it, over a
//!   sibling, or while the chooser is on screen.
//! - [`routing`]: a pure `route(trigger, snapshot, pointer) -> Decision`.
//! - [`hover`]: pointer enter/leave tracking, used only as deadline hints.
//! - [`config`]: the polled [`ConfigStore`] seam and serde-backed [`Settings`].
//! - [`Coordinator`]: the facade a host drives from its main thread.
//!
//! ## Threading
//!
//! Everything runs on one control thread. The host calls [`Coordinator::poll`] (or
//! [`Coordinator::tick`]) from its run loop, forwards gestures, pointer motion and
//! animation completions, and implements [`Host`] for the collaborators.
//!
//! ## Logging
//!
//! Decisions, rejections, spawns, merges and tick commits are emitted as `tracing`
//! events; each scheduler pass runs inside an `auto_hide_tick` span. The crate
//! never installs a subscriber.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//!
//! use dropshelf_coordinator::config::Settings;
//! use dropshelf_coordinator::testing::{RecordingHost, settle};
//! use dropshelf_coordinator::Coordinator;
//! use dropshelf_items::Locator;
//! use dropshelf_surface::{ContainerId, Visibility};
//! use kurbo::Point;
//!
//! let mut shelf = Coordinator::new(RecordingHost::new(Settings::default()));
//! let id = shelf.add_items_from_external_source(
//!     [Locator::new("/tmp/report.pdf")],
//!     false,
//!     Some(Point::new(400.0, 300.0)),
//! );
//! assert_eq!(id, ContainerId::PRIMARY);
//! settle(&mut shelf);
//!
//! // The pointer is far away and no hover event ever arrives: ticks alone hide it.
//! let start = Instant::now();
//! let away = Some(Point::new(1800.0, 1000.0));
//! for step in 0..=6_u32 {
//!     shelf.tick(start + Duration::from_millis(200) * step, away);
//! }
//! assert_eq!(shelf.container(id).unwrap().visibility(), Visibility::AutoHidden);
//! ```

pub mod arbitration;
pub mod config;
pub mod coordinator;
pub mod hover;
pub mod layout;
pub mod registry;
pub mod routing;
pub mod scheduler;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use config::{ConfigError, ConfigStore, Settings};
pub use coordinator::{Chooser, Coordinator, Host};
pub use registry::{MergeSummary, Mode, Registry};
pub use routing::{Decision, Trigger};
pub use scheduler::{AutoHideScheduler, TickReport};
