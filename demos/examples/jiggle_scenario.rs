// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Three jiggles during one drag in multi mode.
//!
//! The first jiggle reveals the primary container under the pointer, the second
//! spawns a second container, and the third opens the chooser instead of spawning
//! a third one.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p dropshelf_demos --example jiggle_scenario`

use dropshelf_coordinator::Coordinator;
use dropshelf_coordinator::config::Settings;
use dropshelf_coordinator::routing::Decision;
use dropshelf_coordinator::testing::{HostEvent, RecordingHost};
use dropshelf_surface::{Accent, ContainerId};
use kurbo::Point;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = Settings {
        multi_container_mode: true,
        ..Settings::default()
    };
    let mut shelf = Coordinator::new(RecordingHost::new(settings));
    let pointer = Point::new(500.0, 500.0);

    let first = shelf.on_jiggle_detected(pointer);
    println!("== Jiggle 1 ==\n  {first:?}");
    let second = shelf.on_jiggle_detected(pointer);
    println!("== Jiggle 2 ==\n  {second:?}");
    let third = shelf.on_jiggle_detected(pointer);
    println!("== Jiggle 3 ==\n  {third:?}");

    assert_eq!(first, Decision::RevealPrimary { at: pointer });
    assert_eq!(second, Decision::Spawn { at: pointer });
    let spawned = &shelf.registry().spawned()[0];
    assert_eq!(spawned.accent(), Accent(1));
    assert_eq!(
        third,
        Decision::Choose(vec![ContainerId::PRIMARY, spawned.id()])
    );
    assert_eq!(shelf.registry().spawned().len(), 1);

    println!("== Host calls ==");
    for event in &shelf.host().events {
        if !matches!(event, HostEvent::Observe(..)) {
            println!("  {event:?}");
        }
    }

    shelf.on_drag_ended();
    println!("== Drag ended ==\n  chooser: {:?}", shelf.chooser());
}
