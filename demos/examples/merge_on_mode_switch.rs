// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning multi mode off collapses every container into the primary.
//!
//! Items shared by locator are kept once; a pin in any source survives.
//!
//! Run:
//! - `cargo run -p dropshelf_demos --example merge_on_mode_switch`

use std::time::Instant;

use dropshelf_coordinator::config::Settings;
use dropshelf_coordinator::testing::{RecordingHost, settle};
use dropshelf_coordinator::{Coordinator, Mode};
use dropshelf_items::{Item, Locator};
use dropshelf_surface::ContainerId;
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
    shelf.on_jiggle_detected(Point::new(300.0, 400.0));
    let second = shelf.spawn(Point::new(900.0, 400.0));
    settle(&mut shelf);

    let add = |shelf: &mut Coordinator<RecordingHost>, id, items: &[(&str, bool)]| {
        if let Some(c) = shelf.container_mut(id) {
            c.add_items(
                items
                    .iter()
                    .map(|(path, pinned)| Item::new(Locator::new(*path)).pinned(*pinned)),
            );
        }
    };
    add(&mut shelf, ContainerId::PRIMARY, &[("~/A.txt", false), ("~/B", false)]);
    add(&mut shelf, second, &[("~/B", true), ("~/C.png", false)]);

    shelf.host_mut().settings.multi_container_mode = false;
    let summary = shelf.sync_mode().expect("config left multi mode");
    println!("== Merge ==\n  {summary:?}");

    assert_eq!(shelf.mode(), Mode::Single);
    assert!(shelf.registry().spawned().is_empty());
    let primary = shelf.registry().primary();
    println!("== Primary ==");
    for item in primary.collection() {
        println!("  {} pinned={}", item.locator(), item.is_pinned());
    }
    let locators: Vec<_> = primary
        .collection()
        .iter()
        .map(|i| i.locator().as_str())
        .collect();
    assert_eq!(locators, ["~/A.txt", "~/B", "~/C.png"]);
    assert!(primary.collection().iter().nth(1).is_some_and(|b| b.is_pinned()));

    // Ticks keep polling config; nothing further happens.
    assert!(shelf.tick(Instant::now(), None).hidden.is_empty());
}
