// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Level-triggered auto-hide with two containers.
//!
//! The pointer rests on container B the whole time and no hover event is ever
//! delivered. Neither container hides while the pointer stays there; once it moves
//! away, both hide within the delay plus one tick.
//!
//! Run:
//! - `RUST_LOG=dropshelf_coordinator=debug cargo run -p dropshelf_demos --example auto_hide_ticks`

use std::time::{Duration, Instant};

use dropshelf_coordinator::Coordinator;
use dropshelf_coordinator::config::Settings;
use dropshelf_coordinator::testing::{RecordingHost, settle};
use dropshelf_items::{Item, Locator};
use dropshelf_surface::{ContainerId, Visibility};
use kurbo::Point;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = Settings {
        multi_container_mode: true,
        auto_hide_delay_secs: 1.0,
        ..Settings::default()
    };
    let mut shelf = Coordinator::new(RecordingHost::new(settings));
    let a = shelf.add_items_from_external_source(
        [Locator::new("/tmp/a.txt")],
        false,
        Some(Point::new(300.0, 400.0)),
    );
    let b = shelf.spawn(Point::new(900.0, 400.0));
    if let Some(c) = shelf.container_mut(b) {
        c.add_items([Item::new(Locator::new("/tmp/b.txt"))]);
    }
    settle(&mut shelf);

    let tick = shelf.scheduler().interval();
    let start = Instant::now();
    let over_b = Some(Point::new(900.0, 400.0));
    let mut now = start;
    for _ in 0..15 {
        let report = shelf.tick(now, over_b);
        assert!(report.hidden.is_empty());
        now += tick;
    }
    println!("== Pointer over B for {:?} ==", now - start);
    for id in [a, b] {
        println!("  {id}: {:?}", shelf.container(id).map(|c| c.visibility()));
    }

    let away = Some(Point::new(1800.0, 1000.0));
    let left_at = now;
    let mut hidden = Vec::new();
    while hidden.len() < 2 {
        hidden.extend(shelf.tick(now, away).hidden);
        now += tick;
    }
    println!("== Pointer away ==\n  hidden {hidden:?} after {:?}", now - tick - left_at);
    assert!(now - tick - left_at <= Duration::from_secs(1) + tick);
    assert_eq!(
        shelf.container(ContainerId::PRIMARY).map(|c| c.visibility()),
        Some(Visibility::AutoHidden)
    );
}
