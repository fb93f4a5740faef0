// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::{Duration, Instant};

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dropshelf_coordinator::registry::{Mode, Registry, Template};
use dropshelf_coordinator::routing::{Snapshot, Trigger, route};
use dropshelf_coordinator::scheduler::{AutoHideScheduler, TickContext};
use dropshelf_items::{Item, Locator};
use dropshelf_surface::{
    Animation, ContainerId, HidePolicy, Presenter, Stacking, SurfaceRequest,
};
use kurbo::{Point, Rect};

struct Headless;

impl Presenter for Headless {
    fn materialize(&mut self, _: SurfaceRequest<'_>) {}
    fn set_frame(&mut self, _: ContainerId, _: Rect) {}
    fn animate(&mut self, _: ContainerId, _: Animation) {}
    fn observe_input(&mut self, _: ContainerId, _: bool) {}
    fn release(&mut self, _: ContainerId) {}
}

/// `containers` visible containers in a row, each holding `items` items, with
/// `shared` of those items common to every container.
fn populated(containers: usize, items: usize, shared: usize) -> Registry {
    let mut registry = Registry::new(Mode::Multi, Template::default());
    let ids: Vec<ContainerId> = core::iter::once(ContainerId::PRIMARY)
        .chain((1..containers).map(|n| {
            registry.spawn(Point::new(n as f64 * 300.0, 400.0), &[], &mut Headless)
        }))
        .collect();
    let _ = registry
        .primary_mut()
        .show(dropshelf_surface::ShowRequest::at(Point::new(0.0, 400.0)), &[], &mut Headless);
    for (n, id) in ids.into_iter().enumerate() {
        let Some(c) = registry.get_mut(id) else { continue };
        if let Some(t) = c.pending_transition() {
            c.finish_transition(t.token);
        }
        c.add_items((0..items).map(|i| {
            let path = if i < shared {
                format!("/shared/{i}")
            } else {
                format!("/c{n}/{i}")
            };
            Item::new(Locator::new(path)).pinned(i % 7 == 0)
        }));
    }
    registry
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("auto_hide_tick");
    let policy = HidePolicy {
        enabled: true,
        delay: Duration::from_secs(1),
    };
    for &n in &[2_usize, 8, 32] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("arm_n{n}"), |b| {
            b.iter_batched(
                || (populated(n, 4, 0), AutoHideScheduler::default()),
                |(mut registry, mut scheduler)| {
                    let cx = TickContext {
                        now: Instant::now(),
                        pointer: Some(Point::new(-500.0, -500.0)),
                        chooser_visible: false,
                        policy,
                        busy: &[],
                    };
                    black_box(scheduler.tick(&mut registry, cx, &mut Headless));
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("suppressed_by_sibling_n{n}"), |b| {
            b.iter_batched(
                || (populated(n, 4, 0), AutoHideScheduler::default()),
                |(mut registry, mut scheduler)| {
                    let cx = TickContext {
                        now: Instant::now(),
                        pointer: Some(Point::new(300.0, 400.0)),
                        chooser_visible: false,
                        policy,
                        busy: &[],
                    };
                    black_box(scheduler.tick(&mut registry, cx, &mut Headless));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("enforce_single_mode");
    for &(n, items) in &[(4_usize, 16_usize), (16, 64), (32, 256)] {
        group.throughput(Throughput::Elements((n * items) as u64));
        group.bench_function(format!("merge_n{n}_items{items}"), |b| {
            b.iter_batched(
                || populated(n, items, items / 2),
                |mut registry| {
                    black_box(registry.enforce_single_mode(&[], &mut Headless));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("route");
    for &n in &[2_usize, 32] {
        let registry = populated(n, 4, 0);
        let snapshot = Snapshot::capture(&registry, Mode::Multi, |_| Stacking::default());
        group.bench_function(format!("ingest_n{n}"), |b| {
            b.iter(|| black_box(route(Trigger::Ingest, &snapshot, Point::ORIGIN)));
        });
        let dragging = snapshot.clone().with_drag(true);
        group.bench_function(format!("jiggle_n{n}"), |b| {
            b.iter(|| black_box(route(Trigger::Jiggle, &dragging, Point::ORIGIN)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tick, bench_merge, bench_route);
criterion_main!(benches);
