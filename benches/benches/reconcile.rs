// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_entries::{
    ClassResolver, EntryClassHint, EntryTags, EntryWidget, HostConfig, StrategyEntry, StrategyHost,
};
use understory_radial::{RadialConfig, RadialLayout, RadialMode, SpiralConfig};

#[derive(Default)]
struct Cell {
    item: u64,
    tags: EntryTags,
}

impl StrategyEntry<u64> for Cell {
    fn on_item_assigned(&mut self, _data_index: Option<usize>, item: Option<&u64>) {
        self.item = item.copied().unwrap_or_default();
    }

    fn on_tags_changed(&mut self, _old: EntryTags, new: EntryTags) {
        self.tags = new;
    }
}

impl EntryWidget<u64> for Cell {
    fn strategy_entry(&mut self) -> Option<&mut dyn StrategyEntry<u64>> {
        Some(self)
    }
}

fn spiral_host(items: u64, visible: usize, classes: u64) -> StrategyHost<u64, u64, Cell> {
    let mut resolver = ClassResolver::with_default(0);
    resolver.set_hint(move |item: &u64| EntryClassHint::Class(item % classes));
    let mut host = StrategyHost::new(
        |_class: &u64| Some(Cell::default()),
        resolver,
        HostConfig::default(),
    );
    host.set_strategy(RadialLayout::new(
        RadialMode::Spiral,
        RadialConfig::default()
            .with_segment_count(16)
            .with_max_visible_entries(visible)
            .with_deactivated_entries(4),
        SpiralConfig::default(),
    ));
    // The strategy is set, so this cannot fail.
    let _ = host.set_items((0..items).collect());
    host
}

fn bench_steady_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("entries/steady");
    for visible in [8_usize, 32, 64] {
        let mut host = spiral_host(1_000, visible, 1);
        group.bench_with_input(BenchmarkId::from_parameter(visible), &visible, |b, _| {
            b.iter(|| black_box(host.tick(1.0 / 60.0)));
        });
    }
    group.finish();
}

fn bench_scrolling_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("entries/scrolling");
    // One wedge per frame churns one entry at each end of the window;
    // mixed classes exercise the per-class free lists.
    for classes in [1_u64, 4] {
        let mut host = spiral_host(1_000, 32, classes);
        group.bench_with_input(BenchmarkId::new("classes", classes), &classes, |b, _| {
            b.iter(|| {
                host.add_rotation(22.5);
                black_box(host.tick(1.0 / 60.0))
            });
        });
    }

    let mut host = spiral_host(1_000, 32, 1);
    group.bench_function("animated_steps", |b| {
        b.iter(|| {
            let _ = host.step_index_animated(3, 1.0 / 30.0);
            black_box(host.tick(1.0 / 60.0))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_steady_frames, bench_scrolling_frames);
criterion_main!(benches);
