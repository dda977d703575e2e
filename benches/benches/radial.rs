// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_radial::{LayoutStrategy, RadialConfig, SpiralConfig, SpiralLayout, WheelLayout};

fn spiral(segments: usize, items: usize, visible: usize) -> SpiralLayout {
    let mut spiral = SpiralLayout::new(
        RadialConfig::default()
            .with_segment_count(segments)
            .with_max_visible_entries(visible),
        SpiralConfig::default(),
    );
    spiral.initialize(items);
    spiral
}

fn bench_desired_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("radial/desired_indices");
    for visible in [8_usize, 32, 64] {
        let mut layout = spiral(16, 1_000, visible);
        group.bench_with_input(BenchmarkId::new("spiral", visible), &visible, |b, _| {
            let mut angle = 0.0;
            b.iter(|| {
                angle += 7.5;
                layout.set_pointer_angle(angle);
                black_box(layout.compute_desired_global_indices());
            });
        });
    }

    let mut wheel = WheelLayout::new(RadialConfig::default().with_segment_count(64));
    wheel.initialize(48);
    group.bench_function("wheel/64", |b| {
        b.iter(|| black_box(wheel.compute_desired_global_indices()));
    });
    group.finish();
}

fn bench_frame_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("radial/frame_math");
    let mut layout = spiral(8, 10_000, 16);

    // Everything a host asks per entry per frame, over one window.
    group.bench_function("spiral/positions", |b| {
        let mut angle = -3_600.0;
        b.iter(|| {
            angle += 3.0;
            layout.set_pointer_angle(angle);
            let mut acc = 0.0;
            for g in layout.compute_desired_global_indices() {
                let p = layout.item_position(g);
                acc += p.x + p.y + layout.entry_depth(g);
                acc += layout.global_index_to_data_index(g).unwrap_or(0) as f64;
            }
            black_box(acc)
        });
    });

    group.bench_function("spiral/shortest_angle", |b| {
        layout.set_pointer_angle(123_456.0);
        let mut d = 0_usize;
        b.iter(|| {
            d = (d + 37) % 10_000;
            black_box(layout.shortest_unbound_angle_for_data_index(d))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_desired_indices, bench_frame_math);
criterion_main!(benches);
