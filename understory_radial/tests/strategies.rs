// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenario tests for the `understory_radial` crate.
//!
//! These drive the public strategy surface the way a host does: initialize,
//! rotate the pointer, and read back focus, windows and index mappings.

use understory_radial::{
    ConfigError, GlobalIndex, LayoutStrategy, RadialConfig, RadialLayout, RadialMode,
    SpiralConfig, SpiralLayout, WheelLayout,
};

fn spiral(segments: usize, items: usize) -> SpiralLayout {
    let mut spiral = SpiralLayout::new(
        RadialConfig::default().with_segment_count(segments),
        SpiralConfig::default(),
    );
    spiral.initialize(items);
    spiral
}

#[test]
fn spiral_ten_items_on_eight_segments() {
    let spiral = spiral(8, 10);
    assert_eq!(spiral.gap_segments(), 6);
    assert_eq!(spiral.virtual_cycle(), 16);
    assert_eq!(spiral.global_index_to_data_index(0), Some(0));
    assert_eq!(spiral.global_index_to_data_index(10), None);
    assert_eq!(spiral.global_index_to_data_index(16), Some(0));
    assert_eq!(spiral.global_index_to_data_index(25), Some(9));
}

#[test]
fn wheel_pointer_past_one_turn() {
    let mut wheel = WheelLayout::new(RadialConfig::default().with_segment_count(8));
    wheel.initialize(8);
    assert_eq!(wheel.angular_spacing(), 45.0);

    wheel.set_pointer_angle(370.0);
    assert_eq!(wheel.sanitize_angle(wheel.pointer_angle()), 10.0);
    assert_eq!(wheel.find_focused_global_index(), 0);
}

#[test]
fn spiral_walk_keeps_window_width() {
    let mut spiral = spiral(8, 10);
    let mut angle = -900.0;
    while angle < 900.0 {
        spiral.set_pointer_angle(angle);
        let window = spiral.visible_window().expect("spiral always has a window");
        assert_eq!(window.len(), 8);
        let focused = spiral.find_focused_global_index();
        assert!(window.contains(focused));

        let desired = spiral.compute_desired_global_indices();
        assert_eq!(desired.len(), 12);
        assert!(desired.windows(2).all(|w| w[0] + 1 == w[1]));
        angle += 7.5;
    }
}

#[test]
fn every_item_reachable_by_shortest_angle() {
    let mut layout = RadialLayout::new(
        RadialMode::Spiral,
        RadialConfig::default().with_segment_count(6),
        SpiralConfig::default(),
    );
    layout.initialize(7);
    layout.set_pointer_angle(1_234.0);

    for d in 0..7 {
        let target = layout.shortest_unbound_angle_for_data_index(d);
        let mut probe = layout.clone();
        probe.set_pointer_angle(target);
        let g: GlobalIndex = probe.find_focused_global_index();
        assert_eq!(probe.global_index_to_data_index(g), Some(d));
    }
}

#[test]
fn validation_collects_messages() {
    let mut spiral = SpiralLayout::new(
        RadialConfig::default()
            .with_segment_count(0)
            .with_max_visible_entries(0),
        SpiralConfig::default().with_turn_threshold(-1.0),
    );
    spiral.initialize(3);
    let errors = spiral.validate();
    assert_eq!(
        errors,
        [
            ConfigError::ZeroSegmentCount,
            ConfigError::ZeroMaxVisibleEntries,
            ConfigError::NonPositiveTurnThreshold,
        ]
    );
    assert_eq!(
        errors[0].to_string(),
        "radial segment count must be greater than 0"
    );

    // Degenerate configuration still answers without panicking.
    assert_eq!(spiral.find_focused_global_index(), 0);
    assert_eq!(spiral.global_index_to_data_index(2), Some(2));
    // Without segments there is no gap, so the cycle is just the items.
    assert_eq!(spiral.global_index_to_data_index(3), Some(0));
    assert_eq!(spiral.compute_desired_global_indices().len(), 5);
}
