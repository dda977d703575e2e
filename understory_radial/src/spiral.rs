// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unbounded spiral layout.
//!
//! The pointer angle accumulates across turns without wrapping. Global index
//! `g` sits at `g * spacing` degrees, so every turn adds `segment_count` new
//! slots. Data repeats every [virtual cycle](LayoutStrategy::virtual_cycle):
//! the item count padded with gap slots up to a multiple of the segment count,
//! so that the first item always lands back on the first wedge.
//!
//! Entries drift inward when they are turns ahead of the pointer and outward
//! when the pointer has passed them, controlled by [`SpiralConfig`].

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use alloc::vec::Vec;

use kurbo::{Size, Vec2};

use crate::angle::{ANGLE_EPSILON, lerp, polar_offset};
use crate::radial::RadialState;
use crate::{
    ConfigError, DesiredIndices, GlobalIndex, LayoutStrategy, RadialConfig, SpiralConfig,
    VisibleWindow,
};

/// A sliding window of entries on an endless spiral.
///
/// ```
/// use understory_radial::{LayoutStrategy, RadialConfig, SpiralConfig, SpiralLayout};
///
/// let mut spiral = SpiralLayout::new(
///     RadialConfig::default().with_segment_count(8),
///     SpiralConfig::default(),
/// );
/// spiral.initialize(10);
///
/// assert_eq!(spiral.gap_segments(), 6);
/// assert_eq!(spiral.virtual_cycle(), 16);
/// assert_eq!(spiral.global_index_to_data_index(0), Some(0));
/// assert_eq!(spiral.global_index_to_data_index(10), None);
/// assert_eq!(spiral.global_index_to_data_index(16), Some(0));
/// assert_eq!(spiral.global_index_to_data_index(-1), None);
/// assert_eq!(spiral.global_index_to_data_index(-7), Some(9));
/// ```
#[derive(Clone, Debug)]
pub struct SpiralLayout {
    state: RadialState,
    spiral: SpiralConfig,
}

impl SpiralLayout {
    /// Create a spiral. Call [`initialize`](LayoutStrategy::initialize) before use.
    #[must_use]
    pub fn new(config: RadialConfig, spiral: SpiralConfig) -> Self {
        Self {
            state: RadialState::new(config),
            spiral,
        }
    }

    /// The shared radial configuration as given.
    #[must_use]
    pub fn config(&self) -> &RadialConfig {
        &self.state.config
    }

    /// The spiral-specific configuration.
    #[must_use]
    pub fn spiral_config(&self) -> &SpiralConfig {
        &self.spiral
    }

    /// Replace the shared configuration. Takes effect on the next
    /// [`initialize`](LayoutStrategy::initialize).
    pub fn set_config(&mut self, config: RadialConfig) {
        self.state.config = config;
    }

    /// Replace the spiral configuration. Takes effect immediately.
    pub fn set_spiral_config(&mut self, spiral: SpiralConfig) {
        self.spiral = spiral;
    }

    /// Width of the visible window after clamping.
    #[must_use]
    pub fn max_visible_entries(&self) -> usize {
        self.state.max_visible_entries
    }

    /// Hidden entries kept on each side of the visible window after clamping.
    #[must_use]
    pub fn deactivated_entries(&self) -> usize {
        self.state.deactivated_entries
    }

    /// Distance factor for an arbitrary angle on the spiral.
    #[must_use]
    pub fn distance_factor_for_angle(&self, degrees: f64) -> f64 {
        let threshold = self.spiral.turn_threshold;
        if !(threshold.is_finite() && threshold > 0.0) {
            return 0.5;
        }
        let turn_diff = (self.state.pointer_angle - degrees) / 360.0;
        let clamped = turn_diff.clamp(-threshold, threshold);
        (clamped + threshold) / (2.0 * threshold)
    }

    /// Radius for an arbitrary angle on the spiral.
    #[must_use]
    pub fn radius_for_angle(&self, degrees: f64) -> f64 {
        let factor = self.distance_factor_for_angle(degrees);
        self.state.config.base_radius
            + lerp(self.spiral.inward_offset, self.spiral.outward_offset, factor)
    }

    /// Sample the spiral path `span` wedges either side of the focused index.
    ///
    /// Each wedge is split into `subdivisions` steps (at least one). The
    /// returned offsets are relative to the layout center and are intended
    /// for debug overlays only.
    #[must_use]
    pub fn sample_path(&self, span: usize, subdivisions: usize) -> Vec<Vec2> {
        let subdivisions = subdivisions.max(1);
        let spacing = self.state.angular_spacing;
        let Ok(span) = GlobalIndex::try_from(span) else {
            return Vec::new();
        };
        let focused = self.find_focused_global_index();
        let first = focused.saturating_sub(span);
        let last = focused.saturating_add(span);

        let mut points = Vec::new();
        for index in first..=last {
            for step in 0..subdivisions {
                if index == last && step > 0 {
                    break;
                }
                let t = index as f64 + step as f64 / subdivisions as f64;
                let angle = t * spacing;
                points.push(polar_offset(self.radius_for_angle(angle), angle));
            }
        }
        points
    }

    fn window_extent(&self) -> (GlobalIndex, GlobalIndex) {
        let max_visible = GlobalIndex::try_from(self.state.max_visible_entries).unwrap_or(1);
        let start = self
            .find_focused_global_index()
            .saturating_sub(max_visible / 2);
        (start, start.saturating_add(max_visible - 1))
    }
}

impl Default for SpiralLayout {
    fn default() -> Self {
        Self::new(RadialConfig::default(), SpiralConfig::default())
    }
}

impl LayoutStrategy for SpiralLayout {
    fn initialize(&mut self, item_count: usize) {
        let state = &mut self.state;
        state.begin_initialize(item_count);
        state.set_segment_count(state.config.segment_count);

        let segments = state.segment_count;
        state.gap_segments = if segments == 0 {
            0
        } else {
            match item_count % segments {
                0 => 0,
                remainder => segments - remainder,
            }
        };
    }

    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        self.state.validate_into(&mut errors);
        let threshold = self.spiral.turn_threshold;
        if !(threshold.is_finite() && threshold > 0.0) {
            errors.push(ConfigError::NonPositiveTurnThreshold);
        }
        errors
    }

    fn compute_desired_global_indices(&self) -> DesiredIndices {
        let (start, end) = self.window_extent();
        let pad = GlobalIndex::try_from(self.state.deactivated_entries).unwrap_or(0);
        (start.saturating_sub(pad)..=end.saturating_add(pad)).collect()
    }

    fn global_index_to_data_index(&self, index: GlobalIndex) -> Option<usize> {
        let cycle = GlobalIndex::try_from(self.virtual_cycle()).ok()?;
        if self.state.item_count == 0 || cycle == 0 {
            return None;
        }
        let wrapped = usize::try_from(index.rem_euclid(cycle)).ok()?;
        (wrapped < self.state.item_count).then_some(wrapped)
    }

    fn item_position(&self, index: GlobalIndex) -> Vec2 {
        let angle = self.item_angle_degrees(index);
        polar_offset(self.radius_for_angle(angle), angle)
    }

    fn entry_size(&self, _index: GlobalIndex) -> Size {
        let diameter = (self.state.config.base_radius + self.spiral.outward_offset) * 2.0;
        Size::new(diameter, diameter)
    }

    fn entry_depth(&self, index: GlobalIndex) -> f64 {
        1.0 - (self.distance_factor(index) - 0.5).abs() * 2.0
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "pointer angles stay far below the range where the floored quotient overflows"
    )]
    fn find_focused_global_index(&self) -> GlobalIndex {
        if !self.state.has_spacing() {
            return 0;
        }
        let spacing = self.state.angular_spacing;
        ((self.state.pointer_angle + spacing * 0.5) / spacing).floor() as GlobalIndex
    }

    fn shortest_unbound_angle_for_data_index(&self, data_index: usize) -> f64 {
        let pointer = self.state.pointer_angle;
        if self.state.item_count == 0 {
            return pointer;
        }
        let spacing = self.state.angular_spacing;
        let base = data_index as f64 * spacing;
        let step = self.virtual_cycle() as f64 * spacing;
        if step.abs() < ANGLE_EPSILON {
            return base;
        }

        let turns = (pointer - base) / step;
        let below = base + turns.floor() * step;
        let above = base + turns.ceil() * step;
        if (pointer - below).abs() <= (above - pointer).abs() {
            below
        } else {
            above
        }
    }

    fn sanitize_angle(&self, degrees: f64) -> f64 {
        degrees
    }

    fn pointer_angle(&self) -> f64 {
        self.state.pointer_angle
    }

    fn set_pointer_angle(&mut self, degrees: f64) {
        self.state.pointer_angle = degrees;
    }

    fn item_count(&self) -> usize {
        self.state.item_count
    }

    fn segment_count(&self) -> usize {
        self.state.segment_count
    }

    fn angular_spacing(&self) -> f64 {
        self.state.angular_spacing
    }

    fn gap_segments(&self) -> usize {
        self.state.gap_segments
    }

    fn distance_factor(&self, index: GlobalIndex) -> f64 {
        self.distance_factor_for_angle(self.item_angle_degrees(index))
    }

    fn radius_for_global_index(&self, index: GlobalIndex) -> f64 {
        self.radius_for_angle(self.item_angle_degrees(index))
    }

    fn min_radius(&self) -> f64 {
        self.state.config.base_radius + self.spiral.inward_offset
    }

    fn max_radius(&self) -> f64 {
        self.state.config.base_radius + self.spiral.outward_offset
    }

    fn visible_window(&self) -> Option<VisibleWindow> {
        let (start, end) = self.window_extent();
        Some(VisibleWindow::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spiral(segments: usize, items: usize) -> SpiralLayout {
        let mut spiral = SpiralLayout::new(
            RadialConfig::default().with_segment_count(segments),
            SpiralConfig::default(),
        );
        spiral.initialize(items);
        spiral
    }

    #[test]
    fn gap_realigns_on_segment_boundary() {
        for segments in 1..12 {
            for items in 0..40 {
                let spiral = spiral(segments, items);
                let gap = spiral.gap_segments();
                if items % segments == 0 {
                    assert_eq!(gap, 0, "n={items} s={segments}");
                } else {
                    assert_eq!((items + gap) % segments, 0, "n={items} s={segments}");
                }
            }
        }
    }

    #[test]
    fn data_index_is_periodic() {
        for segments in 1..9 {
            for items in 1..20 {
                let spiral = spiral(segments, items);
                let cycle = GlobalIndex::try_from(spiral.virtual_cycle()).unwrap();
                for g in -40..40 {
                    assert_eq!(
                        spiral.global_index_to_data_index(g),
                        spiral.global_index_to_data_index(g + cycle),
                        "g={g} n={items} s={segments}"
                    );
                }
            }
        }
    }

    #[test]
    fn no_items_means_no_data() {
        let spiral = spiral(8, 0);
        assert_eq!(spiral.gap_segments(), 0);
        assert_eq!(spiral.global_index_to_data_index(0), None);
        assert_eq!(spiral.global_index_to_data_index(5), None);
    }

    #[test]
    fn window_follows_focus() {
        let mut spiral = spiral(8, 10);
        assert_eq!(spiral.visible_window(), Some(VisibleWindow::new(-4, 3)));
        let desired = spiral.compute_desired_global_indices();
        assert_eq!(desired.first(), Some(&-6));
        assert_eq!(desired.last(), Some(&5));
        assert_eq!(desired.len(), 12);
        assert!(!spiral.should_be_visible(-5));
        assert!(spiral.should_be_visible(-4));

        // Three full turns plus two wedges.
        spiral.set_pointer_angle(3.0 * 360.0 + 90.0);
        assert_eq!(spiral.find_focused_global_index(), 26);
        assert_eq!(spiral.visible_window(), Some(VisibleWindow::new(22, 29)));
    }

    #[test]
    fn focus_is_unbounded() {
        let mut spiral = spiral(8, 10);
        spiral.set_pointer_angle(-22.6);
        assert_eq!(spiral.find_focused_global_index(), -1);
        spiral.set_pointer_angle(-22.4);
        assert_eq!(spiral.find_focused_global_index(), 0);
        assert_eq!(spiral.sanitize_angle(-22.4), -22.4);
    }

    #[test]
    fn shortest_angle_within_half_cycle() {
        let mut spiral = spiral(8, 10);
        let step = spiral.virtual_cycle() as f64 * spiral.angular_spacing();
        for pointer in [-2_000.0, -361.0, -1.0, 0.0, 10.0, 359.0, 720.0, 4_321.5] {
            spiral.set_pointer_angle(pointer);
            for d in 0..10 {
                let angle = spiral.shortest_unbound_angle_for_data_index(d);
                assert!(
                    (angle - pointer).abs() <= step * 0.5 + 1e-9,
                    "pointer={pointer} d={d} angle={angle}"
                );
                // The target really does show `d`.
                spiral.set_pointer_angle(angle);
                let focused = spiral.find_focused_global_index();
                assert_eq!(spiral.global_index_to_data_index(focused), Some(d));
                spiral.set_pointer_angle(pointer);
            }
        }
    }

    #[test]
    fn shortest_angle_prefers_lower_on_tie() {
        let mut spiral = spiral(4, 4);
        // Cycle step is one full turn; 180 is equidistant from 0 and 360.
        spiral.set_pointer_angle(180.0);
        assert_eq!(spiral.shortest_unbound_angle_for_data_index(0), 0.0);
    }

    #[test]
    fn distance_factor_maps_turns() {
        let mut spiral = spiral(8, 10);
        spiral.set_pointer_angle(720.0);
        assert_eq!(spiral.distance_factor(16), 0.5);
        // Two turns behind the pointer saturates outward.
        assert_eq!(spiral.distance_factor(0), 1.0);
        // One turn ahead is halfway between pointer and inward saturation.
        assert_eq!(spiral.distance_factor(24), 0.25);
        assert_eq!(spiral.distance_factor(1_000), 0.0);

        assert_eq!(spiral.radius_for_global_index(16), 400.0);
        assert_eq!(spiral.radius_for_global_index(0), spiral.max_radius());
        assert_eq!(spiral.radius_for_global_index(1_000), spiral.min_radius());
        assert_eq!(spiral.entry_depth(16), 1.0);
    }

    #[test]
    fn bad_threshold_is_reported() {
        let mut spiral = spiral(8, 10);
        spiral.set_spiral_config(SpiralConfig::default().with_turn_threshold(0.0));
        assert_eq!(spiral.validate(), [ConfigError::NonPositiveTurnThreshold]);
        assert_eq!(spiral.distance_factor(3), 0.5);
    }

    #[test]
    fn radii_and_entry_size() {
        let spiral = spiral(8, 10);
        assert_eq!(spiral.min_radius(), 0.0);
        assert_eq!(spiral.max_radius(), 800.0);
        assert_eq!(spiral.entry_size(0), Size::new(1_600.0, 1_600.0));
    }

    #[test]
    fn extreme_pointer_angles_keep_a_valid_window() {
        let mut spiral = spiral(8, 10);

        spiral.set_pointer_angle(-1.0e300);
        let window = spiral.visible_window().unwrap();
        assert_eq!(window.start, GlobalIndex::MIN);
        let desired = spiral.compute_desired_global_indices();
        assert_eq!(desired.first(), Some(&GlobalIndex::MIN));
        assert!(desired.contains(&window.end), "window end is desired");
        assert!(desired.windows(2).all(|w| w[1] == w[0] + 1), "contiguous");

        spiral.set_pointer_angle(1.0e300);
        let window = spiral.visible_window().unwrap();
        assert_eq!(window.end, GlobalIndex::MAX);
        assert!(spiral.should_be_visible(GlobalIndex::MAX));
        let desired = spiral.compute_desired_global_indices();
        assert_eq!(desired.last(), Some(&GlobalIndex::MAX));
        assert!(desired.contains(&window.start), "window start is desired");
    }

    #[test]
    fn sample_path_covers_span() {
        let spiral = spiral(8, 10);
        let points = spiral.sample_path(2, 4);
        // Four wedges of four steps each, plus the closing point.
        assert_eq!(points.len(), 17);
        assert!(spiral.sample_path(0, 0).len() == 1);
    }
}
