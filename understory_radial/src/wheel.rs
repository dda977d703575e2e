// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded circular layout: one wedge per item plus trailing gap wedges.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use alloc::vec::Vec;

use kurbo::{Size, Vec2};

use crate::angle::{normalize_degrees, polar_offset, shortest_delta_degrees};
use crate::radial::RadialState;
use crate::{ConfigError, DesiredIndices, GlobalIndex, LayoutStrategy, RadialConfig, VisibleWindow};

/// A fixed ring of `segment_count` wedges.
///
/// Every wedge is always desired and always visible. When there are more
/// items than configured segments, the ring grows so that each item gets its
/// own wedge; otherwise the remaining wedges are gap slots that show no data.
///
/// The pointer angle is treated modulo one turn.
///
/// ```
/// use understory_radial::{LayoutStrategy, RadialConfig, WheelLayout};
///
/// let mut wheel = WheelLayout::new(RadialConfig::default().with_segment_count(8));
/// wheel.initialize(3);
/// assert_eq!(wheel.gap_segments(), 5);
///
/// wheel.set_pointer_angle(370.0);
/// assert_eq!(wheel.sanitize_angle(wheel.pointer_angle()), 10.0);
/// assert_eq!(wheel.find_focused_global_index(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct WheelLayout {
    state: RadialState,
}

impl WheelLayout {
    /// Create a wheel with the given configuration. Call
    /// [`initialize`](LayoutStrategy::initialize) before use.
    #[must_use]
    pub fn new(config: RadialConfig) -> Self {
        Self {
            state: RadialState::new(config),
        }
    }

    /// The configuration as given.
    #[must_use]
    pub fn config(&self) -> &RadialConfig {
        &self.state.config
    }

    /// Replace the configuration. Takes effect on the next
    /// [`initialize`](LayoutStrategy::initialize).
    pub fn set_config(&mut self, config: RadialConfig) {
        self.state.config = config;
    }

    /// Width of the visible window after clamping to the segment count.
    #[must_use]
    pub fn max_visible_entries(&self) -> usize {
        self.state.max_visible_entries
    }
}

impl Default for WheelLayout {
    fn default() -> Self {
        Self::new(RadialConfig::default())
    }
}

impl LayoutStrategy for WheelLayout {
    fn initialize(&mut self, item_count: usize) {
        let state = &mut self.state;
        state.begin_initialize(item_count);

        let mut segments = state.config.segment_count;
        if item_count > segments {
            log::warn!(
                "wheel has {item_count} items but only {segments} segments; growing to {item_count}"
            );
            segments = item_count;
        }
        state.set_segment_count(segments);
        state.max_visible_entries = state.max_visible_entries.min(segments);
        state.gap_segments = segments - item_count;
    }

    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        self.state.validate_into(&mut errors);
        errors
    }

    fn compute_desired_global_indices(&self) -> DesiredIndices {
        let Some(window) = self.visible_window() else {
            return DesiredIndices::new();
        };
        (window.start..=window.end).collect()
    }

    fn global_index_to_data_index(&self, index: GlobalIndex) -> Option<usize> {
        let index = usize::try_from(index).ok()?;
        (index < self.state.item_count).then_some(index)
    }

    fn item_position(&self, index: GlobalIndex) -> Vec2 {
        let Some(window) = self.visible_window() else {
            return Vec2::ZERO;
        };
        let index = index.clamp(window.start, window.end);
        polar_offset(self.state.config.base_radius, self.item_angle_degrees(index))
    }

    fn entry_size(&self, _index: GlobalIndex) -> Size {
        let diameter = self.state.config.base_radius * 2.0;
        Size::new(diameter, diameter)
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "the quotient is floored and bounded by the segment count"
    )]
    fn find_focused_global_index(&self) -> GlobalIndex {
        if !self.state.has_spacing() {
            return 0;
        }
        let spacing = self.state.angular_spacing;
        let wrapped = normalize_degrees(self.state.pointer_angle);
        // Shift by half a wedge so focus changes at wedge edges, not centers.
        let shifted = normalize_degrees(wrapped + spacing * 0.5);
        (shifted / spacing).floor() as GlobalIndex
    }

    fn shortest_unbound_angle_for_data_index(&self, data_index: usize) -> f64 {
        let target = data_index as f64 * self.state.angular_spacing;
        let pointer = self.state.pointer_angle;
        pointer + shortest_delta_degrees(pointer, target)
    }

    fn sanitize_angle(&self, degrees: f64) -> f64 {
        normalize_degrees(degrees)
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

    fn distance_factor(&self, _index: GlobalIndex) -> f64 {
        0.5
    }

    fn radius_for_global_index(&self, _index: GlobalIndex) -> f64 {
        self.state.config.base_radius
    }

    fn min_radius(&self) -> f64 {
        self.state.config.base_radius
    }

    fn max_radius(&self) -> f64 {
        self.state.config.base_radius
    }

    fn visible_window(&self) -> Option<VisibleWindow> {
        let last = GlobalIndex::try_from(self.state.segment_count).ok()?.checked_sub(1)?;
        (last >= 0).then_some(VisibleWindow::new(0, last))
    }
}
