// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Size, Vec2};

use crate::{
    ConfigError, DesiredIndices, GlobalIndex, LayoutStrategy, RadialConfig, RadialDebugInfo,
    SpiralConfig, SpiralLayout, VisibleWindow, WheelLayout,
};

/// Which radial layout a [`RadialLayout`] uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RadialMode {
    /// Bounded ring, see [`WheelLayout`].
    #[default]
    Wheel,
    /// Endless spiral, see [`SpiralLayout`].
    Spiral,
}

/// Either radial layout behind one concrete type.
///
/// Hosts that switch layouts at runtime can hold a `RadialLayout` instead of a
/// boxed trait object.
#[derive(Clone, Debug)]
pub enum RadialLayout {
    /// A bounded ring.
    Wheel(WheelLayout),
    /// An endless spiral.
    Spiral(SpiralLayout),
}

impl RadialLayout {
    /// Build the layout for `mode`. `spiral` is ignored for wheels.
    #[must_use]
    pub fn new(mode: RadialMode, config: RadialConfig, spiral: SpiralConfig) -> Self {
        match mode {
            RadialMode::Wheel => Self::Wheel(WheelLayout::new(config)),
            RadialMode::Spiral => Self::Spiral(SpiralLayout::new(config, spiral)),
        }
    }

    /// The active mode.
    #[must_use]
    pub fn mode(&self) -> RadialMode {
        match self {
            Self::Wheel(_) => RadialMode::Wheel,
            Self::Spiral(_) => RadialMode::Spiral,
        }
    }

    fn inner(&self) -> &dyn LayoutStrategy {
        match self {
            Self::Wheel(wheel) => wheel,
            Self::Spiral(spiral) => spiral,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn LayoutStrategy {
        match self {
            Self::Wheel(wheel) => wheel,
            Self::Spiral(spiral) => spiral,
        }
    }
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self::Wheel(WheelLayout::default())
    }
}

impl From<WheelLayout> for RadialLayout {
    fn from(wheel: WheelLayout) -> Self {
        Self::Wheel(wheel)
    }
}

impl From<SpiralLayout> for RadialLayout {
    fn from(spiral: SpiralLayout) -> Self {
        Self::Spiral(spiral)
    }
}

impl LayoutStrategy for RadialLayout {
    fn initialize(&mut self, item_count: usize) {
        self.inner_mut().initialize(item_count);
    }

    fn validate(&self) -> Vec<ConfigError> {
        self.inner().validate()
    }

    fn compute_desired_global_indices(&self) -> DesiredIndices {
        self.inner().compute_desired_global_indices()
    }

    fn global_index_to_data_index(&self, index: GlobalIndex) -> Option<usize> {
        self.inner().global_index_to_data_index(index)
    }

    fn should_be_visible(&self, index: GlobalIndex) -> bool {
        self.inner().should_be_visible(index)
    }

    fn item_position(&self, index: GlobalIndex) -> Vec2 {
        self.inner().item_position(index)
    }

    fn entry_size(&self, index: GlobalIndex) -> Size {
        self.inner().entry_size(index)
    }

    fn entry_depth(&self, index: GlobalIndex) -> f64 {
        self.inner().entry_depth(index)
    }

    fn find_focused_global_index(&self) -> GlobalIndex {
        self.inner().find_focused_global_index()
    }

    fn shortest_unbound_angle_for_data_index(&self, data_index: usize) -> f64 {
        self.inner().shortest_unbound_angle_for_data_index(data_index)
    }

    fn sanitize_angle(&self, degrees: f64) -> f64 {
        self.inner().sanitize_angle(degrees)
    }

    fn pointer_angle(&self) -> f64 {
        self.inner().pointer_angle()
    }

    fn set_pointer_angle(&mut self, degrees: f64) {
        self.inner_mut().set_pointer_angle(degrees);
    }

    fn item_count(&self) -> usize {
        self.inner().item_count()
    }

    fn segment_count(&self) -> usize {
        self.inner().segment_count()
    }

    fn angular_spacing(&self) -> f64 {
        self.inner().angular_spacing()
    }

    fn gap_segments(&self) -> usize {
        self.inner().gap_segments()
    }

    fn virtual_cycle(&self) -> usize {
        self.inner().virtual_cycle()
    }

    fn item_angle_degrees(&self, index: GlobalIndex) -> f64 {
        self.inner().item_angle_degrees(index)
    }

    fn distance_factor(&self, index: GlobalIndex) -> f64 {
        self.inner().distance_factor(index)
    }

    fn radius_for_global_index(&self, index: GlobalIndex) -> f64 {
        self.inner().radius_for_global_index(index)
    }

    fn min_radius(&self) -> f64 {
        self.inner().min_radius()
    }

    fn max_radius(&self) -> f64 {
        self.inner().max_radius()
    }

    fn visible_window(&self) -> Option<VisibleWindow> {
        self.inner().visible_window()
    }

    fn debug_info(&self) -> RadialDebugInfo {
        self.inner().debug_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_to_variant() {
        let config = RadialConfig::default().with_segment_count(8);
        let mut wheel = RadialLayout::new(RadialMode::Wheel, config, SpiralConfig::default());
        let mut spiral = RadialLayout::new(RadialMode::Spiral, config, SpiralConfig::default());
        wheel.initialize(10);
        spiral.initialize(10);

        assert_eq!(wheel.mode(), RadialMode::Wheel);
        assert_eq!(spiral.mode(), RadialMode::Spiral);

        // Wheels grow to fit, spirals pad to the next multiple.
        assert_eq!(wheel.segment_count(), 10);
        assert_eq!(spiral.segment_count(), 8);
        assert_eq!(spiral.gap_segments(), 6);

        spiral.set_pointer_angle(-400.0);
        assert_eq!(spiral.sanitize_angle(spiral.pointer_angle()), -400.0);
        wheel.set_pointer_angle(-400.0);
        assert_eq!(wheel.sanitize_angle(wheel.pointer_angle()), 320.0);
    }

    #[test]
    fn debug_info_reflects_state() {
        let mut layout: RadialLayout = SpiralLayout::default().into();
        layout.initialize(10);
        layout.set_pointer_angle(90.0);
        let info = layout.debug_info();
        assert_eq!(info.focused_global_index, Some(2));
        assert_eq!(info.virtual_cycle, 16);
        assert_eq!(info.visible_window, Some(VisibleWindow::new(-2, 5)));
        assert_eq!(info.min_radius, 0.0);
        assert_eq!(info.max_radius, 800.0);
    }
}
