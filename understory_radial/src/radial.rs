// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State shared by the wheel and spiral strategies.

use alloc::vec::Vec;

use crate::angle::ANGLE_EPSILON;
use crate::{ConfigError, RadialConfig};

/// Counts, spacing and pointer angle common to every radial layout.
#[derive(Clone, Debug)]
pub(crate) struct RadialState {
    pub(crate) config: RadialConfig,
    pub(crate) item_count: usize,
    pub(crate) segment_count: usize,
    pub(crate) max_visible_entries: usize,
    pub(crate) deactivated_entries: usize,
    pub(crate) gap_segments: usize,
    pub(crate) angular_spacing: f64,
    pub(crate) pointer_angle: f64,
}

impl RadialState {
    pub(crate) fn new(config: RadialConfig) -> Self {
        let mut state = Self {
            config,
            item_count: 0,
            segment_count: 0,
            max_visible_entries: config.clamped_max_visible_entries(),
            deactivated_entries: config.clamped_deactivated_entries(),
            gap_segments: 0,
            angular_spacing: 0.0,
            pointer_angle: 0.0,
        };
        state.set_segment_count(config.segment_count);
        state
    }

    /// Reset the item count and the clamped entry counts from the configuration.
    pub(crate) fn begin_initialize(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.max_visible_entries = self.config.clamped_max_visible_entries();
        self.deactivated_entries = self.config.clamped_deactivated_entries();
    }

    pub(crate) fn set_segment_count(&mut self, segment_count: usize) {
        self.segment_count = segment_count;
        self.angular_spacing = if segment_count > 0 {
            360.0 / segment_count as f64
        } else {
            0.0
        };
    }

    pub(crate) fn has_spacing(&self) -> bool {
        self.angular_spacing.abs() >= ANGLE_EPSILON
    }

    pub(crate) fn validate_into(&self, errors: &mut Vec<ConfigError>) {
        if self.config.segment_count == 0 {
            errors.push(ConfigError::ZeroSegmentCount);
        }
        if self.config.max_visible_entries == 0 {
            errors.push(ConfigError::ZeroMaxVisibleEntries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_follows_segment_count() {
        let mut state = RadialState::new(RadialConfig::default());
        assert_eq!(state.angular_spacing, 45.0);
        state.set_segment_count(0);
        assert_eq!(state.angular_spacing, 0.0);
        assert!(!state.has_spacing());
    }

    #[test]
    fn validate_reports_each_problem() {
        let state = RadialState::new(
            RadialConfig::default()
                .with_segment_count(0)
                .with_max_visible_entries(0),
        );
        let mut errors = Vec::new();
        state.validate_into(&mut errors);
        assert_eq!(
            errors,
            [ConfigError::ZeroSegmentCount, ConfigError::ZeroMaxVisibleEntries]
        );
    }
}
