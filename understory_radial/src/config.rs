// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration shared by the radial strategies.

/// Upper bound on the number of visible entries a strategy will ever request.
pub const MAX_ENTRY_COUNT: usize = 64;

/// Upper bound on the deactivated padding kept on each side of the visible window.
pub const MAX_DEACTIVATED_ENTRIES: usize = 10;

/// Settings common to wheel and spiral layouts.
///
/// Values are kept exactly as configured so that
/// [`validate`](crate::LayoutStrategy::validate) can report them. Strategies
/// clamp into usable ranges when they are initialized.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadialConfig {
    /// Distance from the center to the entry ring, in view units.
    pub base_radius: f64,
    /// Number of wedges in one full turn.
    pub segment_count: usize,
    /// Width of the visible window, in entries.
    pub max_visible_entries: usize,
    /// Hidden entries kept allocated on each side of the visible window.
    pub deactivated_entries: usize,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            base_radius: 400.0,
            segment_count: 8,
            max_visible_entries: 8,
            deactivated_entries: 2,
        }
    }
}

impl RadialConfig {
    /// Set the base radius.
    #[must_use]
    pub fn with_base_radius(mut self, base_radius: f64) -> Self {
        self.base_radius = base_radius;
        self
    }

    /// Set the number of wedges per turn.
    #[must_use]
    pub fn with_segment_count(mut self, segment_count: usize) -> Self {
        self.segment_count = segment_count;
        self
    }

    /// Set the width of the visible window.
    #[must_use]
    pub fn with_max_visible_entries(mut self, max_visible_entries: usize) -> Self {
        self.max_visible_entries = max_visible_entries;
        self
    }

    /// Set the hidden padding kept on each side of the visible window.
    #[must_use]
    pub fn with_deactivated_entries(mut self, deactivated_entries: usize) -> Self {
        self.deactivated_entries = deactivated_entries;
        self
    }

    pub(crate) fn clamped_max_visible_entries(&self) -> usize {
        self.max_visible_entries.clamp(1, MAX_ENTRY_COUNT)
    }

    pub(crate) fn clamped_deactivated_entries(&self) -> usize {
        self.deactivated_entries.min(MAX_DEACTIVATED_ENTRIES)
    }
}

/// Spiral-only settings controlling how entries drift in and out as they
/// move away from the pointer's turn.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpiralConfig {
    /// Radial offset applied at distance factor `1` (entries the pointer has passed).
    pub outward_offset: f64,
    /// Radial offset applied at distance factor `0` (entries still ahead of the pointer).
    pub inward_offset: f64,
    /// Number of turns between the pointer and an entry at which the
    /// distance factor saturates.
    pub turn_threshold: f64,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            outward_offset: 400.0,
            inward_offset: -400.0,
            turn_threshold: 2.0,
        }
    }
}

impl SpiralConfig {
    /// Set the outward offset.
    #[must_use]
    pub fn with_outward_offset(mut self, outward_offset: f64) -> Self {
        self.outward_offset = outward_offset;
        self
    }

    /// Set the inward offset.
    #[must_use]
    pub fn with_inward_offset(mut self, inward_offset: f64) -> Self {
        self.inward_offset = inward_offset;
        self
    }

    /// Set the saturation threshold, in turns.
    #[must_use]
    pub fn with_turn_threshold(mut self, turn_threshold: f64) -> Self {
        self.turn_threshold = turn_threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamping_keeps_configured_values() {
        let config = RadialConfig::default()
            .with_max_visible_entries(0)
            .with_deactivated_entries(50);
        assert_eq!(config.max_visible_entries, 0);
        assert_eq!(config.clamped_max_visible_entries(), 1);
        assert_eq!(config.clamped_deactivated_entries(), MAX_DEACTIVATED_ENTRIES);

        let wide = RadialConfig::default().with_max_visible_entries(1_000);
        assert_eq!(wide.clamped_max_visible_entries(), MAX_ENTRY_COUNT);
    }
}
