// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Structural misconfiguration reported by [`LayoutStrategy::validate`](crate::LayoutStrategy::validate).
///
/// These are never fatal. Strategies keep working with clamped values; the
/// host is expected to surface the messages to whoever owns the configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// `segment_count` is zero.
    ZeroSegmentCount,
    /// `max_visible_entries` is zero.
    ZeroMaxVisibleEntries,
    /// The spiral turn threshold is zero, negative, or not finite.
    NonPositiveTurnThreshold,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::ZeroSegmentCount => "radial segment count must be greater than 0",
            Self::ZeroMaxVisibleEntries => "max visible entries must be greater than 0",
            Self::NonPositiveTurnThreshold => "distance factor turn threshold must be greater than 0",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for ConfigError {}
