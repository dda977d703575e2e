// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-entry wedge geometry for shading radial entries.
//!
//! Entries are sized by [`LayoutStrategy::entry_size`] and centered on
//! [`LayoutStrategy::item_position`]. A wedge shader drawn inside such an
//! entry needs the wedge's angular extent plus the location of the layout
//! center in the entry's own unit square; [`Wedge::for_global_index`]
//! computes both.

use kurbo::Point;

use crate::angle::normalize_degrees;
use crate::{GlobalIndex, LayoutStrategy};

/// Default angular gap between neighboring wedges, in degrees.
pub const DEFAULT_WEDGE_GAP_DEGREES: f64 = 1.0;

/// Normalized wedge description for one entry.
///
/// Angles are fractions of a full turn; radii are fractions of the entry's
/// smaller side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Wedge {
    /// Start of the wedge, in `[0, 1)` turns, after half the gap.
    pub angle_offset: f64,
    /// Angular width of the wedge, in turns, excluding the gap.
    pub width: f64,
    /// Innermost radius of the layout relative to the entry size.
    pub min_radius: f64,
    /// Outermost radius of the layout relative to the entry size.
    pub max_radius: f64,
    /// The strategy's distance factor for this entry.
    pub distance_factor: f64,
    /// Layout center in the entry's unit square, `(0.5, 0.5)` being the entry center.
    pub center_uv: Point,
}

impl Wedge {
    /// Compute the wedge for `index` with `gap_degrees` left empty between
    /// neighbors.
    #[must_use]
    pub fn for_global_index<S>(strategy: &S, index: GlobalIndex, gap_degrees: f64) -> Self
    where
        S: LayoutStrategy + ?Sized,
    {
        let spacing = strategy.angular_spacing();
        let start = normalize_degrees(strategy.item_angle_degrees(index) - spacing * 0.5);
        let gap = gap_degrees.clamp(0.0, spacing.max(0.0));

        let size = strategy.entry_size(index);
        let position = strategy.item_position(index);
        let center_uv = if size.width > f64::EPSILON && size.height > f64::EPSILON {
            Point::new(
                0.5 - position.x / size.width,
                0.5 - position.y / size.height,
            )
        } else {
            Point::new(0.5, 0.5)
        };

        let mut extent = size.min_side();
        if extent < f64::EPSILON {
            extent = 1.0;
        }

        Self {
            angle_offset: (start + gap * 0.5) / 360.0,
            width: (spacing - gap) / 360.0,
            min_radius: strategy.min_radius() / extent,
            max_radius: strategy.max_radius() / extent,
            distance_factor: strategy.distance_factor(index),
            center_uv,
        }
    }
}
