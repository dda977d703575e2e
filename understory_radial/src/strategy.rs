// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout strategy contract.

use alloc::vec::Vec;

use kurbo::{Size, Vec2};
use smallvec::SmallVec;

use crate::ConfigError;
use crate::angle::ANGLE_EPSILON;

/// Position in the virtual, possibly unbounded, sequence of layout slots.
///
/// Global indices may be negative or exceed the item count; use
/// [`LayoutStrategy::global_index_to_data_index`] to find which item, if any,
/// a slot shows.
pub type GlobalIndex = isize;

/// Ascending, duplicate-free set of global indices returned by
/// [`LayoutStrategy::compute_desired_global_indices`].
pub type DesiredIndices = SmallVec<[GlobalIndex; 32]>;

/// Inclusive range of global indices that are currently on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VisibleWindow {
    /// First visible global index.
    pub start: GlobalIndex,
    /// Last visible global index (inclusive).
    pub end: GlobalIndex,
}

impl VisibleWindow {
    /// Create a window covering `start..=end`.
    #[must_use]
    pub const fn new(start: GlobalIndex, end: GlobalIndex) -> Self {
        Self { start, end }
    }

    /// Whether `index` lies inside the window.
    #[must_use]
    pub const fn contains(&self, index: GlobalIndex) -> bool {
        self.start <= index && index <= self.end
    }

    /// Number of indices covered by the window.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            self.end.abs_diff(self.start) + 1
        }
    }

    /// Whether the window covers no indices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Polymorphic surface every layout implements.
///
/// A strategy owns no widgets and no items. It is pure computation over the
/// item count it was last [initialized](Self::initialize) with and the current
/// pointer angle. Hosts re-initialize it whenever the item count changes.
///
/// The trait is object safe, so hosts may hold `Box<dyn LayoutStrategy>` or
/// use [`RadialLayout`](crate::RadialLayout) for enum dispatch.
pub trait LayoutStrategy {
    /// Recompute gap padding and angular spacing for `item_count` items.
    fn initialize(&mut self, item_count: usize);

    /// Report structural misconfiguration. An empty list means the
    /// configuration is sound.
    fn validate(&self) -> Vec<ConfigError>;

    /// Every global index that should own an entry this frame, visible or not.
    fn compute_desired_global_indices(&self) -> DesiredIndices;

    /// Data index shown by `index`, or `None` for gap slots and out-of-range indices.
    fn global_index_to_data_index(&self, index: GlobalIndex) -> Option<usize>;

    /// Whether `index` is inside the visible window.
    fn should_be_visible(&self, index: GlobalIndex) -> bool {
        self.visible_window().is_some_and(|w| w.contains(index))
    }

    /// Offset of the entry for `index` from the layout center.
    fn item_position(&self, index: GlobalIndex) -> Vec2;

    /// Size of the entry widget for `index`.
    fn entry_size(&self, index: GlobalIndex) -> Size;

    /// Stacking hint for the entry at `index`. Higher is drawn on top.
    fn entry_depth(&self, index: GlobalIndex) -> f64 {
        let _ = index;
        0.0
    }

    /// Global index the pointer currently points at.
    fn find_focused_global_index(&self) -> GlobalIndex;

    /// The angle nearest the current pointer angle that shows data index `data_index`.
    ///
    /// The result may be many turns away from zero; it is intended as an
    /// animation target that never rotates further than necessary.
    fn shortest_unbound_angle_for_data_index(&self, data_index: usize) -> f64;

    /// Map an arbitrary angle into the range this strategy works in.
    fn sanitize_angle(&self, degrees: f64) -> f64;

    /// Current pointer angle, as last set.
    fn pointer_angle(&self) -> f64;

    /// Store a new pointer angle. The value is kept as given; calculations
    /// sanitize it as needed.
    fn set_pointer_angle(&mut self, degrees: f64);

    /// Item count the strategy was last initialized with.
    fn item_count(&self) -> usize;

    /// Number of wedges per turn in effect after initialization.
    fn segment_count(&self) -> usize;

    /// Degrees covered by one wedge. Zero when there are no segments.
    fn angular_spacing(&self) -> f64;

    /// Empty slots appended after the last item before the sequence repeats.
    fn gap_segments(&self) -> usize;

    /// Period of the global-to-data mapping: items plus gap padding.
    fn virtual_cycle(&self) -> usize {
        self.item_count() + self.gap_segments()
    }

    /// Angle at which `index` is centered.
    fn item_angle_degrees(&self, index: GlobalIndex) -> f64 {
        index as f64 * self.angular_spacing()
    }

    /// Normalized `[0, 1]` closeness of `index` to the pointer's turn.
    fn distance_factor(&self, index: GlobalIndex) -> f64;

    /// Distance from the center at which `index` is placed.
    fn radius_for_global_index(&self, index: GlobalIndex) -> f64;

    /// Smallest radius any entry can be placed at.
    fn min_radius(&self) -> f64;

    /// Largest radius any entry can be placed at.
    fn max_radius(&self) -> f64;

    /// The inclusive visible range, if any index is visible.
    fn visible_window(&self) -> Option<VisibleWindow>;

    /// Snapshot of the strategy's current state for overlays and logging.
    fn debug_info(&self) -> RadialDebugInfo {
        let spacing = self.angular_spacing();
        RadialDebugInfo {
            pointer_angle: self.pointer_angle(),
            sanitized_pointer_angle: self.sanitize_angle(self.pointer_angle()),
            angular_spacing: spacing,
            segment_count: self.segment_count(),
            item_count: self.item_count(),
            gap_segments: self.gap_segments(),
            virtual_cycle: self.virtual_cycle(),
            visible_window: self.visible_window(),
            focused_global_index: if spacing.abs() < ANGLE_EPSILON {
                None
            } else {
                Some(self.find_focused_global_index())
            },
            min_radius: self.min_radius(),
            max_radius: self.max_radius(),
        }
    }
}

/// Debug snapshot returned by [`LayoutStrategy::debug_info`].
#[derive(Clone, Debug, PartialEq)]
pub struct RadialDebugInfo {
    /// Pointer angle as stored.
    pub pointer_angle: f64,
    /// Pointer angle after [`LayoutStrategy::sanitize_angle`].
    pub sanitized_pointer_angle: f64,
    /// Degrees per wedge.
    pub angular_spacing: f64,
    /// Wedges per turn.
    pub segment_count: usize,
    /// Items the strategy was initialized with.
    pub item_count: usize,
    /// Gap padding after the last item.
    pub gap_segments: usize,
    /// Items plus gap padding.
    pub virtual_cycle: usize,
    /// Visible global index range.
    pub visible_window: Option<VisibleWindow>,
    /// Focused global index, `None` when the spacing is degenerate.
    pub focused_global_index: Option<GlobalIndex>,
    /// Innermost entry radius.
    pub min_radius: f64,
    /// Outermost entry radius.
    pub max_radius: f64,
}
