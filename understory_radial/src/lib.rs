// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_radial --heading-base-level=0

//! Understory Radial: wheel and spiral layout strategies.
//!
//! This crate maps an arbitrarily large collection of items onto entries
//! arranged around a circle. It is pure computation over counts and angles:
//! it owns no widgets and no items, and never allocates per entry.
//!
//! Two index spaces are involved:
//! - A **global index** ([`GlobalIndex`]) identifies a slot in the virtual,
//!   possibly unbounded, sequence of wedges. Global index `g` is centered at
//!   `g * spacing` degrees.
//! - A **data index** (`usize`) identifies an item. Many global indices may
//!   show the same data index, and gap slots show none (`None`).
//!
//! Two strategies implement [`LayoutStrategy`]:
//! - [`WheelLayout`]: a bounded ring. Every wedge is always present and
//!   visible; the pointer angle is taken modulo one turn.
//! - [`SpiralLayout`]: an endless spiral. The pointer angle accumulates over
//!   turns, and a fixed-size window of entries slides along with the focused
//!   index. Data repeats every virtual cycle (items plus gap padding).
//!
//! [`RadialLayout`] wraps both for hosts that want a single concrete type.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_radial::{LayoutStrategy, RadialConfig, SpiralConfig, SpiralLayout};
//!
//! let mut spiral = SpiralLayout::new(
//!     RadialConfig::default().with_segment_count(8).with_max_visible_entries(6),
//!     SpiralConfig::default(),
//! );
//! spiral.initialize(10);
//! assert!(spiral.validate().is_empty());
//!
//! // Rotate one and a half turns.
//! spiral.set_pointer_angle(540.0);
//! let focused = spiral.find_focused_global_index();
//! assert_eq!(focused, 12);
//! assert_eq!(spiral.global_index_to_data_index(focused), None); // a gap wedge
//!
//! // Every desired index gets an entry; only the inner window is visible.
//! let desired = spiral.compute_desired_global_indices();
//! let visible = desired.iter().filter(|&&g| spiral.should_be_visible(g)).count();
//! assert_eq!(visible, 6);
//!
//! // Scroll target for item 3 that rotates the least.
//! let target = spiral.shortest_unbound_angle_for_data_index(3);
//! assert_eq!(target, 855.0);
//! ```
//!
//! ## Angles
//!
//! Angles are degrees from the positive x axis toward the positive y axis.
//! [`normalize_degrees`], [`unwind_degrees`] and [`shortest_delta_degrees`]
//! are exposed for hosts that turn pointer input into angles.
//!
//! ## Configuration and validation
//!
//! [`RadialConfig`] and [`SpiralConfig`] hold the settings as configured.
//! Strategies clamp them when initialized and report misconfiguration through
//! [`LayoutStrategy::validate`] as a list of [`ConfigError`]s, which are never
//! fatal. With the `serde` feature, both configuration types can be
//! (de)serialized.
//!
//! This crate is `no_std` and uses `alloc`. Enable `libm` when building
//! without `std`.

#![no_std]

extern crate alloc;

mod angle;
mod config;
mod error;
mod layout;
mod radial;
mod spiral;
mod strategy;
mod wedge;
mod wheel;

pub use angle::{
    ANGLE_EPSILON, direction_degrees, lerp, normalize_degrees, polar_offset,
    shortest_delta_degrees, unwind_degrees,
};
pub use config::{MAX_DEACTIVATED_ENTRIES, MAX_ENTRY_COUNT, RadialConfig, SpiralConfig};
pub use error::ConfigError;
pub use layout::{RadialLayout, RadialMode};
pub use spiral::SpiralLayout;
pub use strategy::{DesiredIndices, GlobalIndex, LayoutStrategy, RadialDebugInfo, VisibleWindow};
pub use wedge::{DEFAULT_WEDGE_GAP_DEGREES, Wedge};
pub use wheel::WheelLayout;
