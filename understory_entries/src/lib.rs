// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_entries --heading-base-level=0

//! Understory Entries: pooled, virtualized entry widgets for radial layouts.
//!
//! A layout strategy from [`understory_radial`] decides which global indices
//! should exist and where they go. This crate turns that decision into widget
//! instances, frame after frame, without churning through allocations:
//!
//! - [`EntryPool`] owns every widget, grouped by class, and hands out
//!   generational [`EntryHandle`]s.
//! - [`ClassResolver`] picks a widget class for each item: the item's own
//!   hint, then a symbolic tag looked up in a [`ClassRegistry`], then a default.
//! - [`EntryManager`] keeps one [`EntrySlot`] per allocated global index and
//!   reconciles them against the strategy's desired set: release first, then
//!   acquire, retag, place and assign.
//! - [`StrategyHost`] owns the items, the unbounded pointer angle, focus and
//!   selection, and runs the frame loop in [`StrategyHost::tick`].
//!
//! Entries carry [`EntryTags`]: exactly one lifecycle tag (`POOLED`,
//! `DEACTIVATED` or `ACTIVE`) plus any interaction tags (`FOCUSED`,
//! `SELECTED`). Widgets that implement [`StrategyEntry`] and expose it through
//! [`EntryWidget::strategy_entry`] are told about every change.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_entries::{
//!     ClassResolver, EntryTags, EntryWidget, HostConfig, HostEvent, StrategyEntry, StrategyHost,
//! };
//! use understory_radial::{RadialConfig, WheelLayout};
//!
//! #[derive(Default)]
//! struct Label {
//!     text: Option<String>,
//!     tags: EntryTags,
//! }
//!
//! impl StrategyEntry<String> for Label {
//!     fn on_item_assigned(&mut self, _data_index: Option<usize>, item: Option<&String>) {
//!         self.text = item.cloned();
//!     }
//!
//!     fn on_tags_changed(&mut self, _old: EntryTags, new: EntryTags) {
//!         self.tags = new;
//!     }
//! }
//!
//! impl EntryWidget<String> for Label {
//!     fn strategy_entry(&mut self) -> Option<&mut dyn StrategyEntry<String>> {
//!         Some(self)
//!     }
//! }
//!
//! let mut host: StrategyHost<String, &'static str, Label, WheelLayout> = StrategyHost::new(
//!     |_class: &&'static str| Some(Label::default()),
//!     ClassResolver::with_default("label"),
//!     HostConfig::default(),
//! );
//! assert!(host.set_strategy(WheelLayout::new(RadialConfig::default())).is_empty());
//!
//! // Three items on an eight-wedge wheel: five wedges are gaps.
//! let stats = host.set_items(vec!["a".into(), "b".into(), "c".into()])?;
//! assert_eq!(stats.acquired, 8);
//!
//! host.add_rotation(50.0);
//! let stats = host.tick(1.0 / 60.0)?;
//! assert!(stats.is_steady());
//! assert_eq!(host.focused_data_index(), Some(1));
//!
//! let label = host.widget(1).unwrap();
//! assert_eq!(label.text.as_deref(), Some("b"));
//! assert!(label.tags.contains(EntryTags::ACTIVE | EntryTags::FOCUSED));
//!
//! let events: Vec<_> = host.drain_events().collect();
//! assert!(events.contains(&HostEvent::ItemFocused { data_index: Some(1) }));
//! # Ok::<(), understory_entries::HostError>(())
//! ```
//!
//! ## Failure handling
//!
//! Nothing here panics on bad input. Operations that need a strategy return
//! [`HostError::MissingStrategy`] and log. A desired index whose widget
//! cannot be created is skipped for the frame, counted in
//! [`ReconcileStats::failed`], and retried on the next reconciliation.
//! Diagnostics go through the `log` facade.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod entry;
mod error;
mod host;
mod manager;
mod pool;
mod resolve;
mod scroll;
mod tags;

pub use entry::{EntryWidget, StrategyEntry};
pub use error::HostError;
pub use host::{HostConfig, HostEvent, SelectionMode, StrategyHost};
pub use manager::{EntryContext, EntryManager, EntrySlot, ReconcileStats};
pub use pool::{EntryFactory, EntryHandle, EntryPool};
pub use resolve::{ClassRegistry, ClassResolver, EntryClassHint};
pub use scroll::ScrollAnimation;
pub use tags::{EntryTags, Interaction, Lifecycle};
