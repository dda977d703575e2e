// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts between the entry manager and the widgets it pools.

use crate::EntryTags;

/// Callbacks delivered to entry widgets that opt in.
///
/// Every method has an empty default, so implementors only override what they
/// care about. Callbacks only fire on change: a repeated assignment of the same
/// data index, or an update that leaves the tags as they were, is silent.
///
/// Within one reconciliation pass a newly acquired entry sees, in order:
/// `on_tags_changed` into `POOLED`, interaction callbacks for an already focused
/// or selected item, `on_tags_changed` into `ACTIVE` or `DEACTIVATED`, and then
/// `on_item_assigned` once its position has been updated.
pub trait StrategyEntry<T> {
    /// The entry now shows `item` at `data_index`. Both are `None` for gap slots.
    fn on_item_assigned(&mut self, data_index: Option<usize>, item: Option<&T>) {
        let _ = (data_index, item);
    }

    /// The entry's tag set changed from `old` to `new`.
    fn on_tags_changed(&mut self, old: EntryTags, new: EntryTags) {
        let _ = (old, new);
    }

    /// The entry gained or lost focus.
    fn on_focus_changed(&mut self, focused: bool) {
        let _ = focused;
    }

    /// The entry's item was selected or deselected.
    fn on_selection_changed(&mut self, selected: bool) {
        let _ = selected;
    }
}

/// A widget type the entry manager can pool.
///
/// The only requirement is a capability check: widgets that want callbacks
/// return themselves from [`strategy_entry`](Self::strategy_entry). Widgets
/// that don't are still pooled, positioned and tagged, but are never called.
///
/// ```
/// use understory_entries::{EntryTags, EntryWidget, StrategyEntry};
///
/// #[derive(Default)]
/// struct Label {
///     text: Option<String>,
///     visible: bool,
/// }
///
/// impl StrategyEntry<String> for Label {
///     fn on_item_assigned(&mut self, _data_index: Option<usize>, item: Option<&String>) {
///         self.text = item.cloned();
///     }
///
///     fn on_tags_changed(&mut self, _old: EntryTags, new: EntryTags) {
///         self.visible = new.contains(EntryTags::ACTIVE);
///     }
/// }
///
/// impl EntryWidget<String> for Label {
///     fn strategy_entry(&mut self) -> Option<&mut dyn StrategyEntry<String>> {
///         Some(self)
///     }
/// }
///
/// // A decoration with no interest in callbacks.
/// struct Spacer;
/// impl EntryWidget<String> for Spacer {}
/// ```
pub trait EntryWidget<T> {
    /// This widget's callback interface, if it has one.
    fn strategy_entry(&mut self) -> Option<&mut dyn StrategyEntry<T>> {
        None
    }
}
