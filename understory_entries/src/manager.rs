// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame entry reconciliation.
//!
//! The [`EntryManager`] keeps at most one entry per global index. Each frame it
//! compares the strategy's desired set against the slots it holds:
//! 1. Release every slot whose index is no longer desired. Its widget is
//!    retagged `POOLED` and returned to the pool before anything is acquired.
//! 2. For each desired index, reuse the existing slot or acquire a widget.
//! 3. Retag the slot `ACTIVE` or `DEACTIVATED` from the visible window.
//! 4. Update position, size and depth.
//! 5. Assign the item, if the slot's data index changed since the last assignment.
//!
//! A desired index whose widget cannot be acquired is skipped for the frame
//! and retried on the next pass.

use alloc::boxed::Box;
use core::fmt;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use kurbo::{Size, Vec2};
use smallvec::SmallVec;
use understory_radial::{DesiredIndices, GlobalIndex, LayoutStrategy};

use crate::{
    ClassResolver, EntryFactory, EntryHandle, EntryPool, EntryTags, EntryWidget, Interaction,
    Lifecycle, StrategyEntry,
};

/// Inputs shared by every entry operation in one pass.
#[derive(Debug)]
pub struct EntryContext<'a, T, S: ?Sized> {
    /// Strategy that maps global indices to data and geometry.
    pub strategy: &'a S,
    /// Items indexed by data index.
    pub items: &'a [T],
    /// Currently focused data index.
    pub focused_data_index: Option<usize>,
    /// Currently selected data indices.
    pub selected: &'a HashSet<usize>,
}

impl<T, S: ?Sized> Clone for EntryContext<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: ?Sized> Copy for EntryContext<'_, T, S> {}

impl<'a, T, S: LayoutStrategy + ?Sized> EntryContext<'a, T, S> {
    fn data_index(&self, index: GlobalIndex) -> Option<usize> {
        self.strategy
            .global_index_to_data_index(index)
            .filter(|&d| d < self.items.len())
    }

    fn item(&self, data_index: Option<usize>) -> Option<&'a T> {
        data_index.and_then(|d| self.items.get(d))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Assignment {
    Unassigned,
    Assigned(Option<usize>),
}

/// Bookkeeping for one allocated global index.
#[derive(Clone, Debug)]
pub struct EntrySlot<K> {
    handle: EntryHandle,
    class: K,
    tags: EntryTags,
    position: Vec2,
    size: Size,
    depth: f64,
    assignment: Assignment,
}

impl<K> EntrySlot<K> {
    fn new(handle: EntryHandle, class: K) -> Self {
        Self {
            handle,
            class,
            tags: EntryTags::empty(),
            position: Vec2::ZERO,
            size: Size::ZERO,
            depth: 0.0,
            assignment: Assignment::Unassigned,
        }
    }

    /// Pool handle of the slot's widget.
    #[must_use]
    pub fn handle(&self) -> EntryHandle {
        self.handle
    }

    /// Class the widget was resolved to.
    #[must_use]
    pub fn class(&self) -> &K {
        &self.class
    }

    /// Current tag set.
    #[must_use]
    pub fn tags(&self) -> EntryTags {
        self.tags
    }

    /// Offset of the entry's center from the layout center.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Size of the entry.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Stacking hint; higher is drawn on top.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Data index last assigned to the widget, `None` for gap slots and
    /// slots that have not been assigned yet.
    #[must_use]
    pub fn assigned_data_index(&self) -> Option<usize> {
        match self.assignment {
            Assignment::Assigned(data_index) => data_index,
            Assignment::Unassigned => None,
        }
    }
}

/// Counts from one [`EntryManager::reconcile`] pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Slots created this pass.
    pub acquired: usize,
    /// Slots carried over from the previous pass.
    pub reused: usize,
    /// Slots released this pass.
    pub released: usize,
    /// Desired indices left without an entry because acquisition failed.
    pub failed: usize,
}

impl ReconcileStats {
    /// Whether the pass neither acquired nor released anything.
    #[must_use]
    pub fn is_steady(&self) -> bool {
        self.acquired == 0 && self.released == 0 && self.failed == 0
    }
}

/// Owns the global-index → entry map and the widget pool behind it.
pub struct EntryManager<T, K, W> {
    pool: EntryPool<K, W>,
    factory: Box<dyn EntryFactory<K, W>>,
    resolver: ClassResolver<T, K>,
    slots: HashMap<GlobalIndex, EntrySlot<K>>,
    last_desired: DesiredIndices,
}

impl<T, K: fmt::Debug, W> fmt::Debug for EntryManager<T, K, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryManager")
            .field("pool", &self.pool)
            .field("resolver", &self.resolver)
            .field("slots", &self.slots.len())
            .field("last_desired", &self.last_desired)
            .finish_non_exhaustive()
    }
}

impl<T, K, W> EntryManager<T, K, W>
where
    K: Clone + Eq + Hash + fmt::Debug,
    W: EntryWidget<T>,
{
    /// Create a manager that builds widgets with `factory` and picks their
    /// classes with `resolver`.
    pub fn new(
        factory: impl EntryFactory<K, W> + 'static,
        resolver: ClassResolver<T, K>,
    ) -> Self {
        Self {
            pool: EntryPool::new(),
            factory: Box::new(factory),
            resolver,
            slots: HashMap::new(),
            last_desired: DesiredIndices::new(),
        }
    }

    /// The widget pool.
    #[must_use]
    pub fn pool(&self) -> &EntryPool<K, W> {
        &self.pool
    }

    /// The class resolver.
    #[must_use]
    pub fn resolver(&self) -> &ClassResolver<T, K> {
        &self.resolver
    }

    /// Mutable access to the class resolver. Changes apply to slots acquired afterwards.
    pub fn resolver_mut(&mut self) -> &mut ClassResolver<T, K> {
        &mut self.resolver
    }

    /// The slot for `index`, if allocated.
    #[must_use]
    pub fn slot(&self, index: GlobalIndex) -> Option<&EntrySlot<K>> {
        self.slots.get(&index)
    }

    /// All allocated slots, in no particular order.
    pub fn slots(&self) -> impl Iterator<Item = (GlobalIndex, &EntrySlot<K>)> + '_ {
        self.slots.iter().map(|(&g, slot)| (g, slot))
    }

    /// Number of allocated slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots are allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Desired set from the most recent reconciliation.
    #[must_use]
    pub fn last_desired(&self) -> &[GlobalIndex] {
        &self.last_desired
    }

    /// Widget for `index`, if allocated.
    #[must_use]
    pub fn widget(&self, index: GlobalIndex) -> Option<&W> {
        self.pool.get(self.slots.get(&index)?.handle)
    }

    /// Mutable widget for `index`, if allocated.
    pub fn widget_mut(&mut self, index: GlobalIndex) -> Option<&mut W> {
        let handle = self.slots.get(&index)?.handle;
        self.pool.get_mut(handle)
    }

    /// Run one reconciliation pass against `cx.strategy`'s desired set.
    pub fn reconcile<S>(&mut self, cx: EntryContext<'_, T, S>) -> ReconcileStats
    where
        S: LayoutStrategy + ?Sized,
    {
        let desired = cx.strategy.compute_desired_global_indices();
        let mut stats = ReconcileStats {
            released: self.release_undesired(&desired),
            ..ReconcileStats::default()
        };

        for &index in &desired {
            let existed = self.slots.contains_key(&index);
            if self.acquire(index, cx).is_none() {
                stats.failed += 1;
                continue;
            }
            if existed {
                stats.reused += 1;
            } else {
                stats.acquired += 1;
            }
            let lifecycle = Lifecycle::for_visibility(cx.strategy.should_be_visible(index));
            self.set_lifecycle(index, lifecycle);
            self.place(index, cx.strategy);
            self.assign(index, cx);
        }

        self.last_desired = desired;
        if !stats.is_steady() {
            log::debug!(
                "reconciled {} entries: {} acquired, {} released, {} failed",
                self.slots.len(),
                stats.acquired,
                stats.released,
                stats.failed
            );
        }
        stats
    }

    /// Return the entry for `index`, acquiring a widget when the index has none.
    ///
    /// A fresh entry is tagged `POOLED`, then picks up `SELECTED` and `FOCUSED`
    /// from the context. Returns `None` when no class resolves or the factory
    /// fails; no slot is created in that case.
    pub fn acquire<S>(
        &mut self,
        index: GlobalIndex,
        cx: EntryContext<'_, T, S>,
    ) -> Option<EntryHandle>
    where
        S: LayoutStrategy + ?Sized,
    {
        if let Some(slot) = self.slots.get(&index) {
            return Some(slot.handle);
        }

        let data_index = cx.data_index(index);
        let Some(class) = self.resolver.resolve(cx.item(data_index)) else {
            log::error!("no widget class resolved for global index {index}");
            return None;
        };
        let handle = self.pool.acquire(&class, &mut *self.factory)?;

        let mut slot = EntrySlot::new(handle, class);
        retag::<T, K, W>(&mut self.pool, &mut slot, EntryTags::POOLED);
        if let Some(d) = data_index {
            if cx.selected.contains(&d) {
                set_interaction::<T, K, W>(&mut self.pool, &mut slot, Interaction::Selected, true);
            }
            if cx.focused_data_index == Some(d) {
                set_interaction::<T, K, W>(&mut self.pool, &mut slot, Interaction::Focused, true);
            }
        }
        self.slots.insert(index, slot);
        Some(handle)
    }

    /// Release the entry for `index` back to the pool.
    ///
    /// The widget is retagged to exactly `POOLED` before it is returned, so it
    /// never carries interaction state into its next use.
    pub fn release(&mut self, index: GlobalIndex) -> bool {
        let Some(mut slot) = self.slots.remove(&index) else {
            return false;
        };
        retag::<T, K, W>(&mut self.pool, &mut slot, EntryTags::POOLED);
        if !self.pool.release(slot.handle) {
            log::warn!("entry for global index {index} was not checked out of the pool");
        }
        true
    }

    /// Release every entry whose index is not in `desired`, which must be sorted.
    ///
    /// Returns the number of entries released.
    pub fn release_undesired(&mut self, desired: &[GlobalIndex]) -> usize {
        let mut undesired: SmallVec<[GlobalIndex; 16]> = self
            .slots
            .keys()
            .copied()
            .filter(|g| desired.binary_search(g).is_err())
            .collect();
        undesired.sort_unstable();
        for &index in &undesired {
            self.release(index);
        }
        undesired.len()
    }

    /// Release every entry. Pooled widgets are kept for reuse.
    pub fn release_all(&mut self) -> usize {
        self.last_desired.clear();
        self.release_undesired(&[])
    }

    /// Release every entry and drop every pooled widget.
    pub fn clear(&mut self) {
        self.release_all();
        self.pool.clear();
    }

    /// Set or clear `interaction` on every entry that shows `data_index`.
    ///
    /// Returns the number of entries whose tags changed.
    pub fn set_interaction_for_data_index<S>(
        &mut self,
        strategy: &S,
        data_index: usize,
        interaction: Interaction,
        on: bool,
    ) -> usize
    where
        S: LayoutStrategy + ?Sized,
    {
        let mut changed = 0;
        for (&index, slot) in &mut self.slots {
            if strategy.global_index_to_data_index(index) == Some(data_index)
                && set_interaction::<T, K, W>(&mut self.pool, slot, interaction, on)
            {
                changed += 1;
            }
        }
        changed
    }

    fn set_lifecycle(&mut self, index: GlobalIndex, lifecycle: Lifecycle) {
        let Some(slot) = self.slots.get_mut(&index) else {
            return;
        };
        if slot.tags.contains(lifecycle.tag()) {
            return;
        }
        let tags = slot.tags.with_lifecycle(lifecycle);
        retag::<T, K, W>(&mut self.pool, slot, tags);
    }

    fn place<S>(&mut self, index: GlobalIndex, strategy: &S)
    where
        S: LayoutStrategy + ?Sized,
    {
        if let Some(slot) = self.slots.get_mut(&index) {
            slot.position = strategy.item_position(index);
            slot.size = strategy.entry_size(index);
            slot.depth = strategy.entry_depth(index);
        }
    }

    fn assign<S>(&mut self, index: GlobalIndex, cx: EntryContext<'_, T, S>)
    where
        S: LayoutStrategy + ?Sized,
    {
        let Some(slot) = self.slots.get_mut(&index) else {
            return;
        };
        let data_index = cx.data_index(index);
        let assignment = Assignment::Assigned(data_index);
        if slot.assignment == assignment {
            return;
        }
        slot.assignment = assignment;
        let item = cx.item(data_index);
        notify::<T, K, W>(&mut self.pool, slot.handle, |entry| {
            entry.on_item_assigned(data_index, item);
        });
    }
}

fn notify<T, K, W>(
    pool: &mut EntryPool<K, W>,
    handle: EntryHandle,
    f: impl FnOnce(&mut dyn StrategyEntry<T>),
) where
    K: Clone + Eq + Hash + fmt::Debug,
    W: EntryWidget<T>,
{
    if let Some(entry) = pool
        .get_mut(handle)
        .and_then(<W as EntryWidget<T>>::strategy_entry)
    {
        f(entry);
    }
}

fn retag<T, K, W>(pool: &mut EntryPool<K, W>, slot: &mut EntrySlot<K>, tags: EntryTags)
where
    K: Clone + Eq + Hash + fmt::Debug,
    W: EntryWidget<T>,
{
    let old = slot.tags;
    if old == tags {
        return;
    }
    slot.tags = tags;
    notify::<T, K, W>(pool, slot.handle, |entry: &mut dyn StrategyEntry<T>| {
        entry.on_tags_changed(old, tags);
    });
}

fn set_interaction<T, K, W>(
    pool: &mut EntryPool<K, W>,
    slot: &mut EntrySlot<K>,
    interaction: Interaction,
    on: bool,
) -> bool
where
    K: Clone + Eq + Hash + fmt::Debug,
    W: EntryWidget<T>,
{
    let old = slot.tags;
    let mut tags = old;
    tags.set(interaction.tag(), on);
    if old == tags {
        return false;
    }
    slot.tags = tags;
    notify::<T, K, W>(pool, slot.handle, |entry: &mut dyn StrategyEntry<T>| {
        entry.on_tags_changed(old, tags);
        match interaction {
            Interaction::Focused => entry.on_focus_changed(on),
            Interaction::Selected => entry.on_selection_changed(on),
        }
    });
    true
}
