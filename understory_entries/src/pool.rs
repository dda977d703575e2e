// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class-keyed widget pool.
//!
//! The pool owns every widget instance it ever created. Callers hold
//! [`EntryHandle`]s, which are lookup keys into the pool and never keep a
//! widget alive on their own.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

/// Handle to a widget checked out of an [`EntryPool`].
///
/// A handle consists of a slot index and a generation counter. Releasing the
/// widget invalidates the handle; when the slot is checked out again its
/// generation is incremented, so a stale handle never aliases the new owner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryHandle {
    idx: u32,
    generation: u32,
}

impl EntryHandle {
    const fn idx(self) -> usize {
        self.idx as usize
    }
}

/// Creates widget instances for a class when the pool has none to reuse.
///
/// Implemented for every `FnMut(&K) -> Option<W>`.
pub trait EntryFactory<K, W> {
    /// Build a new widget of `class`, or `None` if the class cannot be instantiated.
    fn create(&mut self, class: &K) -> Option<W>;
}

impl<K, W, F> EntryFactory<K, W> for F
where
    F: FnMut(&K) -> Option<W>,
{
    fn create(&mut self, class: &K) -> Option<W> {
        self(class)
    }
}

struct PoolSlot<K, W> {
    widget: W,
    class: K,
    generation: u32,
    in_use: bool,
}

/// Widgets grouped by class, reused across checkouts.
pub struct EntryPool<K, W> {
    slots: Vec<PoolSlot<K, W>>,
    free: HashMap<K, Vec<u32>>,
    in_use: usize,
    created: usize,
    first_generation: u32,
}

impl<K, W> fmt::Debug for EntryPool<K, W>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPool")
            .field("classes", &self.free.keys().collect::<Vec<_>>())
            .field("in_use", &self.in_use)
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}

impl<K, W> Default for EntryPool<K, W> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: HashMap::new(),
            in_use: 0,
            created: 0,
            first_generation: 1,
        }
    }
}

impl<K, W> EntryPool<K, W>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check out a widget of `class`, reusing an idle one when available and
    /// otherwise asking `factory` for a new one.
    pub fn acquire(
        &mut self,
        class: &K,
        factory: &mut dyn EntryFactory<K, W>,
    ) -> Option<EntryHandle> {
        if let Some(idx) = self.free.get_mut(class).and_then(Vec::pop) {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.in_use = true;
            self.in_use += 1;
            return Some(EntryHandle {
                idx,
                generation: slot.generation,
            });
        }

        let Ok(idx) = u32::try_from(self.slots.len()) else {
            log::error!("entry pool is full; cannot create another {class:?}");
            return None;
        };
        let Some(widget) = factory.create(class) else {
            log::error!("entry factory could not create a widget of class {class:?}");
            return None;
        };
        let generation = self.first_generation;
        self.slots.push(PoolSlot {
            widget,
            class: class.clone(),
            generation,
            in_use: true,
        });
        self.free.entry(class.clone()).or_default();
        self.in_use += 1;
        self.created += 1;
        Some(EntryHandle { idx, generation })
    }

    /// Return a checked-out widget to its class pool.
    ///
    /// Returns `false` for stale or already released handles.
    pub fn release(&mut self, handle: EntryHandle) -> bool {
        let Some(slot) = self.live_slot_mut(handle) else {
            return false;
        };
        slot.in_use = false;
        let class = slot.class.clone();
        self.free.entry(class).or_default().push(handle.idx);
        self.in_use -= 1;
        true
    }

    /// Whether `handle` refers to a checked-out widget.
    #[must_use]
    pub fn is_alive(&self, handle: EntryHandle) -> bool {
        self.live_slot(handle).is_some()
    }

    /// The widget behind a live handle.
    #[must_use]
    pub fn get(&self, handle: EntryHandle) -> Option<&W> {
        self.live_slot(handle).map(|slot| &slot.widget)
    }

    /// Mutable access to the widget behind a live handle.
    pub fn get_mut(&mut self, handle: EntryHandle) -> Option<&mut W> {
        self.live_slot_mut(handle).map(|slot| &mut slot.widget)
    }

    /// Class the widget behind a live handle was created for.
    #[must_use]
    pub fn class_of(&self, handle: EntryHandle) -> Option<&K> {
        self.live_slot(handle).map(|slot| &slot.class)
    }

    /// Number of widgets currently checked out.
    #[must_use]
    pub fn in_use_count(&self) -> usize {
        self.in_use
    }

    /// Number of idle widgets waiting for reuse, across all classes.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.slots.len() - self.in_use
    }

    /// Number of idle widgets of `class`.
    #[must_use]
    pub fn idle_count_for(&self, class: &K) -> usize {
        self.free.get(class).map_or(0, Vec::len)
    }

    /// Total number of widgets the factory has produced for this pool.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Iterate over checked-out widgets.
    pub fn iter_in_use(&self) -> impl Iterator<Item = (EntryHandle, &W)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            let idx = u32::try_from(idx).ok()?;
            slot.in_use.then_some((
                EntryHandle {
                    idx,
                    generation: slot.generation,
                },
                &slot.widget,
            ))
        })
    }

    /// Drop every widget, checked out or idle. All handles become stale.
    ///
    /// Slots created afterwards start past every generation handed out so
    /// far, so an old handle never matches a new widget.
    pub fn clear(&mut self) {
        if let Some(newest) = self.slots.iter().map(|slot| slot.generation).max() {
            self.first_generation = self.first_generation.max(newest).wrapping_add(1);
        }
        self.slots.clear();
        self.free.clear();
        self.in_use = 0;
    }

    fn live_slot(&self, handle: EntryHandle) -> Option<&PoolSlot<K, W>> {
        self.slots
            .get(handle.idx())
            .filter(|slot| slot.in_use && slot.generation == handle.generation)
    }

    fn live_slot_mut(&mut self, handle: EntryHandle) -> Option<&mut PoolSlot<K, W>> {
        self.slots
            .get_mut(handle.idx())
            .filter(|slot| slot.in_use && slot.generation == handle.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Widget(u32);

    fn counter() -> impl FnMut(&&'static str) -> Option<Widget> {
        let mut next = 0;
        move |_class| {
            next += 1;
            Some(Widget(next))
        }
    }

    #[test]
    fn reuses_released_widgets_of_same_class() {
        let mut pool: EntryPool<&str, Widget> = EntryPool::new();
        let mut factory = counter();

        let a = pool.acquire(&"label", &mut factory).unwrap();
        assert_eq!(pool.get(a), Some(&Widget(1)));
        assert!(pool.release(a));
        assert!(!pool.is_alive(a));
        assert_eq!(pool.idle_count_for(&"label"), 1);

        let b = pool.acquire(&"label", &mut factory).unwrap();
        assert_ne!(a, b, "reuse bumps the generation");
        assert_eq!(pool.get(b), Some(&Widget(1)));
        assert_eq!(pool.get(a), None);
        assert_eq!(pool.created_count(), 1);
    }

    #[test]
    fn classes_do_not_share_widgets() {
        let mut pool: EntryPool<&str, Widget> = EntryPool::new();
        let mut factory = counter();

        let a = pool.acquire(&"label", &mut factory).unwrap();
        pool.release(a);
        let b = pool.acquire(&"icon", &mut factory).unwrap();
        assert_eq!(pool.get(b), Some(&Widget(2)));
        assert_eq!(pool.class_of(b), Some(&"icon"));
        assert_eq!(pool.idle_count_for(&"label"), 1);
        assert_eq!(pool.in_use_count(), 1);
        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn double_release_is_rejected() {
        let mut pool: EntryPool<&str, Widget> = EntryPool::new();
        let mut factory = counter();
        let a = pool.acquire(&"label", &mut factory).unwrap();
        assert!(pool.release(a));
        assert!(!pool.release(a));
        assert_eq!(pool.idle_count_for(&"label"), 1);
    }

    #[test]
    fn factory_failure_yields_no_handle() {
        let mut pool: EntryPool<&str, Widget> = EntryPool::new();
        let mut factory = |_: &&str| None;
        assert!(pool.acquire(&"missing", &mut factory).is_none());
        assert_eq!(pool.in_use_count(), 0);
    }

    #[test]
    fn clear_invalidates_everything() {
        let mut pool: EntryPool<&str, Widget> = EntryPool::new();
        let mut factory = counter();
        let a = pool.acquire(&"label", &mut factory).unwrap();
        pool.clear();
        assert!(!pool.is_alive(a));
        assert_eq!(pool.iter_in_use().count(), 0);
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn handles_from_before_clear_stay_stale() {
        let mut pool: EntryPool<&str, Widget> = EntryPool::new();
        let mut factory = counter();
        let stale = pool.acquire(&"label", &mut factory).unwrap();
        pool.clear();

        let fresh = pool.acquire(&"label", &mut factory).unwrap();
        assert_ne!(stale, fresh, "a cleared slot index is not reused as-is");
        assert!(!pool.is_alive(stale));
        assert_eq!(pool.get(stale), None);
        assert_eq!(pool.get(fresh), Some(&Widget(2)));

        // Reuse after release still outpaces the old generation.
        assert!(pool.release(fresh));
        let again = pool.acquire(&"label", &mut factory).unwrap();
        assert!(!pool.is_alive(stale));
        assert!(!pool.is_alive(fresh));
        assert_eq!(pool.get(again), Some(&Widget(2)));
    }
}
