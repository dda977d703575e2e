// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The radial host: items, pointer, focus and selection around an [`EntryManager`].
//!
//! A frame runs in a fixed order inside [`StrategyHost::tick`]: advance any
//! scroll animation, push the pointer angle to the strategy, recompute focus,
//! then reconcile entries (release, acquire, place, assign).

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashSet;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use understory_radial::{
    ConfigError, GlobalIndex, LayoutStrategy, RadialLayout, Wedge, direction_degrees,
    shortest_delta_degrees, unwind_degrees,
};

use crate::scroll::{GapCrossing, Step};
use crate::{
    ClassResolver, EntryContext, EntryFactory, EntryManager, EntryWidget, HostError, Interaction,
    ReconcileStats, ScrollAnimation,
};

/// How many items may be selected at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    /// Selecting an item deselects every other item.
    Single,
    /// Items are selected independently.
    #[default]
    Multiple,
}

/// Input and selection settings for a [`StrategyHost`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HostConfig {
    /// Degrees per second of rotation for a full tangential stick deflection.
    pub rotation_sensitivity: f64,
    /// Single or multiple selection.
    pub selection_mode: SelectionMode,
    /// Base duration of an index step in seconds. `None` uses the last frame's delta.
    pub step_duration: Option<f64>,
    /// Angular gap left between neighboring wedges, in degrees.
    pub wedge_gap_degrees: f64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            rotation_sensitivity: 100.0,
            selection_mode: SelectionMode::Multiple,
            step_duration: None,
            wedge_gap_degrees: understory_radial::DEFAULT_WEDGE_GAP_DEGREES,
        }
    }
}

impl HostConfig {
    /// Set the stick rotation sensitivity.
    #[must_use]
    pub fn with_rotation_sensitivity(mut self, degrees_per_second: f64) -> Self {
        self.rotation_sensitivity = degrees_per_second;
        self
    }

    /// Set the selection mode.
    #[must_use]
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Set the base step duration.
    #[must_use]
    pub fn with_step_duration(mut self, seconds: Option<f64>) -> Self {
        self.step_duration = seconds;
        self
    }

    /// Set the gap between wedges.
    #[must_use]
    pub fn with_wedge_gap_degrees(mut self, degrees: f64) -> Self {
        self.wedge_gap_degrees = degrees;
        self
    }
}

/// Notifications queued by a [`StrategyHost`] and drained with
/// [`StrategyHost::drain_events`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// The focused item changed. `None` when the pointer rests on a gap wedge.
    ItemFocused {
        /// Newly focused data index.
        data_index: Option<usize>,
    },
    /// An item was selected.
    ItemSelected {
        /// Selected data index.
        data_index: usize,
    },
    /// An item was deselected.
    ItemDeselected {
        /// Deselected data index.
        data_index: usize,
    },
    /// The pointer moved.
    PointerRotated {
        /// The pointer angle unwound into `[-180, 180]`.
        unwound_degrees: f64,
    },
}

/// Drives a layout strategy and its entries from pointer input.
///
/// The host owns the item list, the unbounded pointer angle, focus and
/// selection. Operations that need a strategy return
/// [`HostError::MissingStrategy`] and log instead of panicking when none is
/// assigned.
pub struct StrategyHost<T, K, W, S = RadialLayout> {
    config: HostConfig,
    items: Vec<T>,
    strategy: Option<S>,
    entries: EntryManager<T, K, W>,
    focused_global_index: Option<GlobalIndex>,
    focused_data_index: Option<usize>,
    selected: HashSet<usize>,
    pointer_angle: f64,
    animation: Option<ScrollAnimation>,
    gap_crossing: GapCrossing,
    last_delta_seconds: f64,
    events: Vec<HostEvent>,
}

impl<T, K: fmt::Debug, W, S: fmt::Debug> fmt::Debug for StrategyHost<T, K, W, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyHost")
            .field("config", &self.config)
            .field("items", &self.items.len())
            .field("strategy", &self.strategy)
            .field("entries", &self.entries)
            .field("focused_global_index", &self.focused_global_index)
            .field("focused_data_index", &self.focused_data_index)
            .field("selected", &self.selected)
            .field("pointer_angle", &self.pointer_angle)
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}

impl<T, K, W, S> StrategyHost<T, K, W, S>
where
    K: Clone + Eq + Hash + fmt::Debug,
    W: EntryWidget<T>,
    S: LayoutStrategy,
{
    /// Create a host with no strategy and no items.
    pub fn new(
        factory: impl EntryFactory<K, W> + 'static,
        resolver: ClassResolver<T, K>,
        config: HostConfig,
    ) -> Self {
        Self {
            config,
            items: Vec::new(),
            strategy: None,
            entries: EntryManager::new(factory, resolver),
            focused_global_index: None,
            focused_data_index: None,
            selected: HashSet::new(),
            pointer_angle: 0.0,
            animation: None,
            gap_crossing: GapCrossing::default(),
            last_delta_seconds: 0.0,
            events: Vec::new(),
        }
    }

    // --- Configuration ---

    /// Host settings.
    #[must_use]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Replace the host settings.
    pub fn set_config(&mut self, config: HostConfig) {
        self.config = config;
    }

    /// Assign a layout strategy and rebuild the entries against it.
    ///
    /// Returns the strategy's validation errors, which are also logged. The
    /// strategy is used even when misconfigured.
    pub fn set_strategy(&mut self, strategy: S) -> Vec<ConfigError> {
        self.strategy = Some(strategy);
        let errors = self.strategy.as_ref().map(S::validate).unwrap_or_default();
        for err in &errors {
            log::error!("{err}");
        }
        if let Ok(stats) = self.refresh() {
            log::debug!(
                "strategy assigned: {} entries acquired, {} failed",
                stats.acquired,
                stats.failed
            );
        }
        errors
    }

    /// Remove the strategy, releasing every entry.
    pub fn clear_strategy(&mut self) -> Option<S> {
        self.entries.release_all();
        self.update_focused_index(None);
        self.strategy.take()
    }

    /// The assigned strategy.
    #[must_use]
    pub fn strategy(&self) -> Option<&S> {
        self.strategy.as_ref()
    }

    /// Mutable access to the assigned strategy.
    ///
    /// Call [`refresh`](Self::refresh) after changing its configuration.
    pub fn strategy_mut(&mut self) -> Option<&mut S> {
        self.strategy.as_mut()
    }

    /// Reinitialize the strategy for the current items and rebuild every entry.
    pub fn refresh(&mut self) -> Result<ReconcileStats, HostError> {
        let item_count = self.items.len();
        let pointer = self.pointer_angle;
        let strategy = self.strategy_mut_or_log("refresh")?;
        strategy.initialize(item_count);
        strategy.set_pointer_angle(pointer);
        self.entries.release_all();
        // Global indices may map differently now; only a data change is an event.
        self.focused_global_index = None;
        self.refocus();
        self.update_widgets()
    }

    /// Report everything that keeps the host from working as configured.
    #[must_use]
    pub fn validate(&self) -> Vec<HostError> {
        let mut errors = Vec::new();
        match &self.strategy {
            Some(strategy) => errors.extend(strategy.validate().into_iter().map(HostError::from)),
            None => errors.push(HostError::MissingStrategy),
        }
        if self.entries.resolver().default_class().is_none() {
            errors.push(HostError::MissingDefaultClass);
        }
        errors
    }

    // --- Items ---

    /// Replace the items.
    ///
    /// Entries are released so that widget classes are resolved again for the
    /// new items. Selections beyond the new item count are dropped and input
    /// is reset. Refused when no strategy is assigned.
    pub fn set_items(&mut self, items: Vec<T>) -> Result<ReconcileStats, HostError> {
        let strategy = self.strategy_mut_or_log("set items")?;
        strategy.initialize(items.len());
        self.entries.release_all();
        self.items = items;

        let item_count = self.items.len();
        let mut dropped: SmallVec<[usize; 8]> = self
            .selected
            .iter()
            .copied()
            .filter(|&d| d >= item_count)
            .collect();
        dropped.sort_unstable();
        for data_index in dropped {
            self.selected.remove(&data_index);
            self.events.push(HostEvent::ItemDeselected { data_index });
        }

        self.reset_input();
        self.refocus();
        self.update_widgets()
    }

    /// Drop every item, entry and pooled widget, and reset input.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.items.clear();
        self.selected.clear();
        if let Some(strategy) = self.strategy.as_mut() {
            strategy.initialize(0);
        }
        self.reset_input();
    }

    /// The items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The item at `data_index`.
    #[must_use]
    pub fn item(&self, data_index: usize) -> Option<&T> {
        self.items.get(data_index)
    }

    /// Number of items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    // --- Entries ---

    /// The entry manager.
    #[must_use]
    pub fn entries(&self) -> &EntryManager<T, K, W> {
        &self.entries
    }

    /// Mutable access to the class resolver.
    pub fn resolver_mut(&mut self) -> &mut ClassResolver<T, K> {
        self.entries.resolver_mut()
    }

    /// The widget shown at `index`, if allocated.
    #[must_use]
    pub fn widget(&self, index: GlobalIndex) -> Option<&W> {
        self.entries.widget(index)
    }

    /// Mutable access to the widget shown at `index`, if allocated.
    pub fn widget_mut(&mut self, index: GlobalIndex) -> Option<&mut W> {
        self.entries.widget_mut(index)
    }

    /// Wedge geometry for the entry at `index`.
    #[must_use]
    pub fn wedge(&self, index: GlobalIndex) -> Option<Wedge> {
        let strategy = self.strategy.as_ref()?;
        Some(Wedge::for_global_index(
            strategy,
            index,
            self.config.wedge_gap_degrees,
        ))
    }

    /// Reconcile entries against the strategy's desired set.
    pub fn update_widgets(&mut self) -> Result<ReconcileStats, HostError> {
        let Some(strategy) = self.strategy.as_ref() else {
            log::error!("cannot update entries without a layout strategy");
            return Err(HostError::MissingStrategy);
        };
        if self.items.is_empty() {
            log::trace!("no items; releasing all entries");
            return Ok(ReconcileStats {
                released: self.entries.release_all(),
                ..ReconcileStats::default()
            });
        }
        let cx = EntryContext {
            strategy,
            items: &self.items,
            focused_data_index: self.focused_data_index,
            selected: &self.selected,
        };
        Ok(self.entries.reconcile(cx))
    }

    /// Run one frame: advance the animation, update focus and reconcile.
    pub fn tick(&mut self, dt: f64) -> Result<ReconcileStats, HostError> {
        if dt.is_finite() && dt > 0.0 {
            self.last_delta_seconds = dt;
        }
        if let Some(mut animation) = self.animation.take() {
            let angle = animation.advance(dt);
            if !animation.is_finished() {
                self.animation = Some(animation);
            }
            self.set_current_angle(angle);
        }

        let pointer = self.pointer_angle;
        let strategy = self.strategy_mut_or_log("tick")?;
        strategy.set_pointer_angle(pointer);
        self.refocus();
        self.update_widgets()
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = HostEvent> + '_ {
        self.events.drain(..)
    }

    // --- Focus ---

    /// The focused global index, if any.
    #[must_use]
    pub fn focused_global_index(&self) -> Option<GlobalIndex> {
        self.focused_global_index
    }

    /// The focused data index. `None` when the pointer rests on a gap wedge.
    #[must_use]
    pub fn focused_data_index(&self) -> Option<usize> {
        self.focused_data_index
    }

    /// Move focus to `index`.
    ///
    /// Entries of the previously focused item lose `FOCUSED`, entries of the
    /// new one gain it, and [`HostEvent::ItemFocused`] is queued, but only
    /// when the focused data index actually changes.
    pub fn update_focused_index(&mut self, index: Option<GlobalIndex>) {
        if self.focused_global_index == index {
            return;
        }
        self.focused_global_index = index;

        let item_count = self.items.len();
        let data_index = index
            .zip(self.strategy.as_ref())
            .and_then(|(g, strategy)| strategy.global_index_to_data_index(g))
            .filter(|&d| d < item_count);
        if data_index == self.focused_data_index {
            return;
        }

        if let Some(strategy) = self.strategy.as_ref() {
            if let Some(old) = self.focused_data_index {
                self.entries.set_interaction_for_data_index(
                    strategy,
                    old,
                    Interaction::Focused,
                    false,
                );
            }
            if let Some(new) = data_index {
                self.entries.set_interaction_for_data_index(
                    strategy,
                    new,
                    Interaction::Focused,
                    true,
                );
            }
        }
        self.focused_data_index = data_index;
        self.events.push(HostEvent::ItemFocused { data_index });
    }

    // --- Selection ---

    /// Whether `data_index` is selected.
    #[must_use]
    pub fn is_selected(&self, data_index: usize) -> bool {
        self.selected.contains(&data_index)
    }

    /// Selected data indices in ascending order.
    #[must_use]
    pub fn selected_data_indices(&self) -> Vec<usize> {
        let mut selected: Vec<usize> = self.selected.iter().copied().collect();
        selected.sort_unstable();
        selected
    }

    /// Select or deselect `data_index`.
    ///
    /// Returns whether the selection changed. Indices outside the items are
    /// ignored. In [`SelectionMode::Single`], selecting an item first
    /// deselects every other one.
    pub fn set_selected_data_index(&mut self, data_index: usize, selected: bool) -> bool {
        if data_index >= self.items.len() || self.selected.contains(&data_index) == selected {
            return false;
        }
        if selected && self.config.selection_mode == SelectionMode::Single {
            let mut others: SmallVec<[usize; 4]> = self.selected.iter().copied().collect();
            others.sort_unstable();
            for other in others {
                self.apply_selection(other, false);
            }
        }
        self.apply_selection(data_index, selected);
        true
    }

    /// Select or deselect the item shown at global index `index`.
    ///
    /// Gap slots have no item and are ignored.
    pub fn set_selected_global_index(
        &mut self,
        index: GlobalIndex,
        selected: bool,
    ) -> Result<bool, HostError> {
        let Some(strategy) = self.strategy.as_ref() else {
            log::error!("cannot select global index {index} without a layout strategy");
            return Err(HostError::MissingStrategy);
        };
        Ok(match strategy.global_index_to_data_index(index) {
            Some(data_index) => self.set_selected_data_index(data_index, selected),
            None => false,
        })
    }

    /// Flip the selection of the focused item.
    ///
    /// Returns whether the selection changed.
    pub fn toggle_focused_index_selection(&mut self) -> bool {
        let Some(data_index) = self.focused_data_index else {
            return false;
        };
        let selected = !self.selected.contains(&data_index);
        self.set_selected_data_index(data_index, selected)
    }

    // --- Pointer input ---

    /// The unbounded pointer angle, in degrees.
    #[must_use]
    pub fn pointer_angle(&self) -> f64 {
        self.pointer_angle
    }

    /// Rotate from a stick deflection held for `dt` seconds.
    ///
    /// Only the component of the direction tangential to the pointer's circle
    /// rotates; the deflection's magnitude is ignored. Cancels any animation.
    pub fn handle_stick_input(&mut self, delta: Vec2, dt: f64) {
        if delta.hypot2() <= f64::EPSILON || !delta.is_finite() {
            return;
        }
        let direction = delta.normalize();
        let pointer = Vec2::from_angle(self.pointer_angle.to_radians());
        let tangential = pointer.cross(direction);
        self.add_rotation(tangential * self.config.rotation_sensitivity * dt);
    }

    /// Point at `position`, relative to the layout `center`.
    ///
    /// The pointer turns the short way towards the new direction, so circling
    /// the center keeps accumulating turns. Cancels any animation.
    pub fn handle_pointer_position(&mut self, position: Point, center: Point) {
        let offset = position - center;
        if offset.hypot2() <= f64::EPSILON {
            return;
        }
        let delta = shortest_delta_degrees(self.pointer_angle, direction_degrees(offset));
        self.add_rotation(delta);
    }

    /// Rotate the pointer by `degrees`. Cancels any animation.
    pub fn add_rotation(&mut self, degrees: f64) {
        self.animation = None;
        if !degrees.is_finite() || degrees.abs() <= f64::EPSILON {
            return;
        }
        self.set_current_angle(self.pointer_angle + degrees);
    }

    /// Stop any animation, zero the pointer and clear focus.
    pub fn reset_input(&mut self) {
        self.animation = None;
        self.gap_crossing.reset();
        self.set_current_angle(0.0);
        self.update_focused_index(None);
    }

    // --- Scrolling ---

    /// The running scroll animation.
    #[must_use]
    pub fn animation(&self) -> Option<&ScrollAnimation> {
        self.animation.as_ref()
    }

    /// Whether a scroll animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Animate the pointer to `target` over `duration` seconds, replacing any
    /// running animation. A non-positive duration jumps immediately.
    pub fn begin_angle_animation(&mut self, target: f64, duration: f64) {
        if !target.is_finite() {
            return;
        }
        if duration.is_finite() && duration > 0.0 {
            self.animation = Some(ScrollAnimation::new(self.pointer_angle, target, duration));
        } else {
            self.animation = None;
            self.set_current_angle(target);
        }
    }

    /// Jump to `data_index` along the shortest rotation and focus it.
    ///
    /// Returns `Ok(false)` for indices outside the items.
    pub fn scroll_to_item(&mut self, data_index: usize) -> Result<bool, HostError> {
        let Some(target) = self.target_angle_for(data_index)? else {
            return Ok(false);
        };
        self.animation = None;
        self.set_current_angle(target);
        self.refocus();
        Ok(true)
    }

    /// Animate to `data_index` along the shortest rotation.
    ///
    /// Returns `Ok(false)` for indices outside the items.
    pub fn scroll_to_item_animated(
        &mut self,
        data_index: usize,
        duration: f64,
    ) -> Result<bool, HostError> {
        let Some(target) = self.target_angle_for(data_index)? else {
            return Ok(false);
        };
        self.begin_angle_animation(target, duration);
        Ok(true)
    }

    /// Snap the pointer to the center of the focused wedge.
    pub fn scroll_to_center_of_focused_wedge(&mut self) -> Result<bool, HostError> {
        self.scroll_to_center_of_focused_wedge_animated(0.0)
    }

    /// Animate the pointer to the center of the focused wedge.
    ///
    /// Returns `Ok(false)` when no item is focused.
    pub fn scroll_to_center_of_focused_wedge_animated(
        &mut self,
        duration: f64,
    ) -> Result<bool, HostError> {
        let strategy = self.strategy_or_log("center the focused wedge")?;
        let (Some(index), Some(_)) = (self.focused_global_index, self.focused_data_index) else {
            return Ok(false);
        };
        let center = strategy.item_angle_degrees(index);
        let target = self.pointer_angle + shortest_delta_degrees(self.pointer_angle, center);
        self.begin_angle_animation(target, duration);
        Ok(true)
    }

    /// Step focus by `delta` items using the configured step duration.
    ///
    /// Returns the targeted data index.
    pub fn step_index(&mut self, delta: isize) -> Result<Option<usize>, HostError> {
        let base = self.config.step_duration.unwrap_or(self.last_delta_seconds);
        self.step_index_animated(delta, base)
    }

    /// Step focus by `delta` items, wrapping around the item list.
    ///
    /// Steps that wrap past the end cross the gap wedges and take one `base`
    /// duration per gap wedge, except that a second consecutive crossing in
    /// the same direction takes a quarter of `base`. A non-positive `base`
    /// uses the last frame's delta.
    pub fn step_index_animated(
        &mut self,
        delta: isize,
        base: f64,
    ) -> Result<Option<usize>, HostError> {
        let gap_segments = self.strategy_or_log("step the focused index")?.gap_segments();
        let Some(step) = Step::plan(self.focused_data_index, delta, self.items.len()) else {
            return Ok(None);
        };
        let base = if base > 0.0 {
            base
        } else {
            self.last_delta_seconds
        };
        let duration = self.gap_crossing.duration(step, base, gap_segments);
        self.scroll_to_item_animated(step.target, duration)?;
        Ok(Some(step.target))
    }

    // --- Internals ---

    fn strategy_or_log(&self, action: &str) -> Result<&S, HostError> {
        self.strategy.as_ref().ok_or_else(|| {
            log::error!("cannot {action} without a layout strategy");
            HostError::MissingStrategy
        })
    }

    fn strategy_mut_or_log(&mut self, action: &str) -> Result<&mut S, HostError> {
        self.strategy.as_mut().ok_or_else(|| {
            log::error!("cannot {action} without a layout strategy");
            HostError::MissingStrategy
        })
    }

    fn target_angle_for(&self, data_index: usize) -> Result<Option<f64>, HostError> {
        let strategy = self.strategy_or_log("scroll to an item")?;
        if data_index >= self.items.len() {
            return Ok(None);
        }
        Ok(Some(strategy.shortest_unbound_angle_for_data_index(data_index)))
    }

    fn set_current_angle(&mut self, degrees: f64) {
        if degrees == self.pointer_angle {
            return;
        }
        self.pointer_angle = degrees;
        if let Some(strategy) = self.strategy.as_mut() {
            strategy.set_pointer_angle(degrees);
        }
        self.events.push(HostEvent::PointerRotated {
            unwound_degrees: unwind_degrees(degrees),
        });
    }

    fn refocus(&mut self) {
        let focused = self
            .strategy
            .as_ref()
            .filter(|_| !self.items.is_empty())
            .map(S::find_focused_global_index);
        self.update_focused_index(focused);
    }

    fn apply_selection(&mut self, data_index: usize, selected: bool) {
        let changed = if selected {
            self.selected.insert(data_index)
        } else {
            self.selected.remove(&data_index)
        };
        if !changed {
            return;
        }
        if let Some(strategy) = self.strategy.as_ref() {
            self.entries.set_interaction_for_data_index(
                strategy,
                data_index,
                Interaction::Selected,
                selected,
            );
        }
        self.events.push(if selected {
            HostEvent::ItemSelected { data_index }
        } else {
            HostEvent::ItemDeselected { data_index }
        });
    }
}
