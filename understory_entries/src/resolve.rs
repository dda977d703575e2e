// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget-class resolution.
//!
//! When a slot is first acquired, its class is resolved through a short chain:
//! 1. The item may name a class directly.
//! 2. The item may name a symbolic tag, looked up in a [`ClassRegistry`].
//! 3. Otherwise the resolver's default class is used.
//!
//! Gap slots have no item and always use the default class.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

/// What an item asks for when it is about to be shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EntryClassHint<K> {
    /// No preference; fall back to the default class.
    #[default]
    None,
    /// Use this class.
    Class(K),
    /// Look this tag up in the [`ClassRegistry`].
    Tag(String),
}

/// Symbolic tag to widget-class table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "K: serde::Serialize + Eq + Hash",
        deserialize = "K: serde::Deserialize<'de> + Eq + Hash"
    ))
)]
pub struct ClassRegistry<K> {
    classes: HashMap<String, K>,
    /// Log a warning when a tag has no registered class.
    pub warn_on_missing_class: bool,
}

impl<K> Default for ClassRegistry<K> {
    fn default() -> Self {
        Self {
            classes: HashMap::new(),
            warn_on_missing_class: true,
        }
    }
}

impl<K: Eq + Hash> ClassRegistry<K> {
    /// Create an empty registry that warns on missing classes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `class` under `tag`, returning the class it replaces.
    pub fn insert(&mut self, tag: impl Into<String>, class: K) -> Option<K> {
        self.classes.insert(tag.into(), class)
    }

    /// Remove the class registered under `tag`.
    pub fn remove(&mut self, tag: &str) -> Option<K> {
        self.classes.remove(tag)
    }

    /// The class registered under `tag`.
    #[must_use]
    pub fn class_for(&self, tag: &str) -> Option<&K> {
        let class = self.classes.get(tag);
        if class.is_none() && self.warn_on_missing_class {
            log::warn!("no widget class registered for tag {tag:?}");
        }
        class
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no tags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

type HintFn<T, K> = Box<dyn Fn(&T) -> EntryClassHint<K>>;

/// The class → tag → default resolution chain for items of type `T`.
pub struct ClassResolver<T, K> {
    default_class: Option<K>,
    registry: ClassRegistry<K>,
    hint: Option<HintFn<T, K>>,
}

impl<T, K: fmt::Debug> fmt::Debug for ClassResolver<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassResolver")
            .field("default_class", &self.default_class)
            .field("registry", &self.registry)
            .field("has_hint", &self.hint.is_some())
            .finish()
    }
}

impl<T, K> Default for ClassResolver<T, K> {
    fn default() -> Self {
        Self {
            default_class: None,
            registry: ClassRegistry::default(),
            hint: None,
        }
    }
}

impl<T, K> ClassResolver<T, K>
where
    K: Clone + Eq + Hash,
{
    /// A resolver that always yields `default_class`.
    #[must_use]
    pub fn with_default(default_class: K) -> Self {
        Self {
            default_class: Some(default_class),
            ..Self::default()
        }
    }

    /// The fallback class.
    #[must_use]
    pub fn default_class(&self) -> Option<&K> {
        self.default_class.as_ref()
    }

    /// Set or clear the fallback class.
    pub fn set_default_class(&mut self, class: Option<K>) {
        self.default_class = class;
    }

    /// The tag registry.
    #[must_use]
    pub fn registry(&self) -> &ClassRegistry<K> {
        &self.registry
    }

    /// Mutable access to the tag registry.
    pub fn registry_mut(&mut self) -> &mut ClassRegistry<K> {
        &mut self.registry
    }

    /// Ask each item for a class hint with `hint`.
    pub fn set_hint(&mut self, hint: impl Fn(&T) -> EntryClassHint<K> + 'static) {
        self.hint = Some(Box::new(hint));
    }

    /// Stop asking items for hints.
    pub fn clear_hint(&mut self) {
        self.hint = None;
    }

    /// Resolve the class for `item`, or `None` when nothing in the chain applies.
    #[must_use]
    pub fn resolve(&self, item: Option<&T>) -> Option<K> {
        if let Some(item) = item
            && let Some(hint) = &self.hint
        {
            match hint(item) {
                EntryClassHint::Class(class) => return Some(class),
                EntryClassHint::Tag(tag) => {
                    if let Some(class) = self.registry.class_for(&tag) {
                        return Some(class.clone());
                    }
                }
                EntryClassHint::None => {}
            }
        }
        self.default_class.clone()
    }
}
