// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry state tags.
//!
//! An entry always carries exactly one lifecycle tag once it has been acquired,
//! plus any number of interaction tags. Interaction tags survive lifecycle
//! transitions and are only dropped when the entry is released.

bitflags::bitflags! {
    /// Set of state tags carried by an entry.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EntryTags: u8 {
        /// Freshly taken from (or returned to) the pool.
        const POOLED      = 0b0000_0001;
        /// Allocated but outside the visible window.
        const DEACTIVATED = 0b0000_0010;
        /// Allocated and on screen.
        const ACTIVE      = 0b0000_0100;
        /// Shows the focused item.
        const FOCUSED     = 0b0000_1000;
        /// Shows a selected item.
        const SELECTED    = 0b0001_0000;

        /// Mask of the mutually exclusive lifecycle tags.
        const LIFECYCLE   = Self::POOLED.bits() | Self::DEACTIVATED.bits() | Self::ACTIVE.bits();
        /// Mask of the additive interaction tags.
        const INTERACTION = Self::FOCUSED.bits() | Self::SELECTED.bits();
    }
}

impl EntryTags {
    /// The lifecycle state these tags describe, if exactly one lifecycle tag is set.
    #[must_use]
    pub fn lifecycle(self) -> Option<Lifecycle> {
        let lifecycle = self & Self::LIFECYCLE;
        [Lifecycle::Pooled, Lifecycle::Deactivated, Lifecycle::Active]
            .into_iter()
            .find(|l| l.tag() == lifecycle)
    }

    /// Replace the lifecycle tag, keeping interaction tags.
    #[must_use]
    pub fn with_lifecycle(self, lifecycle: Lifecycle) -> Self {
        self.difference(Self::LIFECYCLE) | lifecycle.tag()
    }

    /// Only the interaction tags.
    #[must_use]
    pub fn interaction(self) -> Self {
        self & Self::INTERACTION
    }
}

/// Mutually exclusive allocation state of an entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Owned by the pool, or just taken from it.
    Pooled,
    /// Allocated but hidden.
    Deactivated,
    /// Allocated and visible.
    Active,
}

impl Lifecycle {
    /// The tag for this state.
    #[must_use]
    pub const fn tag(self) -> EntryTags {
        match self {
            Self::Pooled => EntryTags::POOLED,
            Self::Deactivated => EntryTags::DEACTIVATED,
            Self::Active => EntryTags::ACTIVE,
        }
    }

    /// `Active` when `visible`, otherwise `Deactivated`.
    #[must_use]
    pub const fn for_visibility(visible: bool) -> Self {
        if visible {
            Self::Active
        } else {
            Self::Deactivated
        }
    }
}

/// Additive interaction state of an entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// The entry shows the focused item.
    Focused,
    /// The entry shows a selected item.
    Selected,
}

impl Interaction {
    /// The tag for this state.
    #[must_use]
    pub const fn tag(self) -> EntryTags {
        match self {
            Self::Focused => EntryTags::FOCUSED,
            Self::Selected => EntryTags::SELECTED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_replacement_keeps_interaction() {
        let tags = EntryTags::POOLED | EntryTags::SELECTED;
        let active = tags.with_lifecycle(Lifecycle::Active);
        assert_eq!(active, EntryTags::ACTIVE | EntryTags::SELECTED);
        assert_eq!(active.lifecycle(), Some(Lifecycle::Active));
        assert_eq!(active.interaction(), EntryTags::SELECTED);
    }

    #[test]
    fn lifecycle_requires_single_tag() {
        assert_eq!(EntryTags::empty().lifecycle(), None);
        assert_eq!((EntryTags::ACTIVE | EntryTags::POOLED).lifecycle(), None);
        assert_eq!(EntryTags::FOCUSED.lifecycle(), None);
    }

    #[test]
    fn visibility_picks_lifecycle() {
        assert_eq!(Lifecycle::for_visibility(true), Lifecycle::Active);
        assert_eq!(Lifecycle::for_visibility(false), Lifecycle::Deactivated);
        assert_eq!(Interaction::Focused.tag(), EntryTags::FOCUSED);
    }
}
