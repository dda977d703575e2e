// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-angle scroll animation and index stepping.

use understory_radial::lerp;

/// A linear pointer-angle animation.
///
/// Animations are preemptible: starting a new one, or any direct pointer
/// input, simply replaces the current one without rolling anything back.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollAnimation {
    start_angle: f64,
    end_angle: f64,
    duration: f64,
    elapsed: f64,
}

impl ScrollAnimation {
    /// Animate from `start_angle` to `end_angle` over `duration` seconds.
    #[must_use]
    pub fn new(start_angle: f64, end_angle: f64, duration: f64) -> Self {
        Self {
            start_angle,
            end_angle,
            duration,
            elapsed: 0.0,
        }
    }

    /// Angle at the start of the animation.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Target angle.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Signed rotation covered by the whole animation.
    #[must_use]
    pub fn delta_angle(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Total duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Seconds advanced so far.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Whether the animation has reached its target.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` seconds and return the new angle.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        lerp(self.start_angle, self.end_angle, self.progress())
    }
}

/// Target of a single index step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) target: usize,
    pub(crate) forward: bool,
    pub(crate) crosses_gap: bool,
}

impl Step {
    /// Step `delta` items from `current`, wrapping around `item_count`.
    ///
    /// Stepping from no focus (the pointer rests on a gap wedge) always counts
    /// as a gap crossing. The gap sits between the last item and item 0, so a
    /// forward step starts just before item 0 and a backward step just after
    /// the last item.
    pub(crate) fn plan(current: Option<usize>, delta: isize, item_count: usize) -> Option<Self> {
        if delta == 0 {
            return None;
        }
        let count = isize::try_from(item_count).ok().filter(|&n| n > 0)?;
        let from = match current {
            Some(d) => isize::try_from(d).ok()?,
            None if delta > 0 => -1,
            None => count,
        };
        let target = usize::try_from((from + delta).rem_euclid(count)).ok()?;
        let forward = delta > 0;
        let crosses_gap = match current {
            None => true,
            Some(d) if forward => target < d,
            Some(d) => target > d,
        };
        Some(Self {
            target,
            forward,
            crosses_gap,
        })
    }
}

/// Remembers the previous step's gap crossing to debounce a second one.
///
/// Crossing the gap normally takes one base duration per gap wedge. A second consecutive crossing in the same direction is treated as
/// the user pushing through, and runs at a quarter of the base duration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct GapCrossing {
    crossed_last_step: bool,
    last_forward: bool,
}

impl GapCrossing {
    pub(crate) fn duration(&mut self, step: Step, base: f64, gap_segments: usize) -> f64 {
        if !step.crosses_gap {
            self.crossed_last_step = false;
            return base;
        }
        let repeat = self.crossed_last_step && self.last_forward == step.forward;
        self.crossed_last_step = true;
        self.last_forward = step.forward;
        if repeat {
            log::trace!("second gap crossing in a row; shortening the step");
            base * 0.25
        } else {
            base * gap_segments.max(1) as f64
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_reaches_target_and_stops() {
        let mut anim = ScrollAnimation::new(10.0, 50.0, 2.0);
        assert_eq!(anim.delta_angle(), 40.0);
        assert_eq!(anim.advance(0.5), 20.0);
        assert!(!anim.is_finished());
        assert_eq!(anim.advance(2.0), 50.0);
        assert!(anim.is_finished());
        assert_eq!(anim.advance(1.0), 50.0);
    }

    #[test]
    fn animation_ignores_bad_deltas() {
        let mut anim = ScrollAnimation::new(0.0, 90.0, 1.0);
        assert_eq!(anim.advance(-1.0), 0.0);
        assert_eq!(anim.advance(f64::NAN), 0.0);
        assert_eq!(anim.elapsed(), 0.0);
    }

    #[test]
    fn step_wraps_and_flags_crossings() {
        assert_eq!(
            Step::plan(Some(2), 1, 5),
            Some(Step {
                target: 3,
                forward: true,
                crosses_gap: false
            })
        );
        let wrap = Step::plan(Some(4), 1, 5).unwrap();
        assert_eq!(wrap.target, 0);
        assert!(wrap.crosses_gap);

        let back = Step::plan(Some(0), -1, 5).unwrap();
        assert_eq!(back.target, 4);
        assert!(back.crosses_gap);

        let from_gap = Step::plan(None, 1, 5).unwrap();
        assert_eq!(from_gap.target, 0);
        assert!(from_gap.crosses_gap);

        let from_gap_back = Step::plan(None, -1, 5).unwrap();
        assert_eq!(from_gap_back.target, 4);
        assert!(!from_gap_back.forward);
        assert!(from_gap_back.crosses_gap);
        assert_eq!(Step::plan(None, -2, 5).unwrap().target, 3);

        assert_eq!(Step::plan(Some(1), 0, 5), None);
        assert_eq!(Step::plan(None, 1, 0), None);
    }

    #[test]
    fn second_crossing_same_direction_is_shortened() {
        let mut gap = GapCrossing::default();
        let forward = Step::plan(Some(4), 1, 5).unwrap();
        assert_eq!(gap.duration(forward, 0.5, 3), 1.5);
        assert_eq!(gap.duration(forward, 0.5, 3), 0.125);

        // A different direction starts over.
        let backward = Step::plan(Some(0), -1, 5).unwrap();
        assert_eq!(gap.duration(backward, 0.5, 3), 1.5);

        // Any non-crossing step resets the debounce.
        let plain = Step::plan(Some(1), 1, 5).unwrap();
        assert_eq!(gap.duration(plain, 0.5, 3), 0.5);
        assert_eq!(gap.duration(backward, 0.5, 3), 1.5);

        // Without gap wedges a crossing still takes one base duration.
        let mut gap = GapCrossing::default();
        assert_eq!(gap.duration(forward, 0.5, 0), 0.5);
    }
}
