// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::anchors::SheetValue;

/// Identifies one animation; a newer animation always has a larger number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

/// Cubic ease-out: fast start, gentle landing.
#[must_use]
pub(crate) fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// A host-clocked offset animation toward one anchor.
///
/// The clock starts on the first sample, so an animation created between
/// frames does not jump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SheetAnimation {
    pub(crate) generation: Generation,
    pub(crate) target: SheetValue,
    from: f64,
    to: f64,
    duration_ms: u64,
    start_ms: Option<u64>,
}

impl SheetAnimation {
    pub(crate) fn new(
        generation: Generation,
        target: SheetValue,
        from: f64,
        to: f64,
        duration_ms: u64,
    ) -> Self {
        Self {
            generation,
            target,
            from,
            to,
            duration_ms: duration_ms.max(1),
            start_ms: None,
        }
    }

    pub(crate) fn to(&self) -> f64 {
        self.to
    }

    /// Moves the destination, continuing from `from` with a fresh clock.
    pub(crate) fn retarget(&mut self, from: f64, to: f64) {
        self.from = from;
        self.to = to;
        self.start_ms = None;
    }

    /// Offset at `now_ms`, and whether the animation has finished.
    pub(crate) fn sample(&mut self, now_ms: u64) -> (f64, bool) {
        let start = *self.start_ms.get_or_insert(now_ms);
        let elapsed = now_ms.saturating_sub(start);
        if elapsed >= self.duration_ms {
            return (self.to, true);
        }
        let progress = elapsed as f64 / self.duration_ms as f64;
        (self.from + (self.to - self.from) * ease_out(progress), false)
    }
}
