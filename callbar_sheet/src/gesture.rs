// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer gesture adapter: turn pointer positions into sheet-axis deltas and
//! a release velocity.
//!
//! ## Usage
//!
//! 1) Call [`SheetDrag::start`] on pointer down over the drag handle.
//! 2) On each move, call [`SheetDrag::update`] and feed the returned delta to
//!    [`SheetState::drag`](crate::SheetState::drag).
//! 3) On release, [`SheetDrag::end`] returns the velocity to pass to
//!    [`SheetState::settle`](crate::SheetState::settle).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use callbar_sheet::{Orientation, SheetDrag};
//!
//! let mut drag = SheetDrag::new(Orientation::Vertical, 100);
//! drag.start(Point::new(10.0, 500.0), 0);
//!
//! // Only the vertical component moves a vertical sheet.
//! assert_eq!(drag.update(Point::new(40.0, 480.0), 16), Some(-20.0));
//! assert_eq!(drag.update(Point::new(40.0, 460.0), 32), Some(-20.0));
//!
//! // 40 px upward in 32 ms.
//! let velocity = drag.end().unwrap();
//! assert_eq!(velocity, -1250.0);
//! assert!(!drag.is_dragging());
//! ```

use kurbo::Point;
use smallvec::SmallVec;

use crate::anchors::Orientation;

/// Samples kept inline by [`VelocityTracker`].
const INLINE_SAMPLES: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    time_ms: u64,
    position: f64,
}

/// Estimates velocity along one axis from recent position samples.
///
/// Samples older than the window, measured back from the newest one, are
/// discarded. The estimate is the least-squares slope over what remains, in
/// units per second.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    window_ms: u64,
    samples: SmallVec<[Sample; INLINE_SAMPLES]>,
}

impl VelocityTracker {
    /// Creates a tracker looking `window_ms` back.
    #[must_use]
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms: window_ms.max(1),
            samples: SmallVec::new(),
        }
    }

    /// Records a position. Samples that go back in time restart tracking.
    pub fn add(&mut self, time_ms: u64, position: f64) {
        if !position.is_finite() {
            return;
        }
        if self.samples.last().is_some_and(|last| time_ms < last.time_ms) {
            self.samples.clear();
        }
        self.samples.push(Sample { time_ms, position });
        let cutoff = time_ms.saturating_sub(self.window_ms);
        self.samples.retain(|sample| sample.time_ms >= cutoff);
    }

    /// Estimated velocity in units per second; `0` with fewer than two
    /// distinct sample times.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        let (first, last) = match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) if last.time_ms > first.time_ms => (*first, *last),
            _ => return 0.0,
        };
        let origin = first.time_ms;
        let count = self.samples.len() as f64;
        let (sum_t, sum_x) = self
            .samples
            .iter()
            .fold((0.0, 0.0), |(t, x), sample| {
                (t + (sample.time_ms - origin) as f64, x + sample.position)
            });
        let (mean_t, mean_x) = (sum_t / count, sum_x / count);
        let (cov, var) = self.samples.iter().fold((0.0, 0.0), |(cov, var), sample| {
            let dt = (sample.time_ms - origin) as f64 - mean_t;
            (cov + dt * (sample.position - mean_x), var + dt * dt)
        });
        if var == 0.0 {
            return (last.position - first.position) * 1000.0
                / (last.time_ms - first.time_ms) as f64;
        }
        cov / var * 1000.0
    }

    /// Drops every sample.
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

/// Tracks a drag of the sheet handle.
#[derive(Clone, Debug)]
pub struct SheetDrag {
    orientation: Orientation,
    /// Start position of the drag operation.
    pub start_pos: Option<Point>,
    /// Last recorded pointer position during the drag.
    pub last_pos: Option<Point>,
    tracker: VelocityTracker,
}

impl SheetDrag {
    /// Creates an idle drag for a sheet sliding along `orientation`.
    #[must_use]
    pub fn new(orientation: Orientation, velocity_window_ms: u64) -> Self {
        Self {
            orientation,
            start_pos: None,
            last_pos: None,
            tracker: VelocityTracker::new(velocity_window_ms),
        }
    }

    /// The axis pointer movement is projected onto.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Start tracking a new drag from the given position.
    pub fn start(&mut self, pos: Point, time_ms: u64) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.tracker.reset();
        self.tracker.add(time_ms, self.orientation.project(pos.to_vec2()));
    }

    /// Records a new position, returning the movement along the sheet axis
    /// since the last update.
    pub fn update(&mut self, pos: Point, time_ms: u64) -> Option<f64> {
        self.start_pos?;
        self.tracker
            .add(time_ms, self.orientation.project(pos.to_vec2()));
        let last = self.last_pos.replace(pos)?;
        Some(self.orientation.project(pos - last))
    }

    /// Movement along the sheet axis since the drag started.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<f64> {
        self.start_pos
            .map(|start| self.orientation.project(current_pos - start))
    }

    /// Ends the drag, returning the release velocity in pixels per second.
    ///
    /// Returns `None` if no drag was active.
    pub fn end(&mut self) -> Option<f64> {
        self.start_pos.take()?;
        self.last_pos = None;
        let velocity = self.tracker.velocity();
        self.tracker.reset();
        Some(velocity)
    }

    /// Abandons the drag without producing a velocity.
    pub fn cancel(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
        self.tracker.reset();
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}
