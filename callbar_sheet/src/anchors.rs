// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Size, Vec2};
use smallvec::SmallVec;

/// A named resting position of the sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SheetValue {
    /// Fully open; the smallest offset.
    Expanded,
    /// Partially open. Only present when the anchors define it.
    HalfExpanded,
    /// Closed down to the drag handle; the largest offset.
    #[default]
    Collapsed,
}

/// Axis the sheet slides along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Slides up and down; offsets are measured along y.
    #[default]
    Vertical,
    /// Slides sideways; offsets are measured along x.
    Horizontal,
}

impl Orientation {
    /// The extent of `size` along this axis.
    #[must_use]
    pub fn extent(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// The component of `vec` along this axis.
    #[must_use]
    pub fn project(self, vec: Vec2) -> f64 {
        match self {
            Self::Vertical => vec.y,
            Self::Horizontal => vec.x,
        }
    }
}

/// Offsets of the sheet's resting positions along its axis.
///
/// `Expanded` always has the smallest offset and `Collapsed` the largest;
/// `HalfExpanded`, when present, lies between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetAnchors {
    expanded: f64,
    half_expanded: Option<f64>,
    collapsed: f64,
}

impl SheetAnchors {
    /// Creates anchors from two offsets, ordering them if needed.
    ///
    /// Returns `None` if either offset is not finite.
    #[must_use]
    pub fn new(expanded: f64, collapsed: f64) -> Option<Self> {
        if !expanded.is_finite() || !collapsed.is_finite() {
            return None;
        }
        let (expanded, collapsed) = if expanded <= collapsed {
            (expanded, collapsed)
        } else {
            (collapsed, expanded)
        };
        Some(Self {
            expanded,
            half_expanded: None,
            collapsed,
        })
    }

    /// Builds anchors from the measured extent of the host surface.
    ///
    /// `Expanded` sits at `0` and `Collapsed` at the full extent along the
    /// axis. `peek` is the visible fraction of the extent at `HalfExpanded`;
    /// values outside `(0, 1)` leave that anchor out.
    ///
    /// Returns `None` until the surface has a positive, finite extent.
    #[must_use]
    pub fn from_extent(size: Size, orientation: Orientation, peek: Option<f64>) -> Option<Self> {
        let extent = orientation.extent(size);
        if !extent.is_finite() || extent <= 0.0 {
            return None;
        }
        let anchors = Self::new(0.0, extent)?;
        Some(match peek {
            Some(peek) if peek > 0.0 && peek < 1.0 => {
                anchors.with_half_expanded(extent * (1.0 - peek))
            }
            _ => anchors,
        })
    }

    /// Adds a `HalfExpanded` anchor, clamped between the other two.
    ///
    /// A non-finite offset leaves the anchors unchanged.
    #[must_use]
    pub fn with_half_expanded(mut self, offset: f64) -> Self {
        if offset.is_finite() {
            self.half_expanded = Some(offset.clamp(self.expanded, self.collapsed));
        }
        self
    }

    /// Offset of `value`, if the anchors define it.
    #[must_use]
    pub fn offset(&self, value: SheetValue) -> Option<f64> {
        match value {
            SheetValue::Expanded => Some(self.expanded),
            SheetValue::HalfExpanded => self.half_expanded,
            SheetValue::Collapsed => Some(self.collapsed),
        }
    }

    /// Returns `true` if the anchors define `value`.
    #[must_use]
    pub fn has(&self, value: SheetValue) -> bool {
        self.offset(value).is_some()
    }

    /// Smallest offset, that of `Expanded`.
    #[must_use]
    pub fn min_offset(&self) -> f64 {
        self.expanded
    }

    /// Largest offset, that of `Collapsed`.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        self.collapsed
    }

    /// Distance between `Expanded` and `Collapsed`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.collapsed - self.expanded
    }

    /// Clamps `offset` into `[min_offset, max_offset]`.
    #[must_use]
    pub fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(self.expanded, self.collapsed)
    }

    /// The anchors in ascending offset order.
    pub fn iter(&self) -> impl Iterator<Item = (SheetValue, f64)> {
        let mut entries: SmallVec<[(SheetValue, f64); 3]> = SmallVec::new();
        entries.push((SheetValue::Expanded, self.expanded));
        if let Some(half) = self.half_expanded {
            entries.push((SheetValue::HalfExpanded, half));
        }
        entries.push((SheetValue::Collapsed, self.collapsed));
        entries.into_iter()
    }

    /// The anchor whose offset equals `offset` exactly, if any.
    #[must_use]
    pub fn value_at(&self, offset: f64) -> Option<SheetValue> {
        self.iter()
            .find(|&(_, anchor)| anchor == offset)
            .map(|(value, _)| value)
    }

    /// The anchor nearest to `offset`; ties go to the smaller offset.
    #[must_use]
    pub fn nearest(&self, offset: f64) -> SheetValue {
        let mut best = (SheetValue::Expanded, f64::INFINITY);
        for (value, anchor) in self.iter() {
            let distance = (anchor - offset).abs();
            if distance < best.1 {
                best = (value, distance);
            }
        }
        best.0
    }

    /// The nearest anchors at or below and at or above `offset`.
    ///
    /// `offset` is clamped first, so both ends always exist.
    #[must_use]
    pub fn bracket(&self, offset: f64) -> ((SheetValue, f64), (SheetValue, f64)) {
        let offset = self.clamp(offset);
        let mut lower = (SheetValue::Expanded, self.expanded);
        let mut upper = (SheetValue::Collapsed, self.collapsed);
        for (value, anchor) in self.iter() {
            if anchor <= offset && anchor >= lower.1 {
                lower = (value, anchor);
            }
            if anchor >= offset && anchor <= upper.1 {
                upper = (value, anchor);
            }
        }
        (lower, upper)
    }

    /// The next anchor strictly beyond `offset` in the direction of `sign`.
    ///
    /// Positive `sign` moves toward `Collapsed`. Falls back to the last anchor
    /// in that direction when nothing lies beyond.
    #[must_use]
    pub fn next_in_direction(&self, offset: f64, sign: f64) -> SheetValue {
        if sign > 0.0 {
            self.iter()
                .find(|&(_, anchor)| anchor > offset)
                .map_or(SheetValue::Collapsed, |(value, _)| value)
        } else {
            self.iter()
                .filter(|&(_, anchor)| anchor < offset)
                .last()
                .map_or(SheetValue::Expanded, |(value, _)| value)
        }
    }
}
