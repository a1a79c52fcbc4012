// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=callbar_sheet --heading-base-level=0

//! Callbar Sheet: the draggable action sheet of an in-call screen.
//!
//! The sheet slides along one axis between named resting positions, its
//! [`SheetAnchors`]. It moves under direct manipulation, where a drag is
//! followed by a velocity-aware settle, and under programmatic requests such
//! as expand, collapse and dismiss. The backdrop dimmer is derived from it.
//!
//! - [`SheetState`]: the anchored state machine. Owns the offset, the current
//!   and target values, and at most one in-flight animation.
//! - [`SheetDrag`] and [`VelocityTracker`]: turn pointer positions into axis
//!   deltas and a release velocity.
//! - [`ScrimCoupler`]: shows the scrim while the sheet is expanded and turns a
//!   tap on it into a dismiss.
//!
//! Animations are driven by the host's frame clock through
//! [`SheetState::tick`], so the crate never sleeps or spawns anything. Any new
//! drag or request cancels the running animation; nothing is queued.
//!
//! ## Minimal example
//!
//! ```rust
//! use callbar_sheet::{Orientation, SheetAnchors, SheetConfig, SheetState, SheetValue};
//! use kurbo::Size;
//!
//! let mut sheet = SheetState::new(SheetConfig::default(), SheetValue::Collapsed);
//!
//! // Nothing moves until the host surface is measured.
//! assert_eq!(sheet.drag(-50.0), 0.0);
//! assert_eq!(sheet.offset(), None);
//!
//! let anchors = SheetAnchors::from_extent(Size::new(360.0, 400.0), Orientation::Vertical, None)
//!     .unwrap();
//! sheet.update_anchors(anchors);
//! assert_eq!(sheet.offset(), Some(400.0));
//!
//! // Drag 30% of the way up and let go slowly: back to collapsed.
//! sheet.drag(-120.0);
//! sheet.settle(10.0);
//! assert_eq!(sheet.target_value(), SheetValue::Collapsed);
//!
//! // A fast upward fling expands regardless of position.
//! sheet.drag(-120.0);
//! sheet.settle(-800.0);
//! assert_eq!(sheet.target_value(), SheetValue::Expanded);
//!
//! let mut now = 0;
//! while sheet.tick(now) {
//!     now += 16;
//! }
//! assert_eq!(sheet.current_value(), SheetValue::Expanded);
//! assert_eq!(sheet.offset(), Some(0.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod anchors;
mod animation;
mod config;
pub mod gesture;
mod scrim;
mod state;

pub use anchors::{Orientation, SheetAnchors, SheetValue};
pub use animation::Generation;
pub use config::{ConfigError, SheetConfig};
pub use gesture::{SheetDrag, VelocityTracker};
pub use scrim::ScrimCoupler;
pub use state::{HandleAction, SheetEvent, SheetState};
