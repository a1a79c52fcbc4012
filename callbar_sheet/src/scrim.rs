// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::anchors::SheetValue;
use crate::config::SheetConfig;
use crate::state::SheetState;

/// Derives the backdrop dimmer from a [`SheetState`].
///
/// The scrim holds no state of its own: it is shown exactly when the sheet is
/// expanded or heading there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrimCoupler {
    opacity: f64,
}

impl ScrimCoupler {
    /// Creates a coupler painting at `opacity` when fully shown.
    ///
    /// `opacity` is clamped to `[0, 1]`; a non-finite value paints nothing.
    #[must_use]
    pub fn new(opacity: f64) -> Self {
        let opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { opacity }
    }

    /// Creates a coupler using [`SheetConfig::scrim_opacity`].
    #[must_use]
    pub fn from_config(config: &SheetConfig) -> Self {
        Self::new(config.scrim_opacity)
    }

    /// Returns `true` if the scrim is shown.
    #[must_use]
    pub fn is_visible(&self, sheet: &SheetState) -> bool {
        sheet.target_value() == SheetValue::Expanded
    }

    /// Normalized alpha: `1` when visible, `0` otherwise.
    #[must_use]
    pub fn alpha(&self, sheet: &SheetState) -> f64 {
        if self.is_visible(sheet) { 1.0 } else { 0.0 }
    }

    /// Alpha to paint the scrim with.
    #[must_use]
    pub fn painted_alpha(&self, sheet: &SheetState) -> f64 {
        self.opacity * self.alpha(sheet)
    }

    /// Handles a tap on the scrim, dismissing the sheet while visible.
    ///
    /// Returns `true` if the tap was consumed.
    pub fn tap(&self, sheet: &mut SheetState) -> bool {
        if !self.is_visible(sheet) {
            return false;
        }
        sheet.dismiss();
        true
    }
}

impl Default for ScrimCoupler {
    fn default() -> Self {
        Self::from_config(&SheetConfig::default())
    }
}
