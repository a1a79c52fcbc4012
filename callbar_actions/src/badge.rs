// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Badge for the "more" control.

use crate::action::CallAction;

/// Sums the notification counts of the notifiable actions in `overflow`.
///
/// Visible actions carry their own badges and must not be passed here.
/// The sum saturates instead of wrapping.
#[must_use]
pub fn aggregate<'a>(overflow: impl IntoIterator<Item = &'a CallAction>) -> u32 {
    overflow
        .into_iter()
        .filter(|action| action.kind().is_notifiable())
        .fold(0_u32, |sum, action| {
            sum.saturating_add(action.notification_count())
        })
}
