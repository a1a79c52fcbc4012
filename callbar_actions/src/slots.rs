// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::action::ActionList;
use crate::config::ControlsConfig;

/// A resolved action list split into the bar and the overflow menu.
///
/// `visible` is a prefix and `overflow` the matching suffix of the input, so
/// their lengths add up to the input length and both keep input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotPartition {
    /// Actions placed on the bar.
    pub visible: ActionList,
    /// Actions moved into the "more" menu.
    pub overflow: ActionList,
    /// Slots taken by the answer control; `0` unless ringing.
    pub answer_slots: usize,
    /// Extra slots taken by a widened hang-up control.
    pub hang_up_extra_slots: usize,
}

impl SlotPartition {
    /// Returns `true` if a "more" control is shown.
    ///
    /// The control exists only when something actually overflows.
    #[must_use]
    pub fn shows_more(&self) -> bool {
        !self.overflow.is_empty()
    }

    /// Returns `true` if an answer control is shown.
    #[must_use]
    pub fn shows_answer(&self) -> bool {
        self.answer_slots > 0
    }
}

/// Splits action lists into visible and overflow groups under a slot budget.
///
/// Reservations are made for the answer control while ringing, for the wider
/// hang-up control on large layouts, and for the "more" control when the list
/// does not fit. The "more" reservation is settled by iterating to a fixed
/// point so a slot is never held for a control that ends up not shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotAllocator {
    config: ControlsConfig,
}

impl SlotAllocator {
    /// Creates an allocator using the given budgets.
    #[must_use]
    pub fn new(config: ControlsConfig) -> Self {
        Self { config }
    }

    /// The budgets in use.
    #[must_use]
    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    /// Partitions `actions` using the configured capacity for the layout.
    #[must_use]
    pub fn partition(
        &self,
        actions: &ActionList,
        is_ringing: bool,
        is_large_screen: bool,
    ) -> SlotPartition {
        self.partition_with_capacity(
            actions,
            self.config.capacity(is_large_screen),
            is_ringing,
            is_large_screen,
        )
    }

    /// Partitions `actions` into at most `capacity` slots.
    ///
    /// At least one action stays visible whenever the list is non-empty, even
    /// if the reservations consume the whole capacity.
    #[must_use]
    pub fn partition_with_capacity(
        &self,
        actions: &ActionList,
        capacity: usize,
        is_ringing: bool,
        is_large_screen: bool,
    ) -> SlotPartition {
        let answer_slots = if is_ringing {
            self.config.answer_span(is_large_screen)
        } else {
            0
        };
        // The hang-up item already counts as one slot; on large layouts it
        // is drawn as wide as the answer control.
        let hang_up_extra_slots = if !is_ringing && is_large_screen && actions.has_hang_up() {
            self.config.answer_span(true).saturating_sub(1)
        } else {
            0
        };
        let fixed = answer_slots + hang_up_extra_slots;

        let len = actions.len();
        let mut more = 0;
        let budget = loop {
            let budget = capacity.saturating_sub(fixed + more).max(1);
            let needed = usize::from(len > budget);
            if needed == more {
                break budget;
            }
            more = needed;
        };

        let (visible, overflow) = actions.split_at(budget);
        log::trace!(
            "partitioned {len} actions: {} visible, {} overflow (capacity {capacity}, reserved {})",
            visible.len(),
            overflow.len(),
            fixed + more
        );
        SlotPartition {
            visible,
            overflow,
            answer_slots,
            hang_up_extra_slots,
        }
    }
}
