// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;

use crate::action::{ActionKind, ActionList};
use crate::badge;
use crate::call::{CallState, CallType};
use crate::catalog::LegacyActions;
use crate::config::ControlsConfig;
use crate::eligibility::{self, CallCapabilities, NotificationCounts, NotificationSource};
use crate::resolver::{ActionSetResolver, ButtonsProvider};
use crate::slots::{SlotAllocator, SlotPartition};

/// One coherent result of the action pipeline.
///
/// A snapshot is only ever replaced as a whole, so `actions`, `partition`
/// and `more_badge` always describe the same inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlsSnapshot {
    /// Resolved actions with presentation flags applied.
    pub actions: ActionList,
    /// The actions split into bar and overflow menu.
    pub partition: SlotPartition,
    /// Badge of the "more" control.
    pub more_badge: u32,
    /// Whether the answer control is shown.
    pub is_ringing: bool,
    /// Bumped every time the snapshot content changes.
    pub revision: u64,
}

/// Per-call coordinator owning every input of the action pipeline.
///
/// Each setter reruns resolve, eligibility, allocation and aggregation in one
/// pass and publishes a new [`ControlsSnapshot`] when the result differs from
/// the previous one. Readers only ever see complete snapshots.
///
/// ```rust
/// use callbar_actions::{CallControls, CallState, CallType, ControlsConfig};
///
/// let mut controls =
///     CallControls::new(ControlsConfig::default(), CallType::AudioVideo, CallState::Connected);
/// assert_eq!(controls.snapshot().actions.len(), 10);
/// assert_eq!(controls.snapshot().partition.visible.len(), 4);
///
/// controls.set_call_state(CallState::DisconnectedEnded);
/// assert!(controls.snapshot().actions.is_empty());
/// ```
#[derive(Debug)]
pub struct CallControls {
    resolver: ActionSetResolver,
    allocator: SlotAllocator,
    capabilities: CallCapabilities,
    counts: NotificationCounts,
    is_large_screen: bool,
    snapshot: ControlsSnapshot,
}

impl CallControls {
    /// Creates the coordinator and computes the first snapshot.
    #[must_use]
    pub fn new(config: ControlsConfig, call_type: CallType, call_state: CallState) -> Self {
        let mut controls = Self {
            resolver: ActionSetResolver::new(call_type, call_state),
            allocator: SlotAllocator::new(config),
            capabilities: CallCapabilities::default(),
            counts: NotificationCounts::default(),
            is_large_screen: false,
            snapshot: ControlsSnapshot::default(),
        };
        controls.recompute();
        controls
    }

    /// The latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &ControlsSnapshot {
        &self.snapshot
    }

    /// The latest snapshot revision.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.snapshot.revision
    }

    /// Read access to the resolver inputs.
    #[must_use]
    pub fn resolver(&self) -> &ActionSetResolver {
        &self.resolver
    }

    /// Updates the call type.
    pub fn set_call_type(&mut self, call_type: CallType) {
        self.resolver.set_call_type(call_type);
        self.recompute();
    }

    /// Updates the call state.
    pub fn set_call_state(&mut self, call_state: CallState) {
        self.resolver.set_call_state(call_state);
        self.recompute();
    }

    /// Replaces the legacy action set.
    pub fn set_legacy_actions(&mut self, legacy: Option<LegacyActions>) {
        self.resolver.set_legacy_actions(legacy);
        self.recompute();
    }

    /// Installs or removes the override provider.
    ///
    /// Returns `false` once the call has ended; the snapshot is untouched.
    pub fn set_buttons_provider(&mut self, provider: Option<Box<dyn ButtonsProvider>>) -> bool {
        let accepted = self.resolver.set_buttons_provider(provider);
        if accepted {
            self.recompute();
        }
        accepted
    }

    /// Adds an action for a collaboration feature that became active.
    pub fn add_contextual(&mut self, kind: ActionKind) {
        if self.resolver.add_contextual(kind) {
            self.recompute();
        }
    }

    /// Updates the device and participant capabilities.
    pub fn set_capabilities(&mut self, capabilities: CallCapabilities) {
        self.capabilities = capabilities;
        self.recompute();
    }

    /// Updates one notification count.
    pub fn set_notification_count(&mut self, source: NotificationSource, count: u32) {
        self.counts.set(source, count);
        self.recompute();
    }

    /// Switches between the compact and the large slot budget.
    pub fn set_large_screen(&mut self, is_large_screen: bool) {
        self.is_large_screen = is_large_screen;
        self.recompute();
    }

    /// Resets every per-call input for a new call.
    ///
    /// Legacy actions, capabilities, layout and budgets are kept; counts,
    /// contextual additions and the provider are cleared.
    pub fn start_new_call(&mut self, call_type: CallType, call_state: CallState) {
        self.resolver.start_new_call(call_type, call_state);
        self.counts = NotificationCounts::default();
        self.recompute();
    }

    /// Asks the pipeline to run again, for providers whose answer changed.
    pub fn refresh(&mut self) {
        self.recompute();
    }

    fn recompute(&mut self) {
        let is_ringing = self.resolver.is_ringing();
        let mut actions = self.resolver.resolve();
        eligibility::apply(
            &mut actions,
            self.resolver.call_type(),
            self.resolver.call_state(),
            &self.capabilities,
            &self.counts,
        );
        let partition = self
            .allocator
            .partition(&actions, is_ringing, self.is_large_screen);
        let more_badge = badge::aggregate(&partition.overflow);

        let unchanged = self.snapshot.actions == actions
            && self.snapshot.partition == partition
            && self.snapshot.more_badge == more_badge
            && self.snapshot.is_ringing == is_ringing;
        if unchanged {
            return;
        }
        let revision = self.snapshot.revision + 1;
        log::debug!(
            "controls revision {revision}: {} actions, {} visible, {} overflow, badge {more_badge}",
            actions.len(),
            partition.visible.len(),
            partition.overflow.len()
        );
        self.snapshot = ControlsSnapshot {
            actions,
            partition,
            more_badge,
            is_ringing,
            revision,
        };
    }
}
