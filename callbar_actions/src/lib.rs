// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=callbar_actions --heading-base-level=0

//! Callbar Actions: derive the controls of an in-call control bar.
//!
//! This crate decides, at any instant, which call actions exist, in what
//! order, which of them fit on the bar and which move into a "more" menu, and
//! what badge that menu carries. It knows nothing about rendering; hosts feed
//! it the call's inputs and read back plain values.
//!
//! The pipeline has four stages, each usable on its own:
//!
//! - [`catalog`]: static tables. Legacy capability tokens, their translation
//!   into [`ActionKind`]s, and the base action set per [`CallType`].
//! - [`ActionSetResolver`]: combines call type, call state, an optional legacy
//!   token set, contextual additions and an optional override provider into
//!   the authoritative [`ActionList`].
//! - [`SlotAllocator`]: splits a list into `visible` and `overflow` under a slot
//!   budget, reserving room for the answer, wide hang-up and "more" controls.
//! - [`badge::aggregate`]: sums notification counts over the overflow group.
//!
//! [`eligibility`] stamps the per-action `enabled`/`toggled` flags and counts
//! from a host-supplied [`CallCapabilities`] value, and [`CallControls`] runs
//! all stages as one atomic recomputation per input change.
//!
//! ## Minimal example
//!
//! ```rust
//! use callbar_actions::{
//!     ActionKind, ActionSetResolver, CallState, CallType, LegacyActions, SlotAllocator,
//! };
//!
//! let mut resolver = ActionSetResolver::new(CallType::AudioOnly, CallState::Connected);
//! let actions = resolver.resolve();
//! assert_eq!(actions.len(), 6);
//!
//! // A legacy token set replaces the base set instead of extending it.
//! resolver.set_legacy_actions(Some(LegacyActions::HANG_UP));
//! let actions = resolver.resolve();
//! assert_eq!(actions.len(), 1);
//! assert_eq!(actions.as_slice()[0].kind(), &ActionKind::HangUp);
//!
//! // Seven actions on a five-slot bar: four stay, three overflow.
//! let resolver = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
//! let seven = resolver.resolve().split_at(7).0;
//! let partition = SlotAllocator::default().partition(&seven, false, false);
//! assert_eq!(partition.visible.len(), 4);
//! assert_eq!(partition.overflow.len(), 3);
//! ```
//!
//! ## Ending a call
//!
//! Once the resolver sees [`CallState::DisconnectedEnded`] it latches: the list
//! is empty, the override provider is dropped, and nothing but
//! [`ActionSetResolver::start_new_call`] brings actions back.
//!
//! ```rust
//! use callbar_actions::{ActionList, ActionSetResolver, CallState, CallType};
//!
//! let mut resolver = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
//! resolver.set_call_state(CallState::DisconnectedEnded);
//! assert!(resolver.resolve().is_empty());
//!
//! let installed = resolver.set_buttons_provider(Some(Box::new(
//!     |current: &ActionList| -> Option<ActionList> { Some(current.clone()) },
//! )));
//! assert!(!installed);
//!
//! resolver.start_new_call(CallType::AudioVideo, CallState::Connecting);
//! assert!(!resolver.resolve().is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod action;
pub mod badge;
mod call;
pub mod catalog;
mod config;
mod controls;
pub mod eligibility;
mod resolver;
mod slots;

pub use action::{
    ActionId, ActionKind, ActionList, AudioRoute, CallAction, CustomAction, CustomAppearance,
    INLINE_ACTIONS, ScreenShareMode,
};
pub use call::{CallState, CallType};
pub use catalog::{LegacyAction, LegacyActions};
pub use config::{CallConfiguration, CallOptions, ConfigError, ControlsConfig};
pub use controls::{CallControls, ControlsSnapshot};
pub use eligibility::{CallCapabilities, NotificationCounts, NotificationSource};
pub use resolver::{ActionSetResolver, ButtonsProvider};
pub use slots::{SlotAllocator, SlotPartition};
