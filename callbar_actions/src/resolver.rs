// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use crate::action::{ActionKind, ActionList, CallAction};
use crate::call::{CallState, CallType};
use crate::catalog::{LegacyActions, base_actions_for, legacy_actions_to_list};

/// Host hook that may replace the computed action set.
///
/// The provider receives the list computed from call type, legacy actions and
/// contextual additions. Returning `Some` replaces that list, which may be
/// empty; any `Answer` in it is dropped. Returning `None` keeps it. Providers are called synchronously
/// on every recomputation and should be cheap.
pub trait ButtonsProvider {
    /// Returns a replacement for `current`, or `None` to keep it.
    fn provide(&self, current: &ActionList) -> Option<ActionList>;
}

impl<F> ButtonsProvider for F
where
    F: Fn(&ActionList) -> Option<ActionList>,
{
    fn provide(&self, current: &ActionList) -> Option<ActionList> {
        self(current)
    }
}

/// Combines the independent call inputs into the authoritative action list.
///
/// Every input can change on its own; [`ActionSetResolver::resolve`] always
/// recomputes from scratch so the same inputs give the same list.
///
/// Reaching [`CallState::DisconnectedEnded`] is terminal: the list becomes
/// empty, the provider is dropped, and later state changes, provider installs
/// and contextual additions are ignored until [`ActionSetResolver::start_new_call`].
pub struct ActionSetResolver {
    call_type: CallType,
    call_state: CallState,
    legacy: Option<LegacyActions>,
    contextual: ActionList,
    provider: Option<Box<dyn ButtonsProvider>>,
    ended: bool,
}

impl fmt::Debug for ActionSetResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSetResolver")
            .field("call_type", &self.call_type)
            .field("call_state", &self.call_state)
            .field("legacy", &self.legacy)
            .field("contextual", &self.contextual)
            .field("has_provider", &self.provider.is_some())
            .field("ended", &self.ended)
            .finish()
    }
}

impl ActionSetResolver {
    /// Creates a resolver for a call in the given type and state.
    #[must_use]
    pub fn new(call_type: CallType, call_state: CallState) -> Self {
        let mut resolver = Self {
            call_type,
            call_state: CallState::default(),
            legacy: None,
            contextual: ActionList::new(),
            provider: None,
            ended: false,
        };
        resolver.set_call_state(call_state);
        resolver
    }

    /// The current call type.
    #[must_use]
    pub fn call_type(&self) -> CallType {
        self.call_type
    }

    /// The current call state.
    #[must_use]
    pub fn call_state(&self) -> CallState {
        self.call_state
    }

    /// Returns `true` once the call has ended.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Returns `true` while an incoming call waits for an answer.
    #[must_use]
    pub fn is_ringing(&self) -> bool {
        !self.ended && self.call_state.is_ringing()
    }

    /// Returns `true` if an override provider is installed.
    #[must_use]
    pub fn has_buttons_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Updates the call type.
    pub fn set_call_type(&mut self, call_type: CallType) {
        self.call_type = call_type;
    }

    /// Updates the call state. Ignored once the call has ended.
    pub fn set_call_state(&mut self, call_state: CallState) {
        if self.ended {
            log::debug!("ignoring call state {call_state:?} after the call ended");
            return;
        }
        self.call_state = call_state;
        if call_state.is_terminal() {
            log::debug!("call ended, clearing action set and buttons provider");
            self.ended = true;
            self.provider = None;
        }
    }

    /// Replaces the legacy action set; `None` falls back to the base set.
    ///
    /// A new set replaces the previous one, it is never merged with it.
    pub fn set_legacy_actions(&mut self, legacy: Option<LegacyActions>) {
        self.legacy = legacy;
    }

    /// The legacy action set, if any.
    #[must_use]
    pub fn legacy_actions(&self) -> Option<LegacyActions> {
        self.legacy
    }

    /// Installs or removes the override provider.
    ///
    /// Returns `false` and leaves the resolver untouched once the call ended.
    pub fn set_buttons_provider(&mut self, provider: Option<Box<dyn ButtonsProvider>>) -> bool {
        if self.ended {
            log::debug!("ignoring buttons provider change after the call ended");
            return false;
        }
        self.provider = provider;
        true
    }

    /// Adds an action for a collaboration feature that became active.
    ///
    /// Additions stick for the rest of the call and are appended after the
    /// legacy or base actions. Returns `true` if the action was new.
    pub fn add_contextual(&mut self, kind: ActionKind) -> bool {
        if self.ended {
            return false;
        }
        self.contextual.push_unique(CallAction::new(kind))
    }

    /// Resets the resolver for a new call, clearing the ended latch,
    /// contextual additions and the provider. The legacy set is kept.
    pub fn start_new_call(&mut self, call_type: CallType, call_state: CallState) {
        self.ended = false;
        self.provider = None;
        self.contextual = ActionList::new();
        self.call_type = call_type;
        self.call_state = CallState::default();
        self.set_call_state(call_state);
    }

    /// Computes the action list for the current inputs.
    #[must_use]
    pub fn resolve(&self) -> ActionList {
        if self.ended {
            return ActionList::new();
        }
        let mut actions = match self.legacy {
            Some(legacy) => legacy_actions_to_list(legacy),
            None => base_actions_for(self.call_type),
        };
        for action in &self.contextual {
            actions.push_unique(action.clone());
        }
        let Some(provider) = &self.provider else {
            return actions;
        };
        match provider.provide(&actions) {
            Some(provided) => provided
                .iter()
                .filter(|action| !matches!(action.kind(), ActionKind::Answer))
                .cloned()
                .collect(),
            None => actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn kinds(list: &ActionList) -> Vec<ActionKind> {
        list.iter().map(|a| a.kind().clone()).collect()
    }

    #[test]
    fn contextual_additions_append_after_base() {
        let mut resolver = ActionSetResolver::new(CallType::AudioOnly, CallState::Connected);
        assert!(resolver.add_contextual(ActionKind::OpenWhiteboard));
        assert!(!resolver.add_contextual(ActionKind::OpenWhiteboard));
        let list = resolver.resolve();
        assert_eq!(list.as_slice().last().map(|a| a.kind()), Some(&ActionKind::OpenWhiteboard));
        assert_eq!(list.len(), base_actions_for(CallType::AudioOnly).len() + 1);
    }

    #[test]
    fn contextual_additions_do_not_duplicate_legacy_entries() {
        let mut resolver = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
        resolver.set_legacy_actions(Some(LegacyActions::FILE_SHARE));
        resolver.add_contextual(ActionKind::FileShare);
        assert_eq!(kinds(&resolver.resolve()), [ActionKind::FileShare]);
    }

    #[test]
    fn provider_sees_contextual_additions() {
        let mut resolver = ActionSetResolver::new(CallType::AudioOnly, CallState::Connected);
        resolver.add_contextual(ActionKind::SignDocuments);
        resolver.set_buttons_provider(Some(Box::new(|current: &ActionList| -> Option<ActionList> {
            assert!(current.contains(&ActionKind::SignDocuments.id()));
            None
        })));
        let _ = resolver.resolve();
    }

    #[test]
    fn provider_cannot_store_answer() {
        let mut resolver = ActionSetResolver::new(CallType::AudioVideo, CallState::Ringing);
        resolver.set_buttons_provider(Some(Box::new(|_: &ActionList| -> Option<ActionList> {
            Some(ActionList::from_kinds([ActionKind::Answer, ActionKind::HangUp]))
        })));
        assert_eq!(kinds(&resolver.resolve()), [ActionKind::HangUp]);
    }

    #[test]
    fn start_new_call_clears_the_ended_latch() {
        let mut resolver = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
        resolver.add_contextual(ActionKind::OpenWhiteboard);
        resolver.set_call_state(CallState::DisconnectedEnded);
        assert!(resolver.resolve().is_empty());

        resolver.set_call_state(CallState::Connected);
        assert!(resolver.is_ended());

        resolver.start_new_call(CallType::AudioOnly, CallState::Ringing);
        assert!(!resolver.is_ended());
        assert!(resolver.is_ringing());
        assert_eq!(resolver.resolve(), base_actions_for(CallType::AudioOnly));
    }

    #[test]
    fn ended_at_construction_is_terminal() {
        let mut resolver =
            ActionSetResolver::new(CallType::AudioVideo, CallState::DisconnectedEnded);
        assert!(resolver.is_ended());
        assert!(!resolver.add_contextual(ActionKind::FileShare));
        assert!(resolver.resolve().is_empty());
    }
}
