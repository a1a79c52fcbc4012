// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot budgets and call configuration import/export.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::action::CallAction;
use crate::catalog::{LegacyAction, LegacyActions, kind_to_legacy};

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A slot capacity or answer span was zero.
    #[error("{field} must be at least 1")]
    InvalidCapacity {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The document could not be parsed or written.
    #[error("invalid configuration document: {0}")]
    Json(serde_json::Error),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Slot budgets for the control bar.
///
/// Every field has a default, so partial documents are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Slots available on compact layouts.
    pub compact_capacity: usize,
    /// Slots available on large or wide layouts.
    pub large_capacity: usize,
    /// Slots taken by the answer control on compact layouts.
    pub answer_span_compact: usize,
    /// Slots taken by the answer control on large layouts.
    pub answer_span_large: usize,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            compact_capacity: 5,
            large_capacity: 8,
            answer_span_compact: 1,
            answer_span_large: 2,
        }
    }
}

impl ControlsConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Checks every budget is usable.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let fields = [
            ("compact_capacity", self.compact_capacity),
            ("large_capacity", self.large_capacity),
            ("answer_span_compact", self.answer_span_compact),
            ("answer_span_large", self.answer_span_large),
        ];
        for (field, value) in fields {
            if value == 0 {
                log::warn!("rejecting controls configuration: {field} is zero");
                return Err(ConfigError::InvalidCapacity { field });
            }
        }
        Ok(self)
    }

    /// Slot capacity for the given layout.
    #[must_use]
    pub fn capacity(&self, is_large_screen: bool) -> usize {
        if is_large_screen {
            self.large_capacity
        } else {
            self.compact_capacity
        }
    }

    /// Slots taken by the answer control for the given layout.
    #[must_use]
    pub fn answer_span(&self, is_large_screen: bool) -> usize {
        if is_large_screen {
            self.answer_span_large
        } else {
            self.answer_span_compact
        }
    }
}

/// Options stored next to the action set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallOptions {
    /// Whether the call is recorded.
    pub recording_enabled: bool,
    /// Whether a feedback form is shown after the call.
    pub feedback_enabled: bool,
    /// Whether the rear camera is used by default.
    pub back_camera_as_default: bool,
}

/// A storable call configuration: legacy action tokens plus options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallConfiguration {
    /// Enabled actions, stored as a list of tokens.
    #[serde(with = "token_list")]
    pub actions: LegacyActions,
    /// Call options.
    pub options: CallOptions,
}

impl Default for CallConfiguration {
    fn default() -> Self {
        Self {
            actions: LegacyActions::DEFAULT,
            options: CallOptions::default(),
        }
    }
}

impl CallConfiguration {
    /// Exports the legacy-expressible part of an action list.
    ///
    /// Actions without a legacy token are skipped.
    #[must_use]
    pub fn from_actions<'a>(
        actions: impl IntoIterator<Item = &'a CallAction>,
        options: CallOptions,
    ) -> Self {
        let actions = actions
            .into_iter()
            .filter_map(|action| kind_to_legacy(action.kind()))
            .collect();
        Self { actions, options }
    }

    /// The configured actions, ready for the resolver.
    #[must_use]
    pub fn legacy_actions(&self) -> LegacyActions {
        self.actions
    }

    /// Encodes as JSON.
    pub fn encode(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes from JSON, dropping unknown action tokens.
    pub fn decode(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

mod token_list {
    use super::*;

    pub(super) fn serialize<S: Serializer>(
        actions: &LegacyActions,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(actions.actions().map(LegacyAction::token))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<LegacyActions, D::Error> {
        let tokens = Vec::<String>::deserialize(deserializer)?;
        Ok(LegacyActions::from_tokens(tokens.iter().map(String::as_str)))
    }
}
