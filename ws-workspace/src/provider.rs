use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A resolved provider option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionValue {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,

    /// The user set this value explicitly rather than taking the provider default
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub user_provided: bool,

    /// When the value was resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled: Option<DateTime<Utc>>,
}

impl OptionValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn user_provided(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            user_provided: true,
            filled: None,
        }
    }
}

/// Agent settings supplied by the provider.
///
/// Opaque to the workspace record: the well-known keys are typed for
/// convenience and every other key is carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderAgentConfig {
    /// Path of the agent binary on the remote side
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,

    /// Directory the agent keeps its data in
    #[serde(skip_serializing_if = "String::is_empty")]
    pub data_path: String,

    #[serde(rename = "downloadURL", skip_serializing_if = "String::is_empty")]
    pub download_url: String,

    /// Inactivity timeout, provider specific format (e.g. `10m`)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timeout: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub driver: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ProviderAgentConfig {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Which provider manages a workspace and how it was parameterised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceProviderConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Options keyed by option name; keys are unique and serialised in sorted order
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, OptionValue>,

    #[serde(skip_serializing_if = "ProviderAgentConfig::is_empty")]
    pub agent: ProviderAgentConfig,
}

impl WorkspaceProviderConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.options.is_empty() && self.agent.is_empty()
    }

    /// Value of an option, if set.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(|option| option.value.as_str())
    }
}
