use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier correlating the same logical entity across every client.
///
/// The wire carries either a string or a number; numbers are kept as their
/// decimal string so both forms address the same entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkId(String);

impl NetworkId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for NetworkId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NetworkId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for NetworkId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a connected client, used as the owner of the entities it
/// created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ClientId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to the node-construction blueprint an entity is built from,
/// e.g. `#avatar-template`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TemplateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TemplateId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag the transport attaches to every entity message.
///
/// Only informational at this layer: every update kind goes through the same
/// dispatch path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Update,
    UpdateMulti,
    Remove,
    Custom(String),
}

impl DataType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "u" => DataType::Update,
            "um" => DataType::UpdateMulti,
            "r" => DataType::Remove,
            other => DataType::Custom(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            DataType::Update => "u",
            DataType::UpdateMulti => "um",
            DataType::Remove => "r",
            DataType::Custom(tag) => tag,
        }
    }
}
