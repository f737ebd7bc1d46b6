use std::{collections::BTreeMap, fmt};

/// Serialized value of a single component, as carried on the wire.
pub type ComponentValue = serde_json::Value;

/// Component key -> serialized value. This is the canonical shape every
/// update is normalized to, whatever its wire representation.
pub type ComponentMap = BTreeMap<ComponentKey, ComponentValue>;

const CHILD_DELIMITER: &str = "---";

/// Names a synced component, either on the networked node itself or on a
/// child node addressed by a selector.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKey {
    Root(String),
    Child { selector: String, component: String },
}

impl ComponentKey {
    pub fn root(component: impl Into<String>) -> Self {
        ComponentKey::Root(component.into())
    }

    pub fn child(selector: impl Into<String>, component: impl Into<String>) -> Self {
        ComponentKey::Child {
            selector: selector.into(),
            component: component.into(),
        }
    }

    /// Parses the flat key used in uncompressed payloads, where child
    /// components are written as `selector---component`.
    pub fn parse(key: &str) -> Self {
        match key.split_once(CHILD_DELIMITER) {
            Some((selector, component)) if !selector.is_empty() && !component.is_empty() => {
                ComponentKey::child(selector, component)
            }
            _ => ComponentKey::root(key),
        }
    }

    pub fn component(&self) -> &str {
        match self {
            ComponentKey::Root(component) => component,
            ComponentKey::Child { component, .. } => component,
        }
    }

    pub fn selector(&self) -> Option<&str> {
        match self {
            ComponentKey::Root(_) => None,
            ComponentKey::Child { selector, .. } => Some(selector),
        }
    }
}

impl From<&str> for ComponentKey {
    fn from(value: &str) -> Self {
        ComponentKey::parse(value)
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKey::Root(component) => f.write_str(component),
            ComponentKey::Child {
                selector,
                component,
            } => write!(f, "{}{}{}", selector, CHILD_DELIMITER, component),
        }
    }
}
