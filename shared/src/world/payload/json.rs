//! Reading entity payloads from their JSON wire form.
//!
//! * An array is a compressed update:
//!   `[flag, networkId, owner, parent, template, { "index": value, .. }]`
//! * An object is an uncompressed update keyed by field name, with
//!   `components` keyed by component name.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{
    world::payload::{
        entity_payload::{CompressedPayload, EntityPayload, UncompressedPayload},
        error::PayloadError,
        removal_payload::RemovalPayload,
    },
    ClientId, ComponentKey, ComponentMap, NetworkId, TemplateId,
};

const COMPRESSED_LEN: usize = 6;

impl EntityPayload {
    pub fn from_json(value: &Value) -> Result<Self, PayloadError> {
        match value {
            Value::Array(items) => Ok(EntityPayload::Compressed(read_compressed(items)?)),
            Value::Object(fields) => Ok(EntityPayload::Uncompressed(read_uncompressed(fields)?)),
            _ => Err(PayloadError::NotAnObjectOrArray),
        }
    }
}

impl RemovalPayload {
    pub fn from_json(value: &Value) -> Result<Self, PayloadError> {
        let Value::Object(fields) = value else {
            return Err(PayloadError::NotAnObjectOrArray);
        };
        let network_id = read_network_id(fields.get("networkId"), "networkId")?;
        Ok(RemovalPayload { network_id })
    }
}

fn read_compressed(items: &[Value]) -> Result<CompressedPayload, PayloadError> {
    if items.len() != COMPRESSED_LEN {
        return Err(PayloadError::WrongLength {
            expected: COMPRESSED_LEN,
            actual: items.len(),
        });
    }

    // items[0] is the representation flag, already implied by the array form
    let network_id = read_network_id(items.get(1), "networkId")?;
    let owner = ClientId::from(read_string(items.get(2), "owner")?);
    let parent = read_optional_network_id(items.get(3), "parent")?;
    let template = TemplateId::from(read_string(items.get(4), "template")?);

    let mut components = BTreeMap::new();
    match items.get(5) {
        Some(Value::Object(indexed)) => {
            for (key, value) in indexed {
                let index = key
                    .parse::<usize>()
                    .map_err(|_| PayloadError::InvalidComponentIndex { key: key.clone() })?;
                components.insert(index, value.clone());
            }
        }
        Some(Value::Null) | None => {}
        Some(_) => {
            return Err(PayloadError::InvalidField {
                field: "components",
                reason: "expected an object keyed by schema index",
            })
        }
    }

    Ok(CompressedPayload {
        network_id,
        owner,
        parent,
        template,
        components,
    })
}

fn read_uncompressed(fields: &Map<String, Value>) -> Result<UncompressedPayload, PayloadError> {
    let network_id = read_network_id(fields.get("networkId"), "networkId")?;
    let owner = ClientId::from(read_string(fields.get("owner"), "owner")?);
    let parent = read_optional_network_id(fields.get("parent"), "parent")?;
    let template = TemplateId::from(read_string(fields.get("template"), "template")?);

    let mut components = ComponentMap::new();
    match fields.get("components") {
        Some(Value::Object(named)) => {
            for (key, value) in named {
                components.insert(ComponentKey::parse(key), value.clone());
            }
        }
        Some(Value::Null) | None => {}
        Some(_) => {
            return Err(PayloadError::InvalidField {
                field: "components",
                reason: "expected an object keyed by component name",
            })
        }
    }

    Ok(UncompressedPayload {
        network_id,
        owner,
        parent,
        template,
        components,
    })
}

fn read_network_id(value: Option<&Value>, field: &'static str) -> Result<NetworkId, PayloadError> {
    read_optional_network_id(value, field)?.ok_or(PayloadError::MissingField { field })
}

fn read_optional_network_id(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Option<NetworkId>, PayloadError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) if id.is_empty() => Ok(None),
        Some(Value::String(id)) => Ok(Some(NetworkId::from(id.as_str()))),
        Some(Value::Number(id)) => Ok(Some(NetworkId::from(id.to_string()))),
        Some(_) => Err(PayloadError::InvalidField {
            field,
            reason: "expected a string or a number",
        }),
    }
}

fn read_string(value: Option<&Value>, field: &'static str) -> Result<String, PayloadError> {
    match value {
        None | Some(Value::Null) => Err(PayloadError::MissingField { field }),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(PayloadError::InvalidField {
            field,
            reason: "expected a string",
        }),
    }
}
