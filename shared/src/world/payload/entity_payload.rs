use std::collections::BTreeMap;

use crate::{
    world::payload::{entity_data::NetworkedEntityData, error::PayloadError},
    ClientId, ComponentKey, ComponentMap, ComponentValue, NetworkEntitiesError, NetworkId,
    SchemaError, SchemaRegistry, TemplateId,
};

/// An entity update as delivered by the transport.
///
/// Both representations normalize to the same [`NetworkedEntityData`]; code
/// past [`EntityPayload::normalize`] never looks at which one arrived.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityPayload {
    /// Full schema, components keyed by name
    Uncompressed(UncompressedPayload),
    /// Positional layout, components keyed by schema index
    Compressed(CompressedPayload),
}

impl EntityPayload {
    pub fn network_id(&self) -> &NetworkId {
        match self {
            EntityPayload::Uncompressed(payload) => &payload.network_id,
            EntityPayload::Compressed(payload) => &payload.network_id,
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, EntityPayload::Compressed(_))
    }

    pub fn normalize(
        self,
        schemas: &dyn SchemaRegistry,
    ) -> Result<NetworkedEntityData, NetworkEntitiesError> {
        match self {
            EntityPayload::Uncompressed(payload) => Ok(payload.into_data()?),
            EntityPayload::Compressed(payload) => payload.decompress(schemas),
        }
    }
}

impl From<UncompressedPayload> for EntityPayload {
    fn from(payload: UncompressedPayload) -> Self {
        EntityPayload::Uncompressed(payload)
    }
}

impl From<CompressedPayload> for EntityPayload {
    fn from(payload: CompressedPayload) -> Self {
        EntityPayload::Compressed(payload)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UncompressedPayload {
    pub network_id: NetworkId,
    pub owner: ClientId,
    pub parent: Option<NetworkId>,
    pub template: TemplateId,
    pub components: ComponentMap,
}

impl UncompressedPayload {
    pub fn new(
        network_id: impl Into<NetworkId>,
        owner: impl Into<ClientId>,
        template: impl Into<TemplateId>,
    ) -> Self {
        Self {
            network_id: network_id.into(),
            owner: owner.into(),
            parent: None,
            template: template.into(),
            components: ComponentMap::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<NetworkId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_component(
        mut self,
        key: impl Into<ComponentKey>,
        value: impl Into<ComponentValue>,
    ) -> Self {
        self.components.insert(key.into(), value.into());
        self
    }

    pub fn into_data(self) -> Result<NetworkedEntityData, PayloadError> {
        validate_header(&self.network_id, self.parent.as_ref(), &self.template)?;

        Ok(NetworkedEntityData {
            network_id: self.network_id,
            owner: self.owner,
            parent: self.parent,
            template: self.template,
            components: self.components,
            is_full_state: true,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompressedPayload {
    pub network_id: NetworkId,
    pub owner: ClientId,
    pub parent: Option<NetworkId>,
    pub template: TemplateId,
    pub components: BTreeMap<usize, ComponentValue>,
}

impl CompressedPayload {
    pub fn new(
        network_id: impl Into<NetworkId>,
        owner: impl Into<ClientId>,
        template: impl Into<TemplateId>,
    ) -> Self {
        Self {
            network_id: network_id.into(),
            owner: owner.into(),
            parent: None,
            template: template.into(),
            components: BTreeMap::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<NetworkId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_component(mut self, index: usize, value: impl Into<ComponentValue>) -> Self {
        self.components.insert(index, value.into());
        self
    }

    /// Rebuilds the name-keyed component map from the template's schema.
    pub fn decompress(
        self,
        schemas: &dyn SchemaRegistry,
    ) -> Result<NetworkedEntityData, NetworkEntitiesError> {
        validate_header(&self.network_id, self.parent.as_ref(), &self.template)?;

        let schema = schemas.resolve(&self.template)?;
        let mut components = ComponentMap::new();
        for (index, value) in self.components {
            let Some(key) = schema.get(index) else {
                return Err(SchemaError::IndexOutOfRange {
                    template: self.template.to_string(),
                    index,
                    len: schema.len(),
                }
                .into());
            };
            components.insert(key.clone(), value);
        }

        Ok(NetworkedEntityData {
            network_id: self.network_id,
            owner: self.owner,
            parent: self.parent,
            template: self.template,
            components,
            is_full_state: false,
        })
    }
}

fn validate_header(
    network_id: &NetworkId,
    parent: Option<&NetworkId>,
    template: &TemplateId,
) -> Result<(), PayloadError> {
    if network_id.is_empty() {
        return Err(PayloadError::MissingField { field: "networkId" });
    }
    if template.is_empty() {
        return Err(PayloadError::MissingField { field: "template" });
    }
    if let Some(parent) = parent {
        if parent.is_empty() {
            return Err(PayloadError::InvalidField {
                field: "parent",
                reason: "parent id is empty",
            });
        }
        if parent == network_id {
            return Err(PayloadError::InvalidField {
                field: "parent",
                reason: "entity cannot be its own parent",
            });
        }
    }
    Ok(())
}
