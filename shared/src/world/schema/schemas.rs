use std::collections::{HashMap, HashSet};

use log::info;

use crate::{world::schema::error::SchemaError, ComponentKey, TemplateId};

/// Maps a template to the ordered list of components that may appear in
/// compressed updates for entities built from it.
pub trait SchemaRegistry {
    fn resolve(&self, template: &TemplateId) -> Result<&[ComponentKey], SchemaError>;
}

// Schemas
pub struct Schemas {
    schemas: HashMap<TemplateId, Vec<ComponentKey>>,
    locked: bool,
}

impl Default for Schemas {
    fn default() -> Self {
        Self::new()
    }
}

impl Schemas {
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
            locked: false,
        }
    }

    /// Registers the component layout for a template. Registering the same
    /// template again replaces its layout.
    pub fn add_schema(
        &mut self,
        template: impl Into<TemplateId>,
        components: Vec<ComponentKey>,
    ) -> Result<&mut Self, SchemaError> {
        self.check_lock()?;
        let template = template.into();
        validate_schema(&template, &components)?;

        info!(
            "Schemas: registering template {} with {} components",
            template,
            components.len()
        );
        self.schemas.insert(template, components);
        Ok(self)
    }

    pub fn has_template(&self, template: &TemplateId) -> bool {
        self.schemas.contains_key(template)
    }

    pub fn remove_schema(
        &mut self,
        template: &TemplateId,
    ) -> Result<Option<Vec<ComponentKey>>, SchemaError> {
        self.check_lock()?;
        Ok(self.schemas.remove(template))
    }

    pub fn clear(&mut self) -> Result<(), SchemaError> {
        self.check_lock()?;
        self.schemas.clear();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Freezes the registry; later mutations return [`SchemaError::AlreadyLocked`].
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn check_lock(&self) -> Result<(), SchemaError> {
        if self.locked {
            return Err(SchemaError::AlreadyLocked);
        }
        Ok(())
    }
}

impl SchemaRegistry for Schemas {
    fn resolve(&self, template: &TemplateId) -> Result<&[ComponentKey], SchemaError> {
        self.schemas
            .get(template)
            .map(Vec::as_slice)
            .ok_or_else(|| SchemaError::NotFound {
                template: template.to_string(),
            })
    }
}

fn validate_schema(template: &TemplateId, components: &[ComponentKey]) -> Result<(), SchemaError> {
    if template.is_empty() {
        return Err(SchemaError::InvalidSchema {
            template: template.to_string(),
            reason: "template id is empty",
        });
    }

    let mut seen = HashSet::new();
    for component in components {
        if component.component().is_empty() {
            return Err(SchemaError::InvalidSchema {
                template: template.to_string(),
                reason: "component name is empty",
            });
        }
        if !seen.insert(component) {
            return Err(SchemaError::InvalidSchema {
                template: template.to_string(),
                reason: "component listed more than once",
            });
        }
    }

    Ok(())
}
