//! Schema-validated resources.

use serde::Serialize;

use crate::error::{SchemaResult, SchemaViolation};
use crate::property::Properties;
use crate::schema::ResourceSchema;

/// A typed resource whose properties satisfy its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    #[serde(rename = "Type")]
    resource_type: String,
    #[serde(rename = "Properties")]
    properties: Properties,
}

impl Resource {
    /// Validate `properties` against `schema`.
    ///
    /// Every required property must be present and every present property
    /// must be declared. Literal values must match their declared kind
    /// exactly, while references and intrinsics are accepted for any kind.
    pub fn build(schema: &ResourceSchema, properties: Properties) -> SchemaResult<Self> {
        let resource_type = schema.resource_type();

        if let Some(missing) = schema
            .required_names()
            .find(|name| !properties.contains_key(*name))
        {
            return Err(SchemaViolation::MissingRequired {
                resource_type: resource_type.to_string(),
                name: missing.to_string(),
            });
        }

        for (name, value) in &properties {
            let expected = schema
                .kind_of(name)
                .ok_or_else(|| SchemaViolation::UnknownProperty {
                    resource_type: resource_type.to_string(),
                    name: name.clone(),
                })?;

            if value.is_symbolic() {
                continue;
            }

            if value.kind() != expected {
                return Err(SchemaViolation::TypeMismatch {
                    resource_type: resource_type.to_string(),
                    name: name.clone(),
                    expected,
                    actual: value.kind(),
                });
            }
        }

        Ok(Self {
            resource_type: resource_type.to_string(),
            properties,
        })
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }
}
