//! Rendering a registry into the final template document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Serialize, Serializer};
use tracing::info;

use crate::error::DocumentResult;
use crate::property::{Properties, PropertyValue};
use crate::registry::{Identifier, ResourceRegistry};

/// Metadata namespace read by the template designer.
pub const DESIGNER_NAMESPACE: &str = "AWS::CloudFormation::Designer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignerId {
    pub id: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceMetadata {
    #[serde(rename = "AWS::CloudFormation::Designer")]
    pub designer: DesignerId,
}

/// One entry of the `Resources` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntry {
    #[serde(rename = "Type")]
    pub resource_type: String,
    #[serde(rename = "Properties")]
    pub properties: Properties,
    #[serde(rename = "DependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(rename = "Metadata")]
    pub metadata: ResourceMetadata,
}

/// One entry of the `Outputs` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputEntry {
    #[serde(rename = "Value")]
    pub value: PropertyValue,
    #[serde(rename = "Description")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignerEdge {
    pub source: DesignerId,
    pub target: DesignerId,
    pub z: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
    #[serde(rename = "AWS::CloudFormation::Designer")]
    pub designer: BTreeMap<Identifier, DesignerEdge>,
}

/// A rendered template. Resources and outputs keep creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Resources", serialize_with = "ordered_map")]
    pub resources: Vec<(String, ResourceEntry)>,
    #[serde(rename = "Outputs", serialize_with = "ordered_map")]
    pub outputs: Vec<(String, OutputEntry)>,
    #[serde(rename = "Metadata")]
    pub metadata: DocumentMetadata,
}

fn ordered_map<S, V>(entries: &[(String, V)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    serializer.collect_map(entries.iter().map(|(k, v)| (k, v)))
}

impl Document {
    pub fn resource(&self, name: &str) -> Option<&ResourceEntry> {
        self.resources.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    pub fn output(&self, name: &str) -> Option<&OutputEntry> {
        self.outputs.iter().find(|(n, _)| n == name).map(|(_, o)| o)
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the compact JSON form to `path`.
    pub fn write(&self, path: &Path) -> DocumentResult<()> {
        let content = self.to_json()?;
        fs::write(path, content)?;
        info!("Wrote template to {}", path.display());
        Ok(())
    }
}

/// Folds registry state into a [`Document`].
pub struct DocumentAssembler;

impl DocumentAssembler {
    pub fn render(registry: &ResourceRegistry) -> Document {
        let config = registry.config();

        let mut resources = Vec::with_capacity(registry.len());
        let mut outputs = Vec::with_capacity(registry.len());
        for entry in registry.entries() {
            resources.push((
                entry.name().to_string(),
                ResourceEntry {
                    resource_type: entry.resource_type().to_string(),
                    properties: entry.resource().properties().clone(),
                    depends_on: entry.depends_on().to_vec(),
                    metadata: ResourceMetadata {
                        designer: DesignerId {
                            id: entry.identifier(),
                        },
                    },
                },
            ));
            outputs.push((
                entry.name().to_string(),
                OutputEntry {
                    value: PropertyValue::reference(entry.name()),
                    description: entry.description().to_string(),
                },
            ));
        }

        let designer = registry
            .designer_links()
            .iter()
            .map(|(owner, link)| {
                (
                    *owner,
                    DesignerEdge {
                        source: DesignerId { id: link.source },
                        target: DesignerId { id: link.target },
                        z: link.z,
                    },
                )
            })
            .collect();

        info!(
            "Rendered template with {} resources and {} designer links",
            resources.len(),
            registry.designer_links().len()
        );

        Document {
            format_version: config.format_version.clone(),
            description: config.description.clone(),
            resources,
            outputs,
            metadata: DocumentMetadata { designer },
        }
    }
}
