//! Registry configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::property::{PropertyValue, STACK_NAME};
use crate::tags::Tag;

/// Settings applied to every document a registry builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Template format version written at the top of the document.
    pub format_version: String,
    pub description: String,
    /// Prefix length of subnets carved from the first VPC.
    pub default_subnet_prefix: u8,
    /// Key of the tag pointing at the stack name, if any.
    pub application_tag: Option<String>,
    /// Literal tags added to every taggable resource.
    pub extra_tags: BTreeMap<String, String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            format_version: "2010-09-09".to_string(),
            description: "A default environment".to_string(),
            default_subnet_prefix: 24,
            application_tag: Some("Application".to_string()),
            extra_tags: BTreeMap::new(),
        }
    }
}

impl RegistryConfig {
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_format_version(mut self, version: impl Into<String>) -> Self {
        self.format_version = version.into();
        self
    }

    pub fn with_subnet_prefix(mut self, prefix: u8) -> Self {
        self.default_subnet_prefix = prefix;
        self
    }

    pub fn with_application_tag(mut self, key: Option<String>) -> Self {
        self.application_tag = key;
        self
    }

    pub fn with_extra_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_tags.insert(key.into(), value.into());
        self
    }

    /// Tags every taggable resource starts with.
    pub fn default_tags(&self) -> Vec<Tag> {
        let application = self
            .application_tag
            .iter()
            .map(|key| Tag::new(key.clone(), PropertyValue::reference(STACK_NAME)));
        let extra = self
            .extra_tags
            .iter()
            .map(|(key, value)| Tag::new(key.clone(), value.as_str()));
        application.chain(extra).collect()
    }

    /// Load configuration from a YAML or TOML file, chosen by extension.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let config: RegistryConfig = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&fs::read_to_string(path)?)?,
            Some("toml") => toml::from_str(&fs::read_to_string(path)?)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!("Loaded registry configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration as YAML.
    pub fn to_file(&self, path: &Path) -> ConfigResult<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
