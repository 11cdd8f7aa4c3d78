//! Error types for template assembly.

use std::path::PathBuf;

use thiserror::Error;

use crate::property::PropertyKind;

/// Result type alias for schema validation.
pub type SchemaResult<T> = Result<T, SchemaViolation>;

/// Result type alias for rule set operations.
pub type RuleSetResult<T> = Result<T, RuleSetError>;

/// Result type alias for address block operations.
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for document output.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// A property bag that does not satisfy its resource schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("{resource_type}: missing required property {name}")]
    MissingRequired { resource_type: String, name: String },

    #[error("{resource_type}: property {name} expected {expected}, got {actual}")]
    TypeMismatch {
        resource_type: String,
        name: String,
        expected: PropertyKind,
        actual: PropertyKind,
    },

    #[error("{resource_type}: unknown property {name}")]
    UnknownProperty { resource_type: String, name: String },
}

/// Errors raised while assembling firewall rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("Invalid rule direction: {0} (expected SecurityGroupIngress or SecurityGroupEgress)")]
    InvalidDirection(String),

    #[error("Rule is missing its IP protocol")]
    MissingProtocol,

    #[error("{field} is not allowed on {direction} rules")]
    DirectionViolation { direction: String, field: String },

    #[error("{field} should be {expected}, got {actual}")]
    FieldTypeError {
        field: String,
        expected: PropertyKind,
        actual: PropertyKind,
    },
}

/// Errors raised while parsing or partitioning address blocks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid prefix length /{prefix} for parent block {parent}")]
    InvalidPrefixLength { parent: String, prefix: u8 },

    #[error("No /{prefix} blocks left in {parent}")]
    Exhausted { parent: String, prefix: u8 },
}

/// Errors raised by the resource registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Resource already registered: {0}")]
    DuplicateName(String),

    #[error("Invalid resource name: {0:?}")]
    InvalidName(String),

    #[error("No network configured: register a VPC before allocating subnets")]
    NoNetworkConfigured,

    #[error("Subnet space exhausted: no /{prefix} blocks left in {parent}")]
    SubnetExhausted { parent: String, prefix: u8 },

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("No resource of type {0} has been registered")]
    NotFound(String),

    #[error("Schema violation: {0}")]
    Schema(#[from] SchemaViolation),

    #[error("Rule set error: {0}")]
    Rules(#[from] RuleSetError),

    #[error("Network error: {0}")]
    Network(NetworkError),
}

impl From<NetworkError> for RegistryError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Exhausted { parent, prefix } => {
                RegistryError::SubnetExhausted { parent, prefix }
            }
            other => RegistryError::Network(other),
        }
    }
}

/// Errors raised while loading registry configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors raised while writing a rendered document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
