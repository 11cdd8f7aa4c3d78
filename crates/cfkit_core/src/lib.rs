//! # cfkit_core
//!
//! Schema-validated resource registry for assembling CloudFormation templates.
//!
//! Resources are registered in creation order through per-type factories.
//! Each registration is validated against its schema, tagged, given an
//! identifier and an output binding, and may depend on earlier resources.
//! The registry finally renders into a template document.
//!
//! ## Features
//!
//! - Required/optional property schemas with reference passthrough
//! - Default tag policy with stack-scoped `Name` tags
//! - Subnet blocks carved sequentially out of the first VPC
//! - Direction-checked security group rule sets
//! - Designer metadata and dependency edges in the rendered document
//!
//! ## Example
//!
//! ```rust,no_run
//! use cfkit_core::{DocumentAssembler, Properties, ResourceRegistry, SubnetArgs};
//! use std::path::Path;
//!
//! let mut registry = ResourceRegistry::default();
//! registry.allocate_vpc("VPC", "10.0.0.0/16", Properties::new()).unwrap();
//! registry.add_subnet("first subnet", SubnetArgs::default()).unwrap();
//! registry.add_internet_gateway("gateway", &[]).unwrap();
//! registry.attach_internet_gateway("attachment", None, None).unwrap();
//!
//! let document = DocumentAssembler::render(&registry);
//! document.write(Path::new("template.json")).unwrap();
//! ```

pub mod builders;
pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod fragments;
pub mod network;
pub mod property;
pub mod registry;
pub mod resource;
pub mod rules;
pub mod schema;
pub mod tags;

pub use builders::{
    describe, AutoScalingArgs, EcsServiceArgs, LaunchConfigurationArgs, LoadBalancerArgs,
    RecordSetArgs, RouteArgs, SubnetArgs,
};
pub use config::RegistryConfig;
pub use document::{Document, DocumentAssembler};
pub use error::{
    ConfigError, ConfigResult, DocumentError, DocumentResult, NetworkError, NetworkResult,
    RegistryError, RegistryResult, RuleSetError, RuleSetResult, SchemaResult, SchemaViolation,
};
pub use fragments::{ContainerDefinition, Listener, UserPolicy};
pub use network::{NetworkBlock, SubnetAllocator};
pub use property::{Intrinsic, Properties, PropertyKind, PropertyValue};
pub use registry::{canonical_name, Identifier, RegisteredResource, Registration, ResourceRegistry};
pub use resource::Resource;
pub use rules::{Direction, Rule, RuleSet};
pub use schema::ResourceSchema;
pub use tags::Tag;
