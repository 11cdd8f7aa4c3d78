//! The resource registry.
//!
//! A [`ResourceRegistry`] records resources in creation order for one
//! document build. It owns identifier assignment, the default tag policy,
//! dependency edges and the subnet allocator seeded by the first VPC.
//! Creation order drives implicit lookups, so a registry is used by a single
//! call sequence and is not shared across builds.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::catalog;
use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult, SchemaViolation};
use crate::network::{NetworkBlock, SubnetAllocator};
use crate::property::{Properties, PropertyKind, PropertyValue, STACK_NAME};
use crate::resource::Resource;
use crate::schema::{ResourceSchema, TAGS};
use crate::tags::Tag;

/// Dense, strictly increasing token assigned to each resource.
///
/// Displayed as lowercase letters: `a`..`z`, then `aa`, `ab`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(u32);

impl Identifier {
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut n = u64::from(self.0) + 1;
        let mut letters = Vec::new();
        while n > 0 {
            n -= 1;
            letters.push(char::from(b'a' + (n % 26) as u8));
            n /= 26;
        }
        let rendered: String = letters.into_iter().rev().collect();
        f.write_str(&rendered)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Title-case every word and drop whitespace: "my first subnet" becomes
/// "MyFirstSubnet". Any non-letter starts a new word.
pub fn canonical_name(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());
    let mut word_start = true;
    for c in raw.chars() {
        if c.is_alphabetic() {
            if word_start {
                name.extend(c.to_uppercase());
            } else {
                name.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            word_start = true;
            if !c.is_whitespace() {
                name.push(c);
            }
        }
    }
    name
}

/// A request to register one resource.
#[derive(Debug, Clone)]
pub struct Registration {
    name: String,
    schema: ResourceSchema,
    depends_on: Vec<String>,
    properties: Properties,
    description: String,
}

impl Registration {
    pub fn new(name: impl Into<String>, schema: ResourceSchema) -> Self {
        Self {
            name: name.into(),
            schema,
            depends_on: Vec::new(),
            properties: Properties::new(),
            description: String::new(),
        }
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Set a property only when a value is given.
    pub fn maybe_property<V: Into<PropertyValue>>(
        self,
        name: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        match value {
            Some(value) => self.property(name, value),
            None => self,
        }
    }

    /// Merge a property bag; later entries overwrite earlier ones.
    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Append a caller-supplied tag.
    pub fn tag(mut self, tag: Tag) -> Self {
        match self.properties.get_mut(TAGS) {
            Some(PropertyValue::List(tags)) => tags.push(tag.into()),
            _ => {
                self.properties
                    .insert(TAGS.to_string(), PropertyValue::List(vec![tag.into()]));
            }
        }
        self
    }

    pub fn depends_on<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(names.into_iter().map(Into::into));
        self
    }

    /// Description of the output bound to this resource.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A resource recorded by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredResource {
    name: String,
    identifier: Identifier,
    resource: Resource,
    depends_on: Vec<String>,
    description: String,
}

impl RegisteredResource {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resource_type(&self) -> &str {
        self.resource.resource_type()
    }

    pub fn identifier(&self) -> Identifier {
        self.identifier
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// An edge drawn between two resources in the template designer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignerLink {
    pub source: Identifier,
    pub target: Identifier,
    pub z: u32,
}

/// Ordered registry of all resources in one document build.
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    config: RegistryConfig,
    default_tags: Vec<Tag>,
    resources: Vec<RegisteredResource>,
    index: HashMap<String, usize>,
    next_identifier: u32,
    allocator: Option<SubnetAllocator>,
    designer: BTreeMap<Identifier, DesignerLink>,
    z: u32,
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl ResourceRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            default_tags: config.default_tags(),
            config,
            resources: Vec::new(),
            index: HashMap::new(),
            next_identifier: 0,
            allocator: None,
            designer: BTreeMap::new(),
            z: 0,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Validate and record a resource, returning its canonical name.
    ///
    /// Nothing is recorded when validation fails.
    pub fn register(&mut self, registration: Registration) -> RegistryResult<String> {
        let Registration {
            name: raw_name,
            schema,
            depends_on,
            properties,
            description,
        } = registration;

        let name = canonical_name(&raw_name);
        if name.is_empty() {
            return Err(RegistryError::InvalidName(raw_name));
        }
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        let mut edges: Vec<String> = Vec::with_capacity(depends_on.len());
        for dependency in depends_on {
            if !self.index.contains_key(&dependency) {
                return Err(RegistryError::UnknownResource(dependency));
            }
            if !edges.contains(&dependency) {
                edges.push(dependency);
            }
        }

        let properties = self.apply_tag_policy(&name, &schema, properties)?;
        let resource = Resource::build(&schema, properties)?;

        let identifier = Identifier(self.next_identifier);
        self.next_identifier += 1;

        debug!(
            "Registered {} ({}) as {}",
            name,
            resource.resource_type(),
            identifier
        );

        self.index.insert(name.clone(), self.resources.len());
        self.resources.push(RegisteredResource {
            name: name.clone(),
            identifier,
            resource,
            depends_on: edges,
            description,
        });

        Ok(name)
    }

    fn apply_tag_policy(
        &self,
        name: &str,
        schema: &ResourceSchema,
        mut properties: Properties,
    ) -> RegistryResult<Properties> {
        let stack_scoped_name = || {
            Tag::new(
                "Name",
                PropertyValue::join(vec![PropertyValue::reference(STACK_NAME), name.into()]),
            )
        };

        if schema.resource_type() == catalog::AUTO_SCALING_GROUP {
            let tags = vec![stack_scoped_name().propagate_at_launch().into()];
            properties.insert(TAGS.to_string(), PropertyValue::List(tags));
            return Ok(properties);
        }

        if !schema.accepts_tags() {
            return Ok(properties);
        }

        let mut tags: Vec<PropertyValue> = self.default_tags.iter().cloned().map(Into::into).collect();
        match properties.remove(TAGS) {
            None => tags.push(stack_scoped_name().into()),
            Some(PropertyValue::List(caller_tags)) => {
                tags.push(Tag::new("Name", name).into());
                tags.extend(caller_tags);
            }
            Some(other) => {
                return Err(SchemaViolation::TypeMismatch {
                    resource_type: schema.resource_type().to_string(),
                    name: TAGS.to_string(),
                    expected: PropertyKind::List,
                    actual: other.kind(),
                }
                .into());
            }
        }
        properties.insert(TAGS.to_string(), PropertyValue::List(tags));
        Ok(properties)
    }

    /// Register a VPC. The first VPC seeds the subnet allocator with the
    /// configured default prefix; later VPCs leave it untouched.
    ///
    /// A first VPC too small for the default prefix is still registered, but
    /// its allocator starts exhausted so implicit subnets fail with
    /// [`RegistryError::SubnetExhausted`].
    pub fn allocate_vpc(
        &mut self,
        name: &str,
        cidr_block: &str,
        extra: Properties,
    ) -> RegistryResult<String> {
        let block: NetworkBlock = cidr_block.parse()?;
        let seed = match self.allocator {
            Some(_) => None,
            None => {
                let prefix = self.config.default_subnet_prefix;
                Some(SubnetAllocator::new(block, prefix).unwrap_or_else(|err| {
                    warn!("{}; subnets need explicit CIDR blocks", err);
                    SubnetAllocator::exhausted(block, prefix)
                }))
            }
        };

        let registration = Registration::new(name, catalog::vpc_schema())
            .properties(extra)
            .property("CidrBlock", block.to_string());
        let name = self.register(registration)?;

        if let Some(allocator) = seed {
            debug!(
                "Default network {} split into /{} subnets",
                block,
                allocator.prefix()
            );
            self.allocator = Some(allocator);
        }
        Ok(name)
    }

    /// Parent block of the subnet allocator, if a VPC has been registered.
    pub fn default_network(&self) -> Option<NetworkBlock> {
        self.allocator.as_ref().map(SubnetAllocator::parent)
    }

    /// The block the next allocation would return, without consuming it.
    pub fn peek_subnet_block(&self) -> RegistryResult<NetworkBlock> {
        let allocator = self.allocator.as_ref().ok_or(RegistryError::NoNetworkConfigured)?;
        Ok(allocator.peek()?)
    }

    pub fn next_subnet_block(&mut self) -> RegistryResult<NetworkBlock> {
        let allocator = self.allocator.as_mut().ok_or(RegistryError::NoNetworkConfigured)?;
        Ok(allocator.next_block()?)
    }

    /// Name of the earliest resource of `resource_type`.
    pub fn first_of(&self, resource_type: &str) -> Option<String> {
        self.resources
            .iter()
            .find(|r| r.resource_type() == resource_type)
            .map(|r| r.name.clone())
    }

    /// Names of every resource of `resource_type`, in creation order.
    pub fn all_of(&self, resource_type: &str) -> Vec<String> {
        self.resources
            .iter()
            .filter(|r| r.resource_type() == resource_type)
            .map(|r| r.name.clone())
            .collect()
    }

    /// `first_of`, failing with `NotFound` when nothing matches.
    pub fn require_first(&self, resource_type: &str) -> RegistryResult<String> {
        self.first_of(resource_type)
            .ok_or_else(|| RegistryError::NotFound(resource_type.to_string()))
    }

    /// Check that a caller-named resource exists, returning its name.
    pub fn require(&self, name: &str) -> RegistryResult<String> {
        if self.index.contains_key(name) {
            Ok(name.to_string())
        } else {
            Err(RegistryError::UnknownResource(name.to_string()))
        }
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredResource> {
        self.index.get(name).map(|&i| &self.resources[i])
    }

    pub fn identifier_of(&self, name: &str) -> Option<Identifier> {
        self.get(name).map(RegisteredResource::identifier)
    }

    /// Record a designer edge from `source` to `target`, keyed by the
    /// identifier of `owner`.
    pub fn link(&mut self, owner: &str, source: &str, target: &str) -> RegistryResult<()> {
        let lookup = |name: &str| {
            self.identifier_of(name)
                .ok_or_else(|| RegistryError::UnknownResource(name.to_string()))
        };
        let owner_id = lookup(owner)?;
        let source = lookup(source)?;
        let target = lookup(target)?;

        self.z += 1;
        debug!("Designer link {}: {} -> {}", owner_id, source, target);
        self.designer.insert(
            owner_id,
            DesignerLink {
                source,
                target,
                z: self.z,
            },
        );
        Ok(())
    }

    pub fn designer_links(&self) -> &BTreeMap<Identifier, DesignerLink> {
        &self.designer
    }

    /// Every resource in creation order.
    pub fn entries(&self) -> &[RegisteredResource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
