//! Per-type property schemas.

use std::collections::BTreeMap;

use crate::property::PropertyKind;

/// Name of the property carrying resource tags.
pub const TAGS: &str = "Tags";

/// Required and optional properties accepted by one resource type.
///
/// A property name lives in exactly one of the two partitions. Declaring a
/// name in both is a schema bug and trips a debug assertion; release builds
/// keep the latest declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSchema {
    resource_type: String,
    required: BTreeMap<String, PropertyKind>,
    optional: BTreeMap<String, PropertyKind>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            required: BTreeMap::new(),
            optional: BTreeMap::new(),
        }
    }

    pub fn required(mut self, name: impl Into<String>, kind: PropertyKind) -> Self {
        let name = name.into();
        debug_assert!(
            !self.optional.contains_key(&name),
            "{}: {} declared both optional and required",
            self.resource_type,
            name
        );
        self.optional.remove(&name);
        self.required.insert(name, kind);
        self
    }

    pub fn optional(mut self, name: impl Into<String>, kind: PropertyKind) -> Self {
        let name = name.into();
        debug_assert!(
            !self.required.contains_key(&name),
            "{}: {} declared both required and optional",
            self.resource_type,
            name
        );
        self.required.remove(&name);
        self.optional.insert(name, kind);
        self
    }

    /// Accept a `Tags` list.
    pub fn tagged(self) -> Self {
        self.optional(TAGS, PropertyKind::List)
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Declared kind of a property, from either partition.
    pub fn kind_of(&self, name: &str) -> Option<PropertyKind> {
        self.required
            .get(name)
            .or_else(|| self.optional.get(name))
            .copied()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains_key(name)
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.kind_of(name).is_some()
    }

    pub fn accepts_tags(&self) -> bool {
        self.accepts(TAGS)
    }

    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.required.keys().map(String::as_str)
    }

    pub fn optional_names(&self) -> impl Iterator<Item = &str> {
        self.optional.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_partitions_are_disjoint() {
        let schema = ResourceSchema::new("AWS::EC2::VPC")
            .required("CidrBlock", PropertyKind::String)
            .optional("InstanceTenancy", PropertyKind::String);

        assert!(schema.is_required("CidrBlock"));
        assert!(!schema.is_required("InstanceTenancy"));
        assert_eq!(schema.required_names().collect::<Vec<_>>(), vec!["CidrBlock"]);
        assert_eq!(schema.optional_names().collect::<Vec<_>>(), vec!["InstanceTenancy"]);
        assert_eq!(schema.kind_of("InstanceTenancy"), Some(PropertyKind::String));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "declared both optional and required")]
    fn test_double_declaration_is_rejected() {
        let _ = ResourceSchema::new("AWS::EC2::VPC")
            .optional("CidrBlock", PropertyKind::String)
            .required("CidrBlock", PropertyKind::String);
    }

    #[test]
    fn test_tagged_schema_accepts_tags() {
        let schema = ResourceSchema::new("AWS::EC2::InternetGateway").tagged();
        assert!(schema.accepts_tags());
        assert!(!schema.is_required(TAGS));
        assert!(!ResourceSchema::new("AWS::EC2::Route").accepts_tags());
    }
}
