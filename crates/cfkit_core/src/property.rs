//! Property values carried by resources.
//!
//! A [`PropertyValue`] is either a literal (string, integer, boolean), a
//! symbolic value resolved later by the provisioning service (a reference or
//! an intrinsic function), or a container of further values.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

/// Pseudo parameter holding the name of the stack being created.
pub const STACK_NAME: &str = "AWS::StackName";

/// Pseudo parameter holding the region the stack is created in.
pub const REGION: &str = "AWS::Region";

/// Property bag keyed by property name.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A single resource property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    String(String),
    Int(i64),
    Bool(bool),
    /// Symbolic pointer to another resource or a pseudo parameter.
    Reference(String),
    /// Intrinsic function evaluated by the provisioning service.
    Compound(Intrinsic),
    List(Vec<PropertyValue>),
    Map(BTreeMap<String, PropertyValue>),
}

/// Intrinsic functions understood by the provisioning service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intrinsic {
    Join {
        delimiter: String,
        parts: Vec<PropertyValue>,
    },
    /// Pick the n-th availability zone of the current region.
    SelectAz { index: u32 },
    GetAtt { resource: String, attribute: String },
}

/// The kind of a property value, as declared by a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    String,
    Int,
    Bool,
    List,
    Map,
    Reference,
    Compound,
}

impl PropertyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::String => "string",
            PropertyKind::Int => "int",
            PropertyKind::Bool => "bool",
            PropertyKind::List => "list",
            PropertyKind::Map => "map",
            PropertyKind::Reference => "reference",
            PropertyKind::Compound => "compound",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PropertyValue {
    /// Reference another resource (or pseudo parameter) by name.
    pub fn reference(name: impl Into<String>) -> Self {
        PropertyValue::Reference(name.into())
    }

    /// Join parts with no delimiter.
    pub fn join(parts: Vec<PropertyValue>) -> Self {
        Self::join_with(parts, "")
    }

    pub fn join_with(parts: Vec<PropertyValue>, delimiter: impl Into<String>) -> Self {
        PropertyValue::Compound(Intrinsic::Join {
            delimiter: delimiter.into(),
            parts,
        })
    }

    pub fn select_az(index: u32) -> Self {
        PropertyValue::Compound(Intrinsic::SelectAz { index })
    }

    pub fn get_att(resource: impl Into<String>, attribute: impl Into<String>) -> Self {
        PropertyValue::Compound(Intrinsic::GetAtt {
            resource: resource.into(),
            attribute: attribute.into(),
        })
    }

    /// Build a list of references, one per name.
    pub fn references<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PropertyValue::List(names.into_iter().map(Self::reference).collect())
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::String(_) => PropertyKind::String,
            PropertyValue::Int(_) => PropertyKind::Int,
            PropertyValue::Bool(_) => PropertyKind::Bool,
            PropertyValue::Reference(_) => PropertyKind::Reference,
            PropertyValue::Compound(_) => PropertyKind::Compound,
            PropertyValue::List(_) => PropertyKind::List,
            PropertyValue::Map(_) => PropertyKind::Map,
        }
    }

    /// References and intrinsics are resolved by the provisioning service,
    /// so they satisfy any declared kind.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, PropertyValue::Reference(_) | PropertyValue::Compound(_))
    }

    /// Whether the value carries nothing worth storing.
    pub fn is_empty(&self) -> bool {
        match self {
            PropertyValue::String(s) => s.is_empty(),
            PropertyValue::List(items) => items.is_empty(),
            PropertyValue::Map(entries) => entries.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Convert a JSON value. Nulls are dropped, and an object whose only key
    /// is `Ref` becomes a [`PropertyValue::Reference`].
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Null => None,
            Value::Bool(b) => Some(PropertyValue::Bool(b)),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => PropertyValue::Int(i),
                None => PropertyValue::String(n.to_string()),
            }),
            Value::String(s) => Some(PropertyValue::String(s)),
            Value::Array(items) => Some(PropertyValue::List(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            Value::Object(entries) => {
                if entries.len() == 1 {
                    if let Some(Value::String(target)) = entries.get("Ref") {
                        return Some(PropertyValue::Reference(target.clone()));
                    }
                }
                let map = entries
                    .into_iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|v| (k, v)))
                    .collect();
                Some(PropertyValue::Map(map))
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(i64::from(value))
    }
}

impl From<u16> for PropertyValue {
    fn from(value: u16) -> Self {
        PropertyValue::Int(i64::from(value))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(value: Vec<PropertyValue>) -> Self {
        PropertyValue::List(value)
    }
}

impl From<Properties> for PropertyValue {
    fn from(value: Properties) -> Self {
        PropertyValue::Map(value)
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::String(s) => serializer.serialize_str(s),
            PropertyValue::Int(i) => serializer.serialize_i64(*i),
            PropertyValue::Bool(b) => serializer.serialize_bool(*b),
            PropertyValue::Reference(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", name)?;
                map.end()
            }
            PropertyValue::Compound(intrinsic) => intrinsic.serialize(serializer),
            PropertyValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PropertyValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Intrinsic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Intrinsic::Join { delimiter, parts } => {
                map.serialize_entry("Fn::Join", &(delimiter, parts))?;
            }
            Intrinsic::SelectAz { index } => {
                let zones = serde_json::json!({ "Fn::GetAZs": { "Ref": REGION } });
                map.serialize_entry("Fn::Select", &(index.to_string(), zones))?;
            }
            Intrinsic::GetAtt {
                resource,
                attribute,
            } => {
                map.serialize_entry("Fn::GetAtt", &(resource, attribute))?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_serializes_as_ref() {
        let value = PropertyValue::reference("MyVpc");
        assert_eq!(serde_json::to_value(&value).unwrap(), json!({"Ref": "MyVpc"}));
    }

    #[test]
    fn test_join_serializes_as_two_element_form() {
        let value = PropertyValue::join(vec![
            PropertyValue::reference(STACK_NAME),
            "MySubnet".into(),
        ]);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"Fn::Join": ["", [{"Ref": "AWS::StackName"}, "MySubnet"]]})
        );
    }

    #[test]
    fn test_select_az_serializes_with_region_lookup() {
        let value = PropertyValue::select_az(2);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"Fn::Select": ["2", {"Fn::GetAZs": {"Ref": "AWS::Region"}}]})
        );
    }

    #[test]
    fn test_get_att() {
        let value = PropertyValue::get_att("MyLoadBalancer", "DNSName");
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"Fn::GetAtt": ["MyLoadBalancer", "DNSName"]})
        );
    }

    #[test]
    fn test_symbolic_values() {
        assert!(PropertyValue::reference("A").is_symbolic());
        assert!(PropertyValue::select_az(0).is_symbolic());
        assert!(!PropertyValue::from("literal").is_symbolic());
        assert!(!PropertyValue::List(vec![]).is_symbolic());
    }

    #[test]
    fn test_from_json_drops_nulls_and_detects_refs() {
        let value = PropertyValue::from_json(json!({
            "Name": "httpd",
            "Cpu": 1,
            "Links": null,
            "Role": {"Ref": "MyRole"}
        }))
        .unwrap();

        let PropertyValue::Map(entries) = value else {
            panic!("expected a map");
        };
        assert_eq!(entries.len(), 3);
        assert_eq!(entries["Cpu"], PropertyValue::Int(1));
        assert_eq!(entries["Role"], PropertyValue::reference("MyRole"));
        assert!(PropertyValue::from_json(serde_json::Value::Null).is_none());
    }
}
