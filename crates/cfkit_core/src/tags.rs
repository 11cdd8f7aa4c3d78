//! Resource tags.

use crate::property::{Properties, PropertyValue};

/// A key/value annotation attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: PropertyValue,
    /// Only meaningful on auto scaling groups.
    pub propagate_at_launch: Option<bool>,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            propagate_at_launch: None,
        }
    }

    pub fn propagate_at_launch(mut self) -> Self {
        self.propagate_at_launch = Some(true);
        self
    }
}

impl From<Tag> for PropertyValue {
    fn from(tag: Tag) -> Self {
        let mut entries = Properties::new();
        entries.insert("Key".to_string(), PropertyValue::String(tag.key));
        entries.insert("Value".to_string(), tag.value);
        if let Some(propagate) = tag.propagate_at_launch {
            entries.insert("PropagateAtLaunch".to_string(), PropertyValue::Bool(propagate));
        }
        PropertyValue::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_serialization() {
        let tag = Tag::new("Name", "web").propagate_at_launch();
        assert_eq!(
            serde_json::to_value(PropertyValue::from(tag)).unwrap(),
            serde_json::json!({"Key": "Name", "Value": "web", "PropagateAtLaunch": true})
        );
    }
}
