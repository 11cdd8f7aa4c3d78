//! Security group ingress and egress rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RuleSetError, RuleSetResult};
use crate::property::{Properties, PropertyKind, PropertyValue};

/// Traffic direction of a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "SecurityGroupIngress")]
    Ingress,
    #[serde(rename = "SecurityGroupEgress")]
    Egress,
}

impl Direction {
    /// Property name under which the rules are attached to a security group.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ingress => "SecurityGroupIngress",
            Direction::Egress => "SecurityGroupEgress",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = RuleSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SecurityGroupIngress" => Ok(Direction::Ingress),
            "SecurityGroupEgress" => Ok(Direction::Egress),
            other => Err(RuleSetError::InvalidDirection(other.to_string())),
        }
    }
}

const IP_PROTOCOL: &str = "IpProtocol";
const CIDR_IP: &str = "CidrIp";
const FROM_PORT: &str = "FromPort";
const TO_PORT: &str = "ToPort";
const SOURCE_GROUP_ID: &str = "SourceSecurityGroupId";
const SOURCE_GROUP_NAME: &str = "SourceSecurityGroupName";
const DESTINATION_GROUP_ID: &str = "DestinationSecurityGroupId";

/// A candidate rule. Optional fields left unset are omitted from the stored
/// rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub protocol: PropertyValue,
    pub cidr: Option<PropertyValue>,
    pub from_port: Option<PropertyValue>,
    pub to_port: Option<PropertyValue>,
    pub source_group_id: Option<PropertyValue>,
    pub source_group_name: Option<PropertyValue>,
    pub destination_group_id: Option<PropertyValue>,
}

impl Rule {
    /// Start a rule for an IP protocol (`tcp`, `udp`, `icmp`, `-1` for all).
    pub fn new(protocol: impl Into<PropertyValue>) -> Self {
        Self {
            protocol: protocol.into(),
            cidr: None,
            from_port: None,
            to_port: None,
            source_group_id: None,
            source_group_name: None,
            destination_group_id: None,
        }
    }

    pub fn cidr(mut self, cidr: impl Into<PropertyValue>) -> Self {
        self.cidr = Some(cidr.into());
        self
    }

    pub fn from_port(mut self, port: impl Into<PropertyValue>) -> Self {
        self.from_port = Some(port.into());
        self
    }

    pub fn to_port(mut self, port: impl Into<PropertyValue>) -> Self {
        self.to_port = Some(port.into());
        self
    }

    /// Set both ends of the port range.
    pub fn ports(self, from: u16, to: u16) -> Self {
        self.from_port(from).to_port(to)
    }

    pub fn source_group_id(mut self, id: impl Into<PropertyValue>) -> Self {
        self.source_group_id = Some(id.into());
        self
    }

    pub fn source_group_name(mut self, name: impl Into<PropertyValue>) -> Self {
        self.source_group_name = Some(name.into());
        self
    }

    pub fn destination_group_id(mut self, id: impl Into<PropertyValue>) -> Self {
        self.destination_group_id = Some(id.into());
        self
    }

    fn fields(self) -> [(&'static str, Option<PropertyValue>); 7] {
        [
            (IP_PROTOCOL, Some(self.protocol)),
            (CIDR_IP, self.cidr),
            (FROM_PORT, self.from_port),
            (TO_PORT, self.to_port),
            (SOURCE_GROUP_ID, self.source_group_id),
            (SOURCE_GROUP_NAME, self.source_group_name),
            (DESTINATION_GROUP_ID, self.destination_group_id),
        ]
    }
}

/// An ordered set of rules sharing one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    direction: Direction,
    rules: Vec<Properties>,
}

impl RuleSet {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            rules: Vec::new(),
        }
    }

    pub fn ingress() -> Self {
        Self::new(Direction::Ingress)
    }

    pub fn egress() -> Self {
        Self::new(Direction::Egress)
    }

    /// Create a rule set from its direction tag.
    pub fn parse(direction: &str) -> RuleSetResult<Self> {
        Ok(Self::new(direction.parse()?))
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Validate a rule and append it.
    ///
    /// Ports must be integer literals and every other field a string
    /// literal. The protocol must be non-empty; other empty strings are
    /// dropped. Ingress rules may not name a destination group and egress
    /// rules may not name a source group.
    pub fn add_rule(&mut self, rule: Rule) -> RuleSetResult<()> {
        let forbidden: &[&str] = match self.direction {
            Direction::Ingress => &[DESTINATION_GROUP_ID],
            Direction::Egress => &[SOURCE_GROUP_ID, SOURCE_GROUP_NAME],
        };

        let mut stored = Properties::new();
        for (field, value) in rule.fields() {
            let Some(value) = value else {
                continue;
            };

            let expected = match field {
                FROM_PORT | TO_PORT => PropertyKind::Int,
                _ => PropertyKind::String,
            };
            if value.kind() != expected {
                return Err(RuleSetError::FieldTypeError {
                    field: field.to_string(),
                    expected,
                    actual: value.kind(),
                });
            }

            if value.is_empty() {
                if field == IP_PROTOCOL {
                    return Err(RuleSetError::MissingProtocol);
                }
                continue;
            }

            if forbidden.contains(&field) {
                return Err(RuleSetError::DirectionViolation {
                    direction: self.direction.to_string(),
                    field: field.to_string(),
                });
            }

            stored.insert(field.to_string(), value);
        }

        self.rules.push(stored);
        Ok(())
    }

    pub fn rules(&self) -> &[Properties] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Plain-text listing of every stored field, rule by rule.
    pub fn summary(&self) -> String {
        let rules: Vec<String> = self
            .rules
            .iter()
            .map(|rule| {
                rule.iter()
                    .map(|(field, value)| match value {
                        PropertyValue::String(text) => format!("{} {}", field, text),
                        PropertyValue::Int(number) => format!("{} {}", field, number),
                        other => format!("{} {}", field, other.kind()),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rules.join(" ")
    }

    /// The rules as a list property.
    pub fn to_property(&self) -> PropertyValue {
        PropertyValue::List(self.rules.iter().cloned().map(PropertyValue::Map).collect())
    }
}
