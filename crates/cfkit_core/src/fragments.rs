//! Structured property fragments: load balancer listeners, IAM policies and
//! ECS container definitions.

use std::collections::BTreeMap;

use crate::property::{Properties, PropertyValue};

const POLICY_VERSION: &str = "2012-10-17";

fn entry(map: &mut Properties, key: &str, value: impl Into<PropertyValue>) {
    map.insert(key.to_string(), value.into());
}

/// An ELB listener mapping a load balancer port to an instance port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub instance_port: u16,
    pub load_balancer_port: u16,
    pub instance_protocol: String,
    pub protocol: String,
    pub policy_names: Vec<String>,
    pub ssl_certificate_id: Option<String>,
}

impl Listener {
    /// A plain TCP listener.
    pub fn new(instance_port: u16, load_balancer_port: u16) -> Self {
        Self {
            instance_port,
            load_balancer_port,
            instance_protocol: "TCP".to_string(),
            protocol: "TCP".to_string(),
            policy_names: Vec::new(),
            ssl_certificate_id: None,
        }
    }

    pub fn with_protocols(mut self, load_balancer: impl Into<String>, instance: impl Into<String>) -> Self {
        self.protocol = load_balancer.into();
        self.instance_protocol = instance.into();
        self
    }

    pub fn with_certificate(mut self, certificate_arn: impl Into<String>) -> Self {
        self.ssl_certificate_id = Some(certificate_arn.into());
        self
    }

    pub fn with_policy(mut self, policy_name: impl Into<String>) -> Self {
        self.policy_names.push(policy_name.into());
        self
    }

    pub fn to_property(&self) -> PropertyValue {
        let mut map = Properties::new();
        entry(&mut map, "InstancePort", self.instance_port.to_string());
        entry(&mut map, "InstanceProtocol", self.instance_protocol.as_str());
        entry(&mut map, "LoadBalancerPort", self.load_balancer_port.to_string());
        entry(&mut map, "Protocol", self.protocol.as_str());
        if !self.policy_names.is_empty() {
            entry(
                &mut map,
                "PolicyNames",
                PropertyValue::List(self.policy_names.iter().map(|p| p.as_str().into()).collect()),
            );
        }
        if let Some(certificate) = &self.ssl_certificate_id {
            entry(&mut map, "SSLCertificateId", certificate.as_str());
        }
        PropertyValue::Map(map)
    }
}

/// Named inline IAM policies, each allowing a set of actions on all
/// resources. Policy names are suffixed with a running counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPolicy {
    name: String,
    version: String,
    policies: Vec<PropertyValue>,
}

impl UserPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: POLICY_VERSION.to_string(),
            policies: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn add_statement<I, S>(&mut self, actions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let actions = actions
            .into_iter()
            .map(|a| PropertyValue::String(a.into()))
            .collect::<Vec<_>>();

        let mut statement = Properties::new();
        entry(&mut statement, "Action", actions);
        entry(&mut statement, "Effect", "Allow");
        entry(&mut statement, "Resource", "*");

        let mut document = Properties::new();
        entry(&mut document, "Version", self.version.as_str());
        entry(&mut document, "Statement", vec![PropertyValue::Map(statement)]);

        let mut policy = Properties::new();
        entry(&mut policy, "PolicyName", format!("{}{}", self.name, self.policies.len()));
        entry(&mut policy, "PolicyDocument", document);

        self.policies.push(PropertyValue::Map(policy));
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn to_property(&self) -> PropertyValue {
        PropertyValue::List(self.policies.clone())
    }
}

/// Trust policy letting the given services assume a role.
pub fn assume_role_document(services: &[&str]) -> PropertyValue {
    let mut principal = Properties::new();
    entry(
        &mut principal,
        "Service",
        services.iter().map(|s| PropertyValue::from(*s)).collect::<Vec<_>>(),
    );

    let mut statement = Properties::new();
    entry(&mut statement, "Effect", "Allow");
    entry(&mut statement, "Principal", principal);
    entry(&mut statement, "Action", vec![PropertyValue::from("sts:AssumeRole")]);

    let mut document = Properties::new();
    entry(&mut document, "Version", POLICY_VERSION);
    entry(&mut document, "Statement", vec![PropertyValue::Map(statement)]);
    PropertyValue::Map(document)
}

/// Port published by a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub container_port: u16,
    pub host_port: u16,
    pub protocol: Protocol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        }
    }
}

/// An ECS container definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDefinition {
    pub name: String,
    pub image: String,
    pub cpu: Option<i64>,
    pub memory: Option<i64>,
    pub essential: bool,
    pub port_mappings: Vec<PortMapping>,
    pub environment: BTreeMap<String, String>,
}

impl ContainerDefinition {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            cpu: None,
            memory: None,
            essential: true,
            port_mappings: Vec::new(),
            environment: BTreeMap::new(),
        }
    }

    pub fn with_cpu(mut self, units: i64) -> Self {
        self.cpu = Some(units);
        self
    }

    pub fn with_memory(mut self, mebibytes: i64) -> Self {
        self.memory = Some(mebibytes);
        self
    }

    pub fn with_port(mut self, container_port: u16, host_port: u16) -> Self {
        self.port_mappings.push(PortMapping {
            container_port,
            host_port,
            protocol: Protocol::Tcp,
        });
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn non_essential(mut self) -> Self {
        self.essential = false;
        self
    }

    pub fn to_property(&self) -> PropertyValue {
        let mut map = Properties::new();
        entry(&mut map, "Name", self.name.as_str());
        entry(&mut map, "Image", self.image.as_str());
        entry(&mut map, "Essential", self.essential);
        if let Some(cpu) = self.cpu {
            entry(&mut map, "Cpu", cpu);
        }
        if let Some(memory) = self.memory {
            entry(&mut map, "Memory", memory);
        }
        if !self.port_mappings.is_empty() {
            let mappings = self
                .port_mappings
                .iter()
                .map(|m| {
                    let mut mapping = Properties::new();
                    entry(&mut mapping, "ContainerPort", m.container_port);
                    entry(&mut mapping, "HostPort", m.host_port);
                    entry(&mut mapping, "Protocol", m.protocol.as_str());
                    PropertyValue::Map(mapping)
                })
                .collect::<Vec<_>>();
            entry(&mut map, "PortMappings", mappings);
        }
        if !self.environment.is_empty() {
            let variables = self
                .environment
                .iter()
                .map(|(name, value)| {
                    let mut variable = Properties::new();
                    entry(&mut variable, "Name", name.as_str());
                    entry(&mut variable, "Value", value.as_str());
                    PropertyValue::Map(variable)
                })
                .collect::<Vec<_>>();
            entry(&mut map, "Environment", variables);
        }
        PropertyValue::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listener_defaults_to_tcp() {
        let listener = Listener::new(80, 80);
        assert_eq!(
            serde_json::to_value(listener.to_property()).unwrap(),
            json!({
                "InstancePort": "80",
                "InstanceProtocol": "TCP",
                "LoadBalancerPort": "80",
                "Protocol": "TCP"
            })
        );
    }

    #[test]
    fn test_https_listener_with_certificate() {
        let listener = Listener::new(80, 443)
            .with_protocols("HTTPS", "HTTP")
            .with_certificate("arn:aws:acm:cert");
        let value = serde_json::to_value(listener.to_property()).unwrap();
        assert_eq!(value["Protocol"], "HTTPS");
        assert_eq!(value["InstanceProtocol"], "HTTP");
        assert_eq!(value["SSLCertificateId"], "arn:aws:acm:cert");
        assert!(value.get("PolicyNames").is_none());
    }

    #[test]
    fn test_user_policy_names_are_numbered() {
        let mut policy = UserPolicy::new("docker");
        policy.add_statement(["ecr:*"]);
        policy.add_statement(["ecs:Poll", "logs:PutLogEvents"]);

        let value = serde_json::to_value(policy.to_property()).unwrap();
        assert_eq!(policy.len(), 2);
        assert_eq!(value[0]["PolicyName"], "docker0");
        assert_eq!(value[1]["PolicyName"], "docker1");
        assert_eq!(
            value[1]["PolicyDocument"]["Statement"][0]["Action"],
            json!(["ecs:Poll", "logs:PutLogEvents"])
        );
    }

    #[test]
    fn test_container_definition() {
        let container = ContainerDefinition::new("httpd", "httpd")
            .with_cpu(1)
            .with_memory(128)
            .with_port(80, 80);
        assert_eq!(
            serde_json::to_value(container.to_property()).unwrap(),
            json!({
                "Name": "httpd",
                "Image": "httpd",
                "Essential": true,
                "Cpu": 1,
                "Memory": 128,
                "PortMappings": [{"ContainerPort": 80, "HostPort": 80, "Protocol": "tcp"}]
            })
        );
    }

    #[test]
    fn test_assume_role_document() {
        let value = serde_json::to_value(assume_role_document(&["ec2.amazonaws.com"])).unwrap();
        assert_eq!(
            value["Statement"][0]["Principal"]["Service"],
            json!(["ec2.amazonaws.com"])
        );
    }
}
