//! The reference web stack: a load-balanced, auto-scaled ECS host tier in a
//! three-subnet VPC, fronted by a CNAME record.

use cfkit_core::{
    AutoScalingArgs, ContainerDefinition, EcsServiceArgs, LaunchConfigurationArgs, Listener,
    LoadBalancerArgs, Properties, PropertyValue, RecordSetArgs, RegistryConfig, RegistryResult,
    ResourceRegistry, Rule, RuleSet, SubnetArgs, UserPolicy,
};
use serde_json::json;

/// ECS agent permissions granted to the container hosts.
const ECS_HOST_ACTIONS: &[&str] = &[
    "ecr:*",
    "ecs:CreateCluster",
    "ecs:DeregisterContainerInstance",
    "ecs:DiscoverPollEndpoint",
    "ecs:Poll",
    "ecs:RegisterContainerInstance",
    "ecs:StartTelemetrySession",
    "ecs:Submit*",
    "logs:CreateLogStream",
    "logs:PutLogEvents",
];

/// Knobs of the web stack.
#[derive(Debug, Clone)]
pub struct WebStack {
    pub stack_name: String,
    pub image: String,
    pub instance_type: String,
    pub container_image: String,
    pub key_name: Option<String>,
    /// Hosted zone, with trailing dot.
    pub domain: String,
    pub certificate: Option<String>,
    /// Source block allowed in over SSH; SSH stays closed when unset.
    pub ssh_cidr: Option<String>,
}

impl Default for WebStack {
    fn default() -> Self {
        Self {
            stack_name: "test".to_string(),
            image: "ami-64385917".to_string(),
            instance_type: "t2.micro".to_string(),
            container_image: "httpd".to_string(),
            key_name: None,
            domain: "example.com.".to_string(),
            certificate: None,
            ssh_cidr: None,
        }
    }
}

fn props<const N: usize>(entries: [(&str, PropertyValue); N]) -> Properties {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

impl WebStack {
    pub fn build(&self, config: RegistryConfig) -> RegistryResult<ResourceRegistry> {
        let mut registry = ResourceRegistry::new(config);

        self.network(&mut registry)?;
        self.security(&mut registry)?;
        self.hosts(&mut registry)?;
        self.service(&mut registry)?;

        Ok(registry)
    }

    fn network(&self, registry: &mut ResourceRegistry) -> RegistryResult<()> {
        registry.allocate_vpc("VPC", "10.0.0.0/16", Properties::new())?;
        for (name, zone) in [("My first subnet", 1), ("My second subnet", 2), ("My third subnet", 0)] {
            let extra = props([("AvailabilityZone", PropertyValue::select_az(zone))]);
            registry.add_subnet(name, SubnetArgs { extra, ..SubnetArgs::default() })?;
        }

        registry.add_internet_gateway("internet gateway", &[])?;
        registry.attach_internet_gateway("Attach gateway", None, None)?;
        registry.add_route_table("My default route table", None, None)?;
        registry.add_default_internet_route("To the internet")?;

        registry.add_subnet_to_route_table("add first subnet", None, None)?;
        registry.add_subnet_to_route_table("add second subnet", Some("MySecondSubnet"), None)?;
        registry.add_subnet_to_route_table("add third subnet", Some("MyThirdSubnet"), None)?;
        Ok(())
    }

    fn security(&self, registry: &mut ResourceRegistry) -> RegistryResult<()> {
        let mut ingress = RuleSet::ingress();
        if let Some(cidr) = &self.ssh_cidr {
            ingress.add_rule(Rule::new("tcp").ports(22, 22).cidr(cidr.as_str()))?;
        }
        ingress.add_rule(Rule::new("tcp").ports(443, 443).cidr("0.0.0.0/0"))?;
        ingress.add_rule(Rule::new("tcp").ports(80, 80).cidr("0.0.0.0/0"))?;

        let mut egress = RuleSet::egress();
        egress.add_rule(Rule::new("-1").cidr("0.0.0.0/0"))?;

        registry.add_security_group("My security group", &ingress, &egress, None, Properties::new())?;

        let mut docker = UserPolicy::new("docker");
        docker.add_statement(ECS_HOST_ACTIONS.iter().copied());
        registry.add_role(&format!("{}role", self.stack_name), Some(&docker), Properties::new())?;
        registry.add_instance_profile("My profile", None)?;
        Ok(())
    }

    fn hosts(&self, registry: &mut ResourceRegistry) -> RegistryResult<()> {
        let mut extra = props([
            ("AssociatePublicIpAddress", true.into()),
            ("IamInstanceProfile", PropertyValue::reference(registry.require("MyProfile")?)),
        ]);
        if let Some(key) = &self.key_name {
            extra.insert("KeyName".to_string(), key.as_str().into());
        }
        registry.add_launch_configuration(
            "my launch configuration",
            &self.image,
            &self.instance_type,
            LaunchConfigurationArgs {
                extra,
                ..LaunchConfigurationArgs::default()
            },
        )?;

        let mut listeners = vec![Listener::new(80, 80)];
        if let Some(certificate) = &self.certificate {
            listeners.push(
                Listener::new(80, 443)
                    .with_protocols("HTTPS", "HTTP")
                    .with_certificate(certificate.as_str()),
            );
        }
        let health_check = json!({
            "Target": "HTTP:80/",
            "HealthyThreshold": "2",
            "UnhealthyThreshold": "5",
            "Interval": "30",
            "Timeout": "5"
        });
        let mut extra = Properties::new();
        extra.extend(PropertyValue::from_json(health_check).map(|v| ("HealthCheck".to_string(), v)));
        let load_balancer = registry.add_load_balancer(
            "My Load Balancer",
            &listeners,
            LoadBalancerArgs {
                extra,
                ..LoadBalancerArgs::default()
            },
        )?;

        registry.add_autoscaling_group(
            "My Autoscaling Group",
            AutoScalingArgs {
                extra: props([
                    ("DesiredCapacity", "1".into()),
                    ("LoadBalancerNames", PropertyValue::references([load_balancer])),
                ]),
                ..AutoScalingArgs::default()
            },
        )?;
        Ok(())
    }

    fn service(&self, registry: &mut ResourceRegistry) -> RegistryResult<()> {
        let container = ContainerDefinition::new("httpd", self.container_image.as_str())
            .with_cpu(1)
            .with_memory(128)
            .with_port(80, 80);
        registry.add_ecs_task("web service", &[container], Properties::new())?;
        registry.add_ecs_service("web service running", EcsServiceArgs::default())?;

        let load_balancer = registry.require("MyLoadBalancer")?;
        registry.add_record_set(
            &format!("{}.{}", self.stack_name, self.domain),
            "CNAME",
            RecordSetArgs {
                depends_on: vec![load_balancer.clone()],
                extra: props([
                    ("HostedZoneName", self.domain.as_str().into()),
                    ("TTL", "300".into()),
                    (
                        "ResourceRecords",
                        vec![PropertyValue::get_att(load_balancer, "DNSName")].into(),
                    ),
                ]),
            },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfkit_core::{catalog, DocumentAssembler};

    #[test]
    fn test_web_stack_builds() {
        let registry = WebStack::default().build(RegistryConfig::default()).unwrap();

        assert_eq!(registry.all_of(catalog::SUBNET).len(), 3);
        assert_eq!(registry.entries()[0].name(), "Vpc");
        assert!(registry.get("Test.Example.Com.").is_some());
        assert!(registry.get("Testrole").is_some());
    }

    #[test]
    fn test_web_stack_document() {
        let stack = WebStack {
            ssh_cidr: Some("203.0.113.7/32".to_string()),
            certificate: Some("arn:aws:acm:eu-west-1:000000000000:certificate/example".to_string()),
            key_name: Some("id_rsa".to_string()),
            ..WebStack::default()
        };
        let registry = stack.build(RegistryConfig::default()).unwrap();
        let value = serde_json::to_value(DocumentAssembler::render(&registry)).unwrap();
        let resources = &value["Resources"];

        assert_eq!(resources["MyThirdSubnet"]["Properties"]["CidrBlock"], "10.0.2.0/24");
        assert_eq!(
            resources["MySecurityGroup"]["Properties"]["SecurityGroupIngress"]
                .as_array()
                .unwrap()
                .len(),
            3
        );
        assert_eq!(
            resources["MyLoadBalancer"]["Properties"]["Listeners"][1]["LoadBalancerPort"],
            "443"
        );
        assert_eq!(
            resources["Test.Example.Com."]["Properties"]["ResourceRecords"],
            json!([{"Fn::GetAtt": ["MyLoadBalancer", "DNSName"]}])
        );
        assert_eq!(resources["Test.Example.Com."]["DependsOn"], json!(["MyLoadBalancer"]));
        assert_eq!(
            resources["WebServiceRunning"]["Properties"]["TaskDefinition"],
            json!({"Ref": "WebService"})
        );
        assert_eq!(resources["MyLaunchConfiguration"]["Properties"]["KeyName"], "id_rsa");
    }
}
