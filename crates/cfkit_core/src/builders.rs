//! Per-type convenience constructors.
//!
//! Each factory fills in references the caller leaves out by looking up the
//! earliest (or every) resource of the expected type, then registers the
//! resource through its catalog schema. A reference that cannot be resolved
//! fails with [`RegistryError::NotFound`] rather than producing a dangling
//! pointer.

use regex::Regex;
use tracing::debug;

use crate::catalog;
use crate::error::{RegistryError, RegistryResult, RuleSetError};
use crate::fragments::{assume_role_document, ContainerDefinition, Listener, UserPolicy};
use crate::property::{Properties, PropertyValue};
use crate::registry::{Registration, ResourceRegistry};
use crate::rules::{Direction, RuleSet};

/// Collapse runs of non-word characters in the joined parts to single
/// spaces, capped at 255 characters.
pub fn describe(parts: &[String]) -> String {
    let joined = parts.join("_");
    let collapsed = Regex::new(r"\W+")
        .map(|re| re.replace_all(&joined, " ").into_owned())
        .unwrap_or(joined);
    collapsed.chars().take(255).collect()
}

#[derive(Debug, Clone, Default)]
pub struct SubnetArgs {
    pub vpc: Option<String>,
    /// Allocated from the default network when omitted.
    pub cidr_block: Option<String>,
    pub extra: Properties,
}

#[derive(Debug, Clone, Default)]
pub struct RouteArgs {
    pub route_table: Option<String>,
    pub depends_on: Vec<String>,
    pub extra: Properties,
}

#[derive(Debug, Clone, Default)]
pub struct LaunchConfigurationArgs {
    pub vpc: Option<String>,
    pub security_groups: Option<Vec<String>>,
    pub extra: Properties,
}

#[derive(Debug, Clone)]
pub struct LoadBalancerArgs {
    pub cross_zone: bool,
    pub subnets: Option<Vec<String>>,
    pub security_groups: Option<Vec<String>>,
    pub extra: Properties,
}

impl Default for LoadBalancerArgs {
    fn default() -> Self {
        Self {
            cross_zone: true,
            subnets: None,
            security_groups: None,
            extra: Properties::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AutoScalingArgs {
    pub max_size: String,
    pub min_size: String,
    pub subnets: Option<Vec<String>>,
    /// Launch from an existing instance instead of a launch configuration.
    pub instance: Option<String>,
    pub launch_configuration: Option<String>,
    pub extra: Properties,
}

impl Default for AutoScalingArgs {
    fn default() -> Self {
        Self {
            max_size: "1".to_string(),
            min_size: "0".to_string(),
            subnets: None,
            instance: None,
            launch_configuration: None,
            extra: Properties::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EcsServiceArgs {
    pub task_definition: Option<String>,
    pub cluster: Option<String>,
    pub desired_count: i64,
    pub extra: Properties,
}

impl Default for EcsServiceArgs {
    fn default() -> Self {
        Self {
            task_definition: None,
            cluster: None,
            desired_count: 1,
            extra: Properties::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordSetArgs {
    pub depends_on: Vec<String>,
    pub extra: Properties,
}

impl ResourceRegistry {
    /// The named resource if given (it must exist), else the first of
    /// `resource_type`.
    fn resolve(&self, explicit: Option<&str>, resource_type: &str) -> RegistryResult<String> {
        match explicit {
            Some(name) => self.require(name),
            None => self.require_first(resource_type),
        }
    }

    /// The named resources if given (each must exist), else every resource
    /// of `resource_type`.
    fn resolve_all(
        &self,
        explicit: Option<&[String]>,
        resource_type: &str,
    ) -> RegistryResult<Vec<String>> {
        match explicit {
            Some(names) => names.iter().map(|n| self.require(n)).collect(),
            None => Ok(self.all_of(resource_type)),
        }
    }

    pub fn add_subnet(&mut self, name: &str, args: SubnetArgs) -> RegistryResult<String> {
        let vpc = self.resolve(args.vpc.as_deref(), catalog::VPC)?;
        let (cidr_block, allocated) = match args.cidr_block {
            Some(cidr) => (cidr, false),
            None => (self.peek_subnet_block()?.to_string(), true),
        };

        let registration = Registration::new(name, catalog::subnet_schema())
            .properties(args.extra)
            .property("VpcId", PropertyValue::reference(vpc))
            .property("CidrBlock", cidr_block);
        let name = self.register(registration)?;

        if allocated {
            self.next_subnet_block()?;
        }
        Ok(name)
    }

    pub fn add_internet_gateway(&mut self, name: &str, depends_on: &[String]) -> RegistryResult<String> {
        self.register(
            Registration::new(name, catalog::internet_gateway_schema())
                .depends_on(depends_on.iter().cloned()),
        )
    }

    /// Attach a gateway to a VPC and draw the designer edge between them.
    pub fn attach_internet_gateway(
        &mut self,
        name: &str,
        vpc: Option<&str>,
        gateway: Option<&str>,
    ) -> RegistryResult<String> {
        let gateway = self.resolve(gateway, catalog::INTERNET_GATEWAY)?;
        let vpc = self.resolve(vpc, catalog::VPC)?;

        let registration = Registration::new(name, catalog::gateway_attachment_schema())
            .property("VpcId", PropertyValue::reference(vpc.clone()))
            .property("InternetGatewayId", PropertyValue::reference(gateway.clone()))
            .depends_on([vpc.clone(), gateway.clone()]);
        let name = self.register(registration)?;

        self.link(&name, &gateway, &vpc)?;
        Ok(name)
    }

    /// Route tables wait for the gateway attachment when one exists.
    pub fn add_route_table(
        &mut self,
        name: &str,
        vpc: Option<&str>,
        attachment: Option<&str>,
    ) -> RegistryResult<String> {
        let vpc = self.resolve(vpc, catalog::VPC)?;
        let attachment = match attachment {
            Some(name) => Some(self.require(name)?),
            None => self.first_of(catalog::GATEWAY_ATTACHMENT),
        };

        self.register(
            Registration::new(name, catalog::route_table_schema())
                .property("VpcId", PropertyValue::reference(vpc))
                .depends_on(attachment),
        )
    }

    pub fn add_route(&mut self, name: &str, destination: &str, args: RouteArgs) -> RegistryResult<String> {
        let route_table = self.resolve(args.route_table.as_deref(), catalog::ROUTE_TABLE)?;

        self.register(
            Registration::new(name, catalog::route_schema())
                .properties(args.extra)
                .property("RouteTableId", PropertyValue::reference(route_table))
                .property("DestinationCidrBlock", destination)
                .depends_on(args.depends_on),
        )
    }

    /// Route `0.0.0.0/0` through the first internet gateway.
    pub fn add_default_internet_route(&mut self, name: &str) -> RegistryResult<String> {
        let attachment = self.require_first(catalog::GATEWAY_ATTACHMENT)?;
        let gateway = self.require_first(catalog::INTERNET_GATEWAY)?;

        let mut extra = Properties::new();
        extra.insert("GatewayId".to_string(), PropertyValue::reference(gateway));

        self.add_route(
            name,
            "0.0.0.0/0",
            RouteArgs {
                route_table: None,
                depends_on: vec![attachment],
                extra,
            },
        )
    }

    pub fn add_subnet_to_route_table(
        &mut self,
        name: &str,
        subnet: Option<&str>,
        route_table: Option<&str>,
    ) -> RegistryResult<String> {
        let subnet = self.resolve(subnet, catalog::SUBNET)?;
        let route_table = self.resolve(route_table, catalog::ROUTE_TABLE)?;

        self.register(
            Registration::new(name, catalog::subnet_route_table_association_schema())
                .property("RouteTableId", PropertyValue::reference(route_table.clone()))
                .property("SubnetId", PropertyValue::reference(subnet.clone()))
                .depends_on([subnet, route_table]),
        )
    }

    /// A security group whose description summarises its rules.
    pub fn add_security_group(
        &mut self,
        name: &str,
        ingress: &RuleSet,
        egress: &RuleSet,
        vpc: Option<&str>,
        extra: Properties,
    ) -> RegistryResult<String> {
        for (rules, expected) in [(ingress, Direction::Ingress), (egress, Direction::Egress)] {
            if rules.direction() != expected {
                return Err(RegistryError::Rules(RuleSetError::InvalidDirection(
                    rules.direction().to_string(),
                )));
            }
        }
        let vpc = self.resolve(vpc, catalog::VPC)?;

        let description = describe(&[ingress.summary(), egress.summary()]);
        let ingress = ingress.to_property();
        let egress = egress.to_property();

        self.register(
            Registration::new(name, catalog::security_group_schema())
                .properties(extra)
                .property("GroupDescription", description)
                .property("VpcId", PropertyValue::reference(vpc))
                .property(Direction::Ingress.as_str(), ingress)
                .property(Direction::Egress.as_str(), egress),
        )
    }

    /// Defaults to every security group registered so far.
    pub fn add_launch_configuration(
        &mut self,
        name: &str,
        image: &str,
        instance_type: &str,
        args: LaunchConfigurationArgs,
    ) -> RegistryResult<String> {
        let vpc = self.resolve(args.vpc.as_deref(), catalog::VPC)?;
        let groups = self.resolve_all(args.security_groups.as_deref(), catalog::SECURITY_GROUP)?;

        self.register(
            Registration::new(name, catalog::launch_configuration_schema())
                .properties(args.extra)
                .property("ImageId", image)
                .property("InstanceType", instance_type)
                .maybe_property(
                    "SecurityGroups",
                    (!groups.is_empty()).then(|| PropertyValue::references(groups)),
                )
                .depends_on([vpc]),
        )
    }

    /// Spread across every subnet and security group unless told otherwise.
    pub fn add_load_balancer(
        &mut self,
        name: &str,
        listeners: &[Listener],
        args: LoadBalancerArgs,
    ) -> RegistryResult<String> {
        let vpc = self.require_first(catalog::VPC)?;
        let subnets = self.resolve_all(args.subnets.as_deref(), catalog::SUBNET)?;
        let groups = self.resolve_all(args.security_groups.as_deref(), catalog::SECURITY_GROUP)?;

        let listeners: Vec<PropertyValue> = listeners.iter().map(Listener::to_property).collect();
        let depends_on: Vec<String> = std::iter::once(vpc).chain(subnets.iter().cloned()).collect();

        self.register(
            Registration::new(name, catalog::load_balancer_schema())
                .properties(args.extra)
                .property("Listeners", listeners)
                .property("CrossZone", args.cross_zone)
                .maybe_property(
                    "Subnets",
                    (!subnets.is_empty()).then(|| PropertyValue::references(subnets)),
                )
                .maybe_property(
                    "SecurityGroups",
                    (!groups.is_empty()).then(|| PropertyValue::references(groups)),
                )
                .depends_on(depends_on),
        )
    }

    /// Launches from a launch configuration when one is named or exists
    /// and no instance was given, else from the instance.
    pub fn add_autoscaling_group(&mut self, name: &str, args: AutoScalingArgs) -> RegistryResult<String> {
        let subnets = self.resolve_all(args.subnets.as_deref(), catalog::SUBNET)?;

        let launch_configuration = match (&args.launch_configuration, &args.instance) {
            (Some(explicit), _) => Some(self.require(explicit)?),
            (None, None) => self.first_of(catalog::LAUNCH_CONFIGURATION),
            (None, Some(_)) => None,
        };
        let (source_key, source) = match (launch_configuration, args.instance) {
            (Some(config), _) => ("LaunchConfigurationName", config),
            (None, Some(instance)) => ("InstanceId", instance),
            (None, None) => {
                return Err(RegistryError::NotFound(
                    catalog::LAUNCH_CONFIGURATION.to_string(),
                ))
            }
        };
        debug!("Auto scaling group {} launches from {}", name, source);

        self.register(
            Registration::new(name, catalog::auto_scaling_group_schema())
                .properties(args.extra)
                .property("MaxSize", args.max_size)
                .property("MinSize", args.min_size)
                .property("VPCZoneIdentifier", PropertyValue::references(subnets))
                .property(source_key, PropertyValue::reference(source)),
        )
    }

    /// An IAM role EC2 instances can assume.
    pub fn add_role(
        &mut self,
        name: &str,
        policies: Option<&UserPolicy>,
        extra: Properties,
    ) -> RegistryResult<String> {
        self.register(
            Registration::new(name, catalog::role_schema())
                .property(
                    "AssumeRolePolicyDocument",
                    assume_role_document(&["ec2.amazonaws.com"]),
                )
                .maybe_property("Policies", policies.map(UserPolicy::to_property))
                .properties(extra),
        )
    }

    pub fn add_user(
        &mut self,
        name: &str,
        policies: Option<&UserPolicy>,
        extra: Properties,
    ) -> RegistryResult<String> {
        self.register(
            Registration::new(name, catalog::user_schema())
                .maybe_property("Policies", policies.map(UserPolicy::to_property))
                .properties(extra),
        )
    }

    /// Defaults to every role registered so far; at least one is required.
    pub fn add_instance_profile(&mut self, name: &str, roles: Option<&[String]>) -> RegistryResult<String> {
        let roles = self.resolve_all(roles, catalog::IAM_ROLE)?;
        if roles.is_empty() {
            return Err(RegistryError::NotFound(catalog::IAM_ROLE.to_string()));
        }

        self.register(
            Registration::new(name, catalog::instance_profile_schema())
                .property("Roles", PropertyValue::references(roles.clone()))
                .depends_on(roles),
        )
    }

    pub fn add_ecs_cluster(&mut self, name: &str, cluster_name: Option<&str>) -> RegistryResult<String> {
        self.register(
            Registration::new(name, catalog::ecs_cluster_schema())
                .maybe_property("ClusterName", cluster_name),
        )
    }

    pub fn add_ecs_task(
        &mut self,
        name: &str,
        containers: &[ContainerDefinition],
        extra: Properties,
    ) -> RegistryResult<String> {
        let containers: Vec<PropertyValue> =
            containers.iter().map(ContainerDefinition::to_property).collect();

        self.register(
            Registration::new(name, catalog::ecs_task_definition_schema())
                .properties(extra)
                .property("ContainerDefinitions", containers),
        )
    }

    /// Runs the first task definition on the first cluster, if any cluster
    /// exists; otherwise on the account's default cluster.
    pub fn add_ecs_service(&mut self, name: &str, args: EcsServiceArgs) -> RegistryResult<String> {
        let task = self.resolve(args.task_definition.as_deref(), catalog::ECS_TASK_DEFINITION)?;
        let cluster = match args.cluster.as_deref() {
            Some(explicit) => Some(self.require(explicit)?),
            None => self.first_of(catalog::ECS_CLUSTER),
        };

        self.register(
            Registration::new(name, catalog::ecs_service_schema())
                .properties(args.extra)
                .property("TaskDefinition", PropertyValue::reference(task.clone()))
                .property("DesiredCount", args.desired_count)
                .maybe_property("Cluster", cluster.clone().map(PropertyValue::reference))
                .depends_on(std::iter::once(task).chain(cluster)),
        )
    }

    /// A DNS record. `name` is both the record name and, canonicalised, the
    /// resource name.
    pub fn add_record_set(
        &mut self,
        name: &str,
        record_type: &str,
        args: RecordSetArgs,
    ) -> RegistryResult<String> {
        self.register(
            Registration::new(name, catalog::record_set_schema())
                .properties(args.extra)
                .property("Name", name)
                .property("Type", record_type)
                .depends_on(args.depends_on),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaViolation;
    use crate::rules::Rule;

    fn network() -> ResourceRegistry {
        let mut registry = ResourceRegistry::default();
        registry
            .allocate_vpc("VPC", "10.0.0.0/16", Properties::new())
            .unwrap();
        registry
    }

    fn property<'a>(registry: &'a ResourceRegistry, name: &str, key: &str) -> &'a PropertyValue {
        &registry.get(name).unwrap().resource().properties()[key]
    }

    #[test]
    fn test_describe_collapses_punctuation() {
        assert_eq!(
            describe(&["[{'a': 1}]".to_string(), "[{'b': 2}]".to_string()]),
            " a 1 _ b 2 "
        );
        assert_eq!(describe(&["x".repeat(300)]).len(), 255);
    }

    #[test]
    fn test_subnets_draw_from_default_network() {
        let mut registry = network();
        let first = registry.add_subnet("first", SubnetArgs::default()).unwrap();
        let second = registry.add_subnet("second", SubnetArgs::default()).unwrap();

        assert_eq!(property(&registry, &first, "CidrBlock"), &PropertyValue::from("10.0.0.0/24"));
        assert_eq!(property(&registry, &second, "CidrBlock"), &PropertyValue::from("10.0.1.0/24"));
        assert_eq!(property(&registry, &first, "VpcId"), &PropertyValue::reference("Vpc"));
    }

    #[test]
    fn test_explicit_subnet_cidr_skips_allocator() {
        let mut registry = network();
        registry
            .add_subnet(
                "manual",
                SubnetArgs {
                    cidr_block: Some("10.0.200.0/24".to_string()),
                    ..SubnetArgs::default()
                },
            )
            .unwrap();
        assert_eq!(registry.peek_subnet_block().unwrap().to_string(), "10.0.0.0/24");
    }

    #[test]
    fn test_small_vpc_takes_explicit_subnets_only() {
        let mut registry = ResourceRegistry::default();
        registry
            .allocate_vpc("tiny", "10.0.0.0/28", Properties::new())
            .unwrap();

        let manual = registry
            .add_subnet(
                "manual",
                SubnetArgs {
                    cidr_block: Some("10.0.0.0/28".to_string()),
                    ..SubnetArgs::default()
                },
            )
            .unwrap();
        assert_eq!(property(&registry, &manual, "CidrBlock"), &PropertyValue::from("10.0.0.0/28"));

        assert_eq!(
            registry.add_subnet("implicit", SubnetArgs::default()).unwrap_err(),
            RegistryError::SubnetExhausted {
                parent: "10.0.0.0/28".to_string(),
                prefix: 24
            }
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_failed_subnet_does_not_consume_block() {
        let mut registry = network();
        registry.add_subnet("dup", SubnetArgs::default()).unwrap();
        assert!(matches!(
            registry.add_subnet("dup", SubnetArgs::default()),
            Err(RegistryError::DuplicateName(_))
        ));
        assert_eq!(registry.peek_subnet_block().unwrap().to_string(), "10.0.1.0/24");
    }

    #[test]
    fn test_subnet_without_vpc() {
        let mut registry = ResourceRegistry::default();
        assert_eq!(
            registry.add_subnet("orphan", SubnetArgs::default()).unwrap_err(),
            RegistryError::NotFound(catalog::VPC.to_string())
        );
    }

    #[test]
    fn test_gateway_chain() {
        let mut registry = network();
        let gateway = registry.add_internet_gateway("internet gateway", &[]).unwrap();
        let attachment = registry.attach_internet_gateway("attach gateway", None, None).unwrap();
        let table = registry.add_route_table("default routes", None, None).unwrap();
        let route = registry.add_default_internet_route("to the internet").unwrap();

        assert_eq!(registry.get(&attachment).unwrap().depends_on(), &["Vpc", "InternetGateway"]);
        assert_eq!(registry.get(&table).unwrap().depends_on(), &[attachment.clone()]);
        assert_eq!(registry.get(&route).unwrap().depends_on(), &[attachment.clone()]);
        assert_eq!(property(&registry, &route, "GatewayId"), &PropertyValue::reference(gateway));
        assert_eq!(property(&registry, &route, "RouteTableId"), &PropertyValue::reference(table));
        assert_eq!(registry.designer_links().len(), 1);
    }

    #[test]
    fn test_default_route_needs_gateway() {
        let mut registry = network();
        assert_eq!(
            registry.add_default_internet_route("route").unwrap_err(),
            RegistryError::NotFound(catalog::GATEWAY_ATTACHMENT.to_string())
        );
    }

    #[test]
    fn test_explicit_reference_must_exist() {
        let mut registry = network();
        registry.add_subnet("first", SubnetArgs::default()).unwrap();
        registry.add_route_table("routes", None, None).unwrap();
        assert_eq!(
            registry
                .add_subnet_to_route_table("assoc", Some("MySecondSubnet"), None)
                .unwrap_err(),
            RegistryError::UnknownResource("MySecondSubnet".to_string())
        );
    }

    #[test]
    fn test_security_group_and_launch_configuration() {
        let mut registry = network();
        let mut ingress = RuleSet::ingress();
        ingress.add_rule(Rule::new("tcp").ports(22, 22).cidr("0.0.0.0/0")).unwrap();
        let mut egress = RuleSet::egress();
        egress.add_rule(Rule::new("-1").cidr("0.0.0.0/0")).unwrap();

        let group = registry
            .add_security_group("web", &ingress, &egress, None, Properties::new())
            .unwrap();
        let description = property(&registry, &group, "GroupDescription");
        assert!(description.as_str().unwrap().contains("IpProtocol"));

        let config = registry
            .add_launch_configuration("launch", "ami-64385917", "t2.micro", LaunchConfigurationArgs::default())
            .unwrap();
        assert_eq!(
            property(&registry, &config, "SecurityGroups"),
            &PropertyValue::references(["Web"])
        );
        assert_eq!(registry.get(&config).unwrap().depends_on(), &["Vpc"]);
    }

    #[test]
    fn test_security_group_rejects_swapped_rule_sets() {
        let mut registry = network();
        let err = registry
            .add_security_group("web", &RuleSet::egress(), &RuleSet::egress(), None, Properties::new())
            .unwrap_err();
        assert!(matches!(err, RegistryError::Rules(RuleSetError::InvalidDirection(_))));
    }

    #[test]
    fn test_autoscaling_group_uses_first_launch_configuration() {
        let mut registry = network();
        registry.add_subnet("a", SubnetArgs::default()).unwrap();
        registry.add_subnet("b", SubnetArgs::default()).unwrap();
        registry
            .add_launch_configuration("launch", "ami-1", "t2.micro", LaunchConfigurationArgs::default())
            .unwrap();

        let group = registry.add_autoscaling_group("group", AutoScalingArgs::default()).unwrap();

        assert_eq!(
            property(&registry, &group, "LaunchConfigurationName"),
            &PropertyValue::reference("Launch")
        );
        assert_eq!(
            property(&registry, &group, "VPCZoneIdentifier"),
            &PropertyValue::references(["A", "B"])
        );
        assert_eq!(property(&registry, &group, "MaxSize"), &PropertyValue::from("1"));
    }

    #[test]
    fn test_autoscaling_group_needs_a_launch_source() {
        let mut registry = network();
        assert_eq!(
            registry
                .add_autoscaling_group("group", AutoScalingArgs::default())
                .unwrap_err(),
            RegistryError::NotFound(catalog::LAUNCH_CONFIGURATION.to_string())
        );
    }

    #[test]
    fn test_load_balancer_depends_on_vpc_and_subnets() {
        let mut registry = network();
        registry.add_subnet("a", SubnetArgs::default()).unwrap();
        let lb = registry
            .add_load_balancer("lb", &[Listener::new(80, 80)], LoadBalancerArgs::default())
            .unwrap();

        assert_eq!(registry.get(&lb).unwrap().depends_on(), &["Vpc", "A"]);
        assert_eq!(property(&registry, &lb, "CrossZone"), &PropertyValue::Bool(true));
        assert!(!registry.get(&lb).unwrap().resource().properties().contains_key("SecurityGroups"));
    }

    #[test]
    fn test_iam_role_and_profile() {
        let mut registry = ResourceRegistry::default();
        assert_eq!(
            registry.add_instance_profile("profile", None).unwrap_err(),
            RegistryError::NotFound(catalog::IAM_ROLE.to_string())
        );

        let mut policy = UserPolicy::new("docker");
        policy.add_statement(["ecs:Poll"]);
        let role = registry.add_role("testrole", Some(&policy), Properties::new()).unwrap();
        let profile = registry.add_instance_profile("my profile", None).unwrap();

        assert_eq!(role, "Testrole");
        assert_eq!(property(&registry, &profile, "Roles"), &PropertyValue::references(["Testrole"]));
    }

    #[test]
    fn test_iam_user_rejects_unknown_property() {
        let mut registry = ResourceRegistry::default();
        let mut extra = Properties::new();
        extra.insert("Password".to_string(), "hunter2".into());
        assert!(matches!(
            registry.add_user("deploy", None, extra),
            Err(RegistryError::Schema(SchemaViolation::UnknownProperty { .. }))
        ));
    }

    #[test]
    fn test_ecs_service_binds_task_and_cluster() {
        let mut registry = ResourceRegistry::default();
        let containers = [ContainerDefinition::new("httpd", "httpd").with_memory(128)];
        let task = registry.add_ecs_task("web service", &containers, Properties::new()).unwrap();

        let bare = registry.add_ecs_service("bare", EcsServiceArgs::default()).unwrap();
        assert!(!registry.get(&bare).unwrap().resource().properties().contains_key("Cluster"));

        let cluster = registry.add_ecs_cluster("cluster", Some("web")).unwrap();
        let service = registry.add_ecs_service("running", EcsServiceArgs::default()).unwrap();
        assert_eq!(property(&registry, &service, "TaskDefinition"), &PropertyValue::reference(task.clone()));
        assert_eq!(property(&registry, &service, "Cluster"), &PropertyValue::reference(cluster.clone()));
        assert_eq!(registry.get(&service).unwrap().depends_on(), &[task, cluster]);
    }

    #[test]
    fn test_record_set_keeps_raw_record_name() {
        let mut registry = ResourceRegistry::default();
        let record = registry
            .add_record_set("test.example.com.", "CNAME", RecordSetArgs::default())
            .unwrap();
        assert_eq!(record, "Test.Example.Com.");
        assert_eq!(property(&registry, &record, "Name"), &PropertyValue::from("test.example.com."));
    }
}
