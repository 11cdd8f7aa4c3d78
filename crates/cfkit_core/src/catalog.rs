//! Supported resource types and their property schemas.

use crate::property::PropertyKind::{Bool, Int, List, Map, Reference, String};
use crate::schema::ResourceSchema;

pub const VPC: &str = "AWS::EC2::VPC";
pub const SUBNET: &str = "AWS::EC2::Subnet";
pub const INTERNET_GATEWAY: &str = "AWS::EC2::InternetGateway";
pub const GATEWAY_ATTACHMENT: &str = "AWS::EC2::VPCGatewayAttachment";
pub const ROUTE_TABLE: &str = "AWS::EC2::RouteTable";
pub const ROUTE: &str = "AWS::EC2::Route";
pub const SUBNET_ROUTE_TABLE_ASSOCIATION: &str = "AWS::EC2::SubnetRouteTableAssociation";
pub const SECURITY_GROUP: &str = "AWS::EC2::SecurityGroup";
pub const LAUNCH_CONFIGURATION: &str = "AWS::AutoScaling::LaunchConfiguration";
pub const LOAD_BALANCER: &str = "AWS::ElasticLoadBalancing::LoadBalancer";
pub const AUTO_SCALING_GROUP: &str = "AWS::AutoScaling::AutoScalingGroup";
pub const IAM_ROLE: &str = "AWS::IAM::Role";
pub const IAM_USER: &str = "AWS::IAM::User";
pub const INSTANCE_PROFILE: &str = "AWS::IAM::InstanceProfile";
pub const ECS_CLUSTER: &str = "AWS::ECS::Cluster";
pub const ECS_TASK_DEFINITION: &str = "AWS::ECS::TaskDefinition";
pub const ECS_SERVICE: &str = "AWS::ECS::Service";
pub const RECORD_SET: &str = "AWS::Route53::RecordSet";

pub fn vpc_schema() -> ResourceSchema {
    ResourceSchema::new(VPC)
        .required("CidrBlock", String)
        .optional("EnableDnsSupport", Bool)
        .optional("EnableDnsHostnames", Bool)
        .optional("InstanceTenancy", String)
        .tagged()
}

pub fn subnet_schema() -> ResourceSchema {
    ResourceSchema::new(SUBNET)
        .required("CidrBlock", String)
        .required("VpcId", Reference)
        .optional("AvailabilityZone", String)
        .optional("MapPublicIpOnLaunch", Bool)
        .tagged()
}

pub fn internet_gateway_schema() -> ResourceSchema {
    ResourceSchema::new(INTERNET_GATEWAY).tagged()
}

pub fn gateway_attachment_schema() -> ResourceSchema {
    ResourceSchema::new(GATEWAY_ATTACHMENT)
        .required("VpcId", Reference)
        .required("InternetGatewayId", Reference)
}

pub fn route_table_schema() -> ResourceSchema {
    ResourceSchema::new(ROUTE_TABLE)
        .required("VpcId", Reference)
        .tagged()
}

pub fn route_schema() -> ResourceSchema {
    ResourceSchema::new(ROUTE)
        .required("DestinationCidrBlock", String)
        .required("RouteTableId", Reference)
        .optional("GatewayId", Reference)
        .optional("InstanceId", Reference)
        .optional("NatGatewayId", Reference)
        .optional("NetworkInterfaceId", Reference)
        .optional("VpcPeeringConnectionId", Reference)
}

pub fn subnet_route_table_association_schema() -> ResourceSchema {
    ResourceSchema::new(SUBNET_ROUTE_TABLE_ASSOCIATION)
        .required("RouteTableId", Reference)
        .required("SubnetId", Reference)
}

pub fn security_group_schema() -> ResourceSchema {
    ResourceSchema::new(SECURITY_GROUP)
        .required("GroupDescription", String)
        .required("VpcId", Reference)
        .optional("SecurityGroupIngress", List)
        .optional("SecurityGroupEgress", List)
        .tagged()
}

pub fn launch_configuration_schema() -> ResourceSchema {
    ResourceSchema::new(LAUNCH_CONFIGURATION)
        .required("ImageId", String)
        .required("InstanceType", String)
        .optional("AssociatePublicIpAddress", Bool)
        .optional("BlockDeviceMappings", List)
        .optional("ClassicLinkVPCId", Reference)
        .optional("ClassicLinkVPCSecurityGroups", List)
        .optional("EbsOptimized", Bool)
        .optional("IamInstanceProfile", String)
        .optional("InstanceId", Reference)
        .optional("InstanceMonitoring", Bool)
        .optional("KernelId", String)
        .optional("KeyName", String)
        .optional("PlacementTenancy", String)
        .optional("RamDiskId", String)
        .optional("SecurityGroups", List)
        .optional("SpotPrice", String)
        .optional("UserData", Map)
}

pub fn load_balancer_schema() -> ResourceSchema {
    ResourceSchema::new(LOAD_BALANCER)
        .required("Listeners", List)
        .optional("AccessLoggingPolicy", Map)
        .optional("AppCookieStickinessPolicy", List)
        .optional("AvailabilityZones", List)
        .optional("ConnectionDrainingPolicy", Map)
        .optional("ConnectionSettings", Map)
        .optional("CrossZone", Bool)
        .optional("HealthCheck", Map)
        .optional("Instances", List)
        .optional("LBCookieStickinessPolicy", List)
        .optional("LoadBalancerName", String)
        .optional("Policies", List)
        .optional("Scheme", String)
        .optional("SecurityGroups", List)
        .optional("Subnets", List)
        .tagged()
}

pub fn auto_scaling_group_schema() -> ResourceSchema {
    ResourceSchema::new(AUTO_SCALING_GROUP)
        .required("MaxSize", String)
        .required("MinSize", String)
        .optional("AvailabilityZones", List)
        .optional("Cooldown", String)
        .optional("DesiredCapacity", String)
        .optional("HealthCheckGracePeriod", Int)
        .optional("HealthCheckType", String)
        .optional("InstanceId", Reference)
        .optional("LaunchConfigurationName", Reference)
        .optional("LoadBalancerNames", List)
        .optional("MetricsCollection", List)
        .optional("NotificationConfigurations", List)
        .optional("PlacementGroup", String)
        .optional("TargetGroupARNs", List)
        .optional("TerminationPolicies", List)
        .optional("VPCZoneIdentifier", List)
        .tagged()
}

pub fn role_schema() -> ResourceSchema {
    ResourceSchema::new(IAM_ROLE)
        .required("AssumeRolePolicyDocument", Map)
        .optional("ManagedPolicyArns", List)
        .optional("Path", String)
        .optional("Policies", List)
        .optional("RoleName", String)
}

pub fn user_schema() -> ResourceSchema {
    ResourceSchema::new(IAM_USER)
        .optional("Groups", List)
        .optional("LoginProfile", Map)
        .optional("ManagedPolicyArns", List)
        .optional("Path", String)
        .optional("Policies", List)
        .optional("UserName", String)
}

pub fn instance_profile_schema() -> ResourceSchema {
    ResourceSchema::new(INSTANCE_PROFILE)
        .required("Roles", List)
        .optional("Path", String)
        .optional("InstanceProfileName", String)
}

pub fn ecs_cluster_schema() -> ResourceSchema {
    ResourceSchema::new(ECS_CLUSTER).optional("ClusterName", String)
}

pub fn ecs_task_definition_schema() -> ResourceSchema {
    ResourceSchema::new(ECS_TASK_DEFINITION)
        .required("ContainerDefinitions", List)
        .optional("Family", String)
        .optional("NetworkMode", String)
        .optional("PlacementConstraints", List)
        .optional("TaskRoleArn", String)
        .optional("Volumes", List)
}

pub fn ecs_service_schema() -> ResourceSchema {
    ResourceSchema::new(ECS_SERVICE)
        .required("TaskDefinition", Reference)
        .required("DesiredCount", Int)
        .optional("Cluster", Reference)
        .optional("DeploymentConfiguration", Map)
        .optional("LoadBalancers", List)
        .optional("PlacementConstraints", List)
        .optional("PlacementStrategies", List)
        .optional("Role", String)
        .optional("ServiceName", String)
}

pub fn record_set_schema() -> ResourceSchema {
    ResourceSchema::new(RECORD_SET)
        .required("Name", String)
        .required("Type", String)
        .optional("AliasTarget", Map)
        .optional("Comment", String)
        .optional("HostedZoneId", String)
        .optional("HostedZoneName", String)
        .optional("ResourceRecords", List)
        .optional("SetIdentifier", String)
        .optional("TTL", String)
        .optional("Weight", Int)
}
