//! CLI command definitions.
//!
//! Each subcommand builds the reference web stack and either renders it to
//! a template file or lists what it contains.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use cfkit_core::RegistryConfig;

use crate::topology::WebStack;

pub mod inventory;
pub mod render;

/// cfkit - CloudFormation template assembly
#[derive(Parser)]
#[command(name = "cfkit")]
#[command(version, about = "cfkit - schema-validated CloudFormation template assembly")]
#[command(long_about = r#"
cfkit assembles a CloudFormation template from a registry of schema-checked
resources. Subnets are carved out of the first VPC, tags and outputs are
derived per resource, and dependencies are rendered as DependsOn edges.

COMMANDS:
  render     → Build the web stack and write the template as JSON
  inventory  → List the resources of the web stack in creation order

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Network allocation error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the web stack template to a file
    Render(render::RenderArgs),

    /// List the resources of the web stack
    Inventory(inventory::InventoryArgs),
}

/// Options shared by every command that builds the web stack.
#[derive(Args, Debug, Clone)]
pub struct StackArgs {
    /// Registry configuration file (.yaml, .yml or .toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stack name used for the role and DNS record names
    #[arg(long, default_value = "test")]
    pub stack_name: String,

    /// Machine image of the container hosts
    #[arg(long, default_value = "ami-64385917")]
    pub image: String,

    /// Instance type of the container hosts
    #[arg(long, default_value = "t2.micro")]
    pub instance_type: String,

    /// Container image run by the ECS service
    #[arg(long, default_value = "httpd")]
    pub container_image: String,

    /// SSH key pair installed on the hosts
    #[arg(long)]
    pub key_name: Option<String>,

    /// Hosted zone of the CNAME record
    #[arg(long, default_value = "example.com.")]
    pub domain: String,

    /// Certificate ARN; adds an HTTPS listener when set
    #[arg(long)]
    pub certificate: Option<String>,

    /// Source block allowed in over SSH
    #[arg(long)]
    pub ssh_cidr: Option<String>,
}

impl StackArgs {
    pub fn load_config(&self) -> Result<RegistryConfig> {
        match &self.config {
            Some(path) => RegistryConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display())),
            None => Ok(RegistryConfig::default()),
        }
    }

    pub fn web_stack(&self) -> WebStack {
        let mut domain = self.domain.clone();
        if !domain.ends_with('.') {
            domain.push('.');
        }
        WebStack {
            stack_name: self.stack_name.clone(),
            image: self.image.clone(),
            instance_type: self.instance_type.clone(),
            container_image: self.container_image.clone(),
            key_name: self.key_name.clone(),
            domain,
            certificate: self.certificate.clone(),
            ssh_cidr: self.ssh_cidr.clone(),
        }
    }
}
