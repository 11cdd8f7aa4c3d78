//! Inventory command - List the resources of the web stack.

use anyhow::{Context, Result};
use clap::Args;

use super::StackArgs;

#[derive(Args)]
pub struct InventoryArgs {
    #[command(flatten)]
    stack: StackArgs,
}

pub fn execute(args: InventoryArgs) -> Result<()> {
    let config = args.stack.load_config()?;
    let registry = args
        .stack
        .web_stack()
        .build(config)
        .context("Template validation failed")?;

    println!("📋 {} resources", registry.len());
    for entry in registry.entries() {
        println!(
            "   {:>3}  {:<40} {}",
            entry.identifier(),
            entry.resource_type(),
            entry.name()
        );
        if !entry.depends_on().is_empty() {
            println!("        depends on: {}", entry.depends_on().join(", "));
        }
    }
    Ok(())
}
