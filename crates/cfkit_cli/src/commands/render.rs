//! Render command - Build the web stack and write its template.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use cfkit_core::DocumentAssembler;

use super::StackArgs;

#[derive(Args)]
pub struct RenderArgs {
    /// Path of the template file to write
    #[arg(short, long, default_value = "file.json")]
    output: PathBuf,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    stack: StackArgs,
}

pub fn execute(args: RenderArgs, quiet: bool) -> Result<()> {
    let config = args.stack.load_config()?;
    info!("Building web stack {}", args.stack.stack_name);

    let registry = args
        .stack
        .web_stack()
        .build(config)
        .context("Template validation failed")?;
    let document = DocumentAssembler::render(&registry);

    if args.pretty {
        let content = document.to_json_pretty()?;
        fs::write(&args.output, content)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
    } else {
        document
            .write(&args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
    }

    if !quiet {
        println!("📄 Rendered {} resources", registry.len());
        if let Some(network) = registry.default_network() {
            println!("   🌐 Network: {}", network);
        }
        println!("   ✅ Template written to {}", args.output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    use crate::commands::{Cli, Commands};

    #[test]
    fn test_render_writes_template() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("stack.json");

        let cli = Cli::parse_from([
            "cfkit",
            "render",
            "--output",
            output.to_str().unwrap(),
            "--domain",
            "example.org",
            "--pretty",
        ]);
        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        execute(args, true).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["AWSTemplateFormatVersion"], "2010-09-09");
        assert!(written["Resources"]["Test.Example.Org."].is_object());
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let dir = tempdir().unwrap();
        let cli = Cli::parse_from([
            "cfkit",
            "render",
            "--config",
            dir.path().join("absent.yaml").to_str().unwrap(),
        ]);
        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        let err = execute(args, true).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }
}
