//! Command-line interface for the generator binary.
//!
//! Registration normally happens in application start-up code; the CLI
//! covers the detached workflow where that code serializes the registry to
//! a JSON snapshot and generation runs as a separate build step.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::generator::{
    CommandFormatter, DirTemplateSource, EmbeddedTemplates, PassthroughFormatter, SpecGenerator,
    TemplateSource, TextFormatter,
};
use crate::registry::Registry;

#[derive(Parser)]
#[command(name = "swaggen")]
#[command(about = "Swagger document generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate swagger documents from a registry snapshot
    Generate {
        /// Registry snapshot produced by application start-up code
        #[arg(short, long)]
        registry: PathBuf,

        /// Directory the swagger folder is generated under
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Directory holding raw templates; defaults to the embedded set
        #[arg(short, long)]
        templates: Option<PathBuf>,

        /// External formatter command applied to every generated file
        #[arg(short, long)]
        formatter: Option<String>,
    },
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            registry,
            out,
            templates,
            formatter,
        } => {
            let registry = load_registry(&registry)?;
            let formatter: Box<dyn TextFormatter> = match formatter.as_deref() {
                Some(command) => Box::new(CommandFormatter::new(command)?),
                None => Box::new(PassthroughFormatter),
            };
            let source: Box<dyn TemplateSource> = match templates {
                Some(dir) => Box::new(DirTemplateSource::new(dir)),
                None => Box::new(EmbeddedTemplates),
            };

            let mut generator = SpecGenerator::new(&registry, formatter.as_ref());
            generator.generate(source.as_ref(), &out);
            Ok(())
        }
    }
}

/// Loads a registry snapshot serialized by application code.
pub fn load_registry(path: &Path) -> anyhow::Result<Registry> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read registry snapshot {path:?}"))?;
    serde_json::from_str(&content).with_context(|| format!("invalid registry snapshot {path:?}"))
}
