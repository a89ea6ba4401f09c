use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use newclass::{FileGenerator, GeneratorConfig, TemplateType};
use std::path::PathBuf;

const AFTER_HELP: &str = "\
TEMPLATE TYPES:
    interface   Writes a new, empty interface header named after PATH
    class       Writes .h and .cpp of a concrete implementation of the interface at PATH
    mock        Runs the configured mock generator on the interface at PATH";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generates C++ classes from pure-virtual interface headers",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Template type to generate (case-insensitive)
    template_type: TemplateType,

    /// New interface filename, or path to an existing interface header
    path: PathBuf,

    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing template bodies (overrides config)
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Newline-delimited list of framework classes to include with <...>
    #[arg(long)]
    framework_types: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Dry run mode - don't write files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            GeneratorConfig::load(path).context("Failed to load config")?
        }
        None => GeneratorConfig::default(),
    };
    if cli.templates.is_some() {
        config.templates = cli.templates;
    }
    if cli.framework_types.is_some() {
        config.framework_types = cli.framework_types;
    }

    if cli.dry_run {
        info!("=== DRY RUN MODE ===");
    }

    let generator = FileGenerator::new(config)
        .context("Failed to initialise generator")?
        .with_output_dir(cli.output)
        .with_dry_run(cli.dry_run);

    let written = generator
        .generate(cli.template_type, &cli.path)
        .with_context(|| format!("Failed to generate {} from {:?}", cli.template_type, cli.path))?;

    info!("Generated {} file(s)", written.len());
    Ok(())
}
