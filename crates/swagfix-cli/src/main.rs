use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use swagfix_autorest::{HttpDownloader, Pipeline, ProcessRunner, Step, tools};
use swagfix_core::config::{self, CONFIG_FILE_NAME, SwagfixConfig};
use swagfix_core::fixup;

#[derive(Parser)]
#[command(
    name = "swagfix",
    about = "Normalize Swagger operationIds and generate AutoRest clients",
    version
)]
struct Cli {
    /// Config file to read instead of ./.swagfix.yaml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize operationIds and drop empty paths in a Swagger document
    Fixup {
        /// Raw Swagger JSON document
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to write the fixed document
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the fixed document instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// Download nuget and the configured AutoRest version
    FetchTools,

    /// Fetch tools, fix the Swagger document and run AutoRest
    Generate {
        /// Raw Swagger JSON document
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory for the generated client
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name of the generated client class
        #[arg(long)]
        client_name: Option<String>,

        /// Assume nuget and AutoRest are already installed
        #[arg(long)]
        skip_fetch: bool,
    },

    /// Initialize a new swagfix configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    match cli.command {
        Commands::Fixup {
            input,
            output,
            stdout,
        } => cmd_fixup(&config_path, input, output, stdout),

        Commands::FetchTools => cmd_fetch_tools(&config_path),

        Commands::Generate {
            input,
            output,
            client_name,
            skip_fetch,
        } => cmd_generate(&config_path, input, output, client_name, skip_fetch),

        Commands::Init { force } => cmd_init(&config_path, force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swagfix", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the project config, falling back to defaults when the file is absent.
fn load_config(path: &Path) -> Result<SwagfixConfig> {
    let loaded = config::load_config(path)?;
    if loaded.is_none() {
        log::debug!("{} not found, using defaults", path.display());
    }
    Ok(loaded.unwrap_or_default())
}

fn cmd_fixup(
    config_path: &Path,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    stdout: bool,
) -> Result<()> {
    let cfg = load_config(config_path)?;
    let input = input.unwrap_or(cfg.input);

    if stdout {
        let content = fs::read_to_string(&input)
            .with_context(|| format!("failed to read {}", input.display()))?;
        let (fixed, _) = fixup::fixup_str(&content)
            .with_context(|| format!("failed to fix {}", input.display()))?;
        println!("{fixed}");
        return Ok(());
    }

    let output = output.unwrap_or(cfg.fixed);
    let report = fixup::fixup_file(&input, &output)?;
    eprintln!(
        "Fixed {} → {} ({} empty paths removed, {} operationIds rewritten)",
        input.display(),
        output.display(),
        report.removed_paths,
        report.renamed_operations
    );
    Ok(())
}

fn cmd_fetch_tools(config_path: &Path) -> Result<()> {
    let cfg = load_config(config_path)?;
    let downloader = HttpDownloader::new()?;
    tools::fetch_tools(&downloader, &ProcessRunner, &cfg.toolchain)
        .context("failed to fetch code generation tools")?;
    eprintln!(
        "AutoRest {} ready at {}",
        cfg.toolchain.autorest_version,
        cfg.toolchain.autorest_exe().display()
    );
    Ok(())
}

fn cmd_generate(
    config_path: &Path,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    client_name: Option<String>,
    skip_fetch: bool,
) -> Result<()> {
    let mut cfg = load_config(config_path)?;
    if let Some(input) = input {
        cfg.input = input;
    }
    if let Some(output) = output {
        cfg.output = output;
    }
    if let Some(client_name) = client_name {
        cfg.client_name = client_name;
    }

    let downloader = HttpDownloader::new()?;
    let mut pipeline = Pipeline::new(&cfg, &downloader, &ProcessRunner);
    if skip_fetch {
        pipeline = pipeline
            .without(Step::FetchNuget)
            .without(Step::FetchAutorest);
    }

    let report = pipeline.run().context("client generation failed")?;
    if let Some(normalize) = report.normalize {
        eprintln!(
            "Fixed {} ({} empty paths removed, {} operationIds rewritten)",
            cfg.fixed.display(),
            normalize.removed_paths,
            normalize.renamed_operations
        );
    }
    eprintln!(
        "Generated {} client {} in {}",
        cfg.generator.code_generator,
        cfg.client_name,
        cfg.output.display()
    );
    Ok(())
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
