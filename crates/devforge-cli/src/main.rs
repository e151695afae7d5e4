#![deny(unsafe_code)]

//! DevForge CLI: browse and run the offline developer tool catalog.

mod input;
mod params;
mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use devforge_config::AppConfig;
use devforge_core::{ToolCategory, ToolInput, ToolRegistry, build_info, execute_guarded};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const EXIT_OK: u8 = 0;
/// Exit code when a tool reports failure.
const EXIT_TOOL_FAILED: u8 = 1;
/// Exit code when the requested tool id is unknown.
const EXIT_NOT_FOUND: u8 = 2;
/// Exit code when an input file cannot be read.
const EXIT_BAD_FILE: u8 = 3;

/// DevForge: offline developer utilities (JSON, encoding, hashing, diff, ...).
#[derive(Parser)]
#[command(
    name = "devforge",
    version = build_info::version_string(),
    long_version = build_info::long_version(),
    about,
    long_about = None
)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "devforge.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available tools.
    List {
        /// Only show tools in this category.
        #[arg(long)]
        category: Option<String>,
    },

    /// Describe a tool in detail.
    Describe {
        /// The id of the tool to describe.
        tool_id: String,
    },

    /// Run a tool.
    Run(RunArgs),

    /// Start the HTTP API server.
    Serve {
        /// Override `server.listen_addr`.
        #[arg(long)]
        addr: Option<String>,

        /// Override `server.listen_port`.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// The id of the tool to run.
    tool_id: String,

    /// Input text for the tool.
    #[arg(long)]
    text: Option<String>,

    /// Read input text from a file (wins over --text).
    #[arg(long)]
    file: Option<PathBuf>,

    /// Second input for two-input tools such as text.diff.
    #[arg(long)]
    secondary_text: Option<String>,

    /// Read the second input from a file (wins over --secondary-text).
    #[arg(long)]
    secondary_file: Option<PathBuf>,

    /// Tool parameter as key=value. May be repeated.
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (config, found) = load_config(&cli.config).await?;

    let config_level = match &cli.command {
        Commands::Serve { .. } => Some(config.logging.level.as_str()),
        _ => None,
    };
    init_tracing(cli.verbose, config_level);

    if !found {
        info!(path = %cli.config.display(), "Config file not found, using defaults");
    }

    let code = match cli.command {
        Commands::List { category } => cmd_list(&config, category.as_deref())?,
        Commands::Describe { tool_id } => cmd_describe(&config, &tool_id),
        Commands::Run(args) => cmd_run(&config, args).await?,
        Commands::Serve { addr, port } => cmd_serve(config, addr, port).await?,
        Commands::Config { show } => cmd_config(&config, &cli.config, found, show)?,
    };
    Ok(ExitCode::from(code))
}

/// `RUST_LOG` wins, then `-v`, then the config level (serve only), then `info`.
fn init_tracing(verbose: u8, config_level: Option<&str>) {
    let level = match verbose {
        0 => config_level.unwrap_or("info").to_lowercase(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

fn registry(config: &AppConfig) -> ToolRegistry {
    ToolRegistry::with_builtin_tools(Some(&config.tools.filter()))
}

fn cmd_list(config: &AppConfig, category: Option<&str>) -> Result<u8> {
    let category = category
        .map(str::parse::<ToolCategory>)
        .transpose()
        .with_context(|| format!("valid categories: {}", render::category_names()))?;

    print!("{}", render::tool_list(&registry(config), category));
    Ok(EXIT_OK)
}

fn cmd_describe(config: &AppConfig, tool_id: &str) -> u8 {
    let Some(tool) = registry(config).get(tool_id) else {
        return not_found(tool_id);
    };
    print!("{}", render::describe(tool.descriptor()));
    EXIT_OK
}

async fn cmd_run(config: &AppConfig, args: RunArgs) -> Result<u8> {
    let Some(tool) = registry(config).get(&args.tool_id) else {
        return Ok(not_found(&args.tool_id));
    };

    let text = match input::resolve(args.text, args.file.as_deref()).await {
        Ok(Some(text)) => Some(text),
        Ok(None) => input::piped_stdin().await.context("failed to read stdin")?,
        Err(e) => return Ok(unreadable(e)),
    };
    let secondary_text =
        match input::resolve(args.secondary_text, args.secondary_file.as_deref()).await {
            Ok(text) => text,
            Err(e) => return Ok(unreadable(e)),
        };

    let input = ToolInput {
        text,
        secondary_text,
        parameters: params::parse_params(&args.params),
    };

    for name in params::undeclared(tool.descriptor(), &input.parameters) {
        warn!(tool = %tool.id(), param = name, "Tool does not declare this parameter");
    }

    info!(tool = %tool.id(), params = input.parameters.len(), "Running tool");
    let output = execute_guarded(tool.as_ref(), &input);

    if !output.is_success() {
        eprintln!("Error: {}", output.error_message().unwrap_or_default());
        return Ok(EXIT_TOOL_FAILED);
    }

    println!("{}", output.output_text().unwrap_or_default());
    if let Some(secondary) = output.secondary_output_text().filter(|s| !s.is_empty()) {
        println!("\n--- Secondary Output ---");
        println!("{secondary}");
    }
    Ok(EXIT_OK)
}

async fn cmd_serve(
    mut config: AppConfig,
    addr: Option<String>,
    port: Option<u16>,
) -> Result<u8> {
    if let Some(addr) = addr {
        config.server.listen_addr = addr;
    }
    if let Some(port) = port {
        config.server.listen_port = port;
    }
    config.validate().context("invalid server overrides")?;

    let registry = Arc::new(registry(&config));
    info!(version = %build_info::version_string(), "Starting DevForge API server");

    let server = devforge_core::Server::new(config, registry);
    server.run().await.context("API server failed")?;
    Ok(EXIT_OK)
}

fn cmd_config(config: &AppConfig, path: &Path, found: bool, show: bool) -> Result<u8> {
    if show {
        let toml_str = toml::to_string_pretty(config).context("failed to serialize config")?;
        println!("{toml_str}");
    } else if found {
        println!("Configuration at '{}' is valid.", path.display());
    } else {
        println!("No configuration at '{}'; defaults are in effect.", path.display());
    }
    Ok(EXIT_OK)
}

fn not_found(tool_id: &str) -> u8 {
    eprintln!("Error: Tool '{tool_id}' not found.");
    eprintln!("Use 'devforge list' to see available tools.");
    EXIT_NOT_FOUND
}

fn unreadable(e: input::UnreadableFile) -> u8 {
    eprintln!("Error: {e}");
    EXIT_BAD_FILE
}

/// Load the config file, or defaults when it does not exist.
///
/// The flag reports whether a file was found.
async fn load_config(path: &Path) -> Result<(AppConfig, bool)> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        let config = AppConfig::load(path)
            .await
            .with_context(|| format!("failed to load config from '{}'", path.display()))?;
        Ok((config, true))
    } else {
        Ok((AppConfig::default(), false))
    }
}
