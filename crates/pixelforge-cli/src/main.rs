//! PixelForge CLI - turn photos into pixel art

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pixelforge_core::commands::pixel;
use pixelforge_core::config::Config;
use pixelforge_core::pixel::{PixelArtStyle, PixelBitDepth};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "pixelforge")]
#[command(author, version, about = "Turn photos into AI-generated pixel art", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform an image into pixel art
    Transform {
        /// Input image (PNG, JPEG, WebP, ...)
        input: PathBuf,
        /// Style (chibi or neutral)
        #[arg(short, long)]
        style: Option<String>,
        /// Bit depth (8-bit, 16-bit, 32-bit or 64-bit)
        #[arg(short, long)]
        depth: Option<String>,
        /// Output path (defaults to <input>_<depth>_pixel.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the prompt sent for a style and depth
    Prompt {
        #[arg(short, long)]
        style: Option<String>,
        #[arg(short, long)]
        depth: Option<String>,
    },

    /// List available styles
    Styles,

    /// List available bit depths
    Depths,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show the config file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pixelforge=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };

    match cli.command {
        Commands::Transform {
            input,
            style,
            depth,
            output,
        } => cmd_transform(&config_path, input, style, depth, output, cli.quiet).await,

        Commands::Prompt { style, depth } => cmd_prompt(&config_path, style, depth),

        Commands::Styles => {
            cmd_styles(cli.quiet);
            Ok(())
        }

        Commands::Depths => {
            cmd_depths(cli.quiet);
            Ok(())
        }

        Commands::Config { action } => cmd_config(&config_path, action, cli.quiet),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn parse_style(value: Option<String>) -> anyhow::Result<Option<PixelArtStyle>> {
    Ok(value.map(|s| s.parse::<PixelArtStyle>()).transpose()?)
}

fn parse_depth(value: Option<String>) -> anyhow::Result<Option<PixelBitDepth>> {
    Ok(value.map(|s| s.parse::<PixelBitDepth>()).transpose()?)
}

async fn cmd_transform(
    config_path: &Path,
    input: PathBuf,
    style: Option<String>,
    depth: Option<String>,
    output: Option<PathBuf>,
    quiet: bool,
) -> anyhow::Result<()> {
    let config = Config::load_from(config_path)?;
    let style = parse_style(style)?;
    let depth = parse_depth(depth)?;

    if !quiet {
        println!(
            "Transforming '{}' ({} / {})...",
            input.display(),
            style.unwrap_or(config.defaults.style),
            depth.unwrap_or(config.defaults.depth)
        );
    }

    info!(input = %input.display(), "Starting transformation");

    match pixel::transform(input, output, style, depth, &config).await {
        Ok(path) => {
            info!(output = %path.display(), "Transformation finished");
            if quiet {
                println!("{}", path.display());
            } else {
                println!("Pixel art saved to {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            warn!(code = e.code(), "Transformation did not complete");
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Hint [{}]: {}", e.code(), suggestion);
            }
            Err(e.into())
        }
    }
}

fn cmd_prompt(
    config_path: &Path,
    style: Option<String>,
    depth: Option<String>,
) -> anyhow::Result<()> {
    let config = Config::load_from(config_path)?;
    let style = parse_style(style)?.unwrap_or(config.defaults.style);
    let depth = parse_depth(depth)?.unwrap_or(config.defaults.depth);

    println!("{}", pixel::prompt(style, depth));
    Ok(())
}

fn cmd_styles(quiet: bool) {
    for style in PixelArtStyle::ALL {
        if quiet {
            println!("{}", style);
        } else {
            println!("{}", style);
            for line in style.instruction().lines() {
                println!("    {}", line);
            }
        }
    }
}

fn cmd_depths(quiet: bool) {
    for depth in PixelBitDepth::ALL {
        if quiet {
            println!("{}", depth);
        } else {
            println!("{:<8} {}", depth, depth.technical_spec());
        }
    }
}

fn cmd_config(config_path: &Path, action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_from(config_path)?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(config_path)?;
            config.set(&key, &value)?;
            config.save_to(config_path)?;
            if !quiet {
                println!("Set {} = {}", key, config.get(&key)?);
            }
        }
        ConfigAction::List => {
            let config = Config::load_from(config_path)?;
            for (key, value) in config.list()? {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset_at(config_path)?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }
    Ok(())
}
