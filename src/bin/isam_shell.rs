//! ISAM Shell Binary
//!
//! Interactive shell over an in-memory ISAM structure.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use isam::config::ConfigBuilder;
use isam::shell::{Session, HELP_TEXT};
use isam::{Config, DensityPolicy, Manager};
use tracing_subscriber::{fmt, EnvFilter};

/// ISAM Shell
#[derive(Parser, Debug)]
#[command(name = "isam-shell")]
#[command(about = "Interactive ISAM simulator: sorted blocks, sparse index, overflow area")]
#[command(version)]
struct Args {
    /// TOML config file (flags override its values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Records per main block
    #[arg(short = 'n', long)]
    block_capacity: Option<usize>,

    /// Maximum number of main blocks
    #[arg(short, long)]
    blocks: Option<usize>,

    /// Overflow block capacity
    #[arg(short, long)]
    overflow_capacity: Option<usize>,

    /// When a block counts as dense: full | half-full
    #[arg(short, long)]
    density: Option<DensityPolicy>,

    /// No banner and no prompt (for piped scripts)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    // Initialize tracing/logging (stderr keeps stdout for the transcript)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,isam=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("ISAM shell v{}", isam::VERSION);
    tracing::info!(
        "Block capacity: {}, blocks: {}, overflow capacity: {}, density: {}",
        config.block_capacity,
        config.max_blocks,
        config.overflow_capacity,
        config.density
    );

    let stdin = io::stdin();
    let interactive = !args.quiet && stdin.is_terminal();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if interactive {
        if let Err(e) = writeln!(out, "{}\n", HELP_TEXT) {
            tracing::error!("Failed to write banner: {}", e);
            std::process::exit(1);
        }
    }

    let mut session = Session::new(stdin.lock(), out, Manager::new(config)).with_prompt(interactive);

    if let Err(e) = session.run() {
        tracing::error!("Session error: {}", e);
        std::process::exit(1);
    }

    tracing::info!(
        "Session ended after {} commands",
        session.commands_executed()
    );
}

/// Layer flags over the config file (or the defaults), then validate
fn build_config(args: &Args) -> isam::Result<Config> {
    let base = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut builder = ConfigBuilder::from_config(base);
    if let Some(capacity) = args.block_capacity {
        builder = builder.block_capacity(capacity);
    }
    if let Some(blocks) = args.blocks {
        builder = builder.max_blocks(blocks);
    }
    if let Some(capacity) = args.overflow_capacity {
        builder = builder.overflow_capacity(capacity);
    }
    if let Some(density) = args.density {
        builder = builder.density(density);
    }

    let config = builder.build();
    config.validate()?;
    Ok(config)
}
