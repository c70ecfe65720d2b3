//! fourier - image filtering CLI
//!
//! Color conversion, blurs and Canny edge detection on JPEG and PNG files.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fourier")]
#[command(author, version, about = "Image color conversion, blurring and edge detection")]
#[command(long_about = "
Spatial filtering of raster images held as per-channel float planes.

Examples:
  fourier info photo.jpg                       # Show image info
  fourier convert photo.jpg -o gray.png --to gray
  fourier blur photo.jpg -o soft.jpg --sigma 2 --radius 6
  fourier blur photo.jpg -o soft.jpg --kind box --radius 3
  fourier edges photo.jpg -o edges.png         # Canny with default thresholds
  fourier dump tiny.png -o tiny.txt            # Per-channel sample dump
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image dimensions and color space
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert to another color space and/or file format
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Apply gaussian or box blur
    Blur(BlurArgs),

    /// Detect edges (blur, gradient, non-maximum suppression, double threshold)
    #[command(visible_alias = "e")]
    Edges(EdgesArgs),

    /// Print every sample of every channel
    Dump(DumpArgs),
}

/// Target color space for `convert`.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Target {
    Rgb,
    Ycbcr,
    Gray,
}

/// Blur implementation for `blur`.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlurKind {
    /// Separable gaussian (row then column pass)
    Gaussian,
    /// Full 2-D gaussian kernel
    Naive,
    /// Separable box average
    Box,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Target color space (keeps the decoded one if omitted)
    #[arg(short, long, value_enum)]
    to: Option<Target>,

    /// Quality (1-100, for JPEG)
    #[arg(short = 'q', long, default_value = "90")]
    quality: u8,
}

#[derive(Args)]
struct BlurArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Blur implementation
    #[arg(short, long, value_enum, default_value = "gaussian")]
    kind: BlurKind,

    /// Gaussian standard deviation
    #[arg(short, long, default_value = "1.4")]
    sigma: f32,

    /// Kernel radius in pixels
    #[arg(short, long, default_value = "2")]
    radius: usize,

    /// Quality (1-100, for JPEG)
    #[arg(short = 'q', long, default_value = "90")]
    quality: u8,
}

#[derive(Args)]
struct EdgesArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Pre-blur standard deviation
    #[arg(short, long, default_value = "1.4")]
    sigma: f32,

    /// Pre-blur radius
    #[arg(short, long, default_value = "2")]
    radius: usize,

    /// Strong edge threshold
    #[arg(long, default_value = "76.8")]
    upper: f32,

    /// Weak edge threshold
    #[arg(long, default_value = "25.6")]
    lower: f32,

    /// Quality (1-100, for JPEG)
    #[arg(short = 'q', long, default_value = "90")]
    quality: u8,
}

#[derive(Args)]
struct DumpArgs {
    /// Input image
    input: PathBuf,

    /// Write the dump to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Blur(args) => commands::blur::run(args, cli.verbose),
        Commands::Edges(args) => commands::edges::run(args, cli.verbose),
        Commands::Dump(args) => commands::dump::run(args, cli.verbose),
    }
}
