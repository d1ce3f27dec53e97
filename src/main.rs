//! imgai CLI - batch image conversion, resizing and EXIF tooling

use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use console::style;
use tracing::{debug, info};

use imgai::commands::{self, RunContext};
use imgai::metadata::StripOptions;
use imgai::processing::validation::validate_format;
use imgai::processing::{ConvertOptions, ResizeOptions};
use imgai::{init_logging, BatchReport, Config, ImageFormat, ImgaiError, Language, Message, Translator};

/// imgai - image processing from the command line
#[derive(Parser)]
#[command(
    name = "imgai",
    version,
    about = "AI-powered image processing CLI tool",
    long_about = "imgai provides image processing from the command line:\n\
                  \n  • Image resizing\
                  \n  • Format conversion (PNG/JPEG/WebP)\
                  \n  • Batch processing with parallel workers\
                  \n  • EXIF metadata reading and removal\
                  \n  • Progress bar and dry-run mode\
                  \n\nExamples:\
                  \n  imgai resize photo.jpg --width 800\
                  \n  imgai convert image.png --format jpg\
                  \n  imgai exif photo.jpg\
                  \n  imgai strip photo.jpg"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (.toml or .yaml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Message language (en, ja)
    #[arg(long, global = true, env = "IMGAI_LANG", value_name = "LANG")]
    lang: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (errors and the final summary only)
    #[arg(short = 'Q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the batch summary as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Never draw a progress bar
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one or multiple images to a different format
    Convert(ConvertArgs),
    /// Resize one or multiple images
    Resize(ResizeArgs),
    /// Display EXIF metadata from an image
    Exif {
        /// Image to inspect
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },
    /// Remove EXIF metadata from images
    Strip(StripArgs),
}

/// Arguments shared by every batch command
#[derive(Args)]
struct BatchArgs {
    /// Image files or glob patterns
    #[arg(required = true, value_name = "IMAGE")]
    images: Vec<String>,

    /// Number of parallel workers (0 or less uses the default)
    #[arg(long, value_name = "COUNT", allow_negative_numbers = true)]
    workers: Option<i64>,

    /// Preview operations without executing them
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct ConvertArgs {
    #[command(flatten)]
    batch: BatchArgs,

    /// Target format (jpg, png, webp)
    #[arg(short, long, value_name = "FORMAT", value_parser = parse_format)]
    format: Option<ImageFormat>,

    /// JPEG quality (1-100, default: 90)
    #[arg(short, long, value_name = "QUALITY", allow_negative_numbers = true)]
    quality: Option<i64>,

    /// Output file path (single file only)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ResizeArgs {
    #[command(flatten)]
    batch: BatchArgs,

    /// Target width in pixels
    #[arg(short, long, value_name = "PIXELS", default_value_t = 0)]
    width: u32,

    /// Target height in pixels
    #[arg(long, value_name = "PIXELS", default_value_t = 0)]
    height: u32,

    /// Output file path (single file only)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct StripArgs {
    #[command(flatten)]
    batch: BatchArgs,

    /// Output file path (single file only, default: overwrite)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn parse_format(s: &str) -> Result<ImageFormat, String> {
    validate_format(s).map_err(|e| e.to_string())
}

/// Global flags that shape how results are shown
#[derive(Clone, Copy)]
struct Presentation {
    json: bool,
    messages: Translator,
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", style("Error").red().bold(), e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let Cli { command, config, lang, verbose, quiet, json, no_progress } = cli;

    let mut config = Config::load(config.as_ref()).context("failed to load configuration")?;
    if verbose {
        config.logging.level = "debug".to_string();
    } else if quiet {
        config.logging.level = "error".to_string();
    }
    init_logging(&config.logging)?;

    let language = Language::resolve(lang.as_deref().or(config.language.as_deref()));
    let messages = Translator::new(language);
    debug!("Using language {}", language);

    let mut ctx = RunContext::new(config.processing, messages);
    ctx.quiet = quiet || json;
    if no_progress || json {
        ctx.processing.show_progress = false;
    }
    let shown = Presentation { json, messages };

    match command {
        Commands::Convert(args) => {
            let format = args
                .format
                .or(config.output.default_format)
                .ok_or_else(|| anyhow!("--format is required (jpg, png, webp)"))?;
            let quality = match args.quality {
                Some(q) => u8::try_from(q)
                    .map_err(|_| ImgaiError::invalid_parameters(messages.render(Message::QualityRange)))?,
                None => config.output.default_quality,
            };
            let options = ConvertOptions { format, quality, output: args.output };

            let ctx = batch_context(ctx, &args.batch);
            let report = commands::convert::run(&args.batch.images, &options, &ctx)?;
            finish(&report, ctx.dry_run, shown)
        }
        Commands::Resize(args) => {
            let options = ResizeOptions {
                width: args.width,
                height: args.height,
                output: args.output,
            };

            let ctx = batch_context(ctx, &args.batch);
            let report = commands::resize::run(&args.batch.images, &options, &ctx)?;
            finish(&report, ctx.dry_run, shown)
        }
        Commands::Strip(args) => {
            let options = StripOptions { output: args.output };

            let ctx = batch_context(ctx, &args.batch);
            let report = commands::strip::run(&args.batch.images, &options, &ctx)?;
            finish(&report, ctx.dry_run, shown)
        }
        Commands::Exif { image } => {
            let ctx = RunContext { quiet: json, ..ctx };
            let data = commands::exif::run(&image, &ctx)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            Ok(0)
        }
    }
}

/// Apply per-command batch flags on top of the shared context
fn batch_context(mut ctx: RunContext, args: &BatchArgs) -> RunContext {
    if let Some(workers) = args.workers {
        // Negative counts fall back to the default like zero does
        ctx.processing.workers = usize::try_from(workers).unwrap_or(0);
    }
    ctx.processing = ctx.processing.normalized();
    ctx.dry_run = args.dry_run;
    info!("Using {} workers", ctx.processing.workers);
    ctx
}

/// Print the report and pick the exit code
fn finish(report: &BatchReport, dry_run: bool, shown: Presentation) -> anyhow::Result<i32> {
    if shown.json {
        println!("{}", report.to_json()?);
    } else {
        report.print_failures(shown.messages);
        if !dry_run && !report.single_file {
            report.print_summary(shown.messages);
        }
    }

    if report.is_success() {
        Ok(0)
    } else {
        if !shown.json {
            eprintln!("{}: some images failed to process", style("Error").red().bold());
        }
        Ok(1)
    }
}
