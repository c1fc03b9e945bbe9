use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixel_quant::{PixelBuffer, Pixelator, Rgb};
use pixelator::models::{pick_color, PixelateConfig, CONFIG_ENV};
use pixelator::rendering::{read_png, render_grid_only, render_gridded, save_png};
use pixelator::services::PixelationService;

#[derive(Parser)]
#[command(name = "pixelator")]
#[command(about = "Pixelator - turn images into pixel art with a reduced palette")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pixelate an image and write the result as PNG
    Pixelate {
        /// Source PNG file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Output size as WxH (default: source size)
        #[arg(long, value_parser = parse_size)]
        display: Option<(usize, usize)>,

        /// Also write a grid overlay PNG to this path
        #[arg(long)]
        grid: Option<PathBuf>,

        /// Draw only the grid lines, without the image
        #[arg(long, requires = "grid")]
        grid_only: bool,

        /// Skip the oxipng pass
        #[arg(long)]
        no_optimize: bool,
    },
    /// Print the palette built for an image, one hex color per line
    Palette {
        /// Source PNG file
        input: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

/// Options shared by every command that runs the pipeline.
/// Flags override the config file.
#[derive(Args)]
struct PipelineArgs {
    /// YAML config file (default: $PIXELATOR_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Result width in logical pixels
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Result height in logical pixels
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Keep the source dimensions and only quantize
    #[arg(long)]
    keep_size: bool,

    /// Use width and height as given instead of matching the source aspect
    #[arg(long)]
    no_match_aspect: bool,

    /// Maximum palette size
    #[arg(short = 'n', long)]
    colors: Option<usize>,

    /// Block color method: nearest, average, mode or salient
    #[arg(short, long)]
    method: Option<String>,

    /// Dither kernel name, e.g. "floyd-steinberg" (enables dithering)
    #[arg(short, long)]
    kernel: Option<String>,

    /// Diffusion strength (0-1)
    #[arg(long)]
    delta: Option<f32>,

    /// Disable color reduction
    #[arg(long)]
    no_reduce: bool,

    /// Preserve rare vibrant colors and boost saturation
    #[arg(long)]
    vibrant: bool,

    /// Number of rare salient colors to preserve
    #[arg(long)]
    preserve: Option<usize>,

    /// Forced palette color as hex (repeatable)
    #[arg(short, long = "force")]
    force: Vec<String>,

    /// Force the source color at x,y (repeatable)
    #[arg(long, value_parser = parse_point)]
    pick: Vec<(usize, usize)>,
}

impl PipelineArgs {
    /// Load the config and apply command line overrides.
    fn config(&self) -> anyhow::Result<PixelateConfig> {
        let mut config = PixelateConfig::resolve(self.config.as_deref())?;

        if let Some(width) = self.width {
            config.result_width = width;
        }
        if let Some(height) = self.height {
            config.result_height = height;
        }
        config.keep_original_size |= self.keep_size;
        if self.no_match_aspect {
            config.match_aspect = false;
        }
        if let Some(colors) = self.colors {
            config.colors_count = colors;
        }
        if let Some(ref method) = self.method {
            config.pixelation_method = method.clone();
        }
        if let Some(ref kernel) = self.kernel {
            config.dith_kern = kernel.clone();
            config.enable_dithering = true;
        }
        if let Some(delta) = self.delta {
            config.dith_delta = delta;
        }
        if self.no_reduce {
            config.enable_reduce_colors = false;
        }
        config.prefer_vibrant |= self.vibrant;
        if let Some(preserve) = self.preserve {
            config.preserve_salient_count = preserve;
        }
        config.forced_colors.extend(self.force.iter().cloned());

        Ok(config.validate()?)
    }

    /// Config-driven pipeline for `source`.
    fn pixelator(
        &self,
        config: &PixelateConfig,
        source: &PixelBuffer,
    ) -> anyhow::Result<Pixelator> {
        let picked = self
            .pick
            .iter()
            .map(|&(x, y)| pick_color(source, x, y))
            .collect::<Result<Vec<Rgb>, _>>()?;
        let size = config.result_size(source.width(), source.height(), self.width, self.height);
        Ok(config.pixelator(size, &picked)?)
    }
}

fn parse_point(s: &str) -> Result<(usize, usize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("invalid x: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("invalid y: {e}"))?;
    Ok((x, y))
}

fn parse_size(s: &str) -> Result<(usize, usize), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH but got {s:?}"))?;
    let w: usize = w.trim().parse().map_err(|e| format!("invalid width: {e}"))?;
    let h: usize = h.trim().parse().map_err(|e| format!("invalid height: {e}"))?;
    if w == 0 || h == 0 {
        return Err("size must be at least 1x1".to_string());
    }
    Ok((w, h))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Pixelate {
            input,
            output,
            pipeline,
            display,
            grid,
            grid_only,
            no_optimize,
        }) => {
            init_logging();
            run_pixelate_command(
                &input,
                &output,
                &pipeline,
                display,
                grid.as_deref(),
                grid_only,
                !no_optimize,
            )
        }
        Some(Commands::Palette { input, pipeline }) => {
            init_logging();
            run_palette_command(&input, &pipeline)
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelator=warn,pixel_quant=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Pixelate a PNG file and write the display-size result
fn run_pixelate_command(
    input: &Path,
    output: &Path,
    pipeline: &PipelineArgs,
    display: Option<(usize, usize)>,
    grid: Option<&Path>,
    grid_only: bool,
    cli_optimize: bool,
) -> anyhow::Result<()> {
    let config = pipeline.config()?;
    let source = read_png(input)?;

    let mut pixelator = pipeline.pixelator(&config, &source)?;
    if let Some((w, h)) = display {
        pixelator = pixelator.display_size(w, h);
    }

    let mut service = PixelationService::new();
    let result = service.apply(&source, &pixelator)?;
    let optimize = cli_optimize && config.optimize_png;

    let bytes = save_png(output, &result.display, optimize)?;
    println!(
        "Rendered {} ({}x{} grid, {} bytes)",
        output.display(),
        result.small.width(),
        result.small.height(),
        bytes
    );

    if let Some(grid_path) = grid {
        let style = config.grid.style()?;
        let target_w = u32::try_from(result.display.width())?;
        let target_h = u32::try_from(result.display.height())?;
        let overlay = if grid_only {
            render_grid_only(&result.small, target_w, target_h, &style)?
        } else {
            render_gridded(&result.small, target_w, target_h, &style)?
        };
        let bytes = save_png(grid_path, &overlay, optimize)?;
        println!("Rendered {} ({} bytes)", grid_path.display(), bytes);
    }

    if let Some(ref palette) = result.palette {
        tracing::info!(colors = palette.len(), "Palette used");
    }
    Ok(())
}

/// Print the palette the pipeline builds for a PNG file
fn run_palette_command(input: &Path, pipeline: &PipelineArgs) -> anyhow::Result<()> {
    let config = pipeline.config()?;
    let source = read_png(input)?;
    let pixelator = pipeline.pixelator(&config, &source)?.reduce_colors(true);

    let output = pixelator.run(&source)?;
    match output.palette {
        Some(palette) => {
            for hex in palette.to_hex() {
                println!("{hex}");
            }
        }
        None => eprintln!("No palette built"),
    }
    Ok(())
}

/// Show version and configuration sources (default when no subcommand)
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var(CONFIG_ENV).ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("Pixelator v{VERSION}");
    println!("Pixel-art conversion with palette reduction and dithering\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG          = {}",
        rust_log.as_deref().unwrap_or("pixelator=warn (default)")
    );

    println!("\nConfig:");
    match config_file {
        Some(ref path) if Path::new(path).exists() => println!("  {path}"),
        Some(_) => println!("  defaults (file not found)"),
        None => println!("  defaults"),
    }

    println!("\nCommands:");
    println!("  pixelator pixelate <input> -o <output>   Pixelate a PNG");
    println!("  pixelator palette <input>                Print the palette");
    println!("\nRun 'pixelator --help' for all options.");
}
