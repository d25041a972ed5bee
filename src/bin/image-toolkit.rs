use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use image::Rgb;

use image_toolkit::{
    default_output_path, process_directory, process_file, ColorEffect, EnhanceParams, FilterKind,
    ProcessOptions, ProcessResult, ResizeSpec, Tool, WatermarkSpec,
};

#[derive(Parser)]
#[command(
    name = "image-toolkit",
    about = "Apply one editing tool to an image or a directory of images",
    version,
    after_help = "Simple usage: image-toolkit vignette photo.jpg  (writes photo_edited.jpg)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct IoArgs {
    /// Input image file or directory
    input: String,

    /// Output file or directory (default: {name}_edited.{ext})
    #[arg(short, long)]
    output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EffectArg {
    Grayscale,
    Sepia,
    Negative,
    BlackWhite,
}

impl From<EffectArg> for ColorEffect {
    fn from(arg: EffectArg) -> Self {
        match arg {
            EffectArg::Grayscale => ColorEffect::Grayscale,
            EffectArg::Sepia => ColorEffect::Sepia,
            EffectArg::Negative => ColorEffect::Negative,
            EffectArg::BlackWhite => ColorEffect::BlackWhite,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    Blur,
    Contour,
    Emboss,
    EdgeEnhance,
    Smooth,
    Sharpen,
}

impl From<FilterArg> for FilterKind {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Blur => FilterKind::Blur,
            FilterArg::Contour => FilterKind::Contour,
            FilterArg::Emboss => FilterKind::Emboss,
            FilterArg::EdgeEnhance => FilterKind::EdgeEnhance,
            FilterArg::Smooth => FilterKind::Smooth,
            FilterArg::Sharpen => FilterKind::Sharpen,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Darken the image periphery radially
    Vignette {
        #[command(flatten)]
        io: IoArgs,

        /// Darkening strength (0.0-1.0; above 1.0 darkens more aggressively)
        #[arg(short, long, default_value = "0.5")]
        intensity: f32,
    },

    /// Adjust brightness, contrast, saturation, and sharpness
    Enhance {
        #[command(flatten)]
        io: IoArgs,

        /// Brightness factor (0.0-2.0, 1.0 = unchanged)
        #[arg(long, default_value = "1.0")]
        brightness: f32,

        /// Contrast factor (0.0-2.0, 1.0 = unchanged)
        #[arg(long, default_value = "1.0")]
        contrast: f32,

        /// Saturation factor (0.0-2.0, 1.0 = unchanged)
        #[arg(long, default_value = "1.0")]
        saturation: f32,

        /// Sharpness factor (0.0-2.0, 1.0 = unchanged)
        #[arg(long, default_value = "1.0")]
        sharpness: f32,
    },

    /// Apply a color effect
    Effect {
        #[command(flatten)]
        io: IoArgs,

        /// The effect to apply
        #[arg(value_enum)]
        effect: EffectArg,
    },

    /// Apply a fixed convolution filter
    Filter {
        #[command(flatten)]
        io: IoArgs,

        /// The filter to apply
        #[arg(value_enum)]
        filter: FilterArg,
    },

    /// Detect edges with the Canny algorithm
    Edges {
        #[command(flatten)]
        io: IoArgs,

        /// Lower hysteresis threshold (0-255)
        #[arg(long, default_value = "100")]
        low: f32,

        /// Upper hysteresis threshold (0-255)
        #[arg(long, default_value = "200")]
        high: f32,
    },

    /// Rotate counter-clockwise, expanding the canvas
    Rotate {
        #[command(flatten)]
        io: IoArgs,

        /// Rotation angle in degrees (-180 to 180)
        #[arg(short, long)]
        degrees: f32,
    },

    /// Resize with Lanczos3 resampling
    Resize {
        #[command(flatten)]
        io: IoArgs,

        /// Target width; height follows the aspect ratio unless also given
        #[arg(long)]
        width: Option<u32>,

        /// Target height; width follows the aspect ratio unless also given
        #[arg(long)]
        height: Option<u32>,
    },

    /// Composite translucent text into the bottom-right corner
    Watermark {
        #[command(flatten)]
        io: IoArgs,

        /// Watermark text
        #[arg(short, long, default_value = "\u{a9} 2025")]
        text: String,

        /// Blend opacity (0.0-1.0)
        #[arg(long, default_value = "0.5")]
        opacity: f32,

        /// Font size in pixels
        #[arg(long, default_value = "24")]
        size: f32,
    },

    /// Surround the image with a solid border
    Frame {
        #[command(flatten)]
        io: IoArgs,

        /// Border thickness in pixels (1-50)
        #[arg(short, long, default_value = "10")]
        width: u32,

        /// Border color as #RRGGBB
        #[arg(short, long, default_value = "#000000")]
        color: String,
    },

    /// Extract text from an image (requires the `ocr` feature)
    #[cfg(feature = "ocr")]
    ExtractText {
        /// Input image file
        input: String,

        /// Directory containing text-detection.rten and text-recognition.rten
        #[arg(long)]
        models_dir: Option<String>,
    },

    /// Cut out the foreground, writing a PNG with transparency
    /// (requires the `background` feature)
    #[cfg(feature = "background")]
    RemoveBackground {
        /// Input image file
        input: String,

        /// Output PNG file (default: {name}_cutout.png)
        #[arg(short, long)]
        output: Option<String>,

        /// Directory containing segmentation.rten
        #[arg(long)]
        models_dir: Option<String>,
    },
}

/// Parse a `#RRGGBB` hex color.
fn parse_hex_color(s: &str) -> Option<Rgb<u8>> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb([r, g, b]))
}

fn main() {
    let cli = Cli::parse();

    #[cfg(feature = "ocr")]
    if let Command::ExtractText { input, models_dir } = &cli.command {
        run_extract_text(input, models_dir.as_deref());
        return;
    }

    #[cfg(feature = "background")]
    if let Command::RemoveBackground {
        input,
        output,
        models_dir,
    } = &cli.command
    {
        run_remove_background(input, output.as_deref(), models_dir.as_deref());
        return;
    }

    let (io, tool) = match cli.command {
        Command::Vignette { io, intensity } => (io, Tool::Vignette { intensity }),
        Command::Enhance {
            io,
            brightness,
            contrast,
            saturation,
            sharpness,
        } => (
            io,
            Tool::Enhance(EnhanceParams {
                brightness,
                contrast,
                saturation,
                sharpness,
            }),
        ),
        Command::Effect { io, effect } => (io, Tool::ColorEffect(effect.into())),
        Command::Filter { io, filter } => (io, Tool::Filter(filter.into())),
        Command::Edges { io, low, high } => (io, Tool::EdgeDetect { low, high }),
        Command::Rotate { io, degrees } => (io, Tool::Rotate { degrees }),
        Command::Resize { io, width, height } => (io, Tool::Resize(ResizeSpec { width, height })),
        Command::Watermark {
            io,
            text,
            opacity,
            size,
        } => (
            io,
            Tool::Watermark(WatermarkSpec {
                text,
                opacity,
                scale: size,
            }),
        ),
        Command::Frame { io, width, color } => {
            let Some(color) = parse_hex_color(&color) else {
                eprintln!("Error: Invalid color '{color}', expected #RRGGBB");
                process::exit(1);
            };
            (io, Tool::Frame { width, color })
        }
        #[cfg(feature = "ocr")]
        Command::ExtractText { .. } => unreachable!("handled above"),
        #[cfg(feature = "background")]
        Command::RemoveBackground { .. } => unreachable!("handled above"),
    };

    let opts = ProcessOptions {
        verbose: io.verbose,
        quiet: io.quiet,
    };

    let input_path = Path::new(&io.input);
    if !input_path.exists() {
        eprintln!("Error: Input path does not exist: {}", io.input);
        process::exit(1);
    }

    let results = if input_path.is_dir() {
        let output_dir = if let Some(o) = &io.output {
            PathBuf::from(o)
        } else {
            eprintln!("Error: Output directory is required for batch processing");
            eprintln!("Usage: image-toolkit <tool> <input_dir> -o <output_dir>");
            process::exit(1);
        };
        process_directory(input_path, &output_dir, &tool)
    } else {
        let output_path = match &io.output {
            Some(o) => PathBuf::from(o),
            None => default_output_path(input_path),
        };
        vec![process_file(input_path, &output_path, &tool)]
    };

    let mut success_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, opts);
        if r.success {
            success_count += 1;
        } else {
            fail_count += 1;
        }
    }

    if results.len() > 1 && !opts.quiet {
        eprintln!();
        eprint!("[Summary] Processed: {success_count}");
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    if fail_count > 0 {
        process::exit(1);
    }
}

#[cfg(feature = "ocr")]
fn run_extract_text(input: &str, models_dir: Option<&str>) {
    use image_toolkit::ocr::{OcrConfig, TextExtractor};

    let config = models_dir.map_or_else(OcrConfig::default, OcrConfig::from_dir);
    let extractor = match TextExtractor::new(&config) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Fatal: Failed to initialize OCR engine: {e}");
            process::exit(1);
        }
    };

    let img = match image::open(input) {
        Ok(img) => img.to_rgb8(),
        Err(e) => {
            eprintln!("Error: Failed to load {input}: {e}");
            process::exit(1);
        }
    };

    match extractor.extract_text(&img) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(feature = "background")]
fn run_remove_background(input: &str, output: Option<&str>, models_dir: Option<&str>) {
    use image_toolkit::background::{BackgroundConfig, BackgroundRemover};

    let config = models_dir.map_or_else(BackgroundConfig::default, BackgroundConfig::from_dir);
    let remover = match BackgroundRemover::new(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Fatal: Failed to load segmentation model: {e}");
            process::exit(1);
        }
    };

    let img = match image::open(input) {
        Ok(img) => img.to_rgb8(),
        Err(e) => {
            eprintln!("Error: Failed to load {input}: {e}");
            process::exit(1);
        }
    };

    // Transparency needs PNG, so the default output swaps the extension.
    let output_path = output.map_or_else(
        || Path::new(input).with_file_name(cutout_file_name(Path::new(input))),
        PathBuf::from,
    );

    match remover.remove(&img).and_then(|cutout| {
        cutout.save(&output_path)?;
        Ok(())
    }) {
        Ok(()) => eprintln!("[OK] {}", output_path.display()),
        Err(e) => {
            eprintln!("[FAIL] {input}: {e}");
            process::exit(1);
        }
    }
}

#[cfg(feature = "background")]
fn cutout_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map_or_else(|| "image".to_string(), |s| s.to_string_lossy().to_string());
    format!("{stem}_cutout.png")
}

fn print_result(result: &ProcessResult, opts: ProcessOptions) {
    if opts.quiet && result.success {
        return;
    }

    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.success {
        if !opts.quiet {
            eprintln!("[OK] {filename}");
        }
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }

    if opts.verbose && !result.message.is_empty() {
        eprintln!("  -> {}", result.message);
    }
}
