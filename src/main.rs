use clap::{Args, Parser, Subcommand};
use passport_photo::imaging::{
    Dimension, SLIDER_MAX, SLIDER_MIN, in_slider_range, supported_input_extensions,
};
use passport_photo::session::{Session, SessionError};
use passport_photo::{config, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    if env!("PASSPORT_PHOTO_ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("PASSPORT_PHOTO_GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once at startup
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "passport-photo")]
#[command(about = "Brighten and clean up passport and ID photos")]
#[command(long_about = "\
Brighten and clean up passport and ID photos

Each photo goes through four enhancement stages, always in this order:

  brightness   0 = black, 1 = unchanged
  contrast     0 = flat gray at the mean brightness, 1 = unchanged
  saturation   0 = grayscale, 1 = unchanged
  sharpness    0 = softened, 1 = unchanged, >1 = sharpened

Loading a photo applies the Passport preset (1.20 / 1.15 / 1.10 / 1.10).
Presets are applied first, then any per-factor flags.

Examples:

  passport-photo apply me.jpg                   # → me_whitened.jpg
  passport-photo apply me.jpg --preset visa -o visa.png
  passport-photo apply me.jpg --brightness 1.4 --preview preview.png

Run 'passport-photo gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enhance a photo and save the result
    Apply(ApplyArgs),
    /// List the built-in presets
    Presets,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Args)]
struct ApplyArgs {
    /// Photo to enhance (jpg, jpeg, png, bmp, gif)
    input: PathBuf,

    /// Where to save; the format follows the extension.
    /// Defaults to <stem>_whitened.jpg next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Preset to start from (Passport, Visa, Bright, Neutral)
    #[arg(long)]
    preset: Option<String>,

    /// Brightness factor, overrides the preset
    #[arg(long)]
    brightness: Option<f32>,

    /// Contrast factor
    #[arg(long)]
    contrast: Option<f32>,

    /// Saturation (color) factor
    #[arg(long)]
    saturation: Option<f32>,

    /// Sharpness factor
    #[arg(long)]
    sharpness: Option<f32>,

    /// Also save a preview scaled to the configured box
    #[arg(long)]
    preview: Option<PathBuf>,
}

impl ApplyArgs {
    /// Per-factor overrides in pipeline order.
    fn overrides(&self) -> impl Iterator<Item = (Dimension, f32)> + '_ {
        Dimension::ALL.into_iter().filter_map(|dimension| {
            let value = match dimension {
                Dimension::Brightness => self.brightness,
                Dimension::Contrast => self.contrast,
                Dimension::Saturation => self.saturation,
                Dimension::Sharpness => self.sharpness,
            };
            value.map(|v| (dimension, v))
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passport_photo=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Apply(args) => {
            let config = config::load_config(&cli.config_dir)?;
            init_thread_pool(&config.processing);
            run_apply(Session::new(config), &args)?;
        }
        Command::Presets => {
            output::print_presets();
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_apply(mut session: Session, args: &ApplyArgs) -> Result<(), Box<dyn std::error::Error>> {
    warn_if_unlisted(&args.input);
    session.load(&args.input)?;

    if let Some(name) = &args.preset {
        session.apply_preset(name)?;
    }
    for (dimension, value) in args.overrides() {
        if !in_slider_range(value) {
            tracing::warn!(
                %dimension,
                value,
                min = SLIDER_MIN,
                max = SLIDER_MAX,
                "Factor is outside the slider range"
            );
        }
        session.set_param(dimension, value)?;
    }

    if let (Some(source), Some(params)) = (session.source(), session.params()) {
        output::print_session_summary(&args.input, source.dimensions(), &params);
    }

    let target = match &args.output {
        Some(path) => path.clone(),
        None => session
            .suggested_export_path()
            .ok_or(SessionError::NoImage)?,
    };
    let exported = session.export(&target)?;
    println!(
        "{}",
        output::format_export_line(&exported.path, exported.format)
    );

    if let Some(path) = &args.preview {
        let preview = session.preview().ok_or(SessionError::NoImage)?;
        preview.save(path)?;
        println!(
            "{}",
            output::format_preview_line(path, preview.dimensions())
        );
    }
    Ok(())
}

/// The decoder sniffs content, so an unexpected extension is only worth a warning.
fn warn_if_unlisted(input: &Path) {
    let listed = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        });
    if !listed {
        tracing::warn!(path = %input.display(), "Input extension is not a known photo type");
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. User can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
