use anyhow::{anyhow, bail, Context};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Parser;
use qrstyle_rs::color::{color_presets, find_preset};
use qrstyle_rs::qrstyle_canvas::Canvas2dContext;
use qrstyle_rs::{
    clipboard_image, default_file_name, serialize, ExportFormat, LogoImage, QrGenerator,
    SettingsFile,
};
use std::io::Write;
use std::path::{Path, PathBuf};

/// qrstyle: Render a QR code with styled dots and an optional logo
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Text or URL to encode
    #[clap(required_unless_present_any = ["print_settings", "list_presets"])]
    pub text: Option<String>,

    /// Output file. Defaults to qrcode_<timestamp>.<ext> in the current directory
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: png or jpeg. Inferred from the output file extension when omitted
    #[clap(short, long)]
    pub format: Option<String>,

    /// JSON settings file with optional "style" and "logo" objects
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Named color preset (see --list-presets)
    #[clap(long)]
    pub preset: Option<String>,

    /// Error correction level: L, M, Q or H
    #[clap(long)]
    pub ec: Option<String>,

    /// Foreground (module) color
    #[clap(long)]
    pub fg: Option<String>,

    /// Background color
    #[clap(long)]
    pub bg: Option<String>,

    /// Dot style for data modules: square, circle or rounded
    #[clap(long)]
    pub dot_style: Option<String>,

    /// Module size in pixels
    #[clap(long)]
    pub module_size: Option<u32>,

    /// Quiet zone width in modules
    #[clap(long)]
    pub border: Option<u32>,

    /// Logo image to place in the center
    #[clap(long)]
    pub logo: Option<PathBuf>,

    /// Logo size as a percentage of the image side
    #[clap(long)]
    pub logo_size: Option<u32>,

    /// White padding around the logo in pixels
    #[clap(long)]
    pub logo_padding: Option<u32>,

    /// Logo corner radius percentage: 0 is square, 100 is circle
    #[clap(long)]
    pub logo_radius: Option<u32>,

    /// Write the encoded image to stdout instead of a file
    #[clap(long, conflicts_with_all = ["output", "data_url"])]
    pub stdout: bool,

    /// Print the image as a PNG data URL instead of writing a file. Always PNG
    #[clap(long, conflicts_with_all = ["output", "format"])]
    pub data_url: bool,

    /// Print the resolved settings as JSON and exit
    #[clap(long)]
    pub print_settings: bool,

    /// List the built-in color presets and exit
    #[clap(long)]
    pub list_presets: bool,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = Args::parse();

    if args.list_presets {
        for preset in color_presets() {
            println!("{:<10} {} on {}", preset.name, preset.fg, preset.bg);
        }
        return Ok(());
    }

    let settings = resolve_settings(&args)?;
    if args.print_settings {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    let text = args.text.as_deref().unwrap_or_default();
    if text.is_empty() {
        bail!("Nothing to encode: the text is empty");
    }

    let format = resolve_format(args.format.as_deref(), args.output.as_deref())?;

    // Decode the logo before touching the surface
    let logo = args
        .logo
        .as_deref()
        .map(LogoImage::from_path)
        .transpose()?;

    let mut surface = Canvas2dContext::new(1, 1)?;
    let mut generator = QrGenerator::new();
    let outcome = generator.generate(
        text,
        &settings.style,
        logo.as_ref().map(|image| (image, &settings.logo)),
        &mut surface,
    )?;
    log::info!(
        "rendered {}x{} image from a {}-module matrix",
        outcome.width,
        outcome.height,
        outcome.matrix_size
    );

    if args.data_url {
        let image = clipboard_image(&surface)?;
        println!(
            "data:{};base64,{}",
            image.mime_type,
            STANDARD.encode(&image.bytes)
        );
        return Ok(());
    }

    let bytes = serialize(&surface, format)?;
    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&bytes)?;
        stdout.flush()?;
        return Ok(());
    }

    let path = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(default_file_name(
            format,
            chrono::Local::now().naive_local(),
        ))
    });
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write output to {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

/// Defaults, then the config file, then the preset, then individual flags.
fn resolve_settings(args: &Args) -> Result<SettingsFile, anyhow::Error> {
    let mut settings = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            SettingsFile::from_json(&json)?
        }
        None => SettingsFile::default(),
    };

    if let Some(name) = &args.preset {
        let preset = find_preset(name).ok_or_else(|| anyhow!("Unknown color preset: {name}"))?;
        settings.style.fg_color = preset.fg.to_string();
        settings.style.bg_color = preset.bg.to_string();
    }

    let style = &mut settings.style;
    if let Some(ec) = &args.ec {
        style.error_correction = ec.parse()?;
    }
    if let Some(fg) = &args.fg {
        style.fg_color = fg.clone();
    }
    if let Some(bg) = &args.bg {
        style.bg_color = bg.clone();
    }
    if let Some(dot_style) = &args.dot_style {
        style.dot_style = dot_style.parse()?;
    }
    if let Some(module_size) = args.module_size {
        style.module_size_px = module_size;
    }
    if let Some(border) = args.border {
        style.border_modules = border;
    }

    let logo = &mut settings.logo;
    if let Some(size) = args.logo_size {
        logo.size_percent = size;
    }
    if let Some(padding) = args.logo_padding {
        logo.padding_px = padding;
    }
    if let Some(radius) = args.logo_radius {
        logo.corner_radius_percent = radius;
    }

    settings.style.validate()?;
    settings.logo.validate()?;
    Ok(settings)
}

fn resolve_format(
    format: Option<&str>,
    output: Option<&Path>,
) -> Result<ExportFormat, anyhow::Error> {
    if let Some(format) = format {
        return Ok(format.parse()?);
    }
    let extension = output
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str());
    match extension {
        Some(ext) => ext
            .parse()
            .map_err(|_| anyhow!("Cannot infer image format from extension .{ext}; pass --format")),
        None => Ok(ExportFormat::Png),
    }
}
