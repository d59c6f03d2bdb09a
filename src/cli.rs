//! Command line front end of the `label-strip` binary.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::asset_id::{AssetId, AssetRange};
use crate::error::{LabelError, Result};
use crate::font::{FontResolver, LabelFont};
use crate::layout::Layout;
use crate::printer::PrintCommand;
use crate::strip::{generate_strip, StripJob, StripOutcome, DEFAULT_OUTPUT};

/// Generate asset labels with QR codes.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Starting asset ID (e.g., '001-086')
    #[arg(long)]
    pub start: String,
    /// Ending asset ID (e.g., '001-086')
    #[arg(long)]
    pub end: String,
    /// The domain for the QR code URL (e.g., 'box.example.com')
    #[arg(long, env = "HOMEBOX_DOMAIN", value_parser = NonEmptyStringValueParser::new())]
    pub domain: String,
    /// Automatically print the generated label strip
    #[arg(long)]
    pub print: bool,
    /// Output filename; always written as PNG
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
    /// Layout overrides as a .ron or .json file
    #[arg(long)]
    pub layout: Option<PathBuf>,
    /// Font file to use instead of asking the font matcher
    #[arg(long)]
    pub font: Option<PathBuf>,
    /// Program invoked as `<PROGRAM> --image <OUTPUT>` to print
    #[arg(long, default_value = "ptouch-print")]
    pub printer_command: String,
    /// Program queried for a bold system font
    #[arg(long, default_value = "fc-match")]
    pub font_matcher: String,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parses both IDs and checks the requested range.
    ///
    /// Call after [`init_logger`]; parsing may log warnings.
    ///
    /// # Errors
    /// Returns [`LabelError::Format`] for a malformed ID and
    /// [`LabelError::InvertedRange`] when `--start` is after `--end`.
    pub fn validate(&self) -> Result<AssetRange> {
        let start: AssetId = self.start.parse()?;
        let end: AssetId = self.end.parse()?;
        AssetRange::new(start, end)
    }

    /// URL prefix encoded before every asset ID.
    pub fn url(&self) -> String {
        format!("https://{}/a/", self.domain)
    }
}

/// Reads a [`Layout`] from a RON or JSON file, chosen by extension.
///
/// Fields missing from the file keep their defaults.
///
/// # Errors
/// Returns [`LabelError::Layout`] for unreadable files, unknown extensions
/// and malformed contents.
pub fn load_layout(path: &Path) -> Result<Layout> {
    let layout_error = |message: String| LabelError::Layout {
        message: format!("{}: {message}", path.display()),
    };

    let text = std::fs::read_to_string(path).map_err(|e| layout_error(e.to_string()))?;
    match path.extension().map(|os_str| os_str.to_str()) {
        Some(Some("ron")) => ron::from_str(&text).map_err(|e| layout_error(e.to_string())),
        Some(Some("json")) => serde_json::from_str(&text).map_err(|e| layout_error(e.to_string())),
        _ => Err(layout_error("unsupported layout format, expected .ron or .json".to_owned())),
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence.
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "asset_labels=debug,info"
    } else {
        "asset_labels=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed when embedded or under test.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .compact(),
        )
        .try_init();
}

/// Resolves the font the labels are drawn with.
///
/// # Errors
/// Fails only when an explicit `--font` file is unusable.
pub fn resolve_font(args: &Args, layout: &Layout) -> Result<LabelFont> {
    match &args.font {
        Some(path) => LabelFont::from_file(path, layout.font_size),
        None => {
            let resolver = FontResolver::new(&args.font_matcher, &layout.font_query);
            Ok(resolver.resolve(layout.font_size))
        }
    }
}

/// Validates `args`, then renders, saves and optionally prints the strip.
///
/// Nothing is written when validation fails.
///
/// # Errors
/// Validation, layout and font errors, plus anything
/// [`generate_strip`] reports.
pub fn run(args: &Args) -> Result<StripOutcome> {
    let range = args.validate()?;
    let layout = match &args.layout {
        Some(path) => load_layout(path)?,
        None => Layout::default(),
    };
    let font = resolve_font(args, &layout)?;
    tracing::debug!(?font, ?layout, "resolved label settings");

    let url = args.url();
    let printer = args.print.then(|| PrintCommand::new(&args.printer_command));
    let job = StripJob {
        range,
        url: &url,
        output: &args.output,
        printer: printer.as_ref(),
    };

    generate_strip(&job, &font, &layout)
}
