use std::path::{Path, PathBuf};

use image::{imageops, GrayImage, ImageFormat, Luma};

use crate::asset_id::AssetRange;
use crate::error::Result;
use crate::font::LabelFont;
use crate::label::{render_label, Label};
use crate::layout::Layout;
use crate::printer::PrintCommand;

/// File written when no output path is given.
pub const DEFAULT_OUTPUT: &str = "asset_labels.png";

/// What happened to the optional print step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintStatus {
    /// Printing was not requested.
    Skipped,
    /// The print utility reported success.
    Printed,
    /// The print utility failed; the saved image is still valid.
    Failed(String),
}

/// Summary of a finished strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOutcome {
    /// Where the image was written.
    pub path: PathBuf,
    /// Number of labels on the strip.
    pub labels: usize,
    /// Strip width in pixels.
    pub width: u32,
    /// Strip height in pixels; always the tape height.
    pub height: u32,
    /// Result of the print step.
    pub print: PrintStatus,
}

/// One strip to produce.
#[derive(Debug, Clone)]
pub struct StripJob<'a> {
    /// Assets to label, in ascending order.
    pub range: AssetRange,
    /// URL prefix every QR payload starts with.
    pub url: &'a str,
    /// Destination of the PNG.
    pub output: &'a Path,
    /// Printer to send the strip to, if any.
    pub printer: Option<&'a PrintCommand>,
}

/// Renders one label per ID of `range`, in ascending order.
///
/// # Errors
/// Propagates the first label that fails to render.
pub fn render_labels(
    range: AssetRange,
    url: &str,
    font: &LabelFont,
    layout: &Layout,
) -> Result<Vec<Label>> {
    range.iter().map(|id| render_label(id, url, font, layout)).collect()
}

/// Places `labels` left to right, separated by the layout's label gap.
///
/// The result is `sum(widths) + (n - 1) * label_gap` wide and exactly the
/// tape height tall.
pub fn assemble(labels: &[Label], layout: &Layout) -> GrayImage {
    let gaps = labels.len().saturating_sub(1) as u32 * layout.label_gap;
    let total_w = labels.iter().map(Label::width).sum::<u32>() + gaps;

    let mut strip = GrayImage::from_pixel(total_w, layout.tape_height, Luma([255u8]));
    let mut x_cursor = 0i64;
    for label in labels {
        imageops::overlay(&mut strip, &label.image, x_cursor, 0);
        x_cursor += i64::from(label.width() + layout.label_gap);
    }

    strip
}

/// Renders, saves and optionally prints the strip described by `job`.
///
/// The image is always written as PNG. A failing printer is reported in
/// [`StripOutcome::print`] but is not an error.
///
/// # Errors
/// Fails when a label cannot be rendered or the image cannot be written.
pub fn generate_strip(
    job: &StripJob<'_>,
    font: &LabelFont,
    layout: &Layout,
) -> Result<StripOutcome> {
    let labels = render_labels(job.range, job.url, font, layout)?;
    let strip = assemble(&labels, layout);

    strip.save_with_format(job.output, ImageFormat::Png)?;
    tracing::info!(
        path = %job.output.display(),
        labels = labels.len(),
        width = strip.width(),
        "saved label strip"
    );

    let print = match job.printer {
        None => PrintStatus::Skipped,
        Some(printer) => match printer.print(job.output) {
            Ok(()) => {
                tracing::info!(path = %job.output.display(), "printed label strip");
                PrintStatus::Printed
            }
            Err(e) => {
                tracing::debug!(error = %e, path = %job.output.display(), "printing failed");
                PrintStatus::Failed(e.to_string())
            }
        },
    };

    Ok(StripOutcome {
        path: job.output.to_owned(),
        labels: labels.len(),
        width: strip.width(),
        height: strip.height(),
        print,
    })
}
