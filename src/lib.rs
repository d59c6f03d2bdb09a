//! Printable strips of asset labels for thermal tape printers.
//!
//! Each label pairs a QR symbol encoding `<url><asset id>` with the asset ID
//! itself, split over two lines. Labels for a contiguous range of IDs are
//! placed side by side on one strip, saved as PNG and optionally handed to a
//! label printer.
//!
//! # Usage
//! ```no_run
//! # fn test() -> Result<(), asset_labels::LabelError> {
//! use asset_labels::{generate_strip, AssetRange, FontResolver, Layout, StripJob};
//!
//! let layout = Layout::default();
//! let font = FontResolver::default().resolve(layout.font_size);
//! let job = StripJob {
//!     range: AssetRange::new("001-000".parse()?, "001-009".parse()?)?,
//!     url: "https://box.example.com/a/",
//!     output: std::path::Path::new("asset_labels.png"),
//!     printer: None,
//! };
//! let outcome = generate_strip(&job, &font, &layout)?;
//! println!("{} labels, {} px wide", outcome.labels, outcome.width);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docs_rs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

mod asset_id;
mod builtin;
mod error;
mod font;
mod label;
mod layout;
mod printer;
mod strip;

pub use asset_id::{AssetId, AssetRange};
pub use builtin::BuiltinFont;
pub use error::{LabelError, Result};
pub use font::{FontResolver, LabelFont};
pub use label::{qr_payload, render_label, render_qr, render_text, Label};
pub use layout::{ErrorCorrection, Layout};
pub use printer::PrintCommand;
pub use strip::{
    assemble, generate_strip, render_labels, PrintStatus, StripJob, StripOutcome, DEFAULT_OUTPUT,
};

#[cfg(feature = "bin")]
pub mod cli;
