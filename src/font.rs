use std::path::{Path, PathBuf};
use std::process::Command;

use image::{GrayImage, Luma};
use rusttype::{point, Font, Scale};

use crate::builtin::BuiltinFont;
use crate::error::{LabelError, Result};

/// A face able to draw the text half of a label.
pub enum LabelFont {
    /// A TrueType/OpenType face rasterized with `rusttype`.
    TrueType {
        /// Parsed font data.
        font: Font<'static>,
        /// Pixel scale the face is drawn at.
        scale: Scale,
    },
    /// The bundled bitmap fallback.
    Builtin(BuiltinFont),
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelFont::TrueType { scale, .. } => {
                f.debug_struct("TrueType").field("scale", scale).finish()
            }
            LabelFont::Builtin(font) => f.debug_tuple("Builtin").field(font).finish(),
        }
    }
}

impl LabelFont {
    /// The bitmap fallback sized for `size` pixels.
    pub fn builtin(size: f32) -> Self {
        LabelFont::Builtin(BuiltinFont::for_size(size))
    }

    /// Loads a font file and sizes it to `size` pixels.
    ///
    /// # Errors
    /// Returns [`LabelError::Font`] when the file cannot be read or parsed.
    pub fn from_file(path: &Path, size: f32) -> Result<Self> {
        let font_data = std::fs::read(path).map_err(|e| LabelError::Font {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        let font = Font::try_from_vec(font_data).ok_or_else(|| LabelError::Font {
            path: path.to_owned(),
            reason: "not a TrueType or OpenType font".to_owned(),
        })?;

        Ok(LabelFont::TrueType {
            font,
            scale: Scale::uniform(size),
        })
    }

    /// Whether this is the bitmap fallback.
    pub fn is_builtin(&self) -> bool {
        matches!(self, LabelFont::Builtin(_))
    }

    /// Horizontal advance of `text`, rounded up to whole pixels.
    pub fn line_width(&self, text: &str) -> u32 {
        match self {
            LabelFont::TrueType { font, scale } => {
                let end = font
                    .layout(text, *scale, point(0.0, 0.0))
                    .last()
                    .map_or(0.0, |glyph| {
                        glyph.position().x + glyph.unpositioned().h_metrics().advance_width
                    });
                end.ceil().max(0.0) as u32
            }
            LabelFont::Builtin(font) => font.line_width(text),
        }
    }

    /// Draws `text` in black with its left edge at `x` and the top of its
    /// ascender at `top`. Pixels outside `canvas` are dropped.
    pub fn draw_line(&self, canvas: &mut GrayImage, x: i64, top: i64, text: &str) {
        match self {
            LabelFont::TrueType { font, scale } => {
                let ascent = font.v_metrics(*scale).ascent;
                let start = point(x as f32, top as f32 + ascent);
                let (width, height) = (i64::from(canvas.width()), i64::from(canvas.height()));

                for glyph in font.layout(text, *scale, start) {
                    let Some(bounding_box) = glyph.pixel_bounding_box() else {
                        continue;
                    };

                    glyph.draw(|gx, gy, v| {
                        let px = i64::from(bounding_box.min.x) + i64::from(gx);
                        let py = i64::from(bounding_box.min.y) + i64::from(gy);
                        if px < 0 || py < 0 || px >= width || py >= height {
                            return;
                        }

                        let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                        let value = (255.0 * (1.0 - v.clamp(0.0, 1.0))).round() as u8;
                        *pixel = Luma([pixel[0].min(value)]);
                    });
                }
            }
            LabelFont::Builtin(font) => font.draw_line(canvas, x, top, text),
        }
    }
}

/// Finds a heavy sans-serif face through the host's font matcher.
///
/// Every failure degrades to [`LabelFont::Builtin`]; resolution never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontResolver {
    program: String,
    query: String,
}

impl Default for FontResolver {
    fn default() -> Self {
        FontResolver::new("fc-match", "sans:style=ExtraBold:weight=200:bold")
    }
}

impl FontResolver {
    /// Resolver running `program -f %{file} query`.
    pub fn new(program: impl Into<String>, query: impl Into<String>) -> Self {
        FontResolver {
            program: program.into(),
            query: query.into(),
        }
    }

    /// Asks the font matcher for a file path.
    ///
    /// # Errors
    /// Returns [`LabelError::ExternalTool`] when the matcher cannot be run,
    /// exits unsuccessfully, or names a file that does not exist.
    pub fn lookup(&self) -> Result<PathBuf> {
        let output = Command::new(&self.program)
            .args(["-f", "%{file}", &self.query])
            .output()
            .map_err(|e| LabelError::external(&self.program, e))?;

        if !output.status.success() {
            return Err(LabelError::external(&self.program, output.status));
        }

        let font_path = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        if font_path.as_os_str().is_empty() || !font_path.exists() {
            return Err(LabelError::external(
                &self.program,
                format!("matched font {} does not exist", font_path.display()),
            ));
        }

        Ok(font_path)
    }

    /// Loads the matched font at `size` pixels, or the built-in face.
    pub fn resolve(&self, size: f32) -> LabelFont {
        let loaded = self.lookup().and_then(|path| {
            let font = LabelFont::from_file(&path, size)?;
            tracing::debug!(path = %path.display(), "using system font");
            Ok(font)
        });

        loaded.unwrap_or_else(|e| {
            tracing::debug!(error = %e, "falling back to built-in font");
            LabelFont::builtin(size)
        })
    }
}
