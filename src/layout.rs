//! Label geometry.
//!
//! Every size is in pixels of the printed tape unless noted otherwise.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorCorrection {
    /// Recovers about 7% of the symbol.
    Low,
    /// Recovers about 15% of the symbol.
    #[default]
    Medium,
    /// Recovers about 25% of the symbol.
    Quartile,
    /// Recovers about 30% of the symbol.
    High,
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => qrcode::EcLevel::L,
            ErrorCorrection::Medium => qrcode::EcLevel::M,
            ErrorCorrection::Quartile => qrcode::EcLevel::Q,
            ErrorCorrection::High => qrcode::EcLevel::H,
        }
    }
}

/// Geometry and typography shared by every label of a strip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Layout {
    /// Height of every label and of the strip; the printable tape width.
    pub tape_height: u32,
    /// Horizontal space between the QR symbol and the text block.
    pub element_gap: u32,
    /// Horizontal space between neighbouring labels.
    pub label_gap: u32,
    /// Edge length of one QR module.
    pub qr_module_size: u32,
    /// Quiet zone around the QR symbol, in modules.
    pub qr_border: u32,
    /// QR error correction level.
    pub qr_error_correction: ErrorCorrection,
    /// Nominal font height.
    pub font_size: f32,
    /// Top of the first text line on the scratch canvas.
    pub text_start_y: u32,
    /// Distance between the tops of the two text lines.
    pub text_line_spacing: u32,
    /// Minimum width of the scratch canvas text is drawn on.
    pub scratch_width: u32,
    /// `fc-match` pattern used to find a heavy sans-serif face.
    pub font_query: String,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            tape_height: 76,
            element_gap: 6,
            label_gap: 1,
            qr_module_size: 2,
            qr_border: 4,
            qr_error_correction: ErrorCorrection::Medium,
            font_size: 32.0,
            text_start_y: 38,
            text_line_spacing: 28,
            scratch_width: 90,
            font_query: "sans:style=ExtraBold:weight=200:bold".to_owned(),
        }
    }
}

impl Layout {
    /// Height of the scratch canvas the text lines are drawn on.
    pub fn scratch_height(&self) -> u32 {
        self.tape_height * 2
    }

    /// Offset that vertically centers a block of `height` on the tape.
    ///
    /// Negative when the block is taller than the tape.
    pub fn center_offset(&self, height: u32) -> i64 {
        (i64::from(self.tape_height) - i64::from(height)).div_euclid(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centering_floors_toward_negative_infinity() {
        let layout = Layout::default();
        assert_eq!(layout.center_offset(74), 1);
        assert_eq!(layout.center_offset(75), 0);
        assert_eq!(layout.center_offset(76), 0);
        assert_eq!(layout.center_offset(77), -1);
        assert_eq!(layout.center_offset(82), -3);
    }

    #[test]
    fn scratch_canvas_is_twice_the_tape() {
        assert_eq!(Layout::default().scratch_height(), 152);
    }
}
