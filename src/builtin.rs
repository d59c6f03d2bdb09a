use image::{GrayImage, Luma};

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
// One blank column between glyphs.
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

// Rows top to bottom, bit 4 is the leftmost column.
static DIGITS: [[u8; GLYPH_HEIGHT as usize]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

static HYPHEN: [u8; GLYPH_HEIGHT as usize] = [0, 0, 0, 0b11111, 0, 0, 0];

/// Minimal 5x7 bitmap face covering the characters an asset ID can contain.
///
/// Used when no system font can be found. Each bitmap pixel becomes a
/// `scale` x `scale` block on the canvas; characters without a glyph still
/// advance the pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFont {
    scale: u32,
}

impl BuiltinFont {
    /// Picks the integer scale whose glyph height best matches a font of
    /// `size` pixels (cap height taken as 70% of the nominal size).
    pub fn for_size(size: f32) -> Self {
        let scale = (size * 0.7 / GLYPH_HEIGHT as f32).round();
        BuiltinFont {
            scale: if scale >= 1.0 { scale as u32 } else { 1 },
        }
    }

    /// Pixels per bitmap pixel.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Height of a rendered glyph.
    pub fn glyph_height(&self) -> u32 {
        GLYPH_HEIGHT * self.scale
    }

    /// Horizontal extent of `text` when drawn, excluding trailing spacing.
    pub fn line_width(&self, text: &str) -> u32 {
        match text.chars().count() as u32 {
            0 => 0,
            n => (n * GLYPH_ADVANCE - 1) * self.scale,
        }
    }

    /// Draws `text` in black with its top-left corner at (`x`, `top`),
    /// clipping anything outside `canvas`.
    pub fn draw_line(&self, canvas: &mut GrayImage, x: i64, top: i64, text: &str) {
        let scale = i64::from(self.scale);
        let mut pen_x = x;

        for ch in text.chars() {
            if let Some(rows) = glyph(ch) {
                for (row_idx, row) in rows.iter().enumerate() {
                    for col in 0..GLYPH_WIDTH {
                        if row & (1u8 << (GLYPH_WIDTH - 1 - col)) == 0 {
                            continue;
                        }

                        let block_x = pen_x + i64::from(col) * scale;
                        let block_y = top + row_idx as i64 * scale;
                        fill_block(canvas, block_x, block_y, self.scale);
                    }
                }
            }

            pen_x += i64::from(GLYPH_ADVANCE) * scale;
        }
    }
}

fn glyph(ch: char) -> Option<&'static [u8; GLYPH_HEIGHT as usize]> {
    match ch {
        '0'..='9' => ch.to_digit(10).map(|d| &DIGITS[d as usize]),
        '-' => Some(&HYPHEN),
        _ => None,
    }
}

fn fill_block(canvas: &mut GrayImage, x: i64, y: i64, size: u32) {
    let (width, height) = (i64::from(canvas.width()), i64::from(canvas.height()));
    for dy in 0..i64::from(size) {
        for dx in 0..i64::from(size) {
            let (px, py) = (x + dx, y + dy);
            if px < 0 || py < 0 || px >= width || py >= height {
                continue;
            }
            canvas.put_pixel(px as u32, py as u32, Luma([0u8]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink(canvas: &GrayImage) -> usize {
        canvas.pixels().filter(|p| p[0] == 0).count()
    }

    #[test]
    fn default_label_size_scales_by_three() {
        let font = BuiltinFont::for_size(32.0);
        assert_eq!(font.scale(), 3);
        assert_eq!(font.glyph_height(), 21);
        assert_eq!(font.line_width("001"), 51);
    }

    #[test]
    fn tiny_sizes_never_scale_below_one() {
        assert_eq!(BuiltinFont::for_size(1.0).scale(), 1);
        assert_eq!(BuiltinFont::for_size(0.0).scale(), 1);
    }

    #[test]
    fn one_glyph_fills_its_scaled_pixels() {
        let font = BuiltinFont { scale: 2 };
        let mut canvas = GrayImage::from_pixel(20, 20, Luma([255u8]));
        font.draw_line(&mut canvas, 1, 1, "-");
        assert_eq!(ink(&canvas), 5 * 4);
        assert_eq!(canvas.get_pixel(1, 7)[0], 0);
        assert_eq!(canvas.get_pixel(10, 8)[0], 0);
        assert_eq!(canvas.get_pixel(11, 8)[0], 255);
    }

    #[test]
    fn drawing_is_clipped_to_the_canvas() {
        let font = BuiltinFont { scale: 3 };
        let mut canvas = GrayImage::from_pixel(4, 4, Luma([255u8]));
        font.draw_line(&mut canvas, -2, -2, "888");
        assert!(ink(&canvas) > 0);
    }

    #[test]
    fn unknown_characters_only_advance() {
        let font = BuiltinFont { scale: 1 };
        let mut canvas = GrayImage::from_pixel(30, 10, Luma([255u8]));
        font.draw_line(&mut canvas, 0, 0, "?1");
        assert!((0..6).all(|x| (0..7).all(|y| canvas.get_pixel(x, y)[0] == 255)));
        assert!(ink(&canvas) > 0);
    }
}
