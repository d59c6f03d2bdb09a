//! Rendering of a single label: QR symbol on the left, the two halves of the
//! asset ID stacked on the right.

use image::{imageops, GrayImage, Luma};
use qrcode::{Color, QrCode};

use crate::asset_id::AssetId;
use crate::error::Result;
use crate::font::LabelFont;
use crate::layout::Layout;

const WHITE: Luma<u8> = Luma([255]);
const BLACK: Luma<u8> = Luma([0]);

/// One rendered label. Its height is always the tape height.
#[derive(Debug, Clone)]
pub struct Label {
    /// The asset this label encodes.
    pub id: AssetId,
    /// Monochrome bitmap.
    pub image: GrayImage,
}

impl Label {
    /// Bitmap width.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Bitmap height.
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Text encoded in the QR symbol of `id`.
pub fn qr_payload(url: &str, id: AssetId) -> String {
    format!("{url}{id}")
}

/// Encodes `payload` as the smallest QR symbol that holds it and rasterizes
/// it with the layout's module size and quiet zone.
///
/// # Errors
/// Returns [`crate::LabelError::Qr`] when the payload fits no symbol version.
pub fn render_qr(payload: &str, layout: &Layout) -> Result<GrayImage> {
    let ec_level = layout.qr_error_correction.into();
    let code = QrCode::with_error_correction_level(payload.as_bytes(), ec_level)?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;
    let scale = layout.qr_module_size.max(1);
    let border = layout.qr_border * scale;
    let img_size = module_count * scale + 2 * border;

    let mut img = GrayImage::from_pixel(img_size, img_size, WHITE);
    for (i, color) in modules.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }

        let x = (i as u32) % module_count;
        let y = (i as u32) / module_count;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(border + x * scale + dx, border + y * scale + dy, BLACK);
            }
        }
    }

    if img_size > layout.tape_height {
        tracing::warn!(
            payload,
            size = img_size,
            tape_height = layout.tape_height,
            "QR symbol is taller than the tape and will be clipped"
        );
    }

    Ok(img)
}

/// Draws `MMM` above `NNN` and crops to the inked area.
///
/// Returns `None` when the font left no ink at all.
pub fn render_text(id: AssetId, font: &LabelFont, layout: &Layout) -> Option<GrayImage> {
    let text = id.to_string();
    let (major, minor) = text.split_once('-')?;

    let widest = font.line_width(major).max(font.line_width(minor));
    let scratch_width = layout.scratch_width.max(widest + 1);
    let mut scratch = GrayImage::from_pixel(scratch_width, layout.scratch_height(), WHITE);
    let first_top = i64::from(layout.text_start_y);
    font.draw_line(&mut scratch, 0, first_top, major);
    font.draw_line(&mut scratch, 0, first_top + i64::from(layout.text_line_spacing), minor);

    threshold(&mut scratch);
    let (x, y, width, height) = ink_bounds(&scratch)?;
    Some(imageops::crop_imm(&scratch, x, y, width, height).to_image())
}

/// Renders the complete label for `id`, encoding `url` followed by the ID.
///
/// # Errors
/// Fails only when the QR payload cannot be encoded.
pub fn render_label(id: AssetId, url: &str, font: &LabelFont, layout: &Layout) -> Result<Label> {
    let qr = render_qr(&qr_payload(url, id), layout)?;
    let text = render_text(id, font, layout);

    let text_x = qr.width() + layout.element_gap;
    let width = text.as_ref().map_or(text_x, |text| text_x + text.width());
    let mut image = GrayImage::from_pixel(width, layout.tape_height, WHITE);

    imageops::overlay(&mut image, &qr, 0, layout.center_offset(qr.height()));
    if let Some(text) = &text {
        imageops::overlay(&mut image, text, i64::from(text_x), layout.center_offset(text.height()));
    }

    tracing::debug!(%id, width, "rendered label");
    Ok(Label { id, image })
}

fn threshold(img: &mut GrayImage) {
    for px in img.pixels_mut() {
        *px = if px[0] < 128 { BLACK } else { WHITE };
    }
}

// Tight (x, y, width, height) box around every black pixel.
fn ink_bounds(img: &GrayImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in img.enumerate_pixels() {
        if px[0] != 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    bounds.map(|(min_x, min_y, max_x, max_y)| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> LabelFont {
        LabelFont::builtin(Layout::default().font_size)
    }

    #[test]
    fn payload_is_url_followed_by_id() {
        assert_eq!(
            qr_payload("https://box.example.com/a/", AssetId::new(1086)),
            "https://box.example.com/a/001-086"
        );
    }

    #[test]
    fn qr_is_square_with_quiet_zone() {
        let layout = Layout::default();
        let qr = render_qr("https://box.example.com/a/001-086", &layout).unwrap();
        assert_eq!(qr.width(), qr.height());
        // 4 modules of 2 px on every side stay white.
        assert!((0..8).all(|x| (0..qr.height()).all(|y| qr.get_pixel(x, y)[0] == 255)));
        // Top-left finder pattern starts right after the quiet zone.
        assert_eq!(qr.get_pixel(8, 8)[0], 0);
        assert_eq!((qr.width() - 16) % 2, 0);
    }

    #[test]
    fn short_payload_uses_version_one() {
        let qr = render_qr("A", &Layout::default()).unwrap();
        assert_eq!(qr.width(), (21 + 8) * 2);
    }

    #[test]
    fn oversized_payload_is_a_qr_error() {
        let payload = "x".repeat(8000);
        assert!(matches!(
            render_qr(&payload, &Layout::default()),
            Err(crate::LabelError::Qr(_))
        ));
    }

    #[test]
    fn text_is_cropped_to_ink() {
        let text = render_text(AssetId::new(1086), &builtin(), &Layout::default()).unwrap();
        // Two 21 px lines whose tops are 28 px apart.
        assert_eq!(text.height(), 28 + 21);
        assert_eq!(text.width(), 51);
        assert!((0..text.width()).any(|x| text.get_pixel(x, 0)[0] == 0));
        assert!((0..text.height()).any(|y| text.get_pixel(0, y)[0] == 0));
    }

    #[test]
    fn wide_majors_widen_the_scratch_canvas() {
        let text = render_text(AssetId::new(123_456_789), &builtin(), &Layout::default()).unwrap();
        assert_eq!(text.width(), builtin().line_width("123456"));
    }

    #[test]
    fn label_is_tape_high_and_qr_plus_gap_plus_text_wide() {
        let layout = Layout::default();
        let font = builtin();
        let url = "https://box.example.com/a/";
        let id = AssetId::new(1086);

        let label = render_label(id, url, &font, &layout).unwrap();
        let qr = render_qr(&qr_payload(url, id), &layout).unwrap();
        let text = render_text(id, &font, &layout).unwrap();

        assert_eq!(label.id, id);
        assert_eq!(label.height(), layout.tape_height);
        assert_eq!(label.width(), qr.width() + layout.element_gap + text.width());
        assert!(label.image.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn gap_between_qr_and_text_stays_blank() {
        let layout = Layout::default();
        let label = render_label(AssetId::new(42), "https://h/a/", &builtin(), &layout).unwrap();
        let qr_width = render_qr("https://h/a/000-042", &layout).unwrap().width();
        for x in qr_width..qr_width + layout.element_gap {
            assert!((0..label.height()).all(|y| label.image.get_pixel(x, y)[0] == 255));
        }
    }

    #[test]
    fn ink_bounds_of_blank_image_is_none() {
        let img = GrayImage::from_pixel(5, 5, WHITE);
        assert_eq!(ink_bounds(&img), None);
    }
}
