//! Text watermarking.
//!
//! Renders a line of text with an embedded font and composites it into the
//! bottom-right corner by forward alpha blending:
//!
//! `out = a * 255 + (1 - a) * px`, where `a = coverage * opacity`.
//!
//! Coverage comes from the glyph rasterizer, so edges stay anti-aliased at
//! any opacity.

use ab_glyph::{point, Font, FontRef, Glyph, PxScale, ScaleFont};
use image::RgbImage;

use crate::error::{Error, Result};

/// Embedded fallback font (DejaVu Sans).
const FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Distance from the text to the right and bottom image edges, in pixels.
const EDGE_MARGIN: f32 = 10.0;

/// Watermark text, opacity, and size.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkSpec {
    /// The text to composite.
    pub text: String,
    /// Blend opacity in `[0, 1]`; out-of-range values are clamped.
    pub opacity: f32,
    /// Font size in pixels.
    pub scale: f32,
}

impl Default for WatermarkSpec {
    fn default() -> Self {
        Self {
            text: "\u{a9} 2025".to_string(),
            opacity: 0.5,
            scale: 24.0,
        }
    }
}

/// Position glyphs for a single line of text starting at the origin.
///
/// Returns the glyphs plus the layout width; height is the font's
/// ascent-to-descent span.
fn layout_line(font: &FontRef<'_>, scale: PxScale, text: &str) -> (Vec<Glyph>, f32) {
    let scaled = font.as_scaled(scale);
    let mut glyphs = Vec::with_capacity(text.len());
    let mut caret = 0.0f32;
    let mut previous: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, 0.0)));
        caret += scaled.h_advance(id);
        previous = Some(id);
    }

    (glyphs, caret)
}

/// Composite white text into the bottom-right corner of the image.
///
/// The text sits `10` pixels from the right and bottom edges; if the image
/// is smaller than the rendered text, the text is anchored at the top-left
/// and clipped. The input is not mutated.
///
/// # Errors
///
/// Returns [`Error::FontLoad`] if the embedded font fails to parse (a build
/// corruption, not an input condition).
pub fn add_watermark(image: &RgbImage, spec: &WatermarkSpec) -> Result<RgbImage> {
    let font = FontRef::try_from_slice(FONT_BYTES)
        .map_err(|_| Error::FontLoad("embedded DejaVu Sans is not a valid font"))?;

    let scale = PxScale::from(spec.scale.max(1.0));
    let scaled = font.as_scaled(scale);
    let (glyphs, text_width) = layout_line(&font, scale, &spec.text);
    let text_height = scaled.ascent() - scaled.descent();
    let opacity = spec.opacity.clamp(0.0, 1.0);

    #[allow(clippy::cast_precision_loss)]
    let (img_w, img_h) = (image.width() as f32, image.height() as f32);
    let origin_x = (img_w - text_width - EDGE_MARGIN).max(0.0);
    let baseline_y = (img_h - text_height - EDGE_MARGIN).max(0.0) + scaled.ascent();

    let mut out = image.clone();
    for glyph in glyphs {
        let positioned = Glyph {
            position: point(glyph.position.x + origin_x, glyph.position.y + baseline_y),
            ..glyph
        };
        let Some(outlined) = font.outline_glyph(positioned) else {
            continue; // whitespace has no outline
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            #[allow(clippy::cast_possible_truncation)]
            let x = bounds.min.x as i64 + i64::from(gx);
            #[allow(clippy::cast_possible_truncation)]
            let y = bounds.min.y as i64 + i64::from(gy);
            if x < 0 || y < 0 || x >= i64::from(image.width()) || y >= i64::from(image.height())
            {
                return;
            }
            let alpha = (coverage * opacity).clamp(0.0, 1.0);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let px = out.get_pixel_mut(x as u32, y as u32);
            for ch in 0..3 {
                let blended = alpha * 255.0 + (1.0 - alpha) * f32::from(px[ch]);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    px[ch] = blended.clamp(0.0, 255.0) as u8;
                }
            }
        });
    }

    Ok(out)
}
