//! Certificate renderer (the core).
//! Loads the downloaded template, stamps the recipient name horizontally
//! centered on its anchor and the verification code left-aligned on its
//! anchor, then encodes the result as JPEG.
//! Fonts are embedded in the binary so nothing has to be installed on the
//! host. Anchor y is the TOP of the rendered line, matching the
//! `draw_text_mut` convention.

use crate::config::Position;
use crate::error::{CertError, Result};
use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::Rgb;
use imageproc::drawing::draw_text_mut;
use log::debug;
use std::path::Path;

static NAME_FONT_BYTES: &[u8] = include_bytes!("../fonts/DejaVuSans-Bold.ttf");
static CODE_FONT_BYTES: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

const NAME_FONT_SIZE: f32 = 26.0;
const CODE_FONT_SIZE: f32 = 15.0;
const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// A parsed embedded font together with its pixel scale.
pub struct TextStyle {
    font: FontRef<'static>,
    scale: PxScale,
}

impl TextStyle {
    fn from_embedded(bytes: &'static [u8], size: f32, resource: &'static str) -> Result<Self> {
        let font = FontRef::try_from_slice(bytes)
            .map_err(|_| CertError::FontResourceMissing(resource))?;
        Ok(Self {
            font,
            scale: PxScale::from(size),
        })
    }
}

/// The two text styles a certificate uses: one for the recipient name, one
/// for the verification code.
pub struct Fonts {
    pub name: TextStyle,
    pub code: TextStyle,
}

/// Parses the embedded font resources into usable handles. Failure means the
/// binary was packaged without valid fonts.
pub fn load_fonts() -> Result<Fonts> {
    Ok(Fonts {
        name: TextStyle::from_embedded(NAME_FONT_BYTES, NAME_FONT_SIZE, "DejaVuSans-Bold.ttf")?,
        code: TextStyle::from_embedded(CODE_FONT_BYTES, CODE_FONT_SIZE, "DejaVuSans.ttf")?,
    })
}

/// Advance-width summation (with kerning) at the style's scale.
fn text_width(style: &TextStyle, text: &str) -> f32 {
    let scaled = style.font.as_scaled(style.scale);
    let mut width = 0.0;
    let mut previous = None;
    for ch in text.chars() {
        let glyph = scaled.glyph_id(ch);
        if let Some(previous) = previous {
            width += scaled.kern(previous, glyph);
        }
        width += scaled.h_advance(glyph);
        previous = Some(glyph);
    }
    width
}

/// Left edge of a run of text horizontally centered on `anchor_x`.
fn centered_x(anchor_x: i32, width: f32) -> i32 {
    anchor_x - (width / 2.0).round() as i32
}

/// Stamps `name` (centered on its anchor) and `code` (left-aligned) onto the
/// template image and writes the result as JPEG to `output`.
pub fn render_certificate(
    template: &Path,
    output: &Path,
    name: &str,
    code: &str,
    name_pos: Position,
    code_pos: Position,
    fonts: &Fonts,
) -> Result<()> {
    let image = image::open(template).map_err(|source| CertError::ImageLoad {
        path: template.to_path_buf(),
        source,
    })?;
    let mut canvas = image.into_rgb8();

    let name_width = text_width(&fonts.name, name);
    let name_x = centered_x(name_pos.x, name_width);
    debug!(
        "name is {:.1}px wide, drawing at ({}, {}); code at ({}, {})",
        name_width, name_x, name_pos.y, code_pos.x, code_pos.y
    );

    draw_text_mut(
        &mut canvas,
        TEXT_COLOR,
        name_x,
        name_pos.y,
        fonts.name.scale,
        &fonts.name.font,
        name,
    );
    draw_text_mut(
        &mut canvas,
        TEXT_COLOR,
        code_pos.x,
        code_pos.y,
        fonts.code.scale,
        &fonts.code.font,
        code,
    );

    canvas.save(output).map_err(|source| CertError::ImageWrite {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(())
}

// *************** Tests ***************
