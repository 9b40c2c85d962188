//! Legend layer: one row per chit with a color swatch and the chit name.

use image::RgbaImage;
use imageproc::drawing::{draw_filled_circle_mut, draw_text_mut};
use rusttype::{Font, Scale};

use super::{new_canvas, RenderError, RenderOptions};
use crate::rpgmap::Chit;

/// Legend height for `chit_count` rows.
pub fn legend_height(chit_count: usize, options: &RenderOptions) -> Result<u32, RenderError> {
    u32::try_from(chit_count)
        .ok()
        .and_then(|n| n.checked_mul(options.cell_height))
        .ok_or_else(|| RenderError::RenderFailure(format!("legend for {} chits overflows u32", chit_count)))
}

pub(super) fn draw_legend(
    chits: &[Chit],
    width: u32,
    options: &RenderOptions,
    font: &Font<'static>,
) -> Result<RgbaImage, RenderError> {
    let height = legend_height(chits.len(), options)?;
    let mut image = new_canvas(width, height, options.background)?;

    let cell_w = options.cell_width as i32;
    let cell_h = options.cell_height as i32;
    let swatch_x = cell_w / 2;
    let label_x = cell_w;

    let font_size = 0.8 * options.cell_width.min(options.cell_height) as f32 / 2.0;
    let scale = Scale::uniform(font_size);
    let v_metrics = font.v_metrics(scale);
    let text_height = v_metrics.ascent - v_metrics.descent;

    for (i, chit) in chits.iter().enumerate() {
        let center_y = i as i32 * cell_h + cell_h / 2;

        draw_filled_circle_mut(&mut image, (swatch_x, center_y), options.chit_radius(), chit.color());

        // draw_text_mut positions the top of the ascent box at y
        let label_y = (center_y as f32 - text_height / 2.0).round() as i32;
        draw_text_mut(&mut image, options.text_color, label_x, label_y, scale, font, chit.name());
    }

    Ok(image)
}
