//! Map layer: background, grid lines and chit circles.

use image::RgbaImage;
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use super::{new_canvas, RenderError, RenderOptions};
use crate::rpgmap::{Chit, MapSnapshot};

/// Pixel size of the map layer: one cell per map square.
pub fn map_layer_size(snapshot: &MapSnapshot, options: &RenderOptions) -> Result<(u32, u32), RenderError> {
    let width = scaled_side(options.cell_width, snapshot.width(), "width")?;
    let height = scaled_side(options.cell_height, snapshot.height(), "height")?;
    Ok((width, height))
}

fn scaled_side(cell: u32, count: i32, what: &str) -> Result<u32, RenderError> {
    u32::try_from(count)
        .ok()
        .and_then(|n| n.checked_mul(cell))
        .filter(|side| *side > 0)
        .ok_or_else(|| {
            RenderError::RenderFailure(format!(
                "map layer {} out of bounds ({} cells of {} px)",
                what, count, cell
            ))
        })
}

pub(super) fn draw_map_layer(snapshot: &MapSnapshot, options: &RenderOptions) -> Result<RgbaImage, RenderError> {
    let (width, height) = map_layer_size(snapshot, options)?;
    let mut image = new_canvas(width, height, options.background)?;

    draw_grid(&mut image, snapshot, options);

    for chit in snapshot.chits() {
        draw_chit(&mut image, chit, options);
    }

    Ok(image)
}

/// One 1px line on the top edge of every row and the left edge of every column.
fn draw_grid(image: &mut RgbaImage, snapshot: &MapSnapshot, options: &RenderOptions) {
    let right = (image.width() - 1) as f32;
    let bottom = (image.height() - 1) as f32;

    for row in 0..snapshot.height() as u32 {
        let y = (row * options.cell_height) as f32;
        draw_line_segment_mut(image, (0.0, y), (right, y), options.grid_color);
    }

    for col in 0..snapshot.width() as u32 {
        let x = (col * options.cell_width) as f32;
        draw_line_segment_mut(image, (x, 0.0), (x, bottom), options.grid_color);
    }
}

// Chits sharing a cell overlap; the one drawn last stays on top.
fn draw_chit(image: &mut RgbaImage, chit: &Chit, options: &RenderOptions) {
    let cell_w = options.cell_width as i32;
    let cell_h = options.cell_height as i32;
    let center = (chit.x() * cell_w + cell_w / 2, chit.y() * cell_h + cell_h / 2);

    draw_filled_circle_mut(image, center, options.chit_radius(), chit.color());
}
