//! Map rendering to image buffers
//!
//! A render produces one RGBA image made of two stacked layers:
//!
//! ```text
//! +-----------------------------+
//! |  map layer                  |  cell_height * map height
//! |  (background, grid, chits)  |
//! +-----------------------------+
//! |  legend layer               |  cell_height * chit count
//! |  (swatch + name per chit)   |
//! +-----------------------------+
//!        cell_width * map width
//! ```
//!
//! Rendering reads a [`MapSnapshot`], so it never holds a map lock while
//! drawing. Chits sharing a cell are drawn on top of each other in
//! insertion order.

mod legend;
mod map_layer;

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::font::{FontError, FontProvider, MAP_FONT_NAME};
use crate::rpgmap::{MapSnapshot, SquareMap};

pub use legend::legend_height;
pub use map_layer::map_layer_size;

/// Allocate a `width` x `height` canvas filled with `background`.
///
/// Fails with [`RenderError::RenderFailure`] instead of aborting when the
/// buffer size overflows or the allocation is refused.
pub(crate) fn new_canvas(width: u32, height: u32, background: Rgba<u8>) -> Result<RgbaImage, RenderError> {
    let too_large = || RenderError::RenderFailure(format!("image of {}x{} pixels is too large", width, height));

    let pixels = usize::try_from(u64::from(width) * u64::from(height)).map_err(|_| too_large())?;
    let len = pixels.checked_mul(4).ok_or_else(too_large)?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| too_large())?;
    for _ in 0..pixels {
        buf.extend_from_slice(&background.0);
    }

    RgbaImage::from_raw(width, height, buf).ok_or_else(too_large)
}

/// Error when rendering a map
#[derive(Debug, Error)]
pub enum RenderError {
    /// The legend font was never loaded into the font provider
    #[error("font not loaded: {0}")]
    FontNotLoaded(String),
    /// Any other failure while producing the image
    #[error("render failed: {0}")]
    RenderFailure(String),
}

impl From<FontError> for RenderError {
    fn from(e: FontError) -> Self {
        match e {
            FontError::NotLoaded(name) => RenderError::FontNotLoaded(name),
            other => RenderError::RenderFailure(other.to_string()),
        }
    }
}

/// Fixed layout parameters for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Width of one grid cell in pixels
    pub cell_width: u32,
    /// Height of one grid cell in pixels
    pub cell_height: u32,
    /// Background of both layers
    pub background: Rgba<u8>,
    /// Grid line color
    pub grid_color: Rgba<u8>,
    /// Legend label color
    pub text_color: Rgba<u8>,
    /// Logical font name resolved for legend labels
    pub font_name: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_width: 32,
            cell_height: 32,
            background: Rgba([255, 255, 255, 255]),
            grid_color: Rgba([105, 105, 105, 255]),
            text_color: Rgba([0, 0, 0, 255]),
            font_name: MAP_FONT_NAME.to_string(),
        }
    }
}

impl RenderOptions {
    /// Radius of a chit circle: its diameter is half the shorter cell side.
    pub fn chit_radius(&self) -> i32 {
        (self.cell_width.min(self.cell_height) / 4) as i32
    }
}

/// Renders map snapshots with fixed layout options.
#[derive(Debug, Clone, Default)]
pub struct MapRenderer {
    options: RenderOptions,
}

impl MapRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Take a snapshot of `map` and render it.
    pub fn render_map(&self, map: &SquareMap, fonts: &dyn FontProvider) -> Result<RgbaImage, RenderError> {
        self.render(&map.snapshot(), fonts)
    }

    /// Render the map layer with the legend stacked directly below it.
    ///
    /// Fails with [`RenderError::FontNotLoaded`] before drawing anything if
    /// the legend font cannot be resolved, even when there are no chits.
    pub fn render(&self, snapshot: &MapSnapshot, fonts: &dyn FontProvider) -> Result<RgbaImage, RenderError> {
        let font = fonts.resolve(&self.options.font_name)?;

        let map = self.map_layer(snapshot)?;
        let legend = legend::draw_legend(snapshot.chits(), map.width(), &self.options, font)?;

        let height = map
            .height()
            .checked_add(legend.height())
            .ok_or_else(|| RenderError::RenderFailure("composed image height overflows u32".to_string()))?;

        let mut dest = new_canvas(map.width(), height, self.options.background)?;
        image::imageops::replace(&mut dest, &map, 0, 0);
        if legend.height() > 0 {
            image::imageops::replace(&mut dest, &legend, 0, i64::from(map.height()));
        }

        Ok(dest)
    }

    /// Render only the map layer (background, grid, chits).
    pub fn map_layer(&self, snapshot: &MapSnapshot) -> Result<RgbaImage, RenderError> {
        map_layer::draw_map_layer(snapshot, &self.options)
    }

    /// Render only the legend layer.
    pub fn legend(&self, snapshot: &MapSnapshot, fonts: &dyn FontProvider) -> Result<RgbaImage, RenderError> {
        let font = fonts.resolve(&self.options.font_name)?;
        let (width, _) = map_layer_size(snapshot, &self.options)?;
        legend::draw_legend(snapshot.chits(), width, &self.options, font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontCache;
    use std::path::Path;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([30, 144, 255, 255]);

    fn fonts() -> FontCache {
        FontCache::from_file(&Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/DejaVuSans.ttf"))
            .unwrap()
    }

    fn two_chit_map() -> SquareMap {
        let map = SquareMap::new(10, 8).unwrap();
        map.add_chit_with_color("A", 0, 0, RED).unwrap();
        map.add_chit_with_color("B", 1, 1, BLUE).unwrap();
        map
    }

    #[test]
    fn test_chit_radius() {
        assert_eq!(RenderOptions::default().chit_radius(), 8);
        let options = RenderOptions { cell_width: 40, cell_height: 24, ..Default::default() };
        assert_eq!(options.chit_radius(), 6);
    }

    #[test]
    fn test_render_dimensions() {
        let renderer = MapRenderer::default();
        let image = renderer.render_map(&two_chit_map(), &fonts()).unwrap();
        assert_eq!(image.width(), 32 * 10);
        assert_eq!(image.height(), 32 * 8 + 2 * 32);
    }

    #[test]
    fn test_deleting_chit_shrinks_legend() {
        let renderer = MapRenderer::default();
        let fonts = fonts();
        let map = two_chit_map();
        let legend = renderer.legend(&map.snapshot(), &fonts).unwrap();
        assert_eq!(legend.height(), 64);

        map.delete_chit("B").unwrap();
        let legend = renderer.legend(&map.snapshot(), &fonts).unwrap();
        assert_eq!(legend.height(), 32);
        let image = renderer.render_map(&map, &fonts).unwrap();
        assert_eq!(image.height(), 32 * 8 + 32);
    }

    #[test]
    fn test_render_empty_map_has_no_legend() {
        let map = SquareMap::new(3, 2).unwrap();
        let image = MapRenderer::default().render_map(&map, &fonts()).unwrap();
        assert_eq!(image.dimensions(), (96, 64));
    }

    #[test]
    fn test_render_without_font_fails() {
        let err = MapRenderer::default().render_map(&two_chit_map(), &FontCache::new()).unwrap_err();
        match err {
            RenderError::FontNotLoaded(name) => assert_eq!(name, "normal"),
            other => panic!("expected FontNotLoaded, got {}", other),
        }
    }

    #[test]
    fn test_render_without_font_fails_for_empty_map() {
        let map = SquareMap::new(3, 3).unwrap();
        let err = MapRenderer::default().render_map(&map, &FontCache::new()).unwrap_err();
        assert!(matches!(err, RenderError::FontNotLoaded(_)));
    }

    #[test]
    fn test_layers_are_stacked() {
        let renderer = MapRenderer::default();
        let fonts = fonts();
        let map = two_chit_map();
        let snapshot = map.snapshot();

        let image = renderer.render(&snapshot, &fonts).unwrap();
        let layer = renderer.map_layer(&snapshot).unwrap();
        let legend = renderer.legend(&snapshot, &fonts).unwrap();

        for (x, y, pixel) in layer.enumerate_pixels() {
            assert_eq!(image.get_pixel(x, y), pixel);
        }
        for (x, y, pixel) in legend.enumerate_pixels() {
            assert_eq!(image.get_pixel(x, y + layer.height()), pixel);
        }
    }

    #[test]
    fn test_wide_map_renders() {
        let map = SquareMap::new(600, 2).unwrap();
        map.add_chit_with_color("A", 599, 1, RED).unwrap();
        let image = MapRenderer::default().render_map(&map, &fonts()).unwrap();
        assert_eq!(image.dimensions(), (600 * 32, 2 * 32 + 32));
        assert_eq!(*image.get_pixel(599 * 32 + 16, 32 + 16), RED);
    }

    #[test]
    fn test_tall_legend_renders() {
        let map = SquareMap::new(2, 512).unwrap();
        map.add_chit_with_color("A", 0, 0, RED).unwrap();
        let image = MapRenderer::default().render_map(&map, &fonts()).unwrap();
        assert_eq!(image.height(), 512 * 32 + 32);
    }

    #[test]
    fn test_overflowing_canvas_fails() {
        let map = SquareMap::new(i32::MAX, 2).unwrap();
        let err = MapRenderer::default().render_map(&map, &fonts()).unwrap_err();
        assert!(matches!(err, RenderError::RenderFailure(_)));
    }
}
