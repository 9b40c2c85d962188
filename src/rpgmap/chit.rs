//! Chits: named, colored tokens placed on a map.

use image::Rgba;
use std::fmt;

/// A token on the board.
///
/// The name and color are fixed when the chit is created. Coordinates are
/// zero-based and only change through [`SquareMap::move_chit`], which keeps
/// them inside the map.
///
/// [`SquareMap::move_chit`]: super::SquareMap::move_chit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chit {
    name: String,
    x: i32,
    y: i32,
    color: Rgba<u8>,
}

impl Chit {
    pub(crate) fn new(name: impl Into<String>, x: i32, y: i32, color: Rgba<u8>) -> Self {
        Self { name: name.into(), x, y, color }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based column.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row.
    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    /// Coordinates as shown to users (one-based), e.g. `(2, 3)`.
    pub fn coord_str(&self) -> String {
        format!("({}, {})", self.x + 1, self.y + 1)
    }

    pub(crate) fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}

impl fmt::Display for Chit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.coord_str())
    }
}
