//! Square grid maps holding an insertion-ordered set of chits.

use image::Rgba;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::chit::Chit;
use super::error::{Axis, MapError};
use crate::palette::ColorPalette;

/// Smallest allowed width or height.
pub const MIN_DIMENSION: i32 = 2;

/// Chits in insertion order plus a name -> position index.
///
/// Both structures are only touched together, under the owning map's lock.
#[derive(Debug, Default)]
struct ChitTable {
    chits: Vec<Chit>,
    index: HashMap<String, usize>,
}

impl ChitTable {
    fn get(&self, name: &str) -> Option<&Chit> {
        self.index.get(name).map(|&pos| &self.chits[pos])
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Chit> {
        let pos = *self.index.get(name)?;
        Some(&mut self.chits[pos])
    }

    fn push(&mut self, chit: Chit) {
        self.index.insert(chit.name().to_string(), self.chits.len());
        self.chits.push(chit);
    }

    fn remove(&mut self, name: &str) -> Option<Chit> {
        let pos = self.index.remove(name)?;
        let removed = self.chits.remove(pos);

        // Everything after the removed chit shifted left by one
        for (i, chit) in self.chits.iter().enumerate().skip(pos) {
            if let Some(p) = self.index.get_mut(chit.name()) {
                *p = i;
            }
        }

        Some(removed)
    }

    fn is_consistent(&self) -> bool {
        self.chits.len() == self.index.len()
            && self
                .chits
                .iter()
                .enumerate()
                .all(|(i, c)| self.index.get(c.name()) == Some(&i))
    }
}

/// A fixed-size rectangular board.
///
/// Dimensions never change after creation; resizing means building a new
/// map. All chit access goes through one lock, held for the whole of each
/// read-modify-write, so the ordered list and the name index always agree.
pub struct SquareMap {
    width: i32,
    height: i32,
    palette: ColorPalette,
    table: Mutex<ChitTable>,
}

impl SquareMap {
    /// Create an empty map. Both dimensions must be at least 2.
    pub fn new(width: i32, height: i32) -> Result<Self, MapError> {
        Self::with_palette(width, height, ColorPalette::default())
    }

    /// Create an empty map that colors new chits from `palette`.
    pub fn with_palette(width: i32, height: i32, palette: ColorPalette) -> Result<Self, MapError> {
        if width < MIN_DIMENSION {
            return Err(MapError::InvalidDimension { axis: Axis::X, value: width });
        }

        if height < MIN_DIMENSION {
            return Err(MapError::InvalidDimension { axis: Axis::Y, value: height });
        }

        Ok(Self { width, height, palette, table: Mutex::new(ChitTable::default()) })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as `"{width} x {height}"`.
    pub fn size_str(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }

    pub fn x_in_range(&self, x: i32) -> bool {
        x >= 0 && x < self.width
    }

    pub fn y_in_range(&self, y: i32) -> bool {
        y >= 0 && y < self.height
    }

    pub fn chit_count(&self) -> usize {
        self.table().chits.len()
    }

    /// Look up a chit by name.
    pub fn find_chit(&self, name: &str) -> Option<Chit> {
        self.table().get(name).cloned()
    }

    /// Visit every chit in insertion order.
    ///
    /// The lock is held for the whole walk, so the visitor sees one
    /// consistent state. The visitor must not call back into this map.
    pub fn for_each_chit<F>(&self, mut f: F)
    where
        F: FnMut(usize, &Chit),
    {
        let table = self.table();
        for (i, chit) in table.chits.iter().enumerate() {
            f(i, chit);
        }
    }

    /// Copy of all chits in insertion order.
    pub fn chits(&self) -> Vec<Chit> {
        self.table().chits.clone()
    }

    /// Copy of the map state, taken under the lock, for lock-free rendering.
    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot { width: self.width, height: self.height, chits: self.chits() }
    }

    /// Add a chit with a color drawn from this map's palette.
    pub fn add_chit(&self, name: &str, x: i32, y: i32) -> Result<Chit, MapError> {
        self.add_chit_with_color(name, x, y, self.palette.pick_random())
    }

    /// Add a chit with a caller-chosen color.
    ///
    /// The chit goes to the end of the insertion order.
    pub fn add_chit_with_color(
        &self,
        name: &str,
        x: i32,
        y: i32,
        color: Rgba<u8>,
    ) -> Result<Chit, MapError> {
        if name.is_empty() {
            return Err(MapError::InvalidName);
        }

        let mut table = self.table();

        if table.get(name).is_some() {
            return Err(MapError::DuplicateName(name.to_string()));
        }
        self.check_position(x, y)?;

        let chit = Chit::new(name, x, y, color);
        table.push(chit.clone());

        Ok(chit)
    }

    /// Remove a chit.
    pub fn delete_chit(&self, name: &str) -> Result<(), MapError> {
        self.table()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| MapError::NotFound(name.to_string()))
    }

    /// Move a chit and return its new state.
    ///
    /// The target is validated before anything changes.
    pub fn move_chit(&self, name: &str, new_x: i32, new_y: i32) -> Result<Chit, MapError> {
        let mut table = self.table();

        if table.get(name).is_none() {
            return Err(MapError::NotFound(name.to_string()));
        }
        self.check_position(new_x, new_y)?;

        let chit = table.get_mut(name).ok_or_else(|| MapError::NotFound(name.to_string()))?;
        chit.set_position(new_x, new_y);

        Ok(chit.clone())
    }

    fn check_position(&self, x: i32, y: i32) -> Result<(), MapError> {
        if !self.x_in_range(x) {
            return Err(MapError::OutOfRange { axis: Axis::X, value: x });
        }

        if !self.y_in_range(y) {
            return Err(MapError::OutOfRange { axis: Axis::Y, value: y });
        }

        Ok(())
    }

    /// Whether the ordered list and the name index agree.
    pub fn is_consistent(&self) -> bool {
        self.table().is_consistent()
    }

    // Mutations validate before writing, so a poisoned lock still guards
    // a consistent table.
    fn table(&self) -> MutexGuard<'_, ChitTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Display for SquareMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SquareMap ({})", self.size_str())
    }
}

impl fmt::Debug for SquareMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SquareMap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("chits", &self.chit_count())
            .finish()
    }
}

/// Point-in-time copy of a map, safe to read without any lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSnapshot {
    width: i32,
    height: i32,
    chits: Vec<Chit>,
}

impl MapSnapshot {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Chits in insertion order.
    pub fn chits(&self) -> &[Chit] {
        &self.chits
    }

    pub fn chit_count(&self) -> usize {
        self.chits.len()
    }

    pub fn size_str(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }
}
