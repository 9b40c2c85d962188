//! Tabletop map model: square grid maps and the chits placed on them.
//!
//! - `Chit` is a named, colored token with zero-based coordinates
//! - `SquareMap` owns an insertion-ordered set of chits with unique names
//! - `MapSnapshot` is a lock-free copy of a map used for rendering

mod chit;
mod error;
mod square_map;

pub use chit::Chit;
pub use error::{Axis, MapError};
pub use square_map::{MapSnapshot, SquareMap, MIN_DIMENSION};
