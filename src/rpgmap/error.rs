//! Error types for map mutation

use std::fmt;
use thiserror::Error;

/// Which coordinate axis a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

/// Error returned by map operations. A failed operation never changes the map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MapError {
    /// Map width or height below the minimum of 2
    #[error("{} must be greater than or equal to 2 ({value})", .axis.dimension_name())]
    InvalidDimension { axis: Axis, value: i32 },
    /// A chit with this name already exists on the map
    #[error("chit \"{0}\" already exists")]
    DuplicateName(String),
    /// Coordinate outside `[0, width) x [0, height)`
    #[error("{axis} is out of range: {value}")]
    OutOfRange { axis: Axis, value: i32 },
    /// No chit with this name
    #[error("chit not found: {0}")]
    NotFound(String),
    /// Chit names must be non-empty
    #[error("chit name must not be empty")]
    InvalidName,
}

impl Axis {
    /// Name of the map dimension measured along this axis.
    pub fn dimension_name(&self) -> &'static str {
        match self {
            Axis::X => "width",
            Axis::Y => "height",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = MapError::InvalidDimension { axis: Axis::X, value: 1 };
        assert_eq!(e.to_string(), "width must be greater than or equal to 2 (1)");
        let e = MapError::InvalidDimension { axis: Axis::Y, value: -3 };
        assert_eq!(e.to_string(), "height must be greater than or equal to 2 (-3)");
        assert_eq!(MapError::DuplicateName("A".into()).to_string(), r#"chit "A" already exists"#);
        let e = MapError::OutOfRange { axis: Axis::Y, value: 10 };
        assert_eq!(e.to_string(), "Y is out of range: 10");
        assert_eq!(MapError::NotFound("B".into()).to_string(), "chit not found: B");
    }
}
