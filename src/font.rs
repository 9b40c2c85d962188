//! Font loading and lookup for legend text.
//!
//! Fonts are parsed once at startup and stored under a logical name. The
//! renderer only ever asks a [`FontProvider`] for a name; it never touches
//! font files itself.

use rusttype::Font;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Logical name of the font used to draw map legends.
pub const MAP_FONT_NAME: &str = "normal";

/// Error type for font loading and lookup
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be read
    #[error("failed to read font file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a TrueType/OpenType font rusttype can parse
    #[error("invalid font data in '{0}'")]
    InvalidFont(String),
    /// No font was stored under the requested logical name
    #[error("font not loaded: {0}")]
    NotLoaded(String),
}

/// Resolves logical font names to parsed fonts.
pub trait FontProvider {
    /// Get the font stored under `name`.
    fn resolve(&self, name: &str) -> Result<&Font<'static>, FontError>;
}

/// In-memory font store keyed by logical name.
#[derive(Default)]
pub struct FontCache {
    fonts: HashMap<String, Font<'static>>,
}

impl FontCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self { fonts: HashMap::new() }
    }

    /// Store `font` under `name`, replacing any font already there.
    pub fn store(&mut self, name: impl Into<String>, font: Font<'static>) {
        self.fonts.insert(name.into(), font);
    }

    /// Parse font bytes and store them under `name`.
    ///
    /// `label` only appears in the error message.
    pub fn store_bytes(
        &mut self,
        name: impl Into<String>,
        bytes: Vec<u8>,
        label: &str,
    ) -> Result<(), FontError> {
        let font = Font::try_from_vec(bytes).ok_or_else(|| FontError::InvalidFont(label.to_string()))?;
        self.store(name, font);
        Ok(())
    }

    /// Read a font file and store it as the map font ([`MAP_FONT_NAME`]).
    pub fn load_file(&mut self, path: &Path) -> Result<(), FontError> {
        let bytes = fs::read(path).map_err(|source| FontError::Io { path: path.to_path_buf(), source })?;
        self.store_bytes(MAP_FONT_NAME, bytes, &path.display().to_string())?;
        tracing::info!(path = %path.display(), "loaded map font");
        Ok(())
    }

    /// Build a cache holding only the map font read from `path`.
    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let mut cache = Self::new();
        cache.load_file(path)?;
        Ok(cache)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl std::fmt::Debug for FontCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.fonts.keys().collect();
        names.sort();
        f.debug_struct("FontCache").field("fonts", &names).finish()
    }
}

impl FontProvider for FontCache {
    fn resolve(&self, name: &str) -> Result<&Font<'static>, FontError> {
        self.fonts.get(name).ok_or_else(|| FontError::NotLoaded(name.to_string()))
    }
}
