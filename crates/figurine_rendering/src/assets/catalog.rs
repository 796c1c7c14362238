//! Graphic lookup by path.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{RenderError, RenderResult};

use super::graphic::Graphic;

/// Anything that can hand out graphics by asset path.
///
/// Implementations are shared between actors and must be immutable once
/// built.
pub trait AssetSource: Send + Sync {
    /// Graphic registered under `path`, if any.
    fn graphic(&self, path: &str) -> Option<Graphic>;
}

/// In-memory graphic catalog, usually loaded from TOML:
///
/// ```toml
/// [graphics."Things/Pawn/Humanlike/Heads/Male_Average"]
/// north = 20
/// east = 21
/// south = 22
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AssetCatalog {
    #[serde(default)]
    graphics: HashMap<String, Graphic>,
}

impl AssetCatalog {
    /// Empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Parse`] if the text does not match the schema.
    pub fn from_toml_str(text: &str) -> RenderResult<Self> {
        let catalog: Self = toml::from_str(text)?;
        debug!(graphics = catalog.graphics.len(), "asset catalog parsed");
        Ok(catalog)
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if the file cannot be read, or
    /// [`RenderError::Parse`] if it is not a valid catalog.
    pub fn load<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| RenderError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    /// Registers a graphic, replacing any previous one at `path`.
    pub fn insert(&mut self, path: impl Into<String>, graphic: Graphic) {
        self.graphics.insert(path.into(), graphic);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, graphic: Graphic) -> Self {
        self.insert(path, graphic);
        self
    }

    /// Number of registered graphics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graphics.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphics.is_empty()
    }
}

impl AssetSource for AssetCatalog {
    fn graphic(&self, path: &str) -> Option<Graphic> {
        self.graphics.get(path).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::material::{MaterialId, MeshRef};
    use figurine_shared::Facing;

    const CATALOG: &str = r#"
        [graphics."Bodies/Naked_Male"]
        north = 10
        east = 11
        south = 12

        [graphics."Bodies/Naked_Male".shadow]
        volume = { x = 0.3, y = 0.8, z = 0.4 }

        [graphics."Animals/Muffalo"]
        south = 40
        mesh = { north = 20, east = 20, south = 20, west = 21 }
    "#;

    #[test]
    fn test_parse_catalog() {
        let catalog = AssetCatalog::from_toml_str(CATALOG).expect("valid catalog");
        assert_eq!(catalog.len(), 2);

        let body = catalog.graphic("Bodies/Naked_Male").expect("body");
        assert_eq!(body.mat_at(Facing::West).map(|m| m.id), Some(MaterialId(11)));
        assert!(body.shadow.is_some());

        let muffalo = catalog.graphic("Animals/Muffalo").expect("muffalo");
        assert_eq!(muffalo.mesh.map(|m| m.west), Some(MeshRef(21)));
    }

    #[test]
    fn test_missing_path_is_none() {
        assert!(AssetCatalog::new().graphic("Nope").is_none());
    }

    #[test]
    fn test_malformed_catalog_is_an_error() {
        let result = AssetCatalog::from_toml_str("[graphics.x]\nnorth = \"ten\"");
        assert!(matches!(result, Err(RenderError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AssetCatalog::load("/definitely/not/here.toml");
        assert!(matches!(result, Err(RenderError::Io { .. })));
    }
}
