//! Font resolution: an explicit font file, or a face looked up in the system font database.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use sha2::Digest as _;

use crate::foundation::error::{SceneError, SceneResult};

/// Where a [`PreparedFont`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// Loaded from a font file.
    File(PathBuf),
    /// Found in the system font database.
    System,
}

/// Font bytes ready for layout and rasterization.
#[derive(Clone)]
pub struct PreparedFont {
    /// Family name reported by the font.
    pub family: String,
    /// Raw font file bytes (may be a collection).
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside `bytes`.
    pub index: u32,
    /// Origin of the font.
    pub source: FontSource,
}

impl std::fmt::Debug for PreparedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedFont")
            .field("family", &self.family)
            .field("len", &self.bytes.len())
            .field("index", &self.index)
            .field("source", &self.source)
            .finish()
    }
}

impl PreparedFont {
    /// Hex SHA-256 of the font bytes, for diagnostics.
    pub fn sha256_hex(&self) -> String {
        let digest = sha2::Sha256::digest(self.bytes.as_slice());
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{:02x}", b));
        }
        out
    }
}

/// Resolve the font used for text: `path` wins, then `family` from the system, then the
/// system sans-serif face.
#[tracing::instrument]
pub fn resolve_font(path: Option<&Path>, family: Option<&str>) -> SceneResult<PreparedFont> {
    let font = match path {
        Some(p) => load_font_file(p)?,
        None => system_font(family)?,
    };
    tracing::info!(family = %font.family, source = ?font.source, "resolved text font");
    Ok(font)
}

/// Load the first face of a font file.
pub fn load_font_file(path: &Path) -> SceneResult<PreparedFont> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read font file '{}'", path.display()))?;
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(bytes.clone());
    let face = db
        .faces()
        .next()
        .ok_or_else(|| SceneError::render(format!("'{}' contains no font faces", path.display())))?;
    let family = face
        .families
        .first()
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| "unknown".to_owned());
    Ok(PreparedFont {
        family,
        index: face.index,
        bytes: Arc::new(bytes),
        source: FontSource::File(path.to_path_buf()),
    })
}

/// Look up a regular face in the system font database.
pub fn system_font(family: Option<&str>) -> SceneResult<PreparedFont> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
    if let Some(name) = family {
        families.push(usvg::fontdb::Family::Name(name));
    }
    families.push(usvg::fontdb::Family::SansSerif);

    let query = usvg::fontdb::Query {
        families: &families,
        weight: usvg::fontdb::Weight::NORMAL,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };
    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|f| f.id))
        .ok_or_else(|| SceneError::render("no system fonts found; set font.path"))?;
    let face = db
        .face(id)
        .ok_or_else(|| SceneError::render("system font face disappeared"))?;
    let family = face
        .families
        .first()
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| "unknown".to_owned());
    let (bytes, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| SceneError::render(format!("failed to read system font '{family}'")))?;

    Ok(PreparedFont {
        family,
        bytes: Arc::new(bytes),
        index,
        source: FontSource::System,
    })
}
