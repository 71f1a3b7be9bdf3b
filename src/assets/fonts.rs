use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::foundation::error::{CardError, CardResult};

static REGISTRY: OnceLock<RegisteredFont> = OnceLock::new();

/// A font face registered for card text.
#[derive(Clone, Debug)]
pub struct RegisteredFont {
    family: String,
    bytes: Arc<Vec<u8>>,
}

impl RegisteredFont {
    /// Parse font bytes and resolve their family name.
    pub fn from_bytes(bytes: Vec<u8>) -> CardResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CardError::configuration("no font families found in font data"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::configuration("registered font family has no name"))?
            .to_string();
        Ok(Self {
            family,
            bytes: Arc::new(bytes),
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Process-wide font registration, done once before rendering.
///
/// The first successful registration wins; later calls are no-ops that report `false`. Rendering
/// only reads the registry.
pub struct FontRegistry;

impl FontRegistry {
    /// Register a font file; returns `true` if this call installed it.
    pub fn register_file(path: impl AsRef<Path>) -> CardResult<bool> {
        if REGISTRY.get().is_some() {
            return Ok(false);
        }
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            CardError::configuration(format!("read font file '{}': {e}", path.display()))
        })?;
        Self::register_bytes(bytes)
    }

    /// Register raw font bytes; returns `true` if this call installed them.
    pub fn register_bytes(bytes: Vec<u8>) -> CardResult<bool> {
        if REGISTRY.get().is_some() {
            return Ok(false);
        }
        let font = RegisteredFont::from_bytes(bytes)?;
        tracing::debug!(family = font.family(), "registered card font");
        Ok(REGISTRY.set(font).is_ok())
    }

    /// The registered font, if any.
    pub fn get() -> Option<&'static RegisteredFont> {
        REGISTRY.get()
    }

    /// The font card text is drawn with.
    ///
    /// Falls back to a sans-serif system face when nothing was registered. Having no font at all
    /// is a configuration error rather than a card without text.
    pub fn resolve() -> CardResult<&'static RegisteredFont> {
        if let Some(font) = REGISTRY.get() {
            return Ok(font);
        }
        SYSTEM_FALLBACK
            .get_or_init(load_system_font)
            .as_ref()
            .ok_or_else(|| {
                CardError::configuration("no card font registered and no system font found")
            })
    }
}

static SYSTEM_FALLBACK: OnceLock<Option<RegisteredFont>> = OnceLock::new();

const PREFERRED_SYSTEM_FAMILIES: [&str; 4] =
    ["DejaVu Sans", "Liberation Sans", "Noto Sans", "Helvetica"];

fn load_system_font() -> Option<RegisteredFont> {
    use usvg::fontdb::{Database, Family, Query};

    let mut db = Database::new();
    db.load_system_fonts();

    let named = PREFERRED_SYSTEM_FAMILIES.into_iter().map(Family::Name);
    let id = named
        .chain(std::iter::once(Family::SansSerif))
        .find_map(|family| {
            db.query(&Query {
                families: &[family],
                ..Query::default()
            })
        })
        .or_else(|| db.faces().next().map(|face| face.id))?;

    let bytes = db.with_face_data(id, |data, _index| data.to_vec())?;
    match RegisteredFont::from_bytes(bytes) {
        Ok(font) => {
            tracing::info!(family = font.family(), "no card font registered, using system font");
            Some(font)
        }
        Err(err) => {
            tracing::warn!(error = %err, "system font could not be loaded");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
