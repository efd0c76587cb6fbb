// this_file: crates/typecast-fontdb/src/font_cache.rs

//! Explicit font cache owned by the host.
//!
//! Fonts are keyed by canonical path and face index. Nothing is evicted
//! implicitly: the host calls [`FontCache::invalidate`] when a file changes
//! on disk and [`FontCache::clear`] to drop everything.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use typecast_core::error::Result;

use crate::Font;

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct FontCacheKey {
    path: PathBuf,
    face_index: u32,
}

impl FontCacheKey {
    fn new(path: &Path, face_index: u32) -> Self {
        Self {
            path: canonical(path),
            face_index,
        }
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Loaded fonts, shared between requests
#[derive(Default)]
pub struct FontCache {
    fonts: RwLock<HashMap<FontCacheKey, Arc<Font>>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached face, loading it on first use
    pub fn load(&self, path: impl AsRef<Path>, face_index: u32) -> Result<Arc<Font>> {
        let path = path.as_ref();
        let key = FontCacheKey::new(path, face_index);

        if let Some(font) = self.fonts.read().get(&key) {
            return Ok(Arc::clone(font));
        }

        let font = Arc::new(Font::from_file_index(path, face_index)?);
        let mut fonts = self.fonts.write();
        // Another caller may have loaded it while we were reading the file
        let entry = fonts.entry(key).or_insert_with(|| Arc::clone(&font));
        Ok(Arc::clone(entry))
    }

    /// Forget every face loaded from `path`
    pub fn invalidate(&self, path: impl AsRef<Path>) -> usize {
        let path = canonical(path.as_ref());
        let mut fonts = self.fonts.write();
        let before = fonts.len();
        fonts.retain(|key, _| key.path != path);
        let removed = before - fonts.len();
        if removed > 0 {
            log::debug!("Invalidated {} cached face(s) for {}", removed, path.display());
        }
        removed
    }

    pub fn clear(&self) {
        self.fonts.write().clear();
    }

    pub fn len(&self) -> usize {
        self.fonts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.read().is_empty()
    }
}
