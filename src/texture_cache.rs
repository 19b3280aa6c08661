use image::RgbaImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Decoded screenshot pixels plus dimensions.
pub struct CachedTexture {
    pixels: RgbaImage,
}

impl CachedTexture {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.pixels.width(), self.pixels.height())
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Path-keyed cache of decoded screenshots. Absence ("no file there") is a
/// cached outcome, not an error. Invalidation is wholesale only; the epoch
/// advances whenever cached pixels may have changed.
pub struct TextureCache {
    entries: HashMap<PathBuf, Option<CachedTexture>>,
    epoch: u64,
}

impl TextureCache {
    pub fn new() -> Self {
        Self { entries: HashMap::new(), epoch: 0 }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// A cached outcome (hit or absence) is returned without touching
    /// storage unless `force_reload` re-reads the file.
    pub fn get(&mut self, path: impl AsRef<Path>, force_reload: bool) -> Option<&CachedTexture> {
        let path = path.as_ref();
        if force_reload || !self.entries.contains_key(path) {
            if force_reload {
                self.epoch += 1;
            }
            let loaded = load_texture(path);
            self.entries.insert(path.to_path_buf(), loaded);
        }
        self.entries.get(path).and_then(Option::as_ref)
    }

    /// Discard every entry. Subsequent lookups reload from storage.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.epoch += 1;
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

fn load_texture(path: &Path) -> Option<CachedTexture> {
    let image = image::open(path).ok()?;
    Some(CachedTexture { pixels: image.to_rgba8() })
}
