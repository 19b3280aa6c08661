use crate::capture::{self, ViewCapture};
use crate::history::ScreenshotHistory;
use crate::prefs::EditorPrefs;
use crate::texture_cache::{CachedTexture, TextureCache};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const MIN_SCALE: u32 = 1;
pub const MAX_SCALE: u32 = 10;
pub const SCREENSHOT_FOLDER: &str = "Screenshots";

/// Button-press intents forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    TakeSnapshot,
    Refresh(String),
    Delete(String),
    Open(String),
    RefreshAll,
    DeleteAll,
}

/// One history slot as the view renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub path: String,
    pub file_name: String,
    /// Pixel dimensions when the backing file resolves; `None` renders as
    /// the empty placeholder.
    pub size: Option<(u32, u32)>,
}

/// State returned to the presentation adapter after each intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSnapshot {
    pub current: Option<String>,
    pub count: usize,
    pub entries: Vec<SlotView>,
    pub view_size: (u32, u32),
    pub estimated_size: (u32, u32),
    pub scale: u32,
}

/// Orchestrates capture, history registration, and cache invalidation.
/// Owns its history, cache, and preference store; confined to one panel
/// instance.
pub struct SnapshotCoordinator {
    prefs: EditorPrefs,
    history: ScreenshotHistory,
    cache: TextureCache,
    root: PathBuf,
    scale: u32,
}

impl SnapshotCoordinator {
    pub fn new(root: impl Into<PathBuf>, prefs: EditorPrefs) -> Self {
        let history = ScreenshotHistory::load(&prefs);
        Self { prefs, history, cache: TextureCache::new(), root: root.into(), scale: MIN_SCALE }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Out-of-range values are clamped rather than trusted to the slider.
    pub fn set_scale(&mut self, scale: u32) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn history(&self) -> &ScreenshotHistory {
        &self.history
    }

    pub fn prefs(&self) -> &EditorPrefs {
        &self.prefs
    }

    pub fn prefs_mut(&mut self) -> &mut EditorPrefs {
        &mut self.prefs
    }

    pub fn cache(&self) -> &TextureCache {
        &self.cache
    }

    pub fn cache_epoch(&self) -> u64 {
        self.cache.epoch()
    }

    pub fn texture(&mut self, path: &str) -> Option<&CachedTexture> {
        if path.is_empty() {
            return None;
        }
        self.cache.get(path, false)
    }

    pub fn suggested_folder(&self) -> PathBuf {
        self.root.join(SCREENSHOT_FOLDER)
    }

    pub fn suggested_name(&self) -> String {
        format!("screenshot_{:03}.png", self.history.len())
    }

    pub fn suggested_path(&self) -> PathBuf {
        self.suggested_folder().join(self.suggested_name())
    }

    /// Capture the current view. An empty `existing` path derives a fresh
    /// one under the screenshot folder; capture alone registers nothing.
    pub fn take_snapshot(
        &mut self,
        view: &mut dyn ViewCapture,
        existing: Option<&str>,
    ) -> Result<String> {
        let path = match existing.filter(|path| !path.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => {
                capture::ensure_directory(self.suggested_folder())?;
                self.suggested_path()
            }
        };
        view.capture(&path, self.scale)?;
        Ok(path.display().to_string())
    }

    /// Push `path` into history only once the cache confirms a real image
    /// exists there.
    pub fn register_if_present(&mut self, path: &str) -> bool {
        if self.cache.get(path, true).is_none() {
            return false;
        }
        self.history.push(path, &mut self.prefs);
        true
    }

    /// Re-validate every history entry against storage, pruning the ones
    /// whose backing file is gone. One disk write at the end.
    pub fn refresh_all(&mut self) -> Result<()> {
        self.history.set_auto_save(false);
        let mut drained = Vec::with_capacity(self.history.len());
        while let Some(entry) = self.history.pop(&mut self.prefs) {
            drained.push(entry);
        }
        self.cache.clear();
        // Re-push oldest first so surviving entries keep their order.
        for entry in drained.into_iter().rev() {
            if self.cache.get(&entry, true).is_some() {
                self.history.push(entry, &mut self.prefs);
            }
        }
        self.history.set_auto_save(true);
        self.history.save(&mut self.prefs)
    }

    /// Delete every referenced file, empty the history, drop the cache,
    /// persist once.
    pub fn delete_all(&mut self) -> Result<()> {
        self.history.set_auto_save(false);
        while let Some(entry) = self.history.pop(&mut self.prefs) {
            capture::delete_file_if_exists(Path::new(&entry));
        }
        self.history.clear();
        self.cache.clear();
        self.history.set_auto_save(true);
        self.history.save(&mut self.prefs)
    }

    /// Force-reload one slot; `false` means the backing file is gone.
    pub fn refresh_slot(&mut self, path: &str) -> bool {
        self.cache.get(path, true).is_some()
    }

    /// Delete one screenshot: file, history entry, and cache.
    pub fn delete_slot(&mut self, path: &str) {
        capture::delete_file_if_exists(Path::new(path));
        self.history.remove(path, &mut self.prefs);
        self.cache.clear();
    }

    /// Apply one intent, return the state to render. Failures degrade to a
    /// log line; the panel must never take down its host.
    pub fn handle_intent(&mut self, intent: UserIntent, view: &mut dyn ViewCapture) -> PanelSnapshot {
        match intent {
            UserIntent::TakeSnapshot => match self.take_snapshot(view, None) {
                Ok(path) => {
                    self.register_if_present(&path);
                }
                Err(err) => eprintln!("[screenshot] capture failed: {err:?}"),
            },
            UserIntent::Refresh(path) => {
                self.refresh_slot(&path);
            }
            UserIntent::Delete(path) => self.delete_slot(&path),
            UserIntent::Open(path) => capture::reveal_in_file_browser(Path::new(&path)),
            UserIntent::RefreshAll => {
                if let Err(err) = self.refresh_all() {
                    eprintln!("[screenshot] refresh failed: {err:?}");
                }
            }
            UserIntent::DeleteAll => {
                if let Err(err) = self.delete_all() {
                    eprintln!("[screenshot] delete-all failed: {err:?}");
                }
            }
        }
        self.panel_snapshot(view)
    }

    pub fn panel_snapshot(&mut self, view: &dyn ViewCapture) -> PanelSnapshot {
        let paths: Vec<String> = self.history.iter().map(str::to_string).collect();
        let entries = paths
            .into_iter()
            .map(|path| {
                let size = self.cache.get(&path, false).map(CachedTexture::size);
                let file_name = Path::new(&path)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                SlotView { path, file_name, size }
            })
            .collect();
        let (width, height) = view.view_size();
        PanelSnapshot {
            current: self.history.current().map(str::to_string),
            count: self.history.len(),
            entries,
            view_size: (width, height),
            estimated_size: (width * self.scale, height * self.scale),
            scale: self.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_clamped_to_contract_range() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = EditorPrefs::load_or_default(dir.path().join("prefs.json"));
        let mut coordinator = SnapshotCoordinator::new(dir.path(), prefs);

        coordinator.set_scale(0);
        assert_eq!(coordinator.scale(), MIN_SCALE);
        coordinator.set_scale(64);
        assert_eq!(coordinator.scale(), MAX_SCALE);
        coordinator.set_scale(4);
        assert_eq!(coordinator.scale(), 4);
    }

    #[test]
    fn suggested_name_tracks_history_count() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = EditorPrefs::load_or_default(dir.path().join("prefs.json"));
        let mut coordinator = SnapshotCoordinator::new(dir.path(), prefs);

        assert_eq!(coordinator.suggested_name(), "screenshot_000.png");
        coordinator.history.push("a.png", &mut coordinator.prefs);
        assert_eq!(coordinator.suggested_name(), "screenshot_001.png");
    }
}
