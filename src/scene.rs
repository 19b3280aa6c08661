use crate::palette::{Color, ColorPalette};
use crate::prefs::{EditorPrefs, PrefKey};
use serde::{Deserialize, Serialize};

/// Metadata for one project scene, re-synthesized every refresh cycle from
/// the live project and build configuration. Only the favorite flag
/// persists, keyed by path in the preference store; everything else is
/// derived state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneEntity {
    pub name: String,
    pub full_path: String,
    pub is_active: bool,
    pub in_build: bool,
    pub build_enabled: bool,
    pub build_index: i32,
    pub favorite: bool,
}

impl SceneEntity {
    pub fn new(name: impl Into<String>, full_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
            is_active: false,
            in_build: false,
            build_enabled: false,
            build_index: -1,
            favorite: false,
        }
    }

    /// Conventional snapshot location for this scene.
    pub fn snapshot_path(&self) -> String {
        format!("SceneSnapshots/{}.png", self.name)
    }

    /// Derived row color: active beats in-build-enabled beats
    /// in-build-disabled beats regular.
    pub fn current_color(&self) -> Color {
        if self.is_active {
            return ColorPalette::SCENE_OPEN_ACTIVE;
        }
        if self.in_build {
            if self.build_enabled {
                return ColorPalette::SCENE_OPEN_IN_BUILD_ENABLED;
            }
            return ColorPalette::SCENE_OPEN_IN_BUILD_DISABLED;
        }
        ColorPalette::SCENE_OPEN_REGULAR
    }

    pub fn load_favorite(&mut self, prefs: &EditorPrefs) {
        self.favorite = prefs.get_bool(&PrefKey::SceneFavorite(&self.full_path)).unwrap_or(false);
    }

    pub fn store_favorite(&self, prefs: &mut EditorPrefs) {
        prefs.set_bool(&PrefKey::SceneFavorite(&self.full_path), self.favorite);
        if let Err(err) = prefs.save() {
            eprintln!("[prefs] failed to persist favorite for {}: {err:?}", self.full_path);
        }
    }
}

impl Default for SceneEntity {
    fn default() -> Self {
        Self::new("", "")
    }
}
