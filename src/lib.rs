pub mod capture;
pub mod history;
pub mod palette;
#[cfg(feature = "editor")]
pub mod panel;
pub mod playback;
pub mod prefs;
pub mod scene;
pub mod snapshot;
pub mod texture_cache;

pub use capture::{FrameBufferCapture, ViewCapture};
pub use history::ScreenshotHistory;
pub use playback::{PlaybackControls, PlaybackHost};
pub use prefs::{EditorPrefs, PrefKey};
pub use scene::SceneEntity;
pub use snapshot::{PanelSnapshot, SnapshotCoordinator, UserIntent};
pub use texture_cache::TextureCache;
