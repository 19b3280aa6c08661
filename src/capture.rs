use anyhow::{anyhow, Context, Result};
use image::RgbaImage;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// View-capture substrate: renders the host's current view to an image file
/// at an integer scale multiplier. The host editor supplies the
/// implementation; the panel only drives it.
pub trait ViewCapture {
    /// Current view size in pixels.
    fn view_size(&self) -> (u32, u32);

    /// Write the current view, scaled by `scale`, as a PNG at `path`.
    fn capture(&mut self, path: &Path, scale: u32) -> Result<()>;
}

/// `ViewCapture` backed by the most recent RGBA frame the host handed over.
/// Scaling is nearest-neighbor so a 2x capture stays pixel-exact.
pub struct FrameBufferCapture {
    frame: Option<RgbaImage>,
}

impl FrameBufferCapture {
    pub fn new() -> Self {
        Self { frame: None }
    }

    pub fn set_frame(&mut self, frame: RgbaImage) {
        self.frame = Some(frame);
    }

    pub fn has_frame(&self) -> bool {
        self.frame.is_some()
    }
}

impl Default for FrameBufferCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewCapture for FrameBufferCapture {
    fn view_size(&self) -> (u32, u32) {
        self.frame.as_ref().map(|frame| (frame.width(), frame.height())).unwrap_or((0, 0))
    }

    fn capture(&mut self, path: &Path, scale: u32) -> Result<()> {
        let frame = self.frame.as_ref().ok_or_else(|| anyhow!("No frame submitted to capture"))?;
        if scale == 0 {
            return Err(anyhow!("Capture scale must be at least 1"));
        }
        let scaled = if scale == 1 {
            frame.clone()
        } else {
            RgbaImage::from_fn(frame.width() * scale, frame.height() * scale, |x, y| {
                *frame.get_pixel(x / scale, y / scale)
            })
        };
        if let Some(parent) = path.parent() {
            ensure_directory(parent)?;
        }
        scaled.save(path).with_context(|| format!("Failed to write capture {}", path.display()))
    }
}

pub fn ensure_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path).with_context(|| format!("Failed to create directory {}", path.display()))
}

/// Delete `path` if present. Absence is fine; other failures are logged and
/// reported as "nothing deleted".
pub fn delete_file_if_exists(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(err) if err.kind() == ErrorKind::NotFound => false,
        Err(err) => {
            eprintln!("[screenshot] failed to delete {}: {err}", path.display());
            false
        }
    }
}

/// Reveal `path` in the platform file browser. Best effort; a missing file
/// or missing launcher degrades to a log line, never an error.
pub fn reveal_in_file_browser(path: impl AsRef<Path>) {
    let path = path.as_ref();
    if let Err(err) = spawn_file_browser(path) {
        eprintln!("[screenshot] failed to open file browser for {}: {err}", path.display());
    }
}

#[cfg(target_os = "windows")]
fn spawn_file_browser(path: &Path) -> std::io::Result<std::process::Child> {
    std::process::Command::new("explorer").arg("/select,").arg(path).spawn()
}

#[cfg(target_os = "macos")]
fn spawn_file_browser(path: &Path) -> std::io::Result<std::process::Child> {
    std::process::Command::new("open").arg("-R").arg(path).spawn()
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn spawn_file_browser(path: &Path) -> std::io::Result<std::process::Child> {
    std::process::Command::new("xdg-open").arg(path.parent().unwrap_or(path)).spawn()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn capture_scales_by_integer_factor() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("shots/capture.png");
        let mut capture = FrameBufferCapture::new();
        capture.set_frame(RgbaImage::from_pixel(3, 2, image::Rgba([200, 10, 10, 255])));

        assert_eq!(capture.view_size(), (3, 2));
        capture.capture(&path, 4).expect("capture");

        let written = image::open(&path).expect("reopen").to_rgba8();
        assert_eq!((written.width(), written.height()), (12, 8));
        assert_eq!(written.get_pixel(11, 7), &image::Rgba([200, 10, 10, 255]));
    }

    #[test]
    fn capture_without_frame_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let mut capture = FrameBufferCapture::new();
        assert!(capture.capture(&dir.path().join("x.png"), 1).is_err());
    }

    #[test]
    fn delete_tolerates_absence() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("gone.png");
        assert!(!delete_file_if_exists(&path));

        std::fs::write(&path, b"data").expect("write");
        assert!(delete_file_if_exists(&path));
        assert!(!path.exists());
    }
}
