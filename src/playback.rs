use crate::palette::{Color, ColorPalette};

/// Host-side playback surface the gameplay controls drive. The host editor
/// owns play mode; the panel only flips it, the same way `ViewCapture`
/// abstracts the host's framebuffer.
pub trait PlaybackHost {
    fn is_playing(&self) -> bool;
    fn is_paused(&self) -> bool;
    fn set_playing(&mut self, playing: bool);
    fn set_paused(&mut self, paused: bool);
    /// Advance exactly one frame while paused.
    fn step(&mut self);
    /// Open the scene at `path`; `false` aborts a play-from-start.
    fn open_scene(&mut self, path: &str) -> bool;
}

/// Play-from-start / play / pause / stop / step control state.
///
/// A step request is deferred: the button only records it, and the next
/// `on_update` tick performs the step and re-pauses, so the host advances by
/// exactly one frame regardless of how many times the panel redraws.
pub struct PlaybackControls {
    first_scene: Option<String>,
    hit_play: bool,
    perform_step: bool,
}

impl PlaybackControls {
    pub fn new() -> Self {
        Self { first_scene: None, hit_play: false, perform_step: false }
    }

    /// Scene used by play-from-start, normally build index 0.
    pub fn set_first_scene(&mut self, path: impl Into<String>) {
        self.first_scene = Some(path.into());
    }

    /// Playing as far as the controls are concerned: either the host says
    /// so, or we just asked it to start and it has not caught up yet.
    pub fn is_playing(&self, host: &dyn PlaybackHost) -> bool {
        self.hit_play || host.is_playing()
    }

    pub fn play_from_start(&mut self, host: &mut dyn PlaybackHost) {
        if self.is_playing(host) {
            return;
        }
        let Some(first) = self.first_scene.clone() else {
            return;
        };
        if host.open_scene(&first) {
            self.hit_play = true;
            host.set_playing(true);
        }
    }

    pub fn play(&mut self, host: &mut dyn PlaybackHost) {
        if self.is_playing(host) {
            return;
        }
        self.hit_play = true;
        host.set_playing(true);
    }

    pub fn stop(&mut self, host: &mut dyn PlaybackHost) {
        self.hit_play = false;
        host.set_playing(false);
    }

    pub fn toggle_pause(&mut self, host: &mut dyn PlaybackHost) {
        let paused = host.is_paused();
        host.set_paused(!paused);
    }

    /// Request a single-frame step; ignored while stopped.
    pub fn request_step(&mut self, host: &dyn PlaybackHost) {
        if self.is_playing(host) {
            self.perform_step = true;
        }
    }

    /// Apply any pending step. Call once per editor update tick.
    pub fn on_update(&mut self, host: &mut dyn PlaybackHost) {
        if !self.perform_step {
            return;
        }
        host.step();
        host.set_paused(true);
        self.perform_step = false;
    }

    pub fn play_button_color(&self, host: &dyn PlaybackHost) -> Color {
        if self.is_playing(host) {
            ColorPalette::PLAY_BUTTON_OFF
        } else {
            ColorPalette::PLAY_BUTTON_ON
        }
    }

    pub fn pause_button_color(&self, host: &dyn PlaybackHost) -> Color {
        if !self.is_playing(host) {
            return ColorPalette::PAUSE_BUTTON_OFF;
        }
        if host.is_paused() {
            ColorPalette::PAUSE_BUTTON_HOLD
        } else {
            ColorPalette::PAUSE_BUTTON_ON
        }
    }

    pub fn stop_button_color(&self, host: &dyn PlaybackHost) -> Color {
        if self.is_playing(host) {
            ColorPalette::STOP_BUTTON_ON
        } else {
            ColorPalette::STOP_BUTTON_OFF
        }
    }

    pub fn step_button_color(&self, host: &dyn PlaybackHost) -> Color {
        if self.is_playing(host) {
            ColorPalette::STEP_BUTTON_ON
        } else {
            ColorPalette::STEP_BUTTON_OFF
        }
    }
}

impl Default for PlaybackControls {
    fn default() -> Self {
        Self::new()
    }
}
