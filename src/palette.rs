use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
}

#[cfg(feature = "editor")]
impl From<Color> for egui::Color32 {
    fn from(color: Color) -> Self {
        egui::Color32::from_rgba_unmultiplied(
            (color.r * 255.0) as u8,
            (color.g * 255.0) as u8,
            (color.b * 255.0) as u8,
            (color.a * 255.0) as u8,
        )
    }
}

/// Named colors for panel buttons and scene rows. One place to tweak, so
/// the drawers never hard-code channel values.
pub struct ColorPalette;

impl ColorPalette {
    pub const SCENE_OPEN_ACTIVE: Color = Color::rgb(0.30, 0.85, 0.40);
    pub const SCENE_OPEN_IN_BUILD_ENABLED: Color = Color::rgb(0.55, 0.75, 1.00);
    pub const SCENE_OPEN_IN_BUILD_DISABLED: Color = Color::rgb(0.55, 0.60, 0.70);
    pub const SCENE_OPEN_REGULAR: Color = Color::WHITE;

    pub const SNAPSHOT_BUTTON_ON: Color = Color::rgb(0.95, 0.80, 0.35);
    pub const SNAPSHOT_BUTTON_OFF: Color = Color::rgb(0.60, 0.58, 0.50);
    pub const SNAPSHOT_REFRESH_ON: Color = Color::rgb(0.55, 0.85, 0.95);
    pub const SNAPSHOT_REFRESH_OFF: Color = Color::rgb(0.50, 0.58, 0.60);
    pub const SNAPSHOT_OPEN_ON: Color = Color::rgb(0.75, 0.90, 0.75);
    pub const SNAPSHOT_OPEN_OFF: Color = Color::rgb(0.55, 0.60, 0.55);

    pub const PLAY_BUTTON_ON: Color = Color::rgb(0.40, 0.90, 0.45);
    pub const PLAY_BUTTON_OFF: Color = Color::rgb(0.50, 0.62, 0.52);
    pub const PAUSE_BUTTON_ON: Color = Color::rgb(0.95, 0.85, 0.45);
    pub const PAUSE_BUTTON_HOLD: Color = Color::rgb(1.00, 0.65, 0.30);
    pub const PAUSE_BUTTON_OFF: Color = Color::rgb(0.60, 0.58, 0.50);
    pub const STOP_BUTTON_ON: Color = Color::rgb(0.95, 0.45, 0.40);
    pub const STOP_BUTTON_OFF: Color = Color::rgb(0.62, 0.52, 0.50);
    pub const STEP_BUTTON_ON: Color = Color::rgb(0.60, 0.80, 0.95);
    pub const STEP_BUTTON_OFF: Color = Color::rgb(0.52, 0.58, 0.62);
}
