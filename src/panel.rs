use crate::capture::ViewCapture;
use crate::palette::ColorPalette;
use crate::playback::{PlaybackControls, PlaybackHost};
use crate::prefs::EditorPrefs;
use crate::scene::SceneEntity;
use crate::snapshot::{PanelSnapshot, SlotView, SnapshotCoordinator, UserIntent, MAX_SCALE, MIN_SCALE};
use std::collections::HashMap;

const PREVIEW_EDGE: f32 = 128.0;

/// Screenshot tool widget: configuration, capture controls, preview, and
/// the saved-screenshot strip. Thin layer over the coordinator; every click
/// becomes a `UserIntent` and the widget renders whatever state comes back.
pub struct ScreenshotPanel {
    coordinator: SnapshotCoordinator,
    textures: HashMap<String, egui::TextureHandle>,
    texture_epoch: u64,
}

impl ScreenshotPanel {
    pub fn new(coordinator: SnapshotCoordinator) -> Self {
        Self { coordinator, textures: HashMap::new(), texture_epoch: 0 }
    }

    pub fn coordinator(&self) -> &SnapshotCoordinator {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut SnapshotCoordinator {
        &mut self.coordinator
    }

    /// Full drawer: configuration, current-capture slot, history strip.
    pub fn ui(&mut self, ui: &mut egui::Ui, view: &mut dyn ViewCapture) {
        self.sync_texture_epoch();
        let snapshot = self.coordinator.panel_snapshot(view);
        let mut intent = None;

        self.draw_configuration(ui, &snapshot);
        ui.separator();

        let given_path = self.coordinator.suggested_path().display().to_string();
        ui.label(format!("Current Screenshot: {given_path}"));
        ui.horizontal(|ui| {
            if let Some(slot_intent) = self.draw_slot_controls(ui, snapshot.current.as_deref(), true) {
                intent = Some(slot_intent);
            }
            let current = snapshot.current.clone().unwrap_or_default();
            draw_preview(ui, &mut self.coordinator, &mut self.textures, &current);
        });

        ui.label(format!("Screenshots Taken: {}", snapshot.count));
        ui.horizontal(|ui| {
            if ui.button("Refresh").clicked() {
                intent = Some(UserIntent::RefreshAll);
            }
            if ui.button("Delete All").clicked() {
                intent = Some(UserIntent::DeleteAll);
            }
        });

        ui.label("Saved Screenshots");
        egui::ScrollArea::horizontal().id_salt("saved_screenshots").show(ui, |ui| {
            ui.horizontal(|ui| {
                for slot in &snapshot.entries {
                    if let Some(slot_intent) = self.draw_history_slot(ui, slot) {
                        intent = Some(slot_intent);
                    }
                }
            });
        });

        if let Some(intent) = intent {
            self.coordinator.handle_intent(intent, view);
        }
    }

    /// Per-scene snapshot slot: captures to the scene's conventional path
    /// instead of a derived one.
    pub fn scene_snapshot_ui(&mut self, ui: &mut egui::Ui, view: &mut dyn ViewCapture, scene: &SceneEntity) {
        self.sync_texture_epoch();
        let path = scene.snapshot_path();
        let exists = self.coordinator.texture(&path).is_some();
        let mut intent = None;

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                if color_button(ui, "Take Snapshot", ColorPalette::SNAPSHOT_BUTTON_ON) {
                    match self.coordinator.take_snapshot(&mut *view, Some(&path)) {
                        // Scene snapshots live at a fixed per-scene path and
                        // stay out of the general history; reload the slot so
                        // the cached absence does not mask the fresh capture.
                        Ok(final_path) => {
                            self.coordinator.refresh_slot(&final_path);
                        }
                        Err(err) => eprintln!("[screenshot] capture failed: {err:?}"),
                    }
                }
                let refresh_color = if exists {
                    ColorPalette::SNAPSHOT_REFRESH_ON
                } else {
                    ColorPalette::SNAPSHOT_REFRESH_OFF
                };
                if color_button(ui, "Refresh", refresh_color) {
                    intent = Some(UserIntent::Refresh(path.clone()));
                }
                let open_color =
                    if exists { ColorPalette::SNAPSHOT_OPEN_ON } else { ColorPalette::SNAPSHOT_OPEN_OFF };
                if color_button(ui, "Open Folder", open_color) && exists {
                    intent = Some(UserIntent::Open(path.clone()));
                }
            });
            draw_preview(ui, &mut self.coordinator, &mut self.textures, &path);
        });

        if let Some(intent) = intent {
            self.coordinator.handle_intent(intent, view);
        }
    }

    fn draw_configuration(&mut self, ui: &mut egui::Ui, snapshot: &PanelSnapshot) {
        ui.horizontal(|ui| {
            ui.label("Current View Size:");
            ui.label(format!("{} x {}", snapshot.view_size.0, snapshot.view_size.1));
        });
        ui.horizontal(|ui| {
            ui.label("Screenshot Scale:");
            let mut scale = snapshot.scale;
            ui.add(egui::Slider::new(&mut scale, MIN_SCALE..=MAX_SCALE));
            self.coordinator.set_scale(scale);
        });
        ui.horizontal(|ui| {
            ui.label("Estimated Size:");
            ui.label(format!("{} x {}", snapshot.estimated_size.0, snapshot.estimated_size.1));
        });
    }

    fn draw_slot_controls(
        &mut self,
        ui: &mut egui::Ui,
        current: Option<&str>,
        enable_shot: bool,
    ) -> Option<UserIntent> {
        let mut intent = None;
        let path_exists = current.is_some_and(|path| !path.is_empty());
        ui.vertical(|ui| {
            let shot_color =
                if enable_shot { ColorPalette::SNAPSHOT_BUTTON_ON } else { ColorPalette::SNAPSHOT_BUTTON_OFF };
            if color_button(ui, "Take Snapshot", shot_color) && enable_shot {
                intent = Some(UserIntent::TakeSnapshot);
            }
            let refresh_color = if path_exists {
                ColorPalette::SNAPSHOT_REFRESH_ON
            } else {
                ColorPalette::SNAPSHOT_REFRESH_OFF
            };
            if color_button(ui, "Refresh", refresh_color) && path_exists {
                intent = current.map(|path| UserIntent::Refresh(path.to_string()));
            }
            let open_color =
                if path_exists { ColorPalette::SNAPSHOT_OPEN_ON } else { ColorPalette::SNAPSHOT_OPEN_OFF };
            if color_button(ui, "Open Folder", open_color) && path_exists {
                intent = current.map(|path| UserIntent::Open(path.to_string()));
            }
        });
        intent
    }

    fn draw_history_slot(&mut self, ui: &mut egui::Ui, slot: &SlotView) -> Option<UserIntent> {
        let mut intent = None;
        ui.vertical(|ui| {
            draw_preview(ui, &mut self.coordinator, &mut self.textures, &slot.path);
            ui.horizontal(|ui| {
                if ui.small_button("Open").clicked() {
                    intent = Some(UserIntent::Open(slot.path.clone()));
                }
                if ui.small_button("Delete").clicked() {
                    intent = Some(UserIntent::Delete(slot.path.clone()));
                }
            });
        });
        intent
    }

    fn sync_texture_epoch(&mut self) {
        // Pixel cache changed; GPU-side handles are stale.
        if self.coordinator.cache_epoch() != self.texture_epoch {
            self.textures.clear();
            self.texture_epoch = self.coordinator.cache_epoch();
        }
    }
}

/// Play-from-start / play / pause / stop / step row over a `PlaybackHost`.
pub struct GameplayControlsPanel {
    controls: PlaybackControls,
}

impl GameplayControlsPanel {
    pub fn new() -> Self {
        Self { controls: PlaybackControls::new() }
    }

    pub fn controls(&self) -> &PlaybackControls {
        &self.controls
    }

    pub fn set_first_scene(&mut self, path: impl Into<String>) {
        self.controls.set_first_scene(path);
    }

    /// Call once per editor update tick so pending steps land.
    pub fn on_update(&mut self, host: &mut dyn PlaybackHost) {
        self.controls.on_update(host);
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, host: &mut dyn PlaybackHost) {
        let playing = self.controls.is_playing(host);
        ui.horizontal(|ui| {
            if color_button(ui, "⏮ Play From Start", self.controls.play_button_color(host)) {
                self.controls.play_from_start(&mut *host);
            }
            if playing {
                if color_button(ui, "⏹ Stop", self.controls.stop_button_color(host)) {
                    self.controls.stop(&mut *host);
                }
            } else if color_button(ui, "▶ Play", self.controls.play_button_color(host)) {
                self.controls.play(&mut *host);
            }
            if color_button(ui, "⏸ Pause", self.controls.pause_button_color(host)) {
                self.controls.toggle_pause(&mut *host);
            }
            if color_button(ui, "⏭ Step", self.controls.step_button_color(host)) {
                self.controls.request_step(&*host);
            }
        });
    }
}

impl Default for GameplayControlsPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Scene list rows plus the toolbar edit toggle.
pub struct SceneListPanel {
    pub enable_editing: bool,
}

impl SceneListPanel {
    pub fn new() -> Self {
        Self { enable_editing: false }
    }

    pub fn toolbar_ui(&mut self, ui: &mut egui::Ui) {
        ui.toggle_value(&mut self.enable_editing, "Edit");
    }

    /// Draw one scene row. Returns true when the open button was pressed;
    /// actually switching scenes is the host's job.
    pub fn scene_row(&mut self, ui: &mut egui::Ui, scene: &mut SceneEntity, prefs: &mut EditorPrefs) -> bool {
        let mut open_clicked = false;
        ui.horizontal(|ui| {
            let mut favorite = scene.favorite;
            if ui.toggle_value(&mut favorite, "★").changed() {
                scene.favorite = favorite;
                scene.store_favorite(prefs);
            }
            if color_button(ui, &scene.name, scene.current_color()) {
                open_clicked = true;
            }
            if scene.in_build {
                let state = if scene.build_enabled { "enabled" } else { "disabled" };
                ui.label(format!("build #{} ({state})", scene.build_index));
            }
            if self.enable_editing {
                ui.label(&scene.full_path);
            }
        });
        open_clicked
    }
}

impl Default for SceneListPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn color_button(ui: &mut egui::Ui, text: &str, color: crate::palette::Color) -> bool {
    ui.add(egui::Button::new(text).fill(egui::Color32::from(color))).clicked()
}

fn draw_preview(
    ui: &mut egui::Ui,
    coordinator: &mut SnapshotCoordinator,
    textures: &mut HashMap<String, egui::TextureHandle>,
    path: &str,
) {
    ui.vertical(|ui| {
        match texture_handle(coordinator, textures, ui.ctx(), path) {
            Some((id, (width, height))) => {
                let scale = (PREVIEW_EDGE / width.max(height).max(1) as f32).min(1.0);
                let size = egui::vec2(width as f32 * scale, height as f32 * scale);
                ui.add(egui::Image::new(egui::load::SizedTexture::new(id, size)));
                ui.label(
                    std::path::Path::new(path)
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "--".to_string()),
                );
                ui.label(format!("Screenshot Size: {width} x {height}"));
            }
            None => {
                ui.label("[ Empty Screenshot ]");
                ui.label("--");
                ui.label("Screenshot Size: --");
            }
        }
    });
}

fn texture_handle(
    coordinator: &mut SnapshotCoordinator,
    textures: &mut HashMap<String, egui::TextureHandle>,
    ctx: &egui::Context,
    path: &str,
) -> Option<(egui::TextureId, (u32, u32))> {
    if path.is_empty() {
        return None;
    }
    if !textures.contains_key(path) {
        let texture = coordinator.texture(path)?;
        let size = [texture.width() as usize, texture.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, texture.pixels().as_raw());
        let handle = ctx.load_texture(path.to_string(), image, egui::TextureOptions::LINEAR);
        textures.insert(path.to_string(), handle);
    }
    textures.get(path).map(|handle| {
        let size = handle.size();
        (handle.id(), (size[0] as u32, size[1] as u32))
    })
}
