//! Interactive particle field viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the [`ParticleField`] and
//! acts as its host: it schedules frames, feeds it the panel size and the
//! pointer position, and draws it through [`PainterSurface`].

use eframe::App;
use field_core::{
    config::Config,
    field::{ParticleField, RenderStats},
    surface::Surface,
};
use glam::Vec2;
use rand::Rng;

use crate::surface::{PainterSurface, to_field};

/// Frames per second the field's per-frame constants are tuned for.
const REFERENCE_FPS: f32 = 60.0;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(13, 17, 23);

/// Main application state for the viewer.
///
/// The typical per-frame update is:
/// 1. Handle panel interactions (run/pause, step, reset, dispose, config edits).
/// 2. Resize the field to the central panel and read the hover position.
/// 3. Step (when running) and render the field, then request the next frame.
///
/// ### Fields
/// - `field` - The simulation being hosted.
/// - `cfg` - Editable copy of the field's configuration.
///
/// - `running` - Whether frames advance the simulation.
/// - `step_requested` - Advance exactly one frame on the next update.
///
/// - `last_stats` - What the last frame drew (for the status bar).
/// - `last_frame_dt` - Duration of the last frame in seconds.
pub struct Viewer {
    field: ParticleField,
    cfg: Config,

    running: bool,
    step_requested: bool,

    last_stats: RenderStats,
    last_frame_dt: f32,
}

impl Viewer {
    /// Creates a viewer around an unmounted field.
    ///
    /// The field mounts on the first frame, once the central panel size is
    /// known.
    pub fn new(field: ParticleField) -> Self {
        let cfg = *field.config();
        Self {
            field,
            cfg,
            running: true,
            step_requested: false,
            last_stats: RenderStats::default(),
            last_frame_dt: 0.0,
        }
    }

    /// Scatters a fresh layout. A disposed field is replaced by a new one,
    /// which mounts on the next frame.
    fn reset(&mut self) {
        if self.field.is_disposed() {
            match ParticleField::with_seed(self.cfg, rand::rng().random()) {
                Ok(field) => self.field = field,
                Err(e) => {
                    log::warn!("cannot remount particle field: {e}");
                    return;
                }
            }
            self.running = true;
            return;
        }
        if let Err(e) = self.field.reset() {
            log::warn!("reset failed: {e}");
        }
    }

    /// Tears the field down; the frame loop stops with it.
    fn dispose(&mut self) {
        self.field.dispose();
        self.running = false;
        self.step_requested = false;
        self.last_stats = RenderStats::default();
    }

    /// Pushes edits made in the config panel into the field.
    ///
    /// Rejected edits are logged and rolled back to the field's config.
    fn apply_config(&mut self) {
        if self.cfg == *self.field.config() {
            return;
        }
        if let Err(e) = self.field.set_config(self.cfg) {
            log::warn!("config edit rejected: {e}");
            self.cfg = *self.field.config();
        }
    }

    /// Runs one host frame against `surface`.
    ///
    /// ### Parameters
    /// - `dt` - Wall time since the previous frame, in seconds.
    /// - `size` - Current size of the drawing area in pixels.
    /// - `pointer` - Hover position in field coordinates, if any.
    /// - `surface` - Where the field is drawn.
    ///
    /// ### Returns
    /// `true` if another frame should be scheduled.
    fn advance(
        &mut self,
        dt: f32,
        size: Vec2,
        pointer: Option<Vec2>,
        surface: &mut impl Surface,
    ) -> bool {
        if self.field.is_disposed() {
            return false;
        }
        if let Err(e) = self.field.resize(size.x, size.y) {
            log::debug!("{e}");
            self.last_stats = RenderStats::default();
            return false;
        }

        let frames = if self.running || self.step_requested {
            dt * REFERENCE_FPS
        } else {
            0.0
        };
        if self.step_requested {
            self.step_requested = false;
        }

        self.field.step(frames, pointer);
        self.last_stats = self.field.render(surface);
        self.last_frame_dt = dt;

        self.running
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, reset, dispose).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let disposed = self.field.is_disposed();

                if ui
                    .add_enabled(
                        !disposed,
                        egui::Button::new(if self.running { "⏸ Pause" } else { "▶ Run" }),
                    )
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui
                    .add_enabled(!disposed && !self.running, egui::Button::new("Step"))
                    .clicked()
                {
                    self.step_requested = true;
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                if ui.add_enabled(!disposed, egui::Button::new("Dispose")).clicked() {
                    self.dispose();
                }
            });
        });
    }

    /// Builds the bottom status bar (frame time, particle and link counts).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt last = {:.3} s", self.last_frame_dt));
                ui.separator();
                ui.label(format!("links = {}", self.last_stats.links));
                ui.label(format!("particles = {}", self.last_stats.particles));
                if let Some(vp) = self.field.viewport() {
                    ui.separator();
                    ui.label(format!("{:.0}x{:.0}", vp.width, vp.height));
                }
            });
        });
    }

    /// Builds the right-hand configuration panel.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Spawning");
                Self::labeled_drag_f32(
                    ui,
                    "particle_spacing:",
                    &mut self.cfg.particle_spacing,
                    2.0..=200.0,
                    0.5,
                );
                Self::labeled_drag_f32(
                    ui,
                    "initial_speed:",
                    &mut self.cfg.initial_speed,
                    0.0..=10.0,
                    0.05,
                );
                Self::labeled_drag_f32(ui, "size min:", &mut self.cfg.size_range[0], 0.1..=20.0, 0.1);
                Self::labeled_drag_f32(ui, "size max:", &mut self.cfg.size_range[1], 0.2..=20.0, 0.1);
                Self::labeled_drag_f32(
                    ui,
                    "opacity min:",
                    &mut self.cfg.opacity_range[0],
                    0.0..=1.0,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "opacity max:",
                    &mut self.cfg.opacity_range[1],
                    0.0..=1.0,
                    0.01,
                );

                ui.separator();
                ui.label("Forces");
                Self::labeled_drag_f32(
                    ui,
                    "repulsion_radius:",
                    &mut self.cfg.repulsion_radius,
                    1.0..=1000.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "repulsion_strength:",
                    &mut self.cfg.repulsion_strength,
                    0.0..=1.0,
                    0.001,
                );
                Self::labeled_drag_f32(
                    ui,
                    "return_force:",
                    &mut self.cfg.return_force,
                    0.0..=0.1,
                    0.0005,
                );
                Self::labeled_drag_f32(ui, "damping:", &mut self.cfg.damping, 0.5..=1.0, 0.001);

                ui.separator();
                ui.label("Links");
                Self::labeled_drag_f32(
                    ui,
                    "link_distance:",
                    &mut self.cfg.link_distance,
                    1.0..=500.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "link_max_alpha:",
                    &mut self.cfg.link_max_alpha,
                    0.0..=1.0,
                    0.01,
                );
                Self::labeled_drag_f32(ui, "link_width:", &mut self.cfg.link_width, 0.0..=5.0, 0.05);

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("color:");
                    ui.color_edit_button_srgb(&mut self.cfg.color);
                });

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                }
            });
        self.apply_config();
    }

    /// Builds the central panel the field fills.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(BACKGROUND))
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;

                if self.field.is_disposed() {
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "disposed. Reset to remount",
                        egui::FontId::proportional(16.0),
                        egui::Color32::GRAY,
                    );
                    return;
                }

                let painter = ui.painter_at(rect);
                let mut surface = PainterSurface::new(&painter, rect, BACKGROUND);
                let pointer = response.hover_pos().map(|p| to_field(rect, p));
                let dt = ctx.input(|i| i.stable_dt);
                let size = Vec2::new(rect.width(), rect.height());

                if self.advance(dt, size, pointer, &mut surface) {
                    ctx.request_repaint();
                }
            });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
