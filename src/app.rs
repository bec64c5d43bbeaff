use eframe::egui;
use nalgebra::{Matrix3, Vector3};
use rand::Rng;
use tracing::info;

use crate::config::{parse_color, VizConfig};
use crate::glyph::{GlyphEntry, GlyphReconciler, ReconcileSummary};
use crate::math;
use crate::render::{draw_axes_3d, draw_glyphs, draw_grid_3d, draw_nav_cube};
use crate::sanitize::{parse_component, sanitize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Sum,
    Difference,
    Dot,
    Cross,
    ScalarTriple,
    VectorTriple,
}

impl Operation {
    const ALL: [Operation; 6] = [
        Operation::Sum,
        Operation::Difference,
        Operation::Dot,
        Operation::Cross,
        Operation::ScalarTriple,
        Operation::VectorTriple,
    ];

    fn label(self) -> &'static str {
        match self {
            Operation::Sum => "Sum  A + B + C",
            Operation::Difference => "Difference  A − B",
            Operation::Dot => "Dot  A · B",
            Operation::Cross => "Cross  A × B",
            Operation::ScalarTriple => "Scalar triple  A · (B × C)",
            Operation::VectorTriple => "Vector triple  A × (B × C)",
        }
    }
}

enum OpResult {
    Vector(Vector3<f64>),
    Scalar(f64),
}

const VECTOR_NAMES: [&str; 3] = ["A", "B", "C"];

pub struct VectorApp {
    // Raw field text, sanitized on every edit. [vector][component]
    fields: [[String; 3]; 3],
    use_vector_c: bool,
    show_inputs: bool,
    operation: Operation,
    result_text: String,
    error_text: Option<String>,
    last_summary: Option<ReconcileSummary>,
    reconciler: GlyphReconciler,
    config: VizConfig,

    // Viewport state
    view_rot: f32,   // Yaw
    view_pitch: f32, // Pitch
    view_zoom: f32,
    perspective: bool,
    grid_size: i32,
    grid_opacity: u8,
}

impl VectorApp {
    pub fn new(config: VizConfig) -> Self {
        let mut app = Self {
            fields: [
                ["1".into(), "0".into(), "0".into()],
                ["0".into(), "1".into(), "0".into()],
                ["0".into(), "0".into(), "1".into()],
            ],
            use_vector_c: true,
            show_inputs: true,
            operation: Operation::Cross,
            result_text: String::new(),
            error_text: None,
            last_summary: None,
            reconciler: GlyphReconciler::new(),
            view_rot: 0.5,
            view_pitch: 0.3,
            view_zoom: 1.0,
            perspective: config.perspective,
            grid_size: config.grid_size,
            grid_opacity: config.grid_opacity,
            config,
        };
        // The scene is never blank: compute once with the defaults.
        app.compute();
        app
    }

    pub fn set_view(&mut self, yaw: f32, pitch: f32) {
        self.view_rot = yaw;
        self.view_pitch = pitch;
    }

    fn read_vector(&self, idx: usize) -> Vector3<f64> {
        Vector3::new(
            parse_component(&self.fields[idx][0]),
            parse_component(&self.fields[idx][1]),
            parse_component(&self.fields[idx][2]),
        )
    }

    /// One full recomputation pass: read fields, run the selected operation,
    /// format the result and reconcile the scene. Runs synchronously inside
    /// one event-handler invocation.
    fn compute(&mut self) {
        self.error_text = None;

        let a = self.read_vector(0);
        let b = self.read_vector(1);
        let c = self.use_vector_c.then(|| self.read_vector(2));

        let outcome = match (self.operation, c) {
            (Operation::ScalarTriple | Operation::VectorTriple, None) => {
                // Precondition violation: no computation, scene cleared,
                // message shown in place of a result.
                self.error_text = Some("Vector C is required for this operation".to_owned());
                self.result_text.clear();
                self.last_summary = None;
                self.reconciler.clear();
                return;
            }
            (Operation::ScalarTriple, Some(c)) => OpResult::Scalar(math::scalar_triple(a, b, c)),
            (Operation::VectorTriple, Some(c)) => OpResult::Vector(math::vector_triple(a, b, c)),
            (Operation::Sum, c) => {
                let mut sum = math::add(a, b);
                if let Some(c) = c {
                    sum = math::add(sum, c);
                }
                OpResult::Vector(sum)
            }
            (Operation::Difference, _) => OpResult::Vector(math::subtract(a, b)),
            (Operation::Dot, _) => OpResult::Scalar(math::dot(a, b)),
            (Operation::Cross, _) => OpResult::Vector(math::cross(a, b)),
        };

        self.result_text = match outcome {
            OpResult::Vector(v) => format_vec(v),
            OpResult::Scalar(s) => format!("{:.2}", s),
        };

        let pal = &self.config.palette;
        let mut entries = Vec::new();
        if self.show_inputs {
            entries.push(GlyphEntry::new(
                "A",
                a,
                parse_color(&pal.vec_a, egui::Color32::RED),
            ));
            entries.push(GlyphEntry::new(
                "B",
                b,
                parse_color(&pal.vec_b, egui::Color32::BLUE),
            ));
            if let Some(c) = c {
                entries.push(GlyphEntry::new(
                    "C",
                    c,
                    parse_color(&pal.vec_c, egui::Color32::YELLOW),
                ));
            }
        }

        // Scalar results contribute no glyph; only vector results are drawn.
        if let OpResult::Vector(v) = outcome {
            let result_glyph = match self.operation {
                Operation::Sum => Some(("Sum", pal.sum.as_str(), egui::Color32::GREEN)),
                Operation::Difference => Some((
                    "Difference",
                    pal.difference.as_str(),
                    egui::Color32::from_rgb(255, 165, 0),
                )),
                Operation::Cross => Some((
                    "CrossAB",
                    pal.cross.as_str(),
                    egui::Color32::from_rgb(128, 0, 128),
                )),
                Operation::VectorTriple => Some((
                    "VectorTriple",
                    pal.vector_triple.as_str(),
                    egui::Color32::from_rgb(0, 255, 255),
                )),
                Operation::Dot | Operation::ScalarTriple => None,
            };
            if let Some((id, hex, fallback)) = result_glyph {
                entries.push(GlyphEntry::new(id, v, parse_color(hex, fallback)));
            }
        }

        let summary = self.reconciler.reconcile(&entries);
        info!(
            op = self.operation.label(),
            created = summary.created,
            updated = summary.updated,
            removed = summary.removed,
            "recomputed"
        );
        self.last_summary = Some(summary);
    }

    fn clear_scene(&mut self) {
        self.reconciler.clear();
        self.result_text.clear();
        self.error_text = None;
        self.last_summary = None;
    }

    fn randomize_vectors(&mut self) {
        let mut rng = rand::thread_rng();
        for vector in self.fields.iter_mut() {
            for field in vector.iter_mut() {
                // Steps of 0.5 between -3 and 3
                let val = rng.gen_range(-6..=6) as f64 * 0.5;
                *field = format!("{}", val);
            }
        }
        self.compute();
    }

    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let input = ctx.input(|i| i.clone());

        if input.key_pressed(egui::Key::V) {
            self.perspective = !self.perspective;
        }
        if input.key_pressed(egui::Key::Enter) {
            self.compute();
        }
        if input.key_pressed(egui::Key::C) {
            self.clear_scene();
        }
        if input.key_pressed(egui::Key::R) {
            self.randomize_vectors();
        }
    }

    fn get_view_matrix(&self) -> Matrix3<f64> {
        let (cr, sr) = ((self.view_rot as f64).cos(), (self.view_rot as f64).sin());
        let (cp, sp) = (
            (self.view_pitch as f64).cos(),
            (self.view_pitch as f64).sin(),
        );
        Matrix3::new(
            cr, 0.0, sr,
            sr * sp, cp, -cr * sp,
            -sr * cp, sp, cr * cp,
        )
    }

    fn draw_vector_row(&mut self, ui: &mut egui::Ui, idx: usize, color: egui::Color32) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(VECTOR_NAMES[idx])
                    .color(color)
                    .strong(),
            );
            for i in 0..3 {
                let field = &mut self.fields[idx][i];
                let response = ui.add(egui::TextEdit::singleline(field).desired_width(48.0));
                if response.changed() {
                    // Keep the field in a valid partially-typed state; only
                    // touch the text (and thereby the cursor) when the
                    // sanitizer actually changed something.
                    let clean = sanitize(field);
                    if clean != *field {
                        *field = clean;
                    }
                }
            }
        });
    }

    fn draw_input_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Vectors");
        ui.add_space(4.0);

        let pal = &self.config.palette;
        let col_a = parse_color(&pal.vec_a, egui::Color32::RED);
        let col_b = parse_color(&pal.vec_b, egui::Color32::BLUE);
        let col_c = parse_color(&pal.vec_c, egui::Color32::YELLOW);

        self.draw_vector_row(ui, 0, col_a);
        self.draw_vector_row(ui, 1, col_b);

        let mut recompute = false;
        ui.add_enabled_ui(self.use_vector_c, |ui| {
            self.draw_vector_row(ui, 2, col_c);
        });
        if ui.checkbox(&mut self.use_vector_c, "Use vector C").changed() {
            recompute = true;
        }

        ui.add_space(8.0);
        if ui.button("🎲 Random Vectors [R]").clicked() {
            self.randomize_vectors();
        }

        ui.separator();
        ui.heading("Operation");
        egui::ComboBox::from_id_source("operation_select")
            .selected_text(self.operation.label())
            .show_ui(ui, |ui| {
                for op in Operation::ALL {
                    if ui
                        .selectable_value(&mut self.operation, op, op.label())
                        .changed()
                    {
                        recompute = true;
                    }
                }
            });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button("Calculate ⏎").clicked() {
                recompute = true;
            }
            if ui.button("Clear scene [C]").clicked() {
                self.clear_scene();
            }
        });

        if recompute {
            self.compute();
        }
    }

    fn draw_result_panel(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.heading("Result");

        egui::Frame::group(ui.style()).show(ui, |ui| {
            if let Some(err) = &self.error_text {
                ui.colored_label(egui::Color32::LIGHT_RED, err);
            } else if self.result_text.is_empty() {
                ui.colored_label(egui::Color32::GRAY, "—");
            } else {
                ui.label(egui::RichText::new(&self.result_text).strong().size(16.0));
            }
        });

        if let Some(s) = self.last_summary {
            ui.add_space(2.0);
            ui.colored_label(
                egui::Color32::GRAY,
                format!(
                    "{} glyphs  (+{} ~{} -{})",
                    self.reconciler.len(),
                    s.created,
                    s.updated,
                    s.removed
                ),
            );
        }
    }
}

fn format_vec(v: Vector3<f64>) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

impl eframe::App for VectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_hotkeys(ctx);

        // --- SIDEBAR ---
        egui::SidePanel::left("controls")
            .width_range(280.0..=340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui.heading("Vector Algebra Visualizer");
                        ui.add_space(4.0);

                        ui.collapsing("⌨ Hotkeys", |ui| {
                            ui.label("Enter: Calculate | R: Random\nV: Persp | C: Clear scene");
                        });

                        ui.separator();
                        ui.checkbox(&mut self.perspective, "🔭 Perspective [V]");
                        if ui
                            .checkbox(&mut self.show_inputs, "Show input vectors")
                            .changed()
                        {
                            self.compute();
                        }
                        ui.add(
                            egui::Slider::new(&mut self.grid_opacity, 0..=255).text("Grid Alpha"),
                        );

                        ui.add_space(10.0);
                        self.draw_input_panel(ui);
                        self.draw_result_panel(ui);
                    });
            });

        // --- VIEWPORT ---
        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, resp) = ui.allocate_exact_size(ui.available_size(), egui::Sense::drag());

            // Orbit + zoom
            if resp.dragged_by(egui::PointerButton::Primary) {
                self.view_rot += resp.drag_delta().x * 0.01;
                self.view_pitch =
                    (self.view_pitch - resp.drag_delta().y * -0.01).clamp(-1.5, 1.5);
            }
            self.view_zoom = (self.view_zoom
                * (1.0 + ui.input(|i| i.smooth_scroll_delta.y) * 0.001))
                .clamp(0.1, 10.0);

            let perspective_mode = self.perspective;
            let view_zoom = self.view_zoom;

            let painter = ui.painter_at(rect);
            let view_mat = self.get_view_matrix();
            let base_scale = ((rect.width().min(rect.height()) / 25.0) * view_zoom) as f64;

            let project = |v: Vector3<f64>| {
                let v_v = view_mat * v;
                let factor = if perspective_mode {
                    (base_scale * 20.0) / (20.0 - v_v.z).max(0.1)
                } else {
                    base_scale
                };
                rect.center() + egui::vec2((v_v.x * factor) as f32, (-v_v.y * factor) as f32)
            };

            let grid_c =
                egui::Color32::from_rgba_unmultiplied(80, 140, 220, self.grid_opacity);
            draw_grid_3d(&painter, &project, grid_c, self.grid_size);
            draw_axes_3d(&painter, &project);

            // The renderer only reads the glyph table; every write to it
            // happened atomically inside compute() before this frame.
            draw_glyphs(&painter, &project, &self.reconciler);

            draw_nav_cube(ui, &painter, &view_mat, self);
        });

        ctx.request_repaint();
    }
}
