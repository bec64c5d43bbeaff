use nalgebra::{Matrix3, Vector3};

use crate::app::VectorApp;
use crate::glyph::GlyphReconciler;
use crate::math;

pub fn draw_grid_3d(
    painter: &egui::Painter,
    project: &impl Fn(Vector3<f64>) -> egui::Pos2,
    color: egui::Color32,
    size: i32,
) {
    let stroke = egui::Stroke::new(1.0, color);
    let s = size as f64;

    for i in -size..=size {
        let t = i as f64;
        // XZ plane (ground)
        painter.line_segment(
            [
                project(Vector3::new(t, 0.0, -s)),
                project(Vector3::new(t, 0.0, s)),
            ],
            stroke,
        );
        painter.line_segment(
            [
                project(Vector3::new(-s, 0.0, t)),
                project(Vector3::new(s, 0.0, t)),
            ],
            stroke,
        );
    }
}

pub fn draw_axes_3d(painter: &egui::Painter, project: &impl Fn(Vector3<f64>) -> egui::Pos2) {
    let s = egui::Stroke::new(1.0, egui::Color32::GRAY.linear_multiply(0.2));
    for i in 0..3 {
        let mut start = Vector3::zeros();
        let mut end = Vector3::zeros();
        start[i] = -10.0;
        end[i] = 10.0;
        painter.line_segment([project(start), project(end)], s);
    }
}

pub fn draw_arrow(painter: &egui::Painter, start: egui::Pos2, end: egui::Pos2, color: egui::Color32) {
    let vec = end - start;
    let len = vec.length();
    if len < 1.0 {
        // Degenerate glyphs project to (almost) a point; mark the spot
        // instead of drawing a zero-length shaft.
        painter.circle_filled(start, 2.0, color);
        return;
    }

    // Main shaft
    painter.line_segment([start, end], egui::Stroke::new(2.5, color));

    // Arrow head (triangle)
    let head_len = (len * 0.15).clamp(5.0, 15.0);
    let dir = vec / len;
    let perp = egui::vec2(-dir.y, dir.x) * (head_len * 0.4);

    let tip = end;
    let base = end - dir * head_len;

    painter.add(egui::Shape::convex_polygon(
        vec![tip, base + perp, base - perp],
        color,
        egui::Stroke::NONE,
    ));
}

/// Draw every glyph currently in the table as an arrow from the origin.
/// Runs once per frame; the table itself is only ever written between
/// frames, inside one compute pass.
pub fn draw_glyphs(
    painter: &egui::Painter,
    project: &impl Fn(Vector3<f64>) -> egui::Pos2,
    reconciler: &GlyphReconciler,
) {
    let origin = project(Vector3::zeros());
    for (_, glyph) in reconciler.glyphs() {
        let tip = project(math::scale(glyph.direction, glyph.length));
        draw_arrow(painter, origin, tip, glyph.color);
    }
}

pub fn draw_nav_cube(
    ui: &egui::Ui,
    painter: &egui::Painter,
    view_mat: &Matrix3<f64>,
    app: &mut VectorApp,
) {
    let rect = painter.clip_rect();
    let nav_center = egui::pos2(rect.right() - 60.0, rect.top() + 60.0);
    let nav_scale = 30.0;

    let faces = [
        ("XY ", Vector3::new(0.0, 0.0, 1.0), 0.0f32, 0.0f32),
        ("-XY", Vector3::new(0.0, 0.0, -1.0), std::f32::consts::PI, 0.0),
        ("YZ ", Vector3::new(1.0, 0.0, 0.0), -std::f32::consts::FRAC_PI_2, 0.0),
        ("-YZ", Vector3::new(-1.0, 0.0, 0.0), std::f32::consts::FRAC_PI_2, 0.0),
        ("XZ ", Vector3::new(0.0, 1.0, 0.0), 0.0, std::f32::consts::FRAC_PI_2),
        ("-XZ", Vector3::new(0.0, -1.0, 0.0), 0.0, -std::f32::consts::FRAC_PI_2),
    ];

    let project_nav = |v: Vector3<f64>| {
        let v_view = view_mat * v;
        egui::pos2(
            nav_center.x + v_view.x as f32 * nav_scale,
            nav_center.y - v_view.y as f32 * nav_scale,
        )
    };

    let mut sorted_faces: Vec<_> = faces.iter().collect();
    sorted_faces.sort_by(|a, b| {
        let az = (view_mat * a.1).z;
        let bz = (view_mat * b.1).z;
        az.partial_cmp(&bz).unwrap_or(std::cmp::Ordering::Equal)
    });

    for (name, normal, yaw, pitch) in sorted_faces {
        let view_normal = view_mat * normal;
        if view_normal.z <= 0.0 {
            continue;
        }

        let (u, v) = if normal.x.abs() > 0.9 {
            (Vector3::y(), Vector3::z())
        } else {
            (Vector3::x(), normal.cross(&Vector3::x()).normalize())
        };

        let corners = [
            project_nav(normal + u + v),
            project_nav(normal - u + v),
            project_nav(normal - u - v),
            project_nav(normal + u - v),
        ];

        let is_hovered = ui.rect_contains_pointer(egui::Rect::from_points(&corners));
        let color = if is_hovered {
            egui::Color32::from_rgb(200, 100, 0)
        } else {
            egui::Color32::from_gray(60)
        };

        painter.add(egui::Shape::convex_polygon(
            corners.to_vec(),
            color,
            egui::Stroke::new(1.0, egui::Color32::WHITE),
        ));
        painter.text(
            project_nav(*normal),
            egui::Align2::CENTER_CENTER,
            &name[0..3],
            egui::FontId::proportional(12.0),
            egui::Color32::WHITE,
        );

        if is_hovered && ui.input(|i| i.pointer.any_click()) {
            app.set_view(*yaw, *pitch);
        }
    }
}
