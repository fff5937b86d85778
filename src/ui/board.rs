use egui::{Align2, Color32, CornerRadius, FontId, Painter};

use crate::game::state::Frame;
use crate::hanoi::disk::{Disk, Rgb};
use crate::hanoi::layout::Rect;

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

fn rect(r: &Rect) -> egui::Rect {
    let max = r.max();
    egui::Rect::from_min_max(egui::pos2(r.min.x, r.min.y), egui::pos2(max.x, max.y))
}

/// Paints base, poles, tower letters and every disk at its current
/// position, the in-flight disk included.
pub fn draw_board(ctx: &egui::Context, frame: &Frame<'_>) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    let layout = frame.layout;

    painter.rect_filled(rect(&layout.base), CornerRadius::ZERO, Color32::WHITE);
    for tower in frame.towers {
        let peg = tower.peg();
        painter.rect_filled(rect(&layout.pole(peg)), CornerRadius::ZERO, Color32::WHITE);
        let label = layout.label(peg);
        painter.text(
            egui::pos2(label.x, label.y),
            Align2::LEFT_TOP,
            peg.letter(),
            FontId::proportional(14.0),
            Color32::BLACK,
        );
    }

    // Poles first so a disk in flight is never hidden behind one.
    for tower in frame.towers {
        for disk in tower.disks() {
            draw_disk(&painter, disk);
        }
    }
}

fn draw_disk(painter: &Painter, disk: &Disk) {
    let bounds = egui::Rect::from_min_size(
        egui::pos2(disk.position.x, disk.position.y),
        egui::vec2(disk.size().x, disk.size().y),
    );
    painter.rect_filled(bounds, CornerRadius::ZERO, color(disk.color()));
    let center = disk.center();
    painter.text(
        egui::pos2(center.x, center.y),
        Align2::CENTER_CENTER,
        disk.index(),
        FontId::proportional(14.0),
        color(disk.color().legible_text_color()),
    );
}

pub fn fps_overlay(ctx: &egui::Context, fps: f64, ups: f64) {
    egui::Area::new(egui::Id::new("fps_overlay"))
        .anchor(Align2::LEFT_TOP, [8.0, 8.0])
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("FPS {fps:.0} | UPS {ups:.0}"))
                    .small()
                    .weak(),
            );
        });
}
