use egui::{Button, Color32, RichText};

use crate::game::state::{Frame, Intent};

/// Height of the control strip under the board.
pub const CONTROLS_HEIGHT: f32 = 80.0;

const START_FILL: Color32 = Color32::from_rgb(0, 200, 0);
const DONE_COLOR: Color32 = Color32::from_rgb(120, 230, 120);

fn action_button(label: &str) -> Button<'static> {
    Button::new(RichText::new(label).color(Color32::WHITE))
        .fill(START_FILL)
        .min_size(egui::vec2(190.0, 30.0))
}

/// Draws the control strip and returns the intents clicked this frame.
/// Disabled controls are shown greyed out and never produce intents.
pub fn control_panel(ctx: &egui::Context, frame: &Frame<'_>) -> Vec<Intent> {
    let mut intents = Vec::new();
    let controls = frame.controls;

    egui::TopBottomPanel::bottom("controls")
        .exact_height(CONTROLS_HEIGHT)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.add_space(40.0);
                if frame.running {
                    let status = RichText::new(&frame.status).size(20.0);
                    ui.label(if frame.finished { status.color(DONE_COLOR) } else { status });
                } else {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(format!("n: {}", frame.disk_count)).size(20.0));
                        ui.horizontal(|ui| {
                            let small = egui::vec2(40.0, 20.0);
                            if ui.add_enabled(controls.decrement, Button::new(" - ").min_size(small)).clicked() {
                                intents.push(Intent::DecrementDisks);
                            }
                            if ui.add_enabled(controls.increment, Button::new(" + ").min_size(small)).clicked() {
                                intents.push(Intent::IncrementDisks);
                            }
                        });
                    });
                    ui.add_space(20.0);
                    ui.label(format!("{} movimientos", frame.required_moves));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(40.0);
                    if frame.running {
                        if ui.add_enabled(controls.restart, action_button("Reiniciar")).clicked() {
                            intents.push(Intent::Restart);
                        }
                    } else if ui.add_enabled(controls.start, action_button("Iniciar visualizacion")).clicked() {
                        intents.push(Intent::StartVisualization);
                    }
                });
            });
        });

    intents
}
