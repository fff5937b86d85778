use crate::game::config::HanoiConfig;
use crate::game::input::{GameAction, InputState};

pub fn settings_menu(
    ctx: &egui::Context,
    open: &mut bool,
    config: &mut HanoiConfig,
    input_state: &InputState,
    rebinding: &mut Option<GameAction>,
) {
    if !*open {
        return;
    }

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(360.0)
        .show(ctx, |ui| {
            let tab_id = ui.id().with("settings_tab");
            let mut tab: SettingsTab = ui.data_mut(|d| {
                *d.get_temp_mut_or(tab_id, SettingsTab::KeyBindings)
            });

            ui.horizontal(|ui| {
                ui.selectable_value(&mut tab, SettingsTab::KeyBindings, "Key Bindings");
                ui.selectable_value(&mut tab, SettingsTab::Animation, "Animation");
                ui.selectable_value(&mut tab, SettingsTab::Debug, "Debug");
            });

            ui.data_mut(|d| d.insert_temp(tab_id, tab));

            ui.separator();

            match tab {
                SettingsTab::KeyBindings => {
                    for &action in GameAction::all() {
                        ui.horizontal(|ui| {
                            ui.label(action.display_name());
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if *rebinding == Some(action) {
                                    ui.label("Press a key...");
                                    return;
                                }
                                let key_name = input_state.bindings
                                    .get(&action)
                                    .map(|b| b.display_name())
                                    .unwrap_or_else(|| "Unbound".to_string());

                                if ui.button(&key_name).clicked() {
                                    *rebinding = Some(action);
                                }
                            });
                        });
                    }
                }
                SettingsTab::Animation => {
                    ui.horizontal(|ui| {
                        ui.label("Seconds per move:");
                        ui.add(egui::Slider::new(&mut config.animation.move_seconds, 0.25..=5.0));
                    });
                    ui.label(
                        egui::RichText::new(format!(
                            "{} ticks at {} Hz. Applies to the next visualization.",
                            config.animation.ticks_per_move(),
                            config.animation.tick_rate,
                        ))
                        .small()
                        .weak(),
                    );
                }
                SettingsTab::Debug => {
                    ui.checkbox(&mut config.debug.log_moves, "Log each move to console");
                    ui.checkbox(&mut config.debug.show_fps, "Show FPS/UPS");
                }
            }

            ui.separator();

            if ui.button("Close").clicked() {
                *open = false;
                *rebinding = None;
                config.save();
            }
        });
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SettingsTab {
    KeyBindings,
    Animation,
    Debug,
}
