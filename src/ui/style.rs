pub fn apply_hanoi_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let bg = egui::Color32::from_rgb(12, 12, 20);
    let accent = egui::Color32::from_rgb(0, 150, 0);
    let border = egui::Color32::from_rgb(60, 60, 70);
    let text_color = egui::Color32::from_rgb(235, 235, 235);

    style.visuals.window_fill = bg;
    style.visuals.panel_fill = bg;
    style.visuals.extreme_bg_color = egui::Color32::from_rgb(4, 4, 10);

    // Square buttons, like the rest of the board
    style.visuals.window_corner_radius = egui::CornerRadius::ZERO;
    style.visuals.menu_corner_radius = egui::CornerRadius::ZERO;
    for w in [
        &mut style.visuals.widgets.noninteractive,
        &mut style.visuals.widgets.inactive,
        &mut style.visuals.widgets.hovered,
        &mut style.visuals.widgets.active,
        &mut style.visuals.widgets.open,
    ] {
        w.corner_radius = egui::CornerRadius::ZERO;
        w.fg_stroke.color = text_color;
    }

    style.visuals.widgets.hovered.bg_fill = accent.gamma_multiply(0.6);
    style.visuals.widgets.active.bg_fill = accent.gamma_multiply(0.4);
    style.visuals.selection.bg_fill = accent.gamma_multiply(0.5);

    style.visuals.window_stroke = egui::Stroke::new(1.0, border);
    style.visuals.window_shadow = egui::epaint::Shadow::NONE;
    style.visuals.override_text_color = Some(text_color);

    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::proportional(18.0),
    );

    ctx.set_style(style);
}
