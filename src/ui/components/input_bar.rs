use eframe::egui;

/// Returns true when the user asked to send (button click or Enter). The
/// actual submit guard lives in `AppState::submit_input`.
pub fn render(ui: &mut egui::Ui, input_text: &mut String, enabled: bool) -> bool {
    let mut send = false;
    ui.horizontal(|ui| {
        let response = ui.add_enabled(
            enabled,
            egui::TextEdit::singleline(input_text).hint_text("询问关于设计的问题..."),
        );
        if ui.add_enabled(enabled, egui::Button::new("发送")).clicked() {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
        }
    });

    send
}
