use eframe::egui;

use crate::common::{ChatMessage, MessageRole};

/// Transcript list; sticks to the newest message while replies stream in.
pub fn render(ui: &mut egui::Ui, messages: &[ChatMessage], busy: bool) {
    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for message in messages {
                // Placeholder stays invisible until its first fragment lands.
                if message.text.is_empty() {
                    continue;
                }
                render_message(ui, message);
            }

            if busy {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak("Muse 正在思考…");
                });
            }
        });
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage) {
    let (layout, color) = match message.role {
        MessageRole::User => (
            egui::Layout::right_to_left(egui::Align::TOP),
            ui.visuals().strong_text_color(),
        ),
        MessageRole::Model if message.is_error => (
            egui::Layout::left_to_right(egui::Align::TOP),
            ui.visuals().error_fg_color,
        ),
        MessageRole::Model => (
            egui::Layout::left_to_right(egui::Align::TOP),
            ui.visuals().text_color(),
        ),
    };

    ui.push_id(&message.id, |ui| {
        ui.with_layout(layout, |ui| {
            ui.add(egui::Label::new(egui::RichText::new(&message.text).color(color)).wrap());
        });
    });
    ui.add_space(4.0);
}
