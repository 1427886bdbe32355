use eframe::egui;

use crate::storage::models::{Project, ProjectCategory};
use crate::ui::state::AppState;

/// Mutation requested from the gallery panel; the app applies it to the
/// store and refreshes the in-memory list.
pub enum GalleryAction {
    Delete(String),
    ResetDefaults,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Option<GalleryAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.heading("精选作品");
        if state.managing {
            ui.weak("管理模式已开启");
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.selectable_label(state.managing, "管理作品").clicked() {
                state.managing = !state.managing;
            }
        });
    });

    // Bộ lọc theo hạng mục
    ui.horizontal(|ui| {
        if ui.selectable_label(state.filter.is_none(), "全部").clicked() {
            state.filter = None;
        }
        for category in ProjectCategory::ALL {
            if ui
                .selectable_label(state.filter == Some(category), category.as_str())
                .clicked()
            {
                state.filter = Some(category);
            }
        }
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if state.managing {
                ui.horizontal(|ui| {
                    if ui.button("➕ 添加项目").clicked() {
                        state.open_add_form();
                    }
                    if ui.button("重置为默认演示数据").clicked() {
                        action = Some(GalleryAction::ResetDefaults);
                    }
                });
                ui.add_space(8.0);
            }

            let managing = state.managing;
            let visible: Vec<Project> =
                state.visible_projects().into_iter().cloned().collect();

            if visible.is_empty() {
                ui.weak("这个分类下还没有作品");
                return;
            }

            for row in visible.chunks(3) {
                ui.horizontal(|ui| {
                    for project in row {
                        render_card(ui, project, managing, &mut action);
                    }
                });
                ui.add_space(6.0);
            }
        });

    action
}

fn render_card(
    ui: &mut egui::Ui,
    project: &Project,
    managing: bool,
    action: &mut Option<GalleryAction>,
) {
    ui.group(|ui| {
        ui.set_width(220.0);
        ui.vertical(|ui| {
            ui.strong(project.title.as_str());
            ui.weak(format!("{} — {}", project.category.as_str(), project.year));
            ui.small(project.image_url.as_str());
            if managing && ui.small_button("删除").clicked() {
                *action = Some(GalleryAction::Delete(project.id.clone()));
            }
        });
    });
}
