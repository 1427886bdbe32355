use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{MuseCommand, MuseEvent};
use crate::storage::GalleryDatabase;
use crate::storage::models::{ProjectCategory, default_projects};

use super::components::gallery::GalleryAction;
use super::components::{chat_area, gallery, input_bar};
use super::state::AppState;

pub struct StudioApp {
    state: AppState,
    command_sender: mpsc::Sender<MuseCommand>,
    event_receiver: mpsc::Receiver<MuseEvent>,
    gallery: Option<GalleryDatabase>,
}

impl StudioApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<MuseCommand>,
        event_receiver: mpsc::Receiver<MuseEvent>,
        gallery: Option<GalleryDatabase>,
        muse_enabled: bool,
    ) -> Self {
        // Read once at startup; mutations rewrite through the store.
        let projects = match &gallery {
            Some(db) => db.all_projects().unwrap_or_else(|err| {
                log::warn!("Failed to read gallery, using demo data: {err}");
                default_projects()
            }),
            None => default_projects(),
        };

        Self {
            state: AppState::new(muse_enabled, projects),
            command_sender,
            event_receiver,
            gallery,
        }
    }

    fn handle_muse_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                MuseEvent::ReplyStarted => self.state.begin_reply(),
                MuseEvent::Fragment(fragment) => self.state.push_fragment(&fragment),
                MuseEvent::ReplyFinished => self.state.finish_reply(),
                MuseEvent::ReplyFailed(reason) => {
                    log::error!("Muse exchange failed: {reason}");
                    self.state.fail_reply();
                }
            }
        }
    }

    fn send_command(&mut self, command: MuseCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to Muse worker: {err}");
        }
    }

    fn apply_gallery_action(&mut self, action: GalleryAction) {
        match action {
            GalleryAction::Delete(id) => match &self.gallery {
                Some(db) => {
                    if let Err(err) = db.remove_project(&id) {
                        log::warn!("Failed to delete project {id}: {err}");
                    }
                    self.refresh_projects();
                }
                None => self.state.projects.retain(|p| p.id != id),
            },
            GalleryAction::ResetDefaults => match &self.gallery {
                Some(db) => match db.reset_to_defaults() {
                    Ok(projects) => self.state.projects = projects,
                    Err(err) => log::warn!("Failed to reset gallery: {err}"),
                },
                None => self.state.projects = default_projects(),
            },
        }
    }

    fn add_project(&mut self) {
        let project = self.state.take_new_project();
        match &self.gallery {
            Some(db) => {
                if let Err(err) = db.insert_project(&project) {
                    log::warn!("Failed to persist project: {err}");
                }
                self.refresh_projects();
            }
            None => self.state.projects.insert(0, project),
        }
    }

    fn refresh_projects(&mut self) {
        if let Some(db) = &self.gallery {
            match db.all_projects() {
                Ok(projects) => self.state.projects = projects,
                Err(err) => log::warn!("Failed to reload gallery: {err}"),
            }
        }
    }

    fn render_muse(&mut self, ctx: &egui::Context) {
        if !self.state.muse_open {
            egui::Area::new(egui::Id::new("muse_toggle"))
                .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
                .show(ctx, |ui| {
                    if ui.button("✨ Muse").clicked() {
                        self.state.muse_open = true;
                    }
                });
            return;
        }

        let mut open = true;
        egui::Window::new("Muse AI")
            .open(&mut open)
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .default_size(egui::vec2(340.0, 460.0))
            .show(ctx, |ui| {
                if !self.state.muse_enabled {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        "Muse 未配置：请设置 GEMINI_API_KEY 后重启应用。",
                    );
                    return;
                }

                egui::TopBottomPanel::bottom("muse_input").show_inside(ui, |ui| {
                    ui.add_space(4.0);
                    if input_bar::render(ui, &mut self.state.input_text, !self.state.muse_busy) {
                        if let Some(text) = self.state.submit_input() {
                            self.send_command(MuseCommand::SendMessage(text));
                        }
                    }
                });

                egui::TopBottomPanel::top("muse_controls").show_inside(ui, |ui| {
                    ui.horizontal(|ui| {
                        if ui
                            .add_enabled(!self.state.muse_busy, egui::Button::new("新对话"))
                            .clicked()
                        {
                            self.state.clear_transcript();
                            self.send_command(MuseCommand::ResetSession);
                        }
                    });
                });

                egui::CentralPanel::default().show_inside(ui, |ui| {
                    chat_area::render(ui, &self.state.messages, self.state.muse_busy);
                });
            });

        if !open {
            self.state.muse_open = false;
        }
    }

    fn render_add_project(&mut self, ctx: &egui::Context) {
        if !self.state.add_form_open {
            return;
        }

        let mut open = true;
        let mut created = false;
        egui::Window::new("添加新项目")
            .open(&mut open)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label("项目标题");
                ui.text_edit_singleline(&mut self.state.project_title_input);

                ui.label("类别");
                egui::ComboBox::from_id_salt("project_category")
                    .selected_text(self.state.project_category_input.as_str())
                    .show_ui(ui, |ui| {
                        for category in ProjectCategory::ALL {
                            ui.selectable_value(
                                &mut self.state.project_category_input,
                                category,
                                category.as_str(),
                            );
                        }
                    });

                ui.label("年份");
                ui.text_edit_singleline(&mut self.state.project_year_input);

                ui.label("图片 URL");
                ui.text_edit_singleline(&mut self.state.project_image_input);

                let ready = !self.state.project_title_input.trim().is_empty()
                    && !self.state.project_image_input.trim().is_empty();
                if ui
                    .add_enabled(ready, egui::Button::new("创建项目"))
                    .clicked()
                {
                    created = true;
                }
            });

        self.state.add_form_open = open;
        if created {
            self.add_project();
            self.state.add_form_open = false;
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_muse_events();

        egui::TopBottomPanel::top("studio_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("AURA 设计工作室");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak("数字艺术 · 品牌 · 体验");
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(action) = gallery::render(ui, &mut self.state) {
                self.apply_gallery_action(action);
            }
        });

        self.render_muse(ctx);
        self.render_add_project(ctx);

        ctx.request_repaint();
    }
}
