use super::page::{QuestionEntry, StatusCategory};
use super::{Phase, QuizUploader};
use crate::utils::file_size::format_size;
use egui::{Color32, RichText};
use rfd::FileDialog;

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 50, 50);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(0, 180, 0);
const ACCENT_COLOR: Color32 = Color32::from_rgb(161, 89, 225);

impl QuizUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                ui.heading("PDF Question Generator");
                ui.add_space(5.0);
                ui.label(
                    RichText::new(format!("Questions are generated by {}", self.server_label))
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
            });

            ui.add_space(20.0);
            self.render_form(ui);
            ui.add_space(10.0);
            self.render_status(ui);
            ui.add_space(10.0);
            self.render_questions_container(ui);
        });
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                if ui.button("📄 Browse").clicked() {
                    let picked = FileDialog::new().add_filter("PDF", &["pdf"]).pick_file();
                    self.controller.on_path_selected(picked);
                }

                let page = self.controller.view();
                ui.label(page.file_label.as_str());
                if let Some(size) = page.file_size {
                    ui.label(
                        RichText::new(format_size(size))
                            .color(ui.visuals().text_color().gamma_multiply(0.6)),
                    );
                }
            });
        });

        ui.add_space(15.0);

        ui.vertical_centered(|ui| {
            let enabled = self.controller.view().submit_enabled;
            ui.add_enabled_ui(enabled, |ui| {
                let button = egui::Button::new("📤 Generate Questions")
                    .min_size(egui::vec2(200.0, 40.0));
                if ui.add(button).clicked() {
                    self.controller.on_submit();
                }
            });
        });
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let page = self.controller.view();

        if page.loading {
            ui.vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    let step = match self.controller.phase() {
                        Phase::AwaitingResults => "Generating questions...",
                        _ => "Uploading...",
                    };
                    ui.label(step);
                });
            });
        }

        if page.status.is_empty() {
            return;
        }

        ui.vertical_centered(|ui| match page.status.category {
            StatusCategory::Error => {
                ui.colored_label(ERROR_COLOR, page.status.text.as_str());
            }
            StatusCategory::Success => {
                ui.colored_label(SUCCESS_COLOR, page.status.text.as_str());
            }
            StatusCategory::None => {
                ui.label(page.status.text.as_str());
            }
        });
    }

    fn render_questions_container(&self, ui: &mut egui::Ui) {
        let entries = &self.controller.view().entries;
        if entries.is_empty() {
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Frame::none()
                    .fill(ui.style().visuals.extreme_bg_color)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        for entry in entries {
                            match entry {
                                QuestionEntry::Question { number, text } => {
                                    ui.horizontal_wrapped(|ui| {
                                        ui.label(
                                            RichText::new(format!("Q{}:", number))
                                                .strong()
                                                .color(ACCENT_COLOR),
                                        );
                                        ui.label(text.as_str());
                                    });
                                }
                                QuestionEntry::Notice(text) => {
                                    ui.label(RichText::new(text.as_str()).italics());
                                }
                            }
                            ui.add_space(4.0);
                        }
                    });
            });
    }
}
