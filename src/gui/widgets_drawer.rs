use super::PageEnv;
use crate::api::widgets::{self, WidgetItem};
use crate::api::StatusMessage;
use crate::dashboard::{WidgetKind, WidgetLayout};
use crate::task::Task;
use eframe::egui;
use std::sync::Arc;

/// The "Manage Widgets" editing session: reorder rows by dragging, toggle
/// visibility, then Apply to persist the whole list or Cancel to revert.
/// Apply failures keep the drawer open with the working copy intact so the
/// user can retry without redoing their edits.
#[derive(Default)]
pub struct WidgetsDrawer {
    open: bool,
    layout: WidgetLayout,
    pending: Option<Task<StatusMessage>>,
}

impl WidgetsDrawer {
    pub fn open_with(&mut self, persisted: &[WidgetItem]) {
        self.layout = WidgetLayout::load(persisted);
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn ui(&mut self, ctx: &egui::Context, env: &mut PageEnv<'_>) {
        if !self.open {
            return;
        }
        self.poll_pending(env);
        if !self.open {
            return;
        }

        let saving = self.pending.is_some();
        let mut apply = false;
        let mut cancel = false;

        egui::Window::new("Manage Widgets")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::RIGHT_TOP, [-12.0, 48.0])
            .show(ctx, |ui| {
                ui.set_min_width(260.0);
                ui.label("Drag to reorder, untick to hide.");
                ui.add_space(6.0);

                let rows: Vec<WidgetItem> = self.layout.items().to_vec();
                let mut toggled: Option<String> = None;
                let mut dropped: Option<(String, String)> = None;

                for item in &rows {
                    let row_id = egui::Id::new(("widget-row", &item.key));
                    let title = WidgetKind::from_key(&item.key)
                        .map(|kind| kind.title().to_string())
                        .unwrap_or_else(|| item.key.clone());
                    let response = ui
                        .dnd_drag_source(row_id, item.key.clone(), |ui| {
                            egui::Frame::group(ui.style()).show(ui, |ui| {
                                ui.set_min_width(220.0);
                                ui.horizontal(|ui| {
                                    ui.label("≡");
                                    let mut visible = item.visible;
                                    if ui.checkbox(&mut visible, title).changed() {
                                        toggled = Some(item.key.clone());
                                    }
                                });
                            });
                        })
                        .response;

                    if response.dnd_hover_payload::<String>().is_some() {
                        let rect = response.rect;
                        ui.painter().hline(
                            rect.x_range(),
                            rect.top() - 2.0,
                            egui::Stroke::new(2.0, ui.visuals().selection.bg_fill),
                        );
                    }
                    if let Some(source) = response.dnd_release_payload::<String>() {
                        dropped = Some(((*source).clone(), item.key.clone()));
                    }
                }

                if let Some(key) = toggled {
                    self.layout.toggle_visibility(&key);
                }
                if let Some((source, target)) = dropped {
                    self.layout.reorder(&source, &target);
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.add_enabled(!saving, egui::Button::new("Apply")).clicked() {
                        apply = true;
                    }
                    if ui.add_enabled(!saving, egui::Button::new("Cancel")).clicked() {
                        cancel = true;
                    }
                    if saving {
                        ui.spinner();
                    }
                });
            });

        if cancel {
            self.layout.discard();
            self.open = false;
        }
        if apply {
            let api = Arc::clone(env.api);
            let items = self.layout.items().to_vec();
            self.pending = Some(Task::spawn(ctx, move || {
                Ok(widgets::add_or_update(&api, &items)?)
            }));
        }
    }

    fn poll_pending(&mut self, env: &mut PageEnv<'_>) {
        let Some(mut task) = self.pending.take() else {
            return;
        };
        match task.poll() {
            None => self.pending = Some(task),
            Some(Ok(status)) => {
                env.toast_success(status.message_or("Widgets updated"));
                self.layout.commit_success();
                env.stores.invalidate_widgets();
                self.open = false;
            }
            Some(Err(err)) => {
                // Keep the drawer open and the working copy untouched.
                env.toast_error(err.to_string());
            }
        }
    }
}
