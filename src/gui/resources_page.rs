use super::confirmation_modal::{ConfirmationModal, ConfirmationResult};
use super::forms::{self, FieldErrors};
use super::{table, PageEnv};
use crate::api::resources::{self, ExternalResource, ResourceKind};
use crate::api::StatusMessage;
use crate::cache::FetchStatus;
use crate::debounce::Debouncer;
use crate::query::{ListQuery, SortDirection};
use crate::task::Task;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::sync::Arc;
use std::time::Duration;

enum PendingMutation {
    Save,
    Delete,
}

struct ResourceForm {
    id: Option<String>,
    name: String,
    link: String,
    kind: ResourceKind,
    errors: FieldErrors,
}

impl ResourceForm {
    fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
            link: String::new(),
            kind: ResourceKind::Articles,
            errors: FieldErrors::default(),
        }
    }

    fn edit(resource: &ExternalResource) -> Self {
        Self {
            id: resource.id.clone(),
            name: resource.name.clone(),
            link: resource.link.clone(),
            kind: resource.kind,
            errors: FieldErrors::default(),
        }
    }

    fn validate(&mut self) -> bool {
        self.errors.clear();
        if self.name.trim().is_empty() {
            self.errors.set("name", "Name is required");
        }
        if self.link.trim().is_empty() {
            self.errors.set("link", "Link is required");
        } else if !forms::valid_url(&self.link) {
            self.errors.set("link", "Enter a valid http(s) URL");
        }
        self.errors.is_empty()
    }

    fn to_resource(&self) -> ExternalResource {
        ExternalResource {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            link: self.link.trim().to_string(),
            kind: self.kind,
            created_by: None,
            created_at: None,
        }
    }
}

pub struct ResourcesPage {
    query: ListQuery,
    search_input: String,
    debounce: Debouncer,
    form: Option<ResourceForm>,
    delete_target: Option<ExternalResource>,
    confirm: ConfirmationModal,
    pending: Option<(PendingMutation, Task<StatusMessage>)>,
}

impl ResourcesPage {
    pub fn new(page_size: u32, debounce: Duration) -> Self {
        Self {
            // Newest resources first, like the platform web UI.
            query: ListQuery::new("resources", "createdAt", SortDirection::Desc)
                .with_page_size(page_size),
            search_input: String::new(),
            debounce: Debouncer::new(debounce),
            form: None,
            delete_target: None,
            confirm: ConfirmationModal::default(),
            pending: None,
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, env: &mut PageEnv<'_>) {
        self.poll_pending(env);
        if let Some(term) = self.debounce.poll() {
            self.query.set_search(term);
        }
        if self.debounce.is_pending() {
            ui.ctx().request_repaint_after(Duration::from_millis(100));
        }

        ui.horizontal(|ui| {
            ui.heading("External Resources");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if env.has_access && ui.button("Add Resource").clicked() {
                    self.form = Some(ResourceForm::new());
                }
            });
        });
        ui.add_space(4.0);

        self.filter_row(ui);
        ui.add_space(4.0);

        let key = self.query.descriptor();
        {
            let api = Arc::clone(env.api);
            let query = self.query.clone();
            env.stores
                .resources
                .request(ui.ctx(), &key, move || Ok(resources::list(&api, &query)?));
        }

        match env.stores.resources.entry(&key) {
            Some(entry) => {
                if let Some(page) = &entry.data {
                    let total_pages = page.page_count(self.query.page_size);
                    self.resources_table(ui, env, &page.data);
                    ui.add_space(6.0);
                    table::pager(ui, &mut self.query, total_pages, page.total);
                    if entry.status == FetchStatus::Loading {
                        ui.spinner();
                    }
                } else {
                    match entry.status {
                        FetchStatus::Failed(ref message) => {
                            if table::error_state(ui, message) {
                                let api = Arc::clone(env.api);
                                let query = self.query.clone();
                                env.stores.resources.refetch(ui.ctx(), &key, move || {
                                    Ok(resources::list(&api, &query)?)
                                });
                            }
                        }
                        _ => table::loading_row(ui),
                    }
                }
            }
            None => table::loading_row(ui),
        }

        self.form_window(ui.ctx(), env);
        self.confirm_delete(ui.ctx(), env);
    }

    fn filter_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(term) =
                table::search_box(ui, &mut self.search_input, &mut self.debounce, "Search resources…")
            {
                self.query.set_search(term);
            }

            let kind = self.query.filter("type").to_string();
            let kind_label = ResourceKind::ALL
                .iter()
                .find(|candidate| candidate.as_str() == kind)
                .map(|candidate| candidate.label())
                .unwrap_or("Filter by Type");
            let mut selected_kind = kind.clone();
            egui::ComboBox::from_id_source("resources-kind-filter")
                .selected_text(kind_label)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut selected_kind, String::new(), "All");
                    for candidate in ResourceKind::ALL {
                        ui.selectable_value(
                            &mut selected_kind,
                            candidate.as_str().to_string(),
                            candidate.label(),
                        );
                    }
                });
            if selected_kind != kind {
                self.query.set_filter("type", selected_kind);
            }

            if self.query.has_filters() && ui.button("✖ Clear Filters").clicked() {
                self.query.clear_filters();
            }
        });
    }

    fn resources_table(&mut self, ui: &mut egui::Ui, env: &mut PageEnv<'_>, rows: &[ExternalResource]) {
        let mut action: Option<(bool, ExternalResource)> = None;
        let mut open_link: Option<String> = None;
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder().at_least(150.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::remainder().at_least(180.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(140.0))
            .header(22.0, |mut header| {
                header.col(|ui| {
                    table::sort_header(ui, &mut self.query, "name", "Name");
                });
                header.col(|ui| {
                    ui.strong("Type");
                });
                header.col(|ui| {
                    ui.strong("Link");
                });
                header.col(|ui| {
                    table::sort_header(ui, &mut self.query, "createdAt", "Added");
                });
                header.col(|ui| {
                    ui.strong("Actions");
                });
            })
            .body(|mut body| {
                for resource in rows {
                    body.row(20.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&resource.name);
                        });
                        row.col(|ui| {
                            ui.label(resource.kind.label());
                        });
                        row.col(|ui| {
                            ui.label(&resource.link);
                        });
                        row.col(|ui| {
                            let added = resource
                                .created_at
                                .as_deref()
                                .map(|stamp| stamp.split('T').next().unwrap_or(stamp))
                                .unwrap_or("—");
                            ui.label(added);
                        });
                        row.col(|ui| {
                            if ui.small_button("Open").clicked() {
                                open_link = Some(resource.link.clone());
                            }
                            if env.has_access {
                                if ui.small_button("Edit").clicked() {
                                    action = Some((true, resource.clone()));
                                }
                                if ui.small_button("Delete").clicked() {
                                    action = Some((false, resource.clone()));
                                }
                            }
                        });
                    });
                }
            });
        if rows.is_empty() {
            ui.weak("No resources match the current filters.");
        }

        if let Some(link) = open_link {
            if let Err(err) = open::that(&link) {
                tracing::warn!("failed to open {link}: {err}");
                env.toast_error(format!("Could not open {link}"));
            }
        }

        match action {
            Some((true, resource)) => self.form = Some(ResourceForm::edit(&resource)),
            Some((false, resource)) => {
                self.confirm
                    .open_for("Delete resource", format!("Delete {}?", resource.name));
                self.delete_target = Some(resource);
            }
            None => {}
        }
    }

    fn form_window(&mut self, ctx: &egui::Context, env: &mut PageEnv<'_>) {
        let Some(form) = &mut self.form else { return };
        let saving = self.pending.is_some();
        let mut submit = false;
        let mut cancel = false;
        let title = if form.id.is_some() {
            "Edit Resource"
        } else {
            "Add Resource"
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut form.name);
                forms::field_error(ui, &form.errors, "name");

                ui.label("Link");
                ui.text_edit_singleline(&mut form.link);
                forms::field_error(ui, &form.errors, "link");

                ui.label("Type");
                egui::ComboBox::from_id_source("resource-form-kind")
                    .selected_text(form.kind.label())
                    .show_ui(ui, |ui| {
                        for kind in ResourceKind::ALL {
                            ui.selectable_value(&mut form.kind, kind, kind.label());
                        }
                    });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.add_enabled(!saving, egui::Button::new("Save")).clicked() {
                        submit = true;
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
            self.form = None;
            return;
        }
        if submit {
            let Some(form) = &mut self.form else { return };
            if form.validate() {
                let api = Arc::clone(env.api);
                let resource = form.to_resource();
                let id = form.id.clone();
                self.pending = Some((
                    PendingMutation::Save,
                    Task::spawn(ctx, move || match id {
                        Some(id) => Ok(resources::update(&api, &id, &resource)?),
                        None => Ok(resources::add(&api, &resource)?),
                    }),
                ));
            }
        }
    }

    fn confirm_delete(&mut self, ctx: &egui::Context, env: &mut PageEnv<'_>) {
        match self.confirm.ui(ctx) {
            ConfirmationResult::Confirmed => {
                if let Some(id) = self
                    .delete_target
                    .as_ref()
                    .and_then(|resource| resource.id.clone())
                {
                    let api = Arc::clone(env.api);
                    self.pending = Some((
                        PendingMutation::Delete,
                        Task::spawn(ctx, move || Ok(resources::delete(&api, &id)?)),
                    ));
                } else {
                    self.delete_target = None;
                }
            }
            ConfirmationResult::Cancelled => self.delete_target = None,
            ConfirmationResult::None => {}
        }
    }

    fn poll_pending(&mut self, env: &mut PageEnv<'_>) {
        let Some((kind, mut task)) = self.pending.take() else {
            return;
        };
        match task.poll() {
            None => self.pending = Some((kind, task)),
            Some(Ok(status)) => {
                match kind {
                    PendingMutation::Save => {
                        env.toast_success(status.message_or("Resource saved"));
                        self.form = None;
                    }
                    PendingMutation::Delete => {
                        env.toast_success(status.message_or("Resource deleted"));
                        self.delete_target = None;
                    }
                }
                env.stores.invalidate_resources();
            }
            Some(Err(err)) => {
                env.toast_error(err.to_string());
            }
        }
    }
}
