use super::confirmation_modal::{ConfirmationModal, ConfirmationResult};
use super::forms::{self, FieldErrors};
use super::{table, PageEnv};
use crate::api::events::{self, Event, STATUS_TABS};
use crate::api::StatusMessage;
use crate::cache::FetchStatus;
use crate::debounce::Debouncer;
use crate::query::{ListQuery, SortDirection};
use crate::task::Task;
use chrono::NaiveDateTime;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::sync::Arc;
use std::time::Duration;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

enum PendingMutation {
    Save,
    Delete,
}

struct EventForm {
    id: Option<String>,
    name: String,
    kind: String,
    description: String,
    start: String,
    end: String,
    city: String,
    is_online: bool,
    status: String,
    errors: FieldErrors,
}

impl EventForm {
    fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
            kind: String::new(),
            description: String::new(),
            start: String::new(),
            end: String::new(),
            city: String::new(),
            is_online: false,
            status: "upcoming".into(),
            errors: FieldErrors::default(),
        }
    }

    fn edit(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            kind: event.kind.clone(),
            description: event.description.clone(),
            start: event.start.clone().unwrap_or_default(),
            end: event.end.clone().unwrap_or_default(),
            city: event.city.clone().unwrap_or_default(),
            is_online: event.is_online,
            status: event.status.clone().unwrap_or_else(|| "upcoming".into()),
            errors: FieldErrors::default(),
        }
    }

    fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT).ok()
    }

    fn validate(&mut self) -> bool {
        self.errors.clear();
        if self.name.trim().is_empty() {
            self.errors.set("name", "Event name is required");
        }
        if self.kind.trim().is_empty() {
            self.errors.set("kind", "Event type is required");
        }
        match Self::parse_datetime(&self.start) {
            None => self.errors.set("start", "Start date is required (YYYY-MM-DDTHH:MM)"),
            Some(start) => {
                match Self::parse_datetime(&self.end) {
                    None => self.errors.set("end", "End date is required (YYYY-MM-DDTHH:MM)"),
                    Some(end) if end <= start => {
                        self.errors.set("end", "End must be after the start")
                    }
                    Some(_) => {}
                }
            }
        }
        if !self.is_online && self.city.trim().is_empty() {
            self.errors.set("city", "City is required for offline events");
        }
        self.errors.is_empty()
    }

    fn to_event(&self) -> Event {
        Event {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            kind: self.kind.trim().to_string(),
            description: self.description.trim().to_string(),
            start: Some(self.start.trim().to_string()),
            end: Some(self.end.trim().to_string()),
            city: if self.is_online {
                None
            } else {
                Some(self.city.trim().to_string())
            },
            is_online: self.is_online,
            status: Some(self.status.clone()),
            created_at: None,
        }
    }
}

pub struct EventsPage {
    query: ListQuery,
    search_input: String,
    debounce: Debouncer,
    form: Option<EventForm>,
    delete_target: Option<Event>,
    confirm: ConfirmationModal,
    pending: Option<(PendingMutation, Task<StatusMessage>)>,
}

impl EventsPage {
    pub fn new(page_size: u32, debounce: Duration) -> Self {
        let mut query =
            ListQuery::new("events", "name", SortDirection::Asc).with_page_size(page_size);
        // The landing tab.
        query.set_filter("status", "upcoming");
        Self {
            query,
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
            ui.heading("Events");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if env.has_access && ui.button("Add Event").clicked() {
                    self.form = Some(EventForm::new());
                }
            });
        });
        ui.add_space(4.0);

        self.status_tabs(ui);
        ui.add_space(4.0);
        self.filter_row(ui, env);
        ui.add_space(4.0);

        let key = self.query.descriptor();
        {
            let api = Arc::clone(env.api);
            let query = self.query.clone();
            env.stores
                .events
                .request(ui.ctx(), &key, move || Ok(events::list(&api, &query)?));
        }

        match env.stores.events.entry(&key) {
            Some(entry) => {
                if let Some(page) = &entry.data {
                    let total_pages = page.page_count(self.query.page_size);
                    self.events_table(ui, env, &page.data);
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
                                env.stores.events.refetch(ui.ctx(), &key, move || {
                                    Ok(events::list(&api, &query)?)
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

    fn status_tabs(&mut self, ui: &mut egui::Ui) {
        let current = self.query.filter("status").to_string();
        ui.horizontal(|ui| {
            for status in STATUS_TABS {
                let selected = current == status;
                if ui.selectable_label(selected, capitalize(status)).clicked() && !selected {
                    // Switching tabs invalidates the dependent city/type
                    // filters along with the page.
                    self.query.set_filter("city", "");
                    self.query.set_filter("type", "");
                    self.query.set_filter("status", status);
                }
            }
        });
    }

    fn filter_row(&mut self, ui: &mut egui::Ui, env: &mut PageEnv<'_>) {
        let status = self.query.filter("status").to_string();
        let options_key = format!("event-filters?status={status}");
        {
            let api = Arc::clone(env.api);
            let status = status.clone();
            env.stores
                .event_filters
                .request(ui.ctx(), &options_key, move || {
                    Ok(events::filter_options(&api, &status)?)
                });
        }
        let options = env
            .stores
            .event_filters
            .entry(&options_key)
            .and_then(|entry| entry.data)
            .unwrap_or_default();

        ui.horizontal(|ui| {
            if let Some(term) =
                table::search_box(ui, &mut self.search_input, &mut self.debounce, "Search events…")
            {
                self.query.set_search(term);
            }

            let city = self.query.filter("city").to_string();
            let mut selected_city = city.clone();
            egui::ComboBox::from_id_source("events-city-filter")
                .selected_text(if city.is_empty() { "All cities" } else { city.as_str() })
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut selected_city, String::new(), "All");
                    for candidate in &options.cities {
                        ui.selectable_value(&mut selected_city, candidate.clone(), candidate);
                    }
                });
            if selected_city != city {
                self.query.set_filter("city", selected_city);
            }

            let kind = self.query.filter("type").to_string();
            let mut selected_kind = kind.clone();
            egui::ComboBox::from_id_source("events-type-filter")
                .selected_text(if kind.is_empty() { "All types" } else { kind.as_str() })
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut selected_kind, String::new(), "All");
                    for candidate in &options.types {
                        ui.selectable_value(&mut selected_kind, candidate.clone(), candidate);
                    }
                });
            if selected_kind != kind {
                self.query.set_filter("type", selected_kind);
            }

            let online = self.query.filter("isOnline").to_string();
            let online_label = match online.as_str() {
                "true" => "Online",
                "false" => "Offline",
                _ => "All modes",
            };
            let mut selected_online = online.clone();
            egui::ComboBox::from_id_source("events-online-filter")
                .selected_text(online_label)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut selected_online, String::new(), "All");
                    ui.selectable_value(&mut selected_online, "true".to_string(), "Online");
                    ui.selectable_value(&mut selected_online, "false".to_string(), "Offline");
                });
            if selected_online != online {
                self.query.set_filter("isOnline", selected_online);
            }
        });
    }

    fn events_table(&mut self, ui: &mut egui::Ui, env: &PageEnv<'_>, rows: &[Event]) {
        let mut action: Option<(bool, Event)> = None;
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder().at_least(160.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(70.0))
            .column(Column::auto().at_least(110.0))
            .header(22.0, |mut header| {
                header.col(|ui| {
                    table::sort_header(ui, &mut self.query, "name", "Name");
                });
                header.col(|ui| {
                    ui.strong("Type");
                });
                header.col(|ui| {
                    ui.strong("City");
                });
                header.col(|ui| {
                    table::sort_header(ui, &mut self.query, "startDateTime", "Start");
                });
                header.col(|ui| {
                    ui.strong("Mode");
                });
                header.col(|ui| {
                    if env.has_access {
                        ui.strong("Actions");
                    }
                });
            })
            .body(|mut body| {
                for event in rows {
                    body.row(20.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&event.name);
                        });
                        row.col(|ui| {
                            ui.label(&event.kind);
                        });
                        row.col(|ui| {
                            ui.label(event.city.as_deref().unwrap_or("—"));
                        });
                        row.col(|ui| {
                            ui.label(event.start.as_deref().unwrap_or("—"));
                        });
                        row.col(|ui| {
                            if event.is_online {
                                ui.colored_label(egui::Color32::LIGHT_BLUE, "Online");
                            } else {
                                ui.label("Offline");
                            }
                        });
                        row.col(|ui| {
                            if env.has_access {
                                if ui.small_button("Edit").clicked() {
                                    action = Some((true, event.clone()));
                                }
                                if ui.small_button("Delete").clicked() {
                                    action = Some((false, event.clone()));
                                }
                            }
                        });
                    });
                }
            });
        if rows.is_empty() {
            ui.weak("No events match the current filters.");
        }

        match action {
            Some((true, event)) => self.form = Some(EventForm::edit(&event)),
            Some((false, event)) => {
                self.confirm
                    .open_for("Delete event", format!("Delete {}?", event.name));
                self.delete_target = Some(event);
            }
            None => {}
        }
    }

    fn form_window(&mut self, ctx: &egui::Context, env: &mut PageEnv<'_>) {
        let Some(form) = &mut self.form else { return };
        let saving = self.pending.is_some();
        let mut submit = false;
        let mut cancel = false;
        let title = if form.id.is_some() { "Edit Event" } else { "Add Event" };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut form.name);
                forms::field_error(ui, &form.errors, "name");

                ui.label("Type");
                ui.text_edit_singleline(&mut form.kind);
                forms::field_error(ui, &form.errors, "kind");

                ui.label("Description");
                ui.add(egui::TextEdit::multiline(&mut form.description).desired_rows(3));

                ui.label("Start (YYYY-MM-DDTHH:MM)");
                ui.text_edit_singleline(&mut form.start);
                forms::field_error(ui, &form.errors, "start");

                ui.label("End (YYYY-MM-DDTHH:MM)");
                ui.text_edit_singleline(&mut form.end);
                forms::field_error(ui, &form.errors, "end");

                ui.checkbox(&mut form.is_online, "Online event");
                if !form.is_online {
                    ui.label("City");
                    ui.text_edit_singleline(&mut form.city);
                    forms::field_error(ui, &form.errors, "city");
                }

                ui.label("Status");
                egui::ComboBox::from_id_source("event-form-status")
                    .selected_text(capitalize(&form.status))
                    .show_ui(ui, |ui| {
                        for status in STATUS_TABS {
                            ui.selectable_value(
                                &mut form.status,
                                status.to_string(),
                                capitalize(status),
                            );
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
                let event = form.to_event();
                let id = form.id.clone();
                self.pending = Some((
                    PendingMutation::Save,
                    Task::spawn(ctx, move || match id {
                        Some(id) => Ok(events::update(&api, &id, &event)?),
                        None => Ok(events::add(&api, &event)?),
                    }),
                ));
            }
        }
    }

    fn confirm_delete(&mut self, ctx: &egui::Context, env: &mut PageEnv<'_>) {
        match self.confirm.ui(ctx) {
            ConfirmationResult::Confirmed => {
                if let Some(id) = self.delete_target.as_ref().and_then(|event| event.id.clone()) {
                    let api = Arc::clone(env.api);
                    self.pending = Some((
                        PendingMutation::Delete,
                        Task::spawn(ctx, move || Ok(events::delete(&api, &id)?)),
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
                        env.toast_success(status.message_or("Event saved"));
                        self.form = None;
                    }
                    PendingMutation::Delete => {
                        env.toast_success(status.message_or("Event deleted"));
                        self.delete_target = None;
                    }
                }
                env.stores.invalidate_events();
            }
            Some(Err(err)) => {
                env.toast_error(err.to_string());
            }
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
