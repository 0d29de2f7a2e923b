use super::confirmation_modal::{ConfirmationModal, ConfirmationResult};
use super::forms::{self, FieldErrors};
use super::{table, PageEnv};
use crate::api::users::{self, User, UserRole};
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

struct UserForm {
    id: Option<String>,
    full_name: String,
    email: String,
    role: UserRole,
    is_verified: bool,
    errors: FieldErrors,
}

impl UserForm {
    fn new() -> Self {
        Self {
            id: None,
            full_name: String::new(),
            email: String::new(),
            role: UserRole::Employee,
            is_verified: false,
            errors: FieldErrors::default(),
        }
    }

    fn edit(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
            is_verified: user.is_verified,
            errors: FieldErrors::default(),
        }
    }

    fn validate(&mut self) -> bool {
        self.errors.clear();
        if self.full_name.trim().is_empty() {
            self.errors.set("full_name", "Full name is required");
        }
        if self.email.trim().is_empty() {
            self.errors.set("email", "Email is required");
        } else if !forms::valid_email(&self.email) {
            self.errors.set("email", "Enter a valid email address");
        }
        self.errors.is_empty()
    }

    fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role,
            is_verified: self.is_verified,
            created_at: None,
        }
    }
}

pub struct UsersPage {
    query: ListQuery,
    search_input: String,
    debounce: Debouncer,
    form: Option<UserForm>,
    delete_target: Option<User>,
    confirm: ConfirmationModal,
    pending: Option<(PendingMutation, Task<StatusMessage>)>,
}

impl UsersPage {
    pub fn new(page_size: u32, debounce: Duration) -> Self {
        Self {
            query: ListQuery::new("users", "fullName", SortDirection::Asc)
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
            ui.heading("User Management");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if env.has_access && ui.button("Add User").clicked() {
                    self.form = Some(UserForm::new());
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
                .users
                .request(ui.ctx(), &key, move || Ok(users::list(&api, &query)?));
        }

        let entry = env.stores.users.entry(&key);
        match entry {
            Some(entry) => {
                if let Some(page) = &entry.data {
                    let total_pages = page.page_count(self.query.page_size);
                    self.users_table(ui, env, &page.data);
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
                                env.stores.users.refetch(ui.ctx(), &key, move || {
                                    Ok(users::list(&api, &query)?)
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
                table::search_box(ui, &mut self.search_input, &mut self.debounce, "Search by name or email…")
            {
                self.query.set_search(term);
            }

            let role = self.query.filter("role").to_string();
            let role_label = if role.is_empty() {
                "Filter by Role".to_string()
            } else {
                format!("Role: {role}")
            };
            let mut selected_role = role.clone();
            egui::ComboBox::from_id_source("users-role-filter")
                .selected_text(role_label)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut selected_role, String::new(), "All");
                    for candidate in UserRole::ALL {
                        ui.selectable_value(
                            &mut selected_role,
                            candidate.as_str().to_string(),
                            candidate.as_str(),
                        );
                    }
                });
            if selected_role != role {
                self.query.set_filter("role", selected_role);
            }

            let verified = self.query.filter("isVerified").to_string();
            let status_label = match verified.as_str() {
                "true" => "Status: Active",
                "false" => "Status: Inactive",
                _ => "Filter by Status",
            };
            let mut selected_status = verified.clone();
            egui::ComboBox::from_id_source("users-status-filter")
                .selected_text(status_label)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut selected_status, String::new(), "All");
                    ui.selectable_value(&mut selected_status, "true".to_string(), "Active");
                    ui.selectable_value(&mut selected_status, "false".to_string(), "Inactive");
                });
            if selected_status != verified {
                self.query.set_filter("isVerified", selected_status);
            }

            if self.query.has_filters() && ui.button("✖ Clear Filters").clicked() {
                self.query.clear_filters();
            }
        });
    }

    fn users_table(&mut self, ui: &mut egui::Ui, env: &PageEnv<'_>, rows: &[User]) {
        let mut action: Option<(bool, User)> = None; // (is_edit, user)
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder().at_least(140.0))
            .column(Column::remainder().at_least(180.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(110.0))
            .header(22.0, |mut header| {
                header.col(|ui| {
                    table::sort_header(ui, &mut self.query, "fullName", "Full Name");
                });
                header.col(|ui| {
                    table::sort_header(ui, &mut self.query, "email", "Email");
                });
                header.col(|ui| {
                    ui.strong("Role");
                });
                header.col(|ui| {
                    ui.strong("Status");
                });
                header.col(|ui| {
                    if env.has_access {
                        ui.strong("Actions");
                    }
                });
            })
            .body(|mut body| {
                for user in rows {
                    body.row(20.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&user.full_name);
                        });
                        row.col(|ui| {
                            ui.label(&user.email);
                        });
                        row.col(|ui| {
                            ui.label(user.role.as_str());
                        });
                        row.col(|ui| {
                            if user.is_verified {
                                ui.colored_label(egui::Color32::LIGHT_GREEN, "Active");
                            } else {
                                ui.colored_label(egui::Color32::GRAY, "Inactive");
                            }
                        });
                        row.col(|ui| {
                            if env.has_access {
                                if ui.small_button("Edit").clicked() {
                                    action = Some((true, user.clone()));
                                }
                                if ui.small_button("Delete").clicked() {
                                    action = Some((false, user.clone()));
                                }
                            }
                        });
                    });
                }
            });
        if rows.is_empty() {
            ui.weak("No users match the current filters.");
        }

        match action {
            Some((true, user)) => self.form = Some(UserForm::edit(&user)),
            Some((false, user)) => {
                self.confirm
                    .open_for("Delete user", format!("Delete {}?", user.full_name));
                self.delete_target = Some(user);
            }
            None => {}
        }
    }

    fn form_window(&mut self, ctx: &egui::Context, env: &mut PageEnv<'_>) {
        let Some(form) = &mut self.form else { return };
        let saving = self.pending.is_some();
        let mut submit = false;
        let mut cancel = false;
        let title = if form.id.is_some() { "Edit User" } else { "Add User" };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Full name");
                ui.text_edit_singleline(&mut form.full_name);
                forms::field_error(ui, &form.errors, "full_name");

                ui.label("Email");
                ui.text_edit_singleline(&mut form.email);
                forms::field_error(ui, &form.errors, "email");

                ui.label("Role");
                egui::ComboBox::from_id_source("user-form-role")
                    .selected_text(form.role.as_str())
                    .show_ui(ui, |ui| {
                        for role in UserRole::ALL {
                            ui.selectable_value(&mut form.role, role, role.as_str());
                        }
                    });

                ui.checkbox(&mut form.is_verified, "Verified");

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
                let user = form.to_user();
                let id = form.id.clone();
                self.pending = Some((
                    PendingMutation::Save,
                    Task::spawn(ctx, move || match id {
                        Some(id) => Ok(users::update(&api, &id, &user)?),
                        None => Ok(users::add(&api, &user)?),
                    }),
                ));
            }
        }
    }

    fn confirm_delete(&mut self, ctx: &egui::Context, env: &mut PageEnv<'_>) {
        match self.confirm.ui(ctx) {
            ConfirmationResult::Confirmed => {
                if let Some(id) = self.delete_target.as_ref().and_then(|user| user.id.clone()) {
                    let api = Arc::clone(env.api);
                    self.pending = Some((
                        PendingMutation::Delete,
                        Task::spawn(ctx, move || Ok(users::delete(&api, &id)?)),
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
                        env.toast_success(status.message_or("User saved"));
                        self.form = None;
                    }
                    PendingMutation::Delete => {
                        env.toast_success(status.message_or("User deleted"));
                        self.delete_target = None;
                    }
                }
                env.stores.invalidate_users();
            }
            Some(Err(err)) => {
                // The form stays open with its values so the user can retry.
                env.toast_error(err.to_string());
            }
        }
    }
}
