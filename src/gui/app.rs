use super::auth::AuthFlow;
use super::dashboard_page::DashboardPage;
use super::events_page::EventsPage;
use super::resources_page::ResourcesPage;
use super::users_page::UsersPage;
use super::PageEnv;
use crate::api::{auth, ApiClient};
use crate::session::Session;
use crate::settings::Settings;
use crate::stores::Stores;
use eframe::egui;
use egui_toast::Toasts;
use std::sync::Arc;
use std::time::Duration;

const ROLE_ACCESS_KEY: &str = "role-access";
const PROFILE_KEY: &str = "profile";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Dashboard,
    Users,
    Events,
    Resources,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Users, Tab::Events, Tab::Resources];

    fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Users => "Users",
            Tab::Events => "Events",
            Tab::Resources => "Resources",
        }
    }
}

pub struct DeckApp {
    settings: Settings,
    api: Arc<ApiClient>,
    session: Session,
    stores: Stores,
    toasts: Toasts,
    auth: AuthFlow,
    tab: Tab,
    users_page: UsersPage,
    events_page: EventsPage,
    resources_page: ResourcesPage,
    dashboard_page: DashboardPage,
}

impl DeckApp {
    pub fn new(settings: Settings, session: Session) -> anyhow::Result<Self> {
        let api = Arc::new(ApiClient::new(
            &settings.api_base_url,
            settings.request_timeout_secs,
        )?);
        if let Some(token) = session.token() {
            api.set_token(token);
        }
        let toasts = Toasts::new().anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0]);
        let page_size = settings.default_page_size;
        let debounce = Duration::from_millis(settings.search_debounce_ms);
        Ok(Self {
            api,
            session,
            stores: Stores::new(),
            toasts,
            auth: AuthFlow::default(),
            tab: Tab::Dashboard,
            users_page: UsersPage::new(page_size, debounce),
            events_page: EventsPage::new(page_size, debounce),
            resources_page: ResourcesPage::new(page_size, debounce),
            dashboard_page: DashboardPage::default(),
            settings,
        })
    }

    fn handle_login(&mut self, token: String) {
        self.api.set_token(&token);
        self.session.login(token);
        self.stores.clear_all();
        // The platform web UI lands on user management after login.
        self.tab = Tab::Users;
    }

    fn handle_logout(&mut self) {
        self.session.logout();
        self.api.clear_token();
        self.stores.clear_all();
        self.auth = AuthFlow::default();
        let page_size = self.settings.default_page_size;
        let debounce = Duration::from_millis(self.settings.search_debounce_ms);
        self.users_page = UsersPage::new(page_size, debounce);
        self.events_page = EventsPage::new(page_size, debounce);
        self.resources_page = ResourcesPage::new(page_size, debounce);
        self.dashboard_page = DashboardPage::default();
        self.tab = Tab::Dashboard;
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.toasts.show(ctx);

        if !self.session.is_authenticated() {
            let mut env = PageEnv {
                api: &self.api,
                stores: &self.stores,
                has_access: false,
                toasts: &mut self.toasts,
                enable_toasts: self.settings.enable_toasts,
                toast_duration: self.settings.toast_duration,
            };
            let token = self.auth.ui(ctx, &mut env);
            if let Some(token) = token {
                self.handle_login(token);
            }
            return;
        }

        {
            let api = Arc::clone(&self.api);
            self.stores
                .role_access
                .request(ctx, ROLE_ACCESS_KEY, move || {
                    Ok(auth::check_role_access(&api)?)
                });
        }
        {
            let api = Arc::clone(&self.api);
            self.stores.profile.request(ctx, PROFILE_KEY, move || {
                Ok(auth::get_user_details(&api)?)
            });
        }
        // An unresolved or failed check means no mutating controls.
        let has_access = self
            .stores
            .role_access
            .entry(ROLE_ACCESS_KEY)
            .and_then(|entry| entry.data)
            .unwrap_or(false);
        let profile_name = self
            .stores
            .profile
            .entry(PROFILE_KEY)
            .and_then(|entry| entry.data)
            .map(|profile| profile.full_name);

        let mut logout = false;
        egui::TopBottomPanel::top("deck-top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("eventdeck");
                ui.separator();
                for tab in Tab::ALL {
                    if ui
                        .selectable_label(self.tab == tab, tab.label())
                        .clicked()
                    {
                        self.tab = tab;
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Logout").clicked() {
                        logout = true;
                    }
                    if let Some(name) = &profile_name {
                        ui.weak(name);
                    }
                });
            });
        });
        if logout {
            self.handle_logout();
            return;
        }

        let mut env = PageEnv {
            api: &self.api,
            stores: &self.stores,
            has_access,
            toasts: &mut self.toasts,
            enable_toasts: self.settings.enable_toasts,
            toast_duration: self.settings.toast_duration,
        };
        let tab = self.tab;
        match tab {
            Tab::Dashboard => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.dashboard_page.ui(ui, &mut env);
                });
            }
            Tab::Users => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.users_page.ui(ui, &mut env);
                });
            }
            Tab::Events => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.events_page.ui(ui, &mut env);
                });
            }
            Tab::Resources => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.resources_page.ui(ui, &mut env);
                });
            }
        }
    }
}
