use super::widgets_drawer::WidgetsDrawer;
use super::{charts, table, PageEnv};
use crate::api::events::{self, Event};
use crate::api::users::{self, User};
use crate::api::widgets::{self, WidgetItem};
use crate::cache::FetchStatus;
use crate::dashboard::stats;
use crate::dashboard::WidgetKind;
use chrono::Utc;
use eframe::egui;
use std::sync::Arc;

const ALL_EVENTS_KEY: &str = "events?all";
const ALL_USERS_KEY: &str = "users?all";
const WIDGETS_KEY: &str = "widgets";

/// Message of an entry that failed before delivering any data.
fn failure_message<T>(entry: &Option<crate::cache::CacheEntry<T>>) -> Option<String> {
    entry.as_ref().and_then(|entry| match (&entry.status, &entry.data) {
        (FetchStatus::Failed(message), None) => Some(message.clone()),
        _ => None,
    })
}

/// Analytics dashboard: stat cards and chart widgets in the persisted,
/// user-configurable order.
#[derive(Default)]
pub struct DashboardPage {
    drawer: WidgetsDrawer,
}

impl DashboardPage {
    pub fn ui(&mut self, ui: &mut egui::Ui, env: &mut PageEnv<'_>) {
        {
            let api = Arc::clone(env.api);
            env.stores
                .all_events
                .request(ui.ctx(), ALL_EVENTS_KEY, move || Ok(events::list_all(&api)?));
        }
        {
            let api = Arc::clone(env.api);
            env.stores
                .all_users
                .request(ui.ctx(), ALL_USERS_KEY, move || Ok(users::list_all(&api)?));
        }
        {
            let api = Arc::clone(env.api);
            env.stores
                .widgets
                .request(ui.ctx(), WIDGETS_KEY, move || Ok(widgets::get(&api)?));
        }

        let widget_items = env
            .stores
            .widgets
            .entry(WIDGETS_KEY)
            .and_then(|entry| entry.data)
            .unwrap_or_else(WidgetItem::defaults);

        ui.horizontal(|ui| {
            ui.heading("Dashboard");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Manage Widgets").clicked() && !self.drawer.is_open() {
                    self.drawer.open_with(&widget_items);
                }
            });
        });
        ui.add_space(6.0);

        let events_entry = env.stores.all_events.entry(ALL_EVENTS_KEY);
        let users_entry = env.stores.all_users.entry(ALL_USERS_KEY);

        let failed =
            failure_message(&events_entry).or_else(|| failure_message(&users_entry));
        if let Some(message) = failed {
            if table::error_state(ui, &message) {
                env.stores.all_events.invalidate();
                env.stores.all_users.invalidate();
            }
            self.drawer.ui(ui.ctx(), env);
            return;
        }

        let (Some(events), Some(users)) = (
            events_entry.and_then(|entry| entry.data),
            users_entry.and_then(|entry| entry.data),
        ) else {
            table::loading_row(ui);
            self.drawer.ui(ui.ctx(), env);
            return;
        };

        let mut ordered = widget_items.clone();
        ordered.sort_by_key(|item| item.order);

        let mut rendered = 0;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for item in ordered.iter().filter(|item| item.visible) {
                // Keys persisted by a newer build render nothing.
                let Some(kind) = WidgetKind::from_key(&item.key) else {
                    continue;
                };
                rendered += 1;
                ui.add_space(4.0);
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.strong(kind.title());
                    ui.add_space(4.0);
                    match kind {
                        WidgetKind::Summary => Self::summary_widget(ui, &events, &users),
                        WidgetKind::Event => Self::event_widget(ui, &events),
                        WidgetKind::User => Self::user_widget(ui, &users),
                    }
                });
            }
            if rendered == 0 {
                ui.add_space(30.0);
                ui.vertical_centered(|ui| {
                    ui.weak("All widgets are hidden. Use Manage Widgets to enable some.");
                });
            }
        });

        self.drawer.ui(ui.ctx(), env);
    }

    fn summary_widget(ui: &mut egui::Ui, events: &[Event], users: &[User]) {
        let cards = stats::stat_cards(events, users);
        ui.horizontal_wrapped(|ui| {
            for (index, card) in cards.iter().enumerate() {
                charts::stat_card(ui, card, charts::series_color(index));
            }
        });
    }

    fn event_widget(ui: &mut egui::Ui, events: &[Event]) {
        ui.columns(2, |columns| {
            columns[0].label("Events by type");
            charts::bar_chart(&mut columns[0], &stats::events_by_type(events));
            columns[1].label("Events by status");
            charts::pie_chart(&mut columns[1], &stats::events_by_status(events));
        });
        ui.add_space(6.0);
        ui.label("Online vs offline");
        charts::pie_chart(ui, &stats::online_vs_offline(events));
    }

    fn user_widget(ui: &mut egui::Ui, users: &[User]) {
        ui.columns(2, |columns| {
            columns[0].label("Users by role");
            charts::bar_chart(&mut columns[0], &stats::users_by_role(users));
            columns[1].label("Verification");
            charts::pie_chart(&mut columns[1], &stats::verification_split(users));
        });
        ui.add_space(6.0);
        ui.label("Signups per month");
        charts::bar_chart(ui, &stats::monthly_signups(users, Utc::now()));
    }
}
