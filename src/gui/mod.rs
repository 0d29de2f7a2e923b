pub mod app;
pub mod auth;
pub mod charts;
pub mod confirmation_modal;
pub mod dashboard_page;
pub mod events_page;
pub mod forms;
pub mod resources_page;
pub mod table;
pub mod users_page;
pub mod widgets_drawer;

pub use app::DeckApp;

use crate::api::ApiClient;
use crate::stores::Stores;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::sync::Arc;

/// Shared context handed to every page each frame.
pub struct PageEnv<'a> {
    pub api: &'a Arc<ApiClient>,
    pub stores: &'a Stores,
    /// Capability flag gating mutating controls; false until the server
    /// confirms access.
    pub has_access: bool,
    pub toasts: &'a mut Toasts,
    pub enable_toasts: bool,
    pub toast_duration: f32,
}

impl PageEnv<'_> {
    pub fn toast_success(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Success, text.into());
    }

    pub fn toast_error(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Error, text.into());
    }

    fn push(&mut self, kind: ToastKind, text: String) {
        if !self.enable_toasts {
            return;
        }
        self.toasts.add(Toast {
            text: text.into(),
            kind,
            options: ToastOptions::default().duration_in_seconds(self.toast_duration as f64),
        });
    }
}
