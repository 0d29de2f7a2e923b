use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResult {
    None,
    Confirmed,
    Cancelled,
}

/// Centered confirm/cancel dialog used for entity deletes.
#[derive(Debug, Clone)]
pub struct ConfirmationModal {
    open: bool,
    title: String,
    description: String,
    warning: String,
}

impl Default for ConfirmationModal {
    fn default() -> Self {
        Self {
            open: false,
            title: "Confirm delete".into(),
            description: String::new(),
            warning: "This action cannot be undone.".into(),
        }
    }
}

impl ConfirmationModal {
    pub fn open_for(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.title = title.into();
        self.description = description.into();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> ConfirmationResult {
        if !self.open {
            return ConfirmationResult::None;
        }
        let mut result = ConfirmationResult::None;
        let mut open = true;
        egui::Window::new(self.title.clone())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                if !self.description.is_empty() {
                    ui.label(&self.description);
                }
                ui.colored_label(egui::Color32::YELLOW, &self.warning);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        result = ConfirmationResult::Confirmed;
                    }
                    if ui.button("Cancel").clicked() {
                        result = ConfirmationResult::Cancelled;
                    }
                });
            });
        if result != ConfirmationResult::None {
            self.open = false;
        }
        if !open {
            self.open = false;
            if result == ConfirmationResult::None {
                result = ConfirmationResult::Cancelled;
            }
        }
        result
    }
}
