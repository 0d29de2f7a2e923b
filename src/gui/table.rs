use crate::debounce::Debouncer;
use crate::query::{pagination_numbers, ListQuery, PageToken, SortDirection, MAX_VISIBLE_PAGES, PAGE_SIZES};
use eframe::egui;

/// Clickable column header showing the sort direction on the active field.
/// Returns true when the user toggled the sort.
pub fn sort_header(ui: &mut egui::Ui, query: &mut ListQuery, field: &str, label: &str) -> bool {
    let text = if query.sort_field == field {
        match query.sort_direction {
            SortDirection::Asc => format!("{label} ⏶"),
            SortDirection::Desc => format!("{label} ⏷"),
        }
    } else {
        label.to_string()
    };
    let clicked = ui
        .add(egui::Label::new(egui::RichText::new(text).strong()).sense(egui::Sense::click()))
        .clicked();
    if clicked {
        query.toggle_sort(field);
    }
    clicked
}

/// Search box with a clear button. Typed input goes through the debouncer
/// (the caller polls it each frame); clearing bypasses the delay and the
/// committed empty term is returned immediately.
pub fn search_box(
    ui: &mut egui::Ui,
    input: &mut String,
    debounce: &mut Debouncer,
    hint: &str,
) -> Option<String> {
    let mut immediate = None;
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(input)
                .hint_text(hint)
                .desired_width(220.0),
        );
        if response.changed() {
            debounce.input(input.clone());
        }
        if !input.is_empty() && ui.small_button("✖").clicked() {
            input.clear();
            debounce.flush();
            immediate = Some(String::new());
        }
    });
    immediate
}

/// Pager row: rows-per-page selector, previous/next and the bounded page
/// window. Returns true when the page or page size changed.
pub fn pager(ui: &mut egui::Ui, query: &mut ListQuery, total_pages: u32, total_items: u64) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label("Rows per page:");
        let mut page_size = query.page_size;
        egui::ComboBox::from_id_source((query.resource(), "page-size"))
            .selected_text(page_size.to_string())
            .width(60.0)
            .show_ui(ui, |ui| {
                for size in PAGE_SIZES {
                    ui.selectable_value(&mut page_size, size, size.to_string());
                }
            });
        if page_size != query.page_size {
            query.set_page_size(page_size);
            changed = true;
        }

        ui.separator();
        ui.label(format!("{total_items} total"));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let current = query.page;
            if ui
                .add_enabled(current < total_pages, egui::Button::new("›"))
                .clicked()
            {
                query.set_page(current + 1);
                changed = true;
            }
            for token in pagination_numbers(current, total_pages, MAX_VISIBLE_PAGES)
                .into_iter()
                .rev()
            {
                match token {
                    PageToken::Ellipsis => {
                        ui.label("…");
                    }
                    PageToken::Page(page) => {
                        let selected = page == current;
                        if ui.selectable_label(selected, page.to_string()).clicked() && !selected {
                            query.set_page(page);
                            changed = true;
                        }
                    }
                }
            }
            if ui.add_enabled(current > 1, egui::Button::new("‹")).clicked() {
                query.set_page(current - 1);
                changed = true;
            }
        });
    });
    changed
}

/// Centered spinner for a list still waiting on its first response.
pub fn loading_row(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.spinner();
        ui.label("Loading…");
        ui.add_space(40.0);
    });
}

/// Generic error state with a retry affordance. Returns true when retry was
/// clicked.
pub fn error_state(ui: &mut egui::Ui, message: &str) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(30.0);
        ui.colored_label(egui::Color32::LIGHT_RED, "Failed to load data.");
        ui.label(message);
        if ui.button("Retry").clicked() {
            retry = true;
        }
        ui.add_space(30.0);
    });
    retry
}
