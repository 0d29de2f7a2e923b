use crate::dashboard::stats::{CountBucket, StatCard};
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};

/// Series palette shared by every chart block.
pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(99, 102, 241),
    Color32::from_rgb(34, 197, 94),
    Color32::from_rgb(249, 115, 22),
    Color32::from_rgb(139, 92, 246),
    Color32::from_rgb(6, 182, 212),
    Color32::from_rgb(236, 72, 153),
];

pub fn series_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

/// One headline figure in a framed box.
pub fn stat_card(ui: &mut egui::Ui, card: &StatCard, color: Color32) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.set_min_width(140.0);
            ui.vertical(|ui| {
                ui.colored_label(color, card.title);
                ui.heading(card.value.to_string());
            });
        });
}

/// Vertical bar chart painted directly; labels under the bars, counts above.
pub fn bar_chart(ui: &mut egui::Ui, buckets: &[CountBucket]) {
    if buckets.is_empty() {
        ui.weak("No data yet.");
        return;
    }
    let width = ui.available_width().clamp(160.0, 480.0);
    let desired = Vec2::new(width, 160.0);
    let (rect, _) = ui.allocate_exact_size(desired, Sense::hover());
    let painter = ui.painter_at(rect);

    let label_band = 16.0;
    let value_band = 14.0;
    let plot = Rect::from_min_max(
        Pos2::new(rect.min.x, rect.min.y + value_band),
        Pos2::new(rect.max.x, rect.max.y - label_band),
    );
    let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(1).max(1);
    let slot = plot.width() / buckets.len() as f32;
    let bar_width = (slot * 0.6).min(48.0);
    let text_color = ui.visuals().text_color();

    painter.line_segment(
        [plot.left_bottom(), plot.right_bottom()],
        Stroke::new(1.0, ui.visuals().weak_text_color()),
    );

    for (index, bucket) in buckets.iter().enumerate() {
        let center_x = plot.min.x + slot * (index as f32 + 0.5);
        let height = plot.height() * bucket.count as f32 / max_count as f32;
        let bar = Rect::from_min_max(
            Pos2::new(center_x - bar_width / 2.0, plot.max.y - height),
            Pos2::new(center_x + bar_width / 2.0, plot.max.y),
        );
        painter.rect_filled(bar, Rounding::same(2.0), series_color(index));
        painter.text(
            Pos2::new(center_x, bar.min.y - 2.0),
            Align2::CENTER_BOTTOM,
            bucket.count.to_string(),
            FontId::proportional(10.0),
            text_color,
        );
        painter.text(
            Pos2::new(center_x, rect.max.y),
            Align2::CENTER_BOTTOM,
            truncate(&bucket.label, 10),
            FontId::proportional(10.0),
            text_color,
        );
    }
}

/// Pie chart with a legend. Slices are tessellated as triangle fans so wide
/// slices render correctly.
pub fn pie_chart(ui: &mut egui::Ui, buckets: &[CountBucket]) {
    let total: usize = buckets.iter().map(|b| b.count).sum();
    if total == 0 {
        ui.weak("No data yet.");
        return;
    }
    ui.horizontal(|ui| {
        let size = 120.0;
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = size / 2.0 - 4.0;

        let mut angle = -std::f32::consts::FRAC_PI_2;
        for (index, bucket) in buckets.iter().enumerate() {
            let sweep = std::f32::consts::TAU * bucket.count as f32 / total as f32;
            let color = series_color(index);
            let steps = (sweep / 0.2).ceil().max(1.0) as usize;
            let step = sweep / steps as f32;
            for part in 0..steps {
                let a0 = angle + step * part as f32;
                let a1 = a0 + step;
                let p0 = Pos2::new(center.x + radius * a0.cos(), center.y + radius * a0.sin());
                let p1 = Pos2::new(center.x + radius * a1.cos(), center.y + radius * a1.sin());
                painter.add(egui::Shape::convex_polygon(
                    vec![center, p0, p1],
                    color,
                    Stroke::NONE,
                ));
            }
            angle += sweep;
        }

        ui.vertical(|ui| {
            for (index, bucket) in buckets.iter().enumerate() {
                ui.horizontal(|ui| {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
                    ui.painter()
                        .rect_filled(swatch, Rounding::same(2.0), series_color(index));
                    ui.label(format!("{} ({})", bucket.label, bucket.count));
                });
            }
        });
    });
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let mut out: String = value.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles() {
        assert_eq!(series_color(0), series_color(PALETTE.len()));
        assert_ne!(series_color(0), series_color(1));
    }

    #[test]
    fn truncate_keeps_short_labels() {
        assert_eq!(truncate("Meetup", 10), "Meetup");
        assert_eq!(truncate("A very long label", 8), "A very …");
    }
}
