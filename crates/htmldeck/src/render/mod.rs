pub mod html;
pub mod text;

use eframe::egui::{self, Color32, Stroke};

use crate::deck::{Deck, Slide};

/// Colors used by the presenter window.
#[derive(Debug, Clone)]
pub struct Palette {
    pub background: Color32,
    pub foreground: Color32,
    pub heading: Color32,
    pub accent: Color32,
    pub muted: Color32,
    pub code_background: Color32,
    pub code_foreground: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading: Color32::WHITE,
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            muted: Color32::from_rgb(0x5A, 0x5A, 0x5A),
            code_background: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            code_foreground: Color32::from_rgb(0xD4, 0xD4, 0xD4),
        }
    }
}

/// Scale factor relative to a 1920x1080 canvas.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// Draw a slide's nodes top to bottom inside `rect`. Overflow is clipped.
pub fn draw_slide(ui: &egui::Ui, slide: &Slide, rect: egui::Rect, palette: &Palette, scale: f32) {
    let padding = 80.0 * scale;
    let content = rect.shrink(padding);
    let painter = ui.painter_at(rect);

    let mut y = content.top();
    for node in slide.nodes() {
        if y > content.bottom() {
            break;
        }
        let h = text::draw_node(
            &painter,
            node,
            egui::pos2(content.left(), y),
            content.width(),
            palette,
            scale,
        );
        if h > 0.0 {
            y += h + text::block_gap(scale);
        }
    }
}

/// Geometry of the indicator strip: one dot per slide, stacked vertically
/// and centred along the right edge.
pub fn indicator_centers(count: usize, rect: egui::Rect, scale: f32) -> Vec<egui::Pos2> {
    let spacing = 22.0 * scale;
    let x = rect.right() - 32.0 * scale;
    let total = spacing * count.saturating_sub(1) as f32;
    let top = rect.center().y - total / 2.0;
    (0..count)
        .map(|i| egui::pos2(x, top + spacing * i as f32))
        .collect()
}

/// Draw the indicator strip and return the index of a clicked dot.
pub fn draw_indicators(
    ui: &egui::Ui,
    deck: &Deck,
    rect: egui::Rect,
    palette: &Palette,
    scale: f32,
) -> Option<usize> {
    let radius = 6.0 * scale;
    let hit = egui::vec2(radius * 3.0, radius * 3.0);
    let mut clicked = None;

    let centers = indicator_centers(deck.indicators().len(), rect, scale);
    for (indicator, center) in deck.indicators().iter().zip(centers) {
        let response = ui.interact(
            egui::Rect::from_center_size(center, hit),
            egui::Id::new(("indicator", indicator.index())),
            egui::Sense::click(),
        );
        if response.clicked() {
            clicked = Some(indicator.index());
        }

        if indicator.is_active() {
            ui.painter().circle_filled(center, radius, palette.accent);
        } else {
            let color = if response.hovered() {
                palette.foreground
            } else {
                palette.muted
            };
            ui.painter()
                .circle_stroke(center, radius, Stroke::new(2.0 * scale, color));
        }
    }
    clicked
}

/// Small `n / total` counter in the bottom-right corner.
pub fn draw_counter(
    ui: &egui::Ui,
    current: usize,
    total: usize,
    rect: egui::Rect,
    palette: &Palette,
    scale: f32,
) {
    let galley = ui.painter().layout_no_wrap(
        format!("{} / {}", current + 1, total),
        egui::FontId::monospace(14.0 * scale),
        palette.muted,
    );
    let pos = egui::pos2(
        rect.right() - galley.rect.width() - 16.0 * scale,
        rect.bottom() - 30.0 * scale,
    );
    ui.painter().galley(pos, galley, palette.muted);
}
