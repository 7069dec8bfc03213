use eframe::egui::{self, Color32, FontId, Pos2, Stroke};

use super::Palette;
use crate::parser::{ContentNode, ElementNode};

const H1_SIZE: f32 = 96.0;
const H2_SIZE: f32 = 72.0;
const H3_SIZE: f32 = 52.0;
const BODY_SIZE: f32 = 44.0;
const CODE_SIZE: f32 = 30.0;

pub fn heading_size(level: u8) -> f32 {
    match level {
        1 => H1_SIZE,
        2 => H2_SIZE,
        3 => H3_SIZE,
        _ => BODY_SIZE,
    }
}

/// Gap between consecutive blocks at the given scale.
pub fn block_gap(scale: f32) -> f32 {
    BODY_SIZE * 0.5 * scale
}

/// Draw one content node with its top-left corner at `pos`.
/// Returns the height used; nodes with nothing to show use none.
pub fn draw_node(
    painter: &egui::Painter,
    node: &ContentNode,
    pos: Pos2,
    width: f32,
    palette: &Palette,
    scale: f32,
) -> f32 {
    match node {
        ContentNode::Element(element) => draw_element(painter, element, pos, width, palette, scale),
        ContentNode::Text(_) => draw_wrapped(
            painter,
            node.display_text(),
            FontId::proportional(BODY_SIZE * scale),
            palette.foreground,
            pos,
            width,
        ),
        ContentNode::Comment(_) => 0.0,
    }
}

fn draw_element(
    painter: &egui::Painter,
    element: &ElementNode,
    pos: Pos2,
    width: f32,
    palette: &Palette,
    scale: f32,
) -> f32 {
    if let Some(level) = element.heading_level() {
        return draw_wrapped(
            painter,
            &element.text,
            FontId::proportional(heading_size(level) * scale),
            palette.heading,
            pos,
            width,
        );
    }

    match element.tag.as_str() {
        "ul" | "ol" => draw_list(painter, element, pos, width, palette, scale),
        "pre" => draw_code(painter, &element.text, pos, width, palette, scale),
        "hr" => {
            let y = pos.y + 8.0 * scale;
            painter.line_segment(
                [egui::pos2(pos.x, y), egui::pos2(pos.x + width, y)],
                Stroke::new(2.0 * scale, palette.muted),
            );
            16.0 * scale
        }
        _ => draw_wrapped(
            painter,
            &element.text,
            FontId::proportional(BODY_SIZE * scale),
            palette.foreground,
            pos,
            width,
        ),
    }
}

fn draw_list(
    painter: &egui::Painter,
    element: &ElementNode,
    pos: Pos2,
    width: f32,
    palette: &Palette,
    scale: f32,
) -> f32 {
    let ordered = element.tag == "ol";
    let font = FontId::proportional(BODY_SIZE * scale);
    let indent = BODY_SIZE * 1.2 * scale;
    let mut y = pos.y;

    for (i, item) in element.items.iter().enumerate() {
        let marker = if ordered {
            format!("{}.", i + 1)
        } else {
            "\u{2022}".to_string()
        };
        let marker_galley = painter.layout_no_wrap(marker, font.clone(), palette.accent);
        painter.galley(egui::pos2(pos.x, y), marker_galley, palette.accent);
        let h = draw_wrapped(
            painter,
            item,
            font.clone(),
            palette.foreground,
            egui::pos2(pos.x + indent, y),
            (width - indent).max(1.0),
        );
        y += h + BODY_SIZE * 0.25 * scale;
    }
    y - pos.y
}

fn draw_code(
    painter: &egui::Painter,
    code: &str,
    pos: Pos2,
    width: f32,
    palette: &Palette,
    scale: f32,
) -> f32 {
    let padding = 16.0 * scale;
    let galley = painter.layout(
        code.trim_end_matches('\n').to_string(),
        FontId::monospace(CODE_SIZE * scale),
        palette.code_foreground,
        width - padding * 2.0,
    );
    let bg = egui::Rect::from_min_size(
        pos,
        egui::vec2(width, galley.size().y + padding * 2.0),
    );
    painter.rect_filled(bg, 8.0 * scale, palette.code_background);
    painter.galley(
        pos + egui::vec2(padding, padding),
        galley,
        palette.code_foreground,
    );
    bg.height()
}

fn draw_wrapped(
    painter: &egui::Painter,
    text: &str,
    font: FontId,
    color: Color32,
    pos: Pos2,
    width: f32,
) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let galley = painter.layout(text.to_string(), font, color, width);
    let height = galley.size().y;
    painter.galley(pos, galley, color);
    height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_sizes_shrink_with_level() {
        assert!(heading_size(1) > heading_size(2));
        assert!(heading_size(2) > heading_size(3));
        assert_eq!(heading_size(4), heading_size(6));
    }
}
