use eframe::egui;
use std::path::PathBuf;

use crate::config::Config;
use crate::deck::Deck;
use crate::error::DeckError;
use crate::nav::{InputEvent, NavKey, Navigator};
use crate::render::{self, Palette};

/// Pixels per line for wheel events reported in line units.
const WHEEL_LINE_HEIGHT: f32 = 40.0;

struct PresentationApp {
    navigator: Navigator,
    palette: Palette,
    /// Height of the slide area from the last frame, for page-unit wheel events
    page_height: f32,
}

impl PresentationApp {
    fn new(navigator: Navigator) -> Self {
        Self {
            navigator,
            palette: Palette::default(),
            page_height: 1080.0,
        }
    }

    fn dispatch(&mut self, events: impl IntoIterator<Item = InputEvent>) -> bool {
        let mut moved = false;
        for event in events {
            moved |= self.navigator.handle(event).is_some();
        }
        moved
    }
}

/// Map a pressed egui key to a navigation key.
pub fn nav_key(key: egui::Key) -> Option<NavKey> {
    match key {
        egui::Key::ArrowDown => Some(NavKey::ArrowDown),
        egui::Key::PageDown => Some(NavKey::PageDown),
        egui::Key::ArrowUp => Some(NavKey::ArrowUp),
        egui::Key::PageUp => Some(NavKey::PageUp),
        egui::Key::Home => Some(NavKey::Home),
        egui::Key::End => Some(NavKey::End),
        _ => None,
    }
}

/// Convert an egui wheel delta to page pixels with the DOM sign convention
/// (positive scrolls down). egui reports how the content should move, so
/// the sign flips.
pub fn wheel_delta_y(unit: egui::MouseWheelUnit, delta_y: f32, page_height: f32) -> f32 {
    let pixels = match unit {
        egui::MouseWheelUnit::Point => delta_y,
        egui::MouseWheelUnit::Line => delta_y * WHEEL_LINE_HEIGHT,
        egui::MouseWheelUnit::Page => delta_y * page_height,
    };
    -pixels
}

/// Translate one raw egui event into a navigation input, if it is one.
pub fn translate_event(event: &egui::Event, page_height: f32) -> Option<InputEvent> {
    match event {
        egui::Event::Key {
            key, pressed: true, ..
        } => nav_key(*key).map(InputEvent::Key),
        egui::Event::MouseWheel { unit, delta, .. } => Some(InputEvent::Wheel {
            delta_y: wheel_delta_y(*unit, delta.y, page_height),
        }),
        egui::Event::Touch { phase, pos, .. } => match phase {
            egui::TouchPhase::Start => Some(InputEvent::TouchStart { y: Some(pos.y) }),
            egui::TouchPhase::End => Some(InputEvent::TouchEnd { y: Some(pos.y) }),
            _ => None,
        },
        _ => None,
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let page_height = self.page_height;

        let events: Vec<InputEvent> = ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
            }
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
            }
            i.events
                .iter()
                .filter_map(|e| translate_event(e, page_height))
                .collect()
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        self.dispatch(events);

        let bg = self.palette.background;
        let mut clicked = None;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                self.page_height = rect.height();

                let scale = render::compute_scale(rect);
                let deck = self.navigator.deck();
                let current = self.navigator.current();

                if let Some(slide) = deck.slide(current) {
                    render::draw_slide(ui, slide, rect, &self.palette, scale);
                }
                clicked = render::draw_indicators(ui, deck, rect, &self.palette, scale);
                render::draw_counter(ui, current, deck.len(), rect, &self.palette, scale);
            });

        if let Some(index) = clicked {
            if self.dispatch([InputEvent::IndicatorClick(index)]) {
                ctx.request_repaint();
            }
        }
    }
}

/// Read and build the deck, along with the document title.
fn load_deck(
    file: &std::path::Path,
    config: &Config,
) -> anyhow::Result<(Option<String>, Deck)> {
    let source = std::fs::read_to_string(file)?;
    let selectors = config.selectors()?;
    match Deck::from_html(&source, &selectors) {
        Ok((doc, deck)) => Ok((doc.title(), deck)),
        Err(DeckError::ContainerNotFound { selector }) => {
            tracing::warn!(%selector, "no content container found");
            anyhow::bail!(
                "Nothing to present in {}: no element matches `{selector}`",
                file.display()
            )
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run(file: PathBuf, windowed: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let (doc_title, deck) = load_deck(&file, &config)?;

    let title = doc_title.unwrap_or_else(|| {
        format!(
            "htmldeck \u{2014} {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let navigator = Navigator::new(deck, config.thresholds());

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(PresentationApp::new(navigator)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_keys() {
        assert_eq!(nav_key(egui::Key::ArrowDown), Some(NavKey::ArrowDown));
        assert_eq!(nav_key(egui::Key::PageUp), Some(NavKey::PageUp));
        assert_eq!(nav_key(egui::Key::End), Some(NavKey::End));
        assert_eq!(nav_key(egui::Key::ArrowRight), None);
        assert_eq!(nav_key(egui::Key::Space), None);
    }

    #[test]
    fn test_wheel_sign_and_units() {
        // Wheel down: egui moves content up (negative y)
        assert_eq!(wheel_delta_y(egui::MouseWheelUnit::Point, -12.0, 800.0), 12.0);
        assert_eq!(wheel_delta_y(egui::MouseWheelUnit::Line, 1.0, 800.0), -40.0);
        assert_eq!(wheel_delta_y(egui::MouseWheelUnit::Page, -0.5, 800.0), 400.0);
    }

    #[test]
    fn test_load_deck_without_container() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.html");
        std::fs::write(&file, "<html><body><p>no deck</p></body></html>").unwrap();
        let err = load_deck(&file, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("Nothing to present"));
    }

    #[test]
    fn test_load_deck_with_title() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("talk.html");
        std::fs::write(
            &file,
            "<html><head><title>Talk</title></head><body><div class=\"wrap\"><p>a</p><hr class=\"slide-sep\"><p>b</p></div></body></html>",
        )
        .unwrap();
        let (title, deck) = load_deck(&file, &Config::default()).unwrap();
        assert_eq!(title.as_deref(), Some("Talk"));
        assert_eq!(deck.len(), 2);
    }
}
