//! htmldeck - turn a scrollable HTML document into a slide deck
//!
//! - `parser`: locate the content container and lift its children
//! - `parser::splitter`: partition children into slide groups at separators
//! - `deck`: slides plus the parallel indicator strip
//! - `nav`: current slide, input dispatch and the single `jump_to` mutator
//! - `render`: deck markup and egui drawing
//! - `app`: the eframe presenter

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod deck;
pub mod error;
pub mod nav;
pub mod parser;
pub mod render;

pub use config::Config;
pub use deck::{Deck, Indicator, Slide};
pub use error::DeckError;
pub use nav::{InputEvent, Jump, NavKey, Navigator, Thresholds};
pub use parser::{ContentNode, Selectors, SourceDocument};
