use crate::deck::Deck;

pub const DEFAULT_WHEEL_THRESHOLD: f32 = 8.0;
pub const DEFAULT_TOUCH_THRESHOLD: f32 = 40.0;

/// Minimum input magnitudes that count as one navigation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Minimum `|delta_y|` of a wheel event
    pub wheel: f32,
    /// Minimum vertical swipe distance in pixels
    pub touch: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            wheel: DEFAULT_WHEEL_THRESHOLD,
            touch: DEFAULT_TOUCH_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    PageDown,
    ArrowUp,
    PageUp,
    Home,
    End,
}

/// Raw input from one of the four sources, already in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    IndicatorClick(usize),
    /// Positive `delta_y` scrolls down the page
    Wheel { delta_y: f32 },
    Key(NavKey),
    /// `y` is `None` when the event carried no touch point
    TouchStart { y: Option<f32> },
    TouchEnd { y: Option<f32> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub from: usize,
    pub to: usize,
}

/// Owns the deck and the current slide index.
///
/// `jump_to` is the only way the index changes; every input source maps its
/// events to a target index and hands it over.
#[derive(Debug, Clone)]
pub struct Navigator {
    deck: Deck,
    current: usize,
    thresholds: Thresholds,
    touch_start_y: Option<f32>,
}

impl Navigator {
    pub fn new(deck: Deck, thresholds: Thresholds) -> Self {
        Self {
            deck,
            current: 0,
            thresholds,
            touch_start_y: None,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.deck.len()
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Make `target` the active slide.
    ///
    /// Does nothing when `target` is the current slide or past the end.
    pub fn jump_to(&mut self, target: usize) -> Option<Jump> {
        if target == self.current || target >= self.deck.len() {
            tracing::trace!(target, current = self.current, "jump ignored");
            return None;
        }
        let from = self.current;
        self.deck.activate(from, target);
        self.current = target;
        tracing::debug!(from, to = target, "jumped");
        Some(Jump { from, to: target })
    }

    /// Compute the slide an input event asks for, without changing the
    /// current slide. Touch events update the swipe tracker.
    pub fn target_for(&mut self, event: &InputEvent) -> Option<usize> {
        let last = self.deck.last_index();
        match *event {
            InputEvent::IndicatorClick(index) => Some(index),
            InputEvent::Wheel { delta_y } => {
                if delta_y.abs() < self.thresholds.wheel {
                    None
                } else if delta_y > 0.0 {
                    self.forward()
                } else if delta_y < 0.0 {
                    self.backward()
                } else {
                    None
                }
            }
            InputEvent::Key(key) => Some(match key {
                NavKey::ArrowDown | NavKey::PageDown => (self.current + 1).min(last),
                NavKey::ArrowUp | NavKey::PageUp => self.current.saturating_sub(1),
                NavKey::Home => 0,
                NavKey::End => last,
            }),
            InputEvent::TouchStart { y } => {
                if let Some(y) = y {
                    self.touch_start_y = Some(y);
                }
                None
            }
            InputEvent::TouchEnd { y } => {
                let start = self.touch_start_y.take()?;
                let dy = y.unwrap_or(start) - start;
                if dy < -self.thresholds.touch {
                    self.forward()
                } else if dy > self.thresholds.touch {
                    self.backward()
                } else {
                    None
                }
            }
        }
    }

    /// Route one input event through `jump_to`.
    pub fn handle(&mut self, event: InputEvent) -> Option<Jump> {
        let target = self.target_for(&event)?;
        self.jump_to(target)
    }

    fn forward(&self) -> Option<usize> {
        Some(self.current + 1)
    }

    fn backward(&self) -> Option<usize> {
        self.current.checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ContentNode, Wrapper};

    fn navigator(slides: usize) -> Navigator {
        let groups = (0..slides)
            .map(|i| vec![ContentNode::Text(format!("slide {i}"))])
            .collect();
        Navigator::new(Deck::build(groups, Wrapper::default()), Thresholds::default())
    }

    fn assert_single_active(nav: &Navigator) {
        let deck = nav.deck();
        assert_eq!(deck.active_index(), Some(nav.current()));
        for indicator in deck.indicators() {
            assert_eq!(indicator.is_active(), indicator.index() == nav.current());
        }
    }

    #[test]
    fn test_starts_at_zero() {
        let nav = navigator(3);
        assert_eq!(nav.current(), 0);
        assert_single_active(&nav);
    }

    #[test]
    fn test_jump_to_same_index_is_noop() {
        let mut nav = navigator(3);
        nav.jump_to(1);
        let before = nav.deck().slides().to_vec();
        assert_eq!(nav.jump_to(1), None);
        assert_eq!(nav.deck().slides(), before.as_slice());
    }

    #[test]
    fn test_jump_out_of_range_is_noop() {
        let mut nav = navigator(3);
        assert_eq!(nav.jump_to(3), None);
        assert_eq!(nav.jump_to(usize::MAX), None);
        assert_eq!(nav.current(), 0);
        assert_single_active(&nav);
    }

    #[test]
    fn test_jump_reports_transition() {
        let mut nav = navigator(4);
        assert_eq!(nav.jump_to(3), Some(Jump { from: 0, to: 3 }));
        assert_eq!(nav.jump_to(1), Some(Jump { from: 3, to: 1 }));
        assert_single_active(&nav);
    }

    #[test]
    fn test_indicator_click() {
        let mut nav = navigator(5);
        nav.handle(InputEvent::IndicatorClick(4));
        assert_eq!(nav.current(), 4);
        nav.handle(InputEvent::IndicatorClick(9));
        assert_eq!(nav.current(), 4);
    }

    #[test]
    fn test_wheel_threshold() {
        let mut nav = navigator(3);
        assert_eq!(nav.handle(InputEvent::Wheel { delta_y: 7.9 }), None);
        assert_eq!(nav.handle(InputEvent::Wheel { delta_y: -7.9 }), None);
        assert_eq!(nav.current(), 0);
        nav.handle(InputEvent::Wheel { delta_y: 8.0 });
        assert_eq!(nav.current(), 1);
        nav.handle(InputEvent::Wheel { delta_y: -120.0 });
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_wheel_at_edges() {
        let mut nav = navigator(2);
        assert_eq!(nav.handle(InputEvent::Wheel { delta_y: -50.0 }), None);
        nav.handle(InputEvent::Wheel { delta_y: 50.0 });
        assert_eq!(nav.handle(InputEvent::Wheel { delta_y: 50.0 }), None);
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn test_keys() {
        let mut nav = navigator(4);
        nav.handle(InputEvent::Key(NavKey::PageDown));
        assert_eq!(nav.current(), 1);
        nav.handle(InputEvent::Key(NavKey::End));
        assert_eq!(nav.current(), 3);
        assert_eq!(nav.handle(InputEvent::Key(NavKey::ArrowDown)), None);
        nav.handle(InputEvent::Key(NavKey::PageUp));
        assert_eq!(nav.current(), 2);
        nav.handle(InputEvent::Key(NavKey::Home));
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.handle(InputEvent::Key(NavKey::ArrowUp)), None);
        assert_single_active(&nav);
    }

    #[test]
    fn test_swipe_up_advances() {
        let mut nav = navigator(3);
        nav.handle(InputEvent::TouchStart { y: Some(500.0) });
        nav.handle(InputEvent::TouchEnd { y: Some(450.0) });
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn test_short_swipe_is_noop() {
        let mut nav = navigator(3);
        nav.handle(InputEvent::TouchStart { y: Some(500.0) });
        assert_eq!(nav.handle(InputEvent::TouchEnd { y: Some(490.0) }), None);
        nav.handle(InputEvent::TouchStart { y: Some(500.0) });
        assert_eq!(nav.handle(InputEvent::TouchEnd { y: Some(460.0) }), None);
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_swipe_down_goes_back() {
        let mut nav = navigator(3);
        nav.jump_to(2);
        nav.handle(InputEvent::TouchStart { y: Some(100.0) });
        nav.handle(InputEvent::TouchEnd { y: Some(300.0) });
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn test_touch_end_without_start() {
        let mut nav = navigator(3);
        assert_eq!(nav.handle(InputEvent::TouchEnd { y: Some(0.0) }), None);
        nav.handle(InputEvent::TouchStart { y: None });
        assert_eq!(nav.handle(InputEvent::TouchEnd { y: Some(0.0) }), None);
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_touch_start_cleared_after_end() {
        let mut nav = navigator(3);
        nav.handle(InputEvent::TouchStart { y: Some(500.0) });
        nav.handle(InputEvent::TouchEnd { y: Some(495.0) });
        // The stale start must not pair with a later end
        assert_eq!(nav.handle(InputEvent::TouchEnd { y: Some(100.0) }), None);
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_touch_end_without_point_uses_start() {
        let mut nav = navigator(3);
        nav.handle(InputEvent::TouchStart { y: Some(500.0) });
        assert_eq!(nav.handle(InputEvent::TouchEnd { y: None }), None);
    }

    #[test]
    fn test_single_slide_ignores_everything() {
        let mut nav = navigator(1);
        for event in [
            InputEvent::Wheel { delta_y: 100.0 },
            InputEvent::Wheel { delta_y: -100.0 },
            InputEvent::Key(NavKey::ArrowDown),
            InputEvent::Key(NavKey::End),
            InputEvent::Key(NavKey::Home),
            InputEvent::IndicatorClick(1),
        ] {
            assert_eq!(nav.handle(event), None);
        }
        assert_single_active(&nav);
    }

    #[test]
    fn test_custom_thresholds() {
        let groups = vec![
            vec![ContentNode::Text("a".into())],
            vec![ContentNode::Text("b".into())],
        ];
        let mut nav = Navigator::new(
            Deck::build(groups, Wrapper::default()),
            Thresholds {
                wheel: 30.0,
                touch: 5.0,
            },
        );
        assert_eq!(nav.handle(InputEvent::Wheel { delta_y: 20.0 }), None);
        nav.handle(InputEvent::TouchStart { y: Some(100.0) });
        nav.handle(InputEvent::TouchEnd { y: Some(94.0) });
        assert_eq!(nav.current(), 1);
    }
}
