use crate::error::Result;
use crate::parser::{self, ContentNode, Selectors, SourceDocument, Wrapper};

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    index: usize,
    nodes: Vec<ContentNode>,
    active: bool,
}

impl Slide {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Navigation dot paired with the slide of the same index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    index: usize,
    active: bool,
}

impl Indicator {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Slides plus the parallel strip of indicators.
///
/// Always holds at least one slide, and exactly one slide (and the indicator
/// with the same index) is active.
#[derive(Debug, Clone)]
pub struct Deck {
    wrapper: Wrapper,
    slides: Vec<Slide>,
    indicators: Vec<Indicator>,
}

impl Deck {
    /// Build a deck from partitioned groups. Slide 0 starts active.
    pub fn build(groups: Vec<Vec<ContentNode>>, wrapper: Wrapper) -> Self {
        let mut groups = groups;
        if groups.is_empty() {
            groups.push(Vec::new());
        }

        let slides: Vec<Slide> = groups
            .into_iter()
            .enumerate()
            .map(|(index, nodes)| Slide {
                index,
                nodes,
                active: index == 0,
            })
            .collect();
        let indicators = slides
            .iter()
            .map(|slide| Indicator {
                index: slide.index,
                active: slide.active,
            })
            .collect();

        tracing::debug!(slides = slides.len(), "built deck");
        Self {
            wrapper,
            slides,
            indicators,
        }
    }

    /// Partition the document's container children and build the deck.
    /// The document is left without nodes; they now live in the slides.
    pub fn from_source(doc: &mut SourceDocument) -> Self {
        let wrapper = doc.wrapper().clone();
        let groups = parser::splitter::split(doc.take_nodes());
        Self::build(groups, wrapper)
    }

    /// Parse an HTML document and build its deck in one step.
    pub fn from_html(source: &str, selectors: &Selectors) -> Result<(SourceDocument, Self)> {
        let mut doc = SourceDocument::parse(source, selectors)?;
        let deck = Self::from_source(&mut doc);
        Ok((doc, deck))
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.slides.len().saturating_sub(1)
    }

    pub fn wrapper(&self) -> &Wrapper {
        &self.wrapper
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn active_index(&self) -> Option<usize> {
        self.slides.iter().position(|s| s.active)
    }

    /// Move the active flag from `from` to `to` and resync every indicator.
    /// Callers guarantee both indexes are in range.
    pub(crate) fn activate(&mut self, from: usize, to: usize) {
        self.slides[from].active = false;
        self.slides[to].active = true;
        for indicator in &mut self.indicators {
            indicator.active = indicator.index == to;
        }
        debug_assert_eq!(self.slides.iter().filter(|s| s.active).count(), 1);
    }
}
