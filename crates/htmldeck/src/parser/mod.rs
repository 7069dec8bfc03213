pub mod splitter;

use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{DeckError, Result};

pub const DEFAULT_CONTAINER: &str = ".wrap";
pub const DEFAULT_SEPARATOR: &str = "hr.slide-sep";

/// Compiled selectors for the content container and the slide separator.
#[derive(Debug, Clone)]
pub struct Selectors {
    container_source: String,
    container: Selector,
    separator: Selector,
}

impl Selectors {
    pub fn new(container: &str, separator: &str) -> Result<Self> {
        Ok(Self {
            container_source: container.to_string(),
            container: compile(container)?,
            separator: compile(separator)?,
        })
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER, DEFAULT_SEPARATOR).expect("built-in selectors must compile")
    }
}

/// Compile a CSS selector, reporting the offending text on failure.
pub fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| DeckError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// A child of the content container, lifted out of the parsed document.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceNode {
    Separator,
    Content(ContentNode),
}

/// One unit of original markup that ends up in exactly one slide.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Element(ElementNode),
    Text(String),
    Comment(String),
}

impl ContentNode {
    /// True for text nodes holding nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => is_blank_text(text),
            _ => false,
        }
    }

    /// Plain text used by renderers that cannot show markup.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Element(element) => &element.text,
            Self::Text(text) => text.trim(),
            Self::Comment(_) => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    /// Lowercase tag name
    pub tag: String,
    pub outer_html: String,
    /// Text content with whitespace collapsed (kept verbatim for `pre`)
    pub text: String,
    /// Text of each direct `li` child for `ul`/`ol`
    pub items: Vec<String>,
}

impl ElementNode {
    fn from_element(element: ElementRef<'_>) -> Self {
        let tag = element.value().name().to_ascii_lowercase();
        let text = if tag == "pre" {
            element.text().collect::<String>()
        } else {
            collapse_whitespace(element.text())
        };
        let items = if tag == "ul" || tag == "ol" {
            element
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|child| child.value().name().eq_ignore_ascii_case("li"))
                .map(|li| collapse_whitespace(li.text()))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            tag,
            outer_html: element.html(),
            text,
            items,
        }
    }

    /// Heading level for `h1`..`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        let mut chars = self.tag.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some('h'), Some(d @ '1'..='6'), None) => d.to_digit(10).map(|d| d as u8),
            _ => None,
        }
    }
}

/// Tag name and class of the original container. Every slide gets a fresh
/// inner wrapper built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapper {
    pub tag: String,
    pub class: Option<String>,
}

impl Default for Wrapper {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            class: Some("wrap".to_string()),
        }
    }
}

/// A parsed HTML document with its content container located.
#[derive(Debug)]
pub struct SourceDocument {
    html: Html,
    container: NodeId,
    wrapper: Wrapper,
    nodes: Vec<SourceNode>,
}

impl SourceDocument {
    pub fn parse(source: &str, selectors: &Selectors) -> Result<Self> {
        let html = Html::parse_document(source);
        let (container, wrapper, nodes) = {
            let element = html.select(&selectors.container).next().ok_or_else(|| {
                DeckError::ContainerNotFound {
                    selector: selectors.container_source.clone(),
                }
            })?;
            let wrapper = Wrapper {
                tag: element.value().name().to_ascii_lowercase(),
                class: element.value().attr("class").map(str::to_string),
            };
            let nodes: Vec<SourceNode> = element
                .children()
                .filter_map(|child| lift_node(child, &selectors.separator))
                .collect();
            (element.id(), wrapper, nodes)
        };
        tracing::debug!(
            children = nodes.len(),
            container = %wrapper.tag,
            "located content container"
        );
        Ok(Self {
            html,
            container,
            wrapper,
            nodes,
        })
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn wrapper(&self) -> &Wrapper {
        &self.wrapper
    }

    /// Text of the document's `<title>`, if it has a non-empty one.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        let title = self.html.select(&selector).next()?;
        let text = collapse_whitespace(title.text());
        (!text.is_empty()).then_some(text)
    }

    pub fn nodes(&self) -> &[SourceNode] {
        &self.nodes
    }

    /// Move the container's children out. A second call returns nothing.
    pub fn take_nodes(&mut self) -> Vec<SourceNode> {
        std::mem::take(&mut self.nodes)
    }
}

fn lift_node(node: NodeRef<'_, Node>, separator: &Selector) -> Option<SourceNode> {
    match node.value() {
        Node::Text(text) => Some(SourceNode::Content(ContentNode::Text(String::from(
            &**text,
        )))),
        Node::Comment(comment) => Some(SourceNode::Content(ContentNode::Comment(String::from(
            &**comment,
        )))),
        Node::Element(_) => {
            let element = ElementRef::wrap(node)?;
            if separator.matches(&element) {
                return Some(SourceNode::Separator);
            }
            Some(SourceNode::Content(ContentNode::Element(
                ElementNode::from_element(element),
            )))
        }
        _ => None,
    }
}

/// Whitespace as JavaScript's `String.prototype.trim` sees it.
fn is_blank_text(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{feff}')
}

fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
