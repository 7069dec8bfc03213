use ego_tree::NodeId;
use scraper::node::Comment;
use scraper::{Html, Node};

use crate::deck::{Deck, Slide};
use crate::parser::{ContentNode, SourceDocument, Wrapper};

/// Comment left where the deck goes until the document is serialized.
const DECK_MARKER: &str = "htmldeck:deck";

/// Markup for the deck container and the indicator strip, reflecting the
/// deck's current active flags.
pub fn render_deck(deck: &Deck) -> String {
    let mut out = String::from("<div class=\"deck\">\n");
    for slide in deck.slides() {
        write_slide(&mut out, slide, deck.wrapper());
    }
    out.push_str("</div>\n<div class=\"dots\">");
    for indicator in deck.indicators() {
        if indicator.is_active() {
            out.push_str("<div class=\"dot active\"></div>");
        } else {
            out.push_str("<div class=\"dot\"></div>");
        }
    }
    out.push_str("</div>\n");
    out
}

/// Re-serialize the whole source document with the content container
/// removed and the deck appended at the end of `<body>`.
pub fn render_document(doc: &SourceDocument, deck: &Deck) -> String {
    let mut html = doc.html().clone();
    if let Some(mut container) = html.tree.get_mut(doc.container()) {
        container.detach();
    }
    let marked = match body_id(&html).and_then(|id| html.tree.get_mut(id)) {
        Some(mut body) => {
            body.append(Node::Comment(Comment {
                comment: DECK_MARKER.into(),
            }));
            true
        }
        None => false,
    };

    let mut out = html.html();
    let deck_markup = render_deck(deck);
    let marker = format!("<!--{DECK_MARKER}-->");
    match out.rfind(&marker).filter(|_| marked) {
        Some(at) => out.replace_range(at..at + marker.len(), &deck_markup),
        None => out.push_str(&deck_markup),
    }
    out
}

fn body_id(html: &Html) -> Option<NodeId> {
    html.tree
        .root()
        .descendants()
        .find(|node| {
            node.value()
                .as_element()
                .is_some_and(|el| el.name() == "body")
        })
        .map(|node| node.id())
}

fn write_slide(out: &mut String, slide: &Slide, wrapper: &Wrapper) {
    if slide.is_active() {
        out.push_str("<section class=\"slide is-active\">");
    } else {
        out.push_str("<section class=\"slide\">");
    }
    out.push('<');
    out.push_str(&wrapper.tag);
    if let Some(class) = &wrapper.class {
        out.push_str(" class=\"");
        out.push_str(&escape_attr(class));
        out.push('"');
    }
    out.push('>');
    for node in slide.nodes() {
        match node {
            ContentNode::Element(element) => out.push_str(&element.outer_html),
            ContentNode::Text(text) => out.push_str(&escape_text(text)),
            ContentNode::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
        }
    }
    out.push_str("</");
    out.push_str(&wrapper.tag);
    out.push_str("></section>\n");
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
