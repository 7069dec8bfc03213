use super::{ContentNode, SourceNode};

/// Partition the container's children into slide groups.
///
/// Separators close the current group and are dropped. Whitespace-only text
/// is dropped without starting a group, so runs of separators and blank
/// lines never produce empty slides.
///
/// When no group comes out of the scan (only separators and whitespace, or no
/// children at all) every non-separator child forms a single group, so a deck
/// always has at least one slide.
pub fn split(nodes: Vec<SourceNode>) -> Vec<Vec<ContentNode>> {
    let mut groups: Vec<Vec<ContentNode>> = Vec::new();
    let mut current: Vec<ContentNode> = Vec::new();
    let mut blanks: Vec<ContentNode> = Vec::new();

    for node in nodes {
        match node {
            SourceNode::Separator => {
                if !current.is_empty() {
                    groups.push(std::mem::take(&mut current));
                }
            }
            SourceNode::Content(content) if content.is_blank() => blanks.push(content),
            SourceNode::Content(content) => current.push(content),
        }
    }

    if !current.is_empty() {
        groups.push(current);
    }

    if groups.is_empty() {
        // Only blank text survived; keep it rather than invent content
        groups.push(blanks);
    }

    groups
}
