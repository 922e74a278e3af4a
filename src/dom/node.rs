//! Owned node tree
//!
//! A plain nested tree built through the [`Processor`](super::Processor).
//! Names, attribute values and text are decoded as lossy UTF-8.

use super::processor::{Attributes, Delegate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            Node::Text(_) => None,
        }
    }

    /// Get attribute value by name
    pub fn attribute(&self, key: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        collect_text_content(self, &mut result);
        result
    }
}

fn collect_text_content(node: &Node, result: &mut String) {
    match node {
        Node::Text(text) => result.push_str(text),
        Node::Element { children, .. } => {
            for child in children {
                collect_text_content(child, result);
            }
        }
    }
}

/// Delegate that assembles a `Vec<Node>` of top-level nodes
#[derive(Debug, Default)]
pub struct TreeBuilder {
    roots: Vec<Node>,
    /// Open elements: (name, attributes, children so far)
    open: Vec<(String, Vec<(String, String)>, Vec<Node>)>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level nodes; elements still open are dropped
    pub fn into_nodes(self) -> Vec<Node> {
        self.roots
    }

    fn push(&mut self, node: Node) {
        match self.open.last_mut() {
            Some((_, _, children)) => children.push(node),
            None => self.roots.push(node),
        }
    }
}

impl<'a> Delegate<'a> for TreeBuilder {
    fn text(&mut self, text: &[u8]) {
        let text = String::from_utf8_lossy(text);
        // Adjacent text (e.g. a comment after a run) merges into one node
        let last = match self.open.last_mut() {
            Some((_, _, children)) => children.last_mut(),
            None => self.roots.last_mut(),
        };
        match last {
            Some(Node::Text(existing)) => existing.push_str(&text),
            _ => self.push(Node::Text(text.into_owned())),
        }
    }

    fn tag_start(&mut self, name: &'a [u8], attributes: &Attributes<'a>) {
        self.open
            .push((lossy(name), owned_attributes(attributes), Vec::new()));
    }

    fn tag_end(&mut self, _name: &'a [u8]) {
        if let Some((name, attributes, children)) = self.open.pop() {
            self.push(Node::Element {
                name,
                attributes,
                children,
            });
        }
    }

    fn tag(&mut self, name: &'a [u8], attributes: &Attributes<'a>) {
        self.push(Node::Element {
            name: lossy(name),
            attributes: owned_attributes(attributes),
            children: Vec::new(),
        });
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn owned_attributes(attributes: &Attributes<'_>) -> Vec<(String, String)> {
    attributes
        .iter()
        .map(|(k, v)| (lossy(k), lossy(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_tree;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_tree() {
        let nodes = parse_tree(br#"<ul id="l"><li>one</li><li>two<br/></li></ul>"#).unwrap();

        assert_eq!(nodes.len(), 1);
        let ul = &nodes[0];
        assert_eq!(ul.name(), Some("ul"));
        assert_eq!(ul.attribute("id"), Some("l"));
        assert_eq!(ul.attribute("missing"), None);
        assert_eq!(ul.children().len(), 2);
        assert_eq!(ul.children()[1].children()[1].name(), Some("br"));
        assert_eq!(ul.text_content(), "onetwo");
    }

    #[test]
    fn test_comment_merges_into_text() {
        let nodes = parse_tree(b"a<!-- b -->c<p/>").unwrap();
        assert_eq!(
            nodes,
            [
                Node::Text("a<!-- b -->c".to_string()),
                Node::Element {
                    name: "p".to_string(),
                    attributes: Vec::new(),
                    children: Vec::new(),
                },
            ]
        );
    }

    #[test]
    fn test_unbalanced_tree_fails() {
        assert!(parse_tree(b"<a></b>").is_err());
        assert!(parse_tree(b"<a>").is_err());
    }
}
