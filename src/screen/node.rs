//! Host-neutral render tree.
//!
//! Screens describe their output as a tree of elements and text. Hosts map
//! tags onto their own primitives; the tree itself is plain data so two
//! renders can be compared for equality.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn element(tag: impl Into<String>) -> Element {
        Element {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Node {
        Node::Text(text.into())
    }

    /// Concatenated text content of this subtree.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }

    /// First element (depth-first, including self) with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        match self {
            Node::Text(_) => None,
            Node::Element(el) if el.tag == tag => Some(el),
            Node::Element(el) => el.children.iter().find_map(|c| c.find(tag)),
        }
    }
}

impl Element {
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Markup-style rendering, mostly for logs and snapshots.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => write!(f, "{}", escape(text)),
            Node::Element(el) => {
                write!(f, "<{}", el.tag)?;
                for (name, value) in &el.attrs {
                    write!(f, " {}=\"{}\"", name, escape(value))?;
                }
                if el.children.is_empty() {
                    return write!(f, "/>");
                }
                write!(f, ">")?;
                for child in &el.children {
                    write!(f, "{}", child)?;
                }
                write!(f, "</{}>", el.tag)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Node {
        Node::element("view")
            .attr("role", "card")
            .child(Node::element("text").text("Ada & co"))
            .child(Node::element("image").attr("src", "a.png"))
            .into()
    }

    #[test]
    fn test_display() {
        assert_eq!(
            card().to_string(),
            r#"<view role="card"><text>Ada &amp; co</text><image src="a.png"/></view>"#
        );
    }

    #[test]
    fn test_queries() {
        let node = card();
        assert_eq!(node.text_content(), "Ada & co");
        assert_eq!(node.find("image").unwrap().attrs["src"], "a.png");
        assert!(node.find("button").is_none());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(card()).unwrap();
        assert_eq!(json["tag"], "view");
        assert_eq!(json["children"][0]["children"][0], "Ada & co");
        assert!(json["children"][1].get("children").is_none());
    }
}
