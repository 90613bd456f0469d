//! Message pane document

use std::fmt;

use crate::domain::error::PaneError;

use super::fragment::{find_in_mut, parse_fragment, render, Element, Node};

/// Id of the element that receives messages
pub const CONTAINER_ID: &str = "Notifications";

/// An HTML document holding a message container element.
///
/// Messages are HTML fragments. They are either appended after the existing
/// children of the container or swapped in for its first child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePane {
    nodes: Vec<Node>,
}

impl MessagePane {
    /// A minimal document with an empty container
    pub fn new() -> Self {
        let container = Element::new("div").with_attribute("id", CONTAINER_ID);
        let body = Element {
            children: vec![Node::Element(container)],
            ..Element::new("body")
        };
        let html = Element {
            children: vec![Node::Element(body)],
            ..Element::new("html")
        };
        Self {
            nodes: vec![Node::Element(html)],
        }
    }

    /// Parse an existing document
    pub fn parse(html: &str) -> Self {
        Self {
            nodes: parse_fragment(html),
        }
    }

    /// Append every node of the fragment to the container
    pub fn append_message(&mut self, html: &str) -> Result<(), PaneError> {
        let fragment = parse_fragment(html);
        self.container_mut()?.children.extend(fragment);
        Ok(())
    }

    /// Replace the container's first child with the fragment.
    /// An empty container behaves like [`MessagePane::append_message`];
    /// an empty fragment just removes the first child.
    pub fn set_message(&mut self, html: &str) -> Result<(), PaneError> {
        let fragment = parse_fragment(html);
        let container = self.container_mut()?;
        if container.children.is_empty() {
            container.children.extend(fragment);
        } else {
            let _replaced: Vec<Node> = container.children.splice(0..1, fragment).collect();
        }
        Ok(())
    }

    /// Children of the container
    pub fn messages(&mut self) -> Result<&[Node], PaneError> {
        Ok(&self.container_mut()?.children)
    }

    /// Render the whole document back to HTML
    pub fn render(&self) -> String {
        render(&self.nodes)
    }

    fn container_mut(&mut self) -> Result<&mut Element, PaneError> {
        find_in_mut(&mut self.nodes, CONTAINER_ID)
            .ok_or_else(|| PaneError::MissingContainer(CONTAINER_ID.to_string()))
    }
}

impl Default for MessagePane {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessagePane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
