//! Message pane domain module

mod fragment;
mod pane;

pub use fragment::{parse_fragment, render, Element, Node};
pub use pane::{MessagePane, CONTAINER_ID};
