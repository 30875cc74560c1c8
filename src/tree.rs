// src/tree.rs
// =============================================================================
// The traversal tree records which page linked to which.
//
// Each node owns its children, so this is a real tree and not a graph: the
// same URL can show up as several different nodes in different branches.
// The crawler appends one child per discovered link, in discovery order.
//
// When tree output is not wanted the crawler simply carries `None` instead
// of a node, so no work is spent building it.
//
// Rendering looks like:
//
//   https://g.org/
//   └── https://g.org/pkg/
//   	└── https://g.org/cmd/
//   └── https://g.org/cmd/
// =============================================================================

use serde::Serialize;
use std::io::Write;

const BRANCH: &str = "└── ";
const INDENT: &str = "\t";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalNode {
    pub url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TraversalNode>,
}

impl TraversalNode {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            children: Vec::new(),
        }
    }

    // Appends a child and returns it so callers can keep building below it
    pub fn add_child(&mut self, url: impl Into<String>) -> &mut TraversalNode {
        self.children.push(TraversalNode::new(url));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    // Total number of nodes, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TraversalNode::node_count).sum::<usize>()
    }

    // Depth-first, pre-order text rendering. Calling it twice on the same
    // tree gives the same string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.url);
        out.push('\n');
        for child in &self.children {
            child.render_into(&mut out, 0);
        }
        out
    }

    fn render_into(&self, out: &mut String, level: usize) {
        out.push_str(&INDENT.repeat(level));
        out.push_str(BRANCH);
        out.push_str(&self.url);
        out.push('\n');
        for child in &self.children {
            child.render_into(out, level + 1);
        }
    }

    pub fn write_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writer.write_all(self.render().as_bytes())
    }
}

// Adds one child per URL under `parent` when a tree is being recorded and
// hands back a slot for each of them, in the same order as `urls`.
//
// With no parent there is nothing to attach to: every slot is None, so the
// subtrees below stay unrecorded as well.
pub fn attach_all<'a>(
    parent: Option<&'a mut TraversalNode>,
    urls: &[String],
) -> Vec<Option<&'a mut TraversalNode>> {
    match parent {
        Some(node) => {
            let start = node.children.len();
            for url in urls {
                node.add_child(url.as_str());
            }
            node.children[start..].iter_mut().map(Some).collect()
        }
        None => urls.iter().map(|_| None).collect(),
    }
}
