//! Parsed manifest tree
//!
//! A [`Document`] is the read-only tree the validator walks. It is produced
//! by [`crate::parsers::xml::XmlParser`] or built directly by a host that
//! already owns a parsed XML tree.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A single element of a parsed manifest
///
/// The raw source of an element is a byte range into a source buffer shared
/// by every node of the document, so nesting does not multiply storage.
/// Dropping, cloning and comparing walk the tree with an explicit stack.
pub struct Node {
    /// Element type name (local tag name, e.g. "dependency")
    pub name: String,
    /// Child elements in document order
    pub children: Vec<Node>,
    /// Trimmed text content of the element
    pub text: String,
    /// Line of the start tag (1-indexed)
    pub line: u32,
    source: Arc<str>,
    span: Range<usize>,
}

impl Node {
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            text: String::new(),
            line,
            source: Arc::default(),
            span: 0..0,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Use `code` as the raw source of this element
    pub fn with_code(self, code: impl Into<String>) -> Self {
        let source: Arc<str> = Arc::from(code.into());
        let len = source.len();
        self.with_span(source, 0..len)
    }

    /// Raw source is `span` within `source`
    pub fn with_span(mut self, source: Arc<str>, span: Range<usize>) -> Self {
        self.source = source;
        self.span = span;
        self
    }

    /// Raw source fragment covering the whole element
    pub fn code(&self) -> &str {
        self.source.get(self.span.clone()).unwrap_or_default()
    }

    /// First direct child with the given type name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Depth-first, pre-order iterator over this node and all descendants
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    fn with_cloned_children(&self, children: Vec<Node>) -> Node {
        Node {
            name: self.name.clone(),
            children,
            text: self.text.clone(),
            line: self.line,
            source: Arc::clone(&self.source),
            span: self.span.clone(),
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        // Each frame holds an original node and the clones of its children so far
        let mut stack: Vec<(&Node, Vec<Node>)> = vec![(self, Vec::new())];
        while let Some(&(original, ref cloned)) = stack.last() {
            if let Some(child) = original.children.get(cloned.len()) {
                stack.push((child, Vec::with_capacity(child.children.len())));
                continue;
            }
            let Some((original, children)) = stack.pop() else {
                break;
            };
            let node = original.with_cloned_children(children);
            match stack.last_mut() {
                Some((_, siblings)) => siblings.push(node),
                None => return node,
            }
        }
        unreachable!("clone stack emptied before the root was rebuilt")
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.name != b.name
                || a.line != b.line
                || a.text != b.text
                || a.code() != b.code()
                || a.children.len() != b.children.len()
            {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("line", &self.line)
            .field("text", &self.text)
            .field("code", &self.code())
            .field("children", &self.children)
            .finish()
    }
}

/// Pre-order traversal that does not recurse, so deep trees cannot blow the stack
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A parsed manifest together with the name of the file it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Originating filename or path, as given by the host
    pub file_name: String,
    /// Root element; `None` for a document without elements
    pub root: Option<Node>,
}

impl Document {
    pub fn new(file_name: impl Into<String>, root: Node) -> Self {
        Self {
            file_name: file_name.into(),
            root: Some(root),
        }
    }

    pub fn empty(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            root: None,
        }
    }

    /// All nodes of the document in depth-first, pre-order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.root.iter().flat_map(Node::descendants)
    }
}
