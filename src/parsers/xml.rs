//! Parser for XML manifests (pom.xml, maven-metadata.xml) built on quick-xml

use std::sync::Arc;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{ParseError, Parser};
use crate::document::{Document, Node};

/// Parser producing a [`Document`] tree from XML text
#[derive(Debug, Default)]
pub struct XmlParser;

impl XmlParser {
    pub fn new() -> Self {
        Self
    }
}

/// Element whose end tag has not been seen yet
struct OpenElement {
    node: Node,
    start: usize,
    text: String,
}

impl Parser for XmlParser {
    fn parse(&self, file_name: &str, content: &str) -> Result<Document, ParseError> {
        let lines = LineIndex::new(content);
        let source: Arc<str> = Arc::from(content);
        let mut reader = Reader::from_str(content);
        let mut stack: Vec<OpenElement> = Vec::new();
        let mut root: Option<Node> = None;

        loop {
            let start = reader.buffer_position() as usize;
            let event = reader.read_event().map_err(|source| ParseError::Xml {
                line: lines.line_of(reader.error_position() as usize),
                source,
            })?;

            match event {
                Event::Start(e) => {
                    let line = lines.line_of(start);
                    if root.is_some() && stack.is_empty() {
                        return Err(ParseError::MultipleRoots {
                            name: element_name(&e),
                            line,
                        });
                    }
                    stack.push(OpenElement {
                        node: Node::new(element_name(&e), line),
                        start,
                        text: String::new(),
                    });
                }
                Event::Empty(e) => {
                    let line = lines.line_of(start);
                    let end = reader.buffer_position() as usize;
                    let node = Node::new(element_name(&e), line)
                        .with_span(Arc::clone(&source), start..end);
                    attach(&mut stack, &mut root, node)?;
                }
                Event::End(_) => {
                    let end = reader.buffer_position() as usize;
                    // quick-xml rejects unmatched end tags before we get here
                    if let Some(OpenElement { node, start, text }) = stack.pop() {
                        let node = node
                            .with_text(text.trim())
                            .with_span(Arc::clone(&source), start..end);
                        attach(&mut stack, &mut root, node)?;
                    }
                }
                Event::Text(t) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&String::from_utf8_lossy(&t));
                    }
                }
                Event::CData(c) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&String::from_utf8_lossy(&c));
                    }
                }
                Event::GeneralRef(r) => {
                    if let Some(open) = stack.last_mut() {
                        let name = String::from_utf8_lossy(&r);
                        open.text.push_str(&resolve_reference(&name));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(ParseError::Unclosed {
                name: open.node.name.clone(),
                line: open.node.line,
            });
        }

        match root {
            Some(root) => Ok(Document::new(file_name, root)),
            None => Err(ParseError::NoRootElement),
        }
    }
}

/// Attach a closed element to its parent, or make it the root
fn attach(
    stack: &mut [OpenElement],
    root: &mut Option<Node>,
    node: Node,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.node.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(ParseError::MultipleRoots {
            name: node.name.clone(),
            line: node.line,
        });
    }
    *root = Some(node);
    Ok(())
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Resolve `&name;` to its replacement text; unknown entities are kept verbatim
fn resolve_reference(name: &str) -> String {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        if let Some(c) = value.and_then(char::from_u32) {
            return c.to_string();
        }
    } else if let Some(text) = resolve_predefined_entity(name) {
        return text.to_string();
    }
    format!("&{name};")
}

/// Maps byte offsets to 1-indexed line numbers
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    fn line_of(&self, offset: usize) -> u32 {
        self.line_starts.partition_point(|&start| start <= offset) as u32
    }
}
