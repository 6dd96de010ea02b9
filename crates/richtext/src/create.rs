// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Tree-to-value conversion.
//!
//! [`create`] walks an input tree and produces a [`Record`]: the flat
//! text, the per-position format stacks, and any selection boundaries
//! the given range resolves to. In multiline mode the top-level
//! children matching the multiline tag each become one block, and
//! boundaries become block paths.

use std::rc::Rc;

use widestring::Utf16String;

use crate::dom::{
    Dom, DomCreationError, DomHandle, DomNode, DomRange, ElementNode,
};
use crate::format::Format;
use crate::record::{Content, Record};
use crate::selection::{Anchor, Selection};
use crate::value::Value;

/// Hooks controlling how the converter interprets the input tree. Every
/// hook defaults to a no-op.
#[derive(Default)]
pub struct CreateOptions<'a> {
    /// Drop matching elements and their entire subtree.
    pub remove_node_match: Option<Box<dyn Fn(&ElementNode) -> bool + 'a>>,
    /// Drop matching elements but keep their children, contributing no
    /// format.
    pub unwrap_node_match: Option<Box<dyn Fn(&ElementNode) -> bool + 'a>>,
    /// Post-process extracted text, e.g. to strip sentinel characters.
    /// Offset arithmetic uses the filtered length.
    pub filter_string: Option<Box<dyn Fn(&str) -> String + 'a>>,
    /// Drop matching attributes before a format is built.
    pub remove_attribute_match: Option<Box<dyn Fn(&str) -> bool + 'a>>,
}

impl CreateOptions<'_> {
    fn remove_node(&self, node: &ElementNode) -> bool {
        self.remove_node_match.as_ref().is_some_and(|hook| hook(node))
    }

    fn unwrap_node(&self, node: &ElementNode) -> bool {
        self.unwrap_node_match.as_ref().is_some_and(|hook| hook(node))
    }

    fn remove_attribute(&self, name: &str) -> bool {
        self.remove_attribute_match
            .as_ref()
            .is_some_and(|hook| hook(name))
    }

    /// Line breaks inside text nodes format the markup, they are not
    /// content; content line breaks arrive as `br` elements.
    fn filter(&self, string: &str) -> String {
        let stripped: String =
            string.chars().filter(|ch| *ch != '\n').collect();
        match &self.filter_string {
            Some(hook) => hook(&stripped),
            None => stripped,
        }
    }
}

/// Create a value and selection from a node of the input tree and a
/// boundary description.
///
/// Without `multiline_tag` the node's subtree becomes one single-block
/// value. With it, each child element matching the tag becomes one
/// block of a multiline value, and resolved boundaries become block
/// paths. A node with no children yields an empty value, never an
/// error.
pub fn create(
    dom: &Dom,
    node: DomHandle,
    range: Option<&DomRange>,
    multiline_tag: Option<&str>,
    options: &CreateOptions,
) -> Record {
    match multiline_tag {
        None => create_single(dom, node, range, options),
        Some(tag) => create_multiline(dom, node, range, tag, options),
    }
}

/// Create a value from a node of the input tree, without a boundary.
pub fn create_value(
    dom: &Dom,
    node: DomHandle,
    multiline_tag: Option<&str>,
    options: &CreateOptions,
) -> Content {
    create(dom, node, None, multiline_tag, options).value
}

/// Parse `html` and create a value from the resulting fragment.
pub fn create_from_html(
    html: &str,
    multiline_tag: Option<&str>,
    options: &CreateOptions,
) -> Result<Record, DomCreationError> {
    let dom = Dom::parse(html)?;
    Ok(create(&dom, dom.root(), None, multiline_tag, options))
}

fn create_multiline(
    dom: &Dom,
    node: DomHandle,
    range: Option<&DomRange>,
    multiline_tag: &str,
    options: &CreateOptions,
) -> Record {
    let mut values = Vec::new();
    let mut selection = Selection::new();

    for child in dom.children(node).iter().copied() {
        let DomNode::Element(element) = dom.get_node(child) else {
            continue;
        };
        if !element.tag().eq_ignore_ascii_case(multiline_tag) {
            continue;
        }

        let block = values.len();
        let record = create_single(dom, child, range, options);
        let Content::Single(value) = record.value else {
            unreachable!("create_single always produces a single block")
        };

        if let Some(range) = range {
            selection.start = block_anchor(
                selection.start,
                record.selection.start,
                range.start.container,
                child,
                block,
            );
            selection.end = block_anchor(
                selection.end,
                record.selection.end,
                range.end.container,
                child,
                block,
            );
        }

        values.push(value);
    }

    Record {
        value: Content::Multiline(values),
        selection,
    }
}

/// A boundary resolved inside block `block` becomes a full path; one
/// landing on the block element itself becomes an edge path.
fn block_anchor(
    current: Option<Anchor>,
    inner: Option<Anchor>,
    container: DomHandle,
    child: DomHandle,
    block: usize,
) -> Option<Anchor> {
    if let Some(Anchor::Offset(offset)) = inner {
        Some(Anchor::Block {
            block,
            offset: Some(offset),
        })
    } else if container == child {
        Some(Anchor::Block {
            block,
            offset: None,
        })
    } else {
        current
    }
}

fn create_single(
    dom: &Dom,
    node: DomHandle,
    range: Option<&DomRange>,
    options: &CreateOptions,
) -> Record {
    let mut value = Value::new();
    let mut selection = Selection::new();
    build(dom, node, range, options, &mut value, &mut selection);
    value.check_invariants();
    Record {
        value: Content::Single(value),
        selection,
    }
}

/// Walk `node`'s children in order, extending the accumulated `value`
/// and resolving into `selection` any boundary that lands in this
/// subtree.
fn build(
    dom: &Dom,
    node: DomHandle,
    range: Option<&DomRange>,
    options: &CreateOptions,
    value: &mut Value,
    selection: &mut Selection,
) {
    for (index, child) in dom.children(node).iter().copied().enumerate() {
        // Removed subtrees contribute nothing and resolve nothing.
        if let DomNode::Element(element) = dom.get_node(child) {
            if options.remove_node(element) {
                continue;
            }
        }

        // A start boundary given as "child index k of this element"
        // resolves to the accumulated length when child k comes up.
        if let Some(range) = range {
            if range.start.container == node && range.start.offset == index {
                selection.start = Some(Anchor::Offset(value.text.len()));
            }
        }
        // An end boundary exactly past this child expands to the
        // child's ending offset.
        let expand_end = range.is_some_and(|range| {
            range.end.container == node && range.end.offset == index + 1
        });

        match dom.get_node(child) {
            DomNode::Document(_) => {}
            DomNode::Text(text_node) => {
                let raw = text_node.content();
                if let Some(range) = range {
                    if range.start.container == child {
                        selection.start = Some(Anchor::Offset(
                            value.text.len()
                                + filtered_prefix_len(
                                    options,
                                    raw,
                                    range.start.offset,
                                ),
                        ));
                    }
                    if range.end.container == child {
                        selection.end = Some(Anchor::Offset(
                            value.text.len()
                                + filtered_prefix_len(
                                    options,
                                    raw,
                                    range.end.offset,
                                ),
                        ));
                    }
                }

                let filtered = Utf16String::from_str(&options.filter(raw));
                if expand_end {
                    selection.end = Some(Anchor::Offset(
                        value.text.len() + filtered.len(),
                    ));
                }
                value
                    .formats
                    .extend(std::iter::repeat_with(|| None).take(filtered.len()));
                value.text.push_utfstr(&filtered);
            }
            DomNode::Element(element) => {
                if let Some(range) = range {
                    if range.end.container == node
                        && range.end.offset == index
                    {
                        selection.end =
                            Some(Anchor::Offset(value.text.len()));
                    }
                }

                if element.tag().eq_ignore_ascii_case("br") {
                    // The boundary just past a break resolves before the
                    // newline it contributes.
                    if expand_end {
                        selection.end =
                            Some(Anchor::Offset(value.text.len()));
                    }
                    if !options.unwrap_node(element) {
                        value.formats.push(None);
                        value.text.push('\n');
                    }
                    continue;
                }

                let format = if options.unwrap_node(element) {
                    None
                } else {
                    Some(build_format(element, options))
                };

                let mut inner = Value::new();
                let mut inner_selection = Selection::new();
                build(
                    dom,
                    child,
                    range,
                    options,
                    &mut inner,
                    &mut inner_selection,
                );

                if expand_end {
                    selection.end = Some(Anchor::Offset(
                        value.text.len() + inner.text.len(),
                    ));
                }

                // A formatting wrapper with no content and no attributes
                // carries no meaning.
                if inner.is_empty()
                    && format
                        .as_ref()
                        .is_some_and(|format| format.attributes.is_none())
                {
                    continue;
                }

                let start = value.text.len();
                let is_object = inner.text.is_empty()
                    && format
                        .as_ref()
                        .is_some_and(|format| format.attributes.is_some());

                if is_object {
                    let mut format = format
                        .expect("object elements always carry a format");
                    format.object = true;
                    place_object(value, start, Rc::new(format));
                } else {
                    append_merged(value, format.map(Rc::new), inner, start);
                }

                if let Some(Anchor::Offset(offset)) = inner_selection.start {
                    selection.start = Some(Anchor::Offset(start + offset));
                }
                if let Some(Anchor::Offset(offset)) = inner_selection.end {
                    selection.end = Some(Anchor::Offset(start + offset));
                }
            }
        }
    }
}

fn build_format(element: &ElementNode, options: &CreateOptions) -> Format {
    let attributes: Vec<(String, String)> = element
        .attrs()
        .iter()
        .filter(|(name, _value)| !options.remove_attribute(name))
        .cloned()
        .collect();
    Format {
        tag: element.tag().to_ascii_lowercase(),
        attributes: if attributes.is_empty() {
            None
        } else {
            Some(attributes)
        },
        object: false,
    }
}

/// Attach an object element's format at `start`, ahead of any formats
/// already accumulated there, so the object sorts before enclosing
/// formats when slots merge during the recursion back up.
fn place_object(value: &mut Value, start: usize, format: Rc<Format>) {
    if value.formats.len() <= start {
        value.formats.resize_with(start + 1, || None);
    }
    match &mut value.formats[start] {
        Some(list) => list.insert(0, format),
        slot @ None => *slot = Some(vec![format]),
    }
}

/// Append `inner`'s text and layer `format` outside the formats it
/// accumulated. Slots are merged from the last position backwards.
fn append_merged(
    value: &mut Value,
    format: Option<Rc<Format>>,
    inner: Value,
    start: usize,
) {
    value.text.push_utfstr(&inner.text);

    let needed = start + inner.formats.len();
    if value.formats.len() < needed {
        value.formats.resize_with(needed, || None);
    }

    let mut inner_formats = inner.formats;
    for offset in (0..inner_formats.len()).rev() {
        let index = start + offset;
        if let Some(format) = &format {
            match &mut value.formats[index] {
                Some(list) => list.push(Rc::clone(format)),
                slot @ None => *slot = Some(vec![Rc::clone(format)]),
            }
        }
        if let Some(inner_list) = inner_formats[offset].take() {
            match &mut value.formats[index] {
                Some(list) => list.extend(inner_list),
                slot @ None => *slot = Some(inner_list),
            }
        }
    }
}

/// The filtered UTF-16 length of the first `offset` code units of a raw
/// text node, used to map host offsets onto filtered text.
fn filtered_prefix_len(
    options: &CreateOptions,
    raw: &str,
    offset: usize,
) -> usize {
    let units: Vec<u16> = raw.encode_utf16().collect();
    let prefix = String::from_utf16_lossy(&units[..offset.min(units.len())]);
    options.filter(&prefix).encode_utf16().count()
}
