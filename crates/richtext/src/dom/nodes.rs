// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use html5ever::QualName;

/// Address of a node inside a [`Dom`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomHandle(pub(crate) usize);

#[derive(Clone, Debug, PartialEq)]
pub enum DomNode {
    Document(DocumentNode),
    Element(ElementNode),
    Text(TextNode),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentNode {
    pub(crate) children: Vec<DomHandle>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElementNode {
    pub(crate) name: QualName,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<DomHandle>,
}

impl ElementNode {
    /// The element's tag name as parsed (lowercase for HTML input).
    pub fn tag(&self) -> &str {
        self.name.local.as_ref()
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _v)| n == name)
            .map(|(_n, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    pub(crate) content: String,
}

impl TextNode {
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// The input tree: all nodes owned in a single list, parents referring
/// to their children by handle.
#[derive(Clone, Debug, PartialEq)]
pub struct Dom {
    pub(crate) nodes: Vec<DomNode>,
    pub(crate) document_handle: DomHandle,
}

impl Dom {
    pub fn new() -> Self {
        Self {
            nodes: vec![DomNode::Document(DocumentNode::default())],
            document_handle: DomHandle(0),
        }
    }

    pub fn document_handle(&self) -> DomHandle {
        self.document_handle
    }

    /// The fragment root. Parsing wraps top-level content in a
    /// synthetic `html` element; conversion starts from there.
    pub fn root(&self) -> DomHandle {
        self.children(self.document_handle)
            .iter()
            .copied()
            .find(|handle| matches!(self.get_node(*handle), DomNode::Element(_)))
            .unwrap_or(self.document_handle)
    }

    pub fn get_node(&self, handle: DomHandle) -> &DomNode {
        &self.nodes[handle.0]
    }

    pub(crate) fn get_mut_node(&mut self, handle: DomHandle) -> &mut DomNode {
        &mut self.nodes[handle.0]
    }

    pub(crate) fn add_node(&mut self, node: DomNode) -> DomHandle {
        self.nodes.push(node);
        DomHandle(self.nodes.len() - 1)
    }

    pub(crate) fn name_of(&self, handle: DomHandle) -> &QualName {
        match self.get_node(handle) {
            DomNode::Element(element) => &element.name,
            _ => panic!("Tag name requested for a non-element node"),
        }
    }

    pub fn children(&self, handle: DomHandle) -> &[DomHandle] {
        match self.get_node(handle) {
            DomNode::Document(node) => &node.children,
            DomNode::Element(node) => &node.children,
            DomNode::Text(_) => &[],
        }
    }

    pub fn child(&self, handle: DomHandle, index: usize) -> Option<DomHandle> {
        self.children(handle).get(index).copied()
    }

    pub fn first_child(&self, handle: DomHandle) -> Option<DomHandle> {
        self.child(handle, 0)
    }

    pub fn last_child(&self, handle: DomHandle) -> Option<DomHandle> {
        self.children(handle).last().copied()
    }

    /// Depth-first search below the fragment root for the first element
    /// with the given tag name.
    pub fn find_element(&self, tag: &str) -> Option<DomHandle> {
        fn walk(dom: &Dom, handle: DomHandle, tag: &str) -> Option<DomHandle> {
            for child in dom.children(handle) {
                if let DomNode::Element(element) = dom.get_node(*child) {
                    if element.tag() == tag {
                        return Some(*child);
                    }
                }
                if let Some(found) = walk(dom, *child, tag) {
                    return Some(found);
                }
            }
            None
        }
        walk(self, self.root(), tag)
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
