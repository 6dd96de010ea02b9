// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::cell::{Ref, RefCell};
use std::fmt;

use html5ever::interface::NextParserState;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{parse_fragment, Attribute, QualName};

use super::{Dom, DomHandle, DomNode, ElementNode, TextNode};

pub(crate) type DomCreationResult = Result<Dom, DomCreationError>;

/// The tree built so far plus any errors emitted by the parser.
#[derive(Clone, Debug)]
pub struct DomCreationError {
    pub dom: Dom,
    pub parse_errors: Vec<String>,
}

impl DomCreationError {
    pub(crate) fn new() -> Self {
        Self {
            dom: Dom::new(),
            parse_errors: Vec::new(),
        }
    }
}

impl fmt::Display for DomCreationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "Failed to parse the markup fragment: {}",
            self.parse_errors.join(", ")
        )
    }
}

impl std::error::Error for DomCreationError {}

pub(crate) fn qual_name(name: &str) -> QualName {
    QualName::new(None, "".into(), name.into())
}

impl Dom {
    /// Parse an HTML fragment into an input tree.
    ///
    /// Top-level content ends up inside a synthetic `html` element, see
    /// [`Dom::root`].
    pub fn parse(html: &str) -> DomCreationResult {
        DomCreator::parse(html)
    }

    fn create_element(
        &mut self,
        name: QualName,
        attrs: Vec<Attribute>,
    ) -> DomHandle {
        let attrs = attrs
            .iter()
            .map(|attr| {
                (
                    attr.name.local.as_ref().to_owned(),
                    attr.value.as_ref().to_owned(),
                )
            })
            .collect();
        self.add_node(DomNode::Element(ElementNode {
            name,
            attrs,
            children: Vec::new(),
        }))
    }
}

pub(crate) struct DomCreator {
    state: RefCell<DomCreationError>,
}

impl DomCreator {
    pub(crate) fn parse(html: &str) -> DomCreationResult {
        let mut opts = html5ever::driver::ParseOpts::default();
        opts.tree_builder.exact_errors = true;
        parse_fragment(
            DomCreator::default(),
            opts,
            qual_name(""),
            vec![],
        )
        .from_utf8()
        .one(html.as_bytes())
    }
}

impl Default for DomCreator {
    fn default() -> Self {
        Self {
            state: RefCell::new(DomCreationError::new()),
        }
    }
}

impl TreeSink for DomCreator {
    type Handle = DomHandle;
    type Output = DomCreationResult;
    type ElemName<'a> = Ref<'a, QualName>;

    fn finish(self) -> Self::Output {
        let state = self.state.into_inner();
        if state.parse_errors.is_empty() {
            Ok(state.dom)
        } else {
            Err(state)
        }
    }

    fn parse_error(&self, msg: std::borrow::Cow<'static, str>) {
        self.state.borrow_mut().parse_errors.push(String::from(msg));
    }

    fn get_document(&self) -> Self::Handle {
        self.state.borrow().dom.document_handle()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        Ref::map(self.state.borrow(), |state| state.dom.name_of(*target))
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        self.state.borrow_mut().dom.create_element(name, attrs)
    }

    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        todo!("Comments not yet supported")
    }

    fn create_pi(
        &self,
        _target: StrTendril,
        _data: StrTendril,
    ) -> Self::Handle {
        todo!("create_pi not yet supported")
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let dom = &mut self.state.borrow_mut().dom;
        match child {
            NodeOrText::AppendNode(child) => match dom.get_mut_node(*parent) {
                DomNode::Document(p) => p.children.push(child),
                DomNode::Element(p) => p.children.push(child),
                DomNode::Text(_) => {
                    panic!("Appending node to text! {:?}", parent)
                }
            },
            NodeOrText::AppendText(tendril) => {
                // Consecutive text lands in one node.
                let text_handle = match dom.get_node(*parent) {
                    DomNode::Document(_) => None,
                    DomNode::Text(_) => Some(*parent),
                    DomNode::Element(ElementNode { children, .. }) => {
                        match children
                            .last()
                            .map(|handle| (*handle, dom.get_node(*handle)))
                        {
                            Some((last_child, DomNode::Text(_))) => {
                                Some(last_child)
                            }
                            _ => None,
                        }
                    }
                };

                if let Some(text_handle) = text_handle {
                    if let DomNode::Text(text) = dom.get_mut_node(text_handle)
                    {
                        text.content += tendril.as_ref();
                    } else {
                        unreachable!(
                            "`text_handle` must map to a `DomNode::Text`"
                        )
                    }
                } else {
                    let new_handle = dom.add_node(DomNode::Text(TextNode {
                        content: tendril.as_ref().to_owned(),
                    }));

                    match dom.get_mut_node(*parent) {
                        DomNode::Document(p) => p.children.push(new_handle),
                        DomNode::Element(p) => p.children.push(new_handle),
                        DomNode::Text(_) => {
                            panic!("parent changed from element to text!")
                        }
                    }
                }
            }
        };
    }

    fn append_based_on_parent_node(
        &self,
        _element: &Self::Handle,
        _prev_element: &Self::Handle,
        _child: NodeOrText<Self::Handle>,
    ) {
        todo!("append_based_on_parent_node not yet supported")
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        todo!("append_doctype_to_document not yet supported")
    }

    fn mark_script_already_started(&self, _node: &Self::Handle) {
        todo!()
    }

    fn pop(&self, _node: &Self::Handle) {
        // Nothing to do here for now
    }

    fn get_template_contents(&self, _target: &Self::Handle) -> Self::Handle {
        todo!("get_template_contents not yet supported")
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {
        // Nothing to do here for now
    }

    fn append_before_sibling(
        &self,
        _sibling: &Self::Handle,
        _new_node: NodeOrText<Self::Handle>,
    ) {
        todo!("append_before_sibling not yet supported")
    }

    fn add_attrs_if_missing(
        &self,
        target: &Self::Handle,
        attrs: Vec<Attribute>,
    ) {
        let dom = &mut self.state.borrow_mut().dom;
        let node = dom.get_mut_node(*target);
        if let DomNode::Element(node) = node {
            let to_add: Vec<(String, String)> = attrs
                .iter()
                .filter_map(|attr| {
                    let attr_name = attr.name.local.as_ref();
                    if node.attrs.iter().any(|(name, _)| name == attr_name) {
                        None
                    } else {
                        Some((
                            attr_name.to_owned(),
                            attr.value.as_ref().to_owned(),
                        ))
                    }
                })
                .collect();
            node.attrs.extend(to_add);
        } else {
            panic!("Non-element passed to add_attrs_if_missing!");
        }
    }

    fn associate_with_form(
        &self,
        _target: &Self::Handle,
        _form: &Self::Handle,
        _nodes: (&Self::Handle, Option<&Self::Handle>),
    ) {
        todo!()
    }

    fn remove_from_parent(&self, _target: &Self::Handle) {
        todo!("remove_from_parent not yet supported")
    }

    fn reparent_children(
        &self,
        _node: &Self::Handle,
        _new_parent: &Self::Handle,
    ) {
        todo!("reparent_children not yet supported")
    }

    fn is_mathml_annotation_xml_integration_point(
        &self,
        _handle: &Self::Handle,
    ) -> bool {
        todo!("is_mathml_annotation_xml_integration_point not yet supported")
    }

    fn set_current_line(&self, _line_number: u64) {
        // Nothing to do here for now
    }

    fn complete_script(&self, _node: &Self::Handle) -> NextParserState {
        todo!("complete_script not yet supported")
    }

    fn allow_declarative_shadow_roots(
        &self,
        _intended_parent: &Self::Handle,
    ) -> bool {
        todo!("allow_declarative_shadow_roots not yet supported")
    }

    fn attach_declarative_shadow(
        &self,
        _location: &Self::Handle,
        _template: &Self::Handle,
        _attrs: Vec<Attribute>,
    ) -> Result<(), String> {
        todo!("attach_declarative_shadow not yet supported")
    }
}
