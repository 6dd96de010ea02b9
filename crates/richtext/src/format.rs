// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::rc::Rc;

/// The format stack attached to one text position, outermost markup
/// element first.
///
/// Lists are cloned and moved freely between values, but every position
/// spanned by one source element holds a clone of the *same*
/// [`Rc<Format>`]. Consumers detect run boundaries with
/// [`Rc::ptr_eq`] instead of deep comparison, so a `Format` must never
/// be mutated once it has been shared.
pub type FormatList = Vec<Rc<Format>>;

/// One markup element's contribution to the formatting of the positions
/// it spans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Format {
    /// Lowercase tag name of the source element.
    pub tag: String,
    /// Attributes surviving attribute filtering, in source order.
    /// `None` when the element carried no (surviving) attributes.
    pub attributes: Option<Vec<(String, String)>>,
    /// Marks a zero-width inline element (e.g. an embedded image) that
    /// occupies a format slot without contributing text.
    pub object: bool,
}

impl Format {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes: None,
            object: false,
        }
    }

    pub fn with_attributes(tag: &str, attributes: &[(&str, &str)]) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes: Some(
                attributes
                    .iter()
                    .map(|&(name, value)| (name.to_owned(), value.to_owned()))
                    .collect(),
            ),
            object: false,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .as_ref()?
            .iter()
            .find(|(n, _v)| n == name)
            .map(|(_n, v)| v.as_str())
    }
}

/// Find the entry with the given tag in a format list.
pub(crate) fn find_tag<'a>(
    list: &'a FormatList,
    tag: &str,
) -> Option<&'a Rc<Format>> {
    list.iter().find(|format| format.tag == tag)
}
