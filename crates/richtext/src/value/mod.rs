// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The rich text value itself, plus the pure transformations over it.
//!
//! All offsets are UTF-16 code units, consistent with the rest of the
//! crate's API surface.

mod apply_format;
mod concat;
mod insert;
mod remove_format;
mod replace;
mod slice;
mod split;

pub use concat::{concat, join};
pub use replace::Replaced;

use widestring::Utf16String;

use crate::format::FormatList;

/// Styled text: a sequence of UTF-16 code units paired with a
/// per-position stack of overlapping inline formats.
///
/// `formats` runs parallel to `text`: slot `i` holds the format stack
/// covering code unit `i`. A `None` slot is a hole — no format applies
/// there. Holes are distinct from empty lists, which are never stored.
///
/// A zero-width object element occupies one format slot without
/// contributing text, so `formats` may run past the end of `text` where
/// an object sits at a position no character covers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Value {
    pub text: Utf16String,
    pub formats: Vec<Option<FormatList>>,
}

impl Value {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of the text in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the value holds no content at all.
    ///
    /// A lone object element has empty text but one occupied format
    /// slot, so it is correctly reported as non-empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.formats.is_empty()
    }

    /// Check the structural invariants, panicking on violation: the
    /// format sequence covers the text, and holes are stored as holes
    /// rather than empty lists.
    pub fn assert_invariants(&self) {
        assert!(
            self.formats.len() >= self.text.len(),
            "formats ({}) must cover the text ({})",
            self.formats.len(),
            self.text.len(),
        );
        assert!(
            self.formats
                .iter()
                .all(|slot| slot.as_ref().is_none_or(|list| !list.is_empty())),
            "an empty format list must be stored as a hole",
        );
    }

    pub(crate) fn check_invariants(&self) {
        #[cfg(feature = "assert-invariants")]
        self.assert_invariants();
    }

    /// Validate a span against this value's text. Spans running
    /// backwards, past the end of the text, or through the middle of a
    /// surrogate pair are contract violations.
    pub(crate) fn assert_span(&self, start: usize, end: usize) {
        assert!(start <= end, "span start {start} is past its end {end}");
        assert!(
            end <= self.text.len(),
            "span end {end} is outside the text (length {})",
            self.text.len(),
        );
        assert!(
            self.text.is_char_boundary(start)
                && self.text.is_char_boundary(end),
            "span [{start}, {end}) splits a multi-unit character",
        );
    }
}

/// A plain string becomes unformatted text: one hole per code unit.
impl From<&str> for Value {
    fn from(text: &str) -> Self {
        let text = Utf16String::from_str(text);
        let formats = vec![None; text.len()];
        Self { text, formats }
    }
}
