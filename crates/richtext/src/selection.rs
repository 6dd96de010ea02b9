// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

/// One selection boundary.
///
/// Single-block values address positions with a flat UTF-16 code unit
/// offset. Multiline values address them with a block path: the block
/// index plus, when the boundary sits inside the block's text, an
/// offset within that block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Offset(usize),
    Block {
        block: usize,
        /// `None` when the boundary sits at the block's edge rather
        /// than inside its text.
        offset: Option<usize>,
    },
}

impl Anchor {
    /// The flat offset of this anchor.
    ///
    /// Panics on a block path; single-block operators require flat
    /// offsets.
    pub fn offset(&self) -> usize {
        match self {
            Anchor::Offset(offset) => *offset,
            Anchor::Block { .. } => {
                panic!("Block path used where a flat offset is required")
            }
        }
    }
}

/// A pair of boundaries into a value's text. Absent fields mean no
/// boundary is known on that side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: Option<Anchor>,
    pub end: Option<Anchor>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_offsets(start: usize, end: usize) -> Self {
        Self {
            start: Some(Anchor::Offset(start)),
            end: Some(Anchor::Offset(end)),
        }
    }

    pub fn collapsed(offset: usize) -> Self {
        Self::from_offsets(offset, offset)
    }

    pub fn is_unset(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub(crate) fn start_offset(&self) -> Option<usize> {
        self.start.map(|anchor| anchor.offset())
    }

    pub(crate) fn end_offset(&self) -> Option<usize> {
        self.end.map(|anchor| anchor.offset())
    }
}
