// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Model code for rich text values.
//!
//! A [`Value`] represents styled text as a sequence of UTF-16 code
//! units paired with a per-position stack of overlapping inline
//! [`Format`]s. Values are built from a markup tree and a boundary
//! description by [`create`], and edited through pure structural
//! operators (`slice`, `split`, `insert`, …) and format operators
//! (`apply_format`, `remove_format`, …) that preserve format identity
//! and offset correctness.
//!
//! Every position spanned by one source element holds the *same*
//! [`Format`] instance (an [`std::rc::Rc`]); consumers detect run
//! boundaries by pointer identity rather than deep comparison, and the
//! collapsed form of `remove_format` relies on it to un-format the
//! whole run under the caret.
//!
//! Rendering and serialization back to markup are out of scope.

pub mod create;
pub mod dom;
mod format;
mod record;
mod selection;
mod value;

pub use create::{create, create_from_html, create_value, CreateOptions};
pub use dom::{
    Dom, DomCreationError, DomHandle, DomNode, DomPoint, DomRange,
    ElementNode, TextNode,
};
pub use format::{Format, FormatList};
pub use record::{Content, Record};
pub use selection::{Anchor, Selection};
pub use value::{concat, join, Replaced, Value};
