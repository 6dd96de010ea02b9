// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! A value paired with its selection, and the operators that keep the
//! two consistent while the host edits.
//!
//! The record-level operators take optional bounds defaulting to the
//! current selection, mirroring how hosts invoke them: explicit offsets
//! when dispatching a structural edit, no offsets when acting on
//! whatever the user has selected.

use std::rc::Rc;

use regex::{Captures, Regex};
use widestring::Utf16String;

use crate::format::Format;
use crate::selection::{Anchor, Selection};
use crate::value::{Replaced, Value};

/// The content of a [`Record`]: one block, or the ordered block
/// sequence of a multiline value.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Single(Value),
    Multiline(Vec<Value>),
}

impl Content {
    /// The single-block value.
    ///
    /// Panics when the content is multiline; the single-block operators
    /// document this as a precondition.
    pub fn single(&self) -> &Value {
        match self {
            Content::Single(value) => value,
            Content::Multiline(_) => {
                panic!("Operation requires a single-block value")
            }
        }
    }

    fn single_mut(&mut self) -> &mut Value {
        match self {
            Content::Single(value) => value,
            Content::Multiline(_) => {
                panic!("Operation requires a single-block value")
            }
        }
    }

    /// The block sequence of a multiline value.
    pub fn blocks(&self) -> &[Value] {
        match self {
            Content::Single(_) => {
                panic!("Operation requires a multiline value")
            }
            Content::Multiline(values) => values,
        }
    }
}

/// A value plus the selection boundaries resolved against it.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub value: Content,
    pub selection: Selection,
}

impl Record {
    pub fn new(value: Value, selection: Selection) -> Self {
        Self {
            value: Content::Single(value),
            selection,
        }
    }

    fn span_or_selection(
        &self,
        start: Option<usize>,
        end: Option<usize>,
    ) -> (Option<usize>, Option<usize>) {
        (
            start.or_else(|| self.selection.start_offset()),
            end.or_else(|| self.selection.end_offset()),
        )
    }

    /// Apply `format` over `[start, end)`, defaulting to the current
    /// selection. Without bounds and without a selection this is a
    /// no-op. The selection is left untouched.
    pub fn apply_format(
        &mut self,
        format: &Rc<Format>,
        start: Option<usize>,
        end: Option<usize>,
    ) {
        let (start, end) = self.span_or_selection(start, end);
        if let (Some(start), Some(end)) = (start, end) {
            self.value.single_mut().apply_format(format, start, end);
        }
    }

    /// Remove entries of `tag` over `[start, end)`, defaulting to the
    /// current selection; a collapsed span strips the whole run under
    /// the caret. The selection is left untouched.
    pub fn remove_format(
        &mut self,
        tag: &str,
        start: Option<usize>,
        end: Option<usize>,
    ) {
        let (start, end) = self.span_or_selection(start, end);
        if let (Some(start), Some(end)) = (start, end) {
            self.value.single_mut().remove_format(tag, start, end);
        }
    }

    /// Splice `to_insert` over `[start, end)` (defaulting to the
    /// selection) and collapse the selection to a caret just after the
    /// inserted text.
    pub fn insert(
        &self,
        to_insert: &Value,
        start: Option<usize>,
        end: Option<usize>,
    ) -> Record {
        let (start, end) = self.span_or_selection(start, end);
        let start = start.expect("insert requires a start bound or a selection");
        let end = end.expect("insert requires an end bound or a selection");
        Record {
            value: Content::Single(
                self.value.single().insert(to_insert, start, end),
            ),
            selection: Selection::collapsed(start + to_insert.text.len()),
        }
    }

    /// Delete `[start, end)`, defaulting to the selection; the cursor
    /// lands where the deleted span began.
    pub fn remove(&self, start: Option<usize>, end: Option<usize>) -> Record {
        self.insert(&Value::new(), start, end)
    }

    /// Copy out `[start, end)`, defaulting to the selection. Without
    /// any bounds the record is returned unchanged; otherwise the
    /// result's selection is cleared.
    pub fn slice(&self, start: Option<usize>, end: Option<usize>) -> Record {
        let (start, end) = self.span_or_selection(start, end);
        let (Some(start), Some(end)) = (start, end) else {
            return self.clone();
        };
        Record {
            value: Content::Single(self.value.single().slice(start, end)),
            selection: Selection::new(),
        }
    }

    /// Cut out `[start, end)` (defaulting to the selection) and return
    /// the two remaining halves. The first half carries an empty
    /// selection; the second a caret collapsed at its own start,
    /// modelling "cursor lands after the cut".
    pub fn split_at(
        &self,
        start: Option<usize>,
        end: Option<usize>,
    ) -> (Record, Record) {
        let (start, end) = self.span_or_selection(start, end);
        let start =
            start.expect("split_at requires a start bound or a selection");
        let end = end.expect("split_at requires an end bound or a selection");
        let (first, second) = self.value.single().split_at(start, end);
        (
            Record {
                value: Content::Single(first),
                selection: Selection::new(),
            },
            Record {
                value: Content::Single(second),
                selection: Selection::collapsed(0),
            },
        )
    }

    /// Split on `separator`, remapping the absolute selection onto each
    /// piece. A boundary strictly inside a piece becomes a local
    /// offset; a boundary on a piece/separator junction is pushed onto
    /// the neighbouring piece; pieces the selection does not touch get
    /// an empty selection.
    pub fn split(&self, separator: &str) -> Vec<Record> {
        let sel_start = self.selection.start_offset();
        let sel_end = self.selection.end_offset();
        let separator_len = Utf16String::from_str(separator).len();

        let mut next_start = 0;
        self.value
            .single()
            .split(separator)
            .into_iter()
            .map(|piece| {
                let mut selection = Selection::new();
                let piece_start = next_start;
                let piece_len = piece.text.len();
                next_start += piece_len + separator_len;

                if let Some(start) = sel_start {
                    if start > piece_start && start < next_start {
                        selection.start =
                            Some(Anchor::Offset(start - piece_start));
                    } else if let Some(end) = sel_end {
                        if start < piece_start && end > piece_start {
                            selection.start = Some(Anchor::Offset(0));
                        }
                    }
                }
                if let Some(end) = sel_end {
                    if end > piece_start && end < next_start {
                        selection.end =
                            Some(Anchor::Offset(end - piece_start));
                    } else if let Some(start) = sel_start {
                        if start < next_start && end > next_start {
                            selection.end = Some(Anchor::Offset(piece_len));
                        }
                    }
                }

                Record {
                    value: Content::Single(piece),
                    selection,
                }
            })
            .collect()
    }

    /// Replace every match of `pattern` with `replacement`. The
    /// selection is cleared.
    pub fn replace(&self, pattern: &Regex, replacement: &str) -> Record {
        Record {
            value: Content::Single(
                self.value.single().replace(pattern, replacement),
            ),
            selection: Selection::new(),
        }
    }

    /// Replace every match of `pattern` with a fragment whose formats
    /// are copied verbatim. The selection is cleared.
    pub fn replace_with_value(
        &self,
        pattern: &Regex,
        replacement: &Value,
    ) -> Record {
        Record {
            value: Content::Single(
                self.value.single().replace_with_value(pattern, replacement),
            ),
            selection: Selection::new(),
        }
    }

    /// Replace every match of `pattern` with the result of `replacer`.
    /// The selection is cleared.
    pub fn replace_with<F>(&self, pattern: &Regex, replacer: F) -> Record
    where
        F: FnMut(&Captures) -> Replaced,
    {
        Record {
            value: Content::Single(
                self.value.single().replace_with(pattern, replacer),
            ),
            selection: Selection::new(),
        }
    }

    /// The format entry of the given tag at the selection start, if
    /// any.
    pub fn get_active_format(&self, tag: &str) -> Option<Rc<Format>> {
        let start = self.selection.start_offset()?;
        let list = self.value.single().formats.get(start)?.as_ref()?;
        list.iter().find(|format| format.tag == tag).cloned()
    }

    /// The selected text. Multiline values have no flat text to slice,
    /// so they yield an empty string.
    pub fn get_selected_text(&self) -> String {
        let Content::Single(value) = &self.value else {
            return String::new();
        };
        let start = self.selection.start_offset().unwrap_or(0);
        let end = self.selection.end_offset().unwrap_or(value.text.len());
        value.text[start..end].to_string()
    }

    /// Whether the record holds no content at all.
    pub fn is_empty(&self) -> bool {
        match &self.value {
            Content::Single(value) => value.is_empty(),
            Content::Multiline(values) => {
                values.iter().all(|value| value.is_empty())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn em() -> Rc<Format> {
        Rc::new(Format::new("em"))
    }

    fn record_with_em(selection: Selection) -> (Record, Rc<Format>) {
        let em = em();
        let mut value = Value::from("one two three");
        value.apply_format(&em, 4, 7);
        (Record::new(value, selection), em)
    }

    #[test]
    fn apply_format_defaults_to_the_selection() {
        let strong = Rc::new(Format::new("strong"));
        let (mut record, em) =
            record_with_em(Selection::from_offsets(3, 6));

        record.apply_format(&strong, None, None);

        let value = record.value.single();
        assert_eq!(value.formats[3], Some(vec![strong.clone()]));
        assert_eq!(value.formats[4], Some(vec![em.clone(), strong.clone()]));
        assert_eq!(value.formats[5], Some(vec![em.clone(), strong]));
        assert_eq!(value.formats[6], Some(vec![em]));
        assert_eq!(record.selection, Selection::from_offsets(3, 6));
    }

    #[test]
    fn apply_format_without_bounds_or_selection_is_a_no_op() {
        let strong = Rc::new(Format::new("strong"));
        let (mut record, _em) = record_with_em(Selection::new());
        let before = record.clone();

        record.apply_format(&strong, None, None);

        assert_eq!(record, before);
    }

    #[test]
    fn insert_collapses_the_selection_after_the_fragment() {
        let (record, em) = record_with_em(Selection::collapsed(6));
        let strong = Rc::new(Format::new("strong"));
        let mut to_insert = Value::from("a");
        to_insert.apply_format(&strong, 0, 1);

        let result = record.insert(&to_insert, Some(2), Some(6));

        assert_eq!(result.value.single().text.to_string(), "onao three");
        assert_eq!(
            result.value.single().formats[2],
            Some(vec![strong])
        );
        assert_eq!(result.value.single().formats[3], Some(vec![em]));
        assert_eq!(result.selection, Selection::collapsed(3));
    }

    #[test]
    fn insert_defaults_to_the_selection() {
        let record =
            Record::new(Value::from("tt"), Selection::collapsed(1));

        let result = record.insert(&Value::from("\n"), None, None);

        assert_eq!(result.value.single().text.to_string(), "t\nt");
        assert_eq!(result.selection, Selection::collapsed(2));
    }

    #[test]
    fn slice_defaults_to_the_selection_and_clears_it() {
        let (record, em) = record_with_em(Selection::from_offsets(3, 6));

        let result = record.slice(None, None);

        assert_eq!(result.value.single().text.to_string(), " tw");
        assert_eq!(
            result.value.single().formats,
            vec![None, Some(vec![em.clone()]), Some(vec![em])]
        );
        assert_eq!(result.selection, Selection::new());
    }

    #[test]
    fn slice_without_any_bounds_returns_the_record_unchanged() {
        let (record, _em) = record_with_em(Selection::new());
        assert_eq!(record.slice(None, None), record);
    }

    #[test]
    fn split_at_leaves_the_cursor_after_the_cut() {
        let (record, em) = record_with_em(Selection::from_offsets(5, 10));

        let (first, second) = record.split_at(Some(6), Some(6));

        assert_eq!(first.value.single().text.to_string(), "one tw");
        assert_eq!(first.selection, Selection::new());
        assert_eq!(second.value.single().text.to_string(), "o three");
        assert_eq!(
            second.value.single().formats[0],
            Some(vec![em])
        );
        assert_eq!(second.selection, Selection::collapsed(0));
    }

    #[test]
    fn split_at_defaults_to_the_selection() {
        let (record, _em) = record_with_em(Selection::collapsed(6));

        let (first, second) = record.split_at(None, None);

        assert_eq!(first.value.single().text.to_string(), "one tw");
        assert_eq!(second.value.single().text.to_string(), "o three");
    }

    #[test]
    fn split_remaps_the_selection_onto_each_piece() {
        let em = em();
        let mut value = Value::from("one two three four five");
        value.apply_format(&em, 4, 7);
        let record = Record::new(value, Selection::from_offsets(6, 16));

        let pieces = record.split(" ");

        let selections: Vec<Selection> =
            pieces.iter().map(|piece| piece.selection).collect();
        assert_eq!(
            selections,
            vec![
                Selection::new(),
                Selection::from_offsets(2, 3),
                Selection::from_offsets(0, 5),
                Selection::from_offsets(0, 2),
                Selection::new(),
            ]
        );
        let texts: Vec<String> = pieces
            .iter()
            .map(|piece| piece.value.single().text.to_string())
            .collect();
        assert_eq!(texts, vec!["one", "two", "three", "four", "five"]);
    }

    #[test]
    fn split_keeps_a_span_inside_one_piece_local() {
        let (record, _em) = record_with_em(Selection::from_offsets(5, 6));

        let pieces = record.split(" ");

        assert_eq!(pieces[0].selection, Selection::new());
        assert_eq!(pieces[1].selection, Selection::from_offsets(1, 2));
        assert_eq!(pieces[2].selection, Selection::new());
    }

    #[test]
    fn replace_clears_the_selection() {
        let (record, em) = record_with_em(Selection::collapsed(6));

        let result = record.replace(&Regex::new("two").unwrap(), "2");

        assert_eq!(result.value.single().text.to_string(), "one 2 three");
        assert_eq!(result.value.single().formats[4], Some(vec![em]));
        assert_eq!(result.selection, Selection::new());
    }

    #[test]
    fn get_active_format_reads_the_entry_under_the_selection_start() {
        let (record, em) = record_with_em(Selection::collapsed(5));

        let active = record.get_active_format("em").unwrap();

        assert!(Rc::ptr_eq(&active, &em));
        assert!(record.get_active_format("strong").is_none());
    }

    #[test]
    fn get_active_format_without_a_selection_is_none() {
        let (record, _em) = record_with_em(Selection::new());
        assert!(record.get_active_format("em").is_none());
    }

    #[test]
    fn get_selected_text_slices_the_selection() {
        let (record, _em) = record_with_em(Selection::from_offsets(4, 7));
        assert_eq!(record.get_selected_text(), "two");
    }

    #[test]
    fn get_selected_text_is_empty_for_multiline_values() {
        let record = Record {
            value: Content::Multiline(vec![
                Value::from("one"),
                Value::from("two"),
            ]),
            selection: Selection::new(),
        };
        assert_eq!(record.get_selected_text(), "");
    }

    #[test]
    #[should_panic(expected = "single-block")]
    fn structural_operators_reject_multiline_values() {
        let record = Record {
            value: Content::Multiline(vec![Value::from("one")]),
            selection: Selection::new(),
        };
        record.slice(Some(0), Some(1));
    }

    #[test]
    fn is_empty_considers_every_block() {
        let empty = Record {
            value: Content::Multiline(vec![]),
            selection: Selection::new(),
        };
        assert!(empty.is_empty());
        assert!(Record::new(Value::new(), Selection::new()).is_empty());

        let full = Record {
            value: Content::Multiline(vec![Value::new(), Value::from("x")]),
            selection: Selection::new(),
        };
        assert!(!full.is_empty());
    }
}
