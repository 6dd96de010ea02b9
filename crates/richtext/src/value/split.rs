// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use widestring::Utf16String;

use super::Value;

impl Value {
    /// Cut out `[start, end)` and return the two remaining halves:
    /// `[0, start)` and `[end, len)`.
    pub fn split_at(&self, start: usize, end: usize) -> (Value, Value) {
        self.assert_span(start, end);
        (
            Value {
                text: self.text[..start].to_owned(),
                formats: self.formats[..start].to_vec(),
            },
            Value {
                text: self.text[end..].to_owned(),
                formats: self.formats[end..].to_vec(),
            },
        )
    }

    /// Split on every occurrence of `separator`, producing the pieces
    /// in order. Each piece's formats are recomputed from its absolute
    /// offsets; the separators' own positions are discarded.
    pub fn split(&self, separator: &str) -> Vec<Value> {
        let separator = Utf16String::from_str(separator);
        let mut pieces = Vec::new();
        let mut next_start = 0;
        loop {
            let found = find_sub(
                self.text.as_slice(),
                separator.as_slice(),
                next_start,
            );
            let piece_end = found.unwrap_or(self.text.len());
            pieces.push(Value {
                text: self.text[next_start..piece_end].to_owned(),
                formats: self.formats[next_start..piece_end].to_vec(),
            });
            match found {
                Some(at) => next_start = at + separator.len(),
                None => break,
            }
        }
        pieces
    }
}

/// Find `needle` in `haystack` at or after `from`.
fn find_sub(haystack: &[u16], needle: &[u16], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len())
        .find(|&at| &haystack[at..at + needle.len()] == needle)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::format::Format;

    use super::*;

    fn fixture() -> (Value, Rc<Format>) {
        let em = Rc::new(Format::new("em"));
        let mut value = Value::from("one two three");
        value.apply_format(&em, 4, 7);
        (value, em)
    }

    #[test]
    fn split_at_cuts_out_the_span() {
        let (value, em) = fixture();

        let (first, second) = value.split_at(6, 6);

        assert_eq!(first.text.to_string(), "one tw");
        assert_eq!(first.formats[4], Some(vec![em.clone()]));
        assert_eq!(first.formats[5], Some(vec![em.clone()]));
        assert_eq!(second.text.to_string(), "o three");
        assert_eq!(second.formats[0], Some(vec![em]));
        assert_eq!(second.formats[1..], vec![None; 6]);
    }

    #[test]
    fn split_at_discards_the_cut_span() {
        let (value, _em) = fixture();

        let (first, second) = value.split_at(3, 8);

        assert_eq!(first.text.to_string(), "one");
        assert_eq!(second.text.to_string(), "three");
        assert_eq!(first.formats, vec![None; 3]);
        assert_eq!(second.formats, vec![None; 5]);
    }

    #[test]
    fn split_produces_pieces_with_recomputed_formats() {
        let (value, em) = fixture();

        let pieces = value.split(" ");

        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0].text.to_string(), "one");
        assert_eq!(pieces[0].formats, vec![None; 3]);
        assert_eq!(pieces[1].text.to_string(), "two");
        assert_eq!(
            pieces[1].formats,
            vec![
                Some(vec![em.clone()]),
                Some(vec![em.clone()]),
                Some(vec![em]),
            ]
        );
        assert_eq!(pieces[2].text.to_string(), "three");
        assert_eq!(pieces[2].formats, vec![None; 5]);
    }

    #[test]
    fn split_without_a_match_returns_one_piece() {
        let value = Value::from("one");
        let pieces = value.split(",");
        assert_eq!(pieces, vec![value]);
    }

    #[test]
    fn split_with_a_trailing_separator_yields_an_empty_piece() {
        let pieces = Value::from("a ").split(" ");
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].text.to_string(), "a");
        assert!(pieces[1].is_empty());
    }

    #[test]
    fn splitting_an_empty_value_yields_one_empty_piece() {
        assert_eq!(Value::new().split(" "), vec![Value::new()]);
    }

    #[test]
    #[should_panic(expected = "outside the text")]
    fn split_at_past_the_end_is_rejected() {
        Value::new().split_at(6, 6);
    }
}
