// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use regex::{Captures, Regex};
use widestring::Utf16String;

use crate::format::FormatList;

use super::Value;

/// The outcome of a [`Value::replace_with`] callback: plain replacement
/// text, or a full text-plus-formats fragment.
pub enum Replaced {
    Text(String),
    Value(Value),
}

impl Value {
    /// Replace every non-overlapping match of `pattern` with
    /// `replacement`, left to right. The replacement is taken verbatim;
    /// its positions inherit the format list found at each match's
    /// first position.
    pub fn replace(&self, pattern: &Regex, replacement: &str) -> Value {
        self.replace_with(pattern, |_captures: &Captures| {
            Replaced::Text(replacement.to_owned())
        })
    }

    /// Replace every match of `pattern` with a fragment whose formats
    /// are copied verbatim.
    pub fn replace_with_value(
        &self,
        pattern: &Regex,
        replacement: &Value,
    ) -> Value {
        self.replace_with(pattern, |_captures: &Captures| {
            Replaced::Value(replacement.clone())
        })
    }

    /// Replace every match of `pattern` with the result of `replacer`,
    /// applied per match in left-to-right order. The callback receives
    /// the match's capture groups.
    pub fn replace_with<F>(&self, pattern: &Regex, mut replacer: F) -> Value
    where
        F: FnMut(&Captures) -> Replaced,
    {
        let source = self.text.to_string();
        let mut text = Utf16String::new();
        let mut formats: Vec<Option<FormatList>> = Vec::new();
        // Cursor into the original formats, in UTF-16 code units,
        // tracking `last_byte`.
        let mut cursor = 0;
        let mut last_byte = 0;

        for captures in pattern.captures_iter(&source) {
            let matched =
                captures.get(0).expect("whole-match group always exists");

            // Zero-length matches replace nothing.
            if matched.start() == matched.end() {
                continue;
            }

            // Copy everything between the previous match and this one.
            let gap = &source[last_byte..matched.start()];
            let gap_len = gap.encode_utf16().count();
            text.push_utfstr(&Utf16String::from_str(gap));
            formats
                .extend_from_slice(&self.formats[cursor..cursor + gap_len]);
            cursor += gap_len;

            let match_len = matched.as_str().encode_utf16().count();
            match replacer(&captures) {
                Replaced::Text(new_text) => {
                    let inherited =
                        self.formats.get(cursor).cloned().unwrap_or(None);
                    let new_len = new_text.encode_utf16().count();
                    text.push_utfstr(&Utf16String::from_str(&new_text));
                    formats.extend(
                        std::iter::repeat_with(|| inherited.clone())
                            .take(new_len),
                    );
                }
                Replaced::Value(fragment) => {
                    text.push_utfstr(&fragment.text);
                    formats.extend(fragment.formats);
                }
            }
            cursor += match_len;
            last_byte = matched.end();
        }

        text.push_utfstr(&Utf16String::from_str(&source[last_byte..]));
        formats.extend_from_slice(&self.formats[cursor..]);

        let value = Value { text, formats };
        value.check_invariants();
        value
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::format::Format;

    use super::*;

    #[test]
    fn literal_replacement_inherits_the_first_matched_format() {
        let em = Rc::new(Format::new("em"));
        let mut value = Value::from("one two three");
        value.apply_format(&em, 4, 7);

        let result = value.replace(&Regex::new("two").unwrap(), "2");

        assert_eq!(result.text.to_string(), "one 2 three");
        let mut expected = vec![None; 11];
        expected[4] = Some(vec![em]);
        assert_eq!(result.formats, expected);
    }

    #[test]
    fn fragment_replacement_copies_its_formats_verbatim() {
        let em = Rc::new(Format::new("em"));
        let mut value = Value::from("one two three");
        value.apply_format(&em, 4, 7);

        let result = value
            .replace_with_value(&Regex::new("two").unwrap(), &Value::from("2"));

        assert_eq!(result.text.to_string(), "one 2 three");
        assert_eq!(result.formats, vec![None; 11]);
    }

    #[test]
    fn callback_replacement_sees_the_capture_groups() {
        let value = Value::from("abc12345#$*%");

        let result = value.replace_with(
            &Regex::new(r"([^\d]*)(\d*)([^\w]*)").unwrap(),
            |captures: &Captures| {
                Replaced::Text(format!(
                    "{} - {} - {}",
                    &captures[1], &captures[2], &captures[3]
                ))
            },
        );

        assert_eq!(result.text.to_string(), "abc - 12345 - #$*%");
        assert_eq!(result.formats, vec![None; 18]);
    }

    #[test]
    fn every_match_is_replaced_left_to_right() {
        let value = Value::from("a-b-c");

        let result = value.replace(&Regex::new("-").unwrap(), " / ");

        assert_eq!(result.text.to_string(), "a / b / c");
        assert_eq!(result.formats, vec![None; 9]);
    }
}
