// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::Value;

impl Value {
    /// Splice `to_insert` over the half-open span `[start, end)`,
    /// replacing that span's text and formats.
    pub fn insert(&self, to_insert: &Value, start: usize, end: usize) -> Value {
        self.assert_span(start, end);

        let mut text = self.text[..start].to_owned();
        text.push_utfstr(&to_insert.text);
        text.push_utfstr(&self.text[end..]);

        let mut formats = self.formats[..start].to_vec();
        formats.extend(to_insert.formats.iter().cloned());
        formats.extend(self.formats[end..].iter().cloned());

        let value = Value { text, formats };
        value.check_invariants();
        value
    }

    /// Delete `[start, end)`.
    pub fn remove(&self, start: usize, end: usize) -> Value {
        self.insert(&Value::new(), start, end)
    }
}
