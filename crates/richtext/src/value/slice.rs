// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::Value;

impl Value {
    /// Copy out `[start, end)`, preserving holes and format identity.
    pub fn slice(&self, start: usize, end: usize) -> Value {
        self.assert_span(start, end);
        Value {
            text: self.text[start..end].to_owned(),
            formats: self.formats[start..end].to_vec(),
        }
    }
}
