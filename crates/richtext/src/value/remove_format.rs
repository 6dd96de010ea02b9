// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::rc::Rc;

use crate::format::{find_tag, Format};

use super::Value;

impl Value {
    /// Remove entries of `tag` from `[start, end)`.
    ///
    /// With a collapsed span (`start == end`) the entry found at
    /// `start` is stripped from the whole contiguous run holding that
    /// same instance, expanding outward in both directions — this
    /// un-formats the span the caret is inside, not just one position.
    /// Run membership is instance identity, not tag equality, so two
    /// adjacent spans that merely share a tag stay separate.
    ///
    /// With a non-collapsed span every position is stripped
    /// independently. A slot whose list empties reverts to a hole.
    pub fn remove_format(&mut self, tag: &str, start: usize, end: usize) {
        self.assert_span(start, end);
        if start == end {
            self.remove_format_run(tag, start);
        } else {
            for index in start..end {
                self.strip(index, tag);
            }
        }
        self.check_invariants();
    }

    fn remove_format_run(&mut self, tag: &str, caret: usize) {
        let Some(found) = self
            .formats
            .get(caret)
            .and_then(|slot| slot.as_ref())
            .and_then(|list| find_tag(list, tag))
            .cloned()
        else {
            return;
        };

        // Walk backwards from the caret while the slot still holds the
        // same instance.
        let mut index = caret;
        while self.slot_holds(index, &found) {
            self.strip(index, tag);
            if index == 0 {
                break;
            }
            index -= 1;
        }
        // And forwards past the caret.
        let mut index = caret + 1;
        while self.slot_holds(index, &found) {
            self.strip(index, tag);
            index += 1;
        }
    }

    fn slot_holds(&self, index: usize, format: &Rc<Format>) -> bool {
        self.formats
            .get(index)
            .and_then(|slot| slot.as_ref())
            .is_some_and(|list| {
                list.iter().any(|entry| Rc::ptr_eq(entry, format))
            })
    }

    fn strip(&mut self, index: usize, tag: &str) {
        let Some(Some(list)) = self.formats.get_mut(index) else {
            return;
        };
        list.retain(|entry| entry.tag != tag);
        if list.is_empty() {
            self.formats[index] = None;
        }
    }
}
