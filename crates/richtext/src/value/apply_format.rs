// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::rc::Rc;

use crate::format::Format;

use super::Value;

impl Value {
    /// Apply `format` to every position in `[start, end)`.
    ///
    /// Any existing entry of the same tag is removed first, then the
    /// format is appended, so it becomes the innermost entry at each
    /// touched position — nesting inside pre-existing different-tag
    /// formats. Every touched position holds the same instance, so the
    /// span reads back as one run.
    pub fn apply_format(
        &mut self,
        format: &Rc<Format>,
        start: usize,
        end: usize,
    ) {
        self.assert_span(start, end);
        for slot in &mut self.formats[start..end] {
            match slot {
                Some(list) => {
                    list.retain(|entry| entry.tag != format.tag);
                    list.push(Rc::clone(format));
                }
                None => *slot = Some(vec![Rc::clone(format)]),
            }
        }
        self.check_invariants();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_over_holes_and_nests_inside_existing_formats() {
        let em = Rc::new(Format::new("em"));
        let strong = Rc::new(Format::new("strong"));

        let mut value = Value::from("one two three");
        value.apply_format(&em, 4, 7);
        value.apply_format(&strong, 3, 6);

        let mut expected = vec![None; 13];
        expected[3] = Some(vec![strong.clone()]);
        expected[4] = Some(vec![em.clone(), strong.clone()]);
        expected[5] = Some(vec![em.clone(), strong.clone()]);
        expected[6] = Some(vec![em.clone()]);
        assert_eq!(value.formats, expected);
        assert_eq!(value.text.to_string(), "one two three");
    }

    #[test]
    fn reapplying_the_same_tag_replaces_the_entry() {
        let em = Rc::new(Format::new("em"));
        let other_em = Rc::new(Format::new("em"));

        let mut value = Value::from("test");
        value.apply_format(&em, 0, 4);
        value.apply_format(&other_em, 1, 3);

        assert_eq!(value.formats[1], Some(vec![other_em.clone()]));
        assert!(Rc::ptr_eq(
            value.formats[0].as_ref().unwrap().first().unwrap(),
            &em
        ));
    }

    #[test]
    fn every_touched_position_shares_one_instance() {
        let strong = Rc::new(Format::new("strong"));
        let mut value = Value::from("one two three");
        value.apply_format(&strong, 3, 6);

        let at = |i: usize| value.formats[i].as_ref().unwrap()[0].clone();
        assert!(Rc::ptr_eq(&at(3), &at(4)));
        assert!(Rc::ptr_eq(&at(4), &at(5)));
    }

    #[test]
    #[should_panic(expected = "past its end")]
    fn backwards_spans_are_rejected() {
        let strong = Rc::new(Format::new("strong"));
        Value::from("test").apply_format(&strong, 3, 1);
    }
}
