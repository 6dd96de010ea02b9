// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::Value;

/// Concatenate values in argument order, text and formats alike, with
/// no separator.
pub fn concat<I>(values: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    let mut iter = values.into_iter();
    let Some(mut result) = iter.next() else {
        return Value::new();
    };
    for value in iter {
        result.text.push_utfstr(&value.text);
        result.formats.extend(value.formats);
    }
    result
}

/// Fold `values` into one, inserting `separator` between every adjacent
/// pair. An empty sequence yields an empty value; a plain-string
/// separator is built with `Value::from`, which contributes holes of
/// matching length.
pub fn join<I>(values: I, separator: &Value) -> Value
where
    I: IntoIterator<Item = Value>,
{
    let mut iter = values.into_iter();
    let Some(mut result) = iter.next() else {
        return Value::new();
    };
    for value in iter {
        result.text.push_utfstr(&separator.text);
        result.formats.extend(separator.formats.iter().cloned());
        result.text.push_utfstr(&value.text);
        result.formats.extend(value.formats);
    }
    result
}
