/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::borrow::Cow;

/// Escapes a string for embedding in a JSON string value.
pub(crate) fn escape_string(value: &str) -> Cow<'_, str> {
    match value.find(|c: char| c < '\u{20}' || c == '"' || c == '\\') {
        Some(index) => Cow::Owned(escape_string_inner(&value[..index], &value[index..])),
        None => Cow::Borrowed(value),
    }
}

fn escape_string_inner(start: &str, rest: &str) -> String {
    let mut escaped = String::with_capacity(start.len() + rest.len() + 1);
    escaped.push_str(start);

    for c in rest.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\u{08}' => escaped.push_str("\\b"),
            '\u{0C}' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{00}'..='\u{1F}' => escaped.push_str(&format!("\\u{:04x}", c as u32)),
            _ => escaped.push(c),
        }
    }
    escaped
}
