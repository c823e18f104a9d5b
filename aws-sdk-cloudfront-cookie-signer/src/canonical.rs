/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Canonical policy serialization.
//!
//! The canonical form is the exact byte sequence that gets signed and that the
//! CloudFront edge reconstructs from the `CloudFront-Policy` cookie. Objects are
//! written in their insertion order with no whitespace, and then every ASCII
//! space is removed from the result. That includes spaces inside string values,
//! so `"my file.mp4"` is signed as `"myfile.mp4"`.
//!
//! The output is pure printable ASCII: any character outside `' '..='~'` that
//! the JSON writer leaves as-is is written as a lowercase `\uXXXX` escape, with
//! characters beyond the Basic Multilingual Plane as UTF-16 surrogate pairs.
//! `"café"` is signed as `"caf\u00e9"`.

use aws_smithy_json::serialize::JsonValueWriter;
use aws_smithy_types::Number;
use serde_json::Value;
use std::fmt;

/// A policy document in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalPolicy(String);

impl CanonicalPolicy {
    /// Canonicalizes a policy document.
    pub fn from_document(document: &Value) -> Self {
        let mut out = String::new();
        write_value(JsonValueWriter::new(&mut out), document);
        out.retain(|c| c != ' ');
        Self(escape_non_ascii(out))
    }

    /// Returns the canonical JSON text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the UTF-8 bytes that get signed.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Consumes self and returns the canonical JSON text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_value(writer: JsonValueWriter<'_>, value: &Value) {
    match value {
        Value::Null => writer.null(),
        Value::Bool(b) => writer.boolean(*b),
        Value::Number(n) => writer.number(to_number(n)),
        Value::String(s) => writer.string(s),
        Value::Array(items) => {
            let mut array = writer.start_array();
            for item in items {
                write_value(array.value(), item);
            }
            array.finish();
        }
        Value::Object(members) => {
            let mut object = writer.start_object();
            for (key, item) in members {
                write_value(object.key(key), item);
            }
            object.finish();
        }
    }
}

fn escape_non_ascii(json: String) -> String {
    if json.bytes().all(|b| b < 0x7f) {
        return json;
    }
    let mut out = String::with_capacity(json.len() + 16);
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c < '\x7f' {
            out.push(c);
            continue;
        }
        for unit in c.encode_utf16(&mut units) {
            out.push_str(&format!("\\u{unit:04x}"));
        }
    }
    out
}

fn to_number(n: &serde_json::Number) -> Number {
    if let Some(value) = n.as_u64() {
        Number::PosInt(value)
    } else if let Some(value) = n.as_i64() {
        Number::NegInt(value)
    } else {
        // serde_json only produces finite floats
        Number::Float(n.as_f64().unwrap_or_default())
    }
}
