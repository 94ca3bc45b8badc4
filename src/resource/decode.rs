// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Splitting YAML/JSON content into documents and flattening lists

use crate::error::KlientError;
use crate::kubernetes::validation::list_items;
use serde::Deserialize;
use serde_json::Value;

/// Documents decoded from one source.
///
/// Decoding stops at the first malformed document; the documents before it
/// are kept and the error is returned alongside them.
#[derive(Debug, Default)]
pub struct Documents {
    pub documents: Vec<Value>,
    pub error: Option<KlientError>,
}

/// Split content into documents. JSON streams and multi-document YAML are
/// both accepted; empty documents are skipped.
pub fn split_documents(origin: &str, content: &[u8]) -> Documents {
    let parse_error = |message: String| KlientError::Parse {
        origin: origin.to_string(),
        message,
    };

    let mut decoded = Documents::default();

    if looks_like_json(content) {
        for document in serde_json::Deserializer::from_slice(content).into_iter::<Value>() {
            match document {
                Ok(Value::Null) => {}
                Ok(document) => decoded.documents.push(document),
                Err(e) => {
                    decoded.error = Some(parse_error(e.to_string()));
                    break;
                }
            }
        }
        return decoded;
    }

    for document in serde_yaml::Deserializer::from_slice(content) {
        match Value::deserialize(document) {
            Ok(Value::Null) => {}
            Ok(document) => decoded.documents.push(document),
            Err(e) => {
                decoded.error = Some(parse_error(e.to_string()));
                break;
            }
        }
    }

    decoded
}

fn looks_like_json(content: &[u8]) -> bool {
    content
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{')
}

/// Replace list documents with their members, recursively
pub fn flatten(document: Value, out: &mut Vec<Value>) {
    let members = document.as_object().and_then(|object| {
        let kind = object.get("kind").and_then(Value::as_str).unwrap_or_default();
        list_items(object, kind).cloned()
    });

    match members {
        Some(items) => {
            for item in items {
                flatten(item, out);
            }
        }
        None => out.push(document),
    }
}
