// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Structural schema validation against the group-versions the server publishes

use crate::constants::openapi::V3_INDEX_PATH;
use crate::error::{KlientError, Result};
use kube::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

#[derive(Deserialize)]
struct OpenApiIndex {
    paths: BTreeMap<String, Value>,
}

/// Validates raw resource documents before they are mapped.
///
/// A disabled validator accepts every document.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    served: Option<BTreeSet<String>>,
}

impl SchemaValidator {
    pub fn disabled() -> Self {
        Self { served: None }
    }

    /// Validator accepting exactly the given group-versions (`v1`, `apps/v1`, ...)
    pub fn with_group_versions<I, S>(group_versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            served: Some(group_versions.into_iter().map(Into::into).collect()),
        }
    }

    /// Build a validator from the server's OpenAPI v3 index
    #[instrument(skip(client))]
    pub async fn fetch(client: &Client) -> Result<Self> {
        let request = http::Request::get(V3_INDEX_PATH)
            .body(Vec::new())
            .map_err(|e| KlientError::ValidatorInit(e.to_string()))?;

        let body = client
            .request_text(request)
            .await
            .map_err(|e| KlientError::ValidatorInit(e.to_string()))?;

        let index: OpenApiIndex = serde_json::from_str(&body).map_err(|e| {
            KlientError::ValidatorInit(format!("invalid OpenAPI index: {}", e))
        })?;

        let served: BTreeSet<String> = index
            .paths
            .keys()
            .filter_map(|path| group_version_from_path(path))
            .collect();

        debug!("Schema validator knows {} group-versions", served.len());
        Ok(Self {
            served: Some(served),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.served.is_some()
    }

    /// Validate one raw document. All problems are reported together.
    pub fn validate(&self, document: &Value) -> std::result::Result<(), String> {
        let Some(served) = &self.served else {
            return Ok(());
        };

        let mut problems = Vec::new();
        validate_object(document, served, "", &mut problems);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }
}

fn validate_object(
    document: &Value,
    served: &BTreeSet<String>,
    at: &str,
    problems: &mut Vec<String>,
) {
    let Some(object) = document.as_object() else {
        problems.push(format!("ValidationError({}): expected an object", at));
        return;
    };

    let api_version = object
        .get("apiVersion")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let kind = object.get("kind").and_then(Value::as_str).unwrap_or_default();
    let context = if at.is_empty() {
        kind.to_string()
    } else {
        at.to_string()
    };

    if api_version.is_empty() {
        problems.push(format!(
            "ValidationError({}): missing required field \"apiVersion\"",
            context
        ));
    } else if !served.contains(api_version) {
        problems.push(format!(
            "ValidationError({}): apiVersion {:?} is not served by the cluster",
            context, api_version
        ));
    }

    if kind.is_empty() {
        problems.push(format!(
            "ValidationError({}): missing required field \"kind\"",
            context
        ));
    }

    if let Some(items) = list_items(object, kind) {
        for (i, item) in items.iter().enumerate() {
            validate_object(item, served, &format!("{}.items[{}]", context, i), problems);
        }
        return;
    }

    let metadata = object.get("metadata").and_then(Value::as_object);
    let has_name = metadata.is_some_and(|m| {
        ["name", "generateName"]
            .iter()
            .any(|field| m.get(*field).and_then(Value::as_str).is_some_and(|v| !v.is_empty()))
    });
    if !has_name {
        problems.push(format!(
            "ValidationError({}.metadata): missing required field \"name\"",
            context
        ));
    }
}

/// Items of a list document, `None` if the document is not a list
pub fn list_items<'a>(
    object: &'a serde_json::Map<String, Value>,
    kind: &str,
) -> Option<&'a Vec<Value>> {
    if !kind.ends_with("List") {
        return None;
    }
    object.get("items").and_then(Value::as_array)
}

/// `api/v1` -> `v1`, `apis/apps/v1` -> `apps/v1`
fn group_version_from_path(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match segments.as_slice() {
        ["api", version] => Some(version.to_string()),
        ["apis", group, version] => Some(format!("{}/{}", group, version)),
        _ => None,
    }
}
