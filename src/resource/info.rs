// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolved resource descriptors

use crate::error::KlientError;
use crate::kubernetes::discovery::Mapping;
use crate::resource::typed::TypedObject;
use kube::api::{DynamicObject, ObjectMeta};
use serde_json::Value;
use std::fmt::Display;

/// Decoded payload of a descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Unstructured(DynamicObject),
    Typed(Box<TypedObject>),
}

impl Object {
    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Object::Unstructured(o) => &o.metadata,
            Object::Typed(o) => o.metadata(),
        }
    }

    pub fn metadata_mut(&mut self) -> &mut ObjectMeta {
        match self {
            Object::Unstructured(o) => &mut o.metadata,
            Object::Typed(o) => o.metadata_mut(),
        }
    }

    /// The object as a generic JSON document
    pub fn to_value(&self) -> serde_json::Result<Value> {
        match self {
            Object::Unstructured(o) => serde_json::to_value(o),
            Object::Typed(o) => o.to_value(),
        }
    }
}

/// One resolved cluster object
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    /// File path, URL, or empty for streams
    pub source: String,
    /// `None` until the kind has been mapped to an API resource
    pub mapping: Option<Mapping>,
    pub name: String,
    pub namespace: String,
    pub object: Object,
}

impl Info {
    pub fn new(source: impl Into<String>, mapping: Option<Mapping>, object: Object) -> Self {
        let metadata = object.metadata();
        let name = metadata.name.clone().unwrap_or_default();
        let namespace = metadata.namespace.clone().unwrap_or_default();

        Self {
            source: source.into(),
            mapping,
            name,
            namespace,
            object,
        }
    }

    pub fn namespaced(&self) -> bool {
        self.mapping.as_ref().is_some_and(Mapping::namespaced)
    }

    pub fn kind(&self) -> Option<&str> {
        self.mapping.as_ref().map(|m| m.gvk.kind.as_str())
    }

    /// Set the namespace on the descriptor and on the object it carries
    pub fn set_namespace(&mut self, namespace: &str) {
        self.namespace = namespace.to_string();
        self.object.metadata_mut().namespace = Some(namespace.to_string());
    }
}

/// Build a uniform error for a failed action on a descriptor.
///
/// The kind is rendered with a trailing space, or left empty when the
/// descriptor has not been mapped.
pub fn describe_failure(action: &str, info: &Info, cause: impl Display) -> KlientError {
    let kind = info
        .kind()
        .map(|kind| format!("{} ", kind))
        .unwrap_or_default();

    KlientError::ObjectAction {
        action: action.to_string(),
        kind,
        name: info.name.clone(),
        namespace: info.namespace.clone(),
        message: cause.to_string(),
    }
}
