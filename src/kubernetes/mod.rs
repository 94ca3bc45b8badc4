// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, namespace resolution, REST mapping and validation.

pub mod client;
pub mod discovery;
pub mod namespaces;
pub mod validation;

pub use client::{create_client, load_client_config};
pub use discovery::{discover, Mapping, RestMapper};
pub use namespaces::{namespace_or_fallback, resolve_namespace, NamespaceSetting};
pub use validation::SchemaValidator;
