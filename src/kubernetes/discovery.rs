// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! REST mapping of group/version/kind to API resources via discovery

use crate::error::{KlientError, Result};
use kube::{
    core::GroupVersionKind,
    discovery::{ApiResource, Discovery, Scope},
    Client,
};
use tracing::{debug, instrument};

/// The API resource a kind maps to, and whether it lives in a namespace
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub gvk: GroupVersionKind,
    pub resource: ApiResource,
    pub scope: Scope,
}

impl Mapping {
    pub fn namespaced(&self) -> bool {
        self.scope == Scope::Namespaced
    }
}

/// Maps a group/version/kind to the API resource that serves it
pub trait RestMapper: Send + Sync {
    fn mapping_for(&self, gvk: &GroupVersionKind) -> Option<Mapping>;
}

impl RestMapper for Discovery {
    fn mapping_for(&self, gvk: &GroupVersionKind) -> Option<Mapping> {
        self.resolve_gvk(gvk).map(|(resource, capabilities)| Mapping {
            gvk: gvk.clone(),
            resource,
            scope: capabilities.scope,
        })
    }
}

/// Run API discovery against the cluster.
#[instrument(skip(client))]
pub async fn discover(client: &Client) -> Result<Discovery> {
    let discovery = Discovery::new(client.clone()).run().await.map_err(|e| {
        KlientError::ConnectionError(format!("API discovery failed: {}", e))
    })?;

    debug!("Discovered {} API groups", discovery.groups().count());
    Ok(discovery)
}

/// Split an `apiVersion` into group and version. The core group is empty.
pub fn split_api_version(api_version: &str) -> (&str, &str) {
    match api_version.split_once('/') {
        Some((group, version)) => (group, version),
        None => ("", api_version),
    }
}

/// Build a [`GroupVersionKind`] from `apiVersion` and `kind`
pub fn gvk_for(api_version: &str, kind: &str) -> GroupVersionKind {
    let (group, version) = split_api_version(api_version);
    GroupVersionKind::gvk(group, version, kind)
}
