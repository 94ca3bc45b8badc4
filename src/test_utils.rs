// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses and REST mappings.

use crate::kubernetes::discovery::{gvk_for, Mapping, RestMapper};
use http::{Request, Response};
use kube::api::ApiResource;
use kube::client::Body;
use kube::core::GroupVersionKind;
use kube::discovery::Scope;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();
        responses
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let (status, body) = self
            .find_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json(&path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Register the discovery endpoints of a cluster serving the core group only
pub fn discovery_service(service: MockService) -> MockService {
    service
        .on_get(
            "/apis",
            200,
            &serde_json::json!({"kind": "APIGroupList", "apiVersion": "v1", "groups": []})
                .to_string(),
        )
        .on_get(
            "/api",
            200,
            &serde_json::json!({
                "kind": "APIVersions",
                "versions": ["v1"],
                "serverAddressByClientCIDRs": []
            })
            .to_string(),
        )
        .on_get("/api/v1", 200, &core_resources_json())
}

fn api_resource_json(name: &str, kind: &str, namespaced: bool) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "singularName": kind.to_lowercase(),
        "namespaced": namespaced,
        "kind": kind,
        "verbs": ["create", "delete", "get", "list", "patch", "update", "watch"]
    })
}

fn core_resources_json() -> String {
    serde_json::json!({
        "kind": "APIResourceList",
        "apiVersion": "v1",
        "groupVersion": "v1",
        "resources": [
            api_resource_json("configmaps", "ConfigMap", true),
            api_resource_json("namespaces", "Namespace", false),
            api_resource_json("pods", "Pod", true),
            api_resource_json("secrets", "Secret", true)
        ]
    })
    .to_string()
}

/// An OpenAPI v3 discovery index listing the given paths
pub fn openapi_index_json(paths: &[&str]) -> String {
    let paths: serde_json::Map<String, serde_json::Value> = paths
        .iter()
        .map(|p| {
            (
                p.to_string(),
                serde_json::json!({"serverRelativeURL": format!("/openapi/v3/{}", p)}),
            )
        })
        .collect();
    serde_json::json!({ "paths": paths }).to_string()
}

/// A configmap JSON response
pub fn config_map_json(namespace: &str, name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        }
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(path: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} not found", path),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// A REST mapper with a fixed set of kinds
#[derive(Default)]
pub struct StaticMapper {
    mappings: HashMap<GroupVersionKind, Mapping>,
}

impl StaticMapper {
    /// The core kinds used throughout the tests
    pub fn builtin() -> Self {
        Self::default()
            .with("v1", "ConfigMap", "configmaps", true)
            .with("v1", "Secret", "secrets", true)
            .with("v1", "Pod", "pods", true)
            .with("v1", "Namespace", "namespaces", false)
            .with("apps/v1", "Deployment", "deployments", true)
    }

    pub fn with(mut self, api_version: &str, kind: &str, plural: &str, namespaced: bool) -> Self {
        let gvk = gvk_for(api_version, kind);
        let mapping = Mapping {
            resource: ApiResource::from_gvk_with_plural(&gvk, plural),
            gvk: gvk.clone(),
            scope: if namespaced {
                Scope::Namespaced
            } else {
                Scope::Cluster
            },
        };
        self.mappings.insert(gvk, mapping);
        self
    }
}

impl RestMapper for StaticMapper {
    fn mapping_for(&self, gvk: &GroupVersionKind) -> Option<Mapping> {
        self.mappings.get(gvk).cloned()
    }
}
