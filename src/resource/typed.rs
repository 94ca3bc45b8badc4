// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Strongly-typed decoding for the built-in kinds

use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{
    ConfigMap, Namespace, PersistentVolumeClaim, Pod, Secret, Service, ServiceAccount,
};
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, Role, RoleBinding};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::Resource;
use serde_json::Value;

macro_rules! typed_objects {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        /// A decoded object of one of the registered built-in kinds
        #[derive(Debug, Clone, PartialEq)]
        pub enum TypedObject {
            $($variant($ty)),+
        }

        impl TypedObject {
            /// Decode a document into its registered type, keyed by `apiVersion` and `kind`
            pub fn decode(document: Value) -> Result<Self, String> {
                let api_version = document
                    .get("apiVersion")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let kind = document
                    .get("kind")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();

                $(
                    if api_version == <$ty as Resource>::API_VERSION
                        && kind == <$ty as Resource>::KIND
                    {
                        return serde_json::from_value::<$ty>(document)
                            .map(TypedObject::$variant)
                            .map_err(|e| e.to_string());
                    }
                )+

                Err(format!(
                    "no kind {:?} is registered for version {:?}",
                    kind, api_version
                ))
            }

            pub fn kind(&self) -> &'static str {
                match self {
                    $(TypedObject::$variant(_) => <$ty as Resource>::KIND),+
                }
            }

            pub fn metadata(&self) -> &ObjectMeta {
                match self {
                    $(TypedObject::$variant(o) => &o.metadata),+
                }
            }

            pub fn metadata_mut(&mut self) -> &mut ObjectMeta {
                match self {
                    $(TypedObject::$variant(o) => &mut o.metadata),+
                }
            }

            pub fn to_value(&self) -> serde_json::Result<Value> {
                match self {
                    $(TypedObject::$variant(o) => serde_json::to_value(o)),+
                }
            }
        }
    };
}

typed_objects! {
    ConfigMap => ConfigMap,
    Secret => Secret,
    Service => Service,
    ServiceAccount => ServiceAccount,
    Pod => Pod,
    Namespace => Namespace,
    PersistentVolumeClaim => PersistentVolumeClaim,
    Deployment => Deployment,
    StatefulSet => StatefulSet,
    DaemonSet => DaemonSet,
    Job => Job,
    CronJob => CronJob,
    Ingress => Ingress,
    Role => Role,
    RoleBinding => RoleBinding,
    ClusterRole => ClusterRole,
    ClusterRoleBinding => ClusterRoleBinding,
}
