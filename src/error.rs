// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KlientError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to parse kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("cannot create a client from given context and kubeconfig: {0}")]
    ConnectionError(String),

    #[error("Namespace resolution failed: {0}")]
    NamespaceResolution(String),

    #[error("Schema validator unavailable: {0}")]
    ValidatorInit(String),

    #[error("the path {0:?} does not exist")]
    PathNotFound(String),

    #[error("error reading {origin:?}: {message}")]
    Read { origin: String, message: String },

    #[error("unable to read URL {url:?}, server reported {status}, status code={code}")]
    Http {
        url: String,
        status: String,
        code: u16,
    },

    #[error("error parsing {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("error validating {origin:?}: {message}")]
    Validation { origin: String, message: String },

    #[error("unable to recognize {origin:?}: {message}")]
    Mapping { origin: String, message: String },

    #[error("unable to decode {origin:?}: {message}")]
    Decode { origin: String, message: String },

    #[error(
        "the namespace from the provided object {found:?} does not match the namespace {expected:?}. You must pass '--namespace={found}' to perform this operation."
    )]
    NamespaceMismatch { found: String, expected: String },

    #[error("cannot {action} object Kind: {kind:?}, Name: {name:?}, Namespace: {namespace:?}. {message}")]
    ObjectAction {
        action: String,
        kind: String,
        name: String,
        namespace: String,
        message: String,
    },

    #[error("{}", join_errors(.0))]
    Aggregate(Vec<KlientError>),
}

fn join_errors(errors: &[KlientError]) -> String {
    match errors {
        [single] => single.to_string(),
        _ => format!(
            "[{}]",
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

pub type Result<T> = std::result::Result<T, KlientError>;
