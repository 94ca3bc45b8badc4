// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::env;
use std::path::PathBuf;

/// Connection configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Kubeconfig context to use, the current context when unset
    pub context: Option<String>,
    /// Explicit kubeconfig path, the default loading rules when unset
    pub kubeconfig: Option<PathBuf>,
    /// Namespace override. When set, it is enforced on every resource
    pub namespace: Option<String>,
    pub unstructured: bool,
}

impl Config {
    /// Build a configuration from a context name and kubeconfig path.
    /// Empty strings mean "not set".
    pub fn new(context: &str, kubeconfig: &str) -> Self {
        Config {
            context: non_empty(context),
            kubeconfig: non_empty(kubeconfig).map(PathBuf::from),
            namespace: None,
            unstructured: true,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `KUBECONFIG` is not read here: it may list several files and is
    /// merged by the default loading rules.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).and_then(|v| non_empty(&v));

        Config {
            context: value("KLIENT_CONTEXT"),
            kubeconfig: None,
            namespace: value("KLIENT_NAMESPACE"),
            unstructured: lookup("KLIENT_UNSTRUCTURED")
                .unwrap_or("true".to_string())
                .parse()
                .unwrap_or(true),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
