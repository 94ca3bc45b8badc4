// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Default namespace resolution

use crate::config::Config;
use crate::constants::DEFAULT_NAMESPACE;
use crate::error::{KlientError, Result};
use kube::Config as KConfig;
use tracing::{debug, instrument, warn};

/// The default namespace of a connection and whether it must be enforced
/// on every resource instead of only filling in missing namespaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSetting {
    pub namespace: String,
    pub enforce: bool,
}

impl NamespaceSetting {
    pub fn new(namespace: impl Into<String>, enforce: bool) -> Self {
        Self {
            namespace: namespace.into(),
            enforce,
        }
    }

    /// Used when the namespace cannot be determined
    pub fn fallback() -> Self {
        Self::new(DEFAULT_NAMESPACE, true)
    }
}

/// Resolve the namespace setting, falling back to the default namespace
/// with mandatory enforcement when resolution fails.
#[instrument(skip(config, client_config), fields(context = ?config.context))]
pub fn namespace_or_fallback(config: &Config, client_config: &KConfig) -> NamespaceSetting {
    match resolve_namespace(config, client_config) {
        Ok(setting) => {
            debug!(
                "Resolved namespace {} (enforce={})",
                setting.namespace, setting.enforce
            );
            setting
        }
        Err(e) => {
            warn!(
                "{}, falling back to namespace '{}' with enforcement",
                e, DEFAULT_NAMESPACE
            );
            NamespaceSetting::fallback()
        }
    }
}

/// Resolve the namespace from the configuration.
///
/// An explicit override is always enforced. Otherwise the default namespace
/// of the loaded client configuration is used without enforcement: the
/// selected context's namespace, or the service account namespace in-cluster.
pub fn resolve_namespace(config: &Config, client_config: &KConfig) -> Result<NamespaceSetting> {
    if let Some(namespace) = &config.namespace {
        return Ok(NamespaceSetting::new(namespace.as_str(), true));
    }

    if client_config.default_namespace.is_empty() {
        return Err(KlientError::NamespaceResolution(
            "client configuration has no default namespace".to_string(),
        ));
    }

    Ok(NamespaceSetting::new(
        client_config.default_namespace.as_str(),
        false,
    ))
}
