// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation from a context name and kubeconfig path

use crate::config::Config;
use crate::error::{KlientError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::path::Path;
use tracing::{debug, instrument};

/// Create a Kubernetes client from a loaded client configuration
pub fn create_client(client_config: KConfig) -> Result<Client> {
    debug!("Using API server {}", client_config.cluster_url);

    Client::try_from(client_config).map_err(|e| KlientError::ConnectionError(e.to_string()))
}

/// Load the client configuration, falling back to the default loading rules
/// (`KUBECONFIG`, `~/.kube/config`, in-cluster) when no path is given
#[instrument(skip(config), fields(context = ?config.context, kubeconfig = ?config.kubeconfig))]
pub async fn load_client_config(config: &Config) -> Result<KConfig> {
    let options = KubeConfigOptions {
        context: config.context.clone(),
        ..Default::default()
    };

    match (&config.kubeconfig, &config.context) {
        (Some(path), _) => {
            let kubeconfig = read_kubeconfig(path)
                .map_err(|e| KlientError::ConnectionError(e.to_string()))?;
            KConfig::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .map_err(|e| {
                    KlientError::ConnectionError(format!(
                        "Failed to create config from {}: {}",
                        path.display(),
                        e
                    ))
                })
        }
        (None, Some(context)) => KConfig::from_kubeconfig(&options).await.map_err(|e| {
            KlientError::ConnectionError(format!("context '{}': {}", context, e))
        }),
        (None, None) => KConfig::infer()
            .await
            .map_err(|e| KlientError::ConnectionError(format!("Failed to infer config: {}", e))),
    }
}

/// Read a kubeconfig file from an explicit path
fn read_kubeconfig(path: &Path) -> Result<Kubeconfig> {
    Kubeconfig::read_from(path).map_err(|e| {
        KlientError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
    })
}
