// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Namespace used when none can be resolved from the kubeconfig
pub const DEFAULT_NAMESPACE: &str = "default";

/// File extensions picked up when a directory is expanded
pub const FILE_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Label of the unnamed source used for streams and in-memory content
pub const STREAM_SOURCE: &str = "";

/// Remote manifest fetching
pub mod http {
    /// Number of attempts for a URL before giving up
    pub const GET_ATTEMPTS: usize = 3;
    /// Delay between attempts in milliseconds
    pub const RETRY_DELAY_MILLIS: u64 = 1000;
}

/// Schema discovery
pub mod openapi {
    /// Path of the OpenAPI v3 discovery index
    pub const V3_INDEX_PATH: &str = "/openapi/v3";
}
