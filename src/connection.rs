// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster connection resolving resources from files, URLs and streams

use crate::config::Config;
use crate::constants::STREAM_SOURCE;
use crate::error::{KlientError, Result};
use crate::kubernetes::{
    create_client, discover, load_client_config, namespace_or_fallback, NamespaceSetting,
    SchemaValidator,
};
use crate::resource::{BuildOptions, FilenameOptions, Info, ResourceBuilder, ResourceSet};
use kube::api::DynamicObject;
use kube::discovery::Discovery;
use kube::{Api, Client};
use tokio::io::AsyncRead;
use tracing::{info, instrument, warn};

/// A cluster client together with the REST mapping, schema validator and
/// default namespace used to resolve resources. Immutable once created.
pub struct Connection {
    client: Client,
    http: reqwest::Client,
    discovery: Discovery,
    validator: SchemaValidator,
    namespace: String,
    enforce_namespace: bool,
}

impl Connection {
    /// Connect using a kubeconfig context and path. Empty strings select the
    /// current context and the default kubeconfig loading rules.
    pub async fn create(context: &str, kubeconfig: &str) -> Result<Self> {
        Self::from_config(&Config::new(context, kubeconfig)).await
    }

    #[instrument(skip(config), fields(context = ?config.context))]
    pub async fn from_config(config: &Config) -> Result<Self> {
        let client_config = load_client_config(config).await?;
        let namespace = namespace_or_fallback(config, &client_config);
        let client = create_client(client_config)?;
        Self::from_client(client, namespace).await
    }

    /// Finish a connection from an existing client.
    ///
    /// A schema validator that cannot be built is replaced by a disabled one;
    /// discovery failures are fatal.
    pub async fn from_client(client: Client, namespace: NamespaceSetting) -> Result<Self> {
        let validator = match SchemaValidator::fetch(&client).await {
            Ok(validator) => validator,
            Err(e) => {
                warn!("{}, continuing without schema validation", e);
                SchemaValidator::disabled()
            }
        };

        let discovery = discover(&client).await?;

        let http = reqwest::Client::builder().build().map_err(|e| {
            KlientError::ConnectionError(format!("Failed to create HTTP client: {}", e))
        })?;

        info!(
            "Connected to cluster: namespace={} enforce_namespace={} validation={}",
            namespace.namespace,
            namespace.enforce,
            validator.is_enabled()
        );

        Ok(Self {
            client,
            http,
            discovery,
            validator,
            namespace: namespace.namespace,
            enforce_namespace: namespace.enforce,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn enforce_namespace(&self) -> bool {
        self.enforce_namespace
    }

    pub fn validator(&self) -> &SchemaValidator {
        &self.validator
    }

    /// A builder with this connection's schema, namespace default and
    /// continue-on-error policy applied
    pub fn builder(&self, options: Option<BuildOptions>) -> ResourceBuilder<'_> {
        let options = options.unwrap_or_default();
        let mut builder = ResourceBuilder::new(&self.discovery, self.http.clone());

        if options.unstructured {
            builder = builder.unstructured();
        }

        builder
            .schema(&self.validator)
            .continue_on_error()
            .namespace_param(&self.namespace)
            .default_namespace()
    }

    /// Resolve resources from local files, directories (non-recursive) or URLs
    #[instrument(skip(self, paths, options), fields(paths = paths.len()))]
    pub async fn resolve_from_paths<S: AsRef<str>>(
        &self,
        paths: &[S],
        options: Option<BuildOptions>,
    ) -> ResourceSet {
        let filenames = FilenameOptions::new(paths);

        self.builder(options)
            .filename_param(self.enforce_namespace, &filenames)
            .flatten()
            .run()
            .await
    }

    /// Resolve resources from a single unnamed byte stream
    pub async fn resolve_from_stream<'a, R>(
        &'a self,
        reader: R,
        options: Option<BuildOptions>,
    ) -> ResourceSet
    where
        R: AsyncRead + Unpin + Send + 'a,
    {
        self.builder(options)
            .stream(reader, STREAM_SOURCE)
            .flatten()
            .run()
            .await
    }

    /// Resolve resources from in-memory content
    pub async fn resolve_from_bytes(
        &self,
        content: &[u8],
        options: Option<BuildOptions>,
    ) -> ResourceSet {
        self.resolve_from_stream(content, options).await
    }

    /// Dynamic API handle for a mapped descriptor, scoped to its namespace
    /// when the resource is namespaced
    pub fn api_for(&self, info: &Info) -> Option<Api<DynamicObject>> {
        let mapping = info.mapping.as_ref()?;

        let api = if mapping.namespaced() {
            let namespace = if info.namespace.is_empty() {
                &self.namespace
            } else {
                &info.namespace
            };
            Api::namespaced_with(self.client.clone(), namespace, &mapping.resource)
        } else {
            Api::all_with(self.client.clone(), &mapping.resource)
        };

        Some(api)
    }

    /// Fetch the live object a descriptor refers to
    pub async fn get_live(&self, info: &Info) -> Result<DynamicObject> {
        let api = self.api_for(info).ok_or_else(|| KlientError::Mapping {
            origin: info.source.clone(),
            message: "descriptor has no REST mapping".to_string(),
        })?;

        Ok(api.get(&info.name).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{describe_failure, Object};
    use crate::test_utils::{config_map_json, discovery_service, openapi_index_json, MockService};
    use std::fs;

    const CONFIG_MAP: &str = "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: settings\n";

    async fn connect(service: MockService, namespace: NamespaceSetting) -> Connection {
        Connection::from_client(discovery_service(service).into_client(), namespace)
            .await
            .unwrap()
    }

    async fn connection() -> Connection {
        connect(MockService::new(), NamespaceSetting::new("team-a", false)).await
    }

    #[tokio::test]
    async fn test_from_client_keeps_namespace_setting() {
        let conn = connect(MockService::new(), NamespaceSetting::fallback()).await;
        assert_eq!(conn.namespace(), "default");
        assert!(conn.enforce_namespace());
    }

    #[tokio::test]
    async fn test_validator_failure_disables_validation() {
        let conn = connection().await;
        assert!(!conn.validator().is_enabled());
    }

    #[tokio::test]
    async fn test_validator_enabled_from_openapi_index() {
        let service = MockService::new().on_get("/openapi/v3", 200, &openapi_index_json(&["api/v1"]));
        let conn = connect(service, NamespaceSetting::new("team-a", false)).await;
        assert!(conn.validator().is_enabled());
    }

    #[tokio::test]
    async fn test_discovery_failure_is_fatal() {
        let client = MockService::new().into_client();
        let result = Connection::from_client(client, NamespaceSetting::fallback()).await;
        assert!(matches!(result, Err(KlientError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_create_with_missing_kubeconfig_fails() {
        let result = Connection::create("", "/nonexistent/klient/kubeconfig").await;
        assert!(matches!(result, Err(KlientError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_empty_paths_give_empty_set() {
        let conn = connection().await;
        let set = conn.resolve_from_paths::<&str>(&[], None).await;

        assert!(set.is_empty());
        assert!(!set.has_errors());
    }

    #[tokio::test]
    async fn test_malformed_and_valid_paths_continue_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.yaml");
        let good = dir.path().join("good.yaml");
        fs::write(&bad, "apiVersion: v1\nkind: [unclosed\n").unwrap();
        fs::write(&good, CONFIG_MAP).unwrap();

        let conn = connection().await;
        let set = conn
            .resolve_from_paths(&[bad.to_str().unwrap(), good.to_str().unwrap()], None)
            .await;

        assert_eq!(set.len(), 2);
        let entries: Vec<_> = set.iter().collect();
        assert!(matches!(entries[0], Err(KlientError::Parse { .. })));
        let info = entries[1].as_ref().unwrap();
        assert_eq!(info.name, "settings");
        assert_eq!(info.namespace, "team-a");
    }

    #[tokio::test]
    async fn test_paths_enforce_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cm.yaml");
        fs::write(
            &path,
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: settings\n  namespace: other\n",
        )
        .unwrap();

        let conn = connect(MockService::new(), NamespaceSetting::new("team-a", true)).await;
        let set = conn.resolve_from_paths(&[path.to_str().unwrap()], None).await;
        assert!(matches!(
            set.errors().next(),
            Some(KlientError::NamespaceMismatch { .. })
        ));

        // Streams only default the namespace
        let content = fs::read(&path).unwrap();
        let set = conn.resolve_from_bytes(&content, None).await;
        assert_eq!(set.infos().next().unwrap().namespace, "other");
    }

    #[tokio::test]
    async fn test_bytes_and_stream_are_equivalent() {
        let conn = connection().await;
        let content = format!("{}---\napiVersion: v1\nkind: Secret\nmetadata:\n  name: creds\n", CONFIG_MAP);

        let from_bytes = conn.resolve_from_bytes(content.as_bytes(), None).await;
        let from_stream = conn
            .resolve_from_stream(std::io::Cursor::new(content.clone().into_bytes()), None)
            .await;

        let bytes_infos: Vec<_> = from_bytes.infos().cloned().collect();
        let stream_infos: Vec<_> = from_stream.infos().cloned().collect();
        assert_eq!(bytes_infos.len(), 2);
        assert_eq!(bytes_infos, stream_infos);
    }

    #[tokio::test]
    async fn test_default_options_are_unstructured() {
        let conn = connection().await;
        let omitted = conn.resolve_from_bytes(CONFIG_MAP.as_bytes(), None).await;
        let explicit = conn
            .resolve_from_bytes(CONFIG_MAP.as_bytes(), Some(BuildOptions { unstructured: true }))
            .await;

        let omitted: Vec<_> = omitted.infos().cloned().collect();
        let explicit: Vec<_> = explicit.infos().cloned().collect();
        assert_eq!(omitted, explicit);
        assert!(matches!(omitted[0].object, Object::Unstructured(_)));
    }

    #[tokio::test]
    async fn test_get_live_fetches_object() {
        let service = MockService::new().on_get(
            "/api/v1/namespaces/team-a/configmaps/settings",
            200,
            &config_map_json("team-a", "settings"),
        );
        let conn = connect(service, NamespaceSetting::new("team-a", false)).await;
        let set = conn.resolve_from_bytes(CONFIG_MAP.as_bytes(), None).await;
        let info = set.infos().next().unwrap();

        let live = conn.get_live(info).await.unwrap();
        assert_eq!(live.metadata.uid.as_deref(), Some("test-uid"));
    }

    #[tokio::test]
    async fn test_get_live_missing_object_is_described() {
        let conn = connection().await;
        let set = conn.resolve_from_bytes(CONFIG_MAP.as_bytes(), None).await;
        let info = set.infos().next().unwrap();

        let err = conn.get_live(info).await.unwrap_err();
        assert!(matches!(err, KlientError::KubeError(kube::Error::Api(ref status)) if status.code == 404));
        let described = describe_failure("get", info, err);
        assert!(described
            .to_string()
            .starts_with("cannot get object Kind: \"ConfigMap \", Name: \"settings\", Namespace: \"team-a\"."));
    }
}
