// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Builder turning files, URLs and streams into a [`ResourceSet`]

use crate::error::{KlientError, Result};
use crate::kubernetes::discovery::{gvk_for, RestMapper};
use crate::kubernetes::validation::SchemaValidator;
use crate::resource::decode::{flatten, split_documents, Documents};
use crate::resource::info::{Info, Object};
use crate::resource::options::FilenameOptions;
use crate::resource::set::ResourceSet;
use crate::resource::source::{expand_filenames, Source};
use crate::resource::typed::TypedObject;
use kube::api::DynamicObject;
use serde_json::Value;
use tokio::io::AsyncRead;
use tracing::{debug, instrument};

/// Collects sources and decoding rules, then resolves them with [`ResourceBuilder::run`].
///
/// Per source, documents are validated, flattened, mapped and decoded in
/// order. Read, parse and validation failures end that source; mapping,
/// decoding and namespace checks fail per item.
pub struct ResourceBuilder<'a> {
    mapper: &'a dyn RestMapper,
    http: reqwest::Client,
    validator: Option<&'a SchemaValidator>,
    unstructured: bool,
    continue_on_error: bool,
    namespace: Option<String>,
    default_namespace: bool,
    require_namespace: bool,
    flatten: bool,
    sources: Vec<Result<Source<'a>>>,
}

impl<'a> ResourceBuilder<'a> {
    pub fn new(mapper: &'a dyn RestMapper, http: reqwest::Client) -> Self {
        Self {
            mapper,
            http,
            validator: None,
            unstructured: false,
            continue_on_error: false,
            namespace: None,
            default_namespace: false,
            require_namespace: false,
            flatten: false,
            sources: Vec::new(),
        }
    }

    /// Decode into [`DynamicObject`]s instead of typed objects
    pub fn unstructured(mut self) -> Self {
        self.unstructured = true;
        self
    }

    pub fn schema(mut self, validator: &'a SchemaValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Keep going after a source fails, recording the error
    pub fn continue_on_error(mut self) -> Self {
        self.continue_on_error = true;
        self
    }

    pub fn namespace_param(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string()).filter(|ns| !ns.is_empty());
        self
    }

    /// Fill in the namespace parameter on namespaced objects that have none
    pub fn default_namespace(mut self) -> Self {
        self.default_namespace = true;
        self
    }

    /// Add files, directories and URLs. With `enforce_namespace`, objects
    /// from any source must match the namespace parameter.
    pub fn filename_param(mut self, enforce_namespace: bool, options: &FilenameOptions) -> Self {
        if enforce_namespace {
            self.require_namespace = true;
        }
        self.sources.extend(expand_filenames(options));
        self
    }

    pub fn stream<R>(mut self, reader: R, name: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'a,
    {
        self.sources.push(Ok(Source::Stream {
            name: name.to_string(),
            reader: Box::new(reader),
        }));
        self
    }

    /// Replace list objects with their items
    pub fn flatten(mut self) -> Self {
        self.flatten = true;
        self
    }

    #[instrument(skip(self), fields(sources = self.sources.len(), unstructured = self.unstructured))]
    pub async fn run(mut self) -> ResourceSet {
        let mut set = ResourceSet::new();
        let sources = std::mem::take(&mut self.sources);

        for source in sources {
            let result = match source {
                Ok(source) => self.visit_source(source, &mut set).await,
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                set.push_error(e);
                if !self.continue_on_error {
                    break;
                }
            }
        }

        debug!(
            "Resolved {} entries ({} errors)",
            set.len(),
            set.errors().count()
        );
        set
    }

    async fn visit_source(&self, source: Source<'a>, set: &mut ResourceSet) -> Result<()> {
        let origin = source.name();
        debug!("Reading source {:?}", origin);

        let content = source.read(&self.http).await?;
        let Documents { documents, error } = split_documents(&origin, &content);

        for document in documents {
            self.visit_document(&origin, document, set)?;
        }

        match error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn visit_document(&self, origin: &str, document: Value, set: &mut ResourceSet) -> Result<()> {
        if let Some(validator) = self.validator {
            validator
                .validate(&document)
                .map_err(|message| KlientError::Validation {
                    origin: origin.to_string(),
                    message,
                })?;
        }

        let mut items = Vec::new();
        if self.flatten {
            flatten(document, &mut items);
        } else {
            items.push(document);
        }

        for item in items {
            let result = self.info_for(origin, item).and_then(|mut info| {
                self.apply_namespace(&mut info)?;
                Ok(info)
            });
            match result {
                Ok(info) => set.push_info(info),
                Err(e) if self.continue_on_error => set.push_error(e),
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    fn info_for(&self, origin: &str, document: Value) -> Result<Info> {
        let api_version = document
            .get("apiVersion")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let kind = document
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if api_version.is_empty() || kind.is_empty() {
            return Err(KlientError::Mapping {
                origin: origin.to_string(),
                message: "apiVersion and kind must be set".to_string(),
            });
        }

        let mapping = self.mapper.mapping_for(&gvk_for(api_version, kind)).ok_or_else(|| {
            KlientError::Mapping {
                origin: origin.to_string(),
                message: format!(
                    "no matches for kind {:?} in version {:?}",
                    kind, api_version
                ),
            }
        })?;

        let decode_error = |message: String| KlientError::Decode {
            origin: origin.to_string(),
            message,
        };

        let object = if self.unstructured {
            serde_json::from_value::<DynamicObject>(document)
                .map(Object::Unstructured)
                .map_err(|e| decode_error(e.to_string()))?
        } else {
            TypedObject::decode(document)
                .map(|o| Object::Typed(Box::new(o)))
                .map_err(decode_error)?
        };

        Ok(Info::new(origin, Some(mapping), object))
    }

    fn apply_namespace(&self, info: &mut Info) -> Result<()> {
        let Some(namespace) = &self.namespace else {
            return Ok(());
        };
        if !info.namespaced() {
            return Ok(());
        }

        if self.require_namespace {
            if info.namespace.is_empty() {
                info.set_namespace(namespace);
            } else if info.namespace != *namespace {
                return Err(KlientError::NamespaceMismatch {
                    found: info.namespace.clone(),
                    expected: namespace.clone(),
                });
            }
        } else if self.default_namespace && info.namespace.is_empty() {
            info.set_namespace(namespace);
        }

        Ok(())
    }
}
