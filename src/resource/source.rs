// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Input sources: local files, directories, URLs and byte streams

use crate::constants::http::{GET_ATTEMPTS, RETRY_DELAY_MILLIS};
use crate::constants::FILE_EXTENSIONS;
use crate::error::{KlientError, Result};
use crate::resource::options::FilenameOptions;
use bytes::Bytes;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;
use walkdir::WalkDir;

/// One place to read resource documents from
pub enum Source<'a> {
    File(PathBuf),
    Url(Url),
    Stream {
        name: String,
        reader: Box<dyn AsyncRead + Unpin + Send + 'a>,
    },
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => f.debug_tuple("File").field(path).finish(),
            Source::Url(url) => f.debug_tuple("Url").field(&url.as_str()).finish(),
            Source::Stream { name, .. } => f.debug_struct("Stream").field("name", name).finish(),
        }
    }
}

impl Source<'_> {
    /// Label used in descriptors and error messages
    pub fn name(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Url(url) => url.to_string(),
            Source::Stream { name, .. } => name.clone(),
        }
    }

    /// Read the whole source into memory
    pub async fn read(self, http: &reqwest::Client) -> Result<Bytes> {
        match self {
            Source::File(path) => tokio::fs::read(&path).await.map(Bytes::from).map_err(|e| {
                KlientError::Read {
                    origin: path.display().to_string(),
                    message: e.to_string(),
                }
            }),
            Source::Url(url) => fetch_url(http, &url).await,
            Source::Stream { name, mut reader } => {
                let mut buffer = Vec::new();
                reader
                    .read_to_end(&mut buffer)
                    .await
                    .map_err(|e| KlientError::Read {
                        origin: name,
                        message: e.to_string(),
                    })?;
                Ok(Bytes::from(buffer))
            }
        }
    }
}

/// Whether a filename refers to a remote manifest
pub fn is_url(filename: &str) -> bool {
    filename.starts_with("http://") || filename.starts_with("https://")
}

/// Expand filenames into sources. Each entry that cannot be expanded becomes
/// an error in place, so the remaining entries are still processed.
pub fn expand_filenames(options: &FilenameOptions) -> Vec<Result<Source<'static>>> {
    let mut sources = Vec::new();

    for filename in &options.filenames {
        if is_url(filename) {
            sources.push(Url::parse(filename).map(Source::Url).map_err(|e| {
                KlientError::Read {
                    origin: filename.clone(),
                    message: format!("invalid URL: {}", e),
                }
            }));
            continue;
        }

        let path = Path::new(filename);
        if !path.exists() {
            sources.push(Err(KlientError::PathNotFound(filename.clone())));
        } else if path.is_dir() {
            sources.extend(expand_directory(path, options.recursive));
        } else {
            sources.push(Ok(Source::File(path.to_path_buf())));
        }
    }

    sources
}

/// Files of a directory with a manifest extension, in lexical order.
/// Subdirectories are only visited when `recursive` is set.
fn expand_directory(dir: &Path, recursive: bool) -> Vec<Result<Source<'static>>> {
    let mut walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let sources: Vec<_> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() && has_manifest_extension(entry.path()) => {
                Some(Ok(Source::File(entry.into_path())))
            }
            Ok(_) => None,
            Err(e) => Some(Err(KlientError::Read {
                origin: dir.display().to_string(),
                message: e.to_string(),
            })),
        })
        .collect();

    debug!("Expanded {} into {} sources", dir.display(), sources.len());
    sources
}

fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FILE_EXTENSIONS.contains(&ext))
}

/// Fetch a remote manifest, retrying transport errors and server errors
pub async fn fetch_url(http: &reqwest::Client, url: &Url) -> Result<Bytes> {
    let mut attempt = 1;

    loop {
        match http.get(url.clone()).send().await {
            Ok(response) if response.status().is_success() => {
                return response.bytes().await.map_err(|e| KlientError::Read {
                    origin: url.to_string(),
                    message: e.to_string(),
                });
            }
            Ok(response) if response.status().is_server_error() && attempt < GET_ATTEMPTS => {
                warn!(
                    "Fetching {} returned {}, retrying ({}/{})",
                    url,
                    response.status(),
                    attempt,
                    GET_ATTEMPTS
                );
            }
            Ok(response) => {
                return Err(KlientError::Http {
                    url: url.to_string(),
                    status: response.status().to_string(),
                    code: response.status().as_u16(),
                });
            }
            Err(e) if attempt < GET_ATTEMPTS => {
                warn!(
                    "Fetching {} failed: {}, retrying ({}/{})",
                    url, e, attempt, GET_ATTEMPTS
                );
            }
            Err(e) => {
                return Err(KlientError::Read {
                    origin: url.to_string(),
                    message: e.to_string(),
                });
            }
        }

        attempt += 1;
        sleep(Duration::from_millis(RETRY_DELAY_MILLIS)).await;
    }
}
