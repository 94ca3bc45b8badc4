// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Options for building a resource set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Decode into generic objects instead of typed API objects
    pub unstructured: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { unstructured: true }
    }
}

/// Files, directories or URLs to read resources from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameOptions {
    pub filenames: Vec<String>,
    /// Descend into subdirectories when expanding a directory
    pub recursive: bool,
}

impl FilenameOptions {
    pub fn new<I, S>(filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            filenames: filenames.into_iter().map(|f| f.as_ref().to_string()).collect(),
            recursive: false,
        }
    }
}
