// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The outcome of a resolution: descriptors and per-item errors, in order

use crate::error::{KlientError, Result};
use crate::resource::info::Info;

/// Ordered descriptors and the errors met while producing them.
///
/// A resolution that "succeeds" can still carry errors; check
/// [`ResourceSet::has_errors`] or use [`ResourceSet::into_infos`].
#[derive(Debug, Default)]
pub struct ResourceSet {
    entries: Vec<Result<Info>>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_info(&mut self, info: Info) {
        self.entries.push(Ok(info));
    }

    pub(crate) fn push_error(&mut self, error: KlientError) {
        self.entries.push(Err(error));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Result<Info>> {
        self.entries.iter()
    }

    pub fn infos(&self) -> impl Iterator<Item = &Info> {
        self.entries.iter().filter_map(|e| e.as_ref().ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = &KlientError> {
        self.entries.iter().filter_map(|e| e.as_ref().err())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// All descriptors, or every error aggregated into one
    pub fn into_infos(self) -> Result<Vec<Info>> {
        let (infos, errors): (Vec<_>, Vec<_>) = self.entries.into_iter().partition(|e| e.is_ok());

        if errors.is_empty() {
            Ok(infos.into_iter().filter_map(|e| e.ok()).collect())
        } else {
            Err(KlientError::Aggregate(
                errors.into_iter().filter_map(|e| e.err()).collect(),
            ))
        }
    }
}

impl IntoIterator for ResourceSet {
    type Item = Result<Info>;
    type IntoIter = std::vec::IntoIter<Result<Info>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResourceSet {
    type Item = &'a Result<Info>;
    type IntoIter = std::slice::Iter<'a, Result<Info>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
