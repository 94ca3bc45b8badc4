// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Building resource sets from files, URLs and streams.

pub mod builder;
pub mod decode;
pub mod info;
pub mod options;
pub mod set;
pub mod source;
pub mod typed;

pub use builder::ResourceBuilder;
pub use info::{describe_failure, Info, Object};
pub use options::{BuildOptions, FilenameOptions};
pub use set::ResourceSet;
pub use typed::TypedObject;
