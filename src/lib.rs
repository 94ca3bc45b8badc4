// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod connection;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod resource;

#[cfg(test)]
mod test_utils;

pub use connection::Connection;
pub use error::{KlientError, Result};
pub use resource::{describe_failure, BuildOptions, Info, ResourceSet};
