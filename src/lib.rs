// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use error::{KubekindError, Result};
pub use kubernetes::{create, delete, get, list, Connection};
pub use types::{Kind, TypedResource};
