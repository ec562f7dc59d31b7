// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource kinds and the bound shared by routed values.

pub mod kind;

pub use kind::{Kind, TypedResource};
