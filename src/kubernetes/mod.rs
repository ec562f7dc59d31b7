// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster access: connections, per-kind accessors and the typed router.

pub mod accessor;
pub mod connection;
pub mod eks;
pub mod router;

pub use accessor::{accessor_for, ClientAccessor, ResourceAccessor};
pub use connection::Connection;
pub use router::{create, delete, get, list};
