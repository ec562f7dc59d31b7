// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed CRUD over the routed kinds.
//!
//! The kind is taken from the type parameter alone. Types outside [`Kind::ALL`] fail with
//! [`KubekindError::UnsupportedKind`](crate::KubekindError::UnsupportedKind) before any request
//! is made; everything the cluster API returns is passed back as-is.

use crate::error::Result;
use crate::types::{Kind, TypedResource};
use kube::{
    api::{DeleteParams, GetParams, ListParams, PostParams},
    Client,
};
use std::any::type_name;
use tracing::{debug, instrument, warn};

fn route<K: TypedResource>() -> Result<Kind> {
    Kind::resolve::<K>().inspect_err(|_| warn!("Rejected unsupported kind {}", type_name::<K>()))
}

/// Get a single resource by name
#[instrument(skip(client, params), fields(kind = %type_name::<K>()))]
pub async fn get<K: TypedResource>(
    client: &Client,
    namespace: &str,
    name: &str,
    params: &GetParams,
) -> Result<K> {
    let kind = route::<K>()?;
    debug!("Getting {} {}/{}", kind, namespace, name);

    let item = kind.accessor::<K>(client, namespace).get(name, params).await?;
    Ok(item)
}

/// List resources in server order
#[instrument(skip(client, params), fields(kind = %type_name::<K>()))]
pub async fn list<K: TypedResource>(
    client: &Client,
    namespace: &str,
    params: &ListParams,
) -> Result<Vec<K>> {
    let kind = route::<K>()?;
    debug!("Listing {} in namespace '{}'", kind, namespace);

    let list = kind.accessor::<K>(client, namespace).list(params).await?;
    debug!("Listed {} {} resources", list.items.len(), kind);
    Ok(list.items)
}

/// Create a resource from a copy of `spec`
#[instrument(skip(client, spec, params), fields(kind = %type_name::<K>()))]
pub async fn create<K: TypedResource>(
    client: &Client,
    namespace: &str,
    spec: &K,
    params: &PostParams,
) -> Result<K> {
    let kind = route::<K>()?;
    let object = spec.clone();
    debug!(
        "Creating {} {}/{}",
        kind,
        namespace,
        object.meta().name.as_deref().unwrap_or_default()
    );

    let created = kind
        .accessor::<K>(client, namespace)
        .create(params, object)
        .await?;
    Ok(created)
}

/// Delete a resource by name
#[instrument(skip(client, params), fields(kind = %type_name::<K>()))]
pub async fn delete<K: TypedResource>(
    client: &Client,
    namespace: &str,
    name: &str,
    params: &DeleteParams,
) -> Result<()> {
    let kind = route::<K>()?;
    debug!("Deleting {} {}/{}", kind, namespace, name);

    kind.accessor::<K>(client, namespace).delete(name, params).await?;
    Ok(())
}
