// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-kind operation surface the router dispatches to.

use crate::error::Result;
use crate::types::{Kind, TypedResource};
use async_trait::async_trait;
use kube::{
    api::{DeleteParams, GetParams, ListParams, ObjectList, PostParams},
    core::Request,
    Client,
};
use std::marker::PhantomData;

/// The get/list/create/delete calls of one kind, already bound to a namespace.
///
/// Errors are the client's own and must reach the caller untouched.
#[async_trait]
pub trait ResourceAccessor<K: Clone>: Send + Sync {
    async fn get(&self, name: &str, params: &GetParams) -> kube::Result<K>;
    async fn list(&self, params: &ListParams) -> kube::Result<ObjectList<K>>;
    /// Takes the request body by value; the caller keeps its own copy.
    async fn create(&self, params: &PostParams, object: K) -> kube::Result<K>;
    async fn delete(&self, name: &str, params: &DeleteParams) -> kube::Result<()>;
}

/// Accessor issuing requests against the kind's collection path through a [`Client`]
pub struct ClientAccessor<K> {
    client: Client,
    request: Request,
    _resource: PhantomData<fn() -> K>,
}

impl<K> ClientAccessor<K> {
    pub(crate) fn new(client: Client, url_path: String) -> Self {
        Self {
            client,
            request: Request::new(url_path),
            _resource: PhantomData,
        }
    }

    pub fn url_path(&self) -> &str {
        &self.request.url_path
    }
}

#[async_trait]
impl<K: TypedResource> ResourceAccessor<K> for ClientAccessor<K> {
    async fn get(&self, name: &str, params: &GetParams) -> kube::Result<K> {
        let mut req = self
            .request
            .get(name, params)
            .map_err(kube::Error::BuildRequest)?;
        req.extensions_mut().insert("get");
        self.client.request::<K>(req).await
    }

    async fn list(&self, params: &ListParams) -> kube::Result<ObjectList<K>> {
        let mut req = self
            .request
            .list(params)
            .map_err(kube::Error::BuildRequest)?;
        req.extensions_mut().insert("list");
        self.client.request::<ObjectList<K>>(req).await
    }

    async fn create(&self, params: &PostParams, object: K) -> kube::Result<K> {
        let body = serde_json::to_vec(&object).map_err(kube::Error::SerdeError)?;
        let mut req = self
            .request
            .create(params, body)
            .map_err(kube::Error::BuildRequest)?;
        req.extensions_mut().insert("create");
        self.client.request::<K>(req).await
    }

    async fn delete(&self, name: &str, params: &DeleteParams) -> kube::Result<()> {
        let mut req = self
            .request
            .delete(name, params)
            .map_err(kube::Error::BuildRequest)?;
        req.extensions_mut().insert("delete");
        // The server answers with either the object or a Status; both mean success
        self.client.request_status::<K>(req).await.map(|_| ())
    }
}

/// Bind the accessor of `K`'s own kind to `namespace`.
///
/// Fails with [`KubekindError::UnsupportedKind`](crate::KubekindError::UnsupportedKind) for types
/// outside [`Kind::ALL`].
pub fn accessor_for<K: TypedResource>(
    client: &Client,
    namespace: &str,
) -> Result<Box<dyn ResourceAccessor<K>>> {
    Ok(Kind::resolve::<K>()?.accessor::<K>(client, namespace))
}

impl Kind {
    /// Bind this kind's accessor, applying `namespace` only for namespaced kinds.
    /// `self` must be the kind resolved for `K`.
    pub(crate) fn accessor<K: TypedResource>(
        self,
        client: &Client,
        namespace: &str,
    ) -> Box<dyn ResourceAccessor<K>> {
        Box::new(ClientAccessor::new(
            client.clone(),
            self.url_path(Some(namespace)),
        ))
    }
}
