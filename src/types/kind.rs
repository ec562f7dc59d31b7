// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The closed set of routed resource kinds.

use crate::error::{KubekindError, Result};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{Namespace, Pod, Secret};
use k8s_openapi::api::rbac::v1::{Role, RoleBinding};
use serde::{de::DeserializeOwned, Serialize};
use std::any::{type_name, TypeId};
use std::fmt;

/// A resource value the router can carry.
///
/// Every `k8s-openapi` object satisfies this bound, so unsupported types still compile and are
/// rejected when the call is made.
pub trait TypedResource:
    kube::Resource<DynamicType = ()>
    + Clone
    + fmt::Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
}

impl<K> TypedResource for K where
    K: kube::Resource<DynamicType = ()>
        + Clone
        + fmt::Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static
{
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Namespace,
    Pod,
    Secret,
    Deployment,
    Job,
    Role,
    RoleBinding,
}

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::Namespace,
        Kind::Pod,
        Kind::Secret,
        Kind::Deployment,
        Kind::Job,
        Kind::Role,
        Kind::RoleBinding,
    ];

    /// Resolve the kind routed for `K`, if any
    pub fn of<K: 'static>() -> Option<Kind> {
        let requested = TypeId::of::<K>();
        Kind::ALL.into_iter().find(|kind| kind.rust_type() == requested)
    }

    /// Like [`Kind::of`], failing with `UnsupportedKind` for anything outside the set
    pub fn resolve<K: 'static>() -> Result<Kind> {
        Kind::of::<K>().ok_or(KubekindError::UnsupportedKind {
            type_name: type_name::<K>(),
        })
    }

    fn rust_type(self) -> TypeId {
        match self {
            Kind::Namespace => TypeId::of::<Namespace>(),
            Kind::Pod => TypeId::of::<Pod>(),
            Kind::Secret => TypeId::of::<Secret>(),
            Kind::Deployment => TypeId::of::<Deployment>(),
            Kind::Job => TypeId::of::<Job>(),
            Kind::Role => TypeId::of::<Role>(),
            Kind::RoleBinding => TypeId::of::<RoleBinding>(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Namespace => "Namespace",
            Kind::Pod => "Pod",
            Kind::Secret => "Secret",
            Kind::Deployment => "Deployment",
            Kind::Job => "Job",
            Kind::Role => "Role",
            Kind::RoleBinding => "RoleBinding",
        }
    }

    /// API group, empty for the core group
    pub fn group(self) -> &'static str {
        match self {
            Kind::Namespace | Kind::Pod | Kind::Secret => "",
            Kind::Deployment => "apps",
            Kind::Job => "batch",
            Kind::Role | Kind::RoleBinding => "rbac.authorization.k8s.io",
        }
    }

    pub fn version(self) -> &'static str {
        "v1"
    }

    pub fn plural(self) -> &'static str {
        match self {
            Kind::Namespace => "namespaces",
            Kind::Pod => "pods",
            Kind::Secret => "secrets",
            Kind::Deployment => "deployments",
            Kind::Job => "jobs",
            Kind::Role => "roles",
            Kind::RoleBinding => "rolebindings",
        }
    }

    pub fn is_namespaced(self) -> bool {
        !matches!(self, Kind::Namespace)
    }

    /// Collection path of this kind's accessor.
    ///
    /// The namespace is ignored for cluster-scoped kinds. An empty or missing namespace on a
    /// namespaced kind addresses the collection across all namespaces.
    pub fn url_path(self, namespace: Option<&str>) -> String {
        let base = if self.group().is_empty() {
            format!("/api/{}", self.version())
        } else {
            format!("/apis/{}/{}", self.group(), self.version())
        };

        match namespace.filter(|ns| self.is_namespaced() && !ns.is_empty()) {
            Some(ns) => format!("{}/namespaces/{}/{}", base, ns, self.plural()),
            None => format!("{}/{}", base, self.plural()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
