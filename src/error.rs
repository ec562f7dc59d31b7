// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubekindError {
    /// The requested type is not one of the routed kinds. Never retryable.
    #[error("{type_name} is not supported")]
    UnsupportedKind { type_name: &'static str },

    /// Errors from the cluster API, passed through untouched.
    #[error(transparent)]
    Kube(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    Kubeconfig(String),

    #[error("Failed to load in-cluster config: {0}")]
    InCluster(String),

    #[error("EKS connection failed: {0}")]
    Eks(String),

    #[error("Document is a {found}, expected {expected}")]
    KindMismatch { expected: String, found: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KubekindError {
    pub fn is_unsupported_kind(&self) -> bool {
        matches!(self, KubekindError::UnsupportedKind { .. })
    }

    /// Whether the cluster API answered 404 for the request
    pub fn is_not_found(&self) -> bool {
        matches!(self, KubekindError::Kube(kube::Error::Api(err)) if err.code == 404)
    }
}

pub type Result<T> = std::result::Result<T, KubekindError>;
