// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::env as vars;
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

/// Where the cluster credentials come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionSource {
    InCluster,
    /// Kubeconfig file, `$HOME/.kube/config` when no path is given
    Kubeconfig { path: Option<PathBuf> },
    Eks { cluster_name: String },
}

/// Connection configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub source: ConnectionSource,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which resolves a variable name to its value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let source = lookup(vars::SOURCE).unwrap_or_else(|| "kubeconfig".to_string());

        let source = match source.trim().to_ascii_lowercase().as_str() {
            "kubeconfig" => ConnectionSource::Kubeconfig {
                path: lookup(vars::KUBECONFIG)
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from),
            },
            "in-cluster" | "incluster" => ConnectionSource::InCluster,
            "eks" => ConnectionSource::Eks {
                cluster_name: lookup(vars::EKS_CLUSTER)
                    .filter(|name| !name.is_empty())
                    .with_context(|| {
                        format!("{} environment variable not set", vars::EKS_CLUSTER)
                    })?,
            },
            other => bail!(
                "Unknown {} '{}', expected kubeconfig, in-cluster or eks",
                vars::SOURCE,
                other
            ),
        };

        Ok(Config { source })
    }
}
