// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation from the supported credential sources

use crate::config::ConnectionSource;
use crate::constants::DEFAULT_KUBECONFIG;
use crate::error::{KubekindError, Result};
use crate::kubernetes::eks;
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config as KConfig,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{debug, info, instrument};

static INSTALL_CRYPTO_PROVIDER: Once = Once::new();

/// Install aws-lc-rs as the process-wide rustls provider, shared with the AWS SDK.
///
/// Must run before the first client is built. Another provider installed by the host
/// application is left in place.
pub fn install_crypto_provider() {
    INSTALL_CRYPTO_PROVIDER.call_once(|| {
        if rustls::crypto::aws_lc_rs::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed for this process, keeping it");
        }
    });
}

/// A ready client together with the configuration it was built from
#[derive(Clone)]
pub struct Connection {
    pub config: KConfig,
    pub client: Client,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("cluster_url", &self.config.cluster_url)
            .field("default_namespace", &self.config.default_namespace)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Create a client from an explicit configuration
    pub fn from_config(config: KConfig) -> Result<Self> {
        install_crypto_provider();
        let client = Client::try_from(config.clone())?;
        info!("Created client for {}", config.cluster_url);

        Ok(Self { config, client })
    }

    /// Create a client from the service account mounted into the pod
    #[instrument]
    pub fn in_cluster() -> Result<Self> {
        let config = KConfig::incluster().map_err(|e| KubekindError::InCluster(e.to_string()))?;
        Self::from_config(config)
    }

    /// Create a client from `$HOME/.kube/config`
    pub async fn from_kubeconfig() -> Result<Self> {
        Self::from_kubeconfig_path(default_kubeconfig_path()?).await
    }

    /// Create a client from the current context of a kubeconfig file
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn from_kubeconfig_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
            KubekindError::Kubeconfig(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| {
                KubekindError::Kubeconfig(format!("Failed to create config: {}", e))
            })?;

        Self::from_config(config)
    }

    /// Create a client for an EKS cluster using the shared AWS credentials
    pub async fn from_eks(cluster_name: &str) -> Result<Self> {
        let config = eks::config_for_cluster(cluster_name).await?;
        Self::from_config(config)
    }

    /// Create a client from a configured source
    pub async fn from_source(source: &ConnectionSource) -> Result<Self> {
        match source {
            ConnectionSource::InCluster => Self::in_cluster(),
            ConnectionSource::Kubeconfig { path: Some(path) } => {
                Self::from_kubeconfig_path(path).await
            }
            ConnectionSource::Kubeconfig { path: None } => Self::from_kubeconfig().await,
            ConnectionSource::Eks { cluster_name } => Self::from_eks(cluster_name).await,
        }
    }
}

/// `$HOME/.kube/config`
pub fn default_kubeconfig_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        KubekindError::Kubeconfig("Could not determine home directory".to_string())
    })?;

    Ok(DEFAULT_KUBECONFIG
        .iter()
        .fold(home, |path, segment| path.join(segment)))
}
