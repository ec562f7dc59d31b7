// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! EKS cluster lookup and bearer token generation

use crate::constants::eks::{
    CLUSTER_ID_HEADER, DEFAULT_REGION, PRESIGN_EXPIRY_SECS, STS_QUERY, STS_SERVICE, TOKEN_PREFIX,
};
use crate::error::{KubekindError, Result};
use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_credential_types::Credentials;
use aws_sdk_eks::error::DisplayErrorContext;
use aws_sigv4::http_request::{
    sign, SignableBody, SignableRequest, SignatureLocation, SigningParams, SigningSettings,
};
use aws_sigv4::sign::v4;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use kube::config::{KubeConfigOptions, Kubeconfig};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, instrument};
use url::Url;

/// What a kubeconfig needs to reach an EKS cluster
#[derive(Debug, Clone, PartialEq)]
pub struct EksCluster {
    pub name: String,
    pub endpoint: String,
    /// Base64 encoded PEM bundle, as returned by the EKS API
    pub certificate_authority_data: String,
}

impl EksCluster {
    /// Build a single-context kubeconfig authenticating with `token`
    pub fn kubeconfig(&self, token: &str) -> Result<Kubeconfig> {
        let kubeconfig = serde_json::json!({
            "apiVersion": "v1",
            "kind": "Config",
            "current-context": self.name,
            "clusters": [{
                "name": self.name,
                "cluster": {
                    "server": self.endpoint,
                    "certificate-authority-data": self.certificate_authority_data,
                },
            }],
            "users": [{ "name": self.name, "user": { "token": token } }],
            "contexts": [{
                "name": self.name,
                "context": { "cluster": self.name, "user": self.name },
            }],
        });

        serde_json::from_value(kubeconfig).map_err(|e| {
            KubekindError::Kubeconfig(format!("Failed to build kubeconfig for {}: {}", self.name, e))
        })
    }
}

/// Resolve a client configuration for the named EKS cluster using the shared AWS config
#[instrument]
pub async fn config_for_cluster(cluster_name: &str) -> Result<kube::Config> {
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;

    let cluster = describe_cluster(&sdk_config, cluster_name).await?;
    let token = generate_token(&sdk_config, &cluster.name).await?;
    let kubeconfig = cluster.kubeconfig(&token)?;

    kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| {
            KubekindError::Kubeconfig(format!(
                "Failed to create config for EKS cluster {}: {}",
                cluster_name, e
            ))
        })
}

/// Look up endpoint and certificate authority of an EKS cluster
#[instrument(skip(sdk_config))]
pub async fn describe_cluster(sdk_config: &SdkConfig, cluster_name: &str) -> Result<EksCluster> {
    info!("Describing EKS cluster {}", cluster_name);

    let output = aws_sdk_eks::Client::new(sdk_config)
        .describe_cluster()
        .name(cluster_name)
        .send()
        .await
        .map_err(|e| {
            KubekindError::Eks(format!(
                "Failed to describe cluster {}: {}",
                cluster_name,
                DisplayErrorContext(&e)
            ))
        })?;

    let Some(cluster) = output.cluster() else {
        return Err(KubekindError::Eks(format!(
            "Cluster {} not returned by EKS",
            cluster_name
        )));
    };

    let Some(endpoint) = cluster.endpoint() else {
        return Err(KubekindError::Eks(format!(
            "Cluster {} has no endpoint",
            cluster_name
        )));
    };

    let Some(ca_data) = cluster.certificate_authority().and_then(|ca| ca.data()) else {
        return Err(KubekindError::Eks(format!(
            "Cluster {} has no certificate authority data",
            cluster_name
        )));
    };

    STANDARD.decode(ca_data).map_err(|e| {
        KubekindError::Eks(format!(
            "Invalid certificate authority data for cluster {}: {}",
            cluster_name, e
        ))
    })?;

    Ok(EksCluster {
        name: cluster.name().unwrap_or(cluster_name).to_string(),
        endpoint: endpoint.to_string(),
        certificate_authority_data: ca_data.to_string(),
    })
}

/// Generate a bearer token the cluster's IAM authenticator accepts
#[instrument(skip(sdk_config))]
pub async fn generate_token(sdk_config: &SdkConfig, cluster_name: &str) -> Result<String> {
    let Some(provider) = sdk_config.credentials_provider() else {
        return Err(KubekindError::Eks(
            "No AWS credentials provider configured".to_string(),
        ));
    };

    let credentials = provider
        .provide_credentials()
        .await
        .map_err(|e| KubekindError::Eks(format!("Failed to load AWS credentials: {}", e)))?;

    let region = sdk_config
        .region()
        .map(|r| r.as_ref())
        .unwrap_or(DEFAULT_REGION);

    let url = presign_caller_identity(credentials, region, cluster_name, SystemTime::now())?;
    debug!("Presigned STS request for cluster {}", cluster_name);

    Ok(encode_token(&url))
}

fn sts_url(region: &str) -> Result<Url> {
    let raw = format!("https://sts.{}.amazonaws.com/?{}", region, STS_QUERY);
    Url::parse(&raw).map_err(|e| KubekindError::Eks(format!("Invalid STS URL {}: {}", raw, e)))
}

/// Presign an STS GetCallerIdentity request bound to `cluster_name`
fn presign_caller_identity(
    credentials: Credentials,
    region: &str,
    cluster_name: &str,
    time: SystemTime,
) -> Result<Url> {
    let identity = credentials.into();

    let mut settings = SigningSettings::default();
    settings.signature_location = SignatureLocation::QueryParams;
    settings.expires_in = Some(Duration::from_secs(PRESIGN_EXPIRY_SECS));

    let params: SigningParams = v4::SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name(STS_SERVICE)
        .time(time)
        .settings(settings)
        .build()
        .map_err(|e| KubekindError::Eks(format!("Invalid signing parameters: {}", e)))?
        .into();

    let mut url = sts_url(region)?;
    let signable = SignableRequest::new(
        "GET",
        url.as_str(),
        [(CLUSTER_ID_HEADER, cluster_name)].into_iter(),
        SignableBody::Bytes(&[]),
    )
    .map_err(|e| KubekindError::Eks(format!("Failed to prepare STS request: {}", e)))?;

    let (instructions, _signature) = sign(signable, &params)
        .map_err(|e| KubekindError::Eks(format!("Failed to sign STS request: {}", e)))?
        .into_parts();
    let (_headers, query) = instructions.into_parts();

    {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in &query {
            pairs.append_pair(name, value);
        }
    }

    Ok(url)
}

fn encode_token(presigned: &Url) -> String {
    format!(
        "{}{}",
        TOKEN_PREFIX,
        URL_SAFE_NO_PAD.encode(presigned.as_str())
    )
}
