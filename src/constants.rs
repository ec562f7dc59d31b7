// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read by [`crate::config::Config::from_env`]
pub mod env {
    /// Connection source: `kubeconfig` (default), `in-cluster` or `eks`
    pub const SOURCE: &str = "KUBEKIND_SOURCE";
    /// Kubeconfig path for the `kubeconfig` source (optional)
    pub const KUBECONFIG: &str = "KUBEKIND_KUBECONFIG";
    /// EKS cluster name, required for the `eks` source
    pub const EKS_CLUSTER: &str = "KUBEKIND_EKS_CLUSTER";
}

/// Kubeconfig location relative to the home directory
pub const DEFAULT_KUBECONFIG: [&str; 2] = [".kube", "config"];

/// EKS bearer token generation
pub mod eks {
    pub const TOKEN_PREFIX: &str = "k8s-aws-v1.";
    /// Header binding the presigned request to one cluster
    pub const CLUSTER_ID_HEADER: &str = "x-k8s-aws-id";
    pub const STS_SERVICE: &str = "sts";
    pub const STS_QUERY: &str = "Action=GetCallerIdentity&Version=2011-06-15";
    pub const PRESIGN_EXPIRY_SECS: u64 = 60;
    pub const DEFAULT_REGION: &str = "us-east-1";
}
