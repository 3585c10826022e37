//! Parameter source backed by the AWS command line client.

use super::{ClusterParameters, ParameterSource};
use crate::kubeconfig::{KubeconfigError, Result};
use serde::Deserialize;
use std::process::Command;
use tracing::debug;

/// Shape of `aws eks describe-cluster --output json`, reduced to the fields
/// a kubeconfig needs.
#[derive(Debug, Deserialize)]
struct DescribeClusterOutput {
    cluster: DescribedCluster,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribedCluster {
    endpoint: Option<String>,
    certificate_authority: Option<CertificateAuthority>,
}

#[derive(Debug, Deserialize)]
struct CertificateAuthority {
    data: Option<String>,
}

/// AwsCliSource runs `aws eks describe-cluster` once per fetch.
///
/// There is no retry; a failed call fails the fetch.
#[derive(Debug, Clone)]
pub struct AwsCliSource {
    program: String,
}

impl Default for AwsCliSource {
    fn default() -> Self {
        AwsCliSource::new("aws")
    }
}

impl AwsCliSource {
    /// Uses `program` as the AWS client executable.
    pub fn new(program: impl Into<String>) -> Self {
        AwsCliSource {
            program: program.into(),
        }
    }

    fn describe(&self, region: &str, cluster: &str) -> Result<Vec<u8>> {
        debug!(program = %self.program, region, cluster, "describing cluster");
        let output = Command::new(&self.program)
            .args(["eks", "describe-cluster", "--name", cluster, "--region", region, "--output", "json"])
            .output()
            .map_err(|e| {
                KubeconfigError::parameter_source(format!("failed to run '{}': {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KubeconfigError::parameter_source(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(output.stdout)
    }
}

impl ParameterSource for AwsCliSource {
    fn fetch(&self, region: &str, cluster: &str) -> Result<ClusterParameters> {
        let stdout = self.describe(region, cluster)?;
        parse_describe_cluster(cluster, &stdout)
    }
}

/// Extracts connection parameters from a describe-cluster JSON response.
pub fn parse_describe_cluster(cluster: &str, json: &[u8]) -> Result<ClusterParameters> {
    let described: DescribeClusterOutput = serde_json::from_slice(json).map_err(|e| {
        KubeconfigError::parameter_source(format!("unexpected describe-cluster output: {}", e))
    })?;

    let endpoint = described.cluster.endpoint.ok_or_else(|| {
        KubeconfigError::parameter_source(format!("cluster '{}' has no endpoint yet", cluster))
    })?;
    let ca_data = described
        .cluster
        .certificate_authority
        .and_then(|ca| ca.data)
        .ok_or_else(|| {
            KubeconfigError::parameter_source(format!(
                "cluster '{}' has no certificate authority data yet",
                cluster
            ))
        })?;

    Ok(ClusterParameters {
        cluster_name: cluster.to_string(),
        endpoint,
        ca_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIBE_OUTPUT: &str = r#"{
    "cluster": {
        "name": "prod",
        "arn": "arn:aws:eks:us-west-2:123456789012:cluster/prod",
        "status": "ACTIVE",
        "endpoint": "https://x.example",
        "certificateAuthority": {
            "data": "QUJD"
        }
    }
}"#;

    #[test]
    fn test_parse_describe_cluster() {
        let params = parse_describe_cluster("prod", DESCRIBE_OUTPUT.as_bytes()).unwrap();
        assert_eq!(params.cluster_name, "prod");
        assert_eq!(params.endpoint, "https://x.example");
        assert_eq!(params.ca_data, "QUJD");
    }

    #[test]
    fn test_parse_creating_cluster_fails() {
        let json = r#"{"cluster": {"name": "prod", "status": "CREATING"}}"#;
        let err = parse_describe_cluster("prod", json.as_bytes()).unwrap_err();

        assert!(matches!(err, KubeconfigError::ParameterSource { .. }));
        assert!(err.to_string().contains("no endpoint"));
    }

    #[test]
    fn test_parse_garbage_fails() {
        let err = parse_describe_cluster("prod", b"not json").unwrap_err();
        assert!(matches!(err, KubeconfigError::ParameterSource { .. }));
    }

    #[test]
    fn test_missing_program_fails() {
        let source = AwsCliSource::new("/nonexistent/aws-cli-for-tests");
        let err = source.fetch("us-west-2", "prod").unwrap_err();

        assert!(matches!(err, KubeconfigError::ParameterSource { .. }));
        assert!(err.to_string().contains("failed to run"));
    }
}
