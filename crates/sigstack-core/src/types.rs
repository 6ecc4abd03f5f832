//! Common signing-metadata type definitions.

use std::fmt;
use std::str::FromStr;

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Default region.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// AWS partition identifier (e.g. `aws`, `aws-cn`, `aws-us-gov`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PartitionId(String);

impl PartitionId {
    /// The standard commercial partition.
    pub const DEFAULT: &str = "aws";

    /// Create a new partition identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the partition identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PartitionId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request-signing protocol version required by a service.
///
/// Mirrors the `signatureVersions` vocabulary of the upstream endpoints
/// catalog. Services that predate SigV4 still advertise `v2`, and S3 has its
/// own legacy scheme names.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SigningMethod {
    /// AWS Signature Version 4.
    #[default]
    V4,
    /// Legacy AWS Signature Version 2.
    V2,
    /// Legacy S3 signing scheme.
    S3,
    /// S3 variant of Signature Version 4.
    S3v4,
}

impl SigningMethod {
    /// Get the wire name of the signing method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V4 => "v4",
            Self::V2 => "v2",
            Self::S3 => "s3",
            Self::S3v4 => "s3v4",
        }
    }
}

impl fmt::Display for SigningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SigningMethod {
    type Err = crate::SigStackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v4" => Ok(Self::V4),
            "v2" => Ok(Self::V2),
            "s3" => Ok(Self::S3),
            "s3v4" => Ok(Self::S3v4),
            other => Err(crate::SigStackError::InvalidSigningMethod(
                other.to_owned(),
            )),
        }
    }
}

/// Everything a signer needs to produce a valid signature for one endpoint.
///
/// Immutable once constructed. The signing region and signing name are the
/// canonical identifiers that must appear in the credential scope, which may
/// differ from values naively parsed out of the hostname.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEndpoint {
    /// Full endpoint URL, including the `https://` scheme.
    pub url: String,
    /// Signing protocol version.
    pub signing_method: SigningMethod,
    /// Region to embed in the credential scope.
    pub signing_region: AwsRegion,
    /// Service name to embed in the credential scope.
    pub signing_name: String,
    /// Partition the endpoint belongs to.
    pub partition_id: PartitionId,
}

impl ResolvedEndpoint {
    /// Construct an endpoint for a bare host, deriving the URL from it.
    #[must_use]
    pub fn for_host(
        host: impl AsRef<str>,
        signing_method: SigningMethod,
        signing_region: AwsRegion,
        signing_name: impl Into<String>,
        partition_id: PartitionId,
    ) -> Self {
        Self {
            url: format!("https://{}", host.as_ref()),
            signing_method,
            signing_region,
            signing_name: signing_name.into(),
            partition_id,
        }
    }

    /// The bare host of this endpoint: the URL with its scheme prefix
    /// stripped. This is the key under which the endpoint is stored in the
    /// catalog.
    #[must_use]
    pub fn host(&self) -> &str {
        self.url
            .strip_prefix("https://")
            .or_else(|| self.url.strip_prefix("http://"))
            .unwrap_or(&self.url)
    }
}
