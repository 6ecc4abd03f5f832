//! Catalog source backed by an `endpoints.json`-shaped document.
//!
//! The upstream SDKs ship their endpoint catalog as a JSON document of
//! partitions, each with a region set and a service map whose endpoint
//! entries optionally override the hostname, credential scope, and signature
//! versions. [`JsonCatalogSource`] deserializes that shape and exposes it
//! through [`CatalogSource`].
//!
//! Endpoint resolution here is deliberately the trivial subset: the hostname
//! defaults to `<service>.<region>.<dnsSuffix>`, the credential scope
//! defaults to the endpoint's own region and service code. The upstream
//! variant machinery (FIPS, dualstack, partition defaults merging) stays out
//! of scope.

use std::collections::BTreeMap;

use sigstack_core::{AwsRegion, PartitionId, SigningMethod};

use crate::source::{CatalogSource, EndpointData, PartitionData, ServiceData};

/// The catalog document could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum SourceParseError {
    /// Malformed JSON or unexpected document shape.
    #[error("invalid endpoints document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document enumerates no partitions at all.
    #[error("endpoints document has no partitions")]
    Empty,
}

#[derive(Debug, serde::Deserialize)]
struct CatalogDocument {
    partitions: Vec<PartitionDocument>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartitionDocument {
    partition: String,
    dns_suffix: String,
    #[serde(default)]
    regions: BTreeMap<String, RegionDocument>,
    #[serde(default)]
    services: BTreeMap<String, ServiceDocument>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct RegionDocument {
    #[serde(default)]
    #[allow(dead_code)]
    description: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ServiceDocument {
    #[serde(default)]
    endpoints: BTreeMap<String, EndpointDocument>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndpointDocument {
    #[serde(default)]
    hostname: Option<String>,
    #[serde(default)]
    credential_scope: Option<CredentialScopeDocument>,
    #[serde(default)]
    signature_versions: Vec<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct CredentialScopeDocument {
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    service: Option<String>,
}

/// A [`CatalogSource`] over a deserialized endpoints document.
#[derive(Debug)]
pub struct JsonCatalogSource {
    document: CatalogDocument,
}

impl JsonCatalogSource {
    /// Parse an endpoints document from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, SourceParseError> {
        let document: CatalogDocument = serde_json::from_str(text)?;
        if document.partitions.is_empty() {
            return Err(SourceParseError::Empty);
        }
        Ok(Self { document })
    }

    fn default_partition(&self) -> &PartitionDocument {
        self.document
            .partitions
            .iter()
            .find(|p| p.partition == PartitionId::DEFAULT)
            .unwrap_or(&self.document.partitions[0])
    }
}

impl CatalogSource for JsonCatalogSource {
    fn partitions(&self) -> Vec<PartitionData> {
        self.document
            .partitions
            .iter()
            .map(|partition| PartitionData {
                id: PartitionId::new(&partition.partition),
                services: partition
                    .services
                    .iter()
                    .map(|(code, service)| ServiceData {
                        code: code.clone(),
                        endpoints: service
                            .endpoints
                            .iter()
                            .map(|(key, endpoint)| {
                                endpoint_data(partition, code, key, endpoint)
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }

    fn default_partition_regions(&self) -> Vec<AwsRegion> {
        self.default_partition()
            .regions
            .keys()
            .map(AwsRegion::new)
            .collect()
    }
}

fn endpoint_data(
    partition: &PartitionDocument,
    service: &str,
    key: &str,
    endpoint: &EndpointDocument,
) -> EndpointData {
    let hostname = endpoint.hostname.as_deref().map_or_else(
        || format!("{service}.{key}.{suffix}", suffix = partition.dns_suffix),
        |hostname| expand_hostname(hostname, service, key, &partition.dns_suffix),
    );

    let scope = endpoint.credential_scope.as_ref();
    let signing_region = scope
        .and_then(|s| s.region.as_deref())
        .unwrap_or(key)
        .to_owned();
    let signing_name = scope
        .and_then(|s| s.service.as_deref())
        .unwrap_or(service)
        .to_owned();

    // The first recognized signature version wins; unknown names are ignored
    // so a newer document cannot break parsing.
    let signing_method = endpoint
        .signature_versions
        .iter()
        .find_map(|v| v.parse::<SigningMethod>().ok());

    EndpointData {
        url: Some(format!("https://{hostname}")),
        signing_method,
        signing_region: Some(AwsRegion::new(signing_region)),
        signing_name: Some(signing_name),
        partition_id: PartitionId::new(&partition.partition),
    }
}

/// Expand the `{service}`, `{region}`, and `{dnsSuffix}` placeholders the
/// document uses in templated hostnames.
fn expand_hostname(template: &str, service: &str, region: &str, dns_suffix: &str) -> String {
    template
        .replace("{service}", service)
        .replace("{region}", region)
        .replace("{dnsSuffix}", dns_suffix)
}
