//! Catalog source abstraction.
//!
//! The endpoint catalog is consumed as a black box: something that enumerates
//! partitions, their services, and their endpoints, and can resolve each
//! endpoint to signing metadata. Modeling the boundary as a trait over plain
//! data carriers keeps the builder independent of where the data comes from
//! and lets tests inject synthetic catalogs.

use sigstack_core::{AwsRegion, PartitionId, ResolvedEndpoint, SigningMethod};

/// A source of endpoint catalog data.
///
/// Implementations enumerate the full partition/service/endpoint tree. The
/// builder walks it exactly once at startup; sources are never queried at
/// request time.
pub trait CatalogSource {
    /// Enumerate all partitions with their services and endpoints.
    fn partitions(&self) -> Vec<PartitionData>;

    /// The region set of the default partition, used to synthesize entries
    /// for service families with templated hostnames.
    fn default_partition_regions(&self) -> Vec<AwsRegion>;
}

/// One partition as enumerated by a catalog source.
#[derive(Debug, Clone)]
pub struct PartitionData {
    /// Partition identifier.
    pub id: PartitionId,
    /// Services available in the partition.
    pub services: Vec<ServiceData>,
}

/// One service within a partition.
#[derive(Debug, Clone)]
pub struct ServiceData {
    /// Service code (e.g. `dynamodb`).
    pub code: String,
    /// Endpoints the service is reachable at.
    pub endpoints: Vec<EndpointData>,
}

/// The pre-resolution view of a single endpoint.
///
/// Fields the source could not determine are left unset; [`EndpointData::resolve`]
/// turns a complete view into a [`ResolvedEndpoint`] and reports which field
/// was missing otherwise.
#[derive(Debug, Clone)]
pub struct EndpointData {
    /// Full endpoint URL, if known.
    pub url: Option<String>,
    /// Signing protocol version; defaults to SigV4 when unset.
    pub signing_method: Option<SigningMethod>,
    /// Region for the credential scope, if known.
    pub signing_region: Option<AwsRegion>,
    /// Service name for the credential scope, if known.
    pub signing_name: Option<String>,
    /// Partition the endpoint belongs to.
    pub partition_id: PartitionId,
}

/// Why a single endpoint could not be resolved.
///
/// These are never fatal: the builder skips the endpoint and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// The source enumerated an endpoint without a URL.
    #[error("endpoint in partition {0} has no URL")]
    MissingUrl(PartitionId),

    /// No signing region could be determined for the endpoint.
    #[error("endpoint {0} has no signing region")]
    MissingSigningRegion(String),

    /// No signing name could be determined for the endpoint.
    #[error("endpoint {0} has no signing name")]
    MissingSigningName(String),
}

impl EndpointData {
    /// Resolve this endpoint to its signing metadata.
    ///
    /// Requires a URL, signing region, and signing name; the signing method
    /// defaults to SigV4 when the source did not specify one.
    pub fn resolve(&self) -> Result<ResolvedEndpoint, EndpointError> {
        let url = self
            .url
            .clone()
            .ok_or_else(|| EndpointError::MissingUrl(self.partition_id.clone()))?;
        let signing_region = self
            .signing_region
            .clone()
            .ok_or_else(|| EndpointError::MissingSigningRegion(url.clone()))?;
        let signing_name = self
            .signing_name
            .clone()
            .ok_or_else(|| EndpointError::MissingSigningName(url.clone()))?;

        Ok(ResolvedEndpoint {
            url,
            signing_method: self.signing_method.unwrap_or_default(),
            signing_region,
            signing_name,
            partition_id: self.partition_id.clone(),
        })
    }
}
