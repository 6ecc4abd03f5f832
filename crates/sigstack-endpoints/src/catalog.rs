//! Host-keyed endpoint catalog.
//!
//! The catalog flattens the nested partition/service/endpoint structure of a
//! [`CatalogSource`] into one map from bare hostname to [`ResolvedEndpoint`].
//! It is built exactly once at process start and is read-only afterwards, so
//! any number of concurrent resolution calls can read it without locking.

use std::collections::HashMap;

use sigstack_core::{AwsRegion, PartitionId, ResolvedEndpoint, SigningMethod};

use crate::source::CatalogSource;

/// How a synthetic service family composes its per-region hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostTemplate {
    /// `<service>.<region>.<suffix>` (e.g. `execute-api.us-east-1.amazonaws.com`).
    ServicePrefixed,
    /// `<region>.<service>.<suffix>` (e.g. `us-west-2.es.amazonaws.com`).
    RegionPrefixed,
}

impl HostTemplate {
    fn render(self, service: &str, region: &AwsRegion, suffix: &str) -> String {
        match self {
            Self::ServicePrefixed => format!("{service}.{region}.{suffix}"),
            Self::RegionPrefixed => format!("{region}.{service}.{suffix}"),
        }
    }
}

/// A service family whose endpoints follow a fixed per-region hostname
/// template but are not enumerated by the catalog source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticFamily {
    /// Service code, also used as the signing name.
    pub service: String,
    /// Hostname template for the family.
    pub template: HostTemplate,
}

impl SyntheticFamily {
    /// Create a synthetic family.
    #[must_use]
    pub fn new(service: impl Into<String>, template: HostTemplate) -> Self {
        Self {
            service: service.into(),
            template,
        }
    }
}

/// Build-time options for the catalog.
///
/// The options value is constructed explicitly and injected into
/// [`EndpointCatalog::build`]; there is no hidden global configuration.
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Partition assigned to synthesized entries.
    pub partition: PartitionId,
    /// DNS suffix for synthesized hostnames.
    pub dns_suffix: String,
    /// Service families to synthesize entries for.
    pub synthetic_families: Vec<SyntheticFamily>,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            partition: PartitionId::default(),
            dns_suffix: "amazonaws.com".to_owned(),
            synthetic_families: vec![
                // API Gateway endpoints are per-API but sign as execute-api.
                SyntheticFamily::new("execute-api", HostTemplate::ServicePrefixed),
                // Elasticsearch domains hang off a region-first hostname.
                SyntheticFamily::new("es", HostTemplate::RegionPrefixed),
            ],
        }
    }
}

/// Two distinct services mapped to the same hostname during the build.
///
/// The later entry wins in the catalog (preserved source behavior), but the
/// collision is reported so a dataset regression can fail tests instead of
/// silently shadowing a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCollision {
    /// The shared hostname.
    pub host: String,
    /// Service that first claimed the host.
    pub first_service: String,
    /// Service that overwrote it.
    pub second_service: String,
}

/// Summary of a catalog build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Endpoints resolved and inserted from the source.
    pub resolved: usize,
    /// Endpoints skipped because resolution failed.
    pub skipped: usize,
    /// Entries added by synthetic augmentation.
    pub synthesized: usize,
    /// Hosts claimed by more than one distinct service.
    pub collisions: Vec<HostCollision>,
}

/// Mapping from bare hostname to signing metadata.
///
/// Keys are normalized (lowercase, scheme stripped) bare hosts, never URLs.
/// The catalog exposes no mutation after [`build`](Self::build) returns.
#[derive(Debug)]
pub struct EndpointCatalog {
    entries: HashMap<String, ResolvedEndpoint>,
    report: BuildReport,
}

impl EndpointCatalog {
    /// Flatten a catalog source into a host-keyed catalog.
    ///
    /// Every (partition, service, endpoint) triple the source enumerates is
    /// resolved and inserted under its bare host. A triple whose resolution
    /// fails is skipped and counted, never fatal: a partially built catalog
    /// that serves requests beats a startup abort. When the same host appears
    /// under multiple triples the last write wins, and collisions between
    /// distinct services are recorded in the [`BuildReport`].
    ///
    /// Afterwards, one entry per (synthetic family, default-partition region)
    /// pair is synthesized with signing method `v4` and the family's service
    /// code as signing name. Synthesis overwrites equal entries rather than
    /// duplicating them, so building twice yields an identical catalog.
    #[must_use]
    pub fn build(source: &dyn CatalogSource, options: &CatalogOptions) -> Self {
        let mut entries = HashMap::new();
        let mut owners: HashMap<String, String> = HashMap::new();
        let mut report = BuildReport::default();

        for partition in source.partitions() {
            for service in partition.services {
                for endpoint in &service.endpoints {
                    let resolved = match endpoint.resolve() {
                        Ok(resolved) => resolved,
                        Err(error) => {
                            report.skipped += 1;
                            tracing::warn!(
                                partition = %partition.id,
                                service = %service.code,
                                %error,
                                "skipping unresolvable endpoint"
                            );
                            continue;
                        }
                    };

                    let host = resolved.host().to_ascii_lowercase();
                    if let Some(previous) = owners.insert(host.clone(), service.code.clone()) {
                        if previous != service.code {
                            tracing::warn!(
                                host = %host,
                                first = %previous,
                                second = %service.code,
                                "distinct services share a hostname; last write wins"
                            );
                            report.collisions.push(HostCollision {
                                host: host.clone(),
                                first_service: previous,
                                second_service: service.code.clone(),
                            });
                        }
                    }
                    entries.insert(host, resolved);
                    report.resolved += 1;
                }
            }
        }

        for region in source.default_partition_regions() {
            for family in &options.synthetic_families {
                let host = family
                    .template
                    .render(&family.service, &region, &options.dns_suffix);
                let resolved = ResolvedEndpoint::for_host(
                    &host,
                    SigningMethod::V4,
                    region.clone(),
                    family.service.clone(),
                    options.partition.clone(),
                );
                entries.insert(host, resolved);
                report.synthesized += 1;
            }
        }

        tracing::debug!(
            entries = entries.len(),
            resolved = report.resolved,
            skipped = report.skipped,
            synthesized = report.synthesized,
            "endpoint catalog built"
        );

        Self { entries, report }
    }

    /// Look up the endpoint stored under a normalized bare host.
    #[must_use]
    pub fn get(&self, host: &str) -> Option<&ResolvedEndpoint> {
        self.entries.get(host)
    }

    /// Number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the catalog's hostname keys.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The build report for this catalog.
    #[must_use]
    pub fn report(&self) -> &BuildReport {
        &self.report
    }
}
