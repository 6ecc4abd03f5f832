//! Per-request host resolution.
//!
//! The resolver is the single query surface of this crate: the proxy hands it
//! the destination host of an inbound request and gets back either the
//! signing metadata for that host or `None`, meaning "do not sign". The
//! resolver is pure and synchronous; it performs no I/O and holds no locks,
//! so one instance behind an `Arc` serves any number of concurrent requests.

use sigstack_core::ResolvedEndpoint;

use crate::catalog::EndpointCatalog;
use crate::rules::{FallbackRule, default_rules};

/// Resolves request hostnames to signing metadata.
///
/// Exact catalog lookup is the fast path; the ordered fallback-rule chain
/// covers service families whose hostnames cannot be pre-enumerated.
#[derive(Debug)]
pub struct HostResolver {
    catalog: EndpointCatalog,
    rules: Vec<FallbackRule>,
}

impl HostResolver {
    /// Create a resolver over a built catalog, with the built-in fallback
    /// chain.
    #[must_use]
    pub fn new(catalog: EndpointCatalog) -> Self {
        Self::with_rules(catalog, default_rules())
    }

    /// Create a resolver with a custom fallback chain.
    ///
    /// Rules are evaluated in the order given; the first match wins.
    #[must_use]
    pub fn with_rules(catalog: EndpointCatalog, rules: Vec<FallbackRule>) -> Self {
        Self { catalog, rules }
    }

    /// The catalog this resolver reads from.
    #[must_use]
    pub fn catalog(&self) -> &EndpointCatalog {
        &self.catalog
    }

    /// Resolve a host to its signing metadata.
    ///
    /// The host is normalized (lowercased, trailing dot and port stripped),
    /// then looked up exactly in the catalog; on a miss the fallback rules
    /// run in order. `None` means the host is not a known service endpoint
    /// and the request should pass through unsigned — an expected outcome,
    /// not an error.
    #[must_use]
    pub fn resolve(&self, host: &str) -> Option<ResolvedEndpoint> {
        let host = normalize_host(host);

        if let Some(endpoint) = self.catalog.get(&host) {
            tracing::debug!(host = %host, service = %endpoint.signing_name, "exact catalog match");
            return Some(endpoint.clone());
        }

        for rule in &self.rules {
            if let Some(endpoint) = rule.apply(&host) {
                tracing::debug!(host = %host, service = %rule.service(), "fallback rule match");
                return Some(endpoint);
            }
        }

        tracing::trace!(host = %host, "no signing metadata for host");
        None
    }
}

/// Normalize a host for lookup: trim whitespace, drop a single trailing dot
/// (FQDN form), drop a numeric `:port` suffix, and lowercase.
fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host.strip_suffix('.').unwrap_or(host);
    let host = match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    };
    host.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogOptions;
    use crate::source::{CatalogSource, EndpointData, PartitionData, ServiceData};
    use sigstack_core::{AwsRegion, PartitionId, SigningMethod};

    struct FakeSource;

    impl CatalogSource for FakeSource {
        fn partitions(&self) -> Vec<PartitionData> {
            vec![PartitionData {
                id: PartitionId::default(),
                services: vec![ServiceData {
                    code: "dynamodb".to_owned(),
                    endpoints: vec![EndpointData {
                        url: Some("https://dynamodb.us-east-1.amazonaws.com".to_owned()),
                        signing_method: Some(SigningMethod::V4),
                        signing_region: Some(AwsRegion::new("us-east-1")),
                        signing_name: Some("dynamodb".to_owned()),
                        partition_id: PartitionId::default(),
                    }],
                }],
            }]
        }

        fn default_partition_regions(&self) -> Vec<AwsRegion> {
            vec![AwsRegion::new("us-east-1")]
        }
    }

    fn resolver() -> HostResolver {
        HostResolver::new(EndpointCatalog::build(&FakeSource, &CatalogOptions::default()))
    }

    #[test]
    fn test_should_resolve_exact_catalog_match() {
        let endpoint = resolver()
            .resolve("dynamodb.us-east-1.amazonaws.com")
            .unwrap();
        assert_eq!(endpoint.signing_name, "dynamodb");
    }

    #[test]
    fn test_should_normalize_case_trailing_dot_and_port() {
        let resolver = resolver();
        assert!(resolver.resolve("DynamoDB.US-East-1.amazonaws.com").is_some());
        assert!(resolver.resolve("dynamodb.us-east-1.amazonaws.com.").is_some());
        assert!(resolver.resolve("dynamodb.us-east-1.amazonaws.com:443").is_some());
        assert!(resolver.resolve("  dynamodb.us-east-1.amazonaws.com ").is_some());
    }

    #[test]
    fn test_should_fall_back_to_pattern_rules_after_exact_miss() {
        let endpoint = resolver()
            .resolve("abcdefghij1234567890.managedblockchain.us-east-1.amazonaws.com")
            .unwrap();
        assert_eq!(endpoint.signing_name, "managedblockchain");
        assert_eq!(endpoint.signing_region.as_str(), "us-east-1");
    }

    #[test]
    fn test_should_return_none_for_unknown_host() {
        assert!(resolver().resolve("not-a-real-host.example.com").is_none());
    }

    #[test]
    fn test_should_return_none_for_malformed_fallback_host() {
        // Contains the family marker but no region segment.
        assert!(resolver().resolve("node.managedblockchain.amazonaws.com").is_none());
    }

    #[test]
    fn test_should_apply_first_matching_rule_only() {
        let catalog = EndpointCatalog::build(&FakeSource, &CatalogOptions::default());
        let rules = vec![
            FallbackRule::new(
                "first",
                ".shared.",
                r"\.shared\.([a-z0-9-]+)\.amazonaws\.com$",
                SigningMethod::V4,
                PartitionId::default(),
            )
            .unwrap(),
            FallbackRule::new(
                "second",
                ".shared.",
                r"\.shared\.([a-z0-9-]+)\.amazonaws\.com$",
                SigningMethod::V4,
                PartitionId::default(),
            )
            .unwrap(),
        ];
        let resolver = HostResolver::with_rules(catalog, rules);

        let endpoint = resolver.resolve("x.shared.us-east-1.amazonaws.com").unwrap();
        assert_eq!(endpoint.signing_name, "first");
    }

    #[test]
    fn test_should_prefer_exact_match_over_rules() {
        let resolver = resolver();
        // Synthesized execute-api entry wins over any rule evaluation.
        let endpoint = resolver.resolve("execute-api.us-east-1.amazonaws.com").unwrap();
        assert_eq!(endpoint.signing_name, "execute-api");
        assert_eq!(endpoint.signing_method, SigningMethod::V4);
    }

    #[test]
    fn test_should_share_resolver_across_threads() {
        let resolver = std::sync::Arc::new(resolver());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let resolver = resolver.clone();
                std::thread::spawn(move || {
                    resolver.resolve("dynamodb.us-east-1.amazonaws.com").is_some()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
