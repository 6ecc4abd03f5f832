//! Pattern-based fallback rules.
//!
//! Some service families embed a per-deployment identifier in their hostnames
//! (a node ID, an account-scoped prefix), so their endpoints cannot be
//! enumerated into the catalog ahead of time. Each such family gets a
//! [`FallbackRule`]: a cheap substring pre-check plus a regex that extracts
//! the region out of the host. Rules run only after an exact catalog miss, in
//! declaration order, first match wins.

use regex::Regex;

use sigstack_core::{AwsRegion, PartitionId, ResolvedEndpoint, SigningMethod};

/// A fallback rule for one service family.
#[derive(Debug, Clone)]
pub struct FallbackRule {
    service: String,
    marker: String,
    pattern: Regex,
    method: SigningMethod,
    partition: PartitionId,
}

/// Error constructing a fallback rule.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The region-extraction pattern failed to compile.
    #[error("invalid fallback pattern for {service}: {source}")]
    InvalidPattern {
        /// Service the rule was being built for.
        service: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}

impl FallbackRule {
    /// Create a rule.
    ///
    /// `marker` is a substring pre-check applied before the regex; `pattern`
    /// must capture the signing region in its first capture group.
    pub fn new(
        service: impl Into<String>,
        marker: impl Into<String>,
        pattern: &str,
        method: SigningMethod,
        partition: PartitionId,
    ) -> Result<Self, RuleError> {
        let service = service.into();
        let pattern = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
            service: service.clone(),
            source,
        })?;
        Ok(Self {
            service,
            marker: marker.into(),
            pattern,
            method,
            partition,
        })
    }

    /// The service family this rule resolves to.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Try to resolve a host with this rule.
    ///
    /// Returns `None` when the host does not belong to the family, and also
    /// when it passes the substring pre-check but the region capture comes up
    /// empty. A malformed host must fall through to the next rule (or to "no
    /// match"), never fault the resolver.
    #[must_use]
    pub fn apply(&self, host: &str) -> Option<ResolvedEndpoint> {
        if !host.contains(&self.marker) {
            return None;
        }
        let captures = self.pattern.captures(host)?;
        let region = captures.get(1).map(|m| m.as_str()).filter(|r| !r.is_empty())?;

        Some(ResolvedEndpoint::for_host(
            host,
            self.method,
            AwsRegion::new(region),
            self.service.clone(),
            self.partition.clone(),
        ))
    }
}

/// The built-in fallback chain.
///
/// Currently one family: Managed Blockchain, whose hostnames carry a
/// per-node identifier ahead of the service segment.
#[must_use]
pub fn default_rules() -> Vec<FallbackRule> {
    vec![
        FallbackRule::new(
            "managedblockchain",
            ".managedblockchain.",
            r"\.managedblockchain\.([a-z0-9-]+)\.amazonaws\.com$",
            SigningMethod::V4,
            PartitionId::default(),
        )
        .expect("static rule pattern should be valid"),
    ]
}
