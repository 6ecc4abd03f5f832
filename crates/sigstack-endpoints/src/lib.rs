//! Endpoint catalog and host resolution for SigStack.
//!
//! This crate answers one question for the signing proxy: given the
//! destination hostname of a request, which service does it belong to and
//! which signing parameters (region, service name, signing method, partition)
//! produce a valid signature for it?
//!
//! The answer is computed in two layers. At process start, the
//! [`EndpointCatalog`] flattens an endpoint catalog source (every partition,
//! service, and endpoint it enumerates) into a single host-keyed map, and
//! augments it with synthesized entries for service families that follow a
//! predictable per-region hostname template. At request time, the
//! [`HostResolver`] consults the catalog with an exact-match lookup, then
//! falls back to an ordered list of pattern rules for service families whose
//! hostnames embed per-deployment identifiers and cannot be enumerated in
//! advance.
//!
//! # Usage
//!
//! ```rust
//! use sigstack_endpoints::{CatalogOptions, EndpointCatalog, HostResolver, JsonCatalogSource};
//!
//! let doc = r#"{"partitions":[{"partition":"aws","dnsSuffix":"amazonaws.com",
//!   "regions":{"us-east-1":{}},
//!   "services":{"dynamodb":{"endpoints":{"us-east-1":{}}}}}]}"#;
//! let source = JsonCatalogSource::from_json(doc).unwrap();
//! let catalog = EndpointCatalog::build(&source, &CatalogOptions::default());
//! let resolver = HostResolver::new(catalog);
//!
//! let endpoint = resolver.resolve("dynamodb.us-east-1.amazonaws.com").unwrap();
//! assert_eq!(endpoint.signing_name, "dynamodb");
//! ```
//!
//! # Modules
//!
//! - [`catalog`] - Host-keyed endpoint catalog, built once and read-only after
//! - [`json`] - Catalog source backed by an `endpoints.json`-shaped document
//! - [`resolver`] - Per-request host resolution
//! - [`rules`] - Pattern-based fallback rules for non-enumerable hostnames
//! - [`source`] - Catalog source abstraction

pub mod catalog;
pub mod json;
pub mod resolver;
pub mod rules;
pub mod source;

pub use catalog::{
    BuildReport, CatalogOptions, EndpointCatalog, HostCollision, HostTemplate, SyntheticFamily,
};
pub use json::{JsonCatalogSource, SourceParseError};
pub use resolver::HostResolver;
pub use rules::{FallbackRule, RuleError, default_rules};
pub use source::{CatalogSource, EndpointData, EndpointError, PartitionData, ServiceData};
