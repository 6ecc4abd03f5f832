//! Core types and errors for SigStack.
//!
//! This crate provides the shared vocabulary for mapping request hostnames to
//! AWS request-signing metadata: regions, partitions, signing methods, and the
//! [`ResolvedEndpoint`] value that carries everything a signer needs for one
//! request.

mod error;
mod types;

pub use error::{SigStackError, SigStackResult};
pub use types::{AwsRegion, PartitionId, ResolvedEndpoint, SigningMethod};
