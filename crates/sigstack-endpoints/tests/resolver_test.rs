//! End-to-end resolution over a JSON-backed catalog.

use sigstack_core::SigningMethod;
use sigstack_endpoints::{
    CatalogOptions, CatalogSource, EndpointCatalog, HostResolver, JsonCatalogSource,
};

const DOC: &str = r#"{
    "partitions": [
        {
            "partition": "aws",
            "dnsSuffix": "amazonaws.com",
            "regions": {
                "us-east-1": {},
                "us-west-2": {},
                "eu-west-1": {}
            },
            "services": {
                "dynamodb": {
                    "endpoints": {
                        "us-east-1": {},
                        "us-west-2": {},
                        "eu-west-1": {}
                    }
                },
                "sqs": {
                    "endpoints": {
                        "us-east-1": {},
                        "eu-west-1": {}
                    }
                },
                "iam": {
                    "endpoints": {
                        "aws-global": {
                            "hostname": "iam.amazonaws.com",
                            "credentialScope": { "region": "us-east-1" }
                        }
                    }
                },
                "s3": {
                    "endpoints": {
                        "us-east-1": {
                            "hostname": "s3.amazonaws.com",
                            "signatureVersions": ["s3v4"]
                        }
                    }
                }
            }
        },
        {
            "partition": "aws-us-gov",
            "dnsSuffix": "amazonaws.com",
            "regions": { "us-gov-west-1": {} },
            "services": {
                "dynamodb": { "endpoints": { "us-gov-west-1": {} } }
            }
        }
    ]
}"#;

fn resolver() -> HostResolver {
    let source = JsonCatalogSource::from_json(DOC).unwrap();
    HostResolver::new(EndpointCatalog::build(&source, &CatalogOptions::default()))
}

#[test]
fn test_should_resolve_every_source_host_round_trip() {
    let source = JsonCatalogSource::from_json(DOC).unwrap();
    let resolver = resolver();

    for partition in source.partitions() {
        for service in partition.services {
            for endpoint in service.endpoints {
                let resolved = endpoint.resolve().unwrap();
                let host = resolved.host().to_owned();
                let answer = resolver.resolve(&host).unwrap();
                assert_eq!(answer.host(), host, "round-trip failed for {host}");
            }
        }
    }
}

#[test]
fn test_should_build_identical_catalogs_from_same_document() {
    let source = JsonCatalogSource::from_json(DOC).unwrap();
    let options = CatalogOptions::default();

    let first = EndpointCatalog::build(&source, &options);
    let second = EndpointCatalog::build(&source, &options);

    assert_eq!(first.len(), second.len());
    let mut hosts: Vec<&str> = first.hosts().collect();
    hosts.sort_unstable();
    for host in hosts {
        assert_eq!(first.get(host), second.get(host));
    }
}

#[test]
fn test_should_resolve_api_gateway_endpoint() {
    let endpoint = resolver()
        .resolve("execute-api.us-east-1.amazonaws.com")
        .unwrap();
    assert_eq!(endpoint.signing_method, SigningMethod::V4);
    assert_eq!(endpoint.signing_name, "execute-api");
    assert_eq!(endpoint.signing_region.as_str(), "us-east-1");
    assert_eq!(endpoint.partition_id.as_str(), "aws");
}

#[test]
fn test_should_resolve_elasticsearch_endpoint() {
    let endpoint = resolver().resolve("us-west-2.es.amazonaws.com").unwrap();
    assert_eq!(endpoint.signing_name, "es");
    assert_eq!(endpoint.signing_region.as_str(), "us-west-2");
}

#[test]
fn test_should_resolve_managed_blockchain_node_host() {
    let endpoint = resolver()
        .resolve("abcdefghij1234567890.managedblockchain.us-east-1.amazonaws.com")
        .unwrap();
    assert_eq!(endpoint.signing_name, "managedblockchain");
    assert_eq!(endpoint.signing_region.as_str(), "us-east-1");
    assert_eq!(endpoint.signing_method, SigningMethod::V4);
}

#[test]
fn test_should_return_none_for_unknown_host() {
    assert!(resolver().resolve("not-a-real-host.example.com").is_none());
}

#[test]
fn test_should_return_none_for_marker_host_without_region() {
    assert!(
        resolver()
            .resolve("node.managedblockchain.amazonaws.com")
            .is_none()
    );
}

#[test]
fn test_should_resolve_global_endpoint_with_scoped_region() {
    let endpoint = resolver().resolve("iam.amazonaws.com").unwrap();
    assert_eq!(endpoint.signing_region.as_str(), "us-east-1");
    assert_eq!(endpoint.signing_name, "iam");
}

#[test]
fn test_should_resolve_s3_with_its_own_signature_scheme() {
    let endpoint = resolver().resolve("s3.amazonaws.com").unwrap();
    assert_eq!(endpoint.signing_method, SigningMethod::S3v4);
}

#[test]
fn test_should_keep_partitions_distinct_for_shared_dns_suffix() {
    // us-gov endpoints live under the same DNS suffix but a different partition.
    let endpoint = resolver()
        .resolve("dynamodb.us-gov-west-1.amazonaws.com")
        .unwrap();
    assert_eq!(endpoint.partition_id.as_str(), "aws-us-gov");
}

#[test]
fn test_should_report_no_collisions_for_current_dataset() {
    let source = JsonCatalogSource::from_json(DOC).unwrap();
    let catalog = EndpointCatalog::build(&source, &CatalogOptions::default());
    assert!(
        catalog.report().collisions.is_empty(),
        "distinct services collided: {:?}",
        catalog.report().collisions
    );
    assert_eq!(catalog.report().skipped, 0);
}
