//! HTTP-level tests for the registry clients against a mock server.

use pretty_assertions::assert_eq;
use rare_config::{LiteratureConfig, RegistryConfig};
use rare_core::entities::{CompoundId, TargetId};
use rare_core::errors::Transient;
use rare_registry::{ReferenceVerifier, RegistryClient, RegistryError};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> RegistryClient {
    let config = RegistryConfig {
        pubchem_url: server.uri(),
        uniprot_url: server.uri(),
        eutils_url: server.uri(),
        min_request_interval_ms: 0,
        request_timeout_secs: 5,
        ..RegistryConfig::default()
    };
    RegistryClient::new(&config).unwrap()
}

fn cids(ids: &[u64]) -> serde_json::Value {
    serde_json::json!({ "IdentifierList": { "CID": ids } })
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(serde_json::json!({
        "Fault": { "Code": "PUGREST.NotFound", "Message": "No CID found" }
    }))
}

#[tokio::test]
async fn compound_resolves_to_first_exact_cid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/compound/name/aspirin/cids/JSON"))
        .and(query_param("name_type", "complete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cids(&[2244, 71_586_930])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cid = client.resolve_compound("aspirin", None).await.unwrap();
    assert_eq!(cid, Some(CompoundId(2244)));
}

#[tokio::test]
async fn unknown_compound_is_absent_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/compound/name/zorblaxin/cids/JSON"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.resolve_compound("zorblaxin", None).await.unwrap(), None);
}

#[tokio::test]
async fn confirmed_cid_hint_skips_name_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/compound/cid/2244/cids/JSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cids(&[2244])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/compound/name/aspirin/cids/JSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cids(&[1])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cid = client
        .resolve_compound("aspirin", Some("CID 2244"))
        .await
        .unwrap();
    assert_eq!(cid, Some(CompoundId(2244)));
}

#[tokio::test]
async fn server_error_is_transient_lookup_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/compound/name/aspirin/cids/JSON"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.resolve_compound("aspirin", None).await.unwrap_err();
    assert!(matches!(err, RegistryError::Api { status: 503, .. }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn rate_limit_reports_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/compound/name/aspirin/cids/JSON"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "2"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.resolve_compound("aspirin", None).await.unwrap_err();
    assert!(matches!(
        err,
        RegistryError::RateLimited {
            retry_after_secs: 2
        }
    ));
}

#[tokio::test]
async fn target_resolves_reviewed_gene() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/search"))
        .and(query_param(
            "query",
            "gene_exact:\"PTGS1\" AND organism_id:9606 AND reviewed:true",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "primaryAccession": "P23219",
                "genes": [{ "geneName": { "value": "PTGS1" } }]
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let target = client.resolve_target("PTGS1").await.unwrap().unwrap();
    assert_eq!(target, TargetId::new("P23219", Some("PTGS1".into())));
}

#[tokio::test]
async fn accession_queries_by_accession() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/search"))
        .and(query_param("query", "accession:P99999 AND reviewed:true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.resolve_target("P99999").await.unwrap().is_none());
}

#[tokio::test]
async fn assay_summary_active_row_is_evidence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/compound/cid/2244/assaysummary/JSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Table": {
                "Columns": { "Column": ["AID", "CID", "Activity Outcome", "Target Accession"] },
                "Row": [
                    { "Cell": [1, 2244, "Active", "P23219"] },
                    { "Cell": [2, 2244, "Inactive", "P35354"] }
                ]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/compound/cid/3672/assaysummary/JSON"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ptgs1 = TargetId::new("P23219", Some("PTGS1".into()));
    let ptgs2 = TargetId::new("P35354", Some("PTGS2".into()));
    assert!(client.has_interaction_evidence(CompoundId(2244), &ptgs1).await.unwrap());
    assert!(!client.has_interaction_evidence(CompoundId(2244), &ptgs2).await.unwrap());
    assert!(!client.has_interaction_evidence(CompoundId(3672), &ptgs1).await.unwrap());
}

#[tokio::test]
async fn disease_search_follows_link_header() {
    let server = MockServer::start().await;
    let next = format!(
        "<{}/uniprotkb/search?cursor=page2&size=100>; rel=\"next\"",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/uniprotkb/search"))
        .and(query_param_is_missing("cursor"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", next.as_str())
                .set_body_json(serde_json::json!({
                    "results": [{ "primaryAccession": "P13569", "genes": [{ "geneName": { "value": "CFTR" } }] }]
                })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/search"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "primaryAccession": "Q9Y6X9", "genes": [] }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let entries = client.uniprot_disease_entries("Cystic fibrosis").await.unwrap();
    let accessions: Vec<&str> = entries.iter().map(|e| e.accession.as_str()).collect();
    assert_eq!(accessions, vec!["P13569", "Q9Y6X9"]);
}

#[tokio::test]
async fn pubmed_search_counts_articles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("term", "Fabry disease[Title/Abstract]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "esearchresult": { "count": "2", "idlist": ["111", "222"] }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let evidence = client
        .pubmed_search("Fabry disease", &LiteratureConfig::default())
        .await
        .unwrap();
    assert_eq!(evidence.total_count, 2);
    assert_eq!(evidence.ids, vec!["111".to_string(), "222".to_string()]);
}
