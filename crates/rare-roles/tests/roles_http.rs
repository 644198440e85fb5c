//! Role implementations against mock reasoning and registry endpoints.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rare_config::{LiteratureConfig, ReasoningConfig, RegistryConfig};
use rare_core::entities::{DiseaseQuery, TargetCandidate};
use rare_core::enums::{CritiqueVerdict, TargetSource};
use rare_core::errors::{FailureKind, Transient};
use rare_core::ids::HypothesisId;
use rare_registry::RegistryClient;
use rare_roles::explorer::RegistryExplorer;
use rare_roles::llm::ChatClient;
use rare_roles::policy::SkepticPolicy;
use rare_roles::proponent::LlmProponent;
use rare_roles::skeptic::LlmSkeptic;
use rare_roles::{Proponent, ProposalContext, RoleError, Skeptic, TargetExplorer};
use rare_schema::SchemaRegistry;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_for(server: &MockServer) -> ChatClient {
    ChatClient::new(&ReasoningConfig {
        endpoint: format!("{}/openai/v1/chat/completions", server.uri()),
        api_key: "gsk_test".into(),
        ..ReasoningConfig::default()
    })
    .unwrap()
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
}

async fn mount_completion(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .respond_with(completion(content))
        .mount(server)
        .await;
}

#[tokio::test]
async fn proponent_builds_hypothesis_for_context() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        "```json\n{\"drug_name\": \"Migalastat\", \"drug_identifier_hint\": \"CID 176077\", \"mechanism\": \"pharmacological chaperone\", \"rationale\": \"stabilizes amenable GLA variants\"}\n```",
    )
    .await;

    let proponent = LlmProponent::new(chat_for(&server), Arc::new(SchemaRegistry::new()));
    let target = TargetCandidate::hint("GLA");
    let ctx = ProposalContext {
        disease: "Fabry disease",
        id: HypothesisId::new(3),
        iteration_index: 3,
        parent: None,
        target: &target,
        exclusions: &[],
        feedback: &[],
        history: &[],
    };
    let hypothesis = proponent.propose(&ctx).await.unwrap();
    assert_eq!(hypothesis.id, HypothesisId::new(3));
    assert_eq!(hypothesis.drug_name, "Migalastat");
    assert_eq!(hypothesis.drug_identifier_hint.as_deref(), Some("CID 176077"));
    assert_eq!(hypothesis.target.identifier, "GLA");
}

#[tokio::test]
async fn proponent_schema_violation_is_retryable_reasoning_failure() {
    let server = MockServer::start().await;
    mount_completion(&server, "{\"drug\": \"Migalastat\"}").await;

    let proponent = LlmProponent::new(chat_for(&server), Arc::new(SchemaRegistry::new()));
    let target = TargetCandidate::hint("GLA");
    let ctx = ProposalContext {
        disease: "Fabry disease",
        id: HypothesisId::new(1),
        iteration_index: 1,
        parent: None,
        target: &target,
        exclusions: &[],
        feedback: &[],
        history: &[],
    };
    let err = proponent.propose(&ctx).await.unwrap_err();
    assert!(matches!(err, RoleError::Schema(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn blank_proposal_is_retryable_reasoning_failure() {
    let server = MockServer::start().await;
    mount_completion(&server, r#"{"drug_name": "   ", "mechanism": " "}"#).await;

    let proponent = LlmProponent::new(chat_for(&server), Arc::new(SchemaRegistry::new()));
    let target = TargetCandidate::hint("GLA");
    let ctx = ProposalContext {
        disease: "Fabry disease",
        id: HypothesisId::new(1),
        iteration_index: 1,
        parent: None,
        target: &target,
        exclusions: &[],
        feedback: &[],
        history: &[],
    };
    let err = proponent.propose(&ctx).await.unwrap_err();
    assert!(matches!(err, RoleError::Schema(_) | RoleError::Malformed(_)));
    assert!(err.is_transient());
    assert_eq!(err.failure_kind(), FailureKind::ReasoningUnavailable);
}

#[tokio::test]
async fn skeptic_verdict_comes_from_policy() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        r#"{"reasons": [{"text": "insufficient affinity evidence", "severity": 0.8}], "confidence": 0.9}"#,
    )
    .await;

    let proponent_server = MockServer::start().await;
    mount_completion(
        &proponent_server,
        r#"{"drug_name": "Imatinib", "mechanism": "kinase inhibitor"}"#,
    )
    .await;
    let schemas = Arc::new(SchemaRegistry::new());
    let proponent = LlmProponent::new(chat_for(&proponent_server), schemas.clone());
    let target = TargetCandidate::hint("GLA");
    let hypothesis = proponent
        .propose(&ProposalContext {
            disease: "Fabry disease",
            id: HypothesisId::new(1),
            iteration_index: 1,
            parent: None,
            target: &target,
            exclusions: &[],
            feedback: &[],
            history: &[],
        })
        .await
        .unwrap();

    let skeptic = LlmSkeptic::new(chat_for(&server), schemas, SkepticPolicy::default());
    let critique = skeptic.critique("Fabry disease", &hypothesis).await.unwrap();
    assert_eq!(critique.verdict, CritiqueVerdict::Revise);
    assert_eq!(critique.reasons, vec!["insufficient affinity evidence"]);
}

#[tokio::test]
async fn reasoning_server_error_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let chat = chat_for(&server);
    let err = chat.complete_json("system", "user").await.unwrap_err();
    assert!(matches!(err, RoleError::Api { status: 502, .. }));
    assert!(err.is_transient());
}

fn registry_for(server: &MockServer) -> Arc<RegistryClient> {
    Arc::new(
        RegistryClient::new(&RegistryConfig {
            uniprot_url: server.uri(),
            eutils_url: server.uri(),
            pubchem_url: server.uri(),
            min_request_interval_ms: 0,
            ..RegistryConfig::default()
        })
        .unwrap(),
    )
}

#[tokio::test]
async fn explorer_merges_hints_and_uniprot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "primaryAccession": "P06280",
                    "genes": [{ "geneName": { "value": "GLA" } }],
                    "comments": [{
                        "commentType": "DISEASE",
                        "disease": { "diseaseId": "Fabry disease", "description": "X-linked lysosomal storage disorder" }
                    }]
                },
                {
                    "primaryAccession": "P17405",
                    "genes": [{ "geneName": { "value": "SMPD1" } }],
                    "comments": []
                }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "esearchresult": { "count": "42", "idlist": ["1", "2"] }
        })))
        .mount(&server)
        .await;

    let explorer = RegistryExplorer::new(registry_for(&server), LiteratureConfig::default());
    let query = DiseaseQuery::new("Fabry disease", &["LAMP2".to_string()]).unwrap();
    let exploration = explorer.explore(&query).await.unwrap();

    let order: Vec<&str> = exploration
        .candidates
        .iter()
        .map(|c| c.identifier.as_str())
        .collect();
    assert_eq!(order, vec!["LAMP2", "GLA", "SMPD1"]);
    assert_eq!(exploration.candidates[0].source, TargetSource::Hint);
    assert_eq!(exploration.literature.unwrap().total_count, 42);
}

#[tokio::test]
async fn explorer_without_sources_or_hints_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let explorer = RegistryExplorer::new(registry_for(&server), LiteratureConfig::default());
    let query = DiseaseQuery::new("Fabry disease", &[]).unwrap();
    let err = explorer.explore(&query).await.unwrap_err();
    assert!(matches!(err, RoleError::DataSourceUnavailable(_)));
}

#[tokio::test]
async fn explorer_falls_back_to_hints_when_uniprot_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let explorer = RegistryExplorer::new(registry_for(&server), LiteratureConfig::default());
    let query = DiseaseQuery::new("Fabry disease", &["GLA".to_string()]).unwrap();
    let exploration = explorer.explore(&query).await.unwrap();
    assert_eq!(exploration.candidates.len(), 1);
    assert!(exploration.literature.is_none());
}
