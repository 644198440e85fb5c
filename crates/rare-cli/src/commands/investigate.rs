use std::sync::Arc;

use anyhow::{Context, bail};
use rare_config::{RareConfig, SessionConfig};
use rare_core::entities::DiseaseQuery;
use rare_core::result::SessionResult;
use rare_engine::{CancelHandle, Orchestrator, TrailWriter};
use rare_registry::{ReferenceVerifier, RegistryClient, RegistrySnapshot};
use rare_roles::explorer::RegistryExplorer;
use rare_roles::policy::SkepticPolicy;
use rare_roles::proponent::LlmProponent;
use rare_roles::skeptic::LlmSkeptic;
use rare_schema::SchemaRegistry;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::root_commands::InvestigateArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;
use crate::progress::Progress;

/// One line of `rare investigate --format table`.
#[derive(Debug, Serialize)]
struct SummaryRow {
    session: String,
    outcome: &'static str,
    drug: Option<String>,
    target: Option<String>,
    compound: Option<u64>,
    accession: Option<String>,
    hypotheses: usize,
    reason: Option<String>,
}

impl From<&SessionResult> for SummaryRow {
    fn from(result: &SessionResult) -> Self {
        let mut row = Self {
            session: result.session_id().to_string(),
            outcome: result.outcome(),
            drug: None,
            target: None,
            compound: None,
            accession: None,
            hypotheses: result.history().len(),
            reason: None,
        };
        match result {
            SessionResult::Accepted {
                hypothesis, record, ..
            } => {
                row.drug = Some(hypothesis.drug_name.clone());
                row.target = Some(hypothesis.target.identifier.clone());
                row.compound = record.compound_id.map(|cid| cid.0);
                row.accession = record.target_id.as_ref().map(|t| t.accession.clone());
            }
            SessionResult::LimitReached { advisory, .. } => {
                if let Some(advisory) = advisory {
                    row.drug = Some(advisory.drug_name.clone());
                    row.target = Some(advisory.target.identifier.clone());
                    row.reason = Some("advisory only, not verified".to_string());
                }
            }
            SessionResult::Exhausted { .. } => {
                row.reason = Some("every candidate target was exhausted".to_string());
            }
            SessionResult::InfrastructureFailure { failure, .. } => {
                row.reason = Some(format!(
                    "{} in {}: {}",
                    failure.kind, failure.last_state, failure.reason
                ));
            }
        }
        row
    }
}

/// Handle `rare investigate`.
pub async fn handle(
    args: &InvestigateArgs,
    config: &RareConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = session_config(args, config);
    let queries = args
        .diseases
        .iter()
        .map(|disease| DiseaseQuery::new(disease, &args.hints))
        .collect::<Result<Vec<_>, _>>()?;

    let client = bootstrap::registry_client(config)?;
    let results = match &args.snapshot {
        Some(path) => {
            let snapshot = RegistrySnapshot::load(path)
                .with_context(|| format!("failed to load snapshot {}", path.display()))?;
            investigate(snapshot, client, queries, session, config).await?
        }
        None => {
            let verifier = Arc::clone(&client);
            investigate(verifier, client, queries, session, config).await?
        }
    };

    report(&results, flags.format)?;

    let failed = results
        .iter()
        .filter(|r| matches!(r, SessionResult::InfrastructureFailure { .. }))
        .count();
    if failed > 0 {
        bail!("{failed} of {} session(s) ended on an infrastructure failure", results.len());
    }
    Ok(())
}

fn session_config(args: &InvestigateArgs, config: &RareConfig) -> SessionConfig {
    let mut session = config.session.clone();
    if let Some(max) = args.max_iterations {
        session.max_iterations = max;
    }
    if let Some(dir) = &args.trail_dir {
        session.trail_dir = dir.display().to_string();
    }
    session
}

async fn investigate<V: ReferenceVerifier>(
    verifier: V,
    client: Arc<RegistryClient>,
    queries: Vec<DiseaseQuery>,
    session: SessionConfig,
    config: &RareConfig,
) -> anyhow::Result<Vec<SessionResult>> {
    let schemas = Arc::new(SchemaRegistry::new());
    let chat = bootstrap::chat_client(config)?;
    let explorer = RegistryExplorer::new(client, config.literature.clone());
    let proponent = LlmProponent::new(chat.clone(), Arc::clone(&schemas));
    let skeptic = LlmSkeptic::new(chat, schemas, SkepticPolicy::from(&config.skeptic));

    let trail = session.has_trail().then(|| session.trail_dir.clone());
    let mut orchestrator = Orchestrator::new(explorer, proponent, skeptic, verifier, session)
        .context("invalid session configuration")?;
    if let Some(dir) = trail {
        let writer = TrailWriter::new(&dir)
            .with_context(|| format!("failed to create trail directory {dir}"))?;
        orchestrator = orchestrator.with_trail(writer);
    }

    let cancel = CancelHandle::new();
    let watcher = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupted, cancelling sessions");
                cancel.cancel();
            }
        }
    });

    let label = if queries.len() == 1 {
        format!("investigating {}", queries[0].name)
    } else {
        format!("investigating {} diseases", queries.len())
    };
    let progress = Progress::spinner(&label);
    let results = orchestrator
        .start_sessions_with_cancel(queries, &cancel)
        .await;
    progress.finish_clear();
    watcher.abort();

    Ok(results)
}

fn report(results: &[SessionResult], format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Table {
        let rows: Vec<SummaryRow> = results.iter().map(SummaryRow::from).collect();
        return output(&rows, format);
    }
    match results {
        [single] => output(single, format),
        _ => output(&results, format),
    }
}
