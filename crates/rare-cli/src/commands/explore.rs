use anyhow::Context;
use rare_config::RareConfig;
use rare_core::entities::DiseaseQuery;
use rare_roles::TargetExplorer;
use rare_roles::explorer::RegistryExplorer;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::root_commands::ExploreArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct CandidateRow<'a> {
    rank: usize,
    target: &'a str,
    accession: &'a str,
    source: &'a str,
    priority: f64,
    protein: &'a str,
}

/// Handle `rare explore`.
pub async fn handle(
    args: &ExploreArgs,
    config: &RareConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let query = DiseaseQuery::new(&args.disease, &args.hints)?;
    let client = bootstrap::registry_client(config)?;
    let explorer = RegistryExplorer::new(client, config.literature.clone());

    let progress = Progress::spinner(&format!("exploring targets for {}", query.name));
    let exploration = match explorer.explore(&query).await {
        Ok(exploration) => {
            progress.finish_clear();
            exploration
        }
        Err(error) => {
            progress.finish_err("exploration failed");
            return Err(error)
                .with_context(|| format!("target exploration failed for {}", query.name));
        }
    };

    if flags.format != OutputFormat::Table {
        return output(&exploration, flags.format);
    }

    let rows: Vec<CandidateRow<'_>> = exploration
        .candidates
        .iter()
        .enumerate()
        .map(|(i, c)| CandidateRow {
            rank: i + 1,
            target: &c.identifier,
            accession: c.accession.as_deref().unwrap_or("-"),
            source: c.source.as_str(),
            priority: c.priority,
            protein: c.protein_name.as_deref().unwrap_or("-"),
        })
        .collect();
    output(&rows, flags.format)?;
    if let Some(literature) = &exploration.literature {
        eprintln!(
            "{}: {} articles for \"{}\"",
            literature.source, literature.total_count, literature.query
        );
    }
    Ok(())
}
