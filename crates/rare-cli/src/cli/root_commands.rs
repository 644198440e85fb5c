use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run investigations to a verified hypothesis or a terminal result.
    Investigate(InvestigateArgs),
    /// Check one drug/target pair against the reference registries.
    Validate(ValidateArgs),
    /// List prioritized candidate targets for a disease.
    Explore(ExploreArgs),
    /// Print a JSON Schema, or list the available ones.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct InvestigateArgs {
    /// Disease names; each one runs as an independent session.
    #[arg(required = true)]
    pub diseases: Vec<String>,

    /// Known target gene symbol, tried first (repeatable).
    #[arg(long = "hint")]
    pub hints: Vec<String>,

    /// Override session.max_iterations.
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Validate against an offline registry snapshot instead of PubChem/UniProt.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Write a JSONL audit trail per session into this directory.
    #[arg(long)]
    pub trail_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// Drug name.
    #[arg(long)]
    pub drug: String,

    /// Target gene symbol or UniProt accession.
    #[arg(long)]
    pub target: String,

    /// Compound identifier hint (e.g. "CID 2244").
    #[arg(long)]
    pub hint: Option<String>,

    /// Validate against an offline registry snapshot.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ExploreArgs {
    pub disease: String,

    /// Known target gene symbol (repeatable).
    #[arg(long = "hint")]
    pub hints: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name; omit to list every registered schema.
    pub name: Option<String>,
}
