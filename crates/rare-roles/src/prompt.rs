//! Prompt construction for the reasoning roles.

use std::fmt::Write;

use rare_core::entities::Hypothesis;

use crate::ProposalContext;

pub const PROPONENT_SYSTEM: &str = "\
You are a translational pharmacologist proposing drug-repurposing hypotheses for rare diseases. \
Propose one existing, approved drug that could modulate the given target. \
Prefer drugs with a known interaction with the target. \
Never propose a drug listed as excluded. \
Answer with a single JSON object and nothing else: \
{\"drug_name\": string, \"drug_identifier_hint\": string or null (PubChem CID such as \"CID 2244\"), \
\"mechanism\": string, \"rationale\": string}";

pub const SKEPTIC_SYSTEM: &str = "\
You are an adversarial clinical reviewer auditing a drug-repurposing hypothesis. \
Look for dose-limiting toxicities, severe off-target effects, failed clinical trials, \
weak target-affinity evidence and pathways that work against the proposed mechanism. \
Score each objection's severity from 0 to 1 and set \"contraindication\" to true only for a \
known contraindication class such as a confirmed antagonistic pathway. \
Answer with a single JSON object and nothing else: \
{\"reasons\": [{\"text\": string, \"severity\": number, \"contraindication\": boolean}], \
\"confidence\": number between 0 and 1}";

/// User message for one proposal.
#[must_use]
pub fn proponent_prompt(ctx: &ProposalContext<'_>) -> String {
    let target = ctx.target;
    let mut out = String::new();
    let _ = writeln!(out, "Disease: {}", ctx.disease);
    let _ = write!(out, "Target: {}", target.identifier);
    if let Some(accession) = &target.accession {
        let _ = write!(out, " (UniProt {accession})");
    }
    out.push('\n');
    if let Some(name) = &target.protein_name {
        let _ = writeln!(out, "Protein: {name}");
    }
    if let Some(phenotype) = &target.phenotype {
        let _ = writeln!(out, "Disease association: {phenotype}");
    }

    if ctx.exclusions.is_empty() {
        out.push_str("Excluded (target, drug) pairs: none\n");
    } else {
        out.push_str("Excluded (target, drug) pairs, do not propose these again:\n");
        for entry in ctx.exclusions {
            let _ = writeln!(
                out,
                "- ({}, {}): {}",
                entry.target_identifier, entry.drug_identifier, entry.rejection_reason
            );
        }
    }

    let tried = ctx.tried_drugs();
    if !tried.is_empty() {
        let _ = writeln!(
            out,
            "Drugs already proposed this session, propose a different one unless revising: {}",
            tried.join(", ")
        );
    }

    if let Some(parent) = ctx.parent {
        let _ = writeln!(
            out,
            "Previous proposal: {} ({})",
            parent.drug_name, parent.proposed_mechanism
        );
    }

    if !ctx.feedback.is_empty() {
        out.push_str("Reviewer feedback on the previous proposal. Address every point:\n");
        for item in ctx.feedback {
            let _ = writeln!(out, "- {item}");
        }
    }

    out
}

/// User message for one critique.
#[must_use]
pub fn skeptic_prompt(disease: &str, hypothesis: &Hypothesis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Disease: {disease}");
    let _ = writeln!(out, "Drug: {}", hypothesis.drug_name);
    if let Some(hint) = &hypothesis.drug_identifier_hint {
        let _ = writeln!(out, "Drug identifier: {hint}");
    }
    let _ = writeln!(out, "Target: {}", hypothesis.target.identifier);
    let _ = writeln!(out, "Mechanism: {}", hypothesis.proposed_mechanism);
    if !hypothesis.rationale.is_empty() {
        let _ = writeln!(out, "Rationale: {}", hypothesis.rationale);
    }
    out
}
