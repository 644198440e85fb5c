use anyhow::Context;
use rare_config::RareConfig;
use rare_core::entities::{Hypothesis, TargetCandidate, VerificationRecord};
use rare_core::errors::FailureKind;
use rare_core::ids::HypothesisId;
use rare_engine::{DeterministicValidator, StepPolicy};
use rare_registry::{ReferenceVerifier, RegistrySnapshot};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::output::output;
use crate::progress::Progress;

/// Handle `rare validate`.
pub async fn handle(
    args: &ValidateArgs,
    config: &RareConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let hypothesis = standalone_hypothesis(args);
    let policy = StepPolicy::from_config(&config.session);

    let record = match &args.snapshot {
        Some(path) => {
            let snapshot = RegistrySnapshot::load(path)?;
            validate_with(snapshot, &policy, &hypothesis).await?
        }
        None => {
            let client = bootstrap::registry_client(config)?;
            validate_with(client, &policy, &hypothesis).await?
        }
    };
    output(&record, flags.format)
}

async fn validate_with<V: ReferenceVerifier>(
    verifier: V,
    policy: &StepPolicy,
    hypothesis: &Hypothesis,
) -> anyhow::Result<VerificationRecord> {
    let validator = DeterministicValidator::new(verifier);
    let progress = Progress::spinner(&format!(
        "validating {} against {}",
        hypothesis.drug_name, hypothesis.target.identifier
    ));
    let record = policy
        .run("validate", FailureKind::LookupUnavailable, || {
            validator.validate(hypothesis)
        })
        .await;
    progress.finish_clear();
    record.context("reference registries unavailable")
}

/// A hypothesis carrying only what the validator reads.
fn standalone_hypothesis(args: &ValidateArgs) -> Hypothesis {
    Hypothesis {
        id: HypothesisId::new(1),
        parent: None,
        drug_name: args.drug.trim().to_string(),
        drug_identifier_hint: args.hint.clone(),
        target: TargetCandidate::hint(&args.target),
        proposed_mechanism: String::new(),
        rationale: String::new(),
        iteration_index: 0,
    }
}
