//! Deterministic validator.
//!
//! The only authority for acceptance. It performs lookups, never reasoning:
//!
//! 1. compound name/hint → canonical CID (else `compound unresolved`)
//! 2. target → canonical UniProt accession (else `target unresolved`)
//! 3. interaction evidence between the two (else `no structural or curated
//!    interaction evidence`)
//! 4. otherwise `verified`
//!
//! Steps 1 and 2 are independent and run concurrently. A registry error is
//! never turned into a rejection: it is returned so the caller can retry.

use rare_core::entities::{
    Hypothesis, REASON_COMPOUND_UNRESOLVED, REASON_NO_INTERACTION_EVIDENCE,
    REASON_TARGET_UNRESOLVED, VerificationRecord,
};
use rare_registry::{ReferenceVerifier, RegistryError};

#[derive(Debug)]
pub struct DeterministicValidator<V> {
    verifier: V,
}

impl<V: ReferenceVerifier> DeterministicValidator<V> {
    pub const fn new(verifier: V) -> Self {
        Self { verifier }
    }

    pub const fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Cross-check a hypothesis against the reference registries.
    ///
    /// # Errors
    ///
    /// Returns the [`RegistryError`] of the first lookup that could not be
    /// answered. No record is produced in that case.
    pub async fn validate(
        &self,
        hypothesis: &Hypothesis,
    ) -> Result<VerificationRecord, RegistryError> {
        let target_key = hypothesis
            .target
            .accession
            .as_deref()
            .unwrap_or(&hypothesis.target.identifier);

        let (compound, target) = tokio::join!(
            self.verifier.resolve_compound(
                &hypothesis.drug_name,
                hypothesis.drug_identifier_hint.as_deref()
            ),
            self.verifier.resolve_target(target_key),
        );
        let (compound, target) = (compound?, target?);

        let Some(compound) = compound else {
            return Ok(VerificationRecord::rejected(
                None,
                target,
                REASON_COMPOUND_UNRESOLVED,
            ));
        };
        let Some(target) = target else {
            return Ok(VerificationRecord::rejected(
                Some(compound),
                None,
                REASON_TARGET_UNRESOLVED,
            ));
        };

        if self
            .verifier
            .has_interaction_evidence(compound, &target)
            .await?
        {
            Ok(VerificationRecord::verified(compound, target))
        } else {
            Ok(VerificationRecord::rejected(
                Some(compound),
                Some(target),
                REASON_NO_INTERACTION_EVIDENCE,
            ))
        }
    }
}
