//! Central schema registry for all RareAgent types.
//!
//! The `SchemaRegistry` builds JSON Schemas from rare-core types at construction
//! time using [`schemars::schema_for!`] and provides validation via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;
use serde::de::DeserializeOwned;

use crate::error::SchemaError;

/// Central store of all JSON Schemas in the RareAgent system.
///
/// Built from rare-core types via [`schemars::schema_for!`]. Provides lookup
/// by name, validation of arbitrary JSON values against registered schemas,
/// and validate-then-deserialize parsing for untrusted input.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a new registry containing the data model, role response,
    /// session result and trail schemas from rare-core.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on any `schemars`-generated
    /// schema. This is not expected in practice because `schemars` always
    /// produces valid JSON-serialisable output.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Data model (8) ---
        register!(schemas, "disease_query", rare_core::entities::DiseaseQuery);
        register!(
            schemas,
            "target_candidate",
            rare_core::entities::TargetCandidate
        );
        register!(schemas, "hypothesis", rare_core::entities::Hypothesis);
        register!(schemas, "critique", rare_core::entities::Critique);
        register!(
            schemas,
            "verification_record",
            rare_core::entities::VerificationRecord
        );
        register!(
            schemas,
            "exclusion_entry",
            rare_core::entities::ExclusionEntry
        );
        register!(schemas, "history_entry", rare_core::entities::HistoryEntry);
        register!(schemas, "session_result", rare_core::result::SessionResult);

        // --- Reasoning-role responses (3) ---
        register!(
            schemas,
            "proposal_response",
            rare_core::responses::ProposalResponse
        );
        register!(
            schemas,
            "critique_response",
            rare_core::responses::CritiqueResponse
        );
        register!(schemas, "exploration", rare_core::responses::Exploration);

        // --- Trail envelope (1) ---
        register!(schemas, "trail_event", rare_core::trail::TrailEvent);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate `instance` against `name`, then deserialize it.
    ///
    /// # Errors
    ///
    /// Any validation error from [`Self::validate`], or
    /// `SchemaError::Deserialize` if the value passes the schema but does not
    /// fit `T`.
    pub fn parse<T: DeserializeOwned>(
        &self,
        name: &str,
        instance: serde_json::Value,
    ) -> Result<T, SchemaError> {
        self.validate(name, &instance)?;
        serde_json::from_value(instance).map_err(|e| SchemaError::Deserialize(e.to_string()))
    }

    /// Parse raw JSON text against a named schema.
    ///
    /// # Errors
    ///
    /// `SchemaError::InvalidJson` if `text` is not JSON, otherwise as [`Self::parse`].
    pub fn parse_str<T: DeserializeOwned>(&self, name: &str, text: &str) -> Result<T, SchemaError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| SchemaError::InvalidJson(e.to_string()))?;
        self.parse(name, value)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
