//! # rare-schema
//!
//! JSON Schema generation, validation, and registry for RareAgent.
//!
//! This crate provides:
//! - `SchemaRegistry`: central store of the JSON Schemas for the data model,
//!   reasoning-role responses, session results and trail events
//! - Strict parsing of reasoning-role output: validate against the schema
//!   first, deserialize second
//! - Schema export for external tooling (`rare schema` command)
//!
//! ## Architecture
//!
//! Types are defined in `rare-core` with `#[derive(JsonSchema)]`.
//! This crate imports those types and provides the registry and validation layer.
//! `rare-roles` depends on it to reject malformed role responses at the boundary.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
