//! # rare-core
//!
//! Core types shared across all RareAgent crates.
//!
//! This crate provides:
//! - Entity structs for the investigation data model (disease queries, target
//!   candidates, hypotheses, critiques, verification records, exclusions)
//! - Workflow state enum with allowed transitions
//! - Session and hypothesis identifiers
//! - Failure taxonomy and the `Transient` retry classification
//! - Reasoning-role response payloads (validated against JSON Schema at the boundary)
//! - Terminal session results
//! - Audit trail event envelope for JSONL persistence

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod result;
pub mod trail;
