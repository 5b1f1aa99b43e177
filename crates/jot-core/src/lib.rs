//! # jot-core
//!
//! Core types, request validation, and error types for Jot.
//!
//! This crate provides the foundational types shared across all Jot crates:
//! - Entity structs for the journal (tasks, entries, one-on-ones, daily rollups)
//! - Enumerated choices (task type, status, import/export formats, report kinds)
//! - Raw argument structs and their validated, typed requests
//! - Date parsing helpers with the strict/lenient split used by every operation
//! - Entry ID generation and issue URL heuristics
//! - Response types and their markdown renderings

pub mod dates;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod markdown;
pub mod requests;
pub mod responses;
