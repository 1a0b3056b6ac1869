//! Core library for apidocs
//!
//! This crate implements the **Functional Core** of the apidocs application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The apidocs project uses a two-crate architecture to enforce separation of
//! concerns:
//!
//! - **`apidocs_core`** (this crate): Pure transformation functions with zero I/O
//! - **`apidocs`**: I/O operations and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: Behavior is predictable and reproducible
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! The core crate is organized by domain:
//!
//! - [`openapi`]: OpenAPI/Swagger document model, endpoint extraction, and
//!   endpoint search
//! - [`classify`]: Frontend page grouping of endpoints via ordered keyword rules
//! - [`render`]: All user-facing report text (summaries, listings, exports,
//!   code samples)
//! - [`probe`]: Health-check outcome classification and report rendering
//!
//! Each module contains:
//!
//! - **Domain models**: Structured types representing API documents and outputs
//! - **Transformation functions**: Pure functions that convert document data
//!   to domain models and display text
//! - **Comprehensive tests**: Unit tests using fixture data (no mocking)
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use apidocs_core::{classify, openapi};
//!
//! // Parse fixture data (no HTTP required)
//! let doc: serde_json::Value = serde_json::from_str(raw)?;
//!
//! // Transform using pure functions
//! let description = openapi::analyze_document(&doc, "https://api.example.com");
//! let groups = classify::classify(&description.endpoints);
//!
//! // Assert on results (no mocking needed)
//! assert!(!groups.is_empty());
//! ```

pub mod classify;
pub mod openapi;
pub mod probe;
pub mod render;
