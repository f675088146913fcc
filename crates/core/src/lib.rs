//! Core library for handoff
//!
//! This crate implements the **Functional Core** of the handoff application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The handoff project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`handoff_core`** (this crate): Pure transformation functions with zero I/O
//! - **`handoff`**: I/O operations and orchestration (the Imperative Shell)
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
//! - [`classify`]: Categorization and selection of uploaded session files
//! - [`prompt`]: Generation modes and prompt template rendering
//!
//! Each module contains domain models, the pure transformation functions that
//! operate on them, and fixture-driven unit tests.
//!
//! Determinism matters here: the prompt sent upstream for a given transcript,
//! code body, and mode must be byte-for-byte reproducible, so rendered prompts
//! can be asserted on in tests without any mocking.

pub mod classify;
pub mod prompt;
