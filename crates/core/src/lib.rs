//! Core library for recipegen
//!
//! This crate implements the **Functional Core** of the recipegen application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The recipegen project uses a three-crate architecture to enforce separation of concerns:
//!
//! - **`recipegen_core`** (this crate): Pure transformation functions with zero I/O
//! - **`pdf`**: Document layout and serialization for the downloadable artifact
//! - **`recipegen`**: Network calls, the web form, and the CLI (the Imperative Shell)
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
//! - [`request`]: The validated recipe request and its enumerated form choices
//! - [`prompt`]: Prompt composition from an ordered list of clause builders
//! - [`completion`]: Chat-completion wire types and response parsing
//! - [`translate`]: Translation form payload and response extraction
//! - [`session`]: The form session state machine
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use recipegen_core::prompt::compose;
//! use recipegen_core::request::{Cuisine, Diet, RecipeRequest, Servings};
//!
//! let request = RecipeRequest {
//!     ingredients: "tomato, rice".to_string(),
//!     servings: Servings::new(2)?,
//!     cuisines: vec![Cuisine::Indian],
//!     diet: Diet::Vegetarian,
//!     ..Default::default()
//! };
//!
//! let prompt = compose(&request);
//! assert!(prompt.contains("follow the Indian cuisine"));
//! ```

pub mod completion;
pub mod prompt;
pub mod request;
pub mod session;
pub mod translate;
