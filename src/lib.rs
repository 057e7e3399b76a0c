//! # SImap-RS: Information-System Cartography Engine
//!
//! A Rust engine that turns unstructured documentation (text extracted from
//! PDF/DOCX/plain files) into a typed graph of system components and
//! relationships, then renders that graph as a PlantUML diagram and a set of
//! prioritized recommendations. The library provides:
//!
//! - **Component Recognition**: taxonomy-driven lexical matchers with
//!   deduplication, context enrichment, and version/environment/criticality
//!   annotations
//! - **Relationship Inference**: explicit connective patterns, sentence and
//!   paragraph co-occurrence, and fallback synthesis guaranteeing a
//!   presentable graph even on sparse input
//! - **Diagram Rendering**: PlantUML output with a fixed type-to-shape mapping
//! - **Recommendations**: independent threshold rules over the final graph
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      API Layer                          │
//! ├─────────────────────────────────────────────────────────┤
//! │  Core          │  Detectors        │  I/O               │
//! │                │                   │                    │
//! │ • Model        │ • Components      │ • Documents        │
//! │ • Taxonomy     │ • Relationships   │ • Reports          │
//! │ • Config       │ • Recommendations │                    │
//! │ • Errors       │                   │                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use simap_rs::{SimapConfig, SimapEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = SimapEngine::new(SimapConfig::default())?;
//!     let results = engine.analyze_document("./architecture.txt").await?;
//!
//!     println!("{} composants, {} relations",
//!         results.summary.component_count,
//!         results.summary.relationship_count);
//!     Ok(())
//! }
//! ```

#![warn(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Core data structures and configuration
pub mod core {
    //! Core data model, taxonomy tables, and configuration.

    pub mod config;
    pub mod errors;
    pub mod model;
    pub mod taxonomy;
}

// Extraction and analysis passes
pub mod detectors {
    //! Extraction passes over the input text and the resulting graph.

    pub mod components;
    pub mod recommendations;
    pub mod relationships;
}

// I/O boundaries: document conversion and report rendering
pub mod io {
    //! Document conversion and report/diagram output.

    pub mod documents;
    pub mod reports;
}

// Public API and engine interface
pub mod api {
    //! High-level engine and results types.

    pub mod engine;
    pub mod results;
}

// Re-export primary types for convenience
pub use api::engine::SimapEngine;
pub use api::results::{AnalysisResults, AnalysisSummary};
pub use core::config::SimapConfig;
pub use core::errors::{Result, SimapError};
pub use core::model::{Component, ComponentId, ComponentType, Relationship, SystemMap};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
