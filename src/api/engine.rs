//! Main analysis engine implementation.
//!
//! Orchestrates one analysis run: document conversion, component
//! recognition, relationship inference, diagram rendering, and
//! recommendation generation. The extraction itself is synchronous and
//! allocates per-request state only; the async surface exists for document
//! I/O.

use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::api::results::AnalysisResults;
use crate::core::config::SimapConfig;
use crate::core::errors::{Result, SimapError};
use crate::core::model::SystemMap;
use crate::detectors::components::ComponentRecognizer;
use crate::detectors::recommendations::RecommendationEngine;
use crate::detectors::relationships::RelationshipInferrer;
use crate::io::documents;
use crate::io::reports::DiagramGenerator;

/// Main simap analysis engine.
pub struct SimapEngine {
    config: SimapConfig,
    recognizer: ComponentRecognizer,
    recommender: RecommendationEngine,
    diagram_generator: DiagramGenerator,
}

impl SimapEngine {
    /// Create a new engine with the given configuration.
    pub fn new(config: SimapConfig) -> Result<Self> {
        config.validate()?;
        info!("Initializing simap analysis engine");

        Ok(Self {
            recognizer: ComponentRecognizer::new(config.extraction.clone()),
            recommender: RecommendationEngine::new(),
            diagram_generator: DiagramGenerator::new(&config.report),
            config,
        })
    }

    /// Analyze a document on disk; the file name selects the conversion
    /// strategy and doubles as the map name.
    pub async fn analyze_document(&self, path: impl AsRef<Path>) -> Result<AnalysisResults> {
        let path = path.as_ref();
        info!("Starting document analysis: {}", path.display());

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            SimapError::io(format!("Failed to read document: {}", path.display()), e)
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                SimapError::validation(format!("Path has no usable file name: {}", path.display()))
            })?;
        let name = path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or(file_name);

        self.analyze_bytes(&bytes, file_name, name)
    }

    /// Analyze an in-memory document.
    pub fn analyze_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        name: &str,
    ) -> Result<AnalysisResults> {
        let text = documents::extract_text(bytes, file_name)?;
        Ok(self.build(&text, name, file_name))
    }

    /// Analyze plain text directly. Total: always produces a populated map.
    pub fn analyze_text(&self, text: &str, name: &str) -> AnalysisResults {
        self.build(text, name, name)
    }

    fn build(&self, text: &str, name: &str, source: &str) -> AnalysisResults {
        let components = self.recognizer.recognize(text);

        let mut inferrer = RelationshipInferrer::new(self.config.extraction.clone());
        let relationships = inferrer.infer(text, &components);

        let mut map = SystemMap::new(
            name,
            format!("Cartographie générée à partir de {source}"),
            "SImap Engine",
            Utc::now().to_rfc3339(),
        );
        for component in components {
            map.insert_component(component);
        }
        for relationship in relationships {
            map.push_relationship(relationship);
        }

        map.diagram = Some(self.diagram_generator.generate(&map));
        let recommendations = self.recommender.generate(&map);

        info!(
            "Analysis '{}' completed: {} components, {} relationships, {} recommendations",
            name,
            map.component_count(),
            map.relationship_count(),
            recommendations.len()
        );

        AnalysisResults::new(map, recommendations)
    }

    /// The engine configuration
    pub fn config(&self) -> &SimapConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SimapEngine {
        SimapEngine::new(SimapConfig::default()).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SimapConfig::default();
        config.extraction.context_radius = 0;
        assert!(SimapEngine::new(config).is_err());
    }

    #[test]
    fn text_analysis_populates_map_and_diagram() {
        let results = engine().analyze_text(
            "Le serveur WEB01 héberge l'application Ventes.",
            "doc de test",
        );

        assert!(results.summary.component_count >= 2);
        assert!(results.summary.relationship_count >= 1);
        let diagram = results.system_map.diagram.as_deref().unwrap();
        assert!(diagram.contains("@startuml"));
        assert!(diagram.contains("serveur_WEB01"));
        assert_eq!(results.system_map.name, "doc de test");
        assert!(results
            .system_map
            .description
            .contains("Cartographie générée à partir de"));
    }

    #[test]
    fn bytes_analysis_rejects_corrupt_documents() {
        let err = engine()
            .analyze_bytes(b"not a pdf", "plan.pdf", "plan")
            .unwrap_err();
        assert!(err.is_document_error());
    }

    #[tokio::test]
    async fn document_analysis_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archi.txt");
        std::fs::write(&path, "L'application Paie est déployée sur le serveur APP01.").unwrap();

        let results = SimapEngine::new(SimapConfig::default())
            .unwrap()
            .analyze_document(&path)
            .await
            .unwrap();

        assert_eq!(results.system_map.name, "archi");
        assert!(results.summary.component_count >= 2);
    }
}
