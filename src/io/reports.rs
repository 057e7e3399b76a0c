//! Diagram rendering and report output.
//!
//! Pure serialization over a populated graph: no inference happens past this
//! point. The PlantUML renderer applies a fixed component-type → shape
//! mapping and emits one edge line per relationship; component names are
//! escaped into safe internal identifiers by replacing every
//! non-alphanumeric character with `_`.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::api::results::AnalysisResults;
use crate::core::config::{ReportConfig, ReportFormat};
use crate::core::errors::{Result, SimapError};
use crate::core::model::{ComponentType, SystemMap};

/// Renders a [`SystemMap`] as PlantUML diagram text.
#[derive(Debug, Clone)]
pub struct DiagramGenerator {
    title: String,
}

impl DiagramGenerator {
    /// Create a generator using the configured diagram title
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            title: config.diagram_title.clone(),
        }
    }

    /// Render the diagram for a populated map.
    pub fn generate(&self, map: &SystemMap) -> String {
        let mut diagram = String::from("@startuml\n");
        diagram.push_str(&format!("title {}\n\n", self.title));

        for component in map.components() {
            let shape = shape_for(component.component_type);
            diagram.push_str(&format!(
                "{} \"{}\" as {}\n",
                shape,
                component.name,
                clean_id(&component.name)
            ));
        }

        diagram.push('\n');

        for relationship in map.relationships() {
            let (Some(source), Some(target)) = (
                map.component(&relationship.source),
                map.component(&relationship.target),
            ) else {
                debug!("Skipping edge with unknown endpoint: {:?}", relationship);
                continue;
            };

            diagram.push_str(&format!(
                "{} --> {}",
                clean_id(&source.name),
                clean_id(&target.name)
            ));
            if !relationship.description.is_empty() {
                diagram.push_str(&format!(" : {}", relationship.description));
            }
            diagram.push('\n');
        }

        diagram.push_str("@enduml");
        diagram
    }
}

/// Fixed component-type → PlantUML shape mapping.
fn shape_for(component_type: ComponentType) -> &'static str {
    match component_type {
        ComponentType::Database => "database",
        ComponentType::Server => "node",
        ComponentType::Application => "rectangle",
        _ => "component",
    }
}

/// Escape a display name into a safe PlantUML identifier: every
/// non-alphanumeric character becomes `_`.
fn clean_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Writes analysis results to disk in the configured format.
#[derive(Debug, Default, Clone)]
pub struct ReportWriter;

impl ReportWriter {
    /// Create a report writer
    pub fn new() -> Self {
        Self
    }

    /// Serialize `results` to `path` in the requested format.
    pub fn write(
        &self,
        results: &AnalysisResults,
        path: impl AsRef<Path>,
        format: ReportFormat,
    ) -> Result<()> {
        let path = path.as_ref();
        let content = self.render(results, format)?;
        fs::write(path, content).map_err(|e| {
            SimapError::io(format!("Failed to write report: {}", path.display()), e)
        })
    }

    /// Serialize `results` to a string in the requested format.
    pub fn render(&self, results: &AnalysisResults, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => serde_json::to_string_pretty(results).map_err(Into::into),
            ReportFormat::Yaml => serde_yaml::to_string(results).map_err(Into::into),
            ReportFormat::PlantUml => Ok(results
                .system_map
                .diagram
                .clone()
                .unwrap_or_else(|| {
                    DiagramGenerator::new(&ReportConfig::default()).generate(&results.system_map)
                })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Component, Relationship};

    fn diagram_for(map: &SystemMap) -> String {
        DiagramGenerator::new(&ReportConfig::default()).generate(map)
    }

    fn sample_map() -> SystemMap {
        let mut map = SystemMap::new("test", "test map", "tests", "2026-01-01T00:00:00");
        map.insert_component(Component::new(
            "serveur WEB01",
            ComponentType::Server,
            "d",
        ));
        map.insert_component(Component::new(
            "Base clients",
            ComponentType::Database,
            "d",
        ));
        map.insert_component(Component::new("Paie", ComponentType::Application, "d"));
        map.insert_component(Component::new("Pare-feu DMZ", ComponentType::Security, "d"));

        let ids: Vec<_> = map.components().map(|c| c.id.clone()).collect();
        map.push_relationship(Relationship::new(ids[2].clone(), ids[1].clone(), "accède à"));
        map
    }

    #[test]
    fn shapes_follow_the_type_mapping() {
        let diagram = diagram_for(&sample_map());

        assert!(diagram.starts_with("@startuml\n"));
        assert!(diagram.ends_with("@enduml"));
        assert!(diagram.contains("title Cartographie du Système d'Information"));
        assert!(diagram.contains("node \"serveur WEB01\" as serveur_WEB01"));
        assert!(diagram.contains("database \"Base clients\" as Base_clients"));
        assert!(diagram.contains("rectangle \"Paie\" as Paie"));
        assert!(diagram.contains("component \"Pare-feu DMZ\" as Pare_feu_DMZ"));
    }

    #[test]
    fn edges_are_rendered_with_labels() {
        let diagram = diagram_for(&sample_map());
        assert!(diagram.contains("Paie --> Base_clients : accède à"));
    }

    #[test]
    fn identifiers_escape_every_non_alphanumeric_char() {
        assert_eq!(clean_id("serveur WEB01"), "serveur_WEB01");
        assert_eq!(clean_id("Pare-feu (DMZ)"), "Pare_feu__DMZ_");
        assert_eq!(clean_id("été"), "_t_");
    }
}
