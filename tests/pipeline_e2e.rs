//! End-to-end pipeline tests: document text in, populated cartography out.

use simap_rs::core::config::ReportFormat;
use simap_rs::io::reports::ReportWriter;
use simap_rs::{ComponentType, SimapConfig, SimapEngine};

const SAMPLE_DOCUMENT: &str = "\
Le SI de l'entreprise repose sur le serveur WEB01 version 2.3, critique pour l'activité.
Le serveur WEB01 est en environnement de production.

L'application Ventes est déployée sur le serveur WEB01.
L'application Ventes utilise la base mysql CLIENTS.

Le firewall FW-EDGE protège la zone exposée. Le processus Facturation dépend de l'application Ventes.";

fn engine() -> SimapEngine {
    SimapEngine::new(SimapConfig::default()).unwrap()
}

#[test]
fn full_pipeline_produces_connected_annotated_map() {
    let results = engine().analyze_text(SAMPLE_DOCUMENT, "audit SI");
    let map = &results.system_map;

    let server = map
        .components()
        .find(|c| c.name == "serveur WEB01")
        .expect("server recognized");
    assert_eq!(server.component_type, ComponentType::Server);
    assert!(server.description.contains("Contexte:"));
    assert!(server.description.contains("(Version 2.3)"));
    assert!(server.description.contains("(Environnement: production)"));
    assert!(server.description.contains("[CRITIQUE]"));

    let app = map
        .components()
        .find(|c| c.name == "application Ventes")
        .expect("application recognized");

    // the co-occurrence passes connect the application to the server and to
    // the database even though no masculine connective matches exactly
    assert!(map
        .relationships()
        .iter()
        .any(|r| r.source == app.id || r.target == app.id));

    // the explicit dependency sentence resolves its business process
    let process = map
        .components()
        .find(|c| c.component_type == ComponentType::BusinessProcess)
        .expect("business process recognized");
    assert!(map
        .relationships()
        .iter()
        .any(|r| r.source == process.id && r.relation == "dépend de"));

    // dedup invariant
    let mut ids: Vec<_> = map.components().map(|c| c.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), map.component_count());

    // no self-loops
    assert!(map.relationships().iter().all(|r| r.source != r.target));

    // the fallback synthesis tops the edge set up toward the floor
    assert!(
        map.relationship_count() >= 6,
        "expected a non-trivial edge set, got {}",
        map.relationship_count()
    );
}

#[test]
fn diagram_contains_every_component_and_edge() {
    let results = engine().analyze_text(SAMPLE_DOCUMENT, "audit SI");
    let map = &results.system_map;
    let diagram = map.diagram.as_deref().expect("diagram rendered");

    assert!(diagram.starts_with("@startuml"));
    assert!(diagram.ends_with("@enduml"));
    assert!(diagram.contains("node \"serveur WEB01\" as serveur_WEB01"));

    let edge_lines = diagram.lines().filter(|l| l.contains(" --> ")).count();
    assert_eq!(edge_lines, map.relationship_count());
}

#[test]
fn empty_document_still_yields_presentable_results() {
    let results = engine().analyze_text("", "document vide");

    assert_eq!(results.summary.component_count, 10);
    assert!(results.summary.relationship_count > 0);
    assert!(!results.recommendations.is_empty());
    assert!(results
        .system_map
        .diagram
        .as_deref()
        .unwrap()
        .contains("SImap_SaaS"));
}

#[test]
fn results_serialize_in_every_report_format() {
    let results = engine().analyze_text(SAMPLE_DOCUMENT, "audit SI");
    let writer = ReportWriter::new();

    let json = writer.render(&results, ReportFormat::Json).unwrap();
    assert!(json.contains("\"system_map\""));
    assert!(json.contains("SERVER"));

    let yaml = writer.render(&results, ReportFormat::Yaml).unwrap();
    assert!(yaml.contains("component_count"));

    let plantuml = writer.render(&results, ReportFormat::PlantUml).unwrap();
    assert!(plantuml.contains("@startuml"));
}

#[tokio::test]
async fn unreadable_documents_surface_a_document_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrompu.pdf");
    std::fs::write(&path, b"rien d'un pdf").unwrap();

    let err = engine().analyze_document(&path).await.unwrap_err();
    assert!(err.is_document_error());
}
