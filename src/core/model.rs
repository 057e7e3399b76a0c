//! In-memory graph model shared by the extraction passes.
//!
//! A [`SystemMap`] owns every [`Component`] and [`Relationship`] produced by
//! one analysis run. Components are keyed by a normalized `(type, name)`
//! identifier so that one extraction run never holds two entries for the same
//! surface form, and insertion order is preserved for deterministic output.
//! Relationships reference components by id; the map enforces the two graph
//! invariants (no self-loops, no duplicate ordered edges) at insertion time.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed taxonomy of component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    /// Physical or virtual server
    Server,
    /// Database or data management system
    Database,
    /// Business application
    Application,
    /// Router, switch, firewall, or other network equipment
    NetworkDevice,
    /// Public cloud service
    CloudService,
    /// VM, container, or orchestration environment
    Virtualization,
    /// Data warehouse or data lake
    DataWarehouse,
    /// File-level storage (NAS, SAN, network shares)
    FileStorage,
    /// ERP, CRM, or comparable enterprise system
    EnterpriseSystem,
    /// Web site or web application
    WebSystem,
    /// Integration middleware, bus, or broker
    Middleware,
    /// Security system or device
    Security,
    /// Business process
    BusinessProcess,
    /// Department or organizational unit
    Department,
    /// SaaS platform component
    Saas,
    /// Local collection agent
    Agent,
    /// Technology concept (AI/NLP, tooling)
    Technology,
    /// Enterprise-architecture concept
    Architecture,
    /// Generic information system
    System,
}

impl ComponentType {
    /// Canonical SCREAMING_SNAKE_CASE tag for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "SERVER",
            Self::Database => "DATABASE",
            Self::Application => "APPLICATION",
            Self::NetworkDevice => "NETWORK_DEVICE",
            Self::CloudService => "CLOUD_SERVICE",
            Self::Virtualization => "VIRTUALIZATION",
            Self::DataWarehouse => "DATA_WAREHOUSE",
            Self::FileStorage => "FILE_STORAGE",
            Self::EnterpriseSystem => "ENTERPRISE_SYSTEM",
            Self::WebSystem => "WEB_SYSTEM",
            Self::Middleware => "MIDDLEWARE",
            Self::Security => "SECURITY",
            Self::BusinessProcess => "BUSINESS_PROCESS",
            Self::Department => "DEPARTMENT",
            Self::Saas => "SAAS",
            Self::Agent => "AGENT",
            Self::Technology => "TECHNOLOGY",
            Self::Architecture => "ARCHITECTURE",
            Self::System => "SYSTEM",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque component identifier.
///
/// Derived from the normalized `(type, name)` deduplication key, so the same
/// surface form always receives the same id within and across runs. That
/// makes recognition fully deterministic and lets relationships reference
/// components without owning them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Derive the id for a `(type, name)` pair.
    ///
    /// Normalization: the type tag and name are joined with `_`, lowercased,
    /// and every whitespace run collapses to a single `_`.
    pub fn derive(component_type: ComponentType, name: &str) -> Self {
        let raw = format!("{}_{}", component_type.as_str(), name).to_lowercase();
        let mut normalized = String::with_capacity(raw.len());
        let mut in_whitespace = false;
        for ch in raw.chars() {
            if ch.is_whitespace() {
                if !in_whitespace {
                    normalized.push('_');
                    in_whitespace = true;
                }
            } else {
                normalized.push(ch);
                in_whitespace = false;
            }
        }
        Self(normalized)
    }

    /// The normalized key string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A recognized element of the analyzed system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Stable identifier derived from the dedup key
    pub id: ComponentId,

    /// Display name (the matched surface form)
    pub name: String,

    /// Taxonomy tag
    #[serde(rename = "type")]
    pub component_type: ComponentType,

    /// Base description plus appended context/version/environment/criticality
    /// annotations (append-only, order-sensitive)
    pub description: String,

    /// Underlying technology, when the matcher surfaces one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,

    /// Version string found near the component name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Component {
    /// Create a component; the id is derived from `(type, name)`.
    pub fn new(
        name: impl Into<String>,
        component_type: ComponentType,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            id: ComponentId::derive(component_type, &name),
            name,
            component_type,
            description: description.into(),
            technology: None,
            version: None,
        }
    }

    /// Append an annotation to the description
    pub fn annotate(&mut self, annotation: &str) {
        self.description.push_str(annotation);
    }
}

/// A directed, typed edge between two components.
///
/// Holds component ids, not components: the [`SystemMap`] owns both
/// endpoints, a relationship only references them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Source component id
    pub source: ComponentId,

    /// Target component id
    pub target: ComponentId,

    /// Relation label, drawn from a small controlled vocabulary or a
    /// natural-language connective phrase
    pub relation: String,

    /// Human-readable description of the edge
    pub description: String,
}

impl Relationship {
    /// Create a relationship with the relation phrase doubling as description
    pub fn new(source: ComponentId, target: ComponentId, relation: impl Into<String>) -> Self {
        let relation = relation.into();
        Self {
            source,
            target,
            description: relation.clone(),
            relation,
        }
    }
}

/// The full component/relationship graph for one analysis run, plus run
/// metadata and the rendered diagram text.
///
/// Populated by the recognizer and the inferrer in sequence, then handed
/// immutably to the diagram renderer and the recommendation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMap {
    /// Run identifier
    pub id: Uuid,

    /// Map name (typically the analyzed document's name)
    pub name: String,

    /// Map description
    pub description: String,

    /// Creator tag
    pub created_by: String,

    /// ISO-8601 creation timestamp
    pub created_date: String,

    components: IndexMap<ComponentId, Component>,

    relationships: Vec<Relationship>,

    /// Rendered PlantUML diagram, set once rendering has run
    pub diagram: Option<String>,
}

impl SystemMap {
    /// Create an empty map with run metadata
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        created_by: impl Into<String>,
        created_date: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            created_by: created_by.into(),
            created_date: created_date.into(),
            components: IndexMap::new(),
            relationships: Vec::new(),
            diagram: None,
        }
    }

    /// Insert a component. The first occurrence of a dedup key wins; a later
    /// insert under the same key is a no-op. Returns whether it was inserted.
    pub fn insert_component(&mut self, component: Component) -> bool {
        if self.components.contains_key(&component.id) {
            return false;
        }
        self.components.insert(component.id.clone(), component);
        true
    }

    /// Push a relationship, enforcing the graph invariants: both endpoints
    /// must exist in this map, self-loops are rejected, and an edge with the
    /// same ordered `(source, target, relation)` is only stored once.
    /// Returns whether the edge was stored.
    pub fn push_relationship(&mut self, relationship: Relationship) -> bool {
        if relationship.source == relationship.target {
            return false;
        }
        if !self.components.contains_key(&relationship.source)
            || !self.components.contains_key(&relationship.target)
        {
            return false;
        }
        let duplicate = self.relationships.iter().any(|existing| {
            existing.source == relationship.source
                && existing.target == relationship.target
                && existing.relation == relationship.relation
        });
        if duplicate {
            return false;
        }
        self.relationships.push(relationship);
        true
    }

    /// Components in insertion order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Look up a component by id
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    /// All relationships in insertion order
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Number of components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Number of relationships
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Count of edges touching the given component, in either direction
    pub fn connection_count(&self, id: &ComponentId) -> usize {
        self.relationships
            .iter()
            .filter(|r| &r.source == id || &r.target == id)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_with(components: &[(&str, ComponentType)]) -> SystemMap {
        let mut map = SystemMap::new("test", "test map", "tests", "2026-01-01T00:00:00");
        for (name, ty) in components {
            map.insert_component(Component::new(*name, *ty, "desc"));
        }
        map
    }

    #[test]
    fn id_normalization_collapses_case_and_whitespace() {
        let a = ComponentId::derive(ComponentType::Server, "Serveur  WEB01");
        let b = ComponentId::derive(ComponentType::Server, "serveur web01");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "server_serveur_web01");
    }

    #[test]
    fn same_name_different_type_stays_distinct() {
        let a = ComponentId::derive(ComponentType::Application, "portail RH");
        let b = ComponentId::derive(ComponentType::WebSystem, "portail RH");
        assert_ne!(a, b);
    }

    #[test]
    fn duplicate_component_insert_is_noop() {
        let mut map = map_with(&[("serveur WEB01", ComponentType::Server)]);
        let dup = Component::new("Serveur  web01", ComponentType::Server, "other desc");
        assert!(!map.insert_component(dup));
        assert_eq!(map.component_count(), 1);
        // first occurrence won
        assert_eq!(map.components().next().unwrap().description, "desc");
    }

    #[test]
    fn self_loops_are_rejected() {
        let mut map = map_with(&[("app", ComponentType::Application)]);
        let id = map.components().next().unwrap().id.clone();
        assert!(!map.push_relationship(Relationship::new(id.clone(), id, "utilise")));
        assert_eq!(map.relationship_count(), 0);
    }

    #[test]
    fn duplicate_ordered_edges_are_suppressed() {
        let mut map = map_with(&[
            ("app", ComponentType::Application),
            ("db", ComponentType::Database),
        ]);
        let ids: Vec<_> = map.components().map(|c| c.id.clone()).collect();
        assert!(map.push_relationship(Relationship::new(
            ids[0].clone(),
            ids[1].clone(),
            "accède à"
        )));
        assert!(!map.push_relationship(Relationship::new(
            ids[0].clone(),
            ids[1].clone(),
            "accède à"
        )));
        // a different label between the same pair survives
        assert!(map.push_relationship(Relationship::new(
            ids[0].clone(),
            ids[1].clone(),
            "interroge"
        )));
        assert_eq!(map.relationship_count(), 2);
    }

    #[test]
    fn unknown_endpoints_are_rejected() {
        let mut map = map_with(&[("app", ComponentType::Application)]);
        let known = map.components().next().unwrap().id.clone();
        let unknown = ComponentId::derive(ComponentType::Database, "fantôme");
        assert!(!map.push_relationship(Relationship::new(known, unknown, "accède à")));
    }
}
