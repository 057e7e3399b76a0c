//! Recommendation rules over the final graph.
//!
//! Independent threshold rules consuming a populated [`SystemMap`]: hub
//! detection, isolated components, obsolete technologies, architecture
//! complexity, and security advisories. No inference happens here; every
//! rule is a plain count or lookup over the component and edge sets.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::model::{ComponentType, SystemMap};

/// Recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Address soon
    High,
    /// Worth investigating
    Medium,
    /// Informational
    Low,
}

impl Priority {
    /// Canonical tag for display
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// A single prioritized recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Short title
    pub title: String,
    /// Full advisory text
    pub description: String,
    /// Priority level
    pub priority: Priority,
}

impl Recommendation {
    fn new(title: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
        }
    }
}

/// Technologies considered obsolete or at risk.
static RISKY_TECHNOLOGIES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "windows xp",
        "windows 7",
        "windows server 2008",
        "windows server 2003",
        "php 5",
        "java 6",
        "java 7",
        "java 8",
        "python 2",
        "internet explorer",
        "flash",
        "silverlight",
    ]
});

/// Connection count above which a component is flagged as a hub.
const HUB_THRESHOLD: usize = 3;

/// Component count above which the architecture is flagged as complex.
const COMPLEXITY_THRESHOLD: usize = 10;

/// Generates recommendations from an analyzed system map.
#[derive(Debug, Default, Clone)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Create a recommendation engine
    pub fn new() -> Self {
        Self
    }

    /// Apply every rule to the map and return the recommendations.
    pub fn generate(&self, map: &SystemMap) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        self.identify_hubs(map, &mut recommendations);
        self.identify_isolated(map, &mut recommendations);
        self.identify_risky_technologies(map, &mut recommendations);
        self.assess_complexity(map, &mut recommendations);
        self.security_advisories(map, &mut recommendations);

        info!("Generated {} recommendations", recommendations.len());
        recommendations
    }

    /// Components with many connections are single points of failure.
    fn identify_hubs(&self, map: &SystemMap, out: &mut Vec<Recommendation>) {
        for component in map.components() {
            let connections = map.connection_count(&component.id);
            if connections > HUB_THRESHOLD {
                out.push(Recommendation::new(
                    "Composant critique identifié",
                    format!(
                        "Le composant '{}' est un point critique avec {} connexions. \
                         Envisagez une redondance ou une répartition de charge.",
                        component.name, connections
                    ),
                    Priority::High,
                ));
            }
        }
    }

    fn identify_isolated(&self, map: &SystemMap, out: &mut Vec<Recommendation>) {
        for component in map.components() {
            if map.connection_count(&component.id) == 0 {
                out.push(Recommendation::new(
                    "Composant isolé détecté",
                    format!(
                        "Le composant '{}' n'a aucune connexion avec d'autres composants. \
                         Vérifiez s'il s'agit d'un composant orphelin ou si des connexions \
                         manquent dans la documentation.",
                        component.name
                    ),
                    Priority::Medium,
                ));
            }
        }
    }

    fn identify_risky_technologies(&self, map: &SystemMap, out: &mut Vec<Recommendation>) {
        for component in map.components() {
            let Some(technology) = component.technology.as_deref() else {
                continue;
            };
            let qualified = match component.version.as_deref() {
                Some(version) => format!("{technology} {version}"),
                None => technology.to_string(),
            }
            .to_lowercase();

            if RISKY_TECHNOLOGIES.iter().any(|risky| qualified.contains(risky)) {
                out.push(Recommendation::new(
                    "Technologie obsolète détectée",
                    format!(
                        "Le composant '{}' utilise {}, qui est potentiellement obsolète ou \
                         présente des risques de sécurité. Envisagez une mise à niveau.",
                        component.name, qualified
                    ),
                    Priority::High,
                ));
            }
        }
    }

    fn assess_complexity(&self, map: &SystemMap, out: &mut Vec<Recommendation>) {
        if map.component_count() > COMPLEXITY_THRESHOLD {
            out.push(Recommendation::new(
                "Complexité architecturale",
                format!(
                    "Le système comporte {} composants, ce qui peut indiquer une complexité \
                     élevée. Envisagez une refactorisation pour simplifier l'architecture.",
                    map.component_count()
                ),
                Priority::Medium,
            ));
        }

        out.push(Recommendation::new(
            "Analyse des dépendances",
            "Vérifiez les dépendances circulaires entre composants qui pourraient compliquer \
             la maintenance et les mises à jour du système.",
            Priority::Low,
        ));
    }

    fn security_advisories(&self, map: &SystemMap, out: &mut Vec<Recommendation>) {
        for component in map.components() {
            if matches!(
                component.component_type,
                ComponentType::Server | ComponentType::Application
            ) {
                out.push(Recommendation::new(
                    "Vérification de sécurité recommandée",
                    format!(
                        "Assurez-vous que le composant '{}' dispose des mesures de sécurité \
                         appropriées, notamment des pare-feu, des mises à jour régulières et \
                         une surveillance des vulnérabilités.",
                        component.name
                    ),
                    Priority::Medium,
                ));
            }
        }

        out.push(Recommendation::new(
            "Protection des données",
            "Vérifiez que toutes les données sensibles sont chiffrées, tant au repos qu'en \
             transit, et que les accès sont correctement contrôlés et audités.",
            Priority::High,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Component, Relationship, SystemMap};

    fn sample_map() -> SystemMap {
        let mut map = SystemMap::new("test", "test map", "tests", "2026-01-01T00:00:00");
        map.insert_component(Component::new("hub", ComponentType::Middleware, "d"));
        for name in ["a", "b", "c", "d"] {
            map.insert_component(Component::new(name, ComponentType::Application, "d"));
        }
        map.insert_component(Component::new("orphelin", ComponentType::Database, "d"));

        let ids: Vec<_> = map.components().map(|c| c.id.clone()).collect();
        for target in &ids[1..5] {
            map.push_relationship(Relationship::new(ids[0].clone(), target.clone(), "intègre"));
        }
        map
    }

    #[test]
    fn hub_and_isolated_components_are_flagged() {
        let recommendations = RecommendationEngine::new().generate(&sample_map());

        let hub = recommendations
            .iter()
            .find(|r| r.title == "Composant critique identifié")
            .expect("hub recommendation");
        assert!(hub.description.contains("'hub'"));
        assert!(hub.description.contains("4 connexions"));
        assert_eq!(hub.priority, Priority::High);

        let isolated = recommendations
            .iter()
            .find(|r| r.title == "Composant isolé détecté")
            .expect("isolated recommendation");
        assert!(isolated.description.contains("'orphelin'"));
    }

    #[test]
    fn risky_technology_is_reported_with_version() {
        let mut map = SystemMap::new("test", "test map", "tests", "2026-01-01T00:00:00");
        let mut component = Component::new("vieux poste", ComponentType::Application, "d");
        component.technology = Some("java".to_string());
        component.version = Some("8".to_string());
        map.insert_component(component);

        let recommendations = RecommendationEngine::new().generate(&map);
        assert!(recommendations
            .iter()
            .any(|r| r.title == "Technologie obsolète détectée" && r.priority == Priority::High));
    }

    #[test]
    fn blanket_advisories_are_always_present() {
        let map = SystemMap::new("vide", "empty map", "tests", "2026-01-01T00:00:00");
        let recommendations = RecommendationEngine::new().generate(&map);

        assert!(recommendations.iter().any(|r| r.title == "Analyse des dépendances"));
        assert!(recommendations.iter().any(|r| r.title == "Protection des données"));
    }

    #[test]
    fn complexity_threshold_fires_above_ten_components() {
        let mut map = SystemMap::new("test", "test map", "tests", "2026-01-01T00:00:00");
        for i in 0..11 {
            map.insert_component(Component::new(
                format!("composant {i}"),
                ComponentType::System,
                "d",
            ));
        }

        let recommendations = RecommendationEngine::new().generate(&map);
        assert!(recommendations.iter().any(|r| r.title == "Complexité architecturale"));
    }
}
