//! Component recognition over unstructured text.
//!
//! Applies every taxonomy matcher to the input, deduplicates matches into
//! stable entities keyed by `(type, normalized name)`, enriches each entity
//! with a context snippet and version/environment/criticality annotations,
//! and substitutes a fixed reference catalog when nothing matches at all.
//! The operation is total: any input string, including the empty string,
//! yields a non-empty component set.
//!
//! Known precision limitation: matcher families are applied independently,
//! so one span of text can produce one component per claiming family. Dedup
//! is per `(type, name)` key only and never merges across types.

use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, info};

use crate::core::config::ExtractionConfig;
use crate::core::model::{Component, ComponentId, ComponentType};
use crate::core::taxonomy::{
    is_stop_word, Matcher, MatcherKind, CRITICALITY_KEYWORDS, ENVIRONMENT_NEEDLE, MATCHERS,
    VERSION_NEEDLE,
};

/// Recognizes system components in free text using the taxonomy tables.
#[derive(Debug, Clone)]
pub struct ComponentRecognizer {
    config: ExtractionConfig,
}

impl ComponentRecognizer {
    /// Create a recognizer with the given extraction settings
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Recognize all components in `text`, in first-occurrence order.
    pub fn recognize(&self, text: &str) -> Vec<Component> {
        let mut components: IndexMap<ComponentId, Component> = IndexMap::new();

        for matcher in MATCHERS.iter() {
            self.apply_matcher(text, matcher, &mut components);
        }

        self.enrich(text, &mut components);

        if components.is_empty() && self.config.default_catalog {
            debug!("No component matched; substituting the default catalog");
            for component in default_catalog() {
                components.insert(component.id.clone(), component);
            }
        }

        info!("Recognized {} components", components.len());
        components.into_values().collect()
    }

    fn apply_matcher(
        &self,
        text: &str,
        matcher: &Matcher,
        components: &mut IndexMap<ComponentId, Component>,
    ) {
        for caps in matcher.regex().captures_iter(text) {
            let keyword = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let name = match matcher.kind {
                MatcherKind::Family => match caps.get(2).filter(|m| !m.as_str().is_empty()) {
                    Some(ident) => format!("{} {}", keyword, ident.as_str()),
                    None => keyword.to_string(),
                },
                MatcherKind::Keyword => keyword.to_string(),
            };

            if matcher.kind == MatcherKind::Family
                && (name.chars().count() <= 2 || is_stop_word(&name))
            {
                continue;
            }

            let id = ComponentId::derive(matcher.component_type, &name);
            if components.contains_key(&id) {
                continue;
            }

            let description = match matcher.kind {
                MatcherKind::Family => {
                    format!("{} identifié dans le document", matcher.base_description)
                }
                MatcherKind::Keyword => matcher.base_description.to_string(),
            };

            let mut component = Component::new(name, matcher.component_type, description);
            if matcher.captures_technology {
                component.technology = Some(keyword.to_lowercase());
            }

            let full = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or((0, 0));
            let context = context_window(text, full.0, full.1, self.config.context_radius);
            if !context.is_empty() {
                component.annotate(&format!(". Contexte: {context}"));
            }

            debug!(
                "Matcher '{}' produced component '{}' ({})",
                matcher.label, component.name, component.component_type
            );
            components.insert(component.id.clone(), component);
        }
    }

    /// Post-pass enrichment: version, environment, and criticality
    /// annotations, each appended at most once per component per run.
    fn enrich(&self, text: &str, components: &mut IndexMap<ComponentId, Component>) {
        let text_lower = text.to_lowercase();
        let window = self.config.enrichment_window;

        for component in components.values_mut() {
            let escaped = regex::escape(&component.name);

            let version_pattern =
                format!(r"(?i)\b{escaped}\b[^.]{{1,{window}}}?{VERSION_NEEDLE}");
            match Regex::new(&version_pattern) {
                Ok(re) => {
                    if let Some(caps) = re.captures(text) {
                        let version = caps["ver"].to_string();
                        component.annotate(&format!(" (Version {version})"));
                        component.version = Some(version);
                    }
                }
                Err(err) => debug!("Skipping version enrichment for '{}': {err}", component.name),
            }

            let env_pattern =
                format!(r"(?i)\b{escaped}\b[^.]{{1,{window}}}?{ENVIRONMENT_NEEDLE}");
            match Regex::new(&env_pattern) {
                Ok(re) => {
                    if let Some(caps) = re.captures(text) {
                        component.annotate(&format!(" (Environnement: {})", &caps["env"]));
                    }
                }
                Err(err) => {
                    debug!("Skipping environment enrichment for '{}': {err}", component.name)
                }
            }

            let name_lower = component.name.to_lowercase();
            if text_lower.contains(&name_lower)
                && CRITICALITY_KEYWORDS.iter().any(|kw| text_lower.contains(kw))
            {
                component.annotate(" [CRITIQUE]");
            }
        }
    }
}

/// Extract a fixed-radius window around a match span, clamped to the text
/// bounds and to char boundaries, with internal whitespace collapsed.
fn context_window(text: &str, start: usize, end: usize, radius: usize) -> String {
    let window_start = text[..start]
        .char_indices()
        .rev()
        .nth(radius.saturating_sub(1))
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    let window_end = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(idx, _)| end + idx)
        .unwrap_or(text.len());

    text[window_start..window_end]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The fixed reference catalog substituted when recognition finds nothing.
/// Represents the canonical SImap deployment around a client information
/// system, so downstream rendering always has a non-trivial graph.
pub fn default_catalog() -> Vec<Component> {
    vec![
        Component::new(
            "SImap SaaS",
            ComponentType::Saas,
            "Composante SaaS de SImap pour l'interface utilisateur et l'analyse des données collectées",
        ),
        Component::new(
            "Agent Local SImap",
            ComponentType::Agent,
            "Agent local déployé derrière le firewall de l'entreprise pour collecter les données du SI en toute sécurité",
        ),
        Component::new(
            "Moteur NLP",
            ComponentType::Technology,
            "Moteur d'analyse NLP pour l'extraction d'informations à partir des documents et métadonnées du SI",
        ),
        Component::new(
            "Générateur UML",
            ComponentType::Technology,
            "Générateur de diagrammes UML pour la visualisation de l'architecture du SI",
        ),
        Component::new(
            "SI Client",
            ComponentType::System,
            "Système d'information client à analyser",
        ),
        Component::new(
            "Base de données centrale",
            ComponentType::Database,
            "Base de données principale du SI client stockant les données métier",
        ),
        Component::new(
            "Application métier",
            ComponentType::Application,
            "Application principale supportant les processus métier de l'entreprise",
        ),
        Component::new(
            "Serveur d'applications",
            ComponentType::Server,
            "Serveur hébergeant les applications métier du SI client",
        ),
        Component::new(
            "Interface Utilisateur SImap",
            ComponentType::WebSystem,
            "Interface web permettant de visualiser les cartographies et recommandations produites par SImap",
        ),
        Component::new(
            "Moteur de recommandations",
            ComponentType::Technology,
            "Système d'IA générant des recommandations d'optimisation du SI basées sur l'analyse",
        ),
    ]
}

#[cfg(test)]
#[path = "components_tests.rs"]
mod tests;
