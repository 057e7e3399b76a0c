//! Relationship inference between recognized components.
//!
//! Derives a directed, typed edge set in three accumulating passes: explicit
//! connective patterns over the raw text, sentence/paragraph co-occurrence,
//! and a fallback synthesis step that manufactures edges until a minimum
//! count is reached, so the rendered diagram is never trivially empty. Edge
//! labels without structural signal are drawn at random from a fixed
//! vocabulary; that nondeterminism is deliberate and is confined to the
//! injected random source, which tests seed explicitly.
//!
//! Known limitation: the explicit and proximity passes can both produce an
//! edge between the same pair with different labels. The passes do not unify
//! them; only exact `(source, target, label)` duplicates are suppressed.

use std::collections::HashSet;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use tracing::{debug, info};

use crate::core::config::ExtractionConfig;
use crate::core::model::{Component, ComponentId, ComponentType, Relationship};

/// Binary connective patterns of the form `<name> <connective> <name>`,
/// paired with the relation label they yield.
static EXPLICIT_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let compile = |pattern: &str| {
        Regex::new(pattern).expect("static relation pattern must compile")
    };
    vec![
        (
            compile(r"(?i)\b([A-Za-z0-9_-]+)\s+(?:se connecte à|connects to|communique avec|accède à|utilise)\s+([A-Za-z0-9_-]+)\b"),
            "communique avec",
        ),
        (
            compile(r"(?i)\b([A-Za-z0-9_-]+)\s+(?:dépend de|depends on|requiert|requires|utilise|uses)\s+([A-Za-z0-9_-]+)\b"),
            "dépend de",
        ),
        (
            compile(r"(?i)\b([A-Za-z0-9_-]+)\s+(?:est déployé sur|is deployed on|s'exécute sur|runs on|hébergé sur|hosted on)\s+([A-Za-z0-9_-]+)\b"),
            "est déployé sur",
        ),
    ]
});

static PARAGRAPH_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("static paragraph pattern must compile"));

/// Generic relation vocabulary used when no structural signal exists.
static RELATION_VOCABULARY: &[&str] = &[
    "accède à",
    "communique avec",
    "dépend de",
    "utilise",
    "est déployé sur",
    "fournit des données à",
    "envoie des informations à",
    "est connecté à",
    "interroge",
    "alimente",
    "gère",
    "administre",
    "surveille",
];

/// Label of the weak edges produced by the paragraph co-occurrence pass.
pub const POTENTIAL_RELATION: &str = "relation potentielle";

/// Infers typed relationships between recognized components.
///
/// One inferrer per analysis request: it owns its random source, so
/// concurrent analyses never share mutable state.
#[derive(Debug)]
pub struct RelationshipInferrer {
    config: ExtractionConfig,
    rng: StdRng,
}

impl RelationshipInferrer {
    /// Create an inferrer with an entropy-seeded random source
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an inferrer with a deterministic random source
    pub fn with_seed(config: ExtractionConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Infer the relationship set for `text` over the given components.
    pub fn infer(&mut self, text: &str, components: &[Component]) -> Vec<Relationship> {
        let index = build_name_index(components);
        let by_id: IndexMap<&ComponentId, &Component> =
            components.iter().map(|c| (&c.id, c)).collect();
        let mut edges = EdgeAccumulator::default();

        self.extract_explicit(text, &index, &mut edges);
        let explicit_count = edges.len();

        self.extract_sentence_proximity(text, &index, &by_id, &mut edges);
        self.extract_paragraph_proximity(text, &index, &mut edges);
        debug!(
            "{} explicit edges, {} proximity edges",
            explicit_count,
            edges.len() - explicit_count
        );

        if edges.len() < self.config.relationship_floor {
            let subset = representative_subset(components, self.config.component_cap);
            self.synthesize(&subset, &mut edges);
        }

        info!("Inferred {} relationships", edges.len());
        edges.into_vec()
    }

    /// Pass 1: explicit `<name> <connective> <name>` patterns.
    fn extract_explicit(
        &mut self,
        text: &str,
        index: &NameIndex,
        edges: &mut EdgeAccumulator,
    ) {
        for (pattern, label) in EXPLICIT_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                let source = resolve(&caps[1].to_lowercase(), index);
                let target = resolve(&caps[2].to_lowercase(), index);

                if let (Some(source), Some(target)) = (source, target) {
                    edges.push(Relationship::new(source, target, *label));
                }
            }
        }
    }

    /// Pass 2a: sentences containing exactly two distinct known components.
    fn extract_sentence_proximity(
        &mut self,
        text: &str,
        index: &NameIndex,
        by_id: &IndexMap<&ComponentId, &Component>,
        edges: &mut EdgeAccumulator,
    ) {
        for sentence in text.split(['.', '!', '?']) {
            let found = components_in(sentence, index);
            if found.len() != 2 {
                continue;
            }

            let (source, target) = (&found[0], &found[1]);
            if let (Some(source_comp), Some(target_comp)) = (by_id.get(source), by_id.get(target))
            {
                let label = self.relation_for_pair(source_comp, target_comp);
                edges.push(Relationship::new(source.clone(), target.clone(), label));
            }
        }
    }

    /// Pass 2b: paragraphs connect every unordered component pair not
    /// already linked in either direction, with a weak generic label.
    fn extract_paragraph_proximity(
        &mut self,
        text: &str,
        index: &NameIndex,
        edges: &mut EdgeAccumulator,
    ) {
        for paragraph in PARAGRAPH_SPLIT.split(text) {
            let found = components_in(paragraph, index);
            if found.len() < 2 {
                continue;
            }

            for i in 0..found.len() {
                for j in (i + 1)..found.len() {
                    if !edges.connects(&found[i], &found[j]) {
                        edges.push(Relationship::new(
                            found[i].clone(),
                            found[j].clone(),
                            POTENTIAL_RELATION,
                        ));
                    }
                }
            }
        }
    }

    /// Type-pair heuristic: ordered rules over (source type, target type),
    /// falling back to a uniformly random generic phrase.
    fn relation_for_pair(&mut self, source: &Component, target: &Component) -> String {
        use ComponentType::*;

        let label = match (source.component_type, target.component_type) {
            (Application | WebSystem, Database | DataWarehouse) => "accède à",
            (Server, Application | WebSystem) => "héberge",
            (Application | WebSystem, Server) => "est déployé sur",
            (Middleware, _) => "intègre",
            (Agent, _) => "surveille",
            _ => RELATION_VOCABULARY[self.rng.gen_range(0..RELATION_VOCABULARY.len())],
        };
        label.to_string()
    }

    /// Pass 3: synthesize canonical and random edges until the floor is met
    /// or the component supply is exhausted.
    fn synthesize(&mut self, subset: &[&Component], edges: &mut EdgeAccumulator) {
        let mut saas = None;
        let mut agent = None;
        let mut nlp = None;
        let mut diagram = None;
        let mut client = None;

        for component in subset {
            let name = component.name.to_lowercase();
            if name.contains("saas") || name.contains("simap") {
                saas = Some(*component);
            } else if name.contains("agent") || component.component_type == ComponentType::Agent {
                agent = Some(*component);
            } else if name.contains("nlp")
                || name.contains("ia")
                || component.component_type == ComponentType::Technology
            {
                nlp = Some(*component);
            } else if name.contains("uml") || name.contains("diagram") {
                diagram = Some(*component);
            } else if name.contains("client") {
                client = Some(*component);
            }
        }

        if saas.is_none() {
            saas = subset
                .iter()
                .find(|c| c.component_type == ComponentType::Saas)
                .copied()
                .or_else(|| subset.first().copied());
        }
        if agent.is_none() && subset.len() > 1 {
            agent = subset
                .iter()
                .find(|c| c.component_type == ComponentType::Agent)
                .copied()
                .or_else(|| subset.get(1).copied());
        }

        if let (Some(agent), Some(saas)) = (agent, saas) {
            edges.push(Relationship::new(
                agent.id.clone(),
                saas.id.clone(),
                "envoie des données à",
            ));
        }
        if let (Some(saas), Some(nlp)) = (saas, nlp) {
            edges.push(Relationship::new(saas.id.clone(), nlp.id.clone(), "utilise"));
        }
        if let (Some(saas), Some(diagram)) = (saas, diagram) {
            edges.push(Relationship::new(
                saas.id.clone(),
                diagram.id.clone(),
                "génère des diagrammes avec",
            ));
        }
        if let (Some(agent), Some(client)) = (agent, client) {
            edges.push(Relationship::new(
                agent.id.clone(),
                client.id.clone(),
                "collecte des données de",
            ));
        }

        let ceiling = self
            .config
            .relationship_floor
            .min(2 * subset.len());
        let additional = ceiling.saturating_sub(edges.len());
        if additional == 0 {
            return;
        }

        let mut pool: Vec<&Component> = subset.to_vec();
        for _ in 0..additional {
            if pool.len() < 2 {
                break;
            }
            let source = pool.remove(self.rng.gen_range(0..pool.len()));
            let target = pool.remove(self.rng.gen_range(0..pool.len()));
            let label = self.relation_for_pair(source, target);
            edges.push(Relationship::new(source.id.clone(), target.id.clone(), label));
        }
    }
}

/// Lowercased name → component id, with whitespace-stripped aliases added
/// when they do not collide. Insertion order follows the component slice, so
/// resolution and proximity scans are deterministic.
type NameIndex = IndexMap<String, ComponentId>;

fn build_name_index(components: &[Component]) -> NameIndex {
    let mut index = NameIndex::new();
    for component in components {
        let name = component.name.to_lowercase();
        index.entry(name.clone()).or_insert_with(|| component.id.clone());

        let squeezed: String = name.split_whitespace().collect();
        if !index.contains_key(&squeezed) {
            index.insert(squeezed, component.id.clone());
        }
    }
    index
}

/// Two-tier approximate name resolution: exact key match first, then
/// substring containment in either direction. Exact always wins.
fn resolve(candidate: &str, index: &NameIndex) -> Option<ComponentId> {
    if let Some(id) = index.get(candidate) {
        return Some(id.clone());
    }

    index
        .iter()
        .find(|(key, _)| key.contains(candidate) || candidate.contains(key.as_str()))
        .map(|(_, id)| id.clone())
}

/// Distinct components mentioned in a text fragment, in index order.
fn components_in(fragment: &str, index: &NameIndex) -> Vec<ComponentId> {
    let fragment = fragment.to_lowercase();
    let mut found: Vec<ComponentId> = Vec::new();
    for (name, id) in index {
        if fragment.contains(name.as_str()) && !found.contains(id) {
            found.push(id.clone());
        }
    }
    found
}

/// Deterministic subset used by edge synthesis when the component set
/// exceeds the cap: stable sort by type tag, then truncate.
fn representative_subset(components: &[Component], cap: usize) -> Vec<&Component> {
    let mut subset: Vec<&Component> = components.iter().collect();
    if subset.len() > cap {
        subset.sort_by_key(|c| c.component_type.as_str());
        subset.truncate(cap);
    }
    subset
}

/// Relationship accumulator enforcing the edge invariants while passes run:
/// no self-loops, no duplicate ordered `(source, target, label)` triples.
#[derive(Debug, Default)]
struct EdgeAccumulator {
    edges: Vec<Relationship>,
    seen: HashSet<(ComponentId, ComponentId, String)>,
}

impl EdgeAccumulator {
    fn push(&mut self, relationship: Relationship) -> bool {
        if relationship.source == relationship.target {
            return false;
        }
        let key = (
            relationship.source.clone(),
            relationship.target.clone(),
            relationship.relation.clone(),
        );
        if !self.seen.insert(key) {
            return false;
        }
        self.edges.push(relationship);
        true
    }

    /// Whether any edge links `a` and `b`, in either direction.
    fn connects(&self, a: &ComponentId, b: &ComponentId) -> bool {
        self.edges.iter().any(|r| {
            (&r.source == a && &r.target == b) || (&r.source == b && &r.target == a)
        })
    }

    fn len(&self) -> usize {
        self.edges.len()
    }

    fn into_vec(self) -> Vec<Relationship> {
        self.edges
    }
}

#[cfg(test)]
#[path = "relationships_tests.rs"]
mod tests;
