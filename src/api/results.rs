//! Analysis results exposed by the engine.

use serde::{Deserialize, Serialize};

use crate::core::model::SystemMap;
use crate::detectors::recommendations::{Priority, Recommendation};

/// Aggregate counts over one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Number of recognized components
    pub component_count: usize,
    /// Number of inferred relationships
    pub relationship_count: usize,
    /// Number of generated recommendations
    pub recommendation_count: usize,
    /// Number of high-priority recommendations
    pub high_priority_count: usize,
}

/// The full outcome of one document analysis: the populated graph, the
/// recommendations derived from it, and summary counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// The populated component/relationship graph
    pub system_map: SystemMap,
    /// Prioritized recommendations
    pub recommendations: Vec<Recommendation>,
    /// Aggregate counts
    pub summary: AnalysisSummary,
}

impl AnalysisResults {
    /// Assemble results from a populated map and its recommendations.
    pub fn new(system_map: SystemMap, recommendations: Vec<Recommendation>) -> Self {
        let summary = AnalysisSummary {
            component_count: system_map.component_count(),
            relationship_count: system_map.relationship_count(),
            recommendation_count: recommendations.len(),
            high_priority_count: recommendations
                .iter()
                .filter(|r| r.priority == Priority::High)
                .count(),
        };

        Self {
            system_map,
            recommendations,
            summary,
        }
    }
}
