//! Configuration types and management for simap-rs.
//!
//! All tunable limits of the extraction pipeline live here: the context
//! window used for description enrichment, the component cap applied before
//! edge synthesis, and the relationship floor that triggers it. The values
//! default to the canonical reference behavior; keeping them in one place
//! prevents the CLI and library surfaces from drifting apart.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SimapError};

/// Main configuration for the simap analysis engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimapConfig {
    /// Extraction pipeline settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Report and diagram output settings
    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for SimapConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl SimapConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            SimapError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content).map_err(Into::into)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            SimapError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;
        Ok(())
    }
}

/// Settings controlling component recognition and relationship inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Radius in characters of the context window appended to component
    /// descriptions (each side of the match)
    pub context_radius: usize,

    /// Maximum span in non-period characters between a component name and a
    /// version/environment mention for enrichment to apply
    pub enrichment_window: usize,

    /// Component count above which edge synthesis operates on a
    /// type-sorted, truncated subset
    pub component_cap: usize,

    /// Minimum relationship count; below it the fallback synthesis pass runs
    pub relationship_floor: usize,

    /// Substitute the default reference catalog when no component matches
    pub default_catalog: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            context_radius: 50,
            enrichment_window: 30,
            component_cap: 15,
            relationship_floor: 10,
            default_catalog: true,
        }
    }
}

impl ExtractionConfig {
    fn validate(&self) -> Result<()> {
        if self.context_radius == 0 {
            return Err(SimapError::config_field(
                "context radius must be positive",
                "extraction.context_radius",
            ));
        }

        if self.enrichment_window == 0 {
            return Err(SimapError::config_field(
                "enrichment window must be positive",
                "extraction.enrichment_window",
            ));
        }

        if self.component_cap < 2 {
            return Err(SimapError::config_field(
                "component cap must allow at least one pair",
                "extraction.component_cap",
            ));
        }

        Ok(())
    }
}

/// Output format for analysis reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// JSON document with the full map and recommendations
    Json,
    /// YAML document with the full map and recommendations
    Yaml,
    /// The PlantUML diagram text alone
    PlantUml,
}

/// Settings for report and diagram output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report serialization format
    pub format: ReportFormat,

    /// Title line of the generated diagram
    pub diagram_title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Json,
            diagram_title: "Cartographie du Système d'Information".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction.context_radius, 50);
        assert_eq!(config.extraction.relationship_floor, 10);
        assert_eq!(config.extraction.component_cap, 15);
    }

    #[test]
    fn zero_radius_is_rejected() {
        let mut config = SimapConfig::default();
        config.extraction.context_radius = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn yaml_round_trip() {
        let config = SimapConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: SimapConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.extraction.component_cap, config.extraction.component_cap);
        assert_eq!(back.report.format, ReportFormat::Json);
    }
}
