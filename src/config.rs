//! Analysis settings read from a JSON file.
//!
//! Every field is optional; missing ones take the defaults below. Pattern
//! strings use the same comma-separated `/regex/` lists as
//! [`RegularExpressionSelectionCriteria`].
//!
//! ```json
//! {
//!   "scope": { "features": false, "includes": "/^com.example/" },
//!   "filter": { "excludes": "/^java/" },
//!   "closure": { "max_inbound_depth": 1, "max_outbound_depth": null },
//!   "maximum_cycle_length": 4
//! }
//! ```

use crate::closure::{Depth, TransitiveClosure};
use crate::cycles::CycleDetector;
use crate::export::ReportOptions;
use crate::graph::NodeKind;
use crate::selection::{
    CriteriaError, NullSelectionCriteria, RegularExpressionSelectionCriteria, SelectiveTraversalStrategy,
    SortedTraversalStrategy,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Errors that can occur while reading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the file from disk.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// A pattern did not compile.
    #[error(transparent)]
    Criteria(#[from] CriteriaError),
}

/// Which nodes one criteria accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaConfig {
    pub packages: bool,
    pub classes: bool,
    pub features: bool,
    /// Applies to names of every kind.
    pub includes: String,
    pub excludes: String,
    pub package_includes: String,
    pub package_excludes: String,
    pub class_includes: String,
    pub class_excludes: String,
    pub feature_includes: String,
    pub feature_excludes: String,
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            packages: true,
            classes: true,
            features: true,
            includes: "//".to_string(),
            excludes: String::new(),
            package_includes: String::new(),
            package_excludes: String::new(),
            class_includes: String::new(),
            class_excludes: String::new(),
            feature_includes: String::new(),
            feature_excludes: String::new(),
        }
    }
}

impl CriteriaConfig {
    /// Compiles the patterns into a criteria.
    pub fn to_criteria(&self) -> Result<RegularExpressionSelectionCriteria, CriteriaError> {
        let mut criteria = RegularExpressionSelectionCriteria::new();
        criteria.set_global_includes(&self.includes)?;
        criteria.set_global_excludes(&self.excludes)?;

        let kinds = [
            (NodeKind::Package, self.packages, &self.package_includes, &self.package_excludes),
            (NodeKind::Class, self.classes, &self.class_includes, &self.class_excludes),
            (NodeKind::Feature, self.features, &self.feature_includes, &self.feature_excludes),
        ];
        for (kind, enabled, includes, excludes) in kinds {
            criteria.set_matching(kind, enabled);
            criteria.set_includes(kind, includes)?;
            criteria.set_excludes(kind, excludes)?;
        }

        Ok(criteria)
    }
}

/// Bounds of a transitive closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosureConfig {
    /// Selects the seed nodes.
    pub start: CriteriaConfig,
    /// Nodes past which the closure does not grow. None stops nowhere.
    pub stop: Option<CriteriaConfig>,
    /// `null` follows inbound edges to the end.
    pub max_inbound_depth: Option<usize>,
    /// `null` follows outbound edges to the end.
    pub max_outbound_depth: Option<usize>,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            start: CriteriaConfig::default(),
            stop: None,
            max_inbound_depth: Some(0),
            max_outbound_depth: None,
        }
    }
}

impl ClosureConfig {
    pub fn to_closure(&self) -> Result<TransitiveClosure, CriteriaError> {
        let start = self.start.to_criteria()?;
        let mut closure = match &self.stop {
            Some(stop) => TransitiveClosure::new(start, stop.to_criteria()?),
            None => TransitiveClosure::new(start, NullSelectionCriteria),
        };
        closure.set_maximum_inbound_depth(Depth::from_limit(self.max_inbound_depth));
        closure.set_maximum_outbound_depth(Depth::from_limit(self.max_outbound_depth));
        Ok(closure)
    }
}

/// What the reports show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub show_inbounds: bool,
    pub show_outbounds: bool,
    pub show_empty_nodes: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            show_inbounds: true,
            show_outbounds: true,
            show_empty_nodes: true,
        }
    }
}

impl From<&ReportConfig> for ReportOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            show_inbounds: config.show_inbounds,
            show_outbounds: config.show_outbounds,
            show_empty_nodes: config.show_empty_nodes,
        }
    }
}

/// All settings of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Nodes whose edges are walked.
    pub scope: CriteriaConfig,
    /// Nodes edges may lead to.
    pub filter: CriteriaConfig,
    pub closure: ClosureConfig,
    pub report: ReportConfig,
    /// Longest cycle reported; `null` for no limit.
    pub maximum_cycle_length: Option<usize>,
}

impl AnalysisConfig {
    /// Reads a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses a configuration from JSON text.
    ///
    /// # Example
    ///
    /// ```
    /// use depscope::config::AnalysisConfig;
    ///
    /// let config = AnalysisConfig::from_json(r#"{"maximum_cycle_length": 3}"#).unwrap();
    /// assert_eq!(config.maximum_cycle_length, Some(3));
    /// assert!(config.scope.features);
    /// ```
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Scope and filter criteria, walked in name order.
    pub fn strategy(&self) -> Result<SortedTraversalStrategy<SelectiveTraversalStrategy>, CriteriaError> {
        let scope = self.scope.to_criteria()?;
        let filter = self.filter.to_criteria()?;
        Ok(SortedTraversalStrategy::new(SelectiveTraversalStrategy::new(scope, filter)))
    }

    pub fn transitive_closure(&self) -> Result<TransitiveClosure, CriteriaError> {
        self.closure.to_closure()
    }

    pub fn cycle_detector(&self) -> CycleDetector {
        match self.maximum_cycle_length {
            Some(length) => CycleDetector::with_maximum_cycle_length(length),
            None => CycleDetector::new(),
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions::from(&self.report)
    }
}
