//! Configuration types for schedule analysis.

use pyo3::prelude::*;

use crate::error::AnalysisError;

/// How the analyzer treats inconsistent input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Drop dangling edges, let duplicates overwrite, skip cyclic tasks.
    #[default]
    Tolerant,
    /// Reject the batch with an `AnalysisError` on the first inconsistency.
    Strict,
}

impl ValidationMode {
    pub fn parse(value: &str) -> Result<Self, AnalysisError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tolerant" => Ok(Self::Tolerant),
            "strict" => Ok(Self::Strict),
            _ => Err(AnalysisError::UnknownValidationMode(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tolerant => "tolerant",
            Self::Strict => "strict",
        }
    }
}

/// Configuration for one analysis run.
#[pyclass]
#[derive(Clone, Debug)]
pub struct AnalyzerConfig {
    /// Validation mode: "tolerant" or "strict"
    #[pyo3(get, set)]
    pub validation: String,
    /// Task kinds flagged as milestones regardless of weight (case-insensitive)
    #[pyo3(get, set)]
    pub milestone_kinds: Vec<String>,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Tolerant.as_str().to_string(),
            milestone_kinds: vec![
                "milestone".to_string(),
                "release".to_string(),
                "checkpoint".to_string(),
            ],
            verbosity: 0,
        }
    }
}

impl AnalyzerConfig {
    pub fn validation_mode(&self) -> Result<ValidationMode, AnalysisError> {
        ValidationMode::parse(&self.validation)
    }

    pub fn strict() -> Self {
        Self {
            validation: ValidationMode::Strict.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Whether `kind` names one of the configured milestone categories.
    pub fn is_milestone_kind(&self, kind: &str) -> bool {
        let kind = kind.trim();
        self.milestone_kinds
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(kind))
    }
}

#[pymethods]
impl AnalyzerConfig {
    #[new]
    #[pyo3(signature = (validation=None, milestone_kinds=None, verbosity=None))]
    fn new(
        validation: Option<String>,
        milestone_kinds: Option<Vec<String>>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            validation: validation.unwrap_or(defaults.validation),
            milestone_kinds: milestone_kinds.unwrap_or(defaults.milestone_kinds),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AnalyzerConfig(validation={:?}, milestone_kinds={:?}, verbosity={})",
            self.validation, self.milestone_kinds, self.verbosity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.validation_mode().unwrap(), ValidationMode::Tolerant);
        assert_eq!(config.verbosity, 0);
        assert!(config.is_milestone_kind("milestone"));
        assert!(config.is_milestone_kind("Release"));
        assert!(!config.is_milestone_kind("task"));
    }

    #[test]
    fn test_validation_mode_parse() {
        assert_eq!(ValidationMode::parse("STRICT").unwrap(), ValidationMode::Strict);
        assert_eq!(
            ValidationMode::parse(" tolerant ").unwrap(),
            ValidationMode::Tolerant
        );
        assert!(matches!(
            ValidationMode::parse("lenient"),
            Err(AnalysisError::UnknownValidationMode(mode)) if mode == "lenient"
        ));
    }

    #[test]
    fn test_strict_config() {
        let config = AnalyzerConfig::strict();
        assert_eq!(config.validation_mode().unwrap(), ValidationMode::Strict);
        assert_eq!(config.milestone_kinds.len(), 3);
    }
}
