//! Analysis options

use thiserror::Error;

/// Default number of errors tolerated before an analysis pass stops.
pub const DEFAULT_MAX_ERRORS: usize = 25;

/// Environment variable overriding [`AnalysisOptions::max_errors`].
pub const MAX_ERRORS_ENV: &str = "YANTRA_MAX_ERRORS";

/// Errors raised while loading options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: expected a non-negative integer")]
    InvalidInteger { key: &'static str, value: String },
}

/// Options controlling an analysis pass
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AnalysisOptions {
    /// Analysis stops once the number of errors exceeds this threshold
    pub max_errors: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }
}

impl AnalysisOptions {
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Defaults, overridden by `YANTRA_MAX_ERRORS` when it is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut options = Self::default();
        if let Some(value) = lookup(MAX_ERRORS_ENV) {
            options.max_errors = value.trim().parse().map_err(|_| ConfigError::InvalidInteger {
                key: MAX_ERRORS_ENV,
                value,
            })?;
        }
        Ok(options)
    }
}
