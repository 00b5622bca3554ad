use serde::{Deserialize, Serialize};

use crate::core::error::{AnalogError, Result};

/// Default number of points per window.
pub const DEFAULT_WINDOW_LENGTH: usize = 7;
/// Default minimum similarity score for a window to be reported.
pub const DEFAULT_MIN_SCORE: f64 = 80.0;

/// Configuration for analog search.
///
/// Can be built in code or loaded from a TOML document:
///
/// ```toml
/// window_length = 15
/// min_score = 95.0
/// warping_window = 3   # optional, enables banded DTW
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AnalogConfig {
    /// Window length `L`: points in the current segment and in every candidate.
    pub window_length: usize,
    /// Candidates scoring below this are discarded (`score >= min_score` is kept).
    pub min_score: f64,
    /// Sakoe-Chiba radius. `None` runs the full, unbanded DTW.
    ///
    /// A band changes distances, so it is never enabled implicitly.
    pub warping_window: Option<usize>,
}

impl Default for AnalogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_LENGTH)
    }
}

impl AnalogConfig {
    pub fn new(window_length: usize) -> Self {
        Self {
            window_length,
            min_score: DEFAULT_MIN_SCORE,
            warping_window: None,
        }
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_warping_window(mut self, radius: usize) -> Self {
        self.warping_window = Some(radius);
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)
            .map_err(|e| AnalogError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a search relies on.
    pub fn validate(&self) -> Result<()> {
        if self.window_length == 0 {
            return Err(AnalogError::InvalidConfiguration(
                "window_length must be >= 1".to_string(),
            ));
        }
        if !self.min_score.is_finite() {
            return Err(AnalogError::InvalidConfiguration(format!(
                "min_score must be finite, got {}",
                self.min_score
            )));
        }
        if self.warping_window == Some(0) {
            return Err(AnalogError::InvalidConfiguration(
                "warping_window must be >= 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}
