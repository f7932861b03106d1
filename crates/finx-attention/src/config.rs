use finx_core::ValidationError;
use serde::{Deserialize, Serialize};

use crate::model::Source;

/// Per-source weights of the composite. They are applied as given and not
/// renormalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceWeights {
    pub mention: f64,
    pub article: f64,
    pub search: f64,
}

impl Default for SourceWeights {
    fn default() -> Self {
        Self {
            mention: 0.35,
            article: 0.35,
            search: 0.30,
        }
    }
}

impl SourceWeights {
    pub fn weight(&self, source: Source) -> f64 {
        match source {
            Source::Mention => self.mention,
            Source::Article => self.article,
            Source::Search => self.search,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttentionConfig {
    /// Prior periods starting within this many days of the scored period
    /// form the baseline.
    pub baseline_days: i64,
    pub weights: SourceWeights,
    /// Keep only the first `top_n` ranked entities.
    pub top_n: Option<usize>,
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self {
            baseline_days: 90,
            weights: SourceWeights::default(),
            top_n: None,
        }
    }
}

impl AttentionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.baseline_days < 1 {
            return Err(ValidationError::parameter(
                "attention.baseline_days",
                "must be >= 1",
            ));
        }
        for (name, value) in [
            ("attention.weights.mention", self.weights.mention),
            ("attention.weights.article", self.weights.article),
            ("attention.weights.search", self.weights.search),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::parameter(name, "must be finite"));
            }
        }
        if self.top_n == Some(0) {
            return Err(ValidationError::parameter("attention.top_n", "must be >= 1"));
        }
        Ok(())
    }
}
