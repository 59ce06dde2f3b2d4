use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("threesome density must be in (0, 1], got {0}")]
    InvalidThreesomeDensity(f64),

    #[error("multi-word threshold must be > 0")]
    InvalidMultiWordThreshold,

    #[error("length gap must be a finite, non-negative number, got {0}")]
    InvalidLengthGap(f64),

    #[error("max average length must be a finite, positive number, got {0}")]
    InvalidMaxAverageLength(f64),
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Thresholds for classifying matching content that declares no variation.
///
/// The defaults are the long-standing authoring policy:
/// - threesome when chain groups cover at least half the pairs (`0.5`)
/// - question-based when any item has more than 3 words
/// - question-based when column averages differ by more than 40 characters
/// - question-based when either column averages more than 80 characters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverSettings {
    threesome_density: f64,
    multi_word_threshold: usize,
    length_gap: f64,
    max_average_length: f64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            threesome_density: 0.5,
            multi_word_threshold: 3,
            length_gap: 40.0,
            max_average_length: 80.0,
        }
    }
}

impl ResolverSettings {
    /// Creates custom resolver thresholds.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if any threshold is out of range.
    pub fn new(
        threesome_density: f64,
        multi_word_threshold: usize,
        length_gap: f64,
        max_average_length: f64,
    ) -> Result<Self, SettingsError> {
        if !(threesome_density > 0.0 && threesome_density <= 1.0) {
            return Err(SettingsError::InvalidThreesomeDensity(threesome_density));
        }
        if multi_word_threshold == 0 {
            return Err(SettingsError::InvalidMultiWordThreshold);
        }
        if !length_gap.is_finite() || length_gap < 0.0 {
            return Err(SettingsError::InvalidLengthGap(length_gap));
        }
        if !max_average_length.is_finite() || max_average_length <= 0.0 {
            return Err(SettingsError::InvalidMaxAverageLength(max_average_length));
        }

        Ok(Self {
            threesome_density,
            multi_word_threshold,
            length_gap,
            max_average_length,
        })
    }

    #[must_use]
    pub fn threesome_density(&self) -> f64 {
        self.threesome_density
    }

    #[must_use]
    pub fn multi_word_threshold(&self) -> usize {
        self.multi_word_threshold
    }

    #[must_use]
    pub fn length_gap(&self) -> f64 {
        self.length_gap
    }

    #[must_use]
    pub fn max_average_length(&self) -> f64 {
        self.max_average_length
    }
}
