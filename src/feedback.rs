//! Feedback validation and label correction.
//!
//! A feedback submission moves through a fixed sequence: the raw form input
//! is validated into a [`Feedback`] value (or rejected outright), the
//! corrected label is derived from the user's verdict, the verdict counters
//! and per-outcome histogram are updated, and the corrected label is
//! forwarded to the data collection service. The types here cover the
//! validation and correction rules; the handler in
//! `crate::handlers::feedback` drives the sequence.

use crate::error::{AppError, AppResult};

/// The one verdict string that flips a prediction.
///
/// Matching is exact: capitalization, whitespace, or any other variation is
/// treated as confirmation of the prediction.
const FLIP_VERDICT: &str = "incorrect";

/// A sentiment label as produced by the model service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    /// Convert the model service's numeric label; anything outside {0, 1}
    /// is rejected.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Sentiment::Negative),
            1 => Some(Sentiment::Positive),
            _ => None,
        }
    }

    /// Parse a form-submitted label: integer parse first, then the {0, 1}
    /// range check. Surrounding whitespace is tolerated.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().and_then(Self::from_i64)
    }

    /// The opposite label.
    pub fn flipped(self) -> Self {
        match self {
            Sentiment::Negative => Sentiment::Positive,
            Sentiment::Positive => Sentiment::Negative,
        }
    }

    /// Numeric form used on the wire to the data collection service.
    pub fn as_u8(self) -> u8 {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Positive => 1,
        }
    }

    /// Human-readable form used in rendered pages.
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Positive => "Positive",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated feedback submission.
///
/// Construction through [`Feedback::new`] is the only way to obtain a value,
/// so holding one guarantees the predicted label was exactly 0 or 1. The
/// verdict string is kept exactly as submitted because it flows into the
/// `prediction_outcome` metric label unchanged.
#[derive(Debug, Clone)]
pub struct Feedback {
    review: String,
    predicted: Sentiment,
    verdict: String,
}

impl Feedback {
    /// Validate raw form fields into a feedback record.
    ///
    /// Only the predicted label is validated; any verdict string is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when `predicted_sentiment` does not
    /// parse to an integer equal to 0 or 1. Callers must reject the request
    /// before touching any metric.
    pub fn new(review: String, predicted_sentiment: &str, verdict: String) -> AppResult<Self> {
        let predicted = Sentiment::parse(predicted_sentiment).ok_or_else(|| {
            AppError::Validation(format!(
                "predicted_sentiment must be 0 or 1, got {:?}",
                predicted_sentiment
            ))
        })?;

        Ok(Self {
            review,
            predicted,
            verdict,
        })
    }

    pub fn review(&self) -> &str {
        &self.review
    }

    pub fn predicted(&self) -> Sentiment {
        self.predicted
    }

    /// The verdict string exactly as submitted.
    pub fn verdict(&self) -> &str {
        &self.verdict
    }

    /// Whether the user flagged the prediction as wrong.
    ///
    /// Decides both which verdict counter increments and whether the label
    /// is flipped before forwarding.
    pub fn prediction_was_incorrect(&self) -> bool {
        self.verdict == FLIP_VERDICT
    }

    /// The label forwarded to the data collection service: flipped when the
    /// user flagged the prediction as wrong, the prediction itself
    /// otherwise.
    pub fn corrected(&self) -> Sentiment {
        if self.prediction_was_incorrect() {
            self.predicted.flipped()
        } else {
            self.predicted
        }
    }

    /// Review length in characters, as observed by the length histograms.
    pub fn review_chars(&self) -> f64 {
        self.review.chars().count() as f64
    }
}
