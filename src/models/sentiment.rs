//! Canonical sentiment model.
//!
//! The analysis service has emitted two incompatible sentiment schemas over
//! its lifetime. Both are represented here as variants of one tagged union so
//! display code matches exhaustively instead of probing for fields.

use serde::{Deserialize, Serialize};

/// Compound scores within this distance of zero read as neutral.
const COMPOUND_NEUTRAL_BAND: f64 = 0.05;

/// Fixed label set of the classification schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
    /// The service failed its own sentiment analysis.
    Error,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
            Self::Mixed => "MIXED",
            Self::Error => "ERROR",
        }
    }

    /// Map a service label onto the fixed set. Case-insensitive; unknown
    /// labels read as `Neutral`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "POSITIVE" => Self::Positive,
            "NEGATIVE" => Self::Negative,
            "MIXED" => Self::Mixed,
            "ERROR" => Self::Error,
            _ => Self::Neutral,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment assessment in one of the two known schemas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SentimentResult {
    /// Three-way breakdown plus a compound score (VADER style).
    Distribution {
        positive: f64,
        neutral: f64,
        negative: f64,
        compound: f64,
    },
    /// Single label with a confidence score.
    Classification {
        label: SentimentLabel,
        confidence: f64,
    },
}

impl SentimentResult {
    /// Build a distribution, clamping each share to [0, 1] and compound to [-1, 1].
    pub fn distribution(positive: f64, neutral: f64, negative: f64, compound: f64) -> Self {
        Self::Distribution {
            positive: clamp_unit(positive),
            neutral: clamp_unit(neutral),
            negative: clamp_unit(negative),
            compound: compound.clamp(-1.0, 1.0),
        }
    }

    /// Build a classification, clamping confidence to [0, 1].
    pub fn classification(label: SentimentLabel, confidence: f64) -> Self {
        Self::Classification {
            label,
            confidence: clamp_unit(confidence),
        }
    }

    /// True when the service reported that its own sentiment analysis failed.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Classification {
                label: SentimentLabel::Error,
                ..
            }
        )
    }

    /// Overall label. Distributions are read from the compound score.
    pub fn overall_label(&self) -> SentimentLabel {
        match *self {
            Self::Classification { label, .. } => label,
            Self::Distribution { compound, .. } if compound >= COMPOUND_NEUTRAL_BAND => {
                SentimentLabel::Positive
            }
            Self::Distribution { compound, .. } if compound <= -COMPOUND_NEUTRAL_BAND => {
                SentimentLabel::Negative
            }
            Self::Distribution { .. } => SentimentLabel::Neutral,
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(SentimentLabel::from_label("positive"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_label("Negative"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_label("mixed"), SentimentLabel::Mixed);
        assert_eq!(SentimentLabel::from_label("ERROR"), SentimentLabel::Error);
        assert_eq!(SentimentLabel::from_label("LABEL_1"), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_label(""), SentimentLabel::Neutral);
    }

    #[test]
    fn test_constructors_clamp() {
        assert_eq!(
            SentimentResult::distribution(1.5, -0.2, 0.3, -4.0),
            SentimentResult::Distribution {
                positive: 1.0,
                neutral: 0.0,
                negative: 0.3,
                compound: -1.0,
            }
        );
        assert_eq!(
            SentimentResult::classification(SentimentLabel::Mixed, -0.4),
            SentimentResult::Classification {
                label: SentimentLabel::Mixed,
                confidence: 0.0,
            }
        );
    }

    #[test]
    fn test_overall_label() {
        assert_eq!(
            SentimentResult::distribution(0.7, 0.2, 0.1, 0.6).overall_label(),
            SentimentLabel::Positive
        );
        assert_eq!(
            SentimentResult::distribution(0.1, 0.2, 0.7, -0.6).overall_label(),
            SentimentLabel::Negative
        );
        assert_eq!(
            SentimentResult::distribution(0.1, 0.8, 0.1, 0.01).overall_label(),
            SentimentLabel::Neutral
        );
        assert!(SentimentResult::classification(SentimentLabel::Error, 0.0).is_error());
    }

    #[test]
    fn test_serialized_shape_is_tagged() {
        let json = serde_json::to_value(SentimentResult::classification(
            SentimentLabel::Positive,
            0.9,
        ))
        .unwrap();
        assert_eq!(json["kind"], "classification");
        assert_eq!(json["label"], "POSITIVE");
        assert_eq!(json["confidence"], 0.9);
    }
}
