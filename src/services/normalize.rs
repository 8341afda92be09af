//! Normalization of analysis service responses.
//!
//! The service is not contractually bound to one response shape. This module
//! accepts both sentiment schemas it has emitted, tolerates missing or
//! malformed entity lists, and clamps out-of-range scores instead of
//! rejecting them.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::NormalizationError;
use crate::models::{AnalysisResult, Entity, RawAnalysisResponse, SentimentLabel, SentimentResult};

const POSITIVE_KEYS: &[&str] = &["positive", "pos"];
const NEUTRAL_KEYS: &[&str] = &["neutral", "neu"];
const NEGATIVE_KEYS: &[&str] = &["negative", "neg"];
const COMPOUND_KEYS: &[&str] = &["compound"];
const SCORE_KEYS: &[&str] = &["score", "confidence"];
const CATEGORY_KEYS: &[&str] = &["category", "label", "type"];

/// Decode and normalize a raw response body.
pub fn normalize(raw: &RawAnalysisResponse) -> Result<AnalysisResult, NormalizationError> {
    let value: Value = serde_json::from_slice(raw.as_bytes())
        .map_err(|e| NormalizationError::InvalidJson(e.to_string()))?;
    normalize_value(&value)
}

/// Normalize an already-decoded response.
pub fn normalize_value(value: &Value) -> Result<AnalysisResult, NormalizationError> {
    let obj = value.as_object().ok_or(NormalizationError::NotAnObject)?;

    let summary = obj
        .get("summary")
        .and_then(coerce_string)
        .ok_or(NormalizationError::MissingSummary)?;

    let entities = obj.get("entities").map(parse_entities).unwrap_or_default();

    let sentiment = obj
        .get("sentiment")
        .and_then(parse_sentiment)
        .ok_or(NormalizationError::UnrecognizedSentiment)?;

    Ok(AnalysisResult::new(summary, entities, sentiment))
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_entities(value: &Value) -> Vec<Entity> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Vec::new(),
        other => {
            warn!("Ignoring entities field of unexpected type: {}", type_name(other));
            return Vec::new();
        }
    };

    let entities: Vec<Entity> = items.iter().filter_map(entity_from_value).collect();
    let dropped = items.len() - entities.len();
    if dropped > 0 {
        warn!("Dropped {} malformed entities of {}", dropped, items.len());
    }
    entities
}

/// Decompose `["text", "category"]` or `{"text": ..., "category"|"label"|"type": ...}`.
fn entity_from_value(value: &Value) -> Option<Entity> {
    match value {
        Value::Array(pair) => match pair.as_slice() {
            [Value::String(text), Value::String(category)] => {
                Some(Entity::new(text.clone(), category.clone()))
            }
            _ => None,
        },
        Value::Object(obj) => {
            let text = obj.get("text")?.as_str()?;
            let category = CATEGORY_KEYS
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_str))?;
            Some(Entity::new(text, category))
        }
        _ => None,
    }
}

fn parse_sentiment(value: &Value) -> Option<SentimentResult> {
    let obj = match value {
        Value::Object(obj) => obj,
        // Transformer pipelines return a one-element list for a single input.
        Value::Array(items) if items.len() == 1 => items[0].as_object()?,
        _ => return None,
    };

    if let Some(distribution) = parse_distribution(obj) {
        return Some(distribution);
    }
    parse_classification(obj)
}

fn parse_distribution(obj: &Map<String, Value>) -> Option<SentimentResult> {
    let positive = number_field(obj, POSITIVE_KEYS)?;
    let neutral = number_field(obj, NEUTRAL_KEYS)?;
    let negative = number_field(obj, NEGATIVE_KEYS)?;
    let compound = number_field(obj, COMPOUND_KEYS)?;

    debug!("Sentiment payload matches distribution schema");
    Some(SentimentResult::distribution(
        check_range("positive", positive, 0.0, 1.0),
        check_range("neutral", neutral, 0.0, 1.0),
        check_range("negative", negative, 0.0, 1.0),
        check_range("compound", compound, -1.0, 1.0),
    ))
}

fn parse_classification(obj: &Map<String, Value>) -> Option<SentimentResult> {
    let label = obj.get("label")?.as_str()?;
    let score = number_field(obj, SCORE_KEYS)?;

    let mapped = SentimentLabel::from_label(label);
    if mapped == SentimentLabel::Neutral && !label.trim().eq_ignore_ascii_case("neutral") {
        warn!("Unrecognized sentiment label {:?}, treating as NEUTRAL", label);
    }

    debug!("Sentiment payload matches classification schema");
    Some(SentimentResult::classification(
        mapped,
        check_range("score", score, 0.0, 1.0),
    ))
}

fn number_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| obj.get(*key))
        .and_then(Value::as_f64)
}

/// Log out-of-range values; the sentiment constructors do the clamping.
fn check_range(name: &str, value: f64, min: f64, max: f64) -> f64 {
    if value < min || value > max {
        warn!(
            "Sentiment {} {} outside [{}, {}], clamping",
            name, value, min, max
        );
    }
    value
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(sentiment: Value) -> Value {
        json!({
            "summary": "A memo about budgets.",
            "entities": [["Paris", "GPE"], ["Alice", "PERSON"]],
            "sentiment": sentiment,
        })
    }

    #[test]
    fn test_distribution_schema() {
        let result = normalize_value(&response(json!({
            "positive": 0.7, "neutral": 0.2, "negative": 0.1, "compound": 0.6
        })))
        .unwrap();

        assert_eq!(
            *result.sentiment(),
            SentimentResult::Distribution {
                positive: 0.7,
                neutral: 0.2,
                negative: 0.1,
                compound: 0.6,
            }
        );
        assert_eq!(result.summary(), "A memo about budgets.");
        assert_eq!(result.entities().len(), 2);
    }

    #[test]
    fn test_vader_short_keys() {
        let result = normalize_value(&response(json!({
            "pos": 0.25, "neu": 0.5, "neg": 0.25, "compound": 0.0
        })))
        .unwrap();

        assert_eq!(
            *result.sentiment(),
            SentimentResult::distribution(0.25, 0.5, 0.25, 0.0)
        );
    }

    #[test]
    fn test_classification_label_and_clamp() {
        let result =
            normalize_value(&response(json!({"label": "positive", "score": 1.4}))).unwrap();

        assert_eq!(
            *result.sentiment(),
            SentimentResult::Classification {
                label: SentimentLabel::Positive,
                confidence: 1.0,
            }
        );
    }

    #[test]
    fn test_distribution_clamped() {
        let result = normalize_value(&response(json!({
            "positive": 1.2, "neutral": -0.1, "negative": 0.0, "compound": 3.0
        })))
        .unwrap();

        assert_eq!(
            *result.sentiment(),
            SentimentResult::Distribution {
                positive: 1.0,
                neutral: 0.0,
                negative: 0.0,
                compound: 1.0,
            }
        );
    }

    #[test]
    fn test_error_label_is_preserved() {
        let result = normalize_value(&response(json!({"label": "ERROR", "score": 0}))).unwrap();

        assert!(result.sentiment().is_error());
        assert_eq!(result.summary(), "A memo about budgets.");
        assert_eq!(result.entities().len(), 2);
    }

    #[test]
    fn test_unknown_label_maps_to_neutral() {
        let result = normalize_value(&response(json!({"label": "LABEL_2", "score": 0.8}))).unwrap();

        assert_eq!(
            *result.sentiment(),
            SentimentResult::classification(SentimentLabel::Neutral, 0.8)
        );
    }

    #[test]
    fn test_mixed_negative_aggregate_clamps_to_zero() {
        let result = normalize_value(&response(json!({"label": "MIXED", "score": -0.3}))).unwrap();

        assert_eq!(
            *result.sentiment(),
            SentimentResult::classification(SentimentLabel::Mixed, 0.0)
        );
    }

    #[test]
    fn test_single_element_sentiment_list() {
        let result = normalize_value(&response(json!([{"label": "NEGATIVE", "score": 0.97}])))
            .unwrap();

        assert_eq!(
            *result.sentiment(),
            SentimentResult::classification(SentimentLabel::Negative, 0.97)
        );
    }

    #[test]
    fn test_missing_summary() {
        let err = normalize_value(&json!({
            "entities": [],
            "sentiment": {"label": "POSITIVE", "score": 0.9}
        }))
        .unwrap_err();

        assert_eq!(err, NormalizationError::MissingSummary);
    }

    #[test]
    fn test_null_summary_is_missing() {
        let err = normalize_value(&json!({
            "summary": null,
            "sentiment": {"label": "POSITIVE", "score": 0.9}
        }))
        .unwrap_err();

        assert_eq!(err, NormalizationError::MissingSummary);
    }

    #[test]
    fn test_numeric_summary_is_coerced() {
        let result = normalize_value(&json!({
            "summary": 42,
            "sentiment": {"label": "POSITIVE", "score": 0.9}
        }))
        .unwrap();

        assert_eq!(result.summary(), "42");
    }

    #[test]
    fn test_missing_entities_is_empty() {
        let result = normalize_value(&json!({
            "summary": "s",
            "sentiment": {"label": "NEUTRAL", "score": 0.5}
        }))
        .unwrap();

        assert!(result.entities().is_empty());
        assert!(result.entity_groups().is_empty());
    }

    #[test]
    fn test_malformed_entities_are_dropped() {
        let result = normalize_value(&json!({
            "summary": "s",
            "entities": [
                ["Paris", "GPE"],
                ["lonely"],
                ["too", "many", "parts"],
                [1, "NUM"],
                "bare string",
                {"text": "NASA", "label": "ORG"},
                {"text": "no category"},
                null
            ],
            "sentiment": {"label": "NEUTRAL", "score": 0.5}
        }))
        .unwrap();

        assert_eq!(
            result.entities(),
            &[Entity::new("Paris", "GPE"), Entity::new("NASA", "ORG")]
        );
    }

    #[test]
    fn test_entities_of_wrong_type_are_ignored() {
        let result = normalize_value(&json!({
            "summary": "s",
            "entities": "Paris",
            "sentiment": {"label": "NEUTRAL", "score": 0.5}
        }))
        .unwrap();

        assert!(result.entities().is_empty());
    }

    #[test]
    fn test_unrecognized_sentiment() {
        let err = normalize_value(&response(json!({"mood": "happy"}))).unwrap_err();
        assert_eq!(err, NormalizationError::UnrecognizedSentiment);

        let err = normalize_value(&response(json!({"label": "POSITIVE"}))).unwrap_err();
        assert_eq!(err, NormalizationError::UnrecognizedSentiment);

        let err = normalize_value(&response(json!({"label": "POSITIVE", "score": "high"})))
            .unwrap_err();
        assert_eq!(err, NormalizationError::UnrecognizedSentiment);
    }

    #[test]
    fn test_missing_sentiment() {
        let err = normalize_value(&json!({"summary": "s", "entities": []})).unwrap_err();
        assert_eq!(err, NormalizationError::UnrecognizedSentiment);
    }

    #[test]
    fn test_non_object_and_invalid_json() {
        assert_eq!(
            normalize_value(&json!(["summary"])).unwrap_err(),
            NormalizationError::NotAnObject
        );

        let raw = RawAnalysisResponse::from_bytes(b"<html>Bad Gateway</html>".to_vec());
        assert!(matches!(
            normalize(&raw).unwrap_err(),
            NormalizationError::InvalidJson(_)
        ));
    }

    #[test]
    fn test_canonical_form_round_trips() {
        for sentiment in [
            SentimentResult::distribution(0.7, 0.2, 0.1, 0.6),
            SentimentResult::classification(SentimentLabel::Mixed, 0.4),
            SentimentResult::classification(SentimentLabel::Error, 0.0),
        ] {
            let original = AnalysisResult::new(
                "summary".to_string(),
                vec![Entity::new("Paris", "LOC"), Entity::new("Alice", "PER")],
                sentiment,
            );
            let raw = RawAnalysisResponse::from(serde_json::to_value(&original).unwrap());
            assert_eq!(normalize(&raw).unwrap(), original);
        }
    }
}
